use std::fmt::Write;

use serde::{
    Deserialize,
    Serialize,
};

/// Quality-control metrics of a canonical methylation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QcSummary {
    /// Number of rows.
    pub row_count: usize,

    /// Number of distinct CpG identifiers.
    pub unique_cpg: usize,

    /// Percentage of rows without a beta value.
    pub missing_beta_pct: f64,

    /// Beta values below 0 or above 1.
    pub out_of_range_beta_count: usize,

    pub beta_min: f64,

    /// Median beta, interpolated between the two middle values for even
    /// counts.
    pub beta_median: f64,

    pub beta_max: f64,
}

impl QcSummary {
    /// Metric names, in reporting order.
    pub const NAMES: [&'static str; 7] = [
        "row_count",
        "unique_cpg",
        "missing_beta_pct",
        "out_of_range_beta_count",
        "beta_min",
        "beta_median",
        "beta_max",
    ];

    /// The summary as an ordered name → value mapping.
    pub fn metrics(&self) -> [(&'static str, f64); 7] {
        [
            (Self::NAMES[0], self.row_count as f64),
            (Self::NAMES[1], self.unique_cpg as f64),
            (Self::NAMES[2], self.missing_beta_pct),
            (Self::NAMES[3], self.out_of_range_beta_count as f64),
            (Self::NAMES[4], self.beta_min),
            (Self::NAMES[5], self.beta_median),
            (Self::NAMES[6], self.beta_max),
        ]
    }

    /// Looks a metric up by name.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<f64> {
        self.metrics()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Generates a human-readable report.
    pub fn display_long(&self) -> anyhow::Result<String> {
        let mut buf = String::new();

        writeln!(buf, "Rows: {}", self.row_count)?;
        writeln!(buf, "Unique CpGs: {}", self.unique_cpg)?;
        writeln!(buf, "Missing beta %: {:.2}%", self.missing_beta_pct)?;
        writeln!(buf, "Out-of-range beta: {}", self.out_of_range_beta_count)?;
        writeln!(buf)?;
        write!(
            buf,
            "Beta stats: min={:.3}, median={:.3}, max={:.3}",
            self.beta_min, self.beta_median, self.beta_max
        )?;

        Ok(buf)
    }
}
