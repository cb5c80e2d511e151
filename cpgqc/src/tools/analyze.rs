use hashbrown::HashSet;
use statrs::statistics::{
    Data,
    Max,
    Median,
    Min,
};

use crate::data_structs::{
    MethylationTable,
    QcSummary,
};

/// Computes the QC summary of a canonical table.
///
/// Null and NaN betas count as missing and are excluded from the beta
/// statistics, which are NaN when no beta is present. `missing_beta_pct` is
/// NaN for a table without rows.
pub fn summarize(table: &MethylationTable) -> QcSummary {
    let row_count = table.height();

    let unique_cpg = table
        .cpg_id()
        .into_iter()
        .flatten()
        .collect::<HashSet<_>>()
        .len();

    let betas = table
        .beta()
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect::<Vec<f64>>();

    let missing_beta_pct =
        (row_count - betas.len()) as f64 / row_count as f64 * 100.0;
    let out_of_range_beta_count = betas
        .iter()
        .filter(|v| **v < 0.0 || **v > 1.0)
        .count();

    let (beta_min, beta_median, beta_max) = if betas.is_empty() {
        (f64::NAN, f64::NAN, f64::NAN)
    }
    else {
        let data = Data::new(betas);
        (data.min(), data.median(), data.max())
    };

    QcSummary {
        row_count,
        unique_cpg,
        missing_beta_pct,
        out_of_range_beta_count,
        beta_min,
        beta_median,
        beta_max,
    }
}
