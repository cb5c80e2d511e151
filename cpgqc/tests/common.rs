use std::fmt::Write;

/// Builds synthetic uploads with a configurable header and defects.
pub struct DemoUploadBuilder {
    header:       Vec<String>,
    delimiter:    char,
    n_rows:       usize,
    missing_beta: Vec<usize>,
    bad_beta:     Vec<usize>,
}

#[allow(dead_code)]
impl DemoUploadBuilder {
    pub fn new(n_rows: usize) -> Self {
        Self {
            header: ["cpg_id", "beta", "chrom", "pos"]
                .map(String::from)
                .to_vec(),
            delimiter: ',',
            n_rows,
            missing_beta: Vec::new(),
            bad_beta: Vec::new(),
        }
    }

    /// Replaces the header names, keeping the column layout
    /// (id, beta, chromosome, position).
    pub fn with_header(
        mut self,
        header: [&str; 4],
    ) -> Self {
        self.header = header.map(String::from).to_vec();
        self
    }

    pub fn with_delimiter(
        mut self,
        delimiter: char,
    ) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_missing_beta(
        mut self,
        rows: &[usize],
    ) -> Self {
        self.missing_beta = rows.to_vec();
        self
    }

    pub fn with_bad_beta(
        mut self,
        rows: &[usize],
    ) -> Self {
        self.bad_beta = rows.to_vec();
        self
    }

    /// Beta of row `i`: evenly spread over `[0, 1]`.
    pub fn beta(
        &self,
        i: usize,
    ) -> f64 {
        if self.n_rows <= 1 {
            0.5
        }
        else {
            i as f64 / (self.n_rows - 1) as f64
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let sep = self.delimiter.to_string();
        let mut out = self.header.join(&sep);
        out.push('\n');
        for i in 0..self.n_rows {
            let beta = if self.missing_beta.contains(&i) {
                String::new()
            }
            else if self.bad_beta.contains(&i) {
                "high".to_string()
            }
            else {
                format!("{:.4}", self.beta(i))
            };
            let fields = [
                format!("cg{:08}", i),
                beta,
                format!("chr{}", i % 3 + 1),
                (1000 + i * 10).to_string(),
            ];
            writeln!(out, "{}", fields.join(&sep)).unwrap();
        }
        out.into_bytes()
    }
}
