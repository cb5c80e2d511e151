use std::fs;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use clap::Args;
use cpgqc::prelude::*;
use log::info;
use serde::Serialize;

use crate::config::AppConfig;
use crate::report::{
    write_footer,
    write_header,
    write_section,
};
use crate::strings::help;

/// Reads `path` and runs the loading pipeline on it, recording `name` (or
/// the file's own name) as the source.
pub fn load_file(
    path: &Path,
    name: Option<&str>,
) -> anyhow::Result<MethylationTable> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path.file_name().and_then(|n| n.to_str());
    let table = load_and_normalize(&bytes, name.or(file_name))?;
    Ok(table)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source_file: &'a str,
    uploaded_at: String,
    summary:     QcSummary,
}

#[derive(Args, Debug, Clone)]
pub struct QcArgs {
    #[arg(value_parser, help = help::FILE)]
    pub file: PathBuf,

    #[arg(long, help = help::NAME)]
    pub name: Option<String>,

    #[arg(long, default_value_t = false, help = help::JSON)]
    pub json: bool,

    #[arg(long, default_value_t = 10, help = help::HEAD)]
    pub head: usize,
}

impl QcArgs {
    pub fn run<W: Write>(
        &self,
        config: &AppConfig,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let table = load_file(&self.file, self.name.as_deref())?;
        let summary = summarize(&table);
        info!(
            "{} rows, {} unique CpGs",
            summary.row_count, summary.unique_cpg
        );

        if self.json {
            let provenance = table
                .provenance()
                .context("Loaded table carries no provenance")?;
            let report = JsonReport {
                source_file: provenance.source_file(),
                uploaded_at: provenance.uploaded_at_iso(),
                summary,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            return Ok(());
        }

        write_header(out, config)?;
        write_section(out, "Canonical preview", &table.head(self.head).to_string())?;
        write_section(out, "QC summary", &summary.display_long()?)?;
        write_footer(out, config)?;
        Ok(())
    }
}
