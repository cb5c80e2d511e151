use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use cpgqc::prelude::*;

use crate::qc::load_file;
use crate::strings::help;

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[arg(value_parser, help = help::FILE)]
    pub file: PathBuf,

    #[arg(short, long, required = true, help = help::OUTPUT)]
    pub output: PathBuf,

    #[arg(long, help = help::NAME)]
    pub name: Option<String>,

    #[arg(long, default_value_t = false, help = help::TSV)]
    pub tsv: bool,
}

impl NormalizeArgs {
    fn delimiter(&self) -> Delimiter {
        if self.tsv {
            return Delimiter::Tab;
        }
        self.output
            .to_str()
            .and_then(Delimiter::from_filename)
            .unwrap_or(Delimiter::Comma)
    }

    pub fn run<W: Write>(
        &self,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let table = load_file(&self.file, self.name.as_deref())?;

        let sink = File::create(&self.output).with_context(|| {
            format!("Failed to create {}", self.output.display())
        })?;
        let mut writer = TableWriter::new(BufWriter::new(sink), self.delimiter());
        writer.write_table(&table)?;
        writer.into_inner().flush()?;

        writeln!(
            out,
            "[{}] Wrote {} rows to {}",
            style("V").green(),
            style(table.height()).green(),
            self.output.display()
        )?;
        Ok(())
    }
}
