use std::io::Write;

use anyhow::anyhow;
use log::{
    debug,
    warn,
};
use polars::prelude::*;

use super::read::Delimiter;
use crate::data_structs::MethylationTable;

/// Writes canonical tables, provenance columns included, as delimited text.
pub struct TableWriter<W: Write> {
    sink:      W,
    delimiter: Delimiter,
}

impl<W: Write> TableWriter<W> {
    pub fn new(
        sink: W,
        delimiter: Delimiter,
    ) -> Self {
        Self { sink, delimiter }
    }

    /// Writer whose delimiter follows the output file name (`.tsv` → tab,
    /// anything else → comma).
    pub fn for_filename(
        sink: W,
        filename: &str,
    ) -> Self {
        let delimiter = Delimiter::from_filename(filename).unwrap_or(Delimiter::Comma);
        Self::new(sink, delimiter)
    }

    pub fn write_table(
        &mut self,
        table: &MethylationTable,
    ) -> anyhow::Result<()> {
        let mut df = table.to_frame_with_provenance()?;
        debug!(
            "Writing {} rows with {} delimiter",
            df.height(),
            self.delimiter
        );

        CsvWriter::new(&mut self.sink)
            .include_header(true)
            .with_separator(self.delimiter.as_byte())
            .finish(&mut df)
            .map_err(|e| {
                warn!("Failed to write table: {}", e);
                anyhow!(e)
            })
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
