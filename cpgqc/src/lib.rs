//! # cpgqc
//!
//! `cpgqc` ingests a single table of CpG methylation measurements, maps its
//! heterogeneous column names onto a fixed canonical schema, validates the
//! values and computes quality-control statistics for display.
//!
//! The pipeline is a chain of small stages, each consuming the previous
//! stage's output:
//!
//! ```text
//! bytes --read_table--> RawTable --canonicalize--> RawTable
//!       --validate--> MethylationTable --summarize--> QcSummary
//! ```
//!
//! [`load_and_normalize`](tools::load_and_normalize) runs reading,
//! canonicalization and validation behind one error type,
//! [`IngestError`](error::IngestError).
//!
//! ## Structure
//!
//! * [`data_structs`]: the canonical column vocabulary, table wrappers around
//!   `polars::DataFrame` and the [`QcSummary`](data_structs::QcSummary).
//! * [`io`]: delimited text reading (with delimiter sniffing) and writing.
//! * [`tools`]: canonicalization, validation, analysis and the orchestrator.
//! * [`error`]: the error taxonomy. Every message is user facing.
//!
//! ## Usage
//!
//! ```no_run
//! use cpgqc::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("methylation.tsv")?;
//!     let table = load_and_normalize(&bytes, Some("methylation.tsv"))?;
//!     let summary = summarize(&table);
//!
//!     println!("{}", table.head(10));
//!     println!("{}", summary.display_long()?);
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;
