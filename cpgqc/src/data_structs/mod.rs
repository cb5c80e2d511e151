//! Core data structures of the `cpgqc` crate.
//!
//! - [`CanonicalColumn`]: the fixed column vocabulary and its alias table.
//! - [`RawTable`]: a table exactly as read, all cells as text.
//! - [`MethylationTable`]: a table in canonical schema, optionally carrying
//!   [`Provenance`].
//! - [`QcSummary`]: quality-control metrics derived from a
//!   [`MethylationTable`].
//!
//! Tables wrap a `polars::DataFrame`.

mod qc;
mod schema;
mod table;


pub use qc::QcSummary;
pub use schema::{
    CanonicalColumn,
    SOURCE_FILE_COL,
    UPLOADED_AT_COL,
};
pub use table::{
    MethylationTable,
    Provenance,
    RawTable,
};
