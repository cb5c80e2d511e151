//! Reading uploads into [`RawTable`](crate::data_structs::RawTable)s and
//! writing canonical tables back out.

mod read;
mod write;

pub use read::{
    read_table,
    Delimiter,
};
pub use write::TableWriter;
