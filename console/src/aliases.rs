use std::io::Write;

use console::style;
use cpgqc::prelude::*;
use itertools::Itertools;

/// Prints every canonical column with its recognized source names.
pub fn print_aliases<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let width = CanonicalColumn::colnames()
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or_default();

    for column in CanonicalColumn::ALL {
        let marker = if column.is_required() {
            style("required").red().to_string()
        }
        else {
            style("optional").dim().to_string()
        };
        writeln!(
            out,
            "{:<width$}  {}  {}",
            column.as_str(),
            marker,
            column.aliases().iter().join(", "),
        )?;
    }
    Ok(())
}
