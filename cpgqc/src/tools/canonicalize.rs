use itertools::Itertools;
use log::debug;

use crate::data_structs::{
    CanonicalColumn,
    RawTable,
};

/// Resolves which source column becomes which canonical column.
///
/// For every canonical column the aliases are tried in priority order
/// against the source names (trimmed, case-insensitive). The first alias that
/// matches wins; when several source names match it, the leftmost does. A
/// source column already named exactly like the canonical column is kept as
/// that column's source.
pub fn rename_plan<S: AsRef<str>>(names: &[S]) -> Vec<(String, CanonicalColumn)> {
    let keys = names
        .iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .collect_vec();

    CanonicalColumn::ALL
        .into_iter()
        .filter_map(|canonical| {
            if let Some(exact) = names.iter().find(|n| n.as_ref() == canonical.as_str()) {
                return Some((exact.as_ref().to_string(), canonical));
            }
            canonical
                .aliases()
                .iter()
                .find_map(|alias| {
                    let alias = alias.to_lowercase();
                    keys.iter().position(|k| *k == alias)
                })
                .map(|idx| (names[idx].as_ref().to_string(), canonical))
        })
        .collect()
}

/// Renames known alias columns to their canonical names.
///
/// Total and idempotent: unmatched columns pass through untouched and in
/// place.
pub fn canonicalize(table: RawTable) -> RawTable {
    let plan = rename_plan(&table.column_names());
    debug!(
        "Column mapping: {}",
        plan.iter()
            .map(|(from, to)| format!("{from} -> {to}"))
            .join(", ")
    );

    table
        .rename_columns(&plan)
        .expect("rename targets are unique and never clash with unrenamed columns")
}

/// Keeps the canonical columns present in `table`, in canonical order.
pub fn select_canonical_columns(table: &RawTable) -> RawTable {
    let keep = CanonicalColumn::colnames()
        .into_iter()
        .filter(|name| table.has_column(name))
        .collect_vec();
    table
        .select(&keep)
        .expect("selected names are filtered to existing columns")
}
