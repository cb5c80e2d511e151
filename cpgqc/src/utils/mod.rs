//! Small helpers shared by the data structures and the pipeline stages.
//!
//! - Macros for builder-style `with_*` setters and borrowed getters.
//! - Missing-value detection for raw text cells.
//! - Frame column name listing.

use polars::prelude::*;

/// Text cells treated as missing when a table is read.
///
/// Matches the conventional markers spreadsheet and dataframe tools emit for
/// empty values.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// Returns true if the (already trimmed) cell is a missing-value marker.
#[inline]
pub fn is_na(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

/// Column names of a frame, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

#[macro_export]
macro_rules! plsmallstr {
    ($string: expr) => {
        PlSmallStr::from($string)
    };
    () => {
        PlSmallStr::from("")
    };
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_na() {
        assert!(is_na(""));
        assert!(is_na("NA"));
        assert!(is_na("nan"));
        assert!(is_na("NULL"));
        assert!(!is_na("0"));
        assert!(!is_na("abc"));
        assert!(!is_na("na "));
    }

    #[test]
    fn test_column_names() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("b".into(), &[1i64])),
            Column::from(Series::new("a".into(), &[2i64])),
        ])
        .unwrap();
        assert_eq!(column_names(&df), vec!["b", "a"]);
    }
}
