use itertools::Itertools;
use log::debug;
use polars::prelude::*;

use crate::data_structs::{
    CanonicalColumn,
    MethylationTable,
    RawTable,
};
use crate::error::ValidationError;
use crate::{
    getter_fn,
    plsmallstr,
    with_field_fn,
};

/// Which canonical columns a table must provide.
///
/// `cpg_id` and `beta` are always needed downstream; listing further columns
/// (e.g. `chrom`) makes them mandatory too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    required_columns: Vec<CanonicalColumn>,
}

impl ValidationConfig {
    with_field_fn!(required_columns, Vec<CanonicalColumn>);

    getter_fn!(required_columns, Vec<CanonicalColumn>);

    pub fn new(required_columns: Vec<CanonicalColumn>) -> Self {
        Self { required_columns }
    }

    /// Configured columns followed by any of `cpg_id`/`beta` not listed.
    fn effective_required(&self) -> Vec<CanonicalColumn> {
        self.required_columns
            .iter()
            .copied()
            .chain([CanonicalColumn::CpgId, CanonicalColumn::Beta])
            .unique()
            .collect()
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_columns: CanonicalColumn::ALL
                .into_iter()
                .filter(CanonicalColumn::is_required)
                .collect(),
        }
    }
}

pub fn ensure_non_empty(n_rows: usize) -> Result<(), ValidationError> {
    if n_rows == 0 {
        Err(ValidationError::EmptyTable)
    }
    else {
        Ok(())
    }
}

/// Fails listing every required column missing from `table`, in the order
/// given.
pub fn ensure_required_columns(
    table: &RawTable,
    required: &[CanonicalColumn],
) -> Result<(), ValidationError> {
    let missing = required
        .iter()
        .filter(|c| !table.has_column(c.as_str()))
        .map(|c| c.as_str().to_string())
        .collect_vec();
    if missing.is_empty() {
        Ok(())
    }
    else {
        Err(ValidationError::MissingColumns(missing))
    }
}

/// Parses the beta cells.
///
/// Null cells stay missing. Present cells that do not parse as numbers fail
/// the check, reporting how many there were.
pub fn ensure_beta_numeric(
    beta: &StringChunked
) -> Result<Vec<Option<f64>>, ValidationError> {
    let mut invalid = 0usize;
    let parsed = beta
        .into_iter()
        .map(|cell| {
            cell.and_then(|text| {
                let value = text.trim().parse::<f64>();
                if value.is_err() && !text.trim().is_empty() {
                    invalid += 1;
                }
                value.ok().filter(|v| !v.is_nan())
            })
        })
        .collect_vec();

    if invalid > 0 {
        Err(ValidationError::NonNumericBeta(invalid))
    }
    else {
        Ok(parsed)
    }
}

/// Fails if any value is outside `[0, 1]` (infinities included), reporting
/// how many were.
pub fn ensure_beta_in_range(beta: &[f64]) -> Result<(), ValidationError> {
    let out_of_range = beta
        .iter()
        .filter(|v| !(0.0..=1.0).contains(*v))
        .count();
    if out_of_range > 0 {
        Err(ValidationError::BetaOutOfRange(out_of_range))
    }
    else {
        Ok(())
    }
}

/// Validates a canonicalized table and converts it to canonical schema.
///
/// Checks run in a fixed order and the first failure is returned:
/// 1. the table has rows;
/// 2. required columns are present;
/// 3. identifiers are trimmed;
/// 4. present beta cells are numeric;
/// 5. rows lacking a beta or an identifier are dropped, and the table must
///    still have rows;
/// 6. remaining betas lie in `[0, 1]`.
///
/// The result keeps only canonical columns, in canonical order.
pub fn validate(
    table: &RawTable,
    config: &ValidationConfig,
) -> Result<MethylationTable, ValidationError> {
    ensure_non_empty(table.height())?;
    ensure_required_columns(table, &config.effective_required())?;

    let text = |column: CanonicalColumn| {
        table.text_column(column.as_str()).ok_or_else(|| {
            ValidationError::Frame(format!("{column} column is not text"))
        })
    };

    let cpg_id = text(CanonicalColumn::CpgId)?
        .into_iter()
        .map(|cell| cell.map(str::trim).filter(|id| !id.is_empty()))
        .collect_vec();
    let beta = ensure_beta_numeric(text(CanonicalColumn::Beta)?)?;

    let keep = cpg_id
        .iter()
        .zip(beta.iter())
        .map(|(id, b)| id.is_some() && b.is_some())
        .collect_vec();
    let n_kept = keep.iter().filter(|k| **k).count();
    if n_kept < keep.len() {
        debug!(
            "Dropped {} row(s) without beta or identifier",
            keep.len() - n_kept
        );
    }
    ensure_non_empty(n_kept)?;

    // Rows survive as pairs, so ids stay aligned with their betas.
    let (cpg_id, beta): (Vec<&str>, Vec<f64>) = cpg_id
        .into_iter()
        .zip(beta)
        .filter_map(|(id, b)| id.zip(b))
        .unzip();
    ensure_beta_in_range(&beta)?;

    let mut columns = vec![
        Column::from(Series::new(
            plsmallstr!(CanonicalColumn::CpgId.as_str()),
            cpg_id,
        )),
        Column::from(Series::new(
            plsmallstr!(CanonicalColumn::Beta.as_str()),
            beta,
        )),
    ];

    for canonical in [
        CanonicalColumn::Chrom,
        CanonicalColumn::Pos,
        CanonicalColumn::Gene,
        CanonicalColumn::Pval,
    ] {
        let Some(cells) = table.text_column(canonical.as_str())
        else {
            continue;
        };
        let kept = cells
            .into_iter()
            .zip(keep.iter())
            .filter_map(|(cell, k)| k.then_some(cell))
            .collect_vec();
        columns.push(Column::from(optional_column(canonical, kept)));
    }

    Ok(MethylationTable::new_unchecked(DataFrame::new(columns)?))
}

/// Parses every present cell with `parse`, keeping nulls. `None` if any
/// present cell fails.
fn parse_all<T>(
    cells: &[Option<&str>],
    parse: impl Fn(&str) -> Option<Option<T>>,
) -> Option<Vec<Option<T>>> {
    cells
        .iter()
        .map(|cell| match cell {
            Some(text) => parse(text.trim()),
            None => Some(None),
        })
        .collect()
}

/// Types an optional canonical column.
///
/// `pos` becomes Int64 and `pval` Float64 when every present cell parses;
/// otherwise, and for the other columns, cells stay text.
fn optional_column(
    canonical: CanonicalColumn,
    cells: Vec<Option<&str>>,
) -> Series {
    let name = plsmallstr!(canonical.as_str());
    match canonical {
        CanonicalColumn::Pos => {
            if let Some(values) =
                parse_all(&cells, |text| text.parse::<i64>().ok().map(Some))
            {
                return Series::new(name, values);
            }
        },
        CanonicalColumn::Pval => {
            if let Some(values) = parse_all(&cells, |text| {
                text.parse::<f64>().ok().map(|v| (!v.is_nan()).then_some(v))
            }) {
                return Series::new(name, values);
            }
        },
        _ => {},
    }
    Series::new(name, cells)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    use super::*;

    fn raw(
        header: &[&str],
        rows: &[&[Option<&str>]],
    ) -> RawTable {
        RawTable::try_from_records(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        assert_eq!(
            ValidationConfig::default().required_columns(),
            &vec![CanonicalColumn::CpgId, CanonicalColumn::Beta]
        );
    }

    #[test]
    fn test_valid_table() {
        let table = raw(&["cpg_id", "beta", "chrom"], &[
            &[Some(" cg1 "), Some("0.10"), Some("chr1")],
            &[Some("cg2"), Some("0.8"), Some("chr2")],
        ]);
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        assert_eq!(validated.height(), 2);
        assert_eq!(validated.columns(), vec![
            CanonicalColumn::CpgId,
            CanonicalColumn::Beta,
            CanonicalColumn::Chrom
        ]);
        assert_eq!(validated.cpg_id().get(0), Some("cg1"));
        assert_approx_eq!(validated.beta().get(1).unwrap(), 0.8);
    }

    #[test]
    fn test_unknown_columns_dropped_and_reordered() {
        let table = raw(&["gene", "extra", "beta", "cpg_id"], &[&[
            Some("BRCA1"),
            Some("x"),
            Some("0.5"),
            Some("cg1"),
        ]]);
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        assert_eq!(validated.columns(), vec![
            CanonicalColumn::CpgId,
            CanonicalColumn::Beta,
            CanonicalColumn::Gene
        ]);
    }

    #[test]
    fn test_empty_table() {
        let table = raw(&["cpg_id", "beta"], &[]);
        assert_eq!(
            validate(&table, &ValidationConfig::default()),
            Err(ValidationError::EmptyTable)
        );
    }

    #[rstest]
    #[case::beta(&["cpg_id", "chrom"], vec!["beta"])]
    #[case::both(&["chrom"], vec!["cpg_id", "beta"])]
    fn test_missing_columns(
        #[case] header: &[&str],
        #[case] expected: Vec<&str>,
    ) {
        let row = header.iter().map(|_| Some("x")).collect_vec();
        let table = raw(header, &[row.as_slice()]);
        let err = validate(&table, &ValidationConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingColumns(
                expected.into_iter().map(String::from).collect()
            )
        );
    }

    #[test]
    fn test_config_adds_requirements() {
        let table = raw(&["cpg_id", "beta"], &[&[Some("cg1"), Some("0.5")]]);
        let config = ValidationConfig::default()
            .with_required_columns(vec![CanonicalColumn::Chrom]);
        assert_eq!(
            validate(&table, &config),
            Err(ValidationError::MissingColumns(vec!["chrom".into()]))
        );
    }

    #[test]
    fn test_non_numeric_counts_only_present_cells() {
        let table = raw(&["cpg_id", "beta"], &[
            &[Some("cg1"), Some("abc")],
            &[Some("cg2"), None],
            &[Some("cg3"), Some("0.1x")],
            &[Some("cg4"), Some("0.4")],
        ]);
        assert_eq!(
            validate(&table, &ValidationConfig::default()),
            Err(ValidationError::NonNumericBeta(2))
        );
    }

    #[test]
    fn test_pruning_then_range() {
        let table = raw(&["cpg_id", "beta"], &[
            &[Some("cg1"), None],
            &[Some("  "), Some("5")],
            &[None, Some("0.3")],
            &[Some("cg4"), Some("0.4")],
        ]);
        // The out-of-range row has no identifier and is pruned first.
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        assert_eq!(validated.height(), 1);
        assert_eq!(validated.cpg_id().get(0), Some("cg4"));
    }

    #[test]
    fn test_pruned_rows_stay_aligned() {
        let table = raw(&["cpg_id", "beta", "chrom"], &[
            &[Some("cg1"), None, Some("chr1")],
            &[Some("cg2"), Some("0.5"), Some("chr2")],
            &[None, Some("0.3"), Some("chr3")],
            &[Some("cg4"), Some("0.4"), Some("chr4")],
        ]);
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        let pairs = validated
            .cpg_id()
            .into_iter()
            .zip(validated.beta())
            .collect_vec();
        assert_eq!(pairs, vec![
            (Some("cg2"), Some(0.5)),
            (Some("cg4"), Some(0.4))
        ]);
        let chrom = validated
            .column(CanonicalColumn::Chrom)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect_vec();
        assert_eq!(chrom, vec![Some("chr2"), Some("chr4")]);
    }

    #[rstest]
    #[case::missing_beta(&[&[Some("cg1"), None], &[Some("cg2"), Some("0.5")]])]
    #[case::blank_id_out_of_range(&[&[Some(""), Some("5")], &[Some("cg2"), Some("0.5")]])]
    fn test_single_row_survives(#[case] rows: &[&[Option<&str>; 2]]) {
        let rows: Vec<&[Option<&str>]> = rows.iter().map(|r| &r[..]).collect();
        let table = raw(&["cpg_id", "beta"], &rows);
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        assert_eq!(validated.height(), 1);
        assert_eq!(validated.cpg_id().get(0), Some("cg2"));
        assert_approx_eq!(validated.beta().get(0).unwrap(), 0.5);
    }

    #[test]
    fn test_pruning_everything_is_empty() {
        let table = raw(&["cpg_id", "beta"], &[
            &[Some("cg1"), None],
            &[Some(""), Some("0.2")],
        ]);
        assert_eq!(
            validate(&table, &ValidationConfig::default()),
            Err(ValidationError::EmptyTable)
        );
    }

    #[rstest]
    #[case::single(&["-0.1", "0.5"], 1)]
    #[case::both_sides(&["-0.1", "1.5", "1.0", "0"], 2)]
    #[case::infinite(&["inf", "0.5"], 1)]
    fn test_out_of_range(
        #[case] betas: &[&str],
        #[case] expected: usize,
    ) {
        let rows = betas
            .iter()
            .enumerate()
            .map(|(i, b)| vec![Some(format!("cg{i}")), Some(b.to_string())])
            .collect_vec();
        let table = RawTable::try_from_records(
            vec!["cpg_id".into(), "beta".into()],
            rows,
        )
        .unwrap();
        assert_eq!(
            validate(&table, &ValidationConfig::default()),
            Err(ValidationError::BetaOutOfRange(expected))
        );
    }

    #[test]
    fn test_optional_column_types() {
        let table = raw(&["cpg_id", "beta", "pos", "pval"], &[
            &[Some("cg1"), Some("0.1"), Some("100"), Some("0.01")],
            &[Some("cg2"), Some("0.2"), None, Some("1e-5")],
        ]);
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        assert_eq!(
            validated.column(CanonicalColumn::Pos).unwrap().dtype(),
            &DataType::Int64
        );
        assert_eq!(
            validated.column(CanonicalColumn::Pval).unwrap().dtype(),
            &DataType::Float64
        );

        let table = raw(&["cpg_id", "beta", "pos"], &[&[
            Some("cg1"),
            Some("0.1"),
            Some("12a"),
        ]]);
        let validated = validate(&table, &ValidationConfig::default()).unwrap();
        assert_eq!(
            validated.column(CanonicalColumn::Pos).unwrap().dtype(),
            &DataType::String
        );
    }
}
