use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use hashbrown::HashSet;
use itertools::Itertools;
use polars::prelude::*;

use super::schema::{
    CanonicalColumn,
    SOURCE_FILE_COL,
    UPLOADED_AT_COL,
};
use crate::error::ValidationError;
use crate::utils::column_names;
use crate::{
    getter_fn,
    plsmallstr,
};

macro_rules! get_col_fn {
    ($name: ident, $col: expr, $col_fn: ident, $rettype: ty) => {
        pub fn $name(&self) -> &$rettype {
            self.data
                .column($col)
                .and_then(|c| c.as_materialized_series().$col_fn())
                .expect("required column is checked on construction")
        }
    };
}

/// Appends `.1`, `.2`, ... to repeated header names so every column name is
/// unique, keeping the first occurrence as is.
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// A table exactly as it was read: original column names and order, every
/// cell kept as text (null when missing).
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    data: DataFrame,
}

impl RawTable {
    /// Builds a table from a header and row-major records.
    ///
    /// Every record must have as many cells as the header.
    pub fn try_from_records(
        header: Vec<String>,
        records: Vec<Vec<Option<String>>>,
    ) -> PolarsResult<Self> {
        let width = header.len();
        if let Some(bad) = records.iter().find(|r| r.len() != width) {
            return Err(PolarsError::ShapeMismatch(
                format!("record has {} cells, header has {}", bad.len(), width)
                    .into(),
            ));
        }

        let mut columns: Vec<Vec<Option<String>>> =
            (0..width).map(|_| Vec::with_capacity(records.len())).collect();
        for record in records {
            for (column, cell) in columns.iter_mut().zip(record) {
                column.push(cell);
            }
        }

        let frame_columns = dedup_names(header)
            .into_iter()
            .zip(columns)
            .map(|(name, values)| {
                Column::from(Series::new(plsmallstr!(name), values))
            })
            .collect_vec();

        Ok(Self {
            data: DataFrame::new(frame_columns)?,
        })
    }

    /// Wraps an existing frame, casting every non-text column to text.
    pub fn try_from_frame(df: DataFrame) -> PolarsResult<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|c| {
                if c.dtype() == &DataType::String {
                    Ok(c.clone())
                }
                else {
                    c.cast(&DataType::String)
                }
            })
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(Self {
            data: DataFrame::new(columns)?,
        })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.data)
    }

    pub fn has_column(
        &self,
        name: &str,
    ) -> bool {
        self.data.column(name).is_ok()
    }

    /// Returns the text cells of a column, if it exists.
    pub fn text_column(
        &self,
        name: &str,
    ) -> Option<&StringChunked> {
        self.data
            .column(name)
            .ok()
            .and_then(|c| c.as_materialized_series().str().ok())
    }

    /// Renames columns according to `(old, new)` pairs.
    pub fn rename_columns(
        mut self,
        plan: &[(String, CanonicalColumn)],
    ) -> PolarsResult<Self> {
        for (old, new) in plan {
            if old != new.as_str() {
                self.data.rename(old, plsmallstr!(new.as_str()))?;
            }
        }
        Ok(self)
    }

    /// Keeps only the named columns, in the given order.
    pub fn select(
        &self,
        names: &[&str],
    ) -> PolarsResult<Self> {
        Ok(Self {
            data: self.data.select(names.iter().copied())?,
        })
    }
}

/// Where a validated table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    source_file: String,
    uploaded_at: DateTime<Utc>,
}

impl Provenance {
    getter_fn!(source_file, String);

    getter_fn!(uploaded_at, DateTime<Utc>);

    pub fn new(
        source_file: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            uploaded_at,
        }
    }

    /// Stamps `source_file` with the current UTC time.
    pub fn now(source_file: impl Into<String>) -> Self {
        Self::new(source_file, Utc::now())
    }

    /// ISO-8601 timestamp with microsecond precision and explicit UTC offset.
    pub fn uploaded_at_iso(&self) -> String {
        self.uploaded_at
            .to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}

/// A table in canonical schema.
///
/// Always holds `cpg_id` (text) and `beta` (Float64); optional canonical
/// columns follow in canonical order. Tables produced by validation also
/// guarantee trimmed non-empty identifiers and finite betas in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethylationTable {
    data:       DataFrame,
    provenance: Option<Provenance>,
}

impl MethylationTable {
    // COLUMN GETTERS
    get_col_fn!(cpg_id, CanonicalColumn::CpgId.as_str(), str, StringChunked);

    get_col_fn!(beta, CanonicalColumn::Beta.as_str(), f64, Float64Chunked);

    // CONSTRUCTORS
    /// Caller guarantees the frame layout described on the type.
    pub(crate) fn new_unchecked(data: DataFrame) -> Self {
        Self {
            data,
            provenance: None,
        }
    }

    /// Wraps an arbitrary frame for analysis.
    ///
    /// Non-canonical columns are dropped and the rest are put in canonical
    /// order. `cpg_id` is cast to text and `beta` to Float64; a text `beta`
    /// is rejected since its cells would need validation first. Null cells
    /// are kept.
    pub fn try_from_frame(df: DataFrame) -> Result<Self, ValidationError> {
        let missing = [CanonicalColumn::CpgId, CanonicalColumn::Beta]
            .into_iter()
            .filter(|c| df.column(c.as_str()).is_err())
            .map(|c| c.as_str().to_string())
            .collect_vec();
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns(missing));
        }

        let mut columns = Vec::with_capacity(CanonicalColumn::ALL.len());
        for canonical in CanonicalColumn::ALL {
            let Ok(column) = df.column(canonical.as_str())
            else {
                continue;
            };
            let column = match canonical {
                CanonicalColumn::CpgId => column.cast(&DataType::String)?,
                CanonicalColumn::Beta => {
                    if column.dtype() == &DataType::String {
                        return Err(ValidationError::Frame(
                            "beta column holds text; validate it first".into(),
                        ));
                    }
                    column.cast(&DataType::Float64)?
                },
                _ => column.clone(),
            };
            columns.push(column);
        }

        Ok(Self::new_unchecked(DataFrame::new(columns)?))
    }

    pub fn with_provenance(
        mut self,
        provenance: Provenance,
    ) -> Self {
        self.provenance = Some(provenance);
        self
    }

    // CONVERSION
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// The frame with `source_file` and `uploaded_at` appended, when
    /// provenance is set.
    pub fn to_frame_with_provenance(&self) -> PolarsResult<DataFrame> {
        let mut df = self.data.clone();
        if let Some(provenance) = &self.provenance {
            let height = df.height();
            let source = vec![provenance.source_file().as_str(); height];
            let uploaded_at = provenance.uploaded_at_iso();
            let stamps = vec![uploaded_at.as_str(); height];
            df.with_column(Series::new(plsmallstr!(SOURCE_FILE_COL), source))?;
            df.with_column(Series::new(plsmallstr!(UPLOADED_AT_COL), stamps))?;
        }
        Ok(df)
    }

    // ACCESS
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    pub fn head(
        &self,
        n: usize,
    ) -> DataFrame {
        self.data.head(Some(n))
    }

    /// Canonical columns present, in order.
    pub fn columns(&self) -> Vec<CanonicalColumn> {
        CanonicalColumn::ALL
            .into_iter()
            .filter(|c| self.data.column(c.as_str()).is_ok())
            .collect()
    }

    pub fn column(
        &self,
        column: CanonicalColumn,
    ) -> Option<&Series> {
        self.data
            .column(column.as_str())
            .ok()
            .map(|c| c.as_materialized_series())
    }

    /// Non-null beta values, in row order.
    pub fn beta_values(&self) -> Vec<f64> {
        self.beta().into_iter().flatten().collect()
    }
}
