use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

/// The fixed column vocabulary every upload is normalized into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CanonicalColumn {
    CpgId,
    Beta,
    Chrom,
    Pos,
    Gene,
    Pval,
}

impl CanonicalColumn {
    /// All canonical columns, in canonical order.
    pub const ALL: [CanonicalColumn; 6] = [
        CanonicalColumn::CpgId,
        CanonicalColumn::Beta,
        CanonicalColumn::Chrom,
        CanonicalColumn::Pos,
        CanonicalColumn::Gene,
        CanonicalColumn::Pval,
    ];

    /// Returns the canonical column name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CanonicalColumn::CpgId => "cpg_id",
            CanonicalColumn::Beta => "beta",
            CanonicalColumn::Chrom => "chrom",
            CanonicalColumn::Pos => "pos",
            CanonicalColumn::Gene => "gene",
            CanonicalColumn::Pval => "pval",
        }
    }

    /// Recognized source names, highest priority first.
    ///
    /// The first entry is always the canonical name itself, which keeps
    /// canonicalization idempotent.
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::CpgId => {
                &["cpg_id", "cpg", "probe", "probe_id", "CpG", "cgid"]
            },
            CanonicalColumn::Beta => {
                &["beta", "beta_value", "methylation_level", "methylation", "Beta"]
            },
            CanonicalColumn::Chrom => &["chrom", "chr", "chromosome"],
            CanonicalColumn::Pos => &["pos", "position", "bp", "start"],
            CanonicalColumn::Gene => &["gene", "symbol", "gene_symbol"],
            CanonicalColumn::Pval => &["pval", "p_value", "p.value"],
        }
    }

    /// Whether the column must be present for a table to validate under the
    /// default configuration.
    pub const fn is_required(&self) -> bool {
        matches!(self, CanonicalColumn::CpgId | CanonicalColumn::Beta)
    }

    /// Returns an array containing all canonical column names.
    pub const fn colnames() -> [&'static str; 6] {
        [
            CanonicalColumn::CpgId.as_str(),
            CanonicalColumn::Beta.as_str(),
            CanonicalColumn::Chrom.as_str(),
            CanonicalColumn::Pos.as_str(),
            CanonicalColumn::Gene.as_str(),
            CanonicalColumn::Pval.as_str(),
        ]
    }

    /// Checks if the given string is exactly a canonical column name.
    pub fn has_name(name: &str) -> bool {
        Self::colnames().contains(&name)
    }
}

impl Display for CanonicalColumn {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalColumn {
    type Err = String;

    /// Parses an exact canonical name. Aliases are resolved by
    /// canonicalization, not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown canonical column: {s}"))
    }
}

/// Provenance columns appended to an exported table.
pub const SOURCE_FILE_COL: &str = "source_file";
pub const UPLOADED_AT_COL: &str = "uploaded_at";
