//! The pipeline stages: canonicalization, validation, analysis and the
//! orchestrator composing them.

pub mod analyze;
pub mod canonicalize;
pub mod pipeline;
pub mod validate;

pub use analyze::summarize;
pub use canonicalize::{
    canonicalize,
    rename_plan,
    select_canonical_columns,
};
pub use pipeline::{
    load_and_normalize,
    load_and_normalize_with,
    run_pipeline,
    PipelineCache,
    DEFAULT_SOURCE_NAME,
};
pub use validate::{
    ensure_beta_in_range,
    ensure_beta_numeric,
    ensure_non_empty,
    ensure_required_columns,
    validate,
    ValidationConfig,
};
