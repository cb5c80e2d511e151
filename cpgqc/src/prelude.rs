pub use crate::data_structs::{
    CanonicalColumn,
    MethylationTable,
    Provenance,
    QcSummary,
    RawTable,
};
pub use crate::error::{
    IngestError,
    ValidationError,
};
pub use crate::io::{
    read_table,
    Delimiter,
    TableWriter,
};
pub use crate::tools::{
    canonicalize,
    load_and_normalize,
    load_and_normalize_with,
    run_pipeline,
    select_canonical_columns,
    summarize,
    validate,
    PipelineCache,
    ValidationConfig,
};
