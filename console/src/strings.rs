macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod app {
    define_strings! {
        PAGE_TITLE = "CpG Methylation MVP";
        TITLE = "CpG Upload → Parse → Normalize";
        LAYOUT = "wide";
        CAPTION =
            "Educational demo only. Not medical advice. No raw upload data is \
            logged or displayed outside your session.";
        DESCRIPTION =
            "Upload a **CSV or TSV** containing CpG methylation values. The app \
            validates and normalizes your data into a canonical schema for \
            downstream analysis.";
    }
}

pub mod help {
    define_strings! {
        FILE = "Path to a CSV/TSV file with CpG methylation values";
        NAME =
            "File name recorded as the table source. Defaults to the name of \
            FILE. Its extension (.csv/.tsv) also selects the delimiter.";
        JSON = "Print the QC summary as JSON instead of a report";
        HEAD = "Number of canonical rows to preview";
        OUTPUT =
            "Where to write the canonical table. A .tsv extension selects tab \
            separation, anything else comma.";
        TSV = "Write tab separated output regardless of the output extension";
        VERBOSE = "Increase log verbosity (-v info, -vv debug, -vvv trace)";
        LAYOUT = "Report layout";
    }
}
