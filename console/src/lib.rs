pub mod aliases;
pub mod config;
pub mod normalize;
pub mod qc;
pub mod report;
pub mod strings;
pub mod utils;
