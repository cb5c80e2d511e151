use clap::{
    ArgAction,
    Args,
};
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub struct UtilsArgs {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = crate::strings::help::VERBOSE
    )]
    pub verbose: u8,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose)
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the logger. `RUST_LOG`, when set, takes precedence over `-v`.
pub fn init_logger(verbose: u8) -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(level_for(verbose)),
    };
    builder.try_init()?;
    Ok(())
}
