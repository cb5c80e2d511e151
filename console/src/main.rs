use std::io::stdout;
use std::process::exit;

use clap::{
    Parser,
    Subcommand,
};
use console::style;
use cpgqc_cli::aliases::print_aliases;
use cpgqc_cli::config::AppConfig;
use cpgqc_cli::normalize::NormalizeArgs;
use cpgqc_cli::qc::QcArgs;
use cpgqc_cli::report::set_page_title;
use cpgqc_cli::utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,

    #[clap(flatten)]
    config: AppConfig,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Validate a table and print its QC summary.
    Qc {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  QcArgs,
    },

    /// Validate a table and write it in canonical schema.
    Normalize {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  NormalizeArgs,
    },

    /// List the recognized column aliases.
    Aliases,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    match cli.command {
        MainMenu::Qc { utils, args } => {
            utils.setup()?;
            if !args.json {
                set_page_title(&cli.config);
            }
            args.run(&cli.config, &mut out)?;
        },
        MainMenu::Normalize { utils, args } => {
            utils.setup()?;
            args.run(&mut out)?;
        },
        MainMenu::Aliases => print_aliases(&mut out)?,
    }
    Ok(())
}

fn main() {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    if let Err(e) = run(cli) {
        eprintln!("{}", style(format!("{e:#}")).red());
        exit(1);
    }
}
