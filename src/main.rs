use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use inpainter::{cli, logger};

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();

    let console = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger::init(args.log_file.clone(), console);

    cli::run(args)
}
