use clap::Parser;
use miette::Result;
use rsrc::cli::{Cli, Commands};
use rsrc::output::Printer;
use tracing_subscriber::filter::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => rsrc::cli::build::run(args, &printer)?,
        Commands::Init(args) => rsrc::cli::init::run(args, &printer)?,
        Commands::Validate(args) => rsrc::cli::validate::run(args, &printer)?,
        Commands::List(args) => rsrc::cli::list::run(args, &printer)?,
        Commands::Completions(args) => rsrc::cli::completions::run(args)?,
    }

    Ok(())
}

/// Diagnostics go to stderr and stay off unless `-v` is given.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
