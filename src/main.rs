use chatwire::cli::{parse_args, run_cli_command, CliCommand};

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Build the log filter: `CHATWIRE_LOG`, then `RUST_LOG`, then `chatwire=info`.
///
/// `--debug` overrides all of them.
fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("chatwire=debug");
    }
    std::env::var("CHATWIRE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("chatwire=info"))
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    color_eyre::install()?;

    let debug = matches!(&command, CliCommand::Ask(args) if args.debug);
    // stdout carries only the reply text
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug))
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    let code = runtime.block_on(run_cli_command(command))?;

    // Dropping the runtime first lets the decode task release the connection
    drop(runtime);
    std::process::exit(code);
}
