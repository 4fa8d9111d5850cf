use clap::Parser;

use autofix_cli::cli::FixCli;
use autofix_cli::commands;

// The workflow is strictly sequential; a single-threaded runtime is all
// it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = FixCli::parse();

    autofix_cli::init_tracing(cli.global.verbose);

    if let Err(err) = commands::fix::run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
