use clap::Parser;

use autofix_cli::cli::CloneCli;
use autofix_cli::commands;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CloneCli::parse();

    autofix_cli::init_tracing(cli.global.verbose);

    if let Err(err) = commands::clone::run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
