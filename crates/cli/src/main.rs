//! splice binary.
//!
//! Applies a JSON array of LSP `TextEdit`s to a file as one transaction and
//! prints the result, or rewrites the file with `--in-place`.

mod apply;
mod cli;

use clap::Parser;
use cli::{Cli, Command};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	match cli.command {
		Command::Apply(args) => {
			info!(file = %args.file.display(), "starting splice apply");
			let report = apply::apply_file(&args).await?;
			if !args.in_place {
				print!("{}", report.text);
			}
		}
	}

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("splice=debug,splice_editor=debug,splice_lsp=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
