//! Main entry point for the shop command-line client.
//!
//! This binary is the storefront and back-office rolled into one
//! terminal surface: it loads configuration, restores the persisted
//! session, wires the API client, and dispatches one subcommand per
//! invocation.

use anyhow::Result;
use clap::Parser;
use shop_config::Config;
use std::path::PathBuf;

mod app;
mod commands;

/// Command-line arguments for the shop client.
#[derive(Parser, Debug)]
#[command(name = "shop", author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	#[command(subcommand)]
	command: commands::Command,
}

/// Main entry point for the shop client.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Restores the session and wires the API client
/// 5. Runs the requested command and persists the session
#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	let config = Config::from_file(&args.config.to_string_lossy()).await?;
	tracing::debug!("Loaded configuration [{}]", config.app.id);

	let mut app = app::App::build(config).await?;
	commands::run(&mut app, args.command).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn args_parse_with_defaults() {
		let args = Args::try_parse_from(["shop", "whoami"]).unwrap();
		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "warn");
		assert!(matches!(args.command, commands::Command::Whoami));
	}

	#[test]
	fn args_parse_with_custom_values() {
		let args = Args::try_parse_from([
			"shop",
			"--config",
			"custom.toml",
			"--log-level",
			"debug",
			"cart",
			"show",
		])
		.unwrap();
		assert_eq!(args.config, PathBuf::from("custom.toml"));
		assert_eq!(args.log_level, "debug");
	}
}
