use anyhow::{bail, Context, Result};
use splay_tree::{stress, StressConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
	let config = StressConfig::new();

	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&config.log_level))
		.with_context(|| format!("invalid log filter: {}", config.log_level))?;
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

	info!(?config, "Starting splay-stress");
	let report = stress::run(&config).context("stress scenario could not run")?;

	if config.json {
		println!("{}", serde_json::to_string_pretty(&report).context("failed to serialize report")?);
	} else {
		print!("{report}");
	}

	if !report.passed() {
		bail!("stress scenario failed for nums {} gap {}", config.nums, config.gap);
	}
	Ok(())
}
