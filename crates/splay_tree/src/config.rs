use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SplayError};

#[derive(Parser, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[command(name = "splay-stress", author, version, about = "Insert/delete/lookup stress run against a splay tree", long_about = None)]
pub struct StressConfig {
	#[arg(long, env = "SPLAY_NUMS", default_value = "40000", help = "Size of the key space; keys are stepped modulo this value")]
	pub nums: u32,

	#[arg(long, env = "SPLAY_GAP", default_value = "307", help = "Step between inserted keys, must be coprime with --nums")]
	pub gap: u32,

	#[arg(long, env = "SPLAY_LOG_LEVEL", default_value = "info", help = "Log filter used when RUST_LOG is unset")]
	pub log_level: String,

	#[arg(long, env = "SPLAY_JSON", help = "Print the report as JSON")]
	pub json: bool,
}

impl Default for StressConfig {
	fn default() -> Self {
		Self {
			nums: 40_000,
			gap: 307,
			log_level: "info".to_string(),
			json: false,
		}
	}
}

impl StressConfig {
	#[must_use]
	pub fn new() -> Self {
		Self::parse()
	}

	/// The scenario only visits every key in `1..nums` when stepping by `gap` cycles through
	/// the whole residue ring.
	///
	/// # Errors
	///
	/// [`SplayError::Config`] when `nums < 3` or `gap` shares a factor with `nums`.
	pub fn validate(&self) -> Result<()> {
		if self.nums < 3 {
			return Err(SplayError::Config(format!("nums must be at least 3, got {}", self.nums)));
		}
		if gcd(self.gap, self.nums) != 1 {
			return Err(SplayError::Config(format!("gap {} is not coprime with nums {}", self.gap, self.nums)));
		}
		Ok(())
	}

	#[cfg(test)]
	pub fn test() -> Self {
		Self {
			nums: 1_000,
			gap: 37,
			log_level: "debug".to_string(),
			json: false,
		}
	}
}

const fn gcd(mut a: u32, mut b: u32) -> u32 {
	while b != 0 {
		let r = a % b;
		a = b;
		b = r;
	}
	a
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config() {
		let config = StressConfig::default();
		assert_eq!(config.nums, 40_000);
		assert_eq!(config.gap, 307);
		assert_eq!(config.log_level, "info");
		assert!(!config.json);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_gcd() {
		assert_eq!(gcd(307, 40_000), 1);
		assert_eq!(gcd(12, 18), 6);
		assert_eq!(gcd(0, 7), 7);
	}

	#[test]
	fn test_validate_rejects_shared_factor() {
		let config = StressConfig { gap: 250, ..StressConfig::default() };
		assert!(matches!(config.validate(), Err(SplayError::Config(_))));

		let config = StressConfig { gap: 0, ..StressConfig::default() };
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_validate_rejects_tiny_key_space() {
		let config = StressConfig { nums: 2, gap: 1, ..StressConfig::default() };
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_config_parser() {
		let args = vec!["splay-stress", "--nums", "1000", "--gap", "37", "--log-level", "trace", "--json"];

		let config = StressConfig::try_parse_from(args).unwrap();
		assert_eq!(config.nums, 1_000);
		assert_eq!(config.gap, 37);
		assert_eq!(config.log_level, "trace");
		assert!(config.json);
		assert_eq!(config, StressConfig { log_level: "trace".into(), json: true, ..StressConfig::test() });
	}
}
