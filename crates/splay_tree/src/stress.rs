//! Insert/delete/lookup stress run over a key-only tree.
//!
//! Keys `gap, 2*gap, ...` modulo `nums` are inserted until the walk returns to zero, every odd
//! key is then deleted, and the survivors are checked for min/max and membership. With the
//! defaults (`nums = 40000`, `gap = 307`) this is the classic Weiss driver for splay trees.
use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::StressConfig;
use crate::error::Result;
use crate::tree::SplaySet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
	Insert,
	Delete,
	MinMax,
	Present,
	Absent,
}

impl Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Insert => "insert",
			Self::Delete => "delete",
			Self::MinMax => "min/max",
			Self::Present => "present lookups",
			Self::Absent => "absent lookups",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTiming {
	pub phase: Phase,
	pub elapsed_us: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressReport {
	pub nums: u32,
	pub gap: u32,
	pub inserted: usize,
	pub insert_failures: usize,
	pub deleted: usize,
	pub delete_failures: usize,
	pub min_key: Option<u64>,
	pub max_key: Option<u64>,
	/// Even keys that should have survived but were not found.
	pub present_misses: usize,
	/// Odd keys that were deleted but still found.
	pub absent_hits: usize,
	pub final_size: usize,
	pub timings: Vec<PhaseTiming>,
}

impl StressReport {
	fn new(config: &StressConfig) -> Self {
		Self {
			nums: config.nums,
			gap: config.gap,
			inserted: 0,
			insert_failures: 0,
			deleted: 0,
			delete_failures: 0,
			min_key: None,
			max_key: None,
			present_misses: 0,
			absent_hits: 0,
			final_size: 0,
			timings: Vec::new(),
		}
	}

	#[must_use]
	pub const fn expected_min(&self) -> u64 {
		2
	}

	/// Largest even key below `nums`.
	#[must_use]
	pub fn expected_max(&self) -> u64 {
		let nums = u64::from(self.nums);
		if nums % 2 == 0 {
			nums - 2
		} else {
			nums - 1
		}
	}

	/// Number of even keys in `2..nums`.
	#[must_use]
	pub fn expected_size(&self) -> usize {
		usize::try_from(self.nums.saturating_sub(1) / 2).unwrap_or(usize::MAX)
	}

	#[must_use]
	pub fn passed(&self) -> bool {
		self.insert_failures == 0
			&& self.delete_failures == 0
			&& matches!(self.min_key, Some(min) if min == self.expected_min())
			&& matches!(self.max_key, Some(max) if max == self.expected_max())
			&& self.present_misses == 0
			&& self.absent_hits == 0
			&& self.final_size == self.expected_size()
	}

	fn record(&mut self, phase: Phase, elapsed: Duration) {
		let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
		info!(%phase, elapsed_us, "Phase complete");
		self.timings.push(PhaseTiming { phase, elapsed_us });
	}
}

impl Display for StressReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Stress run with nums: {} gap: {}", self.nums, self.gap)?;
		writeln!(f, " - inserts: {} ok, {} rejected", self.inserted, self.insert_failures)?;
		writeln!(f, " - deletes: {} ok, {} missing", self.deleted, self.delete_failures)?;
		writeln!(
			f,
			" - min/max: {}/{} (expected {}/{})",
			fmt_key(self.min_key),
			fmt_key(self.max_key),
			self.expected_min(),
			self.expected_max()
		)?;
		writeln!(f, " - present lookups: {} misses", self.present_misses)?;
		writeln!(f, " - absent lookups: {} hits", self.absent_hits)?;
		writeln!(f, " - final size: {} (expected {})", self.final_size, self.expected_size())?;
		for timing in &self.timings {
			writeln!(f, "   {:<16} {:>10} us", timing.phase.to_string(), timing.elapsed_us)?;
		}
		writeln!(f, "{}", if self.passed() { "PASSED" } else { "FAILED" })
	}
}

fn fmt_key(key: Option<u64>) -> String {
	key.map_or_else(|| "none".to_string(), |key| key.to_string())
}

/// Runs the scenario described in the module docs.
///
/// Mismatches are counted in the report and logged rather than aborting the run.
///
/// # Errors
///
/// Returns [`SplayError::Config`](crate::SplayError::Config) for a configuration that cannot
/// cover the key space, and propagates tree errors.
pub fn run(config: &StressConfig) -> Result<StressReport> {
	config.validate()?;
	info!(nums = config.nums, gap = config.gap, "Running splay tree stress scenario");

	let nums = u64::from(config.nums);
	let gap = u64::from(config.gap);
	let mut report = StressReport::new(config);
	let mut tree = SplaySet::<u64>::new();

	let started = Instant::now();
	let mut key = gap % nums;
	while key != 0 {
		if tree.insert_key(key)? {
			report.inserted += 1;
		} else {
			warn!(key, "Insert rejected");
			report.insert_failures += 1;
		}
		key = (key + gap) % nums;
	}
	report.record(Phase::Insert, started.elapsed());

	let started = Instant::now();
	for key in (1..nums).step_by(2) {
		if tree.delete(Some(&key))? {
			report.deleted += 1;
		} else {
			warn!(key, "Delete missed");
			report.delete_failures += 1;
		}
	}
	report.record(Phase::Delete, started.elapsed());

	let started = Instant::now();
	report.max_key = tree.max_key().copied();
	report.min_key = tree.min_key().copied();
	report.record(Phase::MinMax, started.elapsed());

	let started = Instant::now();
	for key in (2..nums).step_by(2) {
		if !tree.contains(Some(&key)) {
			warn!(key, "Find fails");
			report.present_misses += 1;
		}
	}
	report.record(Phase::Present, started.elapsed());

	let started = Instant::now();
	for key in (1..nums).step_by(2) {
		if tree.contains(Some(&key)) {
			warn!(key, "Found deleted key");
			report.absent_hits += 1;
		}
	}
	report.record(Phase::Absent, started.elapsed());

	report.final_size = tree.size();
	Ok(report)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_small_run_passes() {
		let report = run(&StressConfig::test()).unwrap();
		assert_eq!(report.inserted, 999);
		assert_eq!(report.deleted, 500);
		assert_eq!(report.min_key, Some(2));
		assert_eq!(report.max_key, Some(998));
		assert_eq!(report.final_size, 499);
		assert!(report.passed());
		assert_eq!(report.timings.len(), 5);
	}

	#[test]
	fn test_odd_key_space() {
		let config = StressConfig { nums: 101, gap: 10, ..StressConfig::test() };
		let report = run(&config).unwrap();
		assert_eq!(report.max_key, Some(100));
		assert_eq!(report.final_size, 50);
		assert!(report.passed());
	}

	#[test]
	fn test_invalid_config_is_rejected() {
		let config = StressConfig { nums: 1_000, gap: 10, ..StressConfig::test() };
		assert!(run(&config).is_err());
	}

	#[test]
	fn test_report_display() {
		let report = run(&StressConfig { nums: 11, gap: 3, ..StressConfig::test() }).unwrap();
		let text = report.to_string();
		assert!(text.starts_with("Stress run with nums: 11 gap: 3\n"));
		assert!(text.contains(" - min/max: 2/10 (expected 2/10)"));
		assert!(text.trim_end().ends_with("PASSED"));
	}

	#[test]
	fn test_failed_report() {
		let mut report = run(&StressConfig::test()).unwrap();
		report.absent_hits = 1;
		assert!(!report.passed());
		assert!(report.to_string().trim_end().ends_with("FAILED"));
	}
}
