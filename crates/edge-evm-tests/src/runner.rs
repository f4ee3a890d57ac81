//! Fixture directory runner and statistics

use crate::error::TestResult;
use crate::vm_test::{VmTestResults, VmTestRunner};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Aggregated test statistics
#[derive(Debug, Default)]
pub struct TestStats {
    /// Total tests executed
    pub total: usize,
    /// Tests passed
    pub passed: usize,
    /// Tests failed
    pub failed: usize,
    /// Files that could not be read or parsed
    pub skipped: usize,
    /// Total execution time
    pub duration: Duration,
    /// Failed test names with reasons
    pub failures: Vec<(String, String)>,
}

impl TestStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add VM fixture results
    pub fn add_vm_results(&mut self, results: &VmTestResults) {
        self.total += results.total();
        self.passed += results.passed.len();
        self.failed += results.failed.len();
        for (name, reason) in &results.failed {
            self.failures.push((name.clone(), reason.clone()));
        }
    }

    /// Pass rate as percentage
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            return 100.0;
        }
        (self.passed as f64 / executed as f64) * 100.0
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("Test Summary");
        println!("========================================");
        println!("Total:   {}", self.total);
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Skipped: {}", self.skipped);
        println!("Pass Rate: {:.2}%", self.pass_rate());
        println!("Duration: {:.2}s", self.duration.as_secs_f64());

        if !self.failures.is_empty() {
            println!("\nFailed tests:");
            for (name, reason) in &self.failures {
                println!("  - {}: {}", name, reason);
            }
        }
    }
}

/// Walks a fixture directory and runs every JSON file in it
pub struct TestRunner {
    /// VM fixture runner
    vm_runner: VmTestRunner,
    /// Verbose output
    verbose: bool,
}

impl TestRunner {
    /// Create new test runner
    pub fn new(verbose: bool) -> Self {
        Self {
            vm_runner: VmTestRunner::new(verbose),
            verbose,
        }
    }

    /// Resolve fork schedules at `block` instead of each fixture's block
    pub fn with_fork_block(mut self, block: Option<u64>) -> Self {
        self.vm_runner = self.vm_runner.with_fork_block(block);
        self
    }

    /// Run VM fixtures from a file or directory
    pub fn run_vm_tests(&self, path: &Path) -> TestResult<TestStats> {
        let mut stats = TestStats::new();
        let start = Instant::now();

        info!("Running VM fixtures from: {:?}", path);
        if path.is_file() {
            self.run_vm_file(path, &mut stats);
        } else {
            self.run_vm_tests_recursive(path, &mut stats)?;
        }

        stats.duration = start.elapsed();
        Ok(stats)
    }

    /// Run VM fixtures recursively
    fn run_vm_tests_recursive(&self, dir: &Path, stats: &mut TestStats) -> TestResult<()> {
        if !dir.exists() {
            warn!("Directory not found: {:?}", dir);
            return Ok(());
        }

        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                self.run_vm_tests_recursive(&path, stats)?;
            } else if path.extension().is_some_and(|e| e == "json") {
                self.run_vm_file(&path, stats);
            }
        }

        Ok(())
    }

    fn run_vm_file(&self, path: &Path, stats: &mut TestStats) {
        match self.vm_runner.run_file(path) {
            Ok(results) => {
                stats.add_vm_results(&results);
                if self.verbose && !results.failed.is_empty() {
                    info!(
                        "File: {:?} - {} passed, {} failed",
                        path,
                        results.passed.len(),
                        results.failed.len()
                    );
                }
            }
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                stats.skipped += 1;
            }
        }
    }
}
