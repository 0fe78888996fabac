//! Optional CPU profiling of a whole run, written as a flamegraph SVG.

use std::path::{Path, PathBuf};

use crate::{BenchError, Result};

/// Sampling frequency in Hz.
#[cfg(unix)]
const FREQUENCY: i32 = 1000;

/// A running profiler. Call [`Profiler::finish`] to write the report.
pub struct Profiler {
    output: PathBuf,
    #[cfg(unix)]
    guard: pprof::ProfilerGuard<'static>,
}

impl Profiler {
    /// Starts sampling; the flamegraph goes to `output` on [`Profiler::finish`].
    #[cfg(unix)]
    pub fn start(output: &Path) -> Result<Self> {
        let guard = pprof::ProfilerGuardBuilder::default()
            .frequency(FREQUENCY)
            .blocklist(&["libc", "libgcc", "pthread", "vdso"])
            .build()
            .map_err(|e| BenchError::Profiler(e.to_string()))?;
        log::info!("cpu profile -> {}", output.display());
        Ok(Self {
            output: output.to_path_buf(),
            guard,
        })
    }

    /// Profiling needs unix signals, so this always fails.
    #[cfg(not(unix))]
    pub fn start(output: &Path) -> Result<Self> {
        Err(BenchError::Profiler(format!(
            "cannot write {}: cpu profiling is only supported on unix",
            output.display()
        )))
    }

    /// Stops sampling and writes the flamegraph.
    #[cfg(unix)]
    pub fn finish(self) -> Result<()> {
        let report = self
            .guard
            .report()
            .build()
            .map_err(|e| BenchError::Profiler(e.to_string()))?;
        let file = std::fs::File::create(&self.output)?;
        report
            .flamegraph(file)
            .map_err(|e| BenchError::Profiler(e.to_string()))?;
        log::info!("cpu profile written to {}", self.output.display());
        Ok(())
    }

    /// Nothing to write without a profiler.
    #[cfg(not(unix))]
    pub fn finish(self) -> Result<()> {
        Ok(())
    }
}
