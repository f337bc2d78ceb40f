//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and metrics tracking for monitoring
//! simulation progress and health.

use microbium_data::GenerationSummary;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Global metrics collector for simulation statistics.
pub struct Metrics {
    generation_count: AtomicU64,
    cell_count: AtomicU64,
    birth_count: AtomicU64,
    death_count: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            cell_count: AtomicU64::new(0),
            birth_count: AtomicU64::new(0),
            death_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed generation with its duration.
    pub fn record_generation(&self, duration: Duration, summary: &GenerationSummary) {
        let generation = self.generation_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.cell_count
            .store(summary.population as u64, Ordering::Relaxed);
        self.birth_count
            .fetch_add(summary.births as u64, Ordering::Relaxed);
        self.death_count
            .fetch_add(summary.deaths as u64, Ordering::Relaxed);

        // Log at info level every 100 generations
        if generation.is_multiple_of(100) {
            tracing::info!(
                generation = summary.index,
                population = summary.population,
                births = summary.births,
                deaths = summary.deaths,
                lineages = summary.lineages,
                duration_ms = duration.as_millis() as u64,
                "Population generation"
            );
        }
    }

    /// Gets the number of generations recorded.
    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    /// Gets the most recently recorded population size.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        self.cell_count.load(Ordering::Relaxed)
    }

    /// Gets the cumulative birth count.
    #[must_use]
    pub fn birth_count(&self) -> u64 {
        self.birth_count.load(Ordering::Relaxed)
    }

    /// Gets the cumulative death count.
    #[must_use]
    pub fn death_count(&self) -> u64 {
        self.death_count.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}
