// File: crates/viz-core/src/cache.rs
// Summary: Per-chart memoizer keyed by (dataset identity, spec, relevant globals).

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::dataset::Dataset;
use crate::engine::{aggregate, AggregateError, AggregateResult};
use crate::profile::ColumnProfiles;
use crate::spec::{ChartId, ChartKind, ChartSpec, GlobalParams};

/// Hit/miss counters, mainly for tests asserting invalidation behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Slot {
    key: u64,
    result: Result<AggregateResult, AggregateError>,
}

/// One cache slot per chart instance. A slot is valid while its composite
/// key matches; a new dataset identity changes every key, so replacing the
/// dataset invalidates everything without bookkeeping.
#[derive(Default)]
pub struct ResultCache {
    slots: HashMap<ChartId, Slot>,
    stats: CacheStats,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `spec`, recomputing when any input that
    /// affects this chart has changed. Failures are deterministic and are
    /// cached like successes.
    pub fn get_or_compute(
        &mut self,
        dataset: &Dataset,
        profiles: &ColumnProfiles,
        spec: &ChartSpec,
        globals: &GlobalParams,
    ) -> &Result<AggregateResult, AggregateError> {
        let key = cache_key(dataset.id(), spec, globals);
        let hit = self.slots.get(&spec.id).is_some_and(|s| s.key == key);
        if hit {
            self.stats.hits += 1;
            log::debug!("cache hit for chart {:?}", spec.id);
        } else {
            self.stats.misses += 1;
            log::debug!("cache miss for chart {:?}; recomputing", spec.id);
            let result = aggregate(dataset, profiles, spec, globals);
            self.slots.insert(spec.id, Slot { key, result });
        }
        &self.slots[&spec.id].result
    }

    /// Drop one chart's slot so the next lookup recomputes.
    pub fn invalidate(&mut self, id: ChartId) {
        self.slots.remove(&id);
    }

    /// Drop every slot (e.g. when the dataset is replaced).
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Composite key over the inputs that affect one chart's aggregate.
/// `high_contrast` is display-only and deliberately excluded.
fn cache_key(dataset_id: u64, spec: &ChartSpec, globals: &GlobalParams) -> u64 {
    let mut h = DefaultHasher::new();
    dataset_id.hash(&mut h);
    spec.hash(&mut h);
    match spec.kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Pie | ChartKind::Scatter => {
            globals.row_limit.hash(&mut h);
        }
        ChartKind::Distribution => {
            globals.bin_count.hash(&mut h);
            globals.show_density.hash(&mut h);
        }
        ChartKind::WordCloud => {
            globals.word_cloud_limit.hash(&mut h);
            globals.min_word_length.hash(&mut h);
        }
        ChartKind::BoxPlot | ChartKind::Stats => {}
    }
    h.finish()
}
