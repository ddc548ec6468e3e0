// File: crates/viz-core/src/session.rs
// Summary: Ties dataset, profiles, config store, and cache into one synchronous session.

use crate::cache::ResultCache;
use crate::dataset::Dataset;
use crate::engine::{AggregateError, AggregateResult};
use crate::palette::DisplayOptions;
use crate::profile::{ColumnProfiles, ProfileError};
use crate::spec::{BindingField, ChartId, ChartKind, GlobalParams, ParamField};
use crate::store::{ChartStore, Preset};

/// One analysis session: an immutable dataset shared by reference across
/// all charts, its column profiles (computed exactly once per dataset
/// identity), the chart configuration store, and the result memoizer.
/// Single-threaded and synchronous; callers are expected to debounce rapid
/// edit events before asking for results.
pub struct Session {
    dataset: Dataset,
    profiles: ColumnProfiles,
    store: ChartStore,
    cache: ResultCache,
}

impl Session {
    pub fn new(dataset: Dataset) -> Result<Self, ProfileError> {
        let profiles = ColumnProfiles::profile(&dataset)?;
        log::debug!(
            "session opened: {} rows, {} columns",
            dataset.row_count(),
            dataset.columns().len()
        );
        Ok(Self {
            dataset,
            profiles,
            store: ChartStore::new(),
            cache: ResultCache::new(),
        })
    }

    /// Swap in a new dataset: reprofile once, reset every chart's bindings
    /// by the default rule, and drop every cache slot.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> Result<(), ProfileError> {
        let profiles = ColumnProfiles::profile(&dataset)?;
        self.dataset = dataset;
        self.profiles = profiles;
        self.store.rebind_for_dataset(&self.profiles);
        self.cache.clear();
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn profiles(&self) -> &ColumnProfiles {
        &self.profiles
    }

    pub fn store(&self) -> &ChartStore {
        &self.store
    }

    pub fn add_chart(&mut self, kind: ChartKind) -> ChartId {
        self.store.add_chart(kind, &self.profiles)
    }

    pub fn remove_chart(&mut self, id: ChartId) -> bool {
        self.cache.invalidate(id);
        self.store.remove_chart(id)
    }

    pub fn set_binding(&mut self, id: ChartId, field: BindingField, value: Option<String>) -> bool {
        self.store.set_binding(id, field, value)
    }

    pub fn set_param(&mut self, id: ChartId, field: ParamField) -> bool {
        self.store.set_param(id, field)
    }

    pub fn globals(&self) -> &GlobalParams {
        self.store.globals()
    }

    pub fn globals_mut(&mut self) -> &mut GlobalParams {
        self.store.globals_mut()
    }

    pub fn save_preset(&self, name: impl Into<String>) -> Preset {
        self.store.save_preset(name)
    }

    pub fn load_preset(&mut self, preset: &Preset) {
        self.store.load_preset(preset);
    }

    /// Aggregate for one chart, served through the memoizer. `None` when no
    /// chart with this id exists.
    pub fn result(&mut self, id: ChartId) -> Option<&Result<AggregateResult, AggregateError>> {
        let spec = self.store.spec(id)?.clone();
        Some(self.cache.get_or_compute(
            &self.dataset,
            &self.profiles,
            &spec,
            self.store.globals(),
        ))
    }

    /// Labels and palette choice for the rendering collaborator.
    pub fn display_options(&self, id: ChartId) -> Option<DisplayOptions> {
        let spec = self.store.spec(id)?;
        Some(DisplayOptions {
            title: spec.title.clone(),
            x_label: spec.x_label.clone(),
            y_label: spec.y_label.clone(),
            high_contrast: self.store.globals().high_contrast,
        })
    }

    pub fn cache_stats(&self) -> crate::cache::CacheStats {
        self.cache.stats()
    }
}
