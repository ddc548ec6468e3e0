// File: crates/viz-core/src/store.rs
// Summary: Ordered set of active chart specs, shared globals, and named presets.

use crate::profile::ColumnProfiles;
use crate::spec::{BindingField, ChartId, ChartKind, ChartSpec, GlobalParams, ParamField};
use serde::{Deserialize, Serialize};

/// Named snapshot of the whole configuration. Loading a preset deep-copies,
/// so later edits to the live store never alias the stored preset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub specs: Vec<ChartSpec>,
    pub globals: GlobalParams,
}

/// Holds every active chart's configuration in display order plus the
/// shared global parameters. Pure state: recomputation is driven by the
/// cache comparing dependency keys, not by callbacks.
pub struct ChartStore {
    specs: Vec<ChartSpec>,
    globals: GlobalParams,
    next_id: u32,
}

impl Default for ChartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartStore {
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            globals: GlobalParams::default(),
            next_id: 1,
        }
    }

    /// Append a chart of `kind` with type-appropriate default bindings.
    /// Ids are unique for the session and never reused.
    pub fn add_chart(&mut self, kind: ChartKind, profiles: &ColumnProfiles) -> ChartId {
        let id = ChartId(self.next_id);
        self.next_id += 1;
        let mut spec = ChartSpec::new(id, kind);
        spec.apply_defaults(profiles);
        self.specs.push(spec);
        id
    }

    /// Remove by id. Other charts are untouched.
    pub fn remove_chart(&mut self, id: ChartId) -> bool {
        let before = self.specs.len();
        self.specs.retain(|s| s.id != id);
        self.specs.len() != before
    }

    pub fn specs(&self) -> &[ChartSpec] {
        &self.specs
    }

    pub fn spec(&self, id: ChartId) -> Option<&ChartSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    /// First chart of a given kind, for UIs that treat kinds as toggles.
    pub fn find_kind(&self, kind: ChartKind) -> Option<ChartId> {
        self.specs.iter().find(|s| s.kind == kind).map(|s| s.id)
    }

    /// Partial binding update. Only the touched chart's dependency key changes.
    pub fn set_binding(&mut self, id: ChartId, field: BindingField, value: Option<String>) -> bool {
        match self.specs.iter_mut().find(|s| s.id == id) {
            Some(spec) => {
                spec.set_binding(field, value);
                true
            }
            None => false,
        }
    }

    /// Partial per-chart parameter update.
    pub fn set_param(&mut self, id: ChartId, field: ParamField) -> bool {
        match self.specs.iter_mut().find(|s| s.id == id) {
            Some(spec) => {
                spec.set_param(field);
                true
            }
            None => false,
        }
    }

    pub fn globals(&self) -> &GlobalParams {
        &self.globals
    }

    /// Mutable access for global edits; charts whose kind reads a changed
    /// parameter recompute on next lookup via their dependency key.
    pub fn globals_mut(&mut self) -> &mut GlobalParams {
        &mut self.globals
    }

    /// Re-derive every chart's default bindings against freshly profiled
    /// columns, e.g. after the dataset is replaced.
    pub fn rebind_for_dataset(&mut self, profiles: &ColumnProfiles) {
        for spec in &mut self.specs {
            spec.apply_defaults(profiles);
        }
    }

    /// Deep-copy snapshot of all specs and globals.
    pub fn save_preset(&self, name: impl Into<String>) -> Preset {
        Preset {
            name: name.into(),
            specs: self.specs.clone(),
            globals: self.globals.clone(),
        }
    }

    /// Restore a snapshot. The preset itself stays untouched by later edits.
    pub fn load_preset(&mut self, preset: &Preset) {
        self.specs = preset.specs.clone();
        self.globals = preset.globals.clone();
        // Keep id allocation ahead of every restored chart.
        let max_id = self.specs.iter().map(|s| s.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }
}
