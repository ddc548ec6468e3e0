// File: crates/viz-core/tests/store.rs
// Purpose: Default bindings, preset deep-copy isolation, id stability, dataset rebinding.

use viz_core::{
    BindingField, ChartKind, ChartStore, ColumnProfiles, Dataset, Session, Value,
};

fn dataset() -> Dataset {
    Dataset::new(
        vec!["name".to_string(), "score".to_string(), "age".to_string()],
        vec![
            vec![Value::from("alice"), Value::from(10.0), Value::from(31.0)],
            vec![Value::from("bob"), Value::from(12.0), Value::from(44.0)],
        ],
    )
}

#[test]
fn add_chart_picks_type_appropriate_defaults() {
    let ds = dataset();
    let profiles = ColumnProfiles::profile(&ds).unwrap();
    let mut store = ChartStore::new();

    let bar = store.add_chart(ChartKind::Bar, &profiles);
    let spec = store.spec(bar).unwrap();
    assert_eq!(spec.x.as_deref(), Some("score"));
    assert_eq!(spec.y.as_deref(), Some("age"));
    assert_eq!(spec.title, "age by score");
    assert_eq!(spec.x_label, "score");

    let pie = store.add_chart(ChartKind::Pie, &profiles);
    let spec = store.spec(pie).unwrap();
    assert_eq!(spec.x.as_deref(), Some("name"));
    assert_eq!(spec.y.as_deref(), Some("score"));

    let cloud = store.add_chart(ChartKind::WordCloud, &profiles);
    let spec = store.spec(cloud).unwrap();
    assert_eq!(spec.text.as_deref(), Some("name"));
    assert_eq!(spec.title, "Word Cloud: name");

    let dist = store.add_chart(ChartKind::Distribution, &profiles);
    let spec = store.spec(dist).unwrap();
    assert_eq!(spec.y.as_deref(), Some("score"));
    assert_eq!(spec.title, "Distribution: score");
}

#[test]
fn ids_are_unique_and_never_reused() {
    let ds = dataset();
    let profiles = ColumnProfiles::profile(&ds).unwrap();
    let mut store = ChartStore::new();
    let a = store.add_chart(ChartKind::Bar, &profiles);
    let b = store.add_chart(ChartKind::Bar, &profiles);
    assert_ne!(a, b);
    assert!(store.remove_chart(a));
    let c = store.add_chart(ChartKind::Line, &profiles);
    assert_ne!(c, a);
    assert_ne!(c, b);
    assert_eq!(store.specs().len(), 2);
}

#[test]
fn presets_are_deep_copies() {
    let ds = dataset();
    let profiles = ColumnProfiles::profile(&ds).unwrap();
    let mut store = ChartStore::new();
    let id = store.add_chart(ChartKind::Bar, &profiles);

    let preset = store.save_preset("before");
    store.set_binding(id, BindingField::Y, Some("score".to_string()));
    store.globals_mut().bin_count = 25;

    // Mutating the live store must not reach into the snapshot.
    assert_eq!(preset.specs[0].y.as_deref(), Some("age"));
    assert_eq!(preset.globals.bin_count, 10);

    store.load_preset(&preset);
    assert_eq!(store.spec(id).unwrap().y.as_deref(), Some("age"));
    assert_eq!(store.globals().bin_count, 10);

    // And mutating after a load must not reach back either.
    store.set_binding(id, BindingField::Y, Some("score".to_string()));
    assert_eq!(preset.specs[0].y.as_deref(), Some("age"));
}

#[test]
fn presets_round_trip_through_json() {
    let ds = dataset();
    let profiles = ColumnProfiles::profile(&ds).unwrap();
    let mut store = ChartStore::new();
    store.add_chart(ChartKind::Scatter, &profiles);
    let preset = store.save_preset("snapshot");

    let json = serde_json::to_string(&preset).unwrap();
    let restored: viz_core::Preset = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.name, "snapshot");
    assert_eq!(restored.specs, preset.specs);
    assert_eq!(restored.globals, preset.globals);
}

#[test]
fn replacing_the_dataset_rebinds_every_chart() {
    let mut session = Session::new(dataset()).unwrap();
    let id = session.add_chart(ChartKind::Bar);
    assert_eq!(session.store().spec(id).unwrap().x.as_deref(), Some("score"));

    let swapped = Dataset::new(
        vec!["city".to_string(), "pop".to_string()],
        vec![
            vec![Value::from("oslo"), Value::from(700.0)],
            vec![Value::from("turin"), Value::from(840.0)],
        ],
    );
    session.replace_dataset(swapped).unwrap();
    let spec = session.store().spec(id).unwrap();
    // Only one numeric column now: both axes fall back to it.
    assert_eq!(spec.x.as_deref(), Some("pop"));
    assert_eq!(spec.y.as_deref(), Some("pop"));
}
