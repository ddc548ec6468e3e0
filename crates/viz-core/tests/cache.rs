// File: crates/viz-core/tests/cache.rs
// Purpose: Memoizer behavior: determinism, per-chart isolation, relevance-scoped invalidation.

use viz_core::{
    BindingField, ChartKind, Dataset, ParamField, Session, Value,
};

fn session() -> Session {
    let dataset = Dataset::new(
        vec!["name".to_string(), "score".to_string(), "age".to_string()],
        (0..20)
            .map(|i| {
                vec![
                    Value::from(format!("p{i}").as_str()),
                    Value::from(i as f64),
                    Value::from((20 + i) as f64),
                ]
            })
            .collect(),
    );
    Session::new(dataset).unwrap()
}

#[test]
fn repeated_lookups_hit_and_are_identical() {
    let mut s = session();
    let id = s.add_chart(ChartKind::Bar);
    let first = s.result(id).unwrap().clone();
    let second = s.result(id).unwrap().clone();
    assert_eq!(first, second);
    let stats = s.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn editing_one_chart_does_not_invalidate_another() {
    let mut s = session();
    let a = s.add_chart(ChartKind::Bar);
    let b = s.add_chart(ChartKind::Distribution);
    let _ = s.result(a).unwrap().clone();
    let b_before = s.result(b).unwrap().clone();
    assert_eq!(s.cache_stats().misses, 2);

    s.set_binding(a, BindingField::Y, Some("score".to_string()));
    let _ = s.result(a).unwrap().clone();
    let b_after = s.result(b).unwrap().clone();

    // A recomputed; B was served from its slot untouched.
    assert_eq!(s.cache_stats().misses, 3);
    assert_eq!(s.cache_stats().hits, 1);
    assert_eq!(b_before, b_after);
}

#[test]
fn globals_invalidate_only_charts_that_consume_them() {
    let mut s = session();
    let bar = s.add_chart(ChartKind::Bar);
    let dist = s.add_chart(ChartKind::Distribution);
    let _ = s.result(bar);
    let _ = s.result(dist);
    assert_eq!(s.cache_stats().misses, 2);

    // Row limit feeds category series, not distributions.
    s.globals_mut().row_limit = 5;
    let _ = s.result(bar);
    let _ = s.result(dist);
    assert_eq!(s.cache_stats().misses, 3);
    assert_eq!(s.cache_stats().hits, 1);

    // Bin count feeds distributions, not category series.
    s.globals_mut().bin_count = 7;
    let _ = s.result(bar);
    let _ = s.result(dist);
    assert_eq!(s.cache_stats().misses, 4);
    assert_eq!(s.cache_stats().hits, 2);
}

#[test]
fn display_only_globals_never_invalidate() {
    let mut s = session();
    let bar = s.add_chart(ChartKind::Bar);
    let cloud = s.add_chart(ChartKind::WordCloud);
    let _ = s.result(bar);
    let _ = s.result(cloud);
    let misses = s.cache_stats().misses;

    s.globals_mut().high_contrast = true;
    let _ = s.result(bar);
    let _ = s.result(cloud);
    assert_eq!(s.cache_stats().misses, misses);
}

#[test]
fn per_chart_params_invalidate_only_that_chart() {
    let mut s = session();
    let d1 = s.add_chart(ChartKind::Distribution);
    let d2 = s.add_chart(ChartKind::Distribution);
    let _ = s.result(d1);
    let _ = s.result(d2);
    assert_eq!(s.cache_stats().misses, 2);

    s.set_param(d1, ParamField::BinCount(3));
    let _ = s.result(d1);
    let _ = s.result(d2);
    assert_eq!(s.cache_stats().misses, 3);
    assert_eq!(s.cache_stats().hits, 1);
}

#[test]
fn a_new_dataset_invalidates_every_slot() {
    let mut s = session();
    let bar = s.add_chart(ChartKind::Bar);
    let _ = s.result(bar);
    assert_eq!(s.cache_stats().misses, 1);

    let same_content = Dataset::new(
        vec!["name".to_string(), "score".to_string(), "age".to_string()],
        (0..20)
            .map(|i| {
                vec![
                    Value::from(format!("p{i}").as_str()),
                    Value::from(i as f64),
                    Value::from((20 + i) as f64),
                ]
            })
            .collect(),
    );
    s.replace_dataset(same_content).unwrap();
    let _ = s.result(bar);
    // Identity changed even though the content matches.
    assert_eq!(s.cache_stats().misses, 2);
    assert_eq!(s.cache_stats().hits, 0);
}

#[test]
fn failures_are_cached_like_successes() {
    let mut s = session();
    let cloud = s.add_chart(ChartKind::WordCloud);
    // Default text binding is "name", a text column; break it.
    s.set_binding(cloud, BindingField::Text, Some("score".to_string()));
    assert!(s.result(cloud).unwrap().is_err());
    assert!(s.result(cloud).unwrap().is_err());
    let stats = s.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}
