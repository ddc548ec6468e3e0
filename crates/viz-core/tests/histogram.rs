// File: crates/viz-core/tests/histogram.rs
// Purpose: Binning invariants: conservation, clamping at max, degenerate range, density overlay.

use viz_core::engine::{aggregate, AggregateError, AggregateResult};
use viz_core::{ChartId, ChartKind, ChartSpec, ColumnProfiles, Dataset, GlobalParams, Value};

fn numeric_ds(values: &[Value]) -> Dataset {
    Dataset::new(
        vec!["v".to_string()],
        values.iter().map(|v| vec![v.clone()]).collect(),
    )
}

fn dist_spec() -> ChartSpec {
    let mut spec = ChartSpec::new(ChartId(1), ChartKind::Distribution);
    spec.y = Some("v".to_string());
    spec
}

fn run(dataset: &Dataset, globals: &GlobalParams) -> Result<AggregateResult, AggregateError> {
    let profiles = ColumnProfiles::profile(dataset).unwrap();
    aggregate(dataset, &profiles, &dist_spec(), globals)
}

#[test]
fn counts_conserve_valid_values_and_drop_invalid_ones() {
    let values: Vec<Value> = (0..=20)
        .map(|i| Value::from(i as f64))
        .chain([Value::from("garbage"), Value::Empty])
        .collect();
    let dataset = numeric_ds(&values);
    match run(&dataset, &GlobalParams::default()).unwrap() {
        AggregateResult::Histogram { bin_edges, counts, density } => {
            assert_eq!(counts.len(), 10);
            assert_eq!(bin_edges.len(), 11);
            // Invalid cells are dropped, never zero-filled.
            assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 21);
            assert!(density.is_none());
        }
        other => panic!("expected Histogram, got {other:?}"),
    }
}

#[test]
fn value_equal_to_max_lands_in_last_bin() {
    let values: Vec<Value> = (0..=10).map(|i| Value::from(i as f64)).collect();
    let dataset = numeric_ds(&values);
    match run(&dataset, &GlobalParams::default()).unwrap() {
        AggregateResult::Histogram { counts, .. } => {
            // bins are [0,1) [1,2) ... [9,10]; both 9 and 10 clamp into the last.
            assert_eq!(counts[9], 2);
            assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 11);
        }
        other => panic!("expected Histogram, got {other:?}"),
    }
}

#[test]
fn degenerate_range_collapses_to_first_bin() {
    let values = vec![Value::from(5.0); 7];
    let dataset = numeric_ds(&values);
    let globals = GlobalParams { show_density: true, ..Default::default() };
    match run(&dataset, &globals).unwrap() {
        AggregateResult::Histogram { counts, density, .. } => {
            assert_eq!(counts[0], 7);
            assert_eq!(counts[1..].iter().map(|&c| c as usize).sum::<usize>(), 0);
            // No density curve over a zero-width range.
            assert!(density.is_none());
        }
        other => panic!("expected Histogram, got {other:?}"),
    }
}

#[test]
fn bin_count_parameter_is_respected() {
    let values: Vec<Value> = (0..100).map(|i| Value::from(i as f64)).collect();
    let dataset = numeric_ds(&values);
    let globals = GlobalParams { bin_count: 4, ..Default::default() };
    match run(&dataset, &globals).unwrap() {
        AggregateResult::Histogram { bin_edges, counts, .. } => {
            assert_eq!(counts.len(), 4);
            assert_eq!(bin_edges.len(), 5);
            assert_eq!(counts, vec![25, 25, 25, 25]);
        }
        other => panic!("expected Histogram, got {other:?}"),
    }
}

#[test]
fn density_overlay_is_scaled_to_bar_magnitudes() {
    let values: Vec<Value> = (0..50).map(|i| Value::from((i % 10) as f64)).collect();
    let dataset = numeric_ds(&values);
    let globals = GlobalParams { show_density: true, ..Default::default() };
    match run(&dataset, &globals).unwrap() {
        AggregateResult::Histogram { counts, density, .. } => {
            let curve = density.expect("density requested");
            assert_eq!(curve.len(), 64);
            assert!(curve.iter().all(|(x, y)| x.is_finite() && y.is_finite() && *y >= 0.0));
            // Scaled by n * bin_width, the curve peaks in the same order of
            // magnitude as the tallest bar.
            let peak_curve = curve.iter().map(|(_, y)| *y).fold(0.0f64, f64::max);
            let peak_bar = *counts.iter().max().unwrap() as f64;
            assert!(peak_curve > peak_bar * 0.1 && peak_curve < peak_bar * 10.0);
        }
        other => panic!("expected Histogram, got {other:?}"),
    }
}

#[test]
fn no_numeric_values_is_an_error() {
    let dataset = numeric_ds(&[Value::from("a"), Value::from("b"), Value::Empty]);
    let err = run(&dataset, &GlobalParams::default()).unwrap_err();
    assert_eq!(err, AggregateError::NoNumericValues { column: "v".to_string() });
}
