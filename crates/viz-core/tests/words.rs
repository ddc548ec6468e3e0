// File: crates/viz-core/tests/words.rs
// Purpose: Word-frequency cleaning, ordering, limits, and column-kind checks.

use viz_core::engine::{aggregate, AggregateError, AggregateResult};
use viz_core::{ChartId, ChartKind, ChartSpec, ColumnProfiles, Dataset, GlobalParams, Value};

fn text_ds(rows: &[&str]) -> Dataset {
    Dataset::new(
        vec!["comment".to_string()],
        rows.iter().map(|r| vec![Value::from(*r)]).collect(),
    )
}

fn cloud_spec() -> ChartSpec {
    let mut spec = ChartSpec::new(ChartId(1), ChartKind::WordCloud);
    spec.text = Some("comment".to_string());
    spec
}

fn entries(dataset: &Dataset, globals: &GlobalParams) -> Vec<(String, u32)> {
    let profiles = ColumnProfiles::profile(dataset).unwrap();
    match aggregate(dataset, &profiles, &cloud_spec(), globals).unwrap() {
        AggregateResult::WordFrequency { entries } => entries,
        other => panic!("expected WordFrequency, got {other:?}"),
    }
}

#[test]
fn counts_case_insensitively_with_first_seen_tie_order() {
    let dataset = text_ds(&["The the THE cat cat dog"]);
    let globals = GlobalParams { min_word_length: 2, ..Default::default() };
    assert_eq!(
        entries(&dataset, &globals),
        vec![
            ("the".to_string(), 3),
            ("cat".to_string(), 2),
            ("dog".to_string(), 1),
        ]
    );
}

#[test]
fn strips_non_alphanumeric_characters() {
    let dataset = text_ds(&["Hello, world! (hello) [WORLD] #24"]);
    let globals = GlobalParams { min_word_length: 4, ..Default::default() };
    assert_eq!(
        entries(&dataset, &globals),
        vec![("hello".to_string(), 2), ("world".to_string(), 2)]
    );
}

#[test]
fn short_tokens_are_discarded() {
    let dataset = text_ds(&["a of the kingdom by it"]);
    // Default minimum length is 3.
    let result = entries(&dataset, &GlobalParams::default());
    assert_eq!(
        result,
        vec![("the".to_string(), 1), ("kingdom".to_string(), 1)]
    );
}

#[test]
fn row_limit_applies_before_tokenizing() {
    let dataset = text_ds(&["alpha beta", "gamma delta"]);
    let globals = GlobalParams { word_cloud_limit: 1, ..Default::default() };
    assert_eq!(
        entries(&dataset, &globals),
        vec![("alpha".to_string(), 1), ("beta".to_string(), 1)]
    );
}

#[test]
fn truncates_to_top_fifty() {
    let many: String = (0..60).map(|i| format!("word{i:02} ")).collect();
    let dataset = text_ds(&[many.as_str()]);
    let result = entries(&dataset, &GlobalParams::default());
    assert_eq!(result.len(), 50);
    // All counts tie at 1, so insertion order decides what survives.
    assert_eq!(result[0].0, "word00");
    assert_eq!(result[49].0, "word49");
}

#[test]
fn numeric_column_is_rejected() {
    let dataset = Dataset::new(
        vec!["n".to_string()],
        (0..4).map(|i| vec![Value::from(i as f64)]).collect(),
    );
    let profiles = ColumnProfiles::profile(&dataset).unwrap();
    let mut spec = cloud_spec();
    spec.text = Some("n".to_string());
    let err = aggregate(&dataset, &profiles, &spec, &GlobalParams::default()).unwrap_err();
    assert_eq!(
        err,
        AggregateError::InvalidColumn { column: "n".to_string(), expected: "a text column" }
    );
}

#[test]
fn unset_text_binding_is_a_missing_binding() {
    let dataset = text_ds(&["hello"]);
    let profiles = ColumnProfiles::profile(&dataset).unwrap();
    let mut spec = cloud_spec();
    spec.text = None;
    let err = aggregate(&dataset, &profiles, &spec, &GlobalParams::default()).unwrap_err();
    assert_eq!(err, AggregateError::MissingBinding { role: "text" });
}
