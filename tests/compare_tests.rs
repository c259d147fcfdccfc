mod common;

use common::{int, table_from_rows, table_from_text, text};
use table_validate::{
    calculate_validator_array, compare_tables, compare_tables_streaming, CompareConfig, Outcome,
    RowSink, Validator, ValidatorOverrides, VecSink,
};

fn strict(n: usize) -> Vec<Option<Validator>> {
    vec![Some(Validator::Equal); n]
}

#[test]
fn header_row_is_compared_strictly_even_with_tolerant_validators() {
    let measured = table_from_text(&[&["Amount", "Flag"], &["5", "yes"]]);
    let reference = table_from_rows(vec![
        vec![text("amount"), text("Flag")],
        vec![int(5), text("ja")],
    ]);

    // Data columns use Auto, which would match "Amount" vs "amount".
    let validators = vec![Some(Validator::Auto); 2];
    let diffs = compare_tables(&measured, &reference, &validators, &CompareConfig::default());

    // Header disagreement in column 1 surfaces despite Auto.
    assert_eq!(diffs[0].outcomes, vec![Outcome::Different, Outcome::Equals]);
    // Data row still goes through Auto.
    assert_eq!(diffs[1].outcomes, vec![Outcome::Equals, Outcome::Matching]);
}

#[test]
fn first_row_is_header_can_be_disabled() {
    let measured = table_from_text(&[&["Amount"]]);
    let reference = table_from_text(&[&["amount"]]);

    let validators = vec![Some(Validator::Ignore)];
    let config = CompareConfig::builder().first_row_is_header(false).build();
    let diffs = compare_tables(&measured, &reference, &validators, &config);
    assert_eq!(diffs[0].outcomes, vec![Outcome::Matching]);
}

#[test]
fn longer_measured_row_appends_longer_outcomes() {
    let row1: Vec<_> = ["a", "b", "c"].iter().map(|s| text(s)).collect();
    let row2: Vec<_> = ["a", "b"].iter().map(|s| text(s)).collect();
    let measured = table_from_rows(vec![row1]);
    let reference = table_from_rows(vec![row2]);

    let diffs = compare_tables(&measured, &reference, &strict(3), &CompareConfig::default());
    assert_eq!(
        diffs[0].outcomes,
        vec![Outcome::Equals, Outcome::Equals, Outcome::Longer]
    );
}

#[test]
fn missing_rows_are_absent_with_sentinel_index() {
    let measured = table_from_text(&[&["h"], &["x"], &["y"]]);
    let reference = table_from_text(&[&["h"]]);

    let diffs = compare_tables(&measured, &reference, &strict(1), &CompareConfig::default());
    assert_eq!(diffs.len(), 3);
    assert_eq!(diffs[1].index1, 2);
    assert_eq!(diffs[1].index2, -1);
    assert!(diffs[1].values2.is_empty());
    // Entire measured row is surplus against an absent reference row.
    assert_eq!(diffs[1].outcomes, vec![Outcome::Longer]);
    assert_eq!(diffs[2].row, 3);
}

#[test]
fn streaming_and_bulk_produce_identical_sequences() {
    let measured = table_from_text(&[
        &["id", "amount"],
        &["1", "5,0"],
        &["2", "bad"],
        &["3", "7.25", "extra"],
    ]);
    let mut reference = table_from_rows(vec![
        vec![text("id"), text("amount")],
        vec![int(1), int(5)],
        vec![int(2), int(6)],
        vec![int(3), text("7.25")],
    ]);

    let validators = vec![Some(Validator::Equal), Some(Validator::number(2))];
    let config = CompareConfig::default();

    let bulk = compare_tables(&measured, &reference, &validators, &config);

    let mut sink = VecSink::new();
    compare_tables_streaming(&measured, &mut reference, &validators, &config, &mut sink)
        .expect("streaming comparison");
    let streamed = sink.into_rows();

    assert_eq!(bulk, streamed);
}

#[test]
fn sink_lifecycle_runs_begin_and_finish() {
    struct LifecycleSink {
        begun: bool,
        rows: usize,
        finished: bool,
    }
    impl RowSink for LifecycleSink {
        fn begin(&mut self) -> Result<(), table_validate::CompareError> {
            self.begun = true;
            Ok(())
        }
        fn accept(
            &mut self,
            _diff: &table_validate::RowDiff,
            _reference: &mut table_validate::ReferenceSide<'_>,
        ) -> Result<(), table_validate::CompareError> {
            assert!(self.begun);
            self.rows += 1;
            Ok(())
        }
        fn finish(&mut self) -> Result<(), table_validate::CompareError> {
            self.finished = true;
            Ok(())
        }
    }

    let measured = table_from_text(&[&["h"], &["x"]]);
    let mut reference = table_from_text(&[&["h"], &["x"]]);
    let mut sink = LifecycleSink {
        begun: false,
        rows: 0,
        finished: false,
    };
    compare_tables_streaming(
        &measured,
        &mut reference,
        &strict(1),
        &CompareConfig::default(),
        &mut sink,
    )
    .expect("streaming comparison");
    assert_eq!(sink.rows, 2);
    assert!(sink.finished);
}

#[test]
fn validator_array_pads_with_default_and_applies_overrides() {
    let reference = table_from_text(&[&["id", "name", "amount"]]);

    let overrides = ValidatorOverrides::new()
        .by_index(0, Validator::Int)
        .by_name("amount", Validator::number(2))
        .by_name("missing", Validator::Omit);

    let validators = calculate_validator_array(
        &reference,
        Some(vec![Some(Validator::Equal)]),
        Some(&overrides),
        Some(Validator::Auto),
    );

    assert_eq!(validators.len(), 3);
    assert_eq!(validators[0], Some(Validator::Int));
    assert_eq!(validators[1], Some(Validator::Auto));
    assert_eq!(validators[2], Some(Validator::number(2)));
    // The unresolved "missing" override was dropped silently.
}

#[test]
fn index_override_beyond_reference_width_is_ignored() {
    let reference = table_from_text(&[&["a"]]);
    let overrides = ValidatorOverrides::new().by_index(5, Validator::Omit);
    let validators =
        calculate_validator_array(&reference, None, Some(&overrides), Some(Validator::Equal));
    assert_eq!(validators, vec![Some(Validator::Equal)]);
}

#[test]
fn comparison_is_idempotent_on_readonly_inputs() {
    let measured = table_from_text(&[&["h"], &["1"], &["x"]]).read_only();
    let reference = table_from_text(&[&["h"], &["2"], &["x"]]).read_only();

    let validators = vec![Some(Validator::number(2))];
    let config = CompareConfig::default();
    let first = compare_tables(&measured, &reference, &validators, &config);
    let second = compare_tables(&measured, &reference, &validators, &config);
    assert_eq!(first, second);
}
