mod common;

use common::{float, int, text};
use table_validate::{CellValue, DatePrecision, Outcome, Validator};

#[test]
fn strict_equality_is_reflexive_for_every_kind() {
    let values = [
        CellValue::Empty,
        CellValue::Bool(false),
        int(42),
        float(-0.5),
        text("hello"),
    ];
    for v in &values {
        assert_eq!(Validator::Equal.compare(v, v), Outcome::Equals, "{v:?}");
    }
}

#[test]
fn equal_magnitude_different_form_is_matching_never_equals() {
    for validator in [Validator::Int, Validator::number(10)] {
        assert_eq!(validator.compare(&int(5), &text("5")), Outcome::Matching);
        assert_eq!(validator.compare(&text("5"), &int(5)), Outcome::Matching);
    }
    // Same magnitude, different numeric kind: also only MATCHING.
    assert_eq!(
        Validator::number(10).compare(&int(5), &float(5.0)),
        Outcome::Matching
    );
}

#[test]
fn int_validator_rejects_non_integers_as_corrupted() {
    assert_eq!(
        Validator::Int.compare(&int(5), &float(5.5)),
        Outcome::Corrupted
    );
    assert_eq!(
        Validator::Int.compare(&text("abc"), &int(1)),
        Outcome::Corrupted
    );
    assert_eq!(Validator::Int.compare(&int(5), &int(6)), Outcome::Different);
}

#[test]
fn number_validator_parses_locale_decimals() {
    let v = Validator::number(2);
    assert_eq!(v.compare(&text("1.234,56"), &float(1234.56)), Outcome::Matching);
    assert_eq!(v.compare(&text("1.234,56"), &float(1235.56)), Outcome::Different);
}

#[test]
fn number_validator_rounds_at_precision() {
    assert_eq!(
        Validator::number(2).compare(&float(5.123), &float(5.124)),
        Outcome::Almost
    );
    assert_eq!(
        Validator::number(10).compare(&float(5.123), &float(5.124)),
        Outcome::Different
    );
}

#[test]
fn tolerant_float_accepts_within_band() {
    let v = Validator::tolerant_float(0.02, 0.01, 2);
    assert_eq!(v.compare(&float(4.99), &float(5.00)), Outcome::Accepted);
    assert_eq!(v.compare(&float(4.98), &float(5.00)), Outcome::Different);
    // Above the reference, inside delta_up.
    assert_eq!(v.compare(&float(5.02), &float(5.00)), Outcome::Accepted);
    assert_eq!(v.compare(&float(5.03), &float(5.00)), Outcome::Different);
}

#[test]
fn tolerant_float_corrupts_on_non_numbers() {
    let v = Validator::tolerant_float(0.1, 0.1, 2);
    assert_eq!(v.compare(&text("abc"), &float(1.0)), Outcome::Corrupted);
    assert_eq!(v.compare(&float(1.0), &CellValue::Empty), Outcome::Corrupted);
}

#[test]
fn bool_validator_matches_across_locales() {
    assert_eq!(
        Validator::Bool.compare(&text("Ja"), &text("yes")),
        Outcome::Matching
    );
    assert_eq!(
        Validator::Bool.compare(&text("maybe"), &text("nope")),
        Outcome::Corrupted
    );
    assert_eq!(
        Validator::Bool.compare(&text("true"), &text("nein")),
        Outcome::Different
    );
    assert_eq!(
        Validator::Bool.compare(&text("yes"), &text("yes")),
        Outcome::Equals
    );
}

#[test]
fn date_validator_distinguishes_equals_matching_almost() {
    let day = Validator::date(DatePrecision::Day);
    let dt = |s: &str| text(s);

    assert_eq!(
        day.compare(&dt("2024-01-02T10:00:00"), &dt("2024-01-02T10:00:00")),
        Outcome::Equals
    );
    // Same instant, different literal form.
    assert_eq!(
        day.compare(&dt("2024-01-02"), &dt("2024-01-02T00:00:00")),
        Outcome::Matching
    );
    // Same day, different time.
    assert_eq!(
        day.compare(&dt("2024-01-02T10:00:00"), &dt("2024-01-02T23:59:59")),
        Outcome::Almost
    );
    assert_eq!(
        day.compare(&dt("2024-01-02"), &dt("2024-01-03")),
        Outcome::Different
    );
    assert_eq!(day.compare(&dt("not a date"), &dt("2024-01-02")), Outcome::Corrupted);
}

#[test]
fn omit_and_ignore_never_judge() {
    for (a, b) in [
        (int(1), int(1)),
        (int(1), text("garbage")),
        (CellValue::Empty, CellValue::Empty),
    ] {
        assert_eq!(Validator::Omit.compare(&a, &b), Outcome::Omitted);
        assert_eq!(Validator::Ignore.compare(&a, &b), Outcome::Matching);
    }
}

#[test]
fn auto_validator_dispatches_by_detected_type() {
    let auto = Validator::Auto;
    assert_eq!(auto.compare(&text("x"), &text("x")), Outcome::Equals);
    assert_eq!(auto.compare(&CellValue::Empty, &int(1)), Outcome::Different);
    assert_eq!(
        auto.compare(&text("2024-05-01T08:00:00"), &text("2024-05-01T20:00:00")),
        Outcome::Almost
    );
    assert_eq!(auto.compare(&text("wahr"), &text("no")), Outcome::Different);
    assert_eq!(auto.compare(&text("x"), &text("y")), Outcome::Different);
}

#[test]
fn validators_serialize_with_their_parameters() {
    let v = Validator::tolerant_float(0.02, 0.01, 2);
    let json = serde_json::to_string(&v).expect("serialize validator");
    let back: Validator = serde_json::from_str(&json).expect("deserialize validator");
    assert_eq!(v, back);
    assert!(json.contains("\"kind\":\"tolerant_float\""));
}
