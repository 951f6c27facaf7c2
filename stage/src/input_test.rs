use super::*;

// =============================================================
// parse_coordinate
// =============================================================

#[test]
fn coordinate_accepts_plain_integers() {
    assert_eq!(parse_coordinate("0"), Some(0));
    assert_eq!(parse_coordinate("42"), Some(42));
    assert_eq!(parse_coordinate("-17"), Some(-17));
}

#[test]
fn coordinate_rejects_empty_and_bare_sign() {
    assert!(parse_coordinate("").is_none());
    assert!(parse_coordinate("-").is_none());
}

#[test]
fn coordinate_rejects_non_digit_text() {
    assert!(parse_coordinate("12a").is_none());
    assert!(parse_coordinate("1.5").is_none());
    assert!(parse_coordinate("+3").is_none());
    assert!(parse_coordinate(" 3").is_none());
    assert!(parse_coordinate("--3").is_none());
}

#[test]
fn coordinate_rejects_overflow() {
    assert!(parse_coordinate("99999999999999999999").is_none());
}

// =============================================================
// parse_angle
// =============================================================

#[test]
fn angle_accepts_in_range_digits() {
    assert_eq!(parse_angle("0"), Some(0));
    assert_eq!(parse_angle("90"), Some(90));
    assert_eq!(parse_angle("359"), Some(359));
}

#[test]
fn angle_clamps_out_of_range_values() {
    assert_eq!(parse_angle("360"), Some(359));
    assert_eq!(parse_angle("370"), Some(359));
    assert_eq!(parse_angle("99999999999999999999"), Some(359));
}

#[test]
fn angle_rejects_signs_and_non_digits() {
    assert!(parse_angle("-1").is_none());
    assert!(parse_angle("").is_none());
    assert!(parse_angle("12deg").is_none());
    assert!(parse_angle("1.0").is_none());
}

// =============================================================
// FieldEdit
// =============================================================

#[test]
fn field_edit_name_accepts_any_text() {
    assert_eq!(FieldEdit::name("soloist"), FieldEdit::Name("soloist".to_owned()));
    assert_eq!(FieldEdit::name(""), FieldEdit::Name(String::new()));
}

#[test]
fn field_edit_coordinates_validate() {
    assert_eq!(FieldEdit::x("-5"), Some(FieldEdit::X(-5)));
    assert_eq!(FieldEdit::y("12"), Some(FieldEdit::Y(12)));
    assert!(FieldEdit::x("five").is_none());
}

#[test]
fn field_edit_angle_validates_and_clamps() {
    assert_eq!(FieldEdit::angle("45"), Some(FieldEdit::Angle(45)));
    assert_eq!(FieldEdit::angle("720"), Some(FieldEdit::Angle(359)));
    assert!(FieldEdit::angle("-45").is_none());
}

// =============================================================
// Key
// =============================================================

#[test]
fn escape_key_recognized() {
    assert!(Key("Escape".to_owned()).is_escape());
    assert!(!Key("Enter".to_owned()).is_escape());
}

// =============================================================
// Magnifier
// =============================================================

#[test]
fn magnifier_starts_hidden_at_origin() {
    let magnifier = Magnifier::default();
    assert!(!magnifier.visible);
    assert_eq!(magnifier.position, Point::default());
}

#[test]
fn magnifier_show_and_hide() {
    let mut magnifier = Magnifier::default();
    magnifier.show_at(Point::new(10.0, 20.0));
    assert!(magnifier.visible);
    assert_eq!(magnifier.position, Point::new(10.0, 20.0));
    magnifier.hide();
    assert!(!magnifier.visible);
}

#[test]
fn magnifier_follows_only_while_visible() {
    let mut magnifier = Magnifier::default();
    magnifier.follow(Point::new(5.0, 5.0));
    assert_eq!(magnifier.position, Point::new(0.0, 0.0));

    magnifier.show_at(Point::new(1.0, 1.0));
    magnifier.follow(Point::new(5.0, 5.0));
    assert_eq!(magnifier.position, Point::new(5.0, 5.0));
}

// =============================================================
// HoldTimer
// =============================================================

#[test]
fn timer_starts_disarmed() {
    let mut timer = HoldTimer::default();
    assert!(!timer.is_armed());
    assert!(timer.poll(1_000.0).is_none());
}

#[test]
fn timer_fires_after_hold_duration() {
    let mut timer = HoldTimer::default();
    timer.arm(1_000.0, Point::new(3.0, 4.0));
    assert!(timer.poll(1_349.9).is_none());
    assert_eq!(timer.poll(1_350.0), Some(Point::new(3.0, 4.0)));
}

#[test]
fn timer_fires_at_most_once() {
    let mut timer = HoldTimer::default();
    timer.arm(0.0, Point::new(1.0, 1.0));
    assert!(timer.poll(400.0).is_some());
    assert!(timer.poll(800.0).is_none());
    assert!(!timer.is_armed());
}

#[test]
fn cancel_before_deadline_prevents_fire() {
    let mut timer = HoldTimer::default();
    timer.arm(0.0, Point::new(1.0, 1.0));
    timer.cancel();
    assert!(timer.poll(10_000.0).is_none());
}

#[test]
fn rearm_replaces_previous_deadline() {
    let mut timer = HoldTimer::default();
    timer.arm(0.0, Point::new(1.0, 1.0));
    timer.arm(500.0, Point::new(2.0, 2.0));
    // Old deadline (350) must not fire.
    assert!(timer.poll(400.0).is_none());
    assert_eq!(timer.poll(850.0), Some(Point::new(2.0, 2.0)));
}
