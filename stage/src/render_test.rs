use super::*;
use crate::character::CharacterId;

fn character() -> Character {
    Character {
        id: CharacterId(7),
        name: "lead".to_owned(),
        color: "#ff3b3b".to_owned(),
        x: 3,
        y: -4,
        angle: 90,
    }
}

#[test]
fn tooltip_shows_name_pos_and_angle() {
    let lines = tooltip_lines(&character());
    assert_eq!(lines[0], "name: lead");
    assert_eq!(lines[1], "pos: (3, -4)");
    assert_eq!(lines[2], "angle: 90\u{b0}");
}
