use super::*;
use crate::character::CharacterId;

fn character(id: u32) -> Character {
    Character {
        id: CharacterId(id),
        name: "white".to_owned(),
        color: "#fff".to_owned(),
        x: 0,
        y: 0,
        angle: 0,
    }
}

// =============================================================
// MemoryRepository
// =============================================================

#[test]
fn load_unknown_project_is_not_found() {
    let repo = MemoryRepository::new();
    assert_eq!(
        repo.load_characters(Uuid::new_v4()),
        Err(StoreError::NotFound)
    );
}

#[test]
fn replace_then_load_round_trips() {
    let project = Uuid::new_v4();
    let mut repo = MemoryRepository::new();
    let roster = vec![character(1), character(2)];
    repo.replace_characters(project, &roster).unwrap();
    assert_eq!(repo.load_characters(project).unwrap(), roster);
}

#[test]
fn replace_overwrites_previous_roster() {
    let project = Uuid::new_v4();
    let mut repo = MemoryRepository::new();
    repo.replace_characters(project, &[character(1), character(2)])
        .unwrap();
    repo.replace_characters(project, &[character(3)]).unwrap();
    assert_eq!(repo.load_characters(project).unwrap(), vec![character(3)]);
}

#[test]
fn projects_are_isolated() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut repo = MemoryRepository::seeded(a, vec![character(1)]);
    repo.replace_characters(b, &[character(9)]).unwrap();
    assert_eq!(repo.load_characters(a).unwrap(), vec![character(1)]);
    assert_eq!(repo.load_characters(b).unwrap(), vec![character(9)]);
}

#[test]
fn replacing_with_empty_roster_is_a_save_not_a_delete() {
    let project = Uuid::new_v4();
    let mut repo = MemoryRepository::seeded(project, vec![character(1)]);
    repo.replace_characters(project, &[]).unwrap();
    assert_eq!(repo.load_characters(project).unwrap(), vec![]);
}

// =============================================================
// ProjectRecord serialization
// =============================================================

#[test]
fn project_record_round_trips_through_json() {
    let record = ProjectRecord {
        id: Uuid::new_v4(),
        name: "spring showcase".to_owned(),
        characters: vec![character(1)],
    };
    let json = serde_json::to_string(&record).unwrap();
    let parsed: ProjectRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn character_json_uses_plain_field_names() {
    let json = serde_json::to_value(character(7)).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "white");
    assert_eq!(json["color"], "#fff");
    assert_eq!(json["x"], 0);
    assert_eq!(json["y"], 0);
    assert_eq!(json["angle"], 0);
}
