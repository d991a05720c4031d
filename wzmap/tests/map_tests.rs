//! End-to-end checks against a small Inkscape-authored map.

use std::path::Path;
use wzmap::{
    bonus_commands, find_gaps, highlight_unnamed, lighten, name_commands, penalty_commands,
    Command, Report,
};
use wzsvg::Document;

fn load() -> Document {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/small_map.svg");
    Document::open(&path).expect("fixture should parse")
}

fn add_bonus(name: &str, armies: i32, color: &str) -> Command {
    Command::AddBonus {
        name: name.to_string(),
        armies,
        color: color.to_string(),
    }
}

fn add_to(id: u32, bonus: &str) -> Command {
    Command::AddTerritoryToBonus {
        id,
        bonus_name: bonus.to_string(),
    }
}

#[test]
fn test_full_batch() {
    let doc = load();
    let mut batch = Report::new();
    batch.merge(name_commands(&doc).unwrap());
    batch.merge(bonus_commands(&doc).unwrap());
    batch.merge(penalty_commands(&doc).unwrap());

    assert!(!batch.has_errors(), "{:?}", batch.issues);
    assert_eq!(
        batch.commands,
        vec![
            Command::SetTerritoryName {
                id: 1,
                name: "Harbor".to_string()
            },
            Command::SetTerritoryName {
                id: 2,
                name: "Cliffs".to_string()
            },
            Command::SetTerritoryName {
                id: 4,
                name: "Old Town".to_string()
            },
            Command::SetTerritoryName {
                id: 6,
                name: "Wasteland".to_string()
            },
            add_bonus("North Coast", 1, "#2a7fff"),
            add_to(1, "North Coast"),
            add_to(2, "North Coast"),
            add_bonus("Capital: Old Town", 5, "#ff6600"),
            add_to(4, "Capital: Old Town"),
            add_bonus("- Wasteland", -1, "#000000"),
            add_to(6, "- Wasteland"),
        ]
    );
}

#[test]
fn test_gaps() {
    let report = find_gaps(&load()).unwrap();
    assert_eq!(report.first, 1);
    assert_eq!(report.last, 6);
    assert_eq!(report.missing, vec![3]);
}

#[test]
fn test_highlight_marks_placeholder_name() {
    let mut doc = load();
    assert_eq!(highlight_unnamed(&mut doc), vec!["Territory_5".to_string()]);
}

#[test]
fn test_lightened_map_still_yields_ids() {
    let doc = load();
    let (light, _) = lighten(&doc);
    let xml = light.to_xml().unwrap();
    assert!(xml.len() < doc.to_xml().unwrap().len());

    let reparsed = Document::parse(&xml).unwrap();
    assert_eq!(find_gaps(&reparsed).unwrap(), find_gaps(&doc).unwrap());
    assert!(reparsed
        .elements_with_id_containing("BonusLink_")
        .next()
        .is_some());
}
