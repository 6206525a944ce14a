#![allow(clippy::float_cmp)]

use super::*;
use crate::svg::ShapeTag;

fn found(id: &str, x: f64, y: f64, size: f64) -> DiscoveredRegion {
    DiscoveredRegion {
        id: id.to_owned(),
        tag: ShapeTag::Rect,
        fill_color: "#ff0000".to_owned(),
        fill_opacity: None,
        points: vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ],
        closed: true,
        source_index: 0,
    }
}

fn seeded() -> RegionRegistry {
    let mut reg = RegionRegistry::new();
    reg.rebuild(vec![found("a", 0.0, 0.0, 100.0), found("b", 50.0, 50.0, 100.0), found("c", 300.0, 0.0, 10.0)]);
    reg
}

#[test]
fn rebuild_keeps_document_order() {
    let reg = seeded();
    let ids: Vec<&str> = reg.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(reg.len(), 3);
}

#[test]
fn rebuild_replaces_previous_regions() {
    let mut reg = seeded();
    reg.rebuild(vec![found("z", 0.0, 0.0, 1.0)]);
    assert_eq!(reg.len(), 1);
    assert!(reg.get("a").is_none());
    assert!(reg.contains("z"));
}

#[test]
fn rebuild_drops_duplicate_ids() {
    let mut reg = RegionRegistry::new();
    reg.rebuild(vec![found("dup", 0.0, 0.0, 1.0), found("dup", 5.0, 5.0, 1.0)]);
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get("dup").map(|r| r.geometry[0]), Some(Point::new(0.0, 0.0)));
}

#[test]
fn insert_rejects_duplicate_id() {
    let mut reg = seeded();
    let err = reg.insert(Region::from(found("a", 0.0, 0.0, 1.0))).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateId("a".into()));
}

#[test]
fn new_regions_start_idle_and_invisible() {
    let reg = seeded();
    let a = reg.get("a").unwrap();
    assert_eq!(a.highlight, Highlight::Idle);
    assert_eq!(a.opacity, 0.0);
    assert_eq!(a.fill_color, a.original_color);
}

#[test]
fn set_highlight_applies_opacity() {
    let mut reg = seeded();
    assert!(reg.set_highlight("a", Highlight::Hovered));
    assert_eq!(reg.get("a").unwrap().opacity, 0.6);
    assert!(reg.set_highlight("a", Highlight::Selected));
    assert_eq!(reg.get("a").unwrap().opacity, 0.7);
    assert!(!reg.set_highlight("missing", Highlight::Hovered));
}

#[test]
fn set_and_reset_fill() {
    let mut reg = seeded();
    assert!(reg.set_fill("b", "#00ff00"));
    assert_eq!(reg.get("b").unwrap().fill_color, "#00ff00");
    assert!(reg.reset_fill("b"));
    assert_eq!(reg.get("b").unwrap().fill_color, "#ff0000");
}

#[test]
fn topmost_at_prefers_later_regions() {
    let reg = seeded();
    // (75, 75) lies in both a and b; b is drawn later.
    assert_eq!(reg.topmost_at(Point::new(75.0, 75.0)).map(|r| r.id.as_str()), Some("b"));
    assert_eq!(reg.topmost_at(Point::new(10.0, 10.0)).map(|r| r.id.as_str()), Some("a"));
    assert!(reg.topmost_at(Point::new(250.0, 250.0)).is_none());
}

#[test]
fn bounds_of_region() {
    let reg = seeded();
    let b = reg.bounds("c").unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (300.0, 0.0, 310.0, 10.0));
    assert!(reg.bounds("nope").is_none());
}
