use super::*;

#[test]
fn sanitize_strips_and_uppercases() {
    assert_eq!(sanitize_floor("lt-1!"), "LT1");
    assert_eq!(sanitize_floor(" b2 "), "B2");
    assert_eq!(sanitize_floor("../../etc/passwd"), "ETCPASSWD");
    assert_eq!(sanitize_floor("--"), "");
}

#[test]
fn sanitize_drops_non_ascii() {
    assert_eq!(sanitize_floor("lantai-é1"), "LANTAI1");
}

#[test]
fn svg_file_name_requires_a_floor() {
    assert_eq!(svg_file_name("lt-1!").as_deref(), Some("LT1.svg"));
    assert_eq!(svg_file_name("!!"), None);
}

#[test]
fn fallback_url_uses_sanitized_name() {
    assert_eq!(fallback_url("lt2"), "/denah/LT2.svg");
}

#[test]
fn floors_sort_basements_first_descending() {
    let mut floors: Vec<String> = ["LT2", "B1", "ROOFTOP", "LT10", "B3", "LT1", "GF", "B2"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    sort_floors(&mut floors);
    assert_eq!(floors, vec!["B3", "B2", "B1", "LT1", "LT2", "LT10", "GF", "ROOFTOP"]);
}

#[test]
fn bare_b_is_not_a_basement() {
    assert_eq!(compare_floors("B", "LT1"), Ordering::Greater);
    assert_eq!(compare_floors("BASEMENT", "GF"), Ordering::Less);
}

#[test]
fn numbered_ties_fall_back_to_name() {
    assert_eq!(compare_floors("LT1", "M1"), Ordering::Less);
}
