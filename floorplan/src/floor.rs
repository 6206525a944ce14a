//! Floor names: sanitization, file naming, and display order.

#[cfg(test)]
#[path = "floor_test.rs"]
mod floor_test;

use std::cmp::Ordering;

/// Keep ASCII alphanumerics and upper-case them: `"lt-1!"` becomes `"LT1"`.
///
/// An empty result means the input named no floor at all.
#[must_use]
pub fn sanitize_floor(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// File name of a floor's SVG in the store, or `None` if the name sanitizes to nothing.
#[must_use]
pub fn svg_file_name(raw: &str) -> Option<String> {
    let floor = sanitize_floor(raw);
    if floor.is_empty() { None } else { Some(format!("{floor}.svg")) }
}

/// Static fallback location for a floor's SVG.
#[must_use]
pub fn fallback_url(raw: &str) -> String {
    format!("/denah/{}.svg", sanitize_floor(raw))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum FloorClass {
    /// `B<n>`; deeper basements sort first.
    Basement(std::cmp::Reverse<u64>),
    /// Any other name carrying a number, e.g. `LT3` or `12`.
    Numbered(u64),
    Other,
}

fn classify(name: &str) -> FloorClass {
    if let Some(digits) = name.strip_prefix(['B', 'b']) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u64>() {
                return FloorClass::Basement(std::cmp::Reverse(n));
            }
        }
    }
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u64>() {
        Ok(n) => FloorClass::Numbered(n),
        Err(_) => FloorClass::Other,
    }
}

/// Building order: basements deepest first, then numbered floors ascending,
/// then everything else alphabetically.
#[must_use]
pub fn compare_floors(a: &str, b: &str) -> Ordering {
    classify(a).cmp(&classify(b)).then_with(|| a.cmp(b))
}

/// Sort floor names in place using [`compare_floors`].
pub fn sort_floors(floors: &mut [String]) {
    floors.sort_by(|a, b| compare_floors(a, b));
}
