//! Region discovery: turn a floor-plan SVG document into colored regions.
//!
//! DESIGN
//! ======
//! A floor plan keeps its room shapes on a dedicated layer, a `<g>` whose
//! `inkscape:label` (or `data-label`, or `id`) starts with "area". When that
//! layer exists only its shapes are considered. Otherwise every `polygon`,
//! `rect` and `path` in the document is scanned and only closed shapes with
//! a resolvable fill are kept, which filters out walls, furniture and text
//! outlines drawn in black.
//!
//! Shapes without an `id` get a synthetic one, `{floor}-{tag}-{index}`, where
//! `index` counts candidate shapes in document order. The same document
//! always yields the same ids.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::consts::{DEFAULT_FILL, MIN_REGION_POINTS};
use crate::geometry::{Bounds, Point};
use crate::path;
use crate::viewport::ViewBox;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("malformed svg: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("document root is <{0}>, expected <svg>")]
    NotSvg(String),
}

/// Source element a region was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTag {
    Polygon,
    Rect,
    Path,
}

impl ShapeTag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "polygon" => Some(Self::Polygon),
            "rect" => Some(Self::Rect),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Path => "path",
        }
    }
}

/// A shape found in the document, in SVG user units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveredRegion {
    pub id: String,
    pub tag: ShapeTag,
    pub fill_color: String,
    /// `fill-opacity` from inline style or attribute, clamped to `[0, 1]`.
    pub fill_opacity: Option<f64>,
    pub points: Vec<Point>,
    pub closed: bool,
    /// Position among candidate shapes in document order.
    pub source_index: usize,
}

impl DiscoveredRegion {
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

/// Parsed floor plan: its coordinate frame and the regions on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorDocument {
    pub view_box: ViewBox,
    pub regions: Vec<DiscoveredRegion>,
    /// Whether the regions came from a labelled area layer.
    pub from_area_layer: bool,
}

// =============================================================================
// DISCOVERY
// =============================================================================

/// Parse `svg` and discover the regions of `floor`.
///
/// # Errors
///
/// Returns an error if the text is not well-formed XML or its root element
/// is not `<svg>`. Shapes that cannot be turned into a region are skipped
/// silently.
pub fn parse_document(svg: &str, floor: &str) -> Result<FloorDocument, SvgError> {
    let doc = Document::parse(svg)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgError::NotSvg(root.tag_name().name().to_owned()));
    }

    let styles = ClassFills::from_document(&doc);
    let layer = find_area_layer(root);
    let scope = layer.unwrap_or(root);
    let from_area_layer = layer.is_some();

    let mut regions = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (index, node) in scope
        .descendants()
        .filter(|n| n.is_element() && ShapeTag::from_name(n.tag_name().name()).is_some() && !in_non_rendered(*n))
        .enumerate()
    {
        let Some(tag) = ShapeTag::from_name(node.tag_name().name()) else {
            continue;
        };
        let Some((local_points, closed)) = shape_points(node, tag) else {
            continue;
        };
        if local_points.len() < MIN_REGION_POINTS {
            continue;
        }
        let resolved = resolve_fill(node, &styles);
        if !from_area_layer && (resolved.is_none() || !closed) {
            continue;
        }

        let transform = accumulated_transform(node);
        let points = local_points.into_iter().map(|p| transform.apply(p)).collect();
        let base_id = node
            .attribute("id")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| format!("{floor}-{}-{index}", tag.as_str()), str::to_owned);
        let id = unique_id(base_id, &mut seen);

        regions.push(DiscoveredRegion {
            id,
            tag,
            fill_color: resolved.unwrap_or_else(|| DEFAULT_FILL.to_owned()),
            fill_opacity: resolve_opacity(node),
            points,
            closed,
            source_index: index,
        });
    }

    let view_box = document_view_box(root).unwrap_or_else(|| regions_view_box(&regions));
    tracing::debug!(floor, regions = regions.len(), from_area_layer, "discovered floor regions");
    Ok(FloorDocument { view_box, regions, from_area_layer })
}

fn unique_id(base: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(base.clone()) {
        return base;
    }
    let mut n = 2_usize;
    loop {
        let candidate = format!("{base}-{n}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Whether `label` names the room-area layer.
#[must_use]
pub fn is_area_label(label: &str) -> bool {
    label.trim().to_ascii_lowercase().starts_with("area")
}

fn find_area_layer<'a, 'input>(root: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    root.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == "g"
            && n.attributes().any(|a| matches!(a.name(), "label" | "data-label" | "id") && is_area_label(a.value()))
    })
}

fn in_non_rendered(node: Node<'_, '_>) -> bool {
    node.ancestors().any(|a| {
        a.is_element() && matches!(a.tag_name().name(), "defs" | "clipPath" | "mask" | "pattern" | "symbol" | "marker")
    })
}

fn shape_points(node: Node<'_, '_>, tag: ShapeTag) -> Option<(Vec<Point>, bool)> {
    match tag {
        ShapeTag::Polygon => Some((parse_points_attr(node.attribute("points")?), true)),
        ShapeTag::Rect => {
            let x = node.attribute("x").and_then(parse_length).unwrap_or(0.0);
            let y = node.attribute("y").and_then(parse_length).unwrap_or(0.0);
            let w = node.attribute("width").and_then(parse_length)?;
            let h = node.attribute("height").and_then(parse_length)?;
            if w <= 0.0 || h <= 0.0 {
                return None;
            }
            Some((vec![Point::new(x, y), Point::new(x + w, y), Point::new(x + w, y + h), Point::new(x, y + h)], true))
        }
        ShapeTag::Path => {
            let parsed = path::parse(node.attribute("d")?);
            Some((parsed.points, parsed.closed))
        }
    }
}

/// Parse a `points` list (`"x1,y1 x2,y2 ..."`). A trailing odd coordinate is ignored.
#[must_use]
pub fn parse_points_attr(raw: &str) -> Vec<Point> {
    parse_number_list(raw)
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect()
}

/// Whitespace/comma separated numbers, stopping at the first bad token.
pub(crate) fn parse_number_list(raw: &str) -> Vec<f64> {
    let mut out = Vec::new();
    for token in raw.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty()) {
        let Ok(value) = token.parse::<f64>() else {
            break;
        };
        out.push(value);
    }
    out
}

fn parse_length(raw: &str) -> Option<f64> {
    let Ok(value) = raw.trim().trim_end_matches("px").parse::<f64>() else {
        return None;
    };
    Some(value)
}

fn document_view_box(root: Node<'_, '_>) -> Option<ViewBox> {
    if let Some(vb) = root.attribute("viewBox").and_then(ViewBox::parse) {
        return Some(vb);
    }
    let width = root.attribute("width").and_then(parse_length)?;
    let height = root.attribute("height").and_then(parse_length)?;
    Some(ViewBox::new(0.0, 0.0, width, height))
}

fn regions_view_box(regions: &[DiscoveredRegion]) -> ViewBox {
    let bounds = regions
        .iter()
        .filter_map(DiscoveredRegion::bounds)
        .reduce(|acc, b| acc.union(&b));
    bounds.map_or_else(ViewBox::default, |b| ViewBox::new(b.min_x, b.min_y, b.width(), b.height()))
}

// =============================================================================
// FILL RESOLUTION
// =============================================================================

static CSS_COMMENT: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/"));
static CSS_RULE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"([^{}]+)\{([^}]*)\}"));
static CSS_CLASS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z_][A-Za-z0-9_-]*)"));

/// Class name → fill, collected from every embedded `<style>` block.
/// Later rules override earlier ones.
#[derive(Debug, Default)]
struct ClassFills {
    fills: HashMap<String, (usize, String)>,
}

impl ClassFills {
    fn from_document(doc: &Document<'_>) -> Self {
        let css: String = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "style")
            .flat_map(|n| n.children().filter_map(|c| c.text()))
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_css(&css)
    }

    fn from_css(css: &str) -> Self {
        let (Ok(comment), Ok(rule_re), Ok(class_re)) = (&*CSS_COMMENT, &*CSS_RULE, &*CSS_CLASS) else {
            return Self::default();
        };
        let css = comment.replace_all(css, "");
        let mut fills = HashMap::new();
        for (order, rule) in rule_re.captures_iter(&css).enumerate() {
            let (Some(selectors), Some(body)) = (rule.get(1), rule.get(2)) else {
                continue;
            };
            let Some(fill) = declaration(body.as_str(), "fill") else {
                continue;
            };
            for class in class_re.captures_iter(selectors.as_str()).filter_map(|c| c.get(1)) {
                fills.insert(class.as_str().to_owned(), (order, fill.clone()));
            }
        }
        Self { fills }
    }

    fn lookup(&self, classes: &str) -> Option<&str> {
        classes
            .split_whitespace()
            .filter_map(|c| self.fills.get(c))
            .max_by_key(|(order, _)| *order)
            .map(|(_, fill)| fill.as_str())
    }
}

/// Value of `property` in a `a: b; c: d` declaration list.
fn declaration(decls: &str, property: &str) -> Option<String> {
    decls.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            Some(value.trim().trim_end_matches("!important").trim().to_owned())
        } else {
            None
        }
    })
}

/// Whether a fill value paints a usable room color.
#[must_use]
pub fn is_usable_fill(value: &str) -> bool {
    let v: String = value.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_lowercase();
    !matches!(v.as_str(), "" | "none" | "transparent" | "black" | "#000" | "#000000" | "rgb(0,0,0)")
}

/// Resolve a shape's fill: inline style, then `fill` attribute, then class rules.
fn resolve_fill(node: Node<'_, '_>, styles: &ClassFills) -> Option<String> {
    let inline = node.attribute("style").and_then(|s| declaration(s, "fill"));
    let attr = node.attribute("fill").map(str::to_owned);
    let class = node
        .attribute("class")
        .and_then(|c| styles.lookup(c))
        .map(str::to_owned);
    [inline, attr, class]
        .into_iter()
        .flatten()
        .find(|v| is_usable_fill(v))
}

fn resolve_opacity(node: Node<'_, '_>) -> Option<f64> {
    let inline = node.attribute("style").and_then(|s| declaration(s, "fill-opacity"));
    let attr = node.attribute("fill-opacity").map(str::to_owned);
    [inline, attr]
        .into_iter()
        .flatten()
        .find_map(|v| parse_length(&v))
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

// =============================================================================
// TRANSFORMS
// =============================================================================

/// 2D affine transform `[a c e; b d f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Affine {
    const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    fn then(self, inner: Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    fn apply(self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }
}

static TRANSFORM_ITEM: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s*\(([^)]*)\)"));

/// Parse `translate`, `scale` and `matrix` items; other items are ignored.
fn parse_transform(raw: &str) -> Affine {
    let mut out = Affine::IDENTITY;
    let Ok(item_re) = &*TRANSFORM_ITEM else {
        return out;
    };
    for item in item_re.captures_iter(raw) {
        let (Some(name), Some(args)) = (item.get(1), item.get(2)) else {
            continue;
        };
        let nums = parse_number_list(args.as_str());
        let step = match (name.as_str(), nums.as_slice()) {
            ("translate", [tx]) => Affine { e: *tx, ..Affine::IDENTITY },
            ("translate", [tx, ty, ..]) => Affine { e: *tx, f: *ty, ..Affine::IDENTITY },
            ("scale", [s]) => Affine { a: *s, d: *s, ..Affine::IDENTITY },
            ("scale", [sx, sy, ..]) => Affine { a: *sx, d: *sy, ..Affine::IDENTITY },
            ("matrix", [a, b, c, d, e, f, ..]) => Affine { a: *a, b: *b, c: *c, d: *d, e: *e, f: *f },
            _ => Affine::IDENTITY,
        };
        out = out.then(step);
    }
    out
}

/// Combined transform from the element up to the document root.
fn accumulated_transform(node: Node<'_, '_>) -> Affine {
    node.ancestors()
        .filter(Node::is_element)
        .filter_map(|n| n.attribute("transform"))
        .fold(Affine::IDENTITY, |inner, raw| parse_transform(raw).then(inner))
}
