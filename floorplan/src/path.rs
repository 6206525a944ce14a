//! SVG path `d` attribute parsing and serialization.
//!
//! The parser turns path data into an ordered vertex list. Straight-line
//! commands (`M L H V Z`, absolute and relative) are followed exactly. Curve
//! commands (`C S Q T A`) have their arguments consumed so the pen position
//! stays correct, but each curve contributes only its end point: floor plans
//! are authored as polygons and a chord is a better outline than a gap.
//!
//! Parsing never fails. The first unparseable token ends the walk and the
//! vertices collected so far are returned; callers that need a real region
//! check the count against [`MIN_REGION_POINTS`](crate::consts::MIN_REGION_POINTS).

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use crate::consts::VERTEX_EPSILON;
use crate::geometry::{Point, flip_y};

/// Vertices extracted from one `d` attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedPath {
    /// Vertices in drawing order, all subpaths concatenated.
    pub points: Vec<Point>,
    /// Whether the last subpath was closed with `Z`/`z`.
    pub closed: bool,
}

/// Parse path data into SVG-space vertices.
#[must_use]
pub fn parse(d: &str) -> ParsedPath {
    PathWalker::new(d).run()
}

/// Parse path data into SVG-space vertices, discarding closure information.
#[must_use]
pub fn parse_path(d: &str) -> Vec<Point> {
    parse(d).points
}

/// Parse path data into display coordinates (`y_display = height - y_svg`).
#[must_use]
pub fn parse_path_flipped(d: &str, height: f64) -> Vec<Point> {
    flip_y(&parse(d).points, height)
}

/// Serialize vertices as absolute `M`/`L` path data, closing with `Z` when asked.
#[must_use]
pub fn to_path_data(points: &[Point], closed: bool) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{cmd}{} {}", format_number(p.x), format_number(p.y)));
    }
    if closed && !points.is_empty() {
        out.push_str(" Z");
    }
    out
}

/// Format a coordinate with at most three decimals and no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_owned()
}

// =============================================================================
// WALKER
// =============================================================================

struct PathWalker<'a> {
    lexer: Lexer<'a>,
    points: Vec<Point>,
    pen: Point,
    subpath_start: Point,
    subpath_first_index: usize,
    closed: bool,
}

impl<'a> PathWalker<'a> {
    fn new(d: &'a str) -> Self {
        Self {
            lexer: Lexer::new(d),
            points: Vec::new(),
            pen: Point::default(),
            subpath_start: Point::default(),
            subpath_first_index: 0,
            closed: false,
        }
    }

    fn run(mut self) -> ParsedPath {
        let mut current: Option<u8> = None;
        loop {
            self.lexer.skip_separators();
            if self.lexer.at_end() {
                break;
            }
            if let Some(cmd) = self.lexer.command() {
                current = Some(cmd);
                if cmd.eq_ignore_ascii_case(&b'z') {
                    self.close();
                    continue;
                }
            } else if current.is_none_or(|c| c.eq_ignore_ascii_case(&b'z')) {
                // Numbers with no command to repeat.
                break;
            }
            let Some(cmd) = current else {
                break;
            };
            if !self.segment(cmd) {
                break;
            }
            // Extra coordinate pairs after a moveto are implicit linetos.
            if cmd == b'M' {
                current = Some(b'L');
            } else if cmd == b'm' {
                current = Some(b'l');
            }
        }
        ParsedPath { points: self.points, closed: self.closed }
    }

    /// Consume one segment's arguments. Returns `false` on malformed input.
    fn segment(&mut self, cmd: u8) -> bool {
        let relative = cmd.is_ascii_lowercase();
        match cmd.to_ascii_uppercase() {
            b'M' => {
                let Some(p) = self.pair(relative) else {
                    return false;
                };
                self.pen = p;
                self.subpath_start = p;
                self.subpath_first_index = self.points.len();
                self.closed = false;
                self.points.push(p);
            }
            b'L' | b'T' => {
                let Some(p) = self.pair(relative) else {
                    return false;
                };
                self.line_to(p);
            }
            b'H' => {
                let Some(x) = self.lexer.number() else {
                    return false;
                };
                let x = if relative { self.pen.x + x } else { x };
                self.line_to(Point::new(x, self.pen.y));
            }
            b'V' => {
                let Some(y) = self.lexer.number() else {
                    return false;
                };
                let y = if relative { self.pen.y + y } else { y };
                self.line_to(Point::new(self.pen.x, y));
            }
            b'C' => {
                if self.skip_numbers(4).is_none() {
                    return false;
                }
                let Some(p) = self.pair(relative) else {
                    return false;
                };
                self.line_to(p);
            }
            b'S' | b'Q' => {
                if self.skip_numbers(2).is_none() {
                    return false;
                }
                let Some(p) = self.pair(relative) else {
                    return false;
                };
                self.line_to(p);
            }
            b'A' => {
                if self.skip_numbers(3).is_none() || self.lexer.flag().is_none() || self.lexer.flag().is_none() {
                    return false;
                }
                let Some(p) = self.pair(relative) else {
                    return false;
                };
                self.line_to(p);
            }
            _ => return false,
        }
        true
    }

    fn pair(&mut self, relative: bool) -> Option<Point> {
        let x = self.lexer.number()?;
        let y = self.lexer.number()?;
        Some(if relative { Point::new(self.pen.x + x, self.pen.y + y) } else { Point::new(x, y) })
    }

    fn skip_numbers(&mut self, n: usize) -> Option<()> {
        for _ in 0..n {
            self.lexer.number()?;
        }
        Some(())
    }

    fn line_to(&mut self, p: Point) {
        self.pen = p;
        self.points.push(p);
    }

    fn close(&mut self) {
        let subpath_len = self.points.len() - self.subpath_first_index;
        if subpath_len > 1
            && self
                .points
                .last()
                .is_some_and(|last| last.approx_eq(self.subpath_start, VERTEX_EPSILON))
        {
            self.points.pop();
        }
        self.pen = self.subpath_start;
        self.closed = true;
    }
}

// =============================================================================
// LEXER
// =============================================================================

struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { bytes: src.as_bytes(), pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn command(&mut self) -> Option<u8> {
        let b = self.peek()?;
        if b"MmLlHhVvZzCcSsQqTtAa".contains(&b) {
            self.pos += 1;
            Some(b)
        } else {
            None
        }
    }

    /// Arc flags may be written without separators (`a1 1 0 01 5 5`).
    fn flag(&mut self) -> Option<()> {
        self.skip_separators();
        match self.peek()? {
            b'0' | b'1' => {
                self.pos += 1;
                Some(())
            }
            _ => None,
        }
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;
        let mut end = self.pos;
        if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let mut mantissa_digits = 0;
        while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
            mantissa_digits += 1;
        }
        if self.bytes.get(end) == Some(&b'.') {
            end += 1;
            while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
                mantissa_digits += 1;
            }
        }
        if mantissa_digits == 0 {
            return None;
        }
        if matches!(self.bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(self.bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let digits_start = exp_end;
            while self.bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                exp_end += 1;
            }
            if exp_end > digits_start {
                end = exp_end;
            }
        }
        let Ok(text) = std::str::from_utf8(&self.bytes[start..end]) else {
            return None;
        };
        let Ok(value) = text.parse::<f64>() else {
            return None;
        };
        self.pos = end;
        Some(value)
    }
}
