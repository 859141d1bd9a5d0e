// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Literal formatting shared by the generators

use plan3d_core::Point2D;
use std::fmt;

/// A number printed with the shortest decimal that reads back to the same
/// value, without exponent; negative zero prints as `0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

pub fn fmt_num(value: f64) -> String {
    Num(value).to_string()
}

/// Single-quoted Python string
pub fn py_str(s: &str) -> String {
    quoted(s, '\'')
}

/// Double-quoted string, valid in both Python and OpenSCAD
pub fn dq_str(s: &str) -> String {
    quoted(s, '"')
}

fn quoted(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote || c == '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// `s` on a single line, for use after `//` or `#`
pub fn comment_text(s: &str) -> String {
    s.chars()
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect()
}

/// Compact nested list `[[x,y],[x,y]]` of points multiplied by `scale`
pub fn points_literal(points: &[Point2D], scale: f64) -> String {
    let items: Vec<String> = points
        .iter()
        .map(|p| format!("[{},{}]", Num(p.x * scale), Num(p.y * scale)))
        .collect();
    format!("[{}]", items.join(","))
}
