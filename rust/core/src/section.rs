// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stacked sections of a rotationally symmetric solid

use serde::{Deserialize, Serialize};

/// Ratio of the last section's end radius to its start radius
pub const TOP_TAPER: f64 = 0.8;

/// One stacked section; `id` keys the list and never orders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub name: String,
    pub height: f64,
    pub diameter: f64,
}

impl Section {
    pub fn new(id: u32, name: impl Into<String>, height: f64, diameter: f64) -> Self {
        Self {
            id,
            name: name.into(),
            height,
            diameter,
        }
    }
}

/// Resolved placement of one section along the axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    /// Cumulative height of every section below this one
    pub base_height: f64,
    pub height: f64,
    pub start_radius: f64,
    pub end_radius: f64,
}

impl SectionSpan {
    pub fn top_height(&self) -> f64 {
        self.base_height + self.height
    }
}

/// Stack `sections` bottom to top and resolve each one's radii
///
/// A section ends at the next section's radius; the last one tapers to
/// [`TOP_TAPER`] of its own radius.
pub fn section_spans(sections: &[Section]) -> Vec<SectionSpan> {
    let mut spans = Vec::with_capacity(sections.len());
    let mut base_height = 0.0;

    for (i, section) in sections.iter().enumerate() {
        let start_radius = section.diameter / 2.0;
        let end_radius = match sections.get(i + 1) {
            Some(next) => next.diameter / 2.0,
            None => start_radius * TOP_TAPER,
        };
        spans.push(SectionSpan {
            base_height,
            height: section.height,
            start_radius,
            end_radius,
        });
        base_height += section.height;
    }

    spans
}

/// Total height of the stack
pub fn total_height(sections: &[Section]) -> f64 {
    sections.iter().map(|s| s.height).sum()
}

/// Starting list for a new generator session
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::new(1, "Bottom", 40.0, 50.0),
        Section::new(2, "Middle", 80.0, 40.0),
        Section::new(3, "Top", 30.0, 20.0),
    ]
}

/// Id for a section appended to `sections`
pub fn next_section_id(sections: &[Section]) -> u32 {
    sections.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spans_for_defaults() {
        let spans = section_spans(&default_sections());
        assert_eq!(spans.len(), 3);

        assert_relative_eq!(spans[0].start_radius, 25.0);
        assert_relative_eq!(spans[0].end_radius, 20.0);
        assert_relative_eq!(spans[1].base_height, 40.0);
        assert_relative_eq!(spans[1].end_radius, 10.0);
        assert_relative_eq!(spans[2].base_height, 120.0);
        assert_relative_eq!(spans[2].end_radius, 8.0);
        assert_relative_eq!(spans[2].top_height(), 150.0);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_section_id(&default_sections()), 4);
        assert_eq!(next_section_id(&[]), 1);

        let gappy = vec![Section::new(7, "a", 1.0, 1.0), Section::new(2, "b", 1.0, 1.0)];
        assert_eq!(next_section_id(&gappy), 8);
    }
}
