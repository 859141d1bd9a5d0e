// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section list of the stacked-section generator

use plan3d_core::{
    commit_number, default_sections, next_section_id, toggle_unit, LengthUnit, Section,
};
use tracing::debug;

/// Height and diameter of a freshly added section
pub const NEW_SECTION_SIZE: f64 = 30.0;

/// In-memory section list with its display unit
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEditor {
    sections: Vec<Section>,
    unit: LengthUnit,
}

impl Default for SectionEditor {
    fn default() -> Self {
        Self::new(default_sections())
    }
}

impl SectionEditor {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            unit: LengthUnit::Mm,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Append a section on top of the stack and return its id
    pub fn add(&mut self) -> u32 {
        let id = next_section_id(&self.sections);
        self.sections.push(Section::new(
            id,
            format!("Section {}", id),
            NEW_SECTION_SIZE,
            NEW_SECTION_SIZE,
        ));
        debug!(id, "section added");
        id
    }

    /// Remove section `id`; the last remaining section stays
    pub fn remove(&mut self, id: u32) -> bool {
        if self.sections.len() <= 1 {
            return false;
        }
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        let removed = self.sections.len() != before;
        if removed {
            debug!(id, "section removed");
        }
        removed
    }

    fn find_mut(&mut self, id: u32) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn set_name(&mut self, id: u32, name: &str) -> bool {
        match self.find_mut(id) {
            Some(section) => {
                section.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Commit typed height text; anything but a number is discarded
    pub fn set_height(&mut self, id: u32, text: &str) -> bool {
        self.find_mut(id)
            .is_some_and(|section| commit_number(&mut section.height, text))
    }

    /// Commit typed diameter text; anything but a number is discarded
    pub fn set_diameter(&mut self, id: u32, text: &str) -> bool {
        self.find_mut(id)
            .is_some_and(|section| commit_number(&mut section.diameter, text))
    }

    /// Switch between millimetres and centimetres, rescaling every section
    pub fn toggle_unit(&mut self) -> LengthUnit {
        if let Some(unit) = toggle_unit(self.unit, self.sections.as_mut_slice()) {
            debug!(from = %self.unit, to = %unit, "section unit toggled");
            self.unit = unit;
        }
        self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_uses_next_id() {
        let mut editor = SectionEditor::default();
        assert_eq!(editor.add(), 4);
        let added = &editor.sections()[3];
        assert_eq!(added.name, "Section 4");
        assert_eq!((added.height, added.diameter), (30.0, 30.0));

        assert!(editor.remove(2));
        assert_eq!(editor.add(), 5);
    }

    #[test]
    fn test_last_section_is_kept() {
        let mut editor = SectionEditor::new(vec![Section::new(7, "Only", 10.0, 10.0)]);
        assert!(!editor.remove(7));
        assert_eq!(editor.sections().len(), 1);
    }

    #[test]
    fn test_invalid_text_is_discarded() {
        let mut editor = SectionEditor::default();
        assert!(!editor.set_height(1, "tall"));
        assert_eq!(editor.sections()[0].height, 40.0);
        assert!(editor.set_diameter(1, " 55.5 "));
        assert_eq!(editor.sections()[0].diameter, 55.5);
        assert!(!editor.set_name(99, "missing"));
    }

    #[test]
    fn test_unit_round_trip() {
        let mut editor = SectionEditor::default();
        assert_eq!(editor.toggle_unit(), LengthUnit::Cm);
        assert_relative_eq!(editor.sections()[1].height, 8.0);
        assert_eq!(editor.toggle_unit(), LengthUnit::Mm);
        assert_relative_eq!(editor.sections()[1].height, 80.0, epsilon = 1e-9);
    }
}
