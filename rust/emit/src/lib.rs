// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan3D Emit
//!
//! Text generators for external modelling tools. Each generator is a pure
//! function of already converted data; calling it twice on the same input
//! yields the same bytes.
//!
//! | Generator | Input | Output |
//! |---|---|---|
//! | [`ApartmentScad`] | [`ConvertedApartment`] | OpenSCAD `module apartment()` |
//! | [`ApartmentPython`] | [`ConvertedApartment`] | Blender Python script |
//! | [`BottleScad`] | `[Section]` | OpenSCAD `module bottle()` |
//! | [`BottlePython`] | `[Section]` | Blender Python script |

pub mod blender;
pub mod format;
pub mod openscad;

pub use blender::{apartment_py, bottle_py, BLENDER_SCALE};
pub use format::{comment_text, fmt_num, Num};
pub use openscad::{apartment_scad, bottle_scad, CYLINDER_FRAGMENTS};

use plan3d_core::{ConvertedApartment, Section};
use std::fmt;

/// Target language of a generated script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptLanguage {
    OpenScad,
    BlenderPython,
}

impl ScriptLanguage {
    pub fn extension(self) -> &'static str {
        match self {
            Self::OpenScad => "scad",
            Self::BlenderPython => "py",
        }
    }
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenScad => "OpenSCAD",
            Self::BlenderPython => "Blender Python",
        })
    }
}

/// Renders some model data as a script
pub trait CodeEmitter {
    type Input: ?Sized;

    fn language(&self) -> ScriptLanguage;

    fn emit(&self, input: &Self::Input) -> String;
}

/// OpenSCAD apartment generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ApartmentScad;

/// Blender apartment generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ApartmentPython;

/// OpenSCAD stacked-section generator
#[derive(Debug, Clone, Copy, Default)]
pub struct BottleScad;

/// Blender stacked-section generator
#[derive(Debug, Clone, Copy, Default)]
pub struct BottlePython;

impl CodeEmitter for ApartmentScad {
    type Input = ConvertedApartment;

    fn language(&self) -> ScriptLanguage {
        ScriptLanguage::OpenScad
    }

    fn emit(&self, input: &ConvertedApartment) -> String {
        apartment_scad(input)
    }
}

impl CodeEmitter for ApartmentPython {
    type Input = ConvertedApartment;

    fn language(&self) -> ScriptLanguage {
        ScriptLanguage::BlenderPython
    }

    fn emit(&self, input: &ConvertedApartment) -> String {
        apartment_py(input)
    }
}

impl CodeEmitter for BottleScad {
    type Input = [Section];

    fn language(&self) -> ScriptLanguage {
        ScriptLanguage::OpenScad
    }

    fn emit(&self, input: &[Section]) -> String {
        bottle_scad(input)
    }
}

impl CodeEmitter for BottlePython {
    type Input = [Section];

    fn language(&self) -> ScriptLanguage {
        ScriptLanguage::BlenderPython
    }

    fn emit(&self, input: &[Section]) -> String {
        bottle_py(input)
    }
}
