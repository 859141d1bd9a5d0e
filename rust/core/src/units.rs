// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length units and parameter-record conversion
//!
//! Centimetres are the base unit. Parameter records are converted to
//! centimetres every time geometry or emitted code is recomputed; the stored
//! record keeps whatever unit the user entered. The only conversion that
//! rewrites stored values is the explicit millimetre/centimetre toggle.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Length unit of a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Mm,
    Cm,
    M,
    #[default]
    In,
    Ft,
}

impl LengthUnit {
    /// Multiplier converting a value in this unit to centimetres
    #[inline]
    pub fn cm_factor(self) -> f64 {
        match self {
            LengthUnit::Mm => 0.1,
            LengthUnit::Cm => 1.0,
            LengthUnit::M => 100.0,
            LengthUnit::In => 2.54,
            LengthUnit::Ft => 30.48,
        }
    }

    /// Convert `value` from this unit to centimetres
    #[inline]
    pub fn to_cm(self, value: f64) -> f64 {
        value * self.cm_factor()
    }

    /// The other side of the mm/cm toggle and the factor to apply to every
    /// stored value when switching to it
    ///
    /// Only millimetres and centimetres toggle; other units return `None`.
    pub fn toggled(self) -> Option<(LengthUnit, f64)> {
        match self {
            LengthUnit::Mm => Some((LengthUnit::Cm, 0.1)),
            LengthUnit::Cm => Some((LengthUnit::Mm, 10.0)),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Mm => "mm",
            LengthUnit::Cm => "cm",
            LengthUnit::M => "m",
            LengthUnit::In => "in",
            LengthUnit::Ft => "ft",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" => Ok(LengthUnit::Mm),
            "cm" => Ok(LengthUnit::Cm),
            "m" => Ok(LengthUnit::M),
            "in" => Ok(LengthUnit::In),
            "ft" => Ok(LengthUnit::Ft),
            other => Err(Error::UnknownUnit(other.to_string())),
        }
    }
}

/// Numeric record fields that are counts or angles, not lengths
pub const DIMENSIONLESS_FIELDS: &[&str] = &["floors", "floorLevel", "glazingLayers", "rotation"];

/// Convert every top-level length field of `record` from `unit` to centimetres
///
/// Works on the record's serialized form: numeric fields are multiplied by the
/// unit factor, everything else (strings, booleans, nested arrays such as room
/// outlines) passes through untouched. Fields in [`DIMENSIONLESS_FIELDS`] are
/// left alone.
pub fn convert_record<T>(record: &T, unit: LengthUnit) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let factor = unit.cm_factor();
    let mut value = serde_json::to_value(record)?;

    let fields = value.as_object_mut().ok_or(Error::NotARecord)?;
    for (key, field) in fields.iter_mut() {
        if DIMENSIONLESS_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if let Value::Number(n) = field {
            if let Some(scaled) = n.as_f64().and_then(|v| Number::from_f64(v * factor)) {
                *field = Value::Number(scaled);
            }
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Types whose stored lengths can be rescaled in place
pub trait ScaleLengths {
    fn scale_lengths(&mut self, factor: f64);
}

/// Nothing to rescale
impl ScaleLengths for () {
    fn scale_lengths(&mut self, _factor: f64) {}
}

impl ScaleLengths for crate::annotation::AnnotationSet {
    fn scale_lengths(&mut self, factor: f64) {
        self.scale(factor);
    }
}

impl ScaleLengths for crate::section::Section {
    fn scale_lengths(&mut self, factor: f64) {
        self.height *= factor;
        self.diameter *= factor;
    }
}

impl ScaleLengths for crate::apartment::ApartmentDetails {
    fn scale_lengths(&mut self, factor: f64) {
        self.width *= factor;
        self.length *= factor;
        self.height *= factor;
        self.wall_thickness *= factor;
        self.foundation_depth *= factor;
        self.insulation_thickness *= factor;
    }
}

impl<T: ScaleLengths + ?Sized> ScaleLengths for &mut T {
    fn scale_lengths(&mut self, factor: f64) {
        (**self).scale_lengths(factor);
    }
}

/// Rescale two values together, e.g. an annotation set and its parameters
impl<A: ScaleLengths, B: ScaleLengths> ScaleLengths for (A, B) {
    fn scale_lengths(&mut self, factor: f64) {
        self.0.scale_lengths(factor);
        self.1.scale_lengths(factor);
    }
}

impl<T: ScaleLengths> ScaleLengths for [T] {
    fn scale_lengths(&mut self, factor: f64) {
        for item in self {
            item.scale_lengths(factor);
        }
    }
}

/// Flip `unit` between mm and cm, rescaling `values` to match
///
/// Returns the new unit, or `None` (leaving everything untouched) when
/// `unit` is not part of the toggle.
pub fn toggle_unit<S: ScaleLengths + ?Sized>(unit: LengthUnit, values: &mut S) -> Option<LengthUnit> {
    let (next, factor) = unit.toggled()?;
    values.scale_lengths(factor);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotation, AnnotationKind, AnnotationSet};
    use crate::point::Point2D;
    use approx::assert_relative_eq;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        name: String,
        wall_thickness: f64,
        floors: u32,
        rotation: f64,
        points: Vec<Point2D>,
        has_screen: bool,
    }

    #[test]
    fn test_factors() {
        assert_relative_eq!(LengthUnit::Cm.to_cm(12.0), 12.0);
        assert_relative_eq!(LengthUnit::M.to_cm(1.5), 150.0);
        assert_relative_eq!(LengthUnit::In.to_cm(10.0), 25.4);
        assert_relative_eq!(LengthUnit::Ft.to_cm(2.0), 60.96);
        assert_relative_eq!(LengthUnit::Mm.to_cm(25.0), 2.5);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("FT".parse::<LengthUnit>().unwrap(), LengthUnit::Ft);
        assert!(matches!("yd".parse::<LengthUnit>(), Err(Error::UnknownUnit(_))));
    }

    #[test]
    fn test_convert_record_scales_lengths_only() {
        let sample = Sample {
            name: "Hall".into(),
            wall_thickness: 8.0,
            floors: 2,
            rotation: 90.0,
            points: vec![Point2D::new(10.0, 20.0)],
            has_screen: true,
        };

        let converted = convert_record(&sample, LengthUnit::In).unwrap();
        assert_relative_eq!(converted.wall_thickness, 20.32);
        assert_eq!(converted.floors, 2);
        assert_relative_eq!(converted.rotation, 90.0);
        assert_eq!(converted.points, sample.points);
        assert_eq!(converted.name, "Hall");
        assert!(converted.has_screen);
    }

    #[test]
    fn test_convert_record_rejects_non_objects() {
        let err = convert_record(&vec![1.0, 2.0], LengthUnit::M).unwrap_err();
        assert!(matches!(err, Error::NotARecord));
    }

    #[test]
    fn test_toggle_round_trip_restores_points() {
        let mut set = AnnotationSet::new();
        set.push(
            AnnotationKind::Wall,
            Annotation::new(vec![
                Point2D::new(13.0, 7.5),
                Point2D::new(211.25, 0.0),
                Point2D::new(99.9, 301.7),
            ]),
        );
        set.push(
            AnnotationKind::Door,
            Annotation::new(vec![Point2D::new(3.3, 4.4), Point2D::new(5.5, 6.6)]),
        );
        let original = set.clone();

        let unit = toggle_unit(LengthUnit::Mm, &mut set).unwrap();
        assert_eq!(unit, LengthUnit::Cm);
        assert_relative_eq!(set.walls[0].points[0].x, 1.3, epsilon = 1e-12);

        let unit = toggle_unit(unit, &mut set).unwrap();
        assert_eq!(unit, LengthUnit::Mm);

        for kind in AnnotationKind::ALL {
            for (a, b) in set.list(kind).iter().zip(original.list(kind)) {
                for (p, q) in a.points.iter().zip(&b.points) {
                    assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
                    assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_toggle_scales_parameters_with_points() {
        let mut set = AnnotationSet::from_legacy(vec![vec![Point2D::new(40.0, 20.0)]]);
        let mut details = crate::apartment::ApartmentDetails::default();

        let unit = toggle_unit(LengthUnit::Mm, &mut (&mut set, &mut details)).unwrap();
        assert_eq!(unit, LengthUnit::Cm);
        assert_relative_eq!(set.walls[0].points[0].x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(details.wall_thickness, 0.8, epsilon = 1e-12);
        assert_relative_eq!(details.height, 10.0, epsilon = 1e-12);
        assert_eq!(details.floors, 1);
    }

    #[test]
    fn test_toggle_ignores_other_units() {
        let mut set = AnnotationSet::from_legacy(vec![vec![Point2D::new(1.0, 1.0)]]);
        assert!(toggle_unit(LengthUnit::In, &mut set).is_none());
        assert_eq!(set.walls[0].points[0], Point2D::new(1.0, 1.0));
    }
}
