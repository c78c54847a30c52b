// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/region.rs
//
// Normalized question region and its mapping to rendered geometry.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constant::{MIN_REGION_SIZE, REGION_SCALE, UNITS_PER_PERCENT};

/// Rectangular question region in normalized image coordinates.
///
/// Coordinates are integers in `0..=1000`, fractions of the image
/// height/width scaled by 1000, in `(y_min, x_min, y_max, x_max)` order.
/// A value constructed through [`NormalizedRegion::new`] or
/// [`NormalizedRegion::from_raw`] always satisfies `y_min < y_max` and
/// `x_min < x_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRegion {
    pub y_min: i32,
    pub x_min: i32,
    pub y_max: i32,
    pub x_max: i32,
}

impl NormalizedRegion {
    /// Validated constructor. Returns `None` for out-of-range or
    /// inverted bounds.
    pub fn new(y_min: i32, x_min: i32, y_max: i32, x_max: i32) -> Option<Self> {
        let in_range = |v: i32| (0..=REGION_SCALE).contains(&v);
        if in_range(y_min)
            && in_range(x_min)
            && in_range(y_max)
            && in_range(x_max)
            && y_min < y_max
            && x_min < x_max
        {
            Some(Self {
                y_min,
                x_min,
                y_max,
                x_max,
            })
        } else {
            None
        }
    }

    /// Build a region from untrusted numeric input, e.g. a bounding box
    /// array out of the vision service. Wrong arity, non-finite values,
    /// out-of-range or inverted bounds all yield `None` rather than a
    /// panic; callers fall back to the full image.
    pub fn from_raw(values: &[f64]) -> Option<Self> {
        let [y_min, x_min, y_max, x_max] = values else {
            return None;
        };
        if !values.iter().all(|v| v.is_finite()) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        Self::new(
            y_min.round() as i32,
            x_min.round() as i32,
            y_max.round() as i32,
            x_max.round() as i32,
        )
    }

    /// Default centered region used when editing starts without a usable
    /// starting box.
    pub fn centered() -> Self {
        Self {
            y_min: 200,
            x_min: 200,
            y_max: 800,
            x_max: 800,
        }
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn as_array(&self) -> [i32; 4] {
        [self.y_min, self.x_min, self.y_max, self.x_max]
    }

    /// Enforce the minimum edge length while keeping the region inside
    /// the unit square. Idempotent.
    pub fn sanitized(self) -> Self {
        let mut r = self;
        if r.width() < MIN_REGION_SIZE {
            r.x_max = (r.x_min + MIN_REGION_SIZE).min(REGION_SCALE);
            r.x_min = r.x_max - MIN_REGION_SIZE;
        }
        if r.height() < MIN_REGION_SIZE {
            r.y_max = (r.y_min + MIN_REGION_SIZE).min(REGION_SCALE);
            r.y_min = r.y_max - MIN_REGION_SIZE;
        }
        r
    }

    /// Translate by a unit delta, clamped so the region stays inside the
    /// image. Width and height are preserved exactly.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        let w = self.width();
        let h = self.height();
        #[allow(clippy::cast_possible_truncation)]
        let x_min = ((f64::from(self.x_min) + dx).round() as i32).clamp(0, REGION_SCALE - w);
        #[allow(clippy::cast_possible_truncation)]
        let y_min = ((f64::from(self.y_min) + dy).round() as i32).clamp(0, REGION_SCALE - h);
        Self {
            y_min,
            x_min,
            y_max: y_min + h,
            x_max: x_min + w,
        }
    }

    /// Move the bottom-right corner by a unit delta. The top-left corner
    /// is fixed; the new extent is clamped between the minimum edge
    /// length and the image bounds.
    pub fn resized(self, dx: f64, dy: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let x_max = ((f64::from(self.x_max) + dx).round() as i32)
            .clamp(self.x_min + MIN_REGION_SIZE, REGION_SCALE);
        #[allow(clippy::cast_possible_truncation)]
        let y_max = ((f64::from(self.y_max) + dy).round() as i32)
            .clamp(self.y_min + MIN_REGION_SIZE, REGION_SCALE);
        Self {
            y_min: self.y_min,
            x_min: self.x_min,
            y_max,
            x_max,
        }
    }
}

impl Serialize for NormalizedRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(4))?;
        for v in self.as_array() {
            seq.serialize_element(&v)?;
        }
        seq.end()
    }
}

/// Lenient deserializer for optional region fields: anything that does
/// not form a valid region (wrong arity, junk values, inverted bounds)
/// becomes `None` instead of a load error.
pub fn deserialize_opt_region<'de, D>(
    deserializer: D,
) -> Result<Option<NormalizedRegion>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let Some(items) = value.as_array() else {
        return Ok(None);
    };
    let raw: Vec<f64> = items.iter().filter_map(serde_json::Value::as_f64).collect();
    if raw.len() != items.len() {
        return Ok(None);
    }
    Ok(NormalizedRegion::from_raw(&raw))
}

/// Rendered rectangle in percent of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl RenderRect {
    /// The whole image, uncropped.
    pub fn full() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }

    /// Map a region onto display percentages. An absent region renders
    /// as the full image.
    pub fn from_region(region: Option<&NormalizedRegion>) -> Self {
        match region {
            Some(r) => Self {
                top: r.y_min as f32 / UNITS_PER_PERCENT,
                left: r.x_min as f32 / UNITS_PER_PERCENT,
                width: r.width() as f32 / UNITS_PER_PERCENT,
                height: r.height() as f32 / UNITS_PER_PERCENT,
            },
            None => Self::full(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_rect_stays_within_image() {
        let cases = [
            (0, 0, 1000, 1000),
            (200, 200, 800, 800),
            (1, 999, 2, 1000),
            (950, 0, 1000, 50),
        ];
        for (y0, x0, y1, x1) in cases {
            let region = NormalizedRegion::new(y0, x0, y1, x1).unwrap();
            let rect = RenderRect::from_region(Some(&region));
            assert!(rect.top + rect.height <= 100.0 + f32::EPSILON);
            assert!(rect.left + rect.width <= 100.0 + f32::EPSILON);
        }
    }

    #[test]
    fn wrong_arity_renders_full_image() {
        assert!(NormalizedRegion::from_raw(&[5.0, 5.0]).is_none());
        assert_eq!(RenderRect::from_region(None), RenderRect::full());
    }

    #[test]
    fn rejects_inverted_and_out_of_range() {
        assert!(NormalizedRegion::from_raw(&[800.0, 200.0, 200.0, 800.0]).is_none());
        assert!(NormalizedRegion::from_raw(&[-5.0, 0.0, 500.0, 500.0]).is_none());
        assert!(NormalizedRegion::from_raw(&[0.0, 0.0, 500.0, 1500.0]).is_none());
        assert!(NormalizedRegion::from_raw(&[f64::NAN, 0.0, 500.0, 500.0]).is_none());
    }

    #[test]
    fn move_preserves_dimensions_and_clamps() {
        let region = NormalizedRegion::new(200, 200, 800, 800).unwrap();
        let moved = region.translated(200.0, 200.0);
        assert_eq!(moved.as_array(), [400, 400, 1000, 1000]);

        // A huge delta hits the wall without changing the size.
        let pinned = region.translated(5000.0, -5000.0);
        assert_eq!(pinned.width(), region.width());
        assert_eq!(pinned.height(), region.height());
        assert_eq!(pinned.y_min, 0);
        assert_eq!(pinned.x_max, 1000);
    }

    #[test]
    fn resize_keeps_origin_and_minimum() {
        let region = NormalizedRegion::new(100, 100, 600, 600).unwrap();
        let shrunk = region.resized(-1000.0, -1000.0);
        assert_eq!(shrunk.x_min, 100);
        assert_eq!(shrunk.y_min, 100);
        assert_eq!(shrunk.width(), MIN_REGION_SIZE);
        assert_eq!(shrunk.height(), MIN_REGION_SIZE);

        let grown = region.resized(1000.0, 1000.0);
        assert_eq!(grown.x_max, 1000);
        assert_eq!(grown.y_max, 1000);
    }

    #[test]
    fn sanitize_is_idempotent() {
        let thin = NormalizedRegion::new(990, 990, 1000, 1000).unwrap();
        let once = thin.sanitized();
        assert_eq!(once, once.sanitized());
        assert!(once.width() >= MIN_REGION_SIZE);
        assert!(once.height() >= MIN_REGION_SIZE);
        assert!(once.x_max <= REGION_SCALE && once.y_max <= REGION_SCALE);

        let fine = NormalizedRegion::new(200, 200, 800, 800).unwrap();
        assert_eq!(fine.sanitized(), fine);
    }

    #[test]
    fn lenient_deserialization() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_opt_region")]
            region: Option<NormalizedRegion>,
        }

        let ok: Holder = serde_json::from_str(r#"{"region":[200,200,800,800]}"#).unwrap();
        assert_eq!(ok.region, NormalizedRegion::new(200, 200, 800, 800));

        let short: Holder = serde_json::from_str(r#"{"region":[5,5]}"#).unwrap();
        assert!(short.region.is_none());

        let missing: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(missing.region.is_none());
    }
}
