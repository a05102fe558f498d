use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colors::{assign_colors, SegmentColor};
use crate::constants::*;
use crate::entries::{default_entries, entries_to_text, regenerate, Entry, EntryList};
use crate::error::WheelError;

/// One pie slice of the wheel. Derived from the entry list, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: SegmentColor,
    pub label: Entry,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle the label is rotated to.
    pub fn bisector(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

pub fn segment_width(count: usize) -> f64 {
    FULL_TURN / count as f64
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(FULL_TURN)
}

/// Divides the circle into `entries.len()` equal arcs starting at angle 0 and
/// pairs each with its color and label by position.
pub fn layout(entries: &[Entry], colors: &[SegmentColor]) -> Result<Vec<Segment>, WheelError> {
    if entries.len() != colors.len() {
        return Err(WheelError::ColorMismatch {
            entries: entries.len(),
            colors: colors.len(),
        });
    }
    Ok(build_segments(entries, colors))
}

fn build_segments(entries: &[Entry], colors: &[SegmentColor]) -> Vec<Segment> {
    if entries.is_empty() {
        return Vec::new();
    }
    let width = segment_width(entries.len());
    entries
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(index, (label, color))| Segment {
            index,
            start_angle: index as f64 * width,
            end_angle: (index + 1) as f64 * width,
            color: *color,
            label: label.clone(),
        })
        .collect()
}

/// Label font size in px for a wheel with `count` segments.
pub fn label_font_size(count: usize) -> f64 {
    (LABEL_FONT_BUDGET / count.max(1) as f64).clamp(MIN_LABEL_FONT_PX, MAX_LABEL_FONT_PX)
}

/// Index of the segment sitting under the pointer once the wheel has been
/// rotated clockwise by `rotation` radians.
pub fn segment_under_pointer(rotation: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let local = normalize_angle(POINTER_ANGLE - rotation);
    let index = (local / segment_width(count)).floor() as usize;
    Some(index.min(count - 1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub size: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Distance from the center at which labels are right-aligned.
    pub label_radius: f64,
}

impl WheelGeometry {
    pub fn new(size: f64) -> Self {
        let radius = size / 2.0 - WHEEL_MARGIN;
        Self {
            size,
            center_x: size / 2.0,
            center_y: size / 2.0,
            radius,
            label_radius: radius - LABEL_INSET,
        }
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(WHEEL_SIZE)
    }
}

/// Entries on the wheel and their colors, kept positionally paired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    entries: EntryList,
    colors: Vec<SegmentColor>,
}

impl WheelState {
    pub fn new<R: Rng + ?Sized>(entries: EntryList, rng: &mut R) -> Self {
        let colors = assign_colors(&entries, rng);
        Self { entries, colors }
    }

    pub fn with_colors(entries: EntryList, colors: Vec<SegmentColor>) -> Result<Self, WheelError> {
        if entries.len() != colors.len() {
            return Err(WheelError::ColorMismatch {
                entries: entries.len(),
                colors: colors.len(),
            });
        }
        Ok(Self { entries, colors })
    }

    pub fn with_default_entries<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(default_entries(), rng)
    }

    /// Replaces the entries from raw text and recolors every segment. On a
    /// validation failure the current entries and colors are left untouched.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        raw_text: &str,
        rng: &mut R,
    ) -> Result<usize, WheelError> {
        let entries = regenerate(raw_text)?;
        self.colors = assign_colors(&entries, rng);
        self.entries = entries;
        Ok(self.entries.len())
    }

    pub fn segments(&self) -> Vec<Segment> {
        build_segments(&self.entries, &self.colors)
    }

    /// Removes one entry together with its color.
    pub fn remove_at(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        self.colors.remove(index);
        Some(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn colors(&self) -> &[SegmentColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_text(&self) -> String {
        entries_to_text(&self.entries)
    }
}
