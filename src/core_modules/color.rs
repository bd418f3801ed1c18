// THEORY:
// The `color` module defines the closed palette the classifier speaks in and the
// per-region table of observations built from it.
//
// Key architectural principles:
// 1.  **Closed palette**: Four colors can be classified (Red, Green, Blue, Yellow).
//     `None` is the "no match" outcome and `White` is a display-only outline color;
//     neither ever owns a slot in a `RegionResult`.
// 2.  **Slots, not a map**: A `RegionResult` is a fixed array indexed by palette
//     ordinal. Every slot exists from the start with a zero observation, so "has
//     this color been seen" is a count check rather than a missing-key check.

use serde::{Deserialize, Serialize};

/// Number of classifiable colors.
pub const PALETTE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    None,
    Red,
    Green,
    Blue,
    Yellow,
    /// Outline color for a region where nothing was detected.
    White,
}

impl Color {
    /// The classifiable colors in slot order.
    pub const PALETTE: [Color; PALETTE_SIZE] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Slot index inside a `RegionResult`, or `None` for non-palette values.
    pub fn palette_index(self) -> Option<usize> {
        match self {
            Color::Red => Some(0),
            Color::Green => Some(1),
            Color::Blue => Some(2),
            Color::Yellow => Some(3),
            Color::None | Color::White => None,
        }
    }

    pub fn is_classifiable(self) -> bool {
        self.palette_index().is_some()
    }

    /// The RGB color a renderer should draw this value with.
    pub fn rgb(self) -> image::Rgb<u8> {
        let channels = match self {
            Color::Blue => [0, 0, 255],
            Color::Green => [0, 255, 0],
            Color::Red => [255, 0, 0],
            Color::Yellow => [255, 255, 0],
            Color::White => [255, 255, 255],
            Color::None => [0, 0, 0],
        };
        image::Rgb(channels)
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::None => "None",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::White => "White",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The best sighting of one color inside one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorObservation {
    pub color: Color,
    /// Closeness to the ideal hue/saturation. Higher is better, typically at most 100.
    pub score: f64,
    /// Number of tiles in the region classified as `color`.
    pub tile_count: u32,
    /// Frame x of the best-scoring tile's top-left corner.
    pub x: u32,
    /// Frame y of the best-scoring tile's top-left corner.
    pub y: u32,
}

impl ColorObservation {
    /// A zero observation for the given slot.
    pub fn empty(color: Color) -> Self {
        Self {
            color,
            score: 0.0,
            tile_count: 0,
            x: 0,
            y: 0,
        }
    }

    /// True once at least one tile of this color has been counted.
    pub fn is_present(&self) -> bool {
        self.tile_count > 0
    }
}

/// Per-color observations for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionResult {
    slots: [ColorObservation; PALETTE_SIZE],
}

impl RegionResult {
    pub fn new() -> Self {
        Self {
            slots: Color::PALETTE.map(ColorObservation::empty),
        }
    }

    /// The observation for `color`, or `None` if `color` is not in the palette.
    pub fn get(&self, color: Color) -> Option<&ColorObservation> {
        color.palette_index().map(|index| &self.slots[index])
    }

    pub(crate) fn get_mut(&mut self, color: Color) -> Option<&mut ColorObservation> {
        color.palette_index().map(|index| &mut self.slots[index])
    }

    pub fn tile_count(&self, color: Color) -> u32 {
        self.get(color).map_or(0, |obs| obs.tile_count)
    }

    pub fn best_score(&self, color: Color) -> f64 {
        self.get(color).map_or(0.0, |obs| obs.score)
    }

    pub fn has_color(&self, color: Color) -> bool {
        self.get(color).is_some_and(ColorObservation::is_present)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorObservation> {
        self.slots.iter()
    }

    /// Picks the single outline color for this region.
    ///
    /// The order is fixed rather than score-driven: Green, then Yellow, then Red,
    /// then Blue, falling back to White. Yellow is chosen on presence while the
    /// others are chosen on a positive best score. The two tests agree under the
    /// default thresholds; a config that admits very low saturation can count a
    /// tile whose score is zero or below.
    pub fn display_color(&self) -> Color {
        if self.best_score(Color::Green) > 0.0 {
            Color::Green
        } else if self.has_color(Color::Yellow) {
            Color::Yellow
        } else if self.best_score(Color::Red) > 0.0 {
            Color::Red
        } else if self.best_score(Color::Blue) > 0.0 {
            Color::Blue
        } else {
            Color::White
        }
    }
}

impl Default for RegionResult {
    fn default() -> Self {
        Self::new()
    }
}
