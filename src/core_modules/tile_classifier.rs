// THEORY:
// The `TileClassifier` decides whether one tile is a solid instance of a palette
// color, and how close it is to that color's ideal. It is stateless: the same tile
// and thresholds always give the same verdict.
//
// The decision is a short-circuiting chain of named stages. Each stage either
// passes the tile on or rejects it with a reason:
// 1.  **Brightness**: dark tiles (background, shadow) are rejected.
// 2.  **Saturation**: washed-out tiles (white, gray) are rejected.
// 3.  **Purity**: a wide hue spread means a mixed or noisy patch. A noisy tile can
//     never match the Blue, Green or Yellow bands, but the verdict is deferred to
//     the red stage, because a red patch straddling the 0/180 seam looks maximally
//     noisy in raw hue.
// 4.  **Hue band**: Blue (90,120), Green (45,85), Yellow (20,40), all exclusive.
// 5.  **Red wraparound**: on the wrapped hue view red sits in (170,190) and is
//     checked with its own spread and saturation tests.
//
// The score is `100 - |(ideal_hue - hue, max(0, ideal_sat - sat))|`. Saturation
// above the ideal never costs anything.

use crate::config::ClassifierConfig;
use crate::core_modules::color::{Color, ColorObservation};
use crate::core_modules::tile::tile::{Tile, TileStats};

/// Score ceiling, reached when hue and saturation are both on their ideal.
pub const PERFECT_SCORE: f64 = 100.0;

/// One hue window of the palette, with the ideal the score is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueBand {
    pub color: Color,
    /// Exclusive lower bound on mean hue.
    pub low: f64,
    /// Exclusive upper bound on mean hue.
    pub high: f64,
    pub ideal_hue: f64,
    pub ideal_saturation: f64,
}

impl HueBand {
    const fn new(color: Color, low: f64, high: f64, ideal_hue: f64) -> Self {
        Self {
            color,
            low,
            high,
            ideal_hue,
            ideal_saturation: 150.0,
        }
    }

    pub fn contains(&self, hue: f64) -> bool {
        hue > self.low && hue < self.high
    }

    pub fn score(&self, stats: &TileStats) -> f64 {
        let delta_hue = self.ideal_hue - stats.mean_hue;
        let delta_saturation = (self.ideal_saturation - stats.mean_saturation).max(0.0);
        PERFECT_SCORE - (delta_hue * delta_hue + delta_saturation * delta_saturation).sqrt()
    }
}

/// Raw-hue bands, checked in order; first match wins.
pub const HUE_BANDS: [HueBand; 3] = [
    HueBand::new(Color::Blue, 90.0, 120.0, 105.0),
    HueBand::new(Color::Green, 45.0, 85.0, 75.0),
    HueBand::new(Color::Yellow, 20.0, 40.0, 30.0),
];

/// Red, measured on the wrapped hue view.
pub const RED_BAND: HueBand = HueBand::new(Color::Red, 170.0, 190.0, 180.0);

/// Why a tile was not classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Mean brightness below the minimum.
    TooDark,
    /// Mean saturation below the minimum.
    Undersaturated,
    /// Hue spread too wide, and the red stage did not claim it either.
    NoisyHue,
    /// Pure enough, but the hue is in no band.
    NoHueBand,
}

/// The outcome of classifying one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileVerdict {
    Classified { color: Color, score: f64 },
    Rejected(Rejection),
}

impl TileVerdict {
    pub fn color(&self) -> Color {
        match self {
            TileVerdict::Classified { color, .. } => *color,
            TileVerdict::Rejected(_) => Color::None,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            TileVerdict::Classified { score, .. } => *score,
            TileVerdict::Rejected(_) => 0.0,
        }
    }
}

/// Classifies tiles against the palette using a fixed set of thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileClassifier {
    min_saturation: f64,
    min_brightness: f64,
    max_std_dev: f64,
}

impl TileClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            min_saturation: config.min_saturation,
            min_brightness: config.min_brightness,
            max_std_dev: config.max_std_dev,
        }
    }

    /// Classifies `tile`, returning an observation positioned at the tile with a
    /// zero `tile_count`. Rejected tiles come back as `Color::None` with score 0.
    pub fn classify(&self, tile: &Tile) -> ColorObservation {
        let verdict = self.verdict(tile);
        ColorObservation {
            color: verdict.color(),
            score: verdict.score(),
            tile_count: 0,
            x: tile.x,
            y: tile.y,
        }
    }

    /// Runs every stage and reports either the match or the stage that rejected.
    pub fn verdict(&self, tile: &Tile) -> TileVerdict {
        match self.run_stages(tile) {
            Ok((color, score)) => TileVerdict::Classified { color, score },
            Err(rejection) => TileVerdict::Rejected(rejection),
        }
    }

    fn run_stages(&self, tile: &Tile) -> Result<(Color, f64), Rejection> {
        let stats = tile.stats();
        self.check_brightness(&stats)?;
        self.check_saturation(&stats)?;

        let noisy = stats.hue_std_dev >= self.max_std_dev;
        if !noisy {
            if let Some(band) = HUE_BANDS.iter().find(|band| band.contains(stats.mean_hue)) {
                return Ok((band.color, band.score(&stats)));
            }
        }

        self.match_red(tile).ok_or(if noisy {
            Rejection::NoisyHue
        } else {
            Rejection::NoHueBand
        })
    }

    fn check_brightness(&self, stats: &TileStats) -> Result<(), Rejection> {
        if stats.mean_value < self.min_brightness {
            return Err(Rejection::TooDark);
        }
        Ok(())
    }

    fn check_saturation(&self, stats: &TileStats) -> Result<(), Rejection> {
        if stats.mean_saturation < self.min_saturation {
            return Err(Rejection::Undersaturated);
        }
        Ok(())
    }

    fn match_red(&self, tile: &Tile) -> Option<(Color, f64)> {
        let wrapped = tile.wrapped_stats();
        let matched = RED_BAND.contains(wrapped.mean_hue)
            && wrapped.mean_saturation > self.min_saturation
            && wrapped.hue_std_dev <= self.max_std_dev;
        matched.then(|| (Color::Red, RED_BAND.score(&wrapped)))
    }
}

impl Default for TileClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
