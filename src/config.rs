// THEORY:
// Two groups of settings are owned by the caller and may be changed between frames.
// `ClassifierConfig` holds the thresholds and tile edge length used by every tile.
// `VisionConfig::regions` holds the rectangles scanned each frame; the number of
// regions is fixed once a pipeline is built, but individual rectangles can move.
//
// Configuration is built in code or loaded from JSON with `from_json_file`, and is
// validated before a pipeline accepts it.

use crate::core_modules::region::Region;
use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of regions in the default layout.
pub const DEFAULT_REGION_COUNT: usize = 3;

/// Thresholds applied to every tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Tiles whose mean saturation is below this are treated as white or gray.
    pub min_saturation: f64,
    /// Tiles whose mean brightness is below this are treated as background.
    pub min_brightness: f64,
    /// Tiles whose hue standard deviation reaches this are treated as mixed.
    pub max_std_dev: f64,
    /// Tile edge length in pixels.
    pub tile_size: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_saturation: 100.0,
            min_brightness: 75.0,
            max_std_dev: 10.0,
            tile_size: 5,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(VisionError::InvalidTileSize);
        }
        for (name, value) in [
            ("min_saturation", self.min_saturation),
            ("min_brightness", self.min_brightness),
            ("max_std_dev", self.max_std_dev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VisionError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

/// Complete configuration: thresholds plus the regions to scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    pub regions: Vec<Region>,
}

impl Default for VisionConfig {
    /// Three 60x80 regions side by side, sized for a 320x240 stream.
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            regions: vec![
                Region::new(109, 98, 60, 80),
                Region::new(181, 98, 60, 80),
                Region::new(253, 98, 60, 80),
            ],
        }
    }
}

impl VisionConfig {
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            regions,
        }
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Checks thresholds and region geometry.
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        if self.regions.is_empty() {
            return Err(VisionError::NoRegions);
        }
        for (index, region) in self.regions.iter().enumerate() {
            region.validate(index)?;
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = VisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.region_count(), DEFAULT_REGION_COUNT);
        assert_eq!(config.classifier.tile_size, 5);
        assert_eq!(config.classifier.min_saturation, 100.0);
        assert_eq!(config.classifier.min_brightness, 75.0);
        assert_eq!(config.classifier.max_std_dev, 10.0);
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let config = VisionConfig::default().with_classifier(ClassifierConfig {
            tile_size: 0,
            ..ClassifierConfig::default()
        });
        assert!(matches!(config.validate(), Err(VisionError::InvalidTileSize)));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let classifier = ClassifierConfig {
            max_std_dev: -1.0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            classifier.validate(),
            Err(VisionError::InvalidThreshold {
                name: "max_std_dev",
                ..
            })
        ));
    }

    #[test]
    fn empty_region_list_is_rejected() {
        assert!(matches!(
            VisionConfig::new(Vec::new()).validate(),
            Err(VisionError::NoRegions)
        ));
    }

    #[test]
    fn degenerate_region_is_rejected_with_its_index() {
        let config = VisionConfig::new(vec![Region::new(0, 0, 5, 5), Region::new(0, 0, 5, 0)]);
        assert!(matches!(
            config.validate(),
            Err(VisionError::InvalidRegion { index: 1, .. })
        ));
    }

    #[test]
    fn json_round_trip_with_partial_classifier() {
        let json = r#"{
            "classifier": { "min_saturation": 80.0 },
            "regions": [
                { "top_left": { "x": 0, "y": 0 }, "width": 50, "height": 50 }
            ]
        }"#;
        let config = VisionConfig::from_json_str(json).unwrap();
        assert_eq!(config.classifier.min_saturation, 80.0);
        assert_eq!(config.classifier.tile_size, 5);
        assert_eq!(config.regions, vec![Region::new(0, 0, 50, 50)]);

        let reparsed = VisionConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = VisionConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, VisionError::Config(_)));
    }
}
