use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::GraphConfig;
use crate::network::Thresholds;

/// Viewer settings, read from a JSON file. Missing fields keep their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graph: GraphConfig,
    pub opinion_threshold_neg: f32,
    pub opinion_threshold_pos: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            graph: GraphConfig::default(),
            opinion_threshold_neg: thresholds.negative,
            opinion_threshold_pos: thresholds.positive,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(settings.sanitized())
    }

    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let negative = if self.opinion_threshold_neg.is_finite() {
            self.opinion_threshold_neg.clamp(-100.0, 0.0)
        } else {
            defaults.opinion_threshold_neg
        };
        let positive = if self.opinion_threshold_pos.is_finite() {
            self.opinion_threshold_pos.clamp(0.0, 100.0)
        } else {
            defaults.opinion_threshold_pos
        };

        Self {
            graph: self.graph.sanitized(),
            opinion_threshold_neg: negative,
            opinion_threshold_pos: positive,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            negative: self.opinion_threshold_neg,
            positive: self.opinion_threshold_pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"graph": {"slot_size": 40.0}, "opinion_threshold_pos": 30}"#)
                .expect("valid settings");

        assert_eq!(settings.graph.slot_size, 40.0);
        assert_eq!(settings.graph.max_iterations, 2000);
        assert_eq!(settings.opinion_threshold_pos, 30.0);
        assert_eq!(settings.opinion_threshold_neg, -50.0);
    }

    #[test]
    fn sanitized_clamps_thresholds() {
        let settings = Settings {
            opinion_threshold_neg: 20.0,
            opinion_threshold_pos: f32::INFINITY,
            ..Settings::default()
        }
        .sanitized();

        assert_eq!(settings.opinion_threshold_neg, 0.0);
        assert_eq!(settings.opinion_threshold_pos, 50.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let error = Settings::load(Path::new("/no/such/settings.json")).expect_err("missing file");
        assert!(format!("{error:#}").contains("failed to read settings file"));
    }
}
