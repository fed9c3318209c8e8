use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Damping factor at the first iteration; decays linearly to zero over `max_iterations`.
    pub max_temperature: f32,
    pub repulsive_constant: f32,
    pub attractive_constant: f32,
    pub central_constant: f32,
    pub max_iterations: u32,
    /// Squared velocity below which a node counts as settled.
    pub threshold: f32,
    pub slot_size: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_temperature: 0.05,
            repulsive_constant: 5000.0,
            attractive_constant: 0.2,
            central_constant: 0.5,
            max_iterations: 2000,
            threshold: 0.02,
            slot_size: 70.0,
        }
    }
}

impl GraphConfig {
    pub fn sanitized(self) -> Self {
        let finite_or = |value: f32, fallback: f32| {
            if value.is_finite() { value } else { fallback }
        };
        let defaults = Self::default();

        Self {
            max_temperature: finite_or(self.max_temperature, defaults.max_temperature).max(0.0),
            repulsive_constant: finite_or(self.repulsive_constant, defaults.repulsive_constant)
                .max(0.0),
            attractive_constant: finite_or(self.attractive_constant, defaults.attractive_constant)
                .max(0.0),
            central_constant: finite_or(self.central_constant, defaults.central_constant).max(0.0),
            max_iterations: self.max_iterations.max(1),
            threshold: finite_or(self.threshold, defaults.threshold).max(0.0),
            slot_size: finite_or(self.slot_size, defaults.slot_size).max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_repairs_invalid_values() {
        let config = GraphConfig {
            max_temperature: f32::NAN,
            repulsive_constant: -1.0,
            max_iterations: 0,
            slot_size: 0.0,
            ..GraphConfig::default()
        }
        .sanitized();

        assert_eq!(config.max_temperature, 0.05);
        assert_eq!(config.repulsive_constant, 0.0);
        assert_eq!(config.max_iterations, 1);
        assert_eq!(config.slot_size, 1.0);
        assert_eq!(config.attractive_constant, 0.2);
    }

    #[test]
    fn sanitized_keeps_valid_config() {
        assert_eq!(GraphConfig::default().sanitized(), GraphConfig::default());
    }
}
