//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::types::SimParams;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields default to the baseline scenario. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation run parameters.
    pub simulation: SimulationConfig,
    /// Archetype table source.
    pub archetypes: ArchetypesConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Simulation run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Total simulated population size (must be > 0).
    pub population_size: u32,
    /// Plug-in/out time jitter standard deviation, minutes (>= 0).
    pub time_jitter_std_minutes: f32,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            time_jitter_std_minutes: SimParams::DEFAULT_JITTER_STD_MINUTES,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Converts the validated config section into run parameters.
    pub fn to_params(&self) -> SimParams {
        SimParams::new(self.population_size, self.time_jitter_std_minutes, self.seed)
    }
}

/// Archetype table source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchetypesConfig {
    /// Path to an archetype CSV; the built-in UK table is used when absent.
    pub csv_path: Option<String>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.population_size"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: 1000 drivers, 60-minute jitter.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            archetypes: ArchetypesConfig::default(),
        }
    }

    /// Returns the large-population preset for smoother percentile bands.
    pub fn large_population() -> Self {
        Self {
            simulation: SimulationConfig {
                population_size: 10000,
                ..SimulationConfig::default()
            },
            archetypes: ArchetypesConfig::default(),
        }
    }

    /// Returns the no-jitter preset: every driver follows the archetype's
    /// nominal window exactly, useful for inspecting schedules.
    pub fn no_jitter() -> Self {
        Self {
            simulation: SimulationConfig {
                time_jitter_std_minutes: 0.0,
                ..SimulationConfig::default()
            },
            archetypes: ArchetypesConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "large_population", "no_jitter"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "large_population" => Ok(Self::large_population()),
            "no_jitter" => Ok(Self::no_jitter()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.population_size == 0 {
            errors.push(ConfigError {
                field: "simulation.population_size".into(),
                message: "must be > 0".into(),
            });
        }
        if !s.time_jitter_std_minutes.is_finite() || s.time_jitter_std_minutes < 0.0 {
            errors.push(ConfigError {
                field: "simulation.time_jitter_std_minutes".into(),
                message: "must be finite and >= 0".into(),
            });
        }
        if let Some(path) = &self.archetypes.csv_path
            && path.trim().is_empty()
        {
            errors.push(ConfigError {
                field: "archetypes.csv_path".into(),
                message: "must not be empty when present".into(),
            });
        }

        errors
    }
}
