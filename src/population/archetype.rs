//! Typed driver archetype record with domain validation.

use std::error::Error;
use std::fmt;

use serde::Serialize;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// One behavioral driver archetype: typical plug-in window, SoC targets,
/// vehicle specs, and its weight in the simulated population.
///
/// All SoC fields are fractions in `[0, 1]`; time fields are minutes since
/// midnight in `[0, 1440)`; `population_share` is a percentage in `[0, 100]`.
#[derive(Debug, Clone, Serialize)]
pub struct Archetype {
    /// Unique archetype name.
    pub name: String,
    /// Typical plug-in time, minutes since midnight.
    pub plug_in_minute: u32,
    /// Typical plug-out time, minutes since midnight.
    pub plug_out_minute: u32,
    /// Typical SoC at plug-in.
    pub plug_in_soc: f32,
    /// SoC the driver aims for.
    pub target_soc: f32,
    /// Minimum SoC the driver needs for the next day.
    pub soc_requirement: f32,
    /// Annual mileage.
    pub miles_per_year: f32,
    /// Vehicle efficiency in miles per kWh.
    pub efficiency_mi_per_kwh: f32,
    /// Battery capacity in kWh.
    pub battery_kwh: f32,
    /// Charger power in kW.
    pub charger_kw: f32,
    /// Mean plug-in events per day; values below 1 mean the driver skips days.
    pub plugin_frequency_per_day: f32,
    /// Share of the simulated population, percent.
    pub population_share: f32,
}

impl Archetype {
    /// Checks every numeric field against its domain.
    ///
    /// # Errors
    ///
    /// Returns an `ArchetypeError` naming the first offending field.
    pub fn validate(&self) -> Result<(), ArchetypeError> {
        let err = |field: &str, message: &str| {
            Err(ArchetypeError {
                archetype: self.name.clone(),
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        if self.name.trim().is_empty() {
            return err("name", "must not be empty");
        }
        if self.plug_in_minute >= MINUTES_PER_DAY {
            return err("plug_in_minute", "must be in [0, 1440)");
        }
        if self.plug_out_minute >= MINUTES_PER_DAY {
            return err("plug_out_minute", "must be in [0, 1440)");
        }
        for (field, value) in [
            ("plug_in_soc", self.plug_in_soc),
            ("target_soc", self.target_soc),
            ("soc_requirement", self.soc_requirement),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return err(field, "must be in [0, 1]");
            }
        }
        for (field, value) in [
            ("miles_per_year", self.miles_per_year),
            ("efficiency_mi_per_kwh", self.efficiency_mi_per_kwh),
            ("battery_kwh", self.battery_kwh),
            ("charger_kw", self.charger_kw),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return err(field, "must be a positive number");
            }
        }
        if !self.plugin_frequency_per_day.is_finite() || self.plugin_frequency_per_day <= 0.0 {
            return err("plugin_frequency_per_day", "must be > 0");
        }
        if !(0.0..=100.0).contains(&self.population_share) {
            return err("population_share", "must be a percentage in [0, 100]");
        }
        Ok(())
    }

    /// Nominal dwell duration in minutes, normalized into `[0, 1440)` so an
    /// overnight window (plug in 22:00, out 06:00) yields a positive dwell.
    pub fn nominal_dwell_minutes(&self) -> u32 {
        let dwell = self.plug_out_minute as i32 - self.plug_in_minute as i32;
        if dwell < 0 {
            (dwell + MINUTES_PER_DAY as i32) as u32
        } else {
            dwell as u32
        }
    }

    /// Fraction of the battery consumed by one average day of driving.
    pub fn avg_daily_discharge(&self) -> f32 {
        (self.miles_per_year / 365.0) / self.efficiency_mi_per_kwh / self.battery_kwh
    }

    /// Maximum SoC gain per hour at full charger power.
    pub fn max_soc_rise_per_hour(&self) -> f32 {
        self.charger_kw / self.battery_kwh
    }

    /// Maximum SoC loss per hour, at a 70 mph reference speed.
    pub fn max_discharge_per_hour(&self) -> f32 {
        (70.0 / self.efficiency_mi_per_kwh) / self.battery_kwh
    }
}

/// Archetype field outside its domain, detected at load time.
#[derive(Debug, Clone)]
pub struct ArchetypeError {
    /// Name of the archetype carrying the bad value.
    pub archetype: String,
    /// Offending field.
    pub field: String,
    /// Constraint description.
    pub message: String,
}

impl fmt::Display for ArchetypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "archetype \"{}\": {} {}",
            self.archetype, self.field, self.message
        )
    }
}

impl Error for ArchetypeError {}
