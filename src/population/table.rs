//! Archetype table: CSV loading and the built-in reference population.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::ops::Index;
use std::path::Path;

use serde::Deserialize;

use super::archetype::{Archetype, ArchetypeError};
use super::parse::{FormatError, parse_clock_minutes, parse_percent};

/// Ordered, name-unique collection of driver archetypes.
///
/// Population shares are treated as relative weights and need not sum
/// to exactly 100.
#[derive(Debug, Clone)]
pub struct ArchetypeTable {
    archetypes: Vec<Archetype>,
}

/// One CSV row as it arrives: clock and percentage fields are still strings.
///
/// Column headers follow the source `EV_Driver_Archetypes.csv` layout.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Plug-in time")]
    plug_in_time: String,
    #[serde(rename = "Plug-out time")]
    plug_out_time: String,
    #[serde(rename = "Plug-in SoC")]
    plug_in_soc: String,
    #[serde(rename = "Target SoC")]
    target_soc: String,
    #[serde(rename = "SoC requirement")]
    soc_requirement: String,
    #[serde(rename = "% of population")]
    population_share: String,
    #[serde(rename = "Miles per year")]
    miles_per_year: f32,
    #[serde(rename = "Efficiency (mi/kWh)")]
    efficiency_mi_per_kwh: f32,
    #[serde(rename = "Battery (kWh)")]
    battery_kwh: f32,
    #[serde(rename = "Charger (kW)")]
    charger_kw: f32,
    #[serde(rename = "Plug-in frequency (per day)")]
    plugin_frequency_per_day: f32,
}

impl RawRecord {
    fn into_archetype(self) -> Result<Archetype, TableError> {
        let archetype = Archetype {
            plug_in_minute: parse_clock_minutes(&self.plug_in_time)?,
            plug_out_minute: parse_clock_minutes(&self.plug_out_time)?,
            plug_in_soc: parse_percent(&self.plug_in_soc)?,
            target_soc: parse_percent(&self.target_soc)?,
            soc_requirement: parse_percent(&self.soc_requirement)?,
            population_share: parse_percent(&self.population_share)? * 100.0,
            name: self.name,
            miles_per_year: self.miles_per_year,
            efficiency_mi_per_kwh: self.efficiency_mi_per_kwh,
            battery_kwh: self.battery_kwh,
            charger_kw: self.charger_kw,
            plugin_frequency_per_day: self.plugin_frequency_per_day,
        };
        archetype.validate()?;
        Ok(archetype)
    }
}

impl ArchetypeTable {
    /// Builds a table from already-typed archetypes, validating each record
    /// and rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` if the list is empty, any record fails
    /// validation, or two records share a name.
    pub fn new(archetypes: Vec<Archetype>) -> Result<Self, TableError> {
        if archetypes.is_empty() {
            return Err(TableError::Empty);
        }
        for (i, archetype) in archetypes.iter().enumerate() {
            archetype.validate()?;
            if archetypes[..i].iter().any(|a| a.name == archetype.name) {
                return Err(TableError::DuplicateName(archetype.name.clone()));
            }
        }
        Ok(Self { archetypes })
    }

    /// Loads a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` if the file cannot be read or any row fails
    /// to parse or validate.
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Loads a table from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` on malformed CSV, unparsable clock/percentage
    /// fields, out-of-domain numerics, duplicate names, or an empty table.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut archetypes = Vec::new();
        for record in csv_reader.deserialize() {
            let raw: RawRecord = record?;
            archetypes.push(raw.into_archetype()?);
        }
        Self::new(archetypes)
    }

    /// The built-in UK reference population used when no CSV is supplied.
    pub fn uk_default() -> Self {
        let archetypes = vec![
            Archetype {
                name: "Commuter".to_string(),
                plug_in_minute: 1140,
                plug_out_minute: 420,
                plug_in_soc: 0.3,
                target_soc: 0.9,
                soc_requirement: 0.6,
                miles_per_year: 10000.0,
                efficiency_mi_per_kwh: 3.5,
                battery_kwh: 60.0,
                charger_kw: 7.0,
                plugin_frequency_per_day: 1.0,
                population_share: 40.0,
            },
            Archetype {
                name: "Average (UK)".to_string(),
                plug_in_minute: 1200,
                plug_out_minute: 450,
                plug_in_soc: 0.4,
                target_soc: 0.8,
                soc_requirement: 0.5,
                miles_per_year: 7400.0,
                efficiency_mi_per_kwh: 3.8,
                battery_kwh: 55.0,
                charger_kw: 7.0,
                plugin_frequency_per_day: 0.65,
                population_share: 45.0,
            },
            Archetype {
                name: "Night shift".to_string(),
                plug_in_minute: 540,
                plug_out_minute: 1170,
                plug_in_soc: 0.35,
                target_soc: 0.85,
                soc_requirement: 0.55,
                miles_per_year: 9000.0,
                efficiency_mi_per_kwh: 3.6,
                battery_kwh: 64.0,
                charger_kw: 7.4,
                plugin_frequency_per_day: 0.8,
                population_share: 15.0,
            },
        ];
        Self::new(archetypes).expect("built-in archetype table is valid")
    }

    /// Number of archetypes.
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Whether the table holds no archetypes.
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Iterates archetypes in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Archetype> {
        self.archetypes.iter()
    }

    /// Returns the archetype at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Archetype> {
        self.archetypes.get(index)
    }
}

impl Index<usize> for ArchetypeTable {
    type Output = Archetype;

    fn index(&self, index: usize) -> &Archetype {
        &self.archetypes[index]
    }
}

impl<'a> IntoIterator for &'a ArchetypeTable {
    type Item = &'a Archetype;
    type IntoIter = std::slice::Iter<'a, Archetype>;

    fn into_iter(self) -> Self::IntoIter {
        self.archetypes.iter()
    }
}

/// Failure while loading or validating the archetype table.
#[derive(Debug)]
pub enum TableError {
    /// File could not be read.
    Io(std::io::Error),
    /// CSV structure was malformed.
    Csv(csv::Error),
    /// A clock or percentage field failed to parse.
    Format(FormatError),
    /// A numeric field was outside its domain.
    Invalid(ArchetypeError),
    /// Two rows share the same name.
    DuplicateName(String),
    /// The table contained no rows.
    Empty,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read archetype table: {e}"),
            Self::Csv(e) => write!(f, "invalid archetype CSV: {e}"),
            Self::Format(e) => write!(f, "invalid archetype field: {e}"),
            Self::Invalid(e) => write!(f, "invalid archetype: {e}"),
            Self::DuplicateName(name) => write!(f, "duplicate archetype name \"{name}\""),
            Self::Empty => write!(f, "archetype table is empty"),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Invalid(e) => Some(e),
            Self::DuplicateName(_) | Self::Empty => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<FormatError> for TableError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ArchetypeError> for TableError {
    fn from(e: ArchetypeError) -> Self {
        Self::Invalid(e)
    }
}
