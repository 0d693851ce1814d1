//! Driver archetype input: typed records and table loading.

pub mod archetype;
pub mod parse;
pub mod table;

pub use archetype::{Archetype, ArchetypeError};
pub use parse::{FormatError, parse_clock_minutes, parse_percent};
pub use table::{ArchetypeTable, TableError};
