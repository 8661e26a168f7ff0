//! ECS components for the genealogy graph
//!
//! Persons and families are entities in one `hecs::World` while references
//! are being resolved. Nothing here is serialized directly; `export` turns
//! entities into GedcomX records.

use hecs::Entity;

use crate::gedcomx::{Fact, Gender, Name};

/// Reserved id of the canonical unknown person
pub const UNKNOWN_ID: &str = "0";

// ============================================================================
// Identity Components
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyId(pub String);

/// 1-based data row the entity was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRow(pub usize);

// ============================================================================
// Person Components
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sex(pub Gender);

/// Marker: person stands in for an unspecified individual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    /// The single reserved person with id `"0"`
    Canonical,
    /// Created for an empty partner slot of a family
    Synthesized,
}

#[derive(Debug, Clone, Default)]
pub struct Names(pub Vec<Name>);

#[derive(Debug, Clone, Default)]
pub struct Facts(pub Vec<Fact>);

#[derive(Debug, Clone, Default)]
pub struct Notes(pub Vec<String>);

/// Family id named in the person's `child_of` column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildOf(pub String);

/// Only attached when marital status facts are requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaritalState {
    Single,
    Married { date: Option<String> },
}

impl MaritalState {
    pub fn record_marriage(&mut self, date: Option<&str>) {
        match self {
            MaritalState::Single => {
                *self = MaritalState::Married {
                    date: date.map(String::from),
                }
            }
            MaritalState::Married { date: current } => {
                if current.is_none() {
                    *current = date.map(String::from);
                }
            }
        }
    }
}

// ============================================================================
// Family Components
// ============================================================================

/// Both partners of a family after unknown-partner resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partners {
    pub partner1: Entity,
    pub partner2: Entity,
}

impl Partners {
    pub fn iter(&self) -> impl Iterator<Item = Entity> {
        [self.partner1, self.partner2].into_iter()
    }
}
