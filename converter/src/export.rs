//! Document assembly
//!
//! Turns the built world into the GedcomX document: persons in output order,
//! couple relationships in family order, then parent-child relationships in
//! person order, all wrapped in the envelope.

use chrono::Utc;
use hecs::Entity;
use tracing::info;

use crate::components::*;
use crate::error::ConvertResult;
use crate::facts::FactBuilder;
use crate::format;
use crate::gedcomx::{Attribution, Document, FactType, Person, ResourceReference};
use crate::world::GenealogyWorld;

const CHANGE_MESSAGE: &str = "Converted from person and family CSV tables";
const SINGLE: &str = "single";
const MARRIED: &str = "married";

impl GenealogyWorld {
    /// Assembles the complete document
    pub fn export_document(&self) -> ConvertResult<Document> {
        let persons: Vec<Person> = self
            .persons()
            .iter()
            .filter_map(|&entity| self.export_person(entity))
            .collect();
        let relationships = self.relationships()?;

        info!(
            "Assembled document with {} persons and {} relationships",
            persons.len(),
            relationships.len()
        );

        Ok(Document {
            attribution: Some(self.attribution()),
            persons,
            relationships,
        })
    }

    fn export_person(&self, entity: Entity) -> Option<Person> {
        let id = self.person_id(entity)?;
        let gender = self.world.get::<&Sex>(entity).ok()?.0;
        let names = self
            .world
            .get::<&Names>(entity)
            .map(|names| names.0.clone())
            .unwrap_or_default();
        let mut facts = self
            .world
            .get::<&Facts>(entity)
            .map(|facts| facts.0.clone())
            .unwrap_or_default();
        let notes = self
            .world
            .get::<&Notes>(entity)
            .map(|notes| format::notes(&notes.0))
            .unwrap_or_default();

        if let Ok(state) = self.world.get::<&MaritalState>(entity) {
            let (value, date) = match &*state {
                MaritalState::Single => (SINGLE, None),
                MaritalState::Married { date } => (MARRIED, date.as_deref()),
            };
            facts.extend(
                FactBuilder::new(FactType::MaritalStatus)
                    .value(Some(value))
                    .date(date)
                    .build(),
            );
        }

        Some(Person {
            id,
            gender: gender.into(),
            names,
            facts,
            notes,
        })
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            contributor: self
                .options
                .contributor
                .as_deref()
                .and_then(|name| format::text(Some(name)))
                .map(|name| ResourceReference {
                    resource: name.to_string(),
                }),
            change_message: Some(CHANGE_MESSAGE.to_string()),
            modified: self
                .options
                .timestamp
                .then(|| Utc::now().timestamp_millis()),
        }
    }
}

/// JSON text of a document, pretty-printed unless `compact`
pub fn to_json(document: &Document, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(document)
    } else {
        serde_json::to_string_pretty(document)
    }
}
