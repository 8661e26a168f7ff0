//! Genealogy World - main orchestrator
//!
//! Holds the graph while it is being built. Phase 1 materializes every person
//! (declared, canonical unknown, synthesized unknowns) and resolves family
//! partners; phase 2 derives relationships purely by reference.

use hecs::{Entity, World};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::components::*;
use crate::config::ConvertOptions;
use crate::error::ConvertResult;
use crate::gedcomx::{Fact, Relationship};
use crate::systems::{self, persons::PersonDraft};
use crate::table::Table;

pub struct GenealogyWorld {
    pub world: World,
    pub options: ConvertOptions,
    /// Person entities in output order
    persons: Vec<Entity>,
    person_index: HashMap<String, Entity>,
    /// Family entities in family-table row order
    families: Vec<Entity>,
    family_index: HashMap<String, Entity>,
}

impl GenealogyWorld {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            world: World::new(),
            options,
            persons: Vec::new(),
            person_index: HashMap::new(),
            families: Vec::new(),
            family_index: HashMap::new(),
        }
    }

    /// Runs phase 1 over both tables.
    pub fn build(persons: &Table, families: &Table, options: ConvertOptions) -> ConvertResult<Self> {
        let mut world = Self::new(options);

        systems::persons_system(&mut world, persons)?;
        world.ensure_canonical_unknown();
        systems::family_system(&mut world, families)?;

        info!(
            "Resolved {} persons ({} synthesized unknown) and {} families",
            world.person_count(),
            world.synthesized_count(),
            world.family_count()
        );
        Ok(world)
    }

    /// Phase 2: couple relationships in family order, then parent-child
    /// relationships in person order.
    pub fn relationships(&self) -> ConvertResult<Vec<Relationship>> {
        let children = systems::lineage::children_per_family(self);
        let mut relationships = systems::family::couple_relationships(self, &children);
        relationships.extend(systems::parent_child_relationships(self)?);
        Ok(relationships)
    }

    // ------------------------------------------------------------------------
    // Persons
    // ------------------------------------------------------------------------

    /// Spawns a person entity and appends it to the output order.
    pub fn spawn_person(&mut self, draft: PersonDraft, row: Option<usize>) -> Entity {
        let id = draft.id.clone();
        let entity = self.world.spawn((
            PersonId(draft.id),
            Sex(draft.gender),
            Names(draft.names),
            Facts(draft.facts),
            Notes(draft.notes),
        ));

        if let Some(row) = row {
            let _ = self.world.insert_one(entity, SourceRow(row));
        }
        if let Some(unknown) = draft.unknown {
            let _ = self.world.insert_one(entity, unknown);
        } else if self.options.marital_status {
            let _ = self.world.insert_one(entity, MaritalState::Single);
        }
        if let Some(family) = draft.child_of {
            let _ = self.world.insert_one(entity, ChildOf(family));
        }

        self.persons.push(entity);
        self.person_index.insert(id, entity);
        entity
    }

    /// Makes sure the reserved `"0"` person exists. When the person table
    /// does not declare it, it is placed first.
    pub fn ensure_canonical_unknown(&mut self) -> Entity {
        if let Some(&entity) = self.person_index.get(UNKNOWN_ID) {
            return entity;
        }

        let entity = self.spawn_person(systems::persons::canonical_unknown(), None);
        self.persons.pop();
        self.persons.insert(0, entity);
        debug!("Added undeclared canonical unknown person");
        entity
    }

    /// Creates a new unknown person under a fresh id.
    pub fn synthesize_unknown(&mut self) -> Entity {
        let id = self.next_unknown_id();
        debug!("Synthesizing unknown person {}", id);
        self.spawn_person(systems::persons::synthesized_unknown(id), None)
    }

    /// Smallest unused integer id, starting at the current person count
    fn next_unknown_id(&self) -> String {
        let mut candidate = self.persons.len();
        loop {
            let id = candidate.to_string();
            if !self.person_index.contains_key(&id) {
                return id;
            }
            candidate += 1;
        }
    }

    pub fn person(&self, id: &str) -> Option<Entity> {
        self.person_index.get(id).copied()
    }

    /// Like [`Self::person`], but never returns a synthesized unknown.
    /// Ids written in the tables may only refer to declared persons.
    pub fn declared_person(&self, id: &str) -> Option<Entity> {
        self.person(id).filter(|&entity| {
            self.world
                .get::<&Unknown>(entity)
                .map_or(true, |unknown| *unknown != Unknown::Synthesized)
        })
    }

    pub fn persons(&self) -> &[Entity] {
        &self.persons
    }

    pub fn person_id(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&PersonId>(entity)
            .ok()
            .map(|id| id.0.clone())
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn synthesized_count(&self) -> usize {
        self.world
            .query::<&Unknown>()
            .iter()
            .filter(|(_, unknown)| **unknown == Unknown::Synthesized)
            .count()
    }

    // ------------------------------------------------------------------------
    // Families
    // ------------------------------------------------------------------------

    pub fn spawn_family(
        &mut self,
        id: String,
        row: usize,
        partners: Partners,
        facts: Vec<Fact>,
        notes: Vec<String>,
    ) -> Entity {
        let entity = self.world.spawn((
            FamilyId(id.clone()),
            SourceRow(row),
            partners,
            Facts(facts),
            Notes(notes),
        ));
        self.families.push(entity);
        self.family_index.insert(id, entity);
        entity
    }

    pub fn family(&self, id: &str) -> Option<Entity> {
        self.family_index.get(id).copied()
    }

    pub fn families(&self) -> &[Entity] {
        &self.families
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}

impl Default for GenealogyWorld {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}
