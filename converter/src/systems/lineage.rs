//! Lineage System
//!
//! Links every child to the resolved partners of the family named in its
//! `child_of` column.

use std::collections::HashMap;

use crate::components::{ChildOf, Partners, SourceRow};
use crate::error::{ConvertError, ConvertResult};
use crate::gedcomx::{Relationship, RelationshipType, ResourceReference};
use crate::table::TableKind;
use crate::world::GenealogyWorld;

/// Number of person rows naming each family as `child_of`
pub fn children_per_family(world: &GenealogyWorld) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for (_, child_of) in world.world.query::<&ChildOf>().iter() {
        *counts.entry(child_of.0.clone()).or_insert(0) += 1;
    }
    counts
}

/// Parent-child relationships in person-table order, partner1 before partner2.
pub fn parent_child_relationships(world: &GenealogyWorld) -> ConvertResult<Vec<Relationship>> {
    let mut relationships = Vec::new();

    for &child in world.persons() {
        let Ok(child_of) = world.world.get::<&ChildOf>(child) else {
            continue;
        };
        let row = world
            .world
            .get::<&SourceRow>(child)
            .map(|row| row.0)
            .unwrap_or_default();

        let family = world
            .family(&child_of.0)
            .ok_or_else(|| ConvertError::UnresolvedReference {
                table: TableKind::Persons,
                row,
                column: "child_of",
                target: "family",
                reference: child_of.0.clone(),
            })?;

        let Some(child_id) = world.person_id(child) else {
            continue;
        };
        // A family without resolvable partners simply has no parents to link
        let Ok(partners) = world.world.get::<&Partners>(family) else {
            continue;
        };

        for parent in partners.iter() {
            if let Some(parent_id) = world.person_id(parent) {
                relationships.push(parent_child(&parent_id, &child_id));
            }
        }
    }

    Ok(relationships)
}

fn parent_child(parent_id: &str, child_id: &str) -> Relationship {
    Relationship {
        id: format!("r-{parent_id}-{child_id}"),
        kind: RelationshipType::ParentChild,
        person1: ResourceReference::person(parent_id),
        person2: ResourceReference::person(child_id),
        facts: Vec::new(),
        notes: Vec::new(),
    }
}
