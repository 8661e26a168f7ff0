//! Family System
//!
//! Resolves the partners of every family row, materializing unknown partners
//! as new persons, and later turns each family into a couple relationship.

use hecs::Entity;
use std::collections::HashMap;
use tracing::debug;

use crate::components::{Facts, FamilyId, MaritalState, Notes, Partners, UNKNOWN_ID};
use crate::config::UnknownPartners;
use crate::error::{ConvertError, ConvertResult};
use crate::facts::FactBuilder;
use crate::format;
use crate::gedcomx::{Fact, FactType, Relationship, RelationshipType, ResourceReference};
use crate::table::{Row, Table, TableKind};
use crate::world::GenealogyWorld;

/// One partner cell of a family row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerSlot {
    Declared(String),
    /// Empty cell or the reserved `"0"`
    Unknown,
}

impl PartnerSlot {
    pub fn parse(value: Option<&str>) -> Self {
        match format::text(value) {
            None | Some(UNKNOWN_ID) => PartnerSlot::Unknown,
            Some(id) => PartnerSlot::Declared(id.to_string()),
        }
    }
}

/// A family record parsed from one row, partners not yet resolved
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyDraft {
    pub id: String,
    pub partner1: PartnerSlot,
    pub partner2: PartnerSlot,
    pub marriage_date: Option<String>,
    pub marriage: Option<Fact>,
    pub notes: Vec<String>,
}

/// Parses one family row. Pure: the world is not touched.
pub fn build_family(row: &Row, row_number: usize) -> ConvertResult<FamilyDraft> {
    let id = row.get("id").ok_or(ConvertError::MissingRequiredField {
        table: TableKind::Families,
        row: row_number,
        column: "id",
    })?;

    Ok(FamilyDraft {
        id: id.to_string(),
        partner1: PartnerSlot::parse(row.get("partner1")),
        partner2: PartnerSlot::parse(row.get("partner2")),
        marriage_date: row.get("date").map(String::from),
        marriage: FactBuilder::new(FactType::Marriage)
            .date(row.get("date"))
            .place(row.get("place"))
            .build(),
        notes: format::split_notes(row.get("notes")),
    })
}

/// Spawns every family in table order, synthesizing unknown partners.
pub fn family_system(world: &mut GenealogyWorld, table: &Table) -> ConvertResult<()> {
    for (row_number, row) in table.data_rows() {
        let draft = build_family(row, row_number)?;

        if world.family(&draft.id).is_some() {
            return Err(ConvertError::DuplicateFamilyId {
                id: draft.id,
                row: row_number,
            });
        }

        let partners = resolve_partners(world, &draft, row_number)?;

        if world.options.marital_status {
            for partner in partners.iter() {
                if let Ok(mut state) = world.world.get::<&mut MaritalState>(partner) {
                    state.record_marriage(draft.marriage_date.as_deref());
                }
            }
        }

        let notes = if world.options.include_family_notes {
            draft.notes
        } else {
            Vec::new()
        };
        world.spawn_family(
            draft.id,
            row_number,
            partners,
            draft.marriage.into_iter().collect(),
            notes,
        );
    }

    debug!("Loaded {} families from family table", world.family_count());
    Ok(())
}

fn resolve_partners(
    world: &mut GenealogyWorld,
    draft: &FamilyDraft,
    row: usize,
) -> ConvertResult<Partners> {
    let partner1 = resolve_slot(world, &draft.partner1, "partner1", row, None)?;
    let partner2 = resolve_slot(world, &draft.partner2, "partner2", row, Some(partner1))?;
    Ok(Partners { partner1, partner2 })
}

fn resolve_slot(
    world: &mut GenealogyWorld,
    slot: &PartnerSlot,
    column: &'static str,
    row: usize,
    other: Option<Entity>,
) -> ConvertResult<Entity> {
    match slot {
        PartnerSlot::Declared(id) => {
            world
                .declared_person(id)
                .ok_or_else(|| ConvertError::UnresolvedReference {
                    table: TableKind::Families,
                    row,
                    column,
                    target: "person",
                    reference: id.clone(),
                })
        }
        PartnerSlot::Unknown => Ok(match world.options.unknown_partners {
            UnknownPartners::Distinct => world.synthesize_unknown(),
            UnknownPartners::Shared => {
                let canonical = world.ensure_canonical_unknown();
                if other == Some(canonical) {
                    world.synthesize_unknown()
                } else {
                    canonical
                }
            }
        }),
    }
}

/// Couple relationships for all families, in family-table order
pub fn couple_relationships(
    world: &GenealogyWorld,
    children: &HashMap<String, usize>,
) -> Vec<Relationship> {
    world
        .families()
        .iter()
        .filter_map(|&family| couple_relationship(world, family, children))
        .collect()
}

fn couple_relationship(
    world: &GenealogyWorld,
    family: Entity,
    children: &HashMap<String, usize>,
) -> Option<Relationship> {
    let id = world.world.get::<&FamilyId>(family).ok()?.0.clone();
    let partners = *world.world.get::<&Partners>(family).ok()?;
    let mut facts = world
        .world
        .get::<&Facts>(family)
        .map(|facts| facts.0.clone())
        .unwrap_or_default();
    let notes = world
        .world
        .get::<&Notes>(family)
        .map(|notes| format::notes(&notes.0))
        .unwrap_or_default();

    if world.options.children_count {
        let count = children.get(&id).copied().unwrap_or(0).to_string();
        facts.extend(
            FactBuilder::new(FactType::NumberOfChildren)
                .value(Some(count.as_str()))
                .build(),
        );
    }

    Some(Relationship {
        id: format!("r-{id}"),
        kind: RelationshipType::Couple,
        person1: ResourceReference::person(&world.person_id(partners.partner1)?),
        person2: ResourceReference::person(&world.person_id(partners.partner2)?),
        facts,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertOptions;
    use crate::systems::persons_system;

    fn world_with(options: ConvertOptions, persons: &str, families: &str) -> ConvertResult<GenealogyWorld> {
        let persons = Table::from_reader(TableKind::Persons, persons.as_bytes())?;
        let families = Table::from_reader(TableKind::Families, families.as_bytes())?;
        GenealogyWorld::build(&persons, &families, options)
    }

    const PERSONS: &str = "id,full_name,gender\n0,,\n1,John Doe,Male\n2,Miriam Doe,Female\n";

    #[test]
    fn test_partner_slot_parse() {
        assert_eq!(PartnerSlot::parse(None), PartnerSlot::Unknown);
        assert_eq!(PartnerSlot::parse(Some("")), PartnerSlot::Unknown);
        assert_eq!(PartnerSlot::parse(Some("0")), PartnerSlot::Unknown);
        assert_eq!(
            PartnerSlot::parse(Some("12")),
            PartnerSlot::Declared("12".into())
        );
    }

    #[test]
    fn test_two_empty_slots_make_two_distinct_unknowns() {
        let world = world_with(
            ConvertOptions::default(),
            PERSONS,
            "id,partner1,partner2\n7,,0\n",
        )
        .unwrap();

        let relationships = couple_relationships(&world, &HashMap::new());
        assert_eq!(relationships.len(), 1);
        let first = relationships[0].person1.local_id().unwrap();
        let second = relationships[0].person2.local_id().unwrap();
        assert_ne!(first, UNKNOWN_ID);
        assert_ne!(second, UNKNOWN_ID);
        assert_ne!(first, second);
        assert_eq!(world.synthesized_count(), 2);
    }

    #[test]
    fn test_each_family_gets_its_own_unknown() {
        let world = world_with(
            ConvertOptions::default(),
            PERSONS,
            "id,partner1,partner2\n0,1,\n1,2,0\n",
        )
        .unwrap();

        let relationships = couple_relationships(&world, &HashMap::new());
        assert_ne!(relationships[0].person2, relationships[1].person2);
        assert_eq!(world.person_count(), 5);
    }

    #[test]
    fn test_shared_policy_uses_canonical_once_per_couple() {
        let options = ConvertOptions {
            unknown_partners: UnknownPartners::Shared,
            ..ConvertOptions::default()
        };
        let world = world_with(options, PERSONS, "id,partner1,partner2\n0,1,\n1,,\n").unwrap();

        let relationships = couple_relationships(&world, &HashMap::new());
        assert_eq!(relationships[0].person2.local_id(), Some(UNKNOWN_ID));
        assert_eq!(relationships[1].person1.local_id(), Some(UNKNOWN_ID));
        assert_ne!(relationships[1].person2.local_id(), Some(UNKNOWN_ID));
        assert_eq!(world.synthesized_count(), 1);
    }

    #[test]
    fn test_unresolved_partner() {
        let err = world_with(
            ConvertOptions::default(),
            PERSONS,
            "id,partner1,partner2\n0,1,\n1,2,9\n",
        )
        .err()
        .unwrap();

        match err {
            ConvertError::UnresolvedReference {
                table,
                row,
                column,
                reference,
                ..
            } => {
                assert_eq!(table, TableKind::Families);
                assert_eq!(row, 2);
                assert_eq!(column, "partner2");
                assert_eq!(reference, "9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partner_never_binds_to_synthesized_unknown() {
        let persons = "id,full_name,gender\n1,John Doe,Male\n";

        // family 0 synthesizes unknown "2" before family 1 names "2"
        for (families, row) in [
            ("id,partner1,partner2\n0,1,\n1,1,2\n", 2),
            ("id,partner1,partner2\n1,1,2\n0,1,\n", 1),
        ] {
            let err = world_with(ConvertOptions::default(), persons, families)
                .err()
                .unwrap();
            match err {
                ConvertError::UnresolvedReference {
                    row: found,
                    column,
                    reference,
                    ..
                } => {
                    assert_eq!(found, row);
                    assert_eq!(column, "partner2");
                    assert_eq!(reference, "2");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_duplicate_family_id() {
        let err = world_with(
            ConvertOptions::default(),
            PERSONS,
            "id,partner1,partner2\n3,1,2\n3,2,1\n",
        )
        .err()
        .unwrap();
        assert!(matches!(err, ConvertError::DuplicateFamilyId { row: 2, .. }));
    }

    #[test]
    fn test_marriage_fact_and_notes() {
        let world = world_with(
            ConvertOptions::default(),
            PERSONS,
            "id,partner1,partner2,date,place,notes\n0,1,2,,Brolin,met at church; eloped\n",
        )
        .unwrap();

        let relationship = &couple_relationships(&world, &HashMap::new())[0];
        assert_eq!(relationship.id, "r-0");
        assert_eq!(relationship.facts.len(), 1);
        assert_eq!(relationship.facts[0].kind, FactType::Marriage);
        assert!(relationship.facts[0].date.is_none());
        assert_eq!(relationship.facts[0].place.as_ref().unwrap().original, "Brolin");
        assert_eq!(relationship.notes.len(), 2);
    }

    #[test]
    fn test_family_notes_can_be_dropped() {
        let options = ConvertOptions {
            include_family_notes: false,
            ..ConvertOptions::default()
        };
        let world = world_with(options, PERSONS, "id,partner1,partner2,notes\n0,1,2,x\n").unwrap();

        let relationship = &couple_relationships(&world, &HashMap::new())[0];
        assert!(relationship.notes.is_empty());
        assert!(relationship.facts.is_empty());
    }

    #[test]
    fn test_marital_state_follows_couples() {
        let options = ConvertOptions {
            marital_status: true,
            ..ConvertOptions::default()
        };
        let persons = Table::from_reader(
            TableKind::Persons,
            "id,full_name,gender\n1,John Doe,Male\n2,Miriam Doe,Female\n3,Kim Doe,Intersex\n"
                .as_bytes(),
        )
        .unwrap();
        let families = Table::from_reader(
            TableKind::Families,
            "id,partner1,partner2,date\n0,1,2,+1940\n".as_bytes(),
        )
        .unwrap();

        let mut world = GenealogyWorld::new(options);
        persons_system(&mut world, &persons).unwrap();
        family_system(&mut world, &families).unwrap();

        let john = world.person("1").unwrap();
        let kim = world.person("3").unwrap();
        assert_eq!(
            *world.world.get::<&MaritalState>(john).unwrap(),
            MaritalState::Married {
                date: Some("+1940".into())
            }
        );
        assert_eq!(*world.world.get::<&MaritalState>(kim).unwrap(), MaritalState::Single);
    }
}
