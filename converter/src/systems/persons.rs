//! Person System
//!
//! Turns person-table rows into person entities. Row id `"0"` always becomes
//! the canonical unknown person and the rest of that row is ignored.

use tracing::debug;

use crate::components::{Unknown, UNKNOWN_ID};
use crate::error::{ConvertError, ConvertResult};
use crate::facts::FactBuilder;
use crate::format;
use crate::gedcomx::{Fact, FactType, Gender, Name};
use crate::names;
use crate::table::{Row, Table, TableKind};
use crate::world::GenealogyWorld;

/// A person record parsed from one row, not yet part of the world
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDraft {
    pub id: String,
    pub gender: Gender,
    pub names: Vec<Name>,
    pub facts: Vec<Fact>,
    pub notes: Vec<String>,
    pub child_of: Option<String>,
    pub unknown: Option<Unknown>,
}

pub fn canonical_unknown() -> PersonDraft {
    unknown_person(UNKNOWN_ID.to_string(), Unknown::Canonical)
}

pub fn synthesized_unknown(id: String) -> PersonDraft {
    unknown_person(id, Unknown::Synthesized)
}

fn unknown_person(id: String, kind: Unknown) -> PersonDraft {
    PersonDraft {
        id,
        gender: Gender::Unknown,
        names: vec![names::preferred_name(names::UNKNOWN_NAME)],
        facts: Vec::new(),
        notes: Vec::new(),
        child_of: None,
        unknown: Some(kind),
    }
}

/// Parses one person row. Pure: the world is not touched.
pub fn build_person(row: &Row, row_number: usize) -> ConvertResult<PersonDraft> {
    let id = required(row, row_number, "id")?;
    if id == UNKNOWN_ID {
        return Ok(canonical_unknown());
    }

    let full_name = required(row, row_number, "full_name")?;
    let gender_value = required(row, row_number, "gender")?;
    let gender = Gender::parse(gender_value).ok_or_else(|| ConvertError::InvalidGender {
        row: row_number,
        value: gender_value.to_string(),
    })?;

    let facts = [
        FactBuilder::new(FactType::Birth)
            .date(row.get("birth_date"))
            .place(row.get("birth_place")),
        FactBuilder::new(FactType::Death)
            .date(row.get("death_date"))
            .place(row.get("death_place"))
            .cause(row.get("death_cause")),
        FactBuilder::new(FactType::Occupation).value(row.get("occupation")),
        FactBuilder::new(FactType::Religion).value(row.get("religion")),
    ]
    .into_iter()
    .filter_map(FactBuilder::build)
    .collect();

    Ok(PersonDraft {
        id: id.to_string(),
        gender,
        names: names::person_names(row, full_name),
        facts,
        notes: format::split_notes(row.get("notes")),
        child_of: row.get("child_of").map(String::from),
        unknown: None,
    })
}

fn required<'r>(row: &'r Row, row_number: usize, column: &'static str) -> ConvertResult<&'r str> {
    row.get(column).ok_or(ConvertError::MissingRequiredField {
        table: TableKind::Persons,
        row: row_number,
        column,
    })
}

/// Spawns every declared person in table order.
pub fn persons_system(world: &mut GenealogyWorld, table: &Table) -> ConvertResult<()> {
    for (row_number, row) in table.data_rows() {
        let draft = build_person(row, row_number)?;

        if world.person(&draft.id).is_some() {
            if draft.id == UNKNOWN_ID {
                debug!("Ignoring repeated unknown person row {}", row_number);
                continue;
            }
            return Err(ConvertError::DuplicateId {
                id: draft.id,
                row: row_number,
            });
        }

        world.spawn_person(draft, Some(row_number));
    }

    debug!("Loaded {} persons from person table", world.person_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_unknown_row_ignores_other_columns() {
        let draft = build_person(
            &row(&[
                ("id", "0"),
                ("full_name", "Someone"),
                ("gender", "Alien"),
                ("birth_date", "+1900"),
                ("notes", "secret"),
                ("child_of", "3"),
            ]),
            1,
        )
        .unwrap();

        assert_eq!(draft, canonical_unknown());
        assert_eq!(draft.gender, Gender::Unknown);
        assert!(draft.facts.is_empty());
        assert!(draft.notes.is_empty());
        assert!(draft.child_of.is_none());
        assert_eq!(draft.names[0].name_forms[0].full_text, "unknown");
    }

    #[test]
    fn test_facts_in_order_and_only_when_present() {
        let draft = build_person(
            &row(&[
                ("id", "2"),
                ("full_name", "Miriam Doe"),
                ("gender", "Female"),
                ("birth_date", "+1902-02-02"),
                ("birth_place", "Ohoho"),
                ("death_cause", "heart attack"),
                ("religion", "None"),
            ]),
            3,
        )
        .unwrap();

        let kinds: Vec<_> = draft.facts.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FactType::Birth, FactType::Death, FactType::Religion]);
        assert!(draft.facts[1].date.is_none());
        assert_eq!(draft.unknown, None);
    }

    #[test]
    fn test_invalid_gender() {
        let err = build_person(
            &row(&[("id", "5"), ("full_name", "X"), ("gender", "Alien")]),
            7,
        )
        .unwrap_err();
        match err {
            ConvertError::InvalidGender { row, value } => {
                assert_eq!(row, 7);
                assert_eq!(value, "Alien");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_full_name() {
        let err = build_person(&row(&[("id", "5"), ("gender", "Male")]), 2).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingRequiredField {
                column: "full_name",
                row: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_notes_are_split() {
        let draft = build_person(
            &row(&[
                ("id", "1"),
                ("full_name", "John Doe"),
                ("gender", "Male"),
                ("notes", "a; b ;c"),
            ]),
            1,
        )
        .unwrap();
        assert_eq!(draft.notes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_id_fails() {
        let csv = "id,full_name,gender\n1,John Doe,Male\n1,Jane Doe,Female\n";
        let table = Table::from_reader(TableKind::Persons, csv.as_bytes()).unwrap();
        let mut world = GenealogyWorld::default();

        let err = persons_system(&mut world, &table).unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateId { row: 2, .. }));
    }

    #[test]
    fn test_repeated_unknown_rows_collapse() {
        let csv = "id,full_name,gender\n0,,\n0,Nobody,Male\n1,John Doe,Male\n";
        let table = Table::from_reader(TableKind::Persons, csv.as_bytes()).unwrap();
        let mut world = GenealogyWorld::default();

        persons_system(&mut world, &table).unwrap();
        assert_eq!(world.person_count(), 2);
    }
}
