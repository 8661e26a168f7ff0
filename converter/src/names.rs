//! Name assembly for person rows
//!
//! Every person gets a preferred name from `full_name`. The remaining name
//! columns add a formal name with typed parts and alternate name entries.

use crate::format;
use crate::gedcomx::{Name, NamePart, NamePartType, NameType, Qualifier};
use crate::table::Row;

/// Name carried by every unknown person
pub const UNKNOWN_NAME: &str = "unknown";

const TITLE_QUALIFIER: &str = "http://gedcomx.org/Title";
const PRIMARY_QUALIFIER: &str = "http://gedcomx.org/Primary";
const MIDDLE_QUALIFIER: &str = "http://gedcomx.org/Middle";
const FAMILY_QUALIFIER: &str = "http://gedcomx.org/Family";

pub fn preferred_name(full_name: &str) -> Name {
    Name {
        kind: None,
        preferred: Some(true),
        name_forms: format::name_form(Some(full_name)).into_iter().collect(),
    }
}

/// All names of a declared person, preferred name first
pub fn person_names(row: &Row, full_name: &str) -> Vec<Name> {
    let mut names = vec![preferred_name(full_name)];
    names.extend(formal_name(row));
    names.extend(alternate_name(NameType::MarriedName, row.get("married")));
    names.extend(alternate_name(NameType::BirthName, row.get("born")));
    names.extend(alternate_name(NameType::Nickname, row.get("nickname")));
    names.extend(alternate_name(NameType::AlsoKnownAs, row.get("aka")));
    names
}

fn formal_name(row: &Row) -> Option<Name> {
    let parts: Vec<NamePart> = [
        name_part(row.get("title"), None, TITLE_QUALIFIER),
        name_part(row.get("surname"), Some(NamePartType::Surname), PRIMARY_QUALIFIER),
        name_part(row.get("middle_name"), Some(NamePartType::Given), MIDDLE_QUALIFIER),
        name_part(row.get("born"), Some(NamePartType::Surname), FAMILY_QUALIFIER),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        return None;
    }

    let full_text = parts
        .iter()
        .map(|part| part.value.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mut form = format::name_form(Some(full_text.as_str()))?;
    form.parts = parts;

    Some(Name {
        kind: Some(NameType::FormalName),
        preferred: None,
        name_forms: vec![form],
    })
}

fn name_part(value: Option<&str>, kind: Option<NamePartType>, qualifier: &str) -> Option<NamePart> {
    format::text(value).map(|value| NamePart {
        kind,
        value: value.to_string(),
        qualifiers: vec![Qualifier::named(qualifier)],
    })
}

fn alternate_name(kind: NameType, value: Option<&str>) -> Option<Name> {
    format::name_form(value).map(|form| Name {
        kind: Some(kind),
        preferred: None,
        name_forms: vec![form],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_only_preferred_name_when_nothing_else_given() {
        let names = person_names(&row(&[("full_name", "John Doe")]), "John Doe");
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].preferred, Some(true));
        assert_eq!(names[0].name_forms[0].full_text, "John Doe");
    }

    #[test]
    fn test_formal_name_assembled_from_parts() {
        let names = person_names(
            &row(&[
                ("title", "Dr."),
                ("surname", "Miriam"),
                ("middle_name", "Ann"),
                ("born", "Smith"),
            ]),
            "Miriam Doe",
        );

        let formal = names
            .iter()
            .find(|n| n.kind == Some(NameType::FormalName))
            .unwrap();
        let form = &formal.name_forms[0];
        assert_eq!(form.full_text, "Dr. Miriam Ann Smith");
        assert_eq!(form.parts.len(), 4);
        assert_eq!(form.parts[0].kind, None);
        assert_eq!(form.parts[0].qualifiers[0].name, TITLE_QUALIFIER);
        assert_eq!(form.parts[3].qualifiers[0].name, FAMILY_QUALIFIER);

        assert!(names.iter().any(|n| n.kind == Some(NameType::BirthName)));
    }

    #[test]
    fn test_alternate_names_in_order() {
        let names = person_names(
            &row(&[("married", "Doe"), ("nickname", "Mimi"), ("aka", "M.")]),
            "Miriam Doe",
        );
        let kinds: Vec<_> = names.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                None,
                Some(NameType::MarriedName),
                Some(NameType::Nickname),
                Some(NameType::AlsoKnownAs),
            ]
        );
    }
}
