//! GedcomX document model
//!
//! Serializable records that make up the emitted JSON document. Type tags are
//! enums that serialize to their `http://gedcomx.org/...` URIs, and every
//! optional field is skipped when absent so empty source cells never show up
//! in the output.

use serde::{Deserialize, Serialize};

// ============================================================================
// Envelope
// ============================================================================

/// Complete converted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Document {
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<ResourceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_message: Option<String>,
    /// Milliseconds since the unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceReference {
    pub resource: String,
}

impl ResourceReference {
    /// Local reference to a person inside the same document (`#<id>`)
    pub fn person(id: &str) -> Self {
        Self {
            resource: format!("#{id}"),
        }
    }

    /// Person id behind a local `#<id>` reference
    pub fn local_id(&self) -> Option<&str> {
        self.resource.strip_prefix('#')
    }
}

// ============================================================================
// Persons
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub gender: GenderValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "http://gedcomx.org/Male")]
    Male,
    #[serde(rename = "http://gedcomx.org/Female")]
    Female,
    #[serde(rename = "http://gedcomx.org/Unknown")]
    Unknown,
    #[serde(rename = "http://gedcomx.org/Intersex")]
    Intersex,
}

impl Gender {
    /// Parses the bare value used in the person table (`Male`, `Female`, ...).
    /// Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Unknown" => Some(Gender::Unknown),
            "Intersex" => Some(Gender::Intersex),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderValue {
    #[serde(rename = "type")]
    pub kind: Gender,
}

impl From<Gender> for GenderValue {
    fn from(kind: Gender) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NameType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
    pub name_forms: Vec<NameForm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameType {
    #[serde(rename = "http://gedcomx.org/FormalName")]
    FormalName,
    #[serde(rename = "http://gedcomx.org/BirthName")]
    BirthName,
    #[serde(rename = "http://gedcomx.org/MarriedName")]
    MarriedName,
    #[serde(rename = "http://gedcomx.org/Nickname")]
    Nickname,
    #[serde(rename = "http://gedcomx.org/AlsoKnownAs")]
    AlsoKnownAs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameForm {
    pub full_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<NamePart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamePart {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NamePartType>,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamePartType {
    #[serde(rename = "http://gedcomx.org/Prefix")]
    Prefix,
    #[serde(rename = "http://gedcomx.org/Given")]
    Given,
    #[serde(rename = "http://gedcomx.org/Surname")]
    Surname,
}

// ============================================================================
// Facts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "type")]
    pub kind: FactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactType {
    #[serde(rename = "http://gedcomx.org/Birth")]
    Birth,
    #[serde(rename = "http://gedcomx.org/Death")]
    Death,
    #[serde(rename = "http://gedcomx.org/Occupation")]
    Occupation,
    #[serde(rename = "http://gedcomx.org/Religion")]
    Religion,
    #[serde(rename = "http://gedcomx.org/MaritalStatus")]
    MaritalStatus,
    #[serde(rename = "http://gedcomx.org/Marriage")]
    Marriage,
    #[serde(rename = "http://gedcomx.org/NumberOfChildren")]
    NumberOfChildren,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReference {
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Qualifier {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
        }
    }
}

// ============================================================================
// Relationships
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    pub person1: ResourceReference,
    pub person2: ResourceReference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    #[serde(rename = "http://gedcomx.org/Couple")]
    Couple,
    #[serde(rename = "http://gedcomx.org/ParentChild")]
    ParentChild,
}
