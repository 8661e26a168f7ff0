//! Conversion options
//!
//! Defaults reproduce the plain conversion. The optional facts come from the
//! older spreadsheet workflow and are off unless asked for.

use serde::{Deserialize, Serialize};

/// What an empty or `"0"` partner slot turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPartners {
    /// A new unknown person per slot
    #[default]
    Distinct,
    /// The canonical `"0"` person, except for the second slot of a couple
    /// whose first slot already took it
    Shared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub unknown_partners: UnknownPartners,
    /// Keep family `notes` as notes on the couple relationship
    pub include_family_notes: bool,
    /// Add a MaritalStatus fact to every declared person
    pub marital_status: bool,
    /// Add a NumberOfChildren fact to every couple relationship
    pub children_count: bool,
    /// Contributor recorded in the document attribution
    pub contributor: Option<String>,
    /// Stamp the attribution with the conversion time
    pub timestamp: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            unknown_partners: UnknownPartners::Distinct,
            include_family_notes: true,
            marital_status: false,
            children_count: false,
            contributor: None,
            timestamp: false,
        }
    }
}

impl ConvertOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
