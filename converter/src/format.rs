//! Field formatters
//!
//! Pure `Option<&str> -> Option<_>` wrappers shared by every builder. An
//! empty source string always yields `None`, which the model then skips on
//! serialization.

use crate::gedcomx::{Date, NameForm, Note, PlaceReference};

const NOTE_SEPARATOR: char = ';';

/// The value itself, unless it is missing or empty
pub fn text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn date(value: Option<&str>) -> Option<Date> {
    text(value).map(|original| Date {
        original: original.to_string(),
    })
}

pub fn place(value: Option<&str>) -> Option<PlaceReference> {
    text(value).map(|original| PlaceReference {
        original: original.to_string(),
    })
}

pub fn name_form(value: Option<&str>) -> Option<NameForm> {
    text(value).map(|full_text| NameForm {
        full_text: full_text.to_string(),
        parts: Vec::new(),
    })
}

/// Splits a `;` separated notes cell, trimming segments and dropping empty ones.
pub fn split_notes(value: Option<&str>) -> Vec<String> {
    text(value)
        .map(|notes| {
            notes
                .split(NOTE_SEPARATOR)
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub fn notes(texts: &[String]) -> Vec<Note> {
    texts
        .iter()
        .map(|text| Note { text: text.clone() })
        .collect()
}
