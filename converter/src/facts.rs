//! Fact Builder
//!
//! Collects the optional pieces of a fact and produces nothing at all when
//! every piece is empty.

use crate::format;
use crate::gedcomx::{Fact, FactType, Qualifier};

pub const CAUSE_QUALIFIER: &str = "http://gedcomx.org/Cause";

#[derive(Debug, Clone, Copy)]
pub struct FactBuilder<'a> {
    kind: FactType,
    date: Option<&'a str>,
    place: Option<&'a str>,
    value: Option<&'a str>,
    cause: Option<&'a str>,
}

impl<'a> FactBuilder<'a> {
    pub fn new(kind: FactType) -> Self {
        Self {
            kind,
            date: None,
            place: None,
            value: None,
            cause: None,
        }
    }

    pub fn date(mut self, date: Option<&'a str>) -> Self {
        self.date = date;
        self
    }

    pub fn place(mut self, place: Option<&'a str>) -> Self {
        self.place = place;
        self
    }

    pub fn value(mut self, value: Option<&'a str>) -> Self {
        self.value = value;
        self
    }

    /// Cause of the event, emitted as a `Cause` qualifier
    pub fn cause(mut self, cause: Option<&'a str>) -> Self {
        self.cause = cause;
        self
    }

    pub fn build(self) -> Option<Fact> {
        let date = format::date(self.date);
        let place = format::place(self.place);
        let value = format::text(self.value).map(String::from);
        let qualifiers: Vec<Qualifier> = format::text(self.cause)
            .map(|cause| Qualifier {
                name: CAUSE_QUALIFIER.to_string(),
                value: Some(cause.to_string()),
            })
            .into_iter()
            .collect();

        if date.is_none() && place.is_none() && value.is_none() && qualifiers.is_empty() {
            return None;
        }

        Some(Fact {
            kind: self.kind,
            date,
            place,
            value,
            qualifiers,
        })
    }
}
