//! Conversion errors
//!
//! Every variant aborts the whole conversion. Messages name the table, the
//! 1-based data row and the column involved.

use thiserror::Error;

use crate::table::TableKind;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed {table} table: {detail}")]
    MalformedTable { table: TableKind, detail: String },

    #[error("person table row {row}: duplicate person id `{id}`")]
    DuplicateId { id: String, row: usize },

    #[error("family table row {row}: duplicate family id `{id}`")]
    DuplicateFamilyId { id: String, row: usize },

    #[error("{table} table row {row}: required column `{column}` is empty")]
    MissingRequiredField {
        table: TableKind,
        row: usize,
        column: &'static str,
    },

    #[error("person table row {row}: invalid gender `{value}`, expected one of Male, Female, Unknown, Intersex")]
    InvalidGender { row: usize, value: String },

    #[error("{table} table row {row}: column `{column}` references unknown {target} `{reference}`")]
    UnresolvedReference {
        table: TableKind,
        row: usize,
        column: &'static str,
        target: &'static str,
        reference: String,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_row_context() {
        let err = ConvertError::UnresolvedReference {
            table: TableKind::Persons,
            row: 4,
            column: "child_of",
            target: "family",
            reference: "9".into(),
        };
        assert_eq!(
            err.to_string(),
            "person table row 4: column `child_of` references unknown family `9`"
        );

        let err = ConvertError::InvalidGender {
            row: 2,
            value: "Alien".into(),
        };
        assert!(err.to_string().contains("`Alien`"));
    }
}
