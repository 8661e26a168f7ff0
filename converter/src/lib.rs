//! CSV to GedcomX converter
//!
//! Reads a person table and a family table, resolves the references between
//! them (including the reserved unknown person `"0"` and unknown partners)
//! and produces one GedcomX document.

pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod facts;
pub mod format;
pub mod gedcomx;
pub mod names;
pub mod systems;
pub mod table;
pub mod world;

pub use config::{ConvertOptions, UnknownPartners};
pub use error::{ConvertError, ConvertResult};
pub use export::to_json;
pub use gedcomx::Document;
pub use table::{Row, Table, TableKind};
pub use world::GenealogyWorld;

/// Converts both tables into a document. Any error aborts the conversion.
pub fn convert(
    persons: &Table,
    families: &Table,
    options: &ConvertOptions,
) -> ConvertResult<Document> {
    GenealogyWorld::build(persons, families, options.clone())?.export_document()
}
