//! Conversion systems - run over the input tables and the built world
//!
//! Persons first, then families (which may add unknown persons), then the
//! parent-child links derived from both.

pub mod family;
pub mod lineage;
pub mod persons;

pub use family::family_system;
pub use lineage::parent_child_relationships;
pub use persons::persons_system;
