//! # mentor-schema — Per-File Schema Validation
//!
//! Loads the declarative file contracts from `schemas/` and checks one JSON
//! document at a time against them. This is Tier 1 of the validation
//! pipeline: field presence, types, and ranges. Cross-file rules (pairing,
//! numbering, parity) live in `mentor-validate`.
//!
//! ## Crate Policy
//!
//! - Schemas are data, not code. The registry never hardcodes field lists;
//!   changing a contract means editing a `*.schema.json` file.
//! - A document's violations are returned in full, never truncated at the
//!   first failure. Authors need the complete list.
//! - Registry problems (missing or uncompilable schema files) are errors of
//!   a different kind than document violations and are never conflated.

pub mod registry;

pub use registry::{schema_name_for, SchemaError, SchemaRegistry, Violation};
