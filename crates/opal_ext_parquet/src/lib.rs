//! Parquet schema resolution for OpalDB.
//!
//! Translates the flattened schema-element sequence embedded in a Parquet
//! file footer into the engine's typed, nested field tree, computing the
//! repetition/definition level metadata that value decoding depends on.
//! Footer decoding and page/value reading are handled elsewhere; this crate
//! operates purely over already-decoded [`format::SchemaElement`]s.

pub mod basic;
pub mod format;
pub mod schema;
pub mod testutil;
