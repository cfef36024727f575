//! Schema resolution: flattened schema elements in, typed field tree out.

pub mod convert;
pub mod parser;
pub mod types;
