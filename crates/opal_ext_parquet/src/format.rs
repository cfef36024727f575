//! The externally-supplied schema element record.

use crate::basic::{ConvertedType, LogicalType, Repetition, Type};

/// One node of a Parquet schema, as stored flattened in the file footer.
///
/// The footer stores the whole schema as a single pre-order sequence:
/// element 0 is the synthetic root group, and every group's children occupy
/// the immediately following slots, recursively, depth-first. The metadata
/// reader decodes the Thrift structs into this form; schema resolution
/// consumes the sequence positionally and depends on it matching exactly
/// what the file was written with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaElement {
    pub name: String,
    /// Physical storage type. Unset for groups.
    pub physical_type: Option<Type>,
    /// Byte length for FIXED_LEN_BYTE_ARRAY columns.
    pub type_length: Option<i32>,
    /// Unset only on the synthetic root.
    pub repetition: Option<Repetition>,
    /// Number of direct children; 0 for leaves.
    pub num_children: i32,
    /// Legacy annotation written by older writers.
    pub converted_type: Option<ConvertedType>,
    /// Modern annotation; takes precedence over `converted_type`.
    pub logical_type: Option<LogicalType>,
    /// Decimal precision, when annotated via `converted_type`.
    pub precision: Option<i32>,
    /// Decimal scale, when annotated via `converted_type`.
    pub scale: Option<i32>,
    pub field_id: Option<i32>,
}
