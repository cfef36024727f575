//! Schema element builders for tests.

use crate::basic::{ConvertedType, LogicalType, Repetition, Type};
use crate::format::SchemaElement;

/// Root group element. The root carries no repetition.
pub fn root(num_children: i32) -> SchemaElement {
    SchemaElement {
        name: "schema".to_string(),
        num_children,
        ..Default::default()
    }
}

pub fn group(name: &str, repetition: Repetition, num_children: i32) -> SchemaElement {
    SchemaElement {
        name: name.to_string(),
        repetition: Some(repetition),
        num_children,
        ..Default::default()
    }
}

pub fn annotated_group(
    name: &str,
    repetition: Repetition,
    converted_type: ConvertedType,
    num_children: i32,
) -> SchemaElement {
    SchemaElement {
        converted_type: Some(converted_type),
        ..group(name, repetition, num_children)
    }
}

pub fn primitive(name: &str, repetition: Repetition, physical_type: Type) -> SchemaElement {
    SchemaElement {
        name: name.to_string(),
        physical_type: Some(physical_type),
        repetition: Some(repetition),
        ..Default::default()
    }
}

pub fn converted_primitive(
    name: &str,
    repetition: Repetition,
    physical_type: Type,
    converted_type: ConvertedType,
) -> SchemaElement {
    SchemaElement {
        converted_type: Some(converted_type),
        ..primitive(name, repetition, physical_type)
    }
}

pub fn logical_primitive(
    name: &str,
    repetition: Repetition,
    physical_type: Type,
    logical_type: LogicalType,
) -> SchemaElement {
    SchemaElement {
        logical_type: Some(logical_type),
        ..primitive(name, repetition, physical_type)
    }
}
