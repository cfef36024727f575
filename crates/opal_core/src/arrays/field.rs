use std::fmt;

use crate::arrays::datatype::DataType;

/// A named column or struct member.
///
/// Nullability lives on the type itself (see [`DataType::make_nullable`]),
/// not on the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub datatype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Field {
            name: name.into(),
            datatype,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.datatype)
    }
}

/// Output schema of some data source, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSchema {
    pub fields: Vec<Field>,
}

impl ColumnSchema {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        ColumnSchema {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
