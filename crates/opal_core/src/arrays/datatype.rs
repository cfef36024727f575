use std::fmt;

use opal_error::{DbError, DbErrorKind, Result};

use crate::arrays::field::Field;

/// Metadata for fixed-precision decimal types.
///
/// Precision and scale are carried verbatim from the source schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalTypeMeta {
    pub precision: u8,
    pub scale: i8,
}

impl DecimalTypeMeta {
    pub const fn new(precision: u8, scale: i8) -> Self {
        DecimalTypeMeta { precision, scale }
    }
}

/// Metadata for timestamp types.
///
/// `scale` is the number of fractional-second digits (3 for millisecond
/// sources, 6 for microsecond and coarser-unknown sources).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampTypeMeta {
    pub scale: u8,
}

impl TimestampTypeMeta {
    pub const fn new(scale: u8) -> Self {
        TimestampTypeMeta { scale }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTypeMeta {
    pub element: Box<DataType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTypeMeta {
    pub key: Box<DataType>,
    pub value: Box<DataType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTypeMeta {
    pub fields: Vec<Field>,
}

/// Semantic types supported by the engine.
///
/// Nullability is type-level: a nullable column wraps its type in
/// [`DataType::Nullable`]. [`DataType::make_nullable`] is idempotent, so
/// wrapping an already-nullable type is always safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Float32,
    Float64,
    Utf8,
    Date32,
    Time,
    Timestamp(TimestampTypeMeta),
    Decimal128(DecimalTypeMeta),
    List(ListTypeMeta),
    Map(MapTypeMeta),
    Struct(StructTypeMeta),
    Nullable(Box<DataType>),
}

impl DataType {
    pub const fn boolean() -> Self {
        DataType::Boolean
    }

    pub const fn int8() -> Self {
        DataType::Int8
    }

    pub const fn int16() -> Self {
        DataType::Int16
    }

    pub const fn int32() -> Self {
        DataType::Int32
    }

    pub const fn int64() -> Self {
        DataType::Int64
    }

    pub const fn int128() -> Self {
        DataType::Int128
    }

    pub const fn float32() -> Self {
        DataType::Float32
    }

    pub const fn float64() -> Self {
        DataType::Float64
    }

    pub const fn utf8() -> Self {
        DataType::Utf8
    }

    pub const fn date32() -> Self {
        DataType::Date32
    }

    pub const fn time() -> Self {
        DataType::Time
    }

    pub const fn timestamp(meta: TimestampTypeMeta) -> Self {
        DataType::Timestamp(meta)
    }

    pub const fn decimal128(meta: DecimalTypeMeta) -> Self {
        DataType::Decimal128(meta)
    }

    pub fn list(element: DataType) -> Self {
        DataType::List(ListTypeMeta {
            element: Box::new(element),
        })
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(MapTypeMeta {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn struct_type(fields: Vec<Field>) -> Self {
        DataType::Struct(StructTypeMeta { fields })
    }

    /// Wrap this type as nullable. Idempotent.
    pub fn make_nullable(self) -> Self {
        match self {
            DataType::Nullable(_) => self,
            other => DataType::Nullable(Box::new(other)),
        }
    }

    /// Strip the nullable wrapper, if any.
    pub fn remove_nullable(&self) -> &DataType {
        match self {
            DataType::Nullable(inner) => inner,
            other => other,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, DataType::Nullable(_))
    }

    pub fn try_get_struct_type_meta(&self) -> Result<&StructTypeMeta> {
        match self.remove_nullable() {
            DataType::Struct(meta) => Ok(meta),
            other => Err(DbError::new(
                DbErrorKind::Internal,
                format!("not a struct type: {other}"),
            )),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Int8 => write!(f, "int8"),
            DataType::Int16 => write!(f, "int16"),
            DataType::Int32 => write!(f, "int32"),
            DataType::Int64 => write!(f, "int64"),
            DataType::Int128 => write!(f, "int128"),
            DataType::Float32 => write!(f, "float32"),
            DataType::Float64 => write!(f, "float64"),
            DataType::Utf8 => write!(f, "utf8"),
            DataType::Date32 => write!(f, "date32"),
            DataType::Time => write!(f, "time"),
            DataType::Timestamp(meta) => write!(f, "timestamp({})", meta.scale),
            DataType::Decimal128(meta) => {
                write!(f, "decimal128({}, {})", meta.precision, meta.scale)
            }
            DataType::List(meta) => write!(f, "list<{}>", meta.element),
            DataType::Map(meta) => write!(f, "map<{}, {}>", meta.key, meta.value),
            DataType::Struct(meta) => {
                write!(f, "struct<")?;
                for (idx, field) in meta.fields.iter().enumerate() {
                    if idx != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.datatype)?;
                }
                write!(f, ">")
            }
            DataType::Nullable(inner) => write!(f, "nullable<{inner}>"),
        }
    }
}
