//! Mapping from Parquet type annotations to engine types.

use opal_core::arrays::datatype::{DataType, DecimalTypeMeta, TimestampTypeMeta};
use opal_error::{DbError, DbErrorKind, Result};
use tracing::debug;

use crate::basic::{ConvertedType, LogicalType, TimeUnit, Type};
use crate::format::SchemaElement;

/// Result of mapping a leaf schema element to an engine type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub datatype: DataType,
    /// Set when the source type has no exact engine equivalent and was
    /// widened to the next signed type (unsigned integers). Decoders use
    /// this to pick the widening read path.
    pub coerced: bool,
}

impl ResolvedType {
    fn exact(datatype: DataType) -> Self {
        ResolvedType {
            datatype,
            coerced: false,
        }
    }

    fn widened(datatype: DataType) -> Self {
        ResolvedType {
            datatype,
            coerced: true,
        }
    }
}

/// Resolve the engine type for a leaf element.
///
/// Resolution order: the modern logical annotation if present, else the
/// legacy converted annotation, else a direct mapping of the physical type.
/// A recognized annotation with an out-of-range payload degrades to the
/// physical fallback; an unrecognized annotation is a hard error.
pub fn resolve_leaf_type(element: &SchemaElement, nullable: bool) -> Result<ResolvedType> {
    let resolved = if let Some(logical) = element.logical_type {
        from_logical_type(logical, element)?
    } else if let Some(converted) = element.converted_type {
        from_converted_type(converted, element)?
    } else {
        None
    };

    let mut resolved = match resolved {
        Some(resolved) => resolved,
        None => ResolvedType::exact(physical_default(element)?),
    };
    if nullable {
        resolved.datatype = resolved.datatype.make_nullable();
    }
    Ok(resolved)
}

/// Map a modern logical annotation.
///
/// `Ok(None)` means the annotation was recognized but its payload is
/// unusable; the caller falls back to the physical mapping.
fn from_logical_type(
    logical: LogicalType,
    element: &SchemaElement,
) -> Result<Option<ResolvedType>> {
    let resolved = match logical {
        LogicalType::String => ResolvedType::exact(DataType::utf8()),
        LogicalType::Decimal { precision, scale } => {
            match decimal_type_meta(precision, scale) {
                Some(meta) => ResolvedType::exact(DataType::decimal128(meta)),
                None => {
                    debug!(
                        field = %element.name,
                        precision,
                        scale,
                        "out-of-range decimal annotation, falling back to physical type",
                    );
                    return Ok(None);
                }
            }
        }
        LogicalType::Date => ResolvedType::exact(DataType::date32()),
        LogicalType::Integer {
            bit_width,
            is_signed,
        } => integer_type(bit_width, is_signed),
        // Time-of-day regardless of unit.
        LogicalType::Time { .. } => ResolvedType::exact(DataType::time()),
        LogicalType::Timestamp { unit, .. } => {
            ResolvedType::exact(DataType::timestamp(timestamp_meta(unit)))
        }
        other => {
            return Err(DbError::new(
                DbErrorKind::UnsupportedSchemaType,
                format!(
                    "unsupported logical type {other:?} on field '{}'",
                    element.name
                ),
            ));
        }
    };
    Ok(Some(resolved))
}

/// Map a legacy converted annotation. Same fallback contract as
/// [`from_logical_type`].
fn from_converted_type(
    converted: ConvertedType,
    element: &SchemaElement,
) -> Result<Option<ResolvedType>> {
    let resolved = match converted {
        ConvertedType::UTF8 => ResolvedType::exact(DataType::utf8()),
        ConvertedType::DECIMAL => {
            let precision = element.precision.unwrap_or(0);
            let scale = element.scale.unwrap_or(0);
            match decimal_type_meta(precision, scale) {
                Some(meta) => ResolvedType::exact(DataType::decimal128(meta)),
                None => {
                    debug!(
                        field = %element.name,
                        precision,
                        scale,
                        "out-of-range decimal annotation, falling back to physical type",
                    );
                    return Ok(None);
                }
            }
        }
        ConvertedType::DATE => ResolvedType::exact(DataType::date32()),
        ConvertedType::TIME_MILLIS | ConvertedType::TIME_MICROS => {
            ResolvedType::exact(DataType::time())
        }
        ConvertedType::TIMESTAMP_MILLIS => {
            ResolvedType::exact(DataType::timestamp(TimestampTypeMeta::new(3)))
        }
        ConvertedType::TIMESTAMP_MICROS => {
            ResolvedType::exact(DataType::timestamp(TimestampTypeMeta::new(6)))
        }
        ConvertedType::INT_8 => ResolvedType::exact(DataType::int8()),
        ConvertedType::INT_16 => ResolvedType::exact(DataType::int16()),
        ConvertedType::INT_32 => ResolvedType::exact(DataType::int32()),
        ConvertedType::INT_64 => ResolvedType::exact(DataType::int64()),
        ConvertedType::UINT_8 => ResolvedType::widened(DataType::int16()),
        ConvertedType::UINT_16 => ResolvedType::widened(DataType::int32()),
        ConvertedType::UINT_32 => ResolvedType::widened(DataType::int64()),
        ConvertedType::UINT_64 => ResolvedType::widened(DataType::int128()),
        other => {
            return Err(DbError::new(
                DbErrorKind::UnsupportedSchemaType,
                format!(
                    "unsupported converted type {other:?} on field '{}'",
                    element.name
                ),
            ));
        }
    };
    Ok(Some(resolved))
}

/// Direct mapping of the physical type, used when no annotation applies.
fn physical_default(element: &SchemaElement) -> Result<DataType> {
    let physical = element.physical_type.ok_or_else(|| {
        DbError::new(
            DbErrorKind::UnsupportedSchemaType,
            format!("leaf element '{}' is missing a physical type", element.name),
        )
    })?;
    let datatype = match physical {
        Type::BOOLEAN => DataType::boolean(),
        Type::INT32 => DataType::int32(),
        Type::INT64 => DataType::int64(),
        // In most cases an INT96 is a nanosecond timestamp.
        Type::INT96 => DataType::timestamp(TimestampTypeMeta::new(6)),
        Type::FLOAT => DataType::float32(),
        Type::DOUBLE => DataType::float64(),
        Type::BYTE_ARRAY | Type::FIXED_LEN_BYTE_ARRAY => DataType::utf8(),
    };
    Ok(datatype)
}

/// Integer promotion. Unsigned widths widen to the next signed type and
/// set the coercion flag.
fn integer_type(bit_width: i8, is_signed: bool) -> ResolvedType {
    if is_signed {
        let datatype = if bit_width <= 8 {
            DataType::int8()
        } else if bit_width <= 16 {
            DataType::int16()
        } else if bit_width <= 32 {
            DataType::int32()
        } else {
            DataType::int64()
        };
        ResolvedType::exact(datatype)
    } else {
        let datatype = if bit_width <= 8 {
            DataType::int16()
        } else if bit_width <= 16 {
            DataType::int32()
        } else if bit_width <= 32 {
            DataType::int64()
        } else {
            DataType::int128()
        };
        ResolvedType::widened(datatype)
    }
}

fn timestamp_meta(unit: TimeUnit) -> TimestampTypeMeta {
    match unit {
        TimeUnit::Millis => TimestampTypeMeta::new(3),
        TimeUnit::Micros | TimeUnit::Nanos => TimestampTypeMeta::new(6),
    }
}

fn decimal_type_meta(precision: i32, scale: i32) -> Option<DecimalTypeMeta> {
    if !(1..=38).contains(&precision) {
        return None;
    }
    let precision: u8 = precision.try_into().ok()?;
    let scale: i8 = scale.try_into().ok()?;
    Some(DecimalTypeMeta::new(precision, scale))
}
