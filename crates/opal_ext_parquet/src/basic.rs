// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Rust mirrors of the Parquet Thrift definition types used by schema
//! resolution.

// ----------------------------------------------------------------------
// Mirrors `parquet::Type`

/// Physical types supported by Parquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Type {
    BOOLEAN,
    INT32,
    INT64,
    INT96,
    FLOAT,
    DOUBLE,
    BYTE_ARRAY,
    FIXED_LEN_BYTE_ARRAY,
}

// ----------------------------------------------------------------------
// Mirrors `parquet::FieldRepetitionType`

/// Representation of field repetition in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Repetition {
    /// Field cannot be null and each record has exactly 1 value.
    REQUIRED,
    /// Field can be null and each record has 0 or 1 values.
    OPTIONAL,
    /// Field can contain 0 or more values.
    REPEATED,
}

// ----------------------------------------------------------------------
// Mirrors `parquet::ConvertedType`

/// Legacy annotations placed on schema elements by older writers.
///
/// Absence of an annotation is modeled as `Option::None` on the schema
/// element rather than a dedicated `NONE` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum ConvertedType {
    /// A BYTE_ARRAY containing UTF8 encoded chars.
    UTF8,
    /// A map: an optional group containing a repeated key/value pair group.
    MAP,
    /// The key/value pair group inside a map.
    MAP_KEY_VALUE,
    /// A list: an optional group containing a repeated field for its values.
    LIST,
    /// An enum, stored as a binary field.
    ENUM,
    /// A decimal value; precision and scale live on the schema element.
    DECIMAL,
    /// Days since the Unix epoch, stored as INT32.
    DATE,
    /// Milliseconds since midnight, stored as INT32.
    TIME_MILLIS,
    /// Microseconds since midnight, stored as INT64.
    TIME_MICROS,
    /// Milliseconds since the Unix epoch, stored as INT64.
    TIMESTAMP_MILLIS,
    /// Microseconds since the Unix epoch, stored as INT64.
    TIMESTAMP_MICROS,
    UINT_8,
    UINT_16,
    UINT_32,
    UINT_64,
    INT_8,
    INT_16,
    INT_32,
    INT_64,
    /// A JSON document embedded within a single UTF8 column.
    JSON,
    /// A BSON document embedded within a single BINARY column.
    BSON,
    /// An interval of time, stored as a 12-byte fixed-length byte array.
    INTERVAL,
}

// ----------------------------------------------------------------------
// Mirrors `parquet::TimeUnit`

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Micros,
    Nanos,
}

// ----------------------------------------------------------------------
// Mirrors `parquet::LogicalType`

/// Logical annotations used by version 2.4.0+ of the Parquet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    String,
    Map,
    List,
    Enum,
    Decimal {
        scale: i32,
        precision: i32,
    },
    Date,
    Time {
        is_adjusted_to_utc: bool,
        unit: TimeUnit,
    },
    Timestamp {
        is_adjusted_to_utc: bool,
        unit: TimeUnit,
    },
    Integer {
        bit_width: i8,
        is_signed: bool,
    },
    Unknown,
    Json,
    Bson,
    Uuid,
    Float16,
}
