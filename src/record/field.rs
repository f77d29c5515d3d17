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

//! Rust representation of a decoded leaf value, carrying its logical
//! interpretation.

use std::fmt;

use crate::basic::{ConvertedType, LogicalType, TimeUnit, Type as PhysicalType};
use crate::data_type::{ByteArray, Int96};
use crate::errors::{ParquetError, Result};
use crate::schema::types::ColumnDescriptor;

/// A decimal value: unscaled two's-complement big-endian bytes plus the scale
/// and precision from the column's annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Decimal {
    unscaled: Vec<u8>,
    precision: i32,
    scale: i32,
}

impl Decimal {
    /// Creates a decimal from an INT32 unscaled value.
    pub fn from_i32(value: i32, precision: i32, scale: i32) -> Self {
        Self {
            unscaled: value.to_be_bytes().to_vec(),
            precision,
            scale,
        }
    }

    /// Creates a decimal from an INT64 unscaled value.
    pub fn from_i64(value: i64, precision: i32, scale: i32) -> Self {
        Self {
            unscaled: value.to_be_bytes().to_vec(),
            precision,
            scale,
        }
    }

    /// Creates a decimal from unscaled big-endian two's-complement bytes.
    pub fn from_bytes(value: &[u8], precision: i32, scale: i32) -> Self {
        Self {
            unscaled: value.to_vec(),
            precision,
            scale,
        }
    }

    /// The unscaled value as big-endian two's-complement bytes.
    pub fn data(&self) -> &[u8] {
        &self.unscaled
    }

    /// Decimal precision.
    pub fn precision(&self) -> i32 {
        self.precision
    }

    /// Decimal scale.
    pub fn scale(&self) -> i32 {
        self.scale
    }
}

/// A leaf value emitted by the record assembler, tagged with its logical
/// interpretation.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// An absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An 8-bit signed integer (`INT_8` annotation).
    Byte(i8),
    /// A 16-bit signed integer (`INT_16` annotation).
    Short(i16),
    /// A 32-bit signed integer.
    Int(i32),
    /// A 64-bit signed integer.
    Long(i64),
    /// An 8-bit unsigned integer (`UINT_8` annotation).
    UByte(u8),
    /// A 16-bit unsigned integer (`UINT_16` annotation).
    UShort(u16),
    /// A 32-bit unsigned integer (`UINT_32` annotation).
    UInt(u32),
    /// A 64-bit unsigned integer (`UINT_64` annotation).
    ULong(u64),
    /// An IEEE 32-bit float.
    Float(f32),
    /// An IEEE 64-bit float.
    Double(f64),
    /// A UTF-8 string (`UTF8`, `ENUM` or `JSON` annotation).
    Str(String),
    /// Raw bytes.
    Bytes(ByteArray),
    /// Days since the Unix epoch (`DATE` annotation).
    Date(i32),
    /// Milliseconds since midnight (`TIME_MILLIS` annotation).
    TimeMillis(i32),
    /// Microseconds since midnight (`TIME_MICROS` annotation).
    TimeMicros(i64),
    /// Nanoseconds since midnight (nanosecond `TIME` logical type).
    TimeNanos(i64),
    /// Milliseconds since the Unix epoch (`TIMESTAMP_MILLIS` annotation).
    TimestampMillis(i64),
    /// Microseconds since the Unix epoch (`TIMESTAMP_MICROS` annotation).
    TimestampMicros(i64),
    /// Nanoseconds since the Unix epoch (nanosecond `TIMESTAMP` logical type).
    TimestampNanos(i64),
    /// A decimal value.
    Decimal(Decimal),
    /// A raw, uninterpreted INT96 value (deprecated timestamps; read-only).
    Int96(Int96),
}

impl Field {
    /// Converts a BOOLEAN value.
    pub fn convert_bool(_descr: &ColumnDescriptor, value: bool) -> Field {
        Field::Bool(value)
    }

    /// Converts an INT32 value according to the column annotation.
    pub fn convert_int32(descr: &ColumnDescriptor, value: i32) -> Field {
        match descr.converted_type() {
            ConvertedType::INT_8 => Field::Byte(value as i8),
            ConvertedType::INT_16 => Field::Short(value as i16),
            ConvertedType::UINT_8 => Field::UByte(value as u8),
            ConvertedType::UINT_16 => Field::UShort(value as u16),
            ConvertedType::UINT_32 => Field::UInt(value as u32),
            ConvertedType::DATE => Field::Date(value),
            ConvertedType::TIME_MILLIS => Field::TimeMillis(value),
            ConvertedType::DECIMAL => Field::Decimal(Decimal::from_i32(
                value,
                descr.type_precision(),
                descr.type_scale(),
            )),
            _ => Field::Int(value),
        }
    }

    /// Converts an INT64 value according to the column annotation.
    pub fn convert_int64(descr: &ColumnDescriptor, value: i64) -> Field {
        // Nanosecond units only exist as logical types, the converted type is
        // not populated for them
        match descr.logical_type() {
            Some(LogicalType::Time {
                unit: TimeUnit::NANOS(_),
                ..
            }) => return Field::TimeNanos(value),
            Some(LogicalType::Timestamp {
                unit: TimeUnit::NANOS(_),
                ..
            }) => return Field::TimestampNanos(value),
            _ => {}
        }
        match descr.converted_type() {
            ConvertedType::UINT_64 => Field::ULong(value as u64),
            ConvertedType::TIME_MICROS => Field::TimeMicros(value),
            ConvertedType::TIMESTAMP_MILLIS => Field::TimestampMillis(value),
            ConvertedType::TIMESTAMP_MICROS => Field::TimestampMicros(value),
            ConvertedType::DECIMAL => Field::Decimal(Decimal::from_i64(
                value,
                descr.type_precision(),
                descr.type_scale(),
            )),
            _ => Field::Long(value),
        }
    }

    /// Converts an INT96 value. The deprecated type is passed through raw.
    pub fn convert_int96(_descr: &ColumnDescriptor, value: Int96) -> Field {
        Field::Int96(value)
    }

    /// Converts a FLOAT value.
    pub fn convert_float(_descr: &ColumnDescriptor, value: f32) -> Field {
        Field::Float(value)
    }

    /// Converts a DOUBLE value.
    pub fn convert_double(_descr: &ColumnDescriptor, value: f64) -> Field {
        Field::Double(value)
    }

    /// Converts a BYTE_ARRAY or FIXED_LEN_BYTE_ARRAY value according to the
    /// column annotation.
    pub fn convert_byte_array(descr: &ColumnDescriptor, value: ByteArray) -> Result<Field> {
        let field = match descr.physical_type() {
            PhysicalType::BYTE_ARRAY => match descr.converted_type() {
                ConvertedType::UTF8 | ConvertedType::ENUM | ConvertedType::JSON => {
                    let value = String::from_utf8(value.data().to_vec())
                        .map_err(|e| corrupted_err!("Invalid UTF-8: {}", e))?;
                    Field::Str(value)
                }
                ConvertedType::DECIMAL => Field::Decimal(Decimal::from_bytes(
                    value.data(),
                    descr.type_precision(),
                    descr.type_scale(),
                )),
                _ => Field::Bytes(value),
            },
            PhysicalType::FIXED_LEN_BYTE_ARRAY => match descr.converted_type() {
                ConvertedType::DECIMAL => Field::Decimal(Decimal::from_bytes(
                    value.data(),
                    descr.type_precision(),
                    descr.type_scale(),
                )),
                _ => Field::Bytes(value),
            },
            other => {
                return Err(corrupted_err!(
                    "Unexpected physical type {} for byte array conversion",
                    other
                ));
            }
        };
        Ok(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Null => write!(f, "null"),
            Field::Bool(value) => write!(f, "{value}"),
            Field::Byte(value) => write!(f, "{value}"),
            Field::Short(value) => write!(f, "{value}"),
            Field::Int(value) => write!(f, "{value}"),
            Field::Long(value) => write!(f, "{value}"),
            Field::UByte(value) => write!(f, "{value}"),
            Field::UShort(value) => write!(f, "{value}"),
            Field::UInt(value) => write!(f, "{value}"),
            Field::ULong(value) => write!(f, "{value}"),
            Field::Float(value) => write!(f, "{value:e}"),
            Field::Double(value) => write!(f, "{value:e}"),
            Field::Str(value) => write!(f, "{value:?}"),
            Field::Bytes(value) => write!(f, "{:?}", value.data()),
            Field::Date(value) => write!(f, "{value}"),
            Field::TimeMillis(value) => write!(f, "{value}"),
            Field::TimeMicros(value) => write!(f, "{value}"),
            Field::TimeNanos(value) => write!(f, "{value}"),
            Field::TimestampMillis(value) => write!(f, "{value}"),
            Field::TimestampMicros(value) => write!(f, "{value}"),
            Field::TimestampNanos(value) => write!(f, "{value}"),
            Field::Decimal(value) => {
                write!(f, "{:?}e-{}", value.data(), value.scale())
            }
            Field::Int96(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Repetition;
    use crate::schema::types::{ColumnPath, Type as SchemaType};
    use std::sync::Arc;

    fn descr_with(
        physical: PhysicalType,
        converted: ConvertedType,
        precision: i32,
        scale: i32,
    ) -> ColumnDescriptor {
        let mut builder = SchemaType::primitive_type_builder("c", physical)
            .with_repetition(Repetition::REQUIRED)
            .with_converted_type(converted);
        if converted == ConvertedType::DECIMAL {
            builder = builder.with_precision(precision).with_scale(scale);
        }
        if physical == PhysicalType::FIXED_LEN_BYTE_ARRAY {
            builder = builder.with_length(16);
        }
        let tpe = builder.build().unwrap();
        ColumnDescriptor::new(Arc::new(tpe), 0, 0, ColumnPath::new(vec!["c".to_owned()]))
    }

    #[test]
    fn test_convert_int32_annotations() {
        let d = descr_with(PhysicalType::INT32, ConvertedType::INT_8, 0, 0);
        assert_eq!(Field::convert_int32(&d, -1), Field::Byte(-1));

        let d = descr_with(PhysicalType::INT32, ConvertedType::DATE, 0, 0);
        assert_eq!(Field::convert_int32(&d, 19000), Field::Date(19000));

        let d = descr_with(PhysicalType::INT32, ConvertedType::NONE, 0, 0);
        assert_eq!(Field::convert_int32(&d, 7), Field::Int(7));

        let d = descr_with(PhysicalType::INT32, ConvertedType::DECIMAL, 9, 2);
        assert_eq!(
            Field::convert_int32(&d, 1234),
            Field::Decimal(Decimal::from_i32(1234, 9, 2))
        );
    }

    #[test]
    fn test_convert_int64_annotations() {
        let d = descr_with(PhysicalType::INT64, ConvertedType::TIMESTAMP_MICROS, 0, 0);
        assert_eq!(
            Field::convert_int64(&d, 1_600_000_000_000_000),
            Field::TimestampMicros(1_600_000_000_000_000)
        );

        let d = descr_with(PhysicalType::INT64, ConvertedType::UINT_64, 0, 0);
        assert_eq!(Field::convert_int64(&d, -1), Field::ULong(u64::MAX));
    }

    #[test]
    fn test_convert_byte_array_utf8() {
        let d = descr_with(PhysicalType::BYTE_ARRAY, ConvertedType::UTF8, 0, 0);
        let field = Field::convert_byte_array(&d, ByteArray::from("hello")).unwrap();
        assert_eq!(field, Field::Str("hello".to_owned()));

        let err =
            Field::convert_byte_array(&d, ByteArray::from(vec![0xff, 0xfe])).unwrap_err();
        assert!(err.to_string().contains("Invalid UTF-8"));
    }

    #[test]
    fn test_convert_byte_array_raw() {
        let d = descr_with(PhysicalType::BYTE_ARRAY, ConvertedType::NONE, 0, 0);
        let field = Field::convert_byte_array(&d, ByteArray::from(vec![1, 2])).unwrap();
        assert_eq!(field, Field::Bytes(ByteArray::from(vec![1, 2])));
    }
}
