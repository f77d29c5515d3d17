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

//! Rust structures for the subset of the `parquet.thrift` definition used by
//! this crate, in the shape emitted by the Thrift compiler.
//!
//! Fields that this crate neither reads nor writes (statistics, page indexes,
//! sorting columns, column orders, encryption metadata) are skipped during
//! decoding rather than modeled.

#![allow(clippy::derivable_impls, clippy::match_single_binding)]

use thrift::protocol::{
    field_id, verify_required_field_exists, TFieldIdentifier, TInputProtocol, TListIdentifier,
    TOutputProtocol, TStructIdentifier, TType,
};
use thrift::{ProtocolError, ProtocolErrorKind};

use crate::thrift::TSerializable;

//
// Type
//

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Type(pub i32);

impl Type {
    pub const BOOLEAN: Type = Type(0);
    pub const INT32: Type = Type(1);
    pub const INT64: Type = Type(2);
    pub const INT96: Type = Type(3);
    pub const FLOAT: Type = Type(4);
    pub const DOUBLE: Type = Type(5);
    pub const BYTE_ARRAY: Type = Type(6);
    pub const FIXED_LEN_BYTE_ARRAY: Type = Type(7);
}

impl TSerializable for Type {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<Type> {
        let enum_value = i_prot.read_i32()?;
        Ok(Type::from(enum_value))
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        o_prot.write_i32(self.0)
    }
}

impl From<i32> for Type {
    fn from(i: i32) -> Self {
        Type(i)
    }
}

//
// ConvertedType
//

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConvertedType(pub i32);

impl ConvertedType {
    pub const UTF8: ConvertedType = ConvertedType(0);
    pub const MAP: ConvertedType = ConvertedType(1);
    pub const MAP_KEY_VALUE: ConvertedType = ConvertedType(2);
    pub const LIST: ConvertedType = ConvertedType(3);
    pub const ENUM: ConvertedType = ConvertedType(4);
    pub const DECIMAL: ConvertedType = ConvertedType(5);
    pub const DATE: ConvertedType = ConvertedType(6);
    pub const TIME_MILLIS: ConvertedType = ConvertedType(7);
    pub const TIME_MICROS: ConvertedType = ConvertedType(8);
    pub const TIMESTAMP_MILLIS: ConvertedType = ConvertedType(9);
    pub const TIMESTAMP_MICROS: ConvertedType = ConvertedType(10);
    pub const UINT_8: ConvertedType = ConvertedType(11);
    pub const UINT_16: ConvertedType = ConvertedType(12);
    pub const UINT_32: ConvertedType = ConvertedType(13);
    pub const UINT_64: ConvertedType = ConvertedType(14);
    pub const INT_8: ConvertedType = ConvertedType(15);
    pub const INT_16: ConvertedType = ConvertedType(16);
    pub const INT_32: ConvertedType = ConvertedType(17);
    pub const INT_64: ConvertedType = ConvertedType(18);
    pub const JSON: ConvertedType = ConvertedType(19);
    pub const BSON: ConvertedType = ConvertedType(20);
    pub const INTERVAL: ConvertedType = ConvertedType(21);
}

impl TSerializable for ConvertedType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<ConvertedType> {
        let enum_value = i_prot.read_i32()?;
        Ok(ConvertedType::from(enum_value))
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        o_prot.write_i32(self.0)
    }
}

impl From<i32> for ConvertedType {
    fn from(i: i32) -> Self {
        ConvertedType(i)
    }
}

//
// FieldRepetitionType
//

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FieldRepetitionType(pub i32);

impl FieldRepetitionType {
    pub const REQUIRED: FieldRepetitionType = FieldRepetitionType(0);
    pub const OPTIONAL: FieldRepetitionType = FieldRepetitionType(1);
    pub const REPEATED: FieldRepetitionType = FieldRepetitionType(2);
}

impl TSerializable for FieldRepetitionType {
    fn read_from_in_protocol<T: TInputProtocol>(
        i_prot: &mut T,
    ) -> thrift::Result<FieldRepetitionType> {
        let enum_value = i_prot.read_i32()?;
        Ok(FieldRepetitionType::from(enum_value))
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        o_prot.write_i32(self.0)
    }
}

impl From<i32> for FieldRepetitionType {
    fn from(i: i32) -> Self {
        FieldRepetitionType(i)
    }
}

//
// Encoding
//

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Encoding(pub i32);

impl Encoding {
    pub const PLAIN: Encoding = Encoding(0);
    pub const PLAIN_DICTIONARY: Encoding = Encoding(2);
    pub const RLE: Encoding = Encoding(3);
    pub const BIT_PACKED: Encoding = Encoding(4);
    pub const DELTA_BINARY_PACKED: Encoding = Encoding(5);
    pub const DELTA_LENGTH_BYTE_ARRAY: Encoding = Encoding(6);
    pub const DELTA_BYTE_ARRAY: Encoding = Encoding(7);
    pub const RLE_DICTIONARY: Encoding = Encoding(8);
    pub const BYTE_STREAM_SPLIT: Encoding = Encoding(9);
}

impl TSerializable for Encoding {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<Encoding> {
        let enum_value = i_prot.read_i32()?;
        Ok(Encoding::from(enum_value))
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        o_prot.write_i32(self.0)
    }
}

impl From<i32> for Encoding {
    fn from(i: i32) -> Self {
        Encoding(i)
    }
}

//
// CompressionCodec
//

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CompressionCodec(pub i32);

impl CompressionCodec {
    pub const UNCOMPRESSED: CompressionCodec = CompressionCodec(0);
    pub const SNAPPY: CompressionCodec = CompressionCodec(1);
    pub const GZIP: CompressionCodec = CompressionCodec(2);
    pub const LZO: CompressionCodec = CompressionCodec(3);
    pub const BROTLI: CompressionCodec = CompressionCodec(4);
    pub const LZ4: CompressionCodec = CompressionCodec(5);
    pub const ZSTD: CompressionCodec = CompressionCodec(6);
    pub const LZ4_RAW: CompressionCodec = CompressionCodec(7);
}

impl TSerializable for CompressionCodec {
    fn read_from_in_protocol<T: TInputProtocol>(
        i_prot: &mut T,
    ) -> thrift::Result<CompressionCodec> {
        let enum_value = i_prot.read_i32()?;
        Ok(CompressionCodec::from(enum_value))
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        o_prot.write_i32(self.0)
    }
}

impl From<i32> for CompressionCodec {
    fn from(i: i32) -> Self {
        CompressionCodec(i)
    }
}

//
// PageType
//

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageType(pub i32);

impl PageType {
    pub const DATA_PAGE: PageType = PageType(0);
    pub const INDEX_PAGE: PageType = PageType(1);
    pub const DICTIONARY_PAGE: PageType = PageType(2);
    pub const DATA_PAGE_V2: PageType = PageType(3);
}

impl TSerializable for PageType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<PageType> {
        let enum_value = i_prot.read_i32()?;
        Ok(PageType::from(enum_value))
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        o_prot.write_i32(self.0)
    }
}

impl From<i32> for PageType {
    fn from(i: i32) -> Self {
        PageType(i)
    }
}

// Reads a struct that carries no fields this crate cares about, skipping
// everything until the stop field.
fn read_empty_struct<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<()> {
    i_prot.read_struct_begin()?;
    loop {
        let field_ident = i_prot.read_field_begin()?;
        if field_ident.field_type == TType::Stop {
            break;
        }
        i_prot.skip(field_ident.field_type)?;
        i_prot.read_field_end()?;
    }
    i_prot.read_struct_end()
}

fn write_empty_struct<T: TOutputProtocol>(name: &str, o_prot: &mut T) -> thrift::Result<()> {
    let struct_ident = TStructIdentifier::new(name);
    o_prot.write_struct_begin(&struct_ident)?;
    o_prot.write_field_stop()?;
    o_prot.write_struct_end()
}

macro_rules! empty_thrift_struct {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name {}

        impl TSerializable for $name {
            fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<$name> {
                read_empty_struct(i_prot)?;
                Ok($name {})
            }
            fn write_to_out_protocol<T: TOutputProtocol>(
                &self,
                o_prot: &mut T,
            ) -> thrift::Result<()> {
                write_empty_struct(stringify!($name), o_prot)
            }
        }
    };
}

empty_thrift_struct!(
    /// Empty struct to signal the order defined by the physical or logical type
    StringType
);
empty_thrift_struct!(UUIDType);
empty_thrift_struct!(MapType);
empty_thrift_struct!(ListType);
empty_thrift_struct!(EnumType);
empty_thrift_struct!(DateType);
empty_thrift_struct!(NullType);
empty_thrift_struct!(JsonType);
empty_thrift_struct!(BsonType);
empty_thrift_struct!(MilliSeconds);
empty_thrift_struct!(MicroSeconds);
empty_thrift_struct!(NanoSeconds);

//
// DecimalType
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DecimalType {
    pub scale: i32,
    pub precision: i32,
}

impl TSerializable for DecimalType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<DecimalType> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<i32> = None;
        let mut f_2: Option<i32> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_i32()?);
                }
                2 => {
                    f_2 = Some(i_prot.read_i32()?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("DecimalType.scale", &f_1)?;
        verify_required_field_exists("DecimalType.precision", &f_2)?;
        Ok(DecimalType {
            scale: f_1.expect("auto-generated code should have checked for presence of required fields"),
            precision: f_2.expect("auto-generated code should have checked for presence of required fields"),
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("DecimalType");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("scale", TType::I32, 1))?;
        o_prot.write_i32(self.scale)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("precision", TType::I32, 2))?;
        o_prot.write_i32(self.precision)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// TimeUnit
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TimeUnit {
    MILLIS(MilliSeconds),
    MICROS(MicroSeconds),
    NANOS(NanoSeconds),
}

impl TSerializable for TimeUnit {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<TimeUnit> {
        let mut ret: Option<TimeUnit> = None;
        let mut received_field_count = 0;
        i_prot.read_struct_begin()?;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    let val = MilliSeconds::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(TimeUnit::MILLIS(val));
                    }
                    received_field_count += 1;
                }
                2 => {
                    let val = MicroSeconds::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(TimeUnit::MICROS(val));
                    }
                    received_field_count += 1;
                }
                3 => {
                    let val = NanoSeconds::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(TimeUnit::NANOS(val));
                    }
                    received_field_count += 1;
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                    received_field_count += 1;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        if received_field_count == 0 {
            Err(thrift::Error::Protocol(ProtocolError::new(
                ProtocolErrorKind::InvalidData,
                "received empty union from remote TimeUnit",
            )))
        } else if received_field_count > 1 {
            Err(thrift::Error::Protocol(ProtocolError::new(
                ProtocolErrorKind::InvalidData,
                "received multiple fields for union from remote TimeUnit",
            )))
        } else {
            ret.ok_or_else(|| {
                thrift::Error::Protocol(ProtocolError::new(
                    ProtocolErrorKind::InvalidData,
                    "return value should have been constructed",
                ))
            })
        }
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("TimeUnit");
        o_prot.write_struct_begin(&struct_ident)?;
        match *self {
            TimeUnit::MILLIS(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("MILLIS", TType::Struct, 1))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            TimeUnit::MICROS(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("MICROS", TType::Struct, 2))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            TimeUnit::NANOS(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("NANOS", TType::Struct, 3))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// TimestampType
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampType {
    pub is_adjusted_to_u_t_c: bool,
    pub unit: TimeUnit,
}

impl TSerializable for TimestampType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<TimestampType> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<bool> = None;
        let mut f_2: Option<TimeUnit> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_bool()?);
                }
                2 => {
                    f_2 = Some(TimeUnit::read_from_in_protocol(i_prot)?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("TimestampType.is_adjusted_to_u_t_c", &f_1)?;
        verify_required_field_exists("TimestampType.unit", &f_2)?;
        Ok(TimestampType {
            is_adjusted_to_u_t_c: f_1.expect("auto-generated code should have checked for presence of required fields"),
            unit: f_2.expect("auto-generated code should have checked for presence of required fields"),
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("TimestampType");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("isAdjustedToUTC", TType::Bool, 1))?;
        o_prot.write_bool(self.is_adjusted_to_u_t_c)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("unit", TType::Struct, 2))?;
        self.unit.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// TimeType
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeType {
    pub is_adjusted_to_u_t_c: bool,
    pub unit: TimeUnit,
}

impl TSerializable for TimeType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<TimeType> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<bool> = None;
        let mut f_2: Option<TimeUnit> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_bool()?);
                }
                2 => {
                    f_2 = Some(TimeUnit::read_from_in_protocol(i_prot)?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("TimeType.is_adjusted_to_u_t_c", &f_1)?;
        verify_required_field_exists("TimeType.unit", &f_2)?;
        Ok(TimeType {
            is_adjusted_to_u_t_c: f_1.expect("auto-generated code should have checked for presence of required fields"),
            unit: f_2.expect("auto-generated code should have checked for presence of required fields"),
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("TimeType");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("isAdjustedToUTC", TType::Bool, 1))?;
        o_prot.write_bool(self.is_adjusted_to_u_t_c)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("unit", TType::Struct, 2))?;
        self.unit.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// IntType
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IntType {
    pub bit_width: i8,
    pub is_signed: bool,
}

impl TSerializable for IntType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<IntType> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<i8> = None;
        let mut f_2: Option<bool> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_i8()?);
                }
                2 => {
                    f_2 = Some(i_prot.read_bool()?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("IntType.bit_width", &f_1)?;
        verify_required_field_exists("IntType.is_signed", &f_2)?;
        Ok(IntType {
            bit_width: f_1.expect("auto-generated code should have checked for presence of required fields"),
            is_signed: f_2.expect("auto-generated code should have checked for presence of required fields"),
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("IntType");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("bitWidth", TType::I08, 1))?;
        o_prot.write_i8(self.bit_width)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("isSigned", TType::Bool, 2))?;
        o_prot.write_bool(self.is_signed)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// LogicalType
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LogicalType {
    STRING(StringType),
    MAP(MapType),
    LIST(ListType),
    ENUM(EnumType),
    DECIMAL(DecimalType),
    DATE(DateType),
    TIME(TimeType),
    TIMESTAMP(TimestampType),
    INTEGER(IntType),
    UNKNOWN(NullType),
    JSON(JsonType),
    BSON(BsonType),
    UUID(UUIDType),
}

impl TSerializable for LogicalType {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<LogicalType> {
        let mut ret: Option<LogicalType> = None;
        let mut received_field_count = 0;
        i_prot.read_struct_begin()?;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    let val = StringType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::STRING(val));
                    }
                    received_field_count += 1;
                }
                2 => {
                    let val = MapType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::MAP(val));
                    }
                    received_field_count += 1;
                }
                3 => {
                    let val = ListType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::LIST(val));
                    }
                    received_field_count += 1;
                }
                4 => {
                    let val = EnumType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::ENUM(val));
                    }
                    received_field_count += 1;
                }
                5 => {
                    let val = DecimalType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::DECIMAL(val));
                    }
                    received_field_count += 1;
                }
                6 => {
                    let val = DateType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::DATE(val));
                    }
                    received_field_count += 1;
                }
                7 => {
                    let val = TimeType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::TIME(val));
                    }
                    received_field_count += 1;
                }
                8 => {
                    let val = TimestampType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::TIMESTAMP(val));
                    }
                    received_field_count += 1;
                }
                10 => {
                    let val = IntType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::INTEGER(val));
                    }
                    received_field_count += 1;
                }
                11 => {
                    let val = NullType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::UNKNOWN(val));
                    }
                    received_field_count += 1;
                }
                12 => {
                    let val = JsonType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::JSON(val));
                    }
                    received_field_count += 1;
                }
                13 => {
                    let val = BsonType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::BSON(val));
                    }
                    received_field_count += 1;
                }
                14 => {
                    let val = UUIDType::read_from_in_protocol(i_prot)?;
                    if ret.is_none() {
                        ret = Some(LogicalType::UUID(val));
                    }
                    received_field_count += 1;
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                    received_field_count += 1;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        if received_field_count == 0 {
            Err(thrift::Error::Protocol(ProtocolError::new(
                ProtocolErrorKind::InvalidData,
                "received empty union from remote LogicalType",
            )))
        } else if received_field_count > 1 {
            Err(thrift::Error::Protocol(ProtocolError::new(
                ProtocolErrorKind::InvalidData,
                "received multiple fields for union from remote LogicalType",
            )))
        } else {
            ret.ok_or_else(|| {
                thrift::Error::Protocol(ProtocolError::new(
                    ProtocolErrorKind::InvalidData,
                    "return value should have been constructed",
                ))
            })
        }
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("LogicalType");
        o_prot.write_struct_begin(&struct_ident)?;
        match *self {
            LogicalType::STRING(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("STRING", TType::Struct, 1))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::MAP(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("MAP", TType::Struct, 2))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::LIST(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("LIST", TType::Struct, 3))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::ENUM(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("ENUM", TType::Struct, 4))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::DECIMAL(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("DECIMAL", TType::Struct, 5))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::DATE(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("DATE", TType::Struct, 6))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::TIME(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("TIME", TType::Struct, 7))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::TIMESTAMP(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("TIMESTAMP", TType::Struct, 8))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::INTEGER(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("INTEGER", TType::Struct, 10))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::UNKNOWN(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("UNKNOWN", TType::Struct, 11))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::JSON(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("JSON", TType::Struct, 12))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::BSON(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("BSON", TType::Struct, 13))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
            LogicalType::UUID(ref f) => {
                o_prot.write_field_begin(&TFieldIdentifier::new("UUID", TType::Struct, 14))?;
                f.write_to_out_protocol(o_prot)?;
                o_prot.write_field_end()?;
            }
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// SchemaElement
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SchemaElement {
    pub type_: Option<Type>,
    pub type_length: Option<i32>,
    pub repetition_type: Option<FieldRepetitionType>,
    pub name: String,
    pub num_children: Option<i32>,
    pub converted_type: Option<ConvertedType>,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
    pub field_id: Option<i32>,
    pub logical_type: Option<LogicalType>,
}

impl TSerializable for SchemaElement {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<SchemaElement> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<Type> = None;
        let mut f_2: Option<i32> = None;
        let mut f_3: Option<FieldRepetitionType> = None;
        let mut f_4: Option<String> = None;
        let mut f_5: Option<i32> = None;
        let mut f_6: Option<ConvertedType> = None;
        let mut f_7: Option<i32> = None;
        let mut f_8: Option<i32> = None;
        let mut f_9: Option<i32> = None;
        let mut f_10: Option<LogicalType> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(Type::read_from_in_protocol(i_prot)?);
                }
                2 => {
                    f_2 = Some(i_prot.read_i32()?);
                }
                3 => {
                    f_3 = Some(FieldRepetitionType::read_from_in_protocol(i_prot)?);
                }
                4 => {
                    f_4 = Some(i_prot.read_string()?);
                }
                5 => {
                    f_5 = Some(i_prot.read_i32()?);
                }
                6 => {
                    f_6 = Some(ConvertedType::read_from_in_protocol(i_prot)?);
                }
                7 => {
                    f_7 = Some(i_prot.read_i32()?);
                }
                8 => {
                    f_8 = Some(i_prot.read_i32()?);
                }
                9 => {
                    f_9 = Some(i_prot.read_i32()?);
                }
                10 => {
                    f_10 = Some(LogicalType::read_from_in_protocol(i_prot)?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("SchemaElement.name", &f_4)?;
        Ok(SchemaElement {
            type_: f_1,
            type_length: f_2,
            repetition_type: f_3,
            name: f_4.expect("auto-generated code should have checked for presence of required fields"),
            num_children: f_5,
            converted_type: f_6,
            scale: f_7,
            precision: f_8,
            field_id: f_9,
            logical_type: f_10,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("SchemaElement");
        o_prot.write_struct_begin(&struct_ident)?;
        if let Some(ref fld_var) = self.type_ {
            o_prot.write_field_begin(&TFieldIdentifier::new("type", TType::I32, 1))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        if let Some(fld_var) = self.type_length {
            o_prot.write_field_begin(&TFieldIdentifier::new("type_length", TType::I32, 2))?;
            o_prot.write_i32(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.repetition_type {
            o_prot.write_field_begin(&TFieldIdentifier::new("repetition_type", TType::I32, 3))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("name", TType::String, 4))?;
        o_prot.write_string(&self.name)?;
        o_prot.write_field_end()?;
        if let Some(fld_var) = self.num_children {
            o_prot.write_field_begin(&TFieldIdentifier::new("num_children", TType::I32, 5))?;
            o_prot.write_i32(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.converted_type {
            o_prot.write_field_begin(&TFieldIdentifier::new("converted_type", TType::I32, 6))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        if let Some(fld_var) = self.scale {
            o_prot.write_field_begin(&TFieldIdentifier::new("scale", TType::I32, 7))?;
            o_prot.write_i32(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(fld_var) = self.precision {
            o_prot.write_field_begin(&TFieldIdentifier::new("precision", TType::I32, 8))?;
            o_prot.write_i32(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(fld_var) = self.field_id {
            o_prot.write_field_begin(&TFieldIdentifier::new("field_id", TType::I32, 9))?;
            o_prot.write_i32(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.logical_type {
            o_prot.write_field_begin(&TFieldIdentifier::new("logicalType", TType::Struct, 10))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// KeyValue
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct KeyValue {
    pub key: String,
    pub value: Option<String>,
}

impl TSerializable for KeyValue {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<KeyValue> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<String> = None;
        let mut f_2: Option<String> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_string()?);
                }
                2 => {
                    f_2 = Some(i_prot.read_string()?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("KeyValue.key", &f_1)?;
        Ok(KeyValue {
            key: f_1.expect("auto-generated code should have checked for presence of required fields"),
            value: f_2,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("KeyValue");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("key", TType::String, 1))?;
        o_prot.write_string(&self.key)?;
        o_prot.write_field_end()?;
        if let Some(ref fld_var) = self.value {
            o_prot.write_field_begin(&TFieldIdentifier::new("value", TType::String, 2))?;
            o_prot.write_string(fld_var)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// DataPageHeader
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DataPageHeader {
    pub num_values: i32,
    pub encoding: Encoding,
    pub definition_level_encoding: Encoding,
    pub repetition_level_encoding: Encoding,
}

impl TSerializable for DataPageHeader {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<DataPageHeader> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<i32> = None;
        let mut f_2: Option<Encoding> = None;
        let mut f_3: Option<Encoding> = None;
        let mut f_4: Option<Encoding> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_i32()?);
                }
                2 => {
                    f_2 = Some(Encoding::read_from_in_protocol(i_prot)?);
                }
                3 => {
                    f_3 = Some(Encoding::read_from_in_protocol(i_prot)?);
                }
                4 => {
                    f_4 = Some(Encoding::read_from_in_protocol(i_prot)?);
                }
                _ => {
                    // statistics (5) are not modeled
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("DataPageHeader.num_values", &f_1)?;
        verify_required_field_exists("DataPageHeader.encoding", &f_2)?;
        verify_required_field_exists("DataPageHeader.definition_level_encoding", &f_3)?;
        verify_required_field_exists("DataPageHeader.repetition_level_encoding", &f_4)?;
        Ok(DataPageHeader {
            num_values: f_1.expect("auto-generated code should have checked for presence of required fields"),
            encoding: f_2.expect("auto-generated code should have checked for presence of required fields"),
            definition_level_encoding: f_3.expect("auto-generated code should have checked for presence of required fields"),
            repetition_level_encoding: f_4.expect("auto-generated code should have checked for presence of required fields"),
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("DataPageHeader");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_values", TType::I32, 1))?;
        o_prot.write_i32(self.num_values)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("encoding", TType::I32, 2))?;
        self.encoding.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "definition_level_encoding",
            TType::I32,
            3,
        ))?;
        self.definition_level_encoding.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "repetition_level_encoding",
            TType::I32,
            4,
        ))?;
        self.repetition_level_encoding.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

empty_thrift_struct!(IndexPageHeader);

//
// DictionaryPageHeader
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DictionaryPageHeader {
    pub num_values: i32,
    pub encoding: Encoding,
    pub is_sorted: Option<bool>,
}

impl TSerializable for DictionaryPageHeader {
    fn read_from_in_protocol<T: TInputProtocol>(
        i_prot: &mut T,
    ) -> thrift::Result<DictionaryPageHeader> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<i32> = None;
        let mut f_2: Option<Encoding> = None;
        let mut f_3: Option<bool> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_i32()?);
                }
                2 => {
                    f_2 = Some(Encoding::read_from_in_protocol(i_prot)?);
                }
                3 => {
                    f_3 = Some(i_prot.read_bool()?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("DictionaryPageHeader.num_values", &f_1)?;
        verify_required_field_exists("DictionaryPageHeader.encoding", &f_2)?;
        Ok(DictionaryPageHeader {
            num_values: f_1.expect("auto-generated code should have checked for presence of required fields"),
            encoding: f_2.expect("auto-generated code should have checked for presence of required fields"),
            is_sorted: f_3,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("DictionaryPageHeader");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_values", TType::I32, 1))?;
        o_prot.write_i32(self.num_values)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("encoding", TType::I32, 2))?;
        self.encoding.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        if let Some(fld_var) = self.is_sorted {
            o_prot.write_field_begin(&TFieldIdentifier::new("is_sorted", TType::Bool, 3))?;
            o_prot.write_bool(fld_var)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// DataPageHeaderV2
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DataPageHeaderV2 {
    pub num_values: i32,
    pub num_nulls: i32,
    pub num_rows: i32,
    pub encoding: Encoding,
    pub definition_levels_byte_length: i32,
    pub repetition_levels_byte_length: i32,
    pub is_compressed: Option<bool>,
}

impl TSerializable for DataPageHeaderV2 {
    fn read_from_in_protocol<T: TInputProtocol>(
        i_prot: &mut T,
    ) -> thrift::Result<DataPageHeaderV2> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<i32> = None;
        let mut f_2: Option<i32> = None;
        let mut f_3: Option<i32> = None;
        let mut f_4: Option<Encoding> = None;
        let mut f_5: Option<i32> = None;
        let mut f_6: Option<i32> = None;
        let mut f_7: Option<bool> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_i32()?);
                }
                2 => {
                    f_2 = Some(i_prot.read_i32()?);
                }
                3 => {
                    f_3 = Some(i_prot.read_i32()?);
                }
                4 => {
                    f_4 = Some(Encoding::read_from_in_protocol(i_prot)?);
                }
                5 => {
                    f_5 = Some(i_prot.read_i32()?);
                }
                6 => {
                    f_6 = Some(i_prot.read_i32()?);
                }
                7 => {
                    f_7 = Some(i_prot.read_bool()?);
                }
                _ => {
                    // statistics (8) are not modeled
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("DataPageHeaderV2.num_values", &f_1)?;
        verify_required_field_exists("DataPageHeaderV2.num_nulls", &f_2)?;
        verify_required_field_exists("DataPageHeaderV2.num_rows", &f_3)?;
        verify_required_field_exists("DataPageHeaderV2.encoding", &f_4)?;
        verify_required_field_exists("DataPageHeaderV2.definition_levels_byte_length", &f_5)?;
        verify_required_field_exists("DataPageHeaderV2.repetition_levels_byte_length", &f_6)?;
        Ok(DataPageHeaderV2 {
            num_values: f_1.expect("auto-generated code should have checked for presence of required fields"),
            num_nulls: f_2.expect("auto-generated code should have checked for presence of required fields"),
            num_rows: f_3.expect("auto-generated code should have checked for presence of required fields"),
            encoding: f_4.expect("auto-generated code should have checked for presence of required fields"),
            definition_levels_byte_length: f_5.expect("auto-generated code should have checked for presence of required fields"),
            repetition_levels_byte_length: f_6.expect("auto-generated code should have checked for presence of required fields"),
            is_compressed: f_7,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("DataPageHeaderV2");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_values", TType::I32, 1))?;
        o_prot.write_i32(self.num_values)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_nulls", TType::I32, 2))?;
        o_prot.write_i32(self.num_nulls)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_rows", TType::I32, 3))?;
        o_prot.write_i32(self.num_rows)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("encoding", TType::I32, 4))?;
        self.encoding.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "definition_levels_byte_length",
            TType::I32,
            5,
        ))?;
        o_prot.write_i32(self.definition_levels_byte_length)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "repetition_levels_byte_length",
            TType::I32,
            6,
        ))?;
        o_prot.write_i32(self.repetition_levels_byte_length)?;
        o_prot.write_field_end()?;
        if let Some(fld_var) = self.is_compressed {
            o_prot.write_field_begin(&TFieldIdentifier::new("is_compressed", TType::Bool, 7))?;
            o_prot.write_bool(fld_var)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// PageHeader
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageHeader {
    pub type_: PageType,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub crc: Option<i32>,
    pub data_page_header: Option<DataPageHeader>,
    pub index_page_header: Option<IndexPageHeader>,
    pub dictionary_page_header: Option<DictionaryPageHeader>,
    pub data_page_header_v2: Option<DataPageHeaderV2>,
}

impl TSerializable for PageHeader {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<PageHeader> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<PageType> = None;
        let mut f_2: Option<i32> = None;
        let mut f_3: Option<i32> = None;
        let mut f_4: Option<i32> = None;
        let mut f_5: Option<DataPageHeader> = None;
        let mut f_6: Option<IndexPageHeader> = None;
        let mut f_7: Option<DictionaryPageHeader> = None;
        let mut f_8: Option<DataPageHeaderV2> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(PageType::read_from_in_protocol(i_prot)?);
                }
                2 => {
                    f_2 = Some(i_prot.read_i32()?);
                }
                3 => {
                    f_3 = Some(i_prot.read_i32()?);
                }
                4 => {
                    f_4 = Some(i_prot.read_i32()?);
                }
                5 => {
                    f_5 = Some(DataPageHeader::read_from_in_protocol(i_prot)?);
                }
                6 => {
                    f_6 = Some(IndexPageHeader::read_from_in_protocol(i_prot)?);
                }
                7 => {
                    f_7 = Some(DictionaryPageHeader::read_from_in_protocol(i_prot)?);
                }
                8 => {
                    f_8 = Some(DataPageHeaderV2::read_from_in_protocol(i_prot)?);
                }
                _ => {
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("PageHeader.type_", &f_1)?;
        verify_required_field_exists("PageHeader.uncompressed_page_size", &f_2)?;
        verify_required_field_exists("PageHeader.compressed_page_size", &f_3)?;
        Ok(PageHeader {
            type_: f_1.expect("auto-generated code should have checked for presence of required fields"),
            uncompressed_page_size: f_2.expect("auto-generated code should have checked for presence of required fields"),
            compressed_page_size: f_3.expect("auto-generated code should have checked for presence of required fields"),
            crc: f_4,
            data_page_header: f_5,
            index_page_header: f_6,
            dictionary_page_header: f_7,
            data_page_header_v2: f_8,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("PageHeader");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("type", TType::I32, 1))?;
        self.type_.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "uncompressed_page_size",
            TType::I32,
            2,
        ))?;
        o_prot.write_i32(self.uncompressed_page_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("compressed_page_size", TType::I32, 3))?;
        o_prot.write_i32(self.compressed_page_size)?;
        o_prot.write_field_end()?;
        if let Some(fld_var) = self.crc {
            o_prot.write_field_begin(&TFieldIdentifier::new("crc", TType::I32, 4))?;
            o_prot.write_i32(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.data_page_header {
            o_prot.write_field_begin(&TFieldIdentifier::new("data_page_header", TType::Struct, 5))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.index_page_header {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "index_page_header",
                TType::Struct,
                6,
            ))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.dictionary_page_header {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "dictionary_page_header",
                TType::Struct,
                7,
            ))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.data_page_header_v2 {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "data_page_header_v2",
                TType::Struct,
                8,
            ))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// ColumnMetaData
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ColumnMetaData {
    pub type_: Type,
    pub encodings: Vec<Encoding>,
    pub path_in_schema: Vec<String>,
    pub codec: CompressionCodec,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    pub data_page_offset: i64,
    pub index_page_offset: Option<i64>,
    pub dictionary_page_offset: Option<i64>,
}

impl TSerializable for ColumnMetaData {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<ColumnMetaData> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<Type> = None;
        let mut f_2: Option<Vec<Encoding>> = None;
        let mut f_3: Option<Vec<String>> = None;
        let mut f_4: Option<CompressionCodec> = None;
        let mut f_5: Option<i64> = None;
        let mut f_6: Option<i64> = None;
        let mut f_7: Option<i64> = None;
        let mut f_8: Option<Vec<KeyValue>> = None;
        let mut f_9: Option<i64> = None;
        let mut f_10: Option<i64> = None;
        let mut f_11: Option<i64> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(Type::read_from_in_protocol(i_prot)?);
                }
                2 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<Encoding> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(Encoding::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    f_2 = Some(val);
                }
                3 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<String> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(i_prot.read_string()?);
                    }
                    i_prot.read_list_end()?;
                    f_3 = Some(val);
                }
                4 => {
                    f_4 = Some(CompressionCodec::read_from_in_protocol(i_prot)?);
                }
                5 => {
                    f_5 = Some(i_prot.read_i64()?);
                }
                6 => {
                    f_6 = Some(i_prot.read_i64()?);
                }
                7 => {
                    f_7 = Some(i_prot.read_i64()?);
                }
                8 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<KeyValue> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(KeyValue::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    f_8 = Some(val);
                }
                9 => {
                    f_9 = Some(i_prot.read_i64()?);
                }
                10 => {
                    f_10 = Some(i_prot.read_i64()?);
                }
                11 => {
                    f_11 = Some(i_prot.read_i64()?);
                }
                _ => {
                    // statistics and page encoding stats are not modeled
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("ColumnMetaData.type_", &f_1)?;
        verify_required_field_exists("ColumnMetaData.encodings", &f_2)?;
        verify_required_field_exists("ColumnMetaData.path_in_schema", &f_3)?;
        verify_required_field_exists("ColumnMetaData.codec", &f_4)?;
        verify_required_field_exists("ColumnMetaData.num_values", &f_5)?;
        verify_required_field_exists("ColumnMetaData.total_uncompressed_size", &f_6)?;
        verify_required_field_exists("ColumnMetaData.total_compressed_size", &f_7)?;
        verify_required_field_exists("ColumnMetaData.data_page_offset", &f_9)?;
        Ok(ColumnMetaData {
            type_: f_1.expect("auto-generated code should have checked for presence of required fields"),
            encodings: f_2.expect("auto-generated code should have checked for presence of required fields"),
            path_in_schema: f_3.expect("auto-generated code should have checked for presence of required fields"),
            codec: f_4.expect("auto-generated code should have checked for presence of required fields"),
            num_values: f_5.expect("auto-generated code should have checked for presence of required fields"),
            total_uncompressed_size: f_6.expect("auto-generated code should have checked for presence of required fields"),
            total_compressed_size: f_7.expect("auto-generated code should have checked for presence of required fields"),
            key_value_metadata: f_8,
            data_page_offset: f_9.expect("auto-generated code should have checked for presence of required fields"),
            index_page_offset: f_10,
            dictionary_page_offset: f_11,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("ColumnMetaData");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("type", TType::I32, 1))?;
        self.type_.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("encodings", TType::List, 2))?;
        o_prot.write_list_begin(&TListIdentifier::new(TType::I32, self.encodings.len() as i32))?;
        for e in &self.encodings {
            e.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("path_in_schema", TType::List, 3))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::String,
            self.path_in_schema.len() as i32,
        ))?;
        for e in &self.path_in_schema {
            o_prot.write_string(e)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("codec", TType::I32, 4))?;
        self.codec.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_values", TType::I64, 5))?;
        o_prot.write_i64(self.num_values)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "total_uncompressed_size",
            TType::I64,
            6,
        ))?;
        o_prot.write_i64(self.total_uncompressed_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "total_compressed_size",
            TType::I64,
            7,
        ))?;
        o_prot.write_i64(self.total_compressed_size)?;
        o_prot.write_field_end()?;
        if let Some(ref fld_var) = self.key_value_metadata {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "key_value_metadata",
                TType::List,
                8,
            ))?;
            o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, fld_var.len() as i32))?;
            for e in fld_var {
                e.write_to_out_protocol(o_prot)?;
            }
            o_prot.write_list_end()?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("data_page_offset", TType::I64, 9))?;
        o_prot.write_i64(self.data_page_offset)?;
        o_prot.write_field_end()?;
        if let Some(fld_var) = self.index_page_offset {
            o_prot.write_field_begin(&TFieldIdentifier::new("index_page_offset", TType::I64, 10))?;
            o_prot.write_i64(fld_var)?;
            o_prot.write_field_end()?;
        }
        if let Some(fld_var) = self.dictionary_page_offset {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "dictionary_page_offset",
                TType::I64,
                11,
            ))?;
            o_prot.write_i64(fld_var)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// ColumnChunk
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ColumnChunk {
    pub file_path: Option<String>,
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}

impl TSerializable for ColumnChunk {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<ColumnChunk> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<String> = None;
        let mut f_2: Option<i64> = None;
        let mut f_3: Option<ColumnMetaData> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_string()?);
                }
                2 => {
                    f_2 = Some(i_prot.read_i64()?);
                }
                3 => {
                    f_3 = Some(ColumnMetaData::read_from_in_protocol(i_prot)?);
                }
                _ => {
                    // index offsets and crypto metadata are not modeled
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("ColumnChunk.file_offset", &f_2)?;
        Ok(ColumnChunk {
            file_path: f_1,
            file_offset: f_2.expect("auto-generated code should have checked for presence of required fields"),
            meta_data: f_3,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("ColumnChunk");
        o_prot.write_struct_begin(&struct_ident)?;
        if let Some(ref fld_var) = self.file_path {
            o_prot.write_field_begin(&TFieldIdentifier::new("file_path", TType::String, 1))?;
            o_prot.write_string(fld_var)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("file_offset", TType::I64, 2))?;
        o_prot.write_i64(self.file_offset)?;
        o_prot.write_field_end()?;
        if let Some(ref fld_var) = self.meta_data {
            o_prot.write_field_begin(&TFieldIdentifier::new("meta_data", TType::Struct, 3))?;
            fld_var.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// RowGroup
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RowGroup {
    pub columns: Vec<ColumnChunk>,
    pub total_byte_size: i64,
    pub num_rows: i64,
}

impl TSerializable for RowGroup {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<RowGroup> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<Vec<ColumnChunk>> = None;
        let mut f_2: Option<i64> = None;
        let mut f_3: Option<i64> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<ColumnChunk> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(ColumnChunk::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    f_1 = Some(val);
                }
                2 => {
                    f_2 = Some(i_prot.read_i64()?);
                }
                3 => {
                    f_3 = Some(i_prot.read_i64()?);
                }
                _ => {
                    // sorting columns, file offset and ordinal are not modeled
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("RowGroup.columns", &f_1)?;
        verify_required_field_exists("RowGroup.total_byte_size", &f_2)?;
        verify_required_field_exists("RowGroup.num_rows", &f_3)?;
        Ok(RowGroup {
            columns: f_1.expect("auto-generated code should have checked for presence of required fields"),
            total_byte_size: f_2.expect("auto-generated code should have checked for presence of required fields"),
            num_rows: f_3.expect("auto-generated code should have checked for presence of required fields"),
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("RowGroup");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("columns", TType::List, 1))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.columns.len() as i32,
        ))?;
        for e in &self.columns {
            e.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("total_byte_size", TType::I64, 2))?;
        o_prot.write_i64(self.total_byte_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_rows", TType::I64, 3))?;
        o_prot.write_i64(self.num_rows)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

//
// FileMetaData
//

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FileMetaData {
    pub version: i32,
    pub schema: Vec<SchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<RowGroup>,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    pub created_by: Option<String>,
}

impl TSerializable for FileMetaData {
    fn read_from_in_protocol<T: TInputProtocol>(i_prot: &mut T) -> thrift::Result<FileMetaData> {
        i_prot.read_struct_begin()?;
        let mut f_1: Option<i32> = None;
        let mut f_2: Option<Vec<SchemaElement>> = None;
        let mut f_3: Option<i64> = None;
        let mut f_4: Option<Vec<RowGroup>> = None;
        let mut f_5: Option<Vec<KeyValue>> = None;
        let mut f_6: Option<String> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            let field_id = field_id(&field_ident)?;
            match field_id {
                1 => {
                    f_1 = Some(i_prot.read_i32()?);
                }
                2 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<SchemaElement> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(SchemaElement::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    f_2 = Some(val);
                }
                3 => {
                    f_3 = Some(i_prot.read_i64()?);
                }
                4 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<RowGroup> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(RowGroup::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    f_4 = Some(val);
                }
                5 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val: Vec<KeyValue> = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(KeyValue::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    f_5 = Some(val);
                }
                6 => {
                    f_6 = Some(i_prot.read_string()?);
                }
                _ => {
                    // column orders and encryption metadata are not modeled
                    i_prot.skip(field_ident.field_type)?;
                }
            };
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("FileMetaData.version", &f_1)?;
        verify_required_field_exists("FileMetaData.schema", &f_2)?;
        verify_required_field_exists("FileMetaData.num_rows", &f_3)?;
        verify_required_field_exists("FileMetaData.row_groups", &f_4)?;
        Ok(FileMetaData {
            version: f_1.expect("auto-generated code should have checked for presence of required fields"),
            schema: f_2.expect("auto-generated code should have checked for presence of required fields"),
            num_rows: f_3.expect("auto-generated code should have checked for presence of required fields"),
            row_groups: f_4.expect("auto-generated code should have checked for presence of required fields"),
            key_value_metadata: f_5,
            created_by: f_6,
        })
    }
    fn write_to_out_protocol<T: TOutputProtocol>(&self, o_prot: &mut T) -> thrift::Result<()> {
        let struct_ident = TStructIdentifier::new("FileMetaData");
        o_prot.write_struct_begin(&struct_ident)?;
        o_prot.write_field_begin(&TFieldIdentifier::new("version", TType::I32, 1))?;
        o_prot.write_i32(self.version)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("schema", TType::List, 2))?;
        o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, self.schema.len() as i32))?;
        for e in &self.schema {
            e.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_rows", TType::I64, 3))?;
        o_prot.write_i64(self.num_rows)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("row_groups", TType::List, 4))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.row_groups.len() as i32,
        ))?;
        for e in &self.row_groups {
            e.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        if let Some(ref fld_var) = self.key_value_metadata {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "key_value_metadata",
                TType::List,
                5,
            ))?;
            o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, fld_var.len() as i32))?;
            for e in fld_var {
                e.write_to_out_protocol(o_prot)?;
            }
            o_prot.write_list_end()?;
            o_prot.write_field_end()?;
        }
        if let Some(ref fld_var) = self.created_by {
            o_prot.write_field_begin(&TFieldIdentifier::new("created_by", TType::String, 6))?;
            o_prot.write_string(fld_var)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thrift::{TCompactInputProtocol, TCompactOutputProtocol};

    fn roundtrip<S: TSerializable + PartialEq + std::fmt::Debug>(msg: &S) {
        let mut buffer = Vec::new();
        {
            let mut protocol = TCompactOutputProtocol::new(&mut buffer);
            msg.write_to_out_protocol(&mut protocol).unwrap();
        }
        let mut cursor = buffer.as_slice();
        let mut protocol = TCompactInputProtocol::new(&mut cursor);
        let decoded = S::read_from_in_protocol(&mut protocol).unwrap();
        assert_eq!(&decoded, msg);
    }

    #[test]
    fn test_page_header_roundtrip() {
        roundtrip(&PageHeader {
            type_: PageType::DATA_PAGE,
            uncompressed_page_size: 1234,
            compressed_page_size: 456,
            crc: None,
            data_page_header: Some(DataPageHeader {
                num_values: 6,
                encoding: Encoding::RLE_DICTIONARY,
                definition_level_encoding: Encoding::RLE,
                repetition_level_encoding: Encoding::RLE,
            }),
            index_page_header: None,
            dictionary_page_header: None,
            data_page_header_v2: None,
        });
    }

    #[test]
    fn test_schema_element_roundtrip() {
        roundtrip(&SchemaElement {
            type_: Some(Type::BYTE_ARRAY),
            type_length: None,
            repetition_type: Some(FieldRepetitionType::OPTIONAL),
            name: "key".to_owned(),
            num_children: None,
            converted_type: Some(ConvertedType::UTF8),
            scale: None,
            precision: None,
            field_id: None,
            logical_type: Some(LogicalType::STRING(StringType {})),
        });
    }

    #[test]
    fn test_file_metadata_roundtrip() {
        roundtrip(&FileMetaData {
            version: 1,
            schema: vec![SchemaElement {
                type_: None,
                type_length: None,
                repetition_type: None,
                name: "schema".to_owned(),
                num_children: Some(0),
                converted_type: None,
                scale: None,
                precision: None,
                field_id: None,
                logical_type: None,
            }],
            num_rows: 0,
            row_groups: vec![RowGroup {
                columns: vec![ColumnChunk {
                    file_path: None,
                    file_offset: 99,
                    meta_data: Some(ColumnMetaData {
                        type_: Type::INT32,
                        encodings: vec![Encoding::RLE, Encoding::PLAIN],
                        path_in_schema: vec!["a".to_owned()],
                        codec: CompressionCodec::SNAPPY,
                        num_values: 10,
                        total_uncompressed_size: 100,
                        total_compressed_size: 50,
                        key_value_metadata: None,
                        data_page_offset: 4,
                        index_page_offset: None,
                        dictionary_page_offset: Some(4),
                    }),
                }],
                total_byte_size: 123,
                num_rows: 10,
            }],
            key_value_metadata: None,
            created_by: Some("parquet-aio".to_owned()),
        });
    }

    #[test]
    fn test_unknown_fields_are_skipped() {
        // A KeyValue with an extra unknown i32 field id 5 appended
        let mut buffer = Vec::new();
        {
            let mut protocol = TCompactOutputProtocol::new(&mut buffer);
            protocol
                .write_struct_begin(&TStructIdentifier::new("KeyValue"))
                .unwrap();
            protocol
                .write_field_begin(&TFieldIdentifier::new("key", TType::String, 1))
                .unwrap();
            protocol.write_string("k").unwrap();
            protocol.write_field_end().unwrap();
            protocol
                .write_field_begin(&TFieldIdentifier::new("mystery", TType::I32, 5))
                .unwrap();
            protocol.write_i32(42).unwrap();
            protocol.write_field_end().unwrap();
            protocol.write_field_stop().unwrap();
            protocol.write_struct_end().unwrap();
        }
        let mut cursor = buffer.as_slice();
        let mut protocol = TCompactInputProtocol::new(&mut cursor);
        let decoded = KeyValue::read_from_in_protocol(&mut protocol).unwrap();
        assert_eq!(decoded.key, "k");
        assert_eq!(decoded.value, None);
    }
}
