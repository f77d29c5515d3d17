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

//! Data types that connect Parquet physical types with their Rust-specific
//! representations.

use std::fmt;
use std::mem;
use std::str::from_utf8;

use bytes::Bytes;

use crate::basic::Type;
use crate::column::reader::{ColumnReader, ColumnReaderImpl};
use crate::column::writer::{ColumnWriter, ColumnWriterImpl};
use crate::errors::{ParquetError, Result};

// Checks that the physical type of `T` is one of the listed types, returning a
// `Corrupted` error otherwise. Expects a generic parameter `T: DataType` in scope.
macro_rules! ensure_phys_ty {
    ($($ty:pat_param)|+ , $err:literal) => {
        match T::get_physical_type() {
            $($ty => (),)*
            _ => return Err(corrupted_err!($err)),
        };
    };
}

/// Rust representation for logical type INT96, value is backed by an array of `u32`.
/// The type only takes 12 bytes, without extra padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Int96 {
    value: [u32; 3],
}

impl Int96 {
    /// Creates new INT96 type struct with no data set.
    pub fn new() -> Self {
        Self { value: [0; 3] }
    }

    /// Returns underlying data as slice of [`u32`].
    pub fn data(&self) -> &[u32] {
        &self.value
    }

    /// Sets data for this INT96 type.
    pub fn set_data(&mut self, elem0: u32, elem1: u32, elem2: u32) {
        self.value = [elem0, elem1, elem2];
    }
}

impl fmt::Display for Int96 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.data())
    }
}

/// Rust representation for BYTE_ARRAY and FIXED_LEN_BYTE_ARRAY Parquet physical types.
/// Value is backed by a [`Bytes`] buffer, so clones and sub-slices are cheap and
/// dictionary hits share the dictionary page's storage.
#[derive(Clone, Default)]
pub struct ByteArray {
    data: Option<Bytes>,
}

impl ByteArray {
    /// Creates new byte array with no data set.
    pub fn new() -> Self {
        ByteArray { data: None }
    }

    /// Gets length of the underlying byte buffer.
    pub fn len(&self) -> usize {
        assert!(self.data.is_some());
        self.data.as_ref().unwrap().len()
    }

    /// Checks if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns slice of data.
    pub fn data(&self) -> &[u8] {
        self.data
            .as_ref()
            .expect("set_data should have been called")
            .as_ref()
    }

    /// Set data from another byte buffer.
    pub fn set_data(&mut self, data: Bytes) {
        self.data = Some(data);
    }

    /// Returns `ByteArray` instance with slice of values for a data.
    pub fn slice(&self, start: usize, len: usize) -> Self {
        Self::from(
            self.data
                .as_ref()
                .expect("set_data should have been called")
                .slice(start..start + len),
        )
    }

    /// Try to convert the byte array to a utf8 slice.
    pub fn as_utf8(&self) -> Result<&str> {
        self.data
            .as_ref()
            .map(|ptr| ptr.as_ref())
            .ok_or_else(|| corrupted_err!("Can't convert empty byte array to utf8"))
            .and_then(|bytes| from_utf8(bytes).map_err(|e| e.into()))
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(buf: Vec<u8>) -> ByteArray {
        Self {
            data: Some(buf.into()),
        }
    }
}

impl From<&str> for ByteArray {
    fn from(s: &str) -> ByteArray {
        let mut v = Vec::new();
        v.extend_from_slice(s.as_bytes());
        Self {
            data: Some(v.into()),
        }
    }
}

impl From<Bytes> for ByteArray {
    fn from(value: Bytes) -> Self {
        Self { data: Some(value) }
    }
}

impl PartialEq for ByteArray {
    fn eq(&self, other: &ByteArray) -> bool {
        match (&self.data, &other.data) {
            (Some(d1), Some(d2)) => d1.as_ref() == d2.as_ref(),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ByteArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.data {
            Some(d) => write!(f, "{d:?}"),
            None => write!(f, "ByteArray(unset)"),
        }
    }
}

impl fmt::Display for ByteArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.data())
    }
}

/// Wrapper type for performance reasons, this represents `FIXED_LEN_BYTE_ARRAY` but
/// in all other considerations behaves the same as `ByteArray`
///
/// # Notes
///
/// `FixedLenByteArray` does not implement `Deref<[u8]>` as it would conflict with
/// the existing `Deref<ByteArray>`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedLenByteArray(ByteArray);

impl fmt::Display for FixedLenByteArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::ops::Deref for FixedLenByteArray {
    type Target = ByteArray;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for FixedLenByteArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<ByteArray> for FixedLenByteArray {
    fn from(other: ByteArray) -> Self {
        Self(other)
    }
}

impl From<Vec<u8>> for FixedLenByteArray {
    fn from(buf: Vec<u8>) -> FixedLenByteArray {
        FixedLenByteArray(ByteArray::from(buf))
    }
}

impl From<FixedLenByteArray> for ByteArray {
    fn from(other: FixedLenByteArray) -> Self {
        other.0
    }
}

// ----------------------------------------------------------------------
// AsBytes converters for data types

/// Converts an instance of data type to a slice of bytes as `u8`.
pub trait AsBytes {
    /// Returns slice of bytes for this data type.
    fn as_bytes(&self) -> &[u8];
}

macro_rules! gen_as_bytes {
    ($source_ty:ident) => {
        impl AsBytes for $source_ty {
            #[allow(clippy::size_of_in_element_count)]
            fn as_bytes(&self) -> &[u8] {
                // SAFETY: macro is only used with primitive types that have no padding
                unsafe {
                    std::slice::from_raw_parts(
                        self as *const $source_ty as *const u8,
                        mem::size_of::<$source_ty>(),
                    )
                }
            }
        }
    };
}

gen_as_bytes!(i8);
gen_as_bytes!(i16);
gen_as_bytes!(i32);
gen_as_bytes!(i64);
gen_as_bytes!(u8);
gen_as_bytes!(u16);
gen_as_bytes!(u32);
gen_as_bytes!(u64);
gen_as_bytes!(f32);
gen_as_bytes!(f64);

impl AsBytes for bool {
    fn as_bytes(&self) -> &[u8] {
        // SAFETY: a bool is guaranteed to be a single initialized byte
        unsafe { std::slice::from_raw_parts(self as *const bool as *const u8, 1) }
    }
}

impl AsBytes for Int96 {
    fn as_bytes(&self) -> &[u8] {
        // SAFETY: [u32; 3] has no padding
        unsafe { std::slice::from_raw_parts(self.data().as_ptr() as *const u8, 12) }
    }
}

impl AsBytes for ByteArray {
    fn as_bytes(&self) -> &[u8] {
        self.data()
    }
}

impl AsBytes for FixedLenByteArray {
    fn as_bytes(&self) -> &[u8] {
        self.data()
    }
}

impl AsBytes for str {
    fn as_bytes(&self) -> &[u8] {
        (self as &str).as_bytes()
    }
}

impl AsBytes for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

pub(crate) mod private {
    use super::*;
    use crate::encodings::decoding::PlainDecoderDetails;
    use crate::util::bit_util::{BitReader, BitWriter};

    /// A marker trait for the physical value types supported by the plain codec and
    /// the typed column readers/writers.
    ///
    /// This trait is sealed: the eight implementations below are the complete set of
    /// Parquet physical value representations.
    pub trait ParquetValueType:
        PartialEq
        + std::fmt::Debug
        + std::fmt::Display
        + Default
        + Clone
        + AsBytes
        + Send
        + crate::encodings::decoding::private::GetDecoder
        + crate::encodings::encoding::private::GetEncoder
        + crate::record::triplet::MakeField
    {
        const PHYSICAL_TYPE: Type;

        /// Encode the values in plain encoding, appending to `buffer`.
        /// `bit_writer` is only used by BOOLEAN, which is bit-packed.
        fn encode(values: &[Self], buffer: &mut Vec<u8>, bit_writer: &mut BitWriter) -> Result<()>;

        /// Establish the data to decode from.
        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize);

        /// Decode the data in the plain encoding, returning the number of values read.
        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize>;

        /// Return the value as i64 if possible.
        ///
        /// This is essentially the same as `std::convert::TryInto<i64>` but can't be
        /// implemented for `f32`, as it isn't a supported conversion.
        fn as_i64(&self) -> Result<i64> {
            Err(unsupported_err!("Type cannot be converted to i64"))
        }

        /// Sizes in bytes of the base size and any additionally allocated elements when
        /// the value is interned by the dictionary encoder.
        fn dict_encoding_size(&self) -> (usize, usize) {
            (mem::size_of::<Self>(), 1)
        }
    }

    impl ParquetValueType for bool {
        const PHYSICAL_TYPE: Type = Type::BOOLEAN;

        fn encode(
            values: &[Self],
            _buffer: &mut Vec<u8>,
            bit_writer: &mut BitWriter,
        ) -> Result<()> {
            for value in values {
                bit_writer.put_value(*value as u64, 1);
            }
            Ok(())
        }

        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
            decoder.bit_reader = Some(BitReader::new(data));
            decoder.num_values = num_values;
        }

        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize> {
            let bit_reader = decoder.bit_reader.as_mut().unwrap();
            let num_values = std::cmp::min(buffer.len(), decoder.num_values);
            let values_read = bit_reader.get_batch(&mut buffer[..num_values], 1);
            decoder.num_values -= values_read;
            Ok(values_read)
        }

        fn as_i64(&self) -> Result<i64> {
            Ok(*self as i64)
        }
    }

    macro_rules! impl_parquet_value_type_for_native {
        ($ty:ident, $physical_ty:expr) => {
            impl ParquetValueType for $ty {
                const PHYSICAL_TYPE: Type = $physical_ty;

                fn encode(
                    values: &[Self],
                    buffer: &mut Vec<u8>,
                    _bit_writer: &mut BitWriter,
                ) -> Result<()> {
                    for value in values {
                        buffer.extend_from_slice(&value.to_le_bytes());
                    }
                    Ok(())
                }

                fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
                    decoder.data = Some(data);
                    decoder.start = 0;
                    decoder.num_values = num_values;
                }

                fn decode(
                    buffer: &mut [Self],
                    decoder: &mut PlainDecoderDetails,
                ) -> Result<usize> {
                    let data = decoder
                        .data
                        .as_ref()
                        .expect("set_data should have been called");
                    let raw = &data.as_ref()[decoder.start..];
                    let num_values =
                        [buffer.len(), decoder.num_values, raw.len() / mem::size_of::<Self>()]
                            .into_iter()
                            .min()
                            .unwrap();
                    for (i, item) in buffer.iter_mut().enumerate().take(num_values) {
                        let offset = i * mem::size_of::<Self>();
                        *item = <$ty>::from_le_bytes(
                            raw[offset..offset + mem::size_of::<Self>()]
                                .try_into()
                                .unwrap(),
                        );
                    }
                    decoder.start += num_values * mem::size_of::<Self>();
                    decoder.num_values -= num_values;
                    Ok(num_values)
                }

                fn as_i64(&self) -> Result<i64> {
                    Ok(*self as i64)
                }
            }
        };
    }

    impl_parquet_value_type_for_native!(i32, Type::INT32);
    impl_parquet_value_type_for_native!(i64, Type::INT64);

    impl ParquetValueType for f32 {
        const PHYSICAL_TYPE: Type = Type::FLOAT;

        fn encode(values: &[Self], buffer: &mut Vec<u8>, _bit_writer: &mut BitWriter) -> Result<()> {
            for value in values {
                buffer.extend_from_slice(&value.to_le_bytes());
            }
            Ok(())
        }

        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
            decoder.data = Some(data);
            decoder.start = 0;
            decoder.num_values = num_values;
        }

        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize> {
            let data = decoder
                .data
                .as_ref()
                .expect("set_data should have been called");
            let raw = &data.as_ref()[decoder.start..];
            let num_values = [buffer.len(), decoder.num_values, raw.len() / 4]
                .into_iter()
                .min()
                .unwrap();
            for (i, item) in buffer.iter_mut().enumerate().take(num_values) {
                *item = f32::from_le_bytes(raw[i * 4..i * 4 + 4].try_into().unwrap());
            }
            decoder.start += num_values * 4;
            decoder.num_values -= num_values;
            Ok(num_values)
        }
    }

    impl ParquetValueType for f64 {
        const PHYSICAL_TYPE: Type = Type::DOUBLE;

        fn encode(values: &[Self], buffer: &mut Vec<u8>, _bit_writer: &mut BitWriter) -> Result<()> {
            for value in values {
                buffer.extend_from_slice(&value.to_le_bytes());
            }
            Ok(())
        }

        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
            decoder.data = Some(data);
            decoder.start = 0;
            decoder.num_values = num_values;
        }

        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize> {
            let data = decoder
                .data
                .as_ref()
                .expect("set_data should have been called");
            let raw = &data.as_ref()[decoder.start..];
            let num_values = [buffer.len(), decoder.num_values, raw.len() / 8]
                .into_iter()
                .min()
                .unwrap();
            for (i, item) in buffer.iter_mut().enumerate().take(num_values) {
                *item = f64::from_le_bytes(raw[i * 8..i * 8 + 8].try_into().unwrap());
            }
            decoder.start += num_values * 8;
            decoder.num_values -= num_values;
            Ok(num_values)
        }
    }

    impl ParquetValueType for Int96 {
        const PHYSICAL_TYPE: Type = Type::INT96;

        fn encode(values: &[Self], buffer: &mut Vec<u8>, _bit_writer: &mut BitWriter) -> Result<()> {
            for value in values {
                for elem in value.data() {
                    buffer.extend_from_slice(&elem.to_le_bytes());
                }
            }
            Ok(())
        }

        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
            decoder.data = Some(data);
            decoder.start = 0;
            decoder.num_values = num_values;
        }

        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize> {
            let data = decoder
                .data
                .as_ref()
                .expect("set_data should have been called");
            let raw = &data.as_ref()[decoder.start..];
            let num_values = [buffer.len(), decoder.num_values, raw.len() / 12]
                .into_iter()
                .min()
                .unwrap();
            for (i, item) in buffer.iter_mut().enumerate().take(num_values) {
                let offset = i * 12;
                let elem0 = u32::from_le_bytes(raw[offset..offset + 4].try_into().unwrap());
                let elem1 = u32::from_le_bytes(raw[offset + 4..offset + 8].try_into().unwrap());
                let elem2 = u32::from_le_bytes(raw[offset + 8..offset + 12].try_into().unwrap());
                item.set_data(elem0, elem1, elem2);
            }
            decoder.start += num_values * 12;
            decoder.num_values -= num_values;
            Ok(num_values)
        }

        fn dict_encoding_size(&self) -> (usize, usize) {
            (12, 1)
        }
    }

    impl ParquetValueType for ByteArray {
        const PHYSICAL_TYPE: Type = Type::BYTE_ARRAY;

        fn encode(values: &[Self], buffer: &mut Vec<u8>, _bit_writer: &mut BitWriter) -> Result<()> {
            for value in values {
                buffer.extend_from_slice(&(value.len() as u32).to_le_bytes());
                buffer.extend_from_slice(value.data());
            }
            Ok(())
        }

        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
            decoder.data = Some(data);
            decoder.start = 0;
            decoder.num_values = num_values;
        }

        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize> {
            let data = decoder
                .data
                .as_ref()
                .expect("set_data should have been called");
            let num_values = std::cmp::min(buffer.len(), decoder.num_values);
            for item in buffer.iter_mut().take(num_values) {
                let len_bytes: [u8; 4] = data
                    .as_ref()
                    .get(decoder.start..decoder.start + 4)
                    .ok_or_else(|| corrupted_err!("Not enough bytes to decode BYTE_ARRAY length"))?
                    .try_into()
                    .unwrap();
                let len = u32::from_le_bytes(len_bytes) as usize;
                decoder.start += 4;
                if data.len() < decoder.start + len {
                    return Err(corrupted_err!(
                        "Not enough bytes to decode BYTE_ARRAY (needed {}, got {})",
                        len,
                        data.len() - decoder.start
                    ));
                }
                item.set_data(data.slice(decoder.start..decoder.start + len));
                decoder.start += len;
            }
            decoder.num_values -= num_values;
            Ok(num_values)
        }

        fn dict_encoding_size(&self) -> (usize, usize) {
            (mem::size_of::<u32>(), self.len())
        }
    }

    impl ParquetValueType for FixedLenByteArray {
        const PHYSICAL_TYPE: Type = Type::FIXED_LEN_BYTE_ARRAY;

        fn encode(values: &[Self], buffer: &mut Vec<u8>, _bit_writer: &mut BitWriter) -> Result<()> {
            for value in values {
                buffer.extend_from_slice(value.data());
            }
            Ok(())
        }

        fn set_data(decoder: &mut PlainDecoderDetails, data: Bytes, num_values: usize) {
            decoder.data = Some(data);
            decoder.start = 0;
            decoder.num_values = num_values;
        }

        fn decode(buffer: &mut [Self], decoder: &mut PlainDecoderDetails) -> Result<usize> {
            assert!(decoder.type_length > 0);
            let type_length = decoder.type_length as usize;
            let data = decoder
                .data
                .as_ref()
                .expect("set_data should have been called");
            let num_values = std::cmp::min(buffer.len(), decoder.num_values);
            for item in buffer.iter_mut().take(num_values) {
                if data.len() < decoder.start + type_length {
                    return Err(corrupted_err!(
                        "Not enough bytes to decode FIXED_LEN_BYTE_ARRAY (needed {}, got {})",
                        type_length,
                        data.len() - decoder.start
                    ));
                }
                item.set_data(data.slice(decoder.start..decoder.start + type_length));
                decoder.start += type_length;
            }
            decoder.num_values -= num_values;
            Ok(num_values)
        }

        fn dict_encoding_size(&self) -> (usize, usize) {
            (self.len(), 1)
        }
    }

}

/// Contains the Parquet physical type information as well as the Rust primitive type
/// presentation.
pub trait DataType: 'static + Send {
    /// The physical type of the Parquet data type.
    type T: private::ParquetValueType;

    /// Returns Parquet physical type.
    fn get_physical_type() -> Type {
        <Self::T as private::ParquetValueType>::PHYSICAL_TYPE
    }

    /// Returns size in bytes for Rust representation of the physical type.
    fn get_type_size() -> usize;

    /// Returns the underlying [`ColumnReaderImpl`] for the given [`ColumnReader`],
    /// if it matches this type.
    fn get_column_reader(column_reader: ColumnReader) -> Option<ColumnReaderImpl<Self>>
    where
        Self: Sized;

    /// Returns the underlying [`ColumnWriterImpl`] for the given [`ColumnWriter`],
    /// if it matches this type.
    fn get_column_writer(column_writer: ColumnWriter) -> Option<ColumnWriterImpl<Self>>
    where
        Self: Sized;

    /// Returns a mutable reference to the underlying [`ColumnWriterImpl`] for the
    /// given [`ColumnWriter`], if it matches this type.
    fn get_column_writer_mut(column_writer: &mut ColumnWriter) -> Option<&mut ColumnWriterImpl<Self>>
    where
        Self: Sized;
}

macro_rules! make_type {
    ($name:ident, $reader_ident:ident, $writer_ident:ident, $native_ty:ty, $size:expr) => {
        #[doc = concat!("Parquet physical type: ", stringify!($name))]
        #[derive(Clone)]
        pub struct $name {}

        impl DataType for $name {
            type T = $native_ty;

            fn get_type_size() -> usize {
                $size
            }

            fn get_column_reader(column_reader: ColumnReader) -> Option<ColumnReaderImpl<Self>> {
                match column_reader {
                    ColumnReader::$reader_ident(w) => Some(w),
                    _ => None,
                }
            }

            fn get_column_writer(column_writer: ColumnWriter) -> Option<ColumnWriterImpl<Self>> {
                match column_writer {
                    ColumnWriter::$writer_ident(w) => Some(w),
                    _ => None,
                }
            }

            fn get_column_writer_mut(
                column_writer: &mut ColumnWriter,
            ) -> Option<&mut ColumnWriterImpl<Self>> {
                match column_writer {
                    ColumnWriter::$writer_ident(w) => Some(w),
                    _ => None,
                }
            }
        }
    };
}

make_type!(BoolType, BoolColumnReader, BoolColumnWriter, bool, 1);
make_type!(
    Int32Type,
    Int32ColumnReader,
    Int32ColumnWriter,
    i32,
    mem::size_of::<i32>()
);
make_type!(
    Int64Type,
    Int64ColumnReader,
    Int64ColumnWriter,
    i64,
    mem::size_of::<i64>()
);
make_type!(
    Int96Type,
    Int96ColumnReader,
    Int96ColumnWriter,
    Int96,
    mem::size_of::<Int96>()
);
make_type!(
    FloatType,
    FloatColumnReader,
    FloatColumnWriter,
    f32,
    mem::size_of::<f32>()
);
make_type!(
    DoubleType,
    DoubleColumnReader,
    DoubleColumnWriter,
    f64,
    mem::size_of::<f64>()
);
make_type!(
    ByteArrayType,
    ByteArrayColumnReader,
    ByteArrayColumnWriter,
    ByteArray,
    mem::size_of::<ByteArray>()
);
make_type!(
    FixedLenByteArrayType,
    FixedLenByteArrayColumnReader,
    FixedLenByteArrayColumnWriter,
    FixedLenByteArray,
    mem::size_of::<FixedLenByteArray>()
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_array_from_and_eq() {
        let ba1 = ByteArray::from(vec![1u8, 2, 3]);
        let ba2 = ByteArray::from(Bytes::from_static(&[1u8, 2, 3]));
        assert_eq!(ba1, ba2);
        assert_eq!(ba1.len(), 3);
        assert_eq!(ba1.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_byte_array_slice() {
        let ba = ByteArray::from(vec![1u8, 2, 3, 4, 5]);
        let sub = ba.slice(1, 3);
        assert_eq!(sub.data(), &[2, 3, 4]);
    }

    #[test]
    fn test_byte_array_as_utf8() {
        let ba = ByteArray::from("hello");
        assert_eq!(ba.as_utf8().unwrap(), "hello");
    }

    #[test]
    fn test_int96() {
        let mut i = Int96::new();
        i.set_data(1, 2, 3);
        assert_eq!(i.data(), &[1, 2, 3]);
        assert_eq!(i.as_bytes().len(), 12);
    }

    #[test]
    fn test_fixed_len_byte_array_deref() {
        let flba = FixedLenByteArray::from(vec![7u8, 8]);
        assert_eq!(flba.len(), 2);
        assert_eq!(flba.data(), &[7, 8]);
    }

    #[test]
    fn test_as_bytes_native() {
        assert_eq!(1i32.as_bytes(), &[1, 0, 0, 0]);
        assert_eq!((-1i16).as_bytes(), &[255, 255]);
        assert_eq!(true.as_bytes(), &[1]);
    }
}
