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

//! Contains all supported decoders for Parquet.

use num::traits::WrappingAdd;
use num::FromPrimitive;
use std::{cmp, marker::PhantomData};

use bytes::Bytes;

use super::rle::RleDecoder;

use crate::basic::*;
use crate::data_type::private::ParquetValueType;
use crate::data_type::*;
use crate::errors::{ParquetError, Result};
use crate::schema::types::ColumnDescPtr;
use crate::util::bit_util::BitReader;

pub(crate) mod private {
    use super::*;

    /// A trait that allows getting a [`Decoder`] implementation for a [`DataType`] with
    /// the corresponding [`ParquetValueType`]. This is necessary to support
    /// [`Decoder`] implementations that may not be applicable for all [`DataType`]
    /// and by extension all [`ParquetValueType`]
    pub trait GetDecoder {
        fn get_decoder<T: DataType<T = Self>>(
            descr: ColumnDescPtr,
            encoding: Encoding,
        ) -> Result<Box<dyn Decoder<T>>> {
            get_decoder_default(descr, encoding)
        }
    }

    fn get_decoder_default<T: DataType>(
        descr: ColumnDescPtr,
        encoding: Encoding,
    ) -> Result<Box<dyn Decoder<T>>> {
        match encoding {
            Encoding::PLAIN => Ok(Box::new(PlainDecoder::new(descr.type_length()))),
            Encoding::RLE_DICTIONARY | Encoding::PLAIN_DICTIONARY => Err(corrupted_err!(
                "Cannot initialize this encoding through this function"
            )),
            Encoding::RLE
            | Encoding::DELTA_BINARY_PACKED
            | Encoding::DELTA_BYTE_ARRAY
            | Encoding::DELTA_LENGTH_BYTE_ARRAY => Err(corrupted_err!(
                "Encoding {} is not valid for type {}",
                encoding,
                T::get_physical_type()
            )),
            e => Err(unsupported_err!("Encoding {} is not supported", e)),
        }
    }

    impl GetDecoder for bool {
        fn get_decoder<T: DataType<T = Self>>(
            descr: ColumnDescPtr,
            encoding: Encoding,
        ) -> Result<Box<dyn Decoder<T>>> {
            match encoding {
                Encoding::RLE => Ok(Box::new(RleValueDecoder::new())),
                _ => get_decoder_default(descr, encoding),
            }
        }
    }

    impl GetDecoder for i32 {
        fn get_decoder<T: DataType<T = Self>>(
            descr: ColumnDescPtr,
            encoding: Encoding,
        ) -> Result<Box<dyn Decoder<T>>> {
            match encoding {
                Encoding::DELTA_BINARY_PACKED => Ok(Box::new(DeltaBitPackDecoder::new())),
                _ => get_decoder_default(descr, encoding),
            }
        }
    }

    impl GetDecoder for i64 {
        fn get_decoder<T: DataType<T = Self>>(
            descr: ColumnDescPtr,
            encoding: Encoding,
        ) -> Result<Box<dyn Decoder<T>>> {
            match encoding {
                Encoding::DELTA_BINARY_PACKED => Ok(Box::new(DeltaBitPackDecoder::new())),
                _ => get_decoder_default(descr, encoding),
            }
        }
    }

    impl GetDecoder for f32 {}
    impl GetDecoder for f64 {}

    impl GetDecoder for ByteArray {
        fn get_decoder<T: DataType<T = Self>>(
            descr: ColumnDescPtr,
            encoding: Encoding,
        ) -> Result<Box<dyn Decoder<T>>> {
            match encoding {
                Encoding::DELTA_BYTE_ARRAY => Ok(Box::new(DeltaByteArrayDecoder::new())),
                Encoding::DELTA_LENGTH_BYTE_ARRAY => {
                    Ok(Box::new(DeltaLengthByteArrayDecoder::new()))
                }
                _ => get_decoder_default(descr, encoding),
            }
        }
    }

    impl GetDecoder for FixedLenByteArray {}
    impl GetDecoder for Int96 {}
}

// ----------------------------------------------------------------------
// Decoders

/// A Parquet decoder for the data type `T`.
pub trait Decoder<T: DataType>: Send {
    /// Sets the data to decode to be `data`, which should contain `num_values` of values
    /// to decode.
    fn set_data(&mut self, data: Bytes, num_values: usize) -> Result<()>;

    /// Consumes values from this decoder and write the results to `buffer`. This will try
    /// to fill up `buffer`.
    ///
    /// Returns the actual number of values decoded, which should be equal to
    /// `buffer.len()` unless the remaining number of values is less than
    /// `buffer.len()`.
    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize>;

    /// Returns the number of values left in this decoder stream.
    fn values_left(&self) -> usize;

    /// Returns the encoding for this decoder.
    fn encoding(&self) -> Encoding;
}

/// Gets a decoder for the column descriptor `descr` and encoding type `encoding`.
///
/// NOTE: the primitive type in `descr` MUST match the data type `T`, otherwise
/// disastrous consequence could occur.
pub fn get_decoder<T: DataType>(
    descr: ColumnDescPtr,
    encoding: Encoding,
) -> Result<Box<dyn Decoder<T>>> {
    use self::private::GetDecoder;
    T::T::get_decoder(descr, encoding)
}

// ----------------------------------------------------------------------
// PLAIN Decoding

/// The state shared by the typed plain decoding paths in
/// [`ParquetValueType`](crate::data_type::private::ParquetValueType).
#[derive(Default)]
pub struct PlainDecoderDetails {
    /// The remaining number of values in the byte array
    pub(crate) num_values: usize,

    /// The current starting index in the byte array. Not used when `T` is bool.
    pub(crate) start: usize,

    /// The length for the type `T`. Only used when `T` is `FixedLenByteArrayType`
    pub(crate) type_length: i32,

    /// The byte array to decode from. Not set if `T` is bool.
    pub(crate) data: Option<Bytes>,

    /// Read `data` bit by bit. Only set if `T` is bool.
    pub(crate) bit_reader: Option<BitReader>,
}

/// Plain decoding that supports all types.
/// Values are encoded back to back. For native types, data is encoded as little endian.
/// Floating point types are encoded in IEEE.
/// See [`PlainEncoder`](crate::encodings::encoding::PlainEncoder) for more information.
pub struct PlainDecoder<T: DataType> {
    /// The binary details needed for decoding
    inner: PlainDecoderDetails,

    /// To allow `T` in the generic parameter for this struct. This doesn't take any
    /// space.
    _phantom: PhantomData<T>,
}

impl<T: DataType> PlainDecoder<T> {
    /// Creates new plain decoder.
    pub fn new(type_length: i32) -> Self {
        PlainDecoder {
            inner: PlainDecoderDetails {
                type_length,
                num_values: 0,
                start: 0,
                data: None,
                bit_reader: None,
            },
            _phantom: PhantomData,
        }
    }
}

impl<T: DataType> Decoder<T> for PlainDecoder<T> {
    #[inline]
    fn set_data(&mut self, data: Bytes, num_values: usize) -> Result<()> {
        T::T::set_data(&mut self.inner, data, num_values);
        Ok(())
    }

    #[inline]
    fn values_left(&self) -> usize {
        self.inner.num_values
    }

    #[inline]
    fn encoding(&self) -> Encoding {
        Encoding::PLAIN
    }

    #[inline]
    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize> {
        T::T::decode(buffer, &mut self.inner)
    }
}

// ----------------------------------------------------------------------
// RLE_DICTIONARY/PLAIN_DICTIONARY Decoding

/// Dictionary decoder.
/// The dictionary encoding builds a dictionary of values encountered in a given column.
/// The dictionary is be stored in a dictionary page per column chunk.
/// See [`DictEncoder`](crate::encodings::encoding::DictEncoder) for more information.
pub struct DictDecoder<T: DataType> {
    /// The dictionary, which maps ids to the values
    dictionary: Vec<T::T>,

    /// Whether `dictionary` has been initialized
    has_dictionary: bool,

    /// The decoder for the value ids
    rle_decoder: Option<RleDecoder>,

    /// Number of values left in the data stream
    num_values: usize,
}

impl<T: DataType> Default for DictDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataType> DictDecoder<T> {
    /// Creates new dictionary decoder.
    pub fn new() -> Self {
        Self {
            dictionary: vec![],
            has_dictionary: false,
            rle_decoder: None,
            num_values: 0,
        }
    }

    /// Sets an already decoded dictionary.
    pub fn set_dict_values(&mut self, dictionary: Vec<T::T>) {
        self.dictionary = dictionary;
        self.has_dictionary = true;
    }

    /// Decodes and sets values for dictionary using `decoder` decoder.
    pub fn set_dict(&mut self, mut decoder: Box<dyn Decoder<T>>) -> Result<()> {
        let num_values = decoder.values_left();
        self.dictionary.resize(num_values, T::T::default());
        let read = decoder.get(&mut self.dictionary)?;
        if read != num_values {
            return Err(corrupted_err!(
                "Unexpected end of dictionary page (expected {} values, got {})",
                num_values,
                read
            ));
        }
        self.has_dictionary = true;
        Ok(())
    }
}

impl<T: DataType> Decoder<T> for DictDecoder<T> {
    fn set_data(&mut self, data: Bytes, num_values: usize) -> Result<()> {
        // First byte in `data` is bit width
        if data.is_empty() {
            return Err(corrupted_err!("Dictionary-encoded page is empty"));
        }
        let bit_width = data.as_ref()[0];
        if bit_width > 32 {
            return Err(corrupted_err!(
                "Illegal dictionary index bit width (should be 0 <= bit width <= 32, got {})",
                bit_width
            ));
        }
        let mut rle_decoder = RleDecoder::new(bit_width);
        rle_decoder.set_data(data.slice(1..));
        self.num_values = num_values;
        self.rle_decoder = Some(rle_decoder);
        Ok(())
    }

    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize> {
        assert!(self.rle_decoder.is_some());
        assert!(self.has_dictionary, "Must call set_dict() first!");

        let rle = self.rle_decoder.as_mut().unwrap();
        let num_values = cmp::min(buffer.len(), self.num_values);
        let values_read = rle.get_batch_with_dict(&self.dictionary[..], buffer, num_values)?;
        self.num_values -= values_read;
        Ok(values_read)
    }

    /// Number of values left in this decoder stream
    fn values_left(&self) -> usize {
        self.num_values
    }

    fn encoding(&self) -> Encoding {
        Encoding::RLE_DICTIONARY
    }
}

// ----------------------------------------------------------------------
// RLE Decoding

/// RLE/Bit-Packing hybrid decoding for values.
/// Currently is used only for boolean values.
/// See [`RleValueEncoder`](crate::encodings::encoding::RleValueEncoder) for more
/// information.
pub struct RleValueDecoder<T: DataType> {
    values_left: usize,
    decoder: RleDecoder,
    _phantom: PhantomData<T>,
}

impl<T: DataType> Default for RleValueDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataType> RleValueDecoder<T> {
    /// Creates a new boolean value decoder.
    pub fn new() -> Self {
        Self {
            values_left: 0,
            decoder: RleDecoder::new(1),
            _phantom: PhantomData,
        }
    }
}

impl<T> Decoder<T> for RleValueDecoder<T>
where
    T: DataType<T = bool>,
{
    #[inline]
    fn set_data(&mut self, data: Bytes, num_values: usize) -> Result<()> {
        // We still need to remove the prefix of i32 from the stream.
        if data.len() < 4 {
            return Err(corrupted_err!(
                "Not enough bytes to read RLE stream length (needed 4, got {})",
                data.len()
            ));
        }
        let data_size = i32::from_le_bytes(data.as_ref()[..4].try_into().unwrap());
        if data_size < 0 || data.len() < 4 + data_size as usize {
            return Err(corrupted_err!("Invalid RLE stream length ({})", data_size));
        }
        self.decoder = RleDecoder::new(1);
        self.decoder.set_data(data.slice(4..4 + data_size as usize));
        self.values_left = num_values;
        Ok(())
    }

    #[inline]
    fn values_left(&self) -> usize {
        self.values_left
    }

    #[inline]
    fn encoding(&self) -> Encoding {
        Encoding::RLE
    }

    #[inline]
    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize> {
        let num_values = cmp::min(buffer.len(), self.values_left);
        let values_read = self.decoder.get_batch(&mut buffer[..num_values])?;
        self.values_left -= values_read;
        Ok(values_read)
    }
}

// ----------------------------------------------------------------------
// DELTA_BINARY_PACKED Decoding

/// Delta binary packed decoder.
/// Supports INT32 and INT64 types.
/// See [`DeltaBitPackEncoder`](crate::encodings::encoding::DeltaBitPackEncoder) for more
/// information.
pub struct DeltaBitPackDecoder<T: DataType> {
    bit_reader: BitReader,
    initialized: bool,

    // Header info
    /// The number of values in each block
    block_size: usize,
    /// The number of values that remain to be read in the current page
    values_left: usize,
    /// The number of mini-blocks in each block
    mini_blocks_per_block: usize,
    /// The number of values in each mini block
    values_per_mini_block: usize,

    // Per block info
    /// The minimum delta in the block
    min_delta: T::T,
    /// The byte offset of the end of the current block
    block_end_offset: usize,
    /// The index on the current mini block
    mini_block_idx: usize,
    /// The bit widths of each mini block in the current block
    mini_block_bit_widths: Vec<u8>,
    /// The number of values remaining in the current mini block
    mini_block_remaining: usize,

    /// The first value from the block header if not consumed
    first_value: Option<T::T>,
    /// The last value to compute offsets from
    last_value: T::T,
}

impl<T: DataType> Default for DeltaBitPackDecoder<T>
where
    T::T: Default + FromPrimitive + WrappingAdd + Copy + crate::util::bit_util::FromBytes,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataType> DeltaBitPackDecoder<T>
where
    T::T: Default + FromPrimitive + WrappingAdd + Copy + crate::util::bit_util::FromBytes,
{
    /// Creates new delta bit packed decoder.
    pub fn new() -> Self {
        Self {
            bit_reader: BitReader::from(vec![]),
            initialized: false,
            block_size: 0,
            values_left: 0,
            mini_blocks_per_block: 0,
            values_per_mini_block: 0,
            min_delta: Default::default(),
            mini_block_idx: 0,
            mini_block_bit_widths: vec![],
            mini_block_remaining: 0,
            block_end_offset: 0,
            first_value: None,
            last_value: Default::default(),
        }
    }

    /// Returns the current offset
    pub fn get_offset(&self) -> usize {
        assert!(self.initialized, "Bit reader is not initialized");
        match self.values_left {
            // If we've exhausted this page report the end of the current block
            // as we may not have consumed the trailing padding
            //
            // The max is necessary to handle pages which don't contain more than
            // one value and therefore have no blocks, but still contain a page header
            0 => self.bit_reader.get_byte_offset().max(self.block_end_offset),
            _ => self.bit_reader.get_byte_offset(),
        }
    }

    /// Initializes the next block and the first mini block within it
    #[inline]
    fn next_block(&mut self) -> Result<()> {
        let min_delta = self
            .bit_reader
            .get_zigzag_vlq_int()
            .ok_or_else(|| corrupted_err!("Not enough data to decode 'min_delta'"))?;

        self.min_delta =
            T::T::from_i64(min_delta).ok_or_else(|| corrupted_err!("'min_delta' too large"))?;

        self.mini_block_bit_widths.clear();
        self.bit_reader
            .get_aligned_bytes(&mut self.mini_block_bit_widths, self.mini_blocks_per_block);

        let mut offset = self.bit_reader.get_byte_offset();
        let mut remaining = self.values_left;

        // Compute the end offset of the current block
        for b in &mut self.mini_block_bit_widths {
            if remaining == 0 {
                // Specification requires handling arbitrary bit widths
                // for trailing mini blocks
                *b = 0;
            }
            remaining = remaining.saturating_sub(self.values_per_mini_block);
            offset += *b as usize * self.values_per_mini_block / 8;
        }
        self.block_end_offset = offset;

        if self.mini_block_bit_widths.len() != self.mini_blocks_per_block {
            return Err(corrupted_err!("Insufficient mini block bit widths"));
        }

        self.mini_block_remaining = self.values_per_mini_block;
        self.mini_block_idx = 0;

        Ok(())
    }

    /// Initializes the next mini block
    #[inline]
    fn next_mini_block(&mut self) -> Result<()> {
        if self.mini_block_idx + 1 < self.mini_block_bit_widths.len() {
            self.mini_block_idx += 1;
            self.mini_block_remaining = self.values_per_mini_block;
            Ok(())
        } else {
            self.next_block()
        }
    }
}

impl<T: DataType> Decoder<T> for DeltaBitPackDecoder<T>
where
    T::T: Default + FromPrimitive + WrappingAdd + Copy + crate::util::bit_util::FromBytes,
{
    // # of total values is derived from encoding
    #[inline]
    fn set_data(&mut self, data: Bytes, _index: usize) -> Result<()> {
        self.bit_reader = BitReader::new(data);
        self.initialized = true;

        // Read header information
        self.block_size = self
            .bit_reader
            .get_vlq_int()
            .ok_or_else(|| corrupted_err!("Not enough data to decode 'block_size'"))?
            .try_into()
            .map_err(|_| corrupted_err!("Invalid 'block_size'"))?;

        self.mini_blocks_per_block = self
            .bit_reader
            .get_vlq_int()
            .ok_or_else(|| corrupted_err!("Not enough data to decode 'mini_blocks_per_block'"))?
            .try_into()
            .map_err(|_| corrupted_err!("Invalid 'mini_blocks_per_block'"))?;

        self.values_left = self
            .bit_reader
            .get_vlq_int()
            .ok_or_else(|| corrupted_err!("Not enough data to decode 'values_left'"))?
            .try_into()
            .map_err(|_| corrupted_err!("Invalid 'values_left'"))?;

        let first_value = self
            .bit_reader
            .get_zigzag_vlq_int()
            .ok_or_else(|| corrupted_err!("Not enough data to decode 'first_value'"))?;

        self.first_value =
            Some(T::T::from_i64(first_value).ok_or_else(|| corrupted_err!("First value too large"))?);

        if self.mini_blocks_per_block == 0 {
            return Err(corrupted_err!("'mini_blocks_per_block' must not be 0"));
        }

        if self.block_size % self.mini_blocks_per_block != 0 {
            return Err(corrupted_err!(
                "'block_size' must be a multiple of 'mini_blocks_per_block' got {} and {}",
                self.block_size,
                self.mini_blocks_per_block
            ));
        }

        // Reset decoding state
        self.mini_block_idx = 0;
        self.values_per_mini_block = self.block_size / self.mini_blocks_per_block;
        self.mini_block_remaining = 0;
        self.mini_block_bit_widths.clear();

        if self.values_per_mini_block % 8 != 0 {
            return Err(corrupted_err!(
                "'values_per_mini_block' must be a multiple of 8 got {}",
                self.values_per_mini_block
            ));
        }

        Ok(())
    }

    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize> {
        assert!(self.initialized, "Bit reader is not initialized");
        if buffer.is_empty() || self.values_left == 0 {
            return Ok(0);
        }

        let mut read = 0;
        let to_read = buffer.len().min(self.values_left);

        if let Some(value) = self.first_value.take() {
            self.last_value = value;
            buffer[0] = value;
            read += 1;
            self.values_left -= 1;
        }

        while read != to_read {
            if self.mini_block_remaining == 0 {
                self.next_mini_block()?;
            }

            let bit_width = self.mini_block_bit_widths[self.mini_block_idx] as usize;
            let batch_to_read = self.mini_block_remaining.min(to_read - read);

            let batch_read = self
                .bit_reader
                .get_batch(&mut buffer[read..read + batch_to_read], bit_width);

            if batch_read != batch_to_read {
                return Err(corrupted_err!(
                    "Expected to read {} values from miniblock got {}",
                    batch_to_read,
                    batch_read
                ));
            }

            // At this point we have read the deltas to `buffer` we now need to offset
            // these to get back to the original values that were encoded
            for v in &mut buffer[read..read + batch_read] {
                // It is OK for deltas to contain "overflowed" values after encoding,
                // e.g. i64::MAX - i64::MIN, so we use `wrapping_add` to "overflow" again and
                // restore original value.
                *v = v.wrapping_add(&self.min_delta).wrapping_add(&self.last_value);

                self.last_value = *v;
            }

            read += batch_read;
            self.mini_block_remaining -= batch_read;
            self.values_left -= batch_read;
        }

        Ok(to_read)
    }

    fn values_left(&self) -> usize {
        self.values_left
    }

    fn encoding(&self) -> Encoding {
        Encoding::DELTA_BINARY_PACKED
    }
}

// ----------------------------------------------------------------------
// DELTA_LENGTH_BYTE_ARRAY Decoding

/// Delta length byte array decoder.
/// Only applied to byte arrays to separate the length values and the data, the lengths
/// are encoded using DELTA_BINARY_PACKED encoding.
/// See [`DeltaLengthByteArrayEncoder`](crate::encodings::encoding::DeltaLengthByteArrayEncoder)
/// for more information.
pub struct DeltaLengthByteArrayDecoder<T: DataType> {
    /// Lengths for each byte array in `data`
    lengths: Vec<i32>,

    /// Current index into `lengths`
    current_idx: usize,

    /// Concatenated byte array data
    data: Option<Bytes>,

    /// Offset into `data`, always point to the beginning of next byte array.
    offset: usize,

    /// Number of values left in this decoder stream
    num_values: usize,

    /// Placeholder to allow `T` as generic parameter
    _phantom: PhantomData<T>,
}

impl<T: DataType> Default for DeltaLengthByteArrayDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataType> DeltaLengthByteArrayDecoder<T> {
    /// Creates new delta length byte array decoder.
    pub fn new() -> Self {
        Self {
            lengths: vec![],
            current_idx: 0,
            data: None,
            offset: 0,
            num_values: 0,
            _phantom: PhantomData,
        }
    }
}

impl<T> Decoder<T> for DeltaLengthByteArrayDecoder<T>
where
    T: DataType<T = ByteArray>,
{
    fn set_data(&mut self, data: Bytes, num_values: usize) -> Result<()> {
        let mut len_decoder = DeltaBitPackDecoder::<Int32Type>::new();
        len_decoder.set_data(data.clone(), num_values)?;
        let num_lengths = len_decoder.values_left();
        self.lengths.resize(num_lengths, 0);
        len_decoder.get(&mut self.lengths[..])?;

        let lengths_sum: i64 = self.lengths.iter().map(|len| *len as i64).sum();
        let values = data.slice(len_decoder.get_offset()..);
        if lengths_sum != values.len() as i64 {
            return Err(corrupted_err!(
                "Lengths of byte arrays ({}) do not add up to the remaining bytes in page ({})",
                lengths_sum,
                values.len()
            ));
        }

        self.data = Some(values);
        self.offset = 0;
        self.current_idx = 0;
        self.num_values = num_lengths;
        Ok(())
    }

    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize> {
        assert!(self.data.is_some());

        let data = self.data.as_ref().unwrap();
        let num_values = cmp::min(buffer.len(), self.num_values);

        for item in buffer.iter_mut().take(num_values) {
            let len = self.lengths[self.current_idx] as usize;
            item.set_data(data.slice(self.offset..self.offset + len));
            self.offset += len;
            self.current_idx += 1;
        }

        self.num_values -= num_values;
        Ok(num_values)
    }

    fn values_left(&self) -> usize {
        self.num_values
    }

    fn encoding(&self) -> Encoding {
        Encoding::DELTA_LENGTH_BYTE_ARRAY
    }
}

// ----------------------------------------------------------------------
// DELTA_BYTE_ARRAY Decoding

/// Delta byte array decoder.
/// Prefix lengths are encoded using `DELTA_BINARY_PACKED` encoding, Suffixes are stored
/// using `DELTA_LENGTH_BYTE_ARRAY` encoding.
///
/// This is a read-only encoding: every value is the previous value's prefix of
/// the given length concatenated with the stored suffix, starting from the
/// empty string.
pub struct DeltaByteArrayDecoder<T: DataType> {
    /// Prefix lengths for each byte array
    prefix_lengths: Vec<i32>,

    /// The current index into `prefix_lengths`
    current_idx: usize,

    /// Decoder for all suffixes, the # of which should be the same as
    /// `prefix_lengths.len()`
    suffix_decoder: Option<DeltaLengthByteArrayDecoder<ByteArrayType>>,

    /// The last byte array, used to derive the current prefix
    previous_value: Vec<u8>,

    /// Number of values left
    num_values: usize,

    /// Placeholder to allow `T` as generic parameter
    _phantom: PhantomData<T>,
}

impl<T: DataType> Default for DeltaByteArrayDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataType> DeltaByteArrayDecoder<T> {
    /// Creates new delta byte array decoder.
    pub fn new() -> Self {
        Self {
            prefix_lengths: vec![],
            current_idx: 0,
            suffix_decoder: None,
            previous_value: vec![],
            num_values: 0,
            _phantom: PhantomData,
        }
    }
}

impl<T> Decoder<T> for DeltaByteArrayDecoder<T>
where
    T: DataType<T = ByteArray>,
{
    fn set_data(&mut self, data: Bytes, num_values: usize) -> Result<()> {
        let mut prefix_len_decoder = DeltaBitPackDecoder::<Int32Type>::new();
        prefix_len_decoder.set_data(data.clone(), num_values)?;
        let num_prefixes = prefix_len_decoder.values_left();
        self.prefix_lengths.resize(num_prefixes, 0);
        prefix_len_decoder.get(&mut self.prefix_lengths[..])?;

        let mut suffix_decoder = DeltaLengthByteArrayDecoder::new();
        suffix_decoder.set_data(data.slice(prefix_len_decoder.get_offset()..), num_values)?;
        self.suffix_decoder = Some(suffix_decoder);
        self.num_values = num_prefixes;
        self.current_idx = 0;
        self.previous_value.clear();
        Ok(())
    }

    fn get(&mut self, buffer: &mut [T::T]) -> Result<usize> {
        assert!(self.suffix_decoder.is_some());

        let num_values = cmp::min(buffer.len(), self.num_values);
        let mut suffix = [ByteArray::new()];
        for item in buffer.iter_mut().take(num_values) {
            // Process suffix
            // TODO: this is awkward - maybe we should add a non-vectorized API?
            let suffix_decoder = self.suffix_decoder.as_mut().expect("decoder not initialized");
            let read = suffix_decoder.get(&mut suffix)?;
            if read != 1 {
                return Err(corrupted_err!("Unexpected end of suffix stream"));
            }

            // Extract current prefix length, can be 0
            let prefix_len = self.prefix_lengths[self.current_idx] as usize;
            if prefix_len > self.previous_value.len() {
                return Err(corrupted_err!(
                    "Prefix length {} longer than previous value ({} bytes)",
                    prefix_len,
                    self.previous_value.len()
                ));
            }

            // Concatenate prefix with suffix
            let mut result = Vec::new();
            result.extend_from_slice(&self.previous_value[0..prefix_len]);
            result.extend_from_slice(suffix[0].data());

            self.previous_value.clone_from(&result);
            *item = ByteArray::from(result);
            self.current_idx += 1;
        }

        self.num_values -= num_values;
        Ok(num_values)
    }

    fn values_left(&self) -> usize {
        self.num_values
    }

    fn encoding(&self) -> Encoding {
        Encoding::DELTA_BYTE_ARRAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::encoding::{get_encoder, DeltaBitPackEncoder, Encoder};

    #[test]
    fn test_delta_bit_packed_reference_vector() {
        // Header: block_size=128, miniblocks=4, total=66, first=8 (zigzag 0x10).
        // One block: min_delta=-1 (zigzag 0x01), miniblock widths [4, 3, 2, 1].
        let mut data: Vec<u8> = vec![0x80, 0x01, 0x04, 0x42, 0x10];
        data.push(0x01);
        data.extend_from_slice(&[0x04, 0x03, 0x02, 0x01]);
        // miniblock 1 (width 4): deltas [1 x 8, 0 x 24]
        data.extend_from_slice(&[
            0b00010001, 0b00010001, 0b00010001, 0b00010001, 0, 0, 0, 0, 0, 0, 0, 0, 0b00011001,
            0b00010001, 0b00010001, 0b00010001,
        ]);
        // miniblock 2 (width 3): deltas [1 x 32]
        data.extend_from_slice(&[
            0b01001001, 0b10010010, 0b00100100, 0b01001001, 0b10010010, 0b00100100, 0b01001001,
            0b10010010, 0b00100100, 0b01001001, 0b10010010, 0b00100100,
        ]);
        // miniblock 3 (width 2): deltas [1 x 32]
        data.extend_from_slice(&[
            0b01010101, 0b01010101, 0b01010101, 0b01010101, 0b01010101, 0b01010101, 0b01010101,
            0b01010101,
        ]);
        // miniblock 4 (width 1): deltas [1 x 32]
        data.extend_from_slice(&[0b11111111, 0b11111111, 0b11111111, 0b11111111]);

        let mut decoder = DeltaBitPackDecoder::<Int32Type>::new();
        decoder.set_data(Bytes::from(data), 66).unwrap();
        assert_eq!(decoder.values_left(), 66);

        let mut out = vec![0i32; 10000];
        let n_read = decoder.get(&mut out).unwrap();
        assert_eq!(n_read, 66);
        out.truncate(n_read);

        #[rustfmt::skip]
        let expected: Vec<i32> = vec![
            8,
            8, 8, 8, 8, 8, 8, 8, 8,
            7, 6, 5, 4, 3, 2, 1, 0,
            -1, -2, -3, -4, -5, -6, -7, -8,
            0, 0, 0, 0, 0, 0, 0, 0,

            0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0,

            0,
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn test_delta_bit_packed_truncated_header() {
        let mut decoder = DeltaBitPackDecoder::<Int32Type>::new();
        let err = decoder.set_data(Bytes::from_static(&[0x80, 0x01]), 0).unwrap_err();
        assert!(err.to_string().contains("mini_blocks_per_block"));
    }

    #[test]
    fn test_delta_bit_packed_invalid_miniblock_count() {
        // block_size=128, miniblocks=3 does not divide evenly
        let data = vec![0x80, 0x01, 0x03, 0x01, 0x00];
        let mut decoder = DeltaBitPackDecoder::<Int32Type>::new();
        let err = decoder.set_data(Bytes::from(data), 0).unwrap_err();
        assert!(err.to_string().contains("multiple of"));
    }

    #[test]
    fn test_delta_bit_packed_consumes_trailing_padding() {
        // Encode 3 values; the final miniblock is padded. `get_offset` must
        // point past the padding so follow-on streams can pick up correctly.
        let mut encoder = DeltaBitPackEncoder::<Int32Type>::new().unwrap();
        encoder.put(&[10, 11, 9]).unwrap();
        let encoded = encoder.flush_buffer().unwrap();
        let total_len = encoded.len();

        let mut decoder = DeltaBitPackDecoder::<Int32Type>::new();
        decoder.set_data(encoded, 3).unwrap();
        let mut out = vec![0i32; 3];
        assert_eq!(decoder.get(&mut out).unwrap(), 3);
        assert_eq!(out, vec![10, 11, 9]);
        assert_eq!(decoder.get_offset(), total_len);
    }

    #[test]
    fn test_dict_decoder_index_out_of_range() {
        // Dictionary of one entry, but an index stream referencing entry 3
        let mut plain = PlainDecoder::<Int32Type>::new(0);
        let mut plain_data = vec![];
        plain_data.extend_from_slice(&42i32.to_le_bytes());
        plain.set_data(Bytes::from(plain_data), 1).unwrap();

        let mut decoder = DictDecoder::<Int32Type>::new();
        decoder.set_dict(Box::new(plain)).unwrap();

        // bit width 2, rle run of 8 copies of index 3
        let data = vec![2u8, 0b00010000, 0x03];
        decoder.set_data(Bytes::from(data), 8).unwrap();
        let mut out = vec![0i32; 8];
        let err = decoder.get(&mut out).unwrap_err();
        assert!(err.to_string().contains("out of bound"));
    }

    #[test]
    fn test_dict_decoder_illegal_bit_width() {
        let mut decoder = DictDecoder::<Int32Type>::new();
        let err = decoder
            .set_data(Bytes::from_static(&[60u8, 0, 0]), 4)
            .unwrap_err();
        assert!(err.to_string().contains("bit width"));
    }

    #[test]
    fn test_delta_length_byte_array_mismatched_lengths() {
        // Encode two values then truncate the value bytes
        let mut encoder = get_encoder::<ByteArrayType>(Encoding::DELTA_LENGTH_BYTE_ARRAY).unwrap();
        encoder
            .put(&[ByteArray::from("hello"), ByteArray::from("world")])
            .unwrap();
        let data = encoder.flush_buffer().unwrap();
        let truncated = data.slice(..data.len() - 1);

        let mut decoder = DeltaLengthByteArrayDecoder::<ByteArrayType>::new();
        let err = decoder.set_data(truncated, 2).unwrap_err();
        assert!(err.to_string().contains("do not add up"));
    }

    #[test]
    fn test_delta_byte_array_roundtrip_values() {
        // Build the stream by hand: prefixes [0, 3, 1], suffixes ["abc", "d", "xy"]
        // -> values ["abc", "abcd", "axy"]
        let mut prefix_encoder = DeltaBitPackEncoder::<Int32Type>::new().unwrap();
        prefix_encoder.put(&[0, 3, 1]).unwrap();
        let prefixes = prefix_encoder.flush_buffer().unwrap();

        let mut suffix_encoder =
            get_encoder::<ByteArrayType>(Encoding::DELTA_LENGTH_BYTE_ARRAY).unwrap();
        suffix_encoder
            .put(&[
                ByteArray::from("abc"),
                ByteArray::from("d"),
                ByteArray::from("xy"),
            ])
            .unwrap();
        let suffixes = suffix_encoder.flush_buffer().unwrap();

        let mut data = Vec::new();
        data.extend_from_slice(&prefixes);
        data.extend_from_slice(&suffixes);

        let mut decoder = DeltaByteArrayDecoder::<ByteArrayType>::new();
        decoder.set_data(Bytes::from(data), 3).unwrap();
        let mut out = vec![ByteArray::new(); 3];
        assert_eq!(decoder.get(&mut out).unwrap(), 3);
        assert_eq!(out[0], ByteArray::from("abc"));
        assert_eq!(out[1], ByteArray::from("abcd"));
        assert_eq!(out[2], ByteArray::from("axy"));
    }

    #[test]
    fn test_plain_decoder_premature_eof() {
        let mut decoder = PlainDecoder::<ByteArrayType>::new(0);
        // length prefix says 100 bytes but only 2 are present
        let mut data = vec![];
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&[1, 2]);
        decoder.set_data(Bytes::from(data), 1).unwrap();
        let mut out = vec![ByteArray::new(); 1];
        let err = decoder.get(&mut out).unwrap_err();
        assert!(err.to_string().contains("Not enough bytes"));
    }
}
