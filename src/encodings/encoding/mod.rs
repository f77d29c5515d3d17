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

//! Contains all supported encoders for Parquet.

use std::cmp;
use std::marker::PhantomData;

use bytes::Bytes;

use crate::basic::{Encoding, Type};
use crate::data_type::private::ParquetValueType;
use crate::data_type::DataType;
use crate::encodings::rle::RleEncoder;
use crate::errors::{ParquetError, Result};
use crate::util::bit_util::{num_required_bits, BitWriter};

pub mod dict_encoder;

pub use dict_encoder::DictEncoder;

// ----------------------------------------------------------------------
// Encoders

/// An Parquet encoder for the data type `T`.
///
/// Currently this allocates internal buffers for the encoded values. After done
/// putting values, caller should call `flush_buffer()` to get an immutable buffer
/// pointer.
pub trait Encoder<T: DataType>: Send {
    /// Encodes data from `values`.
    fn put(&mut self, values: &[T::T]) -> Result<()>;

    /// Returns the encoding type of this encoder.
    fn encoding(&self) -> Encoding;

    /// Returns an estimate of the encoded data, in bytes.
    /// Method call must be O(1).
    fn estimated_data_encoded_size(&self) -> usize;

    /// Flushes the underlying byte buffer that's being processed by this encoder, and
    /// return the immutable copy of it. This will also reset the internal state.
    fn flush_buffer(&mut self) -> Result<Bytes>;
}

impl<T: DataType> std::fmt::Debug for dyn Encoder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("dyn Encoder").field("encoding", &self.encoding()).finish()
    }
}

pub(crate) mod private {
    use super::*;

    /// A trait that allows getting an [`Encoder`] implementation for a [`DataType`] with
    /// the corresponding [`ParquetValueType`]. This is necessary to support
    /// [`Encoder`] implementations that may not be applicable for all [`DataType`]
    /// and by extension all [`ParquetValueType`]
    pub trait GetEncoder {
        fn get_encoder<T: DataType<T = Self>>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
            get_encoder_default(encoding)
        }
    }

    fn get_encoder_default<T: DataType>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
        match encoding {
            Encoding::PLAIN => Ok(Box::new(PlainEncoder::new())),
            Encoding::RLE_DICTIONARY | Encoding::PLAIN_DICTIONARY => Err(corrupted_err!(
                "Cannot initialize this encoding through this function"
            )),
            Encoding::RLE
            | Encoding::DELTA_BINARY_PACKED
            | Encoding::DELTA_LENGTH_BYTE_ARRAY
            | Encoding::DELTA_BYTE_ARRAY => Err(unsupported_err!(
                "Encoding {} is not valid for type {}",
                encoding,
                T::get_physical_type()
            )),
            e => Err(unsupported_err!("Encoder for {} is not supported", e)),
        }
    }

    impl GetEncoder for bool {
        fn get_encoder<T: DataType<T = Self>>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
            match encoding {
                Encoding::RLE => Ok(Box::new(RleValueEncoder::new()?)),
                _ => get_encoder_default(encoding),
            }
        }
    }

    impl GetEncoder for i32 {
        fn get_encoder<T: DataType<T = Self>>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
            match encoding {
                Encoding::DELTA_BINARY_PACKED => Ok(Box::new(DeltaBitPackEncoder::new()?)),
                _ => get_encoder_default(encoding),
            }
        }
    }

    impl GetEncoder for i64 {
        fn get_encoder<T: DataType<T = Self>>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
            match encoding {
                Encoding::DELTA_BINARY_PACKED => Ok(Box::new(DeltaBitPackEncoder::new()?)),
                _ => get_encoder_default(encoding),
            }
        }
    }

    impl GetEncoder for f32 {}
    impl GetEncoder for f64 {}
    impl GetEncoder for crate::data_type::Int96 {}

    impl GetEncoder for crate::data_type::ByteArray {
        fn get_encoder<T: DataType<T = Self>>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
            match encoding {
                Encoding::DELTA_LENGTH_BYTE_ARRAY => {
                    Ok(Box::new(DeltaLengthByteArrayEncoder::new()?))
                }
                _ => get_encoder_default(encoding),
            }
        }
    }

    impl GetEncoder for crate::data_type::FixedLenByteArray {}
}

/// Gets a encoder for the particular data type `T` and encoding `encoding`.
pub fn get_encoder<T: DataType>(encoding: Encoding) -> Result<Box<dyn Encoder<T>>> {
    if T::get_physical_type() == Type::INT96 {
        return Err(unsupported_err!(
            "INT96 is deprecated and writes of this type are unsupported"
        ));
    }
    use self::private::GetEncoder;
    T::T::get_encoder(encoding)
}

// ----------------------------------------------------------------------
// PLAIN encoding

/// Plain encoding that supports all types.
/// Values are encoded back to back.
/// The plain encoding is used whenever a more efficient encoding can not be used.
/// It stores the data in the following format:
/// - BOOLEAN - 1 bit per value, 0 is false; 1 is true.
/// - INT32 - 4 bytes per value, stored as little-endian.
/// - INT64 - 8 bytes per value, stored as little-endian.
/// - FLOAT - 4 bytes per value, stored as IEEE little-endian.
/// - DOUBLE - 8 bytes per value, stored as IEEE little-endian.
/// - BYTE_ARRAY - 4 byte length stored as little endian, followed by bytes.
/// - FIXED_LEN_BYTE_ARRAY - just the bytes are stored.
pub struct PlainEncoder<T: DataType> {
    buffer: Vec<u8>,
    bit_writer: BitWriter,
    _phantom: PhantomData<T>,
}

impl<T: DataType> Default for PlainEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataType> PlainEncoder<T> {
    /// Creates new plain encoder.
    pub fn new() -> Self {
        Self {
            buffer: vec![],
            bit_writer: BitWriter::new(256),
            _phantom: PhantomData,
        }
    }
}

impl<T: DataType> Encoder<T> for PlainEncoder<T> {
    fn put(&mut self, values: &[T::T]) -> Result<()> {
        T::T::encode(values, &mut self.buffer, &mut self.bit_writer)?;
        Ok(())
    }

    fn encoding(&self) -> Encoding {
        Encoding::PLAIN
    }

    fn estimated_data_encoded_size(&self) -> usize {
        self.buffer.len() + self.bit_writer.bytes_written()
    }

    fn flush_buffer(&mut self) -> Result<Bytes> {
        self.buffer.extend_from_slice(self.bit_writer.flush_buffer());
        self.bit_writer.clear();
        Ok(std::mem::take(&mut self.buffer).into())
    }
}

// ----------------------------------------------------------------------
// RLE encoding

const DEFAULT_RLE_BUFFER_LEN: usize = 1024;

/// RLE/Bit-Packing hybrid encoding for values.
/// Currently is used only for data pages v2 and supports boolean types.
pub struct RleValueEncoder<T: DataType> {
    // Buffer with raw values that we collect,
    // when flushing buffer they are encoded using RLE encoder
    encoder: Option<RleEncoder>,
    _phantom: PhantomData<T>,
}

impl<T: DataType> RleValueEncoder<T> {
    /// Creates new rle value encoder.
    pub fn new() -> Result<Self> {
        ensure_phys_ty!(Type::BOOLEAN, "RleValueEncoder only supports BoolType");
        Ok(Self {
            encoder: None,
            _phantom: PhantomData,
        })
    }
}

impl<T: DataType> Encoder<T> for RleValueEncoder<T> {
    #[inline]
    fn put(&mut self, values: &[T::T]) -> Result<()> {
        let rle_encoder = self.encoder.get_or_insert_with(|| {
            // Reserve space for length
            let mut buffer = Vec::with_capacity(DEFAULT_RLE_BUFFER_LEN);
            buffer.extend_from_slice(&[0; 4]);
            RleEncoder::new_from_buf(1, buffer)
        });

        for value in values {
            let value = value.as_i64()? as u64;
            rle_encoder.put(value)
        }
        Ok(())
    }

    fn encoding(&self) -> Encoding {
        Encoding::RLE
    }

    fn estimated_data_encoded_size(&self) -> usize {
        match self.encoder {
            Some(ref enc) => enc.len(),
            None => 0,
        }
    }

    fn flush_buffer(&mut self) -> Result<Bytes> {
        let rle_encoder = self
            .encoder
            .take()
            .ok_or_else(|| corrupted_err!("RLE value encoder is not initialized"))?;

        // Flush all encoder buffers and raw values
        let mut buf = rle_encoder.consume();
        assert!(buf.len() >= 4, "should have had padding inserted");

        // Note that buf does not have any offset, all data is encoded bytes
        let len = (buf.len() - 4) as i32;
        buf[..4].copy_from_slice(&len.to_le_bytes());

        Ok(buf.into())
    }
}

// ----------------------------------------------------------------------
// DELTA_BINARY_PACKED encoding

const MAX_PAGE_HEADER_WRITER_SIZE: usize = 32;
const DEFAULT_BLOCK_SIZE: usize = 128;
const DEFAULT_NUM_MINI_BLOCKS: usize = 4;

/// Delta bit packed encoder.
/// Consists of a header followed by blocks of delta encoded values binary packed.
///
/// Delta-binary-packing:
/// ```shell
///   [page-header] [block 1], [block 2], ... [block N]
/// ```
///
/// Each page header consists of:
/// ```shell
///   [block size] [number of miniblocks in a block] [total value count] [first value]
/// ```
///
/// Each block consists of:
/// ```shell
///   [min delta] [list of bitwidths of miniblocks] [miniblocks]
/// ```
///
/// The encoder uses i64 delta arithmetic throughout, so INT64 columns whose
/// deltas overflow i32 (e.g. i64::MAX - i64::MIN) encode correctly via
/// wrapping arithmetic.
pub struct DeltaBitPackEncoder<T: DataType> {
    page_header_writer: BitWriter,
    bit_writer: BitWriter,
    total_values: usize,
    first_value: i64,
    current_value: i64,
    block_size: usize,
    mini_block_size: usize,
    num_mini_blocks: usize,
    values_in_block: usize,
    deltas: Vec<i64>,
    _phantom: PhantomData<T>,
}

impl<T: DataType> DeltaBitPackEncoder<T> {
    /// Creates new delta bit packed encoder.
    pub fn new() -> Result<Self> {
        ensure_phys_ty!(
            Type::INT32 | Type::INT64,
            "DeltaBitPackEncoder only supports Int32Type and Int64Type"
        );
        let block_size = DEFAULT_BLOCK_SIZE;
        let num_mini_blocks = DEFAULT_NUM_MINI_BLOCKS;
        let mini_block_size = block_size / num_mini_blocks;
        assert_eq!(mini_block_size % 8, 0);

        Ok(Self {
            page_header_writer: BitWriter::new(MAX_PAGE_HEADER_WRITER_SIZE),
            bit_writer: BitWriter::new(512),
            total_values: 0,
            first_value: 0,
            current_value: 0, // current value to keep adding deltas
            block_size,       // can write fewer values than block size for last block
            mini_block_size,
            num_mini_blocks,
            values_in_block: 0, // will be at most block_size
            deltas: vec![0; block_size],
            _phantom: PhantomData,
        })
    }

    /// Writes page header for blocks, this method is invoked when we are done encoding
    /// values. It is also okay to encode when no values have been provided
    fn write_page_header(&mut self) {
        // We ignore the result of each 'put' operation, because
        // MAX_PAGE_HEADER_WRITER_SIZE is chosen to fit all header values and
        // guarantees that writes will not fail.

        // Write the size of each block
        self.page_header_writer.put_vlq_int(self.block_size as u64);
        // Write the number of mini blocks
        self.page_header_writer
            .put_vlq_int(self.num_mini_blocks as u64);
        // Write the number of all values (including non-encoded first value)
        self.page_header_writer
            .put_vlq_int(self.total_values as u64);
        // Write first value
        self.page_header_writer
            .put_zigzag_vlq_int(self.first_value);
    }

    // Write current delta buffer (<= 'block size' values) into bit writer
    fn flush_block_values(&mut self) -> Result<()> {
        if self.values_in_block == 0 {
            return Ok(());
        }

        let mut min_delta = i64::MAX;
        for i in 0..self.values_in_block {
            min_delta = cmp::min(min_delta, self.deltas[i]);
        }

        // Write min delta
        self.bit_writer.put_zigzag_vlq_int(min_delta);

        // Slots for the bit widths of the miniblocks; unused trailing miniblocks
        // keep bit width 0
        let offset = self.bit_writer.skip(self.num_mini_blocks);

        for i in 0..self.num_mini_blocks {
            let start = i * self.mini_block_size;
            if start >= self.values_in_block {
                break;
            }
            let end = cmp::min(start + self.mini_block_size, self.values_in_block);

            // Compute the max delta in the current mini block
            let mut max_packed: u64 = 0;
            for delta in &self.deltas[start..end] {
                max_packed = cmp::max(max_packed, delta.wrapping_sub(min_delta) as u64);
            }

            // Compute bit width to store (max_delta - min_delta)
            let bit_width = num_required_bits(max_packed);
            self.bit_writer
                .put_aligned_offset(bit_width as u64, offset + i, 1);

            // Encode values in the current mini block, with trailing slots of the
            // final mini block padded with zero deltas
            for delta in &self.deltas[start..end] {
                self.bit_writer
                    .put_value(delta.wrapping_sub(min_delta) as u64, bit_width as usize);
            }
            for _ in end..start + self.mini_block_size {
                self.bit_writer.put_value(0, bit_width as usize);
            }
        }
        self.bit_writer.flush();

        // Reset block state
        self.values_in_block = 0;
        Ok(())
    }
}

impl<T: DataType> Encoder<T> for DeltaBitPackEncoder<T> {
    fn put(&mut self, values: &[T::T]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        // Define values to encode, initialize state
        let mut idx = if self.total_values == 0 {
            self.first_value = values[0].as_i64()?;
            self.current_value = self.first_value;
            self.total_values += 1;
            1
        } else {
            0
        };
        // Add all values (including first value)
        while idx < values.len() {
            let value = values[idx].as_i64()?;
            self.deltas[self.values_in_block] = value.wrapping_sub(self.current_value);
            self.current_value = value;
            idx += 1;
            self.values_in_block += 1;
            self.total_values += 1;
            if self.values_in_block == self.block_size {
                self.flush_block_values()?;
            }
        }
        Ok(())
    }

    fn encoding(&self) -> Encoding {
        Encoding::DELTA_BINARY_PACKED
    }

    fn estimated_data_encoded_size(&self) -> usize {
        self.bit_writer.bytes_written()
    }

    fn flush_buffer(&mut self) -> Result<Bytes> {
        // Write remaining values
        self.flush_block_values()?;
        // Write page header with total values
        self.write_page_header();

        let mut buffer = Vec::new();
        buffer.extend_from_slice(self.page_header_writer.flush_buffer());
        buffer.extend_from_slice(self.bit_writer.flush_buffer());

        // Reset state
        self.page_header_writer.clear();
        self.bit_writer.clear();
        self.total_values = 0;
        self.first_value = 0;
        self.current_value = 0;
        self.values_in_block = 0;

        Ok(buffer.into())
    }
}

// ----------------------------------------------------------------------
// DELTA_LENGTH_BYTE_ARRAY encoding

/// Encoding for byte arrays to separate the length values and the data.
/// The lengths are encoded using DELTA_BINARY_PACKED encoding, data is
/// stored as raw bytes.
pub struct DeltaLengthByteArrayEncoder<T: DataType> {
    // length encoder
    len_encoder: DeltaBitPackEncoder<crate::data_type::Int32Type>,
    // byte array data
    data: Vec<crate::data_type::ByteArray>,
    // data size in bytes of encoded values
    encoded_size: usize,
    _phantom: PhantomData<T>,
}

impl<T: DataType> DeltaLengthByteArrayEncoder<T> {
    /// Creates new delta length byte array encoder.
    pub fn new() -> Result<Self> {
        ensure_phys_ty!(
            Type::BYTE_ARRAY,
            "DeltaLengthByteArrayEncoder only supports ByteArrayType"
        );
        Ok(Self {
            len_encoder: DeltaBitPackEncoder::new()?,
            data: vec![],
            encoded_size: 0,
            _phantom: PhantomData,
        })
    }
}

impl<T: DataType> Encoder<T> for DeltaLengthByteArrayEncoder<T>
where
    T: DataType<T = crate::data_type::ByteArray>,
{
    fn put(&mut self, values: &[T::T]) -> Result<()> {
        let lengths: Vec<i32> = values.iter().map(|byte_array| byte_array.len() as i32).collect();
        self.len_encoder.put(&lengths)?;
        for byte_array in values {
            self.encoded_size += byte_array.len();
            self.data.push(byte_array.clone());
        }
        Ok(())
    }

    fn encoding(&self) -> Encoding {
        Encoding::DELTA_LENGTH_BYTE_ARRAY
    }

    fn estimated_data_encoded_size(&self) -> usize {
        self.len_encoder.estimated_data_encoded_size() + self.encoded_size
    }

    fn flush_buffer(&mut self) -> Result<Bytes> {
        let mut total_bytes = vec![];
        let lengths = self.len_encoder.flush_buffer()?;
        total_bytes.extend_from_slice(&lengths);
        self.data.iter().for_each(|byte_array| {
            total_bytes.extend_from_slice(byte_array.data());
        });
        self.data.clear();
        self.encoded_size = 0;
        Ok(total_bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::{BoolType, ByteArray, ByteArrayType, Int32Type, Int64Type};
    use crate::encodings::decoding::{
        Decoder, DeltaBitPackDecoder, DeltaLengthByteArrayDecoder, PlainDecoder, RleValueDecoder,
    };
    use rand::{thread_rng, Rng};

    fn roundtrip_delta_ints<T>(values: &[T::T])
    where
        T: DataType,
        T::T: Copy + num::FromPrimitive + num::traits::WrappingAdd + crate::util::bit_util::FromBytes,
    {
        let mut encoder = get_encoder::<T>(Encoding::DELTA_BINARY_PACKED).unwrap();
        encoder.put(values).unwrap();
        let data = encoder.flush_buffer().unwrap();

        let mut decoder = DeltaBitPackDecoder::<T>::new();
        decoder.set_data(data, values.len()).unwrap();
        let mut result = vec![T::T::default(); values.len() + 13];
        let num_read = decoder.get(&mut result).unwrap();
        assert_eq!(num_read, values.len());
        assert_eq!(&result[..values.len()], values);
    }

    #[test]
    fn test_delta_bit_packed_int32_roundtrip() {
        let values: Vec<i32> = (0..1000).map(|i| i * 7 - 300).collect();
        roundtrip_delta_ints::<Int32Type>(&values);
    }

    #[test]
    fn test_delta_bit_packed_int32_extremes() {
        let values = vec![i32::MIN, i32::MAX, i32::MIN, i32::MAX, 0, -1, 1];
        roundtrip_delta_ints::<Int32Type>(&values);
    }

    #[test]
    fn test_delta_bit_packed_int64_extremes() {
        let values = vec![i64::MIN, i64::MAX, i64::MIN, i64::MAX, 0, -1, 1];
        roundtrip_delta_ints::<Int64Type>(&values);
    }

    #[test]
    fn test_delta_bit_packed_empty() {
        let values: Vec<i32> = vec![];
        roundtrip_delta_ints::<Int32Type>(&values);
    }

    #[test]
    fn test_delta_bit_packed_single_value() {
        roundtrip_delta_ints::<Int32Type>(&[42]);
    }

    #[test]
    fn test_delta_bit_packed_multiple_blocks() {
        let mut rng = thread_rng();
        let values: Vec<i64> = (0..1023).map(|_| rng.gen_range(-100000..100000)).collect();
        roundtrip_delta_ints::<Int64Type>(&values);
    }

    #[test]
    fn test_delta_bit_packed_batched_puts() {
        let values: Vec<i32> = (0..500).map(|i| i * i).collect();
        let mut encoder = get_encoder::<Int32Type>(Encoding::DELTA_BINARY_PACKED).unwrap();
        for chunk in values.chunks(7) {
            encoder.put(chunk).unwrap();
        }
        let data = encoder.flush_buffer().unwrap();

        let mut decoder = DeltaBitPackDecoder::<Int32Type>::new();
        decoder.set_data(data, values.len()).unwrap();
        let mut result = vec![0i32; values.len()];
        assert_eq!(decoder.get(&mut result).unwrap(), values.len());
        assert_eq!(result, values);
    }

    #[test]
    fn test_rle_bool_roundtrip() {
        let values: Vec<bool> = (0..217).map(|i| i % 7 < 3).collect();
        let mut encoder = get_encoder::<BoolType>(Encoding::RLE).unwrap();
        encoder.put(&values).unwrap();
        let data = encoder.flush_buffer().unwrap();

        let mut decoder = RleValueDecoder::<BoolType>::new();
        decoder.set_data(data, values.len()).unwrap();
        let mut result = vec![false; values.len()];
        assert_eq!(decoder.get(&mut result).unwrap(), values.len());
        assert_eq!(result, values);
    }

    #[test]
    fn test_plain_byte_array_roundtrip() {
        let values: Vec<ByteArray> = vec!["hello", "", "parquet", "aio"]
            .into_iter()
            .map(ByteArray::from)
            .collect();
        let mut encoder = get_encoder::<ByteArrayType>(Encoding::PLAIN).unwrap();
        encoder.put(&values).unwrap();
        let data = encoder.flush_buffer().unwrap();

        let mut decoder = PlainDecoder::<ByteArrayType>::new(0);
        decoder.set_data(data, values.len()).unwrap();
        let mut result = vec![ByteArray::new(); values.len()];
        assert_eq!(decoder.get(&mut result).unwrap(), values.len());
        assert_eq!(result, values);
    }

    #[test]
    fn test_delta_length_byte_array_roundtrip() {
        let values: Vec<ByteArray> = vec!["one", "two", "", "three", "x"]
            .into_iter()
            .map(ByteArray::from)
            .collect();
        let mut encoder = get_encoder::<ByteArrayType>(Encoding::DELTA_LENGTH_BYTE_ARRAY).unwrap();
        encoder.put(&values).unwrap();
        let data = encoder.flush_buffer().unwrap();

        let mut decoder = DeltaLengthByteArrayDecoder::<ByteArrayType>::new();
        decoder.set_data(data, values.len()).unwrap();
        let mut result = vec![ByteArray::new(); values.len()];
        assert_eq!(decoder.get(&mut result).unwrap(), values.len());
        assert_eq!(result, values);
    }

    #[test]
    fn test_invalid_encoder_for_type() {
        let err = get_encoder::<Int32Type>(Encoding::DELTA_LENGTH_BYTE_ARRAY).unwrap_err();
        assert!(err.to_string().contains("not valid for type"));

        let err = get_encoder::<ByteArrayType>(Encoding::DELTA_BINARY_PACKED).unwrap_err();
        assert!(err.to_string().contains("not valid for type"));
    }
}
