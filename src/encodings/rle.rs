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

//! RLE/Bit-Packing hybrid encoding.
//!
//! The grammar for this encoding looks like the following (copied verbatim from
//! the Parquet format documentation):
//!
//! ```text
//! rle-bit-packed-hybrid: <length> <encoded-data>
//! length := length of the <encoded-data> in bytes stored as 4 bytes little endian
//! encoded-data := <run>*
//! run := <bit-packed-run> | <rle-run>
//! bit-packed-run := <bit-packed-header> <bit-packed-values>
//! bit-packed-header := varint-encode(<bit-pack-count> << 1 | 1)
//! // we always bit-pack a multiple of 8 values at a time, so we only store the
//! // number of values / 8
//! bit-pack-count := (number of values in this run) / 8
//! bit-packed-values := *see 1 below*
//! rle-run := <rle-header> <repeated-value>
//! rle-header := varint-encode( (number of times repeated) << 1)
//! repeated-value := value that is repeated, using a fixed-width of
//! round-up-to-next-byte(bit-width)
//! ```

use bytes::Bytes;

use crate::errors::{ParquetError, Result};
use crate::util::bit_util::{ceil, BitReader, BitWriter, FromBytes};

/// A RLE/Bit-Packing hybrid encoder.
///
/// Values are buffered in groups of 8. Once a value repeats at least 8 times an
/// RLE run is committed; otherwise full groups are bit-packed. The backing
/// buffer grows on demand, so `put` is infallible.
pub struct RleEncoder {
    /// Number of bits needed to encode the value. Must be in the range of [0, 64].
    bit_width: u8,

    /// Underlying writer which holds an internal buffer.
    bit_writer: BitWriter,

    /// Buffered values for bit-packed runs.
    buffered_values: [u64; 8],

    /// Number of current buffered values. Must be less than 8.
    num_buffered_values: usize,

    /// The current (also last) value that was written and the count of how many
    /// times in a row that value has been seen.
    current_value: u64,

    /// The number of repetitions for `current_value`. If this gets too high we'd
    /// switch to use RLE encoding.
    repeat_count: usize,

    /// Number of bit-packed values in the current run. This doesn't include values
    /// in `buffered_values`.
    bit_packed_count: usize,

    /// The position of the indicator byte in the `bit_writer`.
    indicator_byte_pos: i64,
}

impl RleEncoder {
    /// Creates a new encoder for values of width `bit_width`.
    pub fn new(bit_width: u8, buffer_len: usize) -> Self {
        let buffer = Vec::with_capacity(buffer_len);
        RleEncoder::new_from_buf(bit_width, buffer)
    }

    /// Initialize the encoder from existing `buffer`.
    pub fn new_from_buf(bit_width: u8, buffer: Vec<u8>) -> Self {
        RleEncoder {
            bit_width,
            bit_writer: BitWriter::new_from_buf(buffer),
            buffered_values: [0; 8],
            num_buffered_values: 0,
            current_value: 0,
            repeat_count: 0,
            bit_packed_count: 0,
            indicator_byte_pos: -1,
        }
    }

    /// Returns the maximum buffer size to encode `num_values` values with
    /// `bit_width`.
    pub fn max_buffer_size(bit_width: u8, num_values: usize) -> usize {
        // The maximum size occurs with the shortest possible runs of 8
        let num_runs = ceil(num_values, 8);

        // The number of bytes in a run of 8
        let bytes_per_run = bit_width as usize;

        // The maximum size if stored as shortest possible bit packed runs of 8
        let bit_packed_max_size = num_runs + num_runs * bytes_per_run;

        // The length of `num_values` RLE runs of length 1
        let rle_max_size = num_values * (1 + ceil(bit_width as usize, 8));

        bit_packed_max_size.max(rle_max_size)
    }

    /// Encodes `value`, which must be representable with `bit_width` bits.
    #[inline]
    pub fn put(&mut self, value: u64) {
        // This function buffers 8 values at a time. After seeing 8 values, it
        // decides whether the current run should be converted to a bit-packed or
        // RLE run.
        if self.current_value == value {
            self.repeat_count += 1;
            if self.repeat_count > 8 {
                // This is just a continuation of the current run. No need to buffer the
                // values.
                return;
            }
        } else {
            if self.repeat_count >= 8 {
                // The current RLE run has ended and we've gathered enough. Flush first.
                debug_assert_eq!(self.bit_packed_count, 0);
                self.flush_rle_run();
            }
            self.repeat_count = 1;
            self.current_value = value;
        }

        self.buffered_values[self.num_buffered_values] = value;
        self.num_buffered_values += 1;
        if self.num_buffered_values == 8 {
            // Buffered values are full. Flush them.
            debug_assert_eq!(self.bit_packed_count % 8, 0);
            self.flush_buffered_values();
        }
    }

    /// Flushes any pending values (padding the final bit-packed group with
    /// zeros), finalising the stream.
    #[inline]
    pub fn flush(&mut self) {
        if self.bit_packed_count > 0 || self.repeat_count > 0 || self.num_buffered_values > 0 {
            let all_repeat = self.bit_packed_count == 0
                && (self.repeat_count == self.num_buffered_values || self.num_buffered_values == 0);
            if self.repeat_count > 0 && all_repeat {
                self.flush_rle_run();
            } else {
                // Buffer the last group of bit-packed values to 8 by padding with 0s.
                if self.num_buffered_values > 0 {
                    while self.num_buffered_values < 8 {
                        self.buffered_values[self.num_buffered_values] = 0;
                        self.num_buffered_values += 1;
                    }
                }
                self.bit_packed_count += self.num_buffered_values;
                self.flush_bit_packed_run(true);
                self.repeat_count = 0;
            }
        }
    }

    /// Flushes and returns the underlying byte buffer.
    pub fn consume(mut self) -> Vec<u8> {
        self.flush();
        self.bit_writer.consume()
    }

    /// Borrows the current encoded bytes, flushing any pending run first.
    pub fn flush_buffer(&mut self) -> &[u8] {
        self.flush();
        self.bit_writer.flush_buffer()
    }

    /// Clears the encoder for reuse, keeping the allocation.
    pub fn clear(&mut self) {
        self.bit_writer.clear();
        self.num_buffered_values = 0;
        self.current_value = 0;
        self.repeat_count = 0;
        self.bit_packed_count = 0;
        self.indicator_byte_pos = -1;
    }

    /// Returns the current number of encoded bytes, counting any pending run at
    /// its maximum encoded size.
    pub fn len(&self) -> usize {
        let buffered_bytes = if self.repeat_count >= 8 {
            // Open RLE run, worst case 5 byte header + value
            5 + ceil(self.bit_width as usize, 8)
        } else {
            // Open bit-packed run, worst case 1 byte header + packed group
            let groups = ceil(self.bit_packed_count + self.num_buffered_values, 8);
            1 + groups * self.bit_width as usize
        };
        self.bit_writer.bytes_written() + buffered_bytes
    }

    fn flush_rle_run(&mut self) {
        assert!(self.repeat_count > 0);
        let indicator_value = self.repeat_count << 1;
        self.bit_writer.put_vlq_int(indicator_value as u64);
        self.bit_writer
            .put_aligned(self.current_value, ceil(self.bit_width as usize, 8));
        self.num_buffered_values = 0;
        self.repeat_count = 0;
    }

    fn flush_bit_packed_run(&mut self, update_indicator_byte: bool) {
        if self.indicator_byte_pos < 0 {
            self.indicator_byte_pos = self.bit_writer.skip(1) as i64;
        }

        // Write all buffered values as bit-packed literals
        for i in 0..self.num_buffered_values {
            self.bit_writer
                .put_value(self.buffered_values[i], self.bit_width as usize);
        }
        self.num_buffered_values = 0;
        if update_indicator_byte {
            // Take care of the indicator byte. The bit packed header stores the number
            // of groups of 8.
            let num_groups = self.bit_packed_count / 8;
            let indicator_byte = ((num_groups << 1) | 1) as u64;
            self.bit_writer
                .put_aligned_offset(indicator_byte, self.indicator_byte_pos as usize, 1);
            self.indicator_byte_pos = -1;
            self.bit_packed_count = 0;
        }
    }

    #[inline(never)]
    fn flush_buffered_values(&mut self) {
        if self.repeat_count >= 8 {
            // The current group of 8 is all part of an RLE run, nothing to bit-pack.
            self.num_buffered_values = 0;
            if self.bit_packed_count > 0 {
                // In this case we choose RLE encoding. Flush the current buffered values
                // as bit packed encoding.
                debug_assert_eq!(self.bit_packed_count % 8, 0);
                self.flush_bit_packed_run(true);
            }
            return;
        }

        self.bit_packed_count += self.num_buffered_values;
        let num_groups = self.bit_packed_count / 8;
        const MAX_GROUPS: usize = (u8::MAX >> 1) as usize;
        if num_groups + 1 >= MAX_GROUPS {
            // We've reached the maximum value that can be hold in a single byte
            // indicator. Flush now.
            self.flush_bit_packed_run(true);
        } else {
            self.flush_bit_packed_run(false);
        }
        self.repeat_count = 0;
    }
}

/// A RLE/Bit-Packing hybrid decoder.
pub struct RleDecoder {
    /// Number of bits used to encode the value. Must be between [0, 64].
    bit_width: u8,

    /// Bit reader loaded with input buffer.
    bit_reader: Option<BitReader>,

    /// The remaining number of values in RLE for this run
    rle_left: u32,

    /// The remaining number of values in Bit-Packing for this run
    bit_packed_left: u32,

    /// The current value for the case of RLE mode
    current_value: Option<u64>,
}

impl RleDecoder {
    /// Creates a decoder for values of width `bit_width`.
    pub fn new(bit_width: u8) -> Self {
        RleDecoder {
            bit_width,
            rle_left: 0,
            bit_packed_left: 0,
            bit_reader: None,
            current_value: None,
        }
    }

    /// Sets the byte buffer to decode from.
    pub fn set_data(&mut self, data: Bytes) {
        self.bit_reader = Some(BitReader::new(data));
        self.rle_left = 0;
        self.bit_packed_left = 0;
        self.current_value = None;
    }

    /// Gets the next value. Returns `None` when the stream is exhausted.
    #[inline]
    pub fn get<T: FromBytes>(&mut self) -> Result<Option<T>> {
        let mut buffer = [T::default(); 1];
        match self.get_batch(&mut buffer)? {
            0 => Ok(None),
            _ => Ok(Some(buffer[0])),
        }
    }

    /// Reads up to `buffer.len()` values. Partial reads straddle run boundaries.
    /// Returns the number of values actually decoded, which may be smaller when
    /// the stream (or the final run) is truncated.
    pub fn get_batch<T: FromBytes>(&mut self, buffer: &mut [T]) -> Result<usize> {
        assert!(std::mem::size_of::<T>() <= 8);

        let mut values_read = 0;
        while values_read < buffer.len() {
            if self.rle_left > 0 {
                let num_values =
                    std::cmp::min(buffer.len() - values_read, self.rle_left as usize);
                let repeated_value = T::from_u64(self.current_value.unwrap());
                for item in buffer.iter_mut().skip(values_read).take(num_values) {
                    *item = repeated_value;
                }
                self.rle_left -= num_values as u32;
                values_read += num_values;
            } else if self.bit_packed_left > 0 {
                let mut num_values =
                    std::cmp::min(buffer.len() - values_read, self.bit_packed_left as usize);
                let bit_reader = self.bit_reader.as_mut().expect("bit_reader should be set");

                num_values = bit_reader.get_batch(
                    &mut buffer[values_read..values_read + num_values],
                    self.bit_width as usize,
                );
                if num_values == 0 {
                    // Handle writers which truncate the final block
                    self.bit_packed_left = 0;
                    continue;
                }
                self.bit_packed_left -= num_values as u32;
                values_read += num_values;
            } else if !self.reload() {
                break;
            }
        }

        Ok(values_read)
    }

    /// Reads up to `max_values` dictionary indices and gathers the corresponding
    /// `dict` entries into `buffer`.
    pub fn get_batch_with_dict<T>(
        &mut self,
        dict: &[T],
        buffer: &mut [T],
        max_values: usize,
    ) -> Result<usize>
    where
        T: Default + Clone,
    {
        assert!(buffer.len() >= max_values);

        let mut values_read = 0;
        while values_read < max_values {
            if self.rle_left > 0 {
                let num_values =
                    std::cmp::min(max_values - values_read, self.rle_left as usize);
                let dict_idx = self.current_value.unwrap() as usize;
                if dict_idx >= dict.len() {
                    return Err(corrupted_err!(
                        "Index {} out of bound (dictionary has {} entries)",
                        dict_idx,
                        dict.len()
                    ));
                }
                let dict_value = &dict[dict_idx];
                for i in 0..num_values {
                    buffer[values_read + i] = dict_value.clone();
                }
                self.rle_left -= num_values as u32;
                values_read += num_values;
            } else if self.bit_packed_left > 0 {
                let num_values =
                    std::cmp::min(max_values - values_read, self.bit_packed_left as usize);
                let bit_reader = self.bit_reader.as_mut().expect("bit_reader should be set");

                let mut indices: [u64; 1024] = [0; 1024];
                let mut remaining = num_values;
                while remaining > 0 {
                    let chunk = std::cmp::min(remaining, indices.len());
                    let read = bit_reader
                        .get_batch(&mut indices[..chunk], self.bit_width as usize);
                    if read == 0 {
                        self.bit_packed_left = 0;
                        break;
                    }
                    for index in indices.iter().take(read) {
                        let dict_idx = *index as usize;
                        if dict_idx >= dict.len() {
                            return Err(corrupted_err!(
                                "Index {} out of bound (dictionary has {} entries)",
                                dict_idx,
                                dict.len()
                            ));
                        }
                        buffer[values_read] = dict[dict_idx].clone();
                        values_read += 1;
                    }
                    self.bit_packed_left -= read as u32;
                    remaining -= read;
                }
                if remaining == num_values {
                    // No progress at all, the final run is truncated
                    break;
                }
            } else if !self.reload() {
                break;
            }
        }

        Ok(values_read)
    }

    #[inline]
    fn reload(&mut self) -> bool {
        let bit_reader = self.bit_reader.as_mut().expect("bit_reader should be set");

        if let Some(indicator_value) = bit_reader.get_vlq_int() {
            if indicator_value & 1 == 1 {
                self.bit_packed_left = ((indicator_value >> 1) * 8) as u32;
            } else {
                self.rle_left = (indicator_value >> 1) as u32;
                let value_width = ceil(self.bit_width as usize, 8);
                self.current_value = bit_reader.get_aligned::<u64>(value_width);
                if self.current_value.is_none() {
                    // Truncated RLE run value
                    self.rle_left = 0;
                    return false;
                }
            }
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{distributions::Standard, thread_rng, Rng};

    #[test]
    fn test_rle_decode_int32() {
        // bit-packed-run {0, 1, 2, 3, 4, 5, 6, 7}, then rle-run {5, 5, 5, 5}
        let data = Bytes::from(vec![0x03, 0x88, 0xC6, 0xFA, 0x08, 0x05]);
        let mut decoder = RleDecoder::new(3);
        decoder.set_data(data);
        let mut buffer = vec![0i32; 12];
        let expected = vec![0, 1, 2, 3, 4, 5, 6, 7, 5, 5, 5, 5];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 12);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_rle_decode_partial_batches() {
        let data = Bytes::from(vec![0x03, 0x88, 0xC6, 0xFA, 0x08, 0x05]);
        let mut decoder = RleDecoder::new(3);
        decoder.set_data(data);

        // batches straddle the run boundary
        let mut buffer = vec![0i32; 6];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 6);
        assert_eq!(buffer, vec![0, 1, 2, 3, 4, 5]);
        let mut buffer = vec![0i32; 4];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 4);
        assert_eq!(buffer, vec![6, 7, 5, 5]);
        let mut buffer = vec![0i32; 100];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 2);
        assert_eq!(&buffer[..2], &[5, 5]);
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_rle_decode_long_rle_run_uleb_header() {
        // rle-run with 64 copies of 5, with a two byte ULEB128 header
        let data = Bytes::from(vec![0b10000000, 0b00000001, 0b00000101]);
        let mut decoder = RleDecoder::new(8);
        decoder.set_data(data);
        let mut buffer = vec![0i32; 100];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 64);
        assert!(buffer[..64].iter().all(|v| *v == 5));
    }

    #[test]
    fn test_rle_decode_truncated_rle_run() {
        // rle-run header without the value bytes
        let data = Bytes::from(vec![0b00001000]);
        let mut decoder = RleDecoder::new(3);
        decoder.set_data(data);
        let mut buffer = vec![0i32; 4];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_rle_decode_truncated_uleb_header() {
        let data = Bytes::from(vec![0b10000000]);
        let mut decoder = RleDecoder::new(3);
        decoder.set_data(data);
        let mut buffer = vec![0i32; 4];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_rle_decode_with_dict() {
        // rle-run of 8 zeros, then bit-packed run {0, 1, 2, 0, 1, 2, 0, 1}
        let mut encoder = RleEncoder::new(2, 64);
        let indices = [0u64, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 0, 1, 2, 0, 1];
        for i in indices {
            encoder.put(i);
        }
        let data = Bytes::from(encoder.consume());
        let mut decoder = RleDecoder::new(2);
        decoder.set_data(data);

        let dict = vec!["aaa", "bbb", "ccc"];
        let mut buffer = vec![""; 16];
        assert_eq!(
            decoder.get_batch_with_dict(&dict, &mut buffer, 16).unwrap(),
            16
        );
        let expected: Vec<_> = indices.iter().map(|i| dict[*i as usize]).collect();
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_rle_decode_dict_index_out_of_bounds() {
        let mut encoder = RleEncoder::new(4, 64);
        for _ in 0..8 {
            encoder.put(15);
        }
        let data = Bytes::from(encoder.consume());
        let mut decoder = RleDecoder::new(4);
        decoder.set_data(data);

        let dict = vec![1i32, 2, 3];
        let mut buffer = vec![0i32; 8];
        let err = decoder
            .get_batch_with_dict(&dict, &mut buffer, 8)
            .unwrap_err();
        assert!(
            err.to_string().contains("out of bound"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_rle_encode_repeated_run() {
        let mut encoder = RleEncoder::new(3, 64);
        for _ in 0..100 {
            encoder.put(4);
        }
        let buffer = encoder.consume();
        // 100 << 1 = 200 encodes as [0xC8, 0x01], then the value in one byte
        assert_eq!(buffer, vec![0xC8, 0x01, 0x04]);
    }

    #[test]
    fn test_rle_roundtrip_all_bit_widths() {
        let mut rng = thread_rng();
        for bit_width in 0..=32u8 {
            let max: u64 = if bit_width == 0 {
                0
            } else {
                (1u64 << bit_width) - 1
            };
            let values: Vec<u64> = (0..203)
                .map(|_| rng.sample::<u64, _>(Standard) & max)
                .collect();
            let mut encoder = RleEncoder::new(bit_width, 64);
            for v in &values {
                encoder.put(*v);
            }
            let data = Bytes::from(encoder.consume());
            let mut decoder = RleDecoder::new(bit_width);
            decoder.set_data(data);
            let mut buffer = vec![0u64; values.len()];
            assert_eq!(decoder.get_batch(&mut buffer).unwrap(), values.len());
            assert_eq!(buffer, values);
        }
    }

    #[test]
    fn test_rle_roundtrip_mixed_runs() {
        // Alternating short runs exercise both encodings and the run-switch logic
        let mut values = Vec::new();
        for i in 0..50u64 {
            values.extend(std::iter::repeat(i % 5).take((i % 17 + 1) as usize));
            values.push(i % 3);
        }
        let mut encoder = RleEncoder::new(5, 64);
        for v in &values {
            encoder.put(*v);
        }
        let mut decoder = RleDecoder::new(5);
        decoder.set_data(Bytes::from(encoder.consume()));
        let mut buffer = vec![0u64; values.len() + 10];
        assert_eq!(decoder.get_batch(&mut buffer).unwrap(), values.len());
        assert_eq!(&buffer[..values.len()], &values[..]);
    }
}
