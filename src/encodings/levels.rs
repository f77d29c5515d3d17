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

//! Definition and repetition level encoding and decoding.
//!
//! Data page v1 frames RLE levels with a 4-byte little-endian length and also
//! permits the legacy BIT_PACKED encoding; v2 always uses RLE with the length
//! carried in the page header.

use bytes::Bytes;

use crate::basic::Encoding;
use crate::encodings::rle::{RleDecoder, RleEncoder};
use crate::errors::{ParquetError, Result};
use crate::util::bit_util::{ceil, num_required_bits, BitReader};

/// Computes the bit width required to store levels up to and including `max_level`.
#[inline]
pub fn level_bit_width(max_level: i16) -> u8 {
    num_required_bits(max_level as u64)
}

/// Encoder for definition and repetition levels, always RLE on the wire.
///
/// The v1 4-byte length prefix is part of the page layout and is written by the
/// column writer, not by this encoder.
pub struct LevelEncoder {
    encoder: RleEncoder,
}

impl LevelEncoder {
    /// Creates a level encoder for levels up to `max_level`.
    pub fn new(max_level: i16) -> Self {
        Self {
            encoder: RleEncoder::new(level_bit_width(max_level), 64),
        }
    }

    /// Appends a single level.
    #[inline]
    pub fn put(&mut self, level: i16) {
        self.encoder.put(level as u64)
    }

    /// Appends a batch of levels.
    pub fn put_batch(&mut self, levels: &[i16]) {
        for level in levels {
            self.encoder.put(*level as u64)
        }
    }

    /// Returns the encoded bytes so far, flushing any pending run.
    pub fn view(&mut self) -> &[u8] {
        self.encoder.flush_buffer()
    }

    /// Upper bound on the encoded size, including pending values.
    pub fn max_encoded_size(&self) -> usize {
        self.encoder.len()
    }

    /// Clears the encoder for the next page.
    pub fn clear(&mut self) {
        self.encoder.clear()
    }
}

enum LevelDecoderInner {
    Rle(RleDecoder),
    BitPacked(BitReader, u8),
}

/// Decoder for definition and repetition levels.
pub struct LevelDecoder {
    bit_width: u8,
    num_values: usize,
    values_read: usize,
    decoder: Option<LevelDecoderInner>,
}

impl LevelDecoder {
    /// Creates a level decoder for levels up to `max_level`.
    pub fn new(max_level: i16) -> Self {
        Self {
            bit_width: level_bit_width(max_level),
            num_values: 0,
            values_read: 0,
            decoder: None,
        }
    }

    /// Sets the data from a v1 data page body, which starts with the encoded
    /// levels. Returns the number of bytes consumed from `data`.
    ///
    /// For RLE this is a 4-byte little-endian length followed by that many
    /// bytes; for the legacy BIT_PACKED encoding the length is derived from
    /// `num_values`; a max level of 0 consumes nothing.
    pub fn set_data_v1(
        &mut self,
        data: Bytes,
        encoding: Encoding,
        num_values: usize,
    ) -> Result<usize> {
        self.num_values = num_values;
        self.values_read = 0;
        if self.bit_width == 0 {
            self.decoder = None;
            return Ok(0);
        }
        match encoding {
            Encoding::RLE => {
                if data.len() < 4 {
                    return Err(corrupted_err!(
                        "Not enough bytes to read RLE levels length (needed 4, got {})",
                        data.len()
                    ));
                }
                let len = i32::from_le_bytes(data.as_ref()[..4].try_into().unwrap());
                if len < 0 {
                    return Err(corrupted_err!("Negative RLE levels length ({})", len));
                }
                let len = len as usize;
                if data.len() < 4 + len {
                    return Err(corrupted_err!(
                        "Not enough bytes to read levels (needed {}, got {})",
                        len,
                        data.len() - 4
                    ));
                }
                let mut decoder = RleDecoder::new(self.bit_width);
                decoder.set_data(data.slice(4..4 + len));
                self.decoder = Some(LevelDecoderInner::Rle(decoder));
                Ok(4 + len)
            }
            #[allow(deprecated)]
            Encoding::BIT_PACKED => {
                let num_bytes = ceil(num_values * self.bit_width as usize, 8);
                if data.len() < num_bytes {
                    return Err(corrupted_err!(
                        "Not enough bytes to read BIT_PACKED levels (needed {}, got {})",
                        num_bytes,
                        data.len()
                    ));
                }
                let reader = BitReader::new(data.slice(..num_bytes));
                self.decoder = Some(LevelDecoderInner::BitPacked(reader, self.bit_width));
                Ok(num_bytes)
            }
            _ => Err(corrupted_err!("Unknown level encoding: {}", encoding)),
        }
    }

    /// Sets the data from a v2 data page, where the slice holds exactly the RLE
    /// level bytes (no length prefix).
    pub fn set_data_v2(&mut self, data: Bytes, num_values: usize) {
        self.num_values = num_values;
        self.values_read = 0;
        if self.bit_width == 0 {
            self.decoder = None;
            return;
        }
        let mut decoder = RleDecoder::new(self.bit_width);
        decoder.set_data(data);
        self.decoder = Some(LevelDecoderInner::Rle(decoder));
    }

    /// Reads up to `buffer.len()` levels, bounded by the number of levels left in
    /// the page. Returns the number of levels read.
    pub fn read_batch(&mut self, buffer: &mut [i16]) -> Result<usize> {
        let to_read = std::cmp::min(buffer.len(), self.num_values - self.values_read);
        if self.bit_width == 0 {
            // A max level of 0 means every level is 0 and nothing is on the wire
            for item in buffer.iter_mut().take(to_read) {
                *item = 0;
            }
            self.values_read += to_read;
            return Ok(to_read);
        }
        let values_read = match self
            .decoder
            .as_mut()
            .expect("set_data should have been called")
        {
            LevelDecoderInner::Rle(decoder) => decoder.get_batch(&mut buffer[..to_read])?,
            LevelDecoderInner::BitPacked(reader, bit_width) => {
                reader.get_batch(&mut buffer[..to_read], *bit_width as usize)
            }
        };
        self.values_read += values_read;
        Ok(values_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_v1(levels: &[i16], max_level: i16) -> Bytes {
        let mut encoder = LevelEncoder::new(max_level);
        encoder.put_batch(levels);
        let view = encoder.view();
        let mut data = Vec::with_capacity(4 + view.len());
        data.extend_from_slice(&(view.len() as i32).to_le_bytes());
        data.extend_from_slice(view);
        data.into()
    }

    #[test]
    fn test_level_bit_width() {
        assert_eq!(level_bit_width(0), 0);
        assert_eq!(level_bit_width(1), 1);
        assert_eq!(level_bit_width(2), 2);
        assert_eq!(level_bit_width(3), 2);
        assert_eq!(level_bit_width(7), 3);
        assert_eq!(level_bit_width(8), 4);
    }

    #[test]
    fn test_roundtrip_v1() {
        let levels: Vec<i16> = (0..100).map(|i| i % 4).collect();
        let data = encode_v1(&levels, 3);
        let encoded_len = data.len();

        let mut decoder = LevelDecoder::new(3);
        let consumed = decoder
            .set_data_v1(data, Encoding::RLE, levels.len())
            .unwrap();
        assert_eq!(consumed, encoded_len);

        let mut buffer = vec![0i16; levels.len()];
        assert_eq!(decoder.read_batch(&mut buffer).unwrap(), levels.len());
        assert_eq!(buffer, levels);
    }

    #[test]
    fn test_v1_consumes_only_level_bytes() {
        let levels = vec![1i16, 0, 1, 1, 0, 1];
        let mut data: Vec<u8> = encode_v1(&levels, 1).to_vec();
        let level_section = data.len();
        // trailing page bytes must not be consumed
        data.extend_from_slice(&[0xAB, 0xCD, 0xEF]);

        let mut decoder = LevelDecoder::new(1);
        let consumed = decoder
            .set_data_v1(Bytes::from(data), Encoding::RLE, levels.len())
            .unwrap();
        assert_eq!(consumed, level_section);
    }

    #[test]
    fn test_v1_max_level_zero_consumes_nothing() {
        let mut decoder = LevelDecoder::new(0);
        let consumed = decoder
            .set_data_v1(Bytes::from_static(&[1, 2, 3]), Encoding::RLE, 10)
            .unwrap();
        assert_eq!(consumed, 0);

        let mut buffer = vec![-1i16; 20];
        assert_eq!(decoder.read_batch(&mut buffer).unwrap(), 10);
        assert!(buffer[..10].iter().all(|v| *v == 0));
        // callers must not be able to read past the declared number of levels
        assert_eq!(decoder.read_batch(&mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_v1_truncated_length_prefix() {
        let mut decoder = LevelDecoder::new(1);
        let err = decoder
            .set_data_v1(Bytes::from_static(&[1, 2]), Encoding::RLE, 10)
            .unwrap_err();
        assert!(err.to_string().contains("levels length"));
    }

    #[test]
    fn test_v1_length_exceeds_page() {
        let mut data = vec![];
        data.extend_from_slice(&100i32.to_le_bytes());
        data.push(0);
        let mut decoder = LevelDecoder::new(1);
        let err = decoder
            .set_data_v1(Bytes::from(data), Encoding::RLE, 10)
            .unwrap_err();
        assert!(err.to_string().contains("Not enough bytes"));
    }

    #[test]
    fn test_v1_bit_packed() {
        // levels {0, 1, 2, 3, 4} bit packed with width 3
        let data = Bytes::from_static(&[0b10001000, 0b01000110]);
        let mut decoder = LevelDecoder::new(4);
        let consumed = decoder
            .set_data_v1(data, Encoding::BIT_PACKED, 5)
            .unwrap();
        assert_eq!(consumed, 2);
        let mut buffer = vec![0i16; 5];
        assert_eq!(decoder.read_batch(&mut buffer).unwrap(), 5);
        assert_eq!(buffer, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_roundtrip_v2() {
        let levels: Vec<i16> = (0..57).map(|i| i % 3).collect();
        let mut encoder = LevelEncoder::new(2);
        encoder.put_batch(&levels);
        let data = Bytes::from(encoder.view().to_vec());

        let mut decoder = LevelDecoder::new(2);
        decoder.set_data_v2(data, levels.len());
        let mut buffer = vec![0i16; 100];
        assert_eq!(decoder.read_batch(&mut buffer).unwrap(), levels.len());
        assert_eq!(&buffer[..levels.len()], &levels[..]);
    }
}
