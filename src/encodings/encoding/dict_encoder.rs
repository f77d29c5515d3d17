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

// ----------------------------------------------------------------------
// Dictionary encoding

use bytes::Bytes;
use hashbrown::hash_map::RawEntryMut;
use hashbrown::HashMap;
use std::hash::Hash;

use crate::basic::{Encoding, Type};
use crate::data_type::private::ParquetValueType;
use crate::data_type::{AsBytes, DataType};
use crate::encodings::encoding::{Encoder, PlainEncoder};
use crate::encodings::rle::RleEncoder;
use crate::errors::Result;
use crate::schema::types::ColumnDescPtr;
use crate::util::bit_util::num_required_bits;

/// Dictionary encoder.
/// The dictionary encoding builds a dictionary of values encountered in a given column.
/// The dictionary page is written first, before the data pages of the column chunk.
///
/// Dictionary page format: the entries in the dictionary - in dictionary order -
/// using the plain encoding.
///
/// Data page format: the bit width used to encode the entry ids stored as 1 byte
/// (max bit width = 32), followed by the values encoded using RLE/Bit packed described
/// above (with the given bit width).
pub struct DictEncoder<T: DataType> {
    state: ahash::RandomState,

    /// Maps a unique value's index in `uniques` to nothing; lookups go through
    /// the raw entry API keyed by the hash of the value bytes, so `u64` keys
    /// never hash themselves
    dedup: HashMap<u64, (), ()>,

    /// The unique observed values, in first-seen order. This is the dictionary page.
    uniques: Vec<T::T>,

    /// Size of unique values in the dictionary, in bytes.
    uniques_size_in_bytes: usize,

    /// Length of FIXED_LEN_BYTE_ARRAY values, ignored otherwise.
    type_length: usize,

    /// The buffered indices of the current data page.
    indices: Vec<u64>,
}

impl<T: DataType> DictEncoder<T> {
    /// Creates new dictionary encoder.
    pub fn new(desc: ColumnDescPtr) -> Self {
        Self {
            state: Default::default(),
            dedup: Default::default(),
            uniques: vec![],
            uniques_size_in_bytes: 0,
            type_length: desc.type_length() as usize,
            indices: vec![],
        }
    }

    /// Returns true if dictionary entries are sorted, false otherwise.
    pub fn is_sorted(&self) -> bool {
        // Sorting is not supported currently.
        false
    }

    /// Returns number of unique values (keys) in the dictionary.
    pub fn num_entries(&self) -> usize {
        self.uniques.len()
    }

    /// Returns size of unique values (keys) in the dictionary, in bytes.
    pub fn dict_encoded_size(&self) -> usize {
        self.uniques_size_in_bytes
    }

    /// Writes out the dictionary values with PLAIN encoding in a byte buffer, and return
    /// the result.
    pub fn write_dict(&self) -> Result<Bytes> {
        let mut plain_encoder = PlainEncoder::<T>::new();
        plain_encoder.put(&self.uniques)?;
        plain_encoder.flush_buffer()
    }

    /// Writes out the dictionary values with RLE encoding in a byte buffer, and return
    /// the result.
    pub fn write_indices(&mut self) -> Result<Bytes> {
        let buffer_len = self.estimated_data_encoded_size();
        let mut buffer = Vec::with_capacity(buffer_len);
        // Write bit width in the first byte
        buffer.push(self.bit_width());

        let mut encoder = RleEncoder::new_from_buf(self.bit_width(), buffer);
        for index in &self.indices {
            encoder.put(*index)
        }
        self.indices.clear();
        Ok(encoder.consume().into())
    }

    fn put_one(&mut self, value: &T::T) {
        let hash = compute_hash(&self.state, value);

        let entry = self
            .dedup
            .raw_entry_mut()
            .from_hash(hash, |index| value == &self.uniques[*index as usize]);

        let key = match entry {
            RawEntryMut::Occupied(entry) => *entry.into_key(),
            RawEntryMut::Vacant(entry) => {
                let key = self.uniques.len() as u64;

                let (base_size, num_elements) = value.dict_encoding_size();
                let unique_size = match T::get_physical_type() {
                    Type::BYTE_ARRAY => base_size + num_elements,
                    Type::FIXED_LEN_BYTE_ARRAY => self.type_length,
                    _ => base_size,
                };
                self.uniques_size_in_bytes += unique_size;
                self.uniques.push(value.clone());

                let uniques = &self.uniques;
                let state = &self.state;
                *entry
                    .insert_with_hasher(hash, key, (), |index| {
                        compute_hash(state, &uniques[*index as usize])
                    })
                    .0
            }
        };
        self.indices.push(key);
    }

    #[inline]
    fn bit_width(&self) -> u8 {
        num_required_bits(self.num_entries().saturating_sub(1) as u64)
    }
}

impl<T: DataType> Encoder<T> for DictEncoder<T> {
    fn put(&mut self, values: &[T::T]) -> Result<()> {
        self.indices.reserve(values.len());
        for value in values {
            self.put_one(value)
        }
        Ok(())
    }

    fn encoding(&self) -> Encoding {
        Encoding::RLE_DICTIONARY
    }

    /// Returns an estimate of the data page size in bytes
    fn estimated_data_encoded_size(&self) -> usize {
        let bit_width = self.bit_width();
        1 + RleEncoder::max_buffer_size(bit_width, self.indices.len())
    }

    fn flush_buffer(&mut self) -> Result<Bytes> {
        self.write_indices()
    }
}

fn compute_hash<T: AsBytes + ?Sized>(state: &ahash::RandomState, value: &T) -> u64 {
    use std::hash::{BuildHasher, Hasher};
    let mut hasher = state.build_hasher();
    value.as_bytes().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Type as PhysicalType;
    use crate::data_type::{ByteArray, ByteArrayType, Int32Type};
    use crate::encodings::decoding::{Decoder, DictDecoder, PlainDecoder};
    use crate::schema::types::{ColumnDescriptor, ColumnPath, Type as SchemaType};
    use std::sync::Arc;

    fn byte_array_desc() -> ColumnDescPtr {
        let tpe = SchemaType::primitive_type_builder("col", PhysicalType::BYTE_ARRAY)
            .build()
            .unwrap();
        Arc::new(ColumnDescriptor::new(
            Arc::new(tpe),
            0,
            0,
            ColumnPath::new(vec!["col".to_owned()]),
        ))
    }

    fn int32_desc() -> ColumnDescPtr {
        let tpe = SchemaType::primitive_type_builder("col", PhysicalType::INT32)
            .build()
            .unwrap();
        Arc::new(ColumnDescriptor::new(
            Arc::new(tpe),
            0,
            0,
            ColumnPath::new(vec!["col".to_owned()]),
        ))
    }

    fn decode_dictionary<T: DataType>(
        dict_bytes: Bytes,
        num_entries: usize,
        indices: Bytes,
        num_values: usize,
    ) -> Vec<T::T> {
        let mut plain = PlainDecoder::<T>::new(0);
        plain.set_data(dict_bytes, num_entries).unwrap();
        let mut dict_decoder = DictDecoder::<T>::new();
        dict_decoder.set_dict(Box::new(plain)).unwrap();
        dict_decoder.set_data(indices, num_values).unwrap();
        let mut buffer = vec![T::T::default(); num_values];
        assert_eq!(dict_decoder.get(&mut buffer).unwrap(), num_values);
        buffer
    }

    #[test]
    fn test_dict_roundtrip_int32() {
        let values = vec![5i32, 7, 5, 5, 9, 7, 5];
        let mut encoder = DictEncoder::<Int32Type>::new(int32_desc());
        encoder.put(&values).unwrap();
        assert_eq!(encoder.num_entries(), 3);

        let dict = encoder.write_dict().unwrap();
        let indices = encoder.flush_buffer().unwrap();
        let result =
            decode_dictionary::<Int32Type>(dict, encoder.num_entries(), indices, values.len());
        assert_eq!(result, values);
    }

    #[test]
    fn test_dict_roundtrip_byte_array_batch_boundaries() {
        let values: Vec<ByteArray> = vec!["a", "b", "a", "c", "b", "a"]
            .into_iter()
            .map(ByteArray::from)
            .collect();
        let mut encoder = DictEncoder::<ByteArrayType>::new(byte_array_desc());
        // regardless of how items group into batches the result must be identical
        encoder.put(&values[..2]).unwrap();
        encoder.put(&values[2..3]).unwrap();
        encoder.put(&values[3..]).unwrap();
        assert_eq!(encoder.num_entries(), 3);

        let dict = encoder.write_dict().unwrap();
        let indices = encoder.flush_buffer().unwrap();
        let result =
            decode_dictionary::<ByteArrayType>(dict, encoder.num_entries(), indices, values.len());
        assert_eq!(result, values);
    }

    #[test]
    fn test_dict_encoded_size_grows_with_uniques_only() {
        let mut encoder = DictEncoder::<ByteArrayType>::new(byte_array_desc());
        encoder.put(&[ByteArray::from("abcd")]).unwrap();
        let size_one = encoder.dict_encoded_size();
        assert_eq!(size_one, 4 + 4);
        encoder.put(&[ByteArray::from("abcd")]).unwrap();
        assert_eq!(encoder.dict_encoded_size(), size_one);
        encoder.put(&[ByteArray::from("efg")]).unwrap();
        assert_eq!(encoder.dict_encoded_size(), size_one + 4 + 3);
    }
}
