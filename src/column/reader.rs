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

//! Contains column reader API.

use crate::basic::{Encoding, Type};
use crate::column::page::{Page, PageReader};
use crate::data_type::*;
use crate::encodings::decoding::{get_decoder, Decoder, DictDecoder, PlainDecoder};
use crate::encodings::levels::LevelDecoder;
use crate::errors::{ParquetError, Result};
use crate::schema::types::ColumnDescPtr;

/// Column reader for a Parquet type.
pub enum ColumnReader {
    /// Column reader for boolean type
    BoolColumnReader(ColumnReaderImpl<BoolType>),
    /// Column reader for int32 type
    Int32ColumnReader(ColumnReaderImpl<Int32Type>),
    /// Column reader for int64 type
    Int64ColumnReader(ColumnReaderImpl<Int64Type>),
    /// Column reader for int96 type
    Int96ColumnReader(ColumnReaderImpl<Int96Type>),
    /// Column reader for float type
    FloatColumnReader(ColumnReaderImpl<FloatType>),
    /// Column reader for double type
    DoubleColumnReader(ColumnReaderImpl<DoubleType>),
    /// Column reader for byte array type
    ByteArrayColumnReader(ColumnReaderImpl<ByteArrayType>),
    /// Column reader for fixed length byte array type
    FixedLenByteArrayColumnReader(ColumnReaderImpl<FixedLenByteArrayType>),
}

/// Gets a specific column reader corresponding to column descriptor `col_descr`. The
/// column reader will read from pages in `col_page_reader`.
pub fn get_column_reader(
    col_descr: ColumnDescPtr,
    col_page_reader: Box<dyn PageReader>,
) -> ColumnReader {
    match col_descr.physical_type() {
        Type::BOOLEAN => {
            ColumnReader::BoolColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::INT32 => {
            ColumnReader::Int32ColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::INT64 => {
            ColumnReader::Int64ColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::INT96 => {
            ColumnReader::Int96ColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::FLOAT => {
            ColumnReader::FloatColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::DOUBLE => {
            ColumnReader::DoubleColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::BYTE_ARRAY => {
            ColumnReader::ByteArrayColumnReader(ColumnReaderImpl::new(col_descr, col_page_reader))
        }
        Type::FIXED_LEN_BYTE_ARRAY => ColumnReader::FixedLenByteArrayColumnReader(
            ColumnReaderImpl::new(col_descr, col_page_reader),
        ),
    }
}

/// Gets a typed column reader for the specific type `T`, by "up-casting" `col_reader` of
/// non-generic type to a generic column reader type `ColumnReaderImpl`.
///
/// Panics if actual enum value for `col_reader` does not match the type `T`.
pub fn get_typed_column_reader<T: DataType>(col_reader: ColumnReader) -> ColumnReaderImpl<T> {
    T::get_column_reader(col_reader).unwrap_or_else(|| {
        panic!(
            "Failed to convert column reader into a typed column reader for `{}` type",
            T::get_physical_type()
        )
    })
}

enum ValuesDecoder<T: DataType> {
    /// No data page loaded yet
    None,
    /// Current page is dictionary encoded, indices resolved through `dict`
    Dict(DictDecoder<T>),
    /// Current page carries its own value encoding
    Plain(Box<dyn Decoder<T>>),
}

/// Typed value reader for a particular primitive column.
///
/// Reads batches of `(definition level, repetition level, value)` triplets,
/// loading and decompressing pages on demand. A reader owns its page stream and
/// must not be driven from two tasks at once; all operations take `&mut self`.
pub struct ColumnReaderImpl<T: DataType> {
    descr: ColumnDescPtr,

    page_reader: Box<dyn PageReader>,

    /// The dictionary for this column chunk, if a dictionary page was present.
    /// Shared with the value decoder for the lifetime of the chunk.
    dictionary: Option<Vec<T::T>>,

    def_level_decoder: LevelDecoder,
    rep_level_decoder: LevelDecoder,
    values_decoder: ValuesDecoder<T>,

    /// The total number of levels in the current data page
    num_buffered_levels: usize,

    /// The number of levels decoded from the current data page so far
    num_decoded_levels: usize,

    /// Ordinal of the most recently loaded page, used in error context
    page_ordinal: i64,

    /// Set once the underlying page stream is exhausted
    eof: bool,
}

impl<T: DataType> ColumnReaderImpl<T> {
    /// Creates new column reader based on column descriptor and page reader.
    pub fn new(descr: ColumnDescPtr, page_reader: Box<dyn PageReader>) -> Self {
        let def_level_decoder = LevelDecoder::new(descr.max_def_level());
        let rep_level_decoder = LevelDecoder::new(descr.max_rep_level());
        Self {
            descr,
            page_reader,
            dictionary: None,
            def_level_decoder,
            rep_level_decoder,
            values_decoder: ValuesDecoder::None,
            num_buffered_levels: 0,
            num_decoded_levels: 0,
            page_ordinal: -1,
            eof: false,
        }
    }

    /// Returns the descriptor of the column read by this reader.
    pub fn descr(&self) -> &ColumnDescPtr {
        &self.descr
    }

    /// Reads a batch of up to `batch_size` `(def, rep, value)` triplets.
    ///
    /// Definition and repetition levels are written to `def_levels` and
    /// `rep_levels` (required when the respective max level is non-zero,
    /// filled with zeros otherwise when provided). Only non-null values are
    /// written to `values`, so the number of values is the number of levels at
    /// the maximum definition level.
    ///
    /// Returns `(values_read, levels_read)`; `(0, 0)` after the chunk is
    /// exhausted. When a page empties mid-batch the next page is loaded
    /// transparently and the batch continues.
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
        mut def_levels: Option<&mut [i16]>,
        mut rep_levels: Option<&mut [i16]>,
        values: &mut [T::T],
    ) -> Result<(usize, usize)> {
        let result = self
            .read_batch_inner(batch_size, &mut def_levels, &mut rep_levels, values)
            .await;
        let page_ordinal = self.page_ordinal;
        result.map_err(|e| add_page_context(e, page_ordinal))
    }

    async fn read_batch_inner(
        &mut self,
        batch_size: usize,
        def_levels: &mut Option<&mut [i16]>,
        rep_levels: &mut Option<&mut [i16]>,
        values: &mut [T::T],
    ) -> Result<(usize, usize)> {
        let max_def_level = self.descr.max_def_level();
        let max_rep_level = self.descr.max_rep_level();

        let mut levels_read = 0;
        let mut values_read = 0;

        while levels_read < batch_size && !self.eof {
            if self.num_buffered_levels == self.num_decoded_levels {
                if !self.load_next_data_page().await? {
                    self.eof = true;
                    break;
                }
            }

            let remaining = self.num_buffered_levels - self.num_decoded_levels;
            let to_read = remaining.min(batch_size - levels_read);

            // Definition levels decide how many actual values follow
            let (def_levels_read, values_to_read) = if max_def_level > 0 {
                let out = def_levels
                    .as_mut()
                    .ok_or_else(|| corrupted_err!("Must specify definition levels"))?;
                let out = &mut out[levels_read..levels_read + to_read];
                let num_read = self.def_level_decoder.read_batch(out)?;
                let value_count = out[..num_read]
                    .iter()
                    .filter(|&&level| level == max_def_level)
                    .count();
                (num_read, value_count)
            } else {
                if let Some(out) = def_levels.as_mut() {
                    out[levels_read..levels_read + to_read].fill(0);
                }
                (to_read, to_read)
            };

            let rep_levels_read = if max_rep_level > 0 {
                let out = rep_levels
                    .as_mut()
                    .ok_or_else(|| corrupted_err!("Must specify repetition levels"))?;
                self.rep_level_decoder
                    .read_batch(&mut out[levels_read..levels_read + to_read])?
            } else {
                if let Some(out) = rep_levels.as_mut() {
                    out[levels_read..levels_read + to_read].fill(0);
                }
                def_levels_read
            };

            if def_levels_read != rep_levels_read {
                return Err(corrupted_err!(
                    "Number of definition levels {} does not equal the number of repetition levels {} in batch",
                    def_levels_read,
                    rep_levels_read
                ));
            }
            if def_levels_read == 0 {
                return Err(corrupted_err!(
                    "Insufficient levels in page (expected {} more)",
                    remaining
                ));
            }

            let out = &mut values[values_read..values_read + values_to_read];
            let num_values = match &mut self.values_decoder {
                ValuesDecoder::None => {
                    return Err(corrupted_err!("No value decoder for current page"));
                }
                ValuesDecoder::Dict(decoder) => decoder.get(out)?,
                ValuesDecoder::Plain(decoder) => decoder.get(out)?,
            };
            if num_values != values_to_read {
                return Err(corrupted_err!(
                    "Number of values in batch {} is less than indicated by def levels {}",
                    num_values,
                    values_to_read
                ));
            }

            self.num_decoded_levels += def_levels_read;
            levels_read += def_levels_read;
            values_read += num_values;
        }

        Ok((values_read, levels_read))
    }

    /// Loads pages until a data page has been decoded, configuring the level and
    /// value decoders. Dictionary pages install the dictionary, unknown page
    /// types are skipped by the page reader. Returns `false` on end of chunk.
    async fn load_next_data_page(&mut self) -> Result<bool> {
        loop {
            self.page_ordinal += 1;
            match self.page_reader.get_next_page().await? {
                None => return Ok(false),
                Some(Page::DictionaryPage {
                    buf,
                    num_values,
                    encoding,
                    is_sorted: _,
                }) => {
                    if !matches!(encoding, Encoding::PLAIN | Encoding::PLAIN_DICTIONARY) {
                        return Err(corrupted_err!(
                            "Invalid dictionary page encoding {}",
                            encoding
                        ));
                    }
                    let mut plain_decoder = PlainDecoder::<T>::new(self.descr.type_length());
                    plain_decoder.set_data(buf, num_values as usize)?;
                    let mut dict = vec![T::T::default(); num_values as usize];
                    let read = plain_decoder.get(&mut dict)?;
                    if read != num_values as usize {
                        return Err(corrupted_err!(
                            "Unexpected end of dictionary page (expected {} values, got {})",
                            num_values,
                            read
                        ));
                    }
                    self.dictionary = Some(dict);
                    continue;
                }
                Some(Page::DataPage {
                    buf,
                    num_values,
                    encoding,
                    def_level_encoding,
                    rep_level_encoding,
                }) => {
                    let num_values = num_values as usize;
                    let mut offset = 0;
                    offset += self.rep_level_decoder.set_data_v1(
                        buf.slice(offset..),
                        rep_level_encoding,
                        num_values,
                    )?;
                    offset += self.def_level_decoder.set_data_v1(
                        buf.slice(offset..),
                        def_level_encoding,
                        num_values,
                    )?;
                    self.reset_values_decoder(encoding, buf.slice(offset..), num_values)?;
                    self.num_buffered_levels = num_values;
                    self.num_decoded_levels = 0;
                    return Ok(true);
                }
                Some(Page::DataPageV2 {
                    buf,
                    num_values,
                    encoding,
                    num_nulls,
                    num_rows: _,
                    def_levels_byte_len,
                    rep_levels_byte_len,
                    is_compressed: _,
                }) => {
                    if num_nulls > num_values {
                        return Err(corrupted_err!(
                            "More nulls than values in page ({} nulls, {} values)",
                            num_nulls,
                            num_values
                        ));
                    }
                    let num_values = num_values as usize;
                    let rep_len = rep_levels_byte_len as usize;
                    let def_len = def_levels_byte_len as usize;
                    if buf.len() < rep_len + def_len {
                        return Err(corrupted_err!(
                            "Not enough bytes in page for levels (needed {}, got {})",
                            rep_len + def_len,
                            buf.len()
                        ));
                    }
                    self.rep_level_decoder
                        .set_data_v2(buf.slice(..rep_len), num_values);
                    self.def_level_decoder
                        .set_data_v2(buf.slice(rep_len..rep_len + def_len), num_values);
                    self.reset_values_decoder(encoding, buf.slice(rep_len + def_len..), num_values)?;
                    self.num_buffered_levels = num_values;
                    self.num_decoded_levels = 0;
                    return Ok(true);
                }
            }
        }
    }

    fn reset_values_decoder(
        &mut self,
        encoding: Encoding,
        data: bytes::Bytes,
        num_values: usize,
    ) -> Result<()> {
        match encoding {
            Encoding::RLE_DICTIONARY | Encoding::PLAIN_DICTIONARY => {
                let dict = self.dictionary.as_ref().ok_or_else(|| {
                    corrupted_err!("No dictionary page found before a dictionary-encoded page")
                })?;
                let mut decoder = DictDecoder::new();
                // values are refcounted buffers, so sharing the dictionary with the
                // decoder is cheap
                decoder.set_dict_values(dict.clone());
                decoder.set_data(data, num_values)?;
                self.values_decoder = ValuesDecoder::Dict(decoder);
            }
            encoding => {
                let mut decoder = get_decoder::<T>(self.descr.clone(), encoding)?;
                decoder.set_data(data, num_values)?;
                self.values_decoder = ValuesDecoder::Plain(decoder);
            }
        }
        Ok(())
    }
}

fn add_page_context(err: ParquetError, page_ordinal: i64) -> ParquetError {
    match err {
        ParquetError::Corrupted(message) => ParquetError::Corrupted(format!(
            "Error while reading page number {page_ordinal}: {message}"
        )),
        ParquetError::Unsupported(message) => ParquetError::Unsupported(format!(
            "Error while reading page number {page_ordinal}: {message}"
        )),
        ParquetError::External(e) => ParquetError::Corrupted(format!(
            "Error while reading page number {page_ordinal}: {e}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Type as PhysicalType;
    use crate::schema::types::{ColumnDescriptor, ColumnPath, Type as SchemaType};
    use crate::util::test_common::page_util::InMemoryPageReader;
    use bytes::Bytes;
    use std::sync::Arc;

    fn int32_descr(max_def: i16, max_rep: i16) -> ColumnDescPtr {
        let tpe = SchemaType::primitive_type_builder("a", PhysicalType::INT32)
            .build()
            .unwrap();
        Arc::new(ColumnDescriptor::new(
            Arc::new(tpe),
            max_def,
            max_rep,
            ColumnPath::new(vec!["a".to_owned()]),
        ))
    }

    fn plain_v1_page(values: &[i32], def_levels: &[i16], max_def: i16) -> Page {
        use crate::encodings::encoding::{get_encoder, Encoder};
        use crate::encodings::levels::LevelEncoder;

        let mut buf = Vec::new();
        if max_def > 0 {
            let mut encoder = LevelEncoder::new(max_def);
            encoder.put_batch(def_levels);
            let view = encoder.view();
            buf.extend_from_slice(&(view.len() as i32).to_le_bytes());
            buf.extend_from_slice(view);
        }
        let mut encoder = get_encoder::<Int32Type>(Encoding::PLAIN).unwrap();
        encoder.put(values).unwrap();
        buf.extend_from_slice(&encoder.flush_buffer().unwrap());

        Page::DataPage {
            buf: Bytes::from(buf),
            num_values: def_levels.len().max(values.len()) as u32,
            encoding: Encoding::PLAIN,
            def_level_encoding: Encoding::RLE,
            rep_level_encoding: Encoding::RLE,
        }
    }

    #[tokio::test]
    async fn test_read_batch_required_column() {
        let values: Vec<i32> = (0..57).collect();
        let page = plain_v1_page(&values, &[], 0);
        let page_reader = Box::new(InMemoryPageReader::new(vec![page]));
        let mut reader = ColumnReaderImpl::<Int32Type>::new(int32_descr(0, 0), page_reader);

        let mut out = vec![0i32; 100];
        let (values_read, levels_read) = reader
            .read_batch(100, None, None, &mut out)
            .await
            .unwrap();
        assert_eq!(values_read, 57);
        assert_eq!(levels_read, 57);
        assert_eq!(&out[..57], &values[..]);

        // end of chunk
        let (values_read, levels_read) =
            reader.read_batch(10, None, None, &mut out).await.unwrap();
        assert_eq!((values_read, levels_read), (0, 0));
    }

    #[tokio::test]
    async fn test_read_batch_nullable_column() {
        let def_levels = vec![1i16, 0, 1, 1, 0, 1];
        let values = vec![10, 20, 30, 40];
        let page = plain_v1_page(&values, &def_levels, 1);
        let page_reader = Box::new(InMemoryPageReader::new(vec![page]));
        let mut reader = ColumnReaderImpl::<Int32Type>::new(int32_descr(1, 0), page_reader);

        let mut out_values = vec![0i32; 10];
        let mut out_def = vec![0i16; 10];
        let (values_read, levels_read) = reader
            .read_batch(10, Some(&mut out_def), None, &mut out_values)
            .await
            .unwrap();
        assert_eq!(levels_read, 6);
        assert_eq!(values_read, 4);
        assert_eq!(&out_def[..6], &def_levels[..]);
        assert_eq!(&out_values[..4], &values[..]);
    }

    #[tokio::test]
    async fn test_read_batch_spans_pages() {
        let page1 = plain_v1_page(&[1, 2, 3], &[], 0);
        let page2 = plain_v1_page(&[4, 5], &[], 0);
        let page_reader = Box::new(InMemoryPageReader::new(vec![page1, page2]));
        let mut reader = ColumnReaderImpl::<Int32Type>::new(int32_descr(0, 0), page_reader);

        let mut out = vec![0i32; 5];
        let (values_read, levels_read) =
            reader.read_batch(5, None, None, &mut out).await.unwrap();
        assert_eq!((values_read, levels_read), (5, 5));
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_missing_dictionary_page_fails() {
        // A dictionary-encoded data page with no preceding dictionary page
        let mut buf = vec![1u8]; // bit width 1
        buf.extend_from_slice(&[0b00000110, 0x00]); // rle run of 3 zeros
        let page = Page::DataPage {
            buf: Bytes::from(buf),
            num_values: 3,
            encoding: Encoding::RLE_DICTIONARY,
            def_level_encoding: Encoding::RLE,
            rep_level_encoding: Encoding::RLE,
        };
        let page_reader = Box::new(InMemoryPageReader::new(vec![page]));
        let mut reader = ColumnReaderImpl::<Int32Type>::new(int32_descr(0, 0), page_reader);

        let mut out = vec![0i32; 3];
        let err = reader
            .read_batch(3, None, None, &mut out)
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("Error while reading page number 0"),
            "unexpected error: {err}"
        );
        assert!(err.to_string().contains("No dictionary page"));
    }

    #[tokio::test]
    async fn test_value_shortfall_is_corrupted_file() {
        // def levels declare 3 values but only 2 are encoded
        let page = plain_v1_page(&[7, 8], &[1, 1, 1], 1);
        let page_reader = Box::new(InMemoryPageReader::new(vec![page]));
        let mut reader = ColumnReaderImpl::<Int32Type>::new(int32_descr(1, 0), page_reader);

        let mut out_values = vec![0i32; 3];
        let mut out_def = vec![0i16; 3];
        let err = reader
            .read_batch(3, Some(&mut out_def), None, &mut out_values)
            .await
            .unwrap_err();
        assert!(matches!(err, ParquetError::Corrupted(_)));
    }
}
