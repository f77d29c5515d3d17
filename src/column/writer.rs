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

//! Contains column writer API.

use std::collections::BTreeSet;

use bytes::Bytes;

use crate::basic::{Compression, Encoding, Type};
use crate::column::page::{CompressedPage, Page, PageWriter};
use crate::compression::{create_codec, Codec};
use crate::data_type::*;
use crate::encodings::encoding::{get_encoder, DictEncoder, Encoder};
use crate::encodings::levels::LevelEncoder;
use crate::errors::{ParquetError, Result};
use crate::file::metadata::ColumnChunkMetaData;
use crate::file::properties::{WriterProperties, WriterPropertiesPtr};
use crate::schema::types::ColumnDescPtr;

/// Column writer for a Parquet type.
pub enum ColumnWriter {
    /// Column writer for boolean type
    BoolColumnWriter(ColumnWriterImpl<BoolType>),
    /// Column writer for int32 type
    Int32ColumnWriter(ColumnWriterImpl<Int32Type>),
    /// Column writer for int64 type
    Int64ColumnWriter(ColumnWriterImpl<Int64Type>),
    /// Column writer for int96 type
    Int96ColumnWriter(ColumnWriterImpl<Int96Type>),
    /// Column writer for float type
    FloatColumnWriter(ColumnWriterImpl<FloatType>),
    /// Column writer for double type
    DoubleColumnWriter(ColumnWriterImpl<DoubleType>),
    /// Column writer for byte array type
    ByteArrayColumnWriter(ColumnWriterImpl<ByteArrayType>),
    /// Column writer for fixed length byte array type
    FixedLenByteArrayColumnWriter(ColumnWriterImpl<FixedLenByteArrayType>),
}

/// Gets a specific column writer corresponding to column descriptor `descr`.
pub fn get_column_writer(descr: ColumnDescPtr, props: WriterPropertiesPtr) -> Result<ColumnWriter> {
    Ok(match descr.physical_type() {
        Type::BOOLEAN => ColumnWriter::BoolColumnWriter(ColumnWriterImpl::new(descr, props)?),
        Type::INT32 => ColumnWriter::Int32ColumnWriter(ColumnWriterImpl::new(descr, props)?),
        Type::INT64 => ColumnWriter::Int64ColumnWriter(ColumnWriterImpl::new(descr, props)?),
        Type::INT96 => ColumnWriter::Int96ColumnWriter(ColumnWriterImpl::new(descr, props)?),
        Type::FLOAT => ColumnWriter::FloatColumnWriter(ColumnWriterImpl::new(descr, props)?),
        Type::DOUBLE => ColumnWriter::DoubleColumnWriter(ColumnWriterImpl::new(descr, props)?),
        Type::BYTE_ARRAY => {
            ColumnWriter::ByteArrayColumnWriter(ColumnWriterImpl::new(descr, props)?)
        }
        Type::FIXED_LEN_BYTE_ARRAY => {
            ColumnWriter::FixedLenByteArrayColumnWriter(ColumnWriterImpl::new(descr, props)?)
        }
    })
}

macro_rules! dispatch_column_writer {
    ($self:ident, $writer:ident => $body:expr) => {
        match $self {
            ColumnWriter::BoolColumnWriter($writer) => $body,
            ColumnWriter::Int32ColumnWriter($writer) => $body,
            ColumnWriter::Int64ColumnWriter($writer) => $body,
            ColumnWriter::Int96ColumnWriter($writer) => $body,
            ColumnWriter::FloatColumnWriter($writer) => $body,
            ColumnWriter::DoubleColumnWriter($writer) => $body,
            ColumnWriter::ByteArrayColumnWriter($writer) => $body,
            ColumnWriter::FixedLenByteArrayColumnWriter($writer) => $body,
        }
    };
}

impl ColumnWriter {
    /// Returns the descriptor of the column written by this writer.
    pub fn descr(&self) -> &ColumnDescPtr {
        dispatch_column_writer!(self, writer => writer.descr())
    }

    /// Returns the number of rows written in the current chunk.
    pub fn rows_written(&self) -> u64 {
        dispatch_column_writer!(self, writer => writer.rows_written())
    }

    /// Returns the estimated compressed size of the buffered chunk.
    pub fn estimated_chunk_size(&self) -> u64 {
        dispatch_column_writer!(self, writer => writer.estimated_chunk_size())
    }

    /// Returns `true` if the writer holds levels, values or pages that have not
    /// been emitted yet.
    pub fn has_pending_data(&self) -> bool {
        dispatch_column_writer!(self, writer => writer.has_pending_data())
    }

    /// Emits the buffered chunk to `page_writer`, see
    /// [`ColumnWriterImpl::flush_chunk`].
    pub fn flush_chunk(&mut self, page_writer: &mut dyn PageWriter) -> Result<ColumnCloseResult> {
        dispatch_column_writer!(self, writer => writer.flush_chunk(page_writer))
    }
}

/// Gets a typed column writer for the specific type `T`, by "up-casting" `col_writer` of
/// non-generic type to a generic column writer type `ColumnWriterImpl`.
///
/// Panics if actual enum value for `col_writer` does not match the type `T`.
pub fn get_typed_column_writer_mut<T: DataType>(
    col_writer: &mut ColumnWriter,
) -> &mut ColumnWriterImpl<T> {
    T::get_column_writer_mut(col_writer).unwrap_or_else(|| {
        panic!(
            "Failed to convert column writer into a typed column writer for `{}` type",
            T::get_physical_type()
        )
    })
}

/// Metadata returned by [`ColumnWriterImpl::flush_chunk`]
#[derive(Debug)]
pub struct ColumnCloseResult {
    /// The total number of bytes written, headers and trailing metadata included
    pub bytes_written: u64,
    /// The total number of rows written in this chunk
    pub rows_written: u64,
    /// Metadata for this column chunk, with chunk-relative page offsets
    pub metadata: ColumnChunkMetaData,
}

/// Typed column writer for a primitive column.
///
/// Writes `(def, rep, value)` batches, assembling buffered data pages. Pages
/// are only cut when the caller invokes [`Self::flush_page`]; the whole chunk
/// is emitted by [`Self::flush_chunk`].
pub struct ColumnWriterImpl<T: DataType> {
    // Column writer properties
    descr: ColumnDescPtr,
    props: WriterPropertiesPtr,

    codec: Compression,
    compressor: Option<Box<dyn Codec>>,

    /// Dictionary encoder while dictionary encoding is in effect
    dict_encoder: Option<DictEncoder<T>>,
    /// Whether the dictionary grew past its limit and new values go to `encoder`
    dict_fallen_back: bool,
    /// The non-dictionary (or fallback) encoder
    encoder: Box<dyn Encoder<T>>,

    def_levels_encoder: LevelEncoder,
    rep_levels_encoder: LevelEncoder,

    /// Buffered compressed data pages, emitted at `flush_chunk`
    data_pages: Vec<CompressedPage>,

    /// The order of encodings within the generated metadata does not impact its meaning,
    /// but we use a BTreeSet so that the output is deterministic
    encodings: BTreeSet<Encoding>,

    levels_in_current_page: u32,
    rows_written: u64,
    estimated_chunk_size: u64,
}

impl<T: DataType> ColumnWriterImpl<T> {
    /// Creates a new column writer.
    pub fn new(descr: ColumnDescPtr, props: WriterPropertiesPtr) -> Result<Self> {
        let codec = props.compression(descr.path());
        let compressor = create_codec(codec)?;

        let (dict_encoder, fallback_encoding) = Self::choose_encoders(&descr, &props)?;
        let encoder = get_encoder::<T>(fallback_encoding)?;

        let mut encodings = BTreeSet::new();
        // Used for level information
        encodings.insert(Encoding::RLE);

        Ok(Self {
            def_levels_encoder: LevelEncoder::new(descr.max_def_level()),
            rep_levels_encoder: LevelEncoder::new(descr.max_rep_level()),
            descr,
            props,
            codec,
            compressor,
            dict_encoder,
            dict_fallen_back: false,
            encoder,
            data_pages: Vec::new(),
            encodings,
            levels_in_current_page: 0,
            rows_written: 0,
            estimated_chunk_size: 0,
        })
    }

    fn choose_encoders(
        descr: &ColumnDescPtr,
        props: &WriterProperties,
    ) -> Result<(Option<DictEncoder<T>>, Encoding)> {
        // The properties builder rejects dictionary encodings, so `encoding` is
        // always a valid fallback
        let encoding = props.encoding(descr.path()).unwrap_or(Encoding::PLAIN);
        // BOOLEAN has no dictionary representation, values are already narrower
        // than any index
        let dictionary_supported = T::get_physical_type() != Type::BOOLEAN;
        if props.dictionary_enabled(descr.path()) && dictionary_supported {
            Ok((Some(DictEncoder::new(descr.clone())), encoding))
        } else {
            Ok((None, encoding))
        }
    }

    /// Returns the descriptor of the column written by this writer.
    pub fn descr(&self) -> &ColumnDescPtr {
        &self.descr
    }

    /// Returns total number of rows written by this column writer so far in the
    /// current chunk.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Returns the estimated compressed size of the pages buffered for the chunk.
    pub fn estimated_chunk_size(&self) -> u64 {
        self.estimated_chunk_size
    }

    /// Returns `true` if the writer holds levels, values or pages that have not
    /// been emitted yet.
    pub fn has_pending_data(&self) -> bool {
        self.rows_written > 0 || self.levels_in_current_page > 0 || !self.data_pages.is_empty()
    }

    /// Returns an upper bound, in bytes, of the encoded size of the current page.
    pub fn current_page_max_size(&self) -> usize {
        let def_size = if self.descr.max_def_level() > 0 {
            self.def_levels_encoder.max_encoded_size() + 4
        } else {
            0
        };
        let rep_size = if self.descr.max_rep_level() > 0 {
            self.rep_levels_encoder.max_encoded_size() + 4
        } else {
            0
        };
        let value_size = match (&self.dict_encoder, self.dict_fallen_back) {
            (Some(dict), false) => dict.estimated_data_encoded_size(),
            _ => self.encoder.estimated_data_encoded_size(),
        };
        def_size + rep_size + value_size
    }

    /// Writes a batch of levels and values.
    ///
    /// Definition and repetition levels are required when the respective max
    /// level is non-zero. `values` must hold exactly one entry per level equal
    /// to the max definition level (non-null slots); nulls carry no value.
    /// Returns the number of values written.
    pub fn write_batch(
        &mut self,
        values: &[T::T],
        def_levels: Option<&[i16]>,
        rep_levels: Option<&[i16]>,
    ) -> Result<usize> {
        // Check if number of definition levels is the same as number of repetition levels.
        if let (Some(def), Some(rep)) = (def_levels, rep_levels) {
            if def.len() != rep.len() {
                return Err(corrupted_err!(
                    "Inconsistent length of definition and repetition levels: {} != {}",
                    def.len(),
                    rep.len()
                ));
            }
        }

        let max_def_level = self.descr.max_def_level();
        let max_rep_level = self.descr.max_rep_level();

        // Process definition levels and determine how many values to write
        let num_levels = match def_levels {
            Some(_) => def_levels.unwrap().len(),
            None => values.len(),
        };
        let values_to_write = if max_def_level > 0 {
            let levels = def_levels.ok_or_else(|| {
                corrupted_err!(
                    "Definition levels are required, because max definition level = {}",
                    max_def_level
                )
            })?;
            self.def_levels_encoder.put_batch(levels);
            levels.iter().filter(|&&level| level == max_def_level).count()
        } else {
            num_levels
        };

        // Process repetition levels, counting the rows that start in this batch
        if max_rep_level > 0 {
            let levels = rep_levels.ok_or_else(|| {
                corrupted_err!(
                    "Repetition levels are required, because max repetition level = {}",
                    max_rep_level
                )
            })?;
            if levels.len() != num_levels {
                return Err(corrupted_err!(
                    "Inconsistent length of repetition levels: {} != {}",
                    levels.len(),
                    num_levels
                ));
            }
            self.rep_levels_encoder.put_batch(levels);
            self.rows_written += levels.iter().filter(|&&level| level == 0).count() as u64;
        } else {
            // Each value is exactly one row
            self.rows_written += num_levels as u64;
        }

        if values.len() < values_to_write {
            return Err(corrupted_err!(
                "Expected to write {} values, but only {} were provided",
                values_to_write,
                values.len()
            ));
        }
        let values = &values[..values_to_write];
        match (&mut self.dict_encoder, self.dict_fallen_back) {
            (Some(dict), false) => dict.put(values)?,
            _ => self.encoder.put(values)?,
        }

        self.levels_in_current_page += num_levels as u32;

        if self.should_dict_fallback() {
            self.dict_fallback()?;
        }

        Ok(values_to_write)
    }

    /// Returns true if we need to fall back to non-dictionary encoding.
    ///
    /// We can only fall back if dictionary encoder is set and we have exceeded dictionary
    /// size.
    #[inline]
    fn should_dict_fallback(&self) -> bool {
        match (&self.dict_encoder, self.dict_fallen_back) {
            (Some(dict), false) => {
                dict.dict_encoded_size() >= self.props.dictionary_pagesize_limit()
            }
            _ => false,
        }
    }

    /// Performs dictionary fallback: cuts a final dictionary-encoded page and
    /// routes subsequent values through the fallback encoder. The dictionary
    /// page itself is still written at `flush_chunk` for the pages already cut.
    fn dict_fallback(&mut self) -> Result<()> {
        if self.levels_in_current_page > 0 {
            self.flush_page()?;
        }
        self.dict_fallen_back = true;
        Ok(())
    }

    /// Cuts the current buffered levels and values into a v1 data page.
    ///
    /// The page layout is `[u32 rep_len][rep][u32 def_len][def][values]`, with
    /// level sections omitted when the respective max level is zero, compressed
    /// as a whole. The page header records the number of levels as `num_values`
    /// and RLE for both level encodings.
    pub fn flush_page(&mut self) -> Result<()> {
        let max_def_level = self.descr.max_def_level();
        let max_rep_level = self.descr.max_rep_level();

        let mut buffer = Vec::with_capacity(self.current_page_max_size());

        if max_rep_level > 0 {
            let levels = self.rep_levels_encoder.view();
            buffer.extend_from_slice(&(levels.len() as u32).to_le_bytes());
            buffer.extend_from_slice(levels);
        }
        if max_def_level > 0 {
            let levels = self.def_levels_encoder.view();
            buffer.extend_from_slice(&(levels.len() as u32).to_le_bytes());
            buffer.extend_from_slice(levels);
        }

        let (values, encoding) = match (&mut self.dict_encoder, self.dict_fallen_back) {
            (Some(dict), false) => (dict.flush_buffer()?, dict.encoding()),
            _ => (self.encoder.flush_buffer()?, self.encoder.encoding()),
        };
        buffer.extend_from_slice(&values);

        let uncompressed_size = buffer.len();
        let buffer = match self.compressor {
            Some(ref mut compressor) => {
                let mut compressed = Vec::with_capacity(uncompressed_size);
                compressor.compress(&buffer, &mut compressed)?;
                compressed
            }
            None => buffer,
        };

        let data_page = Page::DataPage {
            buf: Bytes::from(buffer),
            num_values: self.levels_in_current_page,
            encoding,
            def_level_encoding: Encoding::RLE,
            rep_level_encoding: Encoding::RLE,
        };
        let compressed_page = CompressedPage::new(data_page, uncompressed_size);

        self.estimated_chunk_size += compressed_page.compressed_size() as u64;
        self.encodings.insert(encoding);
        self.data_pages.push(compressed_page);

        self.def_levels_encoder.clear();
        self.rep_levels_encoder.clear();
        self.levels_in_current_page = 0;
        Ok(())
    }

    /// Emits the whole chunk to `page_writer`: the dictionary page first when a
    /// dictionary exists, then every buffered data page in order.
    ///
    /// Returns the chunk metadata with page offsets relative to the chunk start;
    /// the file writer shifts them to absolute file offsets. The writer is reset
    /// and ready to accumulate the next chunk.
    pub fn flush_chunk(&mut self, page_writer: &mut dyn PageWriter) -> Result<ColumnCloseResult> {
        if self.levels_in_current_page > 0 {
            self.flush_page()?;
        }

        let mut num_values: i64 = 0;
        let mut total_compressed_size: i64 = 0;
        let mut total_uncompressed_size: i64 = 0;
        let mut dictionary_page_offset = None;
        let mut bytes_written: u64 = 0;

        if let Some(dict) = &self.dict_encoder {
            let page = self.build_dictionary_page(dict)?;
            self.encodings.insert(Encoding::PLAIN);
            let spec = page_writer.write_page(page)?;
            dictionary_page_offset = Some(spec.offset as i64);
            total_compressed_size += spec.compressed_size as i64;
            total_uncompressed_size += spec.uncompressed_size as i64;
            bytes_written += spec.bytes_written;
        }

        let mut data_page_offset = total_compressed_size;
        let mut first_data_page = true;
        for page in std::mem::take(&mut self.data_pages) {
            let spec = page_writer.write_page(page)?;
            if first_data_page {
                data_page_offset = spec.offset as i64;
                first_data_page = false;
            }
            num_values += spec.num_values as i64;
            total_compressed_size += spec.compressed_size as i64;
            total_uncompressed_size += spec.uncompressed_size as i64;
            bytes_written += spec.bytes_written;
        }

        let metadata = ColumnChunkMetaData::builder(self.descr.clone())
            .set_compression(self.codec)
            .set_encodings(self.encodings.iter().cloned().collect())
            .set_total_compressed_size(total_compressed_size)
            .set_total_uncompressed_size(total_uncompressed_size)
            .set_num_values(num_values)
            .set_data_page_offset(data_page_offset)
            .set_dictionary_page_offset(dictionary_page_offset)
            .build()?;

        let result = ColumnCloseResult {
            bytes_written,
            rows_written: self.rows_written,
            metadata,
        };

        // Reset per-chunk state; a fresh dictionary starts for the next chunk
        if self.dict_encoder.is_some() {
            self.dict_encoder = Some(DictEncoder::new(self.descr.clone()));
        }
        self.dict_fallen_back = false;
        self.rows_written = 0;
        self.estimated_chunk_size = 0;
        self.encodings.clear();
        self.encodings.insert(Encoding::RLE);

        Ok(result)
    }

    fn build_dictionary_page(&self, dict_encoder: &DictEncoder<T>) -> Result<CompressedPage> {
        let uncompressed = dict_encoder.write_dict()?;
        let uncompressed_size = uncompressed.len();
        let buffer = match &self.codec {
            Compression::UNCOMPRESSED => uncompressed,
            codec => {
                let mut compressor = create_codec(*codec)?
                    .expect("compressed codecs always build a compressor");
                let mut compressed = Vec::with_capacity(uncompressed_size);
                compressor.compress(&uncompressed, &mut compressed)?;
                Bytes::from(compressed)
            }
        };
        Ok(CompressedPage::new(
            Page::DictionaryPage {
                buf: buffer,
                num_values: dict_encoder.num_entries() as u32,
                encoding: Encoding::PLAIN,
                is_sorted: dict_encoder.is_sorted(),
            },
            uncompressed_size,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Type as PhysicalType;
    use crate::file::properties::WriterProperties;
    use crate::file::writer::{SerializedPageWriter, TrackedWrite};
    use crate::schema::types::{ColumnDescriptor, ColumnPath, Type as SchemaType};
    use std::sync::Arc;

    fn descr(physical: PhysicalType, max_def: i16, max_rep: i16) -> ColumnDescPtr {
        let tpe = SchemaType::primitive_type_builder("col", physical)
            .build()
            .unwrap();
        Arc::new(ColumnDescriptor::new(
            Arc::new(tpe),
            max_def,
            max_rep,
            ColumnPath::new(vec!["col".to_owned()]),
        ))
    }

    fn flush_to_buffer<T: DataType>(writer: &mut ColumnWriterImpl<T>) -> (Vec<u8>, ColumnCloseResult) {
        let mut buffer = Vec::new();
        let mut sink = TrackedWrite::new(&mut buffer);
        let mut page_writer = SerializedPageWriter::new(&mut sink);
        let result = writer.flush_chunk(&mut page_writer).unwrap();
        drop(page_writer);
        drop(sink);
        (buffer, result)
    }

    #[test]
    fn test_write_batch_counts_rows_and_values() {
        let props = Arc::new(WriterProperties::builder().build());
        let mut writer =
            ColumnWriterImpl::<Int32Type>::new(descr(PhysicalType::INT32, 1, 1), props).unwrap();

        // Two records: [a, b] and [null]
        let written = writer
            .write_batch(&[1, 2], Some(&[1, 1, 0]), Some(&[0, 1, 0]))
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(writer.rows_written(), 2);

        let (_, result) = flush_to_buffer(&mut writer);
        assert_eq!(result.rows_written, 2);
        assert_eq!(result.metadata.num_values(), 3);
    }

    #[test]
    fn test_batch_value_count_uses_max_def_level() {
        // Levels 0 and 1 with max_def 2: no values at all
        let props = Arc::new(WriterProperties::builder().build());
        let mut writer =
            ColumnWriterImpl::<Int32Type>::new(descr(PhysicalType::INT32, 2, 0), props).unwrap();
        let written = writer.write_batch(&[], Some(&[0, 1, 1, 0]), None).unwrap();
        assert_eq!(written, 0);
        // and levels equal to max_def consume values
        let written = writer.write_batch(&[5, 6], Some(&[2, 0, 2]), None).unwrap();
        assert_eq!(written, 2);
    }

    #[test]
    fn test_missing_def_levels_is_error() {
        let props = Arc::new(WriterProperties::builder().build());
        let mut writer =
            ColumnWriterImpl::<Int32Type>::new(descr(PhysicalType::INT32, 1, 0), props).unwrap();
        let err = writer.write_batch(&[1], None, None).unwrap_err();
        assert!(err.to_string().contains("Definition levels are required"));
    }

    #[test]
    fn test_dictionary_page_written_first() {
        let props = Arc::new(WriterProperties::builder().build());
        let mut writer =
            ColumnWriterImpl::<Int32Type>::new(descr(PhysicalType::INT32, 0, 0), props).unwrap();
        writer.write_batch(&[1, 2, 1, 1, 2], None, None).unwrap();
        writer.flush_page().unwrap();

        let (_, result) = flush_to_buffer(&mut writer);
        let metadata = result.metadata;
        assert_eq!(metadata.dictionary_page_offset(), Some(0));
        assert!(metadata.data_page_offset() > 0);
        assert!(metadata.encodings().contains(&Encoding::RLE_DICTIONARY));
        assert!(metadata.encodings().contains(&Encoding::PLAIN));
        assert_eq!(metadata.num_values(), 5);
    }

    #[test]
    fn test_dict_fallback_on_large_dictionary() {
        let props = Arc::new(
            WriterProperties::builder()
                .set_dictionary_pagesize_limit(64)
                .build(),
        );
        let mut writer =
            ColumnWriterImpl::<ByteArrayType>::new(descr(PhysicalType::BYTE_ARRAY, 0, 0), props)
                .unwrap();

        // All distinct values blow through the 64 byte dictionary limit
        let values: Vec<ByteArray> = (0..64)
            .map(|i| ByteArray::from(format!("value-{i:04}").into_bytes()))
            .collect();
        writer.write_batch(&values, None, None).unwrap();
        writer.write_batch(&values, None, None).unwrap();
        writer.flush_page().unwrap();

        let (_, result) = flush_to_buffer(&mut writer);
        // Both the dictionary-encoded and the fallback plain pages are in the chunk
        assert!(result.metadata.encodings().contains(&Encoding::RLE_DICTIONARY));
        assert!(result.metadata.encodings().contains(&Encoding::PLAIN));
        assert_eq!(result.metadata.num_values(), 128);
    }

    #[test]
    fn test_chunk_state_resets_between_row_groups() {
        let props = Arc::new(WriterProperties::builder().build());
        let mut writer =
            ColumnWriterImpl::<Int32Type>::new(descr(PhysicalType::INT32, 0, 0), props).unwrap();

        writer.write_batch(&[1, 2, 3], None, None).unwrap();
        let (_, first) = flush_to_buffer(&mut writer);
        assert_eq!(first.rows_written, 3);

        writer.write_batch(&[4], None, None).unwrap();
        let (_, second) = flush_to_buffer(&mut writer);
        assert_eq!(second.rows_written, 1);
        assert_eq!(second.metadata.num_values(), 1);
    }
}
