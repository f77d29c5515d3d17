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

//! Contains file writer API, and provides methods to write row groups and columns by
//! using row group writers and column writers respectively.

use std::io::Write;
use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::basic::Type as PhysicalType;
use crate::column::page::{CompressedPage, Page, PageWriteSpec, PageWriter};
use crate::column::writer::{
    get_column_writer, get_typed_column_writer_mut, ColumnWriter, ColumnWriterImpl,
};
use crate::data_type::DataType;
use crate::errors::{ParquetError, Result};
use crate::file::metadata::RowGroupMetaData;
use crate::file::properties::WriterPropertiesPtr;
use crate::file::{FOOTER_SIZE, PARQUET_MAGIC};
use crate::format as parquet;
use crate::schema::types::{self, SchemaDescPtr, SchemaDescriptor, TypePtr};
use crate::thrift::{TCompactOutputProtocol, TSerializable};

/// A wrapper around a [`Write`] that keeps track of the number
/// of bytes that have been written
pub struct TrackedWrite<W> {
    inner: W,
    bytes_written: usize,
}

impl<W: Write> TrackedWrite<W> {
    /// Create a new [`TrackedWrite`] from a [`Write`]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Returns the number of bytes written to this instance
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }
}

impl<W: Write> Write for TrackedWrite<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let bytes = self.inner.write(buf)?;
        self.bytes_written += bytes;
        Ok(bytes)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// A serialized implementation for Parquet [`PageWriter`].
/// Writes and serializes pages and metadata into an output stream.
///
/// `SerializedPageWriter` should not be used after calling `close()`.
pub struct SerializedPageWriter<'a, W> {
    sink: &'a mut TrackedWrite<W>,
}

impl<'a, W: Write> SerializedPageWriter<'a, W> {
    /// Creates new page writer.
    pub fn new(sink: &'a mut TrackedWrite<W>) -> Self {
        Self { sink }
    }

    /// Serializes page header into Thrift.
    /// Returns number of bytes that have been written into the sink.
    #[inline]
    fn serialize_page_header(&mut self, header: parquet::PageHeader) -> Result<usize> {
        let start_pos = self.sink.bytes_written();
        {
            let mut protocol = TCompactOutputProtocol::new(&mut self.sink);
            header.write_to_out_protocol(&mut protocol)?;
        }
        Ok(self.sink.bytes_written() - start_pos)
    }
}

impl<'a, W: Write + Send> PageWriter for SerializedPageWriter<'a, W> {
    fn write_page(&mut self, page: CompressedPage) -> Result<PageWriteSpec> {
        let uncompressed_size = page.uncompressed_size();
        let compressed_size = page.compressed_size();
        let num_values = page.num_values();
        let encoding = page.encoding();
        let page_type = page.page_type();

        let mut page_header = parquet::PageHeader {
            type_: page_type.into(),
            uncompressed_page_size: uncompressed_size as i32,
            compressed_page_size: compressed_size as i32,
            crc: None,
            data_page_header: None,
            index_page_header: None,
            dictionary_page_header: None,
            data_page_header_v2: None,
        };

        match *page.compressed_page() {
            Page::DataPage {
                def_level_encoding,
                rep_level_encoding,
                ..
            } => {
                let data_page_header = parquet::DataPageHeader {
                    num_values: num_values as i32,
                    encoding: encoding.into(),
                    definition_level_encoding: def_level_encoding.into(),
                    repetition_level_encoding: rep_level_encoding.into(),
                };
                page_header.data_page_header = Some(data_page_header);
            }
            Page::DataPageV2 {
                num_nulls,
                num_rows,
                def_levels_byte_len,
                rep_levels_byte_len,
                is_compressed,
                ..
            } => {
                let data_page_header_v2 = parquet::DataPageHeaderV2 {
                    num_values: num_values as i32,
                    num_nulls: num_nulls as i32,
                    num_rows: num_rows as i32,
                    encoding: encoding.into(),
                    definition_levels_byte_length: def_levels_byte_len as i32,
                    repetition_levels_byte_length: rep_levels_byte_len as i32,
                    is_compressed: Some(is_compressed),
                };
                page_header.data_page_header_v2 = Some(data_page_header_v2);
            }
            Page::DictionaryPage { is_sorted, .. } => {
                let dictionary_page_header = parquet::DictionaryPageHeader {
                    num_values: num_values as i32,
                    encoding: encoding.into(),
                    is_sorted: Some(is_sorted),
                };
                page_header.dictionary_page_header = Some(dictionary_page_header);
            }
        }

        let offset = self.sink.bytes_written() as u64;
        let header_size = self.serialize_page_header(page_header)?;
        self.sink.write_all(page.data())?;

        let mut spec = PageWriteSpec::new();
        spec.page_type = page_type;
        spec.uncompressed_size = uncompressed_size + header_size;
        spec.compressed_size = compressed_size + header_size;
        spec.num_values = num_values;
        spec.offset = offset;
        spec.bytes_written = self.sink.bytes_written() as u64 - offset;
        Ok(spec)
    }

    fn write_metadata(&mut self, metadata: &crate::file::metadata::ColumnChunkMetaData) -> Result<()> {
        let column_metadata = metadata.to_column_metadata_thrift();
        let mut protocol = TCompactOutputProtocol::new(&mut self.sink);
        column_metadata.write_to_out_protocol(&mut protocol)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}

/// Parquet file writer API over an asynchronous byte sink.
/// Provides methods to write row groups sequentially.
///
/// The main workflow should be as following:
/// - Create file writer, this writes the leading magic and builds one column
///   writer per schema leaf; the writers live for the lifetime of the file.
/// - Feed values to the column writers, cutting pages where desired.
/// - Call `flush_row_group` once every column holds the same number of rows.
/// - After all row groups have been written, close the file writer using the
///   `close` method, which appends the footer.
pub struct SerializedFileWriter<W> {
    sink: W,
    schema: TypePtr,
    descr: SchemaDescPtr,
    props: WriterPropertiesPtr,
    column_writers: Vec<ColumnWriter>,
    row_groups: Vec<RowGroupMetaData>,
    file_offset: u64,
}

impl<W> std::fmt::Debug for SerializedFileWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedFileWriter")
            .field("file_offset", &self.file_offset)
            .field("row_groups", &self.row_groups.len())
            .finish()
    }
}

impl<W: AsyncWrite + Unpin + Send> SerializedFileWriter<W> {
    /// Creates a new file writer: validates the schema, instantiates a column
    /// chunk writer for every leaf and writes the leading magic bytes.
    pub async fn new(mut sink: W, schema: TypePtr, props: WriterPropertiesPtr) -> Result<Self> {
        let descr = Arc::new(SchemaDescriptor::new(schema.clone()));

        for column in descr.columns() {
            if column.physical_type() == PhysicalType::INT96 {
                return Err(unsupported_err!(
                    "INT96 is deprecated. Writing INT96 is unsupported (column '{}')",
                    column.path()
                ));
            }
        }

        let column_writers = descr
            .columns()
            .iter()
            .map(|column| get_column_writer(column.clone(), props.clone()))
            .collect::<Result<Vec<_>>>()?;

        sink.write_all(&PARQUET_MAGIC).await?;
        Ok(Self {
            sink,
            schema,
            descr,
            props,
            column_writers,
            row_groups: vec![],
            file_offset: PARQUET_MAGIC.len() as u64,
        })
    }

    /// Returns the number of leaf columns.
    pub fn num_columns(&self) -> usize {
        self.column_writers.len()
    }

    /// Returns the column writer for leaf `i`.
    pub fn column(&mut self, i: usize) -> &mut ColumnWriter {
        &mut self.column_writers[i]
    }

    /// Returns the typed column writer for leaf `i`.
    ///
    /// Panics if `T` does not match the column's physical type.
    pub fn typed_column<T: DataType>(&mut self, i: usize) -> &mut ColumnWriterImpl<T> {
        get_typed_column_writer_mut(&mut self.column_writers[i])
    }

    /// Returns metadata of the flushed row groups so far.
    pub fn flushed_row_groups(&self) -> &[RowGroupMetaData] {
        &self.row_groups
    }

    /// Returns the estimated compressed size of the pages buffered across all
    /// column writers for the current row group.
    pub fn estimated_row_group_size(&self) -> u64 {
        self.column_writers
            .iter()
            .map(|writer| writer.estimated_chunk_size())
            .sum()
    }

    /// Flushes the current row group: every column chunk is emitted in leaf
    /// order, followed by its serialized `ColumnMetaData`, and the row group is
    /// recorded for the footer.
    ///
    /// All columns must have been fed the same number of rows.
    pub async fn flush_row_group(&mut self) -> Result<()> {
        let num_rows = self
            .column_writers
            .first()
            .map(|writer| writer.rows_written())
            .unwrap_or(0);

        let mut columns = Vec::with_capacity(self.column_writers.len());
        let mut total_byte_size: i64 = 0;

        for writer in &mut self.column_writers {
            let mut buffer = Vec::new();
            let mut tracked = TrackedWrite::new(&mut buffer);

            let result = {
                let mut page_writer = SerializedPageWriter::new(&mut tracked);
                writer.flush_chunk(&mut page_writer)?
            };
            if result.rows_written != num_rows {
                return Err(corrupted_err!(
                    "Incorrect number of rows in column '{}', expected {} != {} rows",
                    writer.descr().path(),
                    num_rows,
                    result.rows_written
                ));
            }

            let chunk_len = tracked.bytes_written() as u64;
            let mut metadata = result.metadata;
            metadata.shift_offsets(self.file_offset as i64);
            // The trailing copy of the metadata sits directly after the chunk;
            // the footer's ColumnChunk.file_offset points at it
            metadata.set_file_offset((self.file_offset + chunk_len) as i64);
            {
                let mut page_writer = SerializedPageWriter::new(&mut tracked);
                page_writer.write_metadata(&metadata)?;
                page_writer.close()?;
            }

            let bytes = tracked.bytes_written() as u64;
            drop(tracked);
            self.sink.write_all(&buffer).await?;
            self.file_offset += bytes;
            total_byte_size += bytes as i64;
            columns.push(metadata);
        }

        let row_group = RowGroupMetaData::builder(self.descr.clone())
            .set_num_rows(num_rows as i64)
            .set_total_byte_size(total_byte_size)
            .set_column_metadata(columns)
            .build()?;
        self.row_groups.push(row_group);
        Ok(())
    }

    /// Closes and finalises the file writer, returning the file metadata
    /// written to the footer.
    ///
    /// A row group with pending data is flushed first. No writes are possible
    /// after this point.
    pub async fn close(mut self) -> Result<parquet::FileMetaData> {
        if self
            .column_writers
            .iter()
            .any(|writer| writer.has_pending_data())
        {
            self.flush_row_group().await?;
        }

        let num_rows = self.row_groups.iter().map(|rg| rg.num_rows()).sum();
        let row_groups = self.row_groups.iter().map(|rg| rg.to_thrift()).collect();

        let file_metadata = parquet::FileMetaData {
            version: 1, // Parquet 2.0 == 1
            schema: types::to_thrift(self.schema.as_ref())?,
            num_rows,
            row_groups,
            key_value_metadata: self.props.key_value_metadata().cloned(),
            created_by: Some(self.props.created_by().to_owned()),
        };

        let mut metadata_buffer = Vec::new();
        {
            let mut protocol = TCompactOutputProtocol::new(&mut metadata_buffer);
            file_metadata.write_to_out_protocol(&mut protocol)?;
        }
        self.sink.write_all(&metadata_buffer).await?;

        let mut footer_buffer = [0_u8; FOOTER_SIZE];
        LittleEndian::write_u32(&mut footer_buffer, metadata_buffer.len() as u32);
        footer_buffer[4..].copy_from_slice(&PARQUET_MAGIC);
        self.sink.write_all(&footer_buffer).await?;
        self.sink.flush().await?;
        Ok(file_metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{PageType, Repetition};
    use crate::schema::types::Type as SchemaType;
    use bytes::Bytes;

    #[test]
    fn test_tracked_write_counts_bytes() {
        let mut buffer = Vec::new();
        let mut tracked = TrackedWrite::new(&mut buffer);
        tracked.write_all(&[1, 2, 3]).unwrap();
        tracked.write_all(&[4]).unwrap();
        assert_eq!(tracked.bytes_written(), 4);
        drop(tracked);
        assert_eq!(buffer, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_page_writer_roundtrip_header() {
        use crate::format::PageHeader;
        use crate::thrift::TCompactInputProtocol;

        let page = Page::DataPage {
            buf: Bytes::from_static(&[9, 9, 9]),
            num_values: 10,
            encoding: crate::basic::Encoding::PLAIN,
            def_level_encoding: crate::basic::Encoding::RLE,
            rep_level_encoding: crate::basic::Encoding::RLE,
        };
        let compressed = CompressedPage::new(page, 3);

        let mut buffer = Vec::new();
        let mut tracked = TrackedWrite::new(&mut buffer);
        let mut page_writer = SerializedPageWriter::new(&mut tracked);
        let spec = page_writer.write_page(compressed).unwrap();
        assert_eq!(spec.page_type, PageType::DATA_PAGE);
        assert_eq!(spec.offset, 0);
        assert_eq!(spec.bytes_written as usize, buffer.len());
        assert_eq!(spec.compressed_size, buffer.len());

        // header deserializes and the body follows it
        let mut slice = buffer.as_slice();
        let header = {
            let mut prot = TCompactInputProtocol::new(&mut slice);
            PageHeader::read_from_in_protocol(&mut prot).unwrap()
        };
        assert_eq!(header.compressed_page_size, 3);
        assert_eq!(slice, &[9, 9, 9]);
    }

    #[tokio::test]
    async fn test_writer_rejects_int96() {
        let field = SchemaType::primitive_type_builder("t", PhysicalType::INT96)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        let schema = SchemaType::group_type_builder("schema")
            .with_fields(vec![Arc::new(field)])
            .build()
            .unwrap();

        let mut sink = Vec::new();
        let err = SerializedFileWriter::new(
            &mut sink,
            Arc::new(schema),
            Arc::new(crate::file::properties::WriterProperties::builder().build()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ParquetError::Unsupported(_)));
        assert!(err.to_string().contains("INT96"));
    }

    #[tokio::test]
    async fn test_row_count_mismatch_detected() {
        let a = SchemaType::primitive_type_builder("a", PhysicalType::INT32)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        let b = SchemaType::primitive_type_builder("b", PhysicalType::INT32)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        let schema = SchemaType::group_type_builder("schema")
            .with_fields(vec![Arc::new(a), Arc::new(b)])
            .build()
            .unwrap();

        let mut sink = Vec::new();
        let mut writer = SerializedFileWriter::new(
            &mut sink,
            Arc::new(schema),
            Arc::new(crate::file::properties::WriterProperties::builder().build()),
        )
        .await
        .unwrap();

        writer
            .typed_column::<crate::data_type::Int32Type>(0)
            .write_batch(&[1, 2, 3], None, None)
            .unwrap();
        writer
            .typed_column::<crate::data_type::Int32Type>(1)
            .write_batch(&[1], None, None)
            .unwrap();
        let err = writer.flush_row_group().await.unwrap_err();
        assert!(err.to_string().contains("Incorrect number of rows"));
    }
}
