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

//! Contains implementations of the reader traits: file reader, page reader and
//! the peekable byte stream feeding them.

use std::path::PathBuf;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::basic::{Compression, Encoding, PageType};
use crate::column::page::{Page, PageReader};
use crate::column::reader::{get_column_reader, get_typed_column_reader, ColumnReader, ColumnReaderImpl};
use crate::compression::{create_codec, Codec};
use crate::data_type::DataType;
use crate::errors::{ParquetError, Result};
use crate::file::footer;
use crate::file::metadata::{ColumnChunkMetaData, ParquetMetaData};
use crate::file::reader::{AsyncChunkReader, FileSource};
use crate::format::PageHeader;
use crate::schema::logical::LogicalSchema;
use crate::thrift::{TCompactInputProtocol, TSerializable};

// ----------------------------------------------------------------------
// Peekable byte stream

/// A buffered view over an asynchronous byte stream supporting `peek`/`advance`.
///
/// Page headers have unknown, variable size: their length is only learned after
/// deserialization, so the reader inevitably pulls more bytes than one header
/// needs, and the leftovers must stay contiguous with future reads. This type
/// owns that buffer with the following policy: when `peek(n)` outgrows the
/// buffer, the consumed prefix is compacted away if it exceeds half the buffer,
/// otherwise the buffer is reallocated to the unconsumed length plus `n`,
/// rounded up to the next power of two. Any given byte is compacted at most once.
pub(crate) struct PeekableByteStream<R> {
    source: R,
    source_exhausted: bool,
    buffer: Vec<u8>,
    /// Consumed prefix of `buffer`
    start: usize,
    /// End of valid data in `buffer`
    end: usize,
}

impl<R: AsyncRead + Unpin + Send> PeekableByteStream<R> {
    pub(crate) fn new(source: R) -> Self {
        Self {
            source,
            source_exhausted: false,
            buffer: Vec::new(),
            start: 0,
            end: 0,
        }
    }

    /// Views the next unconsumed `min(n, bytes remaining in stream)` bytes.
    pub(crate) async fn peek(&mut self, n: usize) -> Result<&[u8]> {
        while self.end - self.start < n && !self.source_exhausted {
            self.ensure_space(n);
            let read = self.source.read(&mut self.buffer[self.end..]).await?;
            if read == 0 {
                self.source_exhausted = true;
            } else {
                self.end += read;
            }
        }
        let available = std::cmp::min(n, self.end - self.start);
        Ok(&self.buffer[self.start..self.start + available])
    }

    /// Consumes `n` bytes. Fails if the stream holds fewer than `n` bytes.
    pub(crate) async fn advance(&mut self, n: usize) -> Result<()> {
        if self.end - self.start < n {
            self.peek(n).await?;
        }
        if self.end - self.start < n {
            return Err(corrupted_err!(
                "Cannot advance past the end of the stream ({} bytes requested, {} available)",
                n,
                self.end - self.start
            ));
        }
        self.start += n;
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
        Ok(())
    }

    /// Makes room so that `n` unconsumed bytes fit contiguously from `start`.
    fn ensure_space(&mut self, n: usize) {
        if self.start + n <= self.buffer.len() {
            return;
        }
        let used = self.end - self.start;
        if self.start > self.buffer.len() / 2 && used + n <= self.buffer.len() {
            // Plenty of consumed prefix to reclaim
            self.buffer.copy_within(self.start..self.end, 0);
        } else {
            let new_len = (used + n).next_power_of_two();
            let mut new_buffer = vec![0u8; new_len];
            new_buffer[..used].copy_from_slice(&self.buffer[self.start..self.end]);
            self.buffer = new_buffer;
        }
        self.start = 0;
        self.end = used;
    }
}

// ----------------------------------------------------------------------
// Page reader

/// Default starting size of the buffer used to deserialize page headers.
const DEFAULT_EXPECTED_HEADER_SIZE: usize = 1024;
/// Headers that do not fit in this many bytes fail as corrupted.
const MAX_ALLOWED_HEADER_SIZE: usize = 16 * 1024 * 1024;

/// A serialized implementation for Parquet [`PageReader`].
///
/// Streams the bytes of one column chunk, yielding decompressed pages.
pub struct SerializedPageReader<R> {
    stream: PeekableByteStream<R>,
    decompressor: Option<Box<dyn Codec>>,
}

impl<R: AsyncRead + Unpin + Send> SerializedPageReader<R> {
    /// Creates a page reader over a stream positioned at the start of a column
    /// chunk and bounded to its compressed length.
    pub fn new(read: R, codec: Compression) -> Result<Self> {
        Ok(Self {
            stream: PeekableByteStream::new(read),
            decompressor: create_codec(codec)?,
        })
    }

    /// Reads the next page, or `None` at the end of the chunk. Pages of unknown
    /// type are skipped.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        loop {
            let header = match read_page_header(&mut self.stream).await? {
                Some(header) => header,
                None => return Ok(None),
            };

            if header.compressed_page_size < 0 {
                return Err(corrupted_err!(
                    "Negative compressed_page_size in page header: {}",
                    header.compressed_page_size
                ));
            }
            if header.uncompressed_page_size < 0 {
                return Err(corrupted_err!(
                    "Negative uncompressed_page_size in page header: {}",
                    header.uncompressed_page_size
                ));
            }

            let compressed_size = header.compressed_page_size as usize;
            let body = self.stream.peek(compressed_size).await?;
            if body.len() < compressed_size {
                return Err(corrupted_err!(
                    "Unexpected end of column chunk while reading compressed page contents (expected {}B, got {}B)",
                    compressed_size,
                    body.len()
                ));
            }
            let body = Bytes::copy_from_slice(body);
            self.stream.advance(compressed_size).await?;

            if let Some(page) = decode_page(header, body, self.decompressor.as_mut())? {
                return Ok(Some(page));
            }
        }
    }
}

impl<R: AsyncRead + Unpin + Send> PageReader for SerializedPageReader<R> {
    fn get_next_page(&mut self) -> BoxFuture<'_, Result<Option<Page>>> {
        self.next_page().boxed()
    }
}

/// Deserializes a compact-Thrift [`PageHeader`] from the stream. The header
/// size is unknown upfront, so the peek window starts at 1 KiB and doubles on
/// truncation up to 16 MiB. Returns `None` on a clean end of stream.
async fn read_page_header<R: AsyncRead + Unpin + Send>(
    stream: &mut PeekableByteStream<R>,
) -> Result<Option<PageHeader>> {
    let mut expected_size = DEFAULT_EXPECTED_HEADER_SIZE;
    loop {
        let peeked = stream.peek(expected_size).await?;
        if peeked.is_empty() {
            return Ok(None);
        }
        let peeked_len = peeked.len();
        let mut slice = peeked;
        let result = {
            let mut prot = TCompactInputProtocol::new(&mut slice);
            PageHeader::read_from_in_protocol(&mut prot)
        };
        match result {
            Ok(header) => {
                let consumed = peeked_len - slice.len();
                stream.advance(consumed).await?;
                return Ok(Some(header));
            }
            Err(e) if is_eof_error(&e) => {
                if peeked_len < expected_size {
                    // The stream itself ended mid-header
                    return Err(corrupted_err!(
                        "Could not deserialize thrift: unexpected end of stream at {}B",
                        peeked_len
                    ));
                }
                // The serialized structure was bigger than expected. Retry with a
                // bigger expectation.
                expected_size *= 2;
                if expected_size > MAX_ALLOWED_HEADER_SIZE {
                    return Err(corrupted_err!(
                        "Could not deserialize thrift: max allowed header size of {} exceeded",
                        MAX_ALLOWED_HEADER_SIZE
                    ));
                }
            }
            Err(e) => {
                return Err(corrupted_err!("Could not deserialize thrift: {}", e));
            }
        }
    }
}

fn is_eof_error(e: &thrift::Error) -> bool {
    matches!(
        e,
        thrift::Error::Transport(t) if t.kind == thrift::TransportErrorKind::EndOfFile
    )
}

/// Decodes a [`Page`] from the provided `buffer`, decompressing the body.
/// Returns `None` for page types that should be skipped.
pub(crate) fn decode_page(
    page_header: PageHeader,
    buffer: Bytes,
    decompressor: Option<&mut Box<dyn Codec>>,
) -> Result<Option<Page>> {
    // When processing data page v2, depending on enabled compression for the
    // page, we should account for uncompressed data ('offset') of
    // repetition and definition levels.
    //
    // We always use 0 offset for other pages other than v2, `true` flag means
    // that compression will be applied if decompressor is defined
    let mut offset: usize = 0;
    let mut can_decompress = true;

    if let Some(ref header_v2) = page_header.data_page_header_v2 {
        if header_v2.definition_levels_byte_length < 0
            || header_v2.repetition_levels_byte_length < 0
        {
            return Err(corrupted_err!(
                "Negative levels byte length in page header"
            ));
        }
        offset = (header_v2.definition_levels_byte_length
            + header_v2.repetition_levels_byte_length) as usize;
        // When is_compressed flag is missing the page is considered compressed
        can_decompress = header_v2.is_compressed.unwrap_or(true);
    }

    let buffer = match decompressor {
        Some(decompressor) if can_decompress => {
            let uncompressed_size = page_header.uncompressed_page_size as usize;
            if offset > buffer.len() || offset > uncompressed_size {
                return Err(corrupted_err!("Invalid page level byte lengths"));
            }
            let mut decompressed = Vec::with_capacity(uncompressed_size);
            decompressed.extend_from_slice(&buffer.as_ref()[..offset]);
            decompressor.decompress(
                &buffer.as_ref()[offset..],
                &mut decompressed,
                uncompressed_size - offset,
            )?;

            if decompressed.len() != uncompressed_size {
                return Err(corrupted_err!(
                    "Actual decompressed size doesn't match the expected one ({} vs {})",
                    decompressed.len(),
                    uncompressed_size
                ));
            }

            Bytes::from(decompressed)
        }
        _ => buffer,
    };

    let page_type = match PageType::try_from(page_header.type_) {
        Ok(page_type) => page_type,
        // Unknown page types are to be skipped
        Err(_) => return Ok(None),
    };

    let result = match page_type {
        PageType::DICTIONARY_PAGE => {
            let dict_header = page_header.dictionary_page_header.as_ref().ok_or_else(|| {
                corrupted_err!("DictionaryPageHeader not set for DICTIONARY_PAGE header")
            })?;
            if dict_header.num_values < 0 {
                return Err(corrupted_err!(
                    "Negative num_values in dictionary page header"
                ));
            }
            let is_sorted = dict_header.is_sorted.unwrap_or(false);
            Some(Page::DictionaryPage {
                buf: buffer,
                num_values: dict_header.num_values as u32,
                encoding: Encoding::try_from(dict_header.encoding)?,
                is_sorted,
            })
        }
        PageType::DATA_PAGE => {
            let header = page_header.data_page_header.ok_or_else(|| {
                corrupted_err!("DataPageHeader not set for DATA_PAGE header")
            })?;
            if header.num_values < 0 {
                return Err(corrupted_err!("Negative num_values in page header"));
            }
            Some(Page::DataPage {
                buf: buffer,
                num_values: header.num_values as u32,
                encoding: Encoding::try_from(header.encoding)?,
                def_level_encoding: Encoding::try_from(header.definition_level_encoding)?,
                rep_level_encoding: Encoding::try_from(header.repetition_level_encoding)?,
            })
        }
        PageType::DATA_PAGE_V2 => {
            let header = page_header.data_page_header_v2.ok_or_else(|| {
                corrupted_err!("DataPageHeaderV2 not set for DATA_PAGE_V2 header")
            })?;
            if header.num_values < 0 {
                return Err(corrupted_err!("Negative num_values in page header"));
            }
            let is_compressed = header.is_compressed.unwrap_or(true);
            Some(Page::DataPageV2 {
                buf: buffer,
                num_values: header.num_values as u32,
                encoding: Encoding::try_from(header.encoding)?,
                num_nulls: header.num_nulls as u32,
                num_rows: header.num_rows as u32,
                def_levels_byte_len: header.definition_levels_byte_length as u32,
                rep_levels_byte_len: header.repetition_levels_byte_length as u32,
                is_compressed,
            })
        }
        // Index pages carry nothing this reader needs
        PageType::INDEX_PAGE => None,
    };

    Ok(result)
}

// ----------------------------------------------------------------------
// File reader

/// A serialized implementation of a Parquet file reader.
///
/// Owns the byte source and the parsed footer. Column chunk readers opened from
/// it each own an independent byte stream, possibly over a different file when
/// the chunk is external.
#[derive(Debug)]
pub struct SerializedFileReader<R: AsyncChunkReader> {
    source: R,
    metadata: ParquetMetaData,
}

impl SerializedFileReader<FileSource> {
    /// Opens the Parquet file at `path` and parses its footer.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let source = FileSource::new(path.into());
        match Self::new(source.clone()).await {
            Ok(reader) => Ok(reader),
            Err(e) => Err(add_path_context(e, source.path())),
        }
    }
}

impl<R: AsyncChunkReader> SerializedFileReader<R> {
    /// Creates a file reader from a byte source, parsing the footer.
    pub async fn new(source: R) -> Result<Self> {
        let metadata = footer::parse_metadata(&source).await?;
        Ok(Self { source, metadata })
    }

    /// Returns the metadata of the underlying file.
    pub fn metadata(&self) -> &ParquetMetaData {
        &self.metadata
    }

    /// Returns the number of row groups in the file.
    pub fn num_row_groups(&self) -> usize {
        self.metadata.num_row_groups()
    }

    /// Classifies the schema into its logical shape.
    ///
    /// Computed on demand rather than at open, so files whose logical shape is
    /// invalid can still be read through the column-level API.
    pub fn logical_schema(&self) -> Result<LogicalSchema> {
        LogicalSchema::try_new(self.metadata.file_metadata().schema_descr())
    }

    /// Opens a page reader over the column chunk at `(row_group, column)`.
    pub async fn get_column_page_reader(
        &self,
        row_group: usize,
        column: usize,
    ) -> Result<Box<dyn PageReader>> {
        let col = self.column_chunk_metadata(row_group, column)?;
        let (start, length) = col.byte_range();
        match col.file_path() {
            Some(path) => {
                let external = self.source.open_external(path).await?;
                let read = external.get_read(start, length).await?;
                Ok(Box::new(SerializedPageReader::new(read, col.compression())?))
            }
            None => {
                let read = self.source.get_read(start, length).await?;
                Ok(Box::new(SerializedPageReader::new(read, col.compression())?))
            }
        }
    }

    /// Opens a column reader for the column chunk at `(row_group, column)`.
    pub async fn get_column_reader(&self, row_group: usize, column: usize) -> Result<ColumnReader> {
        let descr = self
            .metadata
            .file_metadata()
            .schema_descr()
            .column(column);
        let page_reader = self.get_column_page_reader(row_group, column).await?;
        Ok(get_column_reader(descr, page_reader))
    }

    /// Opens a typed column reader for the column chunk at `(row_group, column)`.
    ///
    /// Panics if `T` does not match the column's physical type.
    pub async fn get_typed_column_reader<T: DataType>(
        &self,
        row_group: usize,
        column: usize,
    ) -> Result<ColumnReaderImpl<T>> {
        let reader = self.get_column_reader(row_group, column).await?;
        Ok(get_typed_column_reader(reader))
    }

    fn column_chunk_metadata(&self, row_group: usize, column: usize) -> Result<&ColumnChunkMetaData> {
        if row_group >= self.metadata.num_row_groups() {
            return Err(corrupted_err!(
                "Row group index {} out of range (file has {})",
                row_group,
                self.metadata.num_row_groups()
            ));
        }
        let rg = self.metadata.row_group(row_group);
        if column >= rg.num_columns() {
            return Err(corrupted_err!(
                "Column index {} out of range (row group has {})",
                column,
                rg.num_columns()
            ));
        }
        Ok(rg.column(column))
    }
}

fn add_path_context(err: ParquetError, path: &std::path::Path) -> ParquetError {
    match err {
        ParquetError::Corrupted(message) => ParquetError::Corrupted(format!(
            "Could not open parquet file {} for reading: {message}",
            path.display()
        )),
        ParquetError::Unsupported(message) => ParquetError::Unsupported(format!(
            "Could not open parquet file {} for reading: {message}",
            path.display()
        )),
        ParquetError::External(e) => ParquetError::Corrupted(format!(
            "Could not open parquet file {} for reading: {e}",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ChunkedRead {
        chunks: Vec<Vec<u8>>,
        position: usize,
    }

    impl ChunkedRead {
        fn new(data: &[u8], chunk_size: usize) -> Self {
            Self {
                chunks: data.chunks(chunk_size).map(|c| c.to_vec()).collect(),
                position: 0,
            }
        }
    }

    impl AsyncRead for ChunkedRead {
        fn poll_read(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            if self.position < self.chunks.len() {
                let chunk = self.chunks[self.position].clone();
                let n = chunk.len().min(buf.remaining());
                buf.put_slice(&chunk[..n]);
                // partial chunk reads would complicate the test; the chunks are
                // sized below the read buffer
                assert_eq!(n, chunk.len());
                self.position += 1;
            }
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_peek_and_advance_sees_each_byte_once() {
        let data: Vec<u8> = (0..=255).collect();
        let mut stream = PeekableByteStream::new(ChunkedRead::new(&data, 7));

        let mut seen = Vec::new();
        let mut sizes = [3usize, 11, 1, 40, 96, 60, 45, 100].into_iter();
        loop {
            let n = sizes.next().unwrap_or(13);
            let peeked = stream.peek(n).await.unwrap();
            if peeked.is_empty() {
                break;
            }
            // a second peek of the same size returns the same view
            let advance_by = peeked.len();
            seen.extend_from_slice(peeked);
            stream.advance(advance_by).await.unwrap();
        }
        assert_eq!(seen, data);
    }

    #[tokio::test]
    async fn test_peek_shorter_near_eof() {
        let mut stream = PeekableByteStream::new(ChunkedRead::new(b"abc", 2));
        assert_eq!(stream.peek(10).await.unwrap(), b"abc");
        stream.advance(2).await.unwrap();
        assert_eq!(stream.peek(10).await.unwrap(), b"c");
        stream.advance(1).await.unwrap();
        assert!(stream.advance(1).await.is_err());
    }

    #[tokio::test]
    async fn test_page_reader_empty_stream_is_none() {
        let mut reader =
            SerializedPageReader::new(std::io::Cursor::new(Bytes::new()), Compression::UNCOMPRESSED)
                .unwrap();
        assert!(reader.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_reader_garbage_header_is_corrupted() {
        let data = Bytes::from_static(&[0xFF; 64]);
        let mut reader =
            SerializedPageReader::new(std::io::Cursor::new(data), Compression::UNCOMPRESSED)
                .unwrap();
        let err = reader.next_page().await.unwrap_err();
        assert!(matches!(err, ParquetError::Corrupted(_)));
    }

    #[tokio::test]
    async fn test_page_reader_truncated_header_is_corrupted() {
        // A valid serialized header, cut short
        use crate::format::{DataPageHeader, PageHeader as TPageHeader, PageType as TPageType};
        use thrift::protocol::TCompactOutputProtocol;

        let header = TPageHeader {
            type_: TPageType::DATA_PAGE,
            uncompressed_page_size: 10,
            compressed_page_size: 10,
            crc: None,
            data_page_header: Some(DataPageHeader {
                num_values: 10,
                encoding: crate::format::Encoding::PLAIN,
                definition_level_encoding: crate::format::Encoding::RLE,
                repetition_level_encoding: crate::format::Encoding::RLE,
            }),
            index_page_header: None,
            dictionary_page_header: None,
            data_page_header_v2: None,
        };
        let mut buffer = Vec::new();
        {
            let mut protocol = TCompactOutputProtocol::new(&mut buffer);
            header.write_to_out_protocol(&mut protocol).unwrap();
        }
        buffer.truncate(buffer.len() - 1);

        let mut reader = SerializedPageReader::new(
            std::io::Cursor::new(Bytes::from(buffer)),
            Compression::UNCOMPRESSED,
        )
        .unwrap();
        let err = reader.next_page().await.unwrap_err();
        assert!(
            err.to_string().contains("unexpected end of stream"),
            "unexpected error: {err}"
        );
    }
}
