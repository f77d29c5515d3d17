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

//! Abstractions for the asynchronous byte sources a Parquet file is read from.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::io::{AsyncRead, AsyncSeekExt};

use crate::errors::{ParquetError, Result};

/// An asynchronous, positioned source of file bytes.
///
/// `get_read` opens an independent sequential reader over a byte range, so
/// every column chunk reader owns its own stream and concurrent chunks never
/// contend on a shared cursor. `open_external` resolves a `ColumnChunk`
/// stored in a sibling file.
pub trait AsyncChunkReader: Send + Sync {
    /// The sequential reader type produced by `get_read`.
    type T: AsyncRead + Unpin + Send + 'static;

    /// Returns the total length of the underlying source, in bytes.
    fn len(&self) -> BoxFuture<'_, Result<u64>>;

    /// Opens a reader positioned at `start`, bounded to `length` bytes.
    fn get_read(&self, start: u64, length: u64) -> BoxFuture<'_, Result<Self::T>>;

    /// Opens the source holding an external column chunk, resolved relative to
    /// this source.
    fn open_external(&self, path: &str) -> BoxFuture<'_, Result<Self>>
    where
        Self: Sized,
    {
        let path = path.to_owned();
        async move {
            Err(unsupported_err!(
                "External column chunk '{}' cannot be resolved from this source",
                path
            ))
        }
        .boxed()
    }
}

/// A local file source.
///
/// Every `get_read` opens a fresh [`tokio::fs::File`], so readers created from
/// the same source are fully independent.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsyncChunkReader for FileSource {
    type T = tokio::io::Take<tokio::fs::File>;

    fn len(&self) -> BoxFuture<'_, Result<u64>> {
        async move {
            let metadata = tokio::fs::metadata(&self.path).await?;
            Ok(metadata.len())
        }
        .boxed()
    }

    fn get_read(&self, start: u64, length: u64) -> BoxFuture<'_, Result<Self::T>> {
        async move {
            let mut file = tokio::fs::File::open(&self.path).await?;
            file.seek(SeekFrom::Start(start)).await?;
            Ok(tokio::io::AsyncReadExt::take(file, length))
        }
        .boxed()
    }

    fn open_external(&self, path: &str) -> BoxFuture<'_, Result<Self>> {
        let resolved = match self.path.parent() {
            Some(parent) => parent.join(path),
            None => PathBuf::from(path),
        };
        async move { Ok(FileSource::new(resolved)) }.boxed()
    }
}

impl AsyncChunkReader for Bytes {
    type T = std::io::Cursor<Bytes>;

    fn len(&self) -> BoxFuture<'_, Result<u64>> {
        let len = Bytes::len(self) as u64;
        async move { Ok(len) }.boxed()
    }

    fn get_read(&self, start: u64, length: u64) -> BoxFuture<'_, Result<Self::T>> {
        let result = if start > Bytes::len(self) as u64 {
            Err(corrupted_err!(
                "Byte range {}..{} is out of bounds (buffer is {} bytes)",
                start,
                start + length,
                Bytes::len(self)
            ))
        } else {
            let end = std::cmp::min(start + length, Bytes::len(self) as u64);
            Ok(std::io::Cursor::new(self.slice(start as usize..end as usize)))
        };
        async move { result }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_bytes_source() {
        let data = Bytes::from_static(b"0123456789");
        assert_eq!(AsyncChunkReader::len(&data).await.unwrap(), 10);

        let mut read = data.get_read(2, 3).await.unwrap();
        let mut out = Vec::new();
        read.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"234");

        // Range clamped at the end of the buffer
        let mut read = data.get_read(8, 10).await.unwrap();
        let mut out = Vec::new();
        read.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"89");

        assert!(data.get_read(11, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_file_source_independent_readers() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abcdefgh").unwrap();
        file.flush().unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.len().await.unwrap(), 8);

        let mut first = source.get_read(0, 4).await.unwrap();
        let mut second = source.get_read(4, 4).await.unwrap();

        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        second.read_to_end(&mut out2).await.unwrap();
        first.read_to_end(&mut out1).await.unwrap();
        assert_eq!(out1, b"abcd");
        assert_eq!(out2, b"efgh");
    }

    #[tokio::test]
    async fn test_external_chunk_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main.parquet");
        let sibling = dir.path().join("chunk.parquet");
        std::fs::write(&main, b"main").unwrap();
        std::fs::write(&sibling, b"sibling").unwrap();

        let source = FileSource::new(&main);
        let external = source.open_external("chunk.parquet").await.unwrap();
        assert_eq!(external.len().await.unwrap(), 7);
    }
}
