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

//! Module for parsing the Parquet file footer and metadata.

use std::sync::Arc;

use tokio::io::AsyncReadExt;

use crate::errors::{ParquetError, Result};
use crate::file::metadata::{ParquetMetaData, RowGroupMetaData};
use crate::file::reader::AsyncChunkReader;
use crate::file::{FOOTER_SIZE, PARQUET_MAGIC, PARQUET_MAGIC_ENCRYPTED};
use crate::format::FileMetaData as TFileMetaData;
use crate::schema::types::{self, SchemaDescriptor};
use crate::thrift::{TCompactInputProtocol, TSerializable};

/// Reads the [`ParquetMetaData`] from the footer of a Parquet source.
///
/// # Layout of Parquet file
/// ```text
/// +---------------------------+---+-----+
/// |      Rest of file         | B |  A  |
/// +---------------------------+---+-----+
/// ```
/// where `A` is the 8-byte footer (metadata length + magic) and `B` is the
/// Thrift-compact encoded metadata.
///
/// # I/O
///
/// Issues three asynchronous reads: the source length, the trailing 8-byte
/// footer, and the metadata bytes themselves.
pub async fn parse_metadata<R: AsyncChunkReader>(chunk_reader: &R) -> Result<ParquetMetaData> {
    // check file is large enough to hold footer
    let file_size = chunk_reader.len().await?;
    if file_size < FOOTER_SIZE as u64 {
        return Err(corrupted_err!(
            "File too small ({}B) to be a parquet file",
            file_size
        ));
    }

    let mut footer = [0_u8; FOOTER_SIZE];
    chunk_reader
        .get_read(file_size - FOOTER_SIZE as u64, FOOTER_SIZE as u64)
        .await?
        .read_exact(&mut footer)
        .await?;

    let metadata_len = decode_footer(&footer)? as u64;
    if metadata_len + FOOTER_SIZE as u64 > file_size {
        return Err(corrupted_err!(
            "Metadata size reported by footer ({}B) greater than file size ({}B)",
            metadata_len + FOOTER_SIZE as u64,
            file_size
        ));
    }

    let metadata_start = file_size - FOOTER_SIZE as u64 - metadata_len;
    let mut metadata = Vec::with_capacity(metadata_len as usize);
    let read = chunk_reader
        .get_read(metadata_start, metadata_len)
        .await?
        .read_to_end(&mut metadata)
        .await?;
    if read as u64 != metadata_len {
        return Err(corrupted_err!(
            "Could not read metadata (expected {}B, got {}B)",
            metadata_len,
            read
        ));
    }

    decode_metadata(&metadata)
}

/// Decodes the Parquet footer, returning the metadata length in bytes.
///
/// A Parquet footer is 8 bytes long and has the following layout:
/// ```text
/// +-----+--------+
/// | len | 'PAR1' |
/// +-----+--------+
/// ```
pub fn decode_footer(slice: &[u8; FOOTER_SIZE]) -> Result<usize> {
    if slice[4..] == PARQUET_MAGIC_ENCRYPTED {
        return Err(unsupported_err!("Parquet encryption is currently unsupported"));
    }
    if slice[4..] != PARQUET_MAGIC {
        return Err(corrupted_err!("Magic bytes not found in footer"));
    }

    // get the metadata length from the footer
    let metadata_len = u32::from_le_bytes(slice[..4].try_into().unwrap());
    Ok(metadata_len as usize)
}

/// Decodes [`ParquetMetaData`] from the provided bytes (Thrift compact protocol).
pub fn decode_metadata(buf: &[u8]) -> Result<ParquetMetaData> {
    let mut input = buf;
    let mut prot = TCompactInputProtocol::new(&mut input);
    let t_file_metadata: TFileMetaData = TFileMetaData::read_from_in_protocol(&mut prot)
        .map_err(|e| corrupted_err!("Could not parse metadata: {}", e))?;
    let schema = types::from_thrift(&t_file_metadata.schema)?;
    let schema_descr = Arc::new(SchemaDescriptor::new(schema));
    let mut row_groups = Vec::new();
    for rg in t_file_metadata.row_groups {
        row_groups.push(RowGroupMetaData::from_thrift(schema_descr.clone(), rg)?);
    }

    let file_metadata = crate::file::metadata::FileMetaData::new(
        t_file_metadata.version,
        t_file_metadata.num_rows,
        t_file_metadata.created_by,
        t_file_metadata.key_value_metadata,
        schema_descr,
    );
    Ok(ParquetMetaData::new(file_metadata, row_groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_parse_metadata_size_smaller_than_footer() {
        let data = Bytes::from_static(&[1, 2, 3, 4, 5, 6, 7]);
        let err = parse_metadata(&data).await.unwrap_err();
        assert!(
            err.to_string().contains("File too small"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_parse_metadata_corrupt_footer() {
        let data = Bytes::from_static(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let err = parse_metadata(&data).await.unwrap_err();
        assert!(
            err.to_string().contains("Magic bytes not found in footer"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_parse_metadata_encrypted_footer() {
        let data = Bytes::from_static(&[0, 0, 0, 0, b'P', b'A', b'R', b'E']);
        let err = parse_metadata(&data).await.unwrap_err();
        assert!(matches!(err, ParquetError::Unsupported(_)));
        assert!(err.to_string().contains("encryption"));
    }

    #[tokio::test]
    async fn test_parse_metadata_invalid_start() {
        let data = Bytes::from_static(&[255, 0, 0, 0, b'P', b'A', b'R', b'1']);
        let err = parse_metadata(&data).await.unwrap_err();
        assert!(
            err.to_string().contains("greater than file size"),
            "unexpected error: {err}"
        );
    }
}
