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

//! Main entrypoint for working with Parquet API.
//!
//! Provides access to file and row group readers and writers, record API, metadata, etc.
//!
//! See [`serialized_reader::SerializedFileReader`] for reading and
//! [`writer::SerializedFileWriter`] for writing.

pub mod footer;
pub mod metadata;
pub mod properties;
pub mod reader;
pub mod serialized_reader;
pub mod writer;

/// Length in bytes of the trailing footer: a 4-byte little-endian metadata
/// length followed by the 4-byte magic.
pub const FOOTER_SIZE: usize = 8;
/// The number indicating the start and end of a Parquet file.
pub const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];
/// The magic of an encrypted-footer Parquet file, which this crate rejects.
pub const PARQUET_MAGIC_ENCRYPTED: [u8; 4] = [b'P', b'A', b'R', b'E'];
