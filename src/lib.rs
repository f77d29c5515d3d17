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

//!
//! This crate is an asynchronous Rust implementation of
//! [Apache Parquet](https://parquet.apache.org/), a columnar, self-describing
//! binary file format.
//!
//! # Format Overview
//!
//! Parquet is a columnar format: unlike row formats like [CSV], values are
//! iterated along columns instead of rows. Files are partitioned for
//! scalability into "row groups", each holding one column chunk per column,
//! and column chunks are split into pages, the unit of encoding, compression
//! and I/O.
//!
//! Parquet distinguishes between "logical" and "physical" data types.
//! For instance, strings (logical type) are stored as byte arrays (physical
//! type), and temporal types like dates and timestamps are stored as integers.
//! This crate exposes both kinds of types.
//!
//! Nesting is expressed with [Dremel] record shredding: every leaf value
//! carries a definition and a repetition level describing which of its
//! optional ancestors are present and where lists start.
//!
//! For more details about the Parquet format, see the
//! [Parquet spec](https://github.com/apache/parquet-format/blob/master/README.md#file-format).
//!
//! # APIs
//!
//! All I/O is asynchronous: readers consume any byte source implementing
//! [`file::reader::AsyncChunkReader`], writers feed any
//! [`tokio::io::AsyncWrite`]. Encoding and decoding never suspend; only page
//! and footer I/O does.
//!
//! ## Read/Write Columns
//!
//! Workloads needing fine-grained control can use the lower-level APIs in
//! [`mod@file`] and [`mod@column`]. These expose the underlying parquet data
//! model: batches of definition levels, repetition levels and values per leaf
//! column.
//!
//! ## Read Records
//!
//! The [`mod@record`] module reassembles nested records from the flat columns,
//! emitting structural events and typed values to a
//! [`RecordConsumer`](record::RecordConsumer) callback.
//!
//! [CSV]: https://en.wikipedia.org/wiki/Comma-separated_values
//! [Dremel]: https://research.google/pubs/pub36632/

#[macro_use]
pub mod errors;
pub mod basic;

/// Rust structures for the Thrift definition of the Parquet format, in the
/// shape emitted by the Thrift compiler.
pub mod format;

#[macro_use]
pub mod data_type;

mod util;
pub use util::bit_util;

pub mod column;
pub mod compression;
pub mod encodings;
pub mod file;
pub mod record;
pub mod schema;

pub mod thrift;
