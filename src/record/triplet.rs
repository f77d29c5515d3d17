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

//! Buffered cursors over the `(def, rep, value)` triplets of one column chunk.

use crate::column::reader::{ColumnReader, ColumnReaderImpl};
use crate::data_type::*;
use crate::errors::{ParquetError, Result};
use crate::record::field::Field;
use crate::schema::types::ColumnDescPtr;

/// Default triplet batch size, in triplets per column read.
const DEFAULT_BATCH_SIZE: usize = 1024;

/// High level API wrapper on column reader.
/// Provides per-element access for each (def, rep, value) triplet in the column.
pub enum TripletIter {
    /// Triplet iterator for a boolean column
    BoolTripletIter(TypedTripletIter<BoolType>),
    /// Triplet iterator for an int32 column
    Int32TripletIter(TypedTripletIter<Int32Type>),
    /// Triplet iterator for an int64 column
    Int64TripletIter(TypedTripletIter<Int64Type>),
    /// Triplet iterator for an int96 column
    Int96TripletIter(TypedTripletIter<Int96Type>),
    /// Triplet iterator for a float column
    FloatTripletIter(TypedTripletIter<FloatType>),
    /// Triplet iterator for a double column
    DoubleTripletIter(TypedTripletIter<DoubleType>),
    /// Triplet iterator for a byte array column
    ByteArrayTripletIter(TypedTripletIter<ByteArrayType>),
    /// Triplet iterator for a fixed length byte array column
    FixedLenByteArrayTripletIter(TypedTripletIter<FixedLenByteArrayType>),
}

macro_rules! dispatch_triplet_iter {
    ($self:ident, $iter:ident => $body:expr) => {
        match $self {
            TripletIter::BoolTripletIter($iter) => $body,
            TripletIter::Int32TripletIter($iter) => $body,
            TripletIter::Int64TripletIter($iter) => $body,
            TripletIter::Int96TripletIter($iter) => $body,
            TripletIter::FloatTripletIter($iter) => $body,
            TripletIter::DoubleTripletIter($iter) => $body,
            TripletIter::ByteArrayTripletIter($iter) => $body,
            TripletIter::FixedLenByteArrayTripletIter($iter) => $body,
        }
    };
}

impl TripletIter {
    /// Creates a new triplet iterator for the column reader.
    pub fn new(descr: ColumnDescPtr, reader: ColumnReader) -> Self {
        match reader {
            ColumnReader::BoolColumnReader(reader) => TripletIter::BoolTripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::Int32ColumnReader(reader) => TripletIter::Int32TripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::Int64ColumnReader(reader) => TripletIter::Int64TripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::Int96ColumnReader(reader) => TripletIter::Int96TripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::FloatColumnReader(reader) => TripletIter::FloatTripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::DoubleColumnReader(reader) => TripletIter::DoubleTripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::ByteArrayColumnReader(reader) => TripletIter::ByteArrayTripletIter(
                TypedTripletIter::new(descr, DEFAULT_BATCH_SIZE, reader),
            ),
            ColumnReader::FixedLenByteArrayColumnReader(reader) => {
                TripletIter::FixedLenByteArrayTripletIter(TypedTripletIter::new(
                    descr,
                    DEFAULT_BATCH_SIZE,
                    reader,
                ))
            }
        }
    }

    /// Returns the column name of this triplet's column.
    pub fn column_name(&self) -> &str {
        dispatch_triplet_iter!(self, iter => iter.descr.name())
    }

    /// Returns the current `(def, rep)` levels, or `None` once the column chunk
    /// is exhausted.
    pub async fn current_levels(&mut self) -> Result<Option<(i16, i16)>> {
        dispatch_triplet_iter!(self, iter => iter.current_levels().await)
    }

    /// Consumes one triplet. The third element carries the converted value when
    /// the definition level reaches the leaf's maximum, `None` for a null slot.
    /// Fails once the column chunk is exhausted.
    pub async fn read_next(&mut self) -> Result<(i16, i16, Option<Field>)> {
        dispatch_triplet_iter!(self, iter => iter.read_next().await)
    }
}

/// Internal typed triplet iterator as a wrapper for column reader, provides
/// per-element access.
pub struct TypedTripletIter<T: DataType> {
    reader: ColumnReaderImpl<T>,
    descr: ColumnDescPtr,
    batch_size: usize,
    max_def_level: i16,
    // This column reader batch buffers
    values: Vec<T::T>,
    def_levels: Vec<i16>,
    rep_levels: Vec<i16>,
    // Tracking of the current buffered triplets
    levels_offset: usize,
    levels_buffered: usize,
    values_offset: usize,
    values_buffered: usize,
}

impl<T: DataType> TypedTripletIter<T> {
    /// Creates a new typed triplet iterator based on provided column reader.
    /// Use batch size to specify the number of triplets to buffer.
    fn new(descr: ColumnDescPtr, batch_size: usize, reader: ColumnReaderImpl<T>) -> Self {
        assert!(batch_size > 0, "Expected positive batch size");
        let max_def_level = descr.max_def_level();
        Self {
            reader,
            descr,
            batch_size,
            max_def_level,
            values: vec![T::T::default(); batch_size],
            def_levels: vec![0; batch_size],
            rep_levels: vec![0; batch_size],
            levels_offset: 0,
            levels_buffered: 0,
            values_offset: 0,
            values_buffered: 0,
        }
    }

    /// Returns the current `(def, rep)` levels, refilling the buffers as
    /// needed; `None` once the column chunk is exhausted.
    async fn current_levels(&mut self) -> Result<Option<(i16, i16)>> {
        self.refill_when_empty().await?;
        if self.levels_offset == self.levels_buffered {
            return Ok(None);
        }
        Ok(Some((
            self.def_levels[self.levels_offset],
            self.rep_levels[self.levels_offset],
        )))
    }

    /// Consumes one triplet, converting the value when present.
    async fn read_next(&mut self) -> Result<(i16, i16, Option<Field>)> {
        self.refill_when_empty().await?;
        if self.levels_offset == self.levels_buffered {
            return Err(self.column_error(corrupted_err!("No more triplets buffered")));
        }
        let def_level = self.def_levels[self.levels_offset];
        let rep_level = self.rep_levels[self.levels_offset];
        self.levels_offset += 1;

        if def_level < self.max_def_level {
            return Ok((def_level, rep_level, None));
        }
        if self.values_offset == self.values_buffered {
            return Err(self.column_error(corrupted_err!(
                "Value was non-null, but has not been buffered"
            )));
        }
        let value = std::mem::take(&mut self.values[self.values_offset]);
        self.values_offset += 1;
        let field = self
            .convert_value(value)
            .map_err(|e| self.column_error(e))?;
        Ok((def_level, rep_level, Some(field)))
    }

    async fn refill_when_empty(&mut self) -> Result<()> {
        if self.levels_offset != self.levels_buffered {
            return Ok(());
        }
        let (values_read, levels_read) = self
            .reader
            .read_batch(
                self.batch_size,
                Some(&mut self.def_levels),
                Some(&mut self.rep_levels),
                &mut self.values,
            )
            .await
            .map_err(|e| self.column_error(e))?;
        self.levels_offset = 0;
        self.levels_buffered = levels_read;
        self.values_offset = 0;
        self.values_buffered = values_read;
        Ok(())
    }

    fn convert_value(&self, value: T::T) -> Result<Field> {
        T::T::make_field(&self.descr, value)
    }

    fn column_error(&self, err: ParquetError) -> ParquetError {
        let name = self.descr.name();
        match err {
            ParquetError::Corrupted(message) => {
                ParquetError::Corrupted(format!("In column {name}: {message}"))
            }
            ParquetError::Unsupported(message) => {
                ParquetError::Unsupported(format!("In column {name}: {message}"))
            }
            ParquetError::External(e) => {
                ParquetError::Corrupted(format!("In column {name}: {e}"))
            }
        }
    }
}

/// Conversion from a physical value to a [`Field`], implemented per physical
/// value type so the triplet iterator can stay generic.
pub(crate) trait MakeField: Sized {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field>;
}

impl MakeField for bool {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Ok(Field::convert_bool(descr, value))
    }
}

impl MakeField for i32 {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Ok(Field::convert_int32(descr, value))
    }
}

impl MakeField for i64 {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Ok(Field::convert_int64(descr, value))
    }
}

impl MakeField for Int96 {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Ok(Field::convert_int96(descr, value))
    }
}

impl MakeField for f32 {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Ok(Field::convert_float(descr, value))
    }
}

impl MakeField for f64 {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Ok(Field::convert_double(descr, value))
    }
}

impl MakeField for ByteArray {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Field::convert_byte_array(descr, value)
    }
}

impl MakeField for FixedLenByteArray {
    fn make_field(descr: &crate::schema::types::ColumnDescriptor, value: Self) -> Result<Field> {
        Field::convert_byte_array(descr, value.into())
    }
}
