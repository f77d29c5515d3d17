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

//! Reconstruction of nested records from flat column chunks.
//!
//! The assembler mirrors the logical schema with a stack of field readers over
//! per-column triplet iterators, emitting structural events and leaf values to
//! a [`RecordConsumer`] in record order.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::errors::Result;
use crate::file::reader::AsyncChunkReader;
use crate::file::serialized_reader::SerializedFileReader;
use crate::record::field::Field;
use crate::record::triplet::TripletIter;
use crate::schema::logical::FieldSchema;

/// Receives the stream of structural events and values produced while
/// assembling records.
///
/// Callbacks arrive in assembly order: a record is bracketed by
/// `start_record`/`end_record`, each top-level field by `start_column`; nested
/// shapes bracket themselves with the corresponding start/end/separate calls.
pub trait RecordConsumer: Send {
    /// A new record starts.
    fn start_record(&mut self);
    /// The current record is complete.
    fn end_record(&mut self);
    /// A top-level column named `name` starts.
    fn start_column(&mut self, name: &str);
    /// A struct value starts.
    fn start_struct(&mut self);
    /// The current struct value ends.
    fn end_struct(&mut self);
    /// A struct member named `name` starts.
    fn start_field(&mut self, name: &str);
    /// A list value starts.
    fn start_list(&mut self);
    /// The current list value ends.
    fn end_list(&mut self);
    /// Separates two consecutive list elements.
    fn separate_list_values(&mut self);
    /// A map value starts.
    fn start_map(&mut self);
    /// The current map value ends.
    fn end_map(&mut self);
    /// Separates two consecutive map entries.
    fn separate_map_values(&mut self);
    /// Separates a map key from its value.
    fn separate_key_value(&mut self);
    /// An absent value.
    fn append_null(&mut self);
    /// A present leaf value.
    fn append_value(&mut self, value: Field);
}

enum FieldReaderKind {
    Primitive(TripletIter),
    Optional {
        def_level: i16,
        child: Box<FieldReader>,
    },
    Struct {
        children: Vec<FieldReader>,
    },
    List {
        def_level: i16,
        rep_level: i16,
        element: Box<FieldReader>,
    },
    Map {
        def_level: i16,
        rep_level: i16,
        key: Box<FieldReader>,
        value: Box<FieldReader>,
    },
}

/// A reader for one field of the logical schema, mirroring its shape.
struct FieldReader {
    name: String,
    kind: FieldReaderKind,
}

impl FieldReader {
    /// Current `(def, rep)` levels of the first leaf under this field, `None`
    /// once the row group is exhausted.
    fn current_levels(&mut self) -> BoxFuture<'_, Result<Option<(i16, i16)>>> {
        async move {
            match &mut self.kind {
                FieldReaderKind::Primitive(triplets) => triplets.current_levels().await,
                FieldReaderKind::Optional { child, .. } => child.current_levels().await,
                FieldReaderKind::List { element, .. } => element.current_levels().await,
                FieldReaderKind::Map { key, .. } => key.current_levels().await,
                FieldReaderKind::Struct { children } => match children.first_mut() {
                    Some(child) => child.current_levels().await,
                    None => Ok(None),
                },
            }
        }
        .boxed()
    }

    /// Reads one value of this field, emitting events to `consumer`.
    fn read_field<'a, C: RecordConsumer>(
        &'a mut self,
        consumer: &'a mut C,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            match &mut self.kind {
                FieldReaderKind::Primitive(triplets) => {
                    let (_, _, value) = triplets.read_next().await?;
                    if let Some(value) = value {
                        consumer.append_value(value);
                    }
                    Ok(())
                }
                FieldReaderKind::Optional { def_level, child } => {
                    let present = match child.current_levels().await? {
                        Some((def, _)) => def > *def_level,
                        None => false,
                    };
                    if present {
                        child.read_field(consumer).await
                    } else {
                        consumer.append_null();
                        child.skip_field().await
                    }
                }
                FieldReaderKind::Struct { children } => {
                    consumer.start_struct();
                    for child in children {
                        consumer.start_field(&child.name);
                        child.read_field(consumer).await?;
                    }
                    consumer.end_struct();
                    Ok(())
                }
                FieldReaderKind::List {
                    def_level,
                    rep_level,
                    element,
                } => {
                    consumer.start_list();
                    let non_empty = match element.current_levels().await? {
                        Some((def, _)) => def > *def_level,
                        None => false,
                    };
                    if non_empty {
                        element.read_field(consumer).await?;
                        loop {
                            match element.current_levels().await? {
                                Some((_, rep)) if rep > *rep_level => {
                                    consumer.separate_list_values();
                                    element.read_field(consumer).await?;
                                }
                                _ => break,
                            }
                        }
                    } else {
                        element.skip_field().await?;
                    }
                    consumer.end_list();
                    Ok(())
                }
                FieldReaderKind::Map {
                    def_level,
                    rep_level,
                    key,
                    value,
                } => {
                    consumer.start_map();
                    let non_empty = match key.current_levels().await? {
                        Some((def, _)) => def > *def_level,
                        None => false,
                    };
                    if non_empty {
                        read_pair(key, value, consumer).await?;
                        loop {
                            match key.current_levels().await? {
                                Some((_, rep)) if rep > *rep_level => {
                                    consumer.separate_map_values();
                                    read_pair(key, value, consumer).await?;
                                }
                                _ => break,
                            }
                        }
                    } else {
                        key.skip_field().await?;
                        value.skip_field().await?;
                    }
                    consumer.end_map();
                    Ok(())
                }
            }
        }
        .boxed()
    }

    /// Advances this field's subtree by one value without emitting anything.
    /// Absent optional branches still consume their levels this way.
    fn skip_field(&mut self) -> BoxFuture<'_, Result<()>> {
        async move {
            match &mut self.kind {
                FieldReaderKind::Primitive(triplets) => {
                    triplets.read_next().await?;
                    Ok(())
                }
                FieldReaderKind::Optional { child, .. } => child.skip_field().await,
                FieldReaderKind::Struct { children } => {
                    for child in children {
                        child.skip_field().await?;
                    }
                    Ok(())
                }
                FieldReaderKind::List { element, .. } => element.skip_field().await,
                FieldReaderKind::Map { key, value, .. } => {
                    key.skip_field().await?;
                    value.skip_field().await
                }
            }
        }
        .boxed()
    }
}

async fn read_pair<C: RecordConsumer>(
    key: &mut Box<FieldReader>,
    value: &mut Box<FieldReader>,
    consumer: &mut C,
) -> Result<()> {
    key.read_field(consumer).await?;
    consumer.separate_key_value();
    value.read_field(consumer).await
}

/// Assembles the records of one row group, field reader stack over the logical
/// schema.
pub struct RecordReader {
    field_readers: Vec<FieldReader>,
}

impl RecordReader {
    /// Creates a record reader for `row_group`, opening a column chunk reader
    /// for every leaf of the logical schema.
    pub async fn new<R: AsyncChunkReader>(
        file_reader: &SerializedFileReader<R>,
        row_group: usize,
    ) -> Result<RecordReader> {
        let schema = file_reader.logical_schema()?;
        let mut builder = FieldReaderBuilder {
            file_reader,
            row_group,
        };
        let mut field_readers = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            field_readers.push(builder.build(field).await?);
        }
        Ok(RecordReader { field_readers })
    }

    /// Returns the `(def, rep)` levels at the current position of column 0, or
    /// `None` once the row group is exhausted.
    pub async fn current_levels(&mut self) -> Result<Option<(i16, i16)>> {
        match self.field_readers.first_mut() {
            Some(reader) => reader.current_levels().await,
            None => Ok(None),
        }
    }

    /// Assembles a single record into `consumer`.
    pub async fn read_one<C: RecordConsumer>(&mut self, consumer: &mut C) -> Result<()> {
        consumer.start_record();
        for reader in &mut self.field_readers {
            consumer.start_column(&reader.name);
            reader.read_field(consumer).await?;
        }
        consumer.end_record();
        Ok(())
    }

    /// Assembles every remaining record of the row group into `consumer`.
    pub async fn read_all<C: RecordConsumer>(&mut self, consumer: &mut C) -> Result<()> {
        while self.current_levels().await?.is_some() {
            self.read_one(consumer).await?;
        }
        Ok(())
    }
}

struct FieldReaderBuilder<'a, R: AsyncChunkReader> {
    file_reader: &'a SerializedFileReader<R>,
    row_group: usize,
}

impl<'a, R: AsyncChunkReader> FieldReaderBuilder<'a, R> {
    fn build<'b>(&'b mut self, field: &'b FieldSchema) -> BoxFuture<'b, Result<FieldReader>> {
        async move {
            let reader = match field {
                FieldSchema::Primitive {
                    name,
                    column_index,
                    column,
                    ..
                } => {
                    let column_reader = self
                        .file_reader
                        .get_column_reader(self.row_group, *column_index)
                        .await?;
                    FieldReader {
                        name: name.clone(),
                        kind: FieldReaderKind::Primitive(TripletIter::new(
                            column.clone(),
                            column_reader,
                        )),
                    }
                }
                FieldSchema::Optional {
                    name,
                    levels,
                    child,
                } => FieldReader {
                    name: name.clone(),
                    kind: FieldReaderKind::Optional {
                        def_level: levels.def_level,
                        child: Box::new(self.build(child).await?),
                    },
                },
                FieldSchema::Struct { name, fields, .. } => {
                    let mut children = Vec::with_capacity(fields.len());
                    for child in fields {
                        children.push(self.build(child).await?);
                    }
                    FieldReader {
                        name: name.clone(),
                        kind: FieldReaderKind::Struct { children },
                    }
                }
                FieldSchema::List {
                    name,
                    levels,
                    element,
                } => FieldReader {
                    name: name.clone(),
                    kind: FieldReaderKind::List {
                        def_level: levels.def_level,
                        rep_level: levels.rep_level,
                        element: Box::new(self.build(element).await?),
                    },
                },
                FieldSchema::Map {
                    name,
                    levels,
                    key,
                    value,
                } => FieldReader {
                    name: name.clone(),
                    kind: FieldReaderKind::Map {
                        def_level: levels.def_level,
                        rep_level: levels.rep_level,
                        key: Box::new(self.build(key).await?),
                        value: Box::new(self.build(value).await?),
                    },
                },
            };
            Ok(reader)
        }
        .boxed()
    }
}
