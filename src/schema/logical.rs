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

//! Classification of a Parquet schema into its logical shape.
//!
//! The flat schema in the footer describes a physical tree of groups and
//! primitives. Readers that reassemble records need the logical shape instead:
//! which groups are lists or maps, which fields are nullable, and which
//! definition/repetition levels mark presence and element boundaries. This
//! module derives that shape, including the legacy two-level list layout.

use crate::basic::{ConvertedType, Repetition};
use crate::errors::{ParquetError, Result};
use crate::schema::types::{ColumnDescPtr, SchemaDescriptor, TypePtr};

/// The definition and repetition levels attached to a logical node.
///
/// For wrapper nodes (optional, list) these are the levels *tested against*
/// while assembling: a definition level above `def_level` means the wrapped
/// content is present, a repetition level above `rep_level` means a new
/// element continues the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    /// Definition level threshold.
    pub def_level: i16,
    /// Repetition level threshold.
    pub rep_level: i16,
}

/// A node of the logical schema tree.
#[derive(Debug)]
pub enum FieldSchema {
    /// A primitive leaf, tied to its column.
    Primitive {
        /// Field name.
        name: String,
        /// Level thresholds of this leaf (its maximum levels).
        levels: LevelInfo,
        /// Index of the leaf in preorder traversal of the schema.
        column_index: usize,
        /// The leaf's column descriptor.
        column: ColumnDescPtr,
    },
    /// A nullable wrapper around a field.
    Optional {
        /// Field name.
        name: String,
        /// Level thresholds; `def > def_level` means the child is present.
        levels: LevelInfo,
        /// The wrapped field.
        child: Box<FieldSchema>,
    },
    /// A group of named fields.
    Struct {
        /// Field name.
        name: String,
        /// Level thresholds of this node.
        levels: LevelInfo,
        /// The struct members, in schema order.
        fields: Vec<FieldSchema>,
    },
    /// A list of elements.
    List {
        /// Field name.
        name: String,
        /// Level thresholds; `def > def_level` means at least one element,
        /// `rep > rep_level` continues the list.
        levels: LevelInfo,
        /// The element field.
        element: Box<FieldSchema>,
    },
    /// A map of key/value pairs.
    Map {
        /// Field name.
        name: String,
        /// Level thresholds, as for lists.
        levels: LevelInfo,
        /// The key field, always non-null.
        key: Box<FieldSchema>,
        /// The value field.
        value: Box<FieldSchema>,
    },
}

impl FieldSchema {
    /// Returns the field name of this node.
    pub fn name(&self) -> &str {
        match self {
            FieldSchema::Primitive { name, .. } => name,
            FieldSchema::Optional { name, .. } => name,
            FieldSchema::Struct { name, .. } => name,
            FieldSchema::List { name, .. } => name,
            FieldSchema::Map { name, .. } => name,
        }
    }

    /// Returns the level thresholds of this node.
    pub fn levels(&self) -> LevelInfo {
        match self {
            FieldSchema::Primitive { levels, .. } => *levels,
            FieldSchema::Optional { levels, .. } => *levels,
            FieldSchema::Struct { levels, .. } => *levels,
            FieldSchema::List { levels, .. } => *levels,
            FieldSchema::Map { levels, .. } => *levels,
        }
    }
}

/// The logical shape of a whole schema: one classified tree per top-level field.
#[derive(Debug)]
pub struct LogicalSchema {
    /// Top-level fields in schema order.
    pub fields: Vec<FieldSchema>,
}

impl LogicalSchema {
    /// Classifies the schema in `descr` into its logical shape.
    ///
    /// This is intentionally separate from footer parsing: files whose logical
    /// shape is malformed can still be read through the low-level column API.
    pub fn try_new(descr: &SchemaDescriptor) -> Result<Self> {
        let mut builder = Builder {
            descr,
            next_column_index: 0,
        };
        let mut fields = Vec::new();
        for field in descr.root_schema().get_fields() {
            fields.push(builder.build_node(field, 0, 0)?);
        }
        Ok(LogicalSchema { fields })
    }
}

struct Builder<'a> {
    descr: &'a SchemaDescriptor,
    /// Leaves are numbered in preorder, matching `SchemaDescriptor::columns`
    next_column_index: usize,
}

impl<'a> Builder<'a> {
    /// Builds a node, applying the repetition wrappers: an OPTIONAL field is an
    /// `Optional` around its shape, a REPEATED field is an unannounced list.
    fn build_node(&mut self, tp: &TypePtr, parent_def: i16, parent_rep: i16) -> Result<FieldSchema> {
        let (def, rep) = match tp.get_basic_info().repetition() {
            Repetition::OPTIONAL => (parent_def + 1, parent_rep),
            Repetition::REPEATED => (parent_def + 1, parent_rep + 1),
            Repetition::REQUIRED => (parent_def, parent_rep),
        };

        match tp.get_basic_info().repetition() {
            Repetition::OPTIONAL => Ok(FieldSchema::Optional {
                name: tp.name().to_owned(),
                levels: LevelInfo {
                    def_level: def - 1,
                    rep_level: rep,
                },
                child: Box::new(self.build_shape(tp, def, rep)?),
            }),
            Repetition::REPEATED => Ok(FieldSchema::List {
                name: tp.name().to_owned(),
                levels: LevelInfo {
                    def_level: def - 1,
                    rep_level: rep - 1,
                },
                element: Box::new(self.build_shape(tp, def, rep)?),
            }),
            Repetition::REQUIRED => self.build_shape(tp, def, rep),
        }
    }

    /// Builds the shape of a node, ignoring its own repetition.
    fn build_shape(&mut self, tp: &TypePtr, def: i16, rep: i16) -> Result<FieldSchema> {
        if tp.is_primitive() {
            return self.build_primitive(tp, def, rep);
        }
        match tp.get_basic_info().converted_type() {
            ConvertedType::MAP | ConvertedType::MAP_KEY_VALUE => self.build_map(tp, def, rep),
            ConvertedType::LIST => self.build_list(tp, def, rep),
            _ => self.build_struct(tp, def, rep),
        }
    }

    fn build_primitive(&mut self, tp: &TypePtr, def: i16, rep: i16) -> Result<FieldSchema> {
        let column_index = self.next_column_index;
        self.next_column_index += 1;
        let column = self.descr.column(column_index);
        if column.max_def_level() != def || column.max_rep_level() != rep {
            return Err(corrupted_err!(
                "Levels of column '{}' do not match its position in the schema tree (expected ({}, {}), got ({}, {}))",
                column.path(),
                column.max_def_level(),
                column.max_rep_level(),
                def,
                rep
            ));
        }
        Ok(FieldSchema::Primitive {
            name: tp.name().to_owned(),
            levels: LevelInfo {
                def_level: def,
                rep_level: rep,
            },
            column_index,
            column,
        })
    }

    fn build_struct(&mut self, tp: &TypePtr, def: i16, rep: i16) -> Result<FieldSchema> {
        let mut fields = Vec::with_capacity(tp.get_fields().len());
        for field in tp.get_fields() {
            fields.push(self.build_node(field, def, rep)?);
        }
        Ok(FieldSchema::Struct {
            name: tp.name().to_owned(),
            levels: LevelInfo {
                def_level: def,
                rep_level: rep,
            },
            fields,
        })
    }

    fn build_list(&mut self, tp: &TypePtr, def: i16, rep: i16) -> Result<FieldSchema> {
        if tp.get_fields().len() != 1 {
            return Err(corrupted_err!(
                "Invalid list group '{}': expected a single repeated child",
                tp.name()
            ));
        }
        let repeated = &tp.get_fields()[0];
        if repeated.get_basic_info().repetition() != Repetition::REPEATED {
            return Err(corrupted_err!(
                "Invalid list group '{}': child '{}' is not repeated",
                tp.name(),
                repeated.name()
            ));
        }

        let legacy_two_level = repeated.is_primitive()
            || repeated.get_fields().len() != 1
            || repeated.name() == "array"
            || repeated.name() == format!("{}_tuple", tp.name());

        let element = if legacy_two_level {
            // Two-level layout: the repeated node itself carries the element
            // values; its shape is built without another list wrapper.
            let (elem_def, elem_rep) = (def + 1, rep + 1);
            self.build_shape(repeated, elem_def, elem_rep)?
        } else {
            // Standard three-level layout: the repeated group holds one element field
            let (rep_def, rep_rep) = (def + 1, rep + 1);
            self.build_node(&repeated.get_fields()[0], rep_def, rep_rep)?
        };

        Ok(FieldSchema::List {
            name: tp.name().to_owned(),
            levels: LevelInfo {
                def_level: def,
                rep_level: rep,
            },
            element: Box::new(element),
        })
    }

    fn build_map(&mut self, tp: &TypePtr, def: i16, rep: i16) -> Result<FieldSchema> {
        if tp.get_fields().len() != 1 {
            return Err(corrupted_err!(
                "Invalid map group '{}': expected a single repeated key_value child",
                tp.name()
            ));
        }
        let key_value = &tp.get_fields()[0];
        if key_value.get_basic_info().repetition() != Repetition::REPEATED
            || key_value.is_primitive()
            || key_value.get_fields().len() != 2
        {
            return Err(corrupted_err!(
                "Invalid map group '{}': expected a repeated group of (key, value)",
                tp.name()
            ));
        }

        let key_node = &key_value.get_fields()[0];
        let value_node = &key_value.get_fields()[1];
        if !key_node.is_primitive() {
            return Err(corrupted_err!(
                "Invalid map group '{}': key must be a primitive field",
                tp.name()
            ));
        }

        let (kv_def, kv_rep) = (def + 1, rep + 1);
        let key = self.build_node(key_node, kv_def, kv_rep)?;
        let value = self.build_node(value_node, kv_def, kv_rep)?;

        Ok(FieldSchema::Map {
            name: tp.name().to_owned(),
            levels: LevelInfo {
                def_level: def,
                rep_level: rep,
            },
            key: Box::new(key),
            value: Box::new(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{LogicalType, Type as PhysicalType};
    use crate::schema::types::Type as SchemaType;
    use std::sync::Arc;

    fn descr_of(root_fields: Vec<SchemaType>) -> SchemaDescriptor {
        let root = SchemaType::group_type_builder("schema")
            .with_fields(root_fields.into_iter().map(Arc::new).collect())
            .build()
            .unwrap();
        SchemaDescriptor::new(Arc::new(root))
    }

    fn standard_list(name: &str, element: SchemaType) -> SchemaType {
        let repeated = SchemaType::group_type_builder("list")
            .with_repetition(Repetition::REPEATED)
            .with_fields(vec![Arc::new(element)])
            .build()
            .unwrap();
        SchemaType::group_type_builder(name)
            .with_repetition(Repetition::OPTIONAL)
            .with_converted_type(ConvertedType::LIST)
            .with_logical_type(Some(LogicalType::List))
            .with_fields(vec![Arc::new(repeated)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_flat_required_and_optional() {
        let descr = descr_of(vec![
            SchemaType::primitive_type_builder("a", PhysicalType::INT32)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap(),
            SchemaType::primitive_type_builder("b", PhysicalType::DOUBLE)
                .with_repetition(Repetition::OPTIONAL)
                .build()
                .unwrap(),
        ]);
        let schema = LogicalSchema::try_new(&descr).unwrap();
        assert_eq!(schema.fields.len(), 2);

        match &schema.fields[0] {
            FieldSchema::Primitive {
                levels,
                column_index,
                ..
            } => {
                assert_eq!(*levels, LevelInfo { def_level: 0, rep_level: 0 });
                assert_eq!(*column_index, 0);
            }
            other => panic!("expected primitive, got {other:?}"),
        }
        match &schema.fields[1] {
            FieldSchema::Optional { levels, child, .. } => {
                assert_eq!(*levels, LevelInfo { def_level: 0, rep_level: 0 });
                assert_eq!(
                    child.levels(),
                    LevelInfo { def_level: 1, rep_level: 0 }
                );
            }
            other => panic!("expected optional, got {other:?}"),
        }
    }

    #[test]
    fn test_three_level_list() {
        let element = SchemaType::primitive_type_builder("element", PhysicalType::INT32)
            .with_repetition(Repetition::OPTIONAL)
            .build()
            .unwrap();
        let descr = descr_of(vec![standard_list("my_list", element)]);
        let schema = LogicalSchema::try_new(&descr).unwrap();

        // optional(list(optional(primitive)))
        let list = match &schema.fields[0] {
            FieldSchema::Optional { child, levels, .. } => {
                assert_eq!(*levels, LevelInfo { def_level: 0, rep_level: 0 });
                child.as_ref()
            }
            other => panic!("expected optional, got {other:?}"),
        };
        let element = match list {
            FieldSchema::List { element, levels, .. } => {
                assert_eq!(*levels, LevelInfo { def_level: 1, rep_level: 0 });
                element.as_ref()
            }
            other => panic!("expected list, got {other:?}"),
        };
        match element {
            FieldSchema::Optional { levels, child, .. } => {
                assert_eq!(*levels, LevelInfo { def_level: 2, rep_level: 1 });
                assert_eq!(
                    child.levels(),
                    LevelInfo { def_level: 3, rep_level: 1 }
                );
            }
            other => panic!("expected optional element, got {other:?}"),
        }
    }

    #[test]
    fn test_two_level_legacy_list() {
        // optional group my_list (LIST) { repeated int32 element; }
        let repeated = SchemaType::primitive_type_builder("element", PhysicalType::INT32)
            .with_repetition(Repetition::REPEATED)
            .build()
            .unwrap();
        let list_group = SchemaType::group_type_builder("my_list")
            .with_repetition(Repetition::OPTIONAL)
            .with_converted_type(ConvertedType::LIST)
            .with_fields(vec![Arc::new(repeated)])
            .build()
            .unwrap();
        let descr = descr_of(vec![list_group]);
        let schema = LogicalSchema::try_new(&descr).unwrap();

        let list = match &schema.fields[0] {
            FieldSchema::Optional { child, .. } => child.as_ref(),
            other => panic!("expected optional, got {other:?}"),
        };
        match list {
            FieldSchema::List { element, levels, .. } => {
                assert_eq!(*levels, LevelInfo { def_level: 1, rep_level: 0 });
                // the repeated primitive is the element itself, with no extra wrapper
                match element.as_ref() {
                    FieldSchema::Primitive { levels, .. } => {
                        assert_eq!(*levels, LevelInfo { def_level: 2, rep_level: 1 });
                    }
                    other => panic!("expected primitive element, got {other:?}"),
                }
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_map_shape() {
        let key = SchemaType::primitive_type_builder("key", PhysicalType::BYTE_ARRAY)
            .with_repetition(Repetition::REQUIRED)
            .with_logical_type(Some(LogicalType::String))
            .build()
            .unwrap();
        let value = SchemaType::primitive_type_builder("value", PhysicalType::INT32)
            .with_repetition(Repetition::OPTIONAL)
            .build()
            .unwrap();
        let key_value = SchemaType::group_type_builder("key_value")
            .with_repetition(Repetition::REPEATED)
            .with_fields(vec![Arc::new(key), Arc::new(value)])
            .build()
            .unwrap();
        let map = SchemaType::group_type_builder("my_map")
            .with_repetition(Repetition::OPTIONAL)
            .with_converted_type(ConvertedType::MAP)
            .with_logical_type(Some(LogicalType::Map))
            .with_fields(vec![Arc::new(key_value)])
            .build()
            .unwrap();
        let descr = descr_of(vec![map]);
        let schema = LogicalSchema::try_new(&descr).unwrap();

        let map = match &schema.fields[0] {
            FieldSchema::Optional { child, .. } => child.as_ref(),
            other => panic!("expected optional, got {other:?}"),
        };
        match map {
            FieldSchema::Map {
                key, value, levels, ..
            } => {
                assert_eq!(*levels, LevelInfo { def_level: 1, rep_level: 0 });
                // required key sits directly at the repeated group's levels
                match key.as_ref() {
                    FieldSchema::Primitive { levels, .. } => {
                        assert_eq!(*levels, LevelInfo { def_level: 2, rep_level: 1 });
                    }
                    other => panic!("expected primitive key, got {other:?}"),
                }
                match value.as_ref() {
                    FieldSchema::Optional { levels, .. } => {
                        assert_eq!(*levels, LevelInfo { def_level: 2, rep_level: 1 });
                    }
                    other => panic!("expected optional value, got {other:?}"),
                }
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_unannotated_repeated_group_is_list_of_struct() {
        let number = SchemaType::primitive_type_builder("number", PhysicalType::INT64)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        let phone = SchemaType::group_type_builder("phone")
            .with_repetition(Repetition::REPEATED)
            .with_fields(vec![Arc::new(number)])
            .build()
            .unwrap();
        let descr = descr_of(vec![phone]);
        let schema = LogicalSchema::try_new(&descr).unwrap();

        match &schema.fields[0] {
            FieldSchema::List { element, levels, .. } => {
                assert_eq!(*levels, LevelInfo { def_level: 0, rep_level: 0 });
                assert!(matches!(element.as_ref(), FieldSchema::Struct { .. }));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_map_rejected() {
        let lone = SchemaType::primitive_type_builder("key", PhysicalType::BYTE_ARRAY)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        let key_value = SchemaType::group_type_builder("key_value")
            .with_repetition(Repetition::REPEATED)
            .with_fields(vec![Arc::new(lone)])
            .build()
            .unwrap();
        let map = SchemaType::group_type_builder("m")
            .with_repetition(Repetition::OPTIONAL)
            .with_converted_type(ConvertedType::MAP)
            .with_fields(vec![Arc::new(key_value)])
            .build()
            .unwrap();
        let descr = descr_of(vec![map]);
        let err = LogicalSchema::try_new(&descr).unwrap_err();
        assert!(err.to_string().contains("(key, value)"));
    }
}
