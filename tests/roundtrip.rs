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

//! End to end write/read tests: column chunks, whole files, nested records.

use std::sync::Arc;

use bytes::Bytes;

use parquet_aio::basic::{Compression, ConvertedType, Encoding, LogicalType, Repetition, Type};
use parquet_aio::column::writer::ColumnWriterImpl;
use parquet_aio::data_type::{
    ByteArray, ByteArrayType, DoubleType, FixedLenByteArray, FixedLenByteArrayType, Int32Type,
    Int64Type,
};
use parquet_aio::errors::{ParquetError, Result};
use parquet_aio::file::properties::WriterProperties;
use parquet_aio::file::serialized_reader::{SerializedFileReader, SerializedPageReader};
use parquet_aio::file::writer::{SerializedFileWriter, SerializedPageWriter, TrackedWrite};
use parquet_aio::record::{Field, RecordConsumer, RecordReader};
use parquet_aio::schema::types::{ColumnDescriptor, ColumnPath, Type as SchemaType, TypePtr};

fn flba_descr() -> Arc<ColumnDescriptor> {
    let tpe = SchemaType::primitive_type_builder("b", Type::FIXED_LEN_BYTE_ARRAY)
        .with_repetition(Repetition::REPEATED)
        .with_length(1)
        .build()
        .unwrap();
    Arc::new(ColumnDescriptor::new(
        Arc::new(tpe),
        1,
        1,
        ColumnPath::new(vec!["b".to_owned()]),
    ))
}

/// Writer-to-reader column chunk round trip: dictionary encoded, snappy
/// compressed, two pages, with null slots interleaved.
#[tokio::test]
async fn test_column_chunk_roundtrip() {
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build(),
    );
    let mut writer = ColumnWriterImpl::<FixedLenByteArrayType>::new(flba_descr(), props).unwrap();

    let page1: Vec<FixedLenByteArray> = vec![
        FixedLenByteArray::from(b"a".to_vec()),
        FixedLenByteArray::from(b"c".to_vec()),
    ];
    writer
        .write_batch(&page1, Some(&[1, 0, 1]), Some(&[1, 1, 1]))
        .unwrap();
    writer.flush_page().unwrap();
    let page2: Vec<FixedLenByteArray> = vec![
        FixedLenByteArray::from(b"a".to_vec()),
        FixedLenByteArray::from(b"e".to_vec()),
    ];
    writer
        .write_batch(&page2, Some(&[1, 0, 1]), Some(&[1, 1, 1]))
        .unwrap();

    let mut buffer = Vec::new();
    let metadata = {
        let mut tracked = TrackedWrite::new(&mut buffer);
        let mut page_writer = SerializedPageWriter::new(&mut tracked);
        writer.flush_chunk(&mut page_writer).unwrap().metadata
    };
    assert_eq!(metadata.num_values(), 6);
    assert!(metadata.dictionary_page_offset().is_some());
    assert!(metadata.encodings().contains(&Encoding::RLE_DICTIONARY));

    // Read the chunk back
    let page_reader = SerializedPageReader::new(
        std::io::Cursor::new(Bytes::from(buffer)),
        Compression::SNAPPY,
    )
    .unwrap();
    let mut reader = parquet_aio::column::reader::get_typed_column_reader::<FixedLenByteArrayType>(
        parquet_aio::column::reader::get_column_reader(flba_descr(), Box::new(page_reader)),
    );

    let mut def_levels = vec![0i16; 10];
    let mut rep_levels = vec![0i16; 10];
    let mut values = vec![FixedLenByteArray::default(); 10];
    let mut total_levels = 0;
    let mut total_values = 0;
    loop {
        let (values_read, levels_read) = reader
            .read_batch(
                4,
                Some(&mut def_levels[total_levels..]),
                Some(&mut rep_levels[total_levels..]),
                &mut values[total_values..],
            )
            .await
            .unwrap();
        if values_read == 0 && levels_read == 0 {
            break;
        }
        total_levels += levels_read;
        total_values += values_read;
    }

    assert_eq!(total_levels, 6);
    assert_eq!(total_values, 4);
    assert_eq!(&def_levels[..6], &[1, 0, 1, 1, 0, 1]);
    assert_eq!(&rep_levels[..6], &[1, 1, 1, 1, 1, 1]);
    let expected: Vec<FixedLenByteArray> = vec![
        FixedLenByteArray::from(b"a".to_vec()),
        FixedLenByteArray::from(b"c".to_vec()),
        FixedLenByteArray::from(b"a".to_vec()),
        FixedLenByteArray::from(b"e".to_vec()),
    ];
    assert_eq!(&values[..4], &expected[..]);
}

fn flat_schema() -> TypePtr {
    let id = SchemaType::primitive_type_builder("id", Type::INT64)
        .with_repetition(Repetition::REQUIRED)
        .build()
        .unwrap();
    let name = SchemaType::primitive_type_builder("name", Type::BYTE_ARRAY)
        .with_repetition(Repetition::OPTIONAL)
        .with_logical_type(Some(LogicalType::String))
        .build()
        .unwrap();
    let score = SchemaType::primitive_type_builder("score", Type::DOUBLE)
        .with_repetition(Repetition::REQUIRED)
        .build()
        .unwrap();
    Arc::new(
        SchemaType::group_type_builder("schema")
            .with_fields(vec![Arc::new(id), Arc::new(name), Arc::new(score)])
            .build()
            .unwrap(),
    )
}

/// Whole file round trip across two row groups with mixed compression.
#[tokio::test]
async fn test_file_roundtrip_two_row_groups() {
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .set_column_compression(ColumnPath::from("score"), Compression::GZIP)
            .build(),
    );

    let mut sink = Vec::new();
    let mut writer = SerializedFileWriter::new(&mut sink, flat_schema(), props)
        .await
        .unwrap();

    // Row group 1: 3 rows
    writer
        .typed_column::<Int64Type>(0)
        .write_batch(&[1, 2, 3], None, None)
        .unwrap();
    writer
        .typed_column::<ByteArrayType>(1)
        .write_batch(
            &[ByteArray::from("alice"), ByteArray::from("bob")],
            Some(&[1, 0, 1]),
            None,
        )
        .unwrap();
    writer
        .typed_column::<DoubleType>(2)
        .write_batch(&[0.5, 1.5, 2.5], None, None)
        .unwrap();
    writer.flush_row_group().await.unwrap();

    // Row group 2: 1 row
    writer
        .typed_column::<Int64Type>(0)
        .write_batch(&[4], None, None)
        .unwrap();
    writer
        .typed_column::<ByteArrayType>(1)
        .write_batch(&[ByteArray::from("carol")], Some(&[1]), None)
        .unwrap();
    writer
        .typed_column::<DoubleType>(2)
        .write_batch(&[3.5], None, None)
        .unwrap();
    writer.close().await.unwrap();

    let reader = SerializedFileReader::new(Bytes::from(sink)).await.unwrap();
    let metadata = reader.metadata();
    assert_eq!(metadata.num_row_groups(), 2);
    assert_eq!(metadata.file_metadata().version(), 1);
    assert_eq!(metadata.file_metadata().num_rows(), 4);
    // sum over row groups equals the file row count
    let total: i64 = metadata.row_groups().iter().map(|rg| rg.num_rows()).sum();
    assert_eq!(total, metadata.file_metadata().num_rows());
    // the row group byte size covers all of its columns
    for rg in metadata.row_groups() {
        let columns_total: i64 = rg.columns().iter().map(|c| c.compressed_size()).sum();
        assert!(rg.total_byte_size() > columns_total);
    }

    // Read row group 1, column 0
    let mut id_reader = reader.get_typed_column_reader::<Int64Type>(0, 0).await.unwrap();
    let mut values = vec![0i64; 10];
    let (values_read, levels_read) = id_reader
        .read_batch(10, None, None, &mut values)
        .await
        .unwrap();
    assert_eq!((values_read, levels_read), (3, 3));
    assert_eq!(&values[..3], &[1, 2, 3]);

    // Read row group 2, column 1 (nullable string)
    let mut name_reader = reader
        .get_typed_column_reader::<ByteArrayType>(1, 1)
        .await
        .unwrap();
    let mut def_levels = vec![0i16; 10];
    let mut names = vec![ByteArray::default(); 10];
    let (values_read, levels_read) = name_reader
        .read_batch(10, Some(&mut def_levels), None, &mut names)
        .await
        .unwrap();
    assert_eq!((values_read, levels_read), (1, 1));
    assert_eq!(names[0], ByteArray::from("carol"));
}

/// Delta binary packed file round trip, dictionary disabled.
#[tokio::test]
async fn test_file_roundtrip_delta_encoding() {
    let field = SchemaType::primitive_type_builder("v", Type::INT32)
        .with_repetition(Repetition::REQUIRED)
        .build()
        .unwrap();
    let schema = Arc::new(
        SchemaType::group_type_builder("schema")
            .with_fields(vec![Arc::new(field)])
            .build()
            .unwrap(),
    );
    let props = Arc::new(
        WriterProperties::builder()
            .set_dictionary_enabled(false)
            .set_encoding(Encoding::DELTA_BINARY_PACKED)
            .build(),
    );

    let values: Vec<i32> = (0..777).map(|i| i * 3 - 1000).collect();
    let mut sink = Vec::new();
    let mut writer = SerializedFileWriter::new(&mut sink, schema, props)
        .await
        .unwrap();
    writer
        .typed_column::<Int32Type>(0)
        .write_batch(&values, None, None)
        .unwrap();
    writer.close().await.unwrap();

    let reader = SerializedFileReader::new(Bytes::from(sink)).await.unwrap();
    let chunk = reader.metadata().row_group(0).column(0);
    assert!(chunk.encodings().contains(&Encoding::DELTA_BINARY_PACKED));
    assert!(chunk.dictionary_page_offset().is_none());

    let mut column = reader.get_typed_column_reader::<Int32Type>(0, 0).await.unwrap();
    let mut out = vec![0i32; 1000];
    let mut read = 0;
    loop {
        let (values_read, _) = column
            .read_batch(100, None, None, &mut out[read..])
            .await
            .unwrap();
        if values_read == 0 {
            break;
        }
        read += values_read;
    }
    assert_eq!(read, values.len());
    assert_eq!(&out[..read], &values[..]);
}

/// A consumer that renders the event stream as text, making the assembly
/// order easy to assert on.
#[derive(Default)]
struct TextConsumer {
    out: String,
    records: Vec<String>,
    first_column: bool,
}

impl RecordConsumer for TextConsumer {
    fn start_record(&mut self) {
        self.out.clear();
        self.out.push('{');
        self.first_column = true;
    }
    fn end_record(&mut self) {
        self.out.push('}');
        self.records.push(std::mem::take(&mut self.out));
    }
    fn start_column(&mut self, name: &str) {
        if !self.first_column {
            self.out.push_str(", ");
        }
        self.first_column = false;
        self.out.push_str(name);
        self.out.push_str(": ");
    }
    fn start_struct(&mut self) {
        self.out.push('(');
    }
    fn end_struct(&mut self) {
        self.out.push(')');
    }
    fn start_field(&mut self, name: &str) {
        self.out.push_str(name);
        self.out.push('=');
    }
    fn start_list(&mut self) {
        self.out.push('[');
    }
    fn end_list(&mut self) {
        self.out.push(']');
    }
    fn separate_list_values(&mut self) {
        self.out.push_str(", ");
    }
    fn start_map(&mut self) {
        self.out.push('<');
    }
    fn end_map(&mut self) {
        self.out.push('>');
    }
    fn separate_map_values(&mut self) {
        self.out.push_str(", ");
    }
    fn separate_key_value(&mut self) {
        self.out.push_str(" -> ");
    }
    fn append_null(&mut self) {
        self.out.push_str("null");
    }
    fn append_value(&mut self, value: Field) {
        self.out.push_str(&value.to_string());
    }
}

fn nested_schema() -> TypePtr {
    // my_map: optional map<string, int32>
    let key = SchemaType::primitive_type_builder("key", Type::BYTE_ARRAY)
        .with_repetition(Repetition::REQUIRED)
        .with_logical_type(Some(LogicalType::String))
        .build()
        .unwrap();
    let value = SchemaType::primitive_type_builder("value", Type::INT32)
        .with_repetition(Repetition::OPTIONAL)
        .build()
        .unwrap();
    let key_value = SchemaType::group_type_builder("key_value")
        .with_repetition(Repetition::REPEATED)
        .with_fields(vec![Arc::new(key), Arc::new(value)])
        .build()
        .unwrap();
    let my_map = SchemaType::group_type_builder("my_map")
        .with_repetition(Repetition::OPTIONAL)
        .with_converted_type(ConvertedType::MAP)
        .with_logical_type(Some(LogicalType::Map))
        .with_fields(vec![Arc::new(key_value)])
        .build()
        .unwrap();

    // my_list: optional list<optional struct { f1: float, f2: double }>
    let f1 = SchemaType::primitive_type_builder("f1", Type::FLOAT)
        .with_repetition(Repetition::OPTIONAL)
        .build()
        .unwrap();
    let f2 = SchemaType::primitive_type_builder("f2", Type::DOUBLE)
        .with_repetition(Repetition::OPTIONAL)
        .build()
        .unwrap();
    let element = SchemaType::group_type_builder("element")
        .with_repetition(Repetition::OPTIONAL)
        .with_fields(vec![Arc::new(f1), Arc::new(f2)])
        .build()
        .unwrap();
    let list = SchemaType::group_type_builder("list")
        .with_repetition(Repetition::REPEATED)
        .with_fields(vec![Arc::new(element)])
        .build()
        .unwrap();
    let my_list = SchemaType::group_type_builder("my_list")
        .with_repetition(Repetition::OPTIONAL)
        .with_converted_type(ConvertedType::LIST)
        .with_logical_type(Some(LogicalType::List))
        .with_fields(vec![Arc::new(list)])
        .build()
        .unwrap();

    Arc::new(
        SchemaType::group_type_builder("schema")
            .with_fields(vec![Arc::new(my_map), Arc::new(my_list)])
            .build()
            .unwrap(),
    )
}

/// File round trip with a nested map and list, assembled back into records.
///
/// Row group 1 holds one record with both fields null; row group 2 holds one
/// record with map `{key1: 1, key2: 1}` and list `[null, (f1, f2)]`.
#[tokio::test]
async fn test_nested_record_assembly() {
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build(),
    );
    let mut sink = Vec::new();
    let mut writer = SerializedFileWriter::new(&mut sink, nested_schema(), props)
        .await
        .unwrap();

    // Leaves in preorder: my_map.key_value.key (0), my_map.key_value.value (1),
    // my_list.list.element.f1 (2), my_list.list.element.f2 (3)

    // Row group 1: both fields null
    writer
        .typed_column::<ByteArrayType>(0)
        .write_batch(&[], Some(&[0]), Some(&[0]))
        .unwrap();
    writer
        .typed_column::<Int32Type>(1)
        .write_batch(&[], Some(&[0]), Some(&[0]))
        .unwrap();
    writer
        .typed_column::<parquet_aio::data_type::FloatType>(2)
        .write_batch(&[], Some(&[0]), Some(&[0]))
        .unwrap();
    writer
        .typed_column::<DoubleType>(3)
        .write_batch(&[], Some(&[0]), Some(&[0]))
        .unwrap();
    writer.flush_row_group().await.unwrap();

    // Row group 2: map {"key1": 1, "key2": 1}, list [null, {f1: 1337.0, f2: 1337.0}]
    writer
        .typed_column::<ByteArrayType>(0)
        .write_batch(
            &[ByteArray::from("key1"), ByteArray::from("key2")],
            Some(&[2, 2]),
            Some(&[0, 1]),
        )
        .unwrap();
    writer
        .typed_column::<Int32Type>(1)
        .write_batch(&[1, 1], Some(&[3, 3]), Some(&[0, 1]))
        .unwrap();
    writer
        .typed_column::<parquet_aio::data_type::FloatType>(2)
        .write_batch(&[1337.0], Some(&[2, 4]), Some(&[0, 1]))
        .unwrap();
    writer
        .typed_column::<DoubleType>(3)
        .write_batch(&[1337.0], Some(&[2, 4]), Some(&[0, 1]))
        .unwrap();
    writer.flush_row_group().await.unwrap();
    writer.close().await.unwrap();

    let reader = SerializedFileReader::new(Bytes::from(sink)).await.unwrap();
    assert_eq!(reader.num_row_groups(), 2);

    let mut consumer = TextConsumer::default();
    for row_group in 0..reader.num_row_groups() {
        let mut records = RecordReader::new(&reader, row_group).await.unwrap();
        records.read_all(&mut consumer).await.unwrap();
    }

    assert_eq!(
        consumer.records,
        vec![
            "{my_map: null, my_list: null}".to_owned(),
            "{my_map: <\"key1\" -> 1, \"key2\" -> 1>, \
             my_list: [null, (f1=1.337e3, f2=1.337e3)]}"
                .to_owned(),
        ]
    );
}

/// Empty and single-entry collections assemble correctly.
#[tokio::test]
async fn test_record_assembly_empty_collections() {
    let props = Arc::new(WriterProperties::builder().build());
    let mut sink = Vec::new();
    let mut writer = SerializedFileWriter::new(&mut sink, nested_schema(), props)
        .await
        .unwrap();

    // One record: map present but empty (def 1), list with a single present
    // element whose fields are null (def 3)
    writer
        .typed_column::<ByteArrayType>(0)
        .write_batch(&[], Some(&[1]), Some(&[0]))
        .unwrap();
    writer
        .typed_column::<Int32Type>(1)
        .write_batch(&[], Some(&[1]), Some(&[0]))
        .unwrap();
    writer
        .typed_column::<parquet_aio::data_type::FloatType>(2)
        .write_batch(&[], Some(&[3]), Some(&[0]))
        .unwrap();
    writer
        .typed_column::<DoubleType>(3)
        .write_batch(&[], Some(&[3]), Some(&[0]))
        .unwrap();
    writer.close().await.unwrap();

    let reader = SerializedFileReader::new(Bytes::from(sink)).await.unwrap();
    let mut consumer = TextConsumer::default();
    let mut records = RecordReader::new(&reader, 0).await.unwrap();
    records.read_all(&mut consumer).await.unwrap();

    assert_eq!(
        consumer.records,
        vec!["{my_map: <>, my_list: [(f1=null, f2=null)]}".to_owned()]
    );
}

/// Truncated and mislabeled files surface the footer errors.
#[tokio::test]
async fn test_footer_error_cases() {
    let too_small = SerializedFileReader::new(Bytes::from_static(b"PAR"))
        .await
        .unwrap_err();
    assert!(too_small.to_string().contains("too small"));

    let bad_magic = SerializedFileReader::new(Bytes::from_static(b"PAR1....XXXX"))
        .await
        .unwrap_err();
    assert!(bad_magic.to_string().contains("Magic bytes not found"));

    let encrypted = SerializedFileReader::new(Bytes::from_static(b"PAR1\x00\x00\x00\x00PARE"))
        .await
        .unwrap_err();
    assert!(matches!(encrypted, ParquetError::Unsupported(_)));
}

/// Files written by this crate carry the trailing `PAR1` magic and a footer
/// length covering the metadata exactly.
#[tokio::test]
async fn test_file_layout() -> Result<()> {
    let field = SchemaType::primitive_type_builder("v", Type::INT32)
        .with_repetition(Repetition::REQUIRED)
        .build()?;
    let schema = Arc::new(
        SchemaType::group_type_builder("schema")
            .with_fields(vec![Arc::new(field)])
            .build()?,
    );
    let mut sink = Vec::new();
    let mut writer = SerializedFileWriter::new(
        &mut sink,
        schema,
        Arc::new(WriterProperties::builder().build()),
    )
    .await?;
    writer
        .typed_column::<Int32Type>(0)
        .write_batch(&[7], None, None)?;
    writer.close().await?;

    assert_eq!(&sink[..4], b"PAR1");
    assert_eq!(&sink[sink.len() - 4..], b"PAR1");
    let footer_len =
        u32::from_le_bytes(sink[sink.len() - 8..sink.len() - 4].try_into().unwrap()) as usize;
    assert!(footer_len < sink.len() - 8);
    Ok(())
}
