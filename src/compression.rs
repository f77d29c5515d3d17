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

//! Contains codec interface and supported codec implementations.
//!
//! See [`Compression`](crate::basic::Compression) enum for all available compression
//! algorithms.

use crate::basic::Compression as CodecType;
use crate::errors::{ParquetError, Result};

/// Parquet compression codec interface.
pub trait Codec: Send {
    /// Compresses data stored in slice `input_buf` and appends the compressed result
    /// to `output_buf`.
    ///
    /// Note that you'll need to call `clear()` before reusing the same `output_buf`
    /// across different `compress` calls.
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()>;

    /// Decompresses data stored in slice `input_buf` and appends output to `output_buf`,
    /// whose declared uncompressed size is `uncompress_size`.
    ///
    /// The declared size is a capacity contract: a stream that inflates beyond it
    /// fails with a corrupted-file error. Returns the total number of bytes written.
    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        uncompress_size: usize,
    ) -> Result<usize>;

    /// Returns the codec identifier.
    fn codec_type(&self) -> CodecType;
}

/// Given the compression type `codec`, returns a codec used to compress and decompress
/// bytes for the compression type.
///
/// This returns `None` if the codec type is `UNCOMPRESSED`.
pub fn create_codec(codec: CodecType) -> Result<Option<Box<dyn Codec>>> {
    match codec {
        #[cfg(feature = "snap")]
        CodecType::SNAPPY => Ok(Some(Box::new(SnappyCodec::new()))),
        #[cfg(feature = "flate2")]
        CodecType::GZIP => Ok(Some(Box::new(GZipCodec::new()))),
        #[cfg(feature = "brotli")]
        CodecType::BROTLI => Ok(Some(Box::new(BrotliCodec::new()))),
        #[cfg(feature = "lz4")]
        CodecType::LZ4 => Ok(Some(Box::new(LZ4Codec::new()))),
        #[cfg(feature = "zstd")]
        CodecType::ZSTD => Ok(Some(Box::new(ZSTDCodec::new()))),
        CodecType::UNCOMPRESSED => Ok(None),
        _ => Err(unsupported_err!(
            "The codec type {} is not supported (is the corresponding feature enabled?)",
            codec
        )),
    }
}

#[cfg(feature = "snap")]
mod snappy_codec {
    use snap::raw::{decompress_len, max_compress_len, Decoder, Encoder};

    use crate::compression::Codec;
    use crate::errors::{ParquetError, Result};

    /// Codec for Snappy compression format.
    pub struct SnappyCodec {
        decoder: Decoder,
        encoder: Encoder,
    }

    impl SnappyCodec {
        /// Creates new Snappy compression codec.
        pub(crate) fn new() -> Self {
            Self {
                decoder: Decoder::new(),
                encoder: Encoder::new(),
            }
        }
    }

    impl Codec for SnappyCodec {
        fn decompress(
            &mut self,
            input_buf: &[u8],
            output_buf: &mut Vec<u8>,
            uncompress_size: usize,
        ) -> Result<usize> {
            let len = decompress_len(input_buf)?;
            if len > uncompress_size {
                return Err(corrupted_err!(
                    "Snappy stream inflates to {} bytes, only {} expected",
                    len,
                    uncompress_size
                ));
            }
            let offset = output_buf.len();
            output_buf.resize(offset + len, 0);
            self.decoder
                .decompress(input_buf, &mut output_buf[offset..])
                .map_err(|e| e.into())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let output_buf_len = output_buf.len();
            let required_len = max_compress_len(input_buf.len());
            output_buf.resize(output_buf_len + required_len, 0);
            let n = self
                .encoder
                .compress(input_buf, &mut output_buf[output_buf_len..])?;
            output_buf.truncate(output_buf_len + n);
            Ok(())
        }

        fn codec_type(&self) -> crate::basic::Compression {
            crate::basic::Compression::SNAPPY
        }
    }
}
#[cfg(feature = "snap")]
pub use snappy_codec::*;

#[cfg(feature = "flate2")]
mod gzip_codec {
    use std::io::{Read, Write};

    use flate2::{read, write, Compression};

    use crate::compression::Codec;
    use crate::errors::{ParquetError, Result};

    /// Codec for GZIP compression algorithm.
    pub struct GZipCodec {}

    impl GZipCodec {
        /// Creates new GZIP compression codec.
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    // Magic bytes identifying a gzip wrapper; anything else is assumed to be a
    // bare zlib stream
    const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

    impl Codec for GZipCodec {
        fn decompress(
            &mut self,
            input_buf: &[u8],
            output_buf: &mut Vec<u8>,
            uncompress_size: usize,
        ) -> Result<usize> {
            // The capacity contract can't rely on the codec library alone: both
            // decoders happily grow a `Vec`. Read through `take` and treat any
            // leftover input as an oversized stream.
            let offset = output_buf.len();
            let written = if input_buf.len() >= 2 && input_buf[..2] == GZIP_MAGIC {
                let mut decoder = read::MultiGzDecoder::new(input_buf);
                let written = decoder
                    .by_ref()
                    .take(uncompress_size as u64)
                    .read_to_end(output_buf)?;
                let mut probe = [0u8; 1];
                if decoder.read(&mut probe)? != 0 {
                    return Err(corrupted_err!(
                        "Gzip stream inflates beyond the {} expected bytes",
                        uncompress_size
                    ));
                }
                written
            } else {
                let mut decoder = read::ZlibDecoder::new(input_buf);
                let written = decoder
                    .by_ref()
                    .take(uncompress_size as u64)
                    .read_to_end(output_buf)?;
                let mut probe = [0u8; 1];
                if decoder.read(&mut probe)? != 0 {
                    return Err(corrupted_err!(
                        "Zlib stream inflates beyond the {} expected bytes",
                        uncompress_size
                    ));
                }
                written
            };
            debug_assert_eq!(written, output_buf.len() - offset);
            Ok(written)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = write::GzEncoder::new(output_buf, Compression::default());
            encoder.write_all(input_buf)?;
            encoder.try_finish().map_err(|e| e.into())
        }

        fn codec_type(&self) -> crate::basic::Compression {
            crate::basic::Compression::GZIP
        }
    }
}
#[cfg(feature = "flate2")]
pub use gzip_codec::*;

#[cfg(feature = "brotli")]
mod brotli_codec {
    use std::io::{Read, Write};

    use crate::compression::Codec;
    use crate::errors::{ParquetError, Result};

    const BROTLI_DEFAULT_BUFFER_SIZE: usize = 4096;
    const BROTLI_DEFAULT_COMPRESSION_QUALITY: u32 = 1; // supported levels 0-9
    const BROTLI_DEFAULT_LG_WINDOW_SIZE: u32 = 22; // recommended between 20-22

    /// Codec for Brotli compression algorithm.
    pub struct BrotliCodec {}

    impl BrotliCodec {
        /// Creates new Brotli compression codec.
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for BrotliCodec {
        fn decompress(
            &mut self,
            input_buf: &[u8],
            output_buf: &mut Vec<u8>,
            uncompress_size: usize,
        ) -> Result<usize> {
            let mut decoder =
                brotli::Decompressor::new(input_buf, BROTLI_DEFAULT_BUFFER_SIZE);
            let written = decoder
                .by_ref()
                .take(uncompress_size as u64)
                .read_to_end(output_buf)?;
            let mut probe = [0u8; 1];
            if decoder.read(&mut probe)? != 0 {
                return Err(corrupted_err!(
                    "Brotli stream inflates beyond the {} expected bytes",
                    uncompress_size
                ));
            }
            Ok(written)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = brotli::CompressorWriter::new(
                output_buf,
                BROTLI_DEFAULT_BUFFER_SIZE,
                BROTLI_DEFAULT_COMPRESSION_QUALITY,
                BROTLI_DEFAULT_LG_WINDOW_SIZE,
            );
            encoder.write_all(input_buf)?;
            encoder.flush().map_err(|e| e.into())
        }

        fn codec_type(&self) -> crate::basic::Compression {
            crate::basic::Compression::BROTLI
        }
    }
}
#[cfg(feature = "brotli")]
pub use brotli_codec::*;

#[cfg(feature = "lz4")]
mod lz4_codec {
    use std::io::{Read, Write};

    use crate::compression::Codec;
    use crate::errors::{ParquetError, Result};

    const LZ4_BUFFER_SIZE: usize = 4096;

    /// Codec for LZ4 compression algorithm.
    pub struct LZ4Codec {}

    impl LZ4Codec {
        /// Creates new LZ4 compression codec.
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for LZ4Codec {
        fn decompress(
            &mut self,
            input_buf: &[u8],
            output_buf: &mut Vec<u8>,
            uncompress_size: usize,
        ) -> Result<usize> {
            let mut decoder = lz4_flex::frame::FrameDecoder::new(input_buf);
            let offset = output_buf.len();
            let written = decoder
                .by_ref()
                .take(uncompress_size as u64)
                .read_to_end(output_buf)?;
            let mut probe = [0u8; 1];
            if decoder.read(&mut probe)? != 0 {
                return Err(corrupted_err!(
                    "LZ4 stream inflates beyond the {} expected bytes",
                    uncompress_size
                ));
            }
            debug_assert_eq!(written, output_buf.len() - offset);
            Ok(written)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let buffer = std::mem::take(output_buf);
            let mut encoder = lz4_flex::frame::FrameEncoder::new(buffer);
            let mut from = 0;
            loop {
                let to = std::cmp::min(from + LZ4_BUFFER_SIZE, input_buf.len());
                encoder.write_all(&input_buf[from..to])?;
                from += to - from;
                if from >= input_buf.len() {
                    break;
                }
            }
            *output_buf = encoder
                .finish()
                .map_err(|e| ParquetError::External(Box::new(e)))?;
            Ok(())
        }

        fn codec_type(&self) -> crate::basic::Compression {
            crate::basic::Compression::LZ4
        }
    }
}
#[cfg(feature = "lz4")]
pub use lz4_codec::*;

#[cfg(feature = "zstd")]
mod zstd_codec {
    use std::io::{Read, Write};

    use crate::compression::Codec;
    use crate::errors::{ParquetError, Result};

    /// Codec for Zstandard compression algorithm.
    pub struct ZSTDCodec {}

    impl ZSTDCodec {
        /// Creates new Zstandard compression codec.
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    /// Compression level (1-21) for ZSTD. Choose 1 here for better compression speed.
    const ZSTD_COMPRESSION_LEVEL: i32 = 1;

    impl Codec for ZSTDCodec {
        fn decompress(
            &mut self,
            input_buf: &[u8],
            output_buf: &mut Vec<u8>,
            uncompress_size: usize,
        ) -> Result<usize> {
            let mut decoder = zstd::Decoder::new(input_buf)?;
            let written = decoder
                .by_ref()
                .take(uncompress_size as u64)
                .read_to_end(output_buf)?;
            let mut probe = [0u8; 1];
            if decoder.read(&mut probe)? != 0 {
                return Err(corrupted_err!(
                    "Zstd stream inflates beyond the {} expected bytes",
                    uncompress_size
                ));
            }
            Ok(written)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let buffer = std::mem::take(output_buf);
            let mut encoder = zstd::Encoder::new(buffer, ZSTD_COMPRESSION_LEVEL)?;
            encoder.write_all(input_buf)?;
            *output_buf = encoder.finish()?;
            Ok(())
        }

        fn codec_type(&self) -> crate::basic::Compression {
            crate::basic::Compression::ZSTD
        }
    }
}
#[cfg(feature = "zstd")]
pub use zstd_codec::*;

/// Codec for the no-op UNCOMPRESSED "compression".
///
/// `create_codec` returns `None` for UNCOMPRESSED so hot paths can skip the
/// copy, but the capacity contract still holds where a codec is wanted
/// uniformly (e.g. tests and the record of testable properties).
pub struct UncompressedCodec {}

impl UncompressedCodec {
    /// Creates a new pass-through codec.
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for UncompressedCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for UncompressedCodec {
    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        uncompress_size: usize,
    ) -> Result<usize> {
        if input_buf.len() > uncompress_size {
            return Err(corrupted_err!(
                "Uncompressed page is {} bytes, only {} expected",
                input_buf.len(),
                uncompress_size
            ));
        }
        output_buf.extend_from_slice(input_buf);
        Ok(input_buf.len())
    }

    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
        output_buf.extend_from_slice(input_buf);
        Ok(())
    }

    fn codec_type(&self) -> CodecType {
        CodecType::UNCOMPRESSED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, RngCore};

    fn test_codec_roundtrip(mut codec: Box<dyn Codec>) {
        let sizes = vec![0, 1, 100, 10000];
        for size in sizes {
            let mut data = vec![0u8; size];
            thread_rng().fill_bytes(&mut data);

            let mut compressed = Vec::new();
            codec.compress(&data, &mut compressed).unwrap();

            // decompress(compress(b), |b| + 1) == b
            let mut decompressed = Vec::new();
            let written = codec
                .decompress(&compressed, &mut decompressed, data.len() + 1)
                .unwrap();
            assert_eq!(written, data.len());
            assert_eq!(decompressed, data);
        }
    }

    fn test_codec_undersized_output(mut codec: Box<dyn Codec>) {
        let data = vec![0u8; 42];
        let mut compressed = Vec::new();
        codec.compress(&data, &mut compressed).unwrap();

        let mut decompressed = Vec::new();
        let result = codec.decompress(&compressed, &mut decompressed, data.len() - 1);
        assert!(
            matches!(result, Err(ParquetError::Corrupted(_))),
            "expected a corrupted-file error, got {result:?}"
        );
    }

    #[test]
    fn test_codec_uncompressed() {
        test_codec_roundtrip(Box::new(UncompressedCodec::new()));
        test_codec_undersized_output(Box::new(UncompressedCodec::new()));
    }

    #[test]
    #[cfg(feature = "snap")]
    fn test_codec_snappy() {
        let codec = create_codec(CodecType::SNAPPY).unwrap().unwrap();
        test_codec_roundtrip(codec);
        let codec = create_codec(CodecType::SNAPPY).unwrap().unwrap();
        test_codec_undersized_output(codec);
    }

    #[test]
    #[cfg(feature = "flate2")]
    fn test_codec_gzip() {
        let codec = create_codec(CodecType::GZIP).unwrap().unwrap();
        test_codec_roundtrip(codec);
        let codec = create_codec(CodecType::GZIP).unwrap().unwrap();
        test_codec_undersized_output(codec);
    }

    #[test]
    #[cfg(feature = "flate2")]
    fn test_gzip_accepts_bare_zlib_stream() {
        use std::io::Write;
        let data = b"zlib wrapped payload, repeated payload payload payload";
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut codec = GZipCodec::new();
        let mut decompressed = Vec::new();
        let written = codec
            .decompress(&compressed, &mut decompressed, data.len())
            .unwrap();
        assert_eq!(written, data.len());
        assert_eq!(decompressed, data);
    }

    #[test]
    #[cfg(feature = "brotli")]
    fn test_codec_brotli() {
        let codec = create_codec(CodecType::BROTLI).unwrap().unwrap();
        test_codec_roundtrip(codec);
    }

    #[test]
    #[cfg(feature = "lz4")]
    fn test_codec_lz4() {
        let codec = create_codec(CodecType::LZ4).unwrap().unwrap();
        test_codec_roundtrip(codec);
    }

    #[test]
    #[cfg(feature = "zstd")]
    fn test_codec_zstd() {
        let codec = create_codec(CodecType::ZSTD).unwrap().unwrap();
        test_codec_roundtrip(codec);
    }

    #[test]
    fn test_uncompressed_returns_no_codec() {
        assert!(create_codec(CodecType::UNCOMPRESSED).unwrap().is_none());
    }
}
