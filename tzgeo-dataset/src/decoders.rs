//! Compression codecs for boundary datasets.

use std::io::{self, Read, Write as _};

use flate2::Compression;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

/// Reads `reader` to the end, reserving four times the compressed size.
fn drain(mut reader: impl Read, size_hint: usize) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(size_hint.saturating_mul(4));
    reader.read_to_end(&mut out)?;
    Ok(out)
}

pub fn decode_gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    drain(GzDecoder::new(data), data.len())
}

pub fn encode_gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

pub fn decode_zlib(data: &[u8]) -> io::Result<Vec<u8>> {
    drain(ZlibDecoder::new(data), data.len())
}

pub fn encode_zlib(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

pub fn decode_brotli(data: &[u8]) -> io::Result<Vec<u8>> {
    drain(brotli::Decompressor::new(data, 4096), data.len())
}

pub fn encode_brotli(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = brotli::CompressorWriter::new(Vec::new(), 4096, 11, 22);
    encoder.write_all(data)?;
    Ok(encoder.into_inner())
}

pub fn decode_zstd(data: &[u8]) -> io::Result<Vec<u8>> {
    zstd::stream::decode_all(data)
}

pub fn encode_zstd(data: &[u8]) -> io::Result<Vec<u8>> {
    zstd::stream::encode_all(data, zstd::DEFAULT_COMPRESSION_LEVEL)
}
