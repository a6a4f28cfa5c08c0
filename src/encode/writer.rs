//! Block driver
//!
//! Splits an input into fixed-size blocks, encodes each block with a fresh
//! dictionary and writes the `.lzwd` frames. [`compress_stream`] pulls from a
//! reader; [`LzwdWriter`] is the push-style `Write` adapter.

use super::encoder::Encoder;
use crate::common::{BlockStats, Code, CompressionStats, Result};
use crate::config::EncoderOptions;
use crate::format::{read_full, write_codes, BlockHeader, StreamHeader, STREAM_HEADER_SIZE};
use std::io::{self, Read, Write};

/// Write one frame and return its size in bytes
fn write_frame<W: Write>(writer: &mut W, stats: &BlockStats, codes: &[Code]) -> Result<u64> {
    // Block size is capped at 16 MiB, so both counts fit in u32
    let header = BlockHeader {
        source_len: stats.source_bytes as u32,
        code_count: codes.len() as u32,
    };
    header.write_to(writer)?;
    write_codes(writer, codes)?;
    Ok(header.frame_len())
}

/// Compress everything `reader` yields into a `.lzwd` stream on `writer`
///
/// Each block is filled completely before it is encoded, so only the last
/// block can be short. An empty reader produces a header-only stream.
pub fn compress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    options: EncoderOptions,
) -> Result<CompressionStats> {
    compress_stream_with(reader, writer, options, |_, _, _| {})
}

/// Like [`compress_stream`], calling `on_block` with every block's bytes,
/// codes and statistics after its frame is written
pub fn compress_stream_with<R, W, F>(
    mut reader: R,
    mut writer: W,
    options: EncoderOptions,
    mut on_block: F,
) -> Result<CompressionStats>
where
    R: Read,
    W: Write,
    F: FnMut(&[u8], &[Code], &BlockStats),
{
    let header = StreamHeader::new(&options)?;
    let encoder = Encoder::new(options);
    let mut stats = CompressionStats::default();

    header.write_to(&mut writer)?;
    stats.output_bytes = STREAM_HEADER_SIZE as u64;

    let mut block = vec![0u8; options.block_size];
    let mut codes = Vec::with_capacity(options.block_size / 2 + 1);

    loop {
        let filled = read_full(&mut reader, &mut block)?;
        if filled == 0 {
            break;
        }

        codes.clear();
        let block_stats = encoder.encode_into(&block[..filled], &mut codes)?;
        stats.output_bytes += write_frame(&mut writer, &block_stats, &codes)?;
        stats.record_block(&block_stats);
        on_block(&block[..filled], &codes, &block_stats);

        if filled < block.len() {
            break;
        }
    }

    writer.flush()?;
    Ok(stats)
}

/// Streaming compression writer implementing `Write`
///
/// Input is buffered until a whole block is available. Call
/// [`finish`](Self::finish) to encode the last partial block; dropping the
/// writer without finishing discards it.
#[derive(Debug)]
pub struct LzwdWriter<W: Write> {
    writer: W,
    encoder: Encoder,
    header: StreamHeader,
    header_written: bool,
    pending: Vec<u8>,
    codes: Vec<Code>,
    stats: CompressionStats,
}

impl<W: Write> LzwdWriter<W> {
    /// Create a new LzwdWriter
    pub fn new(writer: W, options: EncoderOptions) -> Result<Self> {
        let header = StreamHeader::new(&options)?;
        Ok(Self {
            writer,
            encoder: Encoder::new(options),
            header,
            header_written: false,
            pending: Vec::with_capacity(options.block_size),
            codes: Vec::new(),
            stats: CompressionStats::default(),
        })
    }

    /// Statistics for the blocks written so far
    pub fn stats(&self) -> &CompressionStats {
        &self.stats
    }

    /// Encode the buffered partial block, flush, and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.write_header()?;
        if !self.pending.is_empty() {
            self.encode_pending()?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.header.write_to(&mut self.writer)?;
            self.stats.output_bytes += STREAM_HEADER_SIZE as u64;
            self.header_written = true;
        }
        Ok(())
    }

    fn encode_pending(&mut self) -> Result<()> {
        self.write_header()?;
        self.codes.clear();
        let block_stats = self.encoder.encode_into(&self.pending, &mut self.codes)?;
        self.stats.output_bytes += write_frame(&mut self.writer, &block_stats, &self.codes)?;
        self.stats.record_block(&block_stats);
        self.pending.clear();
        Ok(())
    }
}

impl<W: Write> Write for LzwdWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let block_size = self.header.block_size as usize;
        let mut rest = buf;

        while !rest.is_empty() {
            let take = (block_size - self.pending.len()).min(rest.len());
            self.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            if self.pending.len() == block_size {
                self.encode_pending()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            }
        }

        Ok(buf.len())
    }

    /// Flushes the inner writer; a partial block stays buffered
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DictionarySize;
    use crate::format::{inspect_stream, BlockReader};
    use std::io::Cursor;

    fn options(block_size: usize) -> EncoderOptions {
        EncoderOptions::new(DictionarySize::Size1K).with_block_size(block_size)
    }

    #[test]
    fn test_empty_input_is_header_only() {
        let mut output = Vec::new();
        let stats = compress_stream(Cursor::new(Vec::new()), &mut output, options(64)).unwrap();
        assert_eq!(output.len(), STREAM_HEADER_SIZE);
        assert_eq!(stats.blocks, 0);
        assert_eq!(stats.output_bytes, STREAM_HEADER_SIZE as u64);

        let writer = LzwdWriter::new(Vec::new(), options(64)).unwrap();
        assert_eq!(writer.finish().unwrap(), output);
    }

    #[test]
    fn test_blocks_split_at_block_size() {
        let data: Vec<u8> = (0..250u32).map(|i| (i % 7) as u8).collect();
        let mut output = Vec::new();
        let mut sizes = Vec::new();
        let stats = compress_stream_with(Cursor::new(&data), &mut output, options(100), |b, _, _| {
            sizes.push(b.len())
        })
        .unwrap();

        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(stats.blocks, 3);
        assert_eq!(stats.input_bytes, 250);
        assert_eq!(stats.last_block_size, 50);
        assert_eq!(stats.output_bytes, output.len() as u64);

        let summary = inspect_stream(Cursor::new(&output)).unwrap();
        assert_eq!(summary.blocks, 3);
        assert_eq!(summary.source_bytes, 250);
        assert_eq!(summary.codes, stats.codes);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_frame() {
        let data = vec![b'z'; 200];
        let mut output = Vec::new();
        let stats = compress_stream(Cursor::new(&data), &mut output, options(100)).unwrap();
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.last_block_size, 100);
    }

    #[test]
    fn test_frames_match_direct_encoding() {
        let data = b"the quick brown fox jumps over the lazy dog, the lazy dog sleeps".repeat(5);
        let mut output = Vec::new();
        compress_stream(Cursor::new(&data), &mut output, options(128)).unwrap();

        let encoder = Encoder::new(options(128));
        let frames = BlockReader::new(Cursor::new(&output)).unwrap();
        for (frame, chunk) in frames.zip(data.chunks(128)) {
            let (header, codes) = frame.unwrap();
            assert_eq!(header.source_len as usize, chunk.len());
            assert_eq!(codes, encoder.encode(chunk).unwrap());
        }
    }

    #[test]
    fn test_writer_matches_stream_driver() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 251) as u8).collect();

        let mut expected = Vec::new();
        let stream_stats = compress_stream(Cursor::new(&data), &mut expected, options(300)).unwrap();

        // Feed the writer in uneven pieces
        let mut writer = LzwdWriter::new(Vec::new(), options(300)).unwrap();
        for piece in data.chunks(77) {
            writer.write_all(piece).unwrap();
        }
        let writer_stats = writer.stats().clone();
        let output = writer.finish().unwrap();

        assert_eq!(output, expected);
        assert_eq!(writer_stats.blocks, 3);
        assert_eq!(stream_stats.blocks, 4);
    }

    #[test]
    fn test_invalid_block_size() {
        assert!(LzwdWriter::new(Vec::new(), options(0)).is_err());
        let mut output = Vec::new();
        assert!(compress_stream(Cursor::new(b"abc"), &mut output, options(0)).is_err());
        assert!(output.is_empty());
    }
}
