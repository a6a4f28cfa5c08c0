//! `.lzwd` stream container
//!
//! A stream is a fixed header followed by one frame per encoded block. All
//! integers are little-endian.
//!
//! ```text
//! header: "LZWD" | version u8 | dictionary bits u8 | block size u32
//! frame:  source bytes u32 | code count u32 | code count x u16
//! ```
//!
//! Frames run until the end of the stream. Every block is encoded with its own
//! fresh dictionary, so frames can be inspected independently.

use crate::common::{Code, DictionarySize, LzwdError, Result, MAX_BLOCK_SIZE};
use crate::config::EncoderOptions;
use std::io::{ErrorKind, Read, Write};

/// Stream signature
pub const MAGIC: [u8; 4] = *b"LZWD";

/// Current container version
pub const FORMAT_VERSION: u8 = 1;

/// Size of the stream header in bytes
pub const STREAM_HEADER_SIZE: usize = 10;

/// Size of a frame header in bytes
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Size of one code word in bytes
pub const CODE_SIZE: usize = 2;

/// Stream header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Dictionary size every block was encoded with
    pub dict_size: DictionarySize,
    /// Block size the driver read the input with
    pub block_size: u32,
}

impl StreamHeader {
    /// Header describing a stream written with `options`
    pub fn new(options: &EncoderOptions) -> Result<Self> {
        options.validate()?;
        let block_size = u32::try_from(options.block_size)
            .map_err(|_| LzwdError::InvalidBlockSize(options.block_size))?;
        Ok(Self {
            dict_size: options.dict_size,
            block_size,
        })
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; STREAM_HEADER_SIZE] {
        let mut bytes = [0u8; STREAM_HEADER_SIZE];
        bytes[..4].copy_from_slice(&MAGIC);
        bytes[4] = FORMAT_VERSION;
        bytes[5] = self.dict_size.bits();
        bytes[6..].copy_from_slice(&self.block_size.to_le_bytes());
        bytes
    }

    /// Parse and validate a serialized header
    pub fn from_bytes(bytes: &[u8; STREAM_HEADER_SIZE]) -> Result<Self> {
        if bytes[..4] != MAGIC {
            return Err(LzwdError::InvalidFormat);
        }
        if bytes[4] != FORMAT_VERSION {
            return Err(LzwdError::InvalidData(format!(
                "unsupported format version {}",
                bytes[4]
            )));
        }

        let dict_size = DictionarySize::from_bits(bytes[5])?;
        let block_size = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        if block_size == 0 || block_size as usize > MAX_BLOCK_SIZE {
            return Err(LzwdError::InvalidBlockSize(block_size as usize));
        }

        Ok(Self {
            dict_size,
            block_size,
        })
    }

    /// Write the header to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read a header from `reader`
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; STREAM_HEADER_SIZE];
        if read_full(reader, &mut bytes)? != STREAM_HEADER_SIZE {
            return Err(LzwdError::UnexpectedEof);
        }
        Self::from_bytes(&bytes)
    }
}

/// Frame header preceding the codes of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Raw bytes in the block
    pub source_len: u32,
    /// Number of codes in the frame
    pub code_count: u32,
}

impl BlockHeader {
    /// Bytes the whole frame occupies, header included
    pub fn frame_len(&self) -> u64 {
        BLOCK_HEADER_SIZE as u64 + self.code_count as u64 * CODE_SIZE as u64
    }

    /// Write the frame header to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut bytes = [0u8; BLOCK_HEADER_SIZE];
        bytes[..4].copy_from_slice(&self.source_len.to_le_bytes());
        bytes[4..].copy_from_slice(&self.code_count.to_le_bytes());
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Read a frame header, `None` at a clean end of stream
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut bytes = [0u8; BLOCK_HEADER_SIZE];
        match read_full(reader, &mut bytes)? {
            0 => Ok(None),
            BLOCK_HEADER_SIZE => Ok(Some(Self {
                source_len: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
                code_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            })),
            _ => Err(LzwdError::UnexpectedEof),
        }
    }

    /// Check the frame header against the stream header
    ///
    /// Every code covers at least one byte, so a block can never have more
    /// codes than bytes.
    pub fn validate(&self, stream: &StreamHeader) -> Result<()> {
        if self.source_len == 0 || self.source_len > stream.block_size {
            return Err(LzwdError::InvalidData(format!(
                "block of {} bytes in a stream of {}-byte blocks",
                self.source_len, stream.block_size
            )));
        }
        if self.code_count == 0 || self.code_count > self.source_len {
            return Err(LzwdError::InvalidData(format!(
                "{} codes for a block of {} bytes",
                self.code_count, self.source_len
            )));
        }
        Ok(())
    }
}

/// Write codes as little-endian 16-bit words, returning the bytes written
pub fn write_codes<W: Write>(writer: &mut W, codes: &[Code]) -> Result<usize> {
    let mut bytes = Vec::with_capacity(codes.len() * CODE_SIZE);
    for &code in codes {
        bytes.extend_from_slice(&code.to_le_bytes());
    }
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Read until `buf` is full or the reader is exhausted
///
/// Returns how many bytes were read; short only at end of input.
pub fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Iterator over the frames of a `.lzwd` stream
#[derive(Debug)]
pub struct BlockReader<R: Read> {
    reader: R,
    header: StreamHeader,
    finished: bool,
}

impl<R: Read> BlockReader<R> {
    /// Read the stream header and prepare to iterate frames
    pub fn new(mut reader: R) -> Result<Self> {
        let header = StreamHeader::read_from(&mut reader)?;
        Ok(Self {
            reader,
            header,
            finished: false,
        })
    }

    /// The stream header
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    /// Read the next frame, `None` at end of stream
    pub fn next_block(&mut self) -> Result<Option<(BlockHeader, Vec<Code>)>> {
        let Some(block) = BlockHeader::read_from(&mut self.reader)? else {
            return Ok(None);
        };
        block.validate(&self.header)?;

        let mut bytes = vec![0u8; block.code_count as usize * CODE_SIZE];
        if read_full(&mut self.reader, &mut bytes)? != bytes.len() {
            return Err(LzwdError::UnexpectedEof);
        }

        let slots = self.header.dict_size.slots();
        let mut codes = Vec::with_capacity(block.code_count as usize);
        for word in bytes.chunks_exact(CODE_SIZE) {
            let code = Code::from_le_bytes([word[0], word[1]]);
            if code as usize >= slots {
                return Err(LzwdError::InvalidData(format!(
                    "code {code} outside a {slots}-slot dictionary"
                )));
            }
            codes.push(code);
        }

        Ok(Some((block, codes)))
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = Result<(BlockHeader, Vec<Code>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Summary of a `.lzwd` stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// Stream header
    pub header: StreamHeader,
    /// Number of frames
    pub blocks: usize,
    /// Total raw bytes described by the frames
    pub source_bytes: u64,
    /// Total codes in the frames
    pub codes: u64,
    /// Total stream size, header included
    pub stream_bytes: u64,
    /// Raw size of the last block
    pub last_block_size: u32,
}

/// Walk every frame of a stream and summarise it
pub fn inspect_stream<R: Read>(reader: R) -> Result<StreamSummary> {
    let mut blocks = BlockReader::new(reader)?;
    let mut summary = StreamSummary {
        header: *blocks.header(),
        blocks: 0,
        source_bytes: 0,
        codes: 0,
        stream_bytes: STREAM_HEADER_SIZE as u64,
        last_block_size: 0,
    };

    while let Some((block, _)) = blocks.next_block()? {
        summary.blocks += 1;
        summary.source_bytes += block.source_len as u64;
        summary.codes += block.code_count as u64;
        summary.stream_bytes += block.frame_len();
        summary.last_block_size = block.source_len;
    }

    Ok(summary)
}
