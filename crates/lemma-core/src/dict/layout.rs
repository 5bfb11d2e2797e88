//! Byte layout of the `LEMA` dictionary format.
//!
//! ```text
//! 0   magic u32 | version u32 | string_pool_size u32 | lemma_count u32
//! 16  word_count u32 | entry_count u32 | bigram_count u32 | reserved u32
//! 32  string pool
//!     lemma offsets u32 × lemma_count, lemma lengths u8 × lemma_count, pad4
//!     word offsets u32 × word_count, word lengths u8 × word_count, pad4
//!     entry offsets u32 × (word_count + 1)
//!     entries u32 × entry_count, pad4
//!     [bigram_count > 0]
//!     w1 offsets u32, w1 lengths u8, pad4, w2 offsets u32, w2 lengths u8, pad4,
//!     frequencies u32
//! ```
//!
//! All integers are little-endian. Nothing here interprets the contents of a
//! section; it only computes where each one starts and proves it fits.

use super::FormatError;

pub const MAGIC: u32 = 0x4C45_4D41;
pub const HEADER_SIZE: usize = 32;

/// Fixed 32-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub string_pool_size: u32,
    pub lemma_count: u32,
    pub word_count: u32,
    pub entry_count: u32,
    pub bigram_count: u32,
}

fn le_u32(data: &[u8], offset: usize) -> u32 {
    data.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .unwrap_or(0)
}

impl Header {
    /// Validate magic and version and read the section counts.
    /// The reserved word (bytes 28..32) is ignored.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() < HEADER_SIZE {
            return Err(FormatError::TooShort { len: data.len() });
        }
        let magic = le_u32(data, 0);
        if magic != MAGIC {
            return Err(FormatError::BadMagic(magic));
        }
        let version = le_u32(data, 4);
        if version != 1 && version != 2 {
            return Err(FormatError::UnsupportedVersion(version));
        }
        Ok(Self {
            version,
            string_pool_size: le_u32(data, 8),
            lemma_count: le_u32(data, 12),
            word_count: le_u32(data, 16),
            entry_count: le_u32(data, 20),
            bigram_count: le_u32(data, 24),
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        let fields = [
            MAGIC,
            self.version,
            self.string_pool_size,
            self.lemma_count,
            self.word_count,
            self.entry_count,
            self.bigram_count,
            0,
        ];
        for (i, v) in fields.iter().enumerate() {
            buf[i * 4..i * 4 + 4].copy_from_slice(&v.to_le_bytes());
        }
        buf
    }
}

/// Start offsets of the bigram arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BigramSections {
    pub w1_offsets: usize,
    pub w1_lengths: usize,
    pub w2_offsets: usize,
    pub w2_lengths: usize,
    pub freqs: usize,
}

/// Start offsets of every section, proven to lie inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub string_pool: usize,
    pub string_pool_end: usize,
    pub lemma_offsets: usize,
    pub lemma_lengths: usize,
    pub word_offsets: usize,
    pub word_lengths: usize,
    pub entry_offsets: usize,
    pub entries: usize,
    pub bigrams: Option<BigramSections>,
}

/// Walks the buffer section by section. Offsets are tracked in `u64` so that
/// hostile counts cannot wrap around.
struct Cursor {
    offset: u64,
    len: usize,
}

impl Cursor {
    fn take(&mut self, section: &'static str, bytes: u64) -> Result<usize, FormatError> {
        let start = self.offset;
        let end = start + bytes;
        if end > self.len as u64 {
            return Err(FormatError::OutOfBounds {
                section,
                end,
                len: self.len,
            });
        }
        self.offset = end;
        Ok(start as usize)
    }

    fn align4(&mut self) {
        self.offset = (self.offset + 3) & !3;
    }
}

impl Layout {
    pub(crate) fn compute(header: &Header, len: usize) -> Result<Self, FormatError> {
        let lemmas = u64::from(header.lemma_count);
        let words = u64::from(header.word_count);
        let entries = u64::from(header.entry_count);
        let bigrams = u64::from(header.bigram_count);

        let mut cur = Cursor {
            offset: HEADER_SIZE as u64,
            len,
        };
        let string_pool = cur.take("string_pool", u64::from(header.string_pool_size))?;
        let string_pool_end = cur.offset as usize;

        let lemma_offsets = cur.take("lemma_offsets", lemmas * 4)?;
        let lemma_lengths = cur.take("lemma_lengths", lemmas)?;
        cur.align4();

        let word_offsets = cur.take("word_offsets", words * 4)?;
        let word_lengths = cur.take("word_lengths", words)?;
        cur.align4();

        let entry_offsets = cur.take("entry_offsets", (words + 1) * 4)?;
        let entries = cur.take("entries", entries * 4)?;
        cur.align4();

        let bigrams = if bigrams > 0 {
            let w1_offsets = cur.take("bigram_w1_offsets", bigrams * 4)?;
            let w1_lengths = cur.take("bigram_w1_lengths", bigrams)?;
            cur.align4();
            let w2_offsets = cur.take("bigram_w2_offsets", bigrams * 4)?;
            let w2_lengths = cur.take("bigram_w2_lengths", bigrams)?;
            cur.align4();
            let freqs = cur.take("bigram_freqs", bigrams * 4)?;
            Some(BigramSections {
                w1_offsets,
                w1_lengths,
                w2_offsets,
                w2_lengths,
                freqs,
            })
        } else {
            None
        };

        Ok(Self {
            string_pool,
            string_pool_end,
            lemma_offsets,
            lemma_lengths,
            word_offsets,
            word_lengths,
            entry_offsets,
            entries,
            bigrams,
        })
    }
}

/// Little-endian `u32` at `base + idx * 4`; 0 if out of range.
pub(crate) fn read_u32(data: &[u8], base: usize, idx: usize) -> u32 {
    le_u32(data, base + idx * 4)
}

/// Byte at `base + idx`; 0 if out of range.
pub(crate) fn read_u8(data: &[u8], base: usize, idx: usize) -> u8 {
    data.get(base + idx).copied().unwrap_or(0)
}

/// Bytes padding a section of `len` bytes to 4-byte alignment.
pub(crate) fn pad4(len: usize) -> usize {
    (4 - len % 4) % 4
}
