use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug_span, info};

use super::binary_dict::{BinaryDictionary, ByteStorage};
use super::layout::read_u32;
use super::{DictError, FormatError};

impl BinaryDictionary {
    /// Parse a dictionary from an owned buffer.
    ///
    /// Header and every section boundary are validated before any section is
    /// read; on error nothing is constructed.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FormatError> {
        let _span = debug_span!("dict_from_bytes", len = data.len()).entered();
        let dict = Self::from_storage(ByteStorage::Owned(data))?;
        dict.log_loaded();
        Ok(dict)
    }

    /// Open a dictionary file using memory-mapped I/O.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let _span = debug_span!("dict_open", path = %path.display()).entered();
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is owned by the dictionary, so the bytes stay valid for its
        // lifetime. The file must not be modified while it is mapped.
        let mmap = unsafe { Mmap::map(&file)? };
        let dict = Self::from_storage(ByteStorage::Mapped(mmap))?;
        dict.log_loaded();
        Ok(dict)
    }

    /// The raw dictionary bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.as_bytes())?)
    }

    fn log_loaded(&self) {
        let s = self.stats();
        info!(
            version = s.version,
            lemmas = s.lemma_count,
            words = s.word_count,
            entries = s.entry_count,
            bigrams = s.bigram_count,
            "dictionary loaded"
        );
    }

    /// Full structural check: every string reference inside the pool, entry
    /// offsets monotone and covering the entry table, every lemma index
    /// valid, word forms and bigrams strictly ascending.
    ///
    /// Loading only checks section bounds; this walks every record.
    pub fn verify(&self) -> Result<(), FormatError> {
        let stats = self.stats();

        for i in 0..stats.lemma_count {
            if self.lemma_bytes(i).is_none() {
                return Err(FormatError::OutOfBounds {
                    section: "lemma_offsets",
                    end: i as u64,
                    len: self.data.len(),
                });
            }
        }

        let mut prev_end = 0usize;
        for i in 0..stats.word_count {
            if i > 0 && self.word_bytes(i - 1) >= self.word_bytes(i) {
                return Err(FormatError::Unsorted {
                    section: "words",
                    index: i,
                });
            }
            let start = read_u32(&self.data, self.layout.entry_offsets, i) as usize;
            let end = read_u32(&self.data, self.layout.entry_offsets, i + 1) as usize;
            if start != prev_end || end < start {
                return Err(FormatError::Unsorted {
                    section: "entry_offsets",
                    index: i,
                });
            }
            prev_end = end;
        }
        if prev_end != stats.entry_count {
            return Err(FormatError::OutOfBounds {
                section: "entry_offsets",
                end: prev_end as u64,
                len: stats.entry_count,
            });
        }

        for i in 0..stats.entry_count {
            let entry = self
                .format
                .unpack(read_u32(&self.data, self.layout.entries, i));
            if entry.lemma_idx as usize >= stats.lemma_count {
                return Err(FormatError::OutOfBounds {
                    section: "entries",
                    end: u64::from(entry.lemma_idx),
                    len: stats.lemma_count,
                });
            }
        }

        for i in 1..stats.bigram_count {
            let prev = (self.bigram_word(true, i - 1), self.bigram_word(false, i - 1));
            let cur = (self.bigram_word(true, i), self.bigram_word(false, i));
            if prev >= cur {
                return Err(FormatError::Unsorted {
                    section: "bigrams",
                    index: i,
                });
            }
        }

        Ok(())
    }
}
