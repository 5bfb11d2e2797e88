use std::cmp::Ordering;
use std::ops::Deref;

use memmap2::Mmap;

use super::entry::{Candidate, EntryFormat};
use super::layout::{read_u32, read_u8, Header, Layout};
use super::{Dictionary, FormatError};
use crate::unicode::normalize;

/// Backing bytes of a loaded dictionary: either owned or memory-mapped.
pub(super) enum ByteStorage {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for ByteStorage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            ByteStorage::Owned(v) => v,
            ByteStorage::Mapped(m) => m,
        }
    }
}

/// Section counts of a loaded dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictStats {
    pub version: u32,
    pub lemma_count: usize,
    pub word_count: usize,
    pub entry_count: usize,
    pub bigram_count: usize,
}

/// Read-only dictionary over a single `LEMA` buffer.
///
/// Word forms are looked up by binary search over the sorted word table;
/// bigrams by a nested binary search over the (word1, word2)-sorted table.
/// The buffer is never modified after load, so a `BinaryDictionary` can be
/// shared freely between threads.
pub struct BinaryDictionary {
    pub(super) data: ByteStorage,
    pub(super) header: Header,
    pub(super) layout: Layout,
    pub(super) format: EntryFormat,
}

impl BinaryDictionary {
    /// Validate the header and section bounds, then take ownership of `data`.
    pub(super) fn from_storage(data: ByteStorage) -> Result<Self, FormatError> {
        let header = Header::parse(&data)?;
        let layout = Layout::compute(&header, data.len())?;
        let format = EntryFormat::from_version(header.version)
            .ok_or(FormatError::UnsupportedVersion(header.version))?;
        Ok(Self {
            data,
            header,
            layout,
            format,
        })
    }

    pub fn stats(&self) -> DictStats {
        DictStats {
            version: self.header.version,
            lemma_count: self.header.lemma_count as usize,
            word_count: self.header.word_count as usize,
            entry_count: self.header.entry_count as usize,
            bigram_count: self.header.bigram_count as usize,
        }
    }

    pub fn format(&self) -> EntryFormat {
        self.format
    }

    /// Bytes of the string pool at `offset..offset + len`, if in range.
    fn pool_bytes(&self, offset: u32, len: u8) -> Option<&[u8]> {
        let start = self.layout.string_pool.checked_add(offset as usize)?;
        let end = start.checked_add(len as usize)?;
        if end > self.layout.string_pool_end {
            return None;
        }
        self.data.get(start..end)
    }

    pub(super) fn lemma_bytes(&self, idx: usize) -> Option<&[u8]> {
        if idx >= self.header.lemma_count as usize {
            return None;
        }
        let offset = read_u32(&self.data, self.layout.lemma_offsets, idx);
        let len = read_u8(&self.data, self.layout.lemma_lengths, idx);
        self.pool_bytes(offset, len)
    }

    pub(super) fn lemma_str(&self, idx: usize) -> Option<String> {
        self.lemma_bytes(idx)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub(super) fn word_bytes(&self, idx: usize) -> &[u8] {
        let offset = read_u32(&self.data, self.layout.word_offsets, idx);
        let len = read_u8(&self.data, self.layout.word_lengths, idx);
        self.pool_bytes(offset, len).unwrap_or(&[])
    }

    /// Index of `word` (already normalized) in the sorted word table.
    fn find_word(&self, word: &[u8]) -> Option<usize> {
        let mut left = 0usize;
        let mut right = self.header.word_count as usize;
        while left < right {
            let mid = left + (right - left) / 2;
            match self.word_bytes(mid).cmp(word) {
                Ordering::Equal => return Some(mid),
                Ordering::Less => left = mid + 1,
                Ordering::Greater => right = mid,
            }
        }
        None
    }

    /// Entry index range `[start, end)` of word `idx`, clamped to the entry table.
    pub(super) fn entry_range(&self, idx: usize) -> (usize, usize) {
        let count = self.header.entry_count as usize;
        let start = read_u32(&self.data, self.layout.entry_offsets, idx) as usize;
        let end = read_u32(&self.data, self.layout.entry_offsets, idx + 1) as usize;
        let end = end.min(count);
        (start.min(end), end)
    }

    fn readings_at(&self, idx: usize) -> Vec<Candidate> {
        let (start, end) = self.entry_range(idx);
        let mut out = Vec::with_capacity(end - start);
        for i in start..end {
            let packed = read_u32(&self.data, self.layout.entries, i);
            let entry = self.format.unpack(packed);
            // A dangling lemma index is skipped rather than dereferenced.
            if let Some(lemma) = self.lemma_str(entry.lemma_idx as usize) {
                out.push(Candidate::from_packed(lemma, &entry));
            }
        }
        out
    }

    /// Iterate over every lemma string in table order.
    pub fn lemmas_iter(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.header.lemma_count as usize).filter_map(move |i| self.lemma_str(i))
    }

    /// Iterate over every word form in sorted order.
    pub fn words_iter(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.header.word_count as usize)
            .map(move |i| String::from_utf8_lossy(self.word_bytes(i)).into_owned())
    }

    pub(super) fn bigram_word(&self, first: bool, idx: usize) -> &[u8] {
        let Some(b) = self.layout.bigrams else {
            return &[];
        };
        let (offsets, lengths) = if first {
            (b.w1_offsets, b.w1_lengths)
        } else {
            (b.w2_offsets, b.w2_lengths)
        };
        let offset = read_u32(&self.data, offsets, idx);
        let len = read_u8(&self.data, lengths, idx);
        self.pool_bytes(offset, len).unwrap_or(&[])
    }

    /// First index in `[lo, hi)` for which `pred` is false, assuming `pred`
    /// is true for a prefix of the range.
    fn partition_point(mut lo: usize, mut hi: usize, pred: impl Fn(usize) -> bool) -> usize {
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(mid) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    fn find_bigram(&self, w1: &[u8], w2: &[u8]) -> Option<usize> {
        if self.layout.bigrams.is_none() {
            return None;
        }
        let count = self.header.bigram_count as usize;
        // Run of records whose first word equals w1.
        let run_start = Self::partition_point(0, count, |i| self.bigram_word(true, i) < w1);
        let run_end =
            Self::partition_point(run_start, count, |i| self.bigram_word(true, i) <= w1);
        let pos = Self::partition_point(run_start, run_end, |i| self.bigram_word(false, i) < w2);
        if pos < run_end && self.bigram_word(false, pos) == w2 {
            Some(pos)
        } else {
            None
        }
    }

    pub(super) fn bigram_freq_at(&self, idx: usize) -> u32 {
        self.layout
            .bigrams
            .map(|b| read_u32(&self.data, b.freqs, idx))
            .unwrap_or(0)
    }
}

impl Dictionary for BinaryDictionary {
    fn readings(&self, word: &str) -> Vec<Candidate> {
        let lower = normalize(word);
        match self.find_word(lower.as_bytes()) {
            Some(idx) => self.readings_at(idx),
            None => Vec::new(),
        }
    }

    fn is_known(&self, word: &str) -> bool {
        let lower = normalize(word);
        self.find_word(lower.as_bytes()).is_some()
    }

    fn bigram_frequency(&self, word1: &str, word2: &str) -> u32 {
        let w1 = normalize(word1);
        let w2 = normalize(word2);
        self.find_bigram(w1.as_bytes(), w2.as_bytes())
            .map(|idx| self.bigram_freq_at(idx))
            .unwrap_or(0)
    }
}
