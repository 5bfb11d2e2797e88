use std::collections::{BTreeMap, HashMap};

use super::entry::{Candidate, EntryFormat};
use super::layout::{pad4, Header};
use super::DictError;
use crate::unicode::normalize;

/// Writes dictionaries in the `LEMA` layout.
///
/// Lemmas are numbered in the order they are first seen, so callers that
/// want frequency-ordered lemma tables should register them with
/// [`add_lemma`](Self::add_lemma) first. Readings keep insertion order per
/// word form; word forms and bigrams are sorted by bytes on output.
pub struct DictionaryBuilder {
    format: EntryFormat,
    lemmas: Vec<String>,
    lemma_ids: HashMap<String, u32>,
    words: BTreeMap<String, Vec<(u32, Candidate)>>,
    bigrams: BTreeMap<(String, String), u32>,
}

/// String pool with per-string deduplication.
struct StringPool {
    bytes: Vec<u8>,
    offsets: HashMap<String, u32>,
}

impl StringPool {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            offsets: HashMap::new(),
        }
    }

    fn add(&mut self, s: &str) -> Result<(u32, u8), DictError> {
        let len: u8 = s
            .len()
            .try_into()
            .map_err(|_| DictError::Build(format!("string longer than 255 bytes: {s:?}")))?;
        if let Some(&offset) = self.offsets.get(s) {
            return Ok((offset, len));
        }
        let offset: u32 = self
            .bytes
            .len()
            .try_into()
            .map_err(|_| DictError::Build("string pool exceeds u32::MAX".to_string()))?;
        self.bytes.extend_from_slice(s.as_bytes());
        self.offsets.insert(s.to_string(), offset);
        Ok((offset, len))
    }
}

fn count_u32(n: usize, what: &str) -> Result<u32, DictError> {
    n.try_into()
        .map_err(|_| DictError::Build(format!("{what} count exceeds u32::MAX")))
}

fn write_u32s(buf: &mut Vec<u8>, values: impl IntoIterator<Item = u32>) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn write_lengths(buf: &mut Vec<u8>, lengths: &[u8]) {
    buf.extend_from_slice(lengths);
    buf.resize(buf.len() + pad4(lengths.len()), 0);
}

impl DictionaryBuilder {
    pub fn new(format: EntryFormat) -> Self {
        Self {
            format,
            lemmas: Vec::new(),
            lemma_ids: HashMap::new(),
            words: BTreeMap::new(),
            bigrams: BTreeMap::new(),
        }
    }

    /// Register a lemma and return its index.
    pub fn add_lemma(&mut self, lemma: &str) -> u32 {
        let lemma = normalize(lemma);
        if let Some(&id) = self.lemma_ids.get(&lemma) {
            return id;
        }
        let id = self.lemmas.len() as u32;
        self.lemmas.push(lemma.clone());
        self.lemma_ids.insert(lemma, id);
        id
    }

    /// Add one reading of `word`. Exact duplicates are ignored.
    pub fn add_reading(&mut self, word: &str, candidate: Candidate) -> &mut Self {
        let mut candidate = candidate;
        candidate.lemma = normalize(&candidate.lemma);
        let id = self.add_lemma(&candidate.lemma);
        let readings = self.words.entry(normalize(word)).or_default();
        if !readings.iter().any(|(_, c)| *c == candidate) {
            readings.push((id, candidate));
        }
        self
    }

    /// Set the corpus frequency of the ordered pair `(word1, word2)`.
    pub fn add_bigram(&mut self, word1: &str, word2: &str, frequency: u32) -> &mut Self {
        self.bigrams
            .insert((normalize(word1), normalize(word2)), frequency);
        self
    }

    pub fn build(&self) -> Result<Vec<u8>, DictError> {
        let mut pool = StringPool::new();

        let mut lemma_refs = Vec::with_capacity(self.lemmas.len());
        for lemma in &self.lemmas {
            lemma_refs.push(pool.add(lemma)?);
        }
        let mut word_refs = Vec::with_capacity(self.words.len());
        for word in self.words.keys() {
            word_refs.push(pool.add(word)?);
        }
        let mut bigram_refs = Vec::with_capacity(self.bigrams.len());
        for ((w1, w2), &freq) in &self.bigrams {
            bigram_refs.push((pool.add(w1)?, pool.add(w2)?, freq));
        }

        let mut string_pool = pool.bytes;
        string_pool.resize(string_pool.len() + pad4(string_pool.len()), 0);

        let mut entries = Vec::new();
        let mut entry_offsets = Vec::with_capacity(self.words.len() + 1);
        entry_offsets.push(0u32);
        for readings in self.words.values() {
            for (id, candidate) in readings {
                let packed = self.format.pack(candidate.to_packed(*id)).ok_or_else(|| {
                    DictError::Build(format!("lemma index {id} does not fit the entry layout"))
                })?;
                entries.push(packed);
            }
            entry_offsets.push(count_u32(entries.len(), "entry")?);
        }

        let header = Header {
            version: self.format.version(),
            string_pool_size: count_u32(string_pool.len(), "string pool byte")?,
            lemma_count: count_u32(self.lemmas.len(), "lemma")?,
            word_count: count_u32(self.words.len(), "word")?,
            entry_count: count_u32(entries.len(), "entry")?,
            bigram_count: count_u32(self.bigrams.len(), "bigram")?,
        };

        let mut buf = Vec::new();
        buf.extend_from_slice(&header.to_bytes());
        buf.extend_from_slice(&string_pool);

        write_u32s(&mut buf, lemma_refs.iter().map(|r| r.0));
        write_lengths(&mut buf, &lemma_refs.iter().map(|r| r.1).collect::<Vec<_>>());

        write_u32s(&mut buf, word_refs.iter().map(|r| r.0));
        write_lengths(&mut buf, &word_refs.iter().map(|r| r.1).collect::<Vec<_>>());

        write_u32s(&mut buf, entry_offsets);
        write_u32s(&mut buf, entries.iter().copied());
        buf.resize(buf.len() + pad4(buf.len()), 0);

        if !bigram_refs.is_empty() {
            write_u32s(&mut buf, bigram_refs.iter().map(|b| b.0 .0));
            write_lengths(&mut buf, &bigram_refs.iter().map(|b| b.0 .1).collect::<Vec<_>>());
            write_u32s(&mut buf, bigram_refs.iter().map(|b| b.1 .0));
            write_lengths(&mut buf, &bigram_refs.iter().map(|b| b.1 .1).collect::<Vec<_>>());
            write_u32s(&mut buf, bigram_refs.iter().map(|b| b.2));
        }

        Ok(buf)
    }
}
