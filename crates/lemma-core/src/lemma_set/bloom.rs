use std::f64::consts::LN_2;

use super::LemmaSet;
use crate::dict::BinaryDictionary;
use crate::settings::MembershipSettings;
use crate::unicode::normalize;

const SEED_PRIMARY: u32 = 0;
const SEED_SECONDARY: u32 = 0x9747_B28C;

/// MurmurHash3, x86 32-bit variant.
fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xCC9E_2D51;
    const C2: u32 = 0x1B87_3593;

    let mut h = seed;
    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h ^= k;
        h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xE654_6B64);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k |= u32::from(b) << (8 * i);
        }
        k = k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h ^= k;
    }

    h ^= data.len() as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h
}

/// Bloom filter over lowercase lemma strings.
///
/// Sized as `m = ceil(-n ln p / ln² 2)` bits and `k = round(m/n · ln 2)`
/// probes. The `k` probe positions come from double hashing two seeded
/// MurmurHash3 digests: `h1 + i·h2 mod m`.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: Vec<u64>,
    num_bits: u64,
    num_hashes: u32,
    len: usize,
}

impl BloomFilter {
    /// Empty filter for `expected` items at false-positive rate `p`,
    /// optionally capping the probe count.
    pub fn with_rate(expected: usize, p: f64, max_hashes: Option<u32>) -> Self {
        let n = expected.max(1) as f64;
        let p = p.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON);
        let num_bits = ((-n * p.ln()) / (LN_2 * LN_2)).ceil().max(1.0) as u64;
        let mut num_hashes = ((num_bits as f64 / n) * LN_2).round().max(1.0) as u32;
        if let Some(cap) = max_hashes {
            num_hashes = num_hashes.min(cap.max(1));
        }
        let words = num_bits.div_ceil(64) as usize;
        Self {
            bits: vec![0; words],
            num_bits,
            num_hashes,
            len: 0,
        }
    }

    /// Filter holding every lemma of `dict`, sized by `settings`.
    pub fn from_dictionary(dict: &BinaryDictionary, settings: &MembershipSettings) -> Self {
        let mut filter = Self::with_rate(
            dict.stats().lemma_count,
            settings.false_positive_rate,
            Some(settings.max_hashes),
        );
        for lemma in dict.lemmas_iter() {
            filter.insert(&lemma);
        }
        filter
    }

    pub fn insert(&mut self, lemma: &str) {
        let key = normalize(lemma);
        let (h1, h2) = Self::digests(key.as_bytes());
        for i in 0..self.num_hashes {
            let bit = self.probe(h1, h2, i);
            self.bits[(bit / 64) as usize] |= 1 << (bit % 64);
        }
        self.len += 1;
    }

    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    fn digests(key: &[u8]) -> (u64, u64) {
        (
            u64::from(murmur3_32(key, SEED_PRIMARY)),
            u64::from(murmur3_32(key, SEED_SECONDARY)),
        )
    }

    fn probe(&self, h1: u64, h2: u64, i: u32) -> u64 {
        h1.wrapping_add(u64::from(i).wrapping_mul(h2)) % self.num_bits
    }
}

impl LemmaSet for BloomFilter {
    fn contains(&self, lemma: &str) -> bool {
        let key = normalize(lemma);
        let (h1, h2) = Self::digests(key.as_bytes());
        (0..self.num_hashes).all(|i| {
            let bit = self.probe(h1, h2, i);
            self.bits[(bit / 64) as usize] & (1 << (bit % 64)) != 0
        })
    }

    fn len(&self) -> usize {
        self.len
    }
}
