//! Split scoring. The weights are tuned linguistic priors; keep them as-is.

const BALANCE_WEIGHT: f64 = 0.2;
const LENGTH_WEIGHT: f64 = 0.2;
/// Average part length at which the length component saturates.
const LENGTH_CAP: f64 = 6.0;
const TAIL_BONUS: f64 = 0.3;
const BOTH_COMMON_PENALTY: f64 = 0.3;
const NEITHER_COMMON_BONUS: f64 = 0.2;
const SHORT_PART_LEN: usize = 4;
const SHORT_PART_PENALTY: f64 = 0.15;

/// Score multiplier for splits found by stripping a linking letter.
pub const LINKING_MULTIPLIER: f64 = 0.95;

/// Highest score `score` can return.
pub const MAX_SCORE: f64 = BALANCE_WEIGHT + LENGTH_WEIGHT + TAIL_BONUS + NEITHER_COMMON_BONUS;

/// Lexical features of one split candidate. Lengths are in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitFeatures {
    pub left_len: usize,
    pub right_len: usize,
    pub right_is_tail: bool,
    pub left_common: bool,
    pub right_common: bool,
}

/// Non-negative score of a split; higher is more compound-like.
pub fn score(f: &SplitFeatures) -> f64 {
    let (l, r) = (f.left_len as f64, f.right_len as f64);
    let total = l + r;
    if total == 0.0 {
        return 0.0;
    }

    let balance = 1.0 - (l - r).abs() / total;
    let length = (total / 2.0 / LENGTH_CAP).min(1.0);
    let mut s = balance * BALANCE_WEIGHT + length * LENGTH_WEIGHT;

    if f.right_is_tail {
        s += TAIL_BONUS;
    }
    match (f.left_common, f.right_common) {
        (true, true) => s -= BOTH_COMMON_PENALTY,
        (false, false) => s += NEITHER_COMMON_BONUS,
        _ => {}
    }
    if f.left_len < SHORT_PART_LEN || f.right_len < SHORT_PART_LEN {
        s -= SHORT_PART_PENALTY;
    }
    s.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(left_len: usize, right_len: usize) -> SplitFeatures {
        SplitFeatures {
            left_len,
            right_len,
            right_is_tail: false,
            left_common: false,
            right_common: false,
        }
    }

    #[test]
    fn test_max_score_is_attainable() {
        let f = SplitFeatures {
            right_is_tail: true,
            ..features(6, 6)
        };
        assert!((score(&f) - MAX_SCORE).abs() < 1e-12);
        assert!((MAX_SCORE - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_balance_and_length() {
        // balance 1 - 3/19, average length capped at 1
        let f = features(11, 8);
        let expected = (1.0 - 3.0 / 19.0) * 0.2 + 0.2 + 0.2;
        assert!((score(&f) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_both_common_penalised() {
        let f = SplitFeatures {
            left_common: true,
            right_common: true,
            ..features(4, 4)
        };
        let expected = 0.2 + (4.0 / 6.0) * 0.2 - 0.3;
        assert!((score(&f) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_short_part_and_clamp() {
        let f = SplitFeatures {
            left_common: true,
            right_common: true,
            ..features(2, 12)
        };
        assert_eq!(score(&f), 0.0);
    }

    #[test]
    fn test_empty_parts() {
        assert_eq!(score(&features(0, 0)), 0.0);
    }
}
