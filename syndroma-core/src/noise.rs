// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `noise` module injects bit-flip corruption into codewords. All noise is hard-decision:
//! a corrupted bit is inverted, never erased or attenuated.

use log::trace;
use rand::seq::index;
use rand::Rng;
use serde::Serialize;

/// The noise family applied to a codeword, as recorded in persisted results.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum NoiseType {
    #[serde(rename = "SINGLE")]
    Single,
    #[serde(rename = "BLOCK")]
    Block,
}

/// Runtime parameterisation of the noise source.
#[derive(Copy, Clone, Debug)]
pub enum NoiseKind {
    /// Independent single-bit flips spread over the whole codeword.
    Single,
    /// Bursts of `length` consecutive flips repeating with `period`.
    Block { length: usize, period: usize },
}

impl NoiseKind {
    pub fn noise_type(&self) -> NoiseType {
        match *self {
            NoiseKind::Single => NoiseType::Single,
            NoiseKind::Block { .. } => NoiseType::Block,
        }
    }
}

/// Flips `⌊len · probability / 100⌋` distinct bits, drawn uniformly without replacement. A
/// non-zero probability always flips at least one bit, even when the count truncates to zero.
/// Returns the number of flipped bits.
pub fn single<R: Rng>(word: &mut [u8], probability: f64, rng: &mut R) -> usize {
    if word.is_empty() || probability <= 0.0 {
        return 0;
    }

    let mut count = (word.len() as f64 * probability / 100.0) as usize;
    if count == 0 {
        count = 1;
    }
    let count = count.min(word.len());

    for position in index::sample(rng, word.len(), count) {
        word[position] ^= 1;
    }

    trace!("flipped {} of {} bits", count, word.len());
    count
}

/// Injects periodic bursts: starting from a uniform offset within the first period, each period
/// window independently bursts with `probability` percent chance, flipping `length` consecutive
/// bits. Returns the number of flipped bits.
pub fn block<R: Rng>(
    word: &mut [u8],
    probability: f64,
    length: usize,
    period: usize,
    rng: &mut R,
) -> usize {
    if word.is_empty() || length == 0 || probability <= 0.0 {
        return 0;
    }

    let period = period.max(1);
    let chance = (probability / 100.0).clamp(0.0, 1.0);
    let offset = rng.gen_range(0..period);

    let mut flipped = 0;
    let mut start = offset;
    while start < word.len() {
        if rng.gen_bool(chance) {
            for position in start..(start + length).min(word.len()) {
                word[position] ^= 1;
                flipped += 1;
            }
        }
        start += period;
    }

    trace!("flipped {} of {} bits in bursts", flipped, word.len());
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn verify_single_flip_count() {
        let mut rng = SmallRng::seed_from_u64(1);

        let mut word = vec![0u8; 100];
        let flipped = single(&mut word, 25.0, &mut rng);
        assert_eq!(flipped, 25);
        assert_eq!(word.iter().filter(|&&b| b == 1).count(), 25);
    }

    #[test]
    fn verify_single_zero_probability() {
        let mut rng = SmallRng::seed_from_u64(2);

        let mut word = vec![0u8; 64];
        assert_eq!(single(&mut word, 0.0, &mut rng), 0);
        assert!(word.iter().all(|&b| b == 0));
    }

    #[test]
    fn verify_single_rounds_up_to_one_flip() {
        let mut rng = SmallRng::seed_from_u64(3);

        // 7 bits at 10% truncates to zero flips; a non-zero probability must still corrupt.
        let mut word = vec![0u8; 7];
        assert_eq!(single(&mut word, 10.0, &mut rng), 1);
        assert_eq!(word.iter().filter(|&&b| b == 1).count(), 1);
    }

    #[test]
    fn verify_single_flips_are_distinct() {
        let mut rng = SmallRng::seed_from_u64(4);

        // Flipping every bit of a zero word must leave every bit set exactly once.
        let mut word = vec![0u8; 32];
        assert_eq!(single(&mut word, 100.0, &mut rng), 32);
        assert!(word.iter().all(|&b| b == 1));
    }

    #[test]
    fn verify_block_bursts() {
        let mut rng = SmallRng::seed_from_u64(5);

        let mut word = vec![0u8; 24];
        let flipped = block(&mut word, 100.0, 2, 8, &mut rng);
        assert_eq!(flipped, word.iter().filter(|&&b| b == 1).count());
        assert!(flipped >= 2);

        // Every burst is a run of adjacent flips of the configured length, except a possible
        // truncated run at the end of the word.
        let positions: Vec<usize> =
            word.iter().enumerate().filter(|(_, &b)| b == 1).map(|(i, _)| i).collect();
        for pair in positions.chunks(2) {
            if let [a, b] = *pair {
                assert_eq!(b, a + 1);
            }
        }
    }

    #[test]
    fn verify_block_zero_probability() {
        let mut rng = SmallRng::seed_from_u64(6);

        let mut word = vec![0u8; 24];
        assert_eq!(block(&mut word, 0.0, 2, 8, &mut rng), 0);
        assert!(word.iter().all(|&b| b == 0));
    }
}
