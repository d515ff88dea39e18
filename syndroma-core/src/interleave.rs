// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `interleave` module provides a block interleaver: a fixed permutation of bit positions
//! applied before the channel and inverted after it, decoupling a burst of adjacent errors into
//! scattered single-bit errors that the surrounding code can handle independently.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::errors::{parameter_error, Result};

/// A deterministic permutation of the positions `0..length` together with its inverse. The
/// permutation is fixed at construction.
pub struct Interleaver {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Interleaver {
    /// Creates an interleaver over `length` bit positions. The permutation is drawn by a
    /// Fisher-Yates shuffle of a generator seeded with `seed`, so equal seeds produce equal
    /// interleavers.
    pub fn new(length: usize, seed: u64) -> Interleaver {
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut forward: Vec<usize> = (0..length).collect();
        forward.shuffle(&mut rng);

        let mut inverse = vec![0; length];
        for (src, &dst) in forward.iter().enumerate() {
            inverse[dst] = src;
        }

        Interleaver { forward, inverse }
    }

    /// The number of bit positions this interleaver permutes.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Applies the permutation: input bit `i` lands at output position `forward[i]`.
    pub fn shuffle(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.forward.len() {
            return parameter_error("core (interleave): word length does not match the interleaver");
        }

        let mut out = vec![0; word.len()];
        for (src, &bit) in word.iter().enumerate() {
            out[self.forward[src]] = bit;
        }
        Ok(out)
    }

    /// Applies the inverse permutation, restoring the original bit order.
    pub fn reestablish(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.inverse.len() {
            return parameter_error("core (interleave): word length does not match the interleaver");
        }

        let mut out = vec![0; word.len()];
        for (src, &bit) in word.iter().enumerate() {
            out[self.inverse[src]] = bit;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_round_trip() {
        let interleaver = Interleaver::new(16, 7);

        let word: Vec<u8> = (0..16).map(|i| (i % 2) as u8).collect();
        let shuffled = interleaver.shuffle(&word).unwrap();
        assert_eq!(interleaver.reestablish(&shuffled).unwrap(), word);
    }

    #[test]
    fn verify_permutation_is_bijective() {
        let interleaver = Interleaver::new(32, 99);

        // Shuffling a one-hot word must produce a one-hot word for every position.
        for position in 0..32 {
            let mut word = vec![0u8; 32];
            word[position] = 1;
            let shuffled = interleaver.shuffle(&word).unwrap();
            assert_eq!(shuffled.iter().filter(|&&b| b == 1).count(), 1);
        }
    }

    #[test]
    fn verify_seed_determinism() {
        let a = Interleaver::new(24, 5);
        let b = Interleaver::new(24, 5);

        let word: Vec<u8> = (0..24).map(|i| ((i * 7) % 2) as u8).collect();
        assert_eq!(a.shuffle(&word).unwrap(), b.shuffle(&word).unwrap());
    }

    #[test]
    fn verify_length_mismatch() {
        let interleaver = Interleaver::new(8, 0);

        assert!(interleaver.shuffle(&[1, 0, 1]).is_err());
        assert!(interleaver.reestablish(&[1, 0, 1]).is_err());
    }
}
