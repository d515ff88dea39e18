// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `util` module provides a repository of commonly used utility functions sorted into
//! distinct categories.

pub mod bits {
    //! Utilities for bit sequences over GF(2).
    //!
    //! A bit sequence is a slice of `u8` values restricted to {0, 1}. The canonical orientation
    //! is most-significant-bit first; routines that read or write the reversed orientation say
    //! so in their name.

    /// Converts an integer into a bit sequence of the given width, most-significant bit first.
    #[inline]
    pub fn from_int(value: u64, width: usize) -> Vec<u8> {
        (0..width).rev().map(|i| ((value >> i) & 1) as u8).collect()
    }

    /// Converts an integer into a bit sequence of the given width, least-significant bit first.
    /// This is the polynomial coefficient orientation: index `i` is the coefficient of `x^i`.
    #[inline]
    pub fn from_int_lsb(value: u64, width: usize) -> Vec<u8> {
        (0..width).map(|i| ((value >> i) & 1) as u8).collect()
    }

    /// Reads a bit sequence, most-significant bit first, back into an integer.
    #[inline]
    pub fn to_int(bits: &[u8]) -> u64 {
        bits.iter().fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    /// Reads a bit sequence, least-significant bit first, back into an integer.
    #[inline]
    pub fn to_int_lsb(bits: &[u8]) -> u64 {
        bits.iter().rev().fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    /// Elementwise XOR of two equal-length bit sequences.
    #[inline]
    pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(&x, &y)| x ^ y).collect()
    }

    /// Elementwise AND of two equal-length bit sequences.
    #[inline]
    pub fn and(a: &[u8], b: &[u8]) -> Vec<u8> {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(&x, &y)| x & y).collect()
    }

    /// Inner product of two equal-length bit sequences, modulo 2.
    #[inline]
    pub fn dot(a: &[u8], b: &[u8]) -> u8 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).fold(0, |acc, (&x, &y)| acc ^ (x & y))
    }

    /// The Hamming weight of a bit sequence.
    #[inline]
    pub fn weight(bits: &[u8]) -> usize {
        bits.iter().filter(|&&bit| bit == 1).count()
    }

    /// Zero-extends a bit sequence on the most-significant side to exactly `width` bits.
    /// Sequences already at (or beyond) `width` are returned unchanged.
    pub fn left_pad(bits: &[u8], width: usize) -> Vec<u8> {
        if bits.len() >= width {
            return bits.to_vec();
        }
        let mut out = vec![0; width - bits.len()];
        out.extend_from_slice(bits);
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn verify_int_conversions() {
            assert_eq!(from_int(0xB, 4), vec![1, 0, 1, 1]);
            assert_eq!(from_int(0xB, 6), vec![0, 0, 1, 0, 1, 1]);
            assert_eq!(from_int_lsb(0xB, 4), vec![1, 1, 0, 1]);

            assert_eq!(to_int(&[1, 0, 1, 1]), 0xB);
            assert_eq!(to_int_lsb(&[1, 1, 0, 1]), 0xB);

            // Conversion pairs are inverses of each other.
            for value in 0..64 {
                assert_eq!(to_int(&from_int(value, 8)), value);
                assert_eq!(to_int_lsb(&from_int_lsb(value, 8)), value);
            }
        }

        #[test]
        fn verify_vector_operations() {
            assert_eq!(xor(&[1, 0, 1, 0], &[1, 1, 0, 0]), vec![0, 1, 1, 0]);
            assert_eq!(and(&[1, 0, 1, 0], &[1, 1, 0, 0]), vec![1, 0, 0, 0]);
            assert_eq!(dot(&[1, 0, 1, 0], &[1, 1, 0, 0]), 1);
            assert_eq!(dot(&[1, 0, 1, 0], &[1, 1, 1, 0]), 0);
            assert_eq!(weight(&[1, 0, 1, 1, 0]), 3);
        }

        #[test]
        fn verify_left_pad() {
            assert_eq!(left_pad(&[1, 1], 4), vec![0, 0, 1, 1]);
            assert_eq!(left_pad(&[1, 0, 1, 1], 4), vec![1, 0, 1, 1]);
            assert_eq!(left_pad(&[], 3), vec![0, 0, 0]);
        }
    }
}
