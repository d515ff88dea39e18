// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A Luby-Transform rateless fountain coder.
//!
//! The payload is split into `b` source blocks of `s` bits each. At construction a seeded
//! generator draws `c` distinct non-zero masks over the source blocks; encoding XORs together
//! the source blocks each mask selects, emitting `c` coding blocks. Decoding is symbol-level
//! elimination over (value, mask) pairs: whenever two coding blocks cover index sets that
//! differ by exactly one source block, that block is exposed and substituted into every other
//! coding block that references it.

use std::collections::HashSet;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use syndroma_core::coders::{
    Coder, CoderDescriptor, CoderParameters, CoderRecord, CODER_TYPE_FOUNTAIN,
};
use syndroma_core::errors::{parameter_error, uncorrectable_error, Result};
use syndroma_core::support_coder;
use syndroma_core::util::bits;

/// Mask generation seed used when the caller does not provide one.
const DEFAULT_SEED: u64 = 0x5EED;

pub struct FountainCoder {
    length_information: usize,
    length_additional: usize,
    block_size: usize,
    count_blocks: usize,
    /// One mask per coding block; bit `i` selects source block `i`.
    generation_blocks: Vec<u64>,
}

impl FountainCoder {
    /// The masks describing which source blocks feed each coding block. Persisted alongside
    /// the coder so a stored test run can be reproduced.
    pub fn generation_blocks(&self) -> &[u64] {
        &self.generation_blocks
    }
}

impl Coder for FountainCoder {
    fn try_new(params: &CoderParameters) -> Result<FountainCoder> {
        let length_information = match params.length_information {
            Some(length) if length >= 1 => length,
            _ => return parameter_error("fountain: a positive information length is required"),
        };

        let block_size = match params.block_size {
            Some(size) if (1..=64).contains(&size) => size,
            _ => return parameter_error("fountain: block size must lie in 1..=64"),
        };

        let count_coding_blocks = match params.count_coding_blocks {
            Some(count) if count >= 1 => count,
            _ => return parameter_error("fountain: a positive coding block count is required"),
        };

        let count_blocks = (length_information + block_size - 1) / block_size;
        if count_blocks > 63 {
            return parameter_error("fountain: too many source blocks for the mask width");
        }

        // Solvability demands at least one coding block per source block, and distinctness
        // caps the draw at the number of non-zero masks.
        if count_coding_blocks * block_size < length_information {
            return parameter_error("fountain: coding blocks do not cover the information length");
        }
        if count_coding_blocks > (1usize << count_blocks) - 1 {
            return parameter_error("fountain: more coding blocks than distinct non-zero masks");
        }

        let full = (1u64 << count_blocks) - 1;
        let mut rng = SmallRng::seed_from_u64(params.seed.unwrap_or(DEFAULT_SEED));

        let mut draw: HashSet<u64> = HashSet::new();
        while draw.len() < count_coding_blocks {
            draw.insert(rng.gen_range(1..=full));
        }

        let mut generation_blocks: Vec<u64> = draw.into_iter().collect();
        generation_blocks.sort_unstable();

        debug!(
            "creating fountain coder: k={}, s={}, b={}, c={}",
            length_information, block_size, count_blocks, count_coding_blocks
        );

        Ok(FountainCoder {
            length_information,
            length_additional: count_coding_blocks * block_size - length_information,
            block_size,
            count_blocks,
            generation_blocks,
        })
    }

    fn supported_coders() -> &'static [CoderDescriptor] {
        &[support_coder!(CODER_TYPE_FOUNTAIN, "fountain", "Fountain (Luby transform)")]
    }

    fn length_information(&self) -> usize {
        self.length_information
    }

    fn length_additional(&self) -> usize {
        self.length_additional
    }

    fn encode(&self, information: &[u8]) -> Result<Vec<u8>> {
        let information = self.try_normalize(information)?;

        // Pad on the most-significant side until every source block holds exactly `s` bits.
        let padded = bits::left_pad(&information, self.count_blocks * self.block_size);
        let source: Vec<u64> = padded.chunks(self.block_size).map(bits::to_int).collect();

        let mut word = Vec::with_capacity(self.length_total());
        for &mask in &self.generation_blocks {
            let mut value = 0;
            for (index, &block) in source.iter().enumerate() {
                if (mask >> index) & 1 == 1 {
                    value ^= block;
                }
            }
            word.extend_from_slice(&bits::from_int(value, self.block_size));
        }

        Ok(word)
    }

    fn decode(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.length_total() {
            return parameter_error("fountain: received word length does not match the code");
        }

        let mut masks = self.generation_blocks.clone();
        let mut values: Vec<u64> = word.chunks(self.block_size).map(bits::to_int).collect();

        // The empty sentinel block exposes degree-one coding blocks to the same pair rule as
        // every other elimination step.
        masks.push(0);
        values.push(0);

        let mut solved: Vec<Option<u64>> = vec![None; self.count_blocks];
        let mut remaining = self.count_blocks;

        while remaining > 0 {
            let mut progressed = false;

            'scan: for i in 0..masks.len() {
                for j in 0..masks.len() {
                    let difference = masks[i] & !masks[j];
                    if masks[j] & !masks[i] == 0 && difference.count_ones() == 1 {
                        let index = difference.trailing_zeros() as usize;
                        let value = values[i] ^ values[j];

                        solved[index] = Some(value);
                        remaining -= 1;

                        // Substitute the solved block into everything that references it.
                        for z in 0..masks.len() {
                            if masks[z] & difference != 0 {
                                values[z] ^= value;
                                masks[z] &= !difference;
                            }
                        }

                        progressed = true;
                        break 'scan;
                    }
                }
            }

            if !progressed {
                debug!("elimination stalled with {} unsolved source blocks", remaining);
                return uncorrectable_error(
                    "fountain: insufficient independent blocks to recover the source",
                );
            }
        }

        let mut out = Vec::with_capacity(self.count_blocks * self.block_size);
        for value in solved {
            out.extend_from_slice(&bits::from_int(value.unwrap_or(0), self.block_size));
        }

        // Drop the pad bits the encoder prepended to fill the first block.
        Ok(out.split_off(out.len() - self.length_information))
    }

    fn describe(&self) -> CoderRecord {
        CoderRecord {
            name: "Fountain",
            length_information: self.length_information,
            length_additional: self.length_additional,
            length_total: self.length_total(),
            speed: self.speed(),
            polynomial: None,
            matrix_of_generating: None,
        }
    }
}
