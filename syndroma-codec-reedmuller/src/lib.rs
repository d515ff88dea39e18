// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A Reed-Muller coder with majority-logic decoding.
//!
//! The code `RM(r, m)` evaluates Boolean polynomials of degree at most `r` in `m` variables
//! over all `2^m` assignments. Generator rows are monomial evaluations: the all-ones row, the
//! coordinate functions `x_1..x_m` (x_1 being the most-significant bit of the column index),
//! and the AND of every variable subset of size 2 through `r`, enumerated by (size, lexical)
//! order.
//!
//! Decoding follows Reed's procedure: working from the highest-degree monomials down, each
//! coefficient is estimated by the parities of the received word against the monomial's
//! characteristic vectors, decided by majority vote, and each degree's contribution is
//! subtracted from the working word before descending. The all-ones coefficient is decided by
//! the residual weight.

use log::debug;

use syndroma_core::coders::{
    Coder, CoderDescriptor, CoderParameters, CoderRecord, CODER_TYPE_REED_MULLER,
};
use syndroma_core::errors::{parameter_error, Result};
use syndroma_core::support_coder;
use syndroma_core::util::bits;

/// Dimensions beyond this produce codewords past any practical package length.
const MAX_DIMENSION: u32 = 16;

pub struct ReedMullerCoder {
    dimension: usize,
    order: usize,
    length_information: usize,
    /// Generator rows, one monomial evaluation per row, in construction order.
    rows: Vec<Vec<u8>>,
    /// The variable subset that produces each generator row.
    subsets: Vec<Vec<usize>>,
    /// Coordinate functions as bit rows over the `2^m` columns.
    coordinates: Vec<Vec<u8>>,
}

/// Lexicographically ordered combinations of `0..m` taken `size` at a time.
fn combinations(m: usize, size: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if size > m {
        return out;
    }

    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        out.push(indices.clone());

        // Advance the rightmost index that has room to move.
        let mut i = size;
        while i > 0 && indices[i - 1] == m - size + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            return out;
        }

        indices[i - 1] += 1;
        for j in i..size {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

impl ReedMullerCoder {
    /// XORs generator row `index` into `word`.
    fn subtract_row(&self, word: &mut [u8], index: usize) {
        for (bit, &row_bit) in word.iter_mut().zip(self.rows[index].iter()) {
            *bit ^= row_bit;
        }
    }

    /// Majority vote over the characteristic vectors of the monomial behind row `index`,
    /// evaluated against `word`. Ties resolve to zero.
    fn vote(&self, word: &[u8], index: usize) -> u8 {
        let free: Vec<usize> =
            (0..self.dimension).filter(|v| !self.subsets[index].contains(v)).collect();
        let total = 1usize << free.len();

        let mut ones = 0;
        for assignment in 0..total {
            // The characteristic vector selects the columns on which every free variable takes
            // the value this assignment dictates.
            let mut characteristic = vec![1u8; word.len()];
            for (bit, &variable) in free.iter().enumerate() {
                let wanted = ((assignment >> bit) & 1) as u8;
                for (c, &coordinate) in
                    characteristic.iter_mut().zip(self.coordinates[variable].iter())
                {
                    *c &= coordinate ^ wanted ^ 1;
                }
            }

            if bits::dot(&characteristic, word) == 1 {
                ones += 1;
            }
        }

        u8::from(2 * ones > total)
    }
}

impl Coder for ReedMullerCoder {
    fn try_new(params: &CoderParameters) -> Result<ReedMullerCoder> {
        let dimension = match params.dimension {
            Some(dimension) if dimension >= 1 && dimension <= MAX_DIMENSION => dimension as usize,
            _ => return parameter_error("reed-muller: dimension must lie in 1..=16"),
        };

        let order = match params.order {
            Some(order) if order as usize <= dimension => order as usize,
            _ => return parameter_error("reed-muller: order must not exceed the dimension"),
        };

        let length_total = 1usize << dimension;

        let coordinates: Vec<Vec<u8>> = (0..dimension)
            .map(|variable| {
                (0..length_total)
                    .map(|column| ((column >> (dimension - 1 - variable)) & 1) as u8)
                    .collect()
            })
            .collect();

        let mut rows = vec![vec![1u8; length_total]];
        let mut subsets = vec![Vec::new()];

        for size in 1..=order {
            for subset in combinations(dimension, size) {
                let mut row = vec![1u8; length_total];
                for &variable in &subset {
                    row = bits::and(&row, &coordinates[variable]);
                }
                rows.push(row);
                subsets.push(subset);
            }
        }

        let length_information = rows.len();

        debug!(
            "creating reed-muller coder: m={}, r={}, k={}, n={}",
            dimension, order, length_information, length_total
        );

        Ok(ReedMullerCoder { dimension, order, length_information, rows, subsets, coordinates })
    }

    fn supported_coders() -> &'static [CoderDescriptor] {
        &[support_coder!(CODER_TYPE_REED_MULLER, "reedmuller", "Reed-Muller (majority logic)")]
    }

    fn length_information(&self) -> usize {
        self.length_information
    }

    fn length_additional(&self) -> usize {
        (1usize << self.dimension) - self.length_information
    }

    fn encode(&self, information: &[u8]) -> Result<Vec<u8>> {
        let information = self.try_normalize(information)?;

        let mut word = vec![0u8; self.length_total()];
        for (index, &bit) in information.iter().enumerate() {
            if bit == 1 {
                self.subtract_row(&mut word, index);
            }
        }

        Ok(word)
    }

    fn decode(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.length_total() {
            return parameter_error("reed-muller: received word length does not match the code");
        }

        let mut work = word.to_vec();
        let mut coefficients = vec![0u8; self.length_information];

        for degree in (1..=self.order).rev() {
            // Every monomial of this degree votes against the same residual; the decided
            // contributions come off together before the next degree down.
            let decided: Vec<(usize, u8)> = self
                .subsets
                .iter()
                .enumerate()
                .filter(|(_, subset)| subset.len() == degree)
                .map(|(index, _)| (index, self.vote(&work, index)))
                .collect();

            for (index, coefficient) in decided {
                coefficients[index] = coefficient;
                if coefficient == 1 {
                    self.subtract_row(&mut work, index);
                }
            }
        }

        coefficients[0] = u8::from(2 * bits::weight(&work) > work.len());

        Ok(coefficients)
    }

    fn describe(&self) -> CoderRecord {
        CoderRecord {
            name: "Reed-Muller",
            length_information: self.length_information,
            length_additional: self.length_additional(),
            length_total: self.length_total(),
            speed: self.speed(),
            polynomial: None,
            matrix_of_generating: None,
        }
    }
}
