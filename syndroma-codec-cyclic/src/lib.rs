// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A cyclic coder over GF(2).
//!
//! Codewords are multiples of a binary generator polynomial `g(x)` of degree `r`. Encoding
//! appends the remainder of `x^r · m(x)` divided by `g(x)` ahead of the payload, so every valid
//! codeword divides evenly by the generator; decoding computes the polynomial remainder of the
//! received word as a syndrome and flips the syndrome's non-zero positions back into the word
//! until the syndrome clears.
//!
//! Bit sequences handled by this coder are in ascending coefficient order: index `i` holds the
//! coefficient of `x^i`.

use log::debug;

use syndroma_core::coders::{
    Coder, CoderDescriptor, CoderParameters, CoderRecord, CODER_TYPE_CYCLIC,
};
use syndroma_core::errors::{parameter_error, Result};
use syndroma_core::support_coder;
use syndroma_core::util::bits;

pub struct CyclicCoder {
    length_information: usize,
    length_additional: usize,
    /// Generator coefficients in ascending order. The last entry is always 1.
    generator: Vec<u8>,
}

impl CyclicCoder {
    /// Remainder of the division of `dividend` by the generator in GF(2): the generator is
    /// XOR-ed into the working buffer at every set coefficient of degree >= r, leaving the `r`
    /// low-order coefficients.
    fn remainder(&self, dividend: &[u8]) -> Vec<u8> {
        let degree = self.length_additional;
        let mut work = dividend.to_vec();

        for i in (degree..work.len()).rev() {
            if work[i] == 1 {
                for (j, &coefficient) in self.generator.iter().enumerate() {
                    work[i - degree + j] ^= coefficient;
                }
            }
        }

        work.truncate(degree);
        work
    }
}

impl Coder for CyclicCoder {
    fn try_new(params: &CoderParameters) -> Result<CyclicCoder> {
        let length_information = match params.length_information {
            Some(length) if length >= 1 => length,
            _ => return parameter_error("cyclic: a positive information length is required"),
        };

        // Degree >= 1 keeps the leading coefficient at 1 by construction.
        let polynomial = match params.polynomial {
            Some(polynomial) if polynomial >= 2 => polynomial,
            _ => return parameter_error("cyclic: a generator polynomial of degree >= 1 is required"),
        };

        let degree = (63 - polynomial.leading_zeros()) as usize;
        let generator = bits::from_int_lsb(polynomial, degree + 1);

        debug!(
            "creating cyclic coder: k={}, r={}, generator={:?}",
            length_information, degree, generator
        );

        Ok(CyclicCoder { length_information, length_additional: degree, generator })
    }

    fn supported_coders() -> &'static [CoderDescriptor] {
        &[support_coder!(CODER_TYPE_CYCLIC, "cyclical", "Cyclic (generator polynomial)")]
    }

    fn length_information(&self) -> usize {
        self.length_information
    }

    fn length_additional(&self) -> usize {
        self.length_additional
    }

    fn encode(&self, information: &[u8]) -> Result<Vec<u8>> {
        let information = self.try_normalize(information)?;

        // x^r · m(x) in ascending coefficient order.
        let mut dividend = vec![0u8; self.length_additional];
        dividend.extend_from_slice(&information);

        let mut word = self.remainder(&dividend);
        word.extend_from_slice(&information);
        Ok(word)
    }

    fn decode(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.length_total() {
            return parameter_error("cyclic: received word length does not match the code");
        }

        let mut work = word.to_vec();

        for _ in 0..self.length_additional {
            let syndrome = self.remainder(&work);
            if bits::weight(&syndrome) == 0 {
                break;
            }

            for (position, &bit) in syndrome.iter().enumerate() {
                if bit == 1 {
                    work[position] ^= 1;
                }
            }
        }

        Ok(work[self.length_additional..].to_vec())
    }

    fn describe(&self) -> CoderRecord {
        CoderRecord {
            name: "Cyclic",
            length_information: self.length_information,
            length_additional: self.length_additional,
            length_total: self.length_total(),
            speed: self.speed(),
            polynomial: Some(self.generator.clone()),
            matrix_of_generating: None,
        }
    }
}
