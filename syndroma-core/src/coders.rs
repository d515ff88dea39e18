// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `coders` module provides the traits and support structures necessary to implement
//! forward-error-correction coders.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::errors::{parameter_error, unsupported_error, Result};
use crate::util::bits;

/// A `CoderType` is a unique identifier used to identify a specific coder family. Coders
/// advertising support for a specific `CoderType` should be interchangeable in regards to the
/// parameters they accept and the codeword geometry they produce from them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CoderType(u32);

/// Null coder, does not exist and cannot be instantiated.
pub const CODER_TYPE_NULL: CoderType = CoderType(0x0);

/// Cyclic coder derived from a binary generator polynomial.
pub const CODER_TYPE_CYCLIC: CoderType = CoderType(0x100);
/// Hamming single-error-correcting coder.
pub const CODER_TYPE_HAMMING: CoderType = CoderType(0x101);
/// Reed-Muller majority-logic coder.
pub const CODER_TYPE_REED_MULLER: CoderType = CoderType(0x102);
/// Luby-Transform rateless fountain coder.
pub const CODER_TYPE_FOUNTAIN: CoderType = CoderType(0x103);

impl Default for CoderType {
    fn default() -> Self {
        CODER_TYPE_NULL
    }
}

impl fmt::Display for CoderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Construction parameters may be passed to a coder using the `CoderParameters` structure.
///
/// Every parameter other than the coder type is optional; each coder family validates the
/// subset it requires at construction and rejects inconsistent values.
#[derive(Clone, Debug, Default)]
pub struct CoderParameters {
    /// The coder type.
    pub coder: CoderType,
    /// The number of payload bits consumed per codeword.
    pub length_information: Option<usize>,
    /// Cyclic: the generator polynomial, bit `i` being the coefficient of `x^i`.
    pub polynomial: Option<u64>,
    /// Reed-Muller: the number of Boolean variables `m`.
    pub dimension: Option<u32>,
    /// Reed-Muller: the maximum monomial degree `r`.
    pub order: Option<u32>,
    /// Fountain: the size of one source block in bits.
    pub block_size: Option<usize>,
    /// Fountain: the number of coding blocks emitted per codeword.
    pub count_coding_blocks: Option<usize>,
    /// Seed for coders that derive internal structure from a random source.
    pub seed: Option<u64>,
}

impl CoderParameters {
    pub fn new() -> CoderParameters {
        Default::default()
    }

    /// Provide the `CoderType`.
    pub fn for_coder(&mut self, coder: CoderType) -> &mut Self {
        self.coder = coder;
        self
    }

    /// Provide the information length in bits.
    pub fn with_length_information(&mut self, length: usize) -> &mut Self {
        self.length_information = Some(length);
        self
    }

    /// Provide the generator polynomial.
    pub fn with_polynomial(&mut self, polynomial: u64) -> &mut Self {
        self.polynomial = Some(polynomial);
        self
    }

    /// Provide the Reed-Muller dimension.
    pub fn with_dimension(&mut self, dimension: u32) -> &mut Self {
        self.dimension = Some(dimension);
        self
    }

    /// Provide the Reed-Muller order.
    pub fn with_order(&mut self, order: u32) -> &mut Self {
        self.order = Some(order);
        self
    }

    /// Provide the fountain block size in bits.
    pub fn with_block_size(&mut self, block_size: usize) -> &mut Self {
        self.block_size = Some(block_size);
        self
    }

    /// Provide the number of fountain coding blocks.
    pub fn with_count_coding_blocks(&mut self, count: usize) -> &mut Self {
        self.count_coding_blocks = Some(count);
        self
    }

    /// Provide a seed for randomized construction.
    pub fn with_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }
}

/// A serialisable description of a coder for display or persistence.
#[derive(Clone, Debug, Serialize)]
pub struct CoderRecord {
    /// A human-readable name of the coder family.
    pub name: &'static str,
    /// The number of payload bits consumed per codeword.
    pub length_information: usize,
    /// The number of redundancy bits introduced per codeword.
    pub length_additional: usize,
    /// The emitted codeword length.
    pub length_total: usize,
    /// The code rate, `length_information / length_total`.
    pub speed: f64,
    /// Cyclic only: generator polynomial coefficients, least-significant first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polynomial: Option<Vec<u8>>,
    /// Hamming only: the parity-check matrix, one row per codeword position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix_of_generating: Option<Vec<Vec<u8>>>,
}

/// A `Coder` implements one forward-error-correction code: it stretches payload bits into
/// redundant codewords and recovers payloads from corrupted codewords.
pub trait Coder: Send + Sync {
    /// Attempts to instantiate a `Coder` using the provided `CoderParameters`.
    fn try_new(params: &CoderParameters) -> Result<Self>
    where
        Self: Sized;

    /// Gets a list of coder descriptors for the coder families supported by this `Coder`.
    fn supported_coders() -> &'static [CoderDescriptor]
    where
        Self: Sized;

    /// The number of payload bits consumed per codeword.
    fn length_information(&self) -> usize;

    /// The number of redundancy bits introduced per codeword.
    fn length_additional(&self) -> usize;

    /// The emitted codeword length.
    fn length_total(&self) -> usize {
        self.length_information() + self.length_additional()
    }

    /// The code rate: the share of each codeword that carries payload.
    fn speed(&self) -> f64 {
        self.length_information() as f64 / self.length_total() as f64
    }

    /// The share of each codeword spent on redundancy.
    fn redundancy(&self) -> f64 {
        self.length_additional() as f64 / self.length_total() as f64
    }

    /// Encodes up to `length_information` payload bits into a codeword of `length_total` bits.
    /// Shorter payloads are zero-extended on the most-significant side first.
    fn encode(&self, information: &[u8]) -> Result<Vec<u8>>;

    /// Decodes a received word of `length_total` bits back into `length_information` payload
    /// bits, correcting what the code's power permits. Returns `Error::Uncorrectable` when the
    /// corruption demonstrably exceeds that power.
    fn decode(&self, word: &[u8]) -> Result<Vec<u8>>;

    /// Prepares a payload for encoding or comparison by zero-extending it on the
    /// most-significant side to exactly `length_information` bits.
    fn try_normalize(&self, information: &[u8]) -> Result<Vec<u8>> {
        let length = self.length_information();
        if information.len() > length {
            return parameter_error("core (coder): payload exceeds the information length");
        }
        Ok(bits::left_pad(information, length))
    }

    /// Gets a serialisable description of this coder's parameters.
    fn describe(&self) -> CoderRecord;
}

/// A `CoderDescriptor` stores a description of a single coder family: the `CoderType`, a short
/// name, a long name, and an instantiation function returning a boxed `Coder`.
#[derive(Copy, Clone)]
pub struct CoderDescriptor {
    /// The `CoderType` identifier.
    pub coder: CoderType,
    /// A short ASCII-only string identifying the coder.
    pub short_name: &'static str,
    /// A longer, more descriptive, string identifying the coder.
    pub long_name: &'static str,
    // An instantiation function for the coder.
    pub inst_func: fn(&CoderParameters) -> Result<Box<dyn Coder>>,
}

/// A `CoderRegistry` allows the registration of coders, and provides a method to instantiate a
/// `Coder` given a `CoderParameters` object.
pub struct CoderRegistry {
    coders: HashMap<CoderType, CoderDescriptor>,
}

impl CoderRegistry {
    /// Instantiate a new `CoderRegistry`.
    pub fn new() -> Self {
        CoderRegistry { coders: HashMap::new() }
    }

    /// Gets the `CoderDescriptor` for a registered coder.
    pub fn get_coder(&self, coder: CoderType) -> Option<&CoderDescriptor> {
        self.coders.get(&coder)
    }

    /// Registers all coder families supported by `Coder`. If a supported family was previously
    /// registered by another `Coder` it will be replaced within the registry.
    pub fn register_all<C: Coder>(&mut self) {
        for descriptor in C::supported_coders() {
            self.register(descriptor);
        }
    }

    /// Register a single coder family. If the family was previously registered it will be
    /// replaced within the registry.
    pub fn register(&mut self, descriptor: &CoderDescriptor) {
        self.coders.insert(descriptor.coder, *descriptor);
    }

    /// Searches the registry for a `Coder` that supports the requested coder type. If one is
    /// found, it will be instantiated with the provided `CoderParameters` and returned. If a
    /// `Coder` could not be found, or the `CoderParameters` are either insufficient or invalid
    /// for the `Coder`, an error will be returned.
    pub fn make(&self, params: &CoderParameters) -> Result<Box<dyn Coder>> {
        if let Some(descriptor) = self.coders.get(&params.coder) {
            (descriptor.inst_func)(params)
        }
        else {
            unsupported_error("core (coders): unsupported coder")
        }
    }
}

impl Default for CoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience macro for declaring a `CoderDescriptor`.
#[macro_export]
macro_rules! support_coder {
    ($type:expr, $short_name:expr, $long_name:expr) => {
        CoderDescriptor {
            coder: $type,
            short_name: $short_name,
            long_name: $long_name,
            inst_func: |params| Ok(Box::new(Self::try_new(params)?)),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::PassthroughCoder;

    #[test]
    fn verify_try_normalize() {
        let coder = PassthroughCoder::with_length(4);

        assert_eq!(coder.try_normalize(&[1, 1]).unwrap(), vec![0, 0, 1, 1]);
        assert_eq!(coder.try_normalize(&[1, 0, 1, 1]).unwrap(), vec![1, 0, 1, 1]);
        assert!(coder.try_normalize(&[1, 0, 1, 1, 0]).is_err());
    }

    #[test]
    fn verify_speed_and_redundancy() {
        let coder = PassthroughCoder::with_length(4);

        assert!((coder.speed() + coder.redundancy() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn verify_registry() {
        let mut registry = CoderRegistry::new();
        registry.register_all::<PassthroughCoder>();

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_NULL).with_length_information(6);

        let coder = registry.make(&params).unwrap();
        assert_eq!(coder.length_information(), 6);
        assert_eq!(coder.length_total(), 6);

        params.for_coder(CODER_TYPE_CYCLIC);
        assert!(registry.make(&params).is_err());
    }
}
