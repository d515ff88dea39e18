// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test-only support types shared by the unit tests of this crate.

use crate::coders::{Coder, CoderDescriptor, CoderParameters, CoderRecord, CODER_TYPE_NULL};
use crate::errors::{parameter_error, Result};
use crate::support_coder;

/// A rate-1 coder that emits its normalized payload unchanged and decodes by copying. It has no
/// correction power at all, which makes channel outcomes fully predictable in tests.
pub(crate) struct PassthroughCoder {
    length_information: usize,
}

impl PassthroughCoder {
    pub(crate) fn with_length(length_information: usize) -> PassthroughCoder {
        PassthroughCoder { length_information }
    }
}

impl Coder for PassthroughCoder {
    fn try_new(params: &CoderParameters) -> Result<PassthroughCoder> {
        match params.length_information {
            Some(length) if length >= 1 => Ok(PassthroughCoder { length_information: length }),
            _ => parameter_error("passthrough: a positive information length is required"),
        }
    }

    fn supported_coders() -> &'static [CoderDescriptor] {
        &[support_coder!(CODER_TYPE_NULL, "passthrough", "Identity (no redundancy)")]
    }

    fn length_information(&self) -> usize {
        self.length_information
    }

    fn length_additional(&self) -> usize {
        0
    }

    fn encode(&self, information: &[u8]) -> Result<Vec<u8>> {
        self.try_normalize(information)
    }

    fn decode(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.length_total() {
            return parameter_error("passthrough: received word length does not match the code");
        }
        Ok(word.to_vec())
    }

    fn describe(&self) -> CoderRecord {
        CoderRecord {
            name: "Identity",
            length_information: self.length_information,
            length_additional: 0,
            length_total: self.length_information,
            speed: 1.0,
            polynomial: None,
            matrix_of_generating: None,
        }
    }
}
