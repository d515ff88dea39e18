// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error::Error as StdError;
use std::fmt;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Syndroma.
#[derive(Debug)]
pub enum Error {
    /// The received word exceeded the correction power of the code. Raised inside `decode` and
    /// always recovered by the channel, which maps it to an outcome classification.
    Uncorrectable(&'static str),
    /// A coder, interleaver, or channel was constructed with inconsistent parameters. Fatal;
    /// nothing should be transferred through a misconfigured component.
    Parameter(&'static str),
    /// An unsupported coder or capability was requested.
    Unsupported(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Uncorrectable(msg) => {
                write!(f, "uncorrectable word: {}", msg)
            }
            Error::Parameter(msg) => {
                write!(f, "invalid parameter: {}", msg)
            }
            Error::Unsupported(feature) => {
                write!(f, "unsupported feature: {}", feature)
            }
        }
    }
}

impl StdError for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an uncorrectable-word error.
pub fn uncorrectable_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::Uncorrectable(desc))
}

/// Convenience function to create a parameter error.
pub fn parameter_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::Parameter(desc))
}

/// Convenience function to create an unsupported feature error.
pub fn unsupported_error<T>(feature: &'static str) -> Result<T> {
    Err(Error::Unsupported(feature))
}
