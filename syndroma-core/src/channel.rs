// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `channel` module simulates the transfer of packages through a noisy channel: a coder
//! (optionally cascaded under an outer coder), an optional interleaver, and a parameterised
//! noise source, with every transfer classified by its outcome.

use std::fmt::Write as _;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::coders::Coder;
use crate::errors::{parameter_error, Error, Result};
use crate::interleave::Interleaver;
use crate::noise::{self, NoiseKind};

/// Classification of a single transfer through the channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TransferStatus {
    /// The codeword arrived untouched.
    Clean,
    /// Noise corrupted the codeword and the coder repaired every flip.
    CorruptedRepaired,
    /// The decoder reported the word as beyond its correction power.
    Uncorrectable,
    /// The decoded payload differs from the input and the decoder did not notice.
    SilentError,
}

impl TransferStatus {
    /// Numeric status code, matching the persisted representation.
    pub fn code(&self) -> u8 {
        match *self {
            TransferStatus::Clean => 0,
            TransferStatus::CorruptedRepaired => 1,
            TransferStatus::Uncorrectable => 2,
            TransferStatus::SilentError => 3,
        }
    }
}

/// Per-trial accounting for one transfer.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct TransferCase {
    pub status: TransferStatus,
    /// Payload bits that arrived with their original value.
    pub count_correct_bits: usize,
    /// Payload bits that arrived inverted.
    pub count_incorrect_bits: usize,
    /// Channel flips the coder demonstrably undid.
    pub count_repair_bits: usize,
    /// Bits the noise source flipped in the codeword.
    pub count_changed_bits: usize,
}

/// Accumulated outcome counts over repeated transfers.
#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct TransferTally {
    pub count_clean: usize,
    pub count_repaired: usize,
    pub count_uncorrectable: usize,
    pub count_silent: usize,
}

impl TransferTally {
    pub fn record(&mut self, status: TransferStatus) {
        match status {
            TransferStatus::Clean => self.count_clean += 1,
            TransferStatus::CorruptedRepaired => self.count_repaired += 1,
            TransferStatus::Uncorrectable => self.count_uncorrectable += 1,
            TransferStatus::SilentError => self.count_silent += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.count_clean + self.count_repaired + self.count_uncorrectable + self.count_silent
    }
}

/// A simulated noisy channel.
///
/// The channel borrows its coders and interleaver for the duration of a test run; it owns only
/// its noise parameterisation, outcome log, and random state. Each transfer derives an
/// independent random stream from the master seed and a transfer counter, so repeated transfers
/// are statistically independent yet reproducible.
pub struct Channel<'a> {
    coder: &'a dyn Coder,
    outer: Option<&'a dyn Coder>,
    interleaver: Option<&'a Interleaver>,
    noise_probability: f64,
    noise: NoiseKind,
    count_cyclical: usize,
    duplex: bool,
    information: String,
    seed: u64,
    transfers: u64,
}

impl<'a> Channel<'a> {
    /// Creates a channel around `coder` with the given noise probability in percent. The
    /// probability must lie in `[0, 100]`.
    pub fn new(coder: &'a dyn Coder, noise_probability: f64, noise: NoiseKind) -> Result<Channel<'a>> {
        if !(0.0..=100.0).contains(&noise_probability) {
            return parameter_error("core (channel): noise probability must lie in [0, 100]");
        }

        debug!("creating channel with noise probability {:.2}%", noise_probability);

        Ok(Channel {
            coder,
            outer: None,
            interleaver: None,
            noise_probability,
            noise,
            count_cyclical: 1,
            duplex: false,
            information: String::new(),
            seed: 0,
            transfers: 0,
        })
    }

    /// Cascades `outer` around the channel's coder: payloads pass through `outer` before the
    /// inner coder, and the inner coder decodes first on the way back.
    pub fn with_outer(mut self, outer: &'a dyn Coder) -> Channel<'a> {
        self.outer = Some(outer);
        self
    }

    pub fn with_interleaver(mut self, interleaver: &'a Interleaver) -> Channel<'a> {
        self.interleaver = Some(interleaver);
        self
    }

    /// The number of attempts a repeated `transfer` performs. At least one.
    pub fn with_count_cyclical(mut self, count: usize) -> Channel<'a> {
        self.count_cyclical = count.max(1);
        self
    }

    pub fn with_duplex(mut self, duplex: bool) -> Channel<'a> {
        self.duplex = duplex;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Channel<'a> {
        self.seed = seed;
        self
    }

    pub fn is_duplex(&self) -> bool {
        self.duplex
    }

    /// The textual log of the most recent repeated transfer.
    pub fn last_transfer_log(&self) -> &str {
        &self.information
    }

    /// Performs one transfer: normalize, encode, interleave, corrupt, deinterleave, decode,
    /// compare. Coding failures are classified, never propagated; only configuration errors
    /// (mis-sized words, incompatible cascade geometry) surface as `Err`.
    pub fn transfer_one_step(&mut self, information: &[u8]) -> Result<TransferCase> {
        let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(self.transfers));
        self.transfers += 1;

        let reference = match self.outer {
            Some(outer) => outer.try_normalize(information)?,
            None => self.coder.try_normalize(information)?,
        };

        let mut word = match self.outer {
            Some(outer) => self.coder.encode(&outer.encode(&reference)?)?,
            None => self.coder.encode(&reference)?,
        };

        if let Some(interleaver) = self.interleaver {
            word = interleaver.shuffle(&word)?;
        }

        let flipped = match self.noise {
            NoiseKind::Single => noise::single(&mut word, self.noise_probability, &mut rng),
            NoiseKind::Block { length, period } => {
                noise::block(&mut word, self.noise_probability, length, period, &mut rng)
            }
        };

        if let Some(interleaver) = self.interleaver {
            word = interleaver.reestablish(&word)?;
        }

        let length = reference.len();
        let case = match self.decode_word(&word) {
            Ok(decoded) if decoded == reference => {
                if flipped == 0 {
                    TransferCase {
                        status: TransferStatus::Clean,
                        count_correct_bits: length,
                        count_incorrect_bits: 0,
                        count_repair_bits: 0,
                        count_changed_bits: 0,
                    }
                }
                else {
                    debug!("package corrupted in transit and fully repaired");
                    TransferCase {
                        status: TransferStatus::CorruptedRepaired,
                        count_correct_bits: length,
                        count_incorrect_bits: 0,
                        count_repair_bits: flipped,
                        count_changed_bits: flipped,
                    }
                }
            }
            Ok(decoded) => {
                let correct =
                    decoded.iter().zip(reference.iter()).filter(|(a, b)| a == b).count();

                info!("package corrupted in transit and the corruption went unnoticed");
                TransferCase {
                    status: TransferStatus::SilentError,
                    count_correct_bits: correct,
                    count_incorrect_bits: length - correct,
                    count_repair_bits: 0,
                    count_changed_bits: flipped,
                }
            }
            Err(Error::Parameter(desc)) => return Err(Error::Parameter(desc)),
            Err(_) => {
                info!("package corrupted beyond repair");
                TransferCase {
                    status: TransferStatus::Uncorrectable,
                    count_correct_bits: 0,
                    count_incorrect_bits: length,
                    count_repair_bits: 0,
                    count_changed_bits: flipped,
                }
            }
        };

        Ok(case)
    }

    /// Performs `count_cyclical` independent one-shot transfers, accumulating outcome counts
    /// and a human-readable transcript retrievable via `last_transfer_log`.
    pub fn transfer(&mut self, information: &[u8]) -> Result<TransferTally> {
        let mut tally = TransferTally::default();

        self.information.clear();
        let _ = writeln!(
            self.information,
            "Starting cyclical transfer of package {:?}, {} attempts.",
            information, self.count_cyclical
        );

        for attempt in 0..self.count_cyclical {
            let case = self.transfer_one_step(information)?;
            tally.record(case.status);

            let outcome = match case.status {
                TransferStatus::Clean => "delivered untouched",
                TransferStatus::CorruptedRepaired => "corrupted in transit and fully repaired",
                TransferStatus::Uncorrectable => "corrupted beyond repair",
                TransferStatus::SilentError => {
                    "corrupted in transit and the corruption went unnoticed"
                }
            };
            let _ = writeln!(self.information, "Attempt {}: package {}.", attempt, outcome);
        }

        let _ = writeln!(
            self.information,
            "Cyclical transfer finished: {} of {} attempts delivered intact.",
            tally.count_clean + tally.count_repaired,
            self.count_cyclical
        );

        Ok(tally)
    }

    fn decode_word(&self, word: &[u8]) -> Result<Vec<u8>> {
        let inner = self.coder.decode(word)?;

        match self.outer {
            Some(outer) => {
                let length = outer.length_total();
                if inner.len() < length {
                    return parameter_error(
                        "core (channel): inner decode output shorter than the outer codeword",
                    );
                }
                // The inner coder zero-extends on the most-significant side; only the trailing
                // bits carry the outer codeword.
                outer.decode(&inner[inner.len() - length..])
            }
            None => Ok(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::PassthroughCoder;

    #[test]
    fn verify_probability_bounds() {
        let coder = PassthroughCoder::with_length(8);

        assert!(Channel::new(&coder, -1.0, NoiseKind::Single).is_err());
        assert!(Channel::new(&coder, 100.5, NoiseKind::Single).is_err());
        assert!(Channel::new(&coder, 100.0, NoiseKind::Single).is_ok());
    }

    #[test]
    fn verify_clean_transfer() {
        let coder = PassthroughCoder::with_length(8);
        let mut channel = Channel::new(&coder, 0.0, NoiseKind::Single).unwrap();

        let case = channel.transfer_one_step(&[1, 0, 1, 1]).unwrap();
        assert_eq!(case.status, TransferStatus::Clean);
        assert_eq!(case.count_correct_bits, 8);
        assert_eq!(case.count_changed_bits, 0);
    }

    #[test]
    fn verify_silent_error_without_redundancy() {
        // A rate-1 coder cannot repair anything, so any flip must surface as a silent error.
        let coder = PassthroughCoder::with_length(8);
        let mut channel = Channel::new(&coder, 100.0, NoiseKind::Single).unwrap().with_seed(11);

        let case = channel.transfer_one_step(&[1, 0, 1, 1, 0, 0, 1, 0]).unwrap();
        assert_eq!(case.status, TransferStatus::SilentError);
        assert_eq!(case.count_changed_bits, 8);
        assert_eq!(case.count_correct_bits, 0);
        assert_eq!(case.count_incorrect_bits, 8);
    }

    #[test]
    fn verify_interleaver_round_trip_is_transparent() {
        let coder = PassthroughCoder::with_length(16);
        let interleaver = Interleaver::new(16, 3);

        let mut channel = Channel::new(&coder, 0.0, NoiseKind::Single)
            .unwrap()
            .with_interleaver(&interleaver);

        let case = channel.transfer_one_step(&[1, 1, 0, 1]).unwrap();
        assert_eq!(case.status, TransferStatus::Clean);
    }

    #[test]
    fn verify_interleaver_length_mismatch() {
        let coder = PassthroughCoder::with_length(8);
        let interleaver = Interleaver::new(12, 3);

        let mut channel = Channel::new(&coder, 0.0, NoiseKind::Single)
            .unwrap()
            .with_interleaver(&interleaver);

        assert!(channel.transfer_one_step(&[1, 1, 0, 1]).is_err());
    }

    #[test]
    fn verify_repeated_transfer_tally_and_log() {
        let coder = PassthroughCoder::with_length(8);
        let mut channel = Channel::new(&coder, 0.0, NoiseKind::Single)
            .unwrap()
            .with_count_cyclical(10);

        let tally = channel.transfer(&[1, 0, 1]).unwrap();
        assert_eq!(tally.count_clean, 10);
        assert_eq!(tally.total(), 10);
        assert!(channel.last_transfer_log().contains("10 of 10 attempts delivered intact"));
    }

    #[test]
    fn verify_status_codes() {
        assert_eq!(TransferStatus::Clean.code(), 0);
        assert_eq!(TransferStatus::CorruptedRepaired.code(), 1);
        assert_eq!(TransferStatus::Uncorrectable.code(), 2);
        assert_eq!(TransferStatus::SilentError.code(), 3);
    }
}
