// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A Hamming single-error-correcting coder.
//!
//! The parity-check matrix `H` has one row per codeword position; row `i` is the binary
//! representation of `i + 1`, least-significant bit first. Parity bits occupy the positions
//! whose 1-based index is a power of two, so the syndrome of a received word, read as an
//! integer, names the 1-based position of a single flipped bit.

use log::{debug, warn};

use syndroma_core::coders::{
    Coder, CoderDescriptor, CoderParameters, CoderRecord, CODER_TYPE_HAMMING,
};
use syndroma_core::errors::{parameter_error, Result};
use syndroma_core::support_coder;
use syndroma_core::util::bits;

pub struct HammingCoder {
    length_information: usize,
    length_additional: usize,
    /// Parity-check matrix: one length-`r` row (least-significant bit first) per position.
    matrix: Vec<Vec<u8>>,
}

fn is_parity_position(position: usize) -> bool {
    (position + 1).is_power_of_two()
}

impl HammingCoder {
    /// The parity-check result of `word`, read least-significant column first into an integer.
    /// Zero exactly when `word` is a valid codeword.
    fn syndrome(&self, word: &[u8]) -> usize {
        let mut value = 0;

        for column in 0..self.length_additional {
            let mut parity = 0;
            for (position, &bit) in word.iter().enumerate() {
                parity ^= bit & self.matrix[position][column];
            }
            value |= usize::from(parity) << column;
        }

        value
    }

    /// The data bits of `word`, skipping the parity positions.
    fn extract(&self, word: &[u8]) -> Vec<u8> {
        word.iter()
            .enumerate()
            .filter(|(position, _)| !is_parity_position(*position))
            .map(|(_, &bit)| bit)
            .collect()
    }
}

impl Coder for HammingCoder {
    fn try_new(params: &CoderParameters) -> Result<HammingCoder> {
        let length_information = match params.length_information {
            Some(length) if length >= 1 => length,
            _ => return parameter_error("hamming: a positive information length is required"),
        };

        // The smallest redundancy that still names every codeword position.
        let mut length_additional = 1;
        while (1usize << length_additional) - length_additional - 1 < length_information {
            length_additional += 1;
        }

        let length_total = length_information + length_additional;
        let matrix = (0..length_total)
            .map(|position| bits::from_int_lsb((position + 1) as u64, length_additional))
            .collect();

        debug!(
            "creating hamming coder: k={}, r={}, n={}",
            length_information, length_additional, length_total
        );

        Ok(HammingCoder { length_information, length_additional, matrix })
    }

    fn supported_coders() -> &'static [CoderDescriptor] {
        &[support_coder!(CODER_TYPE_HAMMING, "hamming", "Hamming (single error correcting)")]
    }

    fn length_information(&self) -> usize {
        self.length_information
    }

    fn length_additional(&self) -> usize {
        self.length_additional
    }

    fn encode(&self, information: &[u8]) -> Result<Vec<u8>> {
        let information = self.try_normalize(information)?;
        let length_total = self.length_total();

        let mut word = vec![0u8; length_total];
        let data_positions =
            (0..length_total).filter(|&position| !is_parity_position(position));
        for (position, &bit) in data_positions.zip(information.iter()) {
            word[position] = bit;
        }

        // With the parity positions still zero the syndrome is exactly the parity vector; each
        // parity row is a unit vector, so writing it back cancels the syndrome to zero.
        let parity = self.syndrome(&word);
        for column in 0..self.length_additional {
            word[(1 << column) - 1] = ((parity >> column) & 1) as u8;
        }

        Ok(word)
    }

    fn decode(&self, word: &[u8]) -> Result<Vec<u8>> {
        if word.len() != self.length_total() {
            return parameter_error("hamming: received word length does not match the code");
        }

        let syndrome = self.syndrome(word);
        if syndrome == 0 {
            return Ok(self.extract(word));
        }

        if syndrome - 1 < word.len() {
            let mut work = word.to_vec();
            work[syndrome - 1] ^= 1;

            if self.syndrome(&work) == 0 {
                debug!("repaired a single flip at position {}", syndrome - 1);
                return Ok(self.extract(&work));
            }
        }

        // More than one flip: detectable, but past the correction power of the code. Hand back
        // the received data bits rather than a speculative repair.
        warn!("multi-bit corruption detected but beyond repair");
        Ok(self.extract(word))
    }

    fn describe(&self) -> CoderRecord {
        CoderRecord {
            name: "Hamming",
            length_information: self.length_information,
            length_additional: self.length_additional,
            length_total: self.length_total(),
            speed: self.speed(),
            polynomial: None,
            matrix_of_generating: Some(self.matrix.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syndroma_core::channel::{Channel, TransferStatus};
    use syndroma_core::noise::NoiseKind;
    use syndroma_core::util::bits;

    fn make(length: usize) -> HammingCoder {
        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_HAMMING).with_length_information(length);
        HammingCoder::try_new(&params).unwrap()
    }

    #[test]
    fn verify_minimal_redundancy() {
        assert_eq!(make(1).length_additional(), 2);
        assert_eq!(make(4).length_additional(), 3);
        assert_eq!(make(4).length_total(), 7);
        assert_eq!(make(11).length_additional(), 4);
        assert_eq!(make(12).length_additional(), 5);
    }

    #[test]
    fn verify_codewords_have_zero_syndrome() {
        let coder = make(4);

        for value in 0..16u64 {
            let word = coder.encode(&bits::from_int(value, 4)).unwrap();
            assert_eq!(word.len(), 7);
            assert_eq!(coder.syndrome(&word), 0);
        }
    }

    #[test]
    fn verify_round_trip() {
        let coder = make(4);

        for value in 0..16u64 {
            let payload = bits::from_int(value, 4);
            assert_eq!(coder.decode(&coder.encode(&payload).unwrap()).unwrap(), payload);
        }

        // Short payloads come back zero-extended.
        assert_eq!(
            coder.decode(&coder.encode(&[1, 1]).unwrap()).unwrap(),
            vec![0, 0, 1, 1]
        );
    }

    #[test]
    fn verify_every_single_flip_is_corrected() {
        let coder = make(4);

        for value in 0..16u64 {
            let payload = bits::from_int(value, 4);
            for position in 0..coder.length_total() {
                let mut word = coder.encode(&payload).unwrap();
                word[position] ^= 1;
                assert_eq!(coder.decode(&word).unwrap(), payload);
            }
        }
    }

    #[test]
    fn verify_flipped_data_bit_is_repaired() {
        let coder = make(4);

        let mut word = coder.encode(&[1, 1, 0, 1]).unwrap();
        word[2] ^= 1;
        assert_eq!(coder.decode(&word).unwrap(), vec![1, 1, 0, 1]);
    }

    #[test]
    fn verify_double_flip_decodes_without_error() {
        // Two flips exceed the correction power; the decode must still complete so the channel
        // can classify the outcome, and the payload comes back damaged.
        let coder = make(4);

        let mut word = coder.encode(&[1, 0, 1, 1]).unwrap();
        word[2] ^= 1;
        word[5] ^= 1;
        assert_ne!(coder.decode(&word).unwrap(), vec![1, 0, 1, 1]);
    }

    #[test]
    fn verify_detected_multi_flip_returns_received_data() {
        // In the shortened code (k=5, n=9) flips at positions 5 and 8 leave the syndrome
        // 6 XOR 9 = 15, which names a position past the end of the word: detectable, but not
        // repairable, so the received data bits come back untouched.
        let coder = make(5);

        let mut word = coder.encode(&[1, 0, 1, 1, 0]).unwrap();
        word[5] ^= 1;
        word[8] ^= 1;

        let decoded = coder.decode(&word).unwrap();
        assert_eq!(decoded, coder.extract(&word));
        assert_ne!(decoded, vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn verify_decode_rejects_wrong_length(){
        let coder = make(4);
        assert!(coder.decode(&[1, 0, 1]).is_err());
    }

    #[test]
    fn verify_describe() {
        let record = make(4).describe();
        assert_eq!(record.name, "Hamming");
        assert_eq!(record.length_total, 7);

        let matrix = record.matrix_of_generating.unwrap();
        assert_eq!(matrix.len(), 7);
        // Row i is the binary representation of i + 1, least-significant bit first.
        assert_eq!(matrix[0], vec![1, 0, 0]);
        assert_eq!(matrix[6], vec![1, 1, 1]);
    }

    #[test]
    fn verify_noiseless_channel_is_clean() {
        let coder = make(4);
        let mut channel = Channel::new(&coder, 0.0, NoiseKind::Single).unwrap();

        for _ in 0..100 {
            let case = channel.transfer_one_step(&[1, 1, 0, 1]).unwrap();
            assert_eq!(case.status, TransferStatus::Clean);
        }
    }

    #[test]
    fn verify_single_flip_channel_repairs() {
        // At 20% of a 7-bit codeword the channel flips exactly one bit per trial, which this
        // code always repairs.
        let coder = make(4);
        let mut channel = Channel::new(&coder, 20.0, NoiseKind::Single).unwrap().with_seed(7);

        for _ in 0..100 {
            let case = channel.transfer_one_step(&[1, 1, 0, 1]).unwrap();
            assert_eq!(case.status, TransferStatus::CorruptedRepaired);
            assert_eq!(case.count_changed_bits, 1);
            assert_eq!(case.count_repair_bits, 1);
        }
    }

    #[test]
    fn verify_heavy_noise_produces_silent_errors() {
        // At 50% the channel flips three bits of every 7-bit codeword, which exceeds the
        // correction power and regularly slips through undetected.
        let coder = make(4);
        let mut channel = Channel::new(&coder, 50.0, NoiseKind::Single).unwrap().with_seed(13);

        let mut silent = 0;
        for _ in 0..1000 {
            let case = channel.transfer_one_step(&[1, 1, 0, 1]).unwrap();
            if case.status == TransferStatus::SilentError {
                silent += 1;
            }
        }
        assert!(silent > 0);
    }
}
