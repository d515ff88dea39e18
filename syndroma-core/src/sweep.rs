// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `sweep` module drives test cycles over a range of noise levels and collects the outcome
//! records a persistence layer or report generator consumes.

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use serde::Serialize;

use crate::channel::{Channel, TransferStatus};
use crate::coders::{Coder, CoderRecord};
use crate::errors::Result;
use crate::interleave::Interleaver;
use crate::noise::{NoiseKind, NoiseType};

/// Options for a noise-level sweep.
#[derive(Clone, Debug)]
pub struct SweepOptions {
    /// First noise level in percent.
    pub noise_start: f64,
    /// Last noise level in percent.
    pub noise_end: f64,
    /// Number of noise levels visited, spaced evenly from `noise_start` to `noise_end`
    /// inclusive.
    pub steps: usize,
    /// Transfers performed at each noise level.
    pub count_test: usize,
    pub noise: NoiseKind,
    /// The payload transferred in every trial.
    pub information: Vec<u8>,
    /// Interleave the innermost codeword before corruption.
    pub use_interleaver: bool,
    pub seed: u64,
}

impl Default for SweepOptions {
    fn default() -> SweepOptions {
        SweepOptions {
            noise_start: 0.0,
            noise_end: 10.0,
            steps: 20,
            count_test: 100,
            noise: NoiseKind::Single,
            information: Vec::new(),
            use_interleaver: false,
            seed: 0,
        }
    }
}

/// One persisted row per trial.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct CaseResult {
    pub count_correct_bits: usize,
    pub count_incorrect_bits: usize,
    pub count_repair_bits: usize,
    pub count_changed_bits: usize,
}

/// One persisted row per noise level.
#[derive(Clone, Debug, Serialize)]
pub struct TestResult {
    /// Unix timestamp of the sweep, in seconds.
    pub timestamp: u64,
    pub flg_cascade: bool,
    pub first_coder: CoderRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_coder: Option<CoderRecord>,
    pub noise_type: NoiseType,
    /// The noise level of this step, in percent.
    pub noise: f64,
    pub count_clean: usize,
    pub count_repaired: usize,
    pub count_uncorrectable: usize,
    pub count_silent: usize,
    pub cases: Vec<CaseResult>,
}

/// Sweeps the noise level and emits one `TestResult` per step.
///
/// In single mode `second` is `None` and `first` is the only coder. In cascade mode `first` is
/// the outer coder and `second` the inner one: payloads are wrapped by the outer coder first,
/// decoded inner-first, and a single noise injection corrupts the innermost codeword.
pub fn run(
    first: &dyn Coder,
    second: Option<&dyn Coder>,
    opts: &SweepOptions,
) -> Result<Vec<TestResult>> {
    let levels = levels(opts.noise_start, opts.noise_end, opts.steps);
    let inner = second.unwrap_or(first);

    let interleaver = if opts.use_interleaver {
        Some(Interleaver::new(inner.length_total(), opts.seed))
    }
    else {
        None
    };

    let timestamp =
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);

    let mut results = Vec::with_capacity(levels.len());

    for (step, &level) in levels.iter().enumerate() {
        // Disjoint seed windows keep the per-transfer random streams independent across steps.
        let mut channel = Channel::new(inner, level, opts.noise)?
            .with_seed(opts.seed.wrapping_add((step * opts.count_test) as u64));

        if second.is_some() {
            channel = channel.with_outer(first);
        }
        if let Some(interleaver) = &interleaver {
            channel = channel.with_interleaver(interleaver);
        }

        let mut result = TestResult {
            timestamp,
            flg_cascade: second.is_some(),
            first_coder: first.describe(),
            second_coder: second.map(|coder| coder.describe()),
            noise_type: opts.noise.noise_type(),
            noise: level,
            count_clean: 0,
            count_repaired: 0,
            count_uncorrectable: 0,
            count_silent: 0,
            cases: Vec::with_capacity(opts.count_test),
        };

        for _ in 0..opts.count_test {
            let case = channel.transfer_one_step(&opts.information)?;

            match case.status {
                TransferStatus::Clean => result.count_clean += 1,
                TransferStatus::CorruptedRepaired => result.count_repaired += 1,
                TransferStatus::Uncorrectable => result.count_uncorrectable += 1,
                TransferStatus::SilentError => result.count_silent += 1,
            }

            result.cases.push(CaseResult {
                count_correct_bits: case.count_correct_bits,
                count_incorrect_bits: case.count_incorrect_bits,
                count_repair_bits: case.count_repair_bits,
                count_changed_bits: case.count_changed_bits,
            });
        }

        info!(
            "noise {:>6.2}%: {} clean, {} repaired, {} uncorrectable, {} silent",
            level,
            result.count_clean,
            result.count_repaired,
            result.count_uncorrectable,
            result.count_silent
        );

        results.push(result);
    }

    Ok(results)
}

fn levels(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps <= 1 || (end - start).abs() < f64::EPSILON {
        return vec![start];
    }

    let span = (end - start) / (steps - 1) as f64;
    (0..steps).map(|i| start + span * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::PassthroughCoder;

    #[test]
    fn verify_levels_are_inclusive() {
        let levels = levels(0.0, 10.0, 5);
        assert_eq!(levels.len(), 5);
        assert!((levels[0] - 0.0).abs() < f64::EPSILON);
        assert!((levels[4] - 10.0).abs() < f64::EPSILON);

        assert_eq!(super::levels(5.0, 5.0, 20), vec![5.0]);
        assert_eq!(super::levels(1.0, 9.0, 1), vec![1.0]);
    }

    #[test]
    fn verify_sweep_emits_one_record_per_level() {
        let coder = PassthroughCoder::with_length(8);

        let opts = SweepOptions {
            noise_start: 0.0,
            noise_end: 0.0,
            steps: 4,
            count_test: 25,
            information: vec![1, 0, 1, 1],
            ..Default::default()
        };

        let results = run(&coder, None, &opts).unwrap();
        assert_eq!(results.len(), 1);

        let opts = SweepOptions { noise_end: 50.0, ..opts };
        let results = run(&coder, None, &opts).unwrap();
        assert_eq!(results.len(), 4);

        for result in &results {
            assert!(!result.flg_cascade);
            assert_eq!(result.cases.len(), 25);
            assert_eq!(
                result.count_clean
                    + result.count_repaired
                    + result.count_uncorrectable
                    + result.count_silent,
                25
            );
        }

        // The zero-noise level transfers everything untouched.
        assert_eq!(results[0].count_clean, 25);
    }
}
