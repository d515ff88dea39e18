// Syndroma
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! # Project Syndroma
//!
//! Syndroma is a 100% pure Rust forward-error-correction coding and channel simulation
//! framework.
//!
//! # Support
//!
//! Supported coder families are listed below. All families are enabled by default; each can be
//! disabled via its feature flag.
//!
//! | Coder       | Feature Flag | Default |
//! |-------------|--------------|---------|
//! | Cyclic      | `cyclic`     | Yes     |
//! | Fountain    | `fountain`   | Yes     |
//! | Hamming     | `hamming`    | Yes     |
//! | Reed-Muller | `reedmuller` | Yes     |
//!
//! # Usage
//!
//! The following steps describe a basic usage of Syndroma:
//!
//! 1.  Instantiate a [`CoderRegistry`][core::coders::CoderRegistry] and register all the coder
//!     families that are of interest. Alternatively, you may use [`default::get_coders`] to get
//!     the default registry with all the enabled families pre-registered.
//! 2.  Fill a [`CoderParameters`][core::coders::CoderParameters] with the family's parameters
//!     and call the registry's [`make`][core::coders::CoderRegistry::make] function to
//!     instantiate a [`Coder`][core::coders::Coder].
//! 3.  Wrap the coder in a [`Channel`][core::channel::Channel], optionally together with an
//!     [`Interleaver`][core::interleave::Interleaver] and an outer coder for cascade operation.
//! 4.  Transfer payloads with
//!     [`transfer_one_step`][core::channel::Channel::transfer_one_step] and inspect the
//!     returned [`TransferCase`][core::channel::TransferCase], or sweep a whole range of noise
//!     levels with [`sweep::run`][core::sweep::run].
//!
//! # Adding support for new coder families
//!
//! Simply implement the [`Coder`][core::coders::Coder] trait for a coder and register it with
//! the appropriate registry!

pub mod default {
    //! The `default` module provides convenience functions and registries to get an implementer
    //! up-and-running as quickly as possible, and to reduce boiler-plate. Using the `default`
    //! module is completely optional and incurs no overhead unless actually used.

    pub mod coders {
        //! The `coders` module re-exports all enabled Syndroma coders.

        #[cfg(feature = "cyclic")]
        pub use syndroma_codec_cyclic::CyclicCoder;
        #[cfg(feature = "fountain")]
        pub use syndroma_codec_fountain::FountainCoder;
        #[cfg(feature = "hamming")]
        pub use syndroma_codec_hamming::HammingCoder;
        #[cfg(feature = "reedmuller")]
        pub use syndroma_codec_reedmuller::ReedMullerCoder;
    }

    use lazy_static::lazy_static;

    use syndroma_core::coders::CoderRegistry;

    lazy_static! {
        static ref CODER_REGISTRY: CoderRegistry = {
            let mut registry = CoderRegistry::new();
            register_enabled_coders(&mut registry);
            registry
        };
    }

    /// Gets the default `CoderRegistry`. This registry pre-registers all the coder families
    /// selected by the `feature` flags in the includer's `Cargo.toml`. If `features` is not
    /// set, the default set of Syndroma coders is registered.
    ///
    /// This function is lazy and does not instantiate the `CoderRegistry` until the first call
    /// to this function.
    pub fn get_coders() -> &'static CoderRegistry {
        &CODER_REGISTRY
    }

    /// Registers all the coder families selected by the `feature` flags in the includer's
    /// `Cargo.toml` on the provided `CoderRegistry`. If `features` is not set, the default set
    /// of Syndroma coders is registered.
    ///
    /// Use this function to easily populate a custom registry with all enabled coders.
    pub fn register_enabled_coders(registry: &mut CoderRegistry) {
        #[cfg(feature = "cyclic")]
        registry.register_all::<coders::CyclicCoder>();

        #[cfg(feature = "fountain")]
        registry.register_all::<coders::FountainCoder>();

        #[cfg(feature = "hamming")]
        registry.register_all::<coders::HammingCoder>();

        #[cfg(feature = "reedmuller")]
        registry.register_all::<coders::ReedMullerCoder>();
    }
}

pub use syndroma_core as core;

#[cfg(test)]
mod tests {
    use crate::core::coders::{
        CoderParameters, CODER_TYPE_CYCLIC, CODER_TYPE_FOUNTAIN, CODER_TYPE_HAMMING,
        CODER_TYPE_NULL, CODER_TYPE_REED_MULLER,
    };
    use crate::core::noise::NoiseKind;
    use crate::core::sweep::{self, SweepOptions};
    use crate::default;

    #[test]
    fn verify_default_registry_makes_every_family() {
        let registry = default::get_coders();

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_CYCLIC).with_length_information(8).with_polynomial(0xB);
        assert_eq!(registry.make(&params).unwrap().length_total(), 11);

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_HAMMING).with_length_information(4);
        assert_eq!(registry.make(&params).unwrap().length_total(), 7);

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_REED_MULLER).with_dimension(3).with_order(1);
        assert_eq!(registry.make(&params).unwrap().length_total(), 8);

        let mut params = CoderParameters::new();
        params
            .for_coder(CODER_TYPE_FOUNTAIN)
            .with_length_information(12)
            .with_block_size(4)
            .with_count_coding_blocks(7);
        assert_eq!(registry.make(&params).unwrap().length_total(), 28);

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_NULL);
        assert!(registry.make(&params).is_err());
    }

    #[test]
    fn verify_cascade_sweep_has_no_more_silent_errors() {
        let registry = default::get_coders();

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_HAMMING).with_length_information(4);
        let outer = registry.make(&params).unwrap();

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_CYCLIC).with_length_information(7).with_polynomial(0xB);
        let inner = registry.make(&params).unwrap();

        let opts = SweepOptions {
            noise_start: 10.0,
            noise_end: 10.0,
            steps: 1,
            count_test: 500,
            noise: NoiseKind::Single,
            information: vec![1, 1, 0, 1],
            use_interleaver: false,
            seed: 99,
        };

        let cascade = sweep::run(outer.as_ref(), Some(inner.as_ref()), &opts).unwrap();
        let single = sweep::run(outer.as_ref(), None, &opts).unwrap();

        assert_eq!(cascade.len(), 1);
        assert!(cascade[0].flg_cascade);
        assert!(cascade[0].second_coder.is_some());
        assert_eq!(single.len(), 1);

        // Wrapping the Hamming coder around an inner cyclic stage must not let more damage
        // slip through undetected than the Hamming coder alone.
        assert!(cascade[0].count_silent <= single[0].count_silent);
    }

    #[test]
    fn verify_sweep_records_serialize() {
        let registry = default::get_coders();

        let mut params = CoderParameters::new();
        params.for_coder(CODER_TYPE_HAMMING).with_length_information(4);
        let coder = registry.make(&params).unwrap();

        let opts = SweepOptions {
            noise_start: 0.0,
            noise_end: 0.0,
            steps: 1,
            count_test: 3,
            information: vec![1, 0, 1, 1],
            ..Default::default()
        };

        let results = sweep::run(coder.as_ref(), None, &opts).unwrap();
        let json = serde_json::to_string(&results[0]).unwrap();

        assert!(json.contains("\"noise_type\":\"SINGLE\""));
        assert!(json.contains("\"matrix_of_generating\""));
        assert!(json.contains("\"count_clean\":3"));
    }
}
