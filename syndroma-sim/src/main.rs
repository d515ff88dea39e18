// Syndroma Sim Tool
// Copyright (c) 2025 The Project Syndroma Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use clap::{Arg, ArgMatches, Command};
use log::warn;

use syndroma::core::coders::{
    Coder, CoderParameters, CODER_TYPE_CYCLIC, CODER_TYPE_FOUNTAIN, CODER_TYPE_HAMMING,
    CODER_TYPE_REED_MULLER,
};
use syndroma::core::errors::{parameter_error, Result};
use syndroma::core::noise::NoiseKind;
use syndroma::core::sweep::{self, SweepOptions, TestResult};

/// The per-coder flag names for one cascade position.
struct CoderFlags {
    coder_type: &'static str,
    cyclical_package_length: &'static str,
    cyclical_polynomial: &'static str,
    hamming_package_length: &'static str,
    reedmuller_dimension: &'static str,
    reedmuller_order: &'static str,
    fountain_package_length: &'static str,
    fountain_block_size: &'static str,
    fountain_quantity_block: &'static str,
}

const FIRST_FLAGS: CoderFlags = CoderFlags {
    coder_type: "first_coder_type",
    cyclical_package_length: "first_cyclical_package_length",
    cyclical_polynomial: "first_cyclical_polynomial",
    hamming_package_length: "first_hamming_package_length",
    reedmuller_dimension: "first_reedmuller_dimension",
    reedmuller_order: "first_reedmuller_order",
    fountain_package_length: "first_fountain_package_length",
    fountain_block_size: "first_fountain_block_size",
    fountain_quantity_block: "first_fountain_quantity_block",
};

const SECOND_FLAGS: CoderFlags = CoderFlags {
    coder_type: "second_coder_type",
    cyclical_package_length: "second_cyclical_package_length",
    cyclical_polynomial: "second_cyclical_polynomial",
    hamming_package_length: "second_hamming_package_length",
    reedmuller_dimension: "second_reedmuller_dimension",
    reedmuller_order: "second_reedmuller_order",
    fountain_package_length: "second_fountain_package_length",
    fountain_block_size: "second_fountain_block_size",
    fountain_quantity_block: "second_fountain_quantity_block",
};

fn parse_usize(matches: &ArgMatches, name: &str, desc: &'static str) -> Result<usize> {
    match matches.value_of(name) {
        Some(raw) => raw.parse().or_else(|_| parameter_error(desc)),
        None => parameter_error(desc),
    }
}

fn parse_u32(matches: &ArgMatches, name: &str, desc: &'static str) -> Result<u32> {
    match matches.value_of(name) {
        Some(raw) => raw.parse().or_else(|_| parameter_error(desc)),
        None => parameter_error(desc),
    }
}

fn parse_u64(matches: &ArgMatches, name: &str, desc: &'static str) -> Result<u64> {
    match matches.value_of(name) {
        Some(raw) => raw.parse().or_else(|_| parameter_error(desc)),
        None => parameter_error(desc),
    }
}

fn parse_f64(matches: &ArgMatches, name: &str, desc: &'static str) -> Result<f64> {
    match matches.value_of(name) {
        Some(raw) => raw.parse().or_else(|_| parameter_error(desc)),
        None => parameter_error(desc),
    }
}

/// Generator polynomials read as decimal, or as hexadecimal with a `0x` prefix.
fn parse_polynomial(matches: &ArgMatches, name: &str, desc: &'static str) -> Result<u64> {
    let raw = match matches.value_of(name) {
        Some(raw) => raw,
        None => return parameter_error(desc),
    };

    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.or_else(|_| parameter_error(desc))
}

fn parse_information(raw: &str) -> Result<Vec<u8>> {
    raw.split(',')
        .map(|token| match token.trim() {
            "0" => Ok(0),
            "1" => Ok(1),
            _ => parameter_error("the test payload must be a comma-separated list of bits"),
        })
        .collect()
}

fn make_coder(matches: &ArgMatches, flags: &CoderFlags) -> Result<Box<dyn Coder>> {
    let mut params = CoderParameters::new();
    params.with_seed(parse_u64(matches, "seed", "the seed must be an integer")?);

    match matches.value_of(flags.coder_type).unwrap_or("hamming") {
        "cyclical" => {
            params
                .for_coder(CODER_TYPE_CYCLIC)
                .with_length_information(parse_usize(
                    matches,
                    flags.cyclical_package_length,
                    "a cyclical coder requires an integer cyclical_package_length",
                )?)
                .with_polynomial(parse_polynomial(
                    matches,
                    flags.cyclical_polynomial,
                    "a cyclical coder requires an integer cyclical_polynomial",
                )?);
        }
        "hamming" => {
            params.for_coder(CODER_TYPE_HAMMING).with_length_information(parse_usize(
                matches,
                flags.hamming_package_length,
                "a hamming coder requires an integer hamming_package_length",
            )?);
        }
        "reedmuller" => {
            params
                .for_coder(CODER_TYPE_REED_MULLER)
                .with_dimension(parse_u32(
                    matches,
                    flags.reedmuller_dimension,
                    "a reedmuller coder requires an integer reedmuller_dimension",
                )?)
                .with_order(parse_u32(
                    matches,
                    flags.reedmuller_order,
                    "a reedmuller coder requires an integer reedmuller_order",
                )?);
        }
        "fountain" => {
            params
                .for_coder(CODER_TYPE_FOUNTAIN)
                .with_length_information(parse_usize(
                    matches,
                    flags.fountain_package_length,
                    "a fountain coder requires an integer fountain_package_length",
                )?)
                .with_block_size(parse_usize(
                    matches,
                    flags.fountain_block_size,
                    "a fountain coder requires an integer fountain_block_size",
                )?)
                .with_count_coding_blocks(parse_usize(
                    matches,
                    flags.fountain_quantity_block,
                    "a fountain coder requires an integer fountain_quantity_block",
                )?);
        }
        _ => {
            // Never reached: the argument is restricted to the values matched above.
            unreachable!()
        }
    }

    syndroma::default::get_coders().make(&params)
}

fn print_summary(results: &[TestResult]) {
    println!();
    println!("Test Results");
    println!("=================================================");
    println!();

    if let Some(result) = results.first() {
        let coder = &result.first_coder;
        println!(
            "  First Coder:  {} (k={}, r={}, n={})",
            coder.name, coder.length_information, coder.length_additional, coder.length_total
        );
        if let Some(coder) = &result.second_coder {
            println!(
                "  Second Coder: {} (k={}, r={}, n={})",
                coder.name, coder.length_information, coder.length_additional, coder.length_total
            );
        }
        println!();
    }

    println!(
        "  {:>8}  {:>8}  {:>8}  {:>13}  {:>8}",
        "noise", "clean", "repaired", "uncorrectable", "silent"
    );

    for result in results {
        println!(
            "  {:>7.2}%  {:>8}  {:>8}  {:>13}  {:>8}",
            result.noise,
            result.count_clean,
            result.count_repaired,
            result.count_uncorrectable,
            result.count_silent
        );
    }

    println!();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let first = make_coder(matches, &FIRST_FLAGS)?;

    let second = match matches.value_of("codec_type").unwrap_or("SINGLE") {
        "CASCADE" => Some(make_coder(matches, &SECOND_FLAGS)?),
        _ => None,
    };

    let noise = match matches.value_of("noise_type").unwrap_or("SINGLE") {
        "BLOCK" => NoiseKind::Block {
            length: parse_usize(
                matches,
                "noise_package_length",
                "the noise package length must be an integer",
            )?,
            period: parse_usize(
                matches,
                "noise_package_period",
                "the noise package period must be an integer",
            )?,
        },
        _ => NoiseKind::Single,
    };

    let information = match matches.value_of("info_for_test") {
        Some(raw) => parse_information(raw)?,
        None => return parameter_error("a test payload is required"),
    };

    let opts = SweepOptions {
        noise_start: parse_f64(matches, "noise_start", "the noise start must be a number")?,
        noise_end: parse_f64(matches, "noise_end", "the noise end must be a number")?,
        steps: parse_usize(matches, "steps", "the step count must be an integer")?,
        count_test: parse_usize(
            matches,
            "test_quantity_cycles",
            "the test cycle count must be an integer",
        )?,
        noise,
        information,
        use_interleaver: matches.is_present("interleaver"),
        seed: parse_u64(matches, "seed", "the seed must be an integer")?,
    };

    let results = sweep::run(first.as_ref(), second.as_deref(), &opts)?;

    print_summary(&results);

    if matches.is_present("json") {
        for result in &results {
            match serde_json::to_string(result) {
                Ok(line) => println!("{}", line),
                Err(err) => warn!("failed to serialise a test record: {}", err),
            }
        }
    }

    Ok(())
}

fn main() {
    pretty_env_logger::init();

    let matches = Command::new("Syndroma Sim")
        .version("1.0")
        .about("Sweeps channel noise across forward-error-correction coders and reports transfer statistics")
        .arg(
            Arg::new("first_coder_type")
                .long("first_coder_type")
                .takes_value(true)
                .possible_values(["cyclical", "hamming", "reedmuller", "fountain"])
                .default_value("hamming")
                .help("Coder family of the first (outer) coder"),
        )
        .arg(
            Arg::new("first_cyclical_package_length")
                .long("first_cyclical_package_length")
                .takes_value(true)
                .help("Information length of the first cyclical coder"),
        )
        .arg(
            Arg::new("first_cyclical_polynomial")
                .long("first_cyclical_polynomial")
                .takes_value(true)
                .help("Generator polynomial of the first cyclical coder (decimal or 0x-prefixed)"),
        )
        .arg(
            Arg::new("first_hamming_package_length")
                .long("first_hamming_package_length")
                .takes_value(true)
                .help("Information length of the first Hamming coder"),
        )
        .arg(
            Arg::new("first_reedmuller_dimension")
                .long("first_reedmuller_dimension")
                .takes_value(true)
                .help("Number of variables of the first Reed-Muller coder"),
        )
        .arg(
            Arg::new("first_reedmuller_order")
                .long("first_reedmuller_order")
                .takes_value(true)
                .help("Maximum monomial degree of the first Reed-Muller coder"),
        )
        .arg(
            Arg::new("first_fountain_package_length")
                .long("first_fountain_package_length")
                .takes_value(true)
                .help("Information length of the first fountain coder"),
        )
        .arg(
            Arg::new("first_fountain_block_size")
                .long("first_fountain_block_size")
                .takes_value(true)
                .help("Source block size of the first fountain coder"),
        )
        .arg(
            Arg::new("first_fountain_quantity_block")
                .long("first_fountain_quantity_block")
                .takes_value(true)
                .help("Coding block count of the first fountain coder"),
        )
        .arg(
            Arg::new("second_coder_type")
                .long("second_coder_type")
                .takes_value(true)
                .possible_values(["cyclical", "hamming", "reedmuller", "fountain"])
                .default_value("hamming")
                .help("Coder family of the second (inner) coder in cascade mode"),
        )
        .arg(
            Arg::new("second_cyclical_package_length")
                .long("second_cyclical_package_length")
                .takes_value(true)
                .help("Information length of the second cyclical coder"),
        )
        .arg(
            Arg::new("second_cyclical_polynomial")
                .long("second_cyclical_polynomial")
                .takes_value(true)
                .help("Generator polynomial of the second cyclical coder (decimal or 0x-prefixed)"),
        )
        .arg(
            Arg::new("second_hamming_package_length")
                .long("second_hamming_package_length")
                .takes_value(true)
                .help("Information length of the second Hamming coder"),
        )
        .arg(
            Arg::new("second_reedmuller_dimension")
                .long("second_reedmuller_dimension")
                .takes_value(true)
                .help("Number of variables of the second Reed-Muller coder"),
        )
        .arg(
            Arg::new("second_reedmuller_order")
                .long("second_reedmuller_order")
                .takes_value(true)
                .help("Maximum monomial degree of the second Reed-Muller coder"),
        )
        .arg(
            Arg::new("second_fountain_package_length")
                .long("second_fountain_package_length")
                .takes_value(true)
                .help("Information length of the second fountain coder"),
        )
        .arg(
            Arg::new("second_fountain_block_size")
                .long("second_fountain_block_size")
                .takes_value(true)
                .help("Source block size of the second fountain coder"),
        )
        .arg(
            Arg::new("second_fountain_quantity_block")
                .long("second_fountain_quantity_block")
                .takes_value(true)
                .help("Coding block count of the second fountain coder"),
        )
        .arg(
            Arg::new("codec_type")
                .long("codec_type")
                .takes_value(true)
                .possible_values(["SINGLE", "CASCADE"])
                .default_value("SINGLE")
                .help("Transfer through one coder, or cascade the first around the second"),
        )
        .arg(
            Arg::new("noise_type")
                .long("noise_type")
                .takes_value(true)
                .possible_values(["SINGLE", "BLOCK"])
                .default_value("SINGLE")
                .help("Scattered single-bit flips, or periodic bursts"),
        )
        .arg(
            Arg::new("noise_start")
                .long("noise_start")
                .takes_value(true)
                .default_value("0")
                .help("First noise level of the sweep, in percent"),
        )
        .arg(
            Arg::new("noise_end")
                .long("noise_end")
                .takes_value(true)
                .default_value("10")
                .help("Last noise level of the sweep, in percent"),
        )
        .arg(
            Arg::new("steps")
                .long("steps")
                .takes_value(true)
                .default_value("20")
                .help("Number of noise levels visited between start and end"),
        )
        .arg(
            Arg::new("test_quantity_cycles")
                .long("test_quantity_cycles")
                .takes_value(true)
                .default_value("100")
                .help("Transfers performed at each noise level"),
        )
        .arg(
            Arg::new("noise_package_length")
                .long("noise_package_length")
                .takes_value(true)
                .default_value("2")
                .help("Burst length for BLOCK noise"),
        )
        .arg(
            Arg::new("noise_package_period")
                .long("noise_package_period")
                .takes_value(true)
                .default_value("8")
                .help("Burst period for BLOCK noise"),
        )
        .arg(
            Arg::new("info_for_test")
                .long("info_for_test")
                .takes_value(true)
                .default_value("1,0,1,1")
                .help("The payload transferred in every trial, as comma-separated bits"),
        )
        .arg(
            Arg::new("interleaver")
                .long("interleaver")
                .help("Interleave the innermost codeword before corruption"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .default_value("0")
                .help("Master seed for noise, interleaving, and coder construction"),
        )
        .arg(Arg::new("json").long("json").help("Also emit one JSON record per noise level"))
        .get_matches();

    match run(&matches) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("configuration error: {}", err);
            std::process::exit(1);
        }
    }
}
