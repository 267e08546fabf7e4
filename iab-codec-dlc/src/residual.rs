// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Residual sub-block coding: the PCM (fixed-width) and Rice (unary-quotient + remainder) entropy
//! coders used for both the 48 kHz base layer and the 96 kHz extension layer.
//!
//! The Rice coding shape (unary quotient, fixed-width remainder, explicit sign bit) is grounded
//! on `decode_rice_partition`/`rice_signed_to_i32` in the FLAC decoder this crate's sibling codec
//! was built from, adapted here to IAB's explicit sign bit in place of FLAC's zig-zag mapping.

use iab_core::errors::Result;
use iab_core::io::{BitReader, BitWriter};

/// Which entropy coder a residual sub-block uses, per the reference `CodeType` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    Pcm,
    Rice,
}

impl CodeType {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(if reader.read_bit()? { CodeType::Rice } else { CodeType::Pcm })
    }

    pub fn write(self, writer: &mut BitWriter) {
        writer.write_bit(matches!(self, CodeType::Rice));
    }
}

fn bits_needed(magnitude: u64) -> u32 {
    if magnitude == 0 {
        0
    }
    else {
        64 - magnitude.leading_zeros()
    }
}

/// Writes a PCM-coded residual sub-block: a 5-bit bit depth followed by, for each sample, a
/// `bit_depth`-bit magnitude and (only if the magnitude is non-zero) a sign bit.
pub fn write_pcm_subblock(writer: &mut BitWriter, samples: &[i64]) {
    let max_magnitude = samples.iter().map(|&s| s.unsigned_abs()).max().unwrap_or(0);
    let bit_depth = bits_needed(max_magnitude);
    writer.write_bits_u32(bit_depth, 5);

    for &s in samples {
        let magnitude = s.unsigned_abs();
        if bit_depth > 0 {
            writer.write_bits_u64(magnitude, bit_depth);
        }
        if magnitude != 0 {
            writer.write_bit(s < 0);
        }
    }
}

/// Reads a PCM-coded residual sub-block of `count` samples.
pub fn read_pcm_subblock(reader: &mut BitReader<'_>, count: usize) -> Result<Vec<i64>> {
    let bit_depth = reader.read_bits_u32(5)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let magnitude = if bit_depth > 0 { reader.read_bits_u64(bit_depth)? } else { 0 };
        let negative = if magnitude != 0 { reader.read_bit()? } else { false };
        out.push(if negative { -(magnitude as i64) } else { magnitude as i64 });
    }
    Ok(out)
}

/// Writes a Rice-coded residual sub-block: a 5-bit remainder width followed by, for each sample,
/// a unary quotient (that many one-bits then a terminating zero-bit), a `rice_rem_bits`-bit
/// remainder, and (only if quotient or remainder is non-zero) a sign bit.
pub fn write_rice_subblock(writer: &mut BitWriter, rice_rem_bits: u32, samples: &[i64]) {
    writer.write_bits_u32(rice_rem_bits, 5);

    for &s in samples {
        let magnitude = s.unsigned_abs();
        let quotient = magnitude >> rice_rem_bits;
        let remainder = magnitude & ((1u64 << rice_rem_bits) - 1);

        for _ in 0..quotient {
            writer.write_bit(true);
        }
        writer.write_bit(false);

        if rice_rem_bits > 0 {
            writer.write_bits_u64(remainder, rice_rem_bits);
        }
        if quotient != 0 || remainder != 0 {
            writer.write_bit(s < 0);
        }
    }
}

/// Reads a Rice-coded residual sub-block of `count` samples.
pub fn read_rice_subblock(reader: &mut BitReader<'_>, count: usize) -> Result<Vec<i64>> {
    let rice_rem_bits = reader.read_bits_u32(5)?;
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        let mut quotient: u64 = 0;
        while reader.read_bit()? {
            quotient += 1;
        }
        let remainder = if rice_rem_bits > 0 { reader.read_bits_u64(rice_rem_bits)? } else { 0 };
        let negative = if quotient != 0 || remainder != 0 { reader.read_bit()? } else { false };
        let magnitude = (quotient << rice_rem_bits) + remainder;
        out.push(if negative { -(magnitude as i64) } else { magnitude as i64 });
    }

    Ok(out)
}

/// Minimal Rice remainder width (bits) that keeps `max_magnitude`'s quotient from growing
/// unreasonably long; a simple heuristic picking the width so the typical quotient is small.
pub fn choose_rice_rem_bits(max_magnitude: u64) -> u32 {
    bits_needed(max_magnitude).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcm_subblock_round_trips_including_all_zero() {
        for samples in [vec![0i64; 5], vec![1, -1, 127, -128, 0], vec![70000, -70000]] {
            let mut writer = BitWriter::new();
            write_pcm_subblock(&mut writer, &samples);
            writer.align();
            let bytes = writer.into_bytes();
            let mut reader = BitReader::new(&bytes);
            let decoded = read_pcm_subblock(&mut reader, samples.len()).unwrap();
            assert_eq!(decoded, samples);
        }
    }

    #[test]
    fn rice_subblock_round_trips() {
        let samples = vec![0i64, 1, -1, 5, -5, 1000, -1000, 0];
        let rice_rem_bits = choose_rice_rem_bits(1000);
        let mut writer = BitWriter::new();
        write_rice_subblock(&mut writer, rice_rem_bits, &samples);
        writer.align();
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        let decoded = read_rice_subblock(&mut reader, samples.len()).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn code_type_round_trips() {
        for ct in [CodeType::Pcm, CodeType::Rice] {
            let mut writer = BitWriter::new();
            ct.write(&mut writer);
            writer.align();
            let bytes = writer.into_bytes();
            let mut reader = BitReader::new(&bytes);
            assert_eq!(CodeType::read(&mut reader).unwrap(), ct);
        }
    }
}
