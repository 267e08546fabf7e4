// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear-prediction "predictor region" model: the lattice (reflection-coefficient) form read
//! from the stream, its conversion to direct-form coefficients, and the circular-buffer IIR that
//! applies those coefficients to a residual stream.
//!
//! The lattice-to-direct-form recursion and the circular-buffer IIR loop are grounded on the
//! reference full decoder's coefficient-conversion and reconstruction loops.

use iab_core::errors::{malformed_stream_error, Result};
use iab_core::io::{BitReader, BitWriter};

use crate::tables::{CIRCULAR_BUFFER_LEN, MAX_PRED_ORDER, Q20_ONE};

/// One linear-prediction region: a run of consecutive sub-blocks sharing one set of lattice
/// reflection coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredRegion {
    /// Number of sub-blocks this region spans (4-bit field).
    pub region_length: u8,
    /// Prediction order, 0..=32 (5-bit field).
    pub order: u8,
    /// Reflection coefficients, one per order, each a 10-bit unsigned code.
    pub k_coeff: Vec<u16>,
}

impl PredRegion {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let region_length = reader.read_bits_u32(4)? as u8;
        let order = reader.read_bits_u32(5)? as u8;
        if order as usize > MAX_PRED_ORDER {
            return malformed_stream_error("predictor region order exceeds 32");
        }
        let mut k_coeff = Vec::with_capacity(order as usize);
        for _ in 0..order {
            k_coeff.push(reader.read_bits_u32(10)? as u16);
        }
        Ok(PredRegion { region_length, order, k_coeff })
    }

    pub fn write(&self, writer: &mut BitWriter) {
        writer.write_bits_u32(self.region_length as u32, 4);
        writer.write_bits_u32(self.order as u32, 5);
        for &k in &self.k_coeff {
            writer.write_bits_u32(k as u32, 10);
        }
    }

    /// Converts this region's lattice reflection coefficients to Q20 fixed-point direct-form
    /// prediction coefficients `a[1..=order]` (the implicit `a[0]` is always `Q20_ONE` and is not
    /// returned).
    pub fn direct_form_coeffs(&self) -> Vec<i64> {
        lattice_to_direct_form(&self.k_coeff, self.order as usize)
    }
}

/// Converts lattice reflection coefficients to direct-form prediction coefficients.
///
/// `a[0]` is fixed at `Q20_ONE`; for each order `j` from 1 to `order`, the reflection coefficient
/// `k_coeff[j-1]` updates every earlier coefficient `a[1..=j]` in a Levinson-style recursion.
/// Returns `a[1..=order]` (length `order`).
pub fn lattice_to_direct_form(k_coeff: &[u16], order: usize) -> Vec<i64> {
    let mut a = vec![0i64; order + 1];
    a[0] = Q20_ONE;

    for j in 1..=order {
        let k_nj = (k_coeff[j - 1] as i64 - 512) << 11;
        let mut a_next = vec![0i64; j + 1];
        for k in 1..=j {
            let accum = k_nj * a[j - k];
            a_next[k] = a[k] + (accum >> 20);
        }
        a[1..=j].copy_from_slice(&a_next[1..=j]);
    }

    a[1..=order].to_vec()
}

/// The 64-entry circular history buffer shared by the IIR prediction loop and the polyphase
/// interpolator.
#[derive(Debug, Clone)]
pub struct CircularBuffer {
    buf: [i64; CIRCULAR_BUFFER_LEN],
    index: usize,
}

impl CircularBuffer {
    pub fn new() -> Self {
        CircularBuffer { buf: [0; CIRCULAR_BUFFER_LEN], index: 0 }
    }

    /// Sample `back` positions before the current write position (`back == 0` is the most
    /// recently pushed sample).
    pub fn at(&self, back: usize) -> i64 {
        let idx = (self.index + CIRCULAR_BUFFER_LEN - 1 - back) % CIRCULAR_BUFFER_LEN;
        self.buf[idx]
    }

    pub fn push(&mut self, value: i64) {
        self.buf[self.index] = value;
        self.index = (self.index + 1) % CIRCULAR_BUFFER_LEN;
    }
}

impl Default for CircularBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the IIR predictor defined by `coeffs` (`a[1..=order]`, Q20 fixed point) to a sequence
/// of residuals, carrying history forward in `history` across calls (callers invoke this once per
/// predictor region, in sub-block order, reusing the same `history` buffer for the whole layer).
pub fn apply_iir(residuals: &[i64], coeffs: &[i64], history: &mut CircularBuffer) -> Vec<i64> {
    let order = coeffs.len();
    let mut out = Vec::with_capacity(residuals.len());

    for &r in residuals {
        let mut accum: i64 = 0;
        for (p, &a_p) in coeffs.iter().enumerate() {
            // coeffs[0] is a[1], prediction uses the sample `p+1` positions back.
            accum -= history.at(p) * a_p;
        }
        let y = (accum >> 20) + r;
        history.push(y);
        out.push(y);
    }

    out
}

/// Inverse of [`apply_iir`]: given the original samples, recovers the residuals that would have
/// produced them under the same predictor, carrying history forward identically.
pub fn apply_iir_analysis(samples: &[i64], coeffs: &[i64], history: &mut CircularBuffer) -> Vec<i64> {
    let mut out = Vec::with_capacity(samples.len());

    for &y in samples {
        let mut accum: i64 = 0;
        for (p, &a_p) in coeffs.iter().enumerate() {
            accum -= history.at(p) * a_p;
        }
        let r = y - (accum >> 20);
        history.push(y);
        out.push(r);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_zero_produces_identity_predictor() {
        let coeffs = lattice_to_direct_form(&[], 0);
        assert!(coeffs.is_empty());
        let mut history = CircularBuffer::new();
        let residuals = [1i64, 2, 3, -4];
        let out = apply_iir(&residuals, &coeffs, &mut history);
        assert_eq!(out, residuals);
    }

    #[test]
    fn iir_and_analysis_are_mutual_inverses() {
        // k_coeff = 512 maps to k_nj = 0, i.e. a no-op reflection coefficient at every order, so
        // the resulting predictor is pure passthrough regardless of order -- a convenient
        // property for exercising the recursion's shape without hand-deriving coefficients.
        let k_coeff = vec![512u16; 4];
        let coeffs = lattice_to_direct_form(&k_coeff, 4);
        assert!(coeffs.iter().all(|&c| c == 0));

        let samples = [10i64, -20, 30, 0, 5, -5];
        let mut enc_history = CircularBuffer::new();
        let residuals = apply_iir_analysis(&samples, &coeffs, &mut enc_history);

        let mut dec_history = CircularBuffer::new();
        let reconstructed = apply_iir(&residuals, &coeffs, &mut dec_history);
        assert_eq!(reconstructed, samples);
    }

    #[test]
    fn pred_region_round_trips() {
        let region = PredRegion { region_length: 10, order: 3, k_coeff: vec![100, 512, 900] };
        let mut writer = BitWriter::new();
        region.write(&mut writer);
        writer.align();
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        let decoded = PredRegion::read(&mut reader).unwrap();
        assert_eq!(region, decoded);
    }
}
