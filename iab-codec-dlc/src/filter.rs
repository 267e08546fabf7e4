// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 96 kHz extension-layer filter pipeline: the anti-aliasing low-pass filter used before
//! decimating to the 48 kHz base band, the polyphase interpolator used to upsample the base band
//! back to 96 kHz, and the alignment delay that keeps the original 96 kHz signal in step with its
//! round-tripped base band.
//!
//! Grounded on the reference simple encoder's `lpfFilter96k`, `downSampling96kTo48k`,
//! `upSampling96kTo48k`, and `delayPCM96k` methods. The delay lines here are expressed as plain
//! history buffers concatenated with the incoming frame rather than the reference's in-place
//! reversed-array/swap-buffer tricks; the input/output relationship -- and the persistence of
//! state across frames -- is the same.

use crate::lattice::CircularBuffer;
use crate::tables::{
    INTERPOLATOR_FILTER_COEFFS, LOW_PASS_FILTER_COEFFS, LPF_96K_FILT_ORDER, LPF_COEFF_INT_BIT_LENGTH,
    TOTAL_96K_FILT_GROUP_DELAY,
};

/// 129-tap anti-aliasing low-pass filter with persistent history across frames.
#[derive(Debug, Clone)]
pub struct LowPassFilter96k {
    history: Vec<i64>,
}

impl LowPassFilter96k {
    pub fn new() -> Self {
        LowPassFilter96k { history: vec![0i64; LPF_96K_FILT_ORDER] }
    }

    /// Filters `input` (one frame of 96 kHz samples), returning the filtered samples and updating
    /// the internal history for the next call.
    pub fn process(&mut self, input: &[i64]) -> Vec<i64> {
        let order = LPF_96K_FILT_ORDER;
        let mut extended = Vec::with_capacity(order + input.len());
        extended.extend_from_slice(&self.history);
        extended.extend_from_slice(input);

        let mut out = Vec::with_capacity(input.len());
        for i in 0..input.len() {
            let mut accum: i64 = 0;
            for (k, &coeff) in LOW_PASS_FILTER_COEFFS.iter().enumerate() {
                accum += coeff * extended[order + i - k];
            }
            out.push(accum >> LPF_COEFF_INT_BIT_LENGTH);
        }

        let total = extended.len();
        self.history = extended[total - order..].to_vec();
        out
    }
}

impl Default for LowPassFilter96k {
    fn default() -> Self {
        Self::new()
    }
}

/// Decimates a low-pass-filtered 96 kHz signal to 48 kHz by keeping every even-indexed sample.
pub fn decimate_by_2(samples: &[i64]) -> Vec<i64> {
    samples.iter().step_by(2).copied().collect()
}

/// 33-tap polyphase interpolator that upsamples a 48 kHz base band back to 96 kHz, carrying a
/// 64-entry circular history buffer across frames.
#[derive(Debug, Clone)]
pub struct Interpolator {
    history: CircularBuffer,
}

impl Interpolator {
    pub fn new() -> Self {
        Interpolator { history: CircularBuffer::new() }
    }

    /// Upsamples one frame of 48 kHz `baseband` samples to 96 kHz (`2 * baseband.len()` output
    /// samples: even phase is a delayed copy of the base-band sample, odd phase is the polyphase
    /// FIR output).
    pub fn process(&mut self, baseband: &[i64]) -> Vec<i64> {
        let mut out = Vec::with_capacity(baseband.len() * 2);

        for &sample in baseband {
            self.history.push(sample);

            let even = self.history.at(8);

            let mut accum: i64 = 0;
            for (i, &coeff) in INTERPOLATOR_FILTER_COEFFS.iter().enumerate().skip(1).step_by(2) {
                accum += self.history.at(i - 1) * coeff;
            }
            let odd = accum >> 15;

            out.push(even);
            out.push(odd);
        }

        out
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

/// Delays a 96 kHz signal by `TOTAL_96K_FILT_GROUP_DELAY` samples so it lines up with the
/// round-tripped (LPF + decimate + interpolate) base band, carrying the tail of each frame
/// forward as history for the next.
#[derive(Debug, Clone)]
pub struct AlignmentDelay {
    history: Vec<i32>,
}

impl AlignmentDelay {
    pub fn new() -> Self {
        AlignmentDelay { history: vec![0i32; TOTAL_96K_FILT_GROUP_DELAY] }
    }

    pub fn process(&mut self, input: &[i32]) -> Vec<i32> {
        let delay = TOTAL_96K_FILT_GROUP_DELAY;
        let mut extended = Vec::with_capacity(delay + input.len());
        extended.extend_from_slice(&self.history);
        extended.extend_from_slice(input);

        let out = extended[..input.len()].to_vec();

        let total = extended.len();
        self.history = extended[total - delay..].to_vec();
        out
    }
}

impl Default for AlignmentDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_delay_passes_through_after_warm_up() {
        let mut delay = AlignmentDelay::new();
        let frame_len = 200;
        let first: Vec<i32> = (0..frame_len).collect();
        let first_out = delay.process(&first);
        assert_eq!(first_out, vec![0i32; frame_len as usize]);

        let second: Vec<i32> = (frame_len..2 * frame_len).collect();
        let second_out = delay.process(&second);
        // After the 80-sample delay, the first 80 entries are the tail of `first`.
        assert_eq!(&second_out[..80], &first[frame_len as usize - 80..]);
    }

    #[test]
    fn decimate_keeps_even_indices() {
        let samples: Vec<i64> = (0..10).collect();
        assert_eq!(decimate_by_2(&samples), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn lpf_zero_input_stays_zero() {
        let mut lpf = LowPassFilter96k::new();
        let out = lpf.process(&[0i64; 400]);
        assert!(out.iter().all(|&s| s == 0));
    }
}
