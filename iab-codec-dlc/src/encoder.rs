// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The simple DLC encoder: no linear prediction (`NumPredRegions == 0` on every layer), PCM
//! residual coding only. Grounded on `DLCSimpleEncoder.cpp`'s `encode()`/`lpfFilter96k()`/
//! `downSampling96kTo48k()`/`upSampling48kTo96k()`/`delayPCM96k()`.

use iab_core::errors::{out_of_range_error, Result};
use iab_core::io::BitWriter;
use iab_core::units::{BitDepth, FrameRate, SampleRate};

use crate::filter::{decimate_by_2, AlignmentDelay, Interpolator, LowPassFilter96k};
use crate::residual::write_pcm_subblock;

/// Encodes frames of mono PCM audio to DLC payload bytes using the simple (no linear-prediction)
/// profile. Holds the 96 kHz filter state that must persist across consecutive frames of the same
/// stream; construct a fresh encoder (or call [`SimpleEncoder::reset`]) when the sample rate or
/// frame rate changes.
pub struct SimpleEncoder {
    lpf: LowPassFilter96k,
    interpolator: Interpolator,
    alignment_delay: AlignmentDelay,
}

impl SimpleEncoder {
    pub fn new() -> Self {
        SimpleEncoder {
            lpf: LowPassFilter96k::new(),
            interpolator: Interpolator::new(),
            alignment_delay: AlignmentDelay::new(),
        }
    }

    /// Resets all persistent filter state. Required before encoding a frame at a different sample
    /// rate or frame rate than the previous call.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Encodes one frame of `samples` (length must equal the frame's sample count for
    /// `sample_rate`/`frame_rate`) to a byte-aligned DLC payload.
    pub fn encode(
        &mut self,
        samples: &[i32],
        bit_depth: BitDepth,
        sample_rate: SampleRate,
        frame_rate: FrameRate,
    ) -> Result<Vec<u8>> {
        let layout = frame_rate.dlc_layout(sample_rate);
        if samples.len() != layout.frame_samples() {
            return out_of_range_error("sample count does not match frame rate/sample rate layout");
        }

        let shift_bits = 32 - bit_depth.bits();
        let shifted: Vec<i64> = samples.iter().map(|&s| (s >> shift_bits) as i64).collect();

        let mut writer = BitWriter::new();
        writer.write_bits_u32(shift_bits, 5);
        writer.write_bits_u32(sample_rate.code(), 2);

        match sample_rate {
            SampleRate::Hz48000 => {
                writer.write_bits_u32(0, 2); // NumPredRegions48
                write_pcm_layer(&mut writer, &shifted, layout.sub_block_size);
            }
            SampleRate::Hz96000 => {
                let base_layout = frame_rate.dlc_layout_48k();

                let filtered = self.lpf.process(&shifted);
                let baseband = decimate_by_2(&filtered);
                debug_assert_eq!(baseband.len(), base_layout.frame_samples());

                writer.write_bits_u32(0, 2); // NumPredRegions48
                write_pcm_layer(&mut writer, &baseband, base_layout.sub_block_size);

                let upsampled = self.interpolator.process(&baseband);

                let shifted_i32: Vec<i32> = shifted.iter().map(|&s| s as i32).collect();
                let delayed = self.alignment_delay.process(&shifted_i32);

                let extension_residual: Vec<i64> = delayed
                    .iter()
                    .zip(upsampled.iter())
                    .map(|(&delayed_sample, &predicted)| delayed_sample as i64 - predicted)
                    .collect();

                writer.write_bits_u32(0, 2); // NumPredRegions96
                write_pcm_layer(&mut writer, &extension_residual, layout.sub_block_size);
            }
        }

        writer.align();
        Ok(writer.into_bytes())
    }
}

impl Default for SimpleEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_pcm_layer(writer: &mut BitWriter, samples: &[i64], sub_block_size: usize) {
    use crate::residual::CodeType;

    for chunk in samples.chunks(sub_block_size) {
        CodeType::Pcm.write(writer);
        write_pcm_subblock(writer, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_frame_at_48k_encodes_and_aligns() {
        let mut encoder = SimpleEncoder::new();
        let layout = FrameRate::Fps24.dlc_layout(SampleRate::Hz48000);
        let samples = vec![0i32; layout.frame_samples()];
        let payload = encoder
            .encode(&samples, BitDepth::Bits24, SampleRate::Hz48000, FrameRate::Fps24)
            .unwrap();
        assert!(!payload.is_empty());
    }

    #[test]
    fn wrong_sample_count_is_rejected() {
        let mut encoder = SimpleEncoder::new();
        let samples = vec![0i32; 7];
        let result = encoder.encode(&samples, BitDepth::Bits24, SampleRate::Hz48000, FrameRate::Fps24);
        assert!(result.is_err());
    }
}
