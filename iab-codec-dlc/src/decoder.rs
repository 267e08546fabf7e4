// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The full DLC decoder: reconstructs the 48 kHz base layer (and, on request, the 96 kHz
//! extension layer) from a DLC payload, including predictor-region lattice-to-direct-form
//! conversion and Rice/PCM residual decoding.
//!
//! Grounded on `DLCFullDecoder.cpp`'s `decode()`, which keeps no state of its own between calls:
//! every history/circular buffer it touches (`buffer[64]`, the upsampling `index1`/`buffer`) is a
//! local declared fresh at the top of the function. This decoder follows the same scoping: the
//! IIR history and the upsampling interpolator are local to one `decode()` call, not carried
//! across frames.

use iab_core::errors::Result;
use iab_core::io::BitReader;
use iab_core::units::{FrameRate, SampleRate};

use crate::lattice::{apply_iir, CircularBuffer, PredRegion};
use crate::residual::{read_pcm_subblock, read_rice_subblock, CodeType};
use crate::filter::Interpolator;

/// Decodes DLC payloads. Carries no state between calls; a single instance may freely decode
/// frames from different streams.
pub struct FullDecoder;

impl FullDecoder {
    pub fn new() -> Self {
        FullDecoder
    }

    /// Decodes one DLC payload. `frame_rate` comes from the enclosing `IAFrame`, since the DLC
    /// payload itself only records its sample rate. When the payload is a 96 kHz DLC stream and
    /// `want_96k_output` is `false`, only the 48 kHz base layer is reconstructed and the extension
    /// layer's bits are still consumed (so a following element parses correctly) but discarded.
    pub fn decode(
        &mut self,
        payload: &[u8],
        frame_rate: FrameRate,
        want_96k_output: bool,
    ) -> Result<Vec<i32>> {
        let mut reader = BitReader::new(payload);
        let shift_bits = reader.read_bits_u32(5)?;
        let sample_rate = SampleRate::from_code(reader.read_bits_u32(2)?)?;

        let layout_48 = frame_rate.dlc_layout_48k();
        let mut history_48 = CircularBuffer::new();
        let base =
            decode_layer(&mut reader, layout_48.num_sub_blocks, layout_48.sub_block_size, &mut history_48)?;

        match sample_rate {
            SampleRate::Hz48000 => Ok(shift_left(&base, shift_bits)),
            SampleRate::Hz96000 => {
                let layout_96 = frame_rate.dlc_layout(SampleRate::Hz96000);

                // The extension layer's predictor regions are its own, fetched from this layer's
                // own bits -- not the 48 kHz layer's regions decoded above. (One reference build
                // conflates the two when converting lattice coefficients for the 96 kHz layer;
                // this decoder always uses the extension layer's own regions.)
                let mut history_96 = CircularBuffer::new();
                let extension_residual = decode_layer(
                    &mut reader,
                    layout_96.num_sub_blocks,
                    layout_96.sub_block_size,
                    &mut history_96,
                )?;

                if !want_96k_output {
                    return Ok(shift_left(&base, shift_bits));
                }

                let mut interpolator = Interpolator::new();
                let upsampled = interpolator.process(&base);
                let reconstructed: Vec<i64> = upsampled
                    .iter()
                    .zip(extension_residual.iter())
                    .map(|(&predicted, &residual)| predicted + residual)
                    .collect();

                Ok(shift_left(&reconstructed, shift_bits))
            }
        }
    }
}

impl Default for FullDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn shift_left(samples: &[i64], shift_bits: u32) -> Vec<i32> {
    samples.iter().map(|&s| (s << shift_bits) as i32).collect()
}

fn decode_layer(
    reader: &mut BitReader<'_>,
    num_sub_blocks: usize,
    sub_block_size: usize,
    history: &mut CircularBuffer,
) -> Result<Vec<i64>> {
    let num_regions = reader.read_bits_u32(2)?;
    let mut regions = Vec::with_capacity(num_regions as usize);
    for _ in 0..num_regions {
        regions.push(PredRegion::read(reader)?);
    }

    let mut residual_stream = Vec::with_capacity(num_sub_blocks * sub_block_size);
    for _ in 0..num_sub_blocks {
        let samples = match CodeType::read(reader)? {
            CodeType::Pcm => read_pcm_subblock(reader, sub_block_size)?,
            CodeType::Rice => read_rice_subblock(reader, sub_block_size)?,
        };
        residual_stream.extend(samples);
    }

    if regions.is_empty() {
        return Ok(residual_stream);
    }

    let mut out = Vec::with_capacity(residual_stream.len());
    let mut offset = 0usize;
    for region in &regions {
        let region_samples = (region.region_length as usize * sub_block_size).min(residual_stream.len() - offset);
        let coeffs = region.direct_form_coeffs();
        let chunk = &residual_stream[offset..offset + region_samples];
        out.extend(apply_iir(chunk, &coeffs, history));
        offset += region_samples;
    }
    out.extend_from_slice(&residual_stream[offset..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::SimpleEncoder;
    use crate::lattice::PredRegion;
    use crate::residual::write_rice_subblock;
    use iab_core::io::BitWriter;
    use iab_core::units::BitDepth;

    /// Hand-assembles a 48 kHz DLC payload whose base layer is a single predictor region spanning
    /// the whole frame, so decoding it exercises the IIR history buffer (unlike `SimpleEncoder`,
    /// which always emits `NumPredRegions = 0`).
    fn payload_with_one_pred_region(frame_rate: FrameRate) -> Vec<u8> {
        let layout = frame_rate.dlc_layout_48k();
        let mut writer = BitWriter::new();
        writer.write_bits_u32(0, 5); // shift_bits
        writer.write_bits_u32(0, 2); // sample_rate code: 48 kHz
        writer.write_bits_u32(1, 2); // num_regions
        let region = PredRegion {
            region_length: layout.num_sub_blocks as u8,
            order: 2,
            k_coeff: vec![700, 300],
        };
        region.write(&mut writer);
        for sub_block in 0..layout.num_sub_blocks {
            let samples: Vec<i64> =
                (0..layout.sub_block_size).map(|i| ((sub_block * 7 + i) % 23) as i64 - 11).collect();
            writer.write_bit(true); // CodeType::Rice
            write_rice_subblock(&mut writer, 4, &samples);
        }
        writer.align();
        writer.into_bytes()
    }

    #[test]
    fn decoding_the_same_payload_twice_is_not_affected_by_a_prior_call() {
        let payload = payload_with_one_pred_region(FrameRate::Fps24);

        let mut decoder = FullDecoder::new();
        let first = decoder.decode(&payload, FrameRate::Fps24, false).unwrap();
        let second = decoder.decode(&payload, FrameRate::Fps24, false).unwrap();
        assert_eq!(first, second, "IIR history leaked from the first decode() call into the second");

        let mut fresh_decoder = FullDecoder::new();
        let from_fresh = fresh_decoder.decode(&payload, FrameRate::Fps24, false).unwrap();
        assert_eq!(second, from_fresh, "second decode() diverged from decoding on a fresh instance");
    }

    #[test]
    fn decode_of_silent_48k_frame_is_silent() {
        let mut encoder = SimpleEncoder::new();
        let layout = FrameRate::Fps24.dlc_layout(SampleRate::Hz48000);
        let samples = vec![0i32; layout.frame_samples()];
        let payload = encoder
            .encode(&samples, BitDepth::Bits24, SampleRate::Hz48000, FrameRate::Fps24)
            .unwrap();

        let mut decoder = FullDecoder::new();
        let decoded = decoder.decode(&payload, FrameRate::Fps24, false).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn round_trips_nonzero_48k_samples() {
        let mut encoder = SimpleEncoder::new();
        let layout = FrameRate::Fps24.dlc_layout(SampleRate::Hz48000);
        // A 24-bit frame's ShiftBits is 8, so only the top 16 bits of each sample survive the
        // round trip; construct samples that are already multiples of 2^8 so the comparison
        // below is exact rather than comparing against a lossy truncation.
        let samples: Vec<i32> =
            (0..layout.frame_samples()).map(|i| (((i as i32 * 137) % 2048) - 1024) << 8).collect();
        let payload = encoder
            .encode(&samples, BitDepth::Bits24, SampleRate::Hz48000, FrameRate::Fps24)
            .unwrap();

        let mut decoder = FullDecoder::new();
        let decoded = decoder.decode(&payload, FrameRate::Fps24, false).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn decode_of_silent_96k_frame_is_silent_at_96k() {
        let mut encoder = SimpleEncoder::new();
        let layout = FrameRate::Fps24.dlc_layout(SampleRate::Hz96000);
        let samples = vec![0i32; layout.frame_samples()];
        let payload = encoder
            .encode(&samples, BitDepth::Bits24, SampleRate::Hz96000, FrameRate::Fps24)
            .unwrap();

        let mut decoder = FullDecoder::new();
        let decoded = decoder.decode(&payload, FrameRate::Fps24, true).unwrap();
        assert_eq!(decoded, samples);
    }
}
