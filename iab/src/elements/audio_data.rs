// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `AudioDataDLC` (ID `0x200`) and `AudioDataPCM` (ID `0x400`): the two audio asset carriers a
//! `BedDefinition`'s channels or an `ObjectDefinition` reference by `audioDataID`.
//!
//! Both elements store their payload as opaque bytes; decoding the DLC blob into samples needs the
//! enclosing frame's `frameRate` (for the sub-block layout), which the element alone does not
//! carry, so [`AudioDataDlc::decode`]/[`AudioDataDlc::encode`] take it as a parameter rather than
//! duplicating it on the element.

use iab_core::errors::{out_of_range_error, Result};
use iab_core::io::{BitReader, BitWriter};
use iab_core::units::{BitDepth, FrameRate, SampleRate};
use iab_codec_dlc::{FullDecoder, SimpleEncoder};

/// A DLC-encoded mono audio asset. `audio_data_id` must be non-zero: `0` is reserved to mean "no
/// asset" when used as a metadata reference, and is invalid as the key of the asset element
/// itself (enforced here; cross-referential uses of `0` are a validator concern since they
/// require the whole frame's context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDataDlc {
    pub audio_data_id: u32,
    pub sample_rate: SampleRate,
    /// The DLC-codec-encoded, byte-aligned payload (`iab_codec_dlc` produces/consumes this).
    pub payload: Vec<u8>,
}

impl AudioDataDlc {
    pub fn new(audio_data_id: u32, sample_rate: SampleRate, payload: Vec<u8>) -> Result<Self> {
        if audio_data_id == 0 {
            return out_of_range_error("AudioDataDLC audioDataID must be non-zero");
        }
        Ok(AudioDataDlc { audio_data_id, sample_rate, payload })
    }

    /// Encodes `samples` (one frame's worth, per `frame_rate`/`sample_rate`) into a new
    /// `AudioDataDLC` element using the simple (no linear-prediction) profile.
    pub fn encode(
        audio_data_id: u32,
        encoder: &mut SimpleEncoder,
        samples: &[i32],
        bit_depth: BitDepth,
        sample_rate: SampleRate,
        frame_rate: FrameRate,
    ) -> Result<Self> {
        let payload = encoder.encode(samples, bit_depth, sample_rate, frame_rate)?;
        Self::new(audio_data_id, sample_rate, payload)
    }

    /// Decodes this asset's samples. `want_96k_output` selects whether a 96 kHz DLC stream is
    /// reconstructed at its full rate or only decoded down to the 48 kHz base layer.
    pub fn decode(
        &self,
        decoder: &mut FullDecoder,
        frame_rate: FrameRate,
        want_96k_output: bool,
    ) -> Result<Vec<i32>> {
        decoder.decode(&self.payload, frame_rate, want_96k_output)
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let audio_data_id = reader.read_plex_u32(8)?;
        if audio_data_id == 0 {
            return out_of_range_error("AudioDataDLC audioDataID must be non-zero");
        }
        let dlc_size = reader.read_bits_u32(16)? as usize;
        let sample_rate = SampleRate::from_code(reader.read_bits_u32(2)?)?;
        reader.align();
        let payload = reader.read_byte_slice(dlc_size)?.to_vec();
        Ok(AudioDataDlc { audio_data_id, sample_rate, payload })
    }

    pub fn write(&self, writer: &mut BitWriter) -> Result<()> {
        if self.payload.len() > u16::MAX as usize {
            return out_of_range_error("DLC payload exceeds the 16-bit DLCSize field");
        }
        writer.write_plex_u32(self.audio_data_id, 8);
        writer.write_bits_u32(self.payload.len() as u32, 16);
        writer.write_bits_u32(self.sample_rate.code(), 2);
        writer.align();
        writer.write_bytes(&self.payload);
        Ok(())
    }
}

/// An uncompressed mono audio asset: raw PCM samples, little-endian per sample, inside the
/// otherwise big-endian bit stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDataPcm {
    pub audio_data_id: u32,
    /// Little-endian sample bytes, `bit_depth.bits() / 8` bytes per sample.
    pub sample_bytes: Vec<u8>,
}

impl AudioDataPcm {
    pub fn new(audio_data_id: u32, sample_bytes: Vec<u8>) -> Result<Self> {
        if audio_data_id == 0 {
            return out_of_range_error("AudioDataPCM audioDataID must be non-zero");
        }
        Ok(AudioDataPcm { audio_data_id, sample_bytes })
    }

    /// Packs `samples` (full-range `i32`, truncated to `bit_depth`) as little-endian bytes.
    pub fn from_samples(audio_data_id: u32, samples: &[i32], bit_depth: BitDepth) -> Result<Self> {
        let bytes_per_sample = (bit_depth.bits() / 8) as usize;
        let mut sample_bytes = Vec::with_capacity(samples.len() * bytes_per_sample);
        for &sample in samples {
            sample_bytes.extend_from_slice(&sample.to_le_bytes()[..bytes_per_sample]);
        }
        Self::new(audio_data_id, sample_bytes)
    }

    /// Unpacks the little-endian sample bytes back to sign-extended `i32` samples.
    pub fn to_samples(&self, bit_depth: BitDepth) -> Vec<i32> {
        let bytes_per_sample = (bit_depth.bits() / 8) as usize;
        self.sample_bytes
            .chunks_exact(bytes_per_sample)
            .map(|chunk| {
                let mut buf = [0u8; 4];
                buf[..bytes_per_sample].copy_from_slice(chunk);
                let shift = 32 - bit_depth.bits();
                (i32::from_le_bytes(buf) << shift) >> shift
            })
            .collect()
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let audio_data_id = reader.read_plex_u32(8)?;
        if audio_data_id == 0 {
            return out_of_range_error("AudioDataPCM audioDataID must be non-zero");
        }
        let remaining_bytes = reader.bits_left() / 8;
        let sample_bytes = reader.read_byte_slice(remaining_bytes)?.to_vec();
        Ok(AudioDataPcm { audio_data_id, sample_bytes })
    }

    pub fn write(&self, writer: &mut BitWriter) {
        writer.write_plex_u32(self.audio_data_id, 8);
        writer.write_bytes(&self.sample_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_data_dlc_round_trips() {
        let mut encoder = SimpleEncoder::new();
        let layout = FrameRate::Fps24.dlc_layout(SampleRate::Hz48000);
        let samples = vec![0i32; layout.frame_samples()];
        let asset =
            AudioDataDlc::encode(7, &mut encoder, &samples, BitDepth::Bits24, SampleRate::Hz48000, FrameRate::Fps24)
                .unwrap();

        let mut writer = BitWriter::new();
        asset.write(&mut writer).unwrap();
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = AudioDataDlc::read(&mut reader).unwrap();
        assert_eq!(decoded, asset);

        let mut decoder = FullDecoder::new();
        let pcm = decoded.decode(&mut decoder, FrameRate::Fps24, false).unwrap();
        assert_eq!(pcm, samples);
    }

    #[test]
    fn zero_audio_data_id_is_rejected() {
        assert!(AudioDataDlc::new(0, SampleRate::Hz48000, Vec::new()).is_err());
        assert!(AudioDataPcm::new(0, Vec::new()).is_err());
    }

    #[test]
    fn zero_audio_data_id_is_rejected_on_read_too() {
        let mut writer = BitWriter::new();
        writer.write_plex_u32(0, 8);
        writer.write_bits_u32(0, 16);
        writer.write_bits_u32(0, 2);
        writer.align();
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        assert!(AudioDataDlc::read(&mut reader).is_err());

        let mut writer = BitWriter::new();
        writer.write_plex_u32(0, 8);
        writer.write_bytes(&[0, 0, 0]);
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        assert!(AudioDataPcm::read(&mut reader).is_err());
    }

    #[test]
    fn audio_data_pcm_round_trips_24bit_samples() {
        let samples = vec![0i32, 1, -1, 8_388_607, -8_388_608, 12345];
        let asset = AudioDataPcm::from_samples(3, &samples, BitDepth::Bits24).unwrap();

        let mut writer = BitWriter::new();
        asset.write(&mut writer);
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = AudioDataPcm::read(&mut reader).unwrap();
        assert_eq!(decoded, asset);
        assert_eq!(decoded.to_samples(BitDepth::Bits24), samples);
    }
}
