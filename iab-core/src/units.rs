// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sample rate, bit depth, and frame rate enumerations, and the frame-rate-dependent sub-block
//! layout table.
//!
//! The sub-block counts and per-sub-block sample counts are transcribed from the reference
//! encoder's `setup()` table (`DLCSimpleEncoder.cpp`), which is authoritative for both the
//! 48 kHz base layer and the 96 kHz extension layer (whose sub-block sizes are exactly double the
//! 48 kHz values).

use crate::errors::{malformed_stream_error, Result};

/// Audio sample rate carried by an IAB frame or a DLC payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    Hz48000,
    Hz96000,
}

impl SampleRate {
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(SampleRate::Hz48000),
            1 => Ok(SampleRate::Hz96000),
            _ => malformed_stream_error("sample rate code must be 0 or 1"),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            SampleRate::Hz48000 => 0,
            SampleRate::Hz96000 => 1,
        }
    }

    pub fn hz(self) -> u32 {
        match self {
            SampleRate::Hz48000 => 48_000,
            SampleRate::Hz96000 => 96_000,
        }
    }
}

/// PCM sample bit depth carried by an IAB frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    Bits16,
    Bits24,
}

impl BitDepth {
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(BitDepth::Bits16),
            1 => Ok(BitDepth::Bits24),
            _ => malformed_stream_error("bit depth code must be 0 or 1"),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            BitDepth::Bits16 => 0,
            BitDepth::Bits24 => 1,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Bits16 => 16,
            BitDepth::Bits24 => 24,
        }
    }
}

/// Frame rate of an IAB stream. Fractional frame rates (e.g. 23.976 fps) are a non-goal of this
/// version and so have no variant; a stream claiming one is rejected by the validator as
/// `UnsupportedFeature` rather than silently mis-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRate {
    Fps24,
    Fps25,
    Fps30,
    Fps48,
    Fps50,
    Fps60,
    Fps96,
    Fps100,
    Fps120,
}

impl FrameRate {
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(FrameRate::Fps24),
            1 => Ok(FrameRate::Fps25),
            2 => Ok(FrameRate::Fps30),
            3 => Ok(FrameRate::Fps48),
            4 => Ok(FrameRate::Fps50),
            5 => Ok(FrameRate::Fps60),
            6 => Ok(FrameRate::Fps96),
            7 => Ok(FrameRate::Fps100),
            8 => Ok(FrameRate::Fps120),
            _ => malformed_stream_error("frame rate code out of range"),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            FrameRate::Fps24 => 0,
            FrameRate::Fps25 => 1,
            FrameRate::Fps30 => 2,
            FrameRate::Fps48 => 3,
            FrameRate::Fps50 => 4,
            FrameRate::Fps60 => 5,
            FrameRate::Fps96 => 6,
            FrameRate::Fps100 => 7,
            FrameRate::Fps120 => 8,
        }
    }

    /// Number of pan/remap/zone sub-blocks carried per frame.
    pub fn sub_block_count(self) -> usize {
        match self {
            FrameRate::Fps24 | FrameRate::Fps25 | FrameRate::Fps30 => 8,
            FrameRate::Fps48 | FrameRate::Fps50 | FrameRate::Fps60 => 4,
            FrameRate::Fps96 | FrameRate::Fps100 | FrameRate::Fps120 => 2,
        }
    }

    /// Number of DLC residual sub-blocks and the sample count of each, at 48 kHz. The 96 kHz
    /// extension layer uses the same sub-block count with double the per-sub-block sample count.
    pub fn dlc_layout_48k(self) -> DlcLayout {
        let (num_sub_blocks, sub_block_size) = match self {
            FrameRate::Fps24 => (10, 200),
            FrameRate::Fps25 => (10, 192),
            FrameRate::Fps30 => (8, 200),
            FrameRate::Fps48 => (5, 200),
            FrameRate::Fps50 => (5, 192),
            FrameRate::Fps60 => (4, 200),
            FrameRate::Fps96 => (5, 100),
            FrameRate::Fps100 => (4, 120),
            FrameRate::Fps120 => (4, 100),
        };
        DlcLayout { num_sub_blocks, sub_block_size }
    }

    /// DLC sub-block layout at the given sample rate (96 kHz sub-blocks are double-sized).
    pub fn dlc_layout(self, sample_rate: SampleRate) -> DlcLayout {
        let base = self.dlc_layout_48k();
        match sample_rate {
            SampleRate::Hz48000 => base,
            SampleRate::Hz96000 => {
                DlcLayout { num_sub_blocks: base.num_sub_blocks, sub_block_size: base.sub_block_size * 2 }
            }
        }
    }
}

/// DLC residual sub-block layout for one frame at one sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DlcLayout {
    pub num_sub_blocks: usize,
    pub sub_block_size: usize,
}

impl DlcLayout {
    pub fn frame_samples(self) -> usize {
        self.num_sub_blocks * self.sub_block_size
    }
}
