// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value objects shared by bed channels and object pan sub-blocks: cube position, gain, zone
//! gain, spread, and decorrelation coefficient.
//!
//! Equality and round-tripping for these types is defined over their *stream-domain* encoding
//! (the quantized integer fields actually carried on the wire), not over the floating-point value
//! a caller may have started from.

use crate::errors::{malformed_stream_error, out_of_range_error, Result};
use crate::io::{BitReader, BitWriter};

/// A position in the unit cube `[0, 1]^3`, stored in its stream-domain quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitCubePosition {
    /// Raw stream value for X, in `[32767, 65535]`.
    x_raw: u16,
    /// Raw stream value for Y, in `[32767, 65535]`.
    y_raw: u16,
    /// Raw stream value for Z, in `[0, 65535]`.
    z_raw: u16,
}

impl UnitCubePosition {
    /// Builds a position from floating-point coordinates in `[0, 1]`, quantizing each axis the
    /// way the stream encoding does.
    pub fn from_unit(x: f64, y: f64, z: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) || !(0.0..=1.0).contains(&z) {
            return out_of_range_error("unit cube position coordinates must lie in [0, 1]");
        }
        Ok(UnitCubePosition {
            x_raw: quantize_xy(x),
            y_raw: quantize_xy(y),
            z_raw: quantize_z(z),
        })
    }

    pub fn from_raw(x_raw: u16, y_raw: u16, z_raw: u16) -> Result<Self> {
        if x_raw < 32767 || y_raw < 32767 {
            return malformed_stream_error("X/Y stream value below the 32767 floor");
        }
        Ok(UnitCubePosition { x_raw, y_raw, z_raw })
    }

    pub fn x_raw(self) -> u16 {
        self.x_raw
    }
    pub fn y_raw(self) -> u16 {
        self.y_raw
    }
    pub fn z_raw(self) -> u16 {
        self.z_raw
    }

    pub fn x(self) -> f64 {
        (self.x_raw as f64 - 32767.0) / 32768.0
    }
    pub fn y(self) -> f64 {
        (self.y_raw as f64 - 32767.0) / 32768.0
    }
    pub fn z(self) -> f64 {
        self.z_raw as f64 / 65535.0
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let x_raw = reader.read_bits_u32(16)? as u16;
        let y_raw = reader.read_bits_u32(16)? as u16;
        let z_raw = reader.read_bits_u32(16)? as u16;
        Self::from_raw(x_raw, y_raw, z_raw)
    }

    pub fn write(self, writer: &mut BitWriter) {
        writer.write_bits_u32(self.x_raw as u32, 16);
        writer.write_bits_u32(self.y_raw as u32, 16);
        writer.write_bits_u32(self.z_raw as u32, 16);
    }
}

fn quantize_xy(v: f64) -> u16 {
    ((v * 32768.0 + 0.5).floor() as i64 + 32767).clamp(32767, 65535) as u16
}

fn quantize_z(v: f64) -> u16 {
    (v * 65535.0 + 0.5).floor().clamp(0.0, 65535.0) as u16
}

/// Object or channel gain: Unity and Silence need no stream value; InStream carries a 10-bit
/// code. Prefix width/codes are this crate's own choice; see `DESIGN.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    Unity,
    Silence,
    InStream(u16),
}

const GAIN_PREFIX_BITS: u32 = 2;

impl Gain {
    pub fn linear(self) -> f64 {
        match self {
            Gain::Unity => 1.0,
            Gain::Silence => 0.0,
            Gain::InStream(g) => 2f64.powf(-(g as f64) / 64.0),
        }
    }

    pub fn from_linear_in_stream(g: u16) -> Result<Self> {
        if g > 0x3FF {
            return out_of_range_error("in-stream gain code must fit in 10 bits");
        }
        Ok(Gain::InStream(g))
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        match reader.read_bits_u32(GAIN_PREFIX_BITS)? {
            0 => Ok(Gain::Unity),
            1 => Ok(Gain::Silence),
            2 => Ok(Gain::InStream(reader.read_bits_u32(10)? as u16)),
            _ => malformed_stream_error("reserved gain prefix code"),
        }
    }

    pub fn write(self, writer: &mut BitWriter) {
        match self {
            Gain::Unity => writer.write_bits_u32(0, GAIN_PREFIX_BITS),
            Gain::Silence => writer.write_bits_u32(1, GAIN_PREFIX_BITS),
            Gain::InStream(g) => {
                writer.write_bits_u32(2, GAIN_PREFIX_BITS);
                writer.write_bits_u32(g as u32, 10);
            }
        }
    }
}

/// Per-zone gain: same shape as `Gain`, but the in-stream linear scale is `g / 1023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneGain {
    Unity,
    Silence,
    InStream(u16),
}

impl ZoneGain {
    pub fn linear(self) -> f64 {
        match self {
            ZoneGain::Unity => 1.0,
            ZoneGain::Silence => 0.0,
            ZoneGain::InStream(g) => g as f64 / 1023.0,
        }
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        match reader.read_bits_u32(GAIN_PREFIX_BITS)? {
            0 => Ok(ZoneGain::Silence),
            1 => Ok(ZoneGain::Unity),
            2 => Ok(ZoneGain::InStream(reader.read_bits_u32(10)? as u16)),
            _ => malformed_stream_error("reserved zone gain prefix code"),
        }
    }

    pub fn write(self, writer: &mut BitWriter) {
        match self {
            ZoneGain::Silence => writer.write_bits_u32(0, GAIN_PREFIX_BITS),
            ZoneGain::Unity => writer.write_bits_u32(1, GAIN_PREFIX_BITS),
            ZoneGain::InStream(g) => {
                writer.write_bits_u32(2, GAIN_PREFIX_BITS);
                writer.write_bits_u32(g as u32, 10);
            }
        }
    }
}

/// An object's spatial spread, either absent, one-dimensional (replicated across Y/Z), or fully
/// three-dimensional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    None,
    LowRes1D(u8),
    HighRes1D(u16),
    HighRes3D(u16, u16, u16),
}

const SPREAD_MODE_BITS: u32 = 2;

impl Spread {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        match reader.read_bits_u32(SPREAD_MODE_BITS)? {
            0 => Ok(Spread::LowRes1D(reader.read_bits_u32(8)? as u8)),
            1 => Ok(Spread::None),
            2 => Ok(Spread::HighRes1D(reader.read_bits_u32(12)? as u16)),
            3 => {
                let x = reader.read_bits_u32(12)? as u16;
                let y = reader.read_bits_u32(12)? as u16;
                let z = reader.read_bits_u32(12)? as u16;
                Ok(Spread::HighRes3D(x, y, z))
            }
            _ => unreachable!("2-bit field"),
        }
    }

    pub fn write(self, writer: &mut BitWriter) {
        match self {
            Spread::LowRes1D(v) => {
                writer.write_bits_u32(0, SPREAD_MODE_BITS);
                writer.write_bits_u32(v as u32, 8);
            }
            Spread::None => writer.write_bits_u32(1, SPREAD_MODE_BITS),
            Spread::HighRes1D(v) => {
                writer.write_bits_u32(2, SPREAD_MODE_BITS);
                writer.write_bits_u32(v as u32, 12);
            }
            Spread::HighRes3D(x, y, z) => {
                writer.write_bits_u32(3, SPREAD_MODE_BITS);
                writer.write_bits_u32(x as u32, 12);
                writer.write_bits_u32(y as u32, 12);
                writer.write_bits_u32(z as u32, 12);
            }
        }
    }
}

/// A channel's or object's decorrelation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorCoeff {
    NoDecor,
    MaxDecor,
    InStream(u8),
}

const DECOR_PREFIX_BITS: u32 = 2;

impl DecorCoeff {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        match reader.read_bits_u32(DECOR_PREFIX_BITS)? {
            0 => Ok(DecorCoeff::NoDecor),
            1 => Ok(DecorCoeff::MaxDecor),
            2 => Ok(DecorCoeff::InStream(reader.read_bits_u32(8)? as u8)),
            _ => malformed_stream_error("reserved decorrelation coefficient prefix code"),
        }
    }

    pub fn write(self, writer: &mut BitWriter) {
        match self {
            DecorCoeff::NoDecor => writer.write_bits_u32(0, DECOR_PREFIX_BITS),
            DecorCoeff::MaxDecor => writer.write_bits_u32(1, DECOR_PREFIX_BITS),
            DecorCoeff::InStream(v) => {
                writer.write_bits_u32(2, DECOR_PREFIX_BITS);
                writer.write_bits_u32(v as u32, 8);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_position_round_trips_through_bits() {
        let pos = UnitCubePosition::from_unit(0.5, 0.25, 0.0).unwrap();
        let mut writer = BitWriter::new();
        pos.write(&mut writer);
        writer.align();
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        let decoded = UnitCubePosition::read(&mut reader).unwrap();
        assert_eq!(pos, decoded);
    }

    #[test]
    fn unit_cube_position_endpoints() {
        let zero = UnitCubePosition::from_unit(0.0, 0.0, 0.0).unwrap();
        assert_eq!(zero.x_raw(), 32767);
        assert_eq!(zero.z_raw(), 0);

        let one = UnitCubePosition::from_unit(1.0, 1.0, 1.0).unwrap();
        assert_eq!(one.x_raw(), 65535);
        assert_eq!(one.z_raw(), 65535);
    }

    #[test]
    fn gain_round_trips() {
        for g in [Gain::Unity, Gain::Silence, Gain::InStream(512)] {
            let mut writer = BitWriter::new();
            g.write(&mut writer);
            writer.align();
            let bytes = writer.into_bytes();
            let mut reader = BitReader::new(&bytes);
            assert_eq!(Gain::read(&mut reader).unwrap(), g);
        }
    }

    #[test]
    fn spread_round_trips() {
        for s in [
            Spread::None,
            Spread::LowRes1D(200),
            Spread::HighRes1D(4000),
            Spread::HighRes3D(100, 200, 300),
        ] {
            let mut writer = BitWriter::new();
            s.write(&mut writer);
            writer.align();
            let bytes = writer.into_bytes();
            let mut reader = BitReader::new(&bytes);
            assert_eq!(Spread::read(&mut reader).unwrap(), s);
        }
    }
}
