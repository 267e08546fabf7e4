// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel identity and playback use case.
//!
//! `ChannelId` is a newtype over the Plex(4)-coded channel number rather than an exhaustive enum:
//! the core cinema set, the D-Cinema reserved range, and the ITU-R BS.2051 labels together name
//! more than thirty channels, most of which no validator or test in this crate cares about
//! individually. Named associated constants cover the channels actually exercised by the
//! constraint sets; any other in-range code round-trips fine as a bare `ChannelId`.

use iab_core::errors::{malformed_stream_error, Result};
use iab_core::io::{BitReader, BitWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u32);

impl ChannelId {
    pub const LEFT: ChannelId = ChannelId(1);
    pub const CENTER: ChannelId = ChannelId(2);
    pub const RIGHT: ChannelId = ChannelId(3);
    pub const LEFT_SURROUND: ChannelId = ChannelId(4);
    pub const RIGHT_SURROUND: ChannelId = ChannelId(5);
    pub const LFE: ChannelId = ChannelId(6);
    pub const LEFT_REAR_SURROUND: ChannelId = ChannelId(7);
    pub const RIGHT_REAR_SURROUND: ChannelId = ChannelId(8);
    pub const LEFT_CENTER: ChannelId = ChannelId(9);
    pub const RIGHT_CENTER: ChannelId = ChannelId(10);
    pub const LEFT_TOP_SURROUND: ChannelId = ChannelId(11);
    pub const RIGHT_TOP_SURROUND: ChannelId = ChannelId(12);
    pub const LEFT_SIDE_SURROUND: ChannelId = ChannelId(13);
    pub const RIGHT_SIDE_SURROUND: ChannelId = ChannelId(14);
    pub const LEFT_HEIGHT: ChannelId = ChannelId(15);
    pub const RIGHT_HEIGHT: ChannelId = ChannelId(16);
    pub const LEFT_TOP_FRONT: ChannelId = ChannelId(17);
    pub const RIGHT_TOP_FRONT: ChannelId = ChannelId(18);
    pub const LEFT_TOP_REAR: ChannelId = ChannelId(19);
    pub const RIGHT_TOP_REAR: ChannelId = ChannelId(20);
    pub const TOP_SURROUND: ChannelId = ChannelId(21);
    pub const LFE2: ChannelId = ChannelId(22);
    pub const CENTER_SURROUND: ChannelId = ChannelId(23);
    pub const TOP_CENTER_SURROUND: ChannelId = ChannelId(24);

    /// First code in the D-Cinema reserved channel ID range.
    pub const DCINEMA_RESERVED_START: u32 = 25;
    /// Last code in the D-Cinema reserved channel ID range (inclusive).
    pub const DCINEMA_RESERVED_END: u32 = 127;

    /// First code of the ten ITU-R BS.2051 labels carried alongside the cinema set.
    pub const ITU_START: u32 = 128;
    /// Last code of the ITU-R BS.2051 label range (inclusive).
    pub const ITU_END: u32 = 137;

    pub fn is_core_cinema(self) -> bool {
        (1..=24).contains(&self.0)
    }

    pub fn is_dcinema_reserved(self) -> bool {
        (Self::DCINEMA_RESERVED_START..=Self::DCINEMA_RESERVED_END).contains(&self.0)
    }

    pub fn is_itu(self) -> bool {
        (Self::ITU_START..=Self::ITU_END).contains(&self.0)
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(ChannelId(reader.read_plex_u32(4)?))
    }

    pub fn write(self, writer: &mut BitWriter) {
        writer.write_plex_u32(self.0, 4);
    }
}

/// A playback layout label. `Always` marks an element as unconditionally active regardless of
/// the active layout; every other variant names one specific layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    Always,
    Cinema51,
    Cinema71Ds,
    Cinema71Sds,
    Cinema91Oh,
    Cinema111Ht,
    Cinema131Ht,
    ItuA,
    ItuD,
    ItuJ,
}

impl UseCase {
    pub fn from_code(code: u32) -> Result<Self> {
        Ok(match code {
            0 => UseCase::Always,
            1 => UseCase::Cinema51,
            2 => UseCase::Cinema71Ds,
            3 => UseCase::Cinema71Sds,
            4 => UseCase::Cinema91Oh,
            5 => UseCase::Cinema111Ht,
            6 => UseCase::Cinema131Ht,
            7 => UseCase::ItuA,
            8 => UseCase::ItuD,
            9 => UseCase::ItuJ,
            _ => return malformed_stream_error("unrecognized use case code"),
        })
    }

    pub fn code(self) -> u32 {
        match self {
            UseCase::Always => 0,
            UseCase::Cinema51 => 1,
            UseCase::Cinema71Ds => 2,
            UseCase::Cinema71Sds => 3,
            UseCase::Cinema91Oh => 4,
            UseCase::Cinema111Ht => 5,
            UseCase::Cinema131Ht => 6,
            UseCase::ItuA => 7,
            UseCase::ItuD => 8,
            UseCase::ItuJ => 9,
        }
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Self::from_code(reader.read_bits_u32(8)?)
    }

    pub fn write(self, writer: &mut BitWriter) {
        writer.write_bits_u32(self.code(), 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_id_round_trips() {
        for id in [ChannelId::LEFT, ChannelId::CENTER, ChannelId(200)] {
            let mut writer = BitWriter::new();
            id.write(&mut writer);
            writer.align();
            let bytes = writer.into_bytes();
            let mut reader = BitReader::new(&bytes);
            assert_eq!(ChannelId::read(&mut reader).unwrap(), id);
        }
    }

    #[test]
    fn use_case_round_trips() {
        for code in 0..10 {
            let uc = UseCase::from_code(code).unwrap();
            assert_eq!(uc.code(), code);
        }
        assert!(UseCase::from_code(10).is_err());
    }
}
