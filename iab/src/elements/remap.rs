// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BedRemap` (ID `0x20`): a matrix mapping a bed's source channels to a destination layout, one
//! matrix per frame-rate-dependent time-sliced sub-block.

use iab_core::errors::{out_of_range_error, Result};
use iab_core::io::{BitReader, BitWriter};
use iab_core::units::FrameRate;
use iab_core::value::Gain;

use crate::channel::{ChannelId, UseCase};
use crate::elements::subblock::{read_sequence, write_sequence};

/// One destination channel's gain from every source channel, within one remap sub-block.
#[derive(Debug, Clone, PartialEq)]
pub struct RemapRow {
    pub dest_channel_id: ChannelId,
    /// One gain per source channel; length equals the enclosing `BedRemap`'s `source_channels`.
    pub gains: Vec<Gain>,
}

/// The contents of one remap time slice: one [`RemapRow`] per destination channel.
#[derive(Debug, Clone, PartialEq)]
pub struct BedRemapSubBlockContents {
    pub rows: Vec<RemapRow>,
}

impl BedRemapSubBlockContents {
    fn read(reader: &mut BitReader<'_>, source_channels: usize, destination_channels: usize) -> Result<Self> {
        let mut rows = Vec::with_capacity(destination_channels);
        for _ in 0..destination_channels {
            let dest_channel_id = ChannelId::read(reader)?;
            let mut gains = Vec::with_capacity(source_channels);
            for _ in 0..source_channels {
                gains.push(Gain::read(reader)?);
            }
            rows.push(RemapRow { dest_channel_id, gains });
        }
        Ok(BedRemapSubBlockContents { rows })
    }

    fn write(&self, writer: &mut BitWriter) {
        for row in &self.rows {
            row.dest_channel_id.write(writer);
            for gain in &row.gains {
                gain.write(writer);
            }
        }
    }
}

/// A remap matrix from a bed's native channels to a target layout, one matrix per sub-block in
/// the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BedRemap {
    pub meta_id: u32,
    pub use_case: UseCase,
    pub source_channels: usize,
    pub destination_channels: usize,
    /// Length equals [`FrameRate::sub_block_count`]; index 0 is always `Some`.
    pub sub_blocks: Vec<Option<BedRemapSubBlockContents>>,
    pub packing_enabled: bool,
}

impl BedRemap {
    pub fn read(reader: &mut BitReader<'_>, frame_rate: FrameRate) -> Result<Self> {
        let meta_id = reader.read_plex_u32(8)?;
        let use_case = UseCase::read(reader)?;
        let source_channels = reader.read_plex_u32(4)? as usize;
        let destination_channels = reader.read_plex_u32(4)? as usize;

        let count = frame_rate.sub_block_count();
        let sub_blocks = read_sequence(reader, count, |r| {
            BedRemapSubBlockContents::read(r, source_channels, destination_channels)
        })?;

        Ok(BedRemap {
            meta_id,
            use_case,
            source_channels,
            destination_channels,
            sub_blocks,
            packing_enabled: true,
        })
    }

    pub fn write(&self, writer: &mut BitWriter, frame_rate: FrameRate) -> Result<()> {
        if self.sub_blocks.len() != frame_rate.sub_block_count() {
            return out_of_range_error("remap sub-block count does not match the frame rate");
        }
        writer.write_plex_u32(self.meta_id, 8);
        self.use_case.write(writer);
        writer.write_plex_u32(self.source_channels as u32, 4);
        writer.write_plex_u32(self.destination_channels as u32, 4);

        write_sequence(writer, &self.sub_blocks, |w, contents| contents.write(w));
        Ok(())
    }
}
