// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ObjectZoneDefinition19` (ID `0x80`): the 19-region room partitioning used to gate an object's
//! audibility per region, one [`Zone19SubBlockContents`] per frame-rate-dependent time slice.

use iab_core::errors::{out_of_range_error, Result};
use iab_core::io::{BitReader, BitWriter};
use iab_core::units::FrameRate;
use iab_core::value::ZoneGain;

use crate::elements::subblock::{read_sequence, write_sequence};

pub const ZONE19_COUNT: usize = 19;

/// The nineteen per-zone gains for one time slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone19SubBlockContents {
    pub gains: [ZoneGain; ZONE19_COUNT],
}

impl Zone19SubBlockContents {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let mut gains = [ZoneGain::Unity; ZONE19_COUNT];
        for gain in &mut gains {
            *gain = ZoneGain::read(reader)?;
        }
        Ok(Zone19SubBlockContents { gains })
    }

    fn write(&self, writer: &mut BitWriter) {
        for gain in self.gains {
            gain.write(writer);
        }
    }
}

/// An object's per-zone gain gating over the 19-zone room partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectZoneDefinition19 {
    /// Length equals [`FrameRate::sub_block_count`]; index 0 is always `Some`.
    pub sub_blocks: Vec<Option<Zone19SubBlockContents>>,
    pub packing_enabled: bool,
}

impl ObjectZoneDefinition19 {
    pub fn new(sub_blocks: Vec<Option<Zone19SubBlockContents>>) -> Self {
        ObjectZoneDefinition19 { sub_blocks, packing_enabled: true }
    }

    pub fn read(reader: &mut BitReader<'_>, frame_rate: FrameRate) -> Result<Self> {
        let count = frame_rate.sub_block_count();
        let sub_blocks = read_sequence(reader, count, Zone19SubBlockContents::read)?;
        Ok(ObjectZoneDefinition19 { sub_blocks, packing_enabled: true })
    }

    pub fn write(&self, writer: &mut BitWriter, frame_rate: FrameRate) -> Result<()> {
        if self.sub_blocks.len() != frame_rate.sub_block_count() {
            return out_of_range_error("zone19 sub-block count does not match the frame rate");
        }
        write_sequence(writer, &self.sub_blocks, |w, contents| contents.write(w));
        Ok(())
    }
}
