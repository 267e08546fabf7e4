// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ObjectDefinition` (ID `0x40`): a point (or volumetric) audio source with time-varying
//! position, gain, spread, zone gating, and decorrelation, carried as one [`ObjectPanSubBlock`]
//! per frame-rate-dependent time slice.

use iab_core::errors::{inconsistent_tree_error, malformed_stream_error, Result};
use iab_core::io::{BitReader, BitWriter};
use iab_core::units::FrameRate;
use iab_core::value::{DecorCoeff, Gain, Spread, UnitCubePosition, ZoneGain};

use crate::channel::UseCase;
use crate::elements::subblock::{read_sequence, write_sequence};
use crate::elements::{read_sub_elements, write_sub_elements, Element};
use crate::ids;

/// Fixed reserved value written after an object pan sub-block's gain. Parsing accepts any 3-bit
/// value (lenient); the validator flags deviation.
pub const PAN_SUB_BLOCK_RESERVED_VALUE: u32 = 0b001;

/// An object's snap-to-speaker behavior for one pan sub-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    pub present: bool,
    pub tolerance: Option<u16>,
}

impl Snap {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let present = reader.read_bit()?;
        if !present {
            return Ok(Snap { present: false, tolerance: None });
        }
        let tol_exists = reader.read_bit()?;
        let tolerance = if tol_exists { Some(reader.read_bits_u32(12)? as u16) } else { None };
        let _reserved = reader.read_bit()?;
        Ok(Snap { present: true, tolerance })
    }

    fn write(&self, writer: &mut BitWriter) {
        writer.write_bit(self.present);
        if !self.present {
            return;
        }
        writer.write_bit(self.tolerance.is_some());
        if let Some(tolerance) = self.tolerance {
            writer.write_bits_u32(tolerance as u32, 12);
        }
        writer.write_bit(false);
    }
}

/// The object's nine-zone gain gating: whether zone control is active for this sub-block and, if
/// so, the nine per-zone gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone9Gains {
    pub enabled: bool,
    pub gains: Option<[ZoneGain; 9]>,
}

impl Zone9Gains {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let enabled = reader.read_bit()?;
        if !enabled {
            return Ok(Zone9Gains { enabled: false, gains: None });
        }
        let mut gains = [ZoneGain::Unity; 9];
        for gain in &mut gains {
            *gain = ZoneGain::read(reader)?;
        }
        Ok(Zone9Gains { enabled: true, gains: Some(gains) })
    }

    fn write(&self, writer: &mut BitWriter) {
        writer.write_bit(self.enabled);
        if let Some(gains) = self.gains {
            for gain in gains {
                gain.write(writer);
            }
        }
    }
}

/// The contents of one object pan sub-block (present unconditionally on sub-block 0, gated by the
/// `panInfoExists` flag on every later sub-block; see [`crate::elements::subblock`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSubBlockContents {
    pub gain: Gain,
    pub position: UnitCubePosition,
    pub snap: Snap,
    pub zone9: Zone9Gains,
    pub spread: Spread,
    pub decor: DecorCoeff,
    /// Raw value of the 3-bit reserved field following `gain`, preserved as read (lenient parse);
    /// [`crate::validator`] flags a non-default value per constraint set.
    pub reserved_after_gain: u32,
    /// Raw value of the 4-bit reserved field following `spread`, same treatment.
    pub reserved_after_spread: u32,
}

impl PanSubBlockContents {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let gain = Gain::read(reader)?;
        let reserved_after_gain = reader.read_bits_u32(3)?;
        let position = UnitCubePosition::read(reader)?;
        let snap = Snap::read(reader)?;
        let zone9 = Zone9Gains::read(reader)?;
        let spread = Spread::read(reader)?;
        let reserved_after_spread = reader.read_bits_u32(4)?;
        let decor = DecorCoeff::read(reader)?;
        Ok(PanSubBlockContents {
            gain,
            position,
            snap,
            zone9,
            spread,
            decor,
            reserved_after_gain,
            reserved_after_spread,
        })
    }

    fn write(&self, writer: &mut BitWriter) {
        self.gain.write(writer);
        writer.write_bits_u32(self.reserved_after_gain, 3);
        self.position.write(writer);
        self.snap.write(writer);
        self.zone9.write(writer);
        self.spread.write(writer);
        writer.write_bits_u32(self.reserved_after_spread, 4);
        self.decor.write(writer);
    }
}

/// A point (or volumetric) object source.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDefinition {
    pub meta_id: u32,
    /// `0` means "no audio asset" when read as a metadata reference; invalid as the key of the
    /// `AudioDataDLC`/`AudioDataPCM` element it names (validator-checked).
    pub audio_data_id: u32,
    pub conditional: bool,
    pub use_case: Option<UseCase>,
    /// Length equals [`FrameRate::sub_block_count`]; index 0 is always `Some`.
    pub pan_sub_blocks: Vec<Option<PanSubBlockContents>>,
    pub audio_description: Vec<u8>,
    /// At most one [`Element::ObjectZoneDefinition19`].
    pub sub_elements: Vec<Element>,
    pub packing_enabled: bool,
    pub undefined_sub_element_count: usize,
    pub unallowed_sub_element_count: usize,
}

impl ObjectDefinition {
    pub fn new(meta_id: u32, audio_data_id: u32, pan_sub_blocks: Vec<Option<PanSubBlockContents>>) -> Self {
        ObjectDefinition {
            meta_id,
            audio_data_id,
            conditional: false,
            use_case: None,
            pan_sub_blocks,
            audio_description: Vec::new(),
            sub_elements: Vec::new(),
            packing_enabled: true,
            undefined_sub_element_count: 0,
            unallowed_sub_element_count: 0,
        }
    }

    fn is_allowed_child(id: u32) -> bool {
        id == ids::OBJECT_ZONE_DEFINITION_19
    }

    /// Replaces this object's sub-element list, rejecting more than one `ObjectZoneDefinition19`.
    pub fn set_sub_elements(&mut self, elements: Vec<Element>) -> Result<()> {
        let zone19_count =
            elements.iter().filter(|e| matches!(e, Element::ObjectZoneDefinition19(_))).count();
        if zone19_count > 1 {
            return inconsistent_tree_error("object carries more than one ObjectZoneDefinition19");
        }
        for element in &elements {
            if !matches!(element, Element::ObjectZoneDefinition19(_)) {
                return malformed_stream_error("only ObjectZoneDefinition19 may nest under an object");
            }
        }
        self.sub_elements = elements;
        Ok(())
    }

    pub fn take_sub_elements(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.sub_elements)
    }

    pub fn remove_sub_element(&mut self, index: usize) -> Element {
        self.sub_elements.remove(index)
    }

    pub fn read(reader: &mut BitReader<'_>, frame_rate: FrameRate) -> Result<Self> {
        let meta_id = reader.read_plex_u32(8)?;
        let audio_data_id = reader.read_plex_u32(8)?;
        let conditional = reader.read_bit()?;
        let use_case = if conditional { Some(UseCase::read(reader)?) } else { None };

        let count = frame_rate.sub_block_count();
        let pan_sub_blocks = read_sequence(reader, count, PanSubBlockContents::read)?;

        reader.align();
        let audio_description = reader.read_cstring()?;

        let _declared_sub_element_count = reader.read_plex_u32(8)?;
        let parsed = read_sub_elements(reader, frame_rate, Self::is_allowed_child)?;

        let mut object = ObjectDefinition {
            meta_id,
            audio_data_id,
            conditional,
            use_case,
            pan_sub_blocks,
            audio_description,
            sub_elements: Vec::new(),
            packing_enabled: true,
            undefined_sub_element_count: parsed.undefined_count,
            unallowed_sub_element_count: parsed.unallowed_count,
        };
        object.set_sub_elements(parsed.elements)?;
        Ok(object)
    }

    pub fn write(&self, writer: &mut BitWriter, frame_rate: FrameRate) -> Result<()> {
        writer.write_plex_u32(self.meta_id, 8);
        writer.write_plex_u32(self.audio_data_id, 8);
        writer.write_bit(self.conditional);
        if self.conditional {
            self.use_case.expect("conditional object must carry a use case").write(writer);
        }

        write_sequence(writer, &self.pan_sub_blocks, |w, contents| contents.write(w));

        writer.align();
        writer.write_cstring(&self.audio_description);

        write_sub_elements(writer, &self.sub_elements, frame_rate)
    }

    /// Whether this object contributes to `maxRendered` unconditionally: either it is structurally
    /// unconditional, or it carries `useCase == Always`.
    pub fn is_unconditionally_rendered(&self) -> bool {
        !self.conditional || self.use_case == Some(UseCase::Always)
    }
}
