// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BedDefinition` (ID `0x10`): a channel-based program with a declared speaker layout, and its
//! `IABChannel` sub-block entities.

use iab_core::errors::{inconsistent_tree_error, malformed_stream_error, Result};
use iab_core::io::{BitReader, BitWriter};
use iab_core::value::{DecorCoeff, Gain};

use crate::channel::{ChannelId, UseCase};
use crate::elements::{read_sub_elements, write_sub_elements, Element};
use crate::ids;
use iab_core::units::FrameRate;

/// Fixed reserved value written after a bed's channel list. The parser accepts any 10-bit value
/// here (lenient parse); the validator is the layer that flags a non-default value.
pub const BED_RESERVED_VALUE: u32 = 0x180;

/// One channel of a bed: which speaker feed it is, which audio asset renders through it, its gain,
/// and an optional decorrelation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IabChannel {
    pub channel_id: ChannelId,
    /// `0` means "no audio asset" when read as a metadata reference.
    pub audio_data_id: u32,
    pub gain: Gain,
    pub decor: Option<DecorCoeff>,
}

impl IabChannel {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let channel_id = ChannelId::read(reader)?;
        let audio_data_id = reader.read_plex_u32(8)?;
        let gain = Gain::read(reader)?;
        let decor = if reader.read_bit()? {
            let _reserved = reader.read_bits_u32(4)?;
            Some(DecorCoeff::read(reader)?)
        }
        else {
            None
        };
        Ok(IabChannel { channel_id, audio_data_id, gain, decor })
    }

    pub fn write(&self, writer: &mut BitWriter) {
        self.channel_id.write(writer);
        writer.write_plex_u32(self.audio_data_id, 8);
        self.gain.write(writer);
        match self.decor {
            Some(decor) => {
                writer.write_bit(true);
                writer.write_bits_u32(0, 4);
                decor.write(writer);
            }
            None => writer.write_bit(false),
        }
    }
}

/// A channel-based bed: a fixed list of `IABChannel`s under one playback use case, optionally
/// carrying nested `BedDefinition`/`BedRemap` sub-elements (e.g. a downmix variant of the same
/// bed).
#[derive(Debug, Clone, PartialEq)]
pub struct BedDefinition {
    pub meta_id: u32,
    /// `true` when this bed is only active under a specific playback layout; `false` means the
    /// bed is unconditionally active and `use_case` is absent from the stream.
    pub conditional: bool,
    pub use_case: Option<UseCase>,
    pub channels: Vec<IabChannel>,
    pub audio_description: Vec<u8>,
    pub sub_elements: Vec<Element>,
    /// Raw value of the 10-bit reserved field following the channel list, preserved as read
    /// (lenient parse); [`crate::validator`] flags a non-default value per constraint set.
    pub reserved: u32,
    /// When `false`, this bed is excluded from packing at serialize time without being removed
    /// from the tree.
    pub packing_enabled: bool,
    /// Number of children skipped during parse because their element ID is not one this crate
    /// recognizes at all.
    pub undefined_sub_element_count: usize,
    /// Number of children skipped during parse because their element ID is recognized elsewhere
    /// in the model but is not a valid child of `BedDefinition` (only `BedDefinition`/`BedRemap`
    /// are).
    pub unallowed_sub_element_count: usize,
}

impl BedDefinition {
    pub fn new(meta_id: u32, channels: Vec<IabChannel>) -> Self {
        BedDefinition {
            meta_id,
            conditional: false,
            use_case: None,
            channels,
            audio_description: Vec::new(),
            sub_elements: Vec::new(),
            reserved: BED_RESERVED_VALUE,
            packing_enabled: true,
            undefined_sub_element_count: 0,
            unallowed_sub_element_count: 0,
        }
    }

    fn is_allowed_child(id: u32) -> bool {
        matches!(id, ids::BED_DEFINITION | ids::BED_REMAP)
    }

    /// Replaces this bed's sub-element list, rejecting a list containing two `BedDefinition`s or
    /// two `BedRemap`s with the same `metaID`.
    pub fn set_sub_elements(&mut self, elements: Vec<Element>) -> Result<()> {
        validate_bed_children(&elements)?;
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
        let conditional = reader.read_bit()?;
        let use_case = if conditional { Some(UseCase::read(reader)?) } else { None };

        let channel_count = reader.read_plex_u32(4)?;
        let mut channels = Vec::with_capacity(channel_count as usize);
        for _ in 0..channel_count {
            channels.push(IabChannel::read(reader)?);
        }

        let reserved = reader.read_bits_u32(10)?;
        reader.align();

        let audio_description = reader.read_cstring()?;

        let _declared_sub_element_count = reader.read_plex_u32(8)?;
        let parsed = read_sub_elements(reader, frame_rate, Self::is_allowed_child)?;

        let mut bed = BedDefinition {
            meta_id,
            conditional,
            use_case,
            channels,
            audio_description,
            sub_elements: Vec::new(),
            reserved,
            packing_enabled: true,
            undefined_sub_element_count: parsed.undefined_count,
            unallowed_sub_element_count: parsed.unallowed_count,
        };
        bed.set_sub_elements(parsed.elements)?;
        Ok(bed)
    }

    pub fn write(&self, writer: &mut BitWriter, frame_rate: FrameRate) -> Result<()> {
        writer.write_plex_u32(self.meta_id, 8);
        writer.write_bit(self.conditional);
        if self.conditional {
            self.use_case.expect("conditional bed must carry a use case").write(writer);
        }

        writer.write_plex_u32(self.channels.len() as u32, 4);
        for channel in &self.channels {
            channel.write(writer);
        }

        writer.write_bits_u32(self.reserved, 10);
        writer.align();

        writer.write_cstring(&self.audio_description);

        write_sub_elements(writer, &self.sub_elements, frame_rate)
    }
}

fn validate_bed_children(elements: &[Element]) -> Result<()> {
    use std::collections::HashSet;
    let mut seen_bed_ids = HashSet::new();
    let mut seen_remap_ids = HashSet::new();

    for element in elements {
        match element {
            Element::BedDefinition(b) => {
                if !seen_bed_ids.insert(b.meta_id) {
                    return inconsistent_tree_error("duplicate BedDefinition metaID under a bed");
                }
            }
            Element::BedRemap(r) => {
                if !seen_remap_ids.insert(r.meta_id) {
                    return inconsistent_tree_error("duplicate BedRemap metaID under a bed");
                }
            }
            _ => return malformed_stream_error("only BedDefinition/BedRemap may nest under a bed"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_channels() -> Vec<IabChannel> {
        vec![
            IabChannel { channel_id: ChannelId::LEFT, audio_data_id: 1, gain: Gain::Unity, decor: None },
            IabChannel {
                channel_id: ChannelId::RIGHT,
                audio_data_id: 2,
                gain: Gain::InStream(64),
                decor: Some(DecorCoeff::MaxDecor),
            },
        ]
    }

    #[test]
    fn bed_round_trips() {
        let mut bed = BedDefinition::new(10, sample_channels());
        bed.audio_description = b"5.1 bed".to_vec();

        let mut writer = BitWriter::new();
        bed.write(&mut writer, FrameRate::Fps24).unwrap();
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = BedDefinition::read(&mut reader, FrameRate::Fps24).unwrap();
        assert_eq!(decoded, bed);
    }

    #[test]
    fn conditional_bed_round_trips_use_case() {
        let mut bed = BedDefinition::new(11, sample_channels());
        bed.conditional = true;
        bed.use_case = Some(UseCase::Cinema51);

        let mut writer = BitWriter::new();
        bed.write(&mut writer, FrameRate::Fps24).unwrap();
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = BedDefinition::read(&mut reader, FrameRate::Fps24).unwrap();
        assert_eq!(decoded.use_case, Some(UseCase::Cinema51));
    }

    #[test]
    fn duplicate_nested_bed_id_is_rejected() {
        let mut bed = BedDefinition::new(1, sample_channels());
        let nested_a = BedDefinition::new(2, sample_channels());
        let nested_b = BedDefinition::new(2, sample_channels());
        let result =
            bed.set_sub_elements(vec![Element::BedDefinition(nested_a), Element::BedDefinition(nested_b)]);
        assert!(result.is_err());
    }
}
