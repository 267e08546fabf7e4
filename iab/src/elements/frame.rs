// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `IAFrame` (ID `0x08`): the root element of one IAB frame, carrying the frame's format
//! parameters and its tree of beds, objects, and ancillary elements.

use std::collections::BTreeMap;

use iab_core::errors::{inconsistent_tree_error, malformed_stream_error, Result};
use iab_core::io::{BitReader, BitWriter};
use iab_core::units::{BitDepth, FrameRate, SampleRate};

use crate::channel::UseCase;
use crate::elements::{read_sub_elements, write_sub_elements, Element};
use crate::ids;

/// The root element of one IAB frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IaFrame {
    pub version: u8,
    pub sample_rate: SampleRate,
    pub bit_depth: BitDepth,
    pub frame_rate: FrameRate,
    /// `maxRendered` as read from the stream. [`IaFrame::write`] never writes this value back;
    /// it always recomputes the field live from `sub_elements` via [`Self::compute_max_rendered`]
    /// so a caller that edits the tree cannot leave a stale count on the wire. Comparing this
    /// field against a fresh [`Self::compute_max_rendered`] call is how the validator flags a
    /// frame whose author computed it incorrectly.
    pub declared_max_rendered: u32,
    /// Limited to `BedDefinition`, `ObjectDefinition`, `AuthoringToolInfo`, `UserData`,
    /// `AudioDataDLC`, `AudioDataPCM`. At most one `AuthoringToolInfo`.
    pub sub_elements: Vec<Element>,
    pub undefined_sub_element_count: usize,
    pub unallowed_sub_element_count: usize,
}

impl IaFrame {
    pub fn new(sample_rate: SampleRate, bit_depth: BitDepth, frame_rate: FrameRate) -> Self {
        IaFrame {
            version: 1,
            sample_rate,
            bit_depth,
            frame_rate,
            declared_max_rendered: 0,
            sub_elements: Vec::new(),
            undefined_sub_element_count: 0,
            unallowed_sub_element_count: 0,
        }
    }

    fn is_allowed_child(id: u32) -> bool {
        matches!(
            id,
            ids::BED_DEFINITION
                | ids::OBJECT_DEFINITION
                | ids::AUTHORING_TOOL_INFO
                | ids::USER_DATA
                | ids::AUDIO_DATA_DLC
                | ids::AUDIO_DATA_PCM
        )
    }

    /// Replaces the frame's sub-element list, rejecting more than one `AuthoringToolInfo`, a
    /// duplicate `metaID` among nested `BedDefinition`s or among `ObjectDefinition`s, or any
    /// child outside the set `is_allowed_child` permits.
    pub fn set_sub_elements(&mut self, elements: Vec<Element>) -> Result<()> {
        let mut seen_bed_ids = std::collections::HashSet::new();
        let mut seen_object_ids = std::collections::HashSet::new();
        let mut authoring_tool_info_count = 0;

        for element in &elements {
            let id = element.id();
            if !Self::is_allowed_child(id) {
                return malformed_stream_error("element type may not nest directly under an IAFrame");
            }
            match element {
                Element::BedDefinition(b) => {
                    if !seen_bed_ids.insert(b.meta_id) {
                        return inconsistent_tree_error("duplicate BedDefinition metaID in frame");
                    }
                }
                Element::ObjectDefinition(o) => {
                    if !seen_object_ids.insert(o.meta_id) {
                        return inconsistent_tree_error("duplicate ObjectDefinition metaID in frame");
                    }
                }
                Element::AuthoringToolInfo(_) => {
                    authoring_tool_info_count += 1;
                    if authoring_tool_info_count > 1 {
                        return inconsistent_tree_error("more than one AuthoringToolInfo in frame");
                    }
                }
                _ => {}
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

    /// The worst-case number of assets (bed channels and objects) rendered simultaneously: the
    /// sum of every unconditionally-rendered bed's channel count and object, plus the single
    /// largest conditional use case's total (each conditional use case excludes the others, so
    /// only the worst one needs to be counted, not their sum).
    pub fn compute_max_rendered(&self) -> u32 {
        let mut unconditional = 0u32;
        let mut by_use_case: BTreeMap<UseCase, u32> = BTreeMap::new();

        for element in &self.sub_elements {
            match element {
                Element::BedDefinition(bed) if bed.packing_enabled => {
                    let count = bed_effective_channel_count(bed);
                    if !bed.conditional || bed.use_case == Some(UseCase::Always) {
                        unconditional += count;
                    }
                    else if let Some(use_case) = bed.use_case {
                        *by_use_case.entry(use_case).or_insert(0) += count;
                    }
                }
                Element::ObjectDefinition(object) if object.packing_enabled => {
                    if object.is_unconditionally_rendered() {
                        unconditional += 1;
                    }
                    else if let Some(use_case) = object.use_case {
                        *by_use_case.entry(use_case).or_insert(0) += 1;
                    }
                }
                _ => {}
            }
        }

        unconditional + by_use_case.values().copied().max().unwrap_or(0)
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let version = reader.read_bits_u32(8)? as u8;
        let sample_rate = SampleRate::from_code(reader.read_bits_u32(2)?)?;
        let bit_depth = BitDepth::from_code(reader.read_bits_u32(2)?)?;
        let frame_rate = FrameRate::from_code(reader.read_bits_u32(4)?)?;
        let declared_max_rendered = reader.read_plex_u32(8)?;

        let _declared_sub_element_count = reader.read_plex_u32(8)?;
        let parsed = read_sub_elements(reader, frame_rate, Self::is_allowed_child)?;

        let mut frame = IaFrame {
            version,
            sample_rate,
            bit_depth,
            frame_rate,
            declared_max_rendered,
            sub_elements: Vec::new(),
            undefined_sub_element_count: parsed.undefined_count,
            unallowed_sub_element_count: parsed.unallowed_count,
        };
        frame.set_sub_elements(parsed.elements)?;
        Ok(frame)
    }

    pub fn write(&self, writer: &mut BitWriter) -> Result<()> {
        writer.write_bits_u32(self.version as u32, 8);
        writer.write_bits_u32(self.sample_rate.code(), 2);
        writer.write_bits_u32(self.bit_depth.code(), 2);
        writer.write_bits_u32(self.frame_rate.code(), 4);
        writer.write_plex_u32(self.compute_max_rendered(), 8);

        write_sub_elements(writer, &self.sub_elements, self.frame_rate)
    }
}

/// A bed's contribution to `maxRendered` uses the largest channel count among itself and any
/// nested `BedDefinition` sub-elements (e.g. a downmix variant with more channels than its
/// parent).
fn bed_effective_channel_count(bed: &crate::elements::BedDefinition) -> u32 {
    let mut max_count = bed.channels.len() as u32;
    for sub_element in &bed.sub_elements {
        if let Element::BedDefinition(nested) = sub_element {
            max_count = max_count.max(bed_effective_channel_count(nested));
        }
    }
    max_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::bed::IabChannel;
    use crate::elements::object::{PanSubBlockContents, Snap, Zone9Gains, PAN_SUB_BLOCK_RESERVED_VALUE};
    use crate::elements::{AuthoringToolInfo, BedDefinition, ObjectDefinition};
    use crate::channel::ChannelId;
    use iab_core::value::{DecorCoeff, Gain, Spread, UnitCubePosition};

    fn silent_pan_block() -> PanSubBlockContents {
        PanSubBlockContents {
            gain: Gain::Unity,
            position: UnitCubePosition::from_unit(0.0, 0.0, 0.0).unwrap(),
            snap: Snap { present: false, tolerance: None },
            zone9: Zone9Gains { enabled: false, gains: None },
            spread: Spread::None,
            decor: DecorCoeff::NoDecor,
            reserved_after_gain: PAN_SUB_BLOCK_RESERVED_VALUE,
            reserved_after_spread: 0,
        }
    }

    #[test]
    fn empty_frame_round_trips_with_zero_max_rendered() {
        let frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
        assert_eq!(frame.compute_max_rendered(), 0);

        let mut writer = BitWriter::new();
        frame.write(&mut writer).unwrap();
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = IaFrame::read(&mut reader).unwrap();
        assert_eq!(decoded.sub_elements.len(), 0);
        assert_eq!(decoded.declared_max_rendered, 0);
    }

    #[test]
    fn bed_and_object_max_rendered_sums_unconditional_contributions() {
        let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
        let channels: Vec<IabChannel> = (1..=6)
            .map(|n| IabChannel { channel_id: ChannelId(n), audio_data_id: n, gain: Gain::Unity, decor: None })
            .collect();
        let bed = BedDefinition::new(1, channels);
        let pan_sub_blocks = vec![Some(silent_pan_block()); FrameRate::Fps24.sub_block_count()];
        let object = ObjectDefinition::new(2, 1, pan_sub_blocks);

        frame.set_sub_elements(vec![Element::BedDefinition(bed), Element::ObjectDefinition(object)]).unwrap();
        assert_eq!(frame.compute_max_rendered(), 7);
    }

    #[test]
    fn conditional_beds_take_the_larger_use_case_total() {
        let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);

        let mut bed_51 = BedDefinition::new(
            1,
            (1..=6).map(|n| IabChannel { channel_id: ChannelId(n), audio_data_id: n, gain: Gain::Unity, decor: None }).collect(),
        );
        bed_51.conditional = true;
        bed_51.use_case = Some(UseCase::Cinema51);

        let mut bed_71ds = BedDefinition::new(
            2,
            (1..=8).map(|n| IabChannel { channel_id: ChannelId(n), audio_data_id: n, gain: Gain::Unity, decor: None }).collect(),
        );
        bed_71ds.conditional = true;
        bed_71ds.use_case = Some(UseCase::Cinema71Ds);

        let pan_sub_blocks = vec![Some(silent_pan_block()); FrameRate::Fps24.sub_block_count()];
        let object = ObjectDefinition::new(3, 1, pan_sub_blocks);

        frame
            .set_sub_elements(vec![
                Element::BedDefinition(bed_51),
                Element::BedDefinition(bed_71ds),
                Element::ObjectDefinition(object),
            ])
            .unwrap();
        assert_eq!(frame.compute_max_rendered(), 9);
    }

    #[test]
    fn more_than_one_authoring_tool_info_is_rejected() {
        let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
        let result = frame.set_sub_elements(vec![
            Element::AuthoringToolInfo(AuthoringToolInfo::new(&b"tool-a"[..])),
            Element::AuthoringToolInfo(AuthoringToolInfo::new(&b"tool-b"[..])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn bed_remap_may_not_nest_directly_under_a_frame() {
        use crate::elements::remap::{BedRemap, BedRemapSubBlockContents, RemapRow};
        let contents = BedRemapSubBlockContents { rows: vec![RemapRow { dest_channel_id: ChannelId(1), gains: vec![Gain::Unity] }] };
        let mut sub_blocks = vec![Some(contents)];
        sub_blocks.resize(FrameRate::Fps24.sub_block_count(), None);
        let remap = BedRemap {
            meta_id: 1,
            use_case: UseCase::Always,
            source_channels: 1,
            destination_channels: 1,
            sub_blocks,
            packing_enabled: true,
        };

        let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
        assert!(frame.set_sub_elements(vec![Element::BedRemap(remap)]).is_err());
    }
}
