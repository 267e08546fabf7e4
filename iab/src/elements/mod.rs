// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The element model: one type per element in the table, joined by the [`Element`] tagged union
//! and the generic sub-element parse/write loop every container (`BedDefinition`, `ObjectDefinition`,
//! `IAFrame`) shares.
//!
//! Every element is framed the same way on the wire: a Plex(8) element ID, a Plex(8) byte length,
//! then that many payload bytes. Because the length is always known up front, a container reads a
//! child's payload into its own byte slice and hands a fresh [`BitReader`] over just that slice to
//! the matching type's `read`; the reverse happens by building the child's payload in a scratch
//! [`BitWriter`], aligning it, and splicing the result into the parent.

pub mod audio_data;
pub mod authoring;
pub mod bed;
pub mod frame;
pub mod object;
pub mod remap;
pub mod subblock;
pub mod user_data;
pub mod zone;

use iab_core::errors::Result;
use iab_core::io::{BitReader, BitWriter};
use iab_core::units::FrameRate;

use crate::ids;

pub use audio_data::{AudioDataDlc, AudioDataPcm};
pub use authoring::AuthoringToolInfo;
pub use bed::BedDefinition;
pub use frame::IaFrame;
pub use object::ObjectDefinition;
pub use remap::BedRemap;
pub use user_data::UserData;
pub use zone::ObjectZoneDefinition19;

/// One parsed element, tagged by which variant of the element table it is.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    BedDefinition(BedDefinition),
    BedRemap(BedRemap),
    ObjectDefinition(ObjectDefinition),
    ObjectZoneDefinition19(ObjectZoneDefinition19),
    AuthoringToolInfo(AuthoringToolInfo),
    UserData(UserData),
    AudioDataDlc(AudioDataDlc),
    AudioDataPcm(AudioDataPcm),
}

impl Element {
    /// The element ID this value serializes under.
    pub fn id(&self) -> u32 {
        match self {
            Element::BedDefinition(_) => ids::BED_DEFINITION,
            Element::BedRemap(_) => ids::BED_REMAP,
            Element::ObjectDefinition(_) => ids::OBJECT_DEFINITION,
            Element::ObjectZoneDefinition19(_) => ids::OBJECT_ZONE_DEFINITION_19,
            Element::AuthoringToolInfo(_) => ids::AUTHORING_TOOL_INFO,
            Element::UserData(_) => ids::USER_DATA,
            Element::AudioDataDlc(_) => ids::AUDIO_DATA_DLC,
            Element::AudioDataPcm(_) => ids::AUDIO_DATA_PCM,
        }
    }

    /// Whether this element should be included the next time its parent is serialized.
    pub fn packing_enabled(&self) -> bool {
        match self {
            Element::BedDefinition(e) => e.packing_enabled,
            Element::BedRemap(e) => e.packing_enabled,
            Element::ObjectDefinition(e) => e.packing_enabled,
            Element::ObjectZoneDefinition19(e) => e.packing_enabled,
            Element::AuthoringToolInfo(_) => true,
            Element::UserData(_) => true,
            Element::AudioDataDlc(_) => true,
            Element::AudioDataPcm(_) => true,
        }
    }
}

/// Whether `id` names an element this crate recognizes at all, regardless of whether it is a
/// valid child in the position it was found.
pub fn is_known_element_id(id: u32) -> bool {
    matches!(
        id,
        ids::BED_DEFINITION
            | ids::BED_REMAP
            | ids::OBJECT_DEFINITION
            | ids::OBJECT_ZONE_DEFINITION_19
            | ids::AUTHORING_TOOL_INFO
            | ids::USER_DATA
            | ids::AUDIO_DATA_DLC
            | ids::AUDIO_DATA_PCM
    )
}

fn read_element_body(id: u32, reader: &mut BitReader<'_>, frame_rate: FrameRate) -> Result<Element> {
    Ok(match id {
        ids::BED_DEFINITION => Element::BedDefinition(BedDefinition::read(reader, frame_rate)?),
        ids::BED_REMAP => Element::BedRemap(BedRemap::read(reader, frame_rate)?),
        ids::OBJECT_DEFINITION => Element::ObjectDefinition(ObjectDefinition::read(reader, frame_rate)?),
        ids::OBJECT_ZONE_DEFINITION_19 => {
            Element::ObjectZoneDefinition19(ObjectZoneDefinition19::read(reader, frame_rate)?)
        }
        ids::AUTHORING_TOOL_INFO => Element::AuthoringToolInfo(AuthoringToolInfo::read(reader)?),
        ids::USER_DATA => Element::UserData(UserData::read(reader)?),
        ids::AUDIO_DATA_DLC => Element::AudioDataDlc(AudioDataDlc::read(reader)?),
        ids::AUDIO_DATA_PCM => Element::AudioDataPcm(AudioDataPcm::read(reader)?),
        _ => unreachable!("read_element_body called with an unrecognized element id"),
    })
}

fn write_element_body(writer: &mut BitWriter, element: &Element, frame_rate: FrameRate) -> Result<()> {
    match element {
        Element::BedDefinition(e) => e.write(writer, frame_rate),
        Element::BedRemap(e) => e.write(writer, frame_rate),
        Element::ObjectDefinition(e) => e.write(writer, frame_rate),
        Element::ObjectZoneDefinition19(e) => e.write(writer, frame_rate),
        Element::AuthoringToolInfo(e) => {
            e.write(writer);
            Ok(())
        }
        Element::UserData(e) => {
            e.write(writer);
            Ok(())
        }
        Element::AudioDataDlc(e) => e.write(writer),
        Element::AudioDataPcm(e) => {
            e.write(writer);
            Ok(())
        }
    }
}

/// The result of parsing a container's sub-element list: the elements this crate could place in
/// the tree, plus counts of what was skipped and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSubElements {
    pub elements: Vec<Element>,
    /// Children whose element ID this crate does not recognize at all.
    pub undefined_count: usize,
    /// Children with a recognized element ID that is nonetheless not a valid child of the
    /// container being parsed.
    pub unallowed_count: usize,
}

/// Reads a container's sub-element list: each child carries its own ID and byte length, so parsing
/// continues until the enclosing byte range (already sliced out by the caller) is exhausted. A
/// child with an unrecognized or disallowed ID is skipped rather than failing the whole parse, so
/// a frame from a newer profile revision still yields the elements this crate does understand.
pub fn read_sub_elements(
    reader: &mut BitReader<'_>,
    frame_rate: FrameRate,
    is_allowed_child: impl Fn(u32) -> bool,
) -> Result<ParsedSubElements> {
    let mut out = ParsedSubElements::default();
    while reader.bits_left() > 0 {
        let id = reader.read_plex_u32(8)?;
        let size = reader.read_plex_u32(8)? as usize;
        let payload = reader.read_byte_slice(size)?;

        if !is_known_element_id(id) {
            out.undefined_count += 1;
            continue;
        }
        if !is_allowed_child(id) {
            out.unallowed_count += 1;
            continue;
        }

        let mut sub_reader = BitReader::new(payload);
        out.elements.push(read_element_body(id, &mut sub_reader, frame_rate)?);
    }
    Ok(out)
}

/// Writes a container's sub-element list: a Plex(8) count of the elements actually packed,
/// followed by each one framed with its own ID and byte length. Elements with
/// `packing_enabled() == false` are omitted and not counted.
pub fn write_sub_elements(writer: &mut BitWriter, elements: &[Element], frame_rate: FrameRate) -> Result<()> {
    let packed: Vec<&Element> = elements.iter().filter(|e| e.packing_enabled()).collect();
    writer.write_plex_u32(packed.len() as u32, 8);
    for element in packed {
        let mut sub_writer = BitWriter::new();
        write_element_body(&mut sub_writer, element, frame_rate)?;
        sub_writer.align();
        let payload = sub_writer.into_bytes();

        writer.write_plex_u32(element.id(), 8);
        writer.write_plex_u32(payload.len() as u32, 8);
        writer.write_bytes(&payload);
    }
    Ok(())
}
