// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The outermost frame container: two length-prefixed subframes, an opaque preamble (carried
//! verbatim, e.g. monitoring PCM) followed by the IA subframe whose payload is one `IAFrame`
//! element.

use iab_core::errors::{malformed_stream_error, Result};
use iab_core::io::{BitReader, BitWriter};

use crate::elements::IaFrame;
use crate::ids;

/// The result of parsing one complete bitstream frame: its preamble, if present, and the decoded
/// `IAFrame` tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBitstreamFrame {
    /// `None` when the preamble subframe was missing. A missing preamble is not fatal: parsing
    /// resumes at the IA subframe that follows.
    pub preamble: Option<Vec<u8>>,
    pub frame: IaFrame,
}

/// Parses one complete bitstream frame (preamble subframe, if present, followed by the IA
/// subframe) from `bytes`.
pub fn parse_frame(bytes: &[u8]) -> Result<ParsedBitstreamFrame> {
    let mut reader = BitReader::new(bytes);

    let mut tag = reader.read_bits_u32(8)? as u8;
    let mut preamble = None;

    if tag == ids::PREAMBLE_SUBFRAME_TAG {
        let length = reader.read_bits_u32(32)? as usize;
        preamble = Some(reader.read_byte_slice(length)?.to_vec());
        tag = reader.read_bits_u32(8)? as u8;
    }
    else {
        log::warn!("IAB frame is missing its preamble subframe; continuing from the IA subframe");
    }

    if tag != ids::IA_SUBFRAME_TAG {
        return malformed_stream_error("expected an IA subframe tag");
    }

    let length = reader.read_bits_u32(32)? as usize;
    let ia_subframe_payload = reader.read_byte_slice(length)?;

    let mut element_reader = BitReader::new(ia_subframe_payload);
    let element_id = element_reader.read_plex_u32(8)?;
    if element_id != ids::IA_FRAME {
        return malformed_stream_error("IA subframe payload is not an IAFrame element");
    }
    let element_size = element_reader.read_plex_u32(8)? as usize;
    let frame_body = element_reader.read_byte_slice(element_size)?;

    let mut frame_reader = BitReader::new(frame_body);
    let frame = IaFrame::read(&mut frame_reader)?;

    Ok(ParsedBitstreamFrame { preamble, frame })
}

/// Serializes `frame` (and, if given, a preamble payload to carry verbatim) into one complete
/// bitstream frame.
pub fn serialize_frame(preamble: Option<&[u8]>, frame: &IaFrame) -> Result<Vec<u8>> {
    let mut frame_writer = BitWriter::new();
    frame.write(&mut frame_writer)?;
    frame_writer.align();
    let frame_body = frame_writer.into_bytes();

    let mut element_writer = BitWriter::new();
    element_writer.write_plex_u32(ids::IA_FRAME, 8);
    element_writer.write_plex_u32(frame_body.len() as u32, 8);
    element_writer.write_bytes(&frame_body);
    element_writer.align();
    let ia_subframe_payload = element_writer.into_bytes();

    let mut writer = BitWriter::new();
    if let Some(preamble_bytes) = preamble {
        writer.write_bits_u32(ids::PREAMBLE_SUBFRAME_TAG as u32, 8);
        writer.write_bits_u32(preamble_bytes.len() as u32, 32);
        writer.write_bytes(preamble_bytes);
    }
    writer.write_bits_u32(ids::IA_SUBFRAME_TAG as u32, 8);
    writer.write_bits_u32(ia_subframe_payload.len() as u32, 32);
    writer.write_bytes(&ia_subframe_payload);
    writer.align();

    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iab_core::units::{BitDepth, FrameRate, SampleRate};

    #[test]
    fn empty_frame_round_trips_without_a_preamble() {
        let frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
        let bytes = serialize_frame(None, &frame).unwrap();

        let parsed = parse_frame(&bytes).unwrap();
        assert!(parsed.preamble.is_none());
        assert_eq!(parsed.frame, frame);
    }

    #[test]
    fn preamble_payload_round_trips_verbatim() {
        let frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
        let preamble = vec![0xAA, 0xBB, 0xCC];
        let bytes = serialize_frame(Some(&preamble), &frame).unwrap();

        let parsed = parse_frame(&bytes).unwrap();
        assert_eq!(parsed.preamble, Some(preamble));
        assert_eq!(parsed.frame, frame);
    }
}
