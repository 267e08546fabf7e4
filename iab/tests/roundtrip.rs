// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use iab::channel::{ChannelId, UseCase};
use iab::container::{parse_frame, serialize_frame};
use iab::elements::bed::IabChannel;
use iab::elements::object::{PanSubBlockContents, Snap, Zone9Gains, PAN_SUB_BLOCK_RESERVED_VALUE};
use iab::{AudioDataDlc, BedDefinition, Element, IaFrame, ObjectDefinition};
use iab_codec_dlc::SimpleEncoder;
use iab_core::units::{BitDepth, FrameRate, SampleRate};
use iab_core::value::{DecorCoeff, Gain, Spread, UnitCubePosition};

fn silent_pan_block() -> PanSubBlockContents {
    PanSubBlockContents {
        gain: Gain::Unity,
        position: UnitCubePosition::from_unit(0.5, 0.5, 0.0).unwrap(),
        snap: Snap { present: false, tolerance: None },
        zone9: Zone9Gains { enabled: false, gains: None },
        spread: Spread::None,
        decor: DecorCoeff::NoDecor,
        reserved_after_gain: PAN_SUB_BLOCK_RESERVED_VALUE,
        reserved_after_spread: 0,
    }
}

#[test]
fn empty_frame_serializes_and_parses_back_identically() {
    let frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
    let bytes = serialize_frame(None, &frame).unwrap();
    let parsed = parse_frame(&bytes).unwrap();

    assert!(parsed.preamble.is_none());
    assert_eq!(parsed.frame, frame);
    assert_eq!(parsed.frame.compute_max_rendered(), 0);
}

#[test]
fn single_silent_object_with_dlc_audio_round_trips_at_24fps_48k_24bit() {
    let frame_rate = FrameRate::Fps24;
    let sample_rate = SampleRate::Hz48000;
    let bit_depth = BitDepth::Bits24;

    let layout = frame_rate.dlc_layout(sample_rate);
    let samples = vec![0i32; layout.frame_samples()];
    let mut encoder = SimpleEncoder::new();
    let audio =
        AudioDataDlc::encode(1, &mut encoder, &samples, bit_depth, sample_rate, frame_rate).unwrap();

    let pan_sub_blocks = vec![Some(silent_pan_block()); frame_rate.sub_block_count()];
    let object = ObjectDefinition::new(1, 1, pan_sub_blocks);

    let mut frame = IaFrame::new(sample_rate, bit_depth, frame_rate);
    frame
        .set_sub_elements(vec![Element::ObjectDefinition(object), Element::AudioDataDlc(audio)])
        .unwrap();

    let bytes = serialize_frame(None, &frame).unwrap();
    let parsed = parse_frame(&bytes).unwrap();

    assert_eq!(parsed.frame, frame);
    assert_eq!(parsed.frame.compute_max_rendered(), 1);
}

#[test]
fn bed_and_object_contribute_unconditionally_to_max_rendered() {
    let frame_rate = FrameRate::Fps24;
    let channels: Vec<IabChannel> = (1..=6)
        .map(|n| IabChannel { channel_id: ChannelId(n), audio_data_id: n, gain: Gain::Unity, decor: None })
        .collect();
    let bed = BedDefinition::new(1, channels);
    let pan_sub_blocks = vec![Some(silent_pan_block()); frame_rate.sub_block_count()];
    let object = ObjectDefinition::new(2, 1, pan_sub_blocks);

    let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, frame_rate);
    frame.set_sub_elements(vec![Element::BedDefinition(bed), Element::ObjectDefinition(object)]).unwrap();

    let bytes = serialize_frame(None, &frame).unwrap();
    let parsed = parse_frame(&bytes).unwrap();
    assert_eq!(parsed.frame.compute_max_rendered(), 7);
}

#[test]
fn conditional_beds_under_different_use_cases_take_the_larger_total() {
    let frame_rate = FrameRate::Fps24;

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

    let pan_sub_blocks = vec![Some(silent_pan_block()); frame_rate.sub_block_count()];
    let object = ObjectDefinition::new(3, 1, pan_sub_blocks);

    let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, frame_rate);
    frame
        .set_sub_elements(vec![
            Element::BedDefinition(bed_51),
            Element::BedDefinition(bed_71ds),
            Element::ObjectDefinition(object),
        ])
        .unwrap();

    let bytes = serialize_frame(None, &frame).unwrap();
    let parsed = parse_frame(&bytes).unwrap();
    assert_eq!(parsed.frame.compute_max_rendered(), 9);
}

#[test]
fn preamble_subframe_is_carried_verbatim_through_a_round_trip() {
    let frame = IaFrame::new(SampleRate::Hz96000, BitDepth::Bits16, FrameRate::Fps60);
    let preamble = vec![0x10, 0x20, 0x30, 0x40, 0x50];
    let bytes = serialize_frame(Some(&preamble), &frame).unwrap();

    let parsed = parse_frame(&bytes).unwrap();
    assert_eq!(parsed.preamble, Some(preamble));
    assert_eq!(parsed.frame, frame);
}

#[test]
fn a_sub_element_with_an_unrecognized_id_is_skipped_and_counted() {
    use iab_core::io::{BitReader, BitWriter};

    let frame_rate = FrameRate::Fps24;
    let channels: Vec<IabChannel> =
        vec![IabChannel { channel_id: ChannelId::LEFT, audio_data_id: 1, gain: Gain::Unity, decor: None }];
    let bed = BedDefinition::new(1, channels);

    // Hand-assembles a frame body whose sub-element list carries the real bed plus one element
    // tagged with an ID this crate does not recognize at all.
    let mut bed_writer = BitWriter::new();
    bed.write(&mut bed_writer, frame_rate).unwrap();
    bed_writer.align();
    let bed_payload = bed_writer.into_bytes();

    let mut body_writer = BitWriter::new();
    body_writer.write_bits_u32(1, 8); // version
    body_writer.write_bits_u32(SampleRate::Hz48000.code(), 2);
    body_writer.write_bits_u32(BitDepth::Bits24.code(), 2);
    body_writer.write_bits_u32(frame_rate.code(), 4);
    body_writer.write_plex_u32(1, 8); // maxRendered (not load-bearing for this test)
    body_writer.write_plex_u32(2, 8); // sub-element count
    body_writer.write_plex_u32(iab::ids::BED_DEFINITION, 8);
    body_writer.write_plex_u32(bed_payload.len() as u32, 8);
    body_writer.write_bytes(&bed_payload);
    body_writer.write_plex_u32(0xFFF, 8); // unrecognized element id
    body_writer.write_plex_u32(0, 8); // zero-length payload
    body_writer.align();
    let body = body_writer.into_bytes();

    let mut reader = BitReader::new(&body);
    let frame = IaFrame::read(&mut reader).unwrap();

    assert_eq!(frame.sub_elements.len(), 1);
    assert_eq!(frame.undefined_sub_element_count, 1);
    assert_eq!(frame.unallowed_sub_element_count, 0);
}
