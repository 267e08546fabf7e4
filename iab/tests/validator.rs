// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use iab::channel::ChannelId;
use iab::elements::bed::IabChannel;
use iab::{BedDefinition, Element, IaFrame};
use iab::validator::{validate_frame, ConstraintSet, Severity};
use iab_core::units::{BitDepth, FrameRate, SampleRate};
use iab_core::value::Gain;

fn one_channel_bed(meta_id: u32) -> BedDefinition {
    BedDefinition::new(
        meta_id,
        vec![IabChannel { channel_id: ChannelId::LEFT, audio_data_id: 1, gain: Gain::Unity, decor: None }],
    )
}

#[test]
fn sixteen_bit_frame_is_an_error_under_the_cinema_packaging_profile() {
    let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits16, FrameRate::Fps24);
    frame.set_sub_elements(vec![Element::BedDefinition(one_channel_bed(1))]).unwrap();

    let mut issues = Vec::new();
    validate_frame(&frame, ConstraintSet::St429_18_2019, 0, |issue| {
        issues.push(issue);
        true
    });

    assert!(issues.iter().any(|i| i.code == "unsupported-bit-depth" && i.severity == Severity::Error));
}

#[test]
fn the_same_frame_is_clean_under_the_permissive_base_profile() {
    let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits16, FrameRate::Fps24);
    frame.set_sub_elements(vec![Element::BedDefinition(one_channel_bed(1))]).unwrap();

    let mut issues = Vec::new();
    validate_frame(&frame, ConstraintSet::St2098_2_2018, 0, |issue| {
        issues.push(issue);
        true
    });

    assert!(issues.iter().all(|i| i.severity != Severity::Error));
}

#[test]
fn a_sixteen_bit_frame_is_flagged_under_the_imf_package_profile() {
    let frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits16, FrameRate::Fps120);
    let mut issues = Vec::new();
    validate_frame(&frame, ConstraintSet::St2067_201_2019, 0, |issue| {
        issues.push(issue);
        true
    });
    assert!(issues.iter().any(|i| i.code == "unsupported-bit-depth" && i.severity == Severity::Error));

    let mut issues = Vec::new();
    validate_frame(&frame, ConstraintSet::St2098_2_2019, 0, |issue| {
        issues.push(issue);
        true
    });
    assert!(issues.iter().all(|i| i.code != "unsupported-bit-depth"));
}

#[test]
fn a_mismatched_declared_max_rendered_is_a_warning_not_an_error() {
    let mut frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits24, FrameRate::Fps24);
    frame.set_sub_elements(vec![Element::BedDefinition(one_channel_bed(1))]).unwrap();
    frame.declared_max_rendered = 99;

    let mut issues = Vec::new();
    validate_frame(&frame, ConstraintSet::St2098_2_2018, 0, |issue| {
        issues.push(issue);
        true
    });

    let mismatch = issues.iter().find(|i| i.code == "max-rendered-mismatch").unwrap();
    assert_eq!(mismatch.severity, Severity::Warning);
}

#[test]
fn every_constraint_set_reports_issues_tagged_with_its_own_name() {
    let frame = IaFrame::new(SampleRate::Hz48000, BitDepth::Bits16, FrameRate::Fps120);
    for set in ConstraintSet::ALL {
        let mut issues = Vec::new();
        validate_frame(&frame, set, 0, |issue| {
            issues.push(issue);
            true
        });
        assert!(issues.iter().all(|i| i.constraint_set == set));
    }
}
