// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conformance validation: walks a parsed [`IaFrame`] tree against one [`ConstraintSet`] and
//! reports each deviation through a caller-supplied callback, rather than failing the parse
//! itself. Validation is a separate pass from decoding: a frame that parses fine can still be
//! nonconforming (wrong bit depth for a cinema package, too many objects for a profile, and so
//! on), and a caller may want to collect every such issue rather than stop at the first one.

pub mod constraint;

pub use constraint::{ConstraintSet, Limits};

use constraint::{DecorPrefixKind, GainPrefixKind, SpreadModeKind};

use iab_core::io::BitWriter;

use crate::channel::{ChannelId, UseCase};
use crate::elements::bed::BED_RESERVED_VALUE;
use crate::elements::frame::IaFrame;
use crate::elements::object::{ObjectDefinition, PAN_SUB_BLOCK_RESERVED_VALUE};
use crate::elements::remap::BedRemap;
use crate::elements::zone::ObjectZoneDefinition19;
use crate::elements::{BedDefinition, Element};

/// How serious one reported issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// Negative `issueID` sentinels for elements that have no natural integer key of their own.
pub mod issue_id {
    pub const IA_FRAME: i64 = -1;
    pub const AUTHORING_TOOL_INFO: i64 = -2;
    pub const USER_DATA: i64 = -3;
    pub const OBJECT_ZONE_DEFINITION_19: i64 = -4;
}

/// One conformance deviation found while validating a frame against a [`ConstraintSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub constraint_set: ConstraintSet,
    pub severity: Severity,
    /// A short, stable, machine-grep-able label for the kind of deviation (e.g.
    /// `"unsupported-bit-depth"`). Not meant for display on its own; pair with `message`.
    pub code: &'static str,
    pub message: String,
    pub frame_index: usize,
    /// The offending element's `metaID`/`audioDataID`, or one of the [`issue_id`] sentinels for
    /// elements that carry no key of their own.
    pub issue_id: i64,
}

/// Validates `frame` (the `frame_index`-th frame in its stream) against `constraint_set`, calling
/// `on_issue` for each deviation found. `on_issue` returns `false` to stop validation early; this
/// function then returns `false` too. Returns `true` if validation ran to completion.
pub fn validate_frame(
    frame: &IaFrame,
    constraint_set: ConstraintSet,
    frame_index: usize,
    mut on_issue: impl FnMut(Issue) -> bool,
) -> bool {
    let limits = constraint_set.limits();
    let mut report = |severity, code, message: String, issue_id: i64| -> bool {
        on_issue(Issue { constraint_set, severity, code, message, frame_index, issue_id })
    };

    if !limits.sample_rates.contains(&frame.sample_rate) {
        if !report(
            Severity::Error,
            "unsupported-sample-rate",
            format!("{:?} is not permitted by {}", frame.sample_rate, constraint_set.name()),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }

    if !limits.bit_depths.contains(&frame.bit_depth) {
        if !report(
            Severity::Error,
            "unsupported-bit-depth",
            format!("{:?} is not permitted by {}", frame.bit_depth, constraint_set.name()),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }

    if !limits.frame_rates.contains(&frame.frame_rate) {
        if !report(
            Severity::Error,
            "unsupported-frame-rate",
            format!("{:?} is not permitted by {}", frame.frame_rate, constraint_set.name()),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }

    if let Some(max_size) = limits.max_frame_size_bytes_for(frame.frame_rate) {
        let mut size_writer = BitWriter::new();
        if frame.write(&mut size_writer).is_ok() {
            size_writer.align();
            let frame_size = size_writer.into_bytes().len() as u32;
            if frame_size > max_size {
                if !report(
                    Severity::Error,
                    "frame-size-exceeded",
                    format!(
                        "serialized frame is {} bytes, exceeding the {} limit of {} bytes at {:?}",
                        frame_size,
                        constraint_set.name(),
                        max_size,
                        frame.frame_rate
                    ),
                    issue_id::IA_FRAME,
                ) {
                    return false;
                }
            }
        }
    }

    let max_rendered_limit = limits.max_rendered_for(frame.sample_rate);
    let computed_max_rendered = frame.compute_max_rendered();
    if computed_max_rendered > max_rendered_limit {
        if !report(
            Severity::Error,
            "max-rendered-exceeded",
            format!(
                "maxRendered {} exceeds the {} limit of {} at this sample rate",
                computed_max_rendered,
                constraint_set.name(),
                max_rendered_limit
            ),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }
    else if frame.declared_max_rendered != computed_max_rendered {
        if !report(
            Severity::Warning,
            "max-rendered-mismatch",
            format!(
                "declared maxRendered {} does not match the computed value {}",
                frame.declared_max_rendered, computed_max_rendered
            ),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }

    if frame.undefined_sub_element_count > 0 || frame.unallowed_sub_element_count > 0 {
        if !report(
            Severity::Warning,
            "skipped-sub-elements",
            format!(
                "{} undefined and {} unallowed sub-elements were skipped while parsing this frame",
                frame.undefined_sub_element_count, frame.unallowed_sub_element_count
            ),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }

    let object_count = frame
        .sub_elements
        .iter()
        .filter(|e| matches!(e, Element::ObjectDefinition(_)))
        .count() as u32;
    if object_count > limits.max_objects {
        if !report(
            Severity::Error,
            "too-many-objects",
            format!("{} objects exceeds the {} limit of {}", object_count, constraint_set.name(), limits.max_objects),
            issue_id::IA_FRAME,
        ) {
            return false;
        }
    }

    for element in &frame.sub_elements {
        match element {
            Element::BedDefinition(bed) => {
                if !validate_bed(bed, constraint_set, frame_index, &mut on_issue) {
                    return false;
                }
            }
            Element::ObjectDefinition(object) => {
                if !validate_object(object, constraint_set, frame_index, &mut on_issue) {
                    return false;
                }
            }
            Element::AudioDataPcm(pcm) => {
                if limits.forbid_audio_data_pcm() {
                    if !on_issue(Issue {
                        constraint_set,
                        severity: Severity::Error,
                        code: "audio-data-pcm-forbidden",
                        message: format!("{} does not permit AudioDataPCM elements", constraint_set.name()),
                        frame_index,
                        issue_id: pcm.audio_data_id as i64,
                    }) {
                        return false;
                    }
                }
            }
            Element::UserData(_) => {
                if limits.forbid_user_data() {
                    if !on_issue(Issue {
                        constraint_set,
                        severity: Severity::Error,
                        code: "user-data-forbidden",
                        message: format!("{} does not permit UserData elements", constraint_set.name()),
                        frame_index,
                        issue_id: issue_id::USER_DATA,
                    }) {
                        return false;
                    }
                }
            }
            _ => {}
        }
    }

    true
}

fn check_use_case(
    limits: &Limits,
    use_case: Option<UseCase>,
    constraint_set: ConstraintSet,
    frame_index: usize,
    issue_id: i64,
    subject: &str,
    on_issue: &mut impl FnMut(Issue) -> bool,
) -> bool {
    let Some(use_case) = use_case
    else {
        return true;
    };
    if limits.valid_use_cases.contains(&use_case) {
        return true;
    }
    on_issue(Issue {
        constraint_set,
        severity: Severity::Error,
        code: "unsupported-use-case",
        message: format!("{} uses {:?}, which {} does not permit", subject, use_case, constraint_set.name()),
        frame_index,
        issue_id,
    })
}

fn check_channel_id(
    limits: &Limits,
    channel_id: ChannelId,
    constraint_set: ConstraintSet,
    frame_index: usize,
    issue_id: i64,
    subject: &str,
    on_issue: &mut impl FnMut(Issue) -> bool,
) -> bool {
    let Some(allowed) = limits.valid_channel_ids
    else {
        return true;
    };
    if allowed.contains(&channel_id) {
        return true;
    }
    on_issue(Issue {
        constraint_set,
        severity: Severity::Error,
        code: "unsupported-channel-id",
        message: format!("{} uses channel ID {:?}, which {} does not permit", subject, channel_id, constraint_set.name()),
        frame_index,
        issue_id,
    })
}

fn validate_bed(
    bed: &BedDefinition,
    constraint_set: ConstraintSet,
    frame_index: usize,
    on_issue: &mut impl FnMut(Issue) -> bool,
) -> bool {
    let limits = constraint_set.limits();
    let mut report = |severity, code, message: String| -> bool {
        on_issue(Issue { constraint_set, severity, code, message, frame_index, issue_id: bed.meta_id as i64 })
    };

    if bed.channels.len() as u32 > limits.max_bed_channels {
        if !report(
            Severity::Error,
            "too-many-bed-channels",
            format!(
                "bed {} has {} channels, exceeding the {} limit of {}",
                bed.meta_id,
                bed.channels.len(),
                constraint_set.name(),
                limits.max_bed_channels
            ),
        ) {
            return false;
        }
    }

    if bed.audio_description.len() > limits.audio_description_max_len {
        if !report(
            Severity::Error,
            "audio-description-too-long",
            format!(
                "bed {} audio description is {} bytes, exceeding the {}-byte limit",
                bed.meta_id,
                bed.audio_description.len(),
                limits.audio_description_max_len
            ),
        ) {
            return false;
        }
    }

    if let [code] = bed.audio_description.as_slice() {
        if limits.reserved_audio_description_codes.contains(code) {
            if !report(
                Severity::Warning,
                "reserved-audio-description-code",
                format!("bed {} audio description uses reserved code 0x{:02X}", bed.meta_id, code),
            ) {
                return false;
            }
        }
    }

    if bed.reserved != BED_RESERVED_VALUE {
        if !report(
            Severity::Warning,
            "reserved-bits-nondefault",
            format!(
                "bed {} reserved field is 0x{:03X}, not the default 0x{:03X}",
                bed.meta_id, bed.reserved, BED_RESERVED_VALUE
            ),
        ) {
            return false;
        }
    }

    if bed.conditional && bed.use_case.is_none() {
        if !report(
            Severity::Error,
            "missing-use-case",
            format!("bed {} is conditional but carries no use case", bed.meta_id),
        ) {
            return false;
        }
    }

    if !check_use_case(
        limits,
        bed.use_case,
        constraint_set,
        frame_index,
        bed.meta_id as i64,
        &format!("bed {}", bed.meta_id),
        on_issue,
    ) {
        return false;
    }

    for channel in &bed.channels {
        if !check_channel_id(
            limits,
            channel.channel_id,
            constraint_set,
            frame_index,
            bed.meta_id as i64,
            &format!("bed {} channel", bed.meta_id),
            on_issue,
        ) {
            return false;
        }

        if !limits.valid_bed_gain_prefixes.contains(&GainPrefixKind::from(channel.gain)) {
            if !on_issue(Issue {
                constraint_set,
                severity: Severity::Error,
                code: "unsupported-gain-prefix",
                message: format!(
                    "bed {} channel {:?} uses a gain prefix {} does not permit",
                    bed.meta_id,
                    channel.channel_id,
                    constraint_set.name()
                ),
                frame_index,
                issue_id: bed.meta_id as i64,
            }) {
                return false;
            }
        }

        if let Some(decor) = channel.decor {
            if !limits.valid_decor_coeff_prefixes.contains(&DecorPrefixKind::from(decor)) {
                if !on_issue(Issue {
                    constraint_set,
                    severity: Severity::Error,
                    code: "unsupported-decor-coeff-prefix",
                    message: format!(
                        "bed {} channel {:?} uses a decorrelation prefix {} does not permit",
                        bed.meta_id,
                        channel.channel_id,
                        constraint_set.name()
                    ),
                    frame_index,
                    issue_id: bed.meta_id as i64,
                }) {
                    return false;
                }
            }
        }
    }

    if limits.forbid_nested_sub_elements() && !bed.sub_elements.is_empty() {
        if !report(
            Severity::Error,
            "nested-sub-elements-forbidden",
            format!(
                "bed {} carries {} nested sub-elements, which {} forbids",
                bed.meta_id,
                bed.sub_elements.len(),
                constraint_set.name()
            ),
        ) {
            return false;
        }
    }

    for sub_element in &bed.sub_elements {
        match sub_element {
            Element::BedDefinition(nested) => {
                if !validate_bed(nested, constraint_set, frame_index, on_issue) {
                    return false;
                }
            }
            Element::BedRemap(remap) => {
                if !validate_remap(remap, constraint_set, frame_index, on_issue) {
                    return false;
                }
            }
            _ => {}
        }
    }

    true
}

fn validate_remap(
    remap: &BedRemap,
    constraint_set: ConstraintSet,
    frame_index: usize,
    on_issue: &mut impl FnMut(Issue) -> bool,
) -> bool {
    let limits = constraint_set.limits();

    if !check_use_case(
        limits,
        Some(remap.use_case),
        constraint_set,
        frame_index,
        remap.meta_id as i64,
        &format!("remap {}", remap.meta_id),
        on_issue,
    ) {
        return false;
    }

    for contents in remap.sub_blocks.iter().flatten() {
        for row in &contents.rows {
            if !check_channel_id(
                limits,
                row.dest_channel_id,
                constraint_set,
                frame_index,
                remap.meta_id as i64,
                &format!("remap {} destination", remap.meta_id),
                on_issue,
            ) {
                return false;
            }
            for &gain in &row.gains {
                if !limits.valid_bed_gain_prefixes.contains(&GainPrefixKind::from(gain)) {
                    if !on_issue(Issue {
                        constraint_set,
                        severity: Severity::Error,
                        code: "unsupported-gain-prefix",
                        message: format!(
                            "remap {} uses a gain prefix {} does not permit",
                            remap.meta_id,
                            constraint_set.name()
                        ),
                        frame_index,
                        issue_id: remap.meta_id as i64,
                    }) {
                        return false;
                    }
                }
            }
        }
    }

    true
}

fn validate_object(
    object: &ObjectDefinition,
    constraint_set: ConstraintSet,
    frame_index: usize,
    on_issue: &mut impl FnMut(Issue) -> bool,
) -> bool {
    let limits = constraint_set.limits();
    let mut report = |severity, code, message: String| -> bool {
        on_issue(Issue { constraint_set, severity, code, message, frame_index, issue_id: object.meta_id as i64 })
    };

    if object.audio_description.len() > limits.audio_description_max_len {
        if !report(
            Severity::Error,
            "audio-description-too-long",
            format!(
                "object {} audio description is {} bytes, exceeding the {}-byte limit",
                object.meta_id,
                object.audio_description.len(),
                limits.audio_description_max_len
            ),
        ) {
            return false;
        }
    }

    if let [code] = object.audio_description.as_slice() {
        if limits.reserved_audio_description_codes.contains(code) {
            if !report(
                Severity::Warning,
                "reserved-audio-description-code",
                format!("object {} audio description uses reserved code 0x{:02X}", object.meta_id, code),
            ) {
                return false;
            }
        }
    }

    if object.conditional && object.use_case.is_none() {
        if !report(
            Severity::Error,
            "missing-use-case",
            format!("object {} is conditional but carries no use case", object.meta_id),
        ) {
            return false;
        }
    }

    if object.conditional && object.use_case == Some(UseCase::Always) {
        if !report(
            Severity::Warning,
            "redundant-use-case-always",
            format!("object {} marks itself conditional with useCase Always", object.meta_id),
        ) {
            return false;
        }
    }

    if !check_use_case(
        limits,
        object.use_case,
        constraint_set,
        frame_index,
        object.meta_id as i64,
        &format!("object {}", object.meta_id),
        on_issue,
    ) {
        return false;
    }

    for contents in object.pan_sub_blocks.iter().flatten() {
        if contents.reserved_after_gain != PAN_SUB_BLOCK_RESERVED_VALUE || contents.reserved_after_spread != 0 {
            if !on_issue(Issue {
                constraint_set,
                severity: Severity::Warning,
                code: "reserved-bits-nondefault",
                message: format!(
                    "object {} pan sub-block reserved fields are 0b{:03b}/0b{:04b}, not the default 0b{:03b}/0b0000",
                    object.meta_id,
                    contents.reserved_after_gain,
                    contents.reserved_after_spread,
                    PAN_SUB_BLOCK_RESERVED_VALUE
                ),
                frame_index,
                issue_id: object.meta_id as i64,
            }) {
                return false;
            }
        }

        if !limits.valid_object_gain_prefixes.contains(&GainPrefixKind::from(contents.gain)) {
            if !on_issue(Issue {
                constraint_set,
                severity: Severity::Error,
                code: "unsupported-gain-prefix",
                message: format!(
                    "object {} pan sub-block uses a gain prefix {} does not permit",
                    object.meta_id,
                    constraint_set.name()
                ),
                frame_index,
                issue_id: object.meta_id as i64,
            }) {
                return false;
            }
        }

        if !limits.valid_spread_modes.contains(&SpreadModeKind::from(contents.spread)) {
            if !on_issue(Issue {
                constraint_set,
                severity: Severity::Error,
                code: "unsupported-spread-mode",
                message: format!(
                    "object {} pan sub-block uses a spread mode {} does not permit",
                    object.meta_id,
                    constraint_set.name()
                ),
                frame_index,
                issue_id: object.meta_id as i64,
            }) {
                return false;
            }
        }

        if !limits.valid_decor_coeff_prefixes.contains(&DecorPrefixKind::from(contents.decor)) {
            if !on_issue(Issue {
                constraint_set,
                severity: Severity::Error,
                code: "unsupported-decor-coeff-prefix",
                message: format!(
                    "object {} pan sub-block uses a decorrelation prefix {} does not permit",
                    object.meta_id,
                    constraint_set.name()
                ),
                frame_index,
                issue_id: object.meta_id as i64,
            }) {
                return false;
            }
        }

        if let Some(gains) = contents.zone9.gains {
            for &gain in &gains {
                if !limits.valid_zone_gain_prefixes.contains(&GainPrefixKind::from(gain)) {
                    if !on_issue(Issue {
                        constraint_set,
                        severity: Severity::Error,
                        code: "unsupported-zone-gain-prefix",
                        message: format!(
                            "object {} zone9 gating uses a zone gain prefix {} does not permit",
                            object.meta_id,
                            constraint_set.name()
                        ),
                        frame_index,
                        issue_id: object.meta_id as i64,
                    }) {
                        return false;
                    }
                }
            }

            if let Some(presets) = limits.zone9_gain_presets {
                let kinds: [GainPrefixKind; 9] = std::array::from_fn(|i| GainPrefixKind::from(gains[i]));
                if !presets.contains(&kinds) {
                    if !on_issue(Issue {
                        constraint_set,
                        severity: Severity::Warning,
                        code: "zone-gain-preset-mismatch",
                        message: format!(
                            "object {} zone9 gating matches none of {}'s recommended presets",
                            object.meta_id,
                            constraint_set.name()
                        ),
                        frame_index,
                        issue_id: object.meta_id as i64,
                    }) {
                        return false;
                    }
                }
            }
        }
    }

    if limits.forbid_nested_sub_elements() && !object.sub_elements.is_empty() {
        if !on_issue(Issue {
            constraint_set,
            severity: Severity::Error,
            code: "nested-sub-elements-forbidden",
            message: format!(
                "object {} carries {} nested sub-elements, which {} forbids",
                object.meta_id,
                object.sub_elements.len(),
                constraint_set.name()
            ),
            frame_index,
            issue_id: issue_id::OBJECT_ZONE_DEFINITION_19,
        }) {
            return false;
        }
    }

    for sub_element in &object.sub_elements {
        if let Element::ObjectZoneDefinition19(zone) = sub_element {
            if !validate_zone19(zone, constraint_set, frame_index, object.meta_id, on_issue) {
                return false;
            }
        }
    }

    true
}

fn validate_zone19(
    zone: &ObjectZoneDefinition19,
    constraint_set: ConstraintSet,
    frame_index: usize,
    owning_object_meta_id: u32,
    on_issue: &mut impl FnMut(Issue) -> bool,
) -> bool {
    let limits = constraint_set.limits();
    for contents in zone.sub_blocks.iter().flatten() {
        for &gain in &contents.gains {
            if !limits.valid_zone_gain_prefixes.contains(&GainPrefixKind::from(gain)) {
                if !on_issue(Issue {
                    constraint_set,
                    severity: Severity::Error,
                    code: "unsupported-zone-gain-prefix",
                    message: format!(
                        "object {} zone19 gating uses a zone gain prefix {} does not permit",
                        owning_object_meta_id,
                        constraint_set.name()
                    ),
                    frame_index,
                    issue_id: issue_id::OBJECT_ZONE_DEFINITION_19,
                }) {
                    return false;
                }
            }
        }
    }
    true
}
