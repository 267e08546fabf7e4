// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The six constraint sets a frame can be validated against, organized as a lattice:
//! `St2098_2_2018 ⊂ St429_18_2019 ⊂ DbyCinema` (cinema) and
//! `St2098_2_2019 ⊂ St2067_201_2019 ⊂ DbyImf` (IMF). Each later set in a chain narrows the
//! allowed value ranges of the one before it.

use bitflags::bitflags;

use iab_core::units::{BitDepth, FrameRate, SampleRate};
use iab_core::value::{DecorCoeff, Gain, Spread, ZoneGain};

use crate::channel::{ChannelId, UseCase};

bitflags! {
    /// Structural rules a constraint set enforces beyond simple value-range limits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StructuralRules: u8 {
        /// `BedDefinition`/`ObjectDefinition` may not carry any sub-elements.
        const FORBID_NESTED_SUB_ELEMENTS = 0b0000_0001;
        /// No `AudioDataPCM` element may appear anywhere in the frame.
        const FORBID_AUDIO_DATA_PCM = 0b0000_0010;
        /// No `UserData` element may appear anywhere in the frame.
        const FORBID_USER_DATA = 0b0000_0100;
    }
}

/// Which of Unity/Silence/InStream a [`Gain`] or [`ZoneGain`] carries, independent of its payload.
/// Lets one allow-list serve both value types, which share the same three-way prefix shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainPrefixKind {
    Unity,
    Silence,
    InStream,
}

impl From<Gain> for GainPrefixKind {
    fn from(gain: Gain) -> Self {
        match gain {
            Gain::Unity => GainPrefixKind::Unity,
            Gain::Silence => GainPrefixKind::Silence,
            Gain::InStream(_) => GainPrefixKind::InStream,
        }
    }
}

impl From<ZoneGain> for GainPrefixKind {
    fn from(gain: ZoneGain) -> Self {
        match gain {
            ZoneGain::Unity => GainPrefixKind::Unity,
            ZoneGain::Silence => GainPrefixKind::Silence,
            ZoneGain::InStream(_) => GainPrefixKind::InStream,
        }
    }
}

/// Which of NoDecor/MaxDecor/InStream a [`DecorCoeff`] carries, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorPrefixKind {
    NoDecor,
    MaxDecor,
    InStream,
}

impl From<DecorCoeff> for DecorPrefixKind {
    fn from(decor: DecorCoeff) -> Self {
        match decor {
            DecorCoeff::NoDecor => DecorPrefixKind::NoDecor,
            DecorCoeff::MaxDecor => DecorPrefixKind::MaxDecor,
            DecorCoeff::InStream(_) => DecorPrefixKind::InStream,
        }
    }
}

/// Which spread mode a [`Spread`] is, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadModeKind {
    None,
    LowRes1D,
    HighRes1D,
    HighRes3D,
}

impl From<Spread> for SpreadModeKind {
    fn from(spread: Spread) -> Self {
        match spread {
            Spread::None => SpreadModeKind::None,
            Spread::LowRes1D(_) => SpreadModeKind::LowRes1D,
            Spread::HighRes1D(_) => SpreadModeKind::HighRes1D,
            Spread::HighRes3D(..) => SpreadModeKind::HighRes3D,
        }
    }
}

/// One of the six named conformance profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintSet {
    St2098_2_2018,
    St429_18_2019,
    DbyCinema,
    St2098_2_2019,
    St2067_201_2019,
    DbyImf,
}

impl ConstraintSet {
    pub const ALL: [ConstraintSet; 6] = [
        ConstraintSet::St2098_2_2018,
        ConstraintSet::St429_18_2019,
        ConstraintSet::DbyCinema,
        ConstraintSet::St2098_2_2019,
        ConstraintSet::St2067_201_2019,
        ConstraintSet::DbyImf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConstraintSet::St2098_2_2018 => "ST2098-2-2018",
            ConstraintSet::St429_18_2019 => "ST429-18-2019",
            ConstraintSet::DbyCinema => "DbyCinema",
            ConstraintSet::St2098_2_2019 => "ST2098-2-2019",
            ConstraintSet::St2067_201_2019 => "ST2067-201-2019",
            ConstraintSet::DbyImf => "DbyIMF",
        }
    }

    pub fn limits(self) -> &'static Limits {
        match self {
            ConstraintSet::St2098_2_2018 => &ST2098_2_2018,
            ConstraintSet::St429_18_2019 => &ST429_18_2019,
            ConstraintSet::DbyCinema => &DBY_CINEMA,
            ConstraintSet::St2098_2_2019 => &ST2098_2_2019,
            ConstraintSet::St2067_201_2019 => &ST2067_201_2019,
            ConstraintSet::DbyImf => &DBY_IMF,
        }
    }
}

/// The allowed value ranges and structural rules of one constraint set. Every set in a lattice
/// chain is at least as restrictive as the one before it.
pub struct Limits {
    pub sample_rates: &'static [SampleRate],
    pub bit_depths: &'static [BitDepth],
    pub frame_rates: &'static [FrameRate],
    pub max_bed_channels: u32,
    pub max_objects: u32,
    pub max_rendered_48k: u32,
    pub max_rendered_96k: u32,
    pub audio_description_max_len: usize,
    pub structural_rules: StructuralRules,
    pub valid_use_cases: &'static [UseCase],
    /// `None` means this profile places no allow-list on channel IDs beyond what parses; `Some`
    /// names the exact set a bed channel or remap destination must use.
    pub valid_channel_ids: Option<&'static [ChannelId]>,
    /// Gain prefixes valid on a bed's `IABChannel`. Separate from `valid_object_gain_prefixes`
    /// because DbyIMF is the one profile that narrows them differently (channel gain to Unity
    /// only, object gain to Unity/Silence).
    pub valid_bed_gain_prefixes: &'static [GainPrefixKind],
    pub valid_object_gain_prefixes: &'static [GainPrefixKind],
    pub valid_zone_gain_prefixes: &'static [GainPrefixKind],
    pub valid_decor_coeff_prefixes: &'static [DecorPrefixKind],
    pub valid_spread_modes: &'static [SpreadModeKind],
    pub reserved_audio_description_codes: &'static [u8],
    /// The well-known zone-9 gain presets this profile recommends; an enabled zone-9 gating that
    /// matches none of them is a warning, not an error. `None` means this profile names no presets.
    pub zone9_gain_presets: Option<&'static [[GainPrefixKind; 9]]>,
    /// Maximum serialized frame size in bytes, indexed by [`FrameRate::code`] (24fps..120fps, in
    /// the same order as [`ALL_NINE_FRAME_RATES`]). `None` means this profile places no such
    /// limit.
    pub max_frame_size_bytes: Option<&'static [u32; 9]>,
}

impl Limits {
    pub fn forbid_nested_sub_elements(&self) -> bool {
        self.structural_rules.contains(StructuralRules::FORBID_NESTED_SUB_ELEMENTS)
    }

    pub fn forbid_audio_data_pcm(&self) -> bool {
        self.structural_rules.contains(StructuralRules::FORBID_AUDIO_DATA_PCM)
    }

    pub fn forbid_user_data(&self) -> bool {
        self.structural_rules.contains(StructuralRules::FORBID_USER_DATA)
    }

    pub fn max_rendered_for(&self, sample_rate: SampleRate) -> u32 {
        match sample_rate {
            SampleRate::Hz48000 => self.max_rendered_48k,
            SampleRate::Hz96000 => self.max_rendered_96k,
        }
    }

    /// This profile's frame size limit in bytes at `frame_rate`, if it places one.
    pub fn max_frame_size_bytes_for(&self, frame_rate: FrameRate) -> Option<u32> {
        self.max_frame_size_bytes.map(|limits| limits[frame_rate.code() as usize])
    }
}

const ALL_NINE_FRAME_RATES: &[FrameRate] = &[
    FrameRate::Fps24,
    FrameRate::Fps25,
    FrameRate::Fps30,
    FrameRate::Fps48,
    FrameRate::Fps50,
    FrameRate::Fps60,
    FrameRate::Fps96,
    FrameRate::Fps100,
    FrameRate::Fps120,
];

const CINEMA_USE_CASES: &[UseCase] = &[
    UseCase::Cinema51,
    UseCase::Cinema71Ds,
    UseCase::Cinema71Sds,
    UseCase::Cinema111Ht,
    UseCase::Cinema131Ht,
    UseCase::Cinema91Oh,
    UseCase::Always,
];

const ALL_TEN_USE_CASES: &[UseCase] = &[
    UseCase::Cinema51,
    UseCase::Cinema71Ds,
    UseCase::Cinema71Sds,
    UseCase::Cinema111Ht,
    UseCase::Cinema131Ht,
    UseCase::Cinema91Oh,
    UseCase::Always,
    UseCase::ItuA,
    UseCase::ItuD,
    UseCase::ItuJ,
];

const ALL_THREE_GAIN_PREFIXES: &[GainPrefixKind] =
    &[GainPrefixKind::Unity, GainPrefixKind::Silence, GainPrefixKind::InStream];

const ALL_THREE_DECOR_PREFIXES: &[DecorPrefixKind] =
    &[DecorPrefixKind::NoDecor, DecorPrefixKind::MaxDecor, DecorPrefixKind::InStream];

const ALL_FOUR_SPREAD_MODES: &[SpreadModeKind] = &[
    SpreadModeKind::LowRes1D,
    SpreadModeKind::None,
    SpreadModeKind::HighRes1D,
    SpreadModeKind::HighRes3D,
];

const RESERVED_AUDIO_DESCRIPTION_CODES: &[u8] = &[0x40];

/// `CS_Cinema_ST429_18_2019_SUP::frameSizeLimits_`, indexed by `FrameRate::code()` (24fps through
/// 120fps, in `ALL_NINE_FRAME_RATES` order). ST429-18-2019 is the first constraint set in the
/// cinema lattice to impose a frame size ceiling; DbyCinema inherits it unchanged.
const CINEMA_FRAME_SIZE_LIMITS: [u32; 9] =
    [781250, 750000, 625000, 390625, 375000, 312500, 195313, 187500, 156250];

/// `ConstraintSet_DbyCinema.dbyCinemaZoneGainPresets_`: eleven named presets over the nine
/// cinema-standard zones (screen L/C/R, surround L/R, back L/R, top-surround front/back).
static DBY_CINEMA_ZONE9_PRESETS: [[GainPrefixKind; 9]; 11] = {
    use GainPrefixKind::{Silence as S, Unity as U};
    [
        [U, U, U, U, U, S, S, U, U], // Set 1a
        [U, U, U, U, U, S, S, S, S], // Set 1b
        [U, U, U, S, S, U, U, U, U], // Set 2a
        [U, U, U, S, S, U, U, S, S], // Set 2b
        [S, U, S, S, S, U, U, U, U], // Set 3a
        [S, U, S, S, S, U, U, S, S], // Set 3b
        [U, U, U, S, S, S, S, U, U], // Set 4a
        [U, U, U, S, S, S, S, S, S], // Set 4b
        [S, S, S, U, U, U, U, U, U], // Set 5a
        [S, S, S, U, U, U, U, S, S], // Set 5b
        [U, U, U, U, U, U, U, S, S], // Set 6
    ]
};

/// `ConstraintSet_DbyIMF.dbyIMFZoneGainPresets_`: twelve named presets, one pair (plain / "plus
/// overhead") per room region.
static DBY_IMF_ZONE9_PRESETS: [[GainPrefixKind; 9]; 12] = {
    use GainPrefixKind::{Silence as S, Unity as U};
    [
        [U, U, U, U, U, S, S, S, S], // No back
        [U, U, U, U, U, S, S, U, U], // No back plus overhead
        [U, U, U, S, S, U, U, S, S], // No sides
        [U, U, U, S, S, U, U, U, U], // No sides plus overhead
        [S, U, S, S, S, U, U, S, S], // Center back
        [S, U, S, S, S, U, U, U, U], // Center back plus overhead
        [U, U, U, S, S, S, S, S, S], // Screen only
        [U, U, U, S, S, S, S, U, U], // Screen only plus overhead
        [S, S, S, U, U, U, U, S, S], // Surround only
        [S, S, S, U, U, U, U, U, U], // Surround only plus overhead
        [U, U, U, U, U, U, U, S, S], // Floor
        [U, U, U, U, U, U, U, U, U], // Floor plus overhead
    ]
};

/// The ten channels `CS_DbyCinema_SUP::validChannelIDs_` names. This crate's `ChannelId` named
/// constants do not carry the original catalog's numeric codes (see `DESIGN.md`), so this list
/// matches by channel identity, not by code.
static DBY_CINEMA_CHANNEL_IDS: [ChannelId; 10] = [
    ChannelId::LEFT,
    ChannelId::CENTER,
    ChannelId::RIGHT,
    ChannelId::LEFT_SIDE_SURROUND,
    ChannelId::LEFT_REAR_SURROUND,
    ChannelId::RIGHT_REAR_SURROUND,
    ChannelId::RIGHT_SIDE_SURROUND,
    ChannelId::LEFT_TOP_SURROUND,
    ChannelId::RIGHT_TOP_SURROUND,
    ChannelId::LFE,
];

/// The twelve channels `CS_DbyIMF_SUP::validChannelIDs_` names.
static DBY_IMF_CHANNEL_IDS: [ChannelId; 12] = [
    ChannelId::LEFT,
    ChannelId::CENTER,
    ChannelId::RIGHT,
    ChannelId::LEFT_SIDE_SURROUND,
    ChannelId::LEFT_SURROUND,
    ChannelId::LEFT_REAR_SURROUND,
    ChannelId::RIGHT_REAR_SURROUND,
    ChannelId::RIGHT_SIDE_SURROUND,
    ChannelId::RIGHT_SURROUND,
    ChannelId::LEFT_TOP_SURROUND,
    ChannelId::RIGHT_TOP_SURROUND,
    ChannelId::LFE,
];

static ST2098_2_2018: Limits = Limits {
    sample_rates: &[SampleRate::Hz48000, SampleRate::Hz96000],
    bit_depths: &[BitDepth::Bits16, BitDepth::Bits24],
    frame_rates: ALL_NINE_FRAME_RATES,
    max_bed_channels: 128,
    max_objects: 1000,
    max_rendered_48k: 128,
    max_rendered_96k: 64,
    audio_description_max_len: 64,
    structural_rules: StructuralRules::empty(),
    valid_use_cases: CINEMA_USE_CASES,
    valid_channel_ids: None,
    valid_bed_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_object_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_zone_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_decor_coeff_prefixes: ALL_THREE_DECOR_PREFIXES,
    valid_spread_modes: ALL_FOUR_SPREAD_MODES,
    reserved_audio_description_codes: RESERVED_AUDIO_DESCRIPTION_CODES,
    zone9_gain_presets: None,
    max_frame_size_bytes: None,
};

/// Adds to [`ST2098_2_2018`]: 24-bit-only audio, no `AudioDataPCM`/`UserData`, and a channel ID
/// ceiling at the end of the D-Cinema reserved range. `CS_Cinema_ST429_18_2019_SUP` also narrows
/// the invalid-use-case range to `0x30..=0xFE`, which this crate's ten-code `UseCase` enum can
/// never reach, so it adds no further restriction here.
static ST429_18_2019: Limits = Limits {
    sample_rates: &[SampleRate::Hz48000, SampleRate::Hz96000],
    bit_depths: &[BitDepth::Bits24],
    frame_rates: ALL_NINE_FRAME_RATES,
    max_bed_channels: 128,
    max_objects: 1000,
    max_rendered_48k: 128,
    max_rendered_96k: 64,
    audio_description_max_len: 64,
    structural_rules: StructuralRules::FORBID_AUDIO_DATA_PCM.union(StructuralRules::FORBID_USER_DATA),
    valid_use_cases: CINEMA_USE_CASES,
    valid_channel_ids: None,
    valid_bed_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_object_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_zone_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_decor_coeff_prefixes: ALL_THREE_DECOR_PREFIXES,
    valid_spread_modes: ALL_FOUR_SPREAD_MODES,
    reserved_audio_description_codes: RESERVED_AUDIO_DESCRIPTION_CODES,
    zone9_gain_presets: None,
    max_frame_size_bytes: Some(&CINEMA_FRAME_SIZE_LIMITS),
};

static DBY_CINEMA: Limits = Limits {
    sample_rates: &[SampleRate::Hz48000],
    bit_depths: &[BitDepth::Bits24],
    frame_rates: ALL_NINE_FRAME_RATES,
    max_bed_channels: 10,
    max_objects: 118,
    max_rendered_48k: 128,
    max_rendered_96k: 64,
    audio_description_max_len: 64,
    structural_rules: StructuralRules::FORBID_NESTED_SUB_ELEMENTS
        .union(StructuralRules::FORBID_AUDIO_DATA_PCM)
        .union(StructuralRules::FORBID_USER_DATA),
    valid_use_cases: &[UseCase::Always],
    valid_channel_ids: Some(&DBY_CINEMA_CHANNEL_IDS),
    valid_bed_gain_prefixes: &[GainPrefixKind::Unity],
    valid_object_gain_prefixes: &[GainPrefixKind::Unity],
    valid_zone_gain_prefixes: &[GainPrefixKind::Silence, GainPrefixKind::Unity],
    valid_decor_coeff_prefixes: &[DecorPrefixKind::NoDecor, DecorPrefixKind::MaxDecor],
    valid_spread_modes: &[SpreadModeKind::HighRes1D],
    reserved_audio_description_codes: RESERVED_AUDIO_DESCRIPTION_CODES,
    zone9_gain_presets: Some(&DBY_CINEMA_ZONE9_PRESETS),
    max_frame_size_bytes: Some(&CINEMA_FRAME_SIZE_LIMITS),
};

static ST2098_2_2019: Limits = Limits {
    sample_rates: &[SampleRate::Hz48000, SampleRate::Hz96000],
    bit_depths: &[BitDepth::Bits16, BitDepth::Bits24],
    frame_rates: ALL_NINE_FRAME_RATES,
    max_bed_channels: 128,
    max_objects: 1000,
    max_rendered_48k: 128,
    max_rendered_96k: 64,
    audio_description_max_len: 64,
    structural_rules: StructuralRules::empty(),
    valid_use_cases: ALL_TEN_USE_CASES,
    valid_channel_ids: None,
    valid_bed_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_object_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_zone_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_decor_coeff_prefixes: ALL_THREE_DECOR_PREFIXES,
    valid_spread_modes: ALL_FOUR_SPREAD_MODES,
    reserved_audio_description_codes: RESERVED_AUDIO_DESCRIPTION_CODES,
    zone9_gain_presets: None,
    max_frame_size_bytes: None,
};

/// Adds to [`ST2098_2_2019`]: 24-bit-only audio and `useCase == Always` only.
/// `CS_IMF_ST2067_201_2019_SUP` states no further constraints beyond these two.
static ST2067_201_2019: Limits = Limits {
    sample_rates: &[SampleRate::Hz48000, SampleRate::Hz96000],
    bit_depths: &[BitDepth::Bits24],
    frame_rates: ALL_NINE_FRAME_RATES,
    max_bed_channels: 128,
    max_objects: 1000,
    max_rendered_48k: 128,
    max_rendered_96k: 64,
    audio_description_max_len: 64,
    structural_rules: StructuralRules::empty(),
    valid_use_cases: &[UseCase::Always],
    valid_channel_ids: None,
    valid_bed_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_object_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_zone_gain_prefixes: ALL_THREE_GAIN_PREFIXES,
    valid_decor_coeff_prefixes: ALL_THREE_DECOR_PREFIXES,
    valid_spread_modes: ALL_FOUR_SPREAD_MODES,
    reserved_audio_description_codes: RESERVED_AUDIO_DESCRIPTION_CODES,
    zone9_gain_presets: None,
    max_frame_size_bytes: None,
};

static DBY_IMF: Limits = Limits {
    sample_rates: &[SampleRate::Hz48000, SampleRate::Hz96000],
    bit_depths: &[BitDepth::Bits24],
    frame_rates: ALL_NINE_FRAME_RATES,
    max_bed_channels: 128,
    max_objects: 1000,
    max_rendered_48k: 128,
    max_rendered_96k: 64,
    audio_description_max_len: 64,
    structural_rules: StructuralRules::FORBID_NESTED_SUB_ELEMENTS,
    valid_use_cases: &[UseCase::Always],
    valid_channel_ids: Some(&DBY_IMF_CHANNEL_IDS),
    valid_bed_gain_prefixes: &[GainPrefixKind::Unity],
    valid_object_gain_prefixes: &[GainPrefixKind::Unity, GainPrefixKind::Silence],
    valid_zone_gain_prefixes: &[GainPrefixKind::Silence, GainPrefixKind::Unity],
    valid_decor_coeff_prefixes: &[DecorPrefixKind::NoDecor, DecorPrefixKind::MaxDecor],
    valid_spread_modes: &[SpreadModeKind::HighRes1D],
    reserved_audio_description_codes: RESERVED_AUDIO_DESCRIPTION_CODES,
    zone9_gain_presets: Some(&DBY_IMF_ZONE9_PRESETS),
    max_frame_size_bytes: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_constraint_set_has_non_empty_limits() {
        for set in ConstraintSet::ALL {
            let limits = set.limits();
            assert!(!limits.sample_rates.is_empty());
            assert!(!limits.bit_depths.is_empty());
            assert!(!limits.frame_rates.is_empty());
            assert!(!limits.valid_use_cases.is_empty());
        }
    }

    #[test]
    fn cinema_lattice_narrows_bit_depth() {
        assert_eq!(ConstraintSet::St2098_2_2018.limits().bit_depths.len(), 2);
        assert_eq!(ConstraintSet::St429_18_2019.limits().bit_depths, &[BitDepth::Bits24]);
        assert!(ConstraintSet::DbyCinema.limits().forbid_nested_sub_elements());
    }

    #[test]
    fn dolby_cinema_narrows_channel_ids_and_gain_to_a_named_list() {
        let limits = ConstraintSet::DbyCinema.limits();
        assert_eq!(limits.valid_channel_ids, Some(&DBY_CINEMA_CHANNEL_IDS[..]));
        assert_eq!(limits.valid_bed_gain_prefixes, &[GainPrefixKind::Unity]);
        assert_eq!(limits.zone9_gain_presets.unwrap().len(), 11);
    }

    #[test]
    fn dolby_imf_splits_channel_gain_from_object_gain() {
        let limits = ConstraintSet::DbyImf.limits();
        assert_eq!(limits.valid_bed_gain_prefixes, &[GainPrefixKind::Unity]);
        assert_eq!(limits.valid_object_gain_prefixes, &[GainPrefixKind::Unity, GainPrefixKind::Silence]);
        assert_eq!(limits.zone9_gain_presets.unwrap().len(), 12);
    }

    #[test]
    fn max_rendered_is_split_by_sample_rate() {
        let limits = ConstraintSet::St2098_2_2019.limits();
        assert_eq!(limits.max_rendered_for(SampleRate::Hz48000), 128);
        assert_eq!(limits.max_rendered_for(SampleRate::Hz96000), 64);
    }

    #[test]
    fn frame_size_limit_is_set_for_cinema_profiles_only() {
        assert_eq!(ConstraintSet::St2098_2_2018.limits().max_frame_size_bytes_for(FrameRate::Fps24), None);
        assert_eq!(
            ConstraintSet::St429_18_2019.limits().max_frame_size_bytes_for(FrameRate::Fps24),
            Some(781250)
        );
        assert_eq!(
            ConstraintSet::DbyCinema.limits().max_frame_size_bytes_for(FrameRate::Fps120),
            Some(156250)
        );
        assert_eq!(ConstraintSet::DbyImf.limits().max_frame_size_bytes_for(FrameRate::Fps24), None);
    }
}
