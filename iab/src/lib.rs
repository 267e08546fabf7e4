// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A pure-Rust implementation of the SMPTE ST 2098-2 Immersive Audio Bitstream (IAB): a parser
//! and serializer for the `IAFrame` element tree (beds, objects, remaps, zone gating, and the
//! DLC/PCM audio asset carriers), and a conformance validator for the cinema and IMF packaging
//! profiles built on top of it.
//!
//! ```no_run
//! use iab::container::parse_frame;
//! use iab::validator::{validate_frame, ConstraintSet};
//!
//! # fn example(bytes: &[u8]) -> iab_core::errors::Result<()> {
//! let parsed = parse_frame(bytes)?;
//! let _ = validate_frame(&parsed.frame, ConstraintSet::St2098_2_2018, 0, |issue| {
//!     eprintln!("{:?}: {}", issue.severity, issue.message);
//!     true
//! });
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod container;
pub mod elements;
pub mod ids;
pub mod validator;

pub use container::{parse_frame, serialize_frame, ParsedBitstreamFrame};
pub use elements::{
    AudioDataDlc, AudioDataPcm, AuthoringToolInfo, BedDefinition, BedRemap, Element, IaFrame,
    ObjectDefinition, ObjectZoneDefinition19, UserData,
};
