// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bit-level stream primitives: a MSB-first bit reader over a borrowed byte slice, a MSB-first
//! bit writer over an owned byte buffer, and the Plex(n) variable-length integer coding used
//! throughout the element model.

mod bit;

pub use bit::{BitReader, BitWriter};
