// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dynamic Lossless Compression (DLC): the linear-predictive, Rice/PCM-entropy-coded audio codec
//! used to carry `AudioDataDLC` payloads in an Immersive Audio Bitstream. Supports the 48 kHz base
//! layer and the 96 kHz extension layer (anti-aliasing low-pass filter, decimation, and polyphase
//! interpolation).
//!
//! The bundled [`encoder::SimpleEncoder`] implements the simple (no linear-prediction) encoding
//! profile; [`decoder::FullDecoder`] decodes any conforming DLC payload, including Rice-coded
//! residuals and non-trivial predictor regions that a third-party encoder may have produced.

pub mod decoder;
pub mod encoder;
pub mod filter;
pub mod lattice;
pub mod residual;
pub mod tables;

pub use decoder::FullDecoder;
pub use encoder::SimpleEncoder;
