// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type shared by every crate in this workspace.

use std::fmt;
use std::io;

/// Describes why a byte stream could not be parsed as a well-formed IAB element.
#[derive(Debug)]
pub enum IabError {
    /// A fixed-width field, a Plex(n) integer, or a reserved code could not be read, or was read
    /// with an invalid encoding.
    MalformedStream(&'static str),

    /// The stream describes a feature this version of the codec recognizes but does not
    /// implement (e.g. a fractional frame rate, or Rice-coded DLC residuals on the encode path).
    UnsupportedFeature(&'static str),

    /// The element tree is internally inconsistent: a declared count does not match the actual
    /// number of children, a sub-element list contains a duplicate identity, or a sub-element
    /// appears under a parent that does not permit it.
    InconsistentTree(&'static str),

    /// A value supplied when constructing an element or value object lies outside the field's
    /// domain (e.g. a gain outside `[0, 1]`).
    OutOfRange(&'static str),

    /// The stream ended where more data was expected. Distinct from `MalformedStream` because
    /// callers iterating frames treat this as a normal termination condition.
    EndOfStream,

    /// An I/O error occurred on the underlying byte source or sink.
    Io(io::Error),
}

impl fmt::Display for IabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IabError::MalformedStream(msg) => write!(f, "malformed stream: {}", msg),
            IabError::UnsupportedFeature(msg) => write!(f, "unsupported feature: {}", msg),
            IabError::InconsistentTree(msg) => write!(f, "inconsistent element tree: {}", msg),
            IabError::OutOfRange(msg) => write!(f, "value out of range: {}", msg),
            IabError::EndOfStream => write!(f, "end of stream"),
            IabError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for IabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IabError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for IabError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            IabError::EndOfStream
        }
        else {
            IabError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, IabError>;

/// Convenience constructor for a `MalformedStream` error, returned as a `Result`.
pub fn malformed_stream_error<T>(msg: &'static str) -> Result<T> {
    Err(IabError::MalformedStream(msg))
}

/// Convenience constructor for an `UnsupportedFeature` error, returned as a `Result`.
pub fn unsupported_error<T>(msg: &'static str) -> Result<T> {
    Err(IabError::UnsupportedFeature(msg))
}

/// Convenience constructor for an `InconsistentTree` error, returned as a `Result`.
pub fn inconsistent_tree_error<T>(msg: &'static str) -> Result<T> {
    Err(IabError::InconsistentTree(msg))
}

/// Convenience constructor for an `OutOfRange` error, returned as a `Result`.
pub fn out_of_range_error<T>(msg: &'static str) -> Result<T> {
    Err(IabError::OutOfRange(msg))
}

/// Convenience constructor for an `EndOfStream` error, returned as a `Result`.
pub fn end_of_stream_error<T>() -> Result<T> {
    Err(IabError::EndOfStream)
}
