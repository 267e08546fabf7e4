// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `AuthoringToolInfo` (ID `0x100`): the authoring tool's identifying URI. At most one may appear
//! per frame (`validator` issue sentinel `-2`).

use iab_core::errors::Result;
use iab_core::io::{BitReader, BitWriter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthoringToolInfo {
    pub uri: Vec<u8>,
}

impl AuthoringToolInfo {
    pub fn new(uri: impl Into<Vec<u8>>) -> Self {
        AuthoringToolInfo { uri: uri.into() }
    }

    pub fn uri_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.uri)
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(AuthoringToolInfo { uri: reader.read_cstring()? })
    }

    pub fn write(&self, writer: &mut BitWriter) {
        writer.write_cstring(&self.uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authoring_tool_info_round_trips() {
        let info = AuthoringToolInfo::new(&b"urn:example:authoring-tool:1.0"[..]);
        let mut writer = BitWriter::new();
        info.write(&mut writer);
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = AuthoringToolInfo::read(&mut reader).unwrap();
        assert_eq!(decoded, info);
    }
}
