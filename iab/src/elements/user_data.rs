// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `UserData` (ID `0x101`): an opaque payload tagged with a 16-byte Universal Label identifying
//! its format, carried verbatim and otherwise uninterpreted by this crate.

use iab_core::errors::Result;
use iab_core::io::{BitReader, BitWriter};

pub const UL_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub ul: [u8; UL_LEN],
    pub payload: Vec<u8>,
}

impl UserData {
    pub fn new(ul: [u8; UL_LEN], payload: Vec<u8>) -> Self {
        UserData { ul, payload }
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let mut ul = [0u8; UL_LEN];
        for byte in &mut ul {
            *byte = reader.read_bits_u32(8)? as u8;
        }
        let remaining_bytes = reader.bits_left() / 8;
        let payload = reader.read_byte_slice(remaining_bytes)?.to_vec();
        Ok(UserData { ul, payload })
    }

    pub fn write(&self, writer: &mut BitWriter) {
        for &byte in &self.ul {
            writer.write_bits_u32(byte as u32, 8);
        }
        writer.write_bytes(&self.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_round_trips() {
        let data = UserData::new([0xAB; UL_LEN], vec![1, 2, 3, 4, 5]);
        let mut writer = BitWriter::new();
        data.write(&mut writer);
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = UserData::read(&mut reader).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn empty_payload_round_trips() {
        let data = UserData::new([0u8; UL_LEN], Vec::new());
        let mut writer = BitWriter::new();
        data.write(&mut writer);
        writer.align();
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        let decoded = UserData::read(&mut reader).unwrap();
        assert_eq!(decoded, data);
    }
}
