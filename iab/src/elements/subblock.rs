// IAB
// Copyright (c) 2026 The IAB Codec Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic machinery for the time-sliced sub-block sequences (object pan, bed remap, zone 19, and
//! any future one): the first sub-block's `*InfoExists` flag is never written (its contents are
//! unconditional), while every later sub-block carries the flag and is skipped when it is clear.
//! These two free functions are that pair, parameterized over the per-sub-block reader/writer
//! closure so `bed.rs`/`remap.rs`/`object.rs`/`zone.rs` don't each reimplement the index-0 special
//! case.

use iab_core::errors::Result;
use iab_core::io::{BitReader, BitWriter};

/// Reads a sequence of `count` sub-blocks, applying the first-sub-block-is-unconditional rule.
pub fn read_sequence<T>(
    reader: &mut BitReader<'_>,
    count: usize,
    mut read_contents: impl FnMut(&mut BitReader<'_>) -> Result<T>,
) -> Result<Vec<Option<T>>> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        if i == 0 {
            out.push(Some(read_contents(reader)?));
        }
        else if reader.read_bit()? {
            out.push(Some(read_contents(reader)?));
        }
        else {
            out.push(None);
        }
    }
    Ok(out)
}

/// Writes a sequence of sub-blocks previously produced by [`read_sequence`] (or built directly),
/// applying the same first-sub-block-is-unconditional rule. Panics if `blocks[0]` is `None`: the
/// first sub-block's contents are never optional.
pub fn write_sequence<T>(
    writer: &mut BitWriter,
    blocks: &[Option<T>],
    mut write_contents: impl FnMut(&mut BitWriter, &T),
) {
    for (i, block) in blocks.iter().enumerate() {
        if i == 0 {
            let contents = block.as_ref().expect("first sub-block must carry contents");
            write_contents(writer, contents);
        }
        else {
            match block {
                Some(contents) => {
                    writer.write_bit(true);
                    write_contents(writer, contents);
                }
                None => writer.write_bit(false),
            }
        }
    }
}
