// Copyright (C) 2026 The Tokser developers.
//
// This file is part of Tokser.
//
// Tokser is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Tokser is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Tokser.  If not, see <http://www.gnu.org/licenses/>.

/// A byte input with peek-then-advance semantics.
///
/// A `Source` is a cursor over a borrowed byte range. Readers never move
/// the cursor past the end of the range; a token that would need more
/// bytes than remain is reported by the reader, not by the source.
#[derive(Debug)]
pub struct Source<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> Source<'a> {
    pub fn new(data: &'a [u8]) -> Source<'a> {
        Source {
            data: data,
            cursor: 0,
        }
    }

    /// The current position within the range.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The exclusive end position of the range.
    pub fn end(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn exhausted(&self) -> bool {
        self.cursor == self.data.len()
    }

    /// The byte at the cursor, without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.cursor).cloned()
    }

    /// The unread remainder of the range.
    pub fn tail(&self) -> &'a [u8] {
        &self.data[self.cursor..]
    }

    /// Moves the cursor forward by `count` bytes.
    pub fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.remaining());
        self.cursor += count;
    }

    /// Returns the next `count` bytes and advances past them, or `None`
    /// if fewer than `count` bytes remain.
    pub fn take(&mut self, count: usize) -> Option<&'a [u8]> {
        if count > self.remaining() {
            return None;
        }
        let start = self.cursor;
        self.cursor += count;
        Some(&self.data[start..self.cursor])
    }
}
