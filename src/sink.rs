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

/// A byte output with reserve-then-write semantics.
///
/// Encoders reserve the full length of a token before writing its first
/// byte, so a sink that answers `true` must accept that many `write`
/// calls. This is what makes encoder calls all-or-nothing: a refused
/// reservation leaves the sink exactly as it was.
pub trait Sink {
    /// Attempts to ensure capacity for `additional` more bytes. Returns
    /// `false` if the sink is bounded and cannot accept them.
    fn reserve(&mut self, additional: usize) -> bool;

    /// Appends a single byte. Only called after a successful `reserve`.
    fn write(&mut self, byte: u8);
}

impl Sink for Vec<u8> {
    fn reserve(&mut self, additional: usize) -> bool {
        Vec::reserve(self, additional);
        true
    }

    fn write(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// A sink with a fixed capacity.
///
/// Useful for emitting into preallocated frames and for exercising the
/// all-or-nothing contract of the encoders.
#[derive(Debug)]
pub struct BoundedSink {
    data: Vec<u8>,
    capacity: usize,
}

impl BoundedSink {
    /// Creates a sink that accepts at most `capacity` bytes.
    pub fn new(capacity: usize) -> BoundedSink {
        BoundedSink {
            data: Vec::with_capacity(capacity),
            capacity: capacity,
        }
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the sink and returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Sink for BoundedSink {
    fn reserve(&mut self, additional: usize) -> bool {
        self.data.len() + additional <= self.capacity
    }

    fn write(&mut self, byte: u8) {
        debug_assert!(self.data.len() < self.capacity);
        self.data.push(byte);
    }
}
