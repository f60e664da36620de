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

use super::Result;

/// The uniform writer surface the archive layer drives.
///
/// A writer wraps a format's encoder and enforces the format's structural
/// rules: it injects separators where the wire format needs them, keeps a
/// stack of open containers, and refuses structural misuse (an end call
/// for a container kind that is not open, or an over- or underfilled
/// counted container) instead of producing malformed output.
///
/// Every method reports the number of bytes appended. Some legitimate
/// operations append nothing: the end of a counted container is implicit
/// in binary formats, and a JSON map defers its opening brace until the
/// first key reveals whether the keys are strings. A sink that refuses to
/// grow surfaces as `Error::SinkExhausted`.
pub trait Writer {
    /// The number of open containers.
    fn size(&self) -> usize;

    fn write_null(&mut self) -> Result<usize>;

    fn write_bool(&mut self, value: bool) -> Result<usize>;

    fn write_i64(&mut self, value: i64) -> Result<usize>;

    fn write_f32(&mut self, value: f32) -> Result<usize>;

    fn write_f64(&mut self, value: f64) -> Result<usize>;

    fn write_str(&mut self, value: &str) -> Result<usize>;

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize>;

    fn record_begin(&mut self) -> Result<usize>;

    fn record_end(&mut self) -> Result<usize>;

    /// Opens an array whose element count is not known in advance.
    /// Formats whose wire encoding requires a count reject this call.
    fn array_begin(&mut self) -> Result<usize>;

    /// Opens an array of exactly `count` elements. Formats with unsized
    /// wire containers treat the count as advisory.
    fn array_begin_sized(&mut self, count: usize) -> Result<usize>;

    fn array_end(&mut self) -> Result<usize>;

    /// Opens a map whose pair count is not known in advance.
    fn map_begin(&mut self) -> Result<usize>;

    /// Opens a map of exactly `count` key/value pairs.
    fn map_begin_sized(&mut self, count: usize) -> Result<usize>;

    fn map_end(&mut self) -> Result<usize>;
}
