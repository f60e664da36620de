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

use super::{Error, Result};
use token::Token;

/// The uniform reader surface shared by every format.
///
/// A reader walks a byte range one token at a time. Classification
/// happens once per step, so `token` is idempotent and never advances.
/// Format-level damage (an unknown tag byte, a truncated token, invalid
/// UTF-8, an end marker for the wrong container kind, an unrepresentable
/// value) is sticky: the reader answers `Token::Error` from then on and
/// `next` returns `false`. A failed typed accessor is not damage; the
/// caller may check `token` and retry with the right accessor.
pub trait Reader {
    /// The classification of the current token.
    fn token(&self) -> Token;

    /// The number of open containers enclosing the cursor.
    ///
    /// The frame of a container is opened by the `next` that consumes its
    /// begin token and closed by the `next` that consumes its end token,
    /// so the depth at an end token still counts that container.
    fn size(&self) -> usize;

    /// Advances past the current token. Returns `true` if another token
    /// is available, `false` at the end of the input.
    ///
    /// Containers with an explicit element count never carry end markers
    /// on the wire; the reader synthesizes the end token once the count
    /// is satisfied, and the `next` consuming it advances no bytes.
    fn next(&mut self) -> bool;

    /// Advances past the current token after asserting its kind.
    fn expect(&mut self, expected: Token) -> Result<()> {
        let current = self.token();
        if current != expected {
            return Err(Error::UnexpectedToken(current));
        }
        self.next();
        Ok(())
    }

    fn get_bool(&self) -> Result<bool>;

    fn get_i64(&self) -> Result<i64>;

    fn get_f64(&self) -> Result<f64>;

    fn get_string(&self) -> Result<String>;

    fn get_binary(&self) -> Result<Vec<u8>>;
}
