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

use std::fmt;

/// The token alphabet shared by every wire format.
///
/// A `Token` is the classification of the item at a reader's cursor, not
/// the item itself. Payloads are obtained through the reader's typed
/// accessors: `Boolean` pairs with `get_bool`, `Integer` with `get_i64`
/// (every wire-level integer width widens losslessly to 64 bits),
/// `Floating` with `get_f64` (32-bit widths widen), `String` with
/// `get_string` (always UTF-8), and `Binary` with `get_binary`.
///
/// `Eof` marks the end of the input range and `Error` marks a reader that
/// has rejected its input; neither ever appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Eof,
    Error,
    Null,
    Boolean,
    Integer,
    Floating,
    String,
    Binary,
    ArrayBegin,
    ArrayEnd,
    MapBegin,
    MapEnd,
    RecordBegin,
    RecordEnd,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Eof => write!(f, "end of input"),
            Token::Error => write!(f, "error"),
            Token::Null => write!(f, "null"),
            Token::Boolean => write!(f, "boolean"),
            Token::Integer => write!(f, "integer"),
            Token::Floating => write!(f, "floating"),
            Token::String => write!(f, "string"),
            Token::Binary => write!(f, "binary"),
            Token::ArrayBegin => write!(f, "array begin"),
            Token::ArrayEnd => write!(f, "array end"),
            Token::MapBegin => write!(f, "map begin"),
            Token::MapEnd => write!(f, "map end"),
            Token::RecordBegin => write!(f, "record begin"),
            Token::RecordEnd => write!(f, "record end"),
        }
    }
}
