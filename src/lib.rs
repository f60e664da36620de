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

//! # Tokser
//!
//! Tokser is a streaming codec library for structured data. Three wire
//! formats share one token model: [JSON](http://www.json.org) (textual),
//! TransENC (a self-delimiting binary format), and
//! [MessagePack](http://msgpack.org) (a tag-length-value binary format).
//! Values are broken down into a flat stream of tokens: null, boolean,
//! integer, floating-point, string, binary, and the begin/end markers of
//! arrays, maps, and records.
//!
//! Each format provides three layers:
//!
//! - An `Encoder` writes exactly one token at a time into a byte [`Sink`].
//!   A call either appends the complete encoding and returns the number of
//!   bytes written, or returns 0 and leaves the sink untouched when the
//!   sink cannot grow by the required amount.
//! - A `Reader` walks a byte range one token at a time. It exposes the
//!   classification of the current token, typed accessors for the payload,
//!   and a frame stack that enforces balanced containers and map arity.
//! - A `Writer` sits between the archive layer and the encoder. It owns the
//!   format's structural rules: separators and key discipline for JSON,
//!   element counting for MessagePack, sentinel matching for TransENC.
//!
//! On top of the token layer, the archive module drives whole values
//! through any of the formats. The `serialize`, `deserialize`, and
//! `transcode` functions use `serde_json::Value` as the universal
//! in-memory tree, so any supported input format can be converted to any
//! supported output format.
//!
//! ## Examples
//!
//! Transcode a JSON document to MessagePack:
//!
//! ```rust
//! extern crate tokser;
//!
//! use tokser::Format;
//!
//! fn main() {
//!     let input = "{\"bool\":true}";
//!     let output = tokser::transcode(
//!         input.as_bytes(),
//!         Format::Json,
//!         Format::Msgpack
//!     ).unwrap();
//!     assert_eq!(output, vec![0x81, 0xA4, 0x62, 0x6F, 0x6F, 0x6C, 0xC3]);
//! }
//! ```
//!
//! Read a MessagePack stream token by token:
//!
//! ```rust
//! extern crate tokser;
//!
//! use tokser::{Reader, Token};
//!
//! fn main() {
//!     let input = [0x92, 0x01, 0xC3]; // [1, true]
//!     let mut reader = tokser::msgpack::Reader::new(&input);
//!     assert_eq!(reader.token(), Token::ArrayBegin);
//!     reader.next();
//!     assert_eq!(reader.get_i64().unwrap(), 1);
//!     reader.next();
//!     assert_eq!(reader.get_bool().unwrap(), true);
//!     reader.next();
//!     assert_eq!(reader.token(), Token::ArrayEnd);
//!     assert_eq!(reader.next(), false);
//! }
//! ```
//!
//! Encode a single token into a bounded sink:
//!
//! ```rust
//! extern crate tokser;
//!
//! use tokser::BoundedSink;
//!
//! fn main() {
//!     let mut sink = BoundedSink::new(2);
//!     let mut encoder = tokser::transenc::Encoder::new(&mut sink);
//!     assert_eq!(encoder.put_i64(-33), 2);
//!     assert_eq!(sink.as_slice(), &[0xA0, 0xDF]);
//! }
//! ```

extern crate byteorder;
extern crate ryu;
extern crate serde_json;

use std::error::Error as StdError;
use std::fmt;
use std::result;
use std::str::{self, FromStr};

pub use self::archive::deserialize;
pub use self::archive::serialize;
pub use self::archive::transcode;
pub use self::archive::{InputArchive, OutputArchive};
pub use self::reader::Reader;
pub use self::sink::{BoundedSink, Sink};
pub use self::source::Source;
pub use self::token::Token;
pub use self::writer::Writer;

pub mod archive;
pub mod json;
pub mod msgpack;
pub mod reader;
pub mod sink;
pub mod source;
pub mod token;
pub mod transenc;
pub mod writer;

/// A specialized `Result` type for tokser operations.
pub type Result<T> = result::Result<T, Error>;

/// The supported wire formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Msgpack,
    Transenc,
}

impl Format {
    pub fn possible_values() -> Vec<&'static str> {
        vec![
            "Json", "json", "JSON", "Msgpack", "msgpack", "MSGPACK", "Transenc", "transenc",
            "TRANSENC",
        ]
    }
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match &*s.to_string().to_lowercase() {
            "json" => Ok(Format::Json),
            "msgpack" => Ok(Format::Msgpack),
            "transenc" => Ok(Format::Transenc),
            _ => Err("No Match"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Format::Json => write!(f, "JSON"),
            Format::Msgpack => write!(f, "Msgpack"),
            Format::Transenc => write!(f, "TransENC"),
        }
    }
}

/// The error type for tokser-related operations and associated traits.
///
/// Sink exhaustion is not an error at the encoder level: encoders report a
/// refused write by returning 0 and leaving the sink untouched. The
/// `SinkExhausted` variant exists for the writer and archive layers, which
/// surface a refusal to their callers as a failure.
#[derive(Debug)]
pub enum Error {
    /// A typed accessor or structural assertion found a different token
    /// than the one it was called for.
    UnexpectedToken(Token),
    /// Malformed bytes: an unknown tag, a truncated token, or input that
    /// violates the format grammar.
    InvalidEncoding(&'static str),
    /// An end marker does not match the innermost open container.
    UnbalancedContainer(Token),
    /// A length or integer value exceeds the representable bounds.
    Overflow,
    /// The sink refused to grow by the number of bytes a token requires.
    SinkExhausted,
    /// A UTF-8 operation failed.
    Utf8(str::Utf8Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnexpectedToken(token) => write!(f, "unexpected token: {}", token),
            Error::InvalidEncoding(message) => write!(f, "invalid encoding: {}", message),
            Error::UnbalancedContainer(token) => write!(f, "unbalanced container: {}", token),
            Error::Overflow => write!(f, "value out of range"),
            Error::SinkExhausted => write!(f, "sink exhausted"),
            Error::Utf8(ref err) => write!(f, "{}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Utf8(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<str::Utf8Error> for Error {
    fn from(err: str::Utf8Error) -> Error {
        Error::Utf8(err)
    }
}
