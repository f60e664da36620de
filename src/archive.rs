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

//! The archive layer.
//!
//! Archives bridge application data structures and the token layer. The
//! typed adapters ([`OutputArchive`] and [`InputArchive`]) are thin: a
//! traversal of the application value calls one typed method per
//! primitive and per container boundary, and the archive forwards each
//! call to the writer or asserts it against the reader.
//!
//! The module also provides a ready-made traversal over
//! `serde_json::Value`, used as a universal in-memory tree: `serialize`
//! walks a value into any format, `deserialize` rebuilds a value from any
//! format, and `transcode` chains the two.

use serde_json::{Map, Number, Value};

use super::{Error, Format, Result};
use json;
use msgpack;
use reader::Reader;
use token::Token;
use transenc;
use writer::Writer;

/// Drives typed save calls into a writer.
pub struct OutputArchive<W: Writer> {
    writer: W,
}

impl<W: Writer> OutputArchive<W> {
    pub fn new(writer: W) -> OutputArchive<W> {
        OutputArchive { writer: writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn save_null(&mut self) -> Result<()> {
        self.writer.write_null().map(|_| ())
    }

    pub fn save_bool(&mut self, value: bool) -> Result<()> {
        self.writer.write_bool(value).map(|_| ())
    }

    pub fn save_i64(&mut self, value: i64) -> Result<()> {
        self.writer.write_i64(value).map(|_| ())
    }

    pub fn save_f32(&mut self, value: f32) -> Result<()> {
        self.writer.write_f32(value).map(|_| ())
    }

    pub fn save_f64(&mut self, value: f64) -> Result<()> {
        self.writer.write_f64(value).map(|_| ())
    }

    pub fn save_str(&mut self, value: &str) -> Result<()> {
        self.writer.write_str(value).map(|_| ())
    }

    pub fn save_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_bytes(data).map(|_| ())
    }

    pub fn save_record_begin(&mut self) -> Result<()> {
        self.writer.record_begin().map(|_| ())
    }

    pub fn save_record_end(&mut self) -> Result<()> {
        self.writer.record_end().map(|_| ())
    }

    pub fn save_array_begin(&mut self) -> Result<()> {
        self.writer.array_begin().map(|_| ())
    }

    pub fn save_array_begin_sized(&mut self, count: usize) -> Result<()> {
        self.writer.array_begin_sized(count).map(|_| ())
    }

    pub fn save_array_end(&mut self) -> Result<()> {
        self.writer.array_end().map(|_| ())
    }

    pub fn save_map_begin(&mut self) -> Result<()> {
        self.writer.map_begin().map(|_| ())
    }

    pub fn save_map_begin_sized(&mut self, count: usize) -> Result<()> {
        self.writer.map_begin_sized(count).map(|_| ())
    }

    pub fn save_map_end(&mut self) -> Result<()> {
        self.writer.map_end().map(|_| ())
    }
}

/// Drives typed load calls against a reader.
///
/// Each load asserts the current token kind, extracts the payload, and
/// advances. The probes (`load_null`, `at_array_end`, `at_map_end`,
/// `at_record_end`) let a traversal branch on what comes next without
/// consuming it.
pub struct InputArchive<R: Reader> {
    reader: R,
}

impl<R: Reader> InputArchive<R> {
    pub fn new(reader: R) -> InputArchive<R> {
        InputArchive { reader: reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn load_bool(&mut self) -> Result<bool> {
        let value = self.reader.get_bool()?;
        self.reader.next();
        Ok(value)
    }

    pub fn load_i64(&mut self) -> Result<i64> {
        let value = self.reader.get_i64()?;
        self.reader.next();
        Ok(value)
    }

    pub fn load_f64(&mut self) -> Result<f64> {
        let value = self.reader.get_f64()?;
        self.reader.next();
        Ok(value)
    }

    pub fn load_string(&mut self) -> Result<String> {
        let value = self.reader.get_string()?;
        self.reader.next();
        Ok(value)
    }

    pub fn load_binary(&mut self) -> Result<Vec<u8>> {
        let value = self.reader.get_binary()?;
        self.reader.next();
        Ok(value)
    }

    /// Returns whether the current token is null, advancing past it if so.
    pub fn load_null(&mut self) -> bool {
        if self.reader.token() == Token::Null {
            self.reader.next();
            true
        } else {
            false
        }
    }

    pub fn load_record_begin(&mut self) -> Result<()> {
        self.reader.expect(Token::RecordBegin)
    }

    pub fn load_record_end(&mut self) -> Result<()> {
        self.reader.expect(Token::RecordEnd)
    }

    pub fn load_array_begin(&mut self) -> Result<()> {
        self.reader.expect(Token::ArrayBegin)
    }

    pub fn load_array_end(&mut self) -> Result<()> {
        self.reader.expect(Token::ArrayEnd)
    }

    pub fn load_map_begin(&mut self) -> Result<()> {
        self.reader.expect(Token::MapBegin)
    }

    pub fn load_map_end(&mut self) -> Result<()> {
        self.reader.expect(Token::MapEnd)
    }

    pub fn at_array_end(&self) -> bool {
        self.reader.token() == Token::ArrayEnd
    }

    pub fn at_map_end(&self) -> bool {
        self.reader.token() == Token::MapEnd
    }

    pub fn at_record_end(&self) -> bool {
        self.reader.token() == Token::RecordEnd
    }
}

fn save_value<W: Writer>(writer: &mut W, value: &Value) -> Result<()> {
    match *value {
        Value::Null => {
            writer.write_null()?;
        }
        Value::Bool(value) => {
            writer.write_bool(value)?;
        }
        Value::Number(ref number) => {
            if let Some(value) = number.as_i64() {
                writer.write_i64(value)?;
            } else if number.as_u64().is_some() {
                // above i64 range
                return Err(Error::Overflow);
            } else if let Some(value) = number.as_f64() {
                writer.write_f64(value)?;
            } else {
                return Err(Error::Overflow);
            }
        }
        Value::String(ref value) => {
            writer.write_str(value)?;
        }
        Value::Array(ref items) => {
            writer.array_begin_sized(items.len())?;
            for item in items {
                save_value(writer, item)?;
            }
            writer.array_end()?;
        }
        Value::Object(ref entries) => {
            writer.map_begin_sized(entries.len())?;
            for (key, item) in entries {
                writer.write_str(key)?;
                save_value(writer, item)?;
            }
            writer.map_end()?;
        }
    }
    Ok(())
}

fn load_value<R: Reader>(reader: &mut R) -> Result<Value> {
    match reader.token() {
        Token::Null => {
            reader.next();
            Ok(Value::Null)
        }
        Token::Boolean => {
            let value = reader.get_bool()?;
            reader.next();
            Ok(Value::Bool(value))
        }
        Token::Integer => {
            let value = reader.get_i64()?;
            reader.next();
            Ok(Value::from(value))
        }
        Token::Floating => {
            let value = reader.get_f64()?;
            reader.next();
            // non-finite values have no JSON number form
            Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
        }
        Token::String => {
            let value = reader.get_string()?;
            reader.next();
            Ok(Value::String(value))
        }
        Token::Binary => {
            let data = reader.get_binary()?;
            reader.next();
            Ok(Value::Array(
                data.into_iter().map(|byte| Value::from(byte as i64)).collect(),
            ))
        }
        Token::ArrayBegin | Token::RecordBegin => {
            let end = if reader.token() == Token::ArrayBegin {
                Token::ArrayEnd
            } else {
                Token::RecordEnd
            };
            reader.next();
            let mut items = Vec::new();
            while reader.token() != end {
                match reader.token() {
                    Token::Eof => return Err(Error::UnexpectedToken(Token::Eof)),
                    Token::Error => return Err(Error::InvalidEncoding("malformed input")),
                    _ => items.push(load_value(reader)?),
                }
            }
            reader.next();
            Ok(Value::Array(items))
        }
        Token::MapBegin => {
            reader.next();
            let mut pairs: Vec<(Value, Value)> = Vec::new();
            while reader.token() != Token::MapEnd {
                let key = match reader.token() {
                    Token::Eof => return Err(Error::UnexpectedToken(Token::Eof)),
                    Token::Error => return Err(Error::InvalidEncoding("malformed input")),
                    _ => load_value(reader)?,
                };
                let value = match reader.token() {
                    Token::Eof => return Err(Error::UnexpectedToken(Token::Eof)),
                    Token::Error => return Err(Error::InvalidEncoding("malformed input")),
                    Token::MapEnd => return Err(Error::UnexpectedToken(Token::MapEnd)),
                    _ => load_value(reader)?,
                };
                pairs.push((key, value));
            }
            reader.next();
            if pairs.iter().all(|&(ref key, _)| key.is_string()) {
                let mut entries = Map::new();
                for (key, value) in pairs {
                    if let Value::String(key) = key {
                        entries.insert(key, value);
                    }
                }
                Ok(Value::Object(entries))
            } else {
                // maps with non-string keys become arrays of pairs
                Ok(Value::Array(
                    pairs
                        .into_iter()
                        .map(|(key, value)| Value::Array(vec![key, value]))
                        .collect(),
                ))
            }
        }
        Token::Eof => Err(Error::UnexpectedToken(Token::Eof)),
        Token::Error => Err(Error::InvalidEncoding("malformed input")),
        other => Err(Error::UnexpectedToken(other)),
    }
}

fn finish<R: Reader>(reader: &R) -> Result<()> {
    match reader.token() {
        Token::Eof => Ok(()),
        Token::Error => Err(Error::InvalidEncoding("malformed input")),
        other => Err(Error::UnexpectedToken(other)),
    }
}

/// Serialize an arbitrary value.
///
/// The `serde_json::Value` type is used as a container for an arbitrary
/// value that can be serialized to any supported format.
pub fn serialize(value: &Value, to: Format) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    match to {
        Format::Json => {
            let mut writer = json::Writer::new(&mut output);
            save_value(&mut writer, value)?;
        }
        Format::Msgpack => {
            let mut writer = msgpack::Writer::new(&mut output);
            save_value(&mut writer, value)?;
        }
        Format::Transenc => {
            let mut writer = transenc::Writer::new(&mut output);
            save_value(&mut writer, value)?;
        }
    }
    Ok(output)
}

/// Deserialize to a universal, arbitrary value.
///
/// All formats are deserialized to a `serde_json::Value`. The whole input
/// must be one value: trailing bytes after it are an error.
pub fn deserialize(input: &[u8], from: Format) -> Result<Value> {
    match from {
        Format::Json => {
            let mut reader = json::Reader::new(input);
            let value = load_value(&mut reader)?;
            finish(&reader)?;
            Ok(value)
        }
        Format::Msgpack => {
            let mut reader = msgpack::Reader::new(input);
            let value = load_value(&mut reader)?;
            finish(&reader)?;
            Ok(value)
        }
        Format::Transenc => {
            let mut reader = transenc::Reader::new(input);
            let value = load_value(&mut reader)?;
            finish(&reader)?;
            Ok(value)
        }
    }
}

/// Convert the input in one format to the output of another format.
///
/// # Example
///
/// ```rust
/// extern crate tokser;
///
/// use tokser::Format;
///
/// fn main() {
///     let input = "{\"bool\":true}";
///     let output = tokser::transcode(
///         input.as_bytes(),
///         Format::Json,
///         Format::Msgpack
///     ).unwrap();
///     assert_eq!(output, vec![0x81, 0xA4, 0x62, 0x6F, 0x6F, 0x6C, 0xC3]);
/// }
/// ```
pub fn transcode(input: &[u8], from: Format, to: Format) -> Result<Vec<u8>> {
    serialize(&deserialize(input, from)?, to)
}
