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

//! The TransENC wire format.
//!
//! TransENC is a self-delimiting binary format. Every token starts with a
//! single tag byte, optionally followed by a little-endian payload.
//! Integers between -32 and 127 are encoded inline in the tag byte itself;
//! wider integers carry the narrowest width that fits. Strings and binary
//! blobs are length-prefixed with the narrowest length field that fits.
//! Containers are unsized: a begin sentinel is closed by the matching end
//! sentinel, and records exist as a container kind of their own.

use byteorder::{ByteOrder, LittleEndian};

use super::{Error, Result};
use sink::Sink;
use source::Source;
use token::Token;

/// The TransENC code table.
///
/// Tag bytes occupy `0x80..0xDF`. Every byte outside that band is an
/// inline integer: `0x00..0x7F` are the values 0 through 127 and
/// `0xE0..0xFF` are -32 through -1 in two's complement.
pub mod codes {
    pub const FALSE: u8 = 0x80;
    pub const TRUE: u8 = 0x81;
    pub const NULL: u8 = 0x82;

    pub const RECORD_BEGIN: u8 = 0x90;
    pub const RECORD_END: u8 = 0x91;
    pub const ARRAY_BEGIN: u8 = 0x92;
    pub const ARRAY_END: u8 = 0x93;
    pub const MAP_BEGIN: u8 = 0x94;
    pub const MAP_END: u8 = 0x95;

    pub const INT8: u8 = 0xA0;
    pub const INT16: u8 = 0xA1;
    pub const INT32: u8 = 0xA2;
    pub const INT64: u8 = 0xA3;

    pub const FLOAT32: u8 = 0xA5;
    pub const FLOAT64: u8 = 0xA6;

    pub const STRING_INT8: u8 = 0xA8;
    pub const STRING_INT16: u8 = 0xA9;
    pub const STRING_INT32: u8 = 0xAA;
    pub const STRING_INT64: u8 = 0xAB;

    pub const BINARY_INT8: u8 = 0xAC;
    pub const BINARY_INT16: u8 = 0xAD;
    pub const BINARY_INT32: u8 = 0xAE;
    pub const BINARY_INT64: u8 = 0xAF;
}

/// Writes single TransENC tokens into a byte sink.
///
/// Every `put_*` call either appends the complete encoding and returns
/// the number of bytes written, or returns 0 and leaves the sink
/// untouched when the sink cannot grow by the required amount.
pub struct Encoder<'a, S: Sink + 'a> {
    sink: &'a mut S,
}

impl<'a, S: Sink + 'a> Encoder<'a, S> {
    pub fn new(sink: &'a mut S) -> Encoder<'a, S> {
        Encoder { sink: sink }
    }

    fn put_tag(&mut self, tag: u8) -> usize {
        if !self.sink.reserve(1) {
            return 0;
        }
        self.sink.write(tag);
        1
    }

    fn put_tagged(&mut self, tag: u8, payload: &[u8]) -> usize {
        let size = 1 + payload.len();
        if !self.sink.reserve(size) {
            return 0;
        }
        self.sink.write(tag);
        for &byte in payload {
            self.sink.write(byte);
        }
        size
    }

    fn put_lengthed(&mut self, tags: &[u8; 4], data: &[u8]) -> usize {
        let length = data.len() as u64;
        let mut prefix = [0; 8];
        let (tag, width) = if length <= 0xFF {
            prefix[0] = length as u8;
            (tags[0], 1)
        } else if length <= 0xFFFF {
            LittleEndian::write_u16(&mut prefix, length as u16);
            (tags[1], 2)
        } else if length <= 0xFFFF_FFFF {
            LittleEndian::write_u32(&mut prefix, length as u32);
            (tags[2], 4)
        } else if length <= i64::max_value() as u64 {
            LittleEndian::write_u64(&mut prefix, length);
            (tags[3], 8)
        } else {
            return 0;
        };
        let size = 1 + width + data.len();
        if !self.sink.reserve(size) {
            return 0;
        }
        self.sink.write(tag);
        for &byte in &prefix[..width] {
            self.sink.write(byte);
        }
        for &byte in data {
            self.sink.write(byte);
        }
        size
    }

    pub fn put_null(&mut self) -> usize {
        self.put_tag(codes::NULL)
    }

    pub fn put_bool(&mut self, value: bool) -> usize {
        self.put_tag(if value { codes::TRUE } else { codes::FALSE })
    }

    /// Writes `value` in the narrowest encoding that holds it: inline for
    /// -32 through 127, then the tagged 8, 16, 32, or 64 bit forms.
    pub fn put_i64(&mut self, value: i64) -> usize {
        if value >= -32 && value <= 127 {
            if !self.sink.reserve(1) {
                return 0;
            }
            self.sink.write(value as u8);
            1
        } else if value >= -128 && value < -32 {
            self.put_tagged(codes::INT8, &[value as u8])
        } else if value >= -32768 && value <= 32767 {
            let mut payload = [0; 2];
            LittleEndian::write_i16(&mut payload, value as i16);
            self.put_tagged(codes::INT16, &payload)
        } else if value >= -2147483648 && value <= 2147483647 {
            let mut payload = [0; 4];
            LittleEndian::write_i32(&mut payload, value as i32);
            self.put_tagged(codes::INT32, &payload)
        } else {
            let mut payload = [0; 8];
            LittleEndian::write_i64(&mut payload, value);
            self.put_tagged(codes::INT64, &payload)
        }
    }

    pub fn put_f32(&mut self, value: f32) -> usize {
        let mut payload = [0; 4];
        LittleEndian::write_f32(&mut payload, value);
        self.put_tagged(codes::FLOAT32, &payload)
    }

    pub fn put_f64(&mut self, value: f64) -> usize {
        let mut payload = [0; 8];
        LittleEndian::write_f64(&mut payload, value);
        self.put_tagged(codes::FLOAT64, &payload)
    }

    pub fn put_str(&mut self, value: &str) -> usize {
        const TAGS: [u8; 4] = [
            codes::STRING_INT8,
            codes::STRING_INT16,
            codes::STRING_INT32,
            codes::STRING_INT64,
        ];
        self.put_lengthed(&TAGS, value.as_bytes())
    }

    pub fn put_bytes(&mut self, data: &[u8]) -> usize {
        const TAGS: [u8; 4] = [
            codes::BINARY_INT8,
            codes::BINARY_INT16,
            codes::BINARY_INT32,
            codes::BINARY_INT64,
        ];
        self.put_lengthed(&TAGS, data)
    }

    pub fn put_record_begin(&mut self) -> usize {
        self.put_tag(codes::RECORD_BEGIN)
    }

    pub fn put_record_end(&mut self) -> usize {
        self.put_tag(codes::RECORD_END)
    }

    pub fn put_array_begin(&mut self) -> usize {
        self.put_tag(codes::ARRAY_BEGIN)
    }

    /// The count is advisory; the wire encoding is the unsized sentinel.
    pub fn put_array_begin_sized(&mut self, _count: usize) -> usize {
        self.put_array_begin()
    }

    pub fn put_array_end(&mut self) -> usize {
        self.put_tag(codes::ARRAY_END)
    }

    pub fn put_map_begin(&mut self) -> usize {
        self.put_tag(codes::MAP_BEGIN)
    }

    /// The count is advisory; the wire encoding is the unsized sentinel.
    pub fn put_map_begin_sized(&mut self, _count: usize) -> usize {
        self.put_map_begin()
    }

    pub fn put_map_end(&mut self) -> usize {
        self.put_tag(codes::MAP_END)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Array,
    Map,
    Record,
}

#[derive(Clone, Copy)]
enum Scalar {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
}

struct State<'a> {
    token: Token,
    scalar: Scalar,
    payload: &'a [u8],
}

impl<'a> State<'a> {
    fn plain(token: Token) -> State<'a> {
        State {
            token: token,
            scalar: Scalar::None,
            payload: &[],
        }
    }
}

/// An incremental reader over a TransENC byte range.
pub struct Reader<'a> {
    source: Source<'a>,
    stack: Vec<Kind>,
    current: State<'a>,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Reader<'a> {
        let mut reader = Reader {
            source: Source::new(input),
            stack: Vec::new(),
            current: State::plain(Token::Eof),
        };
        reader.decode();
        reader
    }

    fn fail(&mut self) {
        self.current = State::plain(Token::Error);
    }

    fn scalar(&mut self, token: Token, scalar: Scalar) {
        self.current = State {
            token: token,
            scalar: scalar,
            payload: &[],
        };
    }

    fn end_token(&mut self, kind: Kind, token: Token) {
        if self.stack.last() != Some(&kind) {
            self.fail();
            return;
        }
        self.source.advance(1);
        self.current = State::plain(token);
    }

    fn integer_payload(&mut self, width: usize) -> Option<i64> {
        self.source.advance(1);
        let bytes = match self.source.take(width) {
            Some(bytes) => bytes,
            None => return None,
        };
        Some(match width {
            1 => bytes[0] as i8 as i64,
            2 => LittleEndian::read_i16(bytes) as i64,
            4 => LittleEndian::read_i32(bytes) as i64,
            _ => LittleEndian::read_i64(bytes),
        })
    }

    fn lengthed_payload(&mut self, width: usize) -> Option<&'a [u8]> {
        self.source.advance(1);
        let prefix = match self.source.take(width) {
            Some(prefix) => prefix,
            None => return None,
        };
        let length = match width {
            1 => prefix[0] as u64,
            2 => LittleEndian::read_u16(prefix) as u64,
            4 => LittleEndian::read_u32(prefix) as u64,
            _ => LittleEndian::read_u64(prefix),
        };
        if length > i64::max_value() as u64 || length > self.source.remaining() as u64 {
            return None;
        }
        self.source.take(length as usize)
    }

    fn decode(&mut self) {
        if self.current.token == Token::Error {
            return;
        }
        let tag = match self.source.peek() {
            Some(tag) => tag,
            None => {
                self.current = State::plain(Token::Eof);
                return;
            }
        };
        if tag < 0x80 || tag >= 0xE0 {
            self.source.advance(1);
            self.scalar(Token::Integer, Scalar::Int(tag as i8 as i64));
            return;
        }
        match tag {
            codes::NULL => {
                self.source.advance(1);
                self.current = State::plain(Token::Null);
            }
            codes::FALSE => {
                self.source.advance(1);
                self.scalar(Token::Boolean, Scalar::Bool(false));
            }
            codes::TRUE => {
                self.source.advance(1);
                self.scalar(Token::Boolean, Scalar::Bool(true));
            }
            codes::RECORD_BEGIN => {
                self.source.advance(1);
                self.current = State::plain(Token::RecordBegin);
            }
            codes::ARRAY_BEGIN => {
                self.source.advance(1);
                self.current = State::plain(Token::ArrayBegin);
            }
            codes::MAP_BEGIN => {
                self.source.advance(1);
                self.current = State::plain(Token::MapBegin);
            }
            codes::RECORD_END => self.end_token(Kind::Record, Token::RecordEnd),
            codes::ARRAY_END => self.end_token(Kind::Array, Token::ArrayEnd),
            codes::MAP_END => self.end_token(Kind::Map, Token::MapEnd),
            codes::INT8 | codes::INT16 | codes::INT32 | codes::INT64 => {
                let width = 1 << (tag - codes::INT8);
                match self.integer_payload(width) {
                    Some(value) => self.scalar(Token::Integer, Scalar::Int(value)),
                    None => self.fail(),
                }
            }
            codes::FLOAT32 => {
                self.source.advance(1);
                match self.source.take(4) {
                    Some(bytes) => {
                        let value = LittleEndian::read_f32(bytes) as f64;
                        self.scalar(Token::Floating, Scalar::Float(value));
                    }
                    None => self.fail(),
                }
            }
            codes::FLOAT64 => {
                self.source.advance(1);
                match self.source.take(8) {
                    Some(bytes) => {
                        let value = LittleEndian::read_f64(bytes);
                        self.scalar(Token::Floating, Scalar::Float(value));
                    }
                    None => self.fail(),
                }
            }
            codes::STRING_INT8 | codes::STRING_INT16 | codes::STRING_INT32
            | codes::STRING_INT64 => {
                let width = 1 << (tag - codes::STRING_INT8);
                match self.lengthed_payload(width) {
                    Some(payload) => {
                        if ::std::str::from_utf8(payload).is_err() {
                            self.fail();
                            return;
                        }
                        self.current = State {
                            token: Token::String,
                            scalar: Scalar::None,
                            payload: payload,
                        };
                    }
                    None => self.fail(),
                }
            }
            codes::BINARY_INT8 | codes::BINARY_INT16 | codes::BINARY_INT32
            | codes::BINARY_INT64 => {
                let width = 1 << (tag - codes::BINARY_INT8);
                match self.lengthed_payload(width) {
                    Some(payload) => {
                        self.current = State {
                            token: Token::Binary,
                            scalar: Scalar::None,
                            payload: payload,
                        };
                    }
                    None => self.fail(),
                }
            }
            _ => self.fail(),
        }
    }
}

impl<'a> ::reader::Reader for Reader<'a> {
    fn token(&self) -> Token {
        self.current.token
    }

    fn size(&self) -> usize {
        self.stack.len()
    }

    fn next(&mut self) -> bool {
        match self.current.token {
            Token::Eof | Token::Error => return false,
            Token::RecordBegin => self.stack.push(Kind::Record),
            Token::ArrayBegin => self.stack.push(Kind::Array),
            Token::MapBegin => self.stack.push(Kind::Map),
            Token::RecordEnd | Token::ArrayEnd | Token::MapEnd => {
                self.stack.pop();
            }
            _ => {}
        }
        self.decode();
        self.current.token != Token::Eof && self.current.token != Token::Error
    }

    fn get_bool(&self) -> Result<bool> {
        match self.current.scalar {
            Scalar::Bool(value) => Ok(value),
            _ => Err(Error::UnexpectedToken(self.current.token)),
        }
    }

    fn get_i64(&self) -> Result<i64> {
        match self.current.scalar {
            Scalar::Int(value) => Ok(value),
            _ => Err(Error::UnexpectedToken(self.current.token)),
        }
    }

    fn get_f64(&self) -> Result<f64> {
        match self.current.scalar {
            Scalar::Float(value) => Ok(value),
            _ => Err(Error::UnexpectedToken(self.current.token)),
        }
    }

    fn get_string(&self) -> Result<String> {
        if self.current.token != Token::String {
            return Err(Error::UnexpectedToken(self.current.token));
        }
        Ok(::std::str::from_utf8(self.current.payload)?.to_string())
    }

    fn get_binary(&self) -> Result<Vec<u8>> {
        if self.current.token != Token::Binary {
            return Err(Error::UnexpectedToken(self.current.token));
        }
        Ok(self.current.payload.to_vec())
    }
}

fn emitted(size: usize) -> Result<usize> {
    if size == 0 {
        Err(Error::SinkExhausted)
    } else {
        Ok(size)
    }
}

/// The archive-facing TransENC writer.
///
/// TransENC needs no separators; the frame stack exists to reject end
/// calls whose kind does not match the innermost open container.
pub struct Writer<'a, S: Sink + 'a> {
    encoder: Encoder<'a, S>,
    stack: Vec<Kind>,
}

impl<'a, S: Sink + 'a> Writer<'a, S> {
    pub fn new(sink: &'a mut S) -> Writer<'a, S> {
        Writer {
            encoder: Encoder::new(sink),
            stack: Vec::new(),
        }
    }

    fn begin(&mut self, kind: Kind, size: usize) -> Result<usize> {
        emitted(size)?;
        self.stack.push(kind);
        Ok(size)
    }

    fn end(&mut self, size: usize) -> Result<usize> {
        emitted(size)?;
        self.stack.pop();
        Ok(size)
    }
}

impl<'a, S: Sink + 'a> ::writer::Writer for Writer<'a, S> {
    fn size(&self) -> usize {
        self.stack.len()
    }

    fn write_null(&mut self) -> Result<usize> {
        emitted(self.encoder.put_null())
    }

    fn write_bool(&mut self, value: bool) -> Result<usize> {
        emitted(self.encoder.put_bool(value))
    }

    fn write_i64(&mut self, value: i64) -> Result<usize> {
        emitted(self.encoder.put_i64(value))
    }

    fn write_f32(&mut self, value: f32) -> Result<usize> {
        emitted(self.encoder.put_f32(value))
    }

    fn write_f64(&mut self, value: f64) -> Result<usize> {
        emitted(self.encoder.put_f64(value))
    }

    fn write_str(&mut self, value: &str) -> Result<usize> {
        if value.len() as u64 > i64::max_value() as u64 {
            return Err(Error::Overflow);
        }
        emitted(self.encoder.put_str(value))
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        if data.len() as u64 > i64::max_value() as u64 {
            return Err(Error::Overflow);
        }
        emitted(self.encoder.put_bytes(data))
    }

    fn record_begin(&mut self) -> Result<usize> {
        let size = self.encoder.put_record_begin();
        self.begin(Kind::Record, size)
    }

    fn record_end(&mut self) -> Result<usize> {
        if self.stack.last() != Some(&Kind::Record) {
            return Err(Error::UnbalancedContainer(Token::RecordEnd));
        }
        let size = self.encoder.put_record_end();
        self.end(size)
    }

    fn array_begin(&mut self) -> Result<usize> {
        let size = self.encoder.put_array_begin();
        self.begin(Kind::Array, size)
    }

    fn array_begin_sized(&mut self, count: usize) -> Result<usize> {
        let size = self.encoder.put_array_begin_sized(count);
        self.begin(Kind::Array, size)
    }

    fn array_end(&mut self) -> Result<usize> {
        if self.stack.last() != Some(&Kind::Array) {
            return Err(Error::UnbalancedContainer(Token::ArrayEnd));
        }
        let size = self.encoder.put_array_end();
        self.end(size)
    }

    fn map_begin(&mut self) -> Result<usize> {
        let size = self.encoder.put_map_begin();
        self.begin(Kind::Map, size)
    }

    fn map_begin_sized(&mut self, count: usize) -> Result<usize> {
        let size = self.encoder.put_map_begin_sized(count);
        self.begin(Kind::Map, size)
    }

    fn map_end(&mut self) -> Result<usize> {
        if self.stack.last() != Some(&Kind::Map) {
            return Err(Error::UnbalancedContainer(Token::MapEnd));
        }
        let size = self.encoder.put_map_end();
        self.end(size)
    }
}
