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

//! The MessagePack wire format.
//!
//! The subset of the published MessagePack specification without
//! extension types: nil, booleans, the fixint/int/uint families,
//! float32/float64, fixstr/str8/str16/str32, bin8/bin16/bin32,
//! fixarray/array16/array32, and fixmap/map16/map32. All multi-byte
//! payloads are big-endian, as the specification requires.
//!
//! Containers carry their element count in the begin token and have no
//! end marker on the wire; the reader synthesizes `ArrayEnd` and `MapEnd`
//! tokens once the count is satisfied. A map with count `n` must be
//! followed by exactly `2*n` values. If the input ends earlier, the
//! reader reports `Eof` and never produces the end token.

use byteorder::{BigEndian, ByteOrder};

use super::{Error, Result};
use sink::Sink;
use source::Source;
use token::Token;

/// The MessagePack code table.
pub mod codes {
    /// `0x80..0x8F`, the low nibble is the pair count.
    pub const FIXMAP: u8 = 0x80;
    /// `0x90..0x9F`, the low nibble is the element count.
    pub const FIXARRAY: u8 = 0x90;
    /// `0xA0..0xBF`, the low five bits are the byte length.
    pub const FIXSTR: u8 = 0xA0;

    pub const NIL: u8 = 0xC0;
    pub const FALSE: u8 = 0xC2;
    pub const TRUE: u8 = 0xC3;

    pub const BIN8: u8 = 0xC4;
    pub const BIN16: u8 = 0xC5;
    pub const BIN32: u8 = 0xC6;

    pub const FLOAT32: u8 = 0xCA;
    pub const FLOAT64: u8 = 0xCB;

    pub const UINT8: u8 = 0xCC;
    pub const UINT16: u8 = 0xCD;
    pub const UINT32: u8 = 0xCE;
    pub const UINT64: u8 = 0xCF;

    pub const INT8: u8 = 0xD0;
    pub const INT16: u8 = 0xD1;
    pub const INT32: u8 = 0xD2;
    pub const INT64: u8 = 0xD3;

    pub const STR8: u8 = 0xD9;
    pub const STR16: u8 = 0xDA;
    pub const STR32: u8 = 0xDB;

    pub const ARRAY16: u8 = 0xDC;
    pub const ARRAY32: u8 = 0xDD;

    pub const MAP16: u8 = 0xDE;
    pub const MAP32: u8 = 0xDF;
}

/// Writes single MessagePack tokens into a byte sink.
///
/// Every `put_*` call either appends the complete encoding and returns
/// the number of bytes written, or returns 0 and leaves the sink
/// untouched. Container begins require their count up front; MessagePack
/// has no unsized containers and no record kind.
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

    fn put_prefixed(&mut self, head: &[u8], data: &[u8]) -> usize {
        let size = head.len() + data.len();
        if !self.sink.reserve(size) {
            return 0;
        }
        for &byte in head {
            self.sink.write(byte);
        }
        for &byte in data {
            self.sink.write(byte);
        }
        size
    }

    /// The head bytes for a string of `length` bytes, or `None` when the
    /// length does not fit the format.
    fn str_head(length: u64, head: &mut [u8; 5]) -> Option<usize> {
        if length <= 31 {
            head[0] = codes::FIXSTR | length as u8;
            Some(1)
        } else if length <= 0xFF {
            head[0] = codes::STR8;
            head[1] = length as u8;
            Some(2)
        } else if length <= 0xFFFF {
            head[0] = codes::STR16;
            BigEndian::write_u16(&mut head[1..3], length as u16);
            Some(3)
        } else if length <= 0xFFFF_FFFF {
            head[0] = codes::STR32;
            BigEndian::write_u32(&mut head[1..5], length as u32);
            Some(5)
        } else {
            None
        }
    }

    pub fn put_null(&mut self) -> usize {
        self.put_tag(codes::NIL)
    }

    pub fn put_bool(&mut self, value: bool) -> usize {
        self.put_tag(if value { codes::TRUE } else { codes::FALSE })
    }

    /// Writes `value` in the narrowest encoding that holds it. Positive
    /// values outside the fixint range use the uint family, which is one
    /// width class narrower than the signed family for the same value.
    pub fn put_i64(&mut self, value: i64) -> usize {
        if value >= 0 {
            if value <= 127 {
                self.put_tag(value as u8)
            } else if value <= 0xFF {
                self.put_tagged(codes::UINT8, &[value as u8])
            } else if value <= 0xFFFF {
                let mut payload = [0; 2];
                BigEndian::write_u16(&mut payload, value as u16);
                self.put_tagged(codes::UINT16, &payload)
            } else if value <= 0xFFFF_FFFF {
                let mut payload = [0; 4];
                BigEndian::write_u32(&mut payload, value as u32);
                self.put_tagged(codes::UINT32, &payload)
            } else {
                let mut payload = [0; 8];
                BigEndian::write_u64(&mut payload, value as u64);
                self.put_tagged(codes::UINT64, &payload)
            }
        } else if value >= -32 {
            self.put_tag(value as u8)
        } else if value >= -128 {
            self.put_tagged(codes::INT8, &[value as u8])
        } else if value >= -32768 {
            let mut payload = [0; 2];
            BigEndian::write_i16(&mut payload, value as i16);
            self.put_tagged(codes::INT16, &payload)
        } else if value >= -2147483648 {
            let mut payload = [0; 4];
            BigEndian::write_i32(&mut payload, value as i32);
            self.put_tagged(codes::INT32, &payload)
        } else {
            let mut payload = [0; 8];
            BigEndian::write_i64(&mut payload, value);
            self.put_tagged(codes::INT64, &payload)
        }
    }

    pub fn put_f32(&mut self, value: f32) -> usize {
        let mut payload = [0; 4];
        BigEndian::write_f32(&mut payload, value);
        self.put_tagged(codes::FLOAT32, &payload)
    }

    pub fn put_f64(&mut self, value: f64) -> usize {
        let mut payload = [0; 8];
        BigEndian::write_f64(&mut payload, value);
        self.put_tagged(codes::FLOAT64, &payload)
    }

    pub fn put_str(&mut self, value: &str) -> usize {
        let mut head = [0; 5];
        let head_len = match Self::str_head(value.len() as u64, &mut head) {
            Some(head_len) => head_len,
            None => return 0,
        };
        self.put_prefixed(&head[..head_len], value.as_bytes())
    }

    pub fn put_bytes(&mut self, data: &[u8]) -> usize {
        let length = data.len() as u64;
        let mut head = [0; 5];
        let head_len = if length <= 0xFF {
            head[0] = codes::BIN8;
            head[1] = length as u8;
            2
        } else if length <= 0xFFFF {
            head[0] = codes::BIN16;
            BigEndian::write_u16(&mut head[1..3], length as u16);
            3
        } else if length <= 0xFFFF_FFFF {
            head[0] = codes::BIN32;
            BigEndian::write_u32(&mut head[1..5], length as u32);
            5
        } else {
            return 0;
        };
        self.put_prefixed(&head[..head_len], data)
    }

    pub fn put_array_begin_sized(&mut self, count: usize) -> usize {
        let count = count as u64;
        if count <= 15 {
            self.put_tag(codes::FIXARRAY | count as u8)
        } else if count <= 0xFFFF {
            let mut payload = [0; 2];
            BigEndian::write_u16(&mut payload, count as u16);
            self.put_tagged(codes::ARRAY16, &payload)
        } else if count <= 0xFFFF_FFFF {
            let mut payload = [0; 4];
            BigEndian::write_u32(&mut payload, count as u32);
            self.put_tagged(codes::ARRAY32, &payload)
        } else {
            0
        }
    }

    pub fn put_map_begin_sized(&mut self, count: usize) -> usize {
        let count = count as u64;
        if count <= 15 {
            self.put_tag(codes::FIXMAP | count as u8)
        } else if count <= 0xFFFF {
            let mut payload = [0; 2];
            BigEndian::write_u16(&mut payload, count as u16);
            self.put_tagged(codes::MAP16, &payload)
        } else if count <= 0xFFFF_FFFF {
            let mut payload = [0; 4];
            BigEndian::write_u32(&mut payload, count as u32);
            self.put_tagged(codes::MAP32, &payload)
        } else {
            0
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Array,
    Map,
}

#[derive(Clone, Copy)]
struct Frame {
    kind: Kind,
    expected: u64,
    produced: u64,
}

impl Frame {
    /// The number of value tokens the container holds: maps count pairs.
    fn limit(&self) -> u64 {
        match self.kind {
            Kind::Array => self.expected,
            Kind::Map => 2 * self.expected,
        }
    }
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
    count: u64,
}

impl<'a> State<'a> {
    fn plain(token: Token) -> State<'a> {
        State {
            token: token,
            scalar: Scalar::None,
            payload: &[],
            count: 0,
        }
    }

    fn begin(token: Token, count: u64) -> State<'a> {
        State {
            token: token,
            scalar: Scalar::None,
            payload: &[],
            count: count,
        }
    }
}

/// An incremental reader over a MessagePack byte range.
pub struct Reader<'a> {
    source: Source<'a>,
    stack: Vec<Frame>,
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
            count: 0,
        };
    }

    fn sized_payload(&mut self, width: usize) -> Option<&'a [u8]> {
        let prefix = match self.source.take(width) {
            Some(prefix) => prefix,
            None => return None,
        };
        let length = match width {
            1 => prefix[0] as u64,
            2 => BigEndian::read_u16(prefix) as u64,
            _ => BigEndian::read_u32(prefix) as u64,
        };
        if length > self.source.remaining() as u64 {
            return None;
        }
        self.source.take(length as usize)
    }

    fn string_payload(&mut self, payload: Option<&'a [u8]>) {
        match payload {
            Some(payload) => {
                if ::std::str::from_utf8(payload).is_err() {
                    self.fail();
                    return;
                }
                self.current = State {
                    token: Token::String,
                    scalar: Scalar::None,
                    payload: payload,
                    count: 0,
                };
            }
            None => self.fail(),
        }
    }

    fn count_payload(&mut self, width: usize) -> Option<u64> {
        let prefix = match self.source.take(width) {
            Some(prefix) => prefix,
            None => return None,
        };
        Some(match width {
            2 => BigEndian::read_u16(prefix) as u64,
            _ => BigEndian::read_u32(prefix) as u64,
        })
    }

    fn decode(&mut self) {
        if self.current.token == Token::Error {
            return;
        }
        if let Some(top) = self.stack.last() {
            if top.produced == top.limit() {
                let token = match top.kind {
                    Kind::Array => Token::ArrayEnd,
                    Kind::Map => Token::MapEnd,
                };
                self.current = State::plain(token);
                return;
            }
        }
        let tag = match self.source.peek() {
            Some(tag) => tag,
            None => {
                self.current = State::plain(Token::Eof);
                return;
            }
        };
        self.source.advance(1);
        if tag <= 0x7F || tag >= 0xE0 {
            self.scalar(Token::Integer, Scalar::Int(tag as i8 as i64));
            return;
        }
        if tag >= codes::FIXMAP && tag < codes::FIXARRAY {
            self.current = State::begin(Token::MapBegin, (tag & 0x0F) as u64);
            return;
        }
        if tag >= codes::FIXARRAY && tag < codes::FIXSTR {
            self.current = State::begin(Token::ArrayBegin, (tag & 0x0F) as u64);
            return;
        }
        if tag >= codes::FIXSTR && tag < codes::NIL {
            let length = (tag & 0x1F) as usize;
            let payload = self.source.take(length);
            self.string_payload(payload);
            return;
        }
        match tag {
            codes::NIL => self.current = State::plain(Token::Null),
            codes::FALSE => self.scalar(Token::Boolean, Scalar::Bool(false)),
            codes::TRUE => self.scalar(Token::Boolean, Scalar::Bool(true)),
            codes::BIN8 | codes::BIN16 | codes::BIN32 => {
                let width = 1 << (tag - codes::BIN8);
                match self.sized_payload(width) {
                    Some(payload) => {
                        self.current = State {
                            token: Token::Binary,
                            scalar: Scalar::None,
                            payload: payload,
                            count: 0,
                        };
                    }
                    None => self.fail(),
                }
            }
            codes::FLOAT32 => match self.source.take(4) {
                Some(bytes) => {
                    let value = BigEndian::read_f32(bytes) as f64;
                    self.scalar(Token::Floating, Scalar::Float(value));
                }
                None => self.fail(),
            },
            codes::FLOAT64 => match self.source.take(8) {
                Some(bytes) => {
                    let value = BigEndian::read_f64(bytes);
                    self.scalar(Token::Floating, Scalar::Float(value));
                }
                None => self.fail(),
            },
            codes::UINT8 | codes::UINT16 | codes::UINT32 | codes::UINT64 => {
                let width = 1 << (tag - codes::UINT8);
                match self.source.take(width) {
                    Some(bytes) => {
                        let value = match width {
                            1 => bytes[0] as u64,
                            2 => BigEndian::read_u16(bytes) as u64,
                            4 => BigEndian::read_u32(bytes) as u64,
                            _ => BigEndian::read_u64(bytes),
                        };
                        if value > i64::max_value() as u64 {
                            self.fail();
                            return;
                        }
                        self.scalar(Token::Integer, Scalar::Int(value as i64));
                    }
                    None => self.fail(),
                }
            }
            codes::INT8 | codes::INT16 | codes::INT32 | codes::INT64 => {
                let width = 1 << (tag - codes::INT8);
                match self.source.take(width) {
                    Some(bytes) => {
                        let value = match width {
                            1 => bytes[0] as i8 as i64,
                            2 => BigEndian::read_i16(bytes) as i64,
                            4 => BigEndian::read_i32(bytes) as i64,
                            _ => BigEndian::read_i64(bytes),
                        };
                        self.scalar(Token::Integer, Scalar::Int(value));
                    }
                    None => self.fail(),
                }
            }
            codes::STR8 | codes::STR16 | codes::STR32 => {
                let width = 1 << (tag - codes::STR8);
                let payload = self.sized_payload(width);
                self.string_payload(payload);
            }
            codes::ARRAY16 | codes::ARRAY32 => {
                let width = if tag == codes::ARRAY16 { 2 } else { 4 };
                match self.count_payload(width) {
                    Some(count) => self.current = State::begin(Token::ArrayBegin, count),
                    None => self.fail(),
                }
            }
            codes::MAP16 | codes::MAP32 => {
                let width = if tag == codes::MAP16 { 2 } else { 4 };
                match self.count_payload(width) {
                    Some(count) => self.current = State::begin(Token::MapBegin, count),
                    None => self.fail(),
                }
            }
            // 0xC1 is never used; 0xC7..0xC9 and 0xD4..0xD8 are extension
            // types, which this subset rejects.
            _ => self.fail(),
        }
    }

    fn bump(&mut self) {
        if let Some(top) = self.stack.last_mut() {
            top.produced += 1;
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
            Token::ArrayBegin => {
                let count = self.current.count;
                self.bump();
                self.stack.push(Frame {
                    kind: Kind::Array,
                    expected: count,
                    produced: 0,
                });
            }
            Token::MapBegin => {
                let count = self.current.count;
                self.bump();
                self.stack.push(Frame {
                    kind: Kind::Map,
                    expected: count,
                    produced: 0,
                });
            }
            Token::ArrayEnd | Token::MapEnd => {
                self.stack.pop();
            }
            _ => self.bump(),
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

/// The archive-facing MessagePack writer.
///
/// MessagePack needs no separators; the frame stack checks that every
/// counted container is filled with exactly the announced number of
/// values before its end call, and that nothing is written beyond the
/// count. Unsized begins and records are rejected: the wire cannot
/// express a container whose count is unknown when the begin is written,
/// and buffering the elements to count them is not this crate's job.
pub struct Writer<'a, S: Sink + 'a> {
    encoder: Encoder<'a, S>,
    stack: Vec<Frame>,
}

impl<'a, S: Sink + 'a> Writer<'a, S> {
    pub fn new(sink: &'a mut S) -> Writer<'a, S> {
        Writer {
            encoder: Encoder::new(sink),
            stack: Vec::new(),
        }
    }

    fn precheck(&self) -> Result<()> {
        if let Some(top) = self.stack.last() {
            if top.produced == top.limit() {
                let token = match top.kind {
                    Kind::Array => Token::ArrayEnd,
                    Kind::Map => Token::MapEnd,
                };
                return Err(Error::UnbalancedContainer(token));
            }
        }
        Ok(())
    }

    fn accept(&mut self, size: usize) -> Result<usize> {
        emitted(size)?;
        if let Some(top) = self.stack.last_mut() {
            top.produced += 1;
        }
        Ok(size)
    }

    fn end(&mut self, kind: Kind, token: Token) -> Result<usize> {
        {
            let top = match self.stack.last() {
                Some(top) => top,
                None => return Err(Error::UnbalancedContainer(token)),
            };
            if top.kind != kind || top.produced != top.limit() {
                return Err(Error::UnbalancedContainer(token));
            }
        }
        self.stack.pop();
        Ok(0)
    }
}

impl<'a, S: Sink + 'a> ::writer::Writer for Writer<'a, S> {
    fn size(&self) -> usize {
        self.stack.len()
    }

    fn write_null(&mut self) -> Result<usize> {
        self.precheck()?;
        let size = self.encoder.put_null();
        self.accept(size)
    }

    fn write_bool(&mut self, value: bool) -> Result<usize> {
        self.precheck()?;
        let size = self.encoder.put_bool(value);
        self.accept(size)
    }

    fn write_i64(&mut self, value: i64) -> Result<usize> {
        self.precheck()?;
        let size = self.encoder.put_i64(value);
        self.accept(size)
    }

    fn write_f32(&mut self, value: f32) -> Result<usize> {
        self.precheck()?;
        let size = self.encoder.put_f32(value);
        self.accept(size)
    }

    fn write_f64(&mut self, value: f64) -> Result<usize> {
        self.precheck()?;
        let size = self.encoder.put_f64(value);
        self.accept(size)
    }

    fn write_str(&mut self, value: &str) -> Result<usize> {
        if value.len() as u64 > 0xFFFF_FFFF {
            return Err(Error::Overflow);
        }
        self.precheck()?;
        let size = self.encoder.put_str(value);
        self.accept(size)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        if data.len() as u64 > 0xFFFF_FFFF {
            return Err(Error::Overflow);
        }
        self.precheck()?;
        let size = self.encoder.put_bytes(data);
        self.accept(size)
    }

    fn record_begin(&mut self) -> Result<usize> {
        Err(Error::UnexpectedToken(Token::RecordBegin))
    }

    fn record_end(&mut self) -> Result<usize> {
        Err(Error::UnexpectedToken(Token::RecordEnd))
    }

    fn array_begin(&mut self) -> Result<usize> {
        Err(Error::UnexpectedToken(Token::ArrayBegin))
    }

    fn array_begin_sized(&mut self, count: usize) -> Result<usize> {
        if count as u64 > 0xFFFF_FFFF {
            return Err(Error::Overflow);
        }
        self.precheck()?;
        let size = self.encoder.put_array_begin_sized(count);
        let size = self.accept(size)?;
        self.stack.push(Frame {
            kind: Kind::Array,
            expected: count as u64,
            produced: 0,
        });
        Ok(size)
    }

    fn array_end(&mut self) -> Result<usize> {
        self.end(Kind::Array, Token::ArrayEnd)
    }

    fn map_begin(&mut self) -> Result<usize> {
        Err(Error::UnexpectedToken(Token::MapBegin))
    }

    fn map_begin_sized(&mut self, count: usize) -> Result<usize> {
        if count as u64 > 0xFFFF_FFFF {
            return Err(Error::Overflow);
        }
        self.precheck()?;
        let size = self.encoder.put_map_begin_sized(count);
        let size = self.accept(size)?;
        self.stack.push(Frame {
            kind: Kind::Map,
            expected: count as u64,
            produced: 0,
        });
        Ok(size)
    }

    fn map_end(&mut self) -> Result<usize> {
        self.end(Kind::Map, Token::MapEnd)
    }
}
