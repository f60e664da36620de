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

extern crate tokser;

use tokser::json::{Reader, Writer};
use tokser::{Error, Reader as ReaderTrait, Token, Writer as WriterTrait};

fn as_text(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

//-----------------------------------------------------------------------------
// Writer: basic types
//-----------------------------------------------------------------------------

#[test]
fn write_false() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_bool(false).unwrap();
    assert_eq!(as_text(buffer), "false");
}

#[test]
fn write_true() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_bool(true).unwrap();
    assert_eq!(as_text(buffer), "true");
}

#[test]
fn write_null() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_null().unwrap();
    assert_eq!(as_text(buffer), "null");
}

//-----------------------------------------------------------------------------
// Writer: integers
//-----------------------------------------------------------------------------

#[test]
fn write_int_zero() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_i64(0).unwrap();
    assert_eq!(as_text(buffer), "0");
}

#[test]
fn write_int_one() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_i64(1).unwrap();
    assert_eq!(as_text(buffer), "1");
}

#[test]
fn write_int_minus_one() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_i64(-1).unwrap();
    assert_eq!(as_text(buffer), "-1");
}

//-----------------------------------------------------------------------------
// Writer: floating-point
//-----------------------------------------------------------------------------

#[test]
fn write_double_one() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_f64(1.0).unwrap();
    assert_eq!(as_text(buffer), "1");
}

#[test]
fn write_double_half() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_f64(0.5).unwrap();
    assert_eq!(as_text(buffer), "0.5");
}

#[test]
fn write_double_max() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_f64(::std::f64::MAX).unwrap();
    assert_eq!(as_text(buffer), "1.7976931348623157e+308");
}

#[test]
fn write_double_min() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer)
        .write_f64(::std::f64::MIN_POSITIVE)
        .unwrap();
    assert_eq!(as_text(buffer), "2.2250738585072014e-308");
}

#[test]
fn write_double_infinity() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_f64(::std::f64::INFINITY).unwrap();
    assert_eq!(as_text(buffer), "null");
}

#[test]
fn write_double_minus_infinity() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer)
        .write_f64(-::std::f64::INFINITY)
        .unwrap();
    assert_eq!(as_text(buffer), "null");
}

#[test]
fn write_double_nan() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_f64(::std::f64::NAN).unwrap();
    assert_eq!(as_text(buffer), "null");
}

#[test]
fn write_float32() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_f32(0.5).unwrap();
    assert_eq!(as_text(buffer), "0.5");
}

//-----------------------------------------------------------------------------
// Writer: strings
//-----------------------------------------------------------------------------

#[test]
fn write_string_empty() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_str("").unwrap();
    assert_eq!(as_text(buffer), "\"\"");
}

#[test]
fn write_string_alpha() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_str("alpha").unwrap();
    assert_eq!(as_text(buffer), "\"alpha\"");
}

#[test]
fn write_string_escapes() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_str("a\"b\\c\nd\te").unwrap();
    assert_eq!(as_text(buffer), "\"a\\\"b\\\\c\\nd\\te\"");
}

#[test]
fn write_string_control_characters() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_str("\u{1}\u{1f}").unwrap();
    assert_eq!(as_text(buffer), "\"\\u0001\\u001f\"");
}

#[test]
fn write_string_unicode_passthrough() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_str("héllo").unwrap();
    assert_eq!(as_text(buffer), "\"héllo\"");
}

#[test]
fn write_binary_as_numbers() {
    let mut buffer = Vec::new();
    Writer::new(&mut buffer).write_bytes(&[1, 2, 255]).unwrap();
    assert_eq!(as_text(buffer), "[1,2,255]");
}

//-----------------------------------------------------------------------------
// Writer: containers
//-----------------------------------------------------------------------------

#[test]
fn write_array_empty() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.array_begin().unwrap();
        writer.array_end().unwrap();
    }
    assert_eq!(as_text(buffer), "[]");
}

#[test]
fn write_array_bool_one() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.array_begin().unwrap();
        writer.write_bool(true).unwrap();
        writer.array_end().unwrap();
    }
    assert_eq!(as_text(buffer), "[true]");
}

#[test]
fn write_array_bool_two() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.array_begin_sized(2).unwrap();
        writer.write_bool(true).unwrap();
        writer.write_bool(false).unwrap();
        writer.array_end().unwrap();
    }
    assert_eq!(as_text(buffer), "[true,false]");
}

#[test]
fn write_object_empty() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.map_begin().unwrap();
        writer.map_end().unwrap();
    }
    assert_eq!(as_text(buffer), "{}");
}

#[test]
fn write_object_bool_one() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.map_begin().unwrap();
        writer.write_str("A").unwrap();
        writer.write_bool(true).unwrap();
        writer.map_end().unwrap();
    }
    assert_eq!(as_text(buffer), "{\"A\":true}");
}

#[test]
fn write_object_bool_two() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.map_begin().unwrap();
        writer.write_str("A").unwrap();
        writer.write_bool(true).unwrap();
        writer.write_str("B").unwrap();
        writer.write_bool(false).unwrap();
        writer.map_end().unwrap();
    }
    assert_eq!(as_text(buffer), "{\"A\":true,\"B\":false}");
}

#[test]
fn write_nonobject_bool_one() {
    // integer keys cannot form a JSON object
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.map_begin().unwrap();
        writer.write_i64(2).unwrap();
        writer.write_bool(true).unwrap();
        writer.map_end().unwrap();
    }
    assert_eq!(as_text(buffer), "[[2,true]]");
}

#[test]
fn write_nonobject_bool_two() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.map_begin().unwrap();
        writer.write_i64(2).unwrap();
        writer.write_bool(true).unwrap();
        writer.write_i64(4).unwrap();
        writer.write_bool(false).unwrap();
        writer.map_end().unwrap();
    }
    assert_eq!(as_text(buffer), "[[2,true],[4,false]]");
}

#[test]
fn write_record_as_array() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.record_begin().unwrap();
        writer.write_i64(1).unwrap();
        writer.write_str("two").unwrap();
        writer.record_end().unwrap();
    }
    assert_eq!(as_text(buffer), "[1,\"two\"]");
}

#[test]
fn write_nested() {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::new(&mut buffer);
        writer.map_begin().unwrap();
        writer.write_str("a").unwrap();
        writer.array_begin().unwrap();
        writer.write_i64(1).unwrap();
        writer.map_begin().unwrap();
        writer.write_str("b").unwrap();
        writer.write_null().unwrap();
        writer.map_end().unwrap();
        writer.array_end().unwrap();
        writer.map_end().unwrap();
    }
    assert_eq!(as_text(buffer), "{\"a\":[1,{\"b\":null}]}");
}

#[test]
fn write_mismatched_end_fails() {
    let mut buffer = Vec::new();
    let mut writer = Writer::new(&mut buffer);
    writer.array_begin().unwrap();
    match writer.map_end() {
        Err(Error::UnbalancedContainer(Token::MapEnd)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn write_nonstring_key_after_object_commits_fails() {
    let mut buffer = Vec::new();
    let mut writer = Writer::new(&mut buffer);
    writer.map_begin().unwrap();
    writer.write_str("A").unwrap();
    writer.write_bool(true).unwrap();
    match writer.write_i64(2) {
        Err(Error::UnexpectedToken(Token::Integer)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn write_key_without_value_fails() {
    let mut buffer = Vec::new();
    let mut writer = Writer::new(&mut buffer);
    writer.map_begin().unwrap();
    writer.write_str("A").unwrap();
    match writer.map_end() {
        Err(Error::UnbalancedContainer(Token::MapEnd)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

//-----------------------------------------------------------------------------
// Reader: scalars
//-----------------------------------------------------------------------------

#[test]
fn read_empty() {
    let mut reader = Reader::new(b"");
    assert_eq!(reader.token(), Token::Eof);
    assert_eq!(reader.next(), false);
}

#[test]
fn read_keywords() {
    let mut reader = Reader::new(b"true");
    assert_eq!(reader.token(), Token::Boolean);
    assert_eq!(reader.get_bool().unwrap(), true);
    assert_eq!(reader.next(), false);

    let reader = Reader::new(b"false");
    assert_eq!(reader.get_bool().unwrap(), false);

    let reader = Reader::new(b"null");
    assert_eq!(reader.token(), Token::Null);
}

#[test]
fn read_misspelled_keyword_is_error() {
    let reader = Reader::new(b"ture");
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_integer_shaped_number() {
    let mut reader = Reader::new(b" 42 ");
    assert_eq!(reader.token(), Token::Integer);
    assert_eq!(reader.get_i64().unwrap(), 42);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Eof);
}

#[test]
fn read_negative_number() {
    let reader = Reader::new(b"-17");
    assert_eq!(reader.get_i64().unwrap(), -17);
}

#[test]
fn read_fraction_classifies_floating() {
    let reader = Reader::new(b"3.25");
    assert_eq!(reader.token(), Token::Floating);
    assert_eq!(reader.get_f64().unwrap(), 3.25);
}

#[test]
fn read_exponent_classifies_floating() {
    let reader = Reader::new(b"1e3");
    assert_eq!(reader.token(), Token::Floating);
    assert_eq!(reader.get_f64().unwrap(), 1000.0);

    let reader = Reader::new(b"1.5E+2");
    assert_eq!(reader.get_f64().unwrap(), 150.0);

    let reader = Reader::new(b"25e-2");
    assert_eq!(reader.get_f64().unwrap(), 0.25);
}

#[test]
fn read_zero_forms() {
    let reader = Reader::new(b"0");
    assert_eq!(reader.get_i64().unwrap(), 0);

    let reader = Reader::new(b"-0");
    assert_eq!(reader.get_i64().unwrap(), 0);

    let reader = Reader::new(b"0.5");
    assert_eq!(reader.get_f64().unwrap(), 0.5);
}

#[test]
fn read_leading_zero_is_error() {
    let reader = Reader::new(b"01");
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_bare_fraction_is_error() {
    let reader = Reader::new(b"1.");
    assert_eq!(reader.token(), Token::Error);

    let reader = Reader::new(b"1e");
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_integer_overflow_is_sticky_error() {
    let mut reader = Reader::new(b"9223372036854775808");
    assert_eq!(reader.token(), Token::Error);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_integer_extremes() {
    let reader = Reader::new(b"9223372036854775807");
    assert_eq!(reader.get_i64().unwrap(), i64::max_value());

    let reader = Reader::new(b"-9223372036854775808");
    assert_eq!(reader.get_i64().unwrap(), i64::min_value());
}

//-----------------------------------------------------------------------------
// Reader: strings
//-----------------------------------------------------------------------------

#[test]
fn read_string_plain() {
    let mut reader = Reader::new(b"\"alpha\"");
    assert_eq!(reader.token(), Token::String);
    assert_eq!(reader.get_string().unwrap(), "alpha");
    assert_eq!(reader.next(), false);
}

#[test]
fn read_string_escapes() {
    let reader = Reader::new(b"\"a\\n\\t\\\"b\\\\c\\/\"");
    assert_eq!(reader.get_string().unwrap(), "a\n\t\"b\\c/");
}

#[test]
fn read_string_unicode_escape() {
    let reader = Reader::new(b"\"\\u0041\\u00e9\"");
    assert_eq!(reader.get_string().unwrap(), "Aé");
}

#[test]
fn read_string_surrogate_pair() {
    let reader = Reader::new(b"\"\\uD83D\\uDE00\"");
    assert_eq!(reader.get_string().unwrap(), "\u{1F600}");
}

#[test]
fn read_string_lone_surrogate_is_error() {
    let reader = Reader::new(b"\"\\uD83D\"");
    assert_eq!(reader.token(), Token::Error);

    let reader = Reader::new(b"\"\\uDE00\"");
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_string_raw_control_is_error() {
    let reader = Reader::new(b"\"a\nb\"");
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_string_invalid_utf8_is_error() {
    let reader = Reader::new(&[b'"', 0xFF, b'"']);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_string_unterminated_is_error() {
    let reader = Reader::new(b"\"alpha");
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_string_multibyte_passthrough() {
    let mut reader = Reader::new("\"héllo\"".as_bytes());
    assert_eq!(reader.get_string().unwrap(), "héllo");
    assert_eq!(reader.next(), false);
}

//-----------------------------------------------------------------------------
// Reader: structure
//-----------------------------------------------------------------------------

#[test]
fn read_array() {
    let mut reader = Reader::new(b"[1, 2]");
    assert_eq!(reader.token(), Token::ArrayBegin);
    assert_eq!(reader.size(), 0);
    assert_eq!(reader.next(), true);
    assert_eq!(reader.get_i64().unwrap(), 1);
    assert_eq!(reader.size(), 1);
    assert_eq!(reader.next(), true);
    assert_eq!(reader.get_i64().unwrap(), 2);
    assert_eq!(reader.next(), true);
    assert_eq!(reader.token(), Token::ArrayEnd);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Eof);
}

#[test]
fn read_object() {
    let mut reader = Reader::new(b"{ \"a\" : 1 , \"b\" : null }");
    assert_eq!(reader.token(), Token::MapBegin);
    assert_eq!(reader.next(), true);
    assert_eq!(reader.get_string().unwrap(), "a");
    assert_eq!(reader.next(), true);
    assert_eq!(reader.get_i64().unwrap(), 1);
    assert_eq!(reader.next(), true);
    assert_eq!(reader.get_string().unwrap(), "b");
    assert_eq!(reader.next(), true);
    assert_eq!(reader.token(), Token::Null);
    assert_eq!(reader.next(), true);
    assert_eq!(reader.token(), Token::MapEnd);
    assert_eq!(reader.next(), false);
}

#[test]
fn read_nested_structure() {
    let mut reader = Reader::new(b"{\"a\":[true,{\"b\":0}]}");
    let expected = [
        Token::MapBegin,
        Token::String,
        Token::ArrayBegin,
        Token::Boolean,
        Token::MapBegin,
        Token::String,
        Token::Integer,
        Token::MapEnd,
        Token::ArrayEnd,
        Token::MapEnd,
    ];
    for (index, &token) in expected.iter().enumerate() {
        assert_eq!(reader.token(), token, "token {}", index);
        reader.next();
    }
    assert_eq!(reader.token(), Token::Eof);
}

#[test]
fn read_missing_comma_is_error() {
    let mut reader = Reader::new(b"[1 2]");
    assert_eq!(reader.token(), Token::ArrayBegin);
    reader.next();
    assert_eq!(reader.token(), Token::Integer);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_trailing_comma_is_error() {
    let mut reader = Reader::new(b"[1,]");
    reader.next();
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_missing_colon_is_error() {
    let mut reader = Reader::new(b"{\"a\" 1}");
    reader.next();
    assert_eq!(reader.token(), Token::String);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_nonstring_key_is_error() {
    let mut reader = Reader::new(b"{1:2}");
    assert_eq!(reader.token(), Token::MapBegin);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_missing_value_is_error() {
    let mut reader = Reader::new(b"{\"a\":}");
    reader.next();
    reader.next();
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_stray_close_is_error() {
    let reader = Reader::new(b"]");
    assert_eq!(reader.token(), Token::Error);

    let mut reader = Reader::new(b"[}");
    assert_eq!(reader.token(), Token::ArrayBegin);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Error);
}

#[test]
fn read_truncated_document_reports_eof() {
    let mut reader = Reader::new(b"[1,");
    reader.next();
    assert_eq!(reader.get_i64().unwrap(), 1);
    assert_eq!(reader.next(), false);
    assert_eq!(reader.token(), Token::Eof);
}

#[test]
fn expect_matches_and_advances() {
    let mut reader = Reader::new(b"[true]");
    reader.expect(Token::ArrayBegin).unwrap();
    assert_eq!(reader.get_bool().unwrap(), true);
    reader.expect(Token::Boolean).unwrap();
    match reader.expect(Token::MapEnd) {
        Err(Error::UnexpectedToken(Token::ArrayEnd)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    reader.expect(Token::ArrayEnd).unwrap();
    assert_eq!(reader.token(), Token::Eof);
}
