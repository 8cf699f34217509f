use test_log::test;
use ubjson_pack::ubjson::{decode_any, UbjsonDecoder, UbjsonError, DEFAULT_MAX_CONTAINER_LEN};
use ubjson_pack::{DecodeOptions, Value};

fn int(bytes: &[u8]) -> i64 {
    match decode_any(bytes) {
        Ok(Value::Integer(i)) => i,
        other => panic!("{bytes:?}: expected integer, got {other:?}"),
    }
}

fn real(bytes: &[u8]) -> f64 {
    match decode_any(bytes) {
        Ok(Value::Real(f)) => f,
        other => panic!("{bytes:?}: expected real, got {other:?}"),
    }
}

fn string(bytes: &[u8]) -> Vec<u8> {
    match decode_any(bytes) {
        Ok(Value::String(s)) => s,
        other => panic!("{bytes:?}: expected string, got {other:?}"),
    }
}

fn array(bytes: &[u8]) -> Vec<Value> {
    match decode_any(bytes) {
        Ok(Value::Array(arr)) => arr,
        other => panic!("{bytes:?}: expected array, got {other:?}"),
    }
}

fn object(bytes: &[u8]) -> Value {
    let value = decode_any(bytes).unwrap_or_else(|e| panic!("{bytes:?}: {e}"));
    assert!(value.as_object().is_some(), "{bytes:?}: expected object, got {value:?}");
    value
}

#[test]
fn literal_matrix() {
    assert_eq!(decode_any(b"Z").unwrap(), Value::Null);
    assert_eq!(decode_any(b"NZ").unwrap(), Value::Null);
    assert_eq!(decode_any(b"T").unwrap(), Value::Bool(true));
    assert_eq!(decode_any(b"NT").unwrap(), Value::Bool(true));
    assert_eq!(decode_any(b"F").unwrap(), Value::Bool(false));
}

#[test]
fn integer_width_matrix() {
    assert_eq!(int(b"i\0"), 0);
    assert_eq!(int(b"i\xff"), -1);
    assert_eq!(int(b"i\x7f"), 127);
    assert_eq!(int(b"i\x80"), -128);

    assert_eq!(int(b"U\0"), 0);
    assert_eq!(int(b"U\xff"), 255);
    assert_eq!(int(b"U\x7f"), 127);
    assert_eq!(int(b"U\x80"), 128);

    assert_eq!(int(b"I\0\0"), 0);
    assert_eq!(int(b"I\xff\xff"), -1);
    assert_eq!(int(b"I\0\x7f"), 127);
    assert_eq!(int(b"I\x80\0"), -32768);
    assert_eq!(int(b"I\x7f\xff"), 32767);
    assert_eq!(int(b"I\x12\x34"), 0x1234);

    assert_eq!(int(b"l\0\0\0\0"), 0);
    assert_eq!(int(b"l\xff\xff\xff\xff"), -1);
    assert_eq!(int(b"l\0\0\0\x7f"), 127);
    assert_eq!(int(b"l\x80\0\0\0"), -2147483648);
    assert_eq!(int(b"l\x7f\xff\xff\xff"), 2147483647);
    assert_eq!(int(b"l\x12\x34\x56\x78"), 0x12345678);

    assert_eq!(int(b"L\0\0\0\0\0\0\0\0"), 0);
    assert_eq!(int(b"L\xff\xff\xff\xff\xff\xff\xff\xff"), -1);
    assert_eq!(int(b"L\0\0\0\0\0\0\0\x7f"), 127);
    assert_eq!(int(b"L\x80\0\0\0\0\0\0\0"), i64::MIN);
    assert_eq!(int(b"L\x7f\xff\xff\xff\xff\xff\xff\xff"), i64::MAX);
    assert_eq!(int(b"L\x12\x34\x56\x78\x9a\xbc\xde\xf0"), 0x123456789abcdef0);
}

#[test]
fn float_matrix() {
    assert_eq!(real(b"d\x3f\x80\0\0"), 1.0);
    assert_eq!(real(b"d\x37\x80\0\0"), 1.0 / 65536.0);
    assert_eq!((real(b"d\x3d\xfc\xd6\xea") * 16777216.0).round(), 2071261.0);
    assert_eq!(real(b"d\x49\x96\xb4\x38"), 1234567.0);
    assert_eq!(real(b"d\x7f\0\0\0").log2().round(), 127.0);

    assert_eq!(real(b"D\x3f\xf0\0\0\0\0\0\0"), 1.0);
    assert_eq!((real(b"D\x3e\xef\xff\xff\xfd\xcd\x0c\xd0") * 4294967296.0).round(), 65536.0);
    assert_eq!((real(b"D\x3f\xbf\x9a\xdd\x37\x39\x63\x5f") * 16777216.0).round(), 2071261.0);
    assert_eq!(real(b"D\x41\x32\xd6\x87\0\0\0\0"), 1234567.0);
    assert_eq!(real(b"D\x47\xe0\0\0\0\0\0\0").log2() as i32, 127);
    assert_eq!(real(b"D\x7f\xef\xff\xff\xff\xff\xff\xff").log2().round(), 1024.0);
}

#[test]
fn zero_floats_decode_exactly() {
    assert_eq!(real(b"d\0\0\0\0"), 0.0);
    assert!(real(b"D\x80\0\0\0\0\0\0\0").is_sign_negative());
}

#[test]
fn high_precision_matrix() {
    assert_eq!(int(b"Hi\x0a2147483647"), 2147483647);
    assert_eq!(int(b"HU\x0a2147483647"), 2147483647);
    assert_eq!(int(b"HI\0\x0a2147483647"), 2147483647);
    assert_eq!(int(b"Hl\0\0\0\x0a2147483647"), 2147483647);
    assert_eq!(int(b"HL\0\0\0\0\0\0\0\x0a2147483647"), 2147483647);
    assert_eq!(int(b"HHi\x02102147483647"), 2147483647);
    assert_eq!(int(b"HHHi\x012102147483647"), 2147483647);
    assert_eq!(int(b"Hi\x02-5"), -5);
    assert_eq!(real(b"Hi\x031.5"), 1.5);
}

#[test]
fn high_precision_rejects_non_numbers() {
    let err = decode_any(b"Hi\x03\"x\"").unwrap_err();
    assert!(matches!(err, UbjsonError::InvalidHighPrecisionPayload(_)));
    let err = decode_any(b"Hi\x03abc").unwrap_err();
    assert!(matches!(err, UbjsonError::InvalidHighPrecisionPayload(_)));
    assert!(err.to_string().starts_with("failed parsing high-precision number"));
}

#[test]
fn char_and_string_matrix() {
    assert_eq!(string(b"C\x41"), b"A");

    assert_eq!(string(b"Si\x0a2147483647"), b"2147483647");
    assert_eq!(string(b"SU\x0a2147483647"), b"2147483647");
    assert_eq!(string(b"SI\0\x0a2147483647"), b"2147483647");
    assert_eq!(string(b"Sl\0\0\0\x0a2147483647"), b"2147483647");
    assert_eq!(string(b"SL\0\0\0\0\0\0\0\x0a2147483647"), b"2147483647");
    assert_eq!(string(b"SHi\x02102147483647"), b"2147483647");
    assert_eq!(string(b"SHHi\x012102147483647"), b"2147483647");
}

#[test]
fn strings_are_not_utf8_validated() {
    assert_eq!(string(b"Si\x03\xff\x00\xfe"), [0xff, 0x00, 0xfe]);
    assert_eq!(string(b"Si\0"), b"");
}

#[test]
fn array_matrix() {
    assert!(array(b"[]").is_empty());
    assert!(array(b"[#i\0").is_empty());
    assert!(array(b"[$N#i\0").is_empty());
    assert!(array(b"[$T#U\0").is_empty());
    assert!(array(b"[$S#i\0").is_empty());

    assert_eq!(array(b"[$T#i\x02"), [Value::Bool(true), Value::Bool(true)]);
    assert_eq!(array(b"[$U#i\x02\x05\xff"), [Value::Integer(5), Value::Integer(255)]);
    assert_eq!(array(b"[i\x05i\x06]"), [Value::Integer(5), Value::Integer(6)]);
    assert_eq!(array(b"[i\x05NF]"), [Value::Integer(5), Value::Bool(false)]);
    assert_eq!(array(b"[#i\x02i\x05i\x06"), [Value::Integer(5), Value::Integer(6)]);
    assert_eq!(array(b"[#i\x03i\x05NF"), [Value::Integer(5), Value::Bool(false)]);
}

#[test]
fn counted_noop_still_uses_a_slot() {
    // count 2, both slots no-ops: nothing left over for trailing-data checks
    assert!(array(b"[#i\x02NN").is_empty());
    let err = decode_any(b"[#i\x02NNZ").unwrap_err();
    assert!(matches!(err, UbjsonError::TrailingData));
}

#[test]
fn nested_containers() {
    let value = decode_any(b"[[i\x01][#i\x01{i\x01aZ}{}]").unwrap();
    let expected = Value::from(serde_json::json!([[1], [{"a": null}], {}]));
    assert_eq!(value, expected);
}

#[test]
fn object_matrix() {
    assert!(object(b"{}").as_object().unwrap().is_empty());
    assert!(object(b"{#i\0").as_object().unwrap().is_empty());
    assert!(object(b"{$N#i\0").as_object().unwrap().is_empty());
    assert!(object(b"{$T#U\0").as_object().unwrap().is_empty());
    assert!(object(b"{$S#i\0").as_object().unwrap().is_empty());

    let obj = object(b"{$T#i\x02i\0i\x04abcd");
    assert_eq!(obj.as_object().unwrap().len(), 2);
    assert_eq!(obj.get(""), Some(&Value::Bool(true)));
    assert_eq!(obj.get("abcd"), Some(&Value::Bool(true)));

    for input in [
        &b"{$U#i\x02i\x02ab\x05i\x01a\xff"[..],
        &b"{#i\x02i\x02abi\x05i\x01aU\xff"[..],
        &b"{i\x02abU\x05i\x01aU\xff}"[..],
    ] {
        let obj = object(input);
        assert_eq!(obj.as_object().unwrap().len(), 2, "{input:?}");
        assert_eq!(obj.get("ab"), Some(&Value::Integer(5)), "{input:?}");
        assert_eq!(obj.get("a"), Some(&Value::Integer(255)), "{input:?}");
    }
}

#[test]
fn object_noop_drops_its_key() {
    let obj = object(b"{i\x01aNi\x01bT}");
    assert_eq!(obj.get("a"), None);
    assert_eq!(obj.get("b"), Some(&Value::Bool(true)));

    let obj = object(b"{#i\x02i\x01aNi\x01bT");
    assert_eq!(obj.as_object().unwrap().len(), 1);
}

#[test]
fn typed_noop_object_still_reads_keys() {
    let obj = object(b"{$N#i\x01i\x01a");
    assert!(obj.as_object().unwrap().is_empty());
    let err = decode_any(b"{$N#i\x01i\x01aZ").unwrap_err();
    assert!(matches!(err, UbjsonError::TrailingData));
    let err = decode_any(b"{$N#i\x01i\x01").unwrap_err();
    assert!(matches!(err, UbjsonError::PrematureEndOfInput));
}

#[test]
fn object_duplicate_key_keeps_last_value() {
    let obj = object(b"{i\x01ai\x01i\x01bi\x02i\x01ai\x03}");
    let map = obj.as_object().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(obj.get("a"), Some(&Value::Integer(3)));
    let keys: Vec<&[u8]> = map.keys().map(Vec::as_slice).collect();
    assert_eq!(keys, [&b"a"[..], &b"b"[..]]);
}

#[test]
fn size_fields_accept_any_integer_marker() {
    assert_eq!(array(b"[#U\x01T"), [Value::Bool(true)]);
    assert_eq!(array(b"[#I\0\x01T"), [Value::Bool(true)]);
    assert_eq!(array(b"[#Hi\x011T"), [Value::Bool(true)]);
    assert_eq!(array(b"[#Ni\x01T"), [Value::Bool(true)]);
}

#[test]
fn invalid_sizes() {
    assert!(matches!(decode_any(b"[#i\xff"), Err(UbjsonError::InvalidSizeValue(_))));
    assert!(matches!(decode_any(b"Si\xffab"), Err(UbjsonError::InvalidSizeValue(_))));
    assert!(matches!(decode_any(b"[#T"), Err(UbjsonError::InvalidSizeValue(_))));
    assert!(matches!(decode_any(b"SHi\x031.5abc"), Err(UbjsonError::InvalidSizeValue(_))));
    assert!(matches!(decode_any(b"{#i\x01SU\x01aT"), Err(UbjsonError::InvalidSizeValue(_))));
}

#[test]
fn malformed_framing() {
    assert!(matches!(decode_any(b"[$T"), Err(UbjsonError::MalformedContainerFraming)));
    assert!(matches!(decode_any(b"[$Ti\x02"), Err(UbjsonError::MalformedContainerFraming)));
    assert!(matches!(decode_any(b"{$T]"), Err(UbjsonError::MalformedContainerFraming)));
    assert!(matches!(decode_any(b"[$"), Err(UbjsonError::PrematureEndOfInput)));
}

#[test]
fn premature_end_of_input() {
    for input in [
        &b""[..],
        b"i",
        b"I\0",
        b"l\0\0\0",
        b"L\0\0\0\0\0\0\0",
        b"d\0\0",
        b"D\0\0\0\0\0\0\0",
        b"Si\x0aabc",
        b"Hi\x05123",
        b"[i\x05",
        b"[#i\x03TT",
        b"{i\x01a",
        b"{i\x05ab",
        b"[",
    ] {
        let err = decode_any(input).unwrap_err();
        assert!(matches!(err, UbjsonError::PrematureEndOfInput), "{input:?}: {err}");
    }
}

#[test]
fn unrecognized_markers() {
    for input in [&b"x"[..], b"[i\x01x]", b"{i\x01a?}", b"[$x#i\x01"] {
        let err = decode_any(input).unwrap_err();
        assert!(matches!(err, UbjsonError::UnrecognizedMarker { .. }), "{input:?}: {err}");
    }
}

#[test]
fn top_level_rules() {
    let strict = UbjsonDecoder::new();
    assert!(matches!(strict.decode(b"Z"), Err(UbjsonError::TopLevelTypeRejected)));
    assert!(matches!(strict.decode(b"N[]"), Err(UbjsonError::TopLevelTypeRejected)));
    assert!(matches!(strict.decode(b""), Err(UbjsonError::PrematureEndOfInput)));
    assert_eq!(strict.decode(b"[]").unwrap(), Value::array());
    assert_eq!(strict.decode(b"{}").unwrap(), Value::object());
}

#[test]
fn trailing_data() {
    assert!(matches!(decode_any(b"ZZ"), Err(UbjsonError::TrailingData)));
    assert!(matches!(decode_any(b"[]]"), Err(UbjsonError::TrailingData)));

    let lenient = UbjsonDecoder::with_options(DecodeOptions::any().with_ignore_trailing_data(true));
    assert_eq!(lenient.decode(b"ZZ").unwrap(), Value::Null);
    assert_eq!(lenient.decode(b"[#i\x01T garbage").unwrap(), Value::from(vec![Value::Bool(true)]));
}

#[test]
fn nesting_depth_limit() {
    let decoder = UbjsonDecoder::with_options(DecodeOptions::default().with_max_depth(3));
    assert!(decoder.decode(b"[[[]]]").is_ok());
    let err = decoder.decode(b"[[[[]]]]").unwrap_err();
    assert!(matches!(err, UbjsonError::DepthLimitExceeded(3)));

    let deep: Vec<u8> = std::iter::repeat(b'[').take(100_000).collect();
    let err = UbjsonDecoder::new().decode(&deep).unwrap_err();
    assert!(matches!(err, UbjsonError::DepthLimitExceeded(_)));
}

#[test]
fn zero_payload_typed_array_count_is_limited() {
    for input in [&b"[$Z#l\x7f\xff\xff\xff"[..], b"{$F#l\x7f\xff\xff\xff"] {
        let err = decode_any(input).unwrap_err();
        assert!(
            matches!(err, UbjsonError::ContainerLengthExceeded(DEFAULT_MAX_CONTAINER_LEN)),
            "{input:?}: {err}"
        );
    }

    let decoder = UbjsonDecoder::with_options(DecodeOptions::any().with_max_container_len(3));
    assert_eq!(decoder.decode(b"[$Z#i\x03").unwrap(), Value::from(vec![Value::Null; 3]));
    let err = decoder.decode(b"[$Z#i\x04").unwrap_err();
    assert!(matches!(err, UbjsonError::ContainerLengthExceeded(3)));
    assert!(err.to_string().contains("3 entries"));
}
