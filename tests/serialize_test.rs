mod common;

use common::*;
use protowire::{decode, encode, encoded_len, Message, ScalarValue, Value};

fn assert_encodes_to(message: &Message, expected: &[u8]) {
    let bytes = encode(message).unwrap();
    assert_eq!(&bytes[..], expected);
    assert_eq!(encoded_len(message), expected.len());
}

#[test]
fn test_write_reference_scenario() {
    let mut simple = Message::new(&SIMPLE);
    simple.set(8, true).unwrap();
    simple.set(9, "foo").unwrap();
    simple.set(5, ScalarValue::Int32(-123456789)).unwrap();
    simple.set(17, ScalarValue::Sint32(-123456789)).unwrap();

    assert_encodes_to(&simple, &SCENARIO_BYTES);
}

#[test]
fn test_read_reference_scenario() {
    let simple = decode(&SIMPLE, &SCENARIO_BYTES[..]).unwrap();

    assert_eq!(simple.get(8).and_then(Value::as_bool), Some(true));
    assert_eq!(simple.get(9).and_then(Value::as_str), Some("foo"));
    assert_eq!(
        simple.get(5).and_then(Value::as_scalar),
        Some(&ScalarValue::Int32(-123456789))
    );
    assert_eq!(
        simple.get(17).and_then(Value::as_scalar),
        Some(&ScalarValue::Sint32(-123456789))
    );
    assert!(!simple.has(1));
    assert!(simple.unknown_fields().is_none());
}

#[test]
fn test_write_simple_message() {
    // assignment order differs from declaration order
    assert_encodes_to(&full_simple(), &SIMPLE_BYTES);
}

#[test]
fn test_read_simple_message() {
    let simple = decode(&SIMPLE, &SIMPLE_BYTES[..]).unwrap();

    assert_eq!(simple, full_simple());
    assert_eq!(simple.get(9).and_then(Value::as_str), Some("foo"));
    assert_eq!(simple.get(5).and_then(Value::as_i32), Some(-123456789));
    assert_eq!(simple.get(2).and_then(Value::as_f32), Some(12345.123));
    assert_eq!(simple.get(1).and_then(Value::as_f64), Some(123456789.12345));
    assert_eq!(
        simple.get(12).and_then(Value::as_bytes).map(|b| &b[..]),
        Some(&b"bar"[..])
    );
    assert_eq!(
        simple.get(18).and_then(Value::as_i64),
        Some(-123456789123456789)
    );
}

#[test]
fn test_write_repeated_string() {
    let mut repeated = Message::new(&REPEATED);
    repeated.push(1, "one").unwrap();
    repeated.push(1, "two").unwrap();
    repeated.push(1, "three").unwrap();

    let mut expected = vec![0x0A, 0x03];
    expected.extend_from_slice(b"one");
    expected.extend_from_slice(&[0x0A, 0x03]);
    expected.extend_from_slice(b"two");
    expected.extend_from_slice(&[0x0A, 0x05]);
    expected.extend_from_slice(b"three");
    assert_encodes_to(&repeated, &expected);

    let decoded = decode(&REPEATED, expected).unwrap();
    let strings: Vec<&str> = decoded
        .get_repeated(1)
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(strings, vec!["one", "two", "three"]);
}

#[test]
fn test_write_repeated_int32() {
    let mut repeated = Message::new(&REPEATED);
    for i in 1..=3 {
        repeated.push(2, ScalarValue::Int32(i)).unwrap();
    }
    assert_encodes_to(&repeated, &[0x10, 0x01, 0x10, 0x02, 0x10, 0x03]);
}

#[test]
fn test_write_repeated_packed() {
    let mut repeated = Message::new(&REPEATED);
    for i in 1..=3 {
        repeated.push(4, ScalarValue::Int32(i)).unwrap();
    }
    assert_encodes_to(&repeated, &[0x22, 0x03, 0x01, 0x02, 0x03]);
}

#[test]
fn test_write_repeated_nested() {
    let mut repeated = Message::new(&REPEATED);
    for i in 1..=3 {
        repeated.push(3, nested(i)).unwrap();
    }
    let expected = [
        0x1A, 0x02, 0x08, 0x01, 0x1A, 0x02, 0x08, 0x02, 0x1A, 0x02, 0x08, 0x03,
    ];
    assert_encodes_to(&repeated, &expected);

    let decoded = decode(&REPEATED, expected.to_vec()).unwrap();
    let ids: Vec<i32> = decoded
        .get_repeated(3)
        .iter()
        .filter_map(Value::as_message)
        .filter_map(|nested| nested.get(1).and_then(Value::as_i32))
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_complex_message_roundtrip() {
    let book = address_book();
    let bytes = encode(&book).unwrap();
    assert_eq!(bytes.len(), 127);
    assert_eq!(encoded_len(&book), 127);

    let decoded = decode(&ADDRESS_BOOK, bytes).unwrap();
    assert_eq!(decoded, book);

    let persons = decoded.get_repeated(1);
    assert_eq!(persons.len(), 2);
    let john = persons[0].as_message().unwrap();
    let ivan = persons[1].as_message().unwrap();
    assert_eq!(john.get(2).and_then(Value::as_i32), Some(2051));
    assert_eq!(john.get(1).and_then(Value::as_str), Some("John Doe"));
    assert_eq!(ivan.get(1).and_then(Value::as_str), Some("Iván Montes"));
    assert_eq!(john.get_repeated(4).len(), 2);
    assert_eq!(ivan.get_repeated(4).len(), 1);

    let mobile = john.get_repeated(4)[1].as_message().unwrap();
    assert_eq!(mobile.get(1).and_then(Value::as_str), Some("55512321312"));
    assert_eq!(
        mobile.get(2).and_then(Value::as_scalar),
        Some(&ScalarValue::Enum(phone_type::MOBILE))
    );
    let work = ivan.get_repeated(4)[0].as_message().unwrap();
    assert_eq!(
        work.get(2).and_then(Value::as_i32),
        Some(phone_type::WORK)
    );
}

#[test]
fn test_write_tree_message() {
    assert_encodes_to(&tree(), &TREE_BYTES);
}

#[test]
fn test_read_tree_message() {
    let root = decode(&NODE, &TREE_BYTES[..]).unwrap();
    assert_eq!(root.get(1).and_then(Value::as_str), Some("/Users"));

    let children = root.get_repeated(2);
    assert_eq!(children.len(), 2);
    let paths: Vec<&str> = children
        .iter()
        .filter_map(Value::as_message)
        .filter_map(|child| child.get(1).and_then(Value::as_str))
        .collect();
    assert_eq!(paths, vec!["/Users/fabio", "/Users/admin"]);

    for child in children.iter().filter_map(Value::as_message) {
        let parent = child.get_message(3).unwrap();
        assert_eq!(parent.get(1).and_then(Value::as_str), Some("/Users"));
        assert!(parent.get_repeated(2).is_empty());
    }
}

#[test]
fn test_empty_message_encodes_to_nothing() {
    let simple = Message::new(&SIMPLE);
    assert!(encode(&simple).unwrap().is_empty());
    assert_eq!(decode(&SIMPLE, Vec::<u8>::new()).unwrap(), simple);
}
