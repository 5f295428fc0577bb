#![allow(dead_code)]

use protowire::{
    ExtensionDescriptor, FieldDescriptor, Message, MessageDescriptor, ScalarType, ScalarValue,
};

pub static SIMPLE_FIELDS: [FieldDescriptor; 15] = [
    FieldDescriptor::optional("double", 1, ScalarType::Double),
    FieldDescriptor::optional("float", 2, ScalarType::Float),
    FieldDescriptor::optional("int64", 3, ScalarType::Int64),
    FieldDescriptor::optional("uint64", 4, ScalarType::Uint64),
    FieldDescriptor::optional("int32", 5, ScalarType::Int32),
    FieldDescriptor::optional("fixed64", 6, ScalarType::Fixed64),
    FieldDescriptor::optional("fixed32", 7, ScalarType::Fixed32),
    FieldDescriptor::optional("bool", 8, ScalarType::Bool),
    FieldDescriptor::optional("string", 9, ScalarType::String),
    FieldDescriptor::optional("bytes", 12, ScalarType::Bytes),
    FieldDescriptor::optional("uint32", 13, ScalarType::Uint32),
    FieldDescriptor::optional("sfixed32", 15, ScalarType::Sfixed32),
    FieldDescriptor::optional("sfixed64", 16, ScalarType::Sfixed64),
    FieldDescriptor::optional("sint32", 17, ScalarType::Sint32),
    FieldDescriptor::optional("sint64", 18, ScalarType::Sint64),
];
pub static SIMPLE: MessageDescriptor = MessageDescriptor::new("fixtures.Simple", &SIMPLE_FIELDS);

pub static NESTED_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::optional("id", 1, ScalarType::Int32)];
pub static NESTED: MessageDescriptor =
    MessageDescriptor::new("fixtures.Repeated.Nested", &NESTED_FIELDS);

pub static REPEATED_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::repeated("string", 1, ScalarType::String),
    FieldDescriptor::repeated("int", 2, ScalarType::Int32),
    FieldDescriptor::repeated_message("nested", 3, &NESTED),
    FieldDescriptor::packed("packed", 4, ScalarType::Int32),
];
pub static REPEATED: MessageDescriptor =
    MessageDescriptor::new("fixtures.Repeated", &REPEATED_FIELDS);

pub mod phone_type {
    pub const MOBILE: i32 = 0;
    pub const HOME: i32 = 1;
    pub const WORK: i32 = 2;
}

pub static PHONE_NUMBER_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::optional("number", 1, ScalarType::String),
    FieldDescriptor::optional("type", 2, ScalarType::Enum),
];
pub static PHONE_NUMBER: MessageDescriptor =
    MessageDescriptor::new("tutorial.Person.PhoneNumber", &PHONE_NUMBER_FIELDS);

pub static PERSON_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::optional("name", 1, ScalarType::String),
    FieldDescriptor::optional("id", 2, ScalarType::Int32),
    FieldDescriptor::optional("email", 3, ScalarType::String),
    FieldDescriptor::repeated_message("phone", 4, &PHONE_NUMBER),
];
pub static PERSON: MessageDescriptor = MessageDescriptor::new("tutorial.Person", &PERSON_FIELDS);

pub static ADDRESS_BOOK_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::repeated_message("person", 1, &PERSON)];
pub static ADDRESS_BOOK: MessageDescriptor =
    MessageDescriptor::new("tutorial.AddressBook", &ADDRESS_BOOK_FIELDS);

pub static NODE_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::optional("path", 1, ScalarType::String),
    FieldDescriptor::repeated_message("children", 2, &NODE),
    FieldDescriptor::message("parent", 3, &NODE),
];
pub static NODE: MessageDescriptor = MessageDescriptor::new("fixtures.Tree.Node", &NODE_FIELDS);

pub mod animal_type {
    pub const DOG: i32 = 1;
    pub const CAT: i32 = 2;
}

pub static ANIMAL_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::optional("type", 1, ScalarType::Enum)];
pub static ANIMAL: MessageDescriptor =
    MessageDescriptor::new("fixtures.extension.Animal", &ANIMAL_FIELDS);

pub static CAT_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::optional("declawed", 1, ScalarType::Bool)];
pub static CAT: MessageDescriptor = MessageDescriptor::new("fixtures.extension.Cat", &CAT_FIELDS);

/// `extend Animal { optional Cat animal = 100; }` declared inside `Cat`.
pub static CAT_ANIMAL: ExtensionDescriptor = ExtensionDescriptor::new(
    "fixtures.extension.Cat.animal",
    &ANIMAL,
    FieldDescriptor::message("animal", 100, &CAT),
);

pub static ANIMAL_TAGS: ExtensionDescriptor = ExtensionDescriptor::new(
    "fixtures.extension.tags",
    &ANIMAL,
    FieldDescriptor::packed("tags", 101, ScalarType::Uint32),
);

pub static UNRECOGNIZED: MessageDescriptor = MessageDescriptor::new("fixtures.Unrecognized", &[]);

/// `bool=true, string="foo", int32=-123456789, sint32=-123456789`.
pub static SCENARIO_BYTES: [u8; 24] = [
    0x28, 0xEB, 0xE5, 0x90, 0xC5, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x40, 0x01, 0x4A, 0x03, 0x66,
    0x6F, 0x6F, 0x88, 0x01, 0xA9, 0xB4, 0xDE, 0x75,
];

/// [`full_simple`] as encoded by the reference protobuf runtime.
pub static SIMPLE_BYTES: [u8; 109] = [
    0x09, 0xAD, 0x69, 0x7E, 0x54, 0x34, 0x6F, 0x9D, 0x41, 0x15, 0x7E, 0xE4, 0x40, 0x46, 0x18, 0xEB,
    0xC1, 0xBE, 0x99, 0xC5, 0x96, 0xD9, 0xA4, 0xFE, 0x01, 0x20, 0x95, 0xBE, 0xC1, 0xE6, 0xBA, 0xE9,
    0xA6, 0xDB, 0x01, 0x28, 0xEB, 0xE5, 0x90, 0xC5, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x31, 0x15,
    0x5F, 0xD0, 0xAC, 0x4B, 0x9B, 0xB6, 0x01, 0x3D, 0x15, 0xCD, 0x5B, 0x07, 0x40, 0x01, 0x4A, 0x03,
    0x66, 0x6F, 0x6F, 0x62, 0x03, 0x62, 0x61, 0x72, 0x68, 0x95, 0x9A, 0xEF, 0x3A, 0x7D, 0xEB, 0x32,
    0xA4, 0xF8, 0x81, 0x01, 0xEB, 0xA0, 0x2F, 0x53, 0xB4, 0x64, 0x49, 0xFE, 0x88, 0x01, 0xA9, 0xB4,
    0xDE, 0x75, 0x90, 0x01, 0xA9, 0xFC, 0x82, 0xCD, 0xF5, 0xD2, 0xCD, 0xB6, 0x03,
];

/// [`tree`] encoded.
pub static TREE_BYTES: [u8; 60] = [
    0x0A, 0x06, 0x2F, 0x55, 0x73, 0x65, 0x72, 0x73, 0x12, 0x18, 0x0A, 0x0C, 0x2F, 0x55, 0x73, 0x65,
    0x72, 0x73, 0x2F, 0x66, 0x61, 0x62, 0x69, 0x6F, 0x1A, 0x08, 0x0A, 0x06, 0x2F, 0x55, 0x73, 0x65,
    0x72, 0x73, 0x12, 0x18, 0x0A, 0x0C, 0x2F, 0x55, 0x73, 0x65, 0x72, 0x73, 0x2F, 0x61, 0x64, 0x6D,
    0x69, 0x6E, 0x1A, 0x08, 0x0A, 0x06, 0x2F, 0x55, 0x73, 0x65, 0x72, 0x73,
];

pub static CAT_BYTES: [u8; 7] = [0x08, 0x02, 0xA2, 0x06, 0x02, 0x08, 0x01];

/// A `Simple` with every field set.
pub fn full_simple() -> Message {
    let mut simple = Message::new(&SIMPLE);
    simple.set(8, true).unwrap();
    simple.set(12, &b"bar"[..]).unwrap();
    simple.set(9, "foo").unwrap();
    simple.set(2, 12345.123f32).unwrap();
    simple.set(13, ScalarValue::Uint32(123456789)).unwrap();
    simple.set(5, ScalarValue::Int32(-123456789)).unwrap();
    simple.set(7, ScalarValue::Fixed32(123456789)).unwrap();
    simple.set(17, ScalarValue::Sint32(-123456789)).unwrap();
    simple.set(15, ScalarValue::Sfixed32(-123456789)).unwrap();
    simple.set(1, 123456789.12345f64).unwrap();
    simple.set(3, ScalarValue::Int64(-123456789123456789)).unwrap();
    simple.set(4, ScalarValue::Uint64(123456789123456789)).unwrap();
    simple.set(6, ScalarValue::Fixed64(123456789123456789)).unwrap();
    simple.set(18, ScalarValue::Sint64(-123456789123456789)).unwrap();
    simple.set(16, ScalarValue::Sfixed64(-123456789123456789)).unwrap();
    simple
}

pub fn nested(id: i32) -> Message {
    let mut nested = Message::new(&NESTED);
    nested.set(1, ScalarValue::Int32(id)).unwrap();
    nested
}

pub fn phone(number: &str, kind: i32) -> Message {
    let mut phone = Message::new(&PHONE_NUMBER);
    phone.set(1, number).unwrap();
    phone.set(2, ScalarValue::Enum(kind)).unwrap();
    phone
}

pub fn person(name: &str, id: i32, email: &str, phones: Vec<Message>) -> Message {
    let mut person = Message::new(&PERSON);
    person.set(1, name).unwrap();
    person.set(2, ScalarValue::Int32(id)).unwrap();
    person.set(3, email).unwrap();
    for phone in phones {
        person.push(4, phone).unwrap();
    }
    person
}

pub fn address_book() -> Message {
    let mut book = Message::new(&ADDRESS_BOOK);
    book.push(
        1,
        person(
            "John Doe",
            2051,
            "john.doe@gmail.com",
            vec![
                phone("1231231212", phone_type::HOME),
                phone("55512321312", phone_type::MOBILE),
            ],
        ),
    )
    .unwrap();
    book.push(
        1,
        person(
            "Iván Montes",
            23,
            "drslump@pollinimini.net",
            vec![phone("3493123123", phone_type::WORK)],
        ),
    )
    .unwrap();
    book
}

pub fn node(path: &str) -> Message {
    let mut node = Message::new(&NODE);
    node.set(1, path).unwrap();
    node
}

/// `/Users` with two children whose parent is a copy of the root.
pub fn tree() -> Message {
    let mut root = node("/Users");
    let parent = root.clone();

    let mut fabio = node("/Users/fabio");
    fabio.set(3, parent.clone()).unwrap();
    let mut admin = node("/Users/admin");
    admin.set(3, parent).unwrap();

    root.push(2, fabio).unwrap();
    root.push(2, admin).unwrap();
    root
}

pub fn cat_animal() -> Message {
    let mut cat = Message::new(&CAT);
    cat.set(1, true).unwrap();

    let mut animal = Message::new(&ANIMAL);
    animal.set(1, ScalarValue::Enum(animal_type::CAT)).unwrap();
    animal.set_extension(&CAT_ANIMAL, cat).unwrap();
    animal
}
