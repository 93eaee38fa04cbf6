//! Mapping a domain object to a transfer object with a transform, a rename,
//! and caller-supplied extras.
//!
//! Run with: cargo run --example user_dto

use attrmap::{
    source, target, AttrMap, AttrSource, AttrTarget, AttrValue, MapError, MapOptions, Mapper,
    MappingSpec, Signature,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct User {
    name: String,
    email: String,
}

impl AttrSource for User {
    fn read(&self) -> Result<AttrMap, MapError> {
        source::to_attrs(self)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDto {
    name: String,
    email_address: String,
    age: u32,
}

impl AttrTarget for UserDto {
    fn required() -> &'static [&'static str] {
        &["name", "email_address"]
    }

    fn construct(attrs: AttrMap) -> Result<Self, MapError> {
        target::from_attrs(attrs)
    }

    fn construct_bare(attrs: AttrMap) -> Result<Self, MapError> {
        target::bare_from_attrs(attrs)
    }

    fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> {
        target::assign_attrs(self, attrs)
    }
}

fn reverse(value: AttrValue) -> AttrValue {
    match value {
        AttrValue::String(s) => s.chars().rev().collect::<String>().into(),
        other => other,
    }
}

fn main() -> Result<(), MapError> {
    let mut mapper = Mapper::new();
    mapper.add_mapping::<UserDto>(
        Signature::of::<User>(),
        MappingSpec::new()
            .transform("name", reverse)
            .rename("email", "email_address"),
    )?;

    let user = User {
        name: "Johnny".to_string(),
        email: "johnny@mail.com".to_string(),
    };

    let dto: UserDto = mapper.map_with(&user, MapOptions::new().extra("age", 35))?;
    println!("mapped: {dto:?}");

    // Mapping onto an existing instance preserves what the sources omit.
    let mut existing = UserDto {
        name: "placeholder".to_string(),
        email_address: String::new(),
        age: 99,
    };
    mapper.map_into(&user, &mut existing)?;
    println!("updated in place: {existing:?}");

    Ok(())
}
