//! Merging several sources into one target, with tuple order deciding who
//! wins shared attributes. One of the sources is a runtime `Record`.
//!
//! Run with: cargo run --example profile_merge

use attrmap::{
    source, target, AttrMap, AttrSource, AttrTarget, MapError, Mapper, MappingSpec, Record,
    RecordSchema, Signature,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

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
struct Profile {
    name: String,
    email: String,
    age: u32,
    city: String,
}

impl AttrTarget for Profile {
    fn required() -> &'static [&'static str] {
        &["name", "email"]
    }

    fn construct(attrs: AttrMap) -> Result<Self, MapError> {
        target::from_attrs(attrs)
    }

    fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> {
        target::assign_attrs(self, attrs)
    }
}

fn main() -> Result<(), MapError> {
    let mut mapper = Mapper::new();
    mapper.add_mapping::<Profile>(
        Signature::of::<User>().and::<Record>(),
        MappingSpec::new(),
    )?;

    let user = User {
        name: "Johnny".to_string(),
        email: "johnny@mail.com".to_string(),
    };

    // A record declares its shape up front; unset defaulted fields still
    // contribute values.
    let schema = Arc::new(
        RecordSchema::new("signup_form")
            .field("name")
            .field("age")
            .field_with_default("city", "NY"),
    );
    let form = Record::new(schema).with("name", "Jodin").with("age", 30);

    let profile: Profile = mapper.map((&user, &form))?;

    // name and email come from User (earlier in the tuple), age and city
    // only exist on the record.
    println!("merged profile: {profile:?}");
    Ok(())
}
