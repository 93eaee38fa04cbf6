//! Property checks for the mapping laws: identity, precedence, and
//! extra-overrides.

use attrmap::{
    source, target, AttrMap, AttrSource, AttrTarget, MapError, MapOptions, Mapper, MappingSpec,
    Signature,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
struct Left {
    name: String,
    email: String,
}

impl AttrSource for Left {
    fn read(&self) -> Result<AttrMap, MapError> {
        source::to_attrs(self)
    }
}

#[derive(Debug, Clone, Serialize)]
struct Right {
    name: String,
    email: String,
    age: u32,
}

impl AttrSource for Right {
    fn read(&self) -> Result<AttrMap, MapError> {
        source::to_attrs(self)
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Merged {
    name: String,
    email: String,
    #[serde(default)]
    age: u32,
}

impl AttrTarget for Merged {
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

fn identity_mapper() -> Mapper {
    let mut mapper = Mapper::new();
    mapper
        .add_mapping::<Merged>(Signature::of::<Left>(), MappingSpec::new())
        .unwrap();
    mapper
        .add_mapping::<Merged>(Signature::of::<Left>().and::<Right>(), MappingSpec::new())
        .unwrap();
    mapper
}

proptest! {
    // Identity law: with no rules, every attribute of the output equals the
    // source's attribute of the same name.
    #[test]
    fn identity_mapping_preserves_attributes(
        name in "[a-zA-Z0-9]{0,16}",
        email in "[a-zA-Z0-9@.]{0,16}",
    ) {
        let mapper = identity_mapper();
        let left = Left { name: name.clone(), email: email.clone() };

        let merged: Merged = mapper.map(&left).unwrap();
        prop_assert_eq!(merged.name, name);
        prop_assert_eq!(merged.email, email);
    }

    // Precedence law: for sources (Left, Right) sharing an attribute, the
    // resolved value is always Left's, whatever Right carries.
    #[test]
    fn earlier_source_wins_shared_attributes(
        left_name in "[a-z]{1,8}",
        right_name in "[a-z]{1,8}",
        age in 0u32..150,
    ) {
        let mapper = identity_mapper();
        let left = Left { name: left_name.clone(), email: "a@b".to_string() };
        let right = Right { name: right_name, email: "c@d".to_string(), age };

        let merged: Merged = mapper.map((&left, &right)).unwrap();
        prop_assert_eq!(merged.name, left_name);
        prop_assert_eq!(merged.email, "a@b");
        // Only Right carries age; it resolves from there.
        prop_assert_eq!(merged.age, age);
    }

    // Extra-overrides law: any attribute supplied through extra ends up in
    // the output verbatim, whatever the sources resolve.
    #[test]
    fn extras_always_win(
        source_name in "[a-z]{1,8}",
        extra_name in "[a-z]{1,8}",
    ) {
        let mapper = identity_mapper();
        let left = Left { name: source_name, email: "a@b".to_string() };

        let merged: Merged = mapper
            .map_with(&left, MapOptions::new().extra("name", extra_name.clone()))
            .unwrap();
        prop_assert_eq!(merged.name, extra_name);
    }

    // Determinism: mapping the same source twice through a pure
    // configuration yields equal outputs.
    #[test]
    fn mapping_is_repeatable(
        name in "[a-z]{0,12}",
        email in "[a-z]{0,12}",
    ) {
        let mapper = identity_mapper();
        let left = Left { name, email };

        let first: Merged = mapper.map(&left).unwrap();
        let second: Merged = mapper.map(&left).unwrap();
        prop_assert_eq!(first, second);
    }
}
