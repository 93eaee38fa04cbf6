//! # attrmap
//!
//! A declarative object-to-object attribute mapper.
//!
//! `attrmap` copies, renames, transforms, and supplements attribute values
//! from one or more source objects into a target, according to a mapping
//! configuration registered ahead of time. It is aimed at converting
//! between layered representations (domain objects, transfer objects,
//! persistence records) without writing repetitive copy code.
//!
//! ## Key Features
//!
//! - **Declarative rules**: per-attribute copy, rename, transform, and
//!   rename-with-transform instructions, plus exclusions
//! - **Source precedence**: map from an ordered tuple of sources; earlier
//!   sources win attribute conflicts
//! - **Extras**: caller-supplied values overlaid last, overriding anything
//!   derived from sources
//! - **Validation**: required target attributes are checked after full
//!   resolution, with errors naming every missing attribute
//! - **No ambient state**: each [`Mapper`] owns its own registry, so
//!   independent mapping setups never contaminate each other
//!
//! ## Usage Examples
//!
//! ### Basic Mapping
//!
//! Source types implement [`AttrSource`]; for anything that derives
//! `serde::Serialize` that is a one-liner through [`source::to_attrs`].
//! Target types implement [`AttrTarget`], usually through the serde-backed
//! helpers in [`target`].
//!
//! ```rust
//! use attrmap::{source, target, AttrMap, AttrSource, AttrTarget};
//! use attrmap::{MapError, Mapper, MappingSpec, Signature};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! impl AttrSource for User {
//!     fn read(&self) -> Result<AttrMap, MapError> {
//!         source::to_attrs(self)
//!     }
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct UserDto {
//!     name: String,
//!     email: String,
//! }
//!
//! impl AttrTarget for UserDto {
//!     fn required() -> &'static [&'static str] {
//!         &["name", "email"]
//!     }
//!
//!     fn construct(attrs: AttrMap) -> Result<Self, MapError> {
//!         target::from_attrs(attrs)
//!     }
//!
//!     fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> {
//!         target::assign_attrs(self, attrs)
//!     }
//! }
//!
//! fn main() -> Result<(), MapError> {
//!     let mut mapper = Mapper::new();
//!     mapper.add_mapping::<UserDto>(Signature::of::<User>(), MappingSpec::new())?;
//!
//!     let user = User {
//!         name: "Johnny".to_string(),
//!         email: "johnny@mail.com".to_string(),
//!     };
//!     let dto: UserDto = mapper.map(&user)?;
//!
//!     assert_eq!(dto.name, "Johnny");
//!     assert_eq!(dto.email, "johnny@mail.com");
//!     Ok(())
//! }
//! ```
//!
//! ### Transforms and Extras
//!
//! Rules are keyed by source attribute name; extras are applied last and
//! always win.
//!
//! ```rust
//! # use attrmap::{source, target, AttrMap, AttrSource, AttrTarget};
//! # use attrmap::{MapError, Mapper, MappingSpec, Signature};
//! # use serde::{Deserialize, Serialize};
//! # #[derive(Serialize)]
//! # struct User { name: String, email: String }
//! # impl AttrSource for User {
//! #     fn read(&self) -> Result<AttrMap, MapError> { source::to_attrs(self) }
//! # }
//! # #[derive(Debug, Default, Serialize, Deserialize)]
//! # struct Person { name: String, email: String, age: u32 }
//! # impl AttrTarget for Person {
//! #     fn construct(attrs: AttrMap) -> Result<Self, MapError> { target::from_attrs(attrs) }
//! #     fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> { target::assign_attrs(self, attrs) }
//! # }
//! use attrmap::{AttrValue, MapOptions};
//!
//! fn reverse(value: AttrValue) -> AttrValue {
//!     match value {
//!         AttrValue::String(s) => s.chars().rev().collect::<String>().into(),
//!         other => other,
//!     }
//! }
//!
//! fn main() -> Result<(), MapError> {
//!     let mut mapper = Mapper::new();
//!     mapper.add_mapping::<Person>(
//!         Signature::of::<User>(),
//!         MappingSpec::new().transform("name", reverse),
//!     )?;
//!
//!     let user = User {
//!         name: "Johnny".to_string(),
//!         email: "johnny@mail.com".to_string(),
//!     };
//!     let person: Person =
//!         mapper.map_with(&user, MapOptions::new().extra("age", 35))?;
//!
//!     assert_eq!(person.name, "ynnhoJ");
//!     assert_eq!(person.email, "johnny@mail.com");
//!     assert_eq!(person.age, 35);
//!     Ok(())
//! }
//! ```
//!
//! ### Multiple Sources and Precedence
//!
//! Pass a tuple of references; the tuple order is the registered signature
//! order, and earlier sources win conflicts. An attribute carried only by a
//! later source still resolves from that source.
//!
//! ```rust
//! # use attrmap::{source, target, AttrMap, AttrSource, AttrTarget};
//! # use attrmap::{MapError, Mapper, MappingSpec, Signature};
//! # use serde::{Deserialize, Serialize};
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//! # impl AttrSource for User {
//! #     fn read(&self) -> Result<AttrMap, MapError> { source::to_attrs(self) }
//! # }
//!
//! #[derive(Serialize)]
//! struct Account {
//!     name: String,
//!     email: String,
//!     age: u32,
//! }
//! # impl AttrSource for Account {
//! #     fn read(&self) -> Result<AttrMap, MapError> { source::to_attrs(self) }
//! # }
//! # #[derive(Debug, Default, Serialize, Deserialize)]
//! # struct Person { name: String, email: String, age: u32 }
//! # impl AttrTarget for Person {
//! #     fn construct(attrs: AttrMap) -> Result<Self, MapError> { target::from_attrs(attrs) }
//! #     fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> { target::assign_attrs(self, attrs) }
//! # }
//!
//! fn main() -> Result<(), MapError> {
//!     let mut mapper = Mapper::new();
//!     mapper.add_mapping::<Person>(
//!         Signature::of::<User>().and::<Account>(),
//!         MappingSpec::new(),
//!     )?;
//!
//!     let user = User {
//!         name: "Johnny".to_string(),
//!         email: "johnny@mail.com".to_string(),
//!     };
//!     let account = Account {
//!         name: "Jodin".to_string(),
//!         email: "johnyblaw@blawcloud.com".to_string(),
//!         age: 30,
//!     };
//!
//!     let person: Person = mapper.map((&user, &account))?;
//!     assert_eq!(person.name, "Johnny"); // User wins the conflict
//!     assert_eq!(person.email, "johnny@mail.com");
//!     assert_eq!(person.age, 30); // only Account carries age
//!     Ok(())
//! }
//! ```
//!
//! ### Mapping Onto an Existing Instance
//!
//! [`Mapper::map_into`] assigns onto a caller-owned instance, preserving
//! its identity and every attribute the mapping does not touch.
//!
//! ### Error Handling
//!
//! Configuration mistakes surface at [`Mapper::add_mapping`]; a mapping
//! call either returns a fully populated target or fails with an error
//! naming the offending types and attributes, never a partial result.
//!
//! ```rust
//! # use attrmap::{source, AttrMap, AttrSource};
//! # use attrmap::{MapError, Mapper};
//! # use serde::Serialize;
//! # #[derive(Serialize)]
//! # struct User { name: String }
//! # impl AttrSource for User {
//! #     fn read(&self) -> Result<AttrMap, MapError> { source::to_attrs(self) }
//! # }
//! # #[derive(Default, Serialize, serde::Deserialize)]
//! # struct UserDto { name: String }
//! # impl attrmap::AttrTarget for UserDto {
//! #     fn construct(attrs: AttrMap) -> Result<Self, MapError> { attrmap::target::from_attrs(attrs) }
//! #     fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> { attrmap::target::assign_attrs(self, attrs) }
//! # }
//! let mapper = Mapper::new();
//! let user = User { name: "Johnny".to_string() };
//!
//! // Nothing registered yet: the lookup fails, distinctly from validation.
//! match mapper.map::<_, UserDto>(&user) {
//!     Err(MapError::NotConfigured { signature, target }) => {
//!         assert_eq!(signature, "User");
//!         assert_eq!(target, "UserDto");
//!     }
//!     _ => panic!("expected NotConfigured"),
//! }
//! ```

mod error;
mod mapper;
mod record;
mod registry;
mod rule;
pub mod source;
pub mod target;
mod value;

pub use error::MapError;
pub use mapper::{MapOptions, Mapper};
pub use record::{Record, RecordSchema};
pub use registry::{MappingConfig, Registry, Signature};
pub use rule::{MappingSpec, Rule, TransformFn};
pub use source::{AttrSource, SourceSet, SourceView};
pub use target::{AttrTarget, Construction};
pub use value::{AttrMap, AttrValue};

// Re-export the json! macro for building extra attributes conveniently.
pub use serde_json::json;
