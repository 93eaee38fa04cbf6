//! The source side of a mapping: attribute discovery and extraction.
//!
//! The resolution engine never inspects source objects directly. Everything
//! it knows about a source comes through [`AttrSource`], which has three
//! implementation families:
//!
//! 1. **Structured-model objects**: anything that implements
//!    `serde::Serialize`. The [`to_attrs`] bridge serializes the object into
//!    a flat attribute map; because serde emits every declared field,
//!    attributes still holding their defaults are discovered too. Most model
//!    types implement [`AttrSource`] in a single line through the bridge.
//! 2. **Structured records**: the runtime [`Record`](crate::Record) type,
//!    whose schema declares its field set ahead of any values being set.
//! 3. **Plain objects**: hand-written impls that surface whatever public
//!    attributes the instance happens to carry.
//!
//! Whatever an impl returns, the engine filters out attribute names with a
//! leading underscore before they reach resolution, and only ever reads
//! through `&self`.

use std::any::Any;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::MapError;
use crate::registry::Signature;
use crate::value::{kind, AttrMap};

/// An object the mapper can read attributes from.
///
/// `read` must be side-effect free: it reports the attributes the instance
/// currently carries without mutating it. `discover` reports the names the
/// object is *known* to have, which may be a superset of `read`'s keys when
/// the type declares fields that the instance has not set; the default
/// implementation simply reuses `read`.
///
/// # Examples
///
/// A serde-backed model type:
///
/// ```
/// use attrmap::{source, AttrMap, AttrSource, MapError};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     email: String,
/// }
///
/// impl AttrSource for User {
///     fn read(&self) -> Result<AttrMap, MapError> {
///         source::to_attrs(self)
///     }
/// }
/// ```
///
/// A plain object surfacing only what is set:
///
/// ```
/// use attrmap::{AttrMap, AttrSource, MapError};
///
/// struct Cursor {
///     line: u64,
///     column: Option<u64>,
/// }
///
/// impl AttrSource for Cursor {
///     fn read(&self) -> Result<AttrMap, MapError> {
///         let mut attrs = AttrMap::new();
///         attrs.insert("line".into(), self.line.into());
///         if let Some(column) = self.column {
///             attrs.insert("column".into(), column.into());
///         }
///         Ok(attrs)
///     }
/// }
/// ```
pub trait AttrSource: Any {
    /// Reads the attribute values this instance actually carries.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Read`] if the object cannot be represented as a
    /// flat attribute set.
    fn read(&self) -> Result<AttrMap, MapError>;

    /// Reports the attribute names this object is known to have.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Read`] if the object cannot be read.
    fn discover(&self) -> Result<BTreeSet<String>, MapError> {
        Ok(self.read()?.into_keys().collect())
    }
}

/// Serializes a model object into a flat attribute map.
///
/// This is the bridge for the structured-model family: any `Serialize` type
/// whose serialized form is an object can act as an attribute source.
///
/// # Errors
///
/// Returns [`MapError::Read`] if serialization fails or produces something
/// other than an object (for example a newtype over a scalar).
pub fn to_attrs<T: Serialize>(value: &T) -> Result<AttrMap, MapError> {
    let type_name = crate::value::short_name(std::any::type_name::<T>());
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(MapError::Read {
            type_name,
            reason: format!("expected an object-shaped value, got {}", kind(&other)),
        }),
        Err(err) => Err(MapError::Read {
            type_name,
            reason: err.to_string(),
        }),
    }
}

/// One source's contribution to a mapping call: its discoverable attribute
/// names and the values it carries, already filtered of private names.
#[derive(Debug, Clone)]
pub struct SourceView {
    pub names: BTreeSet<String>,
    pub attrs: AttrMap,
}

fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Reads one source into a [`SourceView`], dropping underscore-prefixed names.
pub(crate) fn view_of<T: AttrSource>(source: &T) -> Result<SourceView, MapError> {
    let names = source
        .discover()?
        .into_iter()
        .filter(|name| !is_private(name))
        .collect();
    let attrs = source
        .read()?
        .into_iter()
        .filter(|(name, _)| !is_private(name))
        .collect();
    Ok(SourceView { names, attrs })
}

/// One or more source objects passed to a mapping call.
///
/// Implemented for a single `&T` and for reference tuples up to four
/// elements. Tuple order is precedence order: when several sources carry the
/// same attribute, the leftmost one wins.
pub trait SourceSet {
    /// The ordered runtime type signature of these sources.
    fn signature(&self) -> Signature;

    /// Reads every source, in precedence order.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Read`] if any source fails to read.
    fn views(&self) -> Result<Vec<SourceView>, MapError>;
}

impl<A: AttrSource> SourceSet for &A {
    fn signature(&self) -> Signature {
        Signature::of::<A>()
    }

    fn views(&self) -> Result<Vec<SourceView>, MapError> {
        Ok(vec![view_of(*self)?])
    }
}

impl<'a, A: AttrSource> SourceSet for (&'a A,) {
    fn signature(&self) -> Signature {
        Signature::of::<A>()
    }

    fn views(&self) -> Result<Vec<SourceView>, MapError> {
        Ok(vec![view_of(self.0)?])
    }
}

impl<'a, 'b, A: AttrSource, B: AttrSource> SourceSet for (&'a A, &'b B) {
    fn signature(&self) -> Signature {
        Signature::of::<A>().and::<B>()
    }

    fn views(&self) -> Result<Vec<SourceView>, MapError> {
        Ok(vec![view_of(self.0)?, view_of(self.1)?])
    }
}

impl<'a, 'b, 'c, A: AttrSource, B: AttrSource, C: AttrSource> SourceSet for (&'a A, &'b B, &'c C) {
    fn signature(&self) -> Signature {
        Signature::of::<A>().and::<B>().and::<C>()
    }

    fn views(&self) -> Result<Vec<SourceView>, MapError> {
        Ok(vec![view_of(self.0)?, view_of(self.1)?, view_of(self.2)?])
    }
}

impl<'a, 'b, 'c, 'd, A: AttrSource, B: AttrSource, C: AttrSource, D: AttrSource> SourceSet
    for (&'a A, &'b B, &'c C, &'d D)
{
    fn signature(&self) -> Signature {
        Signature::of::<A>().and::<B>().and::<C>().and::<D>()
    }

    fn views(&self) -> Result<Vec<SourceView>, MapError> {
        Ok(vec![
            view_of(self.0)?,
            view_of(self.1)?,
            view_of(self.2)?,
            view_of(self.3)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Plain {
        name: String,
        _internal: u32,
    }

    impl AttrSource for Plain {
        fn read(&self) -> Result<AttrMap, MapError> {
            to_attrs(self)
        }
    }

    #[derive(Serialize)]
    struct Scalar(u32);

    impl AttrSource for Scalar {
        fn read(&self) -> Result<AttrMap, MapError> {
            to_attrs(self)
        }
    }

    #[test]
    fn private_names_are_never_surfaced() {
        let plain = Plain {
            name: "Johnny".to_string(),
            _internal: 7,
        };

        let view = view_of(&plain).unwrap();
        assert!(view.names.contains("name"));
        assert!(!view.names.contains("_internal"));
        assert!(!view.attrs.contains_key("_internal"));
    }

    #[test]
    fn non_object_sources_fail_to_read() {
        let scalar = Scalar(42);
        match scalar.read() {
            Err(MapError::Read { type_name, reason }) => {
                assert_eq!(type_name, "Scalar");
                assert!(reason.contains("number"), "unexpected reason: {reason}");
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn tuple_views_preserve_order() {
        let a = Plain {
            name: "first".to_string(),
            _internal: 0,
        };
        let b = Plain {
            name: "second".to_string(),
            _internal: 0,
        };

        // Same type twice is fine for reading; the registry rejects it later.
        let views = (&a, &b).views().unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].attrs["name"], "first");
        assert_eq!(views[1].attrs["name"], "second");
    }
}
