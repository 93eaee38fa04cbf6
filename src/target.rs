//! The target side of a mapping: required-attribute declaration and
//! construction.

use std::any::Any;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::MapError;
use crate::value::{short_name, to_object, AttrMap, AttrValue};

/// How a new target instance is built from resolved attributes.
///
/// `Bare` exists for targets whose normal construction path does
/// side-effecting or validating work that a mapping should not trigger:
/// it builds the instance without invoking that logic, with unresolved
/// attributes taking the type's bare template values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Construction {
    /// The target's normal construction path.
    #[default]
    Standard,
    /// Build without running the target's initialization logic.
    Bare,
}

/// A type the mapper can build or populate.
///
/// The serde-backed helpers in this module make the common implementation a
/// few one-liners:
///
/// ```
/// use attrmap::{target, AttrMap, AttrTarget, MapError};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct UserDto {
///     name: String,
///     email: String,
/// }
///
/// impl AttrTarget for UserDto {
///     fn required() -> &'static [&'static str] {
///         &["name", "email"]
///     }
///
///     fn construct(attrs: AttrMap) -> Result<Self, MapError> {
///         target::from_attrs(attrs)
///     }
///
///     fn construct_bare(attrs: AttrMap) -> Result<Self, MapError> {
///         target::bare_from_attrs(attrs)
///     }
///
///     fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> {
///         target::assign_attrs(self, attrs)
///     }
/// }
/// ```
///
/// A hand-written `construct` is the place for validation or other
/// initialization work; `construct_bare` should skip exactly that work.
pub trait AttrTarget: Any + Sized {
    /// Attribute names a construction of this type demands.
    ///
    /// Checked by the engine after resolution, rules and extras; anything
    /// listed here that is still unresolved fails the mapping with
    /// [`MapError::MissingRequired`] before construction is attempted.
    /// Types that leave this empty rely on construction errors instead.
    fn required() -> &'static [&'static str] {
        &[]
    }

    /// Builds an instance through the type's normal construction path.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Construction`] if the attributes are rejected.
    fn construct(attrs: AttrMap) -> Result<Self, MapError>;

    /// Builds an instance without the type's initialization logic.
    ///
    /// Defaults to the normal path for types whose construction has no
    /// side effects worth skipping.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Construction`] if the attributes are rejected.
    fn construct_bare(attrs: AttrMap) -> Result<Self, MapError> {
        Self::construct(attrs)
    }

    /// Assigns resolved attributes onto an existing instance, in place.
    ///
    /// Attributes not present in `attrs` keep their current values;
    /// attributes the type does not declare are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Construction`] if a value is rejected.
    fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError>;
}

fn construction_error<T>(err: serde_json::Error) -> MapError {
    MapError::Construction {
        target: short_name(std::any::type_name::<T>()),
        reason: err.to_string(),
    }
}

/// Deserializes a target from resolved attributes.
///
/// Attributes the target does not declare are ignored (serde's default
/// behavior for unknown fields), so the engine stays permissive on the
/// extra-data side.
///
/// # Errors
///
/// Returns [`MapError::Construction`] if deserialization fails, for example
/// when a declared field without a serde default is absent or a value has
/// the wrong shape.
pub fn from_attrs<T>(attrs: AttrMap) -> Result<T, MapError>
where
    T: DeserializeOwned + Any,
{
    serde_json::from_value(AttrValue::Object(to_object(attrs)))
        .map_err(construction_error::<T>)
}

/// Builds a target from its `Default` template, overlaid with the resolved
/// attributes. This is the `Construction::Bare` path for serde-backed
/// targets: no custom constructor or validation runs, and attributes the
/// mapping did not resolve keep their template values.
///
/// # Errors
///
/// Returns [`MapError::Construction`] if the template cannot be serialized
/// or the overlaid attributes cannot be deserialized back.
pub fn bare_from_attrs<T>(attrs: AttrMap) -> Result<T, MapError>
where
    T: Default + Serialize + DeserializeOwned + Any,
{
    let mut base = attrs_of(&T::default())?;
    base.extend(attrs);
    from_attrs(base)
}

/// Assigns resolved attributes onto an existing value, preserving every
/// attribute the mapping did not touch.
///
/// # Errors
///
/// Returns [`MapError::Construction`] if the merged state cannot be
/// deserialized back into `T`.
pub fn assign_attrs<T>(target: &mut T, attrs: AttrMap) -> Result<(), MapError>
where
    T: Serialize + DeserializeOwned + Any,
{
    let mut merged = attrs_of(&*target)?;
    merged.extend(attrs);
    *target = from_attrs(merged)?;
    Ok(())
}

fn attrs_of<T: Serialize + Any>(value: &T) -> Result<AttrMap, MapError> {
    match serde_json::to_value(value).map_err(construction_error::<T>)? {
        AttrValue::Object(map) => Ok(map.into_iter().collect()),
        other => Err(MapError::Construction {
            target: short_name(std::any::type_name::<T>()),
            reason: format!(
                "expected an object-shaped value, got {}",
                crate::value::kind(&other)
            ),
        }),
    }
}
