//! Signatures, stored configurations, and the per-mapper registry.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use tracing::debug;

use crate::error::MapError;
use crate::rule::{MappingSpec, Rule};
use crate::source::AttrSource;
use crate::value::short_name;

/// The ordered source-type identity of a mapping configuration.
///
/// A signature is one type or an ordered sequence of types; the order is the
/// precedence order at map time. Lookup is by exact type identity, so a
/// registration for `A` never matches a call with some other type, however
/// similar its attributes.
///
/// # Examples
///
/// ```
/// use attrmap::{AttrMap, AttrSource, MapError, Signature};
///
/// struct User;
/// struct Account;
/// # impl AttrSource for User {
/// #     fn read(&self) -> Result<AttrMap, MapError> { Ok(AttrMap::new()) }
/// # }
/// # impl AttrSource for Account {
/// #     fn read(&self) -> Result<AttrMap, MapError> { Ok(AttrMap::new()) }
/// # }
///
/// let single = Signature::of::<User>();
/// let pair = Signature::of::<User>().and::<Account>();
/// assert_eq!(pair.to_string(), "(User, Account)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    types: Vec<TypeId>,
    names: Vec<&'static str>,
}

impl Signature {
    /// A signature of a single source type.
    pub fn of<T: AttrSource>() -> Self {
        Self {
            types: vec![TypeId::of::<T>()],
            names: vec![short_name(std::any::type_name::<T>())],
        }
    }

    /// Appends another source type, at lower precedence than the ones
    /// already present.
    pub fn and<T: AttrSource>(mut self) -> Self {
        self.types.push(TypeId::of::<T>());
        self.names.push(short_name(std::any::type_name::<T>()));
        self
    }

    /// Number of source types in the signature.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The first type name that appears more than once, if any.
    pub(crate) fn first_duplicate(&self) -> Option<&'static str> {
        for (i, id) in self.types.iter().enumerate() {
            if self.types[..i].contains(id) {
                return Some(self.names[i]);
            }
        }
        None
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.len() == 1 {
            return write!(f, "{}", self.names[0]);
        }
        write!(f, "({})", self.names.join(", "))
    }
}

/// An immutable, registered mapping configuration for one
/// (signature, target) pair.
#[derive(Debug)]
pub struct MappingConfig {
    signature: Signature,
    target: &'static str,
    rules: BTreeMap<String, Rule>,
    exclusions: BTreeSet<String>,
}

impl MappingConfig {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Short name of the target type, for diagnostics.
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub(crate) fn rule_for(&self, source_name: &str) -> Option<&Rule> {
        self.rules.get(source_name)
    }

    pub(crate) fn is_excluded(&self, target_name: &str) -> bool {
        self.exclusions.contains(target_name)
    }
}

/// The store of mapping configurations owned by one
/// [`Mapper`](crate::Mapper).
///
/// There is deliberately no process-wide default registry: independent
/// mappers own independent registries and share nothing.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<(Signature, TypeId), MappingConfig>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a configuration.
    ///
    /// # Errors
    ///
    /// - [`MapError::DuplicateSource`] if the signature names a type twice
    /// - [`MapError::RuleExcluded`] if a rule writes an excluded attribute
    /// - [`MapError::AlreadyRegistered`] if the pair is already configured;
    ///   a registration is never merged into an existing one
    pub fn register(
        &mut self,
        signature: Signature,
        target_id: TypeId,
        target: &'static str,
        spec: MappingSpec,
    ) -> Result<(), MapError> {
        if let Some(type_name) = signature.first_duplicate() {
            return Err(MapError::DuplicateSource {
                type_name,
                signature: signature.to_string(),
            });
        }

        let (rules, exclusions) = spec.into_parts();
        for (source_name, rule) in &rules {
            let target_name = rule.target_name(source_name);
            if exclusions.contains(target_name) {
                return Err(MapError::RuleExcluded {
                    attribute: source_name.clone(),
                    target_attribute: target_name.to_string(),
                    signature: signature.to_string(),
                    target,
                });
            }
        }

        if self.entries.contains_key(&(signature.clone(), target_id)) {
            return Err(MapError::AlreadyRegistered {
                signature: signature.to_string(),
                target,
            });
        }

        debug!(signature = %signature, target_type = target, rules = rules.len(), "registered mapping");
        let key = (signature.clone(), target_id);
        self.entries.insert(
            key,
            MappingConfig {
                signature,
                target,
                rules,
                exclusions,
            },
        );
        Ok(())
    }

    /// Finds the configuration for a runtime signature and target type.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotConfigured`] if no registration matches.
    pub fn lookup(
        &self,
        signature: &Signature,
        target_id: TypeId,
        target: &'static str,
    ) -> Result<&MappingConfig, MapError> {
        self.entries
            .get(&(signature.clone(), target_id))
            .ok_or_else(|| MapError::NotConfigured {
                signature: signature.to_string(),
                target,
            })
    }

    pub fn contains(&self, signature: &Signature, target_id: TypeId) -> bool {
        self.entries.contains_key(&(signature.clone(), target_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::AttrMap;

    struct A;
    struct B;
    struct T;

    impl AttrSource for A {
        fn read(&self) -> Result<AttrMap, MapError> {
            Ok(AttrMap::new())
        }
    }

    impl AttrSource for B {
        fn read(&self) -> Result<AttrMap, MapError> {
            Ok(AttrMap::new())
        }
    }

    #[test]
    fn display_forms() {
        assert_eq!(Signature::of::<A>().to_string(), "A");
        assert_eq!(Signature::of::<A>().and::<B>().to_string(), "(A, B)");
    }

    #[test]
    fn register_and_lookup_round_trip() {
        let mut registry = Registry::new();
        registry
            .register(
                Signature::of::<A>(),
                TypeId::of::<T>(),
                "T",
                MappingSpec::new(),
            )
            .unwrap();

        assert_eq!(registry.len(), 1);
        let config = registry
            .lookup(&Signature::of::<A>(), TypeId::of::<T>(), "T")
            .unwrap();
        assert_eq!(config.target(), "T");
        assert_eq!(config.signature(), &Signature::of::<A>());
    }

    #[test]
    fn lookup_misses_are_not_configured() {
        let registry = Registry::new();
        let err = registry
            .lookup(&Signature::of::<A>(), TypeId::of::<T>(), "T")
            .unwrap_err();
        assert!(matches!(err, MapError::NotConfigured { .. }));
        assert_eq!(err.to_string(), "no mapping configured for A -> T");
    }

    #[test]
    fn re_registration_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register(
                Signature::of::<A>(),
                TypeId::of::<T>(),
                "T",
                MappingSpec::new(),
            )
            .unwrap();
        let err = registry
            .register(
                Signature::of::<A>(),
                TypeId::of::<T>(),
                "T",
                MappingSpec::new().exclude("email"),
            )
            .unwrap_err();
        assert!(matches!(err, MapError::AlreadyRegistered { .. }));
    }

    #[test]
    fn duplicate_source_types_are_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register(
                Signature::of::<A>().and::<B>().and::<A>(),
                TypeId::of::<T>(),
                "T",
                MappingSpec::new(),
            )
            .unwrap_err();
        match err {
            MapError::DuplicateSource {
                type_name,
                signature,
            } => {
                assert_eq!(type_name, "A");
                assert_eq!(signature, "(A, B, A)");
            }
            other => panic!("expected duplicate source error, got {other:?}"),
        }
    }

    #[test]
    fn rules_may_not_write_excluded_attributes() {
        let mut registry = Registry::new();
        let err = registry
            .register(
                Signature::of::<A>(),
                TypeId::of::<T>(),
                "T",
                MappingSpec::new()
                    .rename("email", "email_address")
                    .exclude("email_address"),
            )
            .unwrap_err();
        match err {
            MapError::RuleExcluded {
                attribute,
                target_attribute,
                ..
            } => {
                assert_eq!(attribute, "email");
                assert_eq!(target_attribute, "email_address");
            }
            other => panic!("expected rule/exclusion conflict, got {other:?}"),
        }
    }

    #[test]
    fn excluding_a_rules_source_name_is_allowed() {
        // The exclusion set holds target attribute names; a rename away from
        // an excluded name does not conflict with it.
        let mut registry = Registry::new();
        registry
            .register(
                Signature::of::<A>(),
                TypeId::of::<T>(),
                "T",
                MappingSpec::new()
                    .rename("email", "email_address")
                    .exclude("email"),
            )
            .unwrap();
    }
}
