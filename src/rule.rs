//! Declarative per-attribute mapping rules and the registration builder.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::value::AttrValue;

/// A unary transform applied to an attribute value in flight.
pub type TransformFn = Arc<dyn Fn(AttrValue) -> AttrValue + Send + Sync>;

/// One instruction for one source attribute.
///
/// Rules are keyed by the *source* attribute name; the variant decides which
/// target attribute the value lands on and whether it is transformed on the
/// way. Any source attribute without a rule is implicitly `Copy`.
#[derive(Clone)]
pub enum Rule {
    /// Take the value unchanged, onto the same-named target attribute.
    Copy,
    /// Take the value unchanged, onto a differently-named target attribute.
    Rename(String),
    /// Pass the value through a transform, onto the same-named attribute.
    Transform(TransformFn),
    /// Pass the value through a transform, onto a differently-named attribute.
    RenameTransform(String, TransformFn),
}

impl Rule {
    /// The target attribute this rule writes, given its source attribute.
    pub(crate) fn target_name<'a>(&'a self, source_name: &'a str) -> &'a str {
        match self {
            Rule::Copy | Rule::Transform(_) => source_name,
            Rule::Rename(to) | Rule::RenameTransform(to, _) => to,
        }
    }

    /// Applies the rule to a resolved value, yielding the target attribute
    /// name and the value to store under it.
    pub(crate) fn apply(&self, source_name: &str, value: AttrValue) -> (String, AttrValue) {
        match self {
            Rule::Copy => (source_name.to_string(), value),
            Rule::Rename(to) => (to.clone(), value),
            Rule::Transform(f) => (source_name.to_string(), f(value)),
            Rule::RenameTransform(to, f) => (to.clone(), f(value)),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Copy => write!(f, "Copy"),
            Rule::Rename(to) => write!(f, "Rename({to:?})"),
            Rule::Transform(_) => write!(f, "Transform(..)"),
            Rule::RenameTransform(to, _) => write!(f, "RenameTransform({to:?}, ..)"),
        }
    }
}

/// Builder for the rule set and exclusions of one mapping registration.
///
/// Heterogeneous rule shapes are normalized here, at registration time, into
/// the tagged [`Rule`] variants, so the resolution engine never has to
/// re-inspect them at map time. A transform that is not callable cannot be
/// expressed at all.
///
/// # Examples
///
/// ```
/// use attrmap::MappingSpec;
///
/// let spec = MappingSpec::new()
///     .rename("email", "email_address")
///     .transform("name", |v| match v {
///         serde_json::Value::String(s) => s.to_uppercase().into(),
///         other => other,
///     })
///     .exclude("password");
/// ```
#[derive(Debug, Default, Clone)]
pub struct MappingSpec {
    rules: BTreeMap<String, Rule>,
    exclusions: BTreeSet<String>,
}

impl MappingSpec {
    /// Creates an empty spec: every source attribute is implicitly copied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an attribute as an explicit copy.
    ///
    /// Functionally identical to the implicit default; useful when a
    /// registration wants to document exactly which attributes it relies on.
    pub fn copy(mut self, attr: impl Into<String>) -> Self {
        self.rules.insert(attr.into(), Rule::Copy);
        self
    }

    /// Copies the source attribute `from` onto the target attribute `to`.
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rules.insert(from.into(), Rule::Rename(to.into()));
        self
    }

    /// Passes the attribute through `transform` on its way to the
    /// same-named target attribute.
    pub fn transform<F>(mut self, attr: impl Into<String>, transform: F) -> Self
    where
        F: Fn(AttrValue) -> AttrValue + Send + Sync + 'static,
    {
        self.rules
            .insert(attr.into(), Rule::Transform(Arc::new(transform)));
        self
    }

    /// Renames `from` to `to` and passes the value through `transform`.
    pub fn rename_transform<F>(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        transform: F,
    ) -> Self
    where
        F: Fn(AttrValue) -> AttrValue + Send + Sync + 'static,
    {
        self.rules.insert(
            from.into(),
            Rule::RenameTransform(to.into(), Arc::new(transform)),
        );
        self
    }

    /// Excludes a target attribute from automatic population.
    ///
    /// An excluded attribute is never filled from any source, even when a
    /// same-named source attribute exists. It can still be supplied through
    /// `extra` at map time.
    pub fn exclude(mut self, attr: impl Into<String>) -> Self {
        self.exclusions.insert(attr.into());
        self
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, Rule>, BTreeSet<String>) {
        (self.rules, self.exclusions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reverse(value: AttrValue) -> AttrValue {
        match value {
            AttrValue::String(s) => s.chars().rev().collect::<String>().into(),
            other => other,
        }
    }

    #[test]
    fn apply_covers_all_variants() {
        let copy = Rule::Copy;
        assert_eq!(copy.apply("name", json!("Johnny")), ("name".into(), json!("Johnny")));

        let rename = Rule::Rename("full_name".into());
        assert_eq!(
            rename.apply("name", json!("Johnny")),
            ("full_name".into(), json!("Johnny"))
        );

        let transform = Rule::Transform(Arc::new(reverse));
        assert_eq!(
            transform.apply("name", json!("Johnny")),
            ("name".into(), json!("ynnhoJ"))
        );

        let both = Rule::RenameTransform("reverse_name".into(), Arc::new(reverse));
        assert_eq!(
            both.apply("name", json!("Johnny")),
            ("reverse_name".into(), json!("ynnhoJ"))
        );
    }

    #[test]
    fn target_name_follows_renames() {
        assert_eq!(Rule::Copy.target_name("name"), "name");
        assert_eq!(Rule::Rename("other".into()).target_name("name"), "other");
    }

    #[test]
    fn spec_normalizes_into_tagged_rules() {
        let spec = MappingSpec::new()
            .copy("kept")
            .rename("email", "email_address")
            .transform("name", reverse);
        let (rules, exclusions) = spec.into_parts();

        assert!(matches!(rules["kept"], Rule::Copy));
        assert!(matches!(rules["email"], Rule::Rename(_)));
        assert!(matches!(rules["name"], Rule::Transform(_)));
        assert!(exclusions.is_empty());
    }
}
