use thiserror::Error;

/// Errors that can occur when configuring or running a [`Mapper`](crate::Mapper).
///
/// The variants fall into four groups, each surfaced at the call that
/// detected the problem:
///
/// - configuration errors ([`AlreadyRegistered`](MapError::AlreadyRegistered),
///   [`RuleExcluded`](MapError::RuleExcluded),
///   [`DuplicateSource`](MapError::DuplicateSource)) from `add_mapping`
/// - lookup errors ([`NotConfigured`](MapError::NotConfigured)) when no
///   registration matches the runtime source signature
/// - validation errors ([`MissingRequired`](MapError::MissingRequired)) when
///   a required target attribute has no resolved value
/// - collaborator errors ([`Read`](MapError::Read),
///   [`Construction`](MapError::Construction)) passed through from attribute
///   extraction and target construction
#[derive(Debug, Error)]
pub enum MapError {
    /// No mapping was registered for this source signature and target type.
    #[error("no mapping configured for {signature} -> {target}")]
    NotConfigured {
        signature: String,
        target: &'static str,
    },

    /// A mapping for this signature and target already exists. Registrations
    /// are never merged; use a fresh `Mapper` to reconfigure a pair.
    #[error("mapping {signature} -> {target} is already registered")]
    AlreadyRegistered {
        signature: String,
        target: &'static str,
    },

    /// A rule produces a target attribute that the same configuration excludes.
    #[error(
        "rule for attribute {attribute} maps onto {target_attribute}, \
         which is excluded in {signature} -> {target}"
    )]
    RuleExcluded {
        attribute: String,
        target_attribute: String,
        signature: String,
        target: &'static str,
    },

    /// A source tuple names the same type more than once, which would make
    /// precedence ambiguous.
    #[error("duplicate source type {type_name} in signature {signature}")]
    DuplicateSource {
        type_name: &'static str,
        signature: String,
    },

    /// A source object could not be read as a flat attribute set.
    #[error("failed to read attributes of {type_name}: {reason}")]
    Read {
        type_name: &'static str,
        reason: String,
    },

    /// One or more required target attributes had no value after rules and
    /// extras were applied.
    #[error("{target} requires attributes {attributes:?}, not resolved from {signature}")]
    MissingRequired {
        attributes: Vec<String>,
        signature: String,
        target: &'static str,
    },

    /// The target's construction path rejected the resolved attributes.
    #[error("failed to construct {target}: {reason}")]
    Construction {
        target: &'static str,
        reason: String,
    },
}
