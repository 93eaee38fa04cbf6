//! The mapper: configuration entry point and the map-time resolution engine.

use std::any::TypeId;
use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::error::MapError;
use crate::registry::{MappingConfig, Registry, Signature};
use crate::rule::MappingSpec;
use crate::source::{SourceSet, SourceView};
use crate::target::{AttrTarget, Construction};
use crate::value::{short_name, AttrMap, AttrValue};

/// Options for one mapping call: the construction strategy and caller-
/// supplied extra attributes.
///
/// Extras are overlaid after all source-derived resolution and always win,
/// whether the attribute came from a source, a rule, or an exclusion kept it
/// out.
#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    pub construction: Construction,
    pub extra: AttrMap,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the target without its normal initialization logic.
    pub fn bare(mut self) -> Self {
        self.construction = Construction::Bare;
        self
    }

    /// Adds one extra attribute, overriding anything resolved from sources.
    pub fn extra(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Merges a whole map of extra attributes.
    pub fn extras(mut self, attrs: AttrMap) -> Self {
        self.extra.extend(attrs);
        self
    }
}

/// The object-to-object attribute mapper.
///
/// A `Mapper` owns its own [`Registry`]; there is no ambient process-wide
/// registry, so independent mapping setups can coexist without
/// cross-contamination. Configure with [`add_mapping`](Mapper::add_mapping),
/// then convert with [`map`](Mapper::map), [`map_with`](Mapper::map_with),
/// or the in-place [`map_into`](Mapper::map_into) family.
///
/// The mapper does no internal locking: registration takes `&mut self`,
/// mapping takes `&self`. Configure first, then share freely for reads.
#[derive(Debug, Default)]
pub struct Mapper {
    registry: Registry,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapping configuration for a (signature, target) pair.
    ///
    /// The signature's order is the precedence order at map time. The
    /// target type is given as the type parameter:
    ///
    /// ```
    /// # use attrmap::{source, target, AttrMap, AttrSource, AttrTarget, MapError};
    /// use attrmap::{Mapper, MappingSpec, Signature};
    /// # use serde::{Deserialize, Serialize};
    /// # #[derive(Serialize)]
    /// # struct User { name: String }
    /// # impl AttrSource for User {
    /// #     fn read(&self) -> Result<AttrMap, MapError> { source::to_attrs(self) }
    /// # }
    /// # #[derive(Default, Serialize, Deserialize)]
    /// # struct UserDto { name: String }
    /// # impl AttrTarget for UserDto {
    /// #     fn construct(attrs: AttrMap) -> Result<Self, MapError> { target::from_attrs(attrs) }
    /// #     fn assign(&mut self, attrs: AttrMap) -> Result<(), MapError> { target::assign_attrs(self, attrs) }
    /// # }
    ///
    /// # fn main() -> Result<(), MapError> {
    /// let mut mapper = Mapper::new();
    /// mapper.add_mapping::<UserDto>(Signature::of::<User>(), MappingSpec::new())?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a configuration error ([`MapError::DuplicateSource`],
    /// [`MapError::RuleExcluded`], or [`MapError::AlreadyRegistered`])
    /// before anything is stored.
    pub fn add_mapping<T: AttrTarget>(
        &mut self,
        source: Signature,
        spec: MappingSpec,
    ) -> Result<(), MapError> {
        self.registry
            .register(source, TypeId::of::<T>(), target_name::<T>(), spec)
    }

    /// Whether a configuration exists for this signature and target.
    pub fn is_configured<T: AttrTarget>(&self, source: &Signature) -> bool {
        self.registry.contains(source, TypeId::of::<T>())
    }

    /// Maps source object(s) into a newly constructed target, with default
    /// options: standard construction, no extras.
    ///
    /// # Errors
    ///
    /// See [`map_with`](Mapper::map_with).
    pub fn map<S: SourceSet, T: AttrTarget>(&self, source: S) -> Result<T, MapError> {
        self.map_with(source, MapOptions::new())
    }

    /// Maps source object(s) into a newly constructed target.
    ///
    /// Sources are read in signature order; when several carry the same
    /// attribute, the leftmost one wins. An attribute only present on a
    /// later source still resolves from that source.
    ///
    /// # Errors
    ///
    /// - [`MapError::NotConfigured`] if no registration matches the runtime
    ///   source types and target
    /// - [`MapError::Read`] if a source cannot be read
    /// - [`MapError::MissingRequired`] if a required target attribute is
    ///   unresolved after sources, rules and extras
    /// - [`MapError::Construction`] if the target rejects the resolved
    ///   attributes
    pub fn map_with<S: SourceSet, T: AttrTarget>(
        &self,
        source: S,
        options: MapOptions,
    ) -> Result<T, MapError> {
        let signature = source.signature();
        let config = self
            .registry
            .lookup(&signature, TypeId::of::<T>(), target_name::<T>())?;
        debug!(signature = %signature, target_type = config.target(), "mapping");

        let resolved = resolve(&source.views()?, config, options.extra);
        check_required::<T>(&resolved, config)?;

        match options.construction {
            Construction::Standard => T::construct(resolved),
            Construction::Bare => T::construct_bare(resolved),
        }
    }

    /// Maps source object(s) onto an existing target instance, in place.
    ///
    /// The instance keeps its identity and every attribute the mapping does
    /// not touch. No required-attribute check runs: an existing instance is
    /// complete by construction.
    ///
    /// # Errors
    ///
    /// - [`MapError::NotConfigured`] if no registration matches
    /// - [`MapError::Read`] if a source cannot be read
    /// - [`MapError::Construction`] if the target rejects a value
    pub fn map_into<S: SourceSet, T: AttrTarget>(
        &self,
        source: S,
        target: &mut T,
    ) -> Result<(), MapError> {
        self.map_into_with(source, target, AttrMap::new())
    }

    /// Like [`map_into`](Mapper::map_into), with extra attributes overlaid
    /// after source resolution.
    ///
    /// # Errors
    ///
    /// See [`map_into`](Mapper::map_into).
    pub fn map_into_with<S: SourceSet, T: AttrTarget>(
        &self,
        source: S,
        target: &mut T,
        extra: AttrMap,
    ) -> Result<(), MapError> {
        let signature = source.signature();
        let config = self
            .registry
            .lookup(&signature, TypeId::of::<T>(), target_name::<T>())?;
        debug!(signature = %signature, target_type = config.target(), "mapping in place");

        let resolved = resolve(&source.views()?, config, extra);
        target.assign(resolved)
    }
}

fn target_name<T: AttrTarget>() -> &'static str {
    short_name(std::any::type_name::<T>())
}

/// Unions the discoverable names, resolves each by source precedence,
/// applies rules and exclusions, then overlays extras.
fn resolve(views: &[SourceView], config: &MappingConfig, extra: AttrMap) -> AttrMap {
    let union: BTreeSet<&String> = views.iter().flat_map(|view| view.names.iter()).collect();

    let mut resolved = AttrMap::new();
    for name in union {
        // Leftmost source carrying the attribute wins; a name that is only
        // discoverable but carried by no source stays unresolved.
        let Some((index, value)) = views
            .iter()
            .enumerate()
            .find_map(|(i, view)| view.attrs.get(name).map(|v| (i, v)))
        else {
            continue;
        };

        let (target_attr, value) = match config.rule_for(name) {
            Some(rule) => rule.apply(name, value.clone()),
            None => (name.clone(), value.clone()),
        };
        if config.is_excluded(&target_attr) {
            trace!(attribute = %target_attr, "excluded from automatic mapping");
            continue;
        }
        trace!(attribute = %target_attr, source_index = index, "resolved");
        resolved.insert(target_attr, value);
    }

    // Extras always win, including over exclusions.
    resolved.extend(extra);
    resolved
}

/// Every required target attribute must have a value once resolution ends.
fn check_required<T: AttrTarget>(
    resolved: &AttrMap,
    config: &MappingConfig,
) -> Result<(), MapError> {
    let missing: Vec<String> = T::required()
        .iter()
        .filter(|name| !resolved.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(MapError::MissingRequired {
        attributes: missing,
        signature: config.signature().to_string(),
        target: config.target(),
    })
}
