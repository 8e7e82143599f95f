//! # Type Resolver
//!
//! Maps a [`MetadataType`] to the [`TypeExpr`] used for its fields.
//!
//! Enumerated types become a literal union named PascalCase(name). The
//! union is synthesized the first time the type is resolved and recorded in
//! the run's [`UnionRegistry`]; every later resolution by the same name
//! returns the registered name without emitting a second declaration.
//!
//! The registry is owned by the resolver, which is owned by one synthesis
//! run. Two runs never share unions.

use std::collections::HashMap;

use telgen_core::{MetadataKind, ResolutionError};
use telgen_schema::MetadataType;

use crate::decl::{TypeExpr, UnionAlias};

/// Unions synthesized during one run, in first-resolution order.
///
/// Each union remembers the metadata type it was synthesized from. Two
/// distinct metadata types casing to the same union name are a collision.
#[derive(Debug, Default, Clone)]
pub struct UnionRegistry {
    unions: Vec<UnionAlias>,
    index: HashMap<String, (usize, String)>,
}

impl UnionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the union for metadata type `source` unless it exists.
    ///
    /// Returns `Ok(true)` if the union was added and `Ok(false)` if `source`
    /// already registered it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::TypeNameCollision`] if a different
    /// metadata type already registered a union under `name`.
    pub fn register(
        &mut self,
        name: &str,
        source: &str,
        literals: &[String],
    ) -> Result<bool, ResolutionError> {
        if let Some((_, existing)) = self.index.get(name) {
            if existing == source {
                return Ok(false);
            }
            return Err(ResolutionError::TypeNameCollision {
                name: name.to_string(),
                existing: format!("metadata type \"{existing}\""),
                incoming: format!("metadata type \"{source}\""),
            });
        }
        self.index.insert(name.to_string(), (self.unions.len(), source.to_string()));
        self.unions.push(UnionAlias {
            name: name.to_string(),
            literals: literals.to_vec(),
        });
        Ok(true)
    }

    /// Look up a registered union.
    pub fn get(&self, name: &str) -> Option<&UnionAlias> {
        self.index.get(name).map(|(i, _)| &self.unions[*i])
    }

    /// Metadata type a union was synthesized from.
    pub fn source(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|(_, source)| source.as_str())
    }

    /// Number of registered unions.
    pub fn len(&self) -> usize {
        self.unions.len()
    }

    /// True if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.unions.is_empty()
    }

    /// Consume the registry, yielding unions in registration order.
    pub fn into_unions(self) -> Vec<UnionAlias> {
        self.unions
    }
}

/// What a metadata declaration turns into.
enum Shape<'m> {
    Enumerated(&'m [String]),
    Primitive(MetadataKind),
}

fn classify<'m>(metadata: &'m MetadataType, owner: &str) -> Result<Shape<'m>, ResolutionError> {
    if let Some(values) = metadata.allowed_values.as_deref() {
        return Ok(Shape::Enumerated(values));
    }
    MetadataKind::from_declared(metadata.kind.as_deref())
        .map(Shape::Primitive)
        .ok_or_else(|| ResolutionError::UnknownKind {
            metadata: metadata.name.clone(),
            kind: metadata.kind.clone().unwrap_or_default(),
            owner: owner.to_string(),
        })
}

/// Resolves metadata references against one merged type set.
#[derive(Debug)]
pub struct TypeResolver<'a> {
    types: HashMap<&'a str, &'a MetadataType>,
    registry: UnionRegistry,
}

impl<'a> TypeResolver<'a> {
    /// Index `types` by name. On duplicate names the first entry wins,
    /// matching the merger.
    pub fn new(types: &'a [MetadataType]) -> Self {
        let mut index = HashMap::with_capacity(types.len());
        for t in types {
            index.entry(t.name.as_str()).or_insert(t);
        }
        Self {
            types: index,
            registry: UnionRegistry::new(),
        }
    }

    /// Look up a metadata type by name.
    ///
    /// `owner` is the metric (or base type) holding the reference and is
    /// reported if the name is undeclared.
    pub fn get_type_or_throw(
        &self,
        name: &str,
        owner: &str,
    ) -> Result<&'a MetadataType, ResolutionError> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| ResolutionError::UnknownMetadataType {
                metric: owner.to_string(),
                name: name.to_string(),
            })
    }

    /// Resolve a metadata type to a field type, registering its union on
    /// first sight.
    pub fn resolve(
        &mut self,
        metadata: &MetadataType,
        owner: &str,
    ) -> Result<TypeExpr, ResolutionError> {
        match classify(metadata, owner)? {
            Shape::Enumerated(values) => {
                let name = metadata.union_name();
                if self.registry.register(&name, &metadata.name, values)? {
                    tracing::debug!(
                        union = %name,
                        members = values.len(),
                        "registered literal union"
                    );
                }
                Ok(TypeExpr::Named(name))
            }
            Shape::Primitive(kind) => Ok(TypeExpr::from_kind(kind)),
        }
    }

    /// Look up `name` and resolve it in one step.
    pub fn resolve_name(&mut self, name: &str, owner: &str) -> Result<TypeExpr, ResolutionError> {
        let metadata = self.get_type_or_throw(name, owner)?;
        self.resolve(metadata, owner)
    }

    /// Unions registered so far.
    pub fn registry(&self) -> &UnionRegistry {
        &self.registry
    }

    /// Consume the resolver, keeping its registry.
    pub fn into_registry(self) -> UnionRegistry {
        self.registry
    }
}
