//! Identity registries
//!
//! A registry owns every canonical identity of one kind and hands out shared
//! handles to them. The world sentinel is inserted when the registry is built,
//! so it exists before any lookup.
//!
//! [`IdRegistries`] bundles the registries of all kinds. Applications build one
//! and inject it where ids are resolved; [`IdRegistries::global`] is the lazily
//! built process-wide instance behind `Id::value_of`.

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::error::ModelError;
use crate::ids::{ActionKind, EntityKind, Id, IdKind, PlayerKind, WorldKind};
use crate::settings::RegistrySettings;

static GLOBAL_REGISTRIES: Lazy<IdRegistries> = Lazy::new(|| {
    let settings = RegistrySettings::from_env();
    IdRegistries::with_settings(&settings).unwrap_or_else(|err| {
        tracing::warn!(
            error = %err,
            "Invalid identity registry settings in environment, using defaults"
        );
        IdRegistries::new()
    })
});

/// Canonical ids of one kind, keyed by raw value.
///
/// Uses DashMap for thread-safe concurrent access. Insertion goes through the
/// map's entry API, which holds the shard lock between the lookup and the
/// insert, so concurrent first lookups of a value all get the same instance.
pub struct IdRegistry<K: IdKind> {
    ids: DashMap<K::Raw, Id<K>>,
    world: Id<K>,
}

impl<K: IdKind> IdRegistry<K> {
    /// Create a registry with default settings.
    pub fn new() -> Self {
        let settings = RegistrySettings::default();
        Self::build(DashMap::with_capacity(settings.initial_capacity))
    }

    /// Create a registry sized from `settings`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` if the settings are invalid.
    pub fn with_settings(settings: &RegistrySettings) -> Result<Self, ModelError> {
        settings.validate()?;
        Ok(Self::build(DashMap::with_capacity_and_shard_amount(
            settings.initial_capacity,
            settings.shard_amount,
        )))
    }

    fn build(ids: DashMap<K::Raw, Id<K>>) -> Self {
        let world = Id::canonical(K::WORLD_VALUE);
        ids.insert(K::WORLD_VALUE, world.clone());
        Self { ids, world }
    }

    /// Retrieve the canonical id for `value`, creating it on first use.
    pub fn value_of(&self, value: K::Raw) -> Id<K> {
        if let Some(existing) = self.ids.get(&value) {
            return existing.value().clone();
        }

        let mut created = false;
        let id = self
            .ids
            .entry(value)
            .or_insert_with(|| {
                created = true;
                Id::canonical(value)
            })
            .value()
            .clone();

        if created {
            tracing::debug!(kind = K::NAME, value = %value, "Interned new identity");
        }
        id
    }

    /// The world id of this registry.
    pub fn world(&self) -> Id<K> {
        self.world.clone()
    }

    /// Get the canonical id for `value` without creating it.
    pub fn get(&self, value: K::Raw) -> Option<Id<K>> {
        self.ids.get(&value).map(|entry| entry.value().clone())
    }

    /// Check whether `value` has already been interned.
    pub fn contains(&self, value: K::Raw) -> bool {
        self.ids.contains_key(&value)
    }

    /// Number of canonical ids, the world included.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: the world id is present from construction.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<K: IdKind> Default for IdRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The identity registries of an application, one per kind.
pub struct IdRegistries {
    pub(crate) entities: IdRegistry<EntityKind>,
    pub(crate) players: IdRegistry<PlayerKind>,
    pub(crate) worlds: IdRegistry<WorldKind>,
    pub(crate) actions: IdRegistry<ActionKind>,
}

impl IdRegistries {
    /// Create registries with default settings.
    pub fn new() -> Self {
        Self {
            entities: IdRegistry::new(),
            players: IdRegistry::new(),
            worlds: IdRegistry::new(),
            actions: IdRegistry::new(),
        }
    }

    /// Create registries sized from `settings`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` if the settings are invalid.
    pub fn with_settings(settings: &RegistrySettings) -> Result<Self, ModelError> {
        let registries = Self {
            entities: IdRegistry::with_settings(settings)?,
            players: IdRegistry::with_settings(settings)?,
            worlds: IdRegistry::with_settings(settings)?,
            actions: IdRegistry::with_settings(settings)?,
        };
        tracing::info!(
            initial_capacity = settings.initial_capacity,
            shard_amount = settings.shard_amount,
            "Identity registries created"
        );
        Ok(registries)
    }

    /// The process-wide registries, built on first access.
    pub fn global() -> &'static IdRegistries {
        &GLOBAL_REGISTRIES
    }

    /// The registry for kind `K`.
    pub fn registry<K: IdKind>(&self) -> &IdRegistry<K> {
        K::registry(self)
    }

    pub fn entities(&self) -> &IdRegistry<EntityKind> {
        &self.entities
    }

    pub fn players(&self) -> &IdRegistry<PlayerKind> {
        &self.players
    }

    pub fn worlds(&self) -> &IdRegistry<WorldKind> {
        &self.worlds
    }

    pub fn actions(&self) -> &IdRegistry<ActionKind> {
        &self.actions
    }
}

impl Default for IdRegistries {
    fn default() -> Self {
        Self::new()
    }
}
