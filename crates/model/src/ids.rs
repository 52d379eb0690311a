//! Interned identity types
//!
//! An identity names one entity inside its kind (entities, players, worlds,
//! actions). Identities are never constructed directly: a registry hands out
//! the canonical instance for a raw number, creating it on first use, so two
//! lookups of the same number always share one instance.
//!
//! Every kind reserves the raw value `0` as the "world" sentinel, the global
//! scope that is not an entity. Negative values are the "unset" convention.
//!
//! Equality is structural (by value) for every kind. Because a registry keeps
//! at most one instance per value, value equality and instance identity agree
//! for ids coming from the same registry; [`Id::ptr_eq`] checks the latter.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;
use crate::registry::{IdRegistries, IdRegistry};

/// Raw integer types an identity can wrap.
pub trait RawId:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Display
    + fmt::Debug
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// The zero value, used as the world sentinel.
    const ZERO: Self;

    /// Returns true if the value is lower than zero.
    fn is_negative(self) -> bool;
}

macro_rules! impl_raw_id {
    ($($raw:ty),* $(,)?) => {
        $(
            impl RawId for $raw {
                const ZERO: Self = 0;

                fn is_negative(self) -> bool {
                    self < 0
                }
            }
        )*
    };
}

impl_raw_id!(i32, i64);

/// A family of identities sharing one registry and one sentinel.
pub trait IdKind: Sized + Send + Sync + 'static {
    /// Raw integer wrapped by this kind.
    type Raw: RawId;

    /// Type name used in `Debug` output and log fields.
    const NAME: &'static str;

    /// Raw value reserved for the world.
    const WORLD_VALUE: Self::Raw;

    /// Selects this kind's registry inside a registries context.
    fn registry(registries: &IdRegistries) -> &IdRegistry<Self>;
}

/// Handle to the canonical identity for a raw value of kind `K`.
///
/// Cloning the handle is cheap and never creates a new canonical instance.
pub struct Id<K: IdKind> {
    canonical: Arc<K::Raw>,
    kind: PhantomData<K>,
}

impl<K: IdKind> Id<K> {
    /// Only registries create canonical instances.
    pub(crate) fn canonical(value: K::Raw) -> Self {
        Self {
            canonical: Arc::new(value),
            kind: PhantomData,
        }
    }

    /// Retrieve the canonical id for `value` from the process-wide registries.
    ///
    /// Positive, negative and world values are all allowed.
    pub fn value_of(value: K::Raw) -> Self {
        IdRegistries::global().registry::<K>().value_of(value)
    }

    /// The world id of the process-wide registries.
    pub fn world() -> Self {
        IdRegistries::global().registry::<K>().world()
    }

    /// The wrapped raw value.
    pub fn value(&self) -> K::Raw {
        *self.canonical
    }

    /// Check if this is the world id.
    pub fn is_world(&self) -> bool {
        self.value() == K::WORLD_VALUE
    }

    /// Returns true if the wrapped value is lower than 0.
    pub fn is_negative(&self) -> bool {
        self.value().is_negative()
    }

    /// Check if a raw value is the world value.
    pub fn is_world_value(value: K::Raw) -> bool {
        value == K::WORLD_VALUE
    }

    /// Check if a possibly missing id is the world id.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Precondition` if `id` is `None`. A missing id is a
    /// caller bug and is never reported as "not world".
    pub fn try_is_world(id: Option<&Self>) -> Result<bool, ModelError> {
        match id {
            Some(id) => Ok(id.is_world()),
            None => Err(ModelError::precondition(format!(
                "{} must be present to check for world",
                K::NAME
            ))),
        }
    }

    /// Returns true if both handles point to the same canonical instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.canonical, &b.canonical)
    }
}

impl<K: IdKind> Clone for Id<K> {
    fn clone(&self) -> Self {
        Self {
            canonical: Arc::clone(&self.canonical),
            kind: PhantomData,
        }
    }
}

impl<K: IdKind> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.value() == other.value()
    }
}

impl<K: IdKind> Eq for Id<K> {}

impl<K: IdKind> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl<K: IdKind> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: IdKind> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl<K: IdKind> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::NAME, self.value())
    }
}

impl<K: IdKind> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Deserialized ids are interned through the process-wide registries.
impl<'de, K: IdKind> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        K::Raw::deserialize(deserializer).map(Self::value_of)
    }
}

macro_rules! define_id_kind {
    ($(#[$meta:meta])* $kind:ident => $alias:ident($raw:ty), $field:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $kind {}

        impl IdKind for $kind {
            type Raw = $raw;
            const NAME: &'static str = stringify!($alias);
            const WORLD_VALUE: $raw = <$raw as RawId>::ZERO;

            fn registry(registries: &IdRegistries) -> &IdRegistry<Self> {
                &registries.$field
            }
        }

        pub type $alias = Id<$kind>;
    };
}

define_id_kind!(
    /// Generic game entities (units, buildings, props). Wide enough to never wrap.
    EntityKind => EntityId(i64), entities
);
define_id_kind!(
    /// Connected or persisted players.
    PlayerKind => PlayerId(i32), players
);
define_id_kind!(
    /// Worlds hosted by the server.
    WorldKind => WorldId(i32), worlds
);
define_id_kind!(
    /// Actions a player or entity can perform.
    ActionKind => ActionId(i32), actions
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_value_of_returns_canonical_instance() {
        let registries = IdRegistries::new();
        let first = registries.actions().value_of(2000);
        let second = registries.actions().value_of(2000);
        assert_eq!(first.value(), 2000);
        assert!(Id::ptr_eq(&first, &second));
    }

    #[test]
    fn test_global_value_of_returns_canonical_instance() {
        let first = PlayerId::value_of(7_001);
        let second = PlayerId::value_of(7_001);
        assert!(Id::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clone_shares_instance() {
        let id = EntityId::value_of(42);
        let copy = id.clone();
        assert!(Id::ptr_eq(&id, &copy));
    }

    #[test]
    fn test_world_constant() {
        assert!(EntityId::world().is_world());
        assert!(PlayerId::world().is_world());
        assert!(WorldId::world().is_world());
        assert!(ActionId::world().is_world());
        assert_eq!(WorldId::world().value(), 0);
        assert!(Id::ptr_eq(&WorldId::world(), &WorldId::value_of(0)));
    }

    #[test]
    fn test_is_world_instance() {
        assert!(PlayerId::value_of(0).is_world());
        assert!(!PlayerId::value_of(5).is_world());
        assert!(!PlayerId::value_of(-1).is_world());
    }

    #[test]
    fn test_is_world_value() {
        assert!(EntityId::is_world_value(0));
        assert!(!EntityId::is_world_value(1));
        assert!(!EntityId::is_world_value(-1));
        assert!(ActionId::is_world_value(ActionId::world().value()));
        assert!(!ActionId::is_world_value(4));
    }

    #[test]
    fn test_try_is_world() {
        assert_eq!(WorldId::try_is_world(Some(&WorldId::value_of(0))), Ok(true));
        assert_eq!(WorldId::try_is_world(Some(&WorldId::value_of(1))), Ok(false));
    }

    #[test]
    fn test_try_is_world_missing_id_is_precondition() {
        let err = PlayerId::try_is_world(None).expect_err("missing id must be rejected");
        assert!(err.is_precondition());
        assert!(err.to_string().contains("PlayerId"));

        assert!(matches!(
            EntityId::try_is_world(None),
            Err(ModelError::Precondition(_))
        ));
        assert!(matches!(
            WorldId::try_is_world(None),
            Err(ModelError::Precondition(_))
        ));
        assert!(matches!(
            ActionId::try_is_world(None),
            Err(ModelError::Precondition(_))
        ));
    }

    #[test]
    fn test_is_negative() {
        assert!(WorldId::value_of(-1).is_negative());
        assert!(!WorldId::value_of(1).is_negative());
        assert!(!WorldId::value_of(0).is_negative());
        assert!(EntityId::value_of(i64::MIN).is_negative());
        assert!(!EntityId::value_of(i64::MAX).is_negative());
    }

    #[test]
    fn test_equality_is_by_value() {
        let registries = IdRegistries::new();
        let from_explicit = registries.players().value_of(5);
        let from_global = PlayerId::value_of(5);

        assert!(!Id::ptr_eq(&from_explicit, &from_global));
        assert_eq!(from_explicit, from_global);
        assert_ne!(PlayerId::value_of(5), PlayerId::value_of(6));
    }

    #[test]
    fn test_hash_follows_value() {
        assert_eq!(hash_of(&PlayerId::value_of(-5)), hash_of(&-5i32));
        assert_eq!(
            hash_of(&ActionId::value_of(5)),
            hash_of(&IdRegistries::new().actions().value_of(5))
        );

        let set: HashSet<EntityId> = [1, 2, 2, 3].into_iter().map(EntityId::value_of).collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_ordering_by_value() {
        let mut ids = vec![
            WorldId::value_of(3),
            WorldId::value_of(-2),
            WorldId::value_of(0),
        ];
        ids.sort();
        let values: Vec<i32> = ids.iter().map(WorldId::value).collect();
        assert_eq!(values, vec![-2, 0, 3]);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerId::value_of(-5).to_string(), "-5");
        assert_eq!(ActionId::value_of(8).to_string(), "8");
        assert_eq!(
            EntityId::value_of(9_000_000_000).to_string(),
            "9000000000"
        );
    }

    #[test]
    fn test_debug_names_the_kind() {
        assert_eq!(format!("{:?}", PlayerId::value_of(5)), "PlayerId(5)");
        assert_eq!(format!("{:?}", EntityId::value_of(-1)), "EntityId(-1)");
    }

    #[test]
    fn test_serialize_as_raw_value() {
        let json = serde_json::to_string(&EntityId::value_of(123)).expect("serialize");
        assert_eq!(json, "123");
    }

    #[test]
    fn test_deserialize_interns() {
        let id: WorldId = serde_json::from_str("77").expect("deserialize");
        assert!(Id::ptr_eq(&id, &WorldId::value_of(77)));

        let ids: Vec<ActionId> = serde_json::from_str("[0, -3]").expect("deserialize");
        assert!(ids[0].is_world());
        assert!(ids[1].is_negative());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let result: Result<PlayerId, _> = serde_json::from_str("9000000000");
        assert!(result.is_err());
    }
}
