use std::{
    collections::hash_map,
    fmt::Debug,
    hash::{BuildHasher, Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU64,
};

use ahash::{HashMap, RandomState};

fn hash_one(source: impl Hash) -> NonZeroU64 {
    static RANDOM_STATE: std::sync::LazyLock<RandomState> =
        std::sync::LazyLock::new(RandomState::new);

    let mut hasher = RANDOM_STATE.build_hasher();
    source.hash(&mut hasher);
    // a zero hash is astronomically unlikely; fold it onto 1 rather than failing
    NonZeroU64::new(hasher.finish()).unwrap_or(NonZeroU64::MIN)
}

/// A handle into an [`IdMap`]. The `T` only exists so an `Id<Note>` can't be passed where an
/// `Id<Sentence>` is expected.
#[repr(transparent)]
pub struct Id<T = ()>(NonZeroU64, PhantomData<T>);

impl<T> Id<T> {
    pub const fn from_raw(raw: NonZeroU64) -> Self {
        Self(raw, PhantomData)
    }
    pub const fn raw(self) -> NonZeroU64 {
        self.0
    }

    /// Deterministic id derived from `source`, stable for the lifetime of the process.
    pub fn new(source: impl Hash) -> Self {
        Self::from_raw(hash_one(source))
    }

    /// A fresh id that won't collide with any other `arbitrary()` id on this thread.
    pub fn arbitrary() -> Self {
        use std::cell::Cell;
        thread_local! {
            static COUNTER: Cell<u64> = const { Cell::new(0) };
        }

        COUNTER.set(COUNTER.get() + 1);
        Self::new((COUNTER.get(), std::thread::current().id()))
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_name = std::any::type_name::<T>();
        let short_name = type_name.rsplit("::").next().unwrap_or(type_name);
        write!(f, "Id::<{short_name}>({:#x})", self.0)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NonZeroU64::deserialize(deserializer).map(Self::from_raw)
    }
}

#[derive(Clone)]
pub struct IdMap<T: 'static, V = T> {
    map: HashMap<Id<T>, V>,
}

impl<T, V> IdMap<T, V> {
    pub fn new() -> Self {
        Self {
            map: Default::default(),
        }
    }

    pub fn has(&self, id: Id<T>) -> bool {
        self.map.contains_key(&id)
    }

    pub fn get(&self, id: Id<T>) -> Option<&V> {
        self.map.get(&id)
    }
    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut V> {
        self.map.get_mut(&id)
    }
    pub fn force_get(&self, id: Id<T>) -> &V {
        match self.get(id) {
            Some(v) => v,
            None => panic!("Nonexistent id: {id:?}"),
        }
    }
    pub fn force_get_mut(&mut self, id: Id<T>) -> &mut V {
        match self.get_mut(id) {
            Some(v) => v,
            None => panic!("Nonexistent id: {id:?}"),
        }
    }
    pub fn insert(&mut self, id: Id<T>, val: V) {
        if self.map.insert(id, val).is_some() {
            panic!("tried to insert already existing id into IdMap");
        }
    }
    pub fn remove(&mut self, id: Id<T>) -> Option<V> {
        self.map.remove(&id)
    }

    pub fn keys(&self) -> impl Iterator<Item = Id<T>> + '_ {
        self.map.keys().copied()
    }
    pub fn values(&self) -> hash_map::Values<'_, Id<T>, V> {
        self.map.values()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &V)> {
        self.map.iter().map(|(&id, v)| (id, v))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T, V> Default for IdMap<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V: Debug> Debug for IdMap<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.map.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, IdMap};

    struct Thing;

    #[test]
    fn test_arbitrary_ids_are_distinct() {
        let a = Id::<Thing>::arbitrary();
        let b = Id::<Thing>::arbitrary();
        assert_ne!(a, b);
        assert_eq!(Id::<Thing>::new("x"), Id::<Thing>::new("x"));
    }

    #[test]
    fn test_id_map() {
        let mut map: IdMap<Thing, u32> = IdMap::new();
        let id = Id::arbitrary();
        map.insert(id, 3);
        assert!(map.has(id));
        assert_eq!(map.get(id), Some(&3));
        *map.force_get_mut(id) += 1;
        assert_eq!(map.remove(id), Some(4));
        assert!(map.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_double_insert_panics() {
        let mut map: IdMap<Thing, u32> = IdMap::new();
        let id = Id::arbitrary();
        map.insert(id, 1);
        map.insert(id, 2);
    }
}
