//! Insertion-ordered feature mapping
//!
//! Fingerprint layout is derived from the order features appear in the
//! statistics used to build it, so every keyed collection in statprint keeps
//! an explicit key sequence next to a hash index for lookups.

use ahash::AHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A mapping from feature name to `T` that iterates in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap<T> {
    names: Vec<String>,
    values: Vec<T>,
    index: AHashMap<String, usize>,
}

impl<T> Default for FeatureMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FeatureMap<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            values: Vec::new(),
            index: AHashMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Insert a feature. Re-inserting an existing name replaces the value
    /// in place and keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(&mut self.values[pos], value)),
            None => {
                self.index.insert(name.clone(), self.values.len());
                self.names.push(name);
                self.values.push(value);
                None
            }
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&pos| &self.values[pos])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a feature in the layout
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature names in layout order
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values in layout order
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Transform every value, keeping names and order
    pub fn map_values<U>(&self, mut f: impl FnMut(&str, &T) -> U) -> FeatureMap<U> {
        let values = self.iter().map(|(name, value)| f(name, value)).collect();
        FeatureMap {
            names: self.names.clone(),
            values,
            index: self.index.clone(),
        }
    }

    /// Fallible variant of [`FeatureMap::map_values`]; stops at the first error
    pub fn try_map_values<U, E>(
        &self,
        mut f: impl FnMut(&str, &T) -> Result<U, E>,
    ) -> Result<FeatureMap<U>, E> {
        let values = self
            .iter()
            .map(|(name, value)| f(name, value))
            .collect::<Result<Vec<U>, E>>()?;
        Ok(FeatureMap {
            names: self.names.clone(),
            values,
            index: self.index.clone(),
        })
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for FeatureMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = FeatureMap::with_capacity(iter.size_hint().0);
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<K: Into<String>, T, const N: usize> From<[(K, T); N]> for FeatureMap<T> {
    fn from(pairs: [(K, T); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<T: Serialize> Serialize for FeatureMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FeatureMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
            type Value = FeatureMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of feature names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = FeatureMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, T>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
