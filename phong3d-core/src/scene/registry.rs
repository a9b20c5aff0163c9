use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Named resources kept in insertion order.
///
/// Insertion order is acquisition order, so [`Registry::release_all`] can tear down in reverse.
pub struct Registry<T> {
    kind: &'static str,
    items: IndexMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: IndexMap::new(),
        }
    }

    /// Adds `item` under `name`. An existing entry is left untouched and an error returned.
    pub fn insert(&mut self, name: impl Into<String>, item: T) -> Result<()> {
        let name = name.into();
        if self.items.contains_key(&name) {
            return Err(Error::Config(format!("duplicate {} name '{name}'", self.kind)));
        }
        self.items.insert(name, item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&T> {
        self.items.get(name).ok_or_else(|| Error::not_found(self.kind, name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T> {
        let kind = self.kind;
        self.items.get_mut(name).ok_or_else(|| Error::not_found(kind, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.items.first_mut().map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(name, item)| (name.as_str(), item))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every entry, newest first.
    pub fn release_all(&mut self) {
        while let Some((name, item)) = self.items.pop() {
            log::trace!("releasing {} '{name}'", self.kind);
            drop(item);
        }
    }
}
