//! Priority ordered route collection.

use std::fmt;

use crate::route::Route;

struct Entry<R: ?Sized> {
    name: String,
    route: Box<R>,
    priority: i32,
}

/// Named routes ordered by priority.
///
/// Iteration yields higher priorities first; among equal priorities the most
/// recently inserted route comes first. Names are unique: inserting an
/// existing name replaces that entry and moves it to the front of its
/// priority.
pub struct RouteOrder<R: ?Sized = dyn Route> {
    entries: Vec<Entry<R>>,
}

impl<R: ?Sized> Default for RouteOrder<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R: ?Sized> RouteOrder<R> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a route, replacing any route with the same name.
    pub fn insert(&mut self, name: impl Into<String>, route: Box<R>, priority: i32) {
        let name = name.into();
        self.remove(&name);

        // Ahead of every entry of the same priority.
        let index = self
            .entries
            .iter()
            .position(|existing| existing.priority <= priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            Entry {
                name,
                route,
                priority,
            },
        );
    }

    /// Removes a route by name, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Box<R>> {
        let index = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(index).route)
    }

    /// Returns a route by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&R> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &*entry.route)
    }

    /// Returns a route by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut R> {
        self.entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .map(|entry| &mut *entry.route)
    }

    /// Returns true if a route with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Removes all routes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, route)` pairs in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &*entry.route))
    }

    /// Route names in matching order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }
}

impl<R: ?Sized + fmt::Debug> fmt::Debug for RouteOrder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| {
                (
                    &entry.name,
                    entry.priority,
                    &entry.route,
                )
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(entries: &[(&str, i32)]) -> RouteOrder<str> {
        let mut order = RouteOrder::new();
        for (name, priority) in entries {
            order.insert(*name, Box::from(*name), *priority);
        }
        order
    }

    #[test]
    fn test_priority_then_recency() {
        let order = order(&[("a", 1), ("b", 2), ("c", 1)]);
        assert_eq!(order.names(), ["b", "c", "a"]);
    }

    #[test]
    fn test_equal_priority_is_most_recent_first() {
        let order = order(&[("a", 0), ("b", 0), ("c", 0)]);
        assert_eq!(order.names(), ["c", "b", "a"]);
    }

    #[test]
    fn test_negative_priority_goes_last() {
        let order = order(&[("low", -1), ("default", 0), ("high", 5)]);
        assert_eq!(order.names(), ["high", "default", "low"]);
    }

    #[test]
    fn test_insert_replaces_and_refreshes() {
        let mut order = order(&[("a", 0), ("b", 0)]);
        order.insert("a", Box::from("replaced"), 0);
        assert_eq!(order.len(), 2);
        assert_eq!(order.names(), ["a", "b"]);
        assert_eq!(order.get("a"), Some("replaced"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut order = order(&[("a", 0), ("b", 0)]);
        assert_eq!(order.remove("a").as_deref(), Some("a"));
        assert!(order.remove("a").is_none());
        assert!(!order.contains("a"));
        assert!(order.contains("b"));

        order.clear();
        assert!(order.is_empty());
    }

    #[test]
    fn test_iter_yields_routes() {
        let order = order(&[("a", 0), ("b", 1)]);
        let routes: Vec<_> = order.iter().map(|(_, route)| route).collect();
        assert_eq!(routes, ["b", "a"]);
    }
}
