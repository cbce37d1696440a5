//! Object merge helpers for key-indexed mappings.

use crate::functional::collection::Mapping;

/// Copies every entry of each source into `target`, later sources winning.
///
/// Existing keys in `target` are overwritten. Returns `target` for chaining.
///
/// # Examples
///
/// ```
/// let mut settings = HashMap::from([("key1", "something")]);
/// extend(&mut settings, &[&HashMap::from([("key2", "something new")])]);
/// assert_eq!(settings.len(), 2);
/// ```
pub fn extend<'t, M>(target: &'t mut M, sources: &[&M]) -> &'t mut M
where
    M: Mapping,
    M::Key: Clone,
    M::Value: Clone,
{
    for source in sources {
        for (key, value) in source.entries() {
            target.assign(key.clone(), value.clone());
        }
    }
    target
}

/// Like [`extend`], but never overwrites a key `target` already holds.
///
/// When several sources share a key the first one provides the value.
pub fn defaults<'t, M>(target: &'t mut M, sources: &[&M]) -> &'t mut M
where
    M: Mapping,
    M::Key: Clone,
    M::Value: Clone,
{
    for source in sources {
        for (key, value) in source.entries() {
            if !target.has_key(key) {
                target.assign(key.clone(), value.clone());
            }
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_extend_copies_all_sources() {
        let mut target = HashMap::from([("key1", "something")]);
        let first = HashMap::from([("key2", "something new"), ("key3", "something else new")]);
        let second = HashMap::from([("bla", "even more stuff")]);

        extend(&mut target, &[&first, &second]);

        assert_eq!(target.len(), 4);
        assert_eq!(target.get("key1"), Some(&"something"));
        assert_eq!(target.get("bla"), Some(&"even more stuff"));
    }

    #[test]
    fn test_extend_overwrites_and_last_source_wins() {
        let mut target = BTreeMap::from([("a", 1)]);
        let first = BTreeMap::from([("a", 2), ("b", 2)]);
        let second = BTreeMap::from([("b", 3)]);

        let merged = extend(&mut target, &[&first, &second]);

        assert_eq!(merged.get("a"), Some(&2));
        assert_eq!(merged.get("b"), Some(&3));
    }

    #[test]
    fn test_extend_without_sources_is_noop() {
        let mut target = BTreeMap::from([("a", 1)]);
        extend(&mut target, &[]);
        assert_eq!(target, BTreeMap::from([("a", 1)]));
    }

    #[test]
    fn test_defaults_keeps_existing_keys() {
        let mut target = HashMap::from([("a", 1)]);
        let first = HashMap::from([("a", 10), ("b", 20)]);
        let second = HashMap::from([("b", 30), ("c", 40)]);

        defaults(&mut target, &[&first, &second]);

        assert_eq!(target.get("a"), Some(&1));
        assert_eq!(target.get("b"), Some(&20));
        assert_eq!(target.get("c"), Some(&40));
    }

    #[test]
    fn test_merge_on_persistent_map() {
        let mut target: im::HashMap<String, i32> = im::HashMap::new();
        target.insert("x".to_string(), 1);
        let source: im::HashMap<String, i32> = im::hashmap! {"x".to_string() => 9, "y".to_string() => 2};

        defaults(&mut target, &[&source]);

        assert_eq!(target.get("x"), Some(&1));
        assert_eq!(target.get("y"), Some(&2));
    }
}
