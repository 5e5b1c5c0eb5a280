use std::collections::hash_map;
use std::collections::HashMap;

/// Variable values of one evaluation context.
///
/// Values persist across evaluations until they are reassigned or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or overwrites `name`, returning the previous value.
    pub fn assign(&mut self, name: &str, value: f64) -> Option<f64> {
        match self.values.get_mut(name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.values.insert(name.to_string(), value);
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bindings in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, f64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), *value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a str, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        bindings.extend(iter);
        bindings
    }
}

impl<S: AsRef<str>> Extend<(S, f64)> for Bindings {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.assign(name.as_ref(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_overwrites() {
        let mut bindings = Bindings::new();
        assert_eq!(bindings.assign("x", 1.0), None);
        assert_eq!(bindings.assign("x", 2.0), Some(1.0));
        assert_eq!(bindings.get("x"), Some(2.0));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut bindings: Bindings = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert!(bindings.contains("a"));
        assert_eq!(bindings.remove("a"), Some(1.0));
        assert_eq!(bindings.remove("a"), None);
        assert!(!bindings.contains("a"));
        bindings.clear();
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_iteration() {
        let bindings: Bindings = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        let mut pairs: Vec<_> = bindings.iter().collect();
        pairs.sort_by(|l, r| l.0.cmp(r.0));
        assert_eq!(pairs, vec![("a", 1.0), ("b", 2.0)]);
        assert_eq!((&bindings).into_iter().count(), 2);
    }
}
