//! Recipient sets for To, CC and BCC

/// A set of addressee strings
///
/// Exact duplicates are dropped. First-seen order is kept for display only;
/// equality ignores it.
#[derive(Debug, Clone, Default, Eq)]
pub struct RecipientSet {
    addresses: Vec<String>,
}

impl RecipientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a == address)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.addresses.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.addresses
    }

    fn insert(&mut self, address: String) {
        if !self.contains(&address) {
            self.addresses.push(address);
        }
    }
}

impl PartialEq for RecipientSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|a| other.contains(a))
    }
}

impl<S: Into<String>> FromIterator<S> for RecipientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for address in iter {
            set.insert(address.into());
        }
        set
    }
}

impl<'a> IntoIterator for &'a RecipientSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_dropped() {
        let set: RecipientSet = ["a@test.com", "b@test.com", "a@test.com"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), ["a@test.com", "b@test.com"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let left: RecipientSet = ["a@test.com", "b@test.com"].into_iter().collect();
        let right: RecipientSet = ["b@test.com", "a@test.com"].into_iter().collect();
        assert_eq!(left, right);

        let other: RecipientSet = ["a@test.com"].into_iter().collect();
        assert_ne!(left, other);
    }

    #[test]
    fn test_empty_set() {
        let set: RecipientSet = std::iter::empty::<String>().collect();
        assert!(set.is_empty());
        assert!(!set.contains("a@test.com"));
    }
}
