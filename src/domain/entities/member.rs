use std::collections::BTreeSet;
use std::fmt;

/// Opaque platform user id, kept in its string form
pub type MemberId = String;

/// Separator used when an alias is flattened into a single stored value.
/// Ids containing it are never admitted into a set.
pub const MEMBER_DELIMITER: char = '|';

/// The members behind an alias
///
/// Duplicates collapse on insert. Iteration order is an implementation
/// detail and must not be relied upon by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    ids: BTreeSet<MemberId>,
}

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Returns false when the id was already present or is not
    /// storable (empty, or containing the delimiter).
    pub fn insert(&mut self, id: impl Into<MemberId>) -> bool {
        let id = id.into();
        if !Self::is_storable(&id) {
            tracing::debug!("Dropping unstorable member id {:?}", id);
            return false;
        }
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberId> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<MemberId> {
        self.ids.iter().cloned().collect()
    }

    fn is_storable(id: &str) -> bool {
        !id.is_empty() && !id.contains(MEMBER_DELIMITER)
    }
}

impl<S: Into<MemberId>> FromIterator<S> for MemberSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = MemberSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MemberSet {
    type Item = &'a MemberId;
    type IntoIter = std::collections::btree_set::Iter<'a, MemberId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl fmt::Display for MemberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let set: MemberSet = ["7", "7", "8"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("7"));
        assert!(set.contains("8"));
    }

    #[test]
    fn test_unstorable_ids_are_dropped() {
        let mut set = MemberSet::new();
        assert!(!set.insert(""));
        assert!(!set.insert("12|34"));
        assert!(set.insert("1234"));
        assert_eq!(set.to_vec(), vec!["1234".to_string()]);
    }

    #[test]
    fn test_display() {
        let set: MemberSet = ["b", "a"].into_iter().collect();
        assert_eq!(set.to_string(), "{a, b}");
        assert_eq!(MemberSet::new().to_string(), "{}");
    }
}
