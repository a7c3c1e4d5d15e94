//! Set reconciliation for alias membership
//!
//! Both operations are pure and have set semantics: duplicates collapse and
//! the output order carries no meaning. An alias with no stored record is
//! passed in as an empty `existing` set.

use crate::domain::entities::MemberSet;

/// Union of `existing` and `incoming`
pub fn merge(existing: &MemberSet, incoming: &MemberSet) -> MemberSet {
    existing.iter().chain(incoming.iter()).cloned().collect()
}

/// Members of `existing` not listed in `to_remove`. Ids in `to_remove`
/// that were never members are ignored.
pub fn subtract(existing: &MemberSet, to_remove: &MemberSet) -> MemberSet {
    existing
        .iter()
        .filter(|id| !to_remove.contains(id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> MemberSet {
        ids.iter().copied().collect()
    }

    fn samples() -> Vec<MemberSet> {
        vec![
            set(&[]),
            set(&["1"]),
            set(&["1", "2"]),
            set(&["2", "3", "4"]),
            set(&["4", "4", "5"]),
            set(&["10", "20", "30", "1"]),
        ]
    }

    #[test]
    fn test_merge_is_union() {
        for a in samples() {
            for b in samples() {
                let merged = merge(&a, &b);
                for id in a.iter().chain(b.iter()) {
                    assert!(merged.contains(id), "{} missing from merge({}, {})", id, a, b);
                }
                assert!(merged.iter().all(|id| a.contains(id) || b.contains(id)));
            }
        }
    }

    #[test]
    fn test_merge_is_commutative_and_idempotent() {
        for a in samples() {
            assert_eq!(merge(&a, &a), a);
            for b in samples() {
                assert_eq!(merge(&a, &b), merge(&b, &a));
            }
        }
    }

    #[test]
    fn test_merge_into_absent_alias() {
        assert_eq!(merge(&MemberSet::new(), &set(&["7"])), set(&["7"]));
    }

    #[test]
    fn test_subtract_identities() {
        for a in samples() {
            assert_eq!(subtract(&a, &MemberSet::new()), a);
            assert!(subtract(&a, &a).is_empty());
        }
    }

    #[test]
    fn test_subtract_ignores_unknown_ids() {
        let a = set(&["1", "2"]);
        assert_eq!(subtract(&a, &set(&["99", "100"])), a);
        assert_eq!(subtract(&a, &set(&["2", "99"])), set(&["1"]));
        assert!(subtract(&MemberSet::new(), &set(&["1"])).is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_previous_set() {
        let before = set(&["1", "2"]);
        let incoming = set(&["3", "4"]);
        assert_eq!(subtract(&merge(&before, &incoming), &incoming), before);
    }
}
