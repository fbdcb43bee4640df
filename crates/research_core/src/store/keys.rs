//! Per-user storage key resolution.
//!
//! Keys follow `researchManager_<user>_<collection>`. The user name is used
//! verbatim, so two different names always produce disjoint key sets: the
//! collection suffixes differ in their final characters, which rules out a
//! cross-collection match between users.

/// Namespace shared by every key this crate writes.
pub const KEY_NAMESPACE: &str = "researchManager";

/// Global entry holding the last logged-in user name.
pub const LAST_USER_KEY: &str = "researchManager_userName";

/// The three storage keys owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKeys {
    pub papers: String,
    pub journals: String,
    pub conferences: String,
}

impl StorageKeys {
    /// Resolves the keys for `user_name`.
    ///
    /// Total: an empty name yields degenerate but deterministic keys such as
    /// `researchManager__papers`. Rejecting empty names is the caller's job.
    pub fn for_user(user_name: &str) -> Self {
        let prefix = format!("{KEY_NAMESPACE}_{user_name}_");
        Self {
            papers: format!("{prefix}papers"),
            journals: format!("{prefix}journals"),
            conferences: format!("{prefix}conferences"),
        }
    }

    /// Returns all keys in load/save order.
    pub fn all(&self) -> [&str; 3] {
        [
            self.papers.as_str(),
            self.journals.as_str(),
            self.conferences.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::StorageKeys;
    use std::collections::HashSet;

    #[test]
    fn keys_are_namespaced_by_user() {
        let keys = StorageKeys::for_user("ada");
        assert_eq!(keys.papers, "researchManager_ada_papers");
        assert_eq!(keys.journals, "researchManager_ada_journals");
        assert_eq!(keys.conferences, "researchManager_ada_conferences");
    }

    #[test]
    fn same_user_yields_same_keys() {
        assert_eq!(StorageKeys::for_user("grace"), StorageKeys::for_user("grace"));
    }

    #[test]
    fn distinct_users_yield_disjoint_key_sets() {
        let names = [
            "a",
            "b",
            "a_papers",
            "a_journals",
            "a_conferences",
            "papers",
            "a_",
            "_a",
            "A",
            "a b",
            "",
        ];
        let mut seen = HashSet::new();
        for name in names {
            for key in StorageKeys::for_user(name).all() {
                assert!(seen.insert(key.to_string()), "key collision on `{key}`");
            }
        }
    }

    #[test]
    fn empty_user_name_is_deterministic() {
        let keys = StorageKeys::for_user("");
        assert_eq!(keys.papers, "researchManager__papers");
        assert_eq!(keys, StorageKeys::for_user(""));
    }
}
