use serde::{Deserialize, Serialize};

/// Ordered set of distinct personnel names.
///
/// Bulk merges keep the existing order and append unseen names; duplicates
/// are absorbed silently. Blank or whitespace-only entries are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonnelRoster {
    names: Vec<String>,
}

impl PersonnelRoster {
    pub fn new(names: Vec<String>) -> Self {
        let mut roster = Self::default();
        roster.merge(names);
        roster
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Merge incoming names, returning how many were actually added.
    pub fn merge(&mut self, incoming: Vec<String>) -> usize {
        let mut added = 0;
        for name in incoming {
            let trimmed = name.trim();
            if trimmed.is_empty() || self.contains(trimmed) {
                continue;
            }
            self.names.push(trimmed.to_string());
            added += 1;
        }
        added
    }

    /// Remove one name; true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn merge_preserves_existing_order_and_appends_new() {
        let mut roster = PersonnelRoster::new(names(&["Jordan Reyes", "Casey Lin"]));

        let added = roster.merge(names(&["Casey Lin", "Avery Shah"]));

        assert_eq!(added, 1);
        assert_eq!(
            roster.names(),
            &["Jordan Reyes", "Casey Lin", "Avery Shah"]
        );
    }

    #[test]
    fn merge_trims_and_skips_blank_entries() {
        let mut roster = PersonnelRoster::default();

        let added = roster.merge(names(&["  Jordan Reyes ", "", "   "]));

        assert_eq!(added, 1);
        assert_eq!(roster.names(), &["Jordan Reyes"]);
    }

    #[test]
    fn duplicates_within_one_merge_are_absorbed() {
        let mut roster = PersonnelRoster::default();

        roster.merge(names(&["Avery Shah", "Avery Shah"]));

        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut roster = PersonnelRoster::new(names(&["Jordan Reyes"]));

        assert!(roster.remove("Jordan Reyes"));
        assert!(!roster.remove("Jordan Reyes"));
        assert!(roster.is_empty());
    }
}
