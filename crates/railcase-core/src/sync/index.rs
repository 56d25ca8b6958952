//! Title to case-ID index over the remote catalog.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::remote::{Case, Catalog, RemoteError, ResultBatch, TitledResult};

/// Maps case titles to remote case IDs.
///
/// Built once per invocation from a single `get_cases` listing and passed
/// to whatever needs lookups. When the catalog holds several cases with the
/// same title the last one listed wins; the clashing titles are kept in
/// [`CaseIdIndex::duplicates`].
#[derive(Debug, Clone, Default)]
pub struct CaseIdIndex {
    by_title: HashMap<String, u64>,
    duplicates: Vec<String>,
}

impl CaseIdIndex {
    /// Build an index from a case listing.
    pub fn from_cases(cases: &[Case]) -> Self {
        let mut index = Self::default();
        for case in cases {
            if let Some(previous) = index.by_title.insert(case.title.clone(), case.id) {
                warn!(title = %case.title, previous, replaced_by = case.id, "duplicate case title");
                if !index.duplicates.contains(&case.title) {
                    index.duplicates.push(case.title.clone());
                }
            }
        }
        index
    }

    /// Load every case of a project suite.
    pub async fn load(
        catalog: &dyn Catalog,
        project_id: u64,
        suite_id: u64,
    ) -> Result<Self, RemoteError> {
        let cases = catalog.get_cases(project_id, suite_id).await?;
        let index = Self::from_cases(&cases);
        info!(project_id, suite_id, cases = index.len(), "loaded case index");
        Ok(index)
    }

    pub fn get(&self, title: &str) -> Option<u64> {
        self.by_title.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// Titles that appeared more than once in the listing.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Every case ID, ascending.
    pub fn all_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.by_title.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Resolve titles to IDs. Returns the IDs found and the titles that were not.
    pub fn ids_for<'a, I>(&self, titles: I) -> (Vec<u64>, Vec<String>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids = Vec::new();
        let mut missing = Vec::new();
        for title in titles {
            match self.get(title) {
                Some(id) => ids.push(id),
                None => missing.push(title.to_string()),
            }
        }
        (ids, missing)
    }

    /// Turn title-keyed results into a batch. Unknown titles are returned
    /// separately.
    pub fn resolve_results(&self, titled: Vec<TitledResult>) -> (ResultBatch, Vec<String>) {
        let mut results = Vec::with_capacity(titled.len());
        let mut missing = Vec::new();
        for result in titled {
            match self.get(&result.title) {
                Some(id) => results.push(result.with_case_id(id)),
                None => missing.push(result.title),
            }
        }
        (ResultBatch::new(results), missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: u64, title: &str) -> Case {
        Case {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_lookup() {
        let index = CaseIdIndex::from_cases(&[case(10, "TestA"), case(11, "TestA/sub")]);
        assert_eq!(index.get("TestA"), Some(10));
        assert_eq!(index.get("TestA/sub"), Some(11));
        assert_eq!(index.get("TestB"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_duplicate_titles_last_wins() {
        let index = CaseIdIndex::from_cases(&[case(1, "TestA"), case(2, "TestA"), case(3, "TestA")]);
        assert_eq!(index.get("TestA"), Some(3));
        assert_eq!(index.duplicates(), &["TestA".to_string()]);
    }

    #[test]
    fn test_ids_for_reports_missing() {
        let index = CaseIdIndex::from_cases(&[case(1, "TestA"), case(2, "TestB")]);
        let (ids, missing) = index.ids_for(["TestB", "TestZ", "TestA"]);
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(missing, vec!["TestZ".to_string()]);
        assert_eq!(index.all_ids(), vec![1, 2]);
    }

    #[test]
    fn test_resolve_results() {
        let index = CaseIdIndex::from_cases(&[case(5, "TestA")]);
        let titled = vec![
            TitledResult {
                title: "TestA".into(),
                status_id: 1,
                ..Default::default()
            },
            TitledResult {
                title: "TestGone".into(),
                status_id: 5,
                ..Default::default()
            },
        ];
        let (batch, missing) = index.resolve_results(titled);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.results[0].case_id, 5);
        assert_eq!(missing, vec!["TestGone".to_string()]);
    }
}
