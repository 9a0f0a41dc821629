// src/crawl/visited.rs
// Pages already fetched during one crawl call. Shared by every seed of the
// call and dropped when the call returns.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited. Returns false if it already was.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_first_visit_only() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert("https://a.test"));
        assert!(!visited.insert("https://a.test"));
        assert!(visited.contains("https://a.test"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_urls_are_compared_as_strings() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert("https://a.test"));
        assert!(visited.insert("https://a.test/"));
        assert_eq!(visited.len(), 2);
    }
}
