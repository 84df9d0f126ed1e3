//! List request options.
//!
//! Encodes paging, sorting and criteria filters into query pairs in a stable
//! order: `page`, `size`, each `sort`, then filters as inserted.

use crate::model::entity::EntityId;
use once_cell::sync::Lazy;
use regex::Regex;

static SORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*(,(asc|desc))?$").expect("valid sort regex")
});

/// Options for `EntityRepository::query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Entries like `title,asc`; sent as one `sort` pair each.
    pub sort: Vec<String>,
    /// Passed through unchanged, e.g. `("seriesId.equals", "3")`.
    pub filters: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based page index.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Page size.
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Appends a sort entry such as `title,asc`; entries keep insertion order.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Appends a raw query pair passed through unchanged.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Adds a criteria filter of the form `<field>.equals=<value>`.
    pub fn equals(self, field: &str, value: impl ToString) -> Self {
        self.filter(format!("{field}.equals"), value.to_string())
    }

    /// Filters series belonging to one characters record.
    pub fn series_by_character(characters_id: EntityId) -> Self {
        Self::new().equals("charactersId", characters_id)
    }

    /// Filters comics belonging to one series.
    pub fn comics_by_series(series_id: EntityId) -> Self {
        Self::new().equals("seriesId", series_id)
    }

    /// Returns the first sort entry that is not `property(,asc|desc)?`.
    pub fn invalid_sort(&self) -> Option<&str> {
        self.sort
            .iter()
            .map(String::as_str)
            .find(|entry| !SORT_RE.is_match(entry.trim()))
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2 + self.sort.len() + self.filters.len());
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        for entry in &self.sort {
            pairs.push(("sort".to_string(), entry.trim().to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::RequestOptions;

    #[test]
    fn encodes_in_stable_order() {
        let options = RequestOptions::new()
            .filter("title.contains", "spider")
            .sort("title,asc")
            .size(20)
            .sort("id")
            .page(2);

        let pairs = options.to_query_pairs();
        let keys = pairs.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["page", "size", "sort", "sort", "title.contains"]);
        assert_eq!(pairs[2].1, "title,asc");
        assert_eq!(pairs[3].1, "id");
        assert_eq!(pairs[4].1, "spider");
    }

    #[test]
    fn empty_options_encode_nothing() {
        assert!(RequestOptions::default().to_query_pairs().is_empty());
    }

    #[test]
    fn criteria_helpers_use_equals_suffix() {
        assert_eq!(
            RequestOptions::series_by_character(7).to_query_pairs(),
            vec![("charactersId.equals".to_string(), "7".to_string())]
        );
        assert_eq!(
            RequestOptions::comics_by_series(3).to_query_pairs(),
            vec![("seriesId.equals".to_string(), "3".to_string())]
        );
    }

    #[test]
    fn invalid_sort_is_reported() {
        let ok = RequestOptions::new().sort("series.name,desc").sort("id");
        assert_eq!(ok.invalid_sort(), None);

        let bad = RequestOptions::new().sort("id").sort("title;drop");
        assert_eq!(bad.invalid_sort(), Some("title;drop"));

        let bad_direction = RequestOptions::new().sort("id,sideways");
        assert_eq!(bad_direction.invalid_sort(), Some("id,sideways"));
    }
}
