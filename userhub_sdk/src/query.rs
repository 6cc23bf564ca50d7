//! Query builder for user listings.

use restkit::toolkit::to_camelcase;

/// Sort order for listing results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Oldest accounts first.
    Asc,
    /// Newest accounts first. This is the default.
    #[default]
    Desc,
}

/// Filters and pagination for [`list_users`](crate::UserHubClient::list_users).
#[derive(Clone, Debug, Default)]
pub struct UserQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub active: Option<bool>,
    pub sort_direction: SortDirection,
}

impl UserQuery {
    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the number of results per page.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Free-text search over names and email addresses.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Filters by account status.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Sets the sort direction over creation time.
    pub fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    /// Query pairs in the API's camelCase naming.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push((to_camelcase("page"), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push((to_camelcase("page_size"), page_size.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push((to_camelcase("search"), search.clone()));
        }
        if let Some(active) = self.active {
            pairs.push((to_camelcase("is_active"), active.to_string()));
        }
        let sort = match self.sort_direction {
            SortDirection::Asc => to_camelcase("created_at"),
            SortDirection::Desc => format!("-{}", to_camelcase("created_at")),
        };
        pairs.push(("sort".to_string(), sort));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::{SortDirection, UserQuery};

    fn pair(pairs: &[(String, String)], key: &str) -> Option<String> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    #[test]
    fn default_query_only_sorts() {
        let pairs = UserQuery::default().to_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pair(&pairs, "sort").unwrap(), "-createdAt");
    }

    #[test]
    fn pagination_and_filters_use_camelcase_keys() {
        let pairs = UserQuery::default()
            .with_page(3)
            .with_page_size(50)
            .with_search("ada")
            .with_active(true)
            .to_pairs();
        assert_eq!(pair(&pairs, "page").unwrap(), "3");
        assert_eq!(pair(&pairs, "pageSize").unwrap(), "50");
        assert_eq!(pair(&pairs, "search").unwrap(), "ada");
        assert_eq!(pair(&pairs, "isActive").unwrap(), "true");
    }

    #[test]
    fn ascending_sort_drops_the_prefix() {
        let pairs = UserQuery::default()
            .with_sort_direction(SortDirection::Asc)
            .to_pairs();
        assert_eq!(pair(&pairs, "sort").unwrap(), "createdAt");
    }
}
