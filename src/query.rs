/// Every query is restricted to issues.
pub const DEFAULT_QUERY_PREFIX: &str = "type:issue";

/// Options used to build the default search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub organization: String,
}

impl QueryOptions {
    pub fn new(organization: impl Into<String>) -> Self {
        QueryOptions {
            organization: organization.into(),
        }
    }

    /// Builds the search query string.
    ///
    /// An empty `fragment` selects the default query: open, non-archived
    /// issues authored by `organization`. A non-empty `fragment` replaces the
    /// default filters entirely and is appended verbatim after the issue type
    /// filter; it is not validated here.
    pub fn build_query(&self, fragment: &str) -> String {
        if fragment.is_empty() {
            return format!(
                "{DEFAULT_QUERY_PREFIX} is:open author:{} archived:false",
                self.organization
            );
        }
        format!("{DEFAULT_QUERY_PREFIX} {fragment}")
    }
}
