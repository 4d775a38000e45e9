use crate::error::{Error, Result};
use crate::github::issues::{Issue, IssueState};
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info, warn};

/// Opaque continuation handed back by the provider to request the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken(pub String);

/// One record of the provider's search response, before validation.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawIssue {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub state: Option<IssueState>,
    pub url: Option<String>,
    pub html_url: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub items: Vec<RawIssue>,
    pub total_count: Option<u64>,
    pub incomplete_results: bool,
    pub next: Option<PageToken>,
}

/// Issue search capability of a provider.
///
/// `page` is `None` for the first request and the token returned by the
/// previous page afterwards.
pub trait IssueSearch {
    fn search(
        &self,
        query: &str,
        page: Option<&PageToken>,
    ) -> impl Future<Output = Result<SearchPage>> + Send;
}

/// Converts a raw record into an [`Issue`], failing on the first missing field.
pub fn parse_issue(raw: RawIssue, index: usize) -> Result<Issue> {
    let missing = |field: &str| Error::MalformedRecord {
        index,
        message: format!("missing required field `{field}`"),
    };

    Ok(Issue {
        number: raw.number.ok_or_else(|| missing("number"))?,
        title: raw.title.ok_or_else(|| missing("title"))?,
        state: raw.state.ok_or_else(|| missing("state"))?,
        url: raw.url.ok_or_else(|| missing("url"))?,
        html_url: raw.html_url.ok_or_else(|| missing("html_url"))?,
    })
}

/// Runs `query` against `search`, following next-page tokens until the
/// provider stops returning one.
///
/// Issues keep the provider's order across pages. Any failure aborts the
/// whole fetch and nothing collected so far is returned.
pub async fn fetch_issues<S>(search: &S, query: &str) -> Result<Vec<Issue>>
where
    S: IssueSearch,
{
    let mut all_issues = Vec::new();
    let mut next: Option<PageToken> = None;
    let mut page = 1;

    loop {
        let results = search.search(query, next.as_ref()).await?;

        if page == 1 {
            info!(query, total = ?results.total_count, "Search query executed");
        }
        if results.incomplete_results {
            warn!(page, "Provider reported incomplete search results");
        }
        debug!(page, items = results.items.len(), "Fetched search page");

        let offset = all_issues.len();
        for (i, raw) in results.items.into_iter().enumerate() {
            all_issues.push(parse_issue(raw, offset + i)?);
        }

        match results.next {
            Some(token) => {
                next = Some(token);
                page += 1;
            }
            None => break,
        }
    }

    Ok(all_issues)
}
