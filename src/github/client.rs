use crate::error::{Error, Result};
use crate::github::search::{IssueSearch, PageToken, RawIssue, SearchPage};
use crate::whoami;
use reqwest::header::{HeaderMap, LINK, RETRY_AFTER};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "issues2markdown";
const ACCEPT: &str = "application/vnd.github+json";
const PER_PAGE: &str = "100";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Authenticated client for the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    token: String,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    total_count: Option<u64>,
    #[serde(default)]
    incomplete_results: bool,
    #[serde(default)]
    items: Vec<RawIssue>,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    message: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'.
        let normalized = format!("{}/", api_url.trim_end_matches('/'));
        let api_url = Url::parse(&normalized)
            .map_err(|e| Error::configuration(format!("Invalid API URL '{api_url}': {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GitHubClient {
            http,
            api_url,
            token: token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| Error::configuration(format!("Invalid API path '{path}': {e}")))
    }

    async fn get(&self, request: reqwest::RequestBuilder) -> Result<(HeaderMap, String)> {
        let response = request
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if status.is_success() {
            Ok((headers, body))
        } else {
            Err(classify_failure(status, &headers, &body))
        }
    }

    /// Returns the login of the authenticated user.
    pub async fn whoami(&self) -> Result<String> {
        let (_, body) = self.get(self.http.get(self.endpoint("user")?)).await?;
        whoami::extract_login_from_user_response(&body).map_err(|message| {
            Error::Authentication { message }
        })
    }
}

impl IssueSearch for GitHubClient {
    async fn search(&self, query: &str, page: Option<&PageToken>) -> Result<SearchPage> {
        let request = match page {
            Some(PageToken(next)) => self.http.get(next.as_str()),
            None => self
                .http
                .get(self.endpoint("search/issues")?)
                .query(&[("q", query), ("per_page", PER_PAGE)]),
        };
        let (headers, body) = self.get(request).await?;

        let response: SearchResponse =
            serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
                message: e.to_string(),
            })?;
        let next = headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_next_link)
            .map(PageToken);
        debug!(has_next = next.is_some(), "Decoded search response");

        Ok(SearchPage {
            items: response.items,
            total_count: response.total_count,
            incomplete_results: response.incomplete_results,
            next,
        })
    }
}

/// Extracts the `rel="next"` target from a `Link` header value.
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Maps a non-success response onto the error taxonomy.
pub fn classify_failure(status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
    let retry_after = headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED => Error::Authentication {
            message: format!("{message}. Check GITHUB_TOKEN or run `login` again."),
        },
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited { retry_after },
        StatusCode::FORBIDDEN if exhausted || retry_after.is_some() => {
            Error::RateLimited { retry_after }
        }
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}
