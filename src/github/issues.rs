use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    /// API resource URL, e.g. `https://api.github.com/repos/{org}/{repo}/issues/{number}`.
    pub url: String,
    pub html_url: String,
}

/// Issue state; values other than `open` and `closed` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    Open,
    Closed,
    Other(String),
}

impl IssueState {
    pub fn as_str(&self) -> &str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::Other(state) => state,
        }
    }
}

impl From<String> for IssueState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "open" => IssueState::Open,
            "closed" => IssueState::Closed,
            _ => IssueState::Other(state),
        }
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl Issue {
    /// Returns `(organization, repository)` taken from the two path segments
    /// following `repos` in the API URL.
    pub fn location(&self) -> Result<(String, String)> {
        let malformed = || Error::MalformedIssueUrl {
            url: self.url.clone(),
        };
        let parsed = reqwest::Url::parse(&self.url).map_err(|_| malformed())?;
        let segments: Vec<&str> = parsed.path_segments().ok_or_else(malformed)?.collect();

        segments
            .iter()
            .position(|segment| *segment == "repos")
            .and_then(|pos| Some((segments.get(pos + 1)?, segments.get(pos + 2)?)))
            .filter(|(organization, repository)| !organization.is_empty() && !repository.is_empty())
            .map(|(organization, repository)| (organization.to_string(), repository.to_string()))
            .ok_or_else(malformed)
    }

    pub fn organization(&self) -> Result<String> {
        self.location().map(|(organization, _)| organization)
    }

    pub fn repository(&self) -> Result<String> {
        self.location().map(|(_, repository)| repository)
    }
}
