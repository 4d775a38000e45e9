pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod output;
pub mod query;
pub mod render;
pub mod run;
pub mod storage;
pub mod whoami;

pub use error::{Error, ErrorKind};
pub use github::issues::{Issue, IssueState};
pub use github::search::{IssueSearch, PageToken, SearchPage, fetch_issues};
pub use query::QueryOptions;
pub use render::{RenderOptions, Renderer, render};
