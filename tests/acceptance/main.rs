use cucumber::World;
use issues2markdown::{Error, Issue};

#[derive(Debug, Default, World)]
pub struct IssuesWorld {
    pub organization: String,
    pub query: Option<String>,
    pub issues: Vec<Issue>,
    pub template: Option<String>,
    pub rendered: Option<Result<String, Error>>,
    pub page_sizes: Vec<usize>,
    pub failing_page: Option<usize>,
    pub fetched: Option<Result<Vec<Issue>, Error>>,
    pub request_count: usize,
}

#[tokio::main]
async fn main() {
    IssuesWorld::run("features").await;
}

mod steps;
