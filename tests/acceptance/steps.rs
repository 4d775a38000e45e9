use crate::IssuesWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use issues2markdown::github::search::RawIssue;
use issues2markdown::{
    Error, ErrorKind, Issue, IssueSearch, IssueState, PageToken, QueryOptions, RenderOptions,
    SearchPage, fetch_issues, render,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves `page_sizes.len()` pages, numbering issues consecutively from 1.
struct PagedProvider {
    page_sizes: Vec<usize>,
    failing_page: Option<usize>,
    requests: AtomicUsize,
}

impl IssueSearch for PagedProvider {
    async fn search(&self, _query: &str, _page: Option<&PageToken>) -> Result<SearchPage, Error> {
        let page = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_page == Some(page) {
            return Err(Error::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }

        let first = self.page_sizes[..page - 1].iter().sum::<usize>() as u64 + 1;
        let items = (first..first + self.page_sizes[page - 1] as u64)
            .map(|number| RawIssue {
                number: Some(number),
                title: Some(format!("Issue {number}")),
                state: Some(IssueState::Open),
                url: Some(format!(
                    "https://api.github.com/repos/username/repo/issues/{number}"
                )),
                html_url: Some(format!("https://github.com/username/repo/issues/{number}")),
            })
            .collect();
        let next = (page < self.page_sizes.len()).then(|| PageToken(format!("page-{}", page + 1)));

        Ok(SearchPage {
            items,
            total_count: Some(self.page_sizes.iter().sum::<usize>() as u64),
            incomplete_results: false,
            next,
        })
    }
}

fn docstring(step: &Step) -> String {
    step.docstring
        .as_ref()
        .expect("Expected docstring")
        .trim_matches('\n')
        .to_string()
}

#[given(regex = r#"^the organization is "(.*)"$"#)]
async fn given_organization(world: &mut IssuesWorld, organization: String) {
    world.organization = organization;
}

#[when("I build the default query")]
async fn when_build_default_query(world: &mut IssuesWorld) {
    world.query = Some(QueryOptions::new(world.organization.clone()).build_query(""));
}

#[when(regex = r#"^I build a query with the fragment "(.+)"$"#)]
async fn when_build_query_with_fragment(world: &mut IssuesWorld, fragment: String) {
    world.query = Some(QueryOptions::new(world.organization.clone()).build_query(&fragment));
}

#[then(regex = r#"^the query should be "(.*)"$"#)]
async fn then_query_should_be(world: &mut IssuesWorld, expected: String) {
    assert_eq!(world.query.as_deref(), Some(expected.as_str()));
}

#[given(regex = r#"^an? (open|closed|locked) issue #(\d+) "(.*)" in "([^/"]+)/([^"]+)"$"#)]
async fn given_issue(
    world: &mut IssuesWorld,
    state: String,
    number: u64,
    title: String,
    organization: String,
    repository: String,
) {
    world.issues.push(Issue {
        number,
        title,
        state: IssueState::from(state),
        url: format!("https://api.github.com/repos/{organization}/{repository}/issues/{number}"),
        html_url: format!("https://github.com/{organization}/{repository}/issues/{number}"),
    });
}

#[given(regex = r#"^an issue #(\d+) with the API URL "(.*)"$"#)]
async fn given_issue_with_url(world: &mut IssuesWorld, number: u64, url: String) {
    world.issues.push(Issue {
        number,
        title: format!("Issue {number}"),
        state: IssueState::Open,
        url,
        html_url: format!("https://github.com/username/repo/issues/{number}"),
    });
}

#[given("no issues")]
async fn given_no_issues(world: &mut IssuesWorld) {
    world.issues.clear();
}

#[given("the template:")]
async fn given_template(world: &mut IssuesWorld, step: &Step) {
    world.template = Some(docstring(step));
}

#[when("I render the issues")]
async fn when_render_issues(world: &mut IssuesWorld) {
    let options = world
        .template
        .clone()
        .map(|template_source| RenderOptions { template_source })
        .unwrap_or_default();
    world.rendered = Some(render(&world.issues, &options));
}

#[then("the output should be:")]
async fn then_output_should_be(world: &mut IssuesWorld, step: &Step) {
    let expected = docstring(step);
    match world.rendered.as_ref().expect("Nothing was rendered") {
        Ok(output) => assert_eq!(output, &expected),
        Err(err) => panic!("Rendering failed: {err}"),
    }
}

#[then("the output should be empty")]
async fn then_output_should_be_empty(world: &mut IssuesWorld) {
    match world.rendered.as_ref().expect("Nothing was rendered") {
        Ok(output) => assert!(output.is_empty(), "Expected empty output, got:\n{output}"),
        Err(err) => panic!("Rendering failed: {err}"),
    }
}

#[then(regex = r#"^rendering should fail with a (configuration|malformed record) error$"#)]
async fn then_rendering_should_fail(world: &mut IssuesWorld, kind: String) {
    let expected = match kind.as_str() {
        "configuration" => ErrorKind::Configuration,
        _ => ErrorKind::MalformedRecord,
    };
    match world.rendered.as_ref().expect("Nothing was rendered") {
        Ok(output) => panic!("Rendering should have failed but produced:\n{output}"),
        Err(err) => assert_eq!(err.kind(), expected, "Unexpected error: {err}"),
    }
}

#[given(regex = r#"^the provider has (\d+) pages of (\d+) issues each$"#)]
async fn given_provider_pages(world: &mut IssuesWorld, pages: usize, per_page: usize) {
    world.page_sizes = vec![per_page; pages];
}

#[given(regex = r#"^the provider fails on page (\d+)$"#)]
async fn given_provider_fails(world: &mut IssuesWorld, page: usize) {
    world.failing_page = Some(page);
}

#[when("I fetch the issues")]
async fn when_fetch_issues(world: &mut IssuesWorld) {
    let provider = PagedProvider {
        page_sizes: world.page_sizes.clone(),
        failing_page: world.failing_page,
        requests: AtomicUsize::new(0),
    };
    let query = QueryOptions::new(world.organization.clone()).build_query("");
    world.fetched = Some(fetch_issues(&provider, &query).await);
    world.request_count = provider.requests.load(Ordering::SeqCst);
}

#[then(regex = r#"^(\d+) issues should be returned in provider order$"#)]
async fn then_issues_returned(world: &mut IssuesWorld, count: u64) {
    let issues = match world.fetched.as_ref().expect("Nothing was fetched") {
        Ok(issues) => issues,
        Err(err) => panic!("Fetch failed: {err}"),
    };
    let numbers: Vec<u64> = issues.iter().map(|issue| issue.number).collect();
    assert_eq!(numbers, (1..=count).collect::<Vec<u64>>());
}

#[then(regex = r#"^the provider should have received (\d+) requests?$"#)]
async fn then_request_count(world: &mut IssuesWorld, count: usize) {
    assert_eq!(world.request_count, count);
}

#[then("the fetch should fail with a transport error and return no issues")]
async fn then_fetch_fails(world: &mut IssuesWorld) {
    match world.fetched.as_ref().expect("Nothing was fetched") {
        Ok(issues) => panic!("Fetch should have failed but returned {} issues", issues.len()),
        Err(err) => assert_eq!(err.kind(), ErrorKind::Transport),
    }
}
