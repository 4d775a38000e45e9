use crate::error::{Error, Result};
use crate::github::issues::Issue;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

/// Renders one checklist line per issue, checked when the issue is closed.
pub const DEFAULT_ISSUE_TEMPLATE: &str = r#"{% for issue in issues %}- [{% if issue.state == "closed" %}x{% else %} {% endif %}] {{ issue.organization }}/{{ issue.repository }} : [#{{ issue.number }} {{ issue.title }}]({{ issue.html_url }})
{% endfor %}"#;

const TEMPLATE_NAME: &str = "issues.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub template_source: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            template_source: DEFAULT_ISSUE_TEMPLATE.to_string(),
        }
    }
}

/// What a template sees for each issue.
#[derive(Serialize, Debug)]
struct IssueView<'a> {
    number: u64,
    title: &'a str,
    state: &'a str,
    url: &'a str,
    html_url: &'a str,
    organization: String,
    repository: String,
}

impl<'a> IssueView<'a> {
    fn new(issue: &'a Issue) -> Result<Self> {
        let (organization, repository) = issue.location()?;
        Ok(IssueView {
            number: issue.number,
            title: &issue.title,
            state: issue.state.as_str(),
            url: &issue.url,
            html_url: &issue.html_url,
            organization,
            repository,
        })
    }
}

/// A compiled issue list template.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Compiles the template, so syntax errors surface before any fetch.
    pub fn new(options: &RenderOptions) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(TEMPLATE_NAME, options.template_source.clone())
            .map_err(Error::Template)?;
        Ok(Renderer { env })
    }

    /// Renders the whole issue list in one template execution.
    ///
    /// Trailing line breaks are removed, so zero issues render as `""` with
    /// the default template.
    pub fn render(&self, issues: &[Issue]) -> Result<String> {
        let views = issues
            .iter()
            .map(IssueView::new)
            .collect::<Result<Vec<_>>>()?;
        let template = self.env.get_template(TEMPLATE_NAME).map_err(Error::Render)?;
        let rendered = template
            .render(context! { issues => views })
            .map_err(Error::Render)?;
        Ok(rendered.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Compiles `options` and renders `issues` with it.
pub fn render(issues: &[Issue], options: &RenderOptions) -> Result<String> {
    Renderer::new(options)?.render(issues)
}
