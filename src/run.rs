use crate::cli;
use crate::config::{self, ConfigKey};
use crate::github::client::GitHubClient;
use crate::github::search::fetch_issues;
use crate::output;
use crate::query::QueryOptions;
use crate::render::{RenderOptions, Renderer};
use crate::storage::{self, TokenStorage};
use anyhow::Context;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Render {
            query,
            organization,
            template,
        } => {
            let markdown = render_issues(&query, organization, template).await?;
            output::println(&markdown, &mut stdout_additional)?;
        }
        cli::parser::Command::Whoami => {
            let settings = load_settings(HashMap::new())?;
            let client = authenticated_client(&settings.api_url)?;
            let login = client.whoami().await?;
            output::println(&login, &mut stdout_additional)?;
        }
        cli::parser::Command::Login { token } => {
            let settings = load_settings(HashMap::new())?;
            let client = GitHubClient::new(&settings.api_url, token.trim())?;
            let login = client
                .whoami()
                .await
                .context("Token was rejected by GitHub")?;
            storage::FileTokenStorage::new()?
                .save(token.trim())
                .context("Failed to save token")?;
            output::println(
                &format!("✓ Logged in as {login}"),
                &mut stdout_additional,
            )?;
        }
        cli::parser::Command::Logout => {
            storage::FileTokenStorage::new()?
                .delete()
                .context("Failed to delete token")?;
            output::println("✓ Logged out", &mut stdout_additional)?;
        }
        cli::parser::Command::Help(text) => {
            output::println(text.trim_end(), &mut stdout_additional)?;
        }
        cli::parser::Command::Invalid(message) => {
            return Err(anyhow::anyhow!(message.trim_end().to_string()));
        }
    }
    Ok(())
}

/// Runs the whole pipeline: template compile, authentication, query, fetch, render.
async fn render_issues(
    query: &str,
    organization: Option<String>,
    template: Option<PathBuf>,
) -> anyhow::Result<String> {
    let mut overrides = HashMap::new();
    if let Some(organization) = organization {
        overrides.insert(ConfigKey::Organization, Value::String(organization));
    }
    if let Some(template) = template {
        overrides.insert(
            ConfigKey::Template,
            Value::String(template.to_string_lossy().into_owned()),
        );
    }
    let settings = load_settings(overrides)?;

    // A broken template must fail before any network traffic.
    let options = match &settings.template {
        Some(path) => RenderOptions {
            template_source: std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?,
        },
        None => RenderOptions::default(),
    };
    let renderer = Renderer::new(&options)?;

    let client = authenticated_client(&settings.api_url)?;
    let login = client.whoami().await?;
    info!(login = %login, "Created authenticated GitHub API client");

    let organization = settings.organization.unwrap_or(login);
    let query = QueryOptions::new(organization).build_query(query);
    let issues = fetch_issues(&client, &query).await?;
    info!(count = issues.len(), "Fetched issues");

    Ok(renderer.render(&issues)?)
}

fn load_settings(overrides: HashMap<ConfigKey, Value>) -> anyhow::Result<config::Settings> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let file_config = config::load_project_config(&cwd)?;
    Ok(config::resolve_settings(&config::update_config(
        &file_config,
        &overrides,
    ))?)
}

fn authenticated_client(api_url: &str) -> anyhow::Result<GitHubClient> {
    let storage = storage::FileTokenStorage::new()?;
    let token = storage::resolve_token(std::env::var(storage::TOKEN_ENV_VAR).ok(), &storage)?
        .ok_or_else(|| crate::error::Error::Authentication {
            message: format!(
                "No token found. Set {} or run `login --token <TOKEN>` first.",
                storage::TOKEN_ENV_VAR
            ),
        })?;
    Ok(GitHubClient::new(api_url, token)?)
}
