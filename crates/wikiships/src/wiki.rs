//! MediaWiki API client: page fetching, login and edits.

use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Result, WikishipsError};

/// Titles per `action=query` request; the API caps batches at 50.
const BATCH_SIZE: usize = 50;

/// Wiki endpoint and pacing configuration.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Full URL of `api.php`.
    pub api_url: String,
    /// Pause between request batches.
    pub delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://wiki.eveuniversity.org/w/api.php".to_string(),
            delay: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Blocking MediaWiki client.
///
/// Fetching works anonymously; editing requires [`login`](Self::login) first.
pub struct WikiClient {
    client: Client,
    config: WikiConfig,
    edit_token: Option<String>,
    logged_in: bool,
}

impl WikiClient {
    /// Create a client for the configured wiki.
    pub fn new(config: WikiConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            edit_token: None,
            logged_in: false,
        })
    }

    /// Whether a login has succeeded on this client.
    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Fetch pages in raw wikitext, batching titles and pacing requests.
    ///
    /// Returns the fetched `{title: content}` map plus the titles the wiki
    /// reports as having no page. The first batch is never delayed. A failed
    /// batch is logged and skipped; it never aborts the remaining batches.
    pub fn get_pages(&self, titles: &[String]) -> Result<(IndexMap<String, String>, Vec<String>)> {
        let mut pages = IndexMap::new();
        let mut missing = Vec::new();
        let batches = titles.len().div_ceil(BATCH_SIZE);

        for (index, batch) in titles.chunks(BATCH_SIZE).enumerate() {
            if index > 0 {
                sleep(self.config.delay);
            }
            info!("Fetching page batch {} of {}", index + 1, batches);

            let response = match self.query_revisions(batch) {
                Ok(response) => response,
                Err(e) => {
                    warn!("Skipping batch {}: {}", index + 1, e);
                    continue;
                }
            };

            for page in response.query.pages.into_values() {
                match page.revisions.and_then(|mut revs| {
                    if revs.is_empty() {
                        None
                    } else {
                        Some(revs.remove(0).content)
                    }
                }) {
                    Some(content) => {
                        pages.insert(page.title, content);
                    }
                    None if page.missing.is_some() => {
                        info!("No page {}", page.title);
                        missing.push(page.title);
                    }
                    None => {
                        return Err(WikishipsError::Wiki(format!(
                            "page '{}' returned without revisions",
                            page.title
                        )));
                    }
                }
            }
        }

        Ok((pages, missing))
    }

    fn query_revisions(&self, titles: &[String]) -> Result<QueryResponse> {
        let joined = titles.join("|");
        debug!("Fetching from wiki: {} titles", titles.len());
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("titles", joined.as_str()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(WikishipsError::Wiki(format!(
                "query returned status {}",
                response.status()
            )));
        }
        Ok(response.json()?)
    }

    /// Log in with the token dance the API requires.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let mut form = HashMap::from([
            ("lgname".to_string(), username.to_string()),
            ("lgpassword".to_string(), password.to_string()),
        ]);
        let mut response = self.post_login(&form)?;

        if response.login.result == "NeedToken" {
            let token = response.login.token.ok_or_else(|| {
                WikishipsError::Wiki("login demanded a token but sent none".to_string())
            })?;
            form.insert("lgtoken".to_string(), token);
            response = self.post_login(&form)?;
        }

        if response.login.result != "Success" {
            return Err(WikishipsError::Wiki(format!(
                "Invalid login: {}",
                response.login.result
            )));
        }
        self.logged_in = true;
        Ok(())
    }

    fn post_login(&self, form: &HashMap<String, String>) -> Result<LoginResponse> {
        let response = self
            .client
            .post(&self.config.api_url)
            .query(&[("action", "login"), ("format", "json")])
            .form(form)
            .send()?;
        Ok(response.json()?)
    }

    /// Replace a page's content.
    ///
    /// Fetches and caches an edit token on first use. Requires login.
    pub fn edit_page(&mut self, title: &str, content: &str) -> Result<()> {
        if !self.logged_in {
            return Err(WikishipsError::Wiki(
                "editing requires login".to_string(),
            ));
        }
        let token = self.edit_token()?;

        let form = HashMap::from([
            ("title".to_string(), title.to_string()),
            ("text".to_string(), content.to_string()),
            ("token".to_string(), token),
            ("bot".to_string(), String::new()),
        ]);
        let response: EditResponse = self
            .client
            .post(&self.config.api_url)
            .query(&[("action", "edit"), ("format", "json")])
            .form(&form)
            .send()?
            .json()?;

        if response.edit.result != "Success" {
            return Err(WikishipsError::Wiki(response.edit.result));
        }
        debug!("Edited page {}", title);
        Ok(())
    }

    fn edit_token(&mut self) -> Result<String> {
        if let Some(token) = &self.edit_token {
            return Ok(token.clone());
        }
        let response: TokenResponse = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "info|revisions"),
                ("intoken", "edit"),
                ("titles", "Main Page"),
            ])
            .send()?
            .json()?;

        let token = response
            .query
            .pages
            .into_values()
            .find_map(|p| p.edittoken)
            .ok_or_else(|| WikishipsError::Wiki("no edit token in response".to_string()))?;
        self.edit_token = Some(token.clone());
        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: QueryBody,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    pages: HashMap<String, PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    title: String,
    /// Present (as an empty string) when the page does not exist.
    missing: Option<String>,
    revisions: Option<Vec<Revision>>,
}

#[derive(Debug, Deserialize)]
struct Revision {
    #[serde(rename = "*")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: LoginBody,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    result: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    query: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    pages: HashMap<String, TokenPage>,
}

#[derive(Debug, Deserialize)]
struct TokenPage {
    edittoken: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    edit: EditBody,
}

#[derive(Debug, Deserialize)]
struct EditBody {
    result: String,
}
