//! Permission data scraped from the public IAM documentation.

use super::{PermissionSource, SourceFuture, clean_names};
use crate::config::LiveConfig;
use crate::error::SourceError;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

const CUSTOM_ROLES_CODES: &str = "div#table-div-id > table:first-of-type > tbody:first-of-type \
     td.column1-class > code:first-of-type";
const DENY_CELLS: &str = "table:first-of-type > tbody:first-of-type td";
const CELL_PERMISSION: &str = "p:first-of-type > code:first-of-type";
const MAPPING_NOTE: &str = "In the IAM v1 API, this permission is named";

#[derive(Debug, Deserialize)]
struct RoleIndex {
    permissions: Vec<RoleIndexEntry>,
}

#[derive(Debug, Deserialize)]
struct RoleIndexEntry {
    title: String,
}

/// Scrapes the role index, the custom-role support table and the deny
/// support table. The deny page feeds two collections and is fetched once.
#[derive(Debug)]
pub struct LiveSource {
    client: reqwest::Client,
    role_index_url: Url,
    custom_roles_url: Url,
    deny_support_url: Url,
    deny_page: OnceCell<String>,
}

impl LiveSource {
    pub fn new(config: &LiveConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| SourceError::unavailable("http client", e))?;

        Ok(Self {
            client,
            role_index_url: parse_url(&config.role_index_url)?,
            custom_roles_url: parse_url(&config.custom_roles_url)?,
            deny_support_url: parse_url(&config.deny_support_url)?,
            deny_page: OnceCell::new(),
        })
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, SourceError> {
        tracing::debug!(url = %url, "fetching permission documentation");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| SourceError::unavailable(url.as_str(), e))?;
        response
            .text()
            .await
            .map_err(|e| SourceError::unavailable(url.as_str(), e))
    }

    async fn deny_page(&self) -> Result<&str, SourceError> {
        self.deny_page
            .get_or_try_init(|| self.fetch_text(&self.deny_support_url))
            .await
            .map(String::as_str)
    }
}

fn parse_url(raw: &str) -> Result<Url, SourceError> {
    Url::parse(raw).map_err(|e| SourceError::unavailable(raw, e))
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::unavailable("selector", format!("{css}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// The permission `code` of a deny table cell. Only a paragraph directly
/// under the cell counts; paragraphs nested in notes are ignored.
fn cell_permission<'a>(cell: ElementRef<'a>, code: &Selector) -> Option<ElementRef<'a>> {
    cell.select(code).find(|found| {
        found
            .parent()
            .and_then(|paragraph| paragraph.parent())
            .is_some_and(|owner| owner.id() == cell.id())
    })
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn extract_role_index(body: &str) -> Result<Vec<String>, SourceError> {
    let index: RoleIndex =
        serde_json::from_str(body).map_err(|e| SourceError::unavailable("role index", e))?;
    Ok(index.permissions.into_iter().map(|entry| entry.title).collect())
}

pub(crate) fn extract_custom_role_permissions(html: &str) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(html);
    let codes = selector(CUSTOM_ROLES_CODES)?;
    Ok(document.select(&codes).map(element_text).collect())
}

/// Permission names in the deny support table. Wildcard rows are skipped.
pub(crate) fn extract_deniable_permissions(html: &str) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(html);
    let cells = selector(DENY_CELLS)?;
    let code = selector(CELL_PERMISSION)?;

    Ok(document
        .select(&cells)
        .filter_map(|cell| cell_permission(cell, &code))
        .map(|code| element_text(code).trim().to_string())
        .filter(|name| !name.ends_with('*'))
        .collect())
}

/// V2 -> V1 names from deny support cells carrying a V1 naming note.
///
/// A note without a `code` element means the page layout changed, which is
/// reported rather than skipped.
pub(crate) fn extract_non_standard_mappings(
    html: &str,
) -> Result<BTreeMap<String, String>, SourceError> {
    let document = Html::parse_document(html);
    let cells = selector(DENY_CELLS)?;
    let permission = selector(CELL_PERMISSION)?;
    let aside = selector("aside")?;
    let code = selector("code")?;

    let mut mappings = BTreeMap::new();
    for cell in document.select(&cells) {
        let Some(v2) = cell_permission(cell, &permission) else {
            continue;
        };
        let v2 = element_text(v2).trim().to_string();

        let Some(note) = cell.select(&aside).next() else {
            continue;
        };
        if !normalize_whitespace(&element_text(note)).contains(MAPPING_NOTE) {
            continue;
        }

        let Some(v1) = note.select(&code).next() else {
            return Err(SourceError::Extraction {
                permission: v2,
                reason: "v1 permission could not be identified".into(),
            });
        };
        mappings.insert(v2, element_text(v1).trim().to_string());
    }
    Ok(mappings)
}

impl PermissionSource for LiveSource {
    fn name(&self) -> &str {
        "live"
    }

    fn allowable_permissions(&self) -> SourceFuture<'_, BTreeSet<String>> {
        Box::pin(async move {
            let index = self.fetch_text(&self.role_index_url).await?;
            let mut names = extract_role_index(&index)?;

            let custom_roles = self.fetch_text(&self.custom_roles_url).await?;
            names.extend(extract_custom_role_permissions(&custom_roles)?);

            let names = clean_names(names);
            tracing::debug!(count = names.len(), "fetched allowable permissions");
            Ok(names)
        })
    }

    fn deniable_permissions(&self) -> SourceFuture<'_, BTreeSet<String>> {
        Box::pin(async move {
            let page = self.deny_page().await?;
            let names = clean_names(extract_deniable_permissions(page)?);
            tracing::debug!(count = names.len(), "fetched deniable permissions");
            Ok(names)
        })
    }

    fn non_standard_mappings(&self) -> SourceFuture<'_, BTreeMap<String, String>> {
        Box::pin(async move {
            let page = self.deny_page().await?;
            let mappings = extract_non_standard_mappings(page)?;
            tracing::debug!(count = mappings.len(), "fetched non-standard mappings");
            Ok(mappings)
        })
    }
}
