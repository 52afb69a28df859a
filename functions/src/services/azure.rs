use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::search::{normalize_row_keys, SearchClient, SearchRequest, SearchResults, SearchTarget};

/// Upper bound on pages fetched for one search before giving up.
pub const MAX_SEARCH_PAGES: usize = 50;

/// Azure AI Search REST client. One instance serves every endpoint and index;
/// the target is chosen per request and authenticated with an admin or query key.
pub struct AzureSearchClient {
    client: Client,
    api_key: String,
    api_version: String,
}

impl AzureSearchClient {
    pub fn new(client: Client, api_key: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_version: api_version.into(),
        }
    }

    fn search_url(&self, target: &SearchTarget) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            target.endpoint.trim_end_matches('/'),
            urlencoding::encode(&target.index_name),
            urlencoding::encode(&self.api_version),
        )
    }

    async fn post_page<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<SearchResults> {
        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Search service error ({}): {}", status, error_text));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SearchClient for AzureSearchClient {
    async fn search(&self, target: &SearchTarget, request: &SearchRequest) -> Result<SearchResults> {
        let url = self.search_url(target);
        tracing::debug!(
            endpoint = %target.endpoint,
            index = %target.index_name,
            hybrid = request.search.is_some(),
            "Querying search index"
        );

        let mut results = self.post_page(&url, request).await?;
        let mut next = results.next_page_parameters.take();
        let mut pages = 1;

        // Answers only come back on the first page.
        while let Some(parameters) = next {
            if pages >= MAX_SEARCH_PAGES {
                return Err(anyhow!(
                    "Search service kept paging after {} pages",
                    MAX_SEARCH_PAGES
                ));
            }

            let mut page = self.post_page(&url, &parameters).await?;
            pages += 1;
            if page.value.is_empty() {
                break;
            }
            next = page.next_page_parameters.take();
            results.value.append(&mut page.value);
        }

        results.value = results.value.into_iter().map(normalize_row_keys).collect();

        tracing::debug!(rows = results.value.len(), pages, "Search completed");
        Ok(results)
    }
}
