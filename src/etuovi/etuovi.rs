use std::time::Duration;

use anyhow::{Context, Result};
use futures::StreamExt;
use log::{error, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::etuovi::extract::{extract_record, ListingDetail};
use crate::etuovi::payload::build_search_payload;
use crate::etuovi::templates::TemplateStore;
use crate::models::criteria::SearchCriteria;
use crate::models::property::PropertyRecord;

const FRONT_PAGE_URL: &str = "https://www.etuovi.com/";
const SEARCH_URL: &str = "https://www.etuovi.com/api/v2/announcements/search/listpage";
const DETAILS_URL: &str = "https://www.etuovi.com/api/v2/announcement/details";
const XSRF_COOKIE: &str = "XSRF-TOKEN";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct SearchPage {
    announcements: Vec<Announcement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Announcement {
    friendly_id: Option<String>,
}

/// Etuovi API client plus the search orchestration: template + criteria →
/// search payload → one result page → per-listing detail fetch → extraction.
#[derive(Debug)]
pub struct Etuovi {
    client: reqwest::Client,
    headers: HeaderMap,
    templates: TemplateStore,
    detail_concurrency: usize,
    search_deadline: Duration,
}

impl Etuovi {
    /// Prime a cookie session against the portal front page and capture the
    /// anti-forgery token it hands out.
    pub async fn init(config: &Config) -> Result<Etuovi> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_seconds as u64))
            .user_agent(USER_AGENT_VALUE)
            .build()
            .context("failed to build http client")?;

        info!("Priming Etuovi session");
        let response = client
            .get(FRONT_PAGE_URL)
            .send()
            .await
            .context("could not reach the portal front page")?
            .error_for_status()
            .context("portal front page returned an error")?;

        let csrf_token = response
            .cookies()
            .find(|cookie| cookie.name() == XSRF_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(token) = HeaderValue::from_str(&csrf_token) {
            headers.insert("X-XSRF-TOKEN", token);
        }

        Ok(Etuovi {
            client,
            headers,
            templates: TemplateStore::new(config.templates_dir.clone()),
            detail_concurrency: config.detail_concurrency.max(1) as usize,
            search_deadline: Duration::from_secs(config.search_deadline_seconds as u64),
        })
    }

    /// Run one search end to end. A failed page request is terminal; a failed
    /// individual detail fetch is logged and that listing skipped. Arrival
    /// order of the page is preserved in the result.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        current_year: i32,
    ) -> Result<Vec<PropertyRecord>, ApiError> {
        let location_criteria = self.templates.load(&criteria.location)?;
        let payload = build_search_payload(&location_criteria, criteria);

        // The deadline spans everything after the template is loaded: the
        // page request and every detail fetch.
        let run = async {
            let page = self.fetch_search_page(&payload).await?;
            info!(
                "Search for '{}' returned {} announcements",
                criteria.location,
                page.announcements.len()
            );

            let friendly_ids: Vec<String> = page
                .announcements
                .into_iter()
                .filter_map(|announcement| announcement.friendly_id)
                .collect();

            // Bounded, order-preserving detail fetch. The default concurrency
            // of one keeps the portal seeing one request at a time.
            let mut details =
                futures::stream::iter(friendly_ids.into_iter().map(|friendly_id| {
                    async move {
                        let result = self.fetch_listing_detail(&friendly_id).await;
                        (friendly_id, result)
                    }
                }))
                .buffered(self.detail_concurrency);

            let mut records: Vec<PropertyRecord> = Vec::new();
            while let Some((friendly_id, result)) = details.next().await {
                match result {
                    Ok(detail) => {
                        if let Some(record) = extract_record(
                            &detail,
                            criteria.user_max_limit,
                            criteria.interest_rate,
                            current_year,
                        ) {
                            records.push(record);
                        }
                    }
                    Err(e) => {
                        error!("Could not fetch details for listing {friendly_id}: {e}");
                    }
                }
            }
            Ok(records)
        };

        tokio::time::timeout(self.search_deadline, run)
            .await
            .map_err(|_| {
                ApiError::Upstream(format!(
                    "search deadline exceeded for '{}'",
                    criteria.location
                ))
            })?
    }

    async fn fetch_search_page(&self, payload: &Value) -> Result<SearchPage, ApiError> {
        let response = self
            .client
            .post(SEARCH_URL)
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| ApiError::Upstream(format!("unexpected search page shape: {e}")))
    }

    async fn fetch_listing_detail(&self, friendly_id: &str) -> Result<ListingDetail, reqwest::Error> {
        let response = self
            .client
            .get(DETAILS_URL)
            .headers(self.headers.clone())
            .query(&[("friendlyId", friendly_id)])
            .send()
            .await?
            .error_for_status()?;

        response.json::<ListingDetail>().await
    }
}
