//! Thin client for the money-manager REST backend.
//!
//! Only the read endpoints are covered:
//!   GET /api/data                  all transactions
//!   GET /api/data/{year}/{Month}   one month, month spelled out ("September")
//!   GET /api/category              category list

use anyhow::{Context, Result, anyhow, bail};
use chrono::Month;
use moneymgr_core::{CategoryRecord, Transaction};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::Payload;

pub const DEFAULT_BASE_URL: &str = "https://moneymgrbackend.onrender.com";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

/// English month name for 1..=12
pub fn month_name(month: u32) -> Result<&'static str> {
    let m = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| anyhow!("month out of range: {month}"))?;
    Ok(m.name())
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("backend error: {status} {txt}");
        }

        let payload: Payload<T> = resp
            .json()
            .await
            .with_context(|| format!("parse response from {url}"))?;
        Ok(payload.into_items())
    }

    pub async fn fetch_all_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_list("api/data").await
    }

    pub async fn fetch_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let name = month_name(month)?;
        self.get_list(&format!("api/data/{year}/{name}")).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>> {
        self.get_list("api/category").await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
