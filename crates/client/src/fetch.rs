//! The backend API client.
//!
//! One bundle per member: the member, their full transaction history, and
//! their product entries, fetched together and decoded before any
//! aggregation starts. Streaming records into a running pass is not
//! supported; the reconciliation invariants assume a materialized snapshot.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use kisti_core::aggregate::ReconcileWarning;
use kisti_core::record::TransactionRecord;
use kisti_core::sale::Member;
use kisti_shared::config::ApiConfig;
use kisti_shared::types::{CollectorId, MemberId, PageRequest, PageResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::decode;
use crate::error::ClientError;
use crate::models::{MemberDto, ProductDto, TransactionDto};

/// Everything the aggregation pass needs for one member.
#[derive(Debug)]
pub struct MemberBundle {
    /// The member with their grouped sale rows.
    pub member: Member,
    /// The member's decoded transaction history.
    pub records: Vec<TransactionRecord>,
    /// Anomalies recovered while decoding.
    pub warnings: Vec<ReconcileWarning>,
}

/// Typed client for the field-office backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|_| ClientError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches one member.
    pub async fn member(&self, id: &MemberId) -> Result<MemberDto, ClientError> {
        self.get_json(&format!("members/{id}")).await
    }

    /// Fetches one member's full transaction history.
    pub async fn member_transactions(
        &self,
        id: &MemberId,
    ) -> Result<Vec<TransactionDto>, ClientError> {
        self.get_json(&format!("members/{id}/transactions")).await
    }

    /// Fetches one member's product entries.
    pub async fn member_products(&self, id: &MemberId) -> Result<Vec<ProductDto>, ClientError> {
        self.get_json(&format!("members/{id}/products")).await
    }

    /// Fetches one page of a collector's members.
    pub async fn collector_members(
        &self,
        collector: &CollectorId,
        page: &PageRequest,
    ) -> Result<PageResponse<MemberDto>, ClientError> {
        self.get_json(&format!(
            "collectors/{collector}/members?page={}&perPage={}",
            page.page, page.per_page
        ))
        .await
    }

    /// Fetches and decodes one member's bundle.
    ///
    /// The three requests run together; the bundle only exists once all of
    /// them have landed.
    pub async fn fetch_member_bundle(&self, id: &MemberId) -> Result<MemberBundle, ClientError> {
        let (member, transactions, products) = futures::try_join!(
            self.member(id),
            self.member_transactions(id),
            self.member_products(id),
        )?;

        let mut warnings = Vec::new();
        let sale_rows = decode::group_sale_rows(products, &mut warnings);
        let decoded = decode::decode_records(transactions);
        warnings.extend(decoded.warnings);

        Ok(MemberBundle {
            member: decode::decode_member(member, sale_rows),
            records: decoded.records,
            warnings,
        })
    }

    /// Fetches many member bundles with bounded concurrency.
    ///
    /// Purely an I/O optimization; each bundle is still complete before its
    /// member is aggregated. Failures stay per-member.
    pub async fn fetch_member_bundles(
        &self,
        ids: &[MemberId],
        concurrency: usize,
    ) -> Vec<(MemberId, Result<MemberBundle, ClientError>)> {
        stream::iter(ids.to_vec())
            .map(|id| async move {
                let result = self.fetch_member_bundle(&id).await;
                (id, result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}/{path}", self.base_url);
        let request_id = Uuid::now_v7();
        debug!(%request_id, %url, "GET");

        let response = self
            .http
            .get(&url)
            .header("x-request-id", request_id.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%request_id, %status, "backend request failed");
            return Err(ClientError::Status {
                code: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}
