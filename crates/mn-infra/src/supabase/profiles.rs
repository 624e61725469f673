//! PostgREST adapter for the hair profile table.

use std::sync::Arc;

use async_trait::async_trait;
use mn_core::ports::ProfileRepositoryPort;
use mn_core::{BackendError, CompletedProfile, HairProfileRow, SubjectId};
use reqwest::Method;
use tracing::{debug, instrument};

use super::client::SupabaseClient;
use super::error::{query_error, transport_error};

/// PostgREST code for "more than one row where one was expected".
const MULTIPLE_ROWS_CODE: &str = "PGRST116";

pub struct SupabaseProfileRepository {
    client: Arc<SupabaseClient>,
    table: String,
}

impl SupabaseProfileRepository {
    pub fn new(client: Arc<SupabaseClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    async fn rows(&self, request: reqwest::RequestBuilder) -> Result<Vec<HairProfileRow>, BackendError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(query_error(status, &body));
        }
        response.json().await.map_err(transport_error)
    }
}

#[async_trait]
impl ProfileRepositoryPort for SupabaseProfileRepository {
    #[instrument(skip(self), fields(subject = %subject, table = %self.table))]
    async fn find_by_subject(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<HairProfileRow>, BackendError> {
        let filter = format!("eq.{}", subject.as_str());
        let request = self
            .client
            .request(Method::GET, &self.path())
            .query(&[("user_id", filter.as_str()), ("select", "*")]);

        let mut rows = self.rows(request).await?;
        debug!(count = rows.len(), "profile rows fetched");
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(BackendError::query(
                Some(MULTIPLE_ROWS_CODE.to_string()),
                format!("JSON object requested, multiple ({n}) rows returned"),
            )),
        }
    }

    #[instrument(skip(self, profile), fields(subject = %profile.user_id(), table = %self.table))]
    async fn upsert(&self, profile: &CompletedProfile) -> Result<HairProfileRow, BackendError> {
        let request = self
            .client
            .request(Method::POST, &self.path())
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(profile);

        self.rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Unexpected("upsert returned no rows".to_string()))
    }
}
