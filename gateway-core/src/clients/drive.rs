//! Client for the Drive-State Engine (spec §4.8, §6).

use serde::Serialize;

use crate::drive::{DriveDelta, DrivePolicy, DriveVector};
use crate::error::ServiceError;
use crate::http_client::ServiceClient;

#[derive(Clone, Serialize)]
pub struct UpdateRequest<'a> {
    pub delta: &'a DriveDelta,
    pub reason: &'a str,
}

pub struct DriveClient {
    inner: ServiceClient,
}

impl DriveClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub async fn get(&self, request_id: &str, user_id: &str) -> Result<DriveVector, ServiceError> {
        let path = format!("/drive/get?user_id={user_id}");
        self.inner.get_json(&path, request_id).await
    }

    pub async fn update(
        &self,
        request_id: &str,
        user_id: &str,
        delta: &DriveDelta,
        reason: &str,
    ) -> Result<DriveVector, ServiceError> {
        let path = format!("/drive/update?user_id={user_id}");
        self.inner.post_json(&path, request_id, &UpdateRequest { delta, reason }).await
    }

    pub async fn policy(&self, request_id: &str, user_id: &str) -> Result<DrivePolicy, ServiceError> {
        let path = format!("/drive/policy?user_id={user_id}");
        self.inner.post_json(&path, request_id, &serde_json::json!({})).await
    }
}
