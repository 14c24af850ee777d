//! Typed CRUD helpers over any data client.
//!
//! The backend reports most failures as a JSON body with a normal-looking
//! shape instead of an error status, so a raw call cannot tell success from
//! failure. These helpers check the marker each endpoint returns on
//! success (`pk` for records, `status: 204` for deletions, `code: 200` for
//! reports) and turn its absence into
//! [`Error::Rejected`](birra_core::Error::Rejected).

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use birra_core::error::{DecodeError, InvalidInputError, RejectedError};
use birra_core::models::{
    Quota, QuotasByPayment, ReportAccepted, ReportRequest, Resource, UserProfile,
};
use birra_core::{DataClient, RequestDescriptor, Result};

use crate::endpoints::{QUOTA_LIST_BY_PAYMENT, REPORT, user_by_username};

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| DecodeError::new(endpoint, e.to_string()).into())
}

/// Require a record body carrying its primary key.
fn expect_record<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T> {
    if body.get("pk").is_none() {
        return Err(RejectedError::new(endpoint, body).into());
    }
    decode(endpoint, body)
}

/// Require a list body.
fn expect_list<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<Vec<T>> {
    if !body.is_array() {
        return Err(RejectedError::new(endpoint, body).into());
    }
    decode(endpoint, body)
}

/// Typed access to the back-office collections.
#[async_trait]
pub trait Resources: DataClient {
    /// List every record of a collection.
    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        debug!(collection = R::COLLECTION, "Listing records");
        let body = self.call(RequestDescriptor::get(R::COLLECTION)).await?;
        expect_list(R::COLLECTION, body)
    }

    /// Fetch one record.
    async fn retrieve<R: Resource>(&self, pk: u64) -> Result<R> {
        let endpoint = R::detail_endpoint(pk);
        let body = self.call(RequestDescriptor::get(&endpoint)).await?;
        expect_record(&endpoint, body)
    }

    /// Create a record and return it as stored by the backend.
    async fn create<R: Resource>(&self, record: &R) -> Result<R> {
        let request = RequestDescriptor::post(R::COLLECTION).with_json(record)?;
        let body = self.call(request).await?;
        let created: R = expect_record(R::COLLECTION, body)?;
        debug!(pk = ?created.pk(), "Created record");
        Ok(created)
    }

    /// Apply a partial update to a record.
    async fn update<R: Resource>(&self, pk: u64, changes: Value) -> Result<R> {
        if !changes.is_object() {
            return Err(InvalidInputError::Body {
                message: "changes must be a JSON object".to_string(),
            }
            .into());
        }
        let endpoint = R::detail_endpoint(pk);
        let body = self
            .call(RequestDescriptor::patch(&endpoint).with_body(changes))
            .await?;
        expect_record(&endpoint, body)
    }

    /// Delete a record.
    ///
    /// Some collections acknowledge with `{"status": 204}`, others with an
    /// empty `204 No Content`; both count as success.
    async fn destroy<R: Resource>(&self, pk: u64) -> Result<()> {
        let endpoint = R::detail_endpoint(pk);
        debug!(%endpoint, "Deleting record");
        let body = self.call(RequestDescriptor::delete(&endpoint)).await?;
        let acknowledged =
            body.is_null() || body.get("status").and_then(Value::as_u64) == Some(204);
        if !acknowledged {
            return Err(RejectedError::new(endpoint, body).into());
        }
        Ok(())
    }

    /// List the quotas of one payment.
    async fn quotas_for_payment(&self, payment: u64) -> Result<Vec<Quota>> {
        let request =
            RequestDescriptor::post(QUOTA_LIST_BY_PAYMENT).with_json(&QuotasByPayment { payment })?;
        let body = self.call(request).await?;
        expect_list(QUOTA_LIST_BY_PAYMENT, body)
    }

    /// Queue a report covering everything since `date_from`.
    ///
    /// The report is generated and mailed by the backend.
    async fn request_report(&self, date_from: NaiveDate) -> Result<ReportAccepted> {
        let request = RequestDescriptor::post(REPORT).with_json(&ReportRequest { date_from })?;
        let body = self.call(request).await?;
        if body.get("code").and_then(Value::as_u64) != Some(200) {
            return Err(RejectedError::new(REPORT, body).into());
        }
        decode(REPORT, body)
    }

    /// Look up a user's profile.
    async fn profile(&self, username: &str) -> Result<UserProfile> {
        let endpoint = user_by_username(username);
        let body = self.call(RequestDescriptor::get(&endpoint)).await?;
        expect_record(&endpoint, body)
    }
}

impl<T: DataClient + ?Sized> Resources for T {}

