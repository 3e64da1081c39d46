//! Inventory backend port.

use async_trait::async_trait;
use std::sync::Arc;

use stockroom_model::{
    DeletePayload, InventoryId, InventoryRecord, RecordPayload, ViewMode, WireRecord,
};

use crate::{FetchClient, FetchError, Response};

/// Backend request paths.
pub mod paths {
    use stockroom_model::InventoryId;

    pub const CREATE: &str = "/api/create_inventory";

    pub fn update(id: InventoryId) -> String {
        format!("/api/update_inventory/id:{}", id)
    }

    pub fn delete(id: InventoryId) -> String {
        format!("/api/delete_inventory/id:{}", id)
    }

    pub fn restore(id: InventoryId) -> String {
        format!("/api/restore_inventory/id:{}", id)
    }
}

/// Operations the inventory backend offers.
///
/// Every call returns what the backend answered with, already mapped from
/// the wire format. Implementations must not retry.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// List the records belonging to a view, ordered by id.
    async fn list(&self, view: ViewMode) -> Result<Vec<InventoryRecord>, FetchError>;

    /// Create a record; it starts active.
    async fn create(&self, payload: &RecordPayload) -> Result<InventoryRecord, FetchError>;

    /// Replace the editable fields of an active record.
    async fn update(
        &self,
        id: InventoryId,
        payload: &RecordPayload,
    ) -> Result<InventoryRecord, FetchError>;

    /// Soft-delete an active record with comments.
    async fn delete(&self, id: InventoryId, comments: &str) -> Result<InventoryRecord, FetchError>;

    /// Restore a soft-deleted record.
    async fn restore(&self, id: InventoryId) -> Result<InventoryRecord, FetchError>;
}

#[async_trait]
impl<T: InventoryApi + ?Sized> InventoryApi for Arc<T> {
    async fn list(&self, view: ViewMode) -> Result<Vec<InventoryRecord>, FetchError> {
        (**self).list(view).await
    }

    async fn create(&self, payload: &RecordPayload) -> Result<InventoryRecord, FetchError> {
        (**self).create(payload).await
    }

    async fn update(
        &self,
        id: InventoryId,
        payload: &RecordPayload,
    ) -> Result<InventoryRecord, FetchError> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: InventoryId, comments: &str) -> Result<InventoryRecord, FetchError> {
        (**self).delete(id, comments).await
    }

    async fn restore(&self, id: InventoryId) -> Result<InventoryRecord, FetchError> {
        (**self).restore(id).await
    }
}

/// [`InventoryApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    client: FetchClient,
}

impl HttpInventoryApi {
    /// Wrap `client`; every request asks for JSON.
    pub fn new(client: FetchClient) -> Self {
        Self {
            client: client.with_default_header("Accept", "application/json"),
        }
    }
}

fn decode_record(response: Response) -> Result<InventoryRecord, FetchError> {
    let wire: WireRecord = response.error_for_status()?.envelope()?;
    Ok(InventoryRecord::try_from(wire)?)
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list(&self, view: ViewMode) -> Result<Vec<InventoryRecord>, FetchError> {
        let response = self
            .client
            .get(view.list_path())
            .send()
            .await?;

        let rows: Vec<WireRecord> = response.error_for_status()?.envelope()?;
        rows.into_iter()
            .map(|row| InventoryRecord::try_from(row).map_err(FetchError::from))
            .collect()
    }

    async fn create(&self, payload: &RecordPayload) -> Result<InventoryRecord, FetchError> {
        let response = self
            .client
            .post(paths::CREATE)
            .json(payload)?
            .send()
            .await?;
        decode_record(response)
    }

    async fn update(
        &self,
        id: InventoryId,
        payload: &RecordPayload,
    ) -> Result<InventoryRecord, FetchError> {
        let response = self
            .client
            .put(paths::update(id))
            .json(payload)?
            .send()
            .await?;
        decode_record(response)
    }

    async fn delete(&self, id: InventoryId, comments: &str) -> Result<InventoryRecord, FetchError> {
        let body = DeletePayload {
            comments: comments.to_string(),
        };
        let response = self
            .client
            .put(paths::delete(id))
            .json(&body)?
            .send()
            .await?;
        decode_record(response)
    }

    async fn restore(&self, id: InventoryId) -> Result<InventoryRecord, FetchError> {
        let response = self.client.put(paths::restore(id)).send().await?;
        decode_record(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_paths() {
        let id = InventoryId::new(12);
        assert_eq!(paths::update(id), "/api/update_inventory/id:12");
        assert_eq!(paths::delete(id), "/api/delete_inventory/id:12");
        assert_eq!(paths::restore(id), "/api/restore_inventory/id:12");
    }

    #[test]
    fn test_requests_ask_for_json() {
        let api = HttpInventoryApi::new(FetchClient::new().unwrap());
        let req = api.client.put(paths::restore(InventoryId::new(5)));
        assert_eq!(
            req.builder.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_decode_record_maps_wire_fields() {
        let body = br#"{"data": {"inventory_id": 3, "warehouse_id": 4, "sku": "69DI1HCU",
            "quantity": 50, "description": "shelf b", "created": "02/01/2022, 09:00:00",
            "updated": "02/03/2022, 17:30:05", "deleted": true, "comments": "damaged"},
            "status": 200}"#;
        let record = decode_record(Response::new(200, HashMap::new(), body.to_vec())).unwrap();

        assert_eq!(record.id, InventoryId::new(3));
        assert_eq!(record.warehouse_id, 4);
        assert_eq!(record.description, "shelf b");
        assert_eq!(record.comments.as_deref(), Some("damaged"));
        assert!(record.deleted);
    }

    #[test]
    fn test_decode_record_surfaces_rejection() {
        let body = br#"{"data":"item is already deleted","status":400}"#;
        let err = decode_record(Response::new(200, HashMap::new(), body.to_vec())).unwrap_err();
        assert_eq!(
            err,
            FetchError::Rejected {
                status: 400,
                message: "item is already deleted".to_string()
            }
        );
    }

    #[test]
    fn test_decode_record_http_error() {
        let err = decode_record(Response::new(502, HashMap::new(), b"bad gateway".to_vec()))
            .unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 502, .. }));
    }
}
