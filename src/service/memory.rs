//! In-memory data service
//!
//! Keeps the catalog and item assignments in process. Used by the CLI's
//! offline mode and by tests, which can also force every request to fail.

use crate::error::ServiceError;
use crate::models::{Label, LabelId};
use crate::service::LabelService;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// [`LabelService`] holding everything in memory
#[derive(Debug, Default)]
pub struct InMemoryLabelService {
    /// Catalog in insertion order
    labels: RwLock<Vec<Label>>,
    /// Item ID -> assigned label IDs, in assignment order
    item_labels: RwLock<HashMap<String, Vec<LabelId>>>,
    /// When set, every request fails with `Unavailable`
    failing: AtomicBool,
    /// Number of requests received, including failed ones
    requests: AtomicUsize,
}

impl InMemoryLabelService {
    /// Empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Service seeded with a catalog
    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self {
            labels: RwLock::new(labels),
            ..Self::default()
        }
    }

    /// Make every subsequent request fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Label IDs currently assigned to an item
    pub async fn item_label_ids(&self, item_id: &str) -> Vec<LabelId> {
        self.item_labels
            .read()
            .await
            .get(item_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record_request(&self) -> Result<(), ServiceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LabelService for InMemoryLabelService {
    async fn fetch_labels(&self) -> Result<Vec<Label>, ServiceError> {
        self.record_request()?;
        Ok(self.labels.read().await.clone())
    }

    async fn create_label(
        &self,
        name: &str,
        color_hex: &str,
        description: Option<&str>,
    ) -> Result<Label, ServiceError> {
        self.record_request()?;
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Label name cannot be empty".to_string(),
            ));
        }

        let label = Label {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color: color_hex.to_string(),
            description: description.map(str::to_string),
            created_at: Some(Utc::now()),
        };
        self.labels.write().await.push(label.clone());
        Ok(label)
    }

    async fn delete_label(&self, label_id: &str) -> Result<(), ServiceError> {
        self.record_request()?;
        {
            let mut labels = self.labels.write().await;
            let before = labels.len();
            labels.retain(|label| label.id != label_id);
            if labels.len() == before {
                return Err(ServiceError::LabelNotFound(label_id.to_string()));
            }
        }

        for ids in self.item_labels.write().await.values_mut() {
            ids.retain(|id| id != label_id);
        }
        Ok(())
    }

    async fn update_item_labels(
        &self,
        item_id: &str,
        label_ids: &[LabelId],
    ) -> Result<Vec<Label>, ServiceError> {
        self.record_request()?;
        let applied = {
            let labels = self.labels.read().await;
            label_ids
                .iter()
                .map(|id| {
                    labels
                        .iter()
                        .find(|label| &label.id == id)
                        .cloned()
                        .ok_or_else(|| ServiceError::LabelNotFound(id.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        self.item_labels
            .write()
            .await
            .insert(item_id.to_string(), label_ids.to_vec());
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryLabelService {
        InMemoryLabelService::with_labels(vec![
            Label::new("a", "A", "#FF0000"),
            Label::new("b", "B", "#00FF00"),
        ])
    }

    #[tokio::test]
    async fn test_create_label_appends_to_catalog() {
        let service = seeded();
        let label = service
            .create_label("C", "#0000FF", Some("third"))
            .await
            .unwrap();

        assert!(!label.id.is_empty());
        assert!(label.created_at.is_some());
        let catalog = service.fetch_labels().await.unwrap();
        assert_eq!(catalog.last(), Some(&label));
        assert_eq!(service.request_count(), 2);
    }

    #[tokio::test]
    async fn test_create_label_rejects_empty_name() {
        let service = seeded();
        let result = service.create_label("  ", "", None).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_label_unassigns_from_items() {
        let service = seeded();
        service
            .update_item_labels("item", &["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        service.delete_label("a").await.unwrap();

        assert_eq!(service.item_label_ids("item").await, vec!["b".to_string()]);
        assert_eq!(service.fetch_labels().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_label() {
        let service = seeded();
        let result = service.delete_label("zzz").await;
        assert!(matches!(result, Err(ServiceError::LabelNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_item_labels_preserves_order() {
        let service = seeded();
        let applied = service
            .update_item_labels("item", &["b".to_string(), "a".to_string()])
            .await
            .unwrap();

        let ids: Vec<_> = applied.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_update_item_labels_unknown_label_leaves_item_untouched() {
        let service = seeded();
        service
            .update_item_labels("item", &["a".to_string()])
            .await
            .unwrap();

        let result = service
            .update_item_labels("item", &["a".to_string(), "nope".to_string()])
            .await;

        assert!(matches!(result, Err(ServiceError::LabelNotFound(id)) if id == "nope"));
        assert_eq!(service.item_label_ids("item").await, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_service_counts_requests() {
        let service = seeded();
        service.set_failing(true);

        assert!(matches!(
            service.fetch_labels().await,
            Err(ServiceError::Unavailable(_))
        ));
        assert_eq!(service.request_count(), 1);

        service.set_failing(false);
        assert!(service.fetch_labels().await.is_ok());
        assert_eq!(service.request_count(), 2);
    }
}
