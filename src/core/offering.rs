use crate::adapters::storage::JsonRepository;
use crate::core::ensure_id;
use crate::domain::model::Offering;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::validate_non_negative;

/// Catalogue of services vendors offer, served under `/api/service`.
#[derive(Clone)]
pub struct OfferingService {
    offerings: JsonRepository<Offering>,
}

impl OfferingService {
    pub fn new(offerings: JsonRepository<Offering>) -> Self {
        Self { offerings }
    }

    pub async fn list(&self) -> Result<Vec<Offering>> {
        self.offerings.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Offering> {
        self.offerings.get(id).await
    }

    pub async fn create(&self, mut offering: Offering) -> Result<Offering> {
        validate_non_negative("basePrice", offering.base_price)?;
        ensure_id(&mut offering, "service-");
        let offering = self.offerings.save(offering).await?;
        tracing::info!(service_id = %offering.service_id, "Created service offering");
        Ok(offering)
    }

    pub async fn update(&self, id: &str, mut offering: Offering) -> Result<Offering> {
        validate_non_negative("basePrice", offering.base_price)?;
        offering.service_id = id.to_string();
        if !self.offerings.update(offering.clone()).await? {
            return Err(MarketError::not_found("Service", id));
        }
        Ok(offering)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.offerings.delete(id).await? {
            return Err(MarketError::not_found("Service", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_offering_crud() {
        let service = OfferingService::new(JsonRepository::new(Arc::new(MemoryStorage::new())));
        let mut offering = Offering {
            name: "Full day photography".to_string(),
            base_price: 1800.0,
            ..Default::default()
        };
        offering
            .additional_properties
            .insert("hours".to_string(), serde_json::json!(10));

        let created = service.create(offering).await.unwrap();
        assert!(created.service_id.starts_with("service-"));
        assert_eq!(
            service.get(&created.service_id).await.unwrap().additional_properties["hours"],
            10
        );

        let mut cheaper = created.clone();
        cheaper.base_price = 1500.0;
        let updated = service.update(&created.service_id, cheaper).await.unwrap();
        assert_eq!(updated.base_price, 1500.0);

        service.delete(&created.service_id).await.unwrap();
        assert!(matches!(
            service.get(&created.service_id).await,
            Err(MarketError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let service = OfferingService::new(JsonRepository::new(Arc::new(MemoryStorage::new())));
        let err = service
            .create(Offering {
                base_price: -1.0,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::ValidationError { .. }));
    }
}
