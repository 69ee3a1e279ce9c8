use crate::adapters::storage::JsonRepository;
use crate::core::ensure_id;
use crate::domain::model::{Review, Vendor};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::Utc;

fn validate_review(review: &Review) -> Result<()> {
    validate_range("rating", review.rating, 1, 5)?;
    validate_non_empty_string("vendorId", &review.vendor_id)
        .map_err(|_| MarketError::validation("vendorId is required"))?;
    Ok(())
}

/// Reviews, plus keeping each vendor's rating equal to the mean of its reviews.
#[derive(Clone)]
pub struct ReviewService {
    reviews: JsonRepository<Review>,
    vendors: JsonRepository<Vendor>,
}

impl ReviewService {
    pub fn new(reviews: JsonRepository<Review>, vendors: JsonRepository<Vendor>) -> Self {
        Self { reviews, vendors }
    }

    pub async fn list(&self) -> Result<Vec<Review>> {
        self.reviews.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Review> {
        self.reviews.get(id).await
    }

    pub async fn by_vendor(&self, vendor_id: &str) -> Result<Vec<Review>> {
        self.reviews.find_where(|r| r.vendor_id == vendor_id).await
    }

    pub async fn by_couple(&self, couple_id: &str) -> Result<Vec<Review>> {
        self.reviews.find_where(|r| r.couple_id == couple_id).await
    }

    pub async fn create(&self, mut review: Review) -> Result<Review> {
        validate_review(&review)?;
        ensure_id(&mut review, "");
        if review.review_date.is_none() {
            review.review_date = Some(Utc::now());
        }

        let review = self.reviews.save(review).await?;
        tracing::info!(review_id = %review.review_id, vendor_id = %review.vendor_id, "Review submitted");
        self.refresh_vendor_rating(&review.vendor_id).await?;
        Ok(review)
    }

    pub async fn update(&self, id: &str, mut review: Review) -> Result<Review> {
        validate_review(&review)?;
        review.review_id = id.to_string();
        let previous = self.get(id).await?;
        if review.review_date.is_none() {
            review.review_date = previous.review_date;
        }

        if !self.reviews.update(review.clone()).await? {
            return Err(MarketError::not_found("Review", id));
        }
        self.refresh_vendor_rating(&review.vendor_id).await?;
        if previous.vendor_id != review.vendor_id {
            self.refresh_vendor_rating(&previous.vendor_id).await?;
        }
        Ok(review)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let review = self.get(id).await?;
        self.reviews.delete(id).await?;
        tracing::info!(review_id = %id, "Review deleted");
        self.refresh_vendor_rating(&review.vendor_id).await
    }

    /// Recomputes the vendor's average; `0.0` once no reviews remain.
    /// Reviews naming an unknown vendor are left alone.
    async fn refresh_vendor_rating(&self, vendor_id: &str) -> Result<()> {
        let reviews = self.by_vendor(vendor_id).await?;
        let average = if reviews.is_empty() {
            0.0
        } else {
            reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / reviews.len() as f64
        };

        match self
            .vendors
            .modify(vendor_id, |vendor| {
                vendor.rating = average;
                Ok(())
            })
            .await
        {
            Ok(_) => {
                tracing::debug!(vendor_id = %vendor_id, rating = average, "Vendor rating updated");
                Ok(())
            }
            Err(MarketError::NotFound { .. }) => {
                tracing::debug!(vendor_id = %vendor_id, "Review references unknown vendor");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::domain::ports::Storage;
    use std::sync::Arc;

    async fn setup() -> (ReviewService, JsonRepository<Vendor>) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let vendors: JsonRepository<Vendor> = JsonRepository::new(storage.clone());
        let mut vendor = Vendor::default();
        vendor.account.id = "v-1".to_string();
        vendors.save(vendor).await.unwrap();
        (ReviewService::new(JsonRepository::new(storage), vendors.clone()), vendors)
    }

    fn review(vendor_id: &str, couple_id: &str, rating: u8) -> Review {
        Review {
            vendor_id: vendor_id.to_string(),
            couple_id: couple_id.to_string(),
            rating,
            comment: "Lovely".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_recomputes_average() {
        let (service, vendors) = setup().await;
        let first = service.create(review("v-1", "c-1", 5)).await.unwrap();
        assert!(!first.review_id.is_empty());
        assert!(first.review_date.is_some());

        service.create(review("v-1", "c-2", 2)).await.unwrap();
        assert_eq!(vendors.get("v-1").await.unwrap().rating, 3.5);
    }

    #[tokio::test]
    async fn test_update_and_delete_refresh_rating() {
        let (service, vendors) = setup().await;
        let a = service.create(review("v-1", "c-1", 4)).await.unwrap();
        let b = service.create(review("v-1", "c-2", 2)).await.unwrap();

        service.update(&b.review_id, review("v-1", "c-2", 4)).await.unwrap();
        assert_eq!(vendors.get("v-1").await.unwrap().rating, 4.0);

        service.delete(&a.review_id).await.unwrap();
        service.delete(&b.review_id).await.unwrap();
        assert_eq!(vendors.get("v-1").await.unwrap().rating, 0.0);
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_rejected() {
        let (service, _) = setup().await;
        let err = service.create(review("v-1", "c-1", 6)).await.unwrap_err();
        assert!(matches!(err, MarketError::ValidationError { .. }));
        let err = service.create(review("v-1", "c-1", 0)).await.unwrap_err();
        assert!(matches!(err, MarketError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_unknown_vendor_is_tolerated() {
        let (service, _) = setup().await;
        let created = service.create(review("v-404", "c-1", 3)).await.unwrap();
        assert_eq!(service.by_vendor("v-404").await.unwrap().len(), 1);
        assert_eq!(service.by_couple("c-1").await.unwrap()[0].review_id, created.review_id);
    }

    #[tokio::test]
    async fn test_delete_missing_review() {
        let (service, _) = setup().await;
        let err = service.delete("nope").await.unwrap_err();
        assert!(matches!(err, MarketError::NotFound { .. }));
    }
}
