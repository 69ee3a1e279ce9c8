use crate::adapters::export::{render_ranking, ExportFormat};
use crate::adapters::storage::JsonRepository;
use crate::domain::model::Vendor;
use crate::domain::ranking::{PriceOrder, VendorRanking};
use crate::utils::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingOrder {
    /// Repository order, unsorted.
    Stored,
    #[default]
    Rating,
    PriceAsc,
    PriceDesc,
}

impl FromStr for RankingOrder {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stored" => Ok(RankingOrder::Stored),
            "rating" => Ok(RankingOrder::Rating),
            "price-asc" | "price" => Ok(RankingOrder::PriceAsc),
            "price-desc" => Ok(RankingOrder::PriceDesc),
            other => Err(MarketError::validation(format!(
                "Unknown ranking order '{}'. Valid orders: stored, rating, price-asc, price-desc",
                other
            ))),
        }
    }
}

/// Orders an already loaded vendor list.
pub fn rank_vendors(vendors: Vec<Vendor>, order: RankingOrder) -> Vec<Vendor> {
    let ranking: VendorRanking<Vendor> = vendors.into_iter().collect();
    match order {
        RankingOrder::Stored => ranking.into_vec(),
        RankingOrder::Rating => ranking.sorted_by_rating_descending(),
        RankingOrder::PriceAsc => ranking.sorted_by_price(true),
        RankingOrder::PriceDesc => ranking.sorted_by_price(false),
    }
}

/// Vendor listings backed by a [`VendorRanking`] rebuilt on every call.
#[derive(Clone)]
pub struct VendorListService {
    vendors: JsonRepository<Vendor>,
}

impl VendorListService {
    pub fn new(vendors: JsonRepository<Vendor>) -> Self {
        Self { vendors }
    }

    async fn ranking(&self) -> Result<VendorRanking<Vendor>> {
        let ranking: VendorRanking<Vendor> = self.vendors.find_all().await?.into_iter().collect();
        tracing::debug!("Rebuilt vendor ranking with {} vendors", ranking.len());
        Ok(ranking)
    }

    pub async fn all(&self) -> Result<Vec<Vendor>> {
        Ok(self.ranking().await?.into_vec())
    }

    pub async fn sorted_by_rating(&self) -> Result<Vec<Vendor>> {
        Ok(self.ranking().await?.sorted_by_rating_descending())
    }

    pub async fn sorted_by_price(&self, order: PriceOrder) -> Result<Vec<Vendor>> {
        Ok(self.ranking().await?.sorted_by_price(order.is_ascending()))
    }

    pub async fn ordered(&self, order: RankingOrder) -> Result<Vec<Vendor>> {
        Ok(rank_vendors(self.vendors.find_all().await?, order))
    }

    pub async fn export(&self, order: RankingOrder, format: ExportFormat) -> Result<String> {
        let vendors = self.ordered(order).await?;
        render_ranking(&vendors, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use std::sync::Arc;

    async fn seeded() -> VendorListService {
        let repo: JsonRepository<Vendor> = JsonRepository::new(Arc::new(MemoryStorage::new()));
        for (id, rating, price) in [("A", 3.0, 100.0), ("B", 5.0, 50.0), ("C", 5.0, 200.0)] {
            let mut vendor = Vendor::default();
            vendor.account.id = id.to_string();
            vendor.rating = rating;
            vendor.base_price = price;
            repo.save(vendor).await.unwrap();
        }
        VendorListService::new(repo)
    }

    fn ids(vendors: Vec<Vendor>) -> Vec<String> {
        vendors.into_iter().map(|v| v.account.id).collect()
    }

    #[tokio::test]
    async fn test_listings_follow_ranking_rules() {
        let service = seeded().await;
        assert_eq!(ids(service.all().await.unwrap()), vec!["A", "B", "C"]);
        assert_eq!(ids(service.sorted_by_rating().await.unwrap()), vec!["B", "C", "A"]);
        assert_eq!(
            ids(service.sorted_by_price(PriceOrder::Asc).await.unwrap()),
            vec!["B", "A", "C"]
        );
        assert_eq!(
            ids(service.sorted_by_price(PriceOrder::Desc).await.unwrap()),
            vec!["C", "A", "B"]
        );
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let service = VendorListService::new(JsonRepository::new(Arc::new(MemoryStorage::new())));
        assert!(service.sorted_by_rating().await.unwrap().is_empty());
        assert!(service.sorted_by_price(PriceOrder::Desc).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_csv_in_rating_order() {
        let service = seeded().await;
        let csv = service.export(RankingOrder::Rating, ExportFormat::Csv).await.unwrap();
        let ids: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rank_vendors_without_repository() {
        let vendors: Vec<Vendor> = [("A", 3.0, 100.0), ("B", 5.0, 50.0), ("C", 5.0, 200.0)]
            .into_iter()
            .map(|(id, rating, price)| {
                let mut vendor = Vendor::default();
                vendor.account.id = id.to_string();
                vendor.rating = rating;
                vendor.base_price = price;
                vendor
            })
            .collect();

        assert_eq!(ids(rank_vendors(vendors.clone(), RankingOrder::Stored)), vec!["A", "B", "C"]);
        assert_eq!(ids(rank_vendors(vendors.clone(), RankingOrder::Rating)), vec!["B", "C", "A"]);
        assert_eq!(ids(rank_vendors(vendors, RankingOrder::PriceDesc)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_parse_order() {
        assert_eq!("price-desc".parse::<RankingOrder>().unwrap(), RankingOrder::PriceDesc);
        assert_eq!("Rating".parse::<RankingOrder>().unwrap(), RankingOrder::Rating);
        assert!("popularity".parse::<RankingOrder>().is_err());
    }
}
