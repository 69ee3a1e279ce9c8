use crate::adapters::storage::JsonRepository;
use crate::core::{ensure_id, keep_password};
use crate::domain::model::{
    Location, PortfolioItem, ServicePackage, SocialMediaPlatform, UserRole, Vendor, VendorStatus,
    VendorType,
};
use crate::domain::ranking::VendorRanking;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{validate_email, validate_non_negative};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Filters for vendor search. Every field is optional; absent fields match all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSearchCriteria {
    pub vendor_type: Option<VendorType>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub availability_date: Option<NaiveDate>,
    pub keywords: Option<Vec<String>>,
}

impl VendorSearchCriteria {
    pub fn matches(&self, vendor: &Vendor) -> bool {
        if let Some(vendor_type) = self.vendor_type {
            if vendor.vendor_type != Some(vendor_type) {
                return false;
            }
        }
        if self.min_rating.is_some_and(|min| vendor.rating < min) {
            return false;
        }
        if self.max_rating.is_some_and(|max| vendor.rating > max) {
            return false;
        }
        if self.min_price.is_some_and(|min| vendor.base_price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| vendor.base_price > max) {
            return false;
        }
        if let Some(date) = self.availability_date {
            if !vendor.availability.contains(&date) {
                return false;
            }
        }
        match &self.keywords {
            Some(keywords) if !keywords.is_empty() => keywords.iter().any(|keyword| {
                let keyword = keyword.trim().to_lowercase();
                vendor.account.name.to_lowercase().contains(&keyword)
                    || vendor
                        .business_name
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&keyword))
            }),
            _ => true,
        }
    }
}

/// Vendor plus its location, social links and packages, created in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfileRequest {
    pub vendor: Vendor,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub social_media_links: HashMap<SocialMediaPlatform, String>,
    #[serde(default)]
    pub service_packages: Vec<ServicePackage>,
}

/// Fields owned by the admin review flow, the review ratings and the
/// sub-resource endpoints. A profile update never overwrites them.
fn keep_managed_fields(incoming: &mut Vendor, stored: &Vendor) {
    keep_password(&mut incoming.account, &stored.account);
    incoming.rating = stored.rating;
    incoming.status = stored.status;
    incoming.approval_date = stored.approval_date;
    incoming.rejection_reason = stored.rejection_reason.clone();
    incoming.rejection_date = stored.rejection_date;
    incoming.portfolio_items = stored.portfolio_items.clone();
    incoming.service_packages = stored.service_packages.clone();
    incoming.social_media_links = stored.social_media_links.clone();
}

fn validate_social_link(platform: SocialMediaPlatform, link: &str) -> Result<()> {
    crate::utils::validation::validate_url(platform.display_name(), link)
        .map_err(|e| MarketError::validation(e.to_string()))
}

fn validate_vendor(vendor: &Vendor) -> Result<()> {
    validate_email("email", &vendor.account.email)?;
    validate_non_negative("basePrice", vendor.base_price)?;
    validate_non_negative("rating", vendor.rating)?;
    Ok(())
}

#[derive(Clone)]
pub struct VendorService {
    vendors: JsonRepository<Vendor>,
}

impl VendorService {
    pub fn new(vendors: JsonRepository<Vendor>) -> Self {
        Self { vendors }
    }

    pub async fn list(&self) -> Result<Vec<Vendor>> {
        self.vendors.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Vendor> {
        self.vendors.get(id).await
    }

    /// New vendors always start as `PENDING` until an admin approves them.
    pub async fn create(&self, mut vendor: Vendor) -> Result<Vendor> {
        validate_vendor(&vendor)?;
        ensure_id(&mut vendor, "");
        if self.vendors.find_by_id(&vendor.account.id).await?.is_some() {
            return Err(MarketError::Conflict {
                message: format!("vendor '{}' already exists", vendor.account.id),
            });
        }
        vendor.account.role = Some(UserRole::Vendor);
        vendor.status = VendorStatus::Pending;

        let vendor = self.vendors.save(vendor).await?;
        tracing::info!(vendor_id = %vendor.account.id, "Registered vendor");
        Ok(vendor)
    }

    /// Registers a vendor together with its location, social links and
    /// packages. Everything is validated before anything is written.
    pub async fn create_profile(&self, request: VendorProfileRequest) -> Result<Vendor> {
        let VendorProfileRequest {
            mut vendor,
            location,
            social_media_links,
            service_packages,
        } = request;

        if let Some(location) = location {
            if let Some(radius) = location.service_radius {
                validate_non_negative("serviceRadius", radius)?;
            }
            vendor.location = location;
        }
        for (platform, link) in social_media_links {
            validate_social_link(platform, &link)?;
            vendor.social_media_links.insert(platform, link);
        }
        for mut package in service_packages {
            validate_non_negative("basePrice", package.base_price)?;
            if package.id.trim().is_empty() {
                package.id = uuid::Uuid::new_v4().to_string();
            }
            vendor.service_packages.push(package);
        }

        self.create(vendor).await
    }

    /// Replaces the profile fields. Status, rating and the collections
    /// managed through their own endpoints stay as stored.
    pub async fn update(&self, id: &str, mut vendor: Vendor) -> Result<Vendor> {
        validate_vendor(&vendor)?;
        vendor.account.id = id.to_string();
        vendor.account.role = Some(UserRole::Vendor);
        self.vendors
            .modify(id, |stored| {
                keep_managed_fields(&mut vendor, stored);
                *stored = vendor;
                Ok(())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.vendors.delete(id).await? {
            return Err(MarketError::not_found("Vendor", id));
        }
        tracing::info!(vendor_id = %id, "Deleted vendor");
        Ok(())
    }

    pub async fn search(&self, criteria: &VendorSearchCriteria) -> Result<Vec<Vendor>> {
        let vendors = self.vendors.find_where(|v| criteria.matches(v)).await?;
        tracing::debug!("Vendor search matched {} vendors", vendors.len());
        Ok(vendors)
    }

    pub async fn top_rated(&self) -> Result<Vec<Vendor>> {
        let ranking: VendorRanking<Vendor> = self.vendors.find_all().await?.into_iter().collect();
        Ok(ranking.sorted_by_rating_descending())
    }

    /// Vendors whose base price falls inside the bounds, cheapest first.
    pub async fn price_range(&self, min_price: Option<f64>, max_price: Option<f64>) -> Result<Vec<Vendor>> {
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(MarketError::validation(format!(
                    "minPrice ({}) must not exceed maxPrice ({})",
                    min, max
                )));
            }
        }
        let criteria = VendorSearchCriteria {
            min_price,
            max_price,
            ..Default::default()
        };
        let ranking: VendorRanking<Vendor> = self.search(&criteria).await?.into_iter().collect();
        Ok(ranking.sorted_by_price(true))
    }

    pub async fn portfolio(&self, id: &str) -> Result<Vec<PortfolioItem>> {
        Ok(self.get(id).await?.portfolio_items)
    }

    pub async fn add_portfolio_item(&self, id: &str, mut item: PortfolioItem) -> Result<PortfolioItem> {
        if item.id.trim().is_empty() {
            item.id = uuid::Uuid::new_v4().to_string();
        }
        let added = item.clone();
        self.vendors
            .modify(id, |vendor| {
                vendor.portfolio_items.push(item);
                Ok(())
            })
            .await?;
        Ok(added)
    }

    pub async fn remove_portfolio_item(&self, id: &str, item_id: &str) -> Result<()> {
        self.vendors
            .modify(id, |vendor| {
                vendor.portfolio_items.retain(|item| item.id != item_id);
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn packages(&self, id: &str) -> Result<Vec<ServicePackage>> {
        Ok(self.get(id).await?.service_packages)
    }

    pub async fn add_package(&self, id: &str, mut package: ServicePackage) -> Result<ServicePackage> {
        validate_non_negative("basePrice", package.base_price)?;
        if package.id.trim().is_empty() {
            package.id = uuid::Uuid::new_v4().to_string();
        }
        let added = package.clone();
        self.vendors
            .modify(id, |vendor| {
                vendor.service_packages.push(package);
                Ok(())
            })
            .await?;
        Ok(added)
    }

    pub async fn remove_package(&self, id: &str, package_id: &str) -> Result<()> {
        self.vendors
            .modify(id, |vendor| {
                vendor.service_packages.retain(|p| p.id != package_id);
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn location(&self, id: &str) -> Result<Location> {
        Ok(self.get(id).await?.location)
    }

    /// A missing service radius in the request keeps the stored one.
    pub async fn update_location(&self, id: &str, mut location: Location) -> Result<Location> {
        if let Some(radius) = location.service_radius {
            validate_non_negative("serviceRadius", radius)?;
        }
        let vendor = self
            .vendors
            .modify(id, |vendor| {
                if location.service_radius.is_none() {
                    location.service_radius = vendor.location.service_radius;
                }
                vendor.location = location;
                Ok(())
            })
            .await?;
        Ok(vendor.location)
    }

    pub async fn social_links(&self, id: &str) -> Result<HashMap<SocialMediaPlatform, String>> {
        Ok(self.get(id).await?.social_media_links)
    }

    pub async fn add_social_link(
        &self,
        id: &str,
        platform: SocialMediaPlatform,
        link: String,
    ) -> Result<()> {
        validate_social_link(platform, &link)?;
        self.vendors
            .modify(id, |vendor| {
                vendor.social_media_links.insert(platform, link);
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn remove_social_link(&self, id: &str, platform: SocialMediaPlatform) -> Result<()> {
        self.vendors
            .modify(id, |vendor| {
                vendor.social_media_links.remove(&platform);
                Ok(())
            })
            .await?;
        Ok(())
    }
}
