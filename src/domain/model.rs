use crate::domain::ranking::Rankable;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Couple,
    Vendor,
}

/// 所有使用者共用的帳號欄位
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl Account {
    pub fn redacted(mut self) -> Self {
        self.password.clear();
        self
    }
}

pub type User = Account;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(flatten)]
    pub account: Account,
}

impl Admin {
    pub fn redacted(mut self) -> Self {
        self.account.password.clear();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Couple {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub wedding_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<Account>,
}

impl Couple {
    pub fn redacted(mut self) -> Self {
        self.account.password.clear();
        self.partner = self.partner.map(Account::redacted);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorType {
    Photography,
    Catering,
    Venue,
    Florist,
    Music,
    Dj,
    Decoration,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialMediaPlatform {
    Facebook,
    Instagram,
    Pinterest,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
    Website,
}

impl SocialMediaPlatform {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Pinterest => "Pinterest",
            Self::Twitter => "Twitter",
            Self::Linkedin => "LinkedIn",
            Self::Youtube => "YouTube",
            Self::Tiktok => "TikTok",
            Self::Website => "Website",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub client_testimonial: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub hours_of_coverage: u32,
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub service_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub vendor_type: Option<VendorType>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub availability: Vec<NaiveDate>,
    #[serde(default)]
    pub status: VendorStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub approval_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejection_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
    #[serde(default)]
    pub social_media_links: HashMap<SocialMediaPlatform, String>,
    #[serde(default)]
    pub portfolio_items: Vec<PortfolioItem>,
    #[serde(default)]
    pub service_packages: Vec<ServicePackage>,
}

impl Vendor {
    pub fn is_approved(&self) -> bool {
        self.status == VendorStatus::Approved
    }

    pub fn redacted(mut self) -> Self {
        self.account.password.clear();
        self
    }
}

impl Rankable for Vendor {
    fn ranking_id(&self) -> &str {
        &self.account.id
    }

    fn rating(&self) -> f64 {
        self.rating
    }

    fn base_price(&self) -> f64 {
        self.base_price
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    #[serde(alias = "REQUESTED")]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    PartiallyPaid,
    Paid,
    Refunded,
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub booking_id: String,
    #[serde(default)]
    pub couple_id: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub wedding_id: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub remaining_balance: f64,
    #[serde(default)]
    pub last_payment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl Booking {
    /// 付款後重算餘額與付款狀態
    pub fn apply_payment(&mut self, amount: f64) {
        self.amount_paid += amount;
        self.remaining_balance = self.total_cost - self.amount_paid;
        self.payment_status = self.settled_status();
    }

    /// Re-derives the balance after the totals were edited. Refunded and
    /// cancelled payments keep their status.
    pub fn recompute_balance(&mut self) {
        self.remaining_balance = self.total_cost - self.amount_paid;
        if !matches!(
            self.payment_status,
            PaymentStatus::Refunded | PaymentStatus::Cancelled
        ) {
            self.payment_status = self.settled_status();
        }
    }

    fn settled_status(&self) -> PaymentStatus {
        if self.amount_paid <= 0.0 {
            PaymentStatus::Pending
        } else if self.remaining_balance <= 0.0 {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub review_id: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub couple_id: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub review_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub wedding_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeddingStyle {
    Traditional,
    Modern,
    Rustic,
    Beach,
    Garden,
    Destination,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wedding {
    #[serde(default)]
    pub wedding_id: String,
    #[serde(default)]
    pub couple_id: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub style: Option<WeddingStyle>,
    #[serde(default)]
    pub budget: f64,
}

/// A priced service a vendor offers (stored in `services.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub service_type: Option<VendorType>,
    #[serde(default)]
    pub additional_properties: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vendor_reads_legacy_json() {
        let raw = json!({
            "id": "v-1",
            "email": "lens@example.com",
            "password": "secret",
            "name": "Lens & Light",
            "role": "VENDOR",
            "vendorType": "PHOTOGRAPHY",
            "rating": 4.5,
            "basePrice": 1200.0,
            "availability": ["2025-06-14"],
            "status": "APPROVED",
            "city": "Colombo",
            "socialMediaLinks": {"INSTAGRAM": "https://instagram.com/lens"},
            "unknownField": true
        });

        let vendor: Vendor = serde_json::from_value(raw).unwrap();
        assert_eq!(vendor.account.id, "v-1");
        assert_eq!(vendor.account.role, Some(UserRole::Vendor));
        assert_eq!(vendor.vendor_type, Some(VendorType::Photography));
        assert!(vendor.is_approved());
        assert_eq!(vendor.location.city, "Colombo");
        assert_eq!(vendor.availability[0], NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
        assert_eq!(
            vendor.social_media_links.get(&SocialMediaPlatform::Instagram).map(String::as_str),
            Some("https://instagram.com/lens")
        );
    }

    #[test]
    fn test_vendor_defaults() {
        let vendor: Vendor = serde_json::from_value(json!({"id": "v-2"})).unwrap();
        assert_eq!(vendor.rating, 0.0);
        assert_eq!(vendor.base_price, 0.0);
        assert_eq!(vendor.status, VendorStatus::Pending);
    }

    #[test]
    fn test_vendor_serializes_flat_camel_case() {
        let mut vendor = Vendor::default();
        vendor.account.id = "v-3".to_string();
        vendor.base_price = 300.0;
        vendor.location.zip_code = "10100".to_string();

        let value = serde_json::to_value(&vendor).unwrap();
        assert_eq!(value["id"], "v-3");
        assert_eq!(value["basePrice"], 300.0);
        assert_eq!(value["zipCode"], "10100");
    }

    #[test]
    fn test_booking_payment_transitions() {
        let mut booking = Booking {
            total_cost: 1000.0,
            remaining_balance: 1000.0,
            ..Default::default()
        };

        booking.apply_payment(400.0);
        assert_eq!(booking.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(booking.remaining_balance, 600.0);

        booking.apply_payment(600.0);
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
        assert_eq!(booking.remaining_balance, 0.0);
    }

    #[test]
    fn test_recompute_balance_follows_edited_totals() {
        let mut booking = Booking {
            total_cost: 1000.0,
            ..Default::default()
        };
        booking.apply_payment(1000.0);
        assert_eq!(booking.payment_status, PaymentStatus::Paid);

        booking.total_cost = 1500.0;
        booking.recompute_balance();
        assert_eq!(booking.remaining_balance, 500.0);
        assert_eq!(booking.payment_status, PaymentStatus::PartiallyPaid);

        booking.amount_paid = 0.0;
        booking.recompute_balance();
        assert_eq!(booking.payment_status, PaymentStatus::Pending);

        booking.payment_status = PaymentStatus::Refunded;
        booking.recompute_balance();
        assert_eq!(booking.payment_status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_booking_status_accepts_requested_alias() {
        let booking: Booking =
            serde_json::from_value(json!({"bookingId": "b-1", "status": "REQUESTED"})).unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_task_completion_flag_name() {
        let task = Task {
            task_id: "t-1".to_string(),
            is_completed: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["isCompleted"], true);
    }

    #[test]
    fn test_couple_redacts_partner_password() {
        let couple = Couple {
            account: Account {
                id: "c-1".to_string(),
                password: "pw".to_string(),
                ..Default::default()
            },
            partner: Some(Account {
                password: "pw2".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let couple = couple.redacted();
        assert!(couple.account.password.is_empty());
        assert!(couple.partner.unwrap().password.is_empty());
    }
}
