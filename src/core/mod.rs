//! Business services. Every call reloads its collections from storage, so no
//! service holds state beyond repository handles.

pub mod admin;
pub mod booking;
pub mod couple;
pub mod offering;
pub mod review;
pub mod task;
pub mod user;
pub mod vendor;
pub mod vendor_list;
pub mod wedding;

pub use admin::{AdminService, AdminStats};
pub use booking::{BookingService, PaymentRequest};
pub use couple::CoupleService;
pub use offering::OfferingService;
pub use review::ReviewService;
pub use task::TaskService;
pub use user::UserService;
pub use vendor::{VendorProfileRequest, VendorSearchCriteria, VendorService};
pub use vendor_list::{RankingOrder, VendorListService};
pub use wedding::{WeddingProfile, WeddingProfileRequest, WeddingService};

use crate::domain::model::Account;
use crate::domain::ports::Entity;

/// Assigns `<prefix><uuid>` when the record has no id yet.
pub(crate) fn ensure_id<T: Entity>(record: &mut T, prefix: &str) {
    if record.id().trim().is_empty() {
        record.set_id(format!("{}{}", prefix, uuid::Uuid::new_v4()));
    }
}

/// Responses never carry passwords, so an update that omits one keeps the stored value.
pub(crate) fn keep_password(incoming: &mut Account, stored: &Account) {
    if incoming.password.is_empty() {
        incoming.password = stored.password.clone();
    }
}
