use crate::adapters::storage::JsonRepository;
use crate::core::{ensure_id, keep_password};
use crate::domain::model::{Admin, Booking, Couple, User, UserRole, Vendor, VendorStatus};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::validate_email;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub total_vendors: usize,
    pub total_couples: usize,
    pub pending_approvals: usize,
    pub total_bookings: usize,
}

#[derive(Clone)]
pub struct AdminService {
    admins: JsonRepository<Admin>,
    users: JsonRepository<User>,
    vendors: JsonRepository<Vendor>,
    couples: JsonRepository<Couple>,
    bookings: JsonRepository<Booking>,
}

impl AdminService {
    pub fn new(
        admins: JsonRepository<Admin>,
        users: JsonRepository<User>,
        vendors: JsonRepository<Vendor>,
        couples: JsonRepository<Couple>,
        bookings: JsonRepository<Booking>,
    ) -> Self {
        Self {
            admins,
            users,
            vendors,
            couples,
            bookings,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Admin> {
        let admin = self
            .admins
            .find_where(|a| a.account.email == email && a.account.password == password)
            .await?
            .into_iter()
            .next();
        match admin {
            Some(admin) => {
                tracing::info!(admin_id = %admin.account.id, "Admin logged in");
                Ok(admin)
            }
            None => {
                tracing::warn!(email = %email, "Rejected admin login");
                Err(MarketError::Unauthorized {
                    message: "invalid email or password".to_string(),
                })
            }
        }
    }

    // 管理員帳號

    pub async fn admins(&self) -> Result<Vec<Admin>> {
        self.admins.find_all().await
    }

    pub async fn admin(&self, id: &str) -> Result<Admin> {
        self.admins.get(id).await
    }

    pub async fn create_admin(&self, mut admin: Admin) -> Result<Admin> {
        validate_email("email", &admin.account.email)?;
        if admin.account.password.is_empty() {
            return Err(MarketError::validation("password is required"));
        }
        ensure_id(&mut admin, "admin-");
        if self.admins.find_by_id(&admin.account.id).await?.is_some() {
            return Err(MarketError::Conflict {
                message: format!("admin '{}' already exists", admin.account.id),
            });
        }
        admin.account.role = Some(UserRole::Admin);
        let admin = self.admins.save(admin).await?;
        tracing::info!(admin_id = %admin.account.id, "Created admin");
        Ok(admin)
    }

    pub async fn update_admin(&self, id: &str, mut admin: Admin) -> Result<Admin> {
        validate_email("email", &admin.account.email)?;
        admin.account.id = id.to_string();
        admin.account.role = Some(UserRole::Admin);
        self.admins
            .modify(id, |stored| {
                keep_password(&mut admin.account, &stored.account);
                *stored = admin;
                Ok(())
            })
            .await
    }

    pub async fn delete_admin(&self, id: &str) -> Result<()> {
        if !self.admins.delete(id).await? {
            return Err(MarketError::not_found("Admin", id));
        }
        tracing::info!(admin_id = %id, "Deleted admin");
        Ok(())
    }

    // 使用者

    pub async fn users(&self) -> Result<Vec<User>> {
        self.users.find_all().await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        if !self.users.delete(id).await? {
            return Err(MarketError::not_found("User", id));
        }
        tracing::info!(user_id = %id, "Admin deleted user");
        Ok(())
    }

    // 廠商審核

    pub async fn vendors(&self) -> Result<Vec<Vendor>> {
        self.vendors.find_all().await
    }

    pub async fn vendor(&self, id: &str) -> Result<Vendor> {
        self.vendors.get(id).await
    }

    pub async fn delete_vendor(&self, id: &str) -> Result<()> {
        if !self.vendors.delete(id).await? {
            return Err(MarketError::not_found("Vendor", id));
        }
        tracing::info!(vendor_id = %id, "Admin deleted vendor");
        Ok(())
    }

    /// Approval starts the vendor over at a `0.0` rating.
    pub async fn approve_vendor(&self, id: &str) -> Result<Vendor> {
        let vendor = self
            .vendors
            .modify(id, |vendor| {
                vendor.status = VendorStatus::Approved;
                vendor.approval_date = Some(Utc::now());
                vendor.rejection_reason = None;
                vendor.rejection_date = None;
                vendor.rating = 0.0;
                Ok(())
            })
            .await?;
        tracing::info!(vendor_id = %id, "Vendor approved");
        Ok(vendor)
    }

    pub async fn reject_vendor(&self, id: &str, reason: Option<String>) -> Result<Vendor> {
        let vendor = self
            .vendors
            .modify(id, |vendor| {
                vendor.status = VendorStatus::Rejected;
                vendor.rejection_reason = reason.filter(|r| !r.trim().is_empty());
                vendor.rejection_date = Some(Utc::now());
                vendor.approval_date = None;
                Ok(())
            })
            .await?;
        tracing::info!(
            vendor_id = %id,
            reason = vendor.rejection_reason.as_deref().unwrap_or("-"),
            "Vendor rejected"
        );
        Ok(vendor)
    }

    // 新人

    pub async fn couples(&self) -> Result<Vec<Couple>> {
        self.couples.find_all().await
    }

    pub async fn couple(&self, id: &str) -> Result<Couple> {
        self.couples.get(id).await
    }

    pub async fn delete_couple(&self, id: &str) -> Result<()> {
        if !self.couples.delete(id).await? {
            return Err(MarketError::not_found("Couple", id));
        }
        tracing::info!(couple_id = %id, "Admin deleted couple");
        Ok(())
    }

    pub async fn stats(&self) -> Result<AdminStats> {
        let vendors = self.vendors.find_all().await?;
        let stats = AdminStats {
            total_users: self.users.count().await?,
            total_vendors: vendors.len(),
            total_couples: self.couples.count().await?,
            pending_approvals: vendors
                .iter()
                .filter(|v| v.status == VendorStatus::Pending)
                .count(),
            total_bookings: self.bookings.count().await?,
        };
        tracing::debug!(?stats, "Computed admin stats");
        Ok(stats)
    }
}
