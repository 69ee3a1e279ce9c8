use crate::adapters::storage::JsonRepository;
use crate::core::{ensure_id, keep_password};
use crate::domain::model::{Couple, User, UserRole};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{validate_email, validate_non_negative};

fn validate_couple(couple: &Couple) -> Result<()> {
    validate_email("email", &couple.account.email)?;
    validate_non_negative("budget", couple.budget)?;
    if let Some(partner) = &couple.partner {
        validate_email("partner.email", &partner.email)?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct CoupleService {
    couples: JsonRepository<Couple>,
    users: JsonRepository<User>,
}

impl CoupleService {
    pub fn new(couples: JsonRepository<Couple>, users: JsonRepository<User>) -> Self {
        Self { couples, users }
    }

    pub async fn list(&self) -> Result<Vec<Couple>> {
        self.couples.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Couple> {
        self.couples.get(id).await
    }

    /// Registers the couple. An embedded partner is stored as its own user
    /// and referenced through `partnerId` afterwards.
    pub async fn create(&self, mut couple: Couple) -> Result<Couple> {
        validate_couple(&couple)?;
        ensure_id(&mut couple, "couple-");
        couple.account.role = Some(UserRole::Couple);

        if let Some(partner) = self.register_partner(&mut couple).await? {
            tracing::info!(couple_id = %couple.account.id, partner_id = %partner, "Registered partner");
        }

        let couple = self.couples.save(couple).await?;
        tracing::info!(couple_id = %couple.account.id, "Registered couple");
        Ok(couple)
    }

    pub async fn update(&self, id: &str, mut couple: Couple) -> Result<Couple> {
        validate_couple(&couple)?;
        couple.account.id = id.to_string();
        couple.account.role = Some(UserRole::Couple);
        // 確認存在後才建立伴侶帳號
        let stored = self.get(id).await?;
        if couple.partner_id.is_none() {
            couple.partner_id = stored.partner_id.clone();
        }
        self.register_partner(&mut couple).await?;

        self.couples
            .modify(id, |stored| {
                keep_password(&mut couple.account, &stored.account);
                *stored = couple;
                Ok(())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.couples.delete(id).await? {
            return Err(MarketError::not_found("Couple", id));
        }
        tracing::info!(couple_id = %id, "Deleted couple");
        Ok(())
    }

    async fn register_partner(&self, couple: &mut Couple) -> Result<Option<String>> {
        let Some(mut partner) = couple.partner.take() else {
            return Ok(None);
        };
        if partner.id.trim().is_empty() {
            partner.id = format!("user-{}", uuid::Uuid::new_v4());
        }
        partner.role = Some(UserRole::Couple);

        match self.users.find_by_id(&partner.id).await? {
            Some(existing) => {
                keep_password(&mut partner, &existing);
                self.users.update(partner.clone()).await?;
            }
            None => {
                self.users.save(partner.clone()).await?;
            }
        }
        couple.partner_id = Some(partner.id.clone());
        Ok(Some(partner.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::domain::model::Account;
    use crate::domain::ports::Storage;
    use std::sync::Arc;

    fn setup() -> (CoupleService, JsonRepository<User>) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let users: JsonRepository<User> = JsonRepository::new(storage.clone());
        (CoupleService::new(JsonRepository::new(storage), users.clone()), users)
    }

    fn couple(partner: Option<Account>) -> Couple {
        Couple {
            account: Account {
                email: "sam@example.com".to_string(),
                password: "pw".to_string(),
                name: "Sam".to_string(),
                ..Default::default()
            },
            budget: 12000.0,
            partner,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_prefixed_id_and_role() {
        let (service, users) = setup();
        let created = service.create(couple(None)).await.unwrap();
        assert!(created.account.id.starts_with("couple-"));
        assert_eq!(created.account.role, Some(UserRole::Couple));
        assert!(created.partner_id.is_none());
        assert!(users.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partner_becomes_linked_user() {
        let (service, users) = setup();
        let partner = Account {
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            ..Default::default()
        };
        let created = service.create(couple(Some(partner))).await.unwrap();

        let partner_id = created.partner_id.clone().unwrap();
        assert!(partner_id.starts_with("user-"));
        assert!(created.partner.is_none());

        let stored = users.get(&partner_id).await.unwrap();
        assert_eq!(stored.name, "Alex");
        assert_eq!(stored.role, Some(UserRole::Couple));
    }

    #[tokio::test]
    async fn test_update_keeps_partner_link_and_password() {
        let (service, _) = setup();
        let partner = Account {
            name: "Alex".to_string(),
            ..Default::default()
        };
        let created = service.create(couple(Some(partner))).await.unwrap();

        let mut changes = couple(None);
        changes.account.password.clear();
        changes.budget = 15000.0;
        let updated = service.update(&created.account.id, changes).await.unwrap();
        assert_eq!(updated.budget, 15000.0);
        assert_eq!(updated.partner_id, created.partner_id);
        assert_eq!(updated.account.password, "pw");
    }

    #[tokio::test]
    async fn test_partner_update_without_password_keeps_it() {
        let (service, users) = setup();
        let partner = Account {
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            password: "partnerpw".to_string(),
            ..Default::default()
        };
        let created = service.create(couple(Some(partner))).await.unwrap();
        let partner_id = created.partner_id.clone().unwrap();

        let renamed = Account {
            id: partner_id.clone(),
            name: "Alexandra".to_string(),
            email: "alex@example.com".to_string(),
            ..Default::default()
        };
        service
            .update(&created.account.id, couple(Some(renamed)))
            .await
            .unwrap();

        let stored = users.get(&partner_id).await.unwrap();
        assert_eq!(stored.name, "Alexandra");
        assert_eq!(stored.password, "partnerpw");
        assert_eq!(users.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_couple() {
        let (service, _) = setup();
        assert!(matches!(service.get("couple-x").await, Err(MarketError::NotFound { .. })));
        assert!(matches!(
            service.update("couple-x", couple(None)).await,
            Err(MarketError::NotFound { .. })
        ));
        assert!(matches!(service.delete("couple-x").await, Err(MarketError::NotFound { .. })));
    }
}
