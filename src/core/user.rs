use crate::adapters::storage::JsonRepository;
use crate::core::{ensure_id, keep_password};
use crate::domain::model::User;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::validate_email;

#[derive(Clone)]
pub struct UserService {
    users: JsonRepository<User>,
}

impl UserService {
    pub fn new(users: JsonRepository<User>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.users.get(id).await
    }

    pub async fn create(&self, mut user: User) -> Result<User> {
        validate_email("email", &user.email)?;
        ensure_id(&mut user, "");
        if self.users.find_by_id(&user.id).await?.is_some() {
            return Err(MarketError::Conflict {
                message: format!("user '{}' already exists", user.id),
            });
        }

        let user = self.users.save(user).await?;
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    pub async fn update(&self, id: &str, mut user: User) -> Result<User> {
        validate_email("email", &user.email)?;
        user.id = id.to_string();
        self.users
            .modify(id, |stored| {
                keep_password(&mut user, stored);
                *stored = user;
                Ok(())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.users.delete(id).await? {
            return Err(MarketError::not_found("User", id));
        }
        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
