use crate::adapters::storage::JsonRepository;
use crate::core::ensure_id;
use crate::core::task::{validate_task, TaskService};
use crate::domain::model::{Task, Wedding};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::validate_non_negative;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingProfileRequest {
    pub wedding: Wedding,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A wedding with the checklist created alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingProfile {
    #[serde(flatten)]
    pub wedding: Wedding,
    pub tasks: Vec<Task>,
}

fn validate_wedding(wedding: &Wedding) -> Result<()> {
    if wedding.couple_id.trim().is_empty() {
        return Err(MarketError::validation("coupleId is required"));
    }
    validate_non_negative("budget", wedding.budget)
}

#[derive(Clone)]
pub struct WeddingService {
    weddings: JsonRepository<Wedding>,
    tasks: TaskService,
}

impl WeddingService {
    pub fn new(weddings: JsonRepository<Wedding>, tasks: TaskService) -> Self {
        Self { weddings, tasks }
    }

    pub async fn list(&self) -> Result<Vec<Wedding>> {
        self.weddings.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Wedding> {
        self.weddings.get(id).await
    }

    pub async fn create(&self, mut wedding: Wedding) -> Result<Wedding> {
        validate_wedding(&wedding)?;
        ensure_id(&mut wedding, "w-");
        let wedding = self.weddings.save(wedding).await?;
        tracing::info!(wedding_id = %wedding.wedding_id, couple_id = %wedding.couple_id, "Created wedding");
        Ok(wedding)
    }

    /// Creates the wedding, then each task stamped with its `weddingId`.
    pub async fn create_profile(&self, request: WeddingProfileRequest) -> Result<WeddingProfile> {
        validate_wedding(&request.wedding)?;
        for task in &request.tasks {
            validate_task(task)?;
        }

        let wedding = self.create(request.wedding).await?;
        let mut tasks = Vec::with_capacity(request.tasks.len());
        for mut task in request.tasks {
            task.wedding_id = wedding.wedding_id.clone();
            tasks.push(self.tasks.create(task).await?);
        }
        tracing::info!(wedding_id = %wedding.wedding_id, tasks = tasks.len(), "Created wedding profile");
        Ok(WeddingProfile { wedding, tasks })
    }

    pub async fn update(&self, id: &str, mut wedding: Wedding) -> Result<Wedding> {
        validate_wedding(&wedding)?;
        wedding.wedding_id = id.to_string();
        if !self.weddings.update(wedding.clone()).await? {
            return Err(MarketError::not_found("Wedding", id));
        }
        Ok(wedding)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.weddings.delete(id).await? {
            return Err(MarketError::not_found("Wedding", id));
        }
        tracing::info!(wedding_id = %id, "Deleted wedding");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::domain::model::WeddingStyle;
    use crate::domain::ports::Storage;
    use std::sync::Arc;

    fn service() -> WeddingService {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        WeddingService::new(
            JsonRepository::new(storage.clone()),
            TaskService::new(JsonRepository::new(storage)),
        )
    }

    fn task(name: &str) -> Task {
        Task {
            name: name.to_string(),
            wedding_id: "elsewhere".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_profile_stamps_tasks() {
        let service = service();
        let profile = service
            .create_profile(WeddingProfileRequest {
                wedding: Wedding {
                    couple_id: "couple-1".to_string(),
                    ..Default::default()
                },
                tasks: vec![task("Book photographer"), task("Send invitations")],
            })
            .await
            .unwrap();

        assert!(profile.wedding.wedding_id.starts_with("w-"));
        assert_eq!(profile.tasks.len(), 2);
        assert!(profile.tasks.iter().all(|t| t.task_id.starts_with("task-")));

        let stored = service.tasks.by_wedding(&profile.wedding.wedding_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].name, "Book photographer");
    }

    #[tokio::test]
    async fn test_create_profile_with_unnamed_task_writes_nothing() {
        let service = service();
        let err = service
            .create_profile(WeddingProfileRequest {
                wedding: Wedding {
                    couple_id: "couple-1".to_string(),
                    ..Default::default()
                },
                tasks: vec![task("Book venue"), task("  ")],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::ValidationError { .. }));
        assert!(service.list().await.unwrap().is_empty());
        assert!(service.tasks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_couple() {
        let err = service().create(Wedding::default()).await.unwrap_err();
        assert!(matches!(err, MarketError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_crud() {
        let service = service();
        let created = service
            .create(Wedding {
                couple_id: "couple-1".to_string(),
                budget: 20000.0,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(created.wedding_id.starts_with("w-"));

        let mut changed = created.clone();
        changed.style = Some(WeddingStyle::Rustic);
        service.update(&created.wedding_id, changed).await.unwrap();
        assert_eq!(
            service.get(&created.wedding_id).await.unwrap().style,
            Some(WeddingStyle::Rustic)
        );

        service.delete(&created.wedding_id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(
            service.delete(&created.wedding_id).await,
            Err(MarketError::NotFound { .. })
        ));
    }
}
