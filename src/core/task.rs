use crate::adapters::storage::JsonRepository;
use crate::core::ensure_id;
use crate::domain::model::Task;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::validate_non_empty_string;

pub(crate) fn validate_task(task: &Task) -> Result<()> {
    validate_non_empty_string("name", &task.name)
        .map_err(|_| MarketError::validation("task name is required"))
}

/// Wedding planning checklist.
#[derive(Clone)]
pub struct TaskService {
    tasks: JsonRepository<Task>,
}

impl TaskService {
    pub fn new(tasks: JsonRepository<Task>) -> Self {
        Self { tasks }
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        self.tasks.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Task> {
        self.tasks.get(id).await
    }

    pub async fn pending(&self) -> Result<Vec<Task>> {
        self.tasks.find_where(|t| !t.is_completed).await
    }

    pub async fn by_wedding(&self, wedding_id: &str) -> Result<Vec<Task>> {
        self.tasks.find_where(|t| t.wedding_id == wedding_id).await
    }

    pub async fn create(&self, mut task: Task) -> Result<Task> {
        validate_task(&task)?;
        ensure_id(&mut task, "task-");
        let task = self.tasks.save(task).await?;
        tracing::info!(task_id = %task.task_id, wedding_id = %task.wedding_id, "Created task");
        Ok(task)
    }

    pub async fn update(&self, id: &str, mut task: Task) -> Result<Task> {
        task.task_id = id.to_string();
        if !self.tasks.update(task.clone()).await? {
            return Err(MarketError::not_found("Task", id));
        }
        Ok(task)
    }

    pub async fn complete(&self, id: &str) -> Result<Task> {
        let task = self
            .tasks
            .modify(id, |task| {
                task.is_completed = true;
                Ok(())
            })
            .await?;
        tracing::info!(task_id = %id, "Task completed");
        Ok(task)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.tasks.delete(id).await? {
            return Err(MarketError::not_found("Task", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use std::sync::Arc;

    fn task(wedding_id: &str, name: &str) -> Task {
        Task {
            wedding_id: wedding_id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pending_and_by_wedding() {
        let service = TaskService::new(JsonRepository::new(Arc::new(MemoryStorage::new())));
        let cake = service.create(task("w-1", "Order cake")).await.unwrap();
        service.create(task("w-1", "Send invitations")).await.unwrap();
        service.create(task("w-2", "Book DJ")).await.unwrap();

        assert!(cake.task_id.starts_with("task-"));
        assert_eq!(service.by_wedding("w-1").await.unwrap().len(), 2);

        let done = service.complete(&cake.task_id).await.unwrap();
        assert!(done.is_completed);

        let pending: Vec<String> = service
            .pending()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(pending, vec!["Send invitations", "Book DJ"]);
    }

    #[tokio::test]
    async fn test_blank_name_and_missing_task() {
        let service = TaskService::new(JsonRepository::new(Arc::new(MemoryStorage::new())));
        let err = service.create(task("w-1", "  ")).await.unwrap_err();
        assert!(matches!(err, MarketError::ValidationError { .. }));

        assert!(matches!(service.complete("task-x").await, Err(MarketError::NotFound { .. })));
        assert!(matches!(
            service.update("task-x", task("w-1", "x")).await,
            Err(MarketError::NotFound { .. })
        ));
        assert!(matches!(service.delete("task-x").await, Err(MarketError::NotFound { .. })));
    }
}
