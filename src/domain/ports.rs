use crate::domain::model::{Admin, Booking, Couple, Offering, Review, Task, User, Vendor, Wedding};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Byte-level access to the data directory.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Relative names of every stored file, sorted.
    async fn list_files(&self) -> Result<Vec<String>>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn data_dir(&self) -> &str;
    fn cors_origins(&self) -> &[String];
}

/// A record persisted as one element of a JSON array file.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// File name inside the data directory.
    const COLLECTION: &'static str;
    /// Human readable name used in not-found errors.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

impl Entity for User {
    const COLLECTION: &'static str = "users.json";
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Admin {
    const COLLECTION: &'static str = "admins.json";
    const KIND: &'static str = "Admin";

    fn id(&self) -> &str {
        &self.account.id
    }

    fn set_id(&mut self, id: String) {
        self.account.id = id;
    }
}

impl Entity for Couple {
    const COLLECTION: &'static str = "couples.json";
    const KIND: &'static str = "Couple";

    fn id(&self) -> &str {
        &self.account.id
    }

    fn set_id(&mut self, id: String) {
        self.account.id = id;
    }
}

impl Entity for Vendor {
    const COLLECTION: &'static str = "vendors.json";
    const KIND: &'static str = "Vendor";

    fn id(&self) -> &str {
        &self.account.id
    }

    fn set_id(&mut self, id: String) {
        self.account.id = id;
    }
}

impl Entity for Booking {
    const COLLECTION: &'static str = "bookings.json";
    const KIND: &'static str = "Booking";

    fn id(&self) -> &str {
        &self.booking_id
    }

    fn set_id(&mut self, id: String) {
        self.booking_id = id;
    }
}

impl Entity for Review {
    const COLLECTION: &'static str = "reviews.json";
    const KIND: &'static str = "Review";

    fn id(&self) -> &str {
        &self.review_id
    }

    fn set_id(&mut self, id: String) {
        self.review_id = id;
    }
}

impl Entity for Task {
    const COLLECTION: &'static str = "tasks.json";
    const KIND: &'static str = "Task";

    fn id(&self) -> &str {
        &self.task_id
    }

    fn set_id(&mut self, id: String) {
        self.task_id = id;
    }
}

impl Entity for Wedding {
    const COLLECTION: &'static str = "weddings.json";
    const KIND: &'static str = "Wedding";

    fn id(&self) -> &str {
        &self.wedding_id
    }

    fn set_id(&mut self, id: String) {
        self.wedding_id = id;
    }
}

impl Entity for Offering {
    const COLLECTION: &'static str = "services.json";
    const KIND: &'static str = "Service";

    fn id(&self) -> &str {
        &self.service_id
    }

    fn set_id(&mut self, id: String) {
        self.service_id = id;
    }
}
