use crate::adapters::storage::{JsonRepository, LocalStorage};
use crate::core::{
    AdminService, BookingService, CoupleService, OfferingService, ReviewService, TaskService,
    UserService, VendorListService, VendorService, WeddingService,
};
use crate::domain::model::{
    Admin, Booking, Couple, Offering, Review, Task, User, Vendor, Wedding,
};
use crate::domain::ports::Storage;
use std::path::Path;
use std::sync::Arc;

/// Shared handler state. Repositories over the same collection share one
/// lock, so every service writing `vendors.json` is serialized together.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub users: UserService,
    pub couples: CoupleService,
    pub vendors: VendorService,
    pub vendor_list: VendorListService,
    pub bookings: BookingService,
    pub reviews: ReviewService,
    pub tasks: TaskService,
    pub weddings: WeddingService,
    pub offerings: OfferingService,
    pub admin: AdminService,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let users: JsonRepository<User> = JsonRepository::new(storage.clone());
        let admins: JsonRepository<Admin> = JsonRepository::new(storage.clone());
        let couples: JsonRepository<Couple> = JsonRepository::new(storage.clone());
        let vendors: JsonRepository<Vendor> = JsonRepository::new(storage.clone());
        let bookings: JsonRepository<Booking> = JsonRepository::new(storage.clone());
        let reviews: JsonRepository<Review> = JsonRepository::new(storage.clone());
        let tasks: JsonRepository<Task> = JsonRepository::new(storage.clone());
        let weddings: JsonRepository<Wedding> = JsonRepository::new(storage.clone());
        let offerings: JsonRepository<Offering> = JsonRepository::new(storage.clone());

        let task_service = TaskService::new(tasks);

        Self {
            users: UserService::new(users.clone()),
            couples: CoupleService::new(couples.clone(), users.clone()),
            vendors: VendorService::new(vendors.clone()),
            vendor_list: VendorListService::new(vendors.clone()),
            bookings: BookingService::new(bookings.clone(), weddings.clone(), vendors.clone()),
            reviews: ReviewService::new(reviews, vendors.clone()),
            weddings: WeddingService::new(weddings, task_service.clone()),
            tasks: task_service,
            offerings: OfferingService::new(offerings),
            admin: AdminService::new(admins, users, vendors, couples, bookings),
            storage,
        }
    }

    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(LocalStorage::new(data_dir.as_ref())))
    }
}
