pub mod admin;
pub mod bookings;
pub mod couples;
pub mod health;
pub mod offerings;
pub mod reviews;
pub mod tasks;
pub mod users;
pub mod vendor_list;
pub mod vendors;
pub mod weddings;
