//! axum surface over the services in [`crate::core`].

pub mod error;
pub mod handlers;

use crate::app::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use handlers::{
    admin, bookings, couples, health, offerings, reviews, tasks, users, vendor_list, vendors,
    weddings,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
}

fn couple_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(couples::list).post(couples::create))
        .route(
            "/{id}",
            get(couples::get).put(couples::update).delete(couples::delete),
        )
}

fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(vendors::list).post(vendors::create))
        .route("/profile", post(vendors::create_profile))
        .route(
            "/search",
            get(vendors::search_by_query).post(vendors::search),
        )
        .route("/top-rated", get(vendors::top_rated))
        .route("/price-range", get(vendors::price_range))
        .route(
            "/{id}",
            get(vendors::get).put(vendors::update).delete(vendors::delete),
        )
        .route(
            "/{id}/portfolio",
            get(vendors::portfolio).post(vendors::add_portfolio_item),
        )
        .route(
            "/{id}/portfolio/{item_id}",
            axum::routing::delete(vendors::remove_portfolio_item),
        )
        .route(
            "/{id}/packages",
            get(vendors::packages).post(vendors::add_package),
        )
        .route(
            "/{id}/packages/{package_id}",
            axum::routing::delete(vendors::remove_package),
        )
        .route(
            "/{id}/location",
            get(vendors::location).put(vendors::update_location),
        )
        .route(
            "/{id}/social-media",
            get(vendors::social_links).post(vendors::add_social_link),
        )
        .route(
            "/{id}/social-media/{platform}",
            axum::routing::delete(vendors::remove_social_link),
        )
}

fn vendor_list_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(vendor_list::all))
        .route("/sorted", get(vendor_list::sorted))
        .route("/by-price", get(vendor_list::by_price))
        .route("/export", get(vendor_list::export))
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route(
            "/{id}",
            get(bookings::get).put(bookings::update).delete(bookings::delete),
        )
        .route("/{id}/confirm", put(bookings::confirm))
        .route("/{id}/cancel", put(bookings::cancel))
        .route("/{id}/payment", post(bookings::record_payment))
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list).post(reviews::create))
        .route("/vendor/{vendor_id}", get(reviews::by_vendor))
        .route("/couple/{couple_id}", get(reviews::by_couple))
        .route(
            "/{id}",
            get(reviews::get).put(reviews::update).delete(reviews::delete),
        )
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route("/pending", get(tasks::pending))
        .route("/wedding/{wedding_id}", get(tasks::by_wedding))
        .route(
            "/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        .route("/{id}/complete", put(tasks::complete))
}

fn wedding_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(weddings::list).post(weddings::create))
        .route("/profile", post(weddings::create_profile))
        .route(
            "/{id}",
            get(weddings::get).put(weddings::update).delete(weddings::delete),
        )
}

fn offering_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(offerings::list).post(offerings::create))
        .route(
            "/{id}",
            get(offerings::get).put(offerings::update).delete(offerings::delete),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/admins", get(admin::list_admins).post(admin::create_admin))
        .route(
            "/admins/{id}",
            get(admin::get_admin)
                .put(admin::update_admin)
                .delete(admin::delete_admin),
        )
        .route("/users", get(admin::list_users))
        .route("/users/{id}", axum::routing::delete(admin::delete_user))
        .route("/vendors", get(admin::list_vendors))
        .route(
            "/vendors/{id}",
            get(admin::get_vendor).delete(admin::delete_vendor),
        )
        .route("/vendors/{id}/approve", put(admin::approve_vendor))
        .route("/vendors/{id}/reject", put(admin::reject_vendor))
        .route("/couples", get(admin::list_couples))
        .route(
            "/couples/{id}",
            get(admin::get_couple).delete(admin::delete_couple),
        )
        .route("/stats", get(admin::stats))
        .route("/backup", get(admin::backup))
}

/// CORS for the configured origins; any origin when the list contains `*`.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .nest("/user", user_routes())
        .nest("/couple", couple_routes())
        .nest("/vendor", vendor_routes())
        .nest("/vendor-list", vendor_list_routes())
        .nest("/booking", booking_routes())
        .nest("/review", review_routes())
        .nest("/tasks", task_routes())
        .nest("/wedding", wedding_routes())
        .nest("/service", offering_routes())
        .nest("/admin", admin_routes());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
