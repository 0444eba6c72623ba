use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, booking, movie, payment_method, seat, showtime};
use crate::middleware::auth::auth_middleware;
use crate::middleware::rate_limit::create_public_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Register/login get a tighter per-IP limit than the rest of the API
    let public_governor = create_public_governor();

    let auth_public = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor);

    let auth_private = Router::new()
        .route("/refresh", post(auth::refresh))
        .route("/me", get(auth::me))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Catalog browsing (requires auth, like the rest of the API)
    let catalog_routes = Router::new()
        .route("/movies", get(movie::list_movies))
        .route("/movies/now-playing", get(movie::now_playing))
        .route("/movies/{id}", get(movie::get_movie))
        .route("/movies/{id}/showtimes", get(showtime::showtimes_by_movie))
        .route("/theaters/{id}/showtimes", get(showtime::showtimes_by_theater))
        .route("/showtimes/{id}", get(showtime::get_showtime))
        .route("/showtimes/{id}/seats", get(seat::seats_for_showtime))
        .route("/payment-methods", get(payment_method::list_payment_methods))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Booking creation and retrieval, always scoped to the caller
    let booking_routes = Router::new()
        .route("/", post(booking::create_booking))
        .route("/", get(booking::my_bookings))
        .route("/{id}", get(booking::get_booking))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/v1/auth", auth_public.merge(auth_private))
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1", catalog_routes)
        .with_state(state)
}
