use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{Method, header},
    middleware::{from_fn, from_fn_with_state},
    routing::{any, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use carstore_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::repository::Store;
use crate::handlers::{
    auth::{get_profile, login, register, update_profile},
    car::{create_car, delete_car, get_car, list_cars, update_car},
    favorite::{add_favorite, check_favorite, count_favorites, list_favorites, remove_favorite},
    health::{healthz, readyz},
    method_not_allowed, moved_to, not_found,
    review::{
        delete_review, get_review, list_car_reviews, list_reviews, post_car_review, post_review,
        update_review,
    },
};
use crate::middleware::{auth::require_auth, preflight::answer_options};
use crate::state::AppState;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router<S: Store>(state: AppState<S>) -> Router {
    let public = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<S>))
        // Auth
        .route("/api/auth/register", post(register::<S>))
        .route("/api/auth/login", post(login::<S>))
        // Cars
        .route("/api/cars", get(list_cars::<S>))
        .route("/api/cars/{id}", get(get_car::<S>))
        .route("/api/cars/{id}/reviews", get(list_car_reviews::<S>))
        // Reviews
        .route("/api/reviews", get(list_reviews::<S>))
        .route("/api/reviews/{id}", get(get_review::<S>))
        // Collection paths with a trailing slash
        .route("/api/cars/", any(|| async { moved_to("/api/cars") }))
        .route("/api/favorites/", any(|| async { moved_to("/api/favorites") }))
        .route("/api/reviews/", any(|| async { moved_to("/api/reviews") }));

    let protected = Router::new()
        // Profile
        .route("/api/auth/profile", get(get_profile::<S>).put(update_profile::<S>))
        // Cars
        .route("/api/cars", post(create_car::<S>))
        .route("/api/cars/{id}", put(update_car::<S>).delete(delete_car::<S>))
        .route("/api/cars/{id}/reviews", post(post_car_review::<S>))
        // Favorites
        .route("/api/favorites", get(list_favorites::<S>).post(add_favorite::<S>))
        .route("/api/favorites/count", get(count_favorites::<S>))
        .route(
            "/api/favorites/{car_id}",
            get(check_favorite::<S>).delete(remove_favorite::<S>),
        )
        // Reviews
        .route("/api/reviews", post(post_review::<S>))
        .route(
            "/api/reviews/{id}",
            put(update_review::<S>).delete(delete_review::<S>),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth::<S>));

    // Anything unrouted is looked up in the front-end bundle; misses get the JSON 404.
    let assets = ServeDir::new(&state.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    public
        .merge(protected)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors())
                .layer(from_fn(answer_options)),
        )
        .with_state(state)
}
