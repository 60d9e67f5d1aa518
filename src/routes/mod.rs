pub mod users;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};

use crate::middleware::require_role;
use crate::models::Role;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    let admin_routes = Router::<SharedState>::new()
        .route("/api/users", post(users::create))
        .route("/api/users/{user_id}", delete(users::delete))
        .route("/api/businesses/{business_id}/users", get(users::list))
        .route_layer(from_fn_with_state(Role::Admin, require_role));

    // Reachable by any member; identity and role checks happen in the handlers.
    let member_routes = Router::<SharedState>::new().route(
        "/api/users/{user_id}",
        get(users::get).put(users::update),
    );

    admin_routes.merge(member_routes)
}
