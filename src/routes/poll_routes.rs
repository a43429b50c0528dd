use axum::{Router, middleware, routing::{get, post}};

use crate::controllers::poll_controllers::{
    cast_vote, check_vote, close_poll, create_poll, get_poll, get_results, get_user_polls, polls,
    reset_poll,
};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(polls::get_all_polls))
        .route("/:poll_id", get(get_poll::get_poll))
        .route("/:poll_id/results", get(get_results::get_results));

    let protected = Router::new()
        .route("/create", post(create_poll::create_poll))
        .route("/mine", get(get_user_polls::get_polls_by_user))
        .route(
            "/:poll_id/vote",
            post(cast_vote::cast_vote).get(check_vote::check_user_vote),
        )
        .route("/:poll_id/close", post(close_poll::close_poll))
        .route("/:poll_id/reset", post(reset_poll::reset_poll))
        .route_layer(middleware::from_fn(jwt_auth));

    public.merge(protected).with_state(state)
}
