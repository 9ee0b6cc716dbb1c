pub mod auth_mw;
pub mod handlers;
pub mod validate;

use crate::config::Config;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use handlers::{activities, assets, auth, districts, programs, sites, staff, users};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/districts", get(districts::list).post(districts::create))
        .route(
            "/districts/:id",
            get(districts::get_one)
                .patch(districts::update)
                .delete(districts::remove),
        )
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:id",
            get(users::get_one).patch(users::update).delete(users::remove),
        )
        .route(
            "/users/:id/activities",
            get(users::list_activities).post(users::create_activity),
        )
        .route("/sites", get(sites::list).post(sites::create))
        .route(
            "/sites/:id",
            get(sites::get_one).patch(sites::update).delete(sites::remove),
        )
        .route("/sites/:id/staff", get(sites::list_staff))
        .route("/sites/:id/assets", get(sites::list_assets))
        .route("/sites/:id/programs", get(sites::list_programs))
        .route("/sites/:id/activities", get(sites::list_activities))
        .route("/sites/:id/images", post(sites::add_images))
        .route(
            "/sites/:id/images/:index",
            axum::routing::delete(sites::remove_image),
        )
        .route("/staff", get(staff::list).post(staff::create))
        .route(
            "/staff/:id",
            get(staff::get_one).patch(staff::update).delete(staff::remove),
        )
        .route("/assets", get(assets::list).post(assets::create))
        .route(
            "/assets/:id",
            get(assets::get_one)
                .patch(assets::update)
                .delete(assets::remove),
        )
        .route("/programs", get(programs::list).post(programs::create))
        .route(
            "/programs/:id",
            get(programs::get_one)
                .patch(programs::update)
                .delete(programs::remove),
        )
        .route("/activities", get(activities::list).post(activities::create))
        .route(
            "/activities/:id",
            get(activities::get_one)
                .patch(activities::update)
                .delete(activities::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    Router::new()
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .with_state(state)
}
