use log::info;
use sitetrack::api::{self, AppState};
use sitetrack::config::Config;
use sitetrack::storage;
use sitetrack::storage::repository::UserRepository;
use std::sync::Arc;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("sitetrack", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let config = Config::from_env();

    let db = storage::establish_connection(&config.database_url).await?;

    // 空库时没有任何账号能通过认证，先播种一个管理员
    UserRepository::ensure_seed_admin(&db, config.bcrypt_cost).await?;

    let state = AppState {
        db,
        config: Arc::new(config.clone()),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
