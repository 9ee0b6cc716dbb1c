use log::warn;

const DEFAULT_JWT_SECRET: &str = "dev-only-insecure-secret";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://sitetrack.db?mode=rwc".to_string());
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("JWT_SECRET is not set, falling back to an insecure default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };
        // cost 可按部署机器调整，目标是单次 verify 约 100ms
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        Self {
            database_url,
            bind_addr,
            jwt_secret,
            bcrypt_cost,
        }
    }
}
