use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use sitetrack::storage::init_schema;
use sitetrack::storage::repository::{NewDistrict, NewSite, NewUser};

/// 低成本加速测试，不用于生产
pub const TEST_BCRYPT_COST: u32 = 4;

/// 单连接内存库：多连接的 :memory: 会各自拿到一个独立的空库
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("connect in-memory sqlite");
    init_schema(&db).await.expect("create tables");
    db
}

pub fn district_payload(name: &str) -> NewDistrict {
    NewDistrict {
        name: name.to_string(),
        region: None,
        contact_person: None,
        contact_email: None,
        contact_phone: None,
    }
}

pub fn site_payload(site_id: &str, district: &str) -> NewSite {
    serde_json::from_value(json!({
        "siteId": site_id,
        "name": format!("Site {site_id}"),
        "type": "Learning Center",
        "district": district,
        "operationalStatus": "Operational",
        "assessmentStatus": "Assessed",
    }))
    .expect("valid site payload")
}

pub fn user_payload(username: &str, password: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: password.to_string(),
        name: format!("Test {username}"),
        role: "Viewer".to_string(),
        email: None,
        phone: None,
    }
}
