mod common;

use common::{district_payload, site_payload, test_db};
use serde_json::json;
use sitetrack::domain::EntityKind;
use sitetrack::error::AppError;
use sitetrack::storage::repository::{
    ActivityRepository, AssetRepository, DistrictPatch, DistrictRepository, NewActivity, NewAsset,
    NewProgram, NewStaff, ProgramRepository, SitePatch, SiteRepository, StaffRepository,
};

#[tokio::test]
async fn created_district_reads_back_identically() {
    let db = test_db().await;
    let created = DistrictRepository::create(
        &db,
        sitetrack::storage::repository::NewDistrict {
            name: "North".to_string(),
            region: Some("Highlands".to_string()),
            contact_person: Some("Nomsa Dube".to_string()),
            contact_email: Some("nomsa@example.org".to_string()),
            contact_phone: None,
        },
    )
    .await
    .unwrap();

    let fetched = DistrictRepository::get(&db, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "North");
    assert_eq!(fetched.region.as_deref(), Some("Highlands"));
    assert_eq!(fetched.contact_phone, None);
}

#[tokio::test]
async fn empty_patch_is_a_no_op() {
    let db = test_db().await;
    DistrictRepository::create(&db, district_payload("North")).await.unwrap();
    let site = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();

    let after_site = SiteRepository::update(&db, site.id, SitePatch::default())
        .await
        .unwrap();
    assert_eq!(after_site, site);

    let district = DistrictRepository::list(&db).await.unwrap().remove(0);
    let after_district = DistrictRepository::update(&db, district.id, DistrictPatch::default())
        .await
        .unwrap();
    assert_eq!(after_district, district);
}

#[tokio::test]
async fn subset_patch_touches_only_supplied_fields() {
    let db = test_db().await;
    DistrictRepository::create(&db, district_payload("North")).await.unwrap();
    let site = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();

    let patch: SitePatch =
        serde_json::from_value(json!({ "name": "Renamed Hub", "classrooms": 4 })).unwrap();
    let updated = SiteRepository::update(&db, site.id, patch).await.unwrap();

    assert_eq!(updated.name, "Renamed Hub");
    assert_eq!(updated.classrooms, Some(4));
    // 其余字段保持原值
    assert_eq!(updated.site_id, site.site_id);
    assert_eq!(updated.district, site.district);
    assert_eq!(updated.operational_status, site.operational_status);
    assert_eq!(updated.notes, site.notes);
}

#[tokio::test]
async fn patch_of_missing_row_is_not_found() {
    let db = test_db().await;
    let err = SiteRepository::update(&db, 999, SitePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("site")));
}

#[tokio::test]
async fn district_delete_is_guarded_by_referencing_sites() {
    let db = test_db().await;
    let district = DistrictRepository::create(&db, district_payload("North"))
        .await
        .unwrap();
    let site = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();

    let err = DistrictRepository::delete(&db, district.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(DistrictRepository::get(&db, district.id).await.unwrap().is_some());

    assert!(SiteRepository::delete(&db, site.id).await.unwrap());
    assert!(DistrictRepository::delete(&db, district.id).await.unwrap());
    assert!(DistrictRepository::get(&db, district.id).await.unwrap().is_none());
}

#[tokio::test]
async fn site_moved_between_districts_frees_the_old_one() {
    let db = test_db().await;
    let north = DistrictRepository::create(&db, district_payload("North"))
        .await
        .unwrap();
    DistrictRepository::create(&db, district_payload("South"))
        .await
        .unwrap();
    let site = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();

    assert!(DistrictRepository::delete(&db, north.id).await.is_err());

    let patch: SitePatch = serde_json::from_value(json!({ "district": "South" })).unwrap();
    let moved = SiteRepository::update(&db, site.id, patch).await.unwrap();
    assert_eq!(moved.district, "South");

    assert!(DistrictRepository::delete(&db, north.id).await.unwrap());
}

#[tokio::test]
async fn site_create_requires_existing_district() {
    let db = test_db().await;
    let err = SiteRepository::create(&db, site_payload("ST-001", "Nowhere"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("district")));
    assert!(SiteRepository::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn child_create_with_dangling_site_id_writes_nothing() {
    let db = test_db().await;

    let staff: NewStaff = serde_json::from_value(json!({
        "staffId": "SF-001",
        "firstName": "Thabo",
        "lastName": "Nkosi",
        "siteId": 42,
    }))
    .unwrap();
    let err = StaffRepository::create(&db, staff).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("site")));
    assert!(StaffRepository::list(&db).await.unwrap().is_empty());

    let asset: NewAsset = serde_json::from_value(json!({
        "assetId": "AS-001",
        "name": "Projector",
        "category": "Electronics",
        "condition": "Good",
        "siteId": 42,
    }))
    .unwrap();
    let err = AssetRepository::create(&db, asset).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("site")));
    assert!(AssetRepository::list(&db).await.unwrap().is_empty());

    let program: NewProgram = serde_json::from_value(json!({
        "programId": "PR-001",
        "name": "Literacy",
        "category": "Education",
        "status": "Active",
        "siteId": 42,
    }))
    .unwrap();
    let err = ProgramRepository::create(&db, program).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("site")));
    assert!(ProgramRepository::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_unique_keys_surface_as_conflict() {
    let db = test_db().await;
    DistrictRepository::create(&db, district_payload("North")).await.unwrap();
    SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();

    let err = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn asset_serial_numbers_default_to_empty_list() {
    let db = test_db().await;
    let asset: NewAsset = serde_json::from_value(json!({
        "assetId": "AS-001",
        "name": "Projector",
        "category": "Electronics",
        "condition": "Good",
    }))
    .unwrap();
    let created = AssetRepository::create(&db, asset).await.unwrap();
    assert!(created.serial_numbers.is_empty());
    assert!(created.images.is_empty());
    assert_eq!(created.site_id, None);
}

#[tokio::test]
async fn staff_list_fields_round_trip() {
    let db = test_db().await;
    let staff: NewStaff = serde_json::from_value(json!({
        "staffId": "SF-001",
        "firstName": "Thabo",
        "lastName": "Nkosi",
        "qualifications": ["BEd", "Diploma in ICT"],
        "skills": ["facilitation"],
    }))
    .unwrap();
    let created = StaffRepository::create(&db, staff).await.unwrap();
    assert_eq!(
        created.qualifications,
        vec!["BEd".to_string(), "Diploma in ICT".to_string()]
    );
    assert_eq!(created.skills, vec!["facilitation".to_string()]);

    let fetched = StaffRepository::get(&db, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn activities_filter_by_site_and_user() {
    let db = test_db().await;
    DistrictRepository::create(&db, district_payload("North")).await.unwrap();
    let site = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();

    let for_site: NewActivity = serde_json::from_value(json!({
        "type": "site_visit",
        "description": "Quarterly inspection",
        "relatedEntityId": site.id,
        "relatedEntityType": "site",
        "performedBy": 1,
    }))
    .unwrap();
    ActivityRepository::create(&db, for_site).await.unwrap();

    let unrelated: NewActivity = serde_json::from_value(json!({
        "type": "data_verification",
        "description": "Checked enrolment numbers",
        "performedBy": 2,
    }))
    .unwrap();
    ActivityRepository::create(&db, unrelated).await.unwrap();

    let site_feed = ActivityRepository::list_for_site(&db, site.id).await.unwrap();
    assert_eq!(site_feed.len(), 1);
    assert_eq!(site_feed[0].kind, "site_visit");
    assert_eq!(site_feed[0].related_entity_type, Some(EntityKind::Site));
    assert_eq!(site_feed[0].related_entity_id, Some(site.id));

    let user_feed = ActivityRepository::list_for_user(&db, 1).await.unwrap();
    assert_eq!(user_feed.len(), 1);
    assert_eq!(user_feed[0].performed_by, Some(1));

    let all = ActivityRepository::list(&db).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn activity_metadata_merges_shallowly() {
    let db = test_db().await;
    let new: NewActivity = serde_json::from_value(json!({
        "type": "site_visit",
        "description": "Initial visit",
        "metadata": { "weather": "sunny", "attendees": 12 },
    }))
    .unwrap();
    let created = ActivityRepository::create(&db, new).await.unwrap();

    let incoming = json!({ "attendees": 15, "followUp": true });
    let incoming = incoming.as_object().cloned().unwrap();
    let updated = ActivityRepository::merge_metadata(&db, created.id, incoming)
        .await
        .unwrap();

    let meta = updated.metadata.unwrap();
    assert_eq!(meta["weather"], "sunny");
    assert_eq!(meta["attendees"], 15);
    assert_eq!(meta["followUp"], true);
    // 其余字段不可通过 PATCH 改写
    assert_eq!(updated.description, "Initial visit");
}

#[tokio::test]
async fn delete_returns_false_for_missing_rows() {
    let db = test_db().await;
    assert!(!SiteRepository::delete(&db, 1).await.unwrap());
    assert!(!StaffRepository::delete(&db, 1).await.unwrap());
    assert!(!ActivityRepository::delete(&db, 1).await.unwrap());
}
