use crate::domain::{ASSET_CONDITIONS, PROGRAM_STATUSES, USER_ROLES, USER_STATUSES};
use crate::error::{AppError, AppResult, ValidationErrors};
use crate::storage::repository::{
    AssetPatch, DistrictPatch, NewActivity, NewAsset, NewDistrict, NewProgram, NewSite, NewStaff,
    NewUser, ProgramPatch, SitePatch, StaffPatch, UserPatch,
};
use regex::Regex;
use std::sync::OnceLock;

const PASSWORD_MIN_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// 逐字段收集错误，一次性返回 field -> message 映射
#[derive(Default)]
struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors
                .insert(field.to_string(), format!("{field} is required"));
        }
    }

    fn require_opt(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.require(field, v);
        }
    }

    fn one_of(&mut self, field: &str, value: &str, allowed: &[&str]) {
        if !allowed.contains(&value) {
            self.errors.insert(
                field.to_string(),
                format!("{field} must be one of: {}", allowed.join(", ")),
            );
        }
    }

    fn one_of_opt(&mut self, field: &str, value: Option<&str>, allowed: &[&str]) {
        if let Some(v) = value {
            self.one_of(field, v, allowed);
        }
    }

    fn email_opt(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if !v.is_empty() && !email_regex().is_match(v) {
                self.errors
                    .insert(field.to_string(), "invalid email address".to_string());
            }
        }
    }

    fn password(&mut self, field: &str, value: &str) {
        if value.len() < PASSWORD_MIN_LEN {
            self.errors.insert(
                field.to_string(),
                format!("password must be at least {PASSWORD_MIN_LEN} characters"),
            );
        }
    }

    fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

pub fn new_district(new: &NewDistrict) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("name", &new.name);
    v.email_opt("contactEmail", new.contact_email.as_deref());
    v.finish()
}

pub fn district_patch(patch: &DistrictPatch) -> AppResult<()> {
    let mut v = Validator::default();
    v.require_opt("name", patch.name.as_deref());
    v.email_opt("contactEmail", patch.contact_email.as_deref());
    v.finish()
}

pub fn new_user(new: &NewUser) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("username", &new.username);
    v.require("name", &new.name);
    v.password("password", &new.password);
    v.one_of("role", &new.role, USER_ROLES);
    v.email_opt("email", new.email.as_deref());
    v.finish()
}

pub fn user_patch(patch: &UserPatch) -> AppResult<()> {
    let mut v = Validator::default();
    v.require_opt("username", patch.username.as_deref());
    v.require_opt("name", patch.name.as_deref());
    // 空字符串约定为“不改密码”，非空才检查长度
    if let Some(p) = patch.password.as_deref() {
        if !p.is_empty() {
            v.password("password", p);
        }
    }
    v.one_of_opt("role", patch.role.as_deref(), USER_ROLES);
    v.one_of_opt("status", patch.status.as_deref(), USER_STATUSES);
    v.email_opt("email", patch.email.as_deref());
    v.finish()
}

pub fn new_site(new: &NewSite) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("siteId", &new.site_id);
    v.require("name", &new.name);
    v.require("type", &new.site_type);
    v.require("district", &new.district);
    v.require("operationalStatus", &new.operational_status);
    v.require("assessmentStatus", &new.assessment_status);
    v.email_opt("contactEmail", new.contact_email.as_deref());
    v.finish()
}

pub fn site_patch(patch: &SitePatch) -> AppResult<()> {
    let mut v = Validator::default();
    v.require_opt("siteId", patch.site_id.as_deref());
    v.require_opt("name", patch.name.as_deref());
    v.require_opt("type", patch.site_type.as_deref());
    v.require_opt("district", patch.district.as_deref());
    v.require_opt("operationalStatus", patch.operational_status.as_deref());
    v.require_opt("assessmentStatus", patch.assessment_status.as_deref());
    v.email_opt("contactEmail", patch.contact_email.as_deref());
    v.finish()
}

pub fn new_staff(new: &NewStaff) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("staffId", &new.staff_id);
    v.require("firstName", &new.first_name);
    v.require("lastName", &new.last_name);
    v.email_opt("email", new.email.as_deref());
    v.finish()
}

pub fn staff_patch(patch: &StaffPatch) -> AppResult<()> {
    let mut v = Validator::default();
    v.require_opt("staffId", patch.staff_id.as_deref());
    v.require_opt("firstName", patch.first_name.as_deref());
    v.require_opt("lastName", patch.last_name.as_deref());
    v.email_opt("email", patch.email.as_deref());
    v.finish()
}

pub fn new_asset(new: &NewAsset) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("assetId", &new.asset_id);
    v.require("name", &new.name);
    v.require("category", &new.category);
    v.one_of("condition", &new.condition, ASSET_CONDITIONS);
    v.finish()
}

pub fn asset_patch(patch: &AssetPatch) -> AppResult<()> {
    let mut v = Validator::default();
    v.require_opt("assetId", patch.asset_id.as_deref());
    v.require_opt("name", patch.name.as_deref());
    v.require_opt("category", patch.category.as_deref());
    v.one_of_opt("condition", patch.condition.as_deref(), ASSET_CONDITIONS);
    v.finish()
}

pub fn new_program(new: &NewProgram) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("programId", &new.program_id);
    v.require("name", &new.name);
    v.require("category", &new.category);
    v.one_of("status", &new.status, PROGRAM_STATUSES);
    v.finish()
}

pub fn program_patch(patch: &ProgramPatch) -> AppResult<()> {
    let mut v = Validator::default();
    v.require_opt("programId", patch.program_id.as_deref());
    v.require_opt("name", patch.name.as_deref());
    v.require_opt("category", patch.category.as_deref());
    v.one_of_opt("status", patch.status.as_deref(), PROGRAM_STATUSES);
    v.finish()
}

pub fn new_activity(new: &NewActivity) -> AppResult<()> {
    let mut v = Validator::default();
    v.require("type", &new.kind);
    v.require("description", &new.description);
    v.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_validation_collects_all_failures() {
        let bad = NewUser {
            username: "".to_string(),
            password: "123".to_string(),
            name: "".to_string(),
            role: "Overlord".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
        };
        let err = new_user(&bad).unwrap_err();
        match err {
            crate::error::AppError::Validation(map) => {
                assert!(map.contains_key("username"));
                assert!(map.contains_key("password"));
                assert!(map.contains_key("name"));
                assert!(map.contains_key("role"));
                assert!(map.contains_key("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_fields_reach_the_validator() {
        // 必填字段缺失时反序列化不能失败，要落进字段级错误映射
        let new: NewSite = serde_json::from_value(serde_json::json!({ "siteId": "ST-001" }))
            .expect("partial body must still deserialize");
        let err = new_site(&new).unwrap_err();
        match err {
            crate::error::AppError::Validation(map) => {
                assert!(map.contains_key("name"));
                assert!(map.contains_key("type"));
                assert!(map.contains_key("district"));
                assert!(map.contains_key("operationalStatus"));
                assert!(map.contains_key("assessmentStatus"));
                assert!(!map.contains_key("siteId"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let new: NewAsset = serde_json::from_value(serde_json::json!({ "name": "Projector" }))
            .expect("partial body must still deserialize");
        let err = new_asset(&new).unwrap_err();
        match err {
            crate::error::AppError::Validation(map) => {
                assert!(map.contains_key("assetId"));
                assert!(map.contains_key("category"));
                assert!(map.contains_key("condition"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_password_in_patch_is_not_an_error() {
        let patch = UserPatch {
            password: Some("".to_string()),
            ..Default::default()
        };
        assert!(user_patch(&patch).is_ok());
    }

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(email_regex().is_match("nomsa@example.org"));
        assert!(!email_regex().is_match("nomsa@example"));
        assert!(!email_regex().is_match("no spaces@example.org"));
    }
}
