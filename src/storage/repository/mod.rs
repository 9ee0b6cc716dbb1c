pub mod activity_repo;
pub mod asset_repo;
pub mod district_repo;
pub mod program_repo;
pub mod site_repo;
pub mod staff_repo;
pub mod user_repo;

pub use activity_repo::{ActivityDto, ActivityRepository, NewActivity};
pub use asset_repo::{AssetDto, AssetPatch, AssetRepository, NewAsset};
pub use district_repo::{DistrictDto, DistrictPatch, DistrictRepository, NewDistrict};
pub use program_repo::{NewProgram, ProgramDto, ProgramPatch, ProgramRepository};
pub use site_repo::{NewSite, SiteDto, SitePatch, SiteRepository};
pub use staff_repo::{NewStaff, StaffDto, StaffPatch, StaffRepository};
pub use user_repo::{NewUser, UserDto, UserPatch, UserRepository};

/// 字符串列表存成 JSON 文本；空列表存 NULL
pub(crate) fn encode_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        serde_json::to_string(items).ok()
    }
}

/// 同上，但空列表存 "[]"（serial_numbers 列是 NOT NULL）
pub(crate) fn encode_list_always(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_codec_treats_empty_as_null() {
        assert_eq!(encode_list(&[]), None);
        assert_eq!(decode_list(None), Vec::<String>::new());
        assert_eq!(decode_list(Some("not json")), Vec::<String>::new());

        let items = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let encoded = encode_list(&items).unwrap();
        assert_eq!(decode_list(Some(&encoded)), items);
    }

    #[test]
    fn always_codec_keeps_empty_brackets() {
        assert_eq!(encode_list_always(&[]), "[]");
    }
}
