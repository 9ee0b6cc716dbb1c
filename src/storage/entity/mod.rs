pub mod activity;
pub mod asset;
pub mod district;
pub mod program;
pub mod site;
pub mod staff;
pub mod user;

pub use activity::Entity as Activity;
pub use asset::Entity as Asset;
pub use district::Entity as District;
pub use program::Entity as Program;
pub use site::Entity as Site;
pub use staff::Entity as Staff;
pub use user::Entity as User;
