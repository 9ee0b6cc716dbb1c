pub mod activities;
pub mod assets;
pub mod auth;
pub mod districts;
pub mod programs;
pub mod sites;
pub mod staff;
pub mod users;
