pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod moods;
pub mod nav;
pub mod profile;
