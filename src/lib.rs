pub mod callouts;
pub mod config;
pub mod geometry;
pub mod highlight;
pub mod http_client;
pub mod i18n;
pub mod layout;
pub mod loader;
pub mod model;
pub mod prefs;
pub mod state;
pub mod store;
pub mod theme;
pub mod views;
