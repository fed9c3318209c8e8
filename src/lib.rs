pub mod app;
pub mod config;
pub mod layout;
pub mod network;
