pub mod auth;
pub mod config;
pub mod errors;
pub mod review;
