//! HTTP front-end gateway: route guarding, session cookies, auth routes.

pub mod app;
pub mod config;
pub mod cookies;
pub mod middleware;
