pub mod access;
pub mod auth;
pub mod message;
pub mod user;
