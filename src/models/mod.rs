//! Data models for the Scan2Card client.

pub mod auth;
