//! Serde-facing data models shared by commands and services.

pub mod models;
