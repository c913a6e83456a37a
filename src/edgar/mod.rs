// src/edgar/mod.rs
pub mod client;
pub mod feed;
pub mod models;
