// src/lib.rs

pub mod ai;
pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod publisher;
pub mod routes;
pub mod state;
pub mod storage;
pub mod views;

pub use routes::create_router;
