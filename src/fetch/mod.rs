// src/fetch/mod.rs

pub mod docs;
pub mod listing;
