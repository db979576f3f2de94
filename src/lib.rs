// lib.rs
// Library modules for the bingo watcher

pub mod defs;
pub mod logging;
pub mod config;
pub mod error;
pub mod player;
pub mod card;
pub mod ball;
pub mod reconcile;
pub mod resource;
pub mod api_client;
pub mod session;
pub mod terminal;
