pub mod api;
pub mod chat;
pub mod commands;
pub mod metrics;
pub mod state;
