//! Availability of games and movies across the branches of a public library,
//! served as htmx fragments over HTTP and through a chat bot.

pub mod aggregate;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod state;
pub mod types;
