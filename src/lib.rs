pub mod cache;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod fullness;
pub mod gametime;
pub mod handler;
pub mod identity;
pub mod matcher;
pub mod message;
pub mod model;
pub mod notify;
pub mod watcher;
