pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub use chat::Chat;
pub use client::Client;
