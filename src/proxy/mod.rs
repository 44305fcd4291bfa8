// proxy module - car info proxy service

pub mod config;
pub mod server;

pub mod handlers; // API endpoint handlers
pub mod mappers; // Upstream payload mappers
pub mod upstream; // Upstream client

pub use config::ProxyConfig;
pub use server::AxumServer;
