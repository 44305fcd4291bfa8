// Upstream module - Gemini HTTP client

pub mod client;
