//! Deployment endpoints.
//!
//! Defaults point at the local development stack: the marketplace backend
//! on port 8000 and a local Supabase-style identity service.

/// Marketplace backend base URL.
pub const API_BASE_URL: &str = "http://localhost:8000";

/// Identity service base URL.
pub const AUTH_BASE_URL: &str = "http://localhost:54321/auth/v1";

/// Public (anon) API key sent with every identity-service call.
pub const AUTH_API_KEY: &str = "public-anon-key";
