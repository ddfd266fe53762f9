//! Supabase module - clients for the hosted backend's storage and REST APIs

pub mod rest;
pub mod storage;

pub use rest::SupabaseRestClient;
pub use storage::SupabaseStorageClient;
