//! Quotes module - live quote source client

pub mod rest;

pub use rest::HttpQuoteSource;
