//! Media module - canonical path extraction and signed URL resolution

pub mod path;
pub mod resolver;

pub use path::{extract_storage_path, is_usable_url};
pub use resolver::MediaResolver;
