#![deny(missing_docs)]

//! # API Collection Generation
//!
//! Produces a Postman v2.1 collection from scraped controllers.
//!
//! - **models**: serde types for the collection document.
//! - **builder**: tree walk, request items and the login hook.

pub mod builder;
pub mod models;

pub use builder::{
    build_collection, create_postman_item, default_service_prefixes, write_collection,
    CollectionOptions, GeneratedCollection, ServicePrefixes, DEFAULT_COLLECTION_NAME,
};
pub use models::{Collection, CollectionInfo, Folder, Header, RequestItem};
