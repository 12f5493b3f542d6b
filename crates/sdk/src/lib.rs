//! # DANDI SDK
//!
//! Rust client for the DANDI archive search, asset and SQL API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dandi_sdk::{DandiClient, DandiResult, DatasetSearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> DandiResult<()> {
//!     let client = DandiClient::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!
//!     let request = DatasetSearchRequest {
//!         species: vec!["Mus musculus".to_string()],
//!         limit: Some(5),
//!         ..Default::default()
//!     };
//!     let page = client.search().datasets(&request).await?;
//!     println!("Found {} dandisets", page.count);
//!
//!     let schema = client.schema().full().await?;
//!     println!("{} queryable tables", schema.table_count);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{AssetSearchRequest, DatasetSearchRequest, FullSchema, SearchPage, SqlRequest};
pub use client::{DandiClient, DandiClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{DandiError, DandiResult};
