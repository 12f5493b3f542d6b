//! API endpoint groups for the DANDI archive.

pub mod filters;
pub mod schema;
pub mod search;
pub mod sql;

pub use filters::FiltersApi;
pub use schema::{FullSchema, SchemaApi};
pub use search::{AssetSearchRequest, DatasetSearchRequest, SearchApi, SearchPage};
pub use sql::{SqlApi, SqlRequest};
