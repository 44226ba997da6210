pub mod api;
pub mod endpoint;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod tmdb;
pub mod traits;

pub use api::TmdbApi;
pub use endpoint::Endpoint;
pub use error::SourceError;
pub use factory::build_source;
pub use fixture::FixtureSource;
pub use tmdb::TmdbClient;
pub use traits::DataSource;
