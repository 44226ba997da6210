pub mod category;
pub mod credits;
pub mod list;
pub mod media;
pub mod movie;
pub mod page;
pub mod review;
pub mod tv;
pub mod video;

pub use category::{ContentKind, MovieCategory, TimeWindow, TvCategory};
pub use credits::{CastMember, Credits, CrewMember};
pub use list::{ListDocument, ListEntry, ListKind, Listable};
pub use media::{Genre, GenreList, ProductionCompany, ProductionCountry, SpokenLanguage};
pub use movie::{Movie, MovieDetails};
pub use page::Page;
pub use review::{AuthorDetails, Review};
pub use tv::{Creator, Episode, Network, Season, SeasonDetails, TvSeries, TvSeriesDetails};
pub use video::{Video, Videos};
