pub mod language;
pub mod series;
pub mod subtitles;

use serde::{Deserialize, Serialize};

pub use language::LanguageCode;
pub use series::EpisodeIdentifier;
pub use subtitles::{ActiveCaption, CandidateCaption, ScrapeError};

/// What the player knows about the media that is currently loaded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MediaMeta {
    pub title: String,
    /// IMDb id as the catalog reports it, e.g. `tt0111161`
    pub imdb_id: Option<String>,
    pub episode: Option<EpisodeIdentifier>,
}

impl MediaMeta {
    /// The numeric part of the IMDb id that the subtitle search expects.
    pub fn search_identifier(&self) -> Option<&str> {
        let id = self
            .imdb_id
            .as_deref()?
            .trim_start_matches(|char: char| !char.is_ascii_digit());

        if id.is_empty() { None } else { Some(id) }
    }
}
