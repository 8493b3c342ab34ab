use serde::{Deserialize, Serialize};

pub const SCRAPED_CAPTION_ID_PREFIX: &str = "scraped - ";

/// A subtitle the search surfaced but that hasn't been downloaded yet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateCaption {
    /// The download url doubles as the identity of the candidate
    pub id: String,
    pub url: String,
    /// Format reported by the source (srt, vtt, ...)
    pub format: String,
    pub language_code: String,
    pub has_cors_restrictions: bool,
}

impl CandidateCaption {
    /// The id the caption gets once it is applied to the player.
    pub fn active_caption_id(&self) -> String {
        scraped_caption_id(&self.language_code)
    }
}

/// The caption track applied to the player.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveCaption {
    pub language: String,
    pub srt_data: String,
    pub id: String,
}

pub fn scraped_caption_id(language_code: &str) -> String {
    format!("{SCRAPED_CAPTION_ID_PREFIX}{language_code}")
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScrapeError {
    SearchFailed { message: String },
    NoResultsFound,
    SubtitleFetchFailed { message: String },
    ConversionFailed { message: String },
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::SearchFailed { message } => {
                write!(f, "Couldn't search for subtitles: {message}")
            }
            ScrapeError::NoResultsFound => write!(f, "Couldn't find any subtitles :("),
            ScrapeError::SubtitleFetchFailed { message } => {
                write!(f, "Couldn't download the subtitle: {message}")
            }
            ScrapeError::ConversionFailed { message } => {
                write!(f, "Couldn't read the subtitle: {message}")
            }
        }
    }
}

impl std::error::Error for ScrapeError {}
