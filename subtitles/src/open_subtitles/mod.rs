mod dto;

use std::{collections::HashSet, sync::LazyLock};

use domain::{CandidateCaption, language::pretty_language_name};
use log::{debug, info};

pub use dto::SearchRecord;

pub const USER_AGENT_HEADER: &str = "X-User-Agent";
pub const USER_AGENT: &str = "VLSub 0.10.2";

static OPEN_SUBTITLES_BASE_URL: LazyLock<url::Url> = LazyLock::new(|| {
    url::Url::parse("https://rest.opensubtitles.org")
        .expect("Open Subtitles base url should be valid")
});

pub fn default_headers() -> Vec<(String, String)> {
    vec![(USER_AGENT_HEADER.to_string(), USER_AGENT.to_string())]
}

/// Builds the search path for an IMDb id (without its `tt` prefix).
///
/// The episode segment is only added when both season and episode are known,
/// a season on its own narrows the search to that season. Zero counts as unknown.
pub fn search_path(imdb_id: &str, season_no: Option<u32>, episode_no: Option<u32>) -> String {
    let season_no = season_no.filter(|season_no| *season_no != 0);
    let episode_no = episode_no.filter(|episode_no| *episode_no != 0);

    let episode_segment = match (season_no, episode_no) {
        (Some(_), Some(episode_no)) => format!("episode-{episode_no}/"),
        _ => String::new(),
    };
    let season_segment = season_no
        .map(|season_no| format!("/season-{season_no}"))
        .unwrap_or_default();

    format!("/search/{episode_segment}imdbid-{imdb_id}{season_segment}")
}

pub fn search_url(
    imdb_id: &str,
    season_no: Option<u32>,
    episode_no: Option<u32>,
) -> Result<url::Url> {
    Ok(OPEN_SUBTITLES_BASE_URL.join(&search_path(imdb_id, season_no, episode_no))?)
}

/// Drops the compression suffix and asks the service for UTF-8 decoded content.
pub fn normalize_download_link(download_link: &str) -> String {
    download_link
        .replacen(".gz", "", 1)
        .replacen("download/", "download/subencoding-utf8/", 1)
}

/// Turns raw search records into candidates, in response order.
///
/// Records in a language we can't name are dropped, and only the first record
/// of every language survives.
pub fn captions_from_records(
    records: impl IntoIterator<Item = SearchRecord>,
) -> Vec<CandidateCaption> {
    let mut seen_languages = HashSet::new();

    records
        .into_iter()
        .filter(|record| {
            let is_known = pretty_language_name(&record.language_code).is_some();
            if !is_known {
                debug!(
                    "Skipping subtitle {:?} in unknown language {}",
                    record.file_name, record.language_code
                );
            }
            is_known
        })
        .filter(|record| seen_languages.insert(record.language_code.clone()))
        .map(|record| {
            let url = normalize_download_link(&record.download_link);
            CandidateCaption {
                id: url.clone(),
                url,
                format: record.format,
                language_code: record.language_code,
                has_cors_restrictions: false,
            }
        })
        .collect()
}

pub fn parse_search_response(response: &str) -> Result<Vec<CandidateCaption>> {
    let records: Vec<SearchRecord> = serde_json::from_str(response)?;
    let record_count = records.len();
    let captions = captions_from_records(records);

    info!(
        "Open Subtitles: {} candidates out of {record_count} search results",
        captions.len()
    );

    Ok(captions)
}

#[derive(Debug)]
pub enum Error {
    OpenSubtitlesJSONParsingError { inner: serde_json::Error },
    OpenSubtitlesInvalidURLError { inner: url::ParseError },
}

type Result<T> = core::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OpenSubtitlesJSONParsingError { inner } => {
                write!(f, "unexpected search response ({inner})")
            }
            Error::OpenSubtitlesInvalidURLError { inner } => {
                write!(f, "invalid search url ({inner})")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::OpenSubtitlesJSONParsingError { inner: value }
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Self::OpenSubtitlesInvalidURLError { inner: value }
    }
}
