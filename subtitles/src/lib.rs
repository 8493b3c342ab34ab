pub mod convert;
mod open_subtitles;

pub use convert::{ConvertError, SubtitleFormat, convert};
pub use open_subtitles::{
    Error, SearchRecord, USER_AGENT, USER_AGENT_HEADER, captions_from_records, default_headers,
    normalize_download_link, parse_search_response, search_path, search_url,
};
