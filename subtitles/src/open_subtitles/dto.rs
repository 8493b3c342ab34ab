use serde::{Deserialize, Serialize};

/// One entry of the legacy REST search response. The service sends many more
/// fields; only the ones we read are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRecord {
    #[serde(rename = "SubDownloadLink")]
    pub download_link: String,
    #[serde(rename = "SubFormat")]
    pub format: String,
    #[serde(rename = "ISO639")]
    pub language_code: String,
    #[serde(rename = "SubFileName", default)]
    pub file_name: Option<String>,
}
