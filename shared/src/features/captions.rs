use domain::{ActiveCaption, CandidateCaption, language::pretty_language_name};
use serde::{Deserialize, Serialize};

/// A selectable row of the caption list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionEntry {
    pub id: String,
    pub language_code: String,
    pub language_name: String,
    pub selected: bool,
}

/// Maps candidates to list rows. A row is selected when the caption it would
/// produce is the one the player currently shows.
pub fn caption_entries(
    candidates: &[CandidateCaption],
    active_caption: Option<&ActiveCaption>,
) -> Vec<CaptionEntry> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let language_name = pretty_language_name(&candidate.language_code)?;

            Some(CaptionEntry {
                id: candidate.id.clone(),
                language_code: candidate.language_code.clone(),
                language_name: language_name.to_string(),
                selected: active_caption
                    .is_some_and(|active| active.id == candidate.active_caption_id()),
            })
        })
        .collect()
}
