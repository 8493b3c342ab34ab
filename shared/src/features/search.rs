use crux_core::{Command, render::render};
use domain::{CandidateCaption, ScrapeError};
use log::{debug, info, warn};

use crate::{
    Effect, Event, Model,
    capabilities::http::{self, HttpOutput},
    features::query::QueryState,
};

pub type SearchOutcome = Result<Box<[CandidateCaption]>, ScrapeError>;

/// Starts a fresh search for the media the player shows.
///
/// Bumping the generation makes every result still in flight stale, so a
/// response for an older identifier can never land on screen.
pub fn start_search(model: &mut Model) -> Command<Effect, Event> {
    model.generation += 1;
    model.search = QueryState::Loading;
    model.selection_error = None;

    let generation = model.generation;
    let finish = |outcome: SearchOutcome| -> Command<Effect, Event> {
        render().and(Command::event(Event::SearchCompleted {
            generation,
            outcome,
        }))
    };

    let Some((imdb_id, episode)) = model.player.search_target() else {
        info!("No IMDb id for the current media, skipping subtitle search");
        return finish(Err(ScrapeError::NoResultsFound));
    };

    let (season_no, episode_no) = match episode {
        Some(episode) => (Some(episode.season_no), Some(episode.episode_no)),
        None => (None, None),
    };

    let url = match subtitles::search_url(&imdb_id, season_no, episode_no) {
        Ok(url) => url,
        Err(error) => {
            return finish(Err(ScrapeError::SearchFailed {
                message: error.to_string(),
            }));
        }
    };

    info!("Searching subtitles at {url}");

    render().and(
        http::get_with_headers(url, subtitles::default_headers()).then_send(move |output| {
            Event::SearchCompleted {
                generation,
                outcome: search_outcome(output),
            }
        }),
    )
}

fn search_outcome(output: HttpOutput) -> SearchOutcome {
    let body = output
        .into_body()
        .map_err(|message| ScrapeError::SearchFailed { message })?;

    let captions =
        subtitles::parse_search_response(&body).map_err(|error| ScrapeError::SearchFailed {
            message: error.to_string(),
        })?;

    if captions.is_empty() {
        return Err(ScrapeError::NoResultsFound);
    }

    Ok(captions.into())
}

pub fn handle_search_completed(
    model: &mut Model,
    generation: u64,
    outcome: SearchOutcome,
) -> Command<Effect, Event> {
    if !model.is_mounted || generation != model.generation {
        debug!("Discarding results of search #{generation}");
        return Command::done();
    }

    if let Err(error) = &outcome {
        warn!("Subtitle search #{generation} ended without captions: {error}");
    }

    model.search = outcome.into();
    render()
}

#[cfg(test)]
mod tests {
    use domain::ScrapeError;

    use crate::{capabilities::http::HttpOutput, features::search::search_outcome};

    fn success(body: &str) -> HttpOutput {
        HttpOutput::Success {
            data: Some(body.to_string()),
            status_code: 200,
        }
    }

    #[test]
    fn empty_and_filtered_results_are_no_results() {
        assert_eq!(search_outcome(success("[]")), Err(ScrapeError::NoResultsFound));
        assert_eq!(
            search_outcome(success(
                r#"[{"SubDownloadLink": "https://dl.example/download/1.gz", "SubFormat": "srt", "ISO639": "xx"}]"#
            )),
            Err(ScrapeError::NoResultsFound)
        );
    }

    #[test]
    fn transport_and_parse_errors_are_search_failures() {
        assert!(matches!(
            search_outcome(HttpOutput::Error {
                message: "offline".to_string()
            }),
            Err(ScrapeError::SearchFailed { message }) if message == "offline"
        ));
        assert!(matches!(
            search_outcome(success("not json")),
            Err(ScrapeError::SearchFailed { .. })
        ));
        assert!(matches!(
            search_outcome(HttpOutput::Success {
                data: None,
                status_code: 503
            }),
            Err(ScrapeError::SearchFailed { .. })
        ));
    }
}
