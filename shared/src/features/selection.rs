use crux_core::{Command, render::render};
use domain::{ActiveCaption, CandidateCaption, ScrapeError};
use log::{debug, info, warn};
use url::Url;

use crate::{
    CruxContext, Effect, Event, Model,
    capabilities::{http, player},
};

pub type SelectionOutcome = Result<ActiveCaption, ScrapeError>;

pub fn handle_select(model: &mut Model, id: String) -> Command<Effect, Event> {
    let Some(candidate) = model
        .search
        .get_data()
        .and_then(|candidates| candidates.iter().find(|candidate| candidate.id == id))
        .cloned()
    else {
        warn!("Selected caption {id} is not among the search results");
        return Command::done();
    };

    model.selection_error = None;
    let generation = model.generation;

    render().and(Command::new(move |ctx| async move {
        let outcome = download_caption(ctx.clone(), candidate).await;
        ctx.send_event(Event::SelectionCompleted {
            generation,
            outcome,
        });
    }))
}

/// Downloads the candidate and converts it to SubRip.
async fn download_caption(ctx: CruxContext, candidate: CandidateCaption) -> SelectionOutcome {
    let url = Url::parse(&candidate.url).map_err(|error| ScrapeError::SubtitleFetchFailed {
        message: error.to_string(),
    })?;

    let text = http::get(url)
        .into_future(ctx)
        .await
        .into_body()
        .map_err(|message| ScrapeError::SubtitleFetchFailed { message })?;

    let srt_data = subtitles::convert(&text, &candidate.format).map_err(|error| {
        ScrapeError::ConversionFailed {
            message: error.to_string(),
        }
    })?;

    Ok(ActiveCaption {
        id: candidate.active_caption_id(),
        language: candidate.language_code,
        srt_data,
    })
}

/// Concurrent selections are not serialized: whichever download finishes last
/// ends up on the player.
pub fn handle_selection_completed(
    model: &mut Model,
    generation: u64,
    outcome: SelectionOutcome,
) -> Command<Effect, Event> {
    if !model.is_mounted || generation != model.generation {
        debug!("Discarding caption downloaded for view #{generation}");
        return Command::done();
    }

    match outcome {
        Ok(caption) => {
            info!("Activating caption {}", caption.id);
            model.player.caption = Some(caption.clone());

            render().and(Command::new(|ctx| async move {
                player::set_caption(caption).into_future(ctx).await;
            }))
        }
        Err(error) => {
            warn!("Couldn't activate caption: {error}");
            model.selection_error = Some(error);
            render()
        }
    }
}
