use crux_core::{Command, render::render};
use domain::{ActiveCaption, EpisodeIdentifier, MediaMeta};
use partially::Partial;
use serde::{Deserialize, Serialize};

use crate::{Effect, Event, Model};

use super::search::start_search;

/// The slice of the shared player state this view reads.
#[derive(Default, Serialize, Deserialize, Partial, Clone, Debug, PartialEq, Eq)]
#[partially(derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq))]
pub struct PlayerModel {
    pub meta: Option<MediaMeta>,
    pub caption: Option<ActiveCaption>,
}

impl PlayerModel {
    /// What the search depends on. A change means the results on screen are outdated.
    pub fn search_target(&self) -> Option<(String, Option<EpisodeIdentifier>)> {
        let meta = self.meta.as_ref()?;
        Some((meta.search_identifier()?.to_string(), meta.episode.clone()))
    }
}

pub fn handle_update_player(
    model: &mut Model,
    partial_player: Box<PartialPlayerModel>,
) -> Command<Effect, Event> {
    let previous_target = model.player.search_target();

    model.player.apply_some(*partial_player);

    if model.is_mounted && model.player.search_target() != previous_target {
        return start_search(model);
    }

    render()
}
