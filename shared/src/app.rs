use crux_core::{
    App, Command,
    macros::effect,
    render::RenderOperation,
};
use domain::ScrapeError;
use serde::{Deserialize, Serialize};

use crate::{
    capabilities::{
        http::HttpOperation,
        navigation::{self, NavigationOperation, Screen},
        player::PlayerOperation,
    },
    features::{
        captions::{CaptionEntry, caption_entries},
        player::{PartialPlayerModel, PlayerModel, handle_update_player},
        query::QueryState,
        search::{SearchOutcome, handle_search_completed, start_search},
        selection::{SelectionOutcome, handle_select, handle_selection_completed},
    },
};

pub const LOADING_MESSAGE: &str = "Scraping subtitles...";
pub const BACK_LINK_LABEL: &str = "Find subtitles";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Event {
    /// The scraping menu was opened
    Mount,
    /// The scraping menu was closed
    Unmount,
    /// The shell's player state changed
    UpdatePlayer(Box<PartialPlayerModel>),
    Select {
        id: String,
    },
    NavigateBack,

    #[serde(skip)]
    SearchCompleted {
        generation: u64,
        outcome: SearchOutcome,
    },
    #[serde(skip)]
    SelectionCompleted {
        generation: u64,
        outcome: SelectionOutcome,
    },
}

#[effect(typegen)]
pub enum Effect {
    Render(RenderOperation),
    Http(HttpOperation),
    Navigation(NavigationOperation),
    Player(PlayerOperation),
}

#[derive(Default, Debug)]
pub struct Model {
    pub player: PlayerModel,
    pub is_mounted: bool,
    /// Identifies the current mount and search. Results carrying an older
    /// generation are dropped.
    pub generation: u64,
    pub search: QueryState<Box<[domain::CandidateCaption]>>,
    pub selection_error: Option<ScrapeError>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BackLink {
    pub label: String,
    pub target: Screen,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ScrapingBody {
    Loading { message: String },
    Empty { message: String },
    Failed { message: String },
    Captions { entries: Vec<CaptionEntry> },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub back_link: BackLink,
    pub body: ScrapingBody,
    pub selection_error: Option<String>,
}

#[derive(Default)]
pub struct CaptionScrapingApp;

impl App for CaptionScrapingApp {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;
    type Capabilities = ();

    fn update(
        &self,
        event: Self::Event,
        model: &mut Self::Model,
        _caps: &Self::Capabilities,
    ) -> Command<Self::Effect, Self::Event> {
        match event {
            Event::Mount => {
                model.is_mounted = true;
                start_search(model)
            }
            Event::Unmount => {
                model.is_mounted = false;
                model.generation += 1;
                Command::done()
            }
            Event::UpdatePlayer(partial_player) => handle_update_player(model, partial_player),
            Event::Select { id } => handle_select(model, id),
            Event::NavigateBack => Command::new(|ctx| async move {
                navigation::push(Screen::Captions).into_future(ctx).await;
            }),
            Event::SearchCompleted {
                generation,
                outcome,
            } => handle_search_completed(model, generation, outcome),
            Event::SelectionCompleted {
                generation,
                outcome,
            } => handle_selection_completed(model, generation, outcome),
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let empty = || ScrapingBody::Empty {
            message: ScrapeError::NoResultsFound.to_string(),
        };

        let body = match &model.search {
            QueryState::Loading => ScrapingBody::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            QueryState::Error {
                error: ScrapeError::NoResultsFound,
            } => empty(),
            QueryState::Error { error } => ScrapingBody::Failed {
                message: error.to_string(),
            },
            QueryState::Success { data } => {
                let entries = caption_entries(data, model.player.caption.as_ref());
                if entries.is_empty() {
                    empty()
                } else {
                    ScrapingBody::Captions { entries }
                }
            }
        };

        ViewModel {
            back_link: BackLink {
                label: BACK_LINK_LABEL.to_string(),
                target: Screen::Captions,
            },
            body,
            selection_error: model.selection_error.as_ref().map(ToString::to_string),
        }
    }
}
