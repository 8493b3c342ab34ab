pub mod app;
pub mod capabilities;
pub mod features;

pub use app::{
    BACK_LINK_LABEL, BackLink, CaptionScrapingApp, Effect, Event, LOADING_MESSAGE, Model,
    ScrapingBody, ViewModel,
};
pub use crux_core::Core;
pub use features::player::{PartialPlayerModel, PlayerModel};

pub type CruxContext = crux_core::command::CommandContext<Effect, Event>;
