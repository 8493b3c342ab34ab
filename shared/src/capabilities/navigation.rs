use crux_core::{Command, Request, capability::Operation, command::RequestBuilder};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavigationOperation {
    Push(Screen),
}

/// Menus of the player settings overlay.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Captions,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Captions => "/captions",
        }
    }
}

impl Operation for NavigationOperation {
    type Output = ();
}

#[must_use]
pub fn push<Effect, Event>(to: Screen) -> RequestBuilder<Effect, Event, impl Future<Output = ()>>
where
    Effect: Send + From<Request<NavigationOperation>> + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(NavigationOperation::Push(to))
}
