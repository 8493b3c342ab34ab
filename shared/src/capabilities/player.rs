//! Writes to the player state the shell owns.

use crux_core::{Command, Request, capability::Operation, command::RequestBuilder};
use domain::ActiveCaption;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerOperation {
    SetCaption(ActiveCaption),
}

impl Operation for PlayerOperation {
    type Output = ();
}

#[must_use]
pub fn set_caption<Effect, Event>(
    caption: ActiveCaption,
) -> RequestBuilder<Effect, Event, impl Future<Output = ()>>
where
    Effect: Send + From<Request<PlayerOperation>> + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(PlayerOperation::SetCaption(caption))
}
