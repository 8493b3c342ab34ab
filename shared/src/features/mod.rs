pub mod captions;
pub mod player;
pub mod query;
pub mod search;
pub mod selection;
