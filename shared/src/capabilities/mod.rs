pub mod http;
pub mod navigation;
pub mod player;
