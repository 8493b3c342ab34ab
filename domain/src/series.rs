#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
pub struct EpisodeIdentifier {
    pub season_no: u32,
    pub episode_no: u32,
}
