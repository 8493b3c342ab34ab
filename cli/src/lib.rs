pub mod shell;
pub mod transport;

use std::path::PathBuf;

use clap::Parser;
use domain::{EpisodeIdentifier, MediaMeta};

#[derive(Parser, Clone, Debug)]
#[command(about = "Finds captions for a title on OpenSubtitles and activates one")]
pub struct Args {
    /// IMDb id of the title, with or without the `tt` prefix
    pub imdb_id: String,

    /// Season of the episode to search captions for
    #[arg(short, long, requires = "episode")]
    pub season: Option<u32>,

    /// Episode number within the season
    #[arg(short, long, requires = "season")]
    pub episode: Option<u32>,

    /// ISO 639-1 code of the caption to activate. Only lists the candidates when omitted
    #[arg(short, long)]
    pub language: Option<String>,

    /// Where to write the activated caption as SubRip, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Send every request through this proxy
    #[arg(long)]
    pub proxy: Option<String>,
}

impl Args {
    pub fn media_meta(&self) -> MediaMeta {
        let episode = match (self.season, self.episode) {
            (Some(season_no), Some(episode_no)) => Some(EpisodeIdentifier {
                season_no,
                episode_no,
            }),
            _ => None,
        };

        MediaMeta {
            title: self.imdb_id.clone(),
            imdb_id: Some(self.imdb_id.clone()),
            episode,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use domain::EpisodeIdentifier;

    use crate::Args;

    #[test]
    fn movie_arguments() {
        let args = Args::try_parse_from(["caption-scraper", "tt0111161", "-l", "en"]).unwrap();
        let meta = args.media_meta();

        assert_eq!(meta.search_identifier(), Some("0111161"));
        assert_eq!(meta.episode, None);
        assert_eq!(args.language.as_deref(), Some("en"));
    }

    #[test]
    fn episode_arguments() {
        let args =
            Args::try_parse_from(["caption-scraper", "tt0903747", "--season", "3", "-e", "5"])
                .unwrap();

        assert_eq!(
            args.media_meta().episode,
            Some(EpisodeIdentifier {
                season_no: 3,
                episode_no: 5
            })
        );
    }

    #[test]
    fn season_needs_an_episode() {
        assert!(Args::try_parse_from(["caption-scraper", "tt0903747", "-s", "3"]).is_err());
        assert!(Args::try_parse_from(["caption-scraper", "tt0903747", "-e", "3"]).is_err());
    }
}
