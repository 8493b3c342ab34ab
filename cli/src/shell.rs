//! Drives the caption scraping core from the terminal.

use std::{collections::VecDeque, path::PathBuf};

use anyhow::{Context, anyhow, bail};
use domain::{ActiveCaption, MediaMeta};
use log::info;
use shared::{
    CaptionScrapingApp, Core, Effect, Event, PartialPlayerModel, ScrapingBody, ViewModel,
    capabilities::{navigation::NavigationOperation, player::PlayerOperation},
};

use crate::transport::HttpTransport;

pub struct Shell {
    core: Core<CaptionScrapingApp>,
    transport: HttpTransport,
    /// Caption to activate once the results are in
    language: Option<String>,
    output: Option<PathBuf>,
    has_listed: bool,
    has_selected: bool,
    /// Set when `language` isn't among the results
    missing_language: Option<String>,
}

impl Shell {
    pub fn new(transport: HttpTransport, language: Option<String>, output: Option<PathBuf>) -> Self {
        Self {
            core: Core::new(),
            transport,
            language,
            output,
            has_listed: false,
            has_selected: false,
            missing_language: None,
        }
    }

    /// Mounts the view for `meta` and serves effects until the core goes quiet.
    pub async fn run(mut self, meta: MediaMeta) -> anyhow::Result<()> {
        let mut effects: VecDeque<Effect> = VecDeque::new();
        effects.extend(
            self.core
                .process_event(Event::UpdatePlayer(Box::new(PartialPlayerModel {
                    meta: Some(Some(meta)),
                    ..Default::default()
                }))),
        );
        effects.extend(self.core.process_event(Event::Mount));
        self.drain(effects).await?;

        let view = self.core.view();
        let unmounted = self.core.process_event(Event::Unmount);
        self.drain(unmounted.into()).await?;

        outcome(&view, self.missing_language.as_deref())
    }

    async fn drain(&mut self, mut effects: VecDeque<Effect>) -> anyhow::Result<()> {
        while let Some(effect) = effects.pop_front() {
            effects.extend(self.handle(effect).await?);
        }

        Ok(())
    }

    async fn handle(&mut self, effect: Effect) -> anyhow::Result<Vec<Effect>> {
        match effect {
            Effect::Render(_) => Ok(self.render()),
            Effect::Http(mut request) => {
                let output = self.transport.execute(&request.operation).await;
                self.core
                    .resolve(&mut request, output)
                    .map_err(|error| anyhow!("Couldn't resolve http request: {error:?}"))
            }
            Effect::Navigation(mut request) => {
                let NavigationOperation::Push(screen) = &request.operation;
                info!("Navigating to {}", screen.path());
                self.core
                    .resolve(&mut request, ())
                    .map_err(|error| anyhow!("Couldn't resolve navigation: {error:?}"))
            }
            Effect::Player(mut request) => {
                let PlayerOperation::SetCaption(caption) = &request.operation;
                self.write_caption(caption).await?;
                self.core
                    .resolve(&mut request, ())
                    .map_err(|error| anyhow!("Couldn't resolve caption update: {error:?}"))
            }
        }
    }

    fn render(&mut self) -> Vec<Effect> {
        let view = self.core.view();

        let ScrapingBody::Captions { entries } = &view.body else {
            if let ScrapingBody::Loading { message } = &view.body {
                info!("{message}");
            }
            return Vec::new();
        };

        if !self.has_listed {
            self.has_listed = true;
            for entry in entries {
                let marker = if entry.selected { "*" } else { " " };
                println!("{marker} {:<4} {}", entry.language_code, entry.language_name);
            }
        }

        let Some(language) = self.language.as_deref() else {
            return Vec::new();
        };
        if self.has_selected {
            return Vec::new();
        }
        self.has_selected = true;

        match entries
            .iter()
            .find(|entry| entry.language_code.eq_ignore_ascii_case(language))
        {
            Some(entry) => self.core.process_event(Event::Select {
                id: entry.id.clone(),
            }),
            None => {
                self.missing_language = Some(language.to_string());
                Vec::new()
            }
        }
    }

    async fn write_caption(&self, caption: &ActiveCaption) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &caption.srt_data)
                    .await
                    .with_context(|| format!("Couldn't write caption to {}", path.display()))?;
                println!("Activated {} at {}", caption.id, path.display());
            }
            None => print!("{}", caption.srt_data),
        }

        Ok(())
    }
}

fn outcome(view: &ViewModel, missing_language: Option<&str>) -> anyhow::Result<()> {
    if let ScrapingBody::Empty { message } | ScrapingBody::Failed { message } = &view.body {
        bail!("{message}");
    }
    if let Some(language) = missing_language {
        bail!("No {language} caption among the results");
    }
    if let Some(error) = &view.selection_error {
        bail!("{error}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::MediaMeta;
    use shared::{
        BACK_LINK_LABEL, BackLink, Effect, Event, PartialPlayerModel, ScrapingBody, ViewModel,
        capabilities::{
            http::{HttpOperation, HttpOutput},
            navigation::Screen,
        },
    };

    use crate::{
        shell::{Shell, outcome},
        transport::HttpTransport,
    };

    fn view(body: ScrapingBody, selection_error: Option<&str>) -> ViewModel {
        ViewModel {
            back_link: BackLink {
                label: BACK_LINK_LABEL.to_string(),
                target: Screen::Captions,
            },
            body,
            selection_error: selection_error.map(str::to_string),
        }
    }

    /// Mounts a shell asking for `language` and answers its search with an English caption.
    fn shell_with_english_results(language: &str) -> Shell {
        let shell = Shell::new(
            HttpTransport::new(None).unwrap(),
            Some(language.to_string()),
            None,
        );

        let mut effects = shell
            .core
            .process_event(Event::UpdatePlayer(Box::new(PartialPlayerModel {
                meta: Some(Some(MediaMeta {
                    title: "The Shawshank Redemption".to_string(),
                    imdb_id: Some("tt0111161".to_string()),
                    episode: None,
                })),
                ..Default::default()
            })));
        effects.extend(shell.core.process_event(Event::Mount));

        let mut request = effects
            .into_iter()
            .find_map(|effect| match effect {
                Effect::Http(request) => Some(request),
                _ => None,
            })
            .unwrap();
        let body = r#"[{"SubDownloadLink": "https://dl.example/download/1.gz", "SubFormat": "srt", "ISO639": "en"}]"#;
        shell
            .core
            .resolve(
                &mut request,
                HttpOutput::Success {
                    data: Some(body.to_string()),
                    status_code: 200,
                },
            )
            .unwrap();

        shell
    }

    #[test]
    fn listing_is_a_success() {
        let listed = view(ScrapingBody::Captions { entries: Vec::new() }, None);
        assert!(outcome(&listed, None).is_ok());
    }

    #[test]
    fn empty_failed_and_selection_errors_fail_the_run() {
        let empty = view(
            ScrapingBody::Empty {
                message: "Couldn't find any subtitles :(".to_string(),
            },
            None,
        );
        assert_eq!(
            outcome(&empty, None).unwrap_err().to_string(),
            "Couldn't find any subtitles :("
        );

        let failed = view(
            ScrapingBody::Failed {
                message: "offline".to_string(),
            },
            None,
        );
        assert!(outcome(&failed, None).is_err());

        let broken_download = view(
            ScrapingBody::Captions { entries: Vec::new() },
            Some("Couldn't download the subtitle"),
        );
        assert!(outcome(&broken_download, None).is_err());
    }

    #[test]
    fn requested_language_is_downloaded() {
        let mut shell = shell_with_english_results("EN");

        let effects = shell.render();

        let download = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Http(request) => Some(&request.operation),
                _ => None,
            })
            .unwrap();
        assert!(matches!(
            download,
            HttpOperation::Get { url, .. } if url == "https://dl.example/download/subencoding-utf8/1"
        ));
        assert_eq!(shell.missing_language, None);
        assert!(shell.render().is_empty());
    }

    #[test]
    fn missing_language_fails_the_run() {
        let mut shell = shell_with_english_results("de");

        assert!(shell.render().is_empty());

        let view = shell.core.view();
        assert!(matches!(view.body, ScrapingBody::Captions { .. }));
        assert_eq!(
            outcome(&view, shell.missing_language.as_deref())
                .unwrap_err()
                .to_string(),
            "No de caption among the results"
        );
    }
}
