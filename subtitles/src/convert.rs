//! Converts downloaded subtitle text into SubRip, the format the player consumes.
//!
//! Supported inputs:
//! - SubRip (`srt`)
//! - WebVTT (`vtt`)
//! - SubStation Alpha (`ass`, `ssa`)
//! - YouTube SubViewer (`sbv`)
//! - MicroDVD (`sub`), frame based

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

const MICRO_DVD_DEFAULT_FPS: f64 = 25.0;

static CUE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(\d+):)?(\d{1,2}):(\d{2})[,.](\d{1,3})\s*-->\s*(?:(\d+):)?(\d{1,2}):(\d{2})[,.](\d{1,3})",
    )
    .expect("cue timing pattern should be valid")
});
static SBV_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{1,3}),(\d+):(\d{2}):(\d{2})\.(\d{1,3})$")
        .expect("sbv timing pattern should be valid")
});
static ASS_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})[.:](\d{1,3})$").expect("ass time pattern should be valid")
});
static MICRO_DVD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{(\d+)\}\{(\d+)\}(.*)$").expect("microdvd line pattern should be valid")
});
static VTT_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?(?:c|v|lang|ruby|rt)\b[^>]*>|<[\d:.]+>")
        .expect("vtt markup pattern should be valid")
});
static BRACED_OVERRIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("override pattern should be valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleFormat {
    SubRip,
    WebVtt,
    SubStationAlpha,
    SubViewer,
    MicroDvd,
}

impl SubtitleFormat {
    /// Maps the format name a subtitle source reports.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "srt" | "subrip" => Some(Self::SubRip),
            "vtt" | "webvtt" => Some(Self::WebVtt),
            "ass" | "ssa" => Some(Self::SubStationAlpha),
            "sbv" => Some(Self::SubViewer),
            "sub" | "microdvd" => Some(Self::MicroDvd),
            _ => None,
        }
    }

    /// Guesses the format from the subtitle text itself.
    pub fn detect(content: &str) -> Option<Self> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("WEBVTT") {
            return Some(Self::WebVtt);
        }
        if content.contains("[Script Info]") || content.contains("[Events]") {
            return Some(Self::SubStationAlpha);
        }

        let first_line = content.lines().next().unwrap_or_default().trim();
        if MICRO_DVD_LINE.is_match(first_line) {
            return Some(Self::MicroDvd);
        }
        if content.lines().any(|line| SBV_TIMING.is_match(line.trim())) {
            return Some(Self::SubViewer);
        }
        if content.lines().any(|line| CUE_TIMING.is_match(line)) {
            return Some(Self::SubRip);
        }

        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cue {
    start_ms: u64,
    end_ms: u64,
    text: String,
}

/// Converts `text`, reported by its source as `format`, into SubRip.
///
/// Unknown format names fall back to sniffing the content, and so does a
/// reported format that yields no cues.
pub fn convert(text: &str, format: &str) -> Result<String, ConvertError> {
    let content = normalize_line_endings(text);

    let reported = SubtitleFormat::from_name(format);
    let detected = SubtitleFormat::detect(&content);
    let format_to_parse = reported
        .or(detected)
        .ok_or_else(|| ConvertError::UnknownFormat {
            format: format.to_string(),
        })?;

    let mut cues = parse(&content, format_to_parse);

    if cues.is_empty()
        && let Some(detected) = detected
        && detected != format_to_parse
    {
        debug!("No cues as {format_to_parse:?}, retrying as {detected:?}");
        cues = parse(&content, detected);
    }

    if cues.is_empty() {
        return Err(ConvertError::NoCues {
            format: format_to_parse,
        });
    }

    cues.sort_by_key(|cue| cue.start_ms);

    Ok(write_srt(&cues))
}

fn normalize_line_endings(text: &str) -> String {
    text.trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse(content: &str, format: SubtitleFormat) -> Vec<Cue> {
    match format {
        SubtitleFormat::SubRip => parse_timed_blocks(content, |text| text.to_string()),
        SubtitleFormat::WebVtt => {
            parse_timed_blocks(content, |text| VTT_MARKUP.replace_all(text, "").into_owned())
        }
        SubtitleFormat::SubStationAlpha => parse_ass(content),
        SubtitleFormat::SubViewer => parse_sbv(content),
        SubtitleFormat::MicroDvd => parse_micro_dvd(content),
    }
}

/// Blank line separated cues with a `start --> end` line, shared by SubRip and WebVTT.
fn parse_timed_blocks(content: &str, clean_text: impl Fn(&str) -> String) -> Vec<Cue> {
    content
        .split("\n\n")
        .filter_map(|block| {
            let lines: Vec<&str> = block.lines().collect();
            let timing_index = lines.iter().position(|line| CUE_TIMING.is_match(line))?;
            let timing = CUE_TIMING.captures(lines[timing_index])?;

            let start_ms = timestamp_ms(
                timing.get(1).map(|m| m.as_str()),
                &timing[2],
                &timing[3],
                &timing[4],
            )?;
            let end_ms = timestamp_ms(
                timing.get(5).map(|m| m.as_str()),
                &timing[6],
                &timing[7],
                &timing[8],
            )?;
            let text = clean_text(lines[timing_index + 1..].join("\n").trim());

            cue(start_ms, end_ms, text)
        })
        .collect()
}

fn parse_ass(content: &str) -> Vec<Cue> {
    let mut in_events = false;
    // Used until the section declares its own `Format:` line
    let mut columns: Vec<String> = [
        "layer", "start", "end", "style", "name", "marginl", "marginr", "marginv", "effect", "text",
    ]
    .map(str::to_string)
    .to_vec();
    let mut cues = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_events = line.eq_ignore_ascii_case("[events]");
            continue;
        }
        if !in_events {
            continue;
        }
        if let Some(format) = line.strip_prefix("Format:") {
            columns = format
                .split(',')
                .map(|column| column.trim().to_ascii_lowercase())
                .collect();
            continue;
        }
        let Some(dialogue) = line.strip_prefix("Dialogue:") else {
            continue;
        };

        let values: Vec<&str> = dialogue.splitn(columns.len(), ',').collect();
        let column = |name: &str| {
            columns
                .iter()
                .position(|candidate| candidate == name)
                .and_then(|index| values.get(index))
                .map(|value| value.trim())
        };

        let (Some(start), Some(end), Some(text)) = (
            column("start").and_then(ass_time_ms),
            column("end").and_then(ass_time_ms),
            column("text"),
        ) else {
            continue;
        };

        let text = BRACED_OVERRIDE
            .replace_all(text, "")
            .replace("\\N", "\n")
            .replace("\\n", "\n")
            .replace("\\h", " ");

        cues.extend(cue(start, end, text.trim().to_string()));
    }

    cues
}

fn ass_time_ms(value: &str) -> Option<u64> {
    let time = ASS_TIME.captures(value)?;
    timestamp_ms(Some(&time[1]), &time[2], &time[3], &time[4])
}

fn parse_sbv(content: &str) -> Vec<Cue> {
    content
        .split("\n\n")
        .filter_map(|block| {
            let mut lines = block.lines().skip_while(|line| line.trim().is_empty());
            let timing = SBV_TIMING.captures(lines.next()?.trim())?;

            let start_ms = timestamp_ms(Some(&timing[1]), &timing[2], &timing[3], &timing[4])?;
            let end_ms = timestamp_ms(Some(&timing[5]), &timing[6], &timing[7], &timing[8])?;
            let text = lines.collect::<Vec<_>>().join("\n");

            cue(start_ms, end_ms, text.trim().to_string())
        })
        .collect()
}

fn parse_micro_dvd(content: &str) -> Vec<Cue> {
    let mut fps = MICRO_DVD_DEFAULT_FPS;
    let mut cues = Vec::new();

    for (index, line) in content.lines().map(str::trim).enumerate() {
        let Some(captures) = MICRO_DVD_LINE.captures(line) else {
            continue;
        };
        let (Ok(start_frame), Ok(end_frame)) =
            (captures[1].parse::<u64>(), captures[2].parse::<u64>())
        else {
            continue;
        };
        let text = &captures[3];

        // A leading `{1}{1}23.976` line carries the frame rate
        if index == 0
            && let Ok(declared_fps) = text.trim().parse::<f64>()
            && declared_fps > 0.0
        {
            fps = declared_fps;
            continue;
        }

        let frame_ms = |frame: u64| (frame as f64 * 1000.0 / fps).round() as u64;
        let text = BRACED_OVERRIDE.replace_all(text, "").replace('|', "\n");

        cues.extend(cue(
            frame_ms(start_frame),
            frame_ms(end_frame),
            text.trim().to_string(),
        ));
    }

    cues
}

fn cue(start_ms: u64, end_ms: u64, text: String) -> Option<Cue> {
    if text.is_empty() {
        return None;
    }

    Some(Cue {
        start_ms,
        end_ms: end_ms.max(start_ms),
        text,
    })
}

/// The fraction may be written with one to three digits, `,5` means 500ms.
///
/// `None` when a field doesn't fit, so the cue gets skipped.
fn timestamp_ms(hours: Option<&str>, minutes: &str, seconds: &str, fraction: &str) -> Option<u64> {
    let number = |value: &str| value.parse::<u64>().ok();
    let fraction_ms = number(fraction)? * 10u64.pow(3 - fraction.len().min(3) as u32);
    let hours = match hours {
        Some(hours) => number(hours)?,
        None => 0,
    };

    hours
        .checked_mul(3_600_000)?
        .checked_add(number(minutes)? * 60_000)?
        .checked_add(number(seconds)? * 1000)?
        .checked_add(fraction_ms)
}

fn format_srt_time(ms: u64) -> String {
    format!(
        "{:02}:{:02}:{:02},{:03}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1000,
        ms % 1000
    )
}

fn write_srt(cues: &[Cue]) -> String {
    cues.iter()
        .enumerate()
        .map(|(index, cue)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                index + 1,
                format_srt_time(cue.start_ms),
                format_srt_time(cue.end_ms),
                cue.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    UnknownFormat { format: String },
    NoCues { format: SubtitleFormat },
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::UnknownFormat { format } => {
                write!(f, "unsupported subtitle format {format:?}")
            }
            ConvertError::NoCues { format } => write!(f, "no cues found in {format:?} subtitle"),
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use crate::convert::{ConvertError, SubtitleFormat, convert, format_srt_time};

    const EXPECTED: &str = "1\n00:00:01,000 --> 00:00:04,500\nHello there\n\n2\n00:00:05,250 --> 00:00:07,000\nGeneral\nKenobi\n";

    #[test]
    fn srt_is_renumbered_and_cleaned() {
        let input = "\u{feff}7\r\n00:00:01,000 --> 00:00:04,500\r\nHello there\r\n\r\n\r\n9\r\n00:00:05,250 --> 00:00:07,000\r\nGeneral\r\nKenobi\r\n";

        assert_eq!(convert(input, "srt").unwrap(), EXPECTED);
    }

    #[test]
    fn srt_cues_are_sorted() {
        let input = "1\n00:00:05,250 --> 00:00:07,000\nGeneral\nKenobi\n\n2\n00:00:01,000 --> 00:00:04,500\nHello there\n";

        assert_eq!(convert(input, "srt").unwrap(), EXPECTED);
    }

    #[test]
    fn webvtt() {
        let input = "WEBVTT - dialogue\n\nNOTE made by hand\n\nintro\n00:01.000 --> 00:04.500 align:start\n<v Obi-Wan>Hello there</v>\n\n00:00:05.250 --> 00:00:07.000\n<c.yellow>General</c>\n<00:00:06.000>Kenobi\n";

        assert_eq!(convert(input, "vtt").unwrap(), EXPECTED);
    }

    #[test]
    fn webvtt_keeps_basic_styling() {
        let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<i>whisper</i>\n";

        assert_eq!(
            convert(input, "vtt").unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\n<i>whisper</i>\n"
        );
    }

    #[test]
    fn sub_station_alpha() {
        let input = "[Script Info]\nScriptType: v4.00+\n\n[V4+ Styles]\nFormat: Name, Fontname\nStyle: Default,Arial\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nComment: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,ignored\nDialogue: 0,0:00:05.25,0:00:07.00,Default,,0,0,0,,{\\i1}General{\\i0}\\NKenobi\nDialogue: 0,0:00:01.00,0:00:04.50,Default,,0,0,0,,Hello there\n";

        assert_eq!(convert(input, "ass").unwrap(), EXPECTED);
    }

    #[test]
    fn sub_station_alpha_text_may_contain_commas() {
        let input = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,Well, well, well\n";

        assert_eq!(
            convert(input, "ssa").unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\nWell, well, well\n"
        );
    }

    #[test]
    fn sub_viewer() {
        let input = "0:00:01.000,0:00:04.500\nHello there\n\n0:00:05.250,0:00:07.000\nGeneral\nKenobi\n";

        assert_eq!(convert(input, "sbv").unwrap(), EXPECTED);
    }

    #[test]
    fn micro_dvd_with_declared_frame_rate() {
        let input = "{1}{1}50\n{50}{225}Hello there\n{262}{350}{y:i}General|Kenobi\n";

        assert_eq!(
            convert(input, "sub").unwrap(),
            "1\n00:00:01,000 --> 00:00:04,500\nHello there\n\n2\n00:00:05,240 --> 00:00:07,000\nGeneral\nKenobi\n"
        );
    }

    #[test]
    fn micro_dvd_defaults_to_25_fps() {
        let input = "{25}{50}One second in\n";

        assert_eq!(
            convert(input, "sub").unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\nOne second in\n"
        );
    }

    #[test]
    fn unknown_format_name_is_sniffed() {
        let input = "1\n00:00:01,000 --> 00:00:04,500\nHello there\n";

        assert!(convert(input, "").is_ok());
        assert!(convert(input, "txt").is_ok());
    }

    #[test]
    fn misreported_format_falls_back_to_content() {
        let input = "1\n00:00:01,000 --> 00:00:04,500\nHello there\n\n2\n00:00:05,250 --> 00:00:07,000\nGeneral\nKenobi\n";

        assert_eq!(convert(input, "sub").unwrap(), EXPECTED);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            convert("just some words", "txt"),
            Err(ConvertError::UnknownFormat {
                format: "txt".to_string()
            })
        );
        assert_eq!(
            convert("just some words", "srt"),
            Err(ConvertError::NoCues {
                format: SubtitleFormat::SubRip
            })
        );
    }

    #[test]
    fn timestamps_that_overflow_are_skipped() {
        let input = "1\n99999999999999:00:01,000 --> 99999999999999:00:02,000\nhi\n";
        assert_eq!(
            convert(input, "srt"),
            Err(ConvertError::NoCues {
                format: SubtitleFormat::SubRip
            })
        );

        let input = "1\n99999999999999:00:01,000 --> 99999999999999:00:02,000\nhi\n\n2\n00:00:01,000 --> 00:00:02,000\nstill here\n";
        assert_eq!(
            convert(input, "srt").unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\nstill here\n"
        );

        let input = "[Events]\nFormat: Start, End, Text\nDialogue: 99999999999999:00:01.00,99999999999999:00:02.00,hi\n";
        assert!(convert(input, "ass").is_err());
    }

    #[test]
    fn detection() {
        assert_eq!(
            SubtitleFormat::detect("WEBVTT\n\n00:01.000 --> 00:02.000\nhi"),
            Some(SubtitleFormat::WebVtt)
        );
        assert_eq!(
            SubtitleFormat::detect("[Script Info]\nScriptType: v4.00+"),
            Some(SubtitleFormat::SubStationAlpha)
        );
        assert_eq!(
            SubtitleFormat::detect("{1}{25}hi"),
            Some(SubtitleFormat::MicroDvd)
        );
        assert_eq!(SubtitleFormat::detect("hello"), None);
    }

    #[test]
    fn srt_time_formatting() {
        assert_eq!(format_srt_time(0), "00:00:00,000");
        assert_eq!(format_srt_time(3_723_004), "01:02:03,004");
    }
}
