//! Language codes the caption sources report, and the names we show for them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LanguageCode {
    Albanian,
    Arabic,
    Bengali,
    Bulgarian,
    Catalan,
    Chinese,
    Croatian,
    Czech,
    Danish,
    Dutch,
    English,
    Estonian,
    Finnish,
    French,
    German,
    Greek,
    Hebrew,
    Hindi,
    Hungarian,
    Icelandic,
    Indonesian,
    Italian,
    Japanese,
    Korean,
    Latvian,
    Lithuanian,
    Macedonian,
    Malay,
    Norwegian,
    Persian,
    Polish,
    Portuguese,
    Romanian,
    Russian,
    Serbian,
    Slovak,
    Slovenian,
    Spanish,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Vietnamese,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 43] = {
        use LanguageCode::*;
        [
            Albanian, Arabic, Bengali, Bulgarian, Catalan, Chinese, Croatian, Czech, Danish, Dutch,
            English, Estonian, Finnish, French, German, Greek, Hebrew, Hindi, Hungarian, Icelandic,
            Indonesian, Italian, Japanese, Korean, Latvian, Lithuanian, Macedonian, Malay,
            Norwegian, Persian, Polish, Portuguese, Romanian, Russian, Serbian, Slovak, Slovenian,
            Spanish, Swedish, Thai, Turkish, Ukrainian, Vietnamese,
        ]
    };

    /// (ISO 639-1, ISO 639-2/T, English name)
    fn codes(&self) -> (&'static str, &'static str, &'static str) {
        use LanguageCode::*;
        match self {
            Albanian => ("sq", "sqi", "Albanian"),
            Arabic => ("ar", "ara", "Arabic"),
            Bengali => ("bn", "ben", "Bengali"),
            Bulgarian => ("bg", "bul", "Bulgarian"),
            Catalan => ("ca", "cat", "Catalan"),
            Chinese => ("zh", "zho", "Chinese"),
            Croatian => ("hr", "hrv", "Croatian"),
            Czech => ("cs", "ces", "Czech"),
            Danish => ("da", "dan", "Danish"),
            Dutch => ("nl", "nld", "Dutch"),
            English => ("en", "eng", "English"),
            Estonian => ("et", "est", "Estonian"),
            Finnish => ("fi", "fin", "Finnish"),
            French => ("fr", "fra", "French"),
            German => ("de", "deu", "German"),
            Greek => ("el", "ell", "Greek"),
            Hebrew => ("he", "heb", "Hebrew"),
            Hindi => ("hi", "hin", "Hindi"),
            Hungarian => ("hu", "hun", "Hungarian"),
            Icelandic => ("is", "isl", "Icelandic"),
            Indonesian => ("id", "ind", "Indonesian"),
            Italian => ("it", "ita", "Italian"),
            Japanese => ("ja", "jpn", "Japanese"),
            Korean => ("ko", "kor", "Korean"),
            Latvian => ("lv", "lav", "Latvian"),
            Lithuanian => ("lt", "lit", "Lithuanian"),
            Macedonian => ("mk", "mkd", "Macedonian"),
            Malay => ("ms", "msa", "Malay"),
            Norwegian => ("no", "nor", "Norwegian"),
            Persian => ("fa", "fas", "Persian"),
            Polish => ("pl", "pol", "Polish"),
            Portuguese => ("pt", "por", "Portuguese"),
            Romanian => ("ro", "ron", "Romanian"),
            Russian => ("ru", "rus", "Russian"),
            Serbian => ("sr", "srp", "Serbian"),
            Slovak => ("sk", "slk", "Slovak"),
            Slovenian => ("sl", "slv", "Slovenian"),
            Spanish => ("es", "spa", "Spanish"),
            Swedish => ("sv", "swe", "Swedish"),
            Thai => ("th", "tha", "Thai"),
            Turkish => ("tr", "tur", "Turkish"),
            Ukrainian => ("uk", "ukr", "Ukrainian"),
            Vietnamese => ("vi", "vie", "Vietnamese"),
        }
    }

    pub fn to_iso639_1(&self) -> &'static str {
        self.codes().0
    }

    pub fn to_iso639_2t(&self) -> &'static str {
        self.codes().1
    }

    pub fn display_name(&self) -> &'static str {
        self.codes().2
    }

    /// Accepts bare codes (`en`) and region tagged locales (`en-US`, `pt_BR`).
    pub fn from_locale(locale: &str) -> Option<Self> {
        let base = locale.split(['-', '_']).next()?.to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|language| language.to_iso639_1() == base)
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = ();

    /// Parses an ISO 639-2/T code, the form subtitle file names carry.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|language| language.to_iso639_2t() == value)
            .ok_or(())
    }
}

/// Human readable name for a locale, `None` when we don't know the language.
pub fn pretty_language_name(locale: &str) -> Option<&'static str> {
    LanguageCode::from_locale(locale).map(|language| language.display_name())
}

#[cfg(test)]
mod tests {
    use crate::language::{LanguageCode, pretty_language_name};

    #[test]
    fn locale_names() {
        assert_eq!(pretty_language_name("en"), Some("English"));
        assert_eq!(pretty_language_name("TR"), Some("Turkish"));
        assert_eq!(pretty_language_name("pt-BR"), Some("Portuguese"));
        assert_eq!(pretty_language_name("zz"), None);
        assert_eq!(pretty_language_name(""), None);
    }

    #[test]
    fn three_letter_codes() {
        assert_eq!(LanguageCode::try_from("eng"), Ok(LanguageCode::English));
        assert_eq!(LanguageCode::try_from("tur"), Ok(LanguageCode::Turkish));
        assert!(LanguageCode::try_from("xyz").is_err());
    }

    #[test]
    fn codes_are_unique() {
        for (index, language) in LanguageCode::ALL.iter().enumerate() {
            assert!(
                LanguageCode::ALL[index + 1..]
                    .iter()
                    .all(|other| other.to_iso639_1() != language.to_iso639_1()),
                "{language:?} shares its code"
            );
        }
    }
}
