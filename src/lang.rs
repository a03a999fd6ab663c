//! Language detection ensemble.
//!
//! The language-majority detection method needs four independent opinions
//! about the language of a profile description. Each backend implements
//! [`LanguageDetect`]: given a normalized text, return an ISO 639-1 code or
//! [`UNDEFINED_LANG`] when it cannot tell (including on any internal
//! failure — a broken backend must never abort the overall call, it just
//! loses its vote).
//!
//! Default ensemble:
//!
//! | Backend | Basis | Strength |
//! |---------|-------|----------|
//! | [`WhatlangDetector`] | trigram statistics (`whatlang`) | fast, broad coverage |
//! | [`LinguaDetector`] | n-gram models (`lingua`) | short-text accuracy |
//! | [`StopwordDetector`] | function-word profiles | co-official languages (ca/gl/eu) |
//! | [`ScriptDetector`] | Unicode script counting | non-Latin scripts |
//!
//! [`LanguageEnsemble::majority`] tallies the votes, drops `"undefined"`,
//! and accepts a language only when at least `quorum` backends agree.

use std::collections::BTreeMap;

/// Vote cast by a backend that has no confident answer.
pub const UNDEFINED_LANG: &str = "undefined";

/// A single language-detection backend.
///
/// Implementations must be infallible at the call site: any internal error
/// is reported as [`UNDEFINED_LANG`], never as a panic or `Err`.
pub trait LanguageDetect: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &'static str;

    /// Detect the language of `text`, returning an ISO 639-1 code or
    /// [`UNDEFINED_LANG`].
    fn detect(&self, text: &str) -> String;
}

/// Trigram-based detection via the `whatlang` crate.
pub struct WhatlangDetector;

impl LanguageDetect for WhatlangDetector {
    fn name(&self) -> &'static str {
        "whatlang"
    }

    fn detect(&self, text: &str) -> String {
        let Some(info) = whatlang::detect(text) else {
            return UNDEFINED_LANG.to_string();
        };
        use whatlang::Lang;
        match info.lang() {
            Lang::Spa => "es",
            Lang::Cat => "ca",
            Lang::Por => "pt",
            Lang::Eng => "en",
            Lang::Fra => "fr",
            Lang::Ita => "it",
            Lang::Deu => "de",
            Lang::Rus => "ru",
            Lang::Ara => "ar",
            Lang::Jpn => "ja",
            Lang::Kor => "ko",
            Lang::Cmn => "zh",
            Lang::Nld => "nl",
            Lang::Tur => "tr",
            Lang::Pol => "pl",
            // No 639-1 mapping worth voting with.
            _ => UNDEFINED_LANG,
        }
        .to_string()
    }
}

/// N-gram model detection via the `lingua` crate.
pub struct LinguaDetector {
    detector: lingua::LanguageDetector,
}

impl LinguaDetector {
    /// Build the detector over every language compiled into the crate.
    #[must_use]
    pub fn new() -> Self {
        let detector = lingua::LanguageDetectorBuilder::from_all_languages()
            .with_minimum_relative_distance(0.1)
            .build();
        Self { detector }
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetect for LinguaDetector {
    fn name(&self) -> &'static str {
        "lingua"
    }

    fn detect(&self, text: &str) -> String {
        match self.detector.detect_language_of(text) {
            Some(lang) => lang.iso_code_639_1().to_string().to_lowercase(),
            None => UNDEFINED_LANG.to_string(),
        }
    }
}

/// Function-word profiles for the languages the gazetteer cares about.
///
/// Distinguishes Spain's co-official languages better than the statistical
/// backends on very short bios, and abstains everywhere else. Words chosen
/// to be disjoint across profiles where possible; ties abstain.
const STOPWORD_PROFILES: &[(&str, &[&str])] = &[
    (
        "es",
        &[
            "el", "la", "los", "las", "que", "de", "del", "en", "y", "es", "una", "por", "con",
            "para", "mas", "pero", "sus", "este", "como",
        ],
    ),
    (
        "ca",
        &[
            "els", "les", "amb", "per", "dels", "mes", "aquest", "som", "sense", "molt", "tot",
            "que", "una",
        ],
    ),
    (
        "gl",
        &["unha", "coa", "polo", "pola", "onde", "moi", "sen", "non", "como", "que", "para"],
    ),
    (
        "eu",
        &["eta", "bat", "da", "ez", "dira", "baina", "ere", "dut", "naiz", "gara"],
    ),
    (
        "pt",
        &["nao", "uma", "com", "para", "dos", "das", "em", "que", "mais", "por"],
    ),
    (
        "en",
        &["the", "and", "of", "to", "in", "is", "for", "with", "from", "about"],
    ),
    (
        "fr",
        &["le", "les", "des", "et", "dans", "pour", "une", "est", "pas", "sur", "je"],
    ),
    (
        "it",
        &["di", "che", "per", "della", "sono", "con", "il", "non", "gli", "una"],
    ),
    (
        "de",
        &["der", "die", "und", "das", "nicht", "mit", "ein", "ich", "von", "ist"],
    ),
];

/// Stopword-frequency detection.
pub struct StopwordDetector;

impl LanguageDetect for StopwordDetector {
    fn name(&self) -> &'static str {
        "stopwords"
    }

    fn detect(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return UNDEFINED_LANG.to_string();
        }
        let mut best: Option<(&str, usize)> = None;
        let mut tied = false;
        for (code, words) in STOPWORD_PROFILES {
            let hits = tokens.iter().filter(|t| words.contains(&t.to_lowercase().as_str())).count();
            match best {
                Some((_, top)) if hits == top && hits > 0 => tied = true,
                Some((_, top)) if hits > top => {
                    best = Some((code, hits));
                    tied = false;
                }
                None => best = Some((code, hits)),
                _ => {}
            }
        }
        match best {
            // Demand at least two function-word hits; one is noise.
            Some((code, hits)) if hits >= 2 && !tied => code.to_string(),
            _ => UNDEFINED_LANG.to_string(),
        }
    }
}

/// Unicode-script counting.
///
/// Decisive for non-Latin scripts; abstains on Latin text, where script
/// alone cannot separate languages.
pub struct ScriptDetector;

impl LanguageDetect for ScriptDetector {
    fn name(&self) -> &'static str {
        "script"
    }

    fn detect(&self, text: &str) -> String {
        let mut cyrillic = 0usize;
        let mut arabic = 0usize;
        let mut hebrew = 0usize;
        let mut cjk = 0usize;
        let mut kana = 0usize;
        let mut hangul = 0usize;
        let mut greek = 0usize;
        let mut latin = 0usize;
        let mut total = 0usize;

        for c in text.chars() {
            if !c.is_alphabetic() {
                continue;
            }
            total += 1;
            match c {
                '\u{0400}'..='\u{04ff}' => cyrillic += 1,
                '\u{0600}'..='\u{06ff}' => arabic += 1,
                '\u{0590}'..='\u{05ff}' => hebrew += 1,
                '\u{4e00}'..='\u{9fff}' => cjk += 1,
                '\u{3040}'..='\u{30ff}' => kana += 1,
                '\u{ac00}'..='\u{d7af}' => hangul += 1,
                '\u{0370}'..='\u{03ff}' => greek += 1,
                'a'..='z' | 'A'..='Z' => latin += 1,
                _ => {}
            }
        }
        if total == 0 {
            return UNDEFINED_LANG.to_string();
        }
        let candidates = [
            ("ru", cyrillic),
            ("ar", arabic),
            ("he", hebrew),
            ("ja", kana),
            ("ko", hangul),
            ("zh", cjk),
            ("el", greek),
        ];
        let (code, count) = candidates
            .into_iter()
            .max_by_key(|(_, n)| *n)
            .unwrap_or((UNDEFINED_LANG, 0));
        // Kanji shared with Chinese: any kana at all means Japanese.
        let code = if code == "zh" && kana > 0 { "ja" } else { code };
        if count * 2 > total && count > latin {
            code.to_string()
        } else {
            UNDEFINED_LANG.to_string()
        }
    }
}

/// Majority-voting ensemble over independent backends.
pub struct LanguageEnsemble {
    detectors: Vec<Box<dyn LanguageDetect>>,
    quorum: usize,
}

impl LanguageEnsemble {
    /// Ensemble over custom backends with a 3-vote quorum.
    #[must_use]
    pub fn new(detectors: Vec<Box<dyn LanguageDetect>>) -> Self {
        Self {
            detectors,
            quorum: 3,
        }
    }

    /// Override the agreement threshold.
    #[must_use]
    pub fn with_quorum(mut self, quorum: usize) -> Self {
        self.quorum = quorum;
        self
    }

    /// Number of backends in the ensemble.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// True when the ensemble holds no backends.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// The majority language of `text`, if at least `quorum` backends
    /// agree. Backends voting [`UNDEFINED_LANG`] are excluded from the
    /// tally.
    pub fn majority(&self, text: &str) -> Option<String> {
        let mut tally: BTreeMap<String, usize> = BTreeMap::new();
        for detector in &self.detectors {
            let vote = detector.detect(text);
            log::debug!("language vote from {}: {}", detector.name(), vote);
            if vote != UNDEFINED_LANG {
                *tally.entry(vote).or_default() += 1;
            }
        }
        let (code, votes) = tally.into_iter().max_by_key(|(_, n)| *n)?;
        (votes >= self.quorum).then_some(code)
    }
}

impl Default for LanguageEnsemble {
    /// The standard 4-backend ensemble requiring 3-of-4 agreement.
    fn default() -> Self {
        Self::new(vec![
            Box::new(WhatlangDetector),
            Box::new(LinguaDetector::new()),
            Box::new(StopwordDetector),
            Box::new(ScriptDetector),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl LanguageDetect for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn detect(&self, _text: &str) -> String {
            self.0.to_string()
        }
    }

    fn ensemble(votes: [&'static str; 4]) -> LanguageEnsemble {
        LanguageEnsemble::new(votes.into_iter().map(|v| Box::new(Fixed(v)) as _).collect())
    }

    #[test]
    fn three_of_four_reaches_quorum() {
        let e = ensemble(["es", "es", "es", "en"]);
        assert_eq!(e.majority("x").as_deref(), Some("es"));
    }

    #[test]
    fn two_of_four_is_rejected() {
        let e = ensemble(["es", "es", "en", "en"]);
        assert_eq!(e.majority("x"), None);
    }

    #[test]
    fn undefined_votes_never_count_toward_quorum() {
        let e = ensemble([UNDEFINED_LANG, UNDEFINED_LANG, UNDEFINED_LANG, "es"]);
        assert_eq!(e.majority("x"), None);
        let e = ensemble(["es", "es", "es", UNDEFINED_LANG]);
        assert_eq!(e.majority("x").as_deref(), Some("es"));
    }

    #[test]
    fn stopwords_detect_spanish_and_abstain_on_noise() {
        let d = StopwordDetector;
        assert_eq!(d.detect("el rock en la ciudad es para los amigos"), "es");
        assert_eq!(d.detect("zzz qqq"), UNDEFINED_LANG);
        assert_eq!(d.detect(""), UNDEFINED_LANG);
    }

    #[test]
    fn script_detector_abstains_on_latin() {
        let d = ScriptDetector;
        assert_eq!(d.detect("hola mundo"), UNDEFINED_LANG);
        assert_eq!(d.detect("Привет, мир! Как дела?"), "ru");
    }
}
