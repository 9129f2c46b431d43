use chrono::{DateTime, Duration, Utc};
use fake::faker::address::raw::{CityName, CountryName, PostCode, StateName, StreetName};
use fake::faker::internet::raw::{SafeEmail, Username};
use fake::faker::lorem::raw::{Paragraph, Sentence, Word};
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{Data, EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};
use fake::Fake;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, RwLock};

use crate::domain::{FakerKind, ValueSource};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RECENT_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Locales the faker data is available in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    FrFr,
    JaJp,
    PtBr,
    ZhCn,
    ZhTw,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "en" | "en_us" | "en_gb" => Ok(Self::En),
            "fr" | "fr_fr" => Ok(Self::FrFr),
            "ja" | "ja_jp" => Ok(Self::JaJp),
            "pt" | "pt_br" => Ok(Self::PtBr),
            "zh" | "zh_cn" => Ok(Self::ZhCn),
            "zh_tw" => Ok(Self::ZhTw),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::En => "en",
            Self::FrFr => "fr_FR",
            Self::JaJp => "ja_JP",
            Self::PtBr => "pt_BR",
            Self::ZhCn => "zh_CN",
            Self::ZhTw => "zh_TW",
        };
        f.write_str(tag)
    }
}

/// Value source backed by `fake` and a `StdRng`.
///
/// Seeding makes draws reproducible; pin the anchor with [`FakerValueSource::with_anchor`]
/// as well when dates must be reproducible too.
pub struct FakerValueSource {
    rng: Mutex<StdRng>,
    locale: RwLock<Locale>,
    anchor: Option<DateTime<Utc>>,
}

impl FakerValueSource {
    /// Source seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic source
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            locale: RwLock::new(Locale::default()),
            anchor: None,
        }
    }

    /// Fix the instant recent dates count back from
    pub fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_locale(self, locale: &str) -> Self {
        self.set_locale(locale);
        self
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // a panic mid-draw leaves the RNG usable
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_locale(&self) -> Locale {
        *self.locale.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn fake_with(&self, locale: Locale, kind: FakerKind) -> String {
        let mut rng = self.rng();
        let rng = &mut *rng;
        match locale {
            Locale::En => fake_in(EN, kind, rng),
            Locale::FrFr => fake_in(FR_FR, kind, rng),
            Locale::JaJp => fake_in(JA_JP, kind, rng),
            Locale::PtBr => fake_in(PT_BR, kind, rng),
            Locale::ZhCn => fake_in(ZH_CN, kind, rng),
            Locale::ZhTw => fake_in(ZH_TW, kind, rng),
        }
    }
}

impl Default for FakerValueSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Unknown tags fall back to English
fn parse_locale(tag: &str) -> Locale {
    tag.parse().unwrap_or_else(|e| {
        tracing::warn!("{}, falling back to {}", e, Locale::En);
        Locale::En
    })
}

fn fake_in<L: Data + Copy, R: Rng>(locale: L, kind: FakerKind, rng: &mut R) -> String {
    match kind {
        FakerKind::FirstName => FirstName(locale).fake_with_rng(rng),
        FakerKind::LastName => LastName(locale).fake_with_rng(rng),
        FakerKind::FullName => Name(locale).fake_with_rng(rng),
        FakerKind::Username => Username(locale).fake_with_rng(rng),
        FakerKind::Email => SafeEmail(locale).fake_with_rng(rng),
        FakerKind::Phone => PhoneNumber(locale).fake_with_rng(rng),
        FakerKind::Street => StreetName(locale).fake_with_rng(rng),
        FakerKind::City => CityName(locale).fake_with_rng(rng),
        FakerKind::State => StateName(locale).fake_with_rng(rng),
        FakerKind::Country => CountryName(locale).fake_with_rng(rng),
        FakerKind::PostalCode => PostCode(locale).fake_with_rng(rng),
        FakerKind::Word => Word(locale).fake_with_rng(rng),
        FakerKind::Sentence => Sentence(locale, 3..10).fake_with_rng(rng),
        FakerKind::Paragraph => Paragraph(locale, 1..3).fake_with_rng(rng),
    }
}

impl ValueSource for FakerValueSource {
    fn alpha(&self, len: usize) -> String {
        let mut rng = self.rng();
        (0..len)
            .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }

    fn alpha_numeric(&self, len: usize) -> String {
        let mut rng = self.rng();
        (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
    }

    fn number(&self, max: u64) -> u64 {
        self.rng().gen_range(1..=max.max(1))
    }

    fn boolean(&self) -> bool {
        self.rng().gen_bool(0.5)
    }

    fn recent_date(&self) -> DateTime<Utc> {
        let offset = self.rng().gen_range(0..RECENT_WINDOW_MS);
        self.anchor.unwrap_or_else(Utc::now) - Duration::milliseconds(offset)
    }

    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng().gen_range(0..len)
    }

    fn fake(&self, kind: FakerKind) -> String {
        self.fake_with(self.current_locale(), kind)
    }

    fn fake_localized(&self, kind: FakerKind, locale: &str) -> String {
        self.fake_with(parse_locale(locale), kind)
    }

    fn set_locale(&self, locale: &str) {
        *self.locale.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = parse_locale(locale);
    }

    fn locale(&self) -> String {
        self.current_locale().to_string()
    }
}
