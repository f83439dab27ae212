//! 날짜 정규화.
//!
//! 매매일지 백엔드는 날짜를 여러 형태로 돌려줍니다 (`2024-01-05`,
//! `2024-01-05T00:00:00+00:00`, 사람이 입력한 `Jan 5, 2024` 등).
//! 경계에서 한 번 [`DateInput`]으로 분류한 뒤 [`CanonicalDate`] 하나로 정규화합니다.
//!
//! # 정규화 규칙
//!
//! - `YYYY-MM-DD` 문자열: 그대로 사용
//! - ISO 타임스탬프: `T` 앞부분만 사용 (시간대 변환 없음, 하루 밀림 방지)
//! - 네이티브 날짜 값: 해당 날짜
//! - 그 외 파싱 가능한 문자열: 파싱된 날짜
//! - 파싱 불가: `None` (에러가 아님)

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 정규화된 날짜 출력 형식.
const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// 자유 형식 입력에서 허용하는 날짜 레이아웃.
const FREEFORM_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// 자유 형식 입력에서 허용하는 날짜+시각 레이아웃.
const FREEFORM_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// 정규화된 달력 날짜 (`YYYY-MM-DD`).
///
/// 문자열 표현의 사전순 정렬과 시간순 정렬이 일치합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// 어떤 실제 날짜보다도 늦은 센티널 값.
    ///
    /// 청산일이 없는 거래를 정렬 맨 뒤로 보낼 때 사용합니다.
    pub const LATEST: CanonicalDate = CanonicalDate(NaiveDate::MAX);

    /// 새 정규화 날짜를 생성합니다.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 연/월/일로 생성합니다. 존재하지 않는 날짜는 `None`.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .filter(has_four_digit_year)
            .map(Self)
    }

    /// 내부 `NaiveDate`를 반환합니다.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `days`일 이동한 날짜를 반환합니다 (음수면 과거).
    pub fn offset_days(&self, days: i64) -> Option<Self> {
        self.0
            .checked_add_signed(chrono::Duration::days(days))
            .map(Self)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize_str(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

/// 이기종 날짜 입력.
///
/// 원시 문자열은 [`DateInput::parse`]로 한 번만 분류됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateInput {
    /// ISO 타임스탬프 (`T` 포함)
    Iso(String),
    /// `YYYY-MM-DD` 문자열
    PlainDate(String),
    /// 이미 파싱된 날짜 값
    Native(NaiveDate),
    /// 파싱 불가 (누락 포함)
    Unparseable(String),
}

impl Default for DateInput {
    fn default() -> Self {
        Self::missing()
    }
}

impl DateInput {
    /// 누락된 날짜.
    pub fn missing() -> Self {
        DateInput::Unparseable(String::new())
    }

    /// 원시 문자열을 분류합니다.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if looks_like_plain(trimmed) {
            return DateInput::PlainDate(trimmed.to_string());
        }

        // `T` 앞부분이 날짜 모양일 때만 ISO로 취급 ("Thu, 04 Jan 2024 ..." 같은 RFC 2822 문자열 제외)
        if let Some((prefix, _)) = trimmed.split_once('T') {
            if looks_like_plain(prefix) {
                return DateInput::Iso(trimmed.to_string());
            }
        }

        match parse_freeform(trimmed) {
            Some(date) => DateInput::Native(date),
            None => DateInput::Unparseable(trimmed.to_string()),
        }
    }

    /// 정규화된 날짜를 반환합니다. 유효하지 않으면 `None`.
    pub fn normalize(&self) -> Option<CanonicalDate> {
        match self {
            DateInput::PlainDate(s) => parse_plain(s),
            DateInput::Iso(s) => s.split('T').next().and_then(parse_plain),
            DateInput::Native(date) => Some(*date),
            DateInput::Unparseable(_) => None,
        }
        .filter(has_four_digit_year)
        .map(CanonicalDate)
    }

    /// 원래 입력의 문자열 표현.
    pub fn as_raw(&self) -> Option<String> {
        match self {
            DateInput::Iso(s) | DateInput::PlainDate(s) => Some(s.clone()),
            DateInput::Native(date) => Some(date.format(CANONICAL_FORMAT).to_string()),
            DateInput::Unparseable(s) if s.is_empty() => None,
            DateInput::Unparseable(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for DateInput {
    fn from(raw: &str) -> Self {
        DateInput::parse(raw)
    }
}

impl From<String> for DateInput {
    fn from(raw: String) -> Self {
        DateInput::parse(&raw)
    }
}

impl From<Option<String>> for DateInput {
    fn from(raw: Option<String>) -> Self {
        raw.map(DateInput::from).unwrap_or_default()
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Native(date)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(timestamp: DateTime<Utc>) -> Self {
        DateInput::Native(timestamp.date_naive())
    }
}

impl From<CanonicalDate> for DateInput {
    fn from(date: CanonicalDate) -> Self {
        DateInput::Native(date.date())
    }
}

impl Serialize for DateInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.into())
    }
}

/// 날짜 입력을 정규화합니다.
pub fn normalize(input: &DateInput) -> Option<CanonicalDate> {
    input.normalize()
}

/// 원시 문자열을 분류 후 정규화합니다.
pub fn normalize_str(raw: &str) -> Option<CanonicalDate> {
    DateInput::parse(raw).normalize()
}

/// `DDDD-DD-DD` 모양인지 확인합니다 (달력 유효성은 보지 않음).
fn looks_like_plain(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_plain(s: &str) -> Option<NaiveDate> {
    if !looks_like_plain(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, CANONICAL_FORMAT).ok()
}

fn parse_freeform(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    FREEFORM_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            FREEFORM_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        // 오프셋이 붙은 문자열도 기재된 날짜 그대로 사용
        .or_else(|| DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .filter(has_four_digit_year)
}

/// 4자리 연도 밖은 `YYYY-MM-DD`로 다시 표현할 수 없음
fn has_four_digit_year(date: &NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}
