//! Japanese era (和暦) resolution.
//!
//! Maps proleptic Gregorian dates to era-relative year strings like
//! `平成12` or `令和元`. The era table is embedded as literal static data
//! rather than read from locale/calendar APIs, so resolution behaves the
//! same on every platform.
//!
//! ## Supported Eras
//!
//! | Name | Narrow | Start |
//! |------|--------|-------|
//! | 明治 | M | 1868-09-08 |
//! | 大正 | T | 1912-07-30 |
//! | 昭和 | S | 1926-12-25 |
//! | 平成 | H | 1989-01-08 |
//! | 令和 | R | 2019-05-01 |
//!
//! Start dates follow ICU's Japanese calendar data (the same boundaries
//! `Intl.DateTimeFormat('ja-JP-u-ca-japanese')` reports). Dates before
//! 1868-09-08 have no defined era.
//!
//! ## Partial Dates
//!
//! String input may omit the day (`YYYY-MM`) or the month and day
//! (`YYYY`). A partial date straddling an era boundary (e.g. `1989`, in
//! which 昭和 ended and 平成 began) is *ambiguous*: no era can honestly be
//! assigned, so [`Wareki::year`] returns `None`. This is a defined
//! outcome, distinct from the parse errors in [`WarekiError`].

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WarekiError {
    #[error("date must be in the format `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`")]
    InvalidFormat,
    #[error("no such calendar date: {0}")]
    InvalidDate(String),
    #[error("{0} precedes the oldest supported era (明治, from 1868-09-08)")]
    DateOutOfRange(NaiveDate),
}

/// A named era with its Gregorian start date.
///
/// The table of eras is fixed at build time; [`resolve_era`] hands out
/// `&'static` references into it.
#[derive(Debug, PartialEq, Eq)]
pub struct Era {
    /// Kanji name, used for both the long and short styles (e.g. 令和).
    pub name: &'static str,
    /// Single Latin letter for the narrow style (e.g. 'R'). Not derivable
    /// from the name; fixed alongside the table.
    pub abbreviation: char,
    start_year: i32,
    start_month: u32,
    start_day: u32,
}

impl Era {
    /// First Gregorian day of the era.
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, self.start_month, self.start_day)
            .expect("era table holds only real calendar dates")
    }

    fn started_by(&self, date: NaiveDate) -> bool {
        (self.start_year, self.start_month, self.start_day)
            <= (date.year(), date.month(), date.day())
    }
}

/// Chronologically ordered, append-only era table.
static ERAS: [Era; 5] = [
    era("明治", 'M', 1868, 9, 8),
    era("大正", 'T', 1912, 7, 30),
    era("昭和", 'S', 1926, 12, 25),
    era("平成", 'H', 1989, 1, 8),
    era("令和", 'R', 2019, 5, 1),
];

const fn era(name: &'static str, abbreviation: char, y: i32, m: u32, d: u32) -> Era {
    Era {
        name,
        abbreviation,
        start_year: y,
        start_month: m,
        start_day: d,
    }
}

/// How an era label is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EraStyle {
    /// Kanji name (令和元). In Japanese the long and short forms coincide.
    #[default]
    Long,
    /// Same as [`EraStyle::Long`] for Japanese era names.
    Short,
    /// Single Latin letter (R元).
    Narrow,
}

/// Resolve the era a date falls in: the latest era whose start is not
/// after `date`.
///
/// Dates before the oldest table entry fail with
/// [`WarekiError::DateOutOfRange`]; callers that just want "no defined
/// era" can treat that as absence rather than a fatal error.
pub fn resolve_era(date: NaiveDate) -> Result<&'static Era, WarekiError> {
    ERAS.iter()
        .rev()
        .find(|era| era.started_by(date))
        .ok_or(WarekiError::DateOutOfRange(date))
}

/// A date (possibly partial) carrying its era-relative year.
///
/// Construct from a [`NaiveDate`] via [`Wareki::new`] or parse one of the
/// three accepted string shapes via [`FromStr`]:
///
/// ```
/// use komono::wareki::{EraStyle, Wareki};
///
/// let w: Wareki = "2000-01-01".parse().unwrap();
/// assert_eq!(w.year(EraStyle::Long), Some("平成12".to_string()));
///
/// // An era changed during 1989, so the bare year is ambiguous.
/// let w: Wareki = "1989".parse().unwrap();
/// assert_eq!(w.year(EraStyle::Long), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wareki {
    /// `None` when a partial date straddled an era boundary.
    date: Option<NaiveDate>,
}

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})(?:-([0-9]{2})(?:-([0-9]{2}))?)?$").unwrap());

impl Wareki {
    pub fn new(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }

    /// The era this date falls in, or `None` for ambiguous partial dates
    /// and dates before the oldest supported era.
    pub fn era(&self) -> Option<&'static Era> {
        resolve_era(self.date?).ok()
    }

    /// Era-relative year string, e.g. `平成12`, `令和元`, or `R元` in the
    /// narrow style. An offset year of 1 renders as 元, never as the
    /// numeral.
    ///
    /// `None` for ambiguous partial dates and for dates with no defined
    /// era.
    pub fn year(&self, style: EraStyle) -> Option<String> {
        let date = self.date?;
        let era = resolve_era(date).ok()?;

        let offset_year = date.year() - era.start_year + 1;
        let year_token = if offset_year == 1 {
            "元".to_string()
        } else {
            offset_year.to_string()
        };

        Some(match style {
            EraStyle::Long | EraStyle::Short => format!("{}{year_token}", era.name),
            EraStyle::Narrow => format!("{}{year_token}", era.abbreviation),
        })
    }
}

impl FromStr for Wareki {
    type Err = WarekiError;

    /// Parse `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`. Any other shape is
    /// [`WarekiError::InvalidFormat`]; a shape-valid but nonexistent date
    /// (e.g. `2021-02-30`) is [`WarekiError::InvalidDate`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = DATE_SHAPE.captures(s).ok_or(WarekiError::InvalidFormat)?;

        // The shape regex only admits ASCII digits.
        let year: i32 = captures[1].parse().map_err(|_| WarekiError::InvalidFormat)?;
        let month: Option<u32> = captures
            .get(2)
            .map(|m| m.as_str().parse().map_err(|_| WarekiError::InvalidFormat))
            .transpose()?;
        let day: Option<u32> = captures
            .get(3)
            .map(|d| d.as_str().parse().map_err(|_| WarekiError::InvalidFormat))
            .transpose()?;

        match (month, day) {
            (Some(month), Some(day)) => {
                let date = NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or_else(|| WarekiError::InvalidDate(s.to_string()))?;
                Ok(Self::new(date))
            }
            (Some(month), None) => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)
                    .ok_or_else(|| WarekiError::InvalidDate(s.to_string()))?;
                let last = last_day_of_month(year, month)
                    .ok_or_else(|| WarekiError::InvalidDate(s.to_string()))?;
                Ok(Self::from_span(first, last))
            }
            (None, _) => {
                let first = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or_else(|| WarekiError::InvalidDate(s.to_string()))?;
                let last = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or_else(|| WarekiError::InvalidDate(s.to_string()))?;
                Ok(Self::from_span(first, last))
            }
        }
    }
}

impl Wareki {
    /// Build from the first and last day spanned by a partial date. If
    /// the boundary days disagree on their era the whole span is
    /// ambiguous and no date is kept.
    fn from_span(first: NaiveDate, last: NaiveDate) -> Self {
        let first_era = resolve_era(first).ok();
        let last_era = resolve_era(last).ok();
        if first_era == last_era {
            Self { date: Some(first) }
        } else {
            Self { date: None }
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
