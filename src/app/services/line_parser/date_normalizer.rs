//! Date phrase normalization
//!
//! Recognition order, first match wins:
//! 1. empty token or the undecided placeholder → today
//! 2. `<M>월 <D>일` → reference year
//! 3. `<M>/<D>` or `<M>.<D>` → reference year
//! 4. `<YYYY>-<M>-<D>`
//! 5. `<YY>-<M>-<D>` → 2000 + YY
//!
//! Normalization never fails. Anything unrecognized, or a match that names no
//! real calendar day, resolves to today with a warning.

use super::policy::DateMatching;
use crate::app::models::{ParseContext, ParseWarning};
use crate::constants::{DATE_TRAILING_PARTICLES, TWO_DIGIT_YEAR_BASE};
use crate::{Error, Result};
use chrono::NaiveDate;
use regex::{Captures, Regex};
use tracing::debug;

/// Result of normalizing one date token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOutcome {
    pub date: NaiveDate,
    pub warning: Option<ParseWarning>,
}

impl DateOutcome {
    fn recognized(date: NaiveDate) -> Self {
        Self {
            date,
            warning: None,
        }
    }

    fn fallback(ctx: &ParseContext, warning: ParseWarning) -> Self {
        Self {
            date: ctx.today,
            warning: Some(warning),
        }
    }
}

/// Which year a matched pattern resolves to
#[derive(Debug, Clone, Copy)]
enum YearSource {
    Reference,
    Literal,
    TwoDigit,
}

/// Compiled date matchers
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    undecided_placeholder: String,
    month_day_prefix: Regex,
    month_day_full: Regex,
    slash_prefix: Regex,
    slash_full: Regex,
    iso_long: Regex,
    iso_short: Regex,
}

impl DateNormalizer {
    /// Compile the matchers; `undecided_placeholder` resolves to today without a warning
    pub fn new(undecided_placeholder: impl Into<String>) -> Result<Self> {
        let particles = DATE_TRAILING_PARTICLES
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            undecided_placeholder: undecided_placeholder.into().to_lowercase(),
            month_day_prefix: compile(r"^([0-9]{1,2})\s*월\s*([0-9]{1,2})\s*일?")?,
            month_day_full: compile(&format!(
                r"^([0-9]{{1,2}})\s*월\s*([0-9]{{1,2}})\s*일?\s*(?:{})?$",
                particles
            ))?,
            slash_prefix: compile(r"^([0-9]{1,2})[/.]([0-9]{1,2})")?,
            slash_full: compile(r"^([0-9]{1,2})[/.]([0-9]{1,2})$")?,
            iso_long: compile(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$")?,
            iso_short: compile(r"^([0-9]{2})-([0-9]{1,2})-([0-9]{1,2})$")?,
        })
    }

    /// Normalize a date token against the request context
    pub fn normalize(
        &self,
        token: &str,
        ctx: &ParseContext,
        matching: DateMatching,
    ) -> DateOutcome {
        let token = token.trim();
        if token.is_empty() || token.to_lowercase() == self.undecided_placeholder {
            debug!("Date '{}' undecided, using {}", token, ctx.today);
            return DateOutcome::recognized(ctx.today);
        }

        let (month_day, slash) = match matching {
            DateMatching::Prefix => (&self.month_day_prefix, &self.slash_prefix),
            DateMatching::FullToken => (&self.month_day_full, &self.slash_full),
        };

        let matchers: [(&Regex, YearSource); 4] = [
            (month_day, YearSource::Reference),
            (slash, YearSource::Reference),
            (&self.iso_long, YearSource::Literal),
            (&self.iso_short, YearSource::TwoDigit),
        ];

        for (pattern, year_source) in matchers {
            if let Some(caps) = pattern.captures(token) {
                return match build_date(&caps, year_source, ctx.reference_year) {
                    Some(date) => DateOutcome::recognized(date),
                    None => {
                        debug!("Date '{}' matched but is not a calendar day", token);
                        DateOutcome::fallback(
                            ctx,
                            ParseWarning::InvalidCalendarDate {
                                token: token.to_string(),
                            },
                        )
                    }
                };
            }
        }

        DateOutcome::fallback(
            ctx,
            ParseWarning::UnrecognizedDate {
                token: token.to_string(),
            },
        )
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        Error::configuration(format!("Invalid date pattern '{}': {}", pattern, e))
    })
}

/// Build a calendar date from captured groups; `None` for impossible dates
fn build_date(caps: &Captures<'_>, year_source: YearSource, reference_year: i32) -> Option<NaiveDate> {
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let (year, month, day) = match year_source {
        YearSource::Reference => (reference_year, number(1)?, number(2)?),
        YearSource::Literal => (i32::try_from(number(1)?).ok()?, number(2)?, number(3)?),
        YearSource::TwoDigit => (
            TWO_DIGIT_YEAR_BASE + i32::try_from(number(1)?).ok()?,
            number(2)?,
            number(3)?,
        ),
    };

    NaiveDate::from_ymd_opt(year, month, day)
}
