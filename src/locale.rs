//! Display formatting strategies for dates and fixed timeline notes.
//!
//! Business logic only ever stores calendar dates; everything users read is
//! rendered through a [`DisplayLocale`] chosen by configuration.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

const PT_BR_MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const EN_US_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Locale-specific rendering used by the store and the list views.
pub trait DisplayLocale: Send + Sync {
    /// Compact form used on list cards.
    fn short_date(&self, date: NaiveDate) -> String;
    /// Long form stored on timeline entries.
    fn long_date(&self, date: NaiveDate) -> String;
    /// Parses the compact form produced by [`DisplayLocale::short_date`].
    fn parse_short_date(&self, value: &str) -> Option<NaiveDate>;
    /// Description of the synthetic entry appended on completion.
    fn completion_note(&self) -> &'static str;
}

/// Brazilian Portuguese: `17/08/2025` and `18 de Agosto, 2025`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PtBr;

impl DisplayLocale for PtBr {
    fn short_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    fn long_date(&self, date: NaiveDate) -> String {
        format!(
            "{} de {}, {}",
            date.day(),
            PT_BR_MONTHS[date.month0() as usize],
            date.year()
        )
    }

    fn parse_short_date(&self, value: &str) -> Option<NaiveDate> {
        parse_compact(value, "%d/%m/%Y")
    }

    fn completion_note(&self) -> &'static str {
        "Finalizado com sucesso"
    }
}

/// US English: `08/17/2025` and `August 18, 2025`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnUs;

impl DisplayLocale for EnUs {
    fn short_date(&self, date: NaiveDate) -> String {
        date.format("%m/%d/%Y").to_string()
    }

    fn long_date(&self, date: NaiveDate) -> String {
        format!(
            "{} {}, {}",
            EN_US_MONTHS[date.month0() as usize],
            date.day(),
            date.year()
        )
    }

    fn parse_short_date(&self, value: &str) -> Option<NaiveDate> {
        parse_compact(value, "%m/%d/%Y")
    }

    fn completion_note(&self) -> &'static str {
        "Service completed"
    }
}

/// Accepts the compact form with or without spaces around the separators
/// (`17 / 08 / 2025` is what the date picker shows).
fn parse_compact(value: &str, pattern: &str) -> Option<NaiveDate> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    NaiveDate::parse_from_str(&compact, pattern).ok()
}

/// Locales selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub fn strategy(self) -> Arc<dyn DisplayLocale> {
        match self {
            Locale::PtBr => Arc::new(PtBr),
            Locale::EnUs => Arc::new(EnUs),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => f.write_str("pt-BR"),
            Locale::EnUs => f.write_str("en-US"),
        }
    }
}

impl FromStr for Locale {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pt-BR" | "pt_BR" => Ok(Locale::PtBr),
            "en-US" | "en_US" => Ok(Locale::EnUs),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unsupported locale `{other}`"
            ))),
        }
    }
}

/// Source of "now" for timeline entries.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
