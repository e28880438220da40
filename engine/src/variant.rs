//! Dated variants.
//!
//! Sources change shape over time so an adapter carries several extraction routines, each one
//! keyed by the first day it applies to.  A run picks the routine with the latest key not after
//! its reference date.  The `Earliest` key covers everything before the first dated one.
//!

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::trace;

use crate::EngineError;

/// Key of a variant.  `Earliest` sorts before every date.
///
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum VariantKey {
    Earliest,
    Date(NaiveDate),
}

impl FromStr for VariantKey {
    type Err = EngineError;

    /// `0` and `earliest` are the same key, anything else must be `YYYY-MM-DD`.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "earliest" => Ok(VariantKey::Earliest),
            s => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(VariantKey::Date)
                .map_err(|_| EngineError::BadVariantKey(s.to_string())),
        }
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantKey::Earliest => write!(f, "earliest"),
            VariantKey::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Table of variants, `T` being whatever describes a routine.
///
/// ```rust
/// use chrono::NaiveDate;
/// use casecount_engine::VariantTable;
///
/// let t = VariantTable::from_keys([("0", 'a'), ("2020-02-22", 'b'), ("2020-03-30", 'c')]).unwrap();
/// let day = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
/// assert_eq!('b', *t.select(day).unwrap().1);
/// ```
///
#[derive(Clone, Debug)]
pub struct VariantTable<T>(BTreeMap<VariantKey, T>);

impl<T> VariantTable<T> {
    /// Build from string keys, failing on the first bad one.
    ///
    pub fn from_keys<'a, I>(entries: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (&'a str, T)>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| Ok((k.parse::<VariantKey>()?, v)))
            .collect::<Result<BTreeMap<_, _>, EngineError>>()?;
        Ok(VariantTable(map))
    }

    /// Variant active on `day`: the greatest key not after it.
    ///
    pub fn select(&self, day: NaiveDate) -> Result<(VariantKey, &T), EngineError> {
        let (k, v) = self
            .0
            .range(..=VariantKey::Date(day))
            .next_back()
            .ok_or(EngineError::NoVariant(day))?;
        trace!("variant {k} selected for {day}");
        Ok((*k, v))
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &VariantKey> {
        self.0.keys()
    }
}
