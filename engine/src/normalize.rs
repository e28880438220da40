//! Region name normalisation.
//!
//! Sources spell county names in many ways (`Boone`, `St Louis`, `Kansas City`, `BOONE`...).
//! A `Normalizer` is built once per jurisdiction from its canonical region list and an alias
//! table and maps raw names onto canonical ones.
//!

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use casecount_sources::parse_string;

/// Outcome of normalising a raw name.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Normalized {
    /// One of the canonical regions
    Region(String),
    /// Placeholder meaning "to be determined"
    Unassigned,
    /// Looks like a region but is not one we know of
    Unknown(String),
    /// Empty or garbage row, to be skipped
    Invalid,
}

#[derive(Clone, Debug)]
pub struct Normalizer {
    /// Appended to names that do not already carry it, e.g. ` County`
    suffix: String,
    /// Raw name standing for "to be determined"
    placeholder: String,
    regions: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
    /// Uppercase, suffix-less form of every canonical name plus uppercased aliases
    upper: BTreeMap<String, String>,
}

impl Normalizer {
    /// Build the lookup tables.  Alias entries win over canonical names in the uppercase index.
    ///
    pub fn new<S: AsRef<str>>(suffix: &str, regions: &[S], aliases: &[(&str, &str)]) -> Self {
        let regions: BTreeSet<String> = regions.iter().map(|r| r.as_ref().to_string()).collect();
        let aliases: BTreeMap<String, String> = aliases
            .iter()
            .map(|(raw, canon)| (raw.to_string(), canon.to_string()))
            .collect();

        let mut upper: BTreeMap<String, String> = regions
            .iter()
            .map(|name| {
                let short = name.strip_suffix(suffix).unwrap_or(name);
                (short.to_uppercase(), name.clone())
            })
            .collect();
        aliases.iter().for_each(|(raw, canon)| {
            upper.insert(raw.to_uppercase(), canon.clone());
        });

        Normalizer {
            suffix: suffix.to_string(),
            placeholder: "TBD".to_string(),
            regions,
            aliases,
            upper,
        }
    }

    /// Change the "to be determined" placeholder, `TBD` by default.
    ///
    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Resolve a raw name as found in a source.
    ///
    /// ```rust
    /// use casecount_engine::{Normalized, Normalizer};
    ///
    /// let n = Normalizer::new(" County", &["Boone County", "Jackson County"], &[("Kansas City", "Jackson County")]);
    /// assert_eq!(Normalized::Region("Jackson County".to_string()), n.normalize("Kansas City"));
    /// assert_eq!(Normalized::Region("Boone County".to_string()), n.normalize("Boone"));
    /// assert_eq!(Normalized::Unassigned, n.normalize("TBD"));
    /// assert_eq!(Normalized::Invalid, n.normalize(""));
    /// ```
    ///
    pub fn normalize(&self, raw: &str) -> Normalized {
        let clean = parse_string(raw);
        if clean.is_empty() || clean == self.suffix.trim() {
            trace!("invalid name {raw:?}");
            return Normalized::Invalid;
        }
        let name = self.aliases.get(&clean).cloned().unwrap_or(clean);

        let name = if name.to_uppercase().contains("CITY") || name.ends_with(&self.suffix) {
            name
        } else {
            format!("{name}{}", self.suffix)
        };

        if name == format!("{}{}", self.placeholder, self.suffix) {
            return Normalized::Unassigned;
        }
        if self.regions.contains(&name) {
            Normalized::Region(name)
        } else {
            Normalized::Unknown(name)
        }
    }

    /// Direct lookup of an uppercase name, no fallback.
    ///
    pub fn normalize_upper(&self, raw: &str) -> Option<&str> {
        self.upper.get(raw.trim()).map(String::as_str)
    }
}
