//! Module to manage the routes used by the different sites
//!

use std::collections::btree_map::Keys;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named paths (or full URLs) available on a site.
///
/// ```
/// use std::collections::BTreeMap;
/// use casecount_sources::Routes;
///
/// let routes = Routes::from(BTreeMap::from([
///     ("results".to_string(), "/results.php".to_string()),
/// ]));
///
/// assert_eq!(routes.get("results"), Some(&"/results.php".to_string()));
/// assert_eq!(routes.keys().collect::<Vec<_>>(), vec!["results"]);
/// ```
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, Ord, PartialOrd, Eq, PartialEq)]
pub struct Routes(BTreeMap<String, String>);

impl Routes {
    /// Wrap `get`
    ///
    #[inline]
    pub fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    /// Wrap `keys()`
    ///
    #[inline]
    pub fn keys(&self) -> Keys<'_, String, String> {
        self.0.keys()
    }
}

impl From<BTreeMap<String, String>> for Routes {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}
