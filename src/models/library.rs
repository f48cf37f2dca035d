//! Library system tag

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Library systems with a registered extractor.
///
/// Declaration order is the router's priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    /// Stadtbibliothek Stuttgart (aDIS web OPAC)
    Stuttgart,
    /// Mediathek Remseck (Koha OPAC)
    Remseck,
}

impl Library {
    /// All registered libraries in routing priority order
    pub const ALL: [Library; 2] = [Library::Stuttgart, Library::Remseck];

    /// Short machine name, as stored in the cache
    pub fn name(self) -> &'static str {
        match self {
            Library::Stuttgart => "stuttgart",
            Library::Remseck => "remseck",
        }
    }

    /// Record page URL template with an `{id}` placeholder
    pub fn url_template(self) -> &'static str {
        match self {
            Library::Stuttgart => {
                "https://stadtbibliothek-stuttgart.de/aDISWeb/app?service=direct%2F0%2FHome%2F%24DirectLink&sp=SOPAC&sp={id}"
            }
            Library::Remseck => {
                "https://mt-remseck.lmscloud.net/cgi-bin/koha/opac-detail.pl?biblionumber={id}"
            }
        }
    }

    /// Record page URL for a canonical identifier
    pub fn catalog_url(self, id: &str) -> String {
        self.url_template().replace("{id}", id)
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Library {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Library::ALL
            .into_iter()
            .find(|library| library.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown library: {}", s))
    }
}
