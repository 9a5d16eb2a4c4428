//! License choices and SPDX classification.
//!
//! Collectors report licenses as free text, as SPDX identifiers, as SPDX
//! expressions or as ready-made CycloneDX license objects. The `spdx` crate
//! decides which CycloneDX shape a free-text value becomes.

use serde::{Deserialize, Serialize};

/// A CycloneDX license entry: either a single license or an SPDX expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LicenseChoice {
    License { license: License },
    Expression { expression: String },
}

/// A single license, named by SPDX id or by free-text name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct License {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LicenseChoice {
    /// Classify a free-text license value.
    ///
    /// Known SPDX identifiers become `{license: {id}}`, compound expressions
    /// that parse (leniently) become `{expression}`, anything else is kept as
    /// a named license. Returns `None` for blank input.
    #[must_use]
    pub fn from_declared(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(id) = spdx::license_id(text) {
            return Some(Self::License {
                license: License {
                    id: Some(id.name.to_string()),
                    ..License::default()
                },
            });
        }
        if is_compound(text) && spdx::Expression::parse_mode(text, spdx::ParseMode::LAX).is_ok() {
            return Some(Self::Expression {
                expression: text.to_string(),
            });
        }
        Some(Self::License {
            license: License {
                name: Some(text.to_string()),
                ..License::default()
            },
        })
    }
}

fn is_compound(text: &str) -> bool {
    [" OR ", " AND ", " WITH ", " or ", " and "]
        .iter()
        .any(|op| text.contains(op))
}

/// License value as a collector supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredLicense {
    Choice(LicenseChoice),
    Text(String),
    /// Legacy npm shape `{ "type": "MIT", "url": ... }`
    Legacy {
        #[serde(rename = "type")]
        license_type: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl DeclaredLicense {
    /// Convert to a CycloneDX license choice.
    #[must_use]
    pub fn to_choice(&self) -> Option<LicenseChoice> {
        match self {
            Self::Choice(choice) => Some(choice.clone()),
            Self::Text(text) => LicenseChoice::from_declared(text),
            Self::Legacy { license_type, url } => {
                let mut choice = LicenseChoice::from_declared(license_type)?;
                if let LicenseChoice::License { license } = &mut choice {
                    license.url.clone_from(url);
                }
                Some(choice)
            }
        }
    }
}
