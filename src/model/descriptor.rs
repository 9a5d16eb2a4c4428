//! Raw package descriptors as collectors report them.
//!
//! Descriptors are loosely typed on purpose: they mirror whatever a manifest
//! or lock-file parser produced. The normalizer turns them into
//! [`Component`](super::Component)s.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::{Deref, DerefMut};

use super::license::DeclaredLicense;
use super::metadata::{Hash, Property, Scope};

/// One package as reported by a collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    pub name: Option<String>,
    pub group: Option<String>,
    pub version: Option<String>,
    pub purl: Option<String>,
    /// Explicit component-type override
    #[serde(rename = "type")]
    pub component_type: Option<String>,
    #[serde(default)]
    pub qualifiers: BTreeMap<String, String>,
    pub subpath: Option<String>,
    #[serde(default, alias = "license", deserialize_with = "one_or_many")]
    pub licenses: Vec<DeclaredLicense>,
    #[serde(default)]
    pub hashes: Vec<Hash>,
    /// Legacy SHA-1 checksum
    #[serde(rename = "_shasum")]
    pub shasum: Option<String>,
    /// Subresource-integrity string, possibly with several digests
    #[serde(rename = "_integrity")]
    pub integrity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_children")]
    pub dependencies: DescriptorChildren,
    #[serde(default)]
    pub properties: Vec<Property>,
    pub evidence: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_scope")]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub extraneous: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub author: Option<Person>,
    pub publisher: Option<String>,
    pub homepage: Option<UrlField>,
    pub bugs: Option<UrlField>,
    pub repository: Option<UrlField>,
}

impl PackageDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// Nest `child` under this descriptor.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.dependencies.push(DescriptorChild::Nested(Box::new(child)));
        self
    }

    /// Add a string back-reference child.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.dependencies.push(DescriptorChild::Reference(reference.into()));
        self
    }

    /// Nested children, skipping back-references.
    pub fn nested(&self) -> impl DoubleEndedIterator<Item = &Self> {
        self.dependencies.iter().filter_map(|child| match child {
            DescriptorChild::Nested(d) => Some(d.as_ref()),
            DescriptorChild::Reference(_) => None,
        })
    }
}

/// A child entry under `dependencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorChild {
    /// Cycle-break marker; never descended into.
    Reference(String),
    Nested(Box<PackageDescriptor>),
}

/// The `dependencies` of a descriptor.
///
/// Dropping releases nested descendants iteratively, so freeing a chain of
/// any depth uses constant stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorChildren(Vec<DescriptorChild>);

impl Deref for DescriptorChildren {
    type Target = Vec<DescriptorChild>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DescriptorChildren {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<DescriptorChild>> for DescriptorChildren {
    fn from(children: Vec<DescriptorChild>) -> Self {
        Self(children)
    }
}

impl Drop for DescriptorChildren {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.0);
        while let Some(child) = pending.pop() {
            if let DescriptorChild::Nested(mut nested) = child {
                pending.append(&mut nested.dependencies.0);
            }
        }
    }
}

/// npm-style person: `"Jane <jane@x>"` or `{name, email}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Person {
    Text(String),
    Object {
        name: Option<String>,
        email: Option<String>,
    },
}

impl Person {
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.trim().to_string()).filter(|s| !s.is_empty()),
            Self::Object { name, .. } => name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

/// A URL given either bare or as `{ "url": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlField {
    Text(String),
    Object { url: Option<String> },
}

impl UrlField {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        let url = match self {
            Self::Text(url) => Some(url.as_str()),
            Self::Object { url } => url.as_deref(),
        };
        url.filter(|u| !u.trim().is_empty())
    }
}

/// Everything one collector found for a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorForest {
    /// Top-level packages, all emitted.
    List(Vec<PackageDescriptor>),
    /// A project descriptor whose root is the project itself.
    Rooted(PackageDescriptor),
}

impl Default for DescriptorForest {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// Names the project's source actually imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ImportsRepr")]
pub struct ObservedImports(HashSet<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportsRepr {
    List(Vec<String>),
    Map(HashMap<String, serde_json::Value>),
}

impl From<ImportsRepr> for ObservedImports {
    fn from(repr: ImportsRepr) -> Self {
        match repr {
            ImportsRepr::List(names) => names.into_iter().collect(),
            ImportsRepr::Map(map) => map.into_keys().collect(),
        }
    }
}

impl FromIterator<String> for ObservedImports {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl ObservedImports {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<DeclaredLicense>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<DeclaredLicense>),
        One(DeclaredLicense),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(many)) => many,
        Some(OneOrMany::One(one)) => vec![one],
        None => Vec::new(),
    })
}

fn lenient_scope<'de, D>(deserializer: D) -> Result<Option<Scope>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.to_ascii_lowercase().as_str() {
        "required" => Some(Scope::Required),
        "optional" => Some(Scope::Optional),
        _ => None,
    }))
}

/// Accepts `dependencies` as an array of children or as a name-keyed object.
///
/// In the object form a nested descriptor without a name takes its key, and
/// string values (version ranges, back-references) become references.
fn deserialize_children<'de, D>(deserializer: D) -> Result<DescriptorChildren, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct ChildrenVisitor;

    impl<'de> Visitor<'de> for ChildrenVisitor {
        type Value = Vec<DescriptorChild>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of dependencies or a name-keyed object")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut children = Vec::new();
            while let Some(child) = seq.next_element::<DescriptorChild>()? {
                children.push(child);
            }
            Ok(children)
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut children = Vec::new();
            while let Some((key, child)) = map.next_entry::<String, DescriptorChild>()? {
                children.push(match child {
                    DescriptorChild::Nested(mut nested) => {
                        if nested.name.as_deref().is_none_or(str::is_empty) {
                            nested.name = Some(key);
                        }
                        DescriptorChild::Nested(nested)
                    }
                    DescriptorChild::Reference(_) => DescriptorChild::Reference(key),
                });
            }
            Ok(children)
        }
    }

    deserializer
        .deserialize_any(ChildrenVisitor)
        .map(DescriptorChildren)
}
