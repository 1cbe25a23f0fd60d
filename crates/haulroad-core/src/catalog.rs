//! Content catalog: ordered categories (the road's nodes) and the leaves revealed at each.
//!
//! Catalog files map each category name to a list of leaves. A leaf is either a bare name or an
//! object with descriptions and outbound links:
//!
//! ```yaml
//! Projects:
//!   - name: haulroad
//!     descriptions: ["Scroll-driven road layout engine"]
//!     links:
//!       - { beforeText: "Source on ", text: GitHub, url: "https://github.com/example/haulroad" }
//! Skills:
//!   - Rust
//!   - WebGL
//! ```

use crate::format::{self, Format};
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use url::Url;

/// Display label of a leaf. Not unique: `("A-B", "C")` and `("A", "B-C")` share one.
pub fn leaf_id(node: &str, leaf: &str) -> String {
    format!("{node}-{leaf}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_text: Option<String>,
    pub text: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Leaf {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptions: Vec::new(),
            links: Vec::new(),
        }
    }

    /// The link a click on the leaf opens.
    pub fn primary_link(&self) -> Option<&Link> {
        self.links.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: IndexMap<String, Vec<Leaf>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLeaf {
    Name(String),
    Detailed(RawDetailedLeaf),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDetailedLeaf {
    name: String,
    #[serde(default)]
    descriptions: Vec<String>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLink {
    #[serde(default)]
    before_text: Option<String>,
    text: String,
    url: String,
}

impl Catalog {
    pub fn new(categories: IndexMap<String, Vec<Leaf>>) -> Result<Self> {
        if categories.len() < 2 {
            return Err(Error::InvalidCatalog {
                message: format!(
                    "at least 2 categories are required, got {}",
                    categories.len()
                ),
            });
        }
        for (node, leaves) in &categories {
            if node.trim().is_empty() {
                return Err(Error::InvalidCatalog {
                    message: "category names must not be empty".to_string(),
                });
            }
            let mut seen = FxHashSet::default();
            for leaf in leaves {
                if leaf.name.trim().is_empty() {
                    return Err(Error::InvalidCatalog {
                        message: format!("`{node}` has a leaf with an empty name"),
                    });
                }
                if !seen.insert(leaf.name.as_str()) {
                    return Err(Error::InvalidCatalog {
                        message: format!("`{node}` lists `{}` more than once", leaf.name),
                    });
                }
            }
        }
        tracing::debug!(
            categories = categories.len(),
            leaves = categories.values().map(Vec::len).sum::<usize>(),
            "loaded catalog"
        );
        Ok(Self { categories })
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let raw: IndexMap<String, Vec<RawLeaf>> =
            serde_json::from_value(value).map_err(|err| Error::InvalidCatalog {
                message: err.to_string(),
            })?;

        let mut categories = IndexMap::with_capacity(raw.len());
        for (node, leaves) in raw {
            let leaves = leaves
                .into_iter()
                .map(|leaf| resolve_leaf(&node, leaf))
                .collect::<Result<Vec<_>>>()?;
            categories.insert(node, leaves);
        }
        Self::new(categories)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(Format::Json.parse(text)?)
    }

    pub fn from_json5_str(text: &str) -> Result<Self> {
        Self::from_value(Format::Json5.parse(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_value(Format::Yaml.parse(text)?)
    }

    /// JSON first, then YAML; used for input without a file extension (stdin).
    pub fn from_str_auto(text: &str) -> Result<Self> {
        Self::from_value(format::parse_auto(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_value(format::read_path(path)?)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category names in file order; this is the node order of the road.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Leaf])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn leaves(&self, node: &str) -> Option<&[Leaf]> {
        self.categories.get(node).map(Vec::as_slice)
    }

    pub fn leaf(&self, node: &str, leaf: &str) -> Option<&Leaf> {
        self.leaves(node)?.iter().find(|l| l.name == leaf)
    }
}

fn resolve_leaf(node: &str, raw: RawLeaf) -> Result<Leaf> {
    let detailed = match raw {
        RawLeaf::Name(name) => return Ok(Leaf::named(name)),
        RawLeaf::Detailed(d) => d,
    };
    let links = detailed
        .links
        .into_iter()
        .map(|link| {
            let url = Url::parse(link.url.trim()).map_err(|err| Error::InvalidLink {
                node: node.to_string(),
                leaf: detailed.name.clone(),
                url: link.url.clone(),
                message: err.to_string(),
            })?;
            Ok(Link {
                before_text: link.before_text,
                text: link.text,
                url,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Leaf {
        name: detailed.name,
        descriptions: detailed.descriptions,
        links,
    })
}
