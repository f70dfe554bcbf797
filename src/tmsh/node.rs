use indexmap::IndexMap;
use serde::ser::{
    SerializeMap,
    SerializeSeq,
};
use serde::{
    Serialize,
    Serializer,
};

/// An insertion ordered mapping of keys to decoded nodes. Re-inserting an existing key overwrites
/// the value in place, it never duplicates the key.
pub type Mapping = IndexMap<String, Node>;

/// `Node` is a single decoded element of a tmsh dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A plain string value, for example the `9198` in `mtu 9198`.
    Scalar(String),
    /// An ordered sequence, for example the members of `tcp:ssh`/`tcp:https` style blocks.
    List(Vec<Node>),
    /// A nested block of key/value entries.
    Mapping(Mapping),
}

impl Node {
    /// Returns the string value if this node is a `Scalar`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this node is a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this node is a `Mapping`.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` if this node is a `Mapping`.
    #[must_use]
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Self> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Renders the node on a single line the way tmsh prints inline values -- scalars as is,
    /// lists and mappings wrapped in braces (`{ a b }`, `{ key value }`). Used when a nested node
    /// has to land in a flat table cell.
    #[must_use]
    pub fn to_inline(&self) -> String {
        match self {
            Self::Scalar(s) => {
                if s.is_empty() || s.contains(char::is_whitespace) {
                    format!("\"{s}\"")
                } else {
                    s.clone()
                }
            }
            Self::List(items) => {
                if items.is_empty() {
                    return "{ }".to_owned();
                }

                let inner: Vec<String> = items.iter().map(Self::to_inline).collect();

                format!("{{ {} }}", inner.join(" "))
            }
            Self::Mapping(m) => {
                if m.is_empty() {
                    return "{ }".to_owned();
                }

                let inner: Vec<String> = m
                    .iter()
                    .map(|(k, v)| format!("{k} {}", v.to_inline()))
                    .collect();

                format!("{{ {} }}", inner.join(" "))
            }
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_owned())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;

                for item in items {
                    seq.serialize_element(item)?;
                }

                seq.end()
            }
            Self::Mapping(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;

                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }

                map.end()
            }
        }
    }
}
