//! Resource records and predecessor parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RepairError;
use crate::ports::SearchEntry;

static RESOURCE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/resource/([a-f0-9\-]+)/").expect("resource pattern is valid"));

/// How a record refers to the resource it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// The URL points at the record itself: origin of the chain.
    Head,
    /// The URL points at another resource.
    Linked(String),
    /// No predecessor could be read from the URL.
    Unparseable,
}

/// One file resource of a dataset, positioned in its name chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// CKAN resource id.
    pub id: String,
    /// Display name, used as the search key.
    pub name: String,
    /// Current resource URL.
    pub url: String,
    /// Owning dataset (package) id.
    pub dataset_id: String,
    /// Predecessor state parsed from `url`.
    pub link: Link,
    /// Id of the record claiming this one as predecessor.
    pub successor: Option<String>,
}

/// Extract the predecessor id embedded in a CKAN resource URL.
///
/// # Errors
///
/// Returns [`RepairError::UnparseableUrl`] when the URL has no
/// `/resource/<id>/` segment.
pub fn parse_predecessor(url: &str) -> Result<&str, RepairError> {
    RESOURCE_SEGMENT
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| RepairError::UnparseableUrl { url: url.to_string() })
}

impl ResourceRecord {
    /// Build a record from a search hit, classifying its link.
    #[must_use]
    pub fn from_entry(entry: &SearchEntry) -> Self {
        let link = match parse_predecessor(&entry.url) {
            Ok(id) if id == entry.id => Link::Head,
            Ok(id) => Link::Linked(id.to_string()),
            Err(err) => {
                tracing::debug!(resource_id = %entry.id, %err, "treating resource as unlinked");
                Link::Unparseable
            }
        };
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            url: entry.url.clone(),
            dataset_id: entry.package_id.clone(),
            link,
            successor: None,
        }
    }

    /// Build the sentinel for a resource known to have a broken URL.
    ///
    /// The sentinel is always [`Link::Unparseable`], whatever its URL says.
    #[must_use]
    pub fn invalid(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        dataset_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            dataset_id: dataset_id.into(),
            link: Link::Unparseable,
            successor: None,
        }
    }

    /// The predecessor id, if the record is linked.
    #[must_use]
    pub fn predecessor(&self) -> Option<&str> {
        match &self.link {
            Link::Linked(id) => Some(id),
            Link::Head | Link::Unparseable => None,
        }
    }

    /// Whether the record is the self-referential origin of its chain.
    #[must_use]
    pub fn is_head(&self) -> bool {
        self.link == Link::Head
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) predecessor={} head={} successor={}",
            self.name,
            self.id,
            self.predecessor().unwrap_or("-"),
            self.is_head(),
            self.successor.as_deref().unwrap_or("-"),
        )
    }
}
