// src/term/hyperlink.rs

//! OSC 8 hyperlink registry.
//!
//! Cells store a compact `u16` link id instead of a URI string; this
//! registry allocates ids and deduplicates URIs. Id 0 is reserved for
//! "no link".

use std::collections::HashMap;

/// Hyperlink identifier carried by cells. Zero means "no link".
pub type HyperlinkId = u16;

/// Registry mapping OSC 8 URIs to compact ids.
#[derive(Debug, Clone, Default)]
pub struct HyperlinkRegistry {
    /// URIs indexed by id; slot 0 is the reserved empty entry.
    uris: Vec<String>,
    /// URI -> id lookup for deduplication.
    lookup: HashMap<String, HyperlinkId>,
}

impl HyperlinkRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        HyperlinkRegistry {
            uris: vec![String::new()],
            lookup: HashMap::new(),
        }
    }

    /// Interns a URI and returns its id. Empty URIs return 0, as does an
    /// intern attempt once the id space is exhausted.
    pub fn intern(&mut self, uri: &str) -> HyperlinkId {
        if uri.is_empty() {
            return 0;
        }
        if let Some(&id) = self.lookup.get(uri) {
            return id;
        }
        if self.uris.len() > HyperlinkId::MAX as usize {
            return 0;
        }
        let id = self.uris.len() as HyperlinkId;
        self.uris.push(uri.to_string());
        self.lookup.insert(uri.to_string(), id);
        id
    }

    /// Returns the URI for an id, if any.
    #[must_use]
    pub fn uri(&self, id: HyperlinkId) -> Option<&str> {
        if id == 0 {
            return None;
        }
        self.uris.get(id as usize).map(String::as_str)
    }

    /// Drops every interned URI and releases the id space.
    pub fn clear(&mut self) {
        self.uris.truncate(1);
        self.lookup.clear();
    }
}
