use std::collections::HashMap;

/// Case-insensitive index of table header names to column positions.
///
/// Header names are compared after trimming, stripping a byte-order mark,
/// collapsing inner whitespace and lowercasing, so `"BISAC  Code"` and
/// `"bisac code"` resolve to the same column. The first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    map: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (idx, header) in headers.into_iter().enumerate() {
            map.entry(normalize_key(header.as_ref())).or_insert(idx);
        }
        Self { map }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.map.get(&normalize_key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&normalize_key(name))
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
