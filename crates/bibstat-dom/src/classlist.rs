//! Class list
//!
//! Space-separated class tokens of an element. Visibility and
//! disabled styling are both expressed as class membership.

/// Ordered, de-duplicated set of class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `class` attribute value
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        for token in value.split_whitespace() {
            list.add(token);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Returns false if it was already present.
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns false if it was not present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Toggle a token, or force it on/off. Returns the new membership.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.contains(token));
        if present {
            self.add(token);
        } else {
            self.remove(token);
        }
        present
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}
