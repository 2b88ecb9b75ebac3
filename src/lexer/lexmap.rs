use std::collections::HashMap;

use super::TokenKind;

/// Reserved words keyed by their spelling.
#[derive(Debug, Clone, Default)]
pub struct LexMap {
    map: HashMap<&'static str, TokenKind>,
}

impl LexMap {
    pub fn insert(&mut self, key: &'static str, kind: TokenKind) {
        self.map.insert(key, kind);
    }

    pub fn get(&self, key: &str) -> Option<TokenKind> {
        self.map.get(key).copied()
    }
}
