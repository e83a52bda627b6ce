//! Error-tolerant parser producing lossless green trees.
//!
//! Parsing never fails: syntax errors become diagnostics attached to nodes
//! inside the tree, and tokens the grammar cannot place survive inside error
//! nodes so the produced tree always reproduces the input byte for byte.

mod grammar;
mod parser;

pub use lira_syntax::{GreenNode, TokenCache};

use crate::parser::Parser;

pub fn module(text: &str) -> GreenNode {
    let mut cache = TokenCache::new();
    module_with_cache(text, &mut cache)
}

/// Parses through a shared token cache so identical terminals dedup across
/// files.
pub fn module_with_cache(text: &str, cache: &mut TokenCache) -> GreenNode {
    let mut parser = Parser::new(text);
    grammar::module(&mut parser);
    parser.build_tree(cache)
}

#[cfg(test)]
mod tests;
