//! # Pattern Module
//!
//! Parsing and compilation of route patterns.
//!
//! ## Grammar
//!
//! ```text
//! pattern     := [protocol "://"] [host-region] ["?" search]
//! host-region := hostname [":" port] ["/" pathname] | pathname
//! segment     := text | ":" name | "*" [name] | "(" segment* ")"
//! name        := one or more of [A-Za-z0-9_], unique within one pattern
//! ```
//!
//! ## Pipeline
//!
//! 1. [`SplitPattern::split`] cuts the source into components
//! 2. [`Ast::parse`] tokenizes each component
//! 3. [`Ast::variants`] expands optional groups into concrete [`Variant`]s
//! 4. [`compile`] turns ASTs, variants or trie edge keys into regex sources
//!
//! [`RoutePattern::parse`] runs steps 1-3 and is what both matchers call from
//! `add()`. Regex compilation is left to each matcher because the linear
//! matcher compiles per variant while the trie compiles per edge.

mod ast;
pub mod compile;
mod error;
mod split;
mod variant;

pub use ast::{Ast, Token};
pub use error::ParseError;
pub use split::SplitPattern;
pub use variant::Variant;

use std::sync::Arc;

use crate::search::SearchConstraints;
use crate::url_parts::Part;

/// One parsed component (protocol, hostname or pathname) of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// The component text as written
    pub source: String,
    pub ast: Ast,
    /// Variants in expansion order (least specific first)
    pub variants: Vec<Variant>,
    /// Position of this component's first name in [`RoutePattern::param_names`]
    name_offset: usize,
}

impl Component {
    fn parse(source: String, name_offset: usize) -> Result<Self, ParseError> {
        let ast = Ast::parse(&source)?;
        let variants = ast.variants();
        Ok(Self {
            source,
            ast,
            variants,
            name_offset,
        })
    }

    /// Map an AST name index to the pattern-wide name index.
    #[inline]
    #[must_use]
    pub fn name_index(&self, ast_index: usize) -> usize {
        self.name_offset + ast_index
    }

    /// Pattern-wide name index for every placeholder of `variant`, in key order.
    #[must_use]
    pub fn placeholder_slots(&self, variant: &Variant) -> Vec<Option<usize>> {
        variant
            .captures
            .iter()
            .map(|c| c.map(|i| self.name_index(i)))
            .collect()
    }
}

/// A fully parsed route pattern.
///
/// Immutable once built; matchers keep one per registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    split: SplitPattern,
    components: [Option<Component>; 3],
    search: Option<SearchConstraints>,
    param_names: Vec<Arc<str>>,
}

impl RoutePattern {
    /// Split, parse and expand `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when any component is malformed or when a
    /// name is used twice anywhere in the pattern.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let split = SplitPattern::split(source);
        let mut components: [Option<Component>; 3] = [None, None, None];
        let mut param_names: Vec<Arc<str>> = Vec::new();

        let texts = [
            split.protocol.as_ref(),
            split.hostname.as_ref(),
            split.pathname.as_ref(),
        ];
        for (slot, text) in components.iter_mut().zip(texts) {
            let Some(text) = text else { continue };
            let component = Component::parse(text.clone(), param_names.len())?;
            for name in &component.ast.param_names {
                if param_names.iter().any(|n| n.as_ref() == name) {
                    return Err(ParseError::DuplicateParam {
                        pattern: source.to_string(),
                        name: name.clone(),
                    });
                }
                param_names.push(Arc::from(name.as_str()));
            }
            *slot = Some(component);
        }

        let search = match split.search.as_deref() {
            Some(search) => {
                // Validated for balanced groups, then read literally.
                Ast::parse(search)?;
                Some(SearchConstraints::parse(search))
            }
            None => None,
        };

        Ok(Self {
            source: source.to_string(),
            split,
            components,
            search,
            param_names,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn split(&self) -> &SplitPattern {
        &self.split
    }

    #[must_use]
    pub fn component(&self, part: Part) -> Option<&Component> {
        self.components[part.index()].as_ref()
    }

    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.split.port.as_deref()
    }

    #[must_use]
    pub fn search(&self) -> Option<&SearchConstraints> {
        self.search.as_ref()
    }

    /// Every parameter and named wildcard of the pattern, protocol first.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Number of concrete shapes the pattern expands to across all components.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.components
            .iter()
            .flatten()
            .map(|c| c.variants.len())
            .product()
    }

    /// Port and search checks shared by both matchers.
    #[must_use]
    pub fn accepts_extras(&self, port: &str, query: &[(String, String)]) -> bool {
        if let Some(expected) = self.port() {
            if expected != port {
                return false;
            }
        }
        self.search.as_ref().map_or(true, |s| s.matches(query))
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_pattern() {
        let pattern = RoutePattern::parse("http(s)://:tenant.example.com/api/(v:major/)users/:id").unwrap();
        assert_eq!(
            pattern
                .param_names()
                .iter()
                .map(|n| n.as_ref())
                .collect::<Vec<_>>(),
            vec!["tenant", "major", "id"]
        );
        assert_eq!(pattern.variant_count(), 4);
        let path = pattern.component(Part::Pathname).unwrap();
        assert_eq!(path.name_index(0), 1);
        assert!(pattern.component(Part::Protocol).is_some());
    }

    #[test]
    fn test_duplicate_across_components() {
        let err = RoutePattern::parse("https://:id.example.com/users/:id").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateParam {
                pattern: "https://:id.example.com/users/:id".into(),
                name: "id".into()
            }
        );
    }

    #[test]
    fn test_search_is_validated() {
        assert!(RoutePattern::parse("search?q=(").is_err());
        let pattern = RoutePattern::parse("search?q").unwrap();
        assert!(pattern.accepts_extras("", &[("q".into(), "x".into())]));
        assert!(!pattern.accepts_extras("", &[]));
    }

    #[test]
    fn test_port_check() {
        let pattern = RoutePattern::parse("http://localhost:3000/").unwrap();
        assert!(pattern.accepts_extras("3000", &[]));
        assert!(!pattern.accepts_extras("", &[]));
        assert!(!pattern.accepts_extras("8080", &[]));
    }

    #[test]
    fn test_absent_components() {
        let pattern = RoutePattern::parse("users/:id").unwrap();
        assert!(pattern.component(Part::Protocol).is_none());
        assert!(pattern.component(Part::Hostname).is_none());
        assert!(pattern.port().is_none());
        assert!(pattern.search().is_none());
        assert_eq!(pattern.variant_count(), 1);
    }
}
