//! Regular-expression code generation for ASTs, variants and trie edge keys.
//!
//! All generated sources are anchored with `^` and `$`. Literal text is
//! escaped with [`regex::escape`]; parameters use the caller-supplied value
//! pattern, which differs per URL component (see
//! [`Part::param_regex`](crate::url_parts::Part::param_regex)).

use super::ast::{Ast, Token};
use super::variant::Variant;
use crate::escape::{key_pieces, push_regex_literal, KeyPiece};

/// Regex source for a whole AST, optional groups included.
///
/// Groups become `(?:...)?`, parameters `(param_value)`, named wildcards
/// `(.*)` and anonymous wildcards `(?:.*)`.
#[must_use]
pub fn to_regex(ast: &Ast, param_value: &str) -> String {
    let mut source = String::with_capacity(ast.tokens.len() * 8 + 2);
    source.push('^');
    for token in &ast.tokens {
        match token {
            Token::Text(text) => push_regex_literal(&mut source, text),
            Token::Param(_) => push_group(&mut source, param_value),
            Token::Wildcard(Some(_)) => source.push_str("(.*)"),
            Token::Wildcard(None) => source.push_str("(?:.*)"),
            Token::GroupOpen => source.push_str("(?:"),
            Token::GroupClose => source.push_str(")?"),
        }
    }
    source.push('$');
    source
}

/// Regex source for one variant.
///
/// Capture groups line up with the named placeholders of the variant, so
/// group `i + 1` holds the value of `variant.param_names[i]`.
#[must_use]
pub fn variant_regex(variant: &Variant, param_value: &str) -> String {
    let mut source = String::with_capacity(variant.key.len() + 16);
    source.push('^');
    let mut captures = variant.captures.iter();
    for piece in key_pieces(&variant.key) {
        match piece {
            KeyPiece::Text(text) => push_regex_literal(&mut source, &text),
            KeyPiece::Param => {
                captures.next();
                push_group(&mut source, param_value);
            }
            KeyPiece::Wildcard => match captures.next() {
                Some(Some(_)) => source.push_str("(.*)"),
                _ => source.push_str("(?:.*)"),
            },
        }
    }
    source.push('$');
    source
}

/// Regex source for a trie edge key where every placeholder captures.
///
/// The trie collects values positionally, so anonymous wildcards capture too
/// and are simply never looked up by name.
#[must_use]
pub fn segment_regex(key: &str, param_value: &str) -> String {
    let mut source = String::with_capacity(key.len() + 16);
    source.push('^');
    for piece in key_pieces(key) {
        match piece {
            KeyPiece::Text(text) => push_regex_literal(&mut source, &text),
            KeyPiece::Param => push_group(&mut source, param_value),
            KeyPiece::Wildcard => source.push_str("(.*)"),
        }
    }
    source.push('$');
    source
}

fn push_group(source: &mut String, inner: &str) {
    source.push('(');
    source.push_str(inner);
    source.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const SEGMENT: &str = "[^/]+?";

    #[test]
    fn test_ast_regex_shape() {
        let ast = Ast::parse("api/(v:major(.:minor)/)run").unwrap();
        assert_eq!(
            to_regex(&ast, SEGMENT),
            r"^api/(?:v([^/]+?)(?:\.([^/]+?))?/)?run$"
        );
    }

    #[test]
    fn test_ast_regex_prefers_inner_group() {
        let ast = Ast::parse("api/(v:major(.:minor)/)run").unwrap();
        let re = Regex::new(&to_regex(&ast, SEGMENT)).unwrap();
        let caps = re.captures("api/v1.2/run").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("1"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("2"));
        assert!(!re.is_match("api/"));
    }

    #[test]
    fn test_wildcard_regex() {
        let ast = Ast::parse("files/*").unwrap();
        assert_eq!(to_regex(&ast, SEGMENT), "^files/(?:.*)$");
        let ast = Ast::parse("files/*path").unwrap();
        assert_eq!(to_regex(&ast, SEGMENT), "^files/(.*)$");
    }

    #[test]
    fn test_variant_regex_skips_anonymous_wildcards() {
        let ast = Ast::parse("*/:id/*rest").unwrap();
        let variant = &ast.variants()[0];
        let source = variant_regex(variant, SEGMENT);
        assert_eq!(source, "^(?:.*)/([^/]+?)/(.*)$");
        let caps = Regex::new(&source).unwrap().captures("a/b/42/x/y").unwrap();
        assert_eq!(&caps[1], "x");
        assert_eq!(&caps[2], "y");
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let ast = Ast::parse("a.b+(c)").unwrap();
        let re = Regex::new(&to_regex(&ast, SEGMENT)).unwrap();
        assert!(re.is_match("a.b+c"));
        assert!(re.is_match("a.b+"));
        assert!(!re.is_match("aXb+c"));
    }

    #[test]
    fn test_segment_regex_captures_everything() {
        assert_eq!(segment_regex("{*}/edit", SEGMENT), "^(.*)/edit$");
        assert_eq!(segment_regex("v{:}.{:}", SEGMENT), r"^v([^/]+?)\.([^/]+?)$");
    }
}
