//! Expansion of optional groups into concrete variants.

use super::ast::{Ast, Token};
use crate::escape::{push_key_text, PARAM_PLACEHOLDER, WILDCARD_PLACEHOLDER};

/// One concrete shape of a sub-pattern with every optional group decided.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Variant {
    /// Literal text interleaved with `{:}` and `{*}` placeholders
    pub key: String,
    /// Names bound by this variant, in key order
    pub param_names: Vec<String>,
    /// For each placeholder in key order, the AST name index it binds.
    /// Anonymous wildcards bind nothing.
    pub captures: Vec<Option<usize>>,
}

impl Ast {
    /// Enumerate every inclusion/exclusion combination of the optional groups.
    ///
    /// Uses an explicit work stack so deeply nested groups cannot exhaust the
    /// call stack. At each `(` the include branch is pushed before the exclude
    /// branch, so variants come out least specific first:
    ///
    /// ```rust
    /// use brrtpattern::pattern::Ast;
    ///
    /// let ast = Ast::parse("api/(v:major(.:minor)/)run").unwrap();
    /// let keys: Vec<_> = ast.variants().into_iter().map(|v| v.key).collect();
    /// assert_eq!(keys, ["api/run", "api/v{:}/run", "api/v{:}.{:}/run"]);
    /// ```
    #[must_use]
    pub fn variants(&self) -> Vec<Variant> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, Variant::default())];

        'work: while let Some((start, mut variant)) = stack.pop() {
            let mut index = start;
            while let Some(token) = self.tokens.get(index) {
                match token {
                    Token::Text(text) => push_key_text(&mut variant.key, text),
                    Token::Param(name) => {
                        variant.key.push_str(PARAM_PLACEHOLDER);
                        variant.param_names.push(self.param_names[*name].clone());
                        variant.captures.push(Some(*name));
                    }
                    Token::Wildcard(name) => {
                        variant.key.push_str(WILDCARD_PLACEHOLDER);
                        if let Some(name) = name {
                            variant.param_names.push(self.param_names[*name].clone());
                        }
                        variant.captures.push(*name);
                    }
                    Token::GroupOpen => {
                        let close = self.optionals.get(&index).copied().unwrap_or(index);
                        stack.push((index + 1, variant.clone()));
                        stack.push((close + 1, variant));
                        continue 'work;
                    }
                    Token::GroupClose => {}
                }
                index += 1;
            }
            out.push(variant);
        }

        out
    }
}
