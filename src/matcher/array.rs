//! Linear matcher: compiled regexes scanned in registration order.
//!
//! Every pattern component gets a whole-AST regex used as a cheap pre-filter,
//! plus one regex per variant. The variants are kept most specific first and
//! the first one that matches supplies the parameter values.

use regex::Regex;
use tracing::debug;

use super::{Match, Matcher, Params};
use crate::pattern::compile::{to_regex, variant_regex};
use crate::pattern::{Component, ParseError, RoutePattern};
use crate::url_parts::{Part, UrlParts};

#[derive(Debug)]
struct CompiledVariant {
    regex: Regex,
    /// Pattern-wide name index for each capture group
    slots: Vec<usize>,
}

#[derive(Debug)]
struct CompiledComponent {
    /// Matches exactly the union of the variants
    prefilter: Regex,
    /// Most specific first
    variants: Vec<CompiledVariant>,
}

fn compile(pattern: &str, source: &str) -> Result<Regex, ParseError> {
    Regex::new(source).map_err(|e| ParseError::Regex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl CompiledComponent {
    fn new(pattern: &str, component: &Component, part: Part) -> Result<Self, ParseError> {
        let prefilter = compile(pattern, &to_regex(&component.ast, part.param_regex()))?;
        let variants = component
            .variants
            .iter()
            .rev()
            .map(|variant| {
                Ok(CompiledVariant {
                    regex: compile(pattern, &variant_regex(variant, part.param_regex()))?,
                    slots: variant
                        .captures
                        .iter()
                        .flatten()
                        .map(|&i| component.name_index(i))
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Self {
            prefilter,
            variants,
        })
    }

    /// Bind this component's parameters from `value`; false when no variant matches.
    fn bind(&self, value: &str, params: &mut Params) -> bool {
        if !self.prefilter.is_match(value) {
            return false;
        }
        for variant in &self.variants {
            if let Some(captures) = variant.regex.captures(value) {
                for (group, &slot) in variant.slots.iter().enumerate() {
                    if let Some(m) = captures.get(group + 1) {
                        params.bind(slot, m.as_str().to_string());
                    }
                }
                return true;
            }
        }
        false
    }
}

#[derive(Debug)]
struct ArrayEntry<T> {
    pattern: RoutePattern,
    components: [Option<CompiledComponent>; 3],
    payload: T,
    order: usize,
}

impl<T> ArrayEntry<T> {
    fn try_match(&self, url: &UrlParts) -> Option<Params> {
        if !self.pattern.accepts_extras(&url.port, &url.query) {
            return None;
        }
        let mut params = Params::unbound(self.pattern.param_names());
        for part in Part::ALL {
            if let Some(component) = &self.components[part.index()] {
                if !component.bind(url.part(part), &mut params) {
                    return None;
                }
            }
        }
        Some(params)
    }
}

/// Linear matcher over compiled regexes.
///
/// Intended for small route tables where exact author-order priority matters
/// more than lookup cost.
#[derive(Debug)]
pub struct ArrayMatcher<T> {
    entries: Vec<ArrayEntry<T>>,
    next_order: usize,
}

impl<T> Default for ArrayMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayMatcher<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_order: 0,
        }
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.entries.iter().map(|e| &e.pattern)
    }
}

impl<T> Matcher<T> for ArrayMatcher<T> {
    fn add(&mut self, source: &str, payload: T) -> Result<(), ParseError> {
        let pattern = RoutePattern::parse(source)?;

        let mut components: [Option<CompiledComponent>; 3] = [None, None, None];
        for part in Part::ALL {
            if let Some(component) = pattern.component(part) {
                components[part.index()] = Some(CompiledComponent::new(source, component, part)?);
            }
        }

        let order = self.next_order;
        self.next_order += 1;
        debug!(
            pattern = %source,
            order,
            variants = pattern.variant_count(),
            algorithm = "array",
            "Pattern registered"
        );
        self.entries.push(ArrayEntry {
            pattern,
            components,
            payload,
            order,
        });
        Ok(())
    }

    fn match_parts(&self, url: &UrlParts) -> Option<Match<'_, T>> {
        self.entries.iter().find_map(|entry| {
            entry.try_match(url).map(|params| {
                debug!(order = entry.order, pattern = %entry.pattern, "Array matcher hit");
                Match {
                    pattern: &entry.pattern,
                    params,
                    payload: &entry.payload,
                }
            })
        })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
