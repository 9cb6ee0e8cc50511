//! Trie matcher over URL parts.
//!
//! The tree is keyed on `[protocol, hostname labels reversed, pathname
//! segments]`. Storing `a.b.com` as `com → b → a` lets every route under one
//! domain share a prefix and puts suffix wildcards (`*.example.com`) at the
//! end of a path from the root.
//!
//! ## Edges
//!
//! - **static**: exact segment text
//! - **variable**: anchored regex over exactly one segment
//! - **wildcard**: anchored regex over all remaining segments of the part,
//!   rejoined in source order. A wildcard edge covers its own segment and
//!   every later segment of the same pattern part, so `files/*/raw` becomes
//!   `files` → `{*}/raw`.
//! - **next**: from the end of one part to the start of the following one
//!
//! A part the pattern does not constrain is inserted as an anonymous `{*}`
//! wildcard edge, which accepts any value since every URL part has at least
//! one (possibly empty) segment.
//!
//! ## Search
//!
//! Lookups run a depth-first search on an explicit stack so that tables with
//! many overlapping variable and wildcard edges cannot exhaust the call stack.
//! Parameter values are collected positionally per part; a branch that
//! captures clones the value arrays before appending, so sibling branches
//! never see each other's bindings.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::rc::Rc;

use regex::{Captures, Regex};
use tracing::debug;

use super::{Match, Matcher, Params};
use crate::escape::{count_placeholders, unescape_key, WILDCARD_PLACEHOLDER};
use crate::pattern::compile::segment_regex;
use crate::pattern::{Component, ParseError, RoutePattern, Variant};
use crate::url_parts::{Part, UrlParts};

const PARTS: usize = Part::ALL.len();

/// Per-part variant preference, 0 being the most specific variant.
type Rank = [usize; PARTS];

/// Positional values collected per part during a search.
type Values = [Vec<String>; PARTS];

#[derive(Debug)]
struct Edge {
    key: Box<str>,
    regex: Regex,
    node: Node,
}

#[derive(Debug)]
struct Terminal {
    order: usize,
    rank: Rank,
    /// Per part, the pattern-wide name index of each positional value
    param_indices: [Vec<Option<usize>>; PARTS],
}

#[derive(Debug, Default)]
struct Node {
    static_edges: HashMap<Box<str>, Node>,
    variable: Vec<Edge>,
    wildcard: Vec<Edge>,
    next: Option<Box<Node>>,
    terminals: Vec<Terminal>,
}

/// One step of an insertion plan.
#[derive(Debug)]
enum EdgeSpec {
    Static(String),
    Variable(String, Regex),
    Wildcard(String, Regex),
}

/// Edges and positional slots for one variant of one part.
#[derive(Debug)]
struct PartPlan {
    edges: Vec<EdgeSpec>,
    slots: Vec<Option<usize>>,
    rank: usize,
}

struct KeySegment<'k> {
    key: &'k str,
    slots: Vec<Option<usize>>,
    params: usize,
    wildcards: usize,
}

fn compile(pattern: &str, key: &str, part: Part) -> Result<Regex, ParseError> {
    Regex::new(&segment_regex(key, part.param_regex())).map_err(|e| ParseError::Regex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl PartPlan {
    /// The plan for a part the pattern leaves unconstrained.
    fn unconstrained(pattern: &str, part: Part) -> Result<Self, ParseError> {
        Ok(Self {
            edges: vec![EdgeSpec::Wildcard(
                WILDCARD_PLACEHOLDER.to_string(),
                compile(pattern, WILDCARD_PLACEHOLDER, part)?,
            )],
            slots: vec![None],
            rank: 0,
        })
    }

    fn for_component(
        pattern: &str,
        part: Part,
        component: &Component,
    ) -> Result<Vec<Self>, ParseError> {
        let count = component.variants.len();
        component
            .variants
            .iter()
            .enumerate()
            .map(|(i, variant)| Self::for_variant(pattern, part, component, variant, count - 1 - i))
            .collect()
    }

    fn for_variant(
        pattern: &str,
        part: Part,
        component: &Component,
        variant: &Variant,
        rank: usize,
    ) -> Result<Self, ParseError> {
        let mut slots = component.placeholder_slots(variant).into_iter();
        let raw: Vec<&str> = match part.separator() {
            Some(sep) => variant.key.split(sep).collect(),
            None => vec![variant.key.as_str()],
        };
        let mut segments: Vec<KeySegment<'_>> = raw
            .into_iter()
            .map(|key| {
                let (params, wildcards) = count_placeholders(key);
                KeySegment {
                    key,
                    slots: slots.by_ref().take(params + wildcards).collect(),
                    params,
                    wildcards,
                }
            })
            .collect();
        if part.reversed() {
            segments.reverse();
        }

        let mut plan = Self {
            edges: Vec::with_capacity(segments.len()),
            slots: Vec::new(),
            rank,
        };
        for (at, segment) in segments.iter().enumerate() {
            if segment.wildcards > 0 {
                // Everything from here to the end of the part. Keys and slots
                // follow source order, as does the text the edge is tested on.
                let rest = &segments[at..];
                let key = part.join(&rest.iter().map(|s| s.key).collect::<Vec<_>>());
                if part.reversed() {
                    rest.iter()
                        .rev()
                        .for_each(|s| plan.slots.extend(s.slots.iter().copied()));
                } else {
                    rest.iter()
                        .for_each(|s| plan.slots.extend(s.slots.iter().copied()));
                }
                let regex = compile(pattern, &key, part)?;
                plan.edges.push(EdgeSpec::Wildcard(key, regex));
                break;
            } else if segment.params > 0 {
                let regex = compile(pattern, segment.key, part)?;
                plan.slots.extend(segment.slots.iter().copied());
                plan.edges.push(EdgeSpec::Variable(segment.key.to_string(), regex));
            } else {
                plan.edges
                    .push(EdgeSpec::Static(unescape_key(segment.key).into_owned()));
            }
        }
        Ok(plan)
    }
}

impl Node {
    fn child_mut(&mut self, edge: &EdgeSpec) -> &mut Node {
        match edge {
            EdgeSpec::Static(segment) => self
                .static_edges
                .entry(Box::from(segment.as_str()))
                .or_default(),
            EdgeSpec::Variable(key, regex) => Self::edge_mut(&mut self.variable, key, regex),
            EdgeSpec::Wildcard(key, regex) => Self::edge_mut(&mut self.wildcard, key, regex),
        }
    }

    fn edge_mut<'n>(edges: &'n mut Vec<Edge>, key: &str, regex: &Regex) -> &'n mut Node {
        let at = match edges.iter().position(|e| e.key.as_ref() == key) {
            Some(at) => at,
            None => {
                edges.push(Edge {
                    key: Box::from(key),
                    regex: regex.clone(),
                    node: Node::default(),
                });
                edges.len() - 1
            }
        };
        &mut edges[at].node
    }
}

#[derive(Debug)]
struct TrieEntry<T> {
    pattern: RoutePattern,
    payload: T,
}

/// One pending position of the depth-first search.
struct State<'t> {
    part: usize,
    segment: usize,
    node: &'t Node,
    values: Rc<Values>,
}

/// Append the captures of a matched edge regex to the values of one part,
/// on a fresh copy.
fn with_captures(values: &Rc<Values>, part: usize, captures: &Captures<'_>) -> Rc<Values> {
    let mut values = Values::clone(values);
    values[part].extend(
        captures
            .iter()
            .skip(1)
            .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string())),
    );
    Rc::new(values)
}

/// Prefix-tree matcher for large route tables.
#[derive(Debug)]
pub struct TrieMatcher<T> {
    root: Node,
    /// Indexed by order
    entries: Vec<TrieEntry<T>>,
    next_order: usize,
}

impl<T> Default for TrieMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TrieMatcher<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            entries: Vec::new(),
            next_order: 0,
        }
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.entries.iter().map(|e| &e.pattern)
    }

    /// Number of trie nodes, for diagnostics.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.static_edges.values());
            stack.extend(node.variable.iter().map(|e| &e.node));
            stack.extend(node.wildcard.iter().map(|e| &e.node));
            stack.extend(node.next.as_deref());
        }
        count
    }

    /// First complete match the search reaches. Fast, but when several
    /// patterns match the winner depends on the trie layout rather than on
    /// registration order.
    pub fn match_any(&self, url: &UrlParts) -> Option<Match<'_, T>> {
        let mut found = None;
        self.search(url, |terminal, values| {
            if self.accepts(terminal, url) {
                found = Some((terminal, Rc::clone(values)));
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        });
        found.and_then(|(terminal, values)| self.to_match(terminal, &values))
    }

    /// The match of the earliest registered pattern, with each part bound by
    /// its most specific matching variant.
    ///
    /// Explores the whole search space, stopping early only on order 0 with
    /// every part at its most specific variant since nothing can beat it.
    pub fn match_by_order(&self, url: &UrlParts) -> Option<Match<'_, T>> {
        let mut best: Option<(&Terminal, Rc<Values>)> = None;
        self.search(url, |terminal, values| {
            if !self.accepts(terminal, url) {
                return ControlFlow::Continue(());
            }
            let better = best.as_ref().map_or(true, |(current, _)| {
                (terminal.order, terminal.rank) < (current.order, current.rank)
            });
            if better {
                best = Some((terminal, Rc::clone(values)));
                if terminal.order == 0 && terminal.rank == [0; PARTS] {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        });
        best.and_then(|(terminal, values)| self.to_match(terminal, &values))
    }

    fn accepts(&self, terminal: &Terminal, url: &UrlParts) -> bool {
        self.entries
            .get(terminal.order)
            .is_some_and(|entry| entry.pattern.accepts_extras(&url.port, &url.query))
    }

    fn to_match(&self, terminal: &Terminal, values: &Values) -> Option<Match<'_, T>> {
        let entry = self.entries.get(terminal.order)?;
        Some(Match {
            pattern: &entry.pattern,
            params: Self::to_params(&entry.pattern, terminal, values),
            payload: &entry.payload,
        })
    }

    /// Name the positional values collected by the search. Names the matched
    /// variants never reached stay unbound.
    fn to_params(pattern: &RoutePattern, terminal: &Terminal, values: &Values) -> Params {
        let mut params = Params::unbound(pattern.param_names());
        for (indices, values) in terminal.param_indices.iter().zip(values) {
            for (slot, value) in indices.iter().zip(values) {
                if let Some(name) = slot {
                    params.bind(*name, value.clone());
                }
            }
        }
        params
    }

    /// Depth-first search calling `visit` for every terminal whose path
    /// matches `url`, until `visit` breaks.
    fn search<'t, F>(&'t self, url: &UrlParts, mut visit: F)
    where
        F: FnMut(&'t Terminal, &Rc<Values>) -> ControlFlow<()>,
    {
        let segments: [Vec<&str>; PARTS] = Part::ALL.map(|part| part.segments(url.part(part)));
        let mut stack = vec![State {
            part: 0,
            segment: 0,
            node: &self.root,
            values: Rc::new(Values::default()),
        }];

        while let Some(state) = stack.pop() {
            let part = Part::ALL[state.part];
            let segs = &segments[state.part];

            let Some(&current) = segs.get(state.segment) else {
                // Part exhausted: move on to the next part, or report.
                if state.part + 1 < PARTS {
                    if let Some(next) = state.node.next.as_deref() {
                        stack.push(State {
                            part: state.part + 1,
                            segment: 0,
                            node: next,
                            values: state.values,
                        });
                    }
                } else {
                    for terminal in &state.node.terminals {
                        if visit(terminal, &state.values).is_break() {
                            return;
                        }
                    }
                }
                continue;
            };

            // Pushed in reverse so edges pop as static, variable, wildcard.
            if !state.node.wildcard.is_empty() {
                let rest = part.join(&segs[state.segment..]);
                for edge in state.node.wildcard.iter().rev() {
                    if let Some(captures) = edge.regex.captures(&rest) {
                        stack.push(State {
                            part: state.part,
                            segment: segs.len(),
                            node: &edge.node,
                            values: with_captures(&state.values, state.part, &captures),
                        });
                    }
                }
            }
            for edge in state.node.variable.iter().rev() {
                if let Some(captures) = edge.regex.captures(current) {
                    stack.push(State {
                        part: state.part,
                        segment: state.segment + 1,
                        node: &edge.node,
                        values: with_captures(&state.values, state.part, &captures),
                    });
                }
            }
            if let Some(child) = state.node.static_edges.get(current) {
                stack.push(State {
                    part: state.part,
                    segment: state.segment + 1,
                    node: child,
                    values: Rc::clone(&state.values),
                });
            }
        }
    }
}

impl<T> Matcher<T> for TrieMatcher<T> {
    fn add(&mut self, source: &str, payload: T) -> Result<(), ParseError> {
        let pattern = RoutePattern::parse(source)?;

        // Plan (and compile) everything before touching the tree so a
        // failure leaves it as it was.
        let mut plans: [Vec<PartPlan>; PARTS] = Default::default();
        for part in Part::ALL {
            plans[part.index()] = match pattern.component(part) {
                Some(component) => PartPlan::for_component(source, part, component)?,
                None => vec![PartPlan::unconstrained(source, part)?],
            };
        }

        let order = self.next_order;
        let [protocols, hostnames, pathnames] = &plans;
        for protocol in protocols {
            for hostname in hostnames {
                for pathname in pathnames {
                    let mut node = &mut self.root;
                    for (at, plan) in [protocol, hostname, pathname].into_iter().enumerate() {
                        if at > 0 {
                            node = &mut **node.next.get_or_insert_with(Box::default);
                        }
                        for edge in &plan.edges {
                            node = node.child_mut(edge);
                        }
                    }
                    node.terminals.push(Terminal {
                        order,
                        rank: [protocol.rank, hostname.rank, pathname.rank],
                        param_indices: [
                            protocol.slots.clone(),
                            hostname.slots.clone(),
                            pathname.slots.clone(),
                        ],
                    });
                }
            }
        }

        debug!(
            pattern = %source,
            order,
            variants = pattern.variant_count(),
            algorithm = "trie",
            "Pattern registered"
        );
        self.next_order += 1;
        self.entries.push(TrieEntry { pattern, payload });
        Ok(())
    }

    fn match_parts(&self, url: &UrlParts) -> Option<Match<'_, T>> {
        self.match_by_order(url)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
