//! Static route table and the guarded route tree built from it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The application declares its screens once as a list of
//! [`RouteDefinition`]s. [`RouteTree::build`] validates that list and turns
//! it into nested nodes where every protected route carries a [`Gate`]. The
//! router asks [`RouteTree::match_path`] for the chain of nodes that
//! renders a URL (parent layouts first) and applies each gate in order.
//!
//! DESIGN
//! ======
//! - "Protected with no roles" (any signed-in user) and "public" are
//!   different classes. The `protected` flag separates them; the role list
//!   only narrows a protected route further.
//! - Insertion order is priority order: the first sibling that matches wins.
//! - Child patterns are relative to their parent. A child with an empty
//!   pattern is the parent's index route.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::RouteError;
use crate::guard::{self, Decision};
use crate::location::Location;
use crate::policy::AccessPolicy;
use crate::role::Role;
use crate::session::Session;

/// Parameters captured from `:name` segments (and `*` for a catch-all).
pub type Params = BTreeMap<String, String>;

// =============================================================================
// PATH PATTERN
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    Wildcard,
}

/// Parsed URL pattern: static segments, `:param` placeholders and an
/// optional trailing `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/courses/:id` or `*`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] for an empty or repeated
    /// parameter name, a `*` that is not the last segment, or a stray `:`
    /// or `*` inside a segment.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidPattern { pattern: raw.to_owned(), reason };
        let parts: Vec<&str> = raw.split('/').filter(|part| !part.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());
        let mut names = HashSet::new();
        for (i, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if i + 1 != parts.len() {
                    return Err(invalid("'*' must be the last segment"));
                }
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid("empty parameter name"));
                }
                if name.contains([':', '*']) {
                    return Err(invalid("misplaced ':' or '*'"));
                }
                if !names.insert(name.to_owned()) {
                    return Err(invalid("duplicate parameter name"));
                }
                Segment::Param(name.to_owned())
            } else if part.contains([':', '*']) {
                return Err(invalid("misplaced ':' or '*'"));
            } else {
                Segment::Static((*part).to_owned())
            };
            segments.push(segment);
        }
        Ok(Self { segments })
    }

    /// Pattern with no segments (an index route).
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.segments.is_empty()
    }

    fn ends_with_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn joined(&self, child: &PathPattern) -> PathPattern {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        PathPattern { segments }
    }

    /// Match the pattern against the front of `path`, returning how many
    /// path segments it consumed.
    fn match_prefix(&self, path: &[&str], params: &mut Params) -> Option<usize> {
        let mut consumed = 0;
        for segment in &self.segments {
            match segment {
                Segment::Wildcard => {
                    let rest = path[consumed..].iter().map(|s| decode_segment(s)).collect::<Vec<_>>();
                    params.insert("*".to_owned(), rest.join("/"));
                    return Some(path.len());
                }
                Segment::Static(expected) => {
                    let actual = path.get(consumed)?;
                    if !actual.eq_ignore_ascii_case(expected) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let actual = path.get(consumed)?;
                    params.insert(name.clone(), decode_segment(actual));
                }
            }
            consumed += 1;
        }
        Some(consumed)
    }

    /// Match a whole path, returning the captured parameters.
    #[cfg(test)]
    pub(crate) fn matches(&self, path: &str) -> Option<Params> {
        let segments = split_path(path);
        let mut params = Params::new();
        let consumed = self.match_prefix(&segments, &mut params)?;
        (consumed == segments.len()).then_some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => write!(f, "/{s}")?,
                Segment::Param(name) => write!(f, "/:{name}")?,
                Segment::Wildcard => f.write_str("/*")?,
            }
        }
        Ok(())
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), std::borrow::Cow::into_owned)
}

// =============================================================================
// ROUTE DEFINITION
// =============================================================================

/// One entry of the static route table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDefinition<E> {
    /// Pattern relative to the parent route.
    pub path: String,
    pub element: E,
    /// Requires a signed-in user.
    pub protected: bool,
    /// Any-of role requirement; only valid on protected routes.
    pub required_roles: Vec<Role>,
    pub children: Vec<RouteDefinition<E>>,
}

impl<E> RouteDefinition<E> {
    /// Route open to everyone.
    pub fn public(path: impl Into<String>, element: E) -> Self {
        Self { path: path.into(), element, protected: false, required_roles: Vec::new(), children: Vec::new() }
    }

    /// Route open to any signed-in user.
    pub fn protected(path: impl Into<String>, element: E) -> Self {
        Self { protected: true, ..Self::public(path, element) }
    }

    /// Route open to signed-in users holding at least one of `roles`.
    pub fn with_roles(path: impl Into<String>, element: E, roles: impl IntoIterator<Item = Role>) -> Self {
        Self { required_roles: roles.into_iter().collect(), ..Self::protected(path, element) }
    }

    /// Nest `children` under this route's outlet.
    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDefinition<E>>) -> Self {
        self.children = children;
        self
    }
}

// =============================================================================
// ROUTE TREE
// =============================================================================

/// Access class attached to a built route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    Open,
    /// Wrapped by the guard; an empty list admits any signed-in user.
    Guarded { required_roles: Vec<Role> },
}

#[derive(Clone, Debug)]
struct RouteNode<E> {
    pattern: PathPattern,
    full: String,
    element: E,
    gate: Gate,
    children: Vec<RouteNode<E>>,
}

/// One level of a matched route chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedLevel<E> {
    /// Absolute pattern of this level.
    pub pattern: String,
    pub element: E,
    pub gate: Gate,
}

/// Result of matching a path: the chain from outermost layout to leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<E> {
    pub levels: Vec<MatchedLevel<E>>,
    pub params: Params,
}

impl<E> RouteMatch<E> {
    /// The innermost matched route.
    #[must_use]
    pub fn leaf(&self) -> Option<&MatchedLevel<E>> {
        self.levels.last()
    }

    /// Apply every gate on the chain, outermost first; the first outcome
    /// other than `Render` wins.
    #[must_use]
    pub fn decide(&self, session: &Session, location: &Location, policy: &AccessPolicy) -> Decision {
        for level in &self.levels {
            if let Gate::Guarded { required_roles } = &level.gate {
                let decision = guard::decide(session, required_roles, location, policy);
                if decision != Decision::Render {
                    return decision;
                }
            }
        }
        Decision::Render
    }
}

/// Validated, nested route table.
#[derive(Clone, Debug)]
pub struct RouteTree<E> {
    roots: Vec<RouteNode<E>>,
}

impl<E> Default for RouteTree<E> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<E: Clone> RouteTree<E> {
    /// Validate `definitions` and build the guarded tree.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPattern`] for a malformed pattern, a child
    ///   under a catch-all, or a parameter name reused along one branch.
    /// - [`RouteError::UnguardedRoles`] when roles are declared on a route
    ///   that is not protected.
    /// - [`RouteError::Duplicate`] when two siblings share a pattern.
    pub fn build(definitions: Vec<RouteDefinition<E>>) -> Result<Self, RouteError> {
        let roots = build_level(definitions, &PathPattern { segments: Vec::new() })?;
        log::debug!("route tree built with {} top-level routes", roots.len());
        Ok(Self { roots })
    }

    /// Chain of routes rendering `path`, or `None` when nothing matches.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<E>> {
        let segments = split_path(path);
        let mut params = Params::new();
        let mut levels = Vec::new();
        match_level(&self.roots, &segments, &mut params, &mut levels).then_some(RouteMatch { levels, params })
    }

    /// Every absolute pattern with its gate, depth-first in table order.
    #[must_use]
    pub fn patterns(&self) -> Vec<(String, Gate)> {
        fn walk<E>(nodes: &[RouteNode<E>], out: &mut Vec<(String, Gate)>) {
            for node in nodes {
                out.push((node.full.clone(), node.gate.clone()));
                walk(&node.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn build_level<E>(definitions: Vec<RouteDefinition<E>>, parent: &PathPattern) -> Result<Vec<RouteNode<E>>, RouteError> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(definitions.len());
    for def in definitions {
        let pattern = PathPattern::parse(&def.path)?;
        let full_pattern = parent.joined(&pattern);
        let full = full_pattern.to_string();

        if parent.ends_with_wildcard() {
            return Err(RouteError::InvalidPattern { pattern: full, reason: "catch-all route cannot have children" });
        }
        let mut names = HashSet::new();
        if full_pattern.param_names().any(|name| !names.insert(name)) {
            return Err(RouteError::InvalidPattern { pattern: full, reason: "duplicate parameter name" });
        }
        if !def.protected && !def.required_roles.is_empty() {
            return Err(RouteError::UnguardedRoles { path: full, roles: def.required_roles });
        }
        if !seen.insert(pattern.to_string()) {
            return Err(RouteError::Duplicate(full));
        }

        let gate = if def.protected { Gate::Guarded { required_roles: def.required_roles } } else { Gate::Open };
        let children = build_level(def.children, &full_pattern)?;
        nodes.push(RouteNode { pattern, full, element: def.element, gate, children });
    }
    Ok(nodes)
}

fn match_level<E: Clone>(
    nodes: &[RouteNode<E>],
    segments: &[&str],
    params: &mut Params,
    levels: &mut Vec<MatchedLevel<E>>,
) -> bool {
    for node in nodes {
        let mut local = params.clone();
        let Some(consumed) = node.pattern.match_prefix(segments, &mut local) else {
            continue;
        };
        let rest = &segments[consumed..];
        levels.push(MatchedLevel { pattern: node.full.clone(), element: node.element.clone(), gate: node.gate.clone() });

        // A fully consumed path still descends so an index child fills the outlet.
        if match_level(&node.children, rest, &mut local, levels) || rest.is_empty() {
            *params = local;
            return true;
        }
        levels.pop();
    }
    false
}
