//! Path pattern matching against the route table.
//!
//! # Responsibilities
//! - Split the request URI into path and query string
//! - Walk the table in order, compiling each pattern on the fly
//! - Extract named parameters and catch-all remainders
//! - Run the matched route's guard before reporting a match
//!
//! # Design Decisions
//! - Query string is ignored for matching but preserved for redirects
//! - Pattern compile failures become MatchResult::Error, not a panic
//! - No regex; segment-wise comparison keeps matching O(path length)

use thiserror::Error;

use crate::routing::route::{GuardResult, Params, Route, RouteTable};

/// Key under which a trailing `*` captures the unmatched remainder.
pub const SPLAT: &str = "splat";

/// Pattern-level failure during matching.
///
/// Distinct from "no route found": this means the table itself is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("route `{0}` has an empty pattern")]
    EmptyPattern(String),

    #[error("route `{0}` has a parameter segment with no name")]
    EmptyParamName(String),

    #[error("route `{0}` has a catch-all segment before the end of the pattern")]
    InteriorCatchAll(String),
}

/// Outcome of matching one request path against the table.
#[derive(Debug)]
pub enum MatchResult<'a> {
    /// A guard requested a redirect; `location` already carries the
    /// original search string.
    Redirect { location: String },

    /// A route matched and its guard (if any) allowed continuation.
    Matched(RouteMatch<'a>),

    /// The route table is malformed.
    Error(MatchError),

    /// No route matched and no catch-all exists.
    NoMatch,
}

/// A successful match: the route plus extracted parameters.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: Params,
}

enum Segment<'p> {
    Literal(&'p str),
    Param(&'p str),
    CatchAll,
}

fn compile<'p>(route_name: &str, pattern: &'p str) -> Result<Vec<Segment<'p>>, MatchError> {
    if pattern.is_empty() {
        return Err(MatchError::EmptyPattern(route_name.to_string()));
    }
    let raw: Vec<&str> = pattern
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let mut segments = Vec::with_capacity(raw.len());
    for (i, seg) in raw.iter().enumerate() {
        if let Some(name) = seg.strip_prefix(':') {
            if name.is_empty() {
                return Err(MatchError::EmptyParamName(route_name.to_string()));
            }
            segments.push(Segment::Param(name));
        } else if *seg == "*" {
            if i + 1 != raw.len() {
                return Err(MatchError::InteriorCatchAll(route_name.to_string()));
            }
            segments.push(Segment::CatchAll);
        } else {
            segments.push(Segment::Literal(seg));
        }
    }
    Ok(segments)
}

/// Try one compiled pattern against the path segments.
fn try_match(segments: &[Segment<'_>], path: &[&str]) -> Option<Params> {
    let mut params = Params::new();
    let mut i = 0;

    for seg in segments {
        match seg {
            Segment::Literal(lit) => {
                if path.get(i) != Some(lit) {
                    return None;
                }
                i += 1;
            }
            Segment::Param(name) => {
                let value = path.get(i)?;
                params.insert((*name).to_string(), (*value).to_string());
                i += 1;
            }
            Segment::CatchAll => {
                params.insert(SPLAT.to_string(), path[i..].join("/"));
                return Some(params);
            }
        }
    }

    if i == path.len() {
        Some(params)
    } else {
        None
    }
}

/// Match a request URI against the table, first match wins.
///
/// The URI may carry a query string; it never participates in matching but
/// is appended verbatim to any guard redirect target.
pub fn match_route<'a>(table: &'a RouteTable, request_uri: &str) -> MatchResult<'a> {
    let (path, search) = match request_uri.find('?') {
        Some(idx) => request_uri.split_at(idx),
        None => (request_uri, ""),
    };
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for route in table.iter() {
        let segments = match compile(&route.name, &route.pattern) {
            Ok(segments) => segments,
            Err(err) => return MatchResult::Error(err),
        };

        let Some(params) = try_match(&segments, &path_segments) else {
            continue;
        };

        // Guards run before any preload or render work happens.
        if let Some(guard) = &route.guard {
            if let GuardResult::Redirect(target) = guard(&params) {
                return MatchResult::Redirect {
                    location: format!("{target}{search}"),
                };
            }
        }

        return MatchResult::Matched(RouteMatch { route, params });
    }

    MatchResult::NoMatch
}
