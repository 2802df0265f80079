//! Path pattern matching and parameter extraction.
//!
//! # Responsibilities
//! - Match a request path against an exact path or a registered prefix
//! - Extract typed parameters from the path with strict width limits
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex: every extractor is a single left-to-right scan
//! - Anchored extractors consume the whole remainder of the path or reject
//!   it. Unanchored ones take the leading digits and ignore what follows

/// Where a route attaches in the path space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches only this path.
    Exact(&'static str),
    /// Matches this path and everything below it. Conventionally ends in `/`.
    Prefix(&'static str),
}

impl PathPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathPattern::Exact(p) | PathPattern::Prefix(p) => *p,
        }
    }

    pub fn is_exact_match(&self, path: &str) -> bool {
        matches!(self, PathPattern::Exact(p) if *p == path)
    }

    pub fn is_prefix_match(&self, path: &str) -> bool {
        matches!(self, PathPattern::Prefix(p) if path.starts_with(p))
    }
}

/// Typed parameters pulled from a matched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params {
    None,
    /// `/status/{code}`, `/stream/{n}`, `/delay/{n}`.
    Number(u64),
    /// `/{name}/{n}`.
    Named { name: String, count: u64 },
}

/// Parameter extractor attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    /// The route takes no parameters.
    None,
    /// The path below the prefix starts with `min..=max` decimal digits.
    /// When `anchored`, nothing may follow them.
    Digits { min: usize, max: usize, anchored: bool },
    /// The path starts with `/{name}/{n}`; name is word characters or `-`,
    /// n is up to `max_digits` leading decimal digits. Anything after the
    /// digits is ignored.
    NamedCount { max_digits: usize },
}

impl Extractor {
    /// Extract parameters, or `None` when the path does not fit.
    pub fn extract(&self, pattern: &PathPattern, path: &str) -> Option<Params> {
        match *self {
            Extractor::None => Some(Params::None),
            Extractor::Digits { min, max, anchored } => {
                let rest = path.strip_prefix(pattern.as_str())?;
                let (n, tail) = leading_digits(rest, min, max)?;
                if anchored && !tail.is_empty() {
                    return None;
                }
                Some(Params::Number(n))
            }
            Extractor::NamedCount { max_digits } => {
                let rest = path.strip_prefix('/')?;
                let (name, digits) = rest.split_once('/')?;
                if name.is_empty() || !name.bytes().all(is_name_byte) {
                    return None;
                }
                let (count, _) = leading_digits(digits, 1, max_digits)?;
                Some(Params::Named {
                    name: name.to_string(),
                    count,
                })
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Up to `max` leading digits (at least `min`) and the unconsumed tail.
fn leading_digits(s: &str, min: usize, max: usize) -> Option<(u64, &str)> {
    let len = s.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len < min {
        return None;
    }
    let (digits, tail) = s.split_at(len);
    Some((digits.parse().ok()?, tail))
}
