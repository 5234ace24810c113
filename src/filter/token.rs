//! Filter token parsing.

use std::fmt;

use crate::error::{FilterError, Result};
use crate::platform::{SEPARATOR, split_pair};

/// Leading marker that turns a filter token into an exclusion.
pub const NEGATION: char = '!';

/// Split the negation marker off a name token.
///
/// Returns whether the token was negated and the remaining name. A token made
/// of the marker alone is rejected.
pub(crate) fn split_negation(token: &str) -> Result<(bool, &str)> {
    match token.strip_prefix(NEGATION) {
        Some("") => Err(FilterError::BareNegation {
            token: token.to_string(),
        }),
        Some(name) => Ok((true, name)),
        None => Ok((false, token)),
    }
}

/// A recorded `os/arch` filter token.
///
/// Only the OS half is checked for the negation marker: `!linux/amd64`
/// excludes the pair, while `linux/!amd64` is an include of an architecture
/// literally named `!amd64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairToken {
    pub negated: bool,
    pub os: String,
    pub arch: String,
}

impl PairToken {
    pub fn parse(token: &str) -> Result<Self> {
        let (os, arch) = split_pair(token).ok_or_else(|| FilterError::MalformedPair {
            token: token.to_string(),
        })?;
        let (negated, os) = split_negation(os).map_err(|_| FilterError::BareNegation {
            token: token.to_string(),
        })?;

        Ok(Self {
            negated,
            os: os.to_lowercase(),
            arch: arch.to_lowercase(),
        })
    }
}

impl fmt::Display for PairToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}", NEGATION)?;
        }
        write!(f, "{}{}{}", self.os, SEPARATOR, self.arch)
    }
}
