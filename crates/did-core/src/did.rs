use std::{fmt::Display, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use crate::uri::is_idchar_segment;

const SCHEME: &str = "did";

/// [DID](https://www.w3.org/TR/did-core/#did-syntax).
#[derive(SerializeDisplay, DeserializeFromStr, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did {
    pub method_name: MethodName,
    pub method_id: MethodId,
}

impl Did {
    /// Builds a DID from its two variable parts, validating both.
    pub fn new(method_name: &str, method_id: &str) -> Result<Self, ParseError> {
        Ok(Self {
            method_name: method_name.parse()?,
            method_id: method_id.parse()?,
        })
    }

    /// Always `did`.
    pub fn scheme(&self) -> &'static str {
        SCHEME
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SCHEME}:{}:{}", self.method_name, self.method_id)
    }
}

impl FromStr for Did {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or(ParseError::MissingScheme)?;

        let (method_name, method_id) = rest.split_once(':').ok_or(ParseError::InvalidMethodId)?;

        Ok(Did {
            method_name: method_name.parse()?,
            method_id: method_id.parse()?,
        })
    }
}

/// `method-name = 1*method-char`, `method-char = %x61-7A / DIGIT`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodName(String);

impl MethodName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MethodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MethodName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            Ok(MethodName(s.to_string()))
        } else {
            Err(ParseError::InvalidMethodName)
        }
    }
}

/// Method-specific id. One or more `:`-separated runs of `idchar`, none empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId(String);

impl MethodId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `:`-separated segments, e.g. `["example.com", "user", "alice"]`
    /// for `did:web:example.com:user:alice`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(':')
    }
}

impl Display for MethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MethodId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.split(':').all(is_idchar_segment) {
            Ok(MethodId(s.to_string()))
        } else {
            Err(ParseError::InvalidMethodId)
        }
    }
}

/// The input does not match the DID or DID URL grammar.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed identifier: missing \"did:\" scheme")]
    MissingScheme,
    #[error("malformed identifier: method name must be lowercase letters and digits")]
    InvalidMethodName,
    #[error("malformed identifier: invalid method-specific id")]
    InvalidMethodId,
    #[error("malformed identifier: invalid path")]
    InvalidPath,
    #[error("malformed identifier: invalid query parameter")]
    InvalidQuery,
    #[error("malformed identifier: invalid fragment")]
    InvalidFragment,
}
