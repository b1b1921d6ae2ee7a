use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use tracing::debug;

use crate::{
    did::{Did, ParseError},
    uri::{is_fragment, is_path_segment},
};

/// [DID URL](https://www.w3.org/TR/did-core/#did-url-syntax).
#[derive(SerializeDisplay, DeserializeFromStr, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DidUrl {
    pub did: Did,
    /// [DID path](https://www.w3.org/TR/did-core/#path), including the leading `/`.
    path: Option<String>,
    /// [DID query](https://www.w3.org/TR/did-core/#query) parameters.
    /// Pairs that are not exactly `key=value` are dropped while parsing.
    queries: BTreeMap<String, String>,
    /// [DID fragment](https://www.w3.org/TR/did-core/#fragment).
    fragment: Option<String>,
}

impl DidUrl {
    pub fn new(
        did: Did,
        path: Option<String>,
        queries: BTreeMap<String, String>,
        fragment: Option<String>,
    ) -> Result<Self, ParseError> {
        if let Some(path) = &path {
            validate_path(path)?;
        }

        if !queries
            .iter()
            .all(|(key, value)| is_query_part(key) && is_query_part(value))
        {
            return Err(ParseError::InvalidQuery);
        }

        if let Some(fragment) = &fragment {
            validate_fragment(fragment)?;
        }

        Ok(Self {
            did,
            path,
            queries,
            fragment,
        })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn queries(&self) -> &BTreeMap<String, String> {
        &self.queries
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.queries.get(key).map(String::as_str)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether the URL is nothing more than its DID.
    pub fn is_bare_did(&self) -> bool {
        self.path.is_none() && self.queries.is_empty() && self.fragment.is_none()
    }
}

impl From<Did> for DidUrl {
    fn from(did: Did) -> Self {
        Self {
            did,
            path: None,
            queries: BTreeMap::new(),
            fragment: None,
        }
    }
}

impl Display for DidUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut url = self.did.to_string();

        if let Some(ref path) = self.path {
            url.push_str(path);
        }

        for (i, (key, value)) in self.queries.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }

        if let Some(ref fragment) = self.fragment {
            url.push('#');
            url.push_str(fragment);
        }

        f.write_str(&url)
    }
}

impl FromStr for DidUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, fragment) = match s.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (s, None),
        };

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };

        let (did_str, path) = match rest.find('/') {
            Some(pos) => (&rest[..pos], Some(&rest[pos..])),
            None => (rest, None),
        };

        let did = Did::from_str(did_str)?;

        if let Some(path) = path {
            validate_path(path)?;
        }

        if let Some(fragment) = &fragment {
            validate_fragment(fragment)?;
        }

        Ok(DidUrl {
            did,
            path: path.map(str::to_string),
            queries: query.map(parse_queries).unwrap_or_default(),
            fragment,
        })
    }
}

/// `path-abempty = *( "/" segment )`
fn validate_path(path: &str) -> Result<(), ParseError> {
    if path.starts_with('/') && path.split('/').skip(1).all(is_path_segment) {
        Ok(())
    } else {
        Err(ParseError::InvalidPath)
    }
}

fn validate_fragment(fragment: &str) -> Result<(), ParseError> {
    if is_fragment(fragment) {
        Ok(())
    } else {
        Err(ParseError::InvalidFragment)
    }
}

/// A query key or value that renders back to the same pair.
fn is_query_part(value: &str) -> bool {
    !value.is_empty() && !value.contains(['&', '=', '#'])
}

fn parse_queries(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() && !value.contains('=') => {
                Some((key.to_string(), value.to_string()))
            }
            _ => {
                debug!("Dropping malformed DID URL query pair {:?}", pair);
                None
            }
        })
        .collect()
}
