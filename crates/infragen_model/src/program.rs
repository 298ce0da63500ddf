//! Bound programs and the package metadata they reference.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, VersionError};
use crate::node::Node;

/// A bound, linearized program.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub packages: Vec<PackageDescriptor>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Program {
    /// Read a program from its JSON form; node names must be unique.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        let program: Program = serde_json::from_str(source)?;
        program.check_unique_names()?;
        Ok(program)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_unique_names(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.name()) {
                return Err(ModelError::DuplicateNode(node.name().to_string()));
            }
        }
        Ok(())
    }
}

/// A provider package the program uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: Version,
}

/// A semantic version (`1.2.3`, `v2.0.0`, `3.1.0-beta.1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch, pre: None }
    }

    /// Parse a version; missing minor/patch components default to zero.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let invalid = |reason: &str| VersionError {
            version: text.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = text.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (core, pre) = match trimmed.split_once('-') {
            Some((core, pre)) if !pre.is_empty() => (core, Some(pre.to_string())),
            Some(_) => return Err(invalid("empty pre-release suffix")),
            None => (trimmed, None),
        };
        if core.is_empty() {
            return Err(invalid("missing major version"));
        }
        let mut numbers = [0u64; 3];
        let components: Vec<&str> = core.split('.').collect();
        if components.len() > 3 {
            return Err(invalid("too many components"));
        }
        for (slot, component) in numbers.iter_mut().zip(&components) {
            *slot = component
                .parse()
                .map_err(|_| invalid(&format!("`{component}` is not a number")))?;
        }
        let [major, minor, patch] = numbers;
        Ok(Self { major, minor, patch, pre })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Version::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Source of provider package versions for import path computation.
pub trait PackageMetadata {
    /// Declared major version of `package`, or `None` if the program does not reference it.
    fn major_version(&self, package: &str) -> Option<u64>;
}

impl PackageMetadata for Program {
    fn major_version(&self, package: &str) -> Option<u64> {
        self.packages
            .iter()
            .find(|p| p.name == package)
            .map(|p| p.version.major)
    }
}

impl PackageMetadata for BTreeMap<String, u64> {
    fn major_version(&self, package: &str) -> Option<u64> {
        self.get(package).copied()
    }
}
