//! Resource and function type tokens (`package:module:Member`).

use infragen_core::lang::runtime::INDEX_MODULE;

use crate::errors::TokenError;

/// A decomposed type token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    pub package: String,
    /// Full module component, possibly with a sub-path (`s3/bucket`).
    pub module: String,
    pub member: String,
}

impl TypeToken {
    /// Parse `package:module:Member`; anything but exactly three components is an error.
    pub fn parse(token: &str) -> Result<Self, TokenError> {
        let parts: Vec<&str> = token.split(':').collect();
        match parts.as_slice() {
            [package, module, member] if !package.is_empty() && !member.is_empty() => Ok(Self {
                package: package.to_string(),
                module: module.to_string(),
                member: member.to_string(),
            }),
            _ => Err(TokenError {
                token: token.to_string(),
                found: parts.len(),
            }),
        }
    }

    /// Go module the member lives in: the part of the module before the first `/`, or `None` for the package root.
    pub fn module_name(&self) -> Option<&str> {
        let head = self.module.split('/').next().unwrap_or_default();
        if head.is_empty() || head == INDEX_MODULE {
            None
        } else {
            Some(head)
        }
    }

    /// Go package qualifier used at call sites (`s3.NewBucket`, `aws.GetRegion`).
    pub fn qualifier(&self) -> &str {
        self.module_name().unwrap_or(&self.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_module_name() {
        let token = TypeToken::parse("aws:s3/bucket:Bucket").unwrap();
        assert_eq!(token.package, "aws");
        assert_eq!(token.module_name(), Some("s3"));
        assert_eq!(token.qualifier(), "s3");
        assert_eq!(token.member, "Bucket");
    }

    #[test]
    fn test_index_module_is_package_root() {
        let token = TypeToken::parse("aws:index/getRegion:getRegion").unwrap();
        assert_eq!(token.module_name(), None);
        assert_eq!(token.qualifier(), "aws");
        assert_eq!(TypeToken::parse("random::RandomId").unwrap().module_name(), None);
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(TypeToken::parse("aws:s3").unwrap_err().found, 2);
        assert_eq!(TypeToken::parse("a:b:c:d").unwrap_err().found, 4);
        assert!(TypeToken::parse(":s3:Bucket").is_err());
    }
}
