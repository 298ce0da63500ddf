use std::collections::HashMap;

use infragen_core::lang::functions::{self, FunctionId};
use infragen_core::lang::{go_keywords, runtime};
use infragen_core::naming;

#[test]
fn function_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, FunctionId> = HashMap::new();

    for info in functions::FUNCTIONS {
        assert_eq!(
            functions::from_str(info.canonical),
            Some(info.id),
            "function canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            functions::as_str(info.id),
            info.canonical,
            "function as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate function spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }

        for &alias in info.aliases {
            assert_eq!(
                functions::from_str(alias),
                Some(info.id),
                "function alias not resolvable: {}",
                alias
            );
            if let Some(prev) = seen.insert(alias, info.id) {
                panic!("duplicate function alias spelling {:?}: {:?} and {:?}", alias, prev, info.id);
            }
        }
    }
}

#[test]
fn function_registry_is_well_formed() {
    for info in functions::FUNCTIONS {
        assert!(info.arity.min <= info.arity.max, "inverted arity for {}", info.canonical);
        assert!(!info.description.is_empty(), "missing description for {}", info.canonical);
        for module in info.utility_modules {
            assert!(
                !module.contains("pulumi"),
                "utility module {module} of {} must not be a provider or runtime module",
                info.canonical
            );
        }
    }
}

#[test]
fn generated_identifiers_are_valid_and_not_keywords() {
    for &name in runtime::GENERATED_IDENTIFIERS {
        assert!(!go_keywords::is_keyword(name), "{name} is a Go keyword");
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert_ne!(naming::go_identifier(name), name, "node named {name} must be escaped");
    }
}
