//! Import collection for the generated program
//!
//! A single pass over every node and every expression, independent of lowering. The result drives the import block
//! of the preamble.

use std::collections::BTreeSet;

use infragen_core::FunctionTable;
use infragen_core::lang::functions::FunctionId;
use infragen_core::lang::runtime::{RUNTIME_MODULE, provider_module_path};
use infragen_model::{ExprKind, Expression, Literal, Node, PackageMetadata, TypeToken};

use super::GenerationError;

/// Module paths the generated program imports, deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    /// Standard-library modules required by function calls
    pub utility: BTreeSet<String>,
    /// Provider SDK modules required by resources and invokes
    pub provider: BTreeSet<String>,
}

impl ImportSet {
    pub fn utility_modules(&self) -> impl Iterator<Item = &str> {
        self.utility.iter().map(String::as_str)
    }

    pub fn provider_modules(&self) -> impl Iterator<Item = &str> {
        self.provider.iter().map(String::as_str)
    }

    /// Package names the imports bind in the generated file (last segment of each import path).
    pub fn qualifiers(&self) -> BTreeSet<String> {
        std::iter::once(RUNTIME_MODULE)
            .chain(self.utility_modules())
            .chain(self.provider_modules())
            .filter_map(|path| path.rsplit('/').next())
            .map(str::to_string)
            .collect()
    }
}

/// Import path for the module a type token lives in.
pub fn provider_import_path(
    node: &str,
    token: &TypeToken,
    packages: &dyn PackageMetadata,
) -> Result<String, GenerationError> {
    let major = packages
        .major_version(&token.package)
        .ok_or_else(|| GenerationError::MissingPackage {
            node: node.to_string(),
            token: format!("{}:{}:{}", token.package, token.module, token.member),
            package: token.package.clone(),
        })?;
    Ok(provider_module_path(&token.package, major, token.module_name()))
}

fn parse_token(node: &str, token: &str) -> Result<TypeToken, GenerationError> {
    TypeToken::parse(token).map_err(|e| GenerationError::MalformedToken {
        node: node.to_string(),
        token: token.to_string(),
        reason: e.to_string(),
    })
}

/// Collect the utility and provider modules `nodes` need.
///
/// Fails when a resource or invoke references a package absent from `packages`, or carries a malformed type token.
#[tracing::instrument(skip_all, fields(node_count = nodes.len()))]
pub fn collect_imports(
    nodes: &[Node],
    packages: &dyn PackageMetadata,
    functions: &dyn FunctionTable,
) -> Result<ImportSet, GenerationError> {
    let mut imports = ImportSet::default();
    for node in nodes {
        if let Node::Resource(resource) = node {
            let token = parse_token(&resource.name, &resource.token)?;
            imports
                .provider
                .insert(provider_import_path(&resource.name, &token, packages)?);
        }

        let mut calls: Vec<&Expression> = Vec::new();
        for expr in node.expressions() {
            expr.walk(&mut |e| {
                if matches!(e.kind, ExprKind::Call { .. }) {
                    calls.push(e);
                }
            });
        }
        for call in calls {
            let ExprKind::Call { name, args } = &call.kind else {
                continue;
            };
            imports
                .utility
                .extend(functions.utility_modules(name).iter().map(|m| m.to_string()));
            let is_invoke = functions.lookup(name).is_some_and(|f| f.id == FunctionId::Invoke);
            if !is_invoke {
                continue;
            }
            if let Some(ExprKind::Literal {
                value: Literal::String(token),
            }) = args.first().map(|a| &a.kind)
            {
                let token = parse_token(node.name(), token)?;
                imports.provider.insert(provider_import_path(node.name(), &token, packages)?);
            }
        }
    }
    tracing::debug!(
        utility = imports.utility.len(),
        provider = imports.provider.len(),
        "collected imports"
    );
    Ok(imports)
}
