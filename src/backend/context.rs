//! Per-run translation state: temp-name allocation, node identifiers, and diagnostics.

use std::collections::{BTreeSet, HashMap, HashSet};

use infragen_core::FunctionTable;
use infragen_core::lang::functions::FunctionId;
use infragen_core::naming::go_identifier;
use infragen_model::{Diagnostic, Diagnostics, Node};

use super::GenerationError;
use super::imports::ImportSet;
use super::options::GenerateOptions;

/// Names of a serialization temporary: the encoded bytes and the string bound from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationNames {
    pub value: String,
    pub bytes: String,
}

/// Allocator for temporary names, unique within one generated program.
///
/// Conditionals get `tmp0, tmp1, ...`; serializations get `json0, json1, ...` with byte intermediates
/// `tmpJSON0, tmpJSON1, ...`. Candidates colliding with a reserved or previously issued name are skipped.
#[derive(Debug, Default)]
pub struct TempNames {
    reserved: HashSet<String>,
    next_conditional: usize,
    next_serialization: usize,
}

impl TempNames {
    /// Start an allocator that never issues any of `reserved`.
    pub fn with_reserved<I>(reserved: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            reserved: reserved.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Name for the next conditional temporary.
    pub fn conditional(&mut self) -> String {
        loop {
            let candidate = format!("tmp{}", self.next_conditional);
            self.next_conditional += 1;
            if self.reserved.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Names for the next serialization temporary.
    pub fn serialization(&mut self) -> SerializationNames {
        loop {
            let n = self.next_serialization;
            self.next_serialization += 1;
            let value = format!("json{n}");
            let bytes = format!("tmpJSON{n}");
            if !self.reserved.contains(&value) && !self.reserved.contains(&bytes) {
                self.reserved.insert(value.clone());
                self.reserved.insert(bytes.clone());
                return SerializationNames { value, bytes };
            }
        }
    }
}

/// Go identifiers of the program's nodes, and what each node binds.
///
/// Every node gets its escaped [`go_identifier`]; a name equal to a package qualifier of the file's imports gets an
/// extra `_` so it does not shadow the package. Two nodes ending up with the same identifier is a fatal error.
#[derive(Debug, Default)]
pub struct NodeNames {
    idents: HashMap<String, String>,
    resources: HashSet<String>,
    invoke_results: HashSet<String>,
}

impl NodeNames {
    pub fn build(
        nodes: &[Node],
        functions: &dyn FunctionTable,
        qualifiers: &BTreeSet<String>,
    ) -> Result<Self, GenerationError> {
        let mut names = Self::default();
        let mut owners: HashMap<String, &str> = HashMap::new();
        for node in nodes {
            let mut ident = go_identifier(node.name());
            if qualifiers.contains(&ident) {
                ident.push('_');
            }
            if let Some(first) = owners.insert(ident.clone(), node.name()) {
                return Err(GenerationError::IdentifierClash {
                    first: first.to_string(),
                    second: node.name().to_string(),
                    ident,
                });
            }
            names.idents.insert(node.name().to_string(), ident);
            match node {
                Node::Resource(resource) => {
                    names.resources.insert(resource.name.clone());
                }
                Node::LocalVariable(var) => {
                    let is_invoke = var
                        .value
                        .call_name()
                        .and_then(|name| functions.lookup(name))
                        .is_some_and(|f| f.id == FunctionId::Invoke);
                    if is_invoke {
                        names.invoke_results.insert(var.name.clone());
                    }
                }
                Node::OutputVariable(_) => {}
            }
        }
        Ok(names)
    }

    /// Go identifier for a node (or, for names outside the program, its plain escaped form).
    pub fn ident(&self, name: &str) -> String {
        self.idents.get(name).cloned().unwrap_or_else(|| go_identifier(name))
    }

    /// Resource nodes; their attributes render as SDK property accessors.
    pub fn is_resource(&self, name: &str) -> bool {
        self.resources.contains(name)
    }

    /// Locals bound to an invoke result; their attributes render as exported struct fields.
    pub fn is_invoke_result(&self, name: &str) -> bool {
        self.invoke_results.contains(name)
    }

    fn idents(&self) -> impl Iterator<Item = &String> {
        self.idents.values()
    }
}

/// Mutable state threaded through one generation run.
pub struct TranslationContext<'a> {
    pub options: &'a GenerateOptions,
    pub functions: &'a dyn FunctionTable,
    pub temps: TempNames,
    pub diagnostics: Diagnostics,
    pub names: NodeNames,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        nodes: &[Node],
        imports: &ImportSet,
        functions: &'a dyn FunctionTable,
        options: &'a GenerateOptions,
    ) -> Result<Self, GenerationError> {
        let qualifiers = imports.qualifiers();
        let names = NodeNames::build(nodes, functions, &qualifiers)?;
        let reserved = names.idents().cloned().chain(qualifiers).collect::<Vec<_>>();
        Ok(Self {
            options,
            functions,
            temps: TempNames::with_reserved(reserved),
            diagnostics: Diagnostics::new(),
            names,
        })
    }

    /// Report a non-fatal problem concerning node `subject`.
    pub fn warn(&mut self, subject: &str, summary: impl Into<String>, detail: impl Into<String>) {
        self.diagnostics.push(
            Diagnostic::warning(summary)
                .with_subject(subject)
                .with_detail(detail),
        );
    }
}
