//! In-memory prototype index.

use tracing::debug;

use crate::builtin;
use crate::prototype::Prototype;

/// How a query is matched against prototype names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Exact,
    Substring,
    Suffix,
}

impl SearchMode {
    fn matches(&self, name: &str, query: &str) -> bool {
        match self {
            SearchMode::Exact => name == query,
            SearchMode::Substring => name.contains(query),
            SearchMode::Suffix => name.ends_with(query),
        }
    }
}

/// Ordered collection of prototypes for one invocation.
///
/// Name uniqueness is the loader's responsibility; the index keeps whatever
/// it is given, in order.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    prototypes: Vec<Prototype>,
}

impl CatalogIndex {
    pub fn new(prototypes: Vec<Prototype>) -> Self {
        Self { prototypes }
    }

    /// Built-in prototypes followed by `external` ones.
    ///
    /// An external prototype with the same name as a built-in takes the
    /// built-in's place.
    pub fn with_builtins(external: Vec<Prototype>) -> Self {
        let mut prototypes = builtin::prototypes();
        for proto in external {
            match prototypes.iter_mut().find(|p| p.name == proto.name) {
                Some(existing) => {
                    debug!("Prototype {} overrides built-in", proto.name);
                    *existing = proto;
                }
                None => prototypes.push(proto),
            }
        }
        Self { prototypes }
    }

    /// All prototypes in catalog order.
    pub fn list(&self) -> &[Prototype] {
        &self.prototypes
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Prototypes whose name matches `query` under `mode`, in catalog order.
    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<&Prototype> {
        self.prototypes
            .iter()
            .filter(|p| mode.matches(&p.name, query))
            .collect()
    }
}
