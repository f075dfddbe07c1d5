//! Resolve, bind and expand in one call.

use std::collections::HashMap;

use tracing::info;

use protokit_catalog::{resolve, CatalogIndex, TemplateKind};

use crate::binder::{bind, BoundParams};
use crate::error::TemplateResult;
use crate::expander::TemplateExpander;

/// Output of a successful expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Full name of the prototype the query resolved to
    pub prototype: String,
    pub kind: TemplateKind,
    pub params: BoundParams,
    pub text: String,
}

/// Resolve `query`, bind `supplied` against the prototype and expand it as
/// `kind` for component `target`.
pub fn resolve_and_expand(
    query: &str,
    kind: TemplateKind,
    supplied: &HashMap<String, String>,
    target: &str,
    catalog: &CatalogIndex,
    expander: &TemplateExpander,
) -> TemplateResult<Expansion> {
    let proto = resolve(query, catalog)?;
    let params = bind(proto, supplied)?;
    let text = expander.expand(proto, kind, &params, target)?;

    info!("Expanded {} as {} for '{}'", proto.name, kind, target);
    Ok(Expansion {
        prototype: proto.name.clone(),
        kind,
        params,
        text,
    })
}
