//! Listing, search and describe operations over a catalog.
//!
//! These return text (or a displayable value) for the command layer to print.

use std::fmt;

use crate::error::{CatalogError, CatalogResult};
use crate::index::{CatalogIndex, SearchMode};
use crate::prototype::{Prototype, TemplateKind};
use crate::param::ParamSchemas;
use crate::resolver::resolve;

/// Every prototype in the catalog as a NAME / DESCRIPTION table.
pub fn list(catalog: &CatalogIndex) -> CatalogResult<String> {
    let all: Vec<&Prototype> = catalog.list().iter().collect();
    if all.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }
    Ok(format_table(&all))
}

/// Prototypes matching `query` under `mode`, as a table.
pub fn search(query: &str, mode: SearchMode, catalog: &CatalogIndex) -> CatalogResult<String> {
    let found = catalog.search(query, mode);
    if found.is_empty() {
        return Err(CatalogError::NoResults {
            query: query.to_string(),
        });
    }
    Ok(format_table(&found))
}

/// Details of the prototype `query` resolves to.
pub fn describe(query: &str, catalog: &CatalogIndex) -> CatalogResult<Description> {
    let proto = resolve(query, catalog)?;
    Ok(Description::from(proto))
}

/// Render prototypes as an aligned two-column table.
pub fn format_table(prototypes: &[&Prototype]) -> String {
    let width = prototypes
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    out.push_str(&format!("{:<width$}  DESCRIPTION\n", "NAME", width = width));
    out.push_str(&format!("{:<width$}  -----------\n", "----", width = width));
    for proto in prototypes {
        let line = format!(
            "{:<width$}  {}",
            proto.name,
            proto.short_description(),
            width = width
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Everything `describe` reports about one prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub name: String,
    pub description: String,
    pub required: ParamSchemas,
    pub optional: ParamSchemas,
    pub kinds: Vec<TemplateKind>,
}

impl From<&Prototype> for Description {
    fn from(proto: &Prototype) -> Self {
        Self {
            name: proto.name.clone(),
            description: proto.description().to_string(),
            required: proto.required_params(),
            optional: proto.optional_params(),
            kinds: proto.available_kinds(),
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.kinds.iter().map(TemplateKind::as_str).collect();

        writeln!(f, "PROTOTYPE NAME:")?;
        writeln!(f, "{}", self.name)?;
        writeln!(f)?;
        writeln!(f, "DESCRIPTION:")?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "REQUIRED PARAMETERS:")?;
        writeln!(f, "{}", self.required.pretty_string("  "))?;
        writeln!(f)?;
        writeln!(f, "OPTIONAL PARAMETERS:")?;
        writeln!(f, "{}", self.optional.pretty_string("  "))?;
        writeln!(f)?;
        writeln!(f, "TEMPLATE TYPES AVAILABLE:")?;
        write!(f, "  [{}]", kinds.join(" "))
    }
}
