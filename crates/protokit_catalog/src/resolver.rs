//! Resolution of partial prototype names.
//!
//! Users may type any suffix of a dotted prototype name. A unique suffix
//! match wins; several suffix matches are ambiguous. When nothing ends with
//! the query, substring matches are reported as hints but never selected.

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::index::{CatalogIndex, SearchMode};
use crate::prototype::Prototype;

/// Resolve `query` to exactly one prototype in `catalog`.
pub fn resolve<'a>(query: &str, catalog: &'a CatalogIndex) -> CatalogResult<&'a Prototype> {
    let suffix_matches = catalog.search(query, SearchMode::Suffix);

    match suffix_matches.as_slice() {
        [single] => {
            debug!("Resolved '{}' to {}", query, single.name);
            Ok(*single)
        }
        [_, _, ..] => Err(CatalogError::AmbiguousMatch {
            query: query.to_string(),
            candidates: names(&suffix_matches),
        }),
        [] => {
            let partial = catalog.search(query, SearchMode::Substring);
            if partial.is_empty() {
                Err(CatalogError::NoMatch {
                    query: query.to_string(),
                })
            } else {
                Err(CatalogError::NoExactMatch {
                    query: query.to_string(),
                    candidates: names(&partial),
                })
            }
        }
    }
}

pub(crate) fn names(prototypes: &[&Prototype]) -> Vec<String> {
    prototypes.iter().map(|p| p.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::PrototypeTemplate;

    fn catalog(names: &[&str]) -> CatalogIndex {
        CatalogIndex::new(
            names
                .iter()
                .map(|n| {
                    Prototype::new(
                        *n,
                        PrototypeTemplate {
                            jsonnet_body: Some(vec!["{}".to_string()]),
                            ..Default::default()
                        },
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_unique_suffix_resolves() {
        let catalog = catalog(&[
            "io.x.prototype.simple-deployment",
            "io.x.prototype.multi-port-deployment",
        ]);
        let proto = resolve("simple-deployment", &catalog).unwrap();
        assert_eq!(proto.name, "io.x.prototype.simple-deployment");
    }

    #[test]
    fn test_shared_suffix_is_ambiguous() {
        let catalog = catalog(&[
            "io.x.prototype.simple-deployment",
            "io.x.prototype.service",
            "io.x.prototype.multi-port-deployment",
        ]);
        match resolve("deployment", &catalog) {
            Err(CatalogError::AmbiguousMatch { query, candidates }) => {
                assert_eq!(query, "deployment");
                assert_eq!(
                    candidates,
                    vec![
                        "io.x.prototype.simple-deployment",
                        "io.x.prototype.multi-port-deployment"
                    ]
                );
            }
            other => panic!("expected ambiguous match, got {:?}", other),
        }
    }

    #[test]
    fn test_suffix_wins_over_substring_hits() {
        // "service" is a substring of the first name but only a suffix of the second.
        let catalog = catalog(&["io.x.service-account", "io.x.service"]);
        let proto = resolve("service", &catalog).unwrap();
        assert_eq!(proto.name, "io.x.service");
    }

    #[test]
    fn test_single_substring_hit_is_not_selected() {
        let catalog = catalog(&["io.x.prototype.simple-deployment"]);
        match resolve("simple", &catalog) {
            Err(CatalogError::NoExactMatch { candidates, .. }) => {
                assert_eq!(candidates, vec!["io.x.prototype.simple-deployment"]);
            }
            other => panic!("expected partial match error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match() {
        let catalog = catalog(&["io.x.prototype.simple-deployment"]);
        assert!(matches!(
            resolve("statefulset", &catalog),
            Err(CatalogError::NoMatch { .. })
        ));
        assert!(matches!(
            resolve("anything", &CatalogIndex::default()),
            Err(CatalogError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_full_name_resolves() {
        let catalog = catalog(&["io.x.a", "io.x.b"]);
        assert_eq!(resolve("io.x.b", &catalog).unwrap().name, "io.x.b");
    }
}
