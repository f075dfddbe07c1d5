//! Parameter binding.
//!
//! Binding checks that every required parameter was supplied, fills in
//! defaults for optional ones, and quotes each value for its declared type.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use protokit_catalog::{ParamSchema, Prototype};

use crate::error::{TemplateError, TemplateResult};

/// Quoted parameter values ready for expansion, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundParams {
    values: BTreeMap<String, String>,
}

impl BoundParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

/// Bind `supplied` raw values against the parameters `proto` declares.
///
/// An empty supplied value counts as not supplied. Every missing required
/// parameter is reported at once. Names the prototype does not declare are
/// ignored.
pub fn bind(proto: &Prototype, supplied: &HashMap<String, String>) -> TemplateResult<BoundParams> {
    let mut values = BTreeMap::new();
    let mut missing = Vec::new();

    for param in proto.required_params().iter() {
        let Some(raw) = supplied_value(supplied, &param.name) else {
            missing.push(param.name.clone());
            continue;
        };
        check_duplicate(proto, &values, param)?;
        values.insert(param.name.clone(), quote(param, raw)?);
    }

    if !missing.is_empty() {
        return Err(TemplateError::MissingRequiredParameters {
            prototype: proto.name.clone(),
            missing,
        });
    }

    for param in proto.optional_params().iter() {
        check_duplicate(proto, &values, param)?;
        // Optional params always carry a default.
        let raw = supplied_value(supplied, &param.name)
            .or(param.default.as_deref())
            .unwrap_or_default();
        values.insert(param.name.clone(), quote(param, raw)?);
    }

    debug!("Bound {} parameter(s) for {}", values.len(), proto.name);
    Ok(BoundParams { values })
}

fn supplied_value<'a>(supplied: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    supplied
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn check_duplicate(
    proto: &Prototype,
    values: &BTreeMap<String, String>,
    param: &ParamSchema,
) -> TemplateResult<()> {
    if values.contains_key(&param.name) {
        return Err(TemplateError::DuplicateParameter {
            prototype: proto.name.clone(),
            param: param.name.clone(),
        });
    }
    Ok(())
}

fn quote(param: &ParamSchema, raw: &str) -> TemplateResult<String> {
    param
        .quote(raw)
        .map_err(|e| TemplateError::InvalidParameterValue {
            param: param.name.clone(),
            value: raw.to_string(),
            reason: e.reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use protokit_catalog::{ParamType, PrototypeTemplate};

    fn simple_deployment() -> Prototype {
        Prototype::new(
            "io.x.prototype.simple-deployment",
            PrototypeTemplate {
                jsonnet_body: Some(vec!["{}".to_string()]),
                ..Default::default()
            },
        )
        .with_param(ParamSchema::required("name", ParamType::String, "Name"))
        .with_param(ParamSchema::required("image", ParamType::String, "Image"))
        .with_param(ParamSchema::optional("port", ParamType::Number, "80", "Port"))
    }

    fn supplied(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bind_fills_defaults() {
        let bound = bind(
            &simple_deployment(),
            &supplied(&[("name", "nginx"), ("image", "nginx")]),
        )
        .unwrap();
        assert_eq!(bound.names(), vec!["image", "name", "port"]);
        assert_eq!(bound.get("name"), Some("\"nginx\""));
        assert_eq!(bound.get("image"), Some("\"nginx\""));
        assert_eq!(bound.get("port"), Some("80"));
    }

    #[test]
    fn test_supplied_optional_overrides_default() {
        let bound = bind(
            &simple_deployment(),
            &supplied(&[("name", "web"), ("image", "httpd"), ("port", "8080")]),
        )
        .unwrap();
        assert_eq!(bound.get("port"), Some("8080"));
    }

    #[test]
    fn test_missing_required_reports_all_in_order() {
        match bind(&simple_deployment(), &supplied(&[("port", "81")])) {
            Err(TemplateError::MissingRequiredParameters { prototype, missing }) => {
                assert_eq!(prototype, "io.x.prototype.simple-deployment");
                assert_eq!(missing, vec!["name", "image"]);
            }
            other => panic!("expected missing parameters, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        match bind(
            &simple_deployment(),
            &supplied(&[("name", "nginx"), ("image", "")]),
        ) {
            Err(TemplateError::MissingRequiredParameters { missing, .. }) => {
                assert_eq!(missing, vec!["image"]);
            }
            other => panic!("expected missing parameters, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_optional_value_uses_default() {
        let bound = bind(
            &simple_deployment(),
            &supplied(&[("name", "a"), ("image", "b"), ("port", "")]),
        )
        .unwrap();
        assert_eq!(bound.get("port"), Some("80"));
    }

    #[test]
    fn test_duplicate_between_required_and_optional() {
        let proto = simple_deployment().with_param(ParamSchema::optional(
            "name",
            ParamType::String,
            "x",
            "Shadowing name",
        ));
        match bind(&proto, &supplied(&[("name", "a"), ("image", "b")])) {
            Err(TemplateError::DuplicateParameter { param, .. }) => assert_eq!(param, "name"),
            other => panic!("expected duplicate parameter, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_required_parameter() {
        let proto = simple_deployment().with_param(ParamSchema::required(
            "image",
            ParamType::String,
            "Again",
        ));
        assert!(matches!(
            bind(&proto, &supplied(&[("name", "a"), ("image", "b")])),
            Err(TemplateError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_value() {
        match bind(
            &simple_deployment(),
            &supplied(&[("name", "a"), ("image", "b"), ("port", "http")]),
        ) {
            Err(TemplateError::InvalidParameterValue { param, value, .. }) => {
                assert_eq!(param, "port");
                assert_eq!(value, "http");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_default_is_reported() {
        let proto = simple_deployment().with_param(ParamSchema::optional(
            "replicas",
            ParamType::Number,
            "many",
            "Replicas",
        ));
        assert!(matches!(
            bind(&proto, &supplied(&[("name", "a"), ("image", "b")])),
            Err(TemplateError::InvalidParameterValue { .. })
        ));
    }

    #[test]
    fn test_undeclared_names_are_ignored() {
        let bound = bind(
            &simple_deployment(),
            &supplied(&[("name", "a"), ("image", "b"), ("extra", "c")]),
        )
        .unwrap();
        assert!(!bound.contains("extra"));
    }

    #[test]
    fn test_binding_is_idempotent() {
        let proto = simple_deployment();
        let values = supplied(&[("name", "a \"b\""), ("image", "c")]);
        let first = bind(&proto, &values).unwrap();
        let second = bind(&proto, &values).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            format!("{:?}", first.as_map()),
            format!("{:?}", second.as_map())
        );
    }
}
