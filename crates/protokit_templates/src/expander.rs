//! Template expansion.
//!
//! The expander picks the prototype body for the requested kind, assembles
//! the evaluator input and hands it off. Jsonnet bodies get a prelude that
//! binds `params` to the component's entry in the params external variable;
//! snippet bodies are evaluated directly against the bound parameters.

use regex::Regex;
use tracing::debug;

use protokit_catalog::{json_string, Prototype, TemplateKind, DEFAULT_PARAMS_EXT_VAR};

use crate::binder::BoundParams;
use crate::error::{TemplateError, TemplateResult};
use crate::evaluator::{BuiltinJsonnet, BuiltinSnippet, SnippetEvaluator, StructuredEvaluator};

/// Expands prototype bodies through a pair of evaluators.
pub struct TemplateExpander {
    structured: Box<dyn StructuredEvaluator>,
    snippet: Box<dyn SnippetEvaluator>,
    params_ext_var: String,
    identifier_pattern: Regex,
}

impl Default for TemplateExpander {
    fn default() -> Self {
        Self::new(Box::new(BuiltinJsonnet), Box::new(BuiltinSnippet))
    }
}

impl TemplateExpander {
    pub fn new(structured: Box<dyn StructuredEvaluator>, snippet: Box<dyn SnippetEvaluator>) -> Self {
        Self {
            structured,
            snippet,
            params_ext_var: DEFAULT_PARAMS_EXT_VAR.to_string(),
            identifier_pattern: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
                .expect("identifier pattern is valid"),
        }
    }

    /// Use a different external variable name in the Jsonnet prelude.
    pub fn with_params_ext_var(mut self, name: impl Into<String>) -> Self {
        self.params_ext_var = name.into();
        self
    }

    /// Expand `proto`'s `kind` body for the component `target`.
    pub fn expand(
        &self,
        proto: &Prototype,
        kind: TemplateKind,
        params: &BoundParams,
        target: &str,
    ) -> TemplateResult<String> {
        let body = proto
            .body(kind)
            .ok_or_else(|| TemplateError::UnsupportedRenderingKind {
                prototype: proto.name.clone(),
                kind,
            })?;

        debug!("Expanding {} as {} for '{}'", proto.name, kind, target);

        if kind.is_structured() {
            let mut source = vec![self.prelude(target)];
            source.extend(body.iter().cloned());
            Ok(self.structured.evaluate(&source.join("\n"), target)?)
        } else {
            Ok(self.snippet.render(&body.join("\n"), params)?)
        }
    }

    /// `local params = ...;` line selecting the component's params.
    pub fn prelude(&self, target: &str) -> String {
        let component = if self.identifier_pattern.is_match(target) {
            format!("components.{}", target)
        } else {
            format!("components[{}]", json_string(target))
        };
        format!(
            "local params = std.extVar({}).{};",
            json_string(&self.params_ext_var),
            component
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::bind;
    use crate::error::{EvalError, EvalResult};
    use mockall::mock;
    use mockall::predicate::{always, eq};
    use protokit_catalog::{ParamSchema, ParamType, PrototypeTemplate};
    use std::collections::HashMap;

    mock! {
        Structured {}
        impl StructuredEvaluator for Structured {
            fn evaluate(&self, source: &str, entity: &str) -> EvalResult<String>;
        }
    }

    mock! {
        Snippet {}
        impl SnippetEvaluator for Snippet {
            fn render(&self, source: &str, params: &BoundParams) -> EvalResult<String>;
        }
    }

    fn jsonnet_only() -> Prototype {
        Prototype::new(
            "io.x.prototype.simple-deployment",
            PrototypeTemplate {
                jsonnet_body: Some(vec!["{".to_string(), "  name: params.name,".to_string(), "}".to_string()]),
                ..Default::default()
            },
        )
        .with_param(ParamSchema::required("name", ParamType::String, "Name"))
    }

    fn bound(proto: &Prototype) -> BoundParams {
        let supplied: HashMap<String, String> =
            [("name".to_string(), "nginx".to_string())].into_iter().collect();
        bind(proto, &supplied).unwrap()
    }

    #[test]
    fn test_prelude_identifier_target() {
        let expander = TemplateExpander::default();
        assert_eq!(
            expander.prelude("nginx_depl"),
            r#"local params = std.extVar("__protokit/params").components.nginx_depl;"#
        );
    }

    #[test]
    fn test_prelude_non_identifier_target() {
        let expander = TemplateExpander::default().with_params_ext_var("params");
        assert_eq!(
            expander.prelude("nginx-depl"),
            r#"local params = std.extVar("params").components["nginx-depl"];"#
        );
        assert_eq!(
            expander.prelude("1st"),
            r#"local params = std.extVar("params").components["1st"];"#
        );
    }

    #[test]
    fn test_prelude_escapes_control_characters() {
        let expander = TemplateExpander::default().with_params_ext_var("a\tb");
        assert_eq!(
            expander.prelude("we\"b"),
            r#"local params = std.extVar("a\tb").components["we\"b"];"#
        );
    }

    #[test]
    fn test_structured_path_sends_prelude_and_body() {
        let proto = jsonnet_only();
        let mut structured = MockStructured::new();
        structured
            .expect_evaluate()
            .with(
                eq("local params = std.extVar(\"__protokit/params\").components.web;\n{\n  name: params.name,\n}"),
                eq("web"),
            )
            .times(1)
            .returning(|_, _| Ok("evaluated".to_string()));
        let mut snippet = MockSnippet::new();
        snippet.expect_render().never();

        let expander = TemplateExpander::new(Box::new(structured), Box::new(snippet));
        let out = expander
            .expand(&proto, TemplateKind::Jsonnet, &bound(&proto), "web")
            .unwrap();
        assert_eq!(out, "evaluated");
    }

    #[test]
    fn test_snippet_path_joins_body() {
        let mut proto = jsonnet_only();
        proto.template.yaml_body = Some(vec!["kind: Deployment".to_string(), "name: ${name}".to_string()]);

        let mut structured = MockStructured::new();
        structured.expect_evaluate().never();
        let mut snippet = MockSnippet::new();
        snippet
            .expect_render()
            .with(eq("kind: Deployment\nname: ${name}"), always())
            .times(1)
            .returning(|_, params| Ok(format!("rendered {}", params.get("name").unwrap_or(""))));

        let expander = TemplateExpander::new(Box::new(structured), Box::new(snippet));
        let out = expander
            .expand(&proto, TemplateKind::Yaml, &bound(&proto), "web")
            .unwrap();
        assert_eq!(out, "rendered \"nginx\"");
    }

    #[test]
    fn test_evaluator_failure_propagates_verbatim() {
        let proto = jsonnet_only();
        let failure = EvalError::Syntax {
            entity: "web".to_string(),
            line: 2,
            column: 3,
            message: "boom".to_string(),
        };
        let returned = failure.clone();
        let mut structured = MockStructured::new();
        structured
            .expect_evaluate()
            .returning(move |_, _| Err(returned.clone()));

        let expander = TemplateExpander::new(Box::new(structured), Box::new(MockSnippet::new()));
        match expander.expand(&proto, TemplateKind::Jsonnet, &bound(&proto), "web") {
            Err(TemplateError::Evaluation(err)) => assert_eq!(err, failure),
            other => panic!("expected evaluation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_kind() {
        let proto = jsonnet_only();
        let expander = TemplateExpander::default();
        match expander.expand(&proto, TemplateKind::Yaml, &bound(&proto), "web") {
            Err(TemplateError::UnsupportedRenderingKind { prototype, kind }) => {
                assert_eq!(prototype, proto.name);
                assert_eq!(kind, TemplateKind::Yaml);
            }
            other => panic!("expected unsupported kind, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_evaluators_end_to_end() {
        let mut proto = jsonnet_only();
        proto.template.json_body = Some(vec!["{ \"name\": ${name} }".to_string()]);
        let params = bound(&proto);
        let expander = TemplateExpander::default();

        let jsonnet = expander
            .expand(&proto, TemplateKind::Jsonnet, &params, "web")
            .unwrap();
        assert!(jsonnet.starts_with("local params = std.extVar"));
        assert!(jsonnet.ends_with("}"));

        let json = expander.expand(&proto, TemplateKind::Json, &params, "web").unwrap();
        assert_eq!(json, "{ \"name\": \"nginx\" }");
    }
}
