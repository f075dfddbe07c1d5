//! Evaluator seams used by the expander.
//!
//! The expander only assembles source text; these traits do the evaluation.
//! [`JsonnetSource`](crate::jsonnet::JsonnetSource) and
//! [`SnippetTemplate`](crate::snippet::SnippetTemplate) are the built-in
//! implementations.

use crate::binder::BoundParams;
use crate::error::EvalResult;
use crate::jsonnet::JsonnetSource;
use crate::snippet::SnippetTemplate;

/// Evaluates structured (Jsonnet) template source.
pub trait StructuredEvaluator {
    /// Evaluate `source`; `entity` names the component in diagnostics.
    fn evaluate(&self, source: &str, entity: &str) -> EvalResult<String>;
}

/// Parses and evaluates plain-text snippets against bound parameters.
pub trait SnippetEvaluator {
    fn render(&self, source: &str, params: &BoundParams) -> EvalResult<String>;
}

/// Built-in structured evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinJsonnet;

impl StructuredEvaluator for BuiltinJsonnet {
    fn evaluate(&self, source: &str, entity: &str) -> EvalResult<String> {
        JsonnetSource::parse(entity, source).map(|doc| doc.format())
    }
}

/// Built-in snippet evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSnippet;

impl SnippetEvaluator for BuiltinSnippet {
    fn render(&self, source: &str, params: &BoundParams) -> EvalResult<String> {
        SnippetTemplate::parse(source)?.evaluate(params)
    }
}
