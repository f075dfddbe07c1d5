//! Header-annotated Jsonnet prototypes.
//!
//! A `.jsonnet` prototype declares its metadata in a leading block of `//`
//! comments and uses the rest of the file as its Jsonnet body:
//!
//! ```text
//! // @apiVersion 0.0.1
//! // @name io.protokit.pkg.prototype.namespace
//! // @description A namespace
//! // @param name string Name of the namespace
//! // @optionalParam labels object {} Labels to attach
//! {
//!   apiVersion: "v1",
//!   kind: "Namespace",
//!   metadata: { name: params.name, labels: params.labels },
//! }
//! ```

use crate::param::{ParamSchema, ParamType};
use crate::prototype::{Prototype, PrototypeTemplate};

/// Parse a header-annotated Jsonnet prototype.
///
/// Errors are plain messages; the caller attaches the file path.
pub fn parse_jsonnet_prototype(source: &str) -> Result<Prototype, String> {
    let mut name: Option<String> = None;
    let mut api_version: Option<String> = None;
    let mut description = String::new();
    let mut short_description: Option<String> = None;
    let mut params = Vec::new();

    let lines: Vec<&str> = source.lines().collect();
    let mut body_start = lines.len();
    let mut in_header = false;

    // Comments before the first directive are skipped. Once a directive has
    // been seen, the first line that is not one starts the body.
    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        let directive = line
            .strip_prefix("//")
            .map(str::trim)
            .and_then(|comment| comment.strip_prefix('@'));
        let Some(directive) = directive else {
            if in_header || !(line.is_empty() || line.starts_with("//")) {
                body_start = i;
                break;
            }
            continue;
        };
        in_header = true;

        let (key, rest) = split_word(directive);
        match key {
            "apiVersion" => api_version = Some(rest.to_string()),
            "name" => name = Some(rest.to_string()),
            "description" => description = rest.to_string(),
            "shortDescription" => short_description = Some(rest.to_string()),
            "param" => params.push(parse_param(rest, false, i + 1)?),
            "optionalParam" => params.push(parse_param(rest, true, i + 1)?),
            other => return Err(format!("line {}: unknown directive '@{}'", i + 1, other)),
        }
    }

    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return Err("missing '@name' directive".to_string()),
    };

    let body: Vec<String> = lines[body_start..]
        .iter()
        .skip_while(|l| l.trim().is_empty())
        .map(|l| l.to_string())
        .collect();
    if body.iter().all(|l| l.trim().is_empty()) {
        return Err(format!("prototype '{}' has an empty body", name));
    }

    let mut proto = Prototype::new(
        name,
        PrototypeTemplate {
            description,
            short_description,
            jsonnet_body: Some(body),
            ..Default::default()
        },
    );
    if let Some(version) = api_version {
        proto.api_version = version;
    }
    proto.params = params;
    Ok(proto)
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim()),
        None => (s, ""),
    }
}

fn parse_param(rest: &str, optional: bool, line: usize) -> Result<ParamSchema, String> {
    let (name, rest) = split_word(rest);
    let (type_name, rest) = split_word(rest);
    if name.is_empty() || type_name.is_empty() {
        return Err(format!("line {}: parameter needs a name and a type", line));
    }
    let param_type: ParamType = type_name
        .parse()
        .map_err(|e| format!("line {}: {}", line, e))?;

    if optional {
        let (default, description) = split_word(rest);
        if default.is_empty() {
            return Err(format!("line {}: optional parameter '{}' needs a default", line, name));
        }
        Ok(ParamSchema::optional(name, param_type, default, description))
    } else {
        Ok(ParamSchema::required(name, param_type, rest))
    }
}
