//! Prototype parameter flags.
//!
//! Parameters are not known until the prototype has been resolved, so the
//! commands that take them collect their arguments raw and split them here:
//! positionals, `--name=value` / `--name value` pairs, `--help`, and the
//! switches that may also appear after the query (`-v`, `-q`, `--force`).
//! Those switch names are therefore not usable as bare parameter flags.

use std::collections::HashMap;

use thiserror::Error;

use protokit_catalog::{Description, Prototype};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlagError {
    #[error("Flag '--{0}' requires a value")]
    MissingValue(String),

    #[error("Malformed flag '{0}'")]
    MalformedFlag(String),

    #[error("Unknown flag '--{flag}' for prototype '{prototype}'; see '--help' for its parameters")]
    UnknownFlag { flag: String, prototype: String },

    #[error("Flag '--{0}' was supplied more than once")]
    RepeatedFlag(String),

    #[error("Missing required argument <{0}>")]
    MissingArgument(&'static str),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Arguments split into positionals and parameter flags, in command-line order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RawArgs {
    pub positionals: Vec<String>,
    pub flags: Vec<(String, String)>,
    pub help: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub force: bool,
}

impl RawArgs {
    /// Split raw command-line arguments.
    ///
    /// Every `--name` flag other than the switches takes a value; `--` ends
    /// flag parsing.
    pub fn parse(args: &[String]) -> Result<Self, FlagError> {
        let mut raw = RawArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--" => {
                    raw.positionals.extend(iter.by_ref().cloned());
                }
                "--help" | "-h" => raw.help = true,
                "--verbose" | "-v" => raw.verbose = true,
                "--quiet" | "-q" => raw.quiet = true,
                "--force" => raw.force = true,
                _ if arg.starts_with("--") => {
                    let body = &arg[2..];
                    let (name, value) = match body.split_once('=') {
                        Some((name, value)) => (name, value.to_string()),
                        None => {
                            let value = iter
                                .next()
                                .ok_or_else(|| FlagError::MissingValue(body.to_string()))?;
                            (body, value.clone())
                        }
                    };
                    if name.is_empty() {
                        return Err(FlagError::MalformedFlag(arg.clone()));
                    }
                    raw.flags.push((name.to_string(), value));
                }
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(FlagError::MalformedFlag(arg.clone()));
                }
                _ => raw.positionals.push(arg.clone()),
            }
        }

        Ok(raw)
    }

    /// Positional argument `index`, or `MissingArgument(name)`.
    pub fn positional(&self, index: usize, name: &'static str) -> Result<&str, FlagError> {
        self.positionals
            .get(index)
            .map(String::as_str)
            .ok_or(FlagError::MissingArgument(name))
    }

    /// Fail if more than `max` positionals were given.
    pub fn expect_at_most(&self, max: usize) -> Result<(), FlagError> {
        match self.positionals.get(max) {
            Some(extra) => Err(FlagError::UnexpectedArgument(extra.clone())),
            None => Ok(()),
        }
    }

    /// Flag values keyed by parameter name.
    ///
    /// Every flag must name one of `proto`'s parameters and appear at most once.
    pub fn param_values(&self, proto: &Prototype) -> Result<HashMap<String, String>, FlagError> {
        let mut values = HashMap::new();
        for (name, value) in &self.flags {
            if !proto.params.iter().any(|p| &p.name == name) {
                return Err(FlagError::UnknownFlag {
                    flag: name.clone(),
                    prototype: proto.name.clone(),
                });
            }
            if values.insert(name.clone(), value.clone()).is_some() {
                return Err(FlagError::RepeatedFlag(name.clone()));
            }
        }
        Ok(values)
    }
}

/// Usage line followed by the prototype's parameters, when one was named.
pub fn help_text(usage: &str, description: Option<&Description>) -> String {
    match description {
        Some(description) => format!("Usage: {}\n\n{}", usage, description),
        None => format!(
            "Usage: {}\n\nRun 'protokit prototype list' to see available prototypes.",
            usage
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protokit_catalog::{ParamSchema, ParamType, PrototypeTemplate};

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn deployment() -> Prototype {
        Prototype::new("io.x.prototype.simple-deployment", PrototypeTemplate::default())
            .with_param(ParamSchema::required("name", ParamType::String, "Name"))
            .with_param(ParamSchema::required("image", ParamType::String, "Image"))
            .with_param(ParamSchema::optional("replicas", ParamType::Number, "1", "Replicas"))
    }

    #[test]
    fn test_equals_and_separate_values() {
        let raw = RawArgs::parse(&args(&[
            "simple-deployment",
            "--name=nginx",
            "yaml",
            "--image",
            "nginx:1.25",
        ]))
        .unwrap();

        assert_eq!(raw.positionals, vec!["simple-deployment", "yaml"]);
        assert_eq!(
            raw.flags,
            vec![
                ("name".to_string(), "nginx".to_string()),
                ("image".to_string(), "nginx:1.25".to_string()),
            ]
        );
        assert!(!raw.help);
    }

    #[test]
    fn test_value_may_look_like_a_flag() {
        let raw = RawArgs::parse(&args(&["q", "--name", "--weird"])).unwrap();
        assert_eq!(raw.flags, vec![("name".to_string(), "--weird".to_string())]);
    }

    #[test]
    fn test_empty_value_and_equals_in_value() {
        let raw = RawArgs::parse(&args(&["q", "--name=", "--selector={a: b=c}"])).unwrap();
        assert_eq!(raw.flags[0], ("name".to_string(), String::new()));
        assert_eq!(raw.flags[1], ("selector".to_string(), "{a: b=c}".to_string()));
    }

    #[test]
    fn test_help_flag() {
        assert!(RawArgs::parse(&args(&["q", "--help"])).unwrap().help);
        assert!(RawArgs::parse(&args(&["-h"])).unwrap().help);
    }

    #[test]
    fn test_switches_after_query() {
        let raw = RawArgs::parse(&args(&["q", "web", "-v", "--name=web", "--force", "-q"])).unwrap();
        assert!(raw.verbose && raw.quiet && raw.force);
        assert_eq!(raw.positionals, vec!["q", "web"]);
        assert_eq!(raw.flags, vec![("name".to_string(), "web".to_string())]);
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let raw = RawArgs::parse(&args(&["q", "--", "--name"])).unwrap();
        assert_eq!(raw.positionals, vec!["q", "--name"]);
        assert!(raw.flags.is_empty());
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            RawArgs::parse(&args(&["q", "--name"])),
            Err(FlagError::MissingValue("name".to_string()))
        );
    }

    #[test]
    fn test_malformed_flags() {
        assert!(matches!(
            RawArgs::parse(&args(&["q", "--=x"])),
            Err(FlagError::MalformedFlag(_))
        ));
        assert!(matches!(
            RawArgs::parse(&args(&["q", "-n", "x"])),
            Err(FlagError::MalformedFlag(_))
        ));
    }

    #[test]
    fn test_param_values() {
        let raw = RawArgs::parse(&args(&["q", "--name=web", "--replicas", "3"])).unwrap();
        let values = raw.param_values(&deployment()).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values["name"], "web");
        assert_eq!(values["replicas"], "3");
    }

    #[test]
    fn test_unknown_flag() {
        let raw = RawArgs::parse(&args(&["q", "--port=80"])).unwrap();
        assert_eq!(
            raw.param_values(&deployment()),
            Err(FlagError::UnknownFlag {
                flag: "port".to_string(),
                prototype: "io.x.prototype.simple-deployment".to_string(),
            })
        );
    }

    #[test]
    fn test_repeated_flag() {
        let raw = RawArgs::parse(&args(&["q", "--name=a", "--name", "b"])).unwrap();
        assert_eq!(
            raw.param_values(&deployment()),
            Err(FlagError::RepeatedFlag("name".to_string()))
        );
    }

    #[test]
    fn test_help_text_lists_parameters() {
        let description = Description::from(&deployment());
        let text = help_text("protokit prototype preview <query>", Some(&description));
        assert!(text.starts_with("Usage: protokit prototype preview <query>\n\nPROTOTYPE NAME:"));
        assert!(text.contains("--image"));
        assert!(text.contains("[default: 1, type: number]"));

        let text = help_text("protokit prototype preview <query>", None);
        assert!(text.contains("prototype list"));
    }

    #[test]
    fn test_positional_helpers() {
        let raw = RawArgs::parse(&args(&["q", "web", "yaml", "extra"])).unwrap();
        assert_eq!(raw.positional(1, "component").unwrap(), "web");
        assert_eq!(
            raw.positional(4, "kind"),
            Err(FlagError::MissingArgument("kind"))
        );
        assert_eq!(
            raw.expect_at_most(3),
            Err(FlagError::UnexpectedArgument("extra".to_string()))
        );
        assert!(raw.expect_at_most(4).is_ok());
    }
}
