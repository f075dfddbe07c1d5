//! Prototypes shipped with protokit.
//!
//! These are always present in the index; a project prototype with the same
//! name replaces the built-in one.

use crate::param::{ParamSchema, ParamType};
use crate::prototype::{Prototype, PrototypeTemplate};

pub const SIMPLE_DEPLOYMENT: &str = "io.protokit.pkg.prototype.simple-deployment";
pub const SINGLE_PORT_SERVICE: &str = "io.protokit.pkg.prototype.single-port-service";
pub const NAMESPACE: &str = "io.protokit.pkg.prototype.namespace";

const DEPLOYMENT_JSONNET: &str = r#"{
  apiVersion: "apps/v1",
  kind: "Deployment",
  metadata: { name: params.name },
  spec: {
    replicas: params.replicas,
    template: {
      metadata: { labels: { app: params.name } },
      spec: {
        containers: [
          {
            name: params.name,
            image: params.image,
            ports: [{ containerPort: params.containerPort }],
          },
        ],
      },
    },
  },
}"#;

const DEPLOYMENT_YAML: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: ${name}
spec:
  replicas: ${replicas}
  template:
    metadata:
      labels:
        app: ${name}
    spec:
      containers:
      - name: ${name}
        image: ${image}
        ports:
        - containerPort: ${containerPort}"#;

const DEPLOYMENT_JSON: &str = r#"{
  "apiVersion": "apps/v1",
  "kind": "Deployment",
  "metadata": { "name": ${name} },
  "spec": {
    "replicas": ${replicas},
    "template": {
      "metadata": { "labels": { "app": ${name} } },
      "spec": {
        "containers": [
          { "name": ${name}, "image": ${image}, "ports": [{ "containerPort": ${containerPort} }] }
        ]
      }
    }
  }
}"#;

const SERVICE_JSONNET: &str = r#"{
  apiVersion: "v1",
  kind: "Service",
  metadata: { name: params.name },
  spec: {
    ports: [{ port: params.servicePort, targetPort: params.targetPort }],
    selector: params.selector,
    type: params.type,
  },
}"#;

const SERVICE_YAML: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: ${name}
spec:
  ports:
  - port: ${servicePort}
    targetPort: ${targetPort}
  selector: ${selector}
  type: ${type}"#;

const NAMESPACE_JSONNET: &str = r#"{
  apiVersion: "v1",
  kind: "Namespace",
  metadata: { name: params.name },
}"#;

const NAMESPACE_YAML: &str = r#"apiVersion: v1
kind: Namespace
metadata:
  name: ${name}"#;

fn lines(text: &str) -> Option<Vec<String>> {
    Some(text.lines().map(str::to_string).collect())
}

/// All built-in prototypes, in listing order.
pub fn prototypes() -> Vec<Prototype> {
    vec![simple_deployment(), single_port_service(), namespace()]
}

fn simple_deployment() -> Prototype {
    Prototype::new(
        SIMPLE_DEPLOYMENT,
        PrototypeTemplate {
            description: "A deployment that replicates a single container image, \
                          optionally exposing one container port."
                .to_string(),
            short_description: Some("A deployment exposing a single container port.".to_string()),
            jsonnet_body: lines(DEPLOYMENT_JSONNET),
            json_body: lines(DEPLOYMENT_JSON),
            yaml_body: lines(DEPLOYMENT_YAML),
        },
    )
    .with_param(ParamSchema::required(
        "name",
        ParamType::String,
        "Name of the deployment and its pods",
    ))
    .with_param(ParamSchema::required(
        "image",
        ParamType::String,
        "Container image to deploy",
    ))
    .with_param(ParamSchema::optional(
        "replicas",
        ParamType::Number,
        "1",
        "Number of replicas",
    ))
    .with_param(ParamSchema::optional(
        "containerPort",
        ParamType::Number,
        "80",
        "Port exposed by the container",
    ))
}

fn single_port_service() -> Prototype {
    Prototype::new(
        SINGLE_PORT_SERVICE,
        PrototypeTemplate {
            description: "A service that routes a single port to pods matching a label selector."
                .to_string(),
            short_description: None,
            jsonnet_body: lines(SERVICE_JSONNET),
            json_body: None,
            yaml_body: lines(SERVICE_YAML),
        },
    )
    .with_param(ParamSchema::required("name", ParamType::String, "Name of the service"))
    .with_param(ParamSchema::required(
        "selector",
        ParamType::Object,
        "Label selector for target pods, e.g. {app: \"nginx\"}",
    ))
    .with_param(ParamSchema::optional(
        "servicePort",
        ParamType::Number,
        "80",
        "Port the service listens on",
    ))
    .with_param(ParamSchema::optional(
        "targetPort",
        ParamType::NumberOrString,
        "80",
        "Container port or port name to route to",
    ))
    .with_param(ParamSchema::optional(
        "type",
        ParamType::String,
        "ClusterIP",
        "Service type",
    ))
}

fn namespace() -> Prototype {
    Prototype::new(
        NAMESPACE,
        PrototypeTemplate {
            description: "A namespace.".to_string(),
            short_description: None,
            jsonnet_body: lines(NAMESPACE_JSONNET),
            json_body: None,
            yaml_body: lines(NAMESPACE_YAML),
        },
    )
    .with_param(ParamSchema::required("name", ParamType::String, "Name of the namespace"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_valid_and_unique() {
        let protos = prototypes();
        for proto in &protos {
            proto.validate().unwrap();
        }
        let mut names: Vec<_> = protos.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), protos.len());
    }

    #[test]
    fn test_defaults_quote_cleanly() {
        for proto in prototypes() {
            for param in proto.optional_params().iter() {
                let default = param.default.as_deref().unwrap();
                assert!(
                    param.quote(default).is_ok(),
                    "{}: default for {} does not quote",
                    proto.name,
                    param.name
                );
            }
        }
    }
}
