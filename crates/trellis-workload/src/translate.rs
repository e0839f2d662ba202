//! Translation stages over rendered workload children
//!
//! A translator is a pure function from `(workload identity, rendered
//! children)` to a new list of rendered children. Stages share one data
//! shape so a reconciler can apply a configurable ordered list of them to a
//! rendering pipeline's output before persisting results:
//!
//! ```text
//! render children -> AppBundler (or not) -> ServiceInjector (or not) -> persist
//! ```
//!
//! Translators never mutate their inputs and hold no state between calls.
//! Given identical inputs they produce byte-identical outputs, which the
//! reconciler relies on when diffing desired against observed state.

use tracing::debug;
use trellis_common::meta::{HasTypeMeta, ObjectMeta};
use trellis_common::{Error, Result, WORKLOAD_UID_LABEL};

use crate::bundle::{
    ApplicationBundle, ApplicationBundleSpec, ResourceTemplate, ResourceTemplateSpec,
};
use crate::identity::WorkloadIdentity;
use crate::k8s::{Service, ServicePort, ServiceSpec};
use crate::payload::RawPayload;
use crate::rendered::RenderedObject;

/// Service type for injected services: externally load-balanced
const SERVICE_TYPE_LOAD_BALANCER: &str = "LoadBalancer";

/// A single translation stage.
///
/// Implementations must be pure: no shared mutable state, no I/O, and no
/// mutation of the input objects. The same inputs must always produce the
/// same outputs.
pub trait Translate: Send + Sync {
    /// Stage name for logs and status messages
    fn name(&self) -> &'static str;

    /// Translate the rendered children of one workload.
    ///
    /// An empty input is a no-op signal, not a failure: stages return an
    /// empty list and no error.
    fn translate(
        &self,
        workload: &WorkloadIdentity,
        objects: Vec<RenderedObject>,
    ) -> Result<Vec<RenderedObject>>;
}

// =============================================================================
// AppBundler
// =============================================================================

/// Packages every rendered child as a named template entry inside one
/// distributable [`ApplicationBundle`].
///
/// Each template freezes the exact serialized bytes of its child at
/// construction time, so later changes to the rendered value cannot leak
/// into a bundle that was already built.
#[derive(Clone, Debug)]
pub struct AppBundler {
    label_key: String,
}

impl Default for AppBundler {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBundler {
    /// Create a bundler using the default correlation label key
    pub fn new() -> Self {
        Self {
            label_key: WORKLOAD_UID_LABEL.to_string(),
        }
    }

    /// Use an alternative correlation label key
    pub fn with_label_key(mut self, key: impl Into<String>) -> Self {
        self.label_key = key.into();
        self
    }
}

impl Translate for AppBundler {
    fn name(&self) -> &'static str {
        "app-bundler"
    }

    fn translate(
        &self,
        workload: &WorkloadIdentity,
        objects: Vec<RenderedObject>,
    ) -> Result<Vec<RenderedObject>> {
        if objects.is_empty() {
            return Ok(objects);
        }

        let mut templates = Vec::with_capacity(objects.len());
        for object in &objects {
            // Snapshot before building the template; any failure aborts the
            // whole call so a partial bundle is never returned.
            let raw = object.to_bytes()?;
            let name = format!("{}-{}", workload.name(), object.kind().to_ascii_lowercase());
            templates.push(ResourceTemplate {
                metadata: ObjectMeta::new(name).with_label(&self.label_key, workload.uid()),
                spec: ResourceTemplateSpec {
                    template: RawPayload::from_bytes(raw),
                },
            });
        }

        debug!(
            workload = %workload.name(),
            templates = templates.len(),
            "bundled rendered children"
        );

        let bundle = ApplicationBundle {
            api_version: ApplicationBundle::API_VERSION.to_string(),
            kind: ApplicationBundle::KIND.to_string(),
            metadata: ObjectMeta::new(workload.name()),
            spec: ApplicationBundleSpec {
                resource_selector: workload.selector(&self.label_key),
                resource_templates: templates,
            },
        };

        Ok(vec![RenderedObject::Bundle(bundle)])
    }
}

// =============================================================================
// ServiceInjector
// =============================================================================

/// Derives and appends a load-balanced Service exposing the first declared
/// container port found among the rendered children.
///
/// The selection policy is a single linear pass with short-circuit at each
/// nesting level: first deployment that exposes any port, its first
/// container that declares one, that container's first declared port. This
/// guarantees a single, reproducible choice for workloads that declare no
/// explicit exposure intent; multi-port exposure is left to an explicit API.
#[derive(Clone, Debug)]
pub struct ServiceInjector {
    label_key: String,
}

impl Default for ServiceInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceInjector {
    /// Create an injector using the default correlation label key
    pub fn new() -> Self {
        Self {
            label_key: WORKLOAD_UID_LABEL.to_string(),
        }
    }

    /// Use an alternative correlation label key
    pub fn with_label_key(mut self, key: impl Into<String>) -> Self {
        self.label_key = key.into();
        self
    }
}

impl Translate for ServiceInjector {
    fn name(&self) -> &'static str {
        "service-injector"
    }

    fn translate(
        &self,
        workload: &WorkloadIdentity,
        mut objects: Vec<RenderedObject>,
    ) -> Result<Vec<RenderedObject>> {
        if objects.is_empty() {
            return Ok(objects);
        }

        let port = {
            let selected = objects
                .iter()
                .filter_map(RenderedObject::as_deployment)
                .find(|d| d.exposes_ports());
            let Some(deployment) = selected else {
                debug!(workload = %workload.name(), "no exposable port, skipping injection");
                return Ok(objects);
            };
            // Selection committed: the deployment claimed it exposes ports,
            // so failing to produce one is a contract violation.
            deployment
                .first_declared_port()
                .map(|p| p.container_port)
                .ok_or_else(|| {
                    Error::structural_for(
                        workload.name(),
                        "selected deployment yielded no container port",
                    )
                })?
        };

        debug!(workload = %workload.name(), port, "injecting load-balanced service");

        let service = Service {
            api_version: Service::API_VERSION.to_string(),
            kind: Service::KIND.to_string(),
            metadata: ObjectMeta::new(workload.name()).with_label(&self.label_key, workload.uid()),
            spec: ServiceSpec {
                selector: workload.correlation_labels(&self.label_key),
                ports: vec![ServicePort {
                    name: Some(workload.name().to_string()),
                    port,
                    target_port: Some(port),
                }],
                type_: Some(SERVICE_TYPE_LOAD_BALANCER.to_string()),
            },
        };

        objects.push(RenderedObject::Service(service));
        Ok(objects)
    }
}

// =============================================================================
// TranslationPipeline
// =============================================================================

/// Ordered chain of translation stages.
///
/// The pipeline validates the workload identity once, then folds the
/// rendered children through each stage in order. Stages compose by function
/// composition over the same list shape; an error from any stage aborts the
/// run and propagates to the caller untouched.
#[derive(Default)]
pub struct TranslationPipeline {
    stages: Vec<Box<dyn Translate>>,
}

impl TranslationPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage to the end of the chain
    pub fn with_stage(mut self, stage: impl Translate + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of stages in the chain
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order over the rendered children.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the workload identity has an empty name
    /// or uid, or the first error produced by a stage.
    pub fn run(
        &self,
        workload: &WorkloadIdentity,
        mut objects: Vec<RenderedObject>,
    ) -> Result<Vec<RenderedObject>> {
        if workload.name().is_empty() {
            return Err(Error::validation("workload name must not be empty"));
        }
        if workload.uid().is_empty() {
            return Err(Error::validation_for_field(
                workload.name(),
                "metadata.uid",
                "must not be empty",
            ));
        }

        for stage in &self.stages {
            let input_count = objects.len();
            objects = stage.translate(workload, objects)?;
            debug!(
                stage = stage.name(),
                workload = %workload.name(),
                namespace = %workload.namespace(),
                input = input_count,
                output = objects.len(),
                "translation stage complete"
            );
        }
        Ok(objects)
    }
}

// =============================================================================
// Tests
// =============================================================================
