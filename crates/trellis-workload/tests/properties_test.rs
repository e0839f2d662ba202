//! Property tests for the translation stages
//!
//! Verifies the properties the reconciler depends on:
//! - Determinism: same input produces the same output
//! - Idempotence: repeated runs are byte-identical
//! - Structure: count/order preservation and label propagation
//!
//! These tests use proptest for automated property verification.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use trellis_workload::k8s::{Container, ContainerPort, Deployment, Service};
use trellis_workload::{
    AppBundler, RenderedObject, ServiceInjector, Translate, WorkloadIdentity, WORKLOAD_UID_LABEL,
};

fn workload() -> WorkloadIdentity {
    WorkloadIdentity::new("prop-workload", "prop-namespace", "prop-uid-0001")
}

fn deployment_from(container_ports: Vec<Vec<u16>>) -> Deployment {
    let mut d = Deployment::new("prop-workload");
    for (i, ports) in container_ports.into_iter().enumerate() {
        d.spec.template.spec.containers.push(Container {
            name: format!("c{i}"),
            image: None,
            ports: ports
                .into_iter()
                .map(|p| ContainerPort {
                    name: None,
                    container_port: p,
                })
                .collect(),
        });
    }
    d
}

/// Independent oracle for the selection policy: first deployment, first
/// container declaring a port, first declared port.
fn reference_port(children: &[RenderedObject]) -> Option<u16> {
    for child in children {
        if let RenderedObject::Deployment(d) = child {
            for container in &d.spec.template.spec.containers {
                if let Some(port) = container.ports.first() {
                    return Some(port.container_port);
                }
            }
        }
    }
    None
}

fn to_byte_vectors(objects: &[RenderedObject]) -> Vec<Vec<u8>> {
    objects.iter().map(|o| o.to_bytes().unwrap()).collect()
}

prop_compose! {
    fn arb_deployment()(
        container_ports in prop::collection::vec(
            prop::collection::vec(1u16..=65535, 0..4),
            0..4,
        )
    ) -> Deployment {
        deployment_from(container_ports)
    }
}

fn arb_child() -> impl Strategy<Value = RenderedObject> {
    prop_oneof![
        4 => arb_deployment().prop_map(RenderedObject::Deployment),
        1 => Just(RenderedObject::Service(Service::new("prop-workload"))),
    ]
}

fn arb_children() -> impl Strategy<Value = Vec<RenderedObject>> {
    prop::collection::vec(arb_child(), 0..6)
}

proptest! {
    #[test]
    fn injector_appends_at_most_one_service(children in arb_children()) {
        let result = ServiceInjector::new()
            .translate(&workload(), children.clone())
            .unwrap();

        let expected_len = if reference_port(&children).is_some() {
            children.len() + 1
        } else {
            children.len()
        };
        prop_assert_eq!(result.len(), expected_len);
    }

    #[test]
    fn injector_selects_by_declaration_order(children in arb_children()) {
        let result = ServiceInjector::new()
            .translate(&workload(), children.clone())
            .unwrap();

        if let Some(port) = reference_port(&children) {
            let RenderedObject::Service(service) = result.last().unwrap() else {
                return Err(TestCaseError::fail("expected an appended service"));
            };
            prop_assert_eq!(service.spec.ports.len(), 1);
            prop_assert_eq!(service.spec.ports[0].port, port);
            prop_assert_eq!(service.spec.ports[0].target_port, Some(port));
        }
    }

    #[test]
    fn injector_preserves_original_children(children in arb_children()) {
        let result = ServiceInjector::new()
            .translate(&workload(), children.clone())
            .unwrap();
        prop_assert_eq!(&result[..children.len()], children.as_slice());
    }

    #[test]
    fn injector_is_idempotent_to_the_byte(children in arb_children()) {
        let injector = ServiceInjector::new();
        let first = injector.translate(&workload(), children.clone()).unwrap();
        let second = injector.translate(&workload(), children).unwrap();
        prop_assert_eq!(to_byte_vectors(&first), to_byte_vectors(&second));
    }

    #[test]
    fn bundler_preserves_count_and_propagates_labels(children in arb_children()) {
        let result = AppBundler::new()
            .translate(&workload(), children.clone())
            .unwrap();

        if children.is_empty() {
            prop_assert!(result.is_empty());
            return Ok(());
        }

        prop_assert_eq!(result.len(), 1);
        let RenderedObject::Bundle(bundle) = &result[0] else {
            return Err(TestCaseError::fail("expected a bundle"));
        };
        prop_assert_eq!(bundle.spec.resource_templates.len(), children.len());
        for template in &bundle.spec.resource_templates {
            prop_assert_eq!(
                template.metadata.labels.get(WORKLOAD_UID_LABEL),
                Some(&"prop-uid-0001".to_string())
            );
        }
    }

    #[test]
    fn bundler_is_idempotent_to_the_byte(children in arb_children()) {
        let bundler = AppBundler::new();
        let first = bundler.translate(&workload(), children.clone()).unwrap();
        let second = bundler.translate(&workload(), children).unwrap();
        prop_assert_eq!(to_byte_vectors(&first), to_byte_vectors(&second));
    }
}
