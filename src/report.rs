// ============================================================================
// Reconciliation report
// ============================================================================
//
// Pure aggregation of everything the scans surfaced. No cross-matching
// happens here; deciding that a code-requested name matches a provisioned
// name is left to the report's consumer. Every record keeps enough
// provenance to trace it back to its document or declaring class.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classes::{ProgramElement, ResourceAnnotation};

/// One `@Resource` occurrence together with the element that declares it.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationOccurrence {
    #[serde(flatten)]
    pub element: ProgramElement,
    pub annotation: ResourceAnnotation,
}

/// One environment reference, as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvRefRecord {
    pub kind: String,
    pub name: Option<String>,
    pub type_hint: Option<String>,
    /// The declaration's original markup.
    pub xml: String,
}

/// Environment references of one container in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvRefGroup {
    pub document: String,
    pub container: String,
    pub references: Vec<EnvRefRecord>,
}

/// One enabled feature in one server.xml document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnabledFeature {
    pub document: String,
    pub feature: String,
}

/// One provisioned JNDI resource, as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerResourceRecord {
    pub kind: String,
    pub id: Option<String>,
    pub jndi_name: Option<String>,
    /// The declaration's original markup.
    pub xml: String,
}

/// Provisioned JNDI resources of one server.xml document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerResourceGroup {
    pub document: String,
    pub resources: Vec<ServerResourceRecord>,
}

/// The full reconciliation report: what code requests on one side, what
/// configuration declares on the other.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceReport {
    pub generated_at: String,
    pub annotation_occurrences: Vec<AnnotationOccurrence>,
    pub environment_references: Vec<EnvRefGroup>,
    pub enabled_features: Vec<EnabledFeature>,
    pub server_resources: Vec<ServerResourceGroup>,
}

/// Assembles the report. The annotation map flattens in its stable key
/// order; the XML-derived groups keep their encounter order. Elements
/// without any occurrence contribute nothing.
pub fn build_report(
    annotations: BTreeMap<ProgramElement, Vec<ResourceAnnotation>>,
    environment_references: Vec<EnvRefGroup>,
    enabled_features: Vec<EnabledFeature>,
    server_resources: Vec<ServerResourceGroup>,
) -> ResourceReport {
    let annotation_occurrences = annotations
        .into_iter()
        .flat_map(|(element, occurrences)| {
            occurrences.into_iter().map(move |annotation| AnnotationOccurrence {
                element: element.clone(),
                annotation,
            })
        })
        .collect();

    ResourceReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        annotation_occurrences,
        environment_references,
        enabled_features,
        server_resources,
    }
}
