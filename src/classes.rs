// ============================================================================
// Annotation-derived resource collector
// ============================================================================
//
// Walks compiled classes under WEB-INF/classes and collects @Resource /
// @Resources occurrences per declaring element. Reading annotations out of
// a compiled class is delegated to a TypeResolver; types the resolver
// cannot produce are skipped, mirroring the XML scanner's tolerance of
// unparsable files.

use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::scan::MAX_WALK_DEPTH;

/// Resource authentication type, as carried by the annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthenticationType {
    #[default]
    Container,
    Application,
}

/// One parsed @Resource annotation instance, values as written. An empty
/// name means the container will default it: for fields the field name,
/// for methods the JavaBeans property name of the annotated method. The
/// audit surfaces the raw value and leaves that defaulting to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAnnotation {
    pub name: String,
    pub description: String,
    pub shareable: bool,
    pub lookup: String,
    pub type_name: String,
    pub mapped_name: String,
    pub authentication_type: AuthenticationType,
}

impl Default for ResourceAnnotation {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            shareable: true,
            lookup: String::new(),
            type_name: "java.lang.Object".to_string(),
            mapped_name: String::new(),
            authentication_type: AuthenticationType::Container,
        }
    }
}

/// Identity of a declaring program element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum ProgramElement {
    Type { class: String },
    Field { class: String, field: String },
    Method { class: String, method: String },
}

/// A member of a resolved type, possibly carrying a single-form annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedMember {
    pub name: String,
    pub resource: Option<ResourceAnnotation>,
}

/// A type as seen by a resolver: its annotations and those of its declared
/// and inherited members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedType {
    pub class: String,
    /// Single-form annotation on the type itself.
    pub resource: Option<ResourceAnnotation>,
    /// Collection-form (@Resources) entries on the type.
    pub resources: Vec<ResourceAnnotation>,
    pub fields: Vec<AnnotatedMember>,
    pub methods: Vec<AnnotatedMember>,
}

/// External seam: given a fully-qualified class name, produce the type's
/// annotation view, or nothing when the type cannot be resolved.
pub trait TypeResolver {
    fn resolve(&self, class: &str) -> Option<ResolvedType>;
}

/// Occurrences per declaring element. The map key order is the stable
/// order the report flattens in; multiplicity is never collapsed.
pub type AnnotationOccurrences = BTreeMap<ProgramElement, Vec<ResourceAnnotation>>;

/// Scans every `.class` file under the given root, derives the
/// fully-qualified type name from the path, resolves it, and groups the
/// annotation occurrences by declaring element. Unresolvable types
/// contribute nothing.
pub fn scan_classes(
    classes_root: &Path,
    resolver: &dyn TypeResolver,
) -> Result<AnnotationOccurrences, ScanError> {
    if !classes_root.is_dir() {
        return Err(ScanError::MissingClassesDirectory(classes_root.to_path_buf()));
    }

    let mut occurrences = AnnotationOccurrences::new();
    for entry in WalkDir::new(classes_root).max_depth(MAX_WALK_DEPTH) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(class) = class_name_for(entry.path(), classes_root) else {
            continue;
        };
        match resolver.resolve(&class) {
            Some(resolved) => collect_type(&resolved, &mut occurrences),
            None => tracing::debug!(%class, "skipping unresolvable class"),
        }
    }
    Ok(occurrences)
}

/// Fully-qualified type name derived from the path segments relative to
/// the classes root. Non-class files and paths with non-UTF-8 segments
/// yield nothing.
pub fn class_name_for(class_file: &Path, classes_root: &Path) -> Option<String> {
    let relative = class_file.strip_prefix(classes_root).ok()?;
    let simple_name = relative.file_name()?.to_str()?.strip_suffix(".class")?;

    let mut segments = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?),
                _ => return None,
            }
        }
    }
    segments.push(simple_name);
    Some(segments.join("."))
}

fn collect_type(resolved: &ResolvedType, occurrences: &mut AnnotationOccurrences) {
    let mut on_type = Vec::new();
    if let Some(resource) = &resolved.resource {
        on_type.push(resource.clone());
    }
    on_type.extend(resolved.resources.iter().cloned());
    occurrences.insert(
        ProgramElement::Type {
            class: resolved.class.clone(),
        },
        on_type,
    );

    for member in dedup_by_name(&resolved.fields) {
        if let Some(resource) = &member.resource {
            occurrences
                .entry(ProgramElement::Field {
                    class: resolved.class.clone(),
                    field: member.name.clone(),
                })
                .or_default()
                .push(resource.clone());
        }
    }
    for member in dedup_by_name(&resolved.methods) {
        if let Some(resource) = &member.resource {
            occurrences
                .entry(ProgramElement::Method {
                    class: resolved.class.clone(),
                    method: member.name.clone(),
                })
                .or_default()
                .push(resource.clone());
        }
    }
}

/// Declared and inherited member lists may overlap; members are looked up
/// once, first occurrence wins.
fn dedup_by_name(members: &[AnnotatedMember]) -> Vec<&AnnotatedMember> {
    let mut seen = HashSet::new();
    members
        .iter()
        .filter(|m| seen.insert(m.name.as_str()))
        .collect()
}
