// ============================================================================
// Directory scanner and per-document aggregation
// ============================================================================
//
// Walks directory trees for XML documents whose root matches a dialect
// predicate. A tree under audit contains unrelated and malformed files;
// those are skipped per file, as an explicit result-returning step folded
// with a filter, and logged at debug level.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;
use walkdir::WalkDir;

use crate::capability::{EnvironmentRef, ResourceContainer, ServerJndiResource};
use crate::descriptor::{ContainerElement, DescriptorRoot};
use crate::error::ScanError;
use crate::report::{EnabledFeature, EnvRefGroup, EnvRefRecord, ServerResourceGroup, ServerResourceRecord};
use crate::server::{Server, ServerResource, SERVER_ROOT_LOCAL_NAME};
use crate::xml;

/// Walk depth bound, guarding against symlink cycles and degenerate trees.
pub const MAX_WALK_DEPTH: usize = 100;

/// One XML file whose root matched a dialect's root predicate. The owned
/// text outlives any tree parsed from it; consumers parse per document and
/// drop the tree once views have been read.
#[derive(Debug, Clone)]
pub struct XmlSource {
    pub path: PathBuf,
    pub text: String,
}

impl XmlSource {
    pub fn document(&self) -> Result<Document<'_>, roxmltree::Error> {
        Document::parse(&self.text)
    }
}

/// Selects files by extension, the usual file predicate.
pub fn has_xml_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("xml")
}

/// Root predicate for deployment descriptor documents.
pub fn is_descriptor_root(ns: Option<&str>, local: &str) -> bool {
    ns == Some(crate::descriptor::JAKARTAEE_NS)
        && crate::descriptor::ROOT_LOCAL_NAMES.contains(&local)
}

/// Root predicate for server.xml documents.
pub fn is_server_root(ns: Option<&str>, local: &str) -> bool {
    ns.is_none() && local == SERVER_ROOT_LOCAL_NAME
}

/// Finds all XML files under the given directory whose parsed root matches
/// the root predicate. Files that cannot be read or parsed contribute
/// nothing; non-matching roots are discarded. Results preserve walk
/// encounter order, which is deterministic per fixed walk but not
/// guaranteed stable across platforms.
pub fn find_xml_roots<F, R>(
    dir: &Path,
    file_predicate: F,
    root_predicate: R,
) -> Result<Vec<XmlSource>, ScanError>
where
    F: Fn(&Path) -> bool,
    R: Fn(Option<&str>, &str) -> bool,
{
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).max_depth(MAX_WALK_DEPTH) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !file_predicate(entry.path()) {
            continue;
        }
        match read_matching_root(entry.path(), &root_predicate) {
            Ok(Some(source)) => sources.push(source),
            Ok(None) => {}
            Err(reason) => {
                tracing::debug!(path = %entry.path().display(), %reason, "skipping file");
            }
        }
    }
    Ok(sources)
}

/// The skip policy, spelled out: reading or parsing may fail, and a parsed
/// root may simply not match. Only the first two are "skips".
fn read_matching_root<R>(path: &Path, root_predicate: &R) -> Result<Option<XmlSource>, String>
where
    R: Fn(Option<&str>, &str) -> bool,
{
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let matched = {
        let doc = Document::parse(&text).map_err(|e| e.to_string())?;
        let root = doc.root_element();
        root_predicate(root.tag_name().namespace(), root.tag_name().name())
    };
    Ok(matched.then(|| XmlSource {
        path: path.to_path_buf(),
        text,
    }))
}

// ============================================================================
// Per-document collectors
// ============================================================================

/// Collects the environment references of every container element in a
/// descriptor document, one group per container, in document order of the
/// containers. References inside each group follow registration order.
pub fn collect_env_ref_groups(path: &Path, doc: &Document) -> Vec<EnvRefGroup> {
    let root = doc.root_element();
    if DescriptorRoot::classify(root).is_none() {
        return Vec::new();
    }

    let mut groups = Vec::new();
    for node in root.descendants().filter(|n| n.is_element()) {
        let Some(container) = ContainerElement::classify(node) else {
            continue;
        };
        let references: Vec<EnvRefRecord> = container
            .environment_references()
            .iter()
            .map(|r| EnvRefRecord {
                kind: r.kind().to_string(),
                name: r.name().ok().map(str::to_string),
                type_hint: r.type_hint().map(str::to_string),
                xml: xml::raw_xml(doc, r.node()).to_string(),
            })
            .collect();
        if !references.is_empty() {
            groups.push(EnvRefGroup {
                document: path.display().to_string(),
                container: container.kind().to_string(),
                references,
            });
        }
    }
    groups
}

/// Collects the features enabled by every featureManager of a server.xml
/// document, in document order.
pub fn collect_enabled_features(path: &Path, doc: &Document) -> Vec<EnabledFeature> {
    let root = doc.root_element();
    if !is_server_root(root.tag_name().namespace(), root.tag_name().name()) {
        return Vec::new();
    }

    Server::new(root)
        .feature_managers()
        .iter()
        .flat_map(|fm| fm.features())
        .map(|feature| EnabledFeature {
            document: path.display().to_string(),
            feature: feature.to_string(),
        })
        .collect()
}

/// Collects every JNDI-provisioned declaration directly under a server.xml
/// root, grouped per document. Documents without any yield nothing.
pub fn collect_server_resources(path: &Path, doc: &Document) -> Option<ServerResourceGroup> {
    let root = doc.root_element();
    if !is_server_root(root.tag_name().namespace(), root.tag_name().name()) {
        return None;
    }

    let resources: Vec<ServerResourceRecord> = root
        .children()
        .filter(|c| c.is_element())
        .filter_map(ServerResource::classify)
        .map(|r| ServerResourceRecord {
            kind: r.kind().to_string(),
            id: r.id().map(str::to_string),
            jndi_name: r.jndi_name().map(str::to_string),
            xml: xml::raw_xml(doc, r.node()).to_string(),
        })
        .collect();

    (!resources.is_empty()).then(|| ServerResourceGroup {
        document: path.display().to_string(),
        resources,
    })
}
