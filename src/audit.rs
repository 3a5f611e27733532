// ============================================================================
// End-to-end audit pipeline
// ============================================================================
//
// One pass: annotation scan over the exploded WAR's classes, descriptor
// scan over the WAR plus every configuration directory, feature and
// JNDI-resource scan over the configuration directories, then report
// assembly. Synchronous and single-threaded; each document is parsed,
// read, and dropped before the next.

use std::path::{Path, PathBuf};

use crate::classes::{scan_classes, TypeResolver};
use crate::error::ScanError;
use crate::report::{build_report, EnabledFeature, EnvRefGroup, ResourceReport, ServerResourceGroup};
use crate::scan::{
    collect_enabled_features, collect_env_ref_groups, collect_server_resources, find_xml_roots,
    has_xml_extension, is_descriptor_root, is_server_root, XmlSource,
};

/// Location of the compiled classes inside an exploded WAR.
pub const CLASSES_SUBDIR: [&str; 2] = ["WEB-INF", "classes"];

pub fn classes_dir(war_dir: &Path) -> PathBuf {
    CLASSES_SUBDIR.iter().fold(war_dir.to_path_buf(), |p, seg| p.join(seg))
}

/// Runs the full reconciliation scan.
///
/// The first directory holds the exploded WAR; the others hold deployment
/// descriptors and/or Open Liberty configuration anywhere in their
/// subtrees. Missing directories abort; malformed individual files inside
/// them never do.
pub fn find_resources(
    war_dir: &Path,
    config_dirs: &[PathBuf],
    resolver: &dyn TypeResolver,
) -> Result<ResourceReport, ScanError> {
    if !war_dir.is_dir() {
        return Err(ScanError::MissingDirectory(war_dir.to_path_buf()));
    }
    for dir in config_dirs {
        if !dir.is_dir() {
            return Err(ScanError::MissingDirectory(dir.clone()));
        }
    }

    let annotations = scan_classes(&classes_dir(war_dir), resolver)?;

    // Deployment descriptors may sit in the WAR as well as next to the
    // server configuration.
    let mut descriptor_dirs: Vec<&Path> = vec![war_dir];
    descriptor_dirs.extend(config_dirs.iter().map(PathBuf::as_path));

    let mut environment_references: Vec<EnvRefGroup> = Vec::new();
    for dir in descriptor_dirs {
        for source in find_xml_roots(dir, has_xml_extension, is_descriptor_root)? {
            with_document(&source, |doc| {
                environment_references.extend(collect_env_ref_groups(&source.path, doc));
            });
        }
    }

    let mut enabled_features: Vec<EnabledFeature> = Vec::new();
    let mut server_resources: Vec<ServerResourceGroup> = Vec::new();
    for dir in config_dirs {
        for source in find_xml_roots(dir, has_xml_extension, is_server_root)? {
            with_document(&source, |doc| {
                enabled_features.extend(collect_enabled_features(&source.path, doc));
                server_resources.extend(collect_server_resources(&source.path, doc));
            });
        }
    }

    Ok(build_report(
        annotations,
        environment_references,
        enabled_features,
        server_resources,
    ))
}

/// Re-parses a matched source for extraction. The text already parsed once
/// during root matching; should it fail now, the document is skipped like
/// any other unparsable file.
fn with_document(source: &XmlSource, extract: impl FnOnce(&roxmltree::Document)) {
    match source.document() {
        Ok(doc) => extract(&doc),
        Err(e) => {
            tracing::debug!(path = %source.path.display(), error = %e, "skipping document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{AnnotatedMember, ResolvedType, ResourceAnnotation};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    struct MapResolver {
        types: HashMap<String, ResolvedType>,
    }

    impl TypeResolver for MapResolver {
        fn resolve(&self, class: &str) -> Option<ResolvedType> {
            self.types.get(class).cloned()
        }
    }

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_war_dir_aborts() {
        let resolver = MapResolver {
            types: HashMap::new(),
        };
        let result = find_resources(Path::new("/no/such/war"), &[], &resolver);
        assert!(matches!(result, Err(ScanError::MissingDirectory(_))));
    }

    #[test]
    fn test_missing_classes_dir_aborts() {
        let war = tempdir().unwrap();
        let resolver = MapResolver {
            types: HashMap::new(),
        };
        let result = find_resources(war.path(), &[], &resolver);
        assert!(matches!(result, Err(ScanError::MissingClassesDirectory(_))));
    }

    #[test]
    fn test_full_pipeline_produces_all_four_groups() {
        let war = tempdir().unwrap();
        let config = tempdir().unwrap();

        write(
            war.path(),
            "WEB-INF/classes/com/example/BlogService.class",
            "stub",
        );
        write(
            war.path(),
            "WEB-INF/web.xml",
            r#"<web-app xmlns="https://jakarta.ee/xml/ns/jakartaee">
                 <resource-ref><res-ref-name>jdbc/blogDS</res-ref-name></resource-ref>
               </web-app>"#,
        );
        write(
            config.path(),
            "defaults/server.xml",
            r#"<server>
                 <featureManager><feature>jdbc-4.3</feature></featureManager>
                 <dataSource jndiName="jdbc/blogDS"/>
               </server>"#,
        );

        let resolver = MapResolver {
            types: HashMap::from([(
                "com.example.BlogService".to_string(),
                ResolvedType {
                    class: "com.example.BlogService".to_string(),
                    fields: vec![AnnotatedMember {
                        name: "dataSource".to_string(),
                        resource: Some(ResourceAnnotation {
                            name: "jdbc/blogDS".to_string(),
                            ..ResourceAnnotation::default()
                        }),
                    }],
                    ..ResolvedType::default()
                },
            )]),
        };

        let report =
            find_resources(war.path(), &[config.path().to_path_buf()], &resolver).unwrap();

        assert_eq!(report.annotation_occurrences.len(), 1);
        assert_eq!(
            report.annotation_occurrences[0].annotation.name,
            "jdbc/blogDS"
        );
        assert_eq!(report.environment_references.len(), 1);
        assert_eq!(
            report.environment_references[0].references[0].name.as_deref(),
            Some("jdbc/blogDS")
        );
        assert_eq!(report.enabled_features.len(), 1);
        assert_eq!(report.server_resources.len(), 1);
        assert_eq!(
            report.server_resources[0].resources[0].jndi_name.as_deref(),
            Some("jdbc/blogDS")
        );
    }
}
