// ============================================================================
// Integration Tests - Full Reconciliation Scan over a Synthetic WAR
// ============================================================================
//
// These tests verify that the engine correctly:
// 1. Collects @Resource occurrences through the resolver seam
// 2. Aggregates descriptor and server.xml declarations across directories
// 3. Tolerates malformed and unrelated files without losing valid ones
// 4. Produces a report whose items all carry provenance

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use jndi_audit::audit;
use jndi_audit::classes::{
    AnnotatedMember, ProgramElement, ResolvedType, ResourceAnnotation, TypeResolver,
};
use jndi_audit::registry;

mod common {
    use super::*;

    /// In-memory resolver standing in for the javap-backed one.
    pub struct MapResolver {
        pub types: HashMap<String, ResolvedType>,
    }

    impl TypeResolver for MapResolver {
        fn resolve(&self, class: &str) -> Option<ResolvedType> {
            self.types.get(class).cloned()
        }
    }

    pub fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn annotation(name: &str) -> ResourceAnnotation {
        ResourceAnnotation {
            name: name.to_string(),
            ..ResourceAnnotation::default()
        }
    }
}

const WEB_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<web-app xmlns="https://jakarta.ee/xml/ns/jakartaee" version="10">
    <servlet>
        <servlet-name>blog</servlet-name>
        <servlet-class>com.example.BlogServlet</servlet-class>
    </servlet>
    <resource-ref>
        <res-ref-name>jdbc/blogDS</res-ref-name>
        <res-type>javax.sql.DataSource</res-type>
    </resource-ref>
    <env-entry>
        <env-entry-name>app/motd</env-entry-name>
        <env-entry-type>java.lang.String</env-entry-type>
    </env-entry>
</web-app>"#;

const SERVER_XML: &str = r#"<server description="test server">
    <featureManager>
        <feature>servlet-6.0</feature>
        <feature>jdbc-4.3</feature>
    </featureManager>
    <dataSource id="blogDS" jndiName="jdbc/blogDS" connectionManagerRef="derbyPool">
        <jdbcDriver libraryRef="derbyLib"/>
        <properties databaseName="data/blogDB"/>
    </dataSource>
    <connectionManager id="derbyPool" maxPoolSize="10"/>
    <library id="derbyLib">
        <fileset dir="lib" includes="derby.jar"/>
    </library>
    <jmsQueue id="orders" jndiName="jms/orders"/>
</server>"#;

fn sample_resolver() -> common::MapResolver {
    common::MapResolver {
        types: HashMap::from([(
            "com.example.BlogService".to_string(),
            ResolvedType {
                class: "com.example.BlogService".to_string(),
                resource: None,
                resources: vec![common::annotation("jdbc/a"), common::annotation("jdbc/b")],
                fields: vec![AnnotatedMember {
                    name: "dataSource".to_string(),
                    resource: Some(common::annotation("jdbc/blogDS")),
                }],
                methods: Vec::new(),
            },
        )]),
    }
}

#[test]
fn test_full_scan_produces_reconcilable_report() {
    let war = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    common::write(
        war.path(),
        "WEB-INF/classes/com/example/BlogService.class",
        "stub",
    );
    common::write(war.path(), "WEB-INF/web.xml", WEB_XML);
    common::write(config.path(), "servers/defaultServer/server.xml", SERVER_XML);

    let report = audit::find_resources(
        war.path(),
        &[config.path().to_path_buf()],
        &sample_resolver(),
    )
    .unwrap();

    // Scenario C shape: the type key carries the two collection-form
    // entries, the field key carries one.
    assert_eq!(report.annotation_occurrences.len(), 3);
    let type_occurrences: Vec<_> = report
        .annotation_occurrences
        .iter()
        .filter(|o| {
            o.element
                == ProgramElement::Type {
                    class: "com.example.BlogService".to_string(),
                }
        })
        .collect();
    assert_eq!(type_occurrences.len(), 2);

    // Registration order inside the web-app group: env-entry before
    // resource-ref, although the document declares them the other way.
    assert_eq!(report.environment_references.len(), 1);
    let group = &report.environment_references[0];
    assert_eq!(group.container, "web-app");
    assert!(group.document.ends_with("web.xml"));
    let names: Vec<_> = group
        .references
        .iter()
        .map(|r| r.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["app/motd", "jdbc/blogDS"]);

    assert_eq!(
        report
            .enabled_features
            .iter()
            .map(|f| f.feature.as_str())
            .collect::<Vec<_>>(),
        vec!["servlet-6.0", "jdbc-4.3"]
    );

    // Scenario A shape: the dataSource surfaces with its jndiName, and its
    // raw markup still carries the connectionManagerRef for the consumer
    // to cross-reference.
    assert_eq!(report.server_resources.len(), 1);
    let resources = &report.server_resources[0].resources;
    let kinds: Vec<_> = resources.iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(kinds, vec!["dataSource", "jmsQueue"]);
    assert_eq!(resources[0].jndi_name.as_deref(), Some("jdbc/blogDS"));
    assert!(resources[0].xml.contains("connectionManagerRef=\"derbyPool\""));

    // The code-requested name and the provisioned name line up, which is
    // exactly the comparison the report exists to enable.
    let requested: Vec<_> = report
        .annotation_occurrences
        .iter()
        .map(|o| o.annotation.name.as_str())
        .collect();
    assert!(requested.contains(&"jdbc/blogDS"));
}

#[test]
fn test_scan_tolerates_malformed_and_unrelated_files() {
    let war = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    common::write(war.path(), "WEB-INF/classes/Foo.class", "stub");
    common::write(war.path(), "WEB-INF/web.xml", WEB_XML);
    // Malformed XML, unrelated XML, unrelated junk.
    common::write(config.path(), "broken/server.xml", "<server><feature");
    common::write(config.path(), "other/pom.xml", "<project/>");
    common::write(config.path(), "other/readme.txt", "hello");
    common::write(config.path(), "good/server.xml", SERVER_XML);

    let resolver = common::MapResolver {
        types: HashMap::new(),
    };
    let report = audit::find_resources(
        war.path(),
        &[config.path().to_path_buf()],
        &resolver,
    )
    .unwrap();

    // The broken file contributed nothing; the good one fully survived.
    assert_eq!(report.server_resources.len(), 1);
    assert!(report.server_resources[0].document.ends_with("good/server.xml"));
    assert_eq!(report.enabled_features.len(), 2);
    // Unresolvable classes are skipped, not fatal.
    assert!(report.annotation_occurrences.is_empty());
}

#[test]
fn test_descriptors_are_found_in_config_directories_too() {
    let war = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    common::write(war.path(), "WEB-INF/classes/Foo.class", "stub");
    common::write(
        config.path(),
        "extra/ejb-jar.xml",
        r#"<ejb-jar xmlns="https://jakarta.ee/xml/ns/jakartaee">
             <enterprise-beans>
               <session>
                 <ejb-name>OrderBean</ejb-name>
                 <resource-ref><res-ref-name>jdbc/orders</res-ref-name></resource-ref>
               </session>
             </enterprise-beans>
           </ejb-jar>"#,
    );

    let resolver = common::MapResolver {
        types: HashMap::new(),
    };
    let report = audit::find_resources(
        war.path(),
        &[config.path().to_path_buf()],
        &resolver,
    )
    .unwrap();

    assert_eq!(report.environment_references.len(), 1);
    assert_eq!(report.environment_references[0].container, "session");
    assert_eq!(
        report.environment_references[0].references[0].name.as_deref(),
        Some("jdbc/orders")
    );
}

#[test]
fn test_missing_inputs_abort_the_run() {
    let war = tempfile::tempdir().unwrap();
    let resolver = common::MapResolver {
        types: HashMap::new(),
    };

    // No WEB-INF/classes under the WAR.
    assert!(audit::find_resources(war.path(), &[], &resolver).is_err());

    // A config directory that does not exist.
    common::write(war.path(), "WEB-INF/classes/Foo.class", "stub");
    assert!(audit::find_resources(
        war.path(),
        &[war.path().join("no-such-dir")],
        &resolver
    )
    .is_err());
}

#[test]
fn test_dialect_registrations_are_disjoint_at_startup() {
    assert_eq!(registry::registrations_are_disjoint(), Ok(()));
}
