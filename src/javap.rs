// ============================================================================
// javap-backed type resolver
// ============================================================================
//
// Reading runtime-retained annotations out of a compiled class needs a JVM
// eye; this resolver borrows javap's. It runs `javap -p -v` against the
// classes root and associates decoded RuntimeVisibleAnnotations blocks with
// the preceding member declaration (or with the class itself, outside the
// member body). Anything it cannot spawn or make sense of resolves to
// nothing, which the collector treats like any other unresolvable type.

use std::path::{Path, PathBuf};
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classes::{
    AnnotatedMember, AuthenticationType, ResolvedType, ResourceAnnotation, TypeResolver,
};

const RESOURCE_MARKER: &str = "jakarta.annotation.Resource";
const RESOURCES_MARKER: &str = "jakarta.annotation.Resources";

/// Checks whether a JDK tool is runnable on this host.
pub fn check_tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub struct JavapResolver {
    classes_root: PathBuf,
}

impl JavapResolver {
    pub fn new(classes_root: &Path) -> Self {
        Self {
            classes_root: classes_root.to_path_buf(),
        }
    }
}

impl TypeResolver for JavapResolver {
    fn resolve(&self, class: &str) -> Option<ResolvedType> {
        let output = Command::new("javap")
            .args(["-p", "-v", "-cp"])
            .arg(&self.classes_root)
            .arg(class)
            .output()
            .ok()?;
        if !output.status.success() {
            tracing::debug!(%class, "javap could not disassemble class");
            return None;
        }
        parse_javap_output(class, &String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    Field,
    Method,
}

/// Parses decoded javap -v output into the resolver's type view.
///
/// Member declarations sit at two-space indentation inside the class body
/// braces; decoded annotation blocks follow the raw constant-pool entry at
/// deeper indentation. Class-level annotations appear outside the braces.
pub fn parse_javap_output(class: &str, output: &str) -> Option<ResolvedType> {
    let simple_name = class.rsplit('.').next().unwrap_or(class);

    let mut resolved = ResolvedType {
        class: class.to_string(),
        ..ResolvedType::default()
    };

    let mut in_body = false;
    let mut current: Option<(MemberKind, String)> = None;

    let lines: Vec<&str> = output.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed == "{" {
            in_body = true;
            i += 1;
            continue;
        }
        if trimmed == "}" {
            in_body = false;
            current = None;
            i += 1;
            continue;
        }

        if in_body {
            if let Some((kind, name)) = parse_member_declaration(line, simple_name) {
                let member = AnnotatedMember {
                    name: name.clone(),
                    resource: None,
                };
                match kind {
                    MemberKind::Field => resolved.fields.push(member),
                    MemberKind::Method => resolved.methods.push(member),
                }
                current = Some((kind, name));
                i += 1;
                continue;
            }
        }

        if trimmed.starts_with(RESOURCES_MARKER) {
            let (block, consumed) = take_balanced_block(&lines, i);
            for annotation in parse_resources_block(&block) {
                resolved.resources.push(annotation);
            }
            i += consumed;
            continue;
        }

        if trimmed.starts_with(RESOURCE_MARKER) {
            let (block, consumed) = take_balanced_block(&lines, i);
            let annotation = parse_resource_block(&block);
            attach(&mut resolved, &current, in_body, annotation);
            i += consumed;
            continue;
        }

        i += 1;
    }

    Some(resolved)
}

fn attach(
    resolved: &mut ResolvedType,
    current: &Option<(MemberKind, String)>,
    in_body: bool,
    annotation: ResourceAnnotation,
) {
    match (in_body, current) {
        (true, Some((MemberKind::Field, name))) => {
            if let Some(member) = resolved.fields.iter_mut().rev().find(|m| &m.name == name) {
                member.resource = Some(annotation);
            }
        }
        (true, Some((MemberKind::Method, name))) => {
            if let Some(member) = resolved.methods.iter_mut().rev().find(|m| &m.name == name) {
                member.resource = Some(annotation);
            }
        }
        _ => resolved.resource = Some(annotation),
    }
}

/// Member declarations: two-space indent, terminated by `;`. Constructors,
/// initializers and synthetic entries are not members the audit reads
/// annotations from.
fn parse_member_declaration(line: &str, simple_name: &str) -> Option<(MemberKind, String)> {
    if !line.starts_with("  ") || line.starts_with("   ") {
        return None;
    }
    let trimmed = line.trim();
    if !trimmed.ends_with(';') {
        return None;
    }
    let decl = trimmed.trim_end_matches(';');

    let (kind, name) = match decl.find('(') {
        Some(paren) => {
            let before = decl[..paren].trim_end();
            let name = before.rsplit(|c: char| c.is_whitespace()).next()?;
            (MemberKind::Method, name)
        }
        None => {
            let name = decl.rsplit(|c: char| c.is_whitespace()).next()?;
            (MemberKind::Field, name)
        }
    };

    if name.contains('{') || name.contains('}') || name.contains('<') {
        return None;
    }
    // Constructors disassemble under the (possibly qualified) class name.
    if name == simple_name || name.rsplit('.').next() == Some(simple_name) {
        return None;
    }
    Some((kind, name.to_string()))
}

/// Accumulates lines from `start` until the parentheses opened on the first
/// line balance out. A bare marker without arguments is a single line.
fn take_balanced_block(lines: &[&str], start: usize) -> (String, usize) {
    let mut depth = 0i32;
    let mut block = String::new();
    let mut consumed = 0;

    for line in &lines[start..] {
        block.push_str(line);
        block.push('\n');
        consumed += 1;
        depth += line.chars().filter(|c| *c == '(').count() as i32;
        depth -= line.chars().filter(|c| *c == ')').count() as i32;
        if depth <= 0 {
            break;
        }
    }
    (block, consumed)
}

static ANNOTATION_ARG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\w+)=("(?:[^"\\]|\\.)*"|class\s+[^,)\s]+|[^,)\s]+)"#).unwrap()
});

static NESTED_RESOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@jakarta\.annotation\.Resource\(").unwrap()
});

/// One decoded Resource annotation, arguments included.
fn parse_resource_block(block: &str) -> ResourceAnnotation {
    let args = match block.find('(') {
        Some(open) => &block[open + 1..block.rfind(')').unwrap_or(block.len())],
        None => "",
    };
    parse_resource_args(args)
}

/// A decoded Resources annotation: every nested @Resource entry, in order.
fn parse_resources_block(block: &str) -> Vec<ResourceAnnotation> {
    let mut entries = Vec::new();
    for m in NESTED_RESOURCE.find_iter(block) {
        let rest = &block[m.end()..];
        let mut depth = 1i32;
        let mut end = rest.len();
        for (idx, c) in rest.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = idx;
                        break;
                    }
                }
                _ => {}
            }
        }
        entries.push(parse_resource_args(&rest[..end]));
    }
    entries
}

fn parse_resource_args(args: &str) -> ResourceAnnotation {
    let mut annotation = ResourceAnnotation::default();
    for capture in ANNOTATION_ARG.captures_iter(args) {
        let key = &capture[1];
        let value = &capture[2];
        match key {
            "name" => annotation.name = unquote(value),
            "description" => annotation.description = unquote(value),
            "lookup" => annotation.lookup = unquote(value),
            "mappedName" => annotation.mapped_name = unquote(value),
            "shareable" => annotation.shareable = value == "true",
            "type" => annotation.type_name = descriptor_to_class_name(value),
            "authenticationType" => {
                annotation.authentication_type =
                    match value.rsplit('.').next().unwrap_or(value) {
                        "APPLICATION" => AuthenticationType::Application,
                        _ => AuthenticationType::Container,
                    }
            }
            _ => {}
        }
    }
    annotation
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

/// `class Ljavax/sql/DataSource;` -> `javax.sql.DataSource`
fn descriptor_to_class_name(value: &str) -> String {
    let descriptor = value.trim_start_matches("class").trim();
    descriptor
        .strip_prefix('L')
        .and_then(|v| v.strip_suffix(';'))
        .unwrap_or(descriptor)
        .replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAVAP_OUTPUT: &str = r#"Classfile /tmp/classes/com/example/MailBean.class
  Last modified Jan 1, 2026; size 812 bytes
public class com.example.MailBean
  minor version: 0
  major version: 61
  flags: (0x0021) ACC_PUBLIC, ACC_SUPER
Constant pool:
   #1 = Methodref          #2.#3
{
  private javax.sql.DataSource dataSource;
    descriptor: Ljavax/sql/DataSource;
    flags: (0x0002) ACC_PRIVATE
    RuntimeVisibleAnnotations:
      0: #23(#24=s#25)
        jakarta.annotation.Resource(
          name="jdbc/blogDS",
          shareable=false,
          type=class Ljavax/sql/DataSource;,
          authenticationType=Ljakarta/annotation/Resource$AuthenticationType;.APPLICATION
        )

  private java.lang.String plain;
    descriptor: Ljava/lang/String;
    flags: (0x0002) ACC_PRIVATE

  public com.example.MailBean();
    descriptor: ()V
    flags: (0x0001) ACC_PUBLIC

  public void setMailSession(jakarta.mail.Session);
    descriptor: (Ljakarta/mail/Session;)V
    flags: (0x0001) ACC_PUBLIC
    RuntimeVisibleAnnotations:
      0: #31()
        jakarta.annotation.Resource
}
SourceFile: "MailBean.java"
RuntimeVisibleAnnotations:
  0: #35(#36=[@#23(#24=s#37),@#23(#24=s#38)])
    jakarta.annotation.Resources(
      value=[@jakarta.annotation.Resource(
        name="jdbc/a"
      ),@jakarta.annotation.Resource(
        name="jdbc/b",
        lookup="java:comp/env/jdbc/b"
      )]
    )
"#;

    #[test]
    fn test_parse_field_annotation_with_arguments() {
        let resolved = parse_javap_output("com.example.MailBean", JAVAP_OUTPUT).unwrap();

        let ds = resolved
            .fields
            .iter()
            .find(|f| f.name == "dataSource")
            .unwrap();
        let annotation = ds.resource.as_ref().unwrap();
        assert_eq!(annotation.name, "jdbc/blogDS");
        assert!(!annotation.shareable);
        assert_eq!(annotation.type_name, "javax.sql.DataSource");
        assert_eq!(
            annotation.authentication_type,
            AuthenticationType::Application
        );
    }

    #[test]
    fn test_unannotated_members_are_listed_without_resource() {
        let resolved = parse_javap_output("com.example.MailBean", JAVAP_OUTPUT).unwrap();

        let plain = resolved.fields.iter().find(|f| f.name == "plain").unwrap();
        assert!(plain.resource.is_none());
        // The constructor never shows up as a member.
        assert!(resolved.methods.iter().all(|m| m.name != "MailBean"));
    }

    #[test]
    fn test_bare_annotation_on_method_uses_defaults() {
        let resolved = parse_javap_output("com.example.MailBean", JAVAP_OUTPUT).unwrap();

        let setter = resolved
            .methods
            .iter()
            .find(|m| m.name == "setMailSession")
            .unwrap();
        let annotation = setter.resource.as_ref().unwrap();
        assert_eq!(annotation.name, "");
        assert!(annotation.shareable);
        assert_eq!(annotation.type_name, "java.lang.Object");
        assert_eq!(
            annotation.authentication_type,
            AuthenticationType::Container
        );
    }

    #[test]
    fn test_collection_form_lands_on_the_type() {
        let resolved = parse_javap_output("com.example.MailBean", JAVAP_OUTPUT).unwrap();

        assert!(resolved.resource.is_none());
        let names: Vec<_> = resolved.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["jdbc/a", "jdbc/b"]);
        assert_eq!(resolved.resources[1].lookup, "java:comp/env/jdbc/b");
    }

    #[test]
    fn test_class_level_single_annotation_outside_body() {
        let output = r#"public class com.example.Configured
{
  public void run();
    descriptor: ()V
}
RuntimeVisibleAnnotations:
  0: #10(#11=s#12)
    jakarta.annotation.Resource(
      name="mail/outbound"
    )
"#;
        let resolved = parse_javap_output("com.example.Configured", output).unwrap();
        assert_eq!(resolved.resource.as_ref().unwrap().name, "mail/outbound");
    }

    #[test]
    fn test_descriptor_to_class_name() {
        assert_eq!(
            descriptor_to_class_name("class Ljavax/sql/DataSource;"),
            "javax.sql.DataSource"
        );
        assert_eq!(descriptor_to_class_name("Ljava/lang/String;"), "java.lang.String");
    }

    #[test]
    fn test_output_without_annotations_still_resolves() {
        let output = "public class com.example.Plain\n{\n  public void run();\n}\n";
        let resolved = parse_javap_output("com.example.Plain", output).unwrap();
        assert!(resolved.resource.is_none());
        assert!(resolved.resources.is_empty());
        assert_eq!(resolved.methods.len(), 1);
    }
}
