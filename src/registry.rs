// ============================================================================
// Dialect registration tables
// ============================================================================
//
// Classification is first-registry-wins, so two dialects claiming the same
// qualified name would silently shadow each other. The dialects here stay
// apart because the descriptor vocabulary is namespaced and the server
// vocabulary is not, but that is checked explicitly at startup instead of
// being left to the accident.

use crate::descriptor;
use crate::server;

/// Every qualified name the descriptor dialect registers.
pub fn descriptor_registrations() -> Vec<(Option<&'static str>, &'static str)> {
    let ns = Some(descriptor::JAKARTAEE_NS);
    descriptor::ENV_REF_LOCAL_NAMES
        .iter()
        .chain(descriptor::CONTAINER_LOCAL_NAMES.iter())
        .chain(descriptor::ROOT_LOCAL_NAMES.iter())
        .map(|local| (ns, *local))
        .collect()
}

/// Every qualified name the provisioning dialect registers.
pub fn server_registrations() -> Vec<(Option<&'static str>, &'static str)> {
    server::SERVER_RESOURCE_LOCAL_NAMES
        .iter()
        .map(|local| (None, *local))
        .chain(std::iter::once((None, server::SERVER_ROOT_LOCAL_NAME)))
        .collect()
}

/// Rejects ambiguous registrations across dialects. Called once at startup;
/// a collision is a build-time mistake, not an input condition.
pub fn registrations_are_disjoint() -> Result<(), String> {
    let descriptor = descriptor_registrations();
    let server = server_registrations();

    for name in &descriptor {
        if server.contains(name) {
            return Err(format!(
                "qualified name ({:?}, {}) is registered by both dialects",
                name.0, name.1
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrations_are_disjoint() {
        assert_eq!(registrations_are_disjoint(), Ok(()));
    }

    #[test]
    fn test_tables_cover_expected_vocabulary() {
        let descriptor = descriptor_registrations();
        // web-app registers both as root and as container.
        assert_eq!(descriptor.len(), 7 + 5 + 2);

        let server = server_registrations();
        assert!(server.contains(&(None, "jndiEntry")));
        assert!(server.contains(&(None, "server")));
        assert_eq!(server.len(), 8);
    }
}
