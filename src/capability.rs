// ============================================================================
// Cross-cutting capabilities of typed XML views
// ============================================================================
//
// A capability is an accessor group a typed view may support independently
// of its concrete dialect. Dialect classifier enums implement these; the
// aggregation layer programs against them.

use crate::error::ValueError;

/// A single JNDI environment reference: something application code can look
/// up under `java:comp/env`.
pub trait EnvironmentRef<'a> {
    /// The JNDI name of the reference. Required by every reference shape;
    /// a matched element without it is malformed.
    fn name(&self) -> Result<&'a str, ValueError>;

    /// The declared Java type or interface of the referenced resource,
    /// where the shape carries one.
    fn type_hint(&self) -> Option<&'a str>;
}

/// An element whose direct children may declare environment references
/// (a web-app root, an EJB, an interceptor).
pub trait ResourceContainer<'a> {
    type Ref: EnvironmentRef<'a>;

    /// Every recognized reference-shaped direct child, concatenated in
    /// fixed registration order (not document order). One level only;
    /// callers recurse across nested containers explicitly.
    fn environment_references(&self) -> Vec<Self::Ref>;
}

/// A server-side resource provisioned under a JNDI name.
pub trait ServerJndiResource<'a> {
    /// The provisioned JNDI name, absent when the declaration does not
    /// carry one (or leaves it to a configuration variable).
    fn jndi_name(&self) -> Option<&'a str>;
}
