// ============================================================================
// Jakarta EE deployment descriptor dialect
// ============================================================================
//
// Typed, non-owning views over elements of web.xml / ejb-jar.xml documents
// in the `https://jakarta.ee/xml/ns/jakartaee` namespace, plus the closed
// qualified-name classifiers that produce them. Views never copy or mutate
// the backing tree; every accessor re-queries the node.

use roxmltree::Node;

use crate::capability::{EnvironmentRef, ResourceContainer};
use crate::error::ValueError;
use crate::xml;

pub const JAKARTAEE_NS: &str = "https://jakarta.ee/xml/ns/jakartaee";

/// Reference-shaped local names, in registration order. The
/// resource-container capability concatenates matches in this order,
/// not in document order.
pub const ENV_REF_LOCAL_NAMES: [&str; 7] = [
    "env-entry",
    "resource-ref",
    "resource-env-ref",
    "data-source",
    "jms-connection-factory",
    "jms-destination",
    "connection-factory",
];

/// Local names of elements that may contain environment references.
pub const CONTAINER_LOCAL_NAMES: [&str; 5] = [
    "web-app",
    "session",
    "message-driven",
    "entity",
    "interceptor",
];

/// Local names of recognized deployment descriptor roots.
pub const ROOT_LOCAL_NAMES: [&str; 2] = ["web-app", "ejb-jar"];

/// Views are only constructed through the classifiers; a mismatched node
/// is a programmer error, not a data error.
fn expect_name(node: Node, local: &str) {
    assert!(
        node.tag_name().namespace() == Some(JAKARTAEE_NS) && node.tag_name().name() == local,
        "expected a {{{}}}{} element, got {:?}",
        JAKARTAEE_NS,
        local,
        node.tag_name()
    );
}

fn has_name(node: Node, local: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(JAKARTAEE_NS)
        && node.tag_name().name() == local
}

fn opt_int_child<'a>(
    node: Node<'a, 'a>,
    element: &'static str,
    child: &'static str,
) -> Result<Option<i64>, ValueError> {
    xml::child_text(node, node.tag_name().namespace(), child)
        .map(|v| xml::parse_int(element, child, v))
        .transpose()
}

fn opt_bool_child<'a>(
    node: Node<'a, 'a>,
    element: &'static str,
    child: &'static str,
) -> Result<Option<bool>, ValueError> {
    xml::child_text(node, node.tag_name().namespace(), child)
        .map(|v| xml::parse_bool(element, child, v))
        .transpose()
}

// ============================================================================
// Environment reference shapes
// ============================================================================

/// `env-entry` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct EnvEntry<'a> {
    node: Node<'a, 'a>,
}

impl<'a> EnvEntry<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "env-entry");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    /// The JNDI name relative to the `java:comp/env` context.
    pub fn env_entry_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "env-entry", "env-entry-name")
    }

    pub fn env_entry_type(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "env-entry-type")
    }

    pub fn env_entry_value(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "env-entry-value")
    }
}

/// `resource-ref` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRef<'a> {
    node: Node<'a, 'a>,
}

impl<'a> ResourceRef<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "resource-ref");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn res_ref_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "resource-ref", "res-ref-name")
    }

    pub fn res_type(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "res-type")
    }

    pub fn res_auth(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "res-auth")
    }

    pub fn res_sharing_scope(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "res-sharing-scope")
    }

    pub fn lookup_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "lookup-name")
    }
}

/// `resource-env-ref` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct ResourceEnvRef<'a> {
    node: Node<'a, 'a>,
}

impl<'a> ResourceEnvRef<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "resource-env-ref");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn resource_env_ref_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "resource-env-ref", "resource-env-ref-name")
    }

    pub fn resource_env_ref_type(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "resource-env-ref-type")
    }
}

/// `data-source` definition element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct DataSourceDef<'a> {
    node: Node<'a, 'a>,
}

impl<'a> DataSourceDef<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "data-source");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    /// The JNDI name.
    pub fn name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "data-source", "name")
    }

    pub fn class_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "class-name")
    }

    pub fn server_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "server-name")
    }

    pub fn port_number(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "port-number")
    }

    pub fn database_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "database-name")
    }

    pub fn url(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "url")
    }

    pub fn user(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "user")
    }

    pub fn password(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "password")
    }

    pub fn properties(&self) -> Vec<Property<'a>> {
        xml::child_elems(self.node, self.ns(), "property")
            .map(Property::new)
            .collect()
    }

    pub fn login_timeout(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "login-timeout")
    }

    pub fn transactional(&self) -> Result<Option<bool>, ValueError> {
        opt_bool_child(self.node, "data-source", "transactional")
    }

    pub fn isolation_level(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "isolation-level")
    }

    pub fn initial_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "initial-pool-size")
    }

    pub fn max_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "max-pool-size")
    }

    pub fn min_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "min-pool-size")
    }

    pub fn max_idle_time(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "max-idle-time")
    }

    pub fn max_statements(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "data-source", "max-statements")
    }
}

/// `jms-connection-factory` definition element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct JmsConnectionFactoryDef<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsConnectionFactoryDef<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jms-connection-factory");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    /// The JNDI name.
    pub fn name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "jms-connection-factory", "name")
    }

    pub fn interface_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "interface-name")
    }

    pub fn class_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "class-name")
    }

    pub fn resource_adapter(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "resource-adapter")
    }

    pub fn user(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "user")
    }

    pub fn password(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "password")
    }

    pub fn client_id(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "client-id")
    }

    pub fn properties(&self) -> Vec<Property<'a>> {
        xml::child_elems(self.node, self.ns(), "property")
            .map(Property::new)
            .collect()
    }

    pub fn transactional(&self) -> Result<Option<bool>, ValueError> {
        opt_bool_child(self.node, "jms-connection-factory", "transactional")
    }

    pub fn max_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "jms-connection-factory", "max-pool-size")
    }

    pub fn min_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "jms-connection-factory", "min-pool-size")
    }
}

/// `jms-destination` definition element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct JmsDestinationDef<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsDestinationDef<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jms-destination");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    /// The JNDI name.
    pub fn name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "jms-destination", "name")
    }

    pub fn interface_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "interface-name")
    }

    pub fn class_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "class-name")
    }

    pub fn resource_adapter(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "resource-adapter")
    }

    pub fn destination_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "destination-name")
    }

    pub fn properties(&self) -> Vec<Property<'a>> {
        xml::child_elems(self.node, self.ns(), "property")
            .map(Property::new)
            .collect()
    }
}

/// Connector `connection-factory` definition element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionFactoryDef<'a> {
    node: Node<'a, 'a>,
}

impl<'a> ConnectionFactoryDef<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "connection-factory");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    /// The JNDI name.
    pub fn name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "connection-factory", "name")
    }

    pub fn interface_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "connection-factory", "interface-name")
    }

    pub fn resource_adapter(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "connection-factory", "resource-adapter")
    }

    pub fn transaction_support(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "transaction-support")
    }

    pub fn max_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "connection-factory", "max-pool-size")
    }

    pub fn min_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_child(self.node, "connection-factory", "min-pool-size")
    }

    pub fn properties(&self) -> Vec<Property<'a>> {
        xml::child_elems(self.node, self.ns(), "property")
            .map(Property::new)
            .collect()
    }
}

/// `property` element wrapper, as nested under resource definitions.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Property<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "property");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "property", "name")
    }

    pub fn value(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "property", "value")
    }
}

// ============================================================================
// Web components
// ============================================================================

/// `servlet` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct Servlet<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Servlet<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "servlet");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn servlet_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "servlet", "servlet-name")
    }

    /// Absent for JSP-file servlets.
    pub fn servlet_class(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "servlet-class")
    }
}

/// `filter` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct Filter<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Filter<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "filter");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn filter_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "filter", "filter-name")
    }

    pub fn filter_class(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "filter", "filter-class")
    }
}

/// `listener` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct Listener<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Listener<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "listener");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn listener_class(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "listener", "listener-class")
    }
}

/// `web-app` root element wrapper. Corresponds to the contents of a web.xml file.
#[derive(Debug, Clone, Copy)]
pub struct WebApp<'a> {
    node: Node<'a, 'a>,
}

impl<'a> WebApp<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "web-app");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn servlets(&self) -> Vec<Servlet<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "servlet"))
            .map(Servlet::new)
            .collect()
    }

    pub fn filters(&self) -> Vec<Filter<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "filter"))
            .map(Filter::new)
            .collect()
    }

    pub fn listeners(&self) -> Vec<Listener<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "listener"))
            .map(Listener::new)
            .collect()
    }
}

// ============================================================================
// EJB components
// ============================================================================

/// `ejb-jar` root element wrapper. Only used for standalone ejb-jars and
/// ejb-jars in an EAR; inside a WAR this content is ignored by containers,
/// but the audit surfaces it regardless.
#[derive(Debug, Clone, Copy)]
pub struct EjbJar<'a> {
    node: Node<'a, 'a>,
}

impl<'a> EjbJar<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "ejb-jar");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn enterprise_beans(&self) -> Option<EnterpriseBeans<'a>> {
        self.node
            .children()
            .find(|c| has_name(*c, "enterprise-beans"))
            .map(EnterpriseBeans::new)
    }

    pub fn ejb_client_jar(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.node.tag_name().namespace(), "ejb-client-jar")
    }
}

/// `enterprise-beans` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct EnterpriseBeans<'a> {
    node: Node<'a, 'a>,
}

impl<'a> EnterpriseBeans<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "enterprise-beans");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn sessions(&self) -> Vec<SessionBean<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "session"))
            .map(SessionBean::new)
            .collect()
    }

    pub fn message_drivens(&self) -> Vec<MessageDrivenBean<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "message-driven"))
            .map(MessageDrivenBean::new)
            .collect()
    }

    pub fn entities(&self) -> Vec<EntityBean<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "entity"))
            .map(EntityBean::new)
            .collect()
    }
}

/// `session` bean element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct SessionBean<'a> {
    node: Node<'a, 'a>,
}

impl<'a> SessionBean<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "session");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn ejb_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "session", "ejb-name")
    }

    pub fn ejb_class(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "ejb-class")
    }

    pub fn mapped_name(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "mapped-name")
    }

    pub fn session_type(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "session-type")
    }
}

/// `message-driven` bean element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct MessageDrivenBean<'a> {
    node: Node<'a, 'a>,
}

impl<'a> MessageDrivenBean<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "message-driven");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn ejb_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "message-driven", "ejb-name")
    }

    pub fn ejb_class(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "ejb-class")
    }
}

/// `entity` bean element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct EntityBean<'a> {
    node: Node<'a, 'a>,
}

impl<'a> EntityBean<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "entity");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    fn ns(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn ejb_name(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(self.node, self.ns(), "entity", "ejb-name")
    }

    pub fn ejb_class(&self) -> Option<&'a str> {
        xml::child_text(self.node, self.ns(), "ejb-class")
    }
}

/// `interceptor` element wrapper.
#[derive(Debug, Clone, Copy)]
pub struct Interceptor<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Interceptor<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "interceptor");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn interceptor_class(&self) -> Result<&'a str, ValueError> {
        xml::required_child_text(
            self.node,
            self.node.tag_name().namespace(),
            "interceptor",
            "interceptor-class",
        )
    }
}

// ============================================================================
// Classifiers
// ============================================================================

/// Tagged view over a reference-shaped element.
#[derive(Debug, Clone, Copy)]
pub enum EnvRefElement<'a> {
    EnvEntry(EnvEntry<'a>),
    ResourceRef(ResourceRef<'a>),
    ResourceEnvRef(ResourceEnvRef<'a>),
    DataSource(DataSourceDef<'a>),
    JmsConnectionFactory(JmsConnectionFactoryDef<'a>),
    JmsDestination(JmsDestinationDef<'a>),
    ConnectionFactory(ConnectionFactoryDef<'a>),
}

impl<'a> EnvRefElement<'a> {
    /// Pure qualified-name dispatch; unrecognized nodes are no match,
    /// never an error.
    pub fn classify(node: Node<'a, 'a>) -> Option<Self> {
        if node.tag_name().namespace() != Some(JAKARTAEE_NS) {
            return None;
        }
        match node.tag_name().name() {
            "env-entry" => Some(Self::EnvEntry(EnvEntry::new(node))),
            "resource-ref" => Some(Self::ResourceRef(ResourceRef::new(node))),
            "resource-env-ref" => Some(Self::ResourceEnvRef(ResourceEnvRef::new(node))),
            "data-source" => Some(Self::DataSource(DataSourceDef::new(node))),
            "jms-connection-factory" => {
                Some(Self::JmsConnectionFactory(JmsConnectionFactoryDef::new(node)))
            }
            "jms-destination" => Some(Self::JmsDestination(JmsDestinationDef::new(node))),
            "connection-factory" => Some(Self::ConnectionFactory(ConnectionFactoryDef::new(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        match self {
            Self::EnvEntry(v) => v.node(),
            Self::ResourceRef(v) => v.node(),
            Self::ResourceEnvRef(v) => v.node(),
            Self::DataSource(v) => v.node(),
            Self::JmsConnectionFactory(v) => v.node(),
            Self::JmsDestination(v) => v.node(),
            Self::ConnectionFactory(v) => v.node(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EnvEntry(_) => "env-entry",
            Self::ResourceRef(_) => "resource-ref",
            Self::ResourceEnvRef(_) => "resource-env-ref",
            Self::DataSource(_) => "data-source",
            Self::JmsConnectionFactory(_) => "jms-connection-factory",
            Self::JmsDestination(_) => "jms-destination",
            Self::ConnectionFactory(_) => "connection-factory",
        }
    }
}

impl<'a> EnvironmentRef<'a> for EnvRefElement<'a> {
    fn name(&self) -> Result<&'a str, ValueError> {
        match self {
            Self::EnvEntry(v) => v.env_entry_name(),
            Self::ResourceRef(v) => v.res_ref_name(),
            Self::ResourceEnvRef(v) => v.resource_env_ref_name(),
            Self::DataSource(v) => v.name(),
            Self::JmsConnectionFactory(v) => v.name(),
            Self::JmsDestination(v) => v.name(),
            Self::ConnectionFactory(v) => v.name(),
        }
    }

    fn type_hint(&self) -> Option<&'a str> {
        match self {
            Self::EnvEntry(v) => v.env_entry_type(),
            Self::ResourceRef(v) => v.res_type(),
            Self::ResourceEnvRef(v) => v.resource_env_ref_type(),
            Self::DataSource(v) => v.class_name(),
            Self::JmsConnectionFactory(v) => v.interface_name(),
            Self::JmsDestination(v) => v.interface_name(),
            Self::ConnectionFactory(v) => v.interface_name().ok(),
        }
    }
}

/// Tagged view over an element that may contain environment references.
#[derive(Debug, Clone, Copy)]
pub enum ContainerElement<'a> {
    WebApp(WebApp<'a>),
    Session(SessionBean<'a>),
    MessageDriven(MessageDrivenBean<'a>),
    Entity(EntityBean<'a>),
    Interceptor(Interceptor<'a>),
}

impl<'a> ContainerElement<'a> {
    pub fn classify(node: Node<'a, 'a>) -> Option<Self> {
        if node.tag_name().namespace() != Some(JAKARTAEE_NS) {
            return None;
        }
        match node.tag_name().name() {
            "web-app" => Some(Self::WebApp(WebApp::new(node))),
            "session" => Some(Self::Session(SessionBean::new(node))),
            "message-driven" => Some(Self::MessageDriven(MessageDrivenBean::new(node))),
            "entity" => Some(Self::Entity(EntityBean::new(node))),
            "interceptor" => Some(Self::Interceptor(Interceptor::new(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        match self {
            Self::WebApp(v) => v.node(),
            Self::Session(v) => v.node(),
            Self::MessageDriven(v) => v.node(),
            Self::Entity(v) => v.node(),
            Self::Interceptor(v) => v.node(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::WebApp(_) => "web-app",
            Self::Session(_) => "session",
            Self::MessageDriven(_) => "message-driven",
            Self::Entity(_) => "entity",
            Self::Interceptor(_) => "interceptor",
        }
    }
}

impl<'a> ResourceContainer<'a> for ContainerElement<'a> {
    type Ref = EnvRefElement<'a>;

    fn environment_references(&self) -> Vec<EnvRefElement<'a>> {
        let node = self.node();
        let ns = node.tag_name().namespace();
        ENV_REF_LOCAL_NAMES
            .iter()
            .flat_map(|local| {
                node.children().filter(move |c| {
                    c.is_element()
                        && c.tag_name().namespace() == ns
                        && c.tag_name().name() == *local
                })
            })
            .filter_map(EnvRefElement::classify)
            .collect()
    }
}

/// Tagged view over a recognized deployment descriptor root.
#[derive(Debug, Clone, Copy)]
pub enum DescriptorRoot<'a> {
    WebApp(WebApp<'a>),
    EjbJar(EjbJar<'a>),
}

impl<'a> DescriptorRoot<'a> {
    pub fn classify(node: Node<'a, 'a>) -> Option<Self> {
        if node.tag_name().namespace() != Some(JAKARTAEE_NS) {
            return None;
        }
        match node.tag_name().name() {
            "web-app" => Some(Self::WebApp(WebApp::new(node))),
            "ejb-jar" => Some(Self::EjbJar(EjbJar::new(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        match self {
            Self::WebApp(v) => v.node(),
            Self::EjbJar(v) => v.node(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::WebApp(_) => "web-app",
            Self::EjbJar(_) => "ejb-jar",
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use roxmltree::Document;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Any well-formed element whose local name is outside the
        // registration tables classifies as no-match, never a panic.
        #[test]
        fn prop_classify_is_total_over_unregistered_names(name in "[a-z][a-z0-9]{0,15}") {
            prop_assume!(!ENV_REF_LOCAL_NAMES.contains(&name.as_str()));
            prop_assume!(!CONTAINER_LOCAL_NAMES.contains(&name.as_str()));
            prop_assume!(!ROOT_LOCAL_NAMES.contains(&name.as_str()));

            let text = format!(r#"<{name} xmlns="{JAKARTAEE_NS}"/>"#);
            let doc = Document::parse(&text).unwrap();
            let node = doc.root_element();

            prop_assert!(EnvRefElement::classify(node).is_none());
            prop_assert!(ContainerElement::classify(node).is_none());
            prop_assert!(DescriptorRoot::classify(node).is_none());
        }

        // Every registered reference name classifies to a view reporting
        // exactly that kind.
        #[test]
        fn prop_classify_covers_registered_reference_names(idx in 0usize..7) {
            let name = ENV_REF_LOCAL_NAMES[idx];
            let text = format!(r#"<{name} xmlns="{JAKARTAEE_NS}"/>"#);
            let doc = Document::parse(&text).unwrap();

            let view = EnvRefElement::classify(doc.root_element()).unwrap();
            prop_assert_eq!(view.kind(), name);
        }
    }
}
