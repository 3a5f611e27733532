// ============================================================================
// Open Liberty server.xml provisioning dialect
// ============================================================================
//
// Typed, non-owning views over server.xml elements. The dialect carries no
// namespace and keeps most data in attributes rather than child elements.
// A server.xml file may contain unresolved configuration variables, so
// every defaultable or numeric attribute also exposes its raw string form.

use roxmltree::Node;

use crate::capability::ServerJndiResource;
use crate::error::ValueError;
use crate::xml;

/// Local names of server.xml declarations provisioned under a JNDI name,
/// in registration order.
pub const SERVER_RESOURCE_LOCAL_NAMES: [&str; 7] = [
    "dataSource",
    "jmsConnectionFactory",
    "jmsQueue",
    "jmsQueueConnectionFactory",
    "jmsTopic",
    "jmsTopicConnectionFactory",
    "jndiEntry",
];

pub const SERVER_ROOT_LOCAL_NAME: &str = "server";

fn expect_name(node: Node, local: &str) {
    assert!(
        node.tag_name().namespace().is_none() && node.tag_name().name() == local,
        "expected a {} element, got {:?}",
        local,
        node.tag_name()
    );
}

fn has_name(node: Node, local: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == local
}

fn opt_int_attr(
    node: Node,
    element: &'static str,
    attr: &'static str,
) -> Result<Option<i64>, ValueError> {
    node.attribute(attr)
        .map(|v| xml::parse_int(element, attr, v))
        .transpose()
}

/// Root element of a server.xml file.
///
/// Mind the potential occurrences of include elements, Ref attributes such
/// as connectionManagerRef, and unresolved variables. Merging rules across
/// split configurations are out of scope; declarations surface as found.
#[derive(Debug, Clone, Copy)]
pub struct Server<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Server<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "server");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn description(&self) -> Option<&'a str> {
        self.node.attribute("description")
    }

    fn collect<T>(&self, local: &str, make: impl Fn(Node<'a, 'a>) -> T) -> Vec<T> {
        self.node
            .children()
            .filter(|c| has_name(*c, local))
            .map(make)
            .collect()
    }

    pub fn feature_managers(&self) -> Vec<FeatureManager<'a>> {
        self.collect("featureManager", FeatureManager::new)
    }

    pub fn data_sources(&self) -> Vec<DataSource<'a>> {
        self.collect("dataSource", DataSource::new)
    }

    pub fn connection_managers(&self) -> Vec<ConnectionManager<'a>> {
        self.collect("connectionManager", ConnectionManager::new)
    }

    pub fn jndi_entries(&self) -> Vec<JndiEntry<'a>> {
        self.collect("jndiEntry", JndiEntry::new)
    }

    pub fn jms_queues(&self) -> Vec<JmsQueue<'a>> {
        self.collect("jmsQueue", JmsQueue::new)
    }

    pub fn jms_topics(&self) -> Vec<JmsTopic<'a>> {
        self.collect("jmsTopic", JmsTopic::new)
    }

    pub fn jms_connection_factories(&self) -> Vec<JmsConnectionFactory<'a>> {
        self.collect("jmsConnectionFactory", JmsConnectionFactory::new)
    }

    pub fn jms_queue_connection_factories(&self) -> Vec<JmsQueueConnectionFactory<'a>> {
        self.collect("jmsQueueConnectionFactory", JmsQueueConnectionFactory::new)
    }

    pub fn jms_topic_connection_factories(&self) -> Vec<JmsTopicConnectionFactory<'a>> {
        self.collect("jmsTopicConnectionFactory", JmsTopicConnectionFactory::new)
    }

    pub fn activation_specs(&self) -> Vec<ActivationSpec<'a>> {
        self.collect("activationSpec", ActivationSpec::new)
    }

    pub fn libraries(&self) -> Vec<Library<'a>> {
        self.collect("library", Library::new)
    }

    pub fn key_stores(&self) -> Vec<KeyStore<'a>> {
        self.collect("keyStore", KeyStore::new)
    }

    pub fn variables(&self) -> Vec<Variable<'a>> {
        self.collect("variable", Variable::new)
    }

    pub fn http_endpoints(&self) -> Vec<HttpEndpoint<'a>> {
        self.collect("httpEndpoint", HttpEndpoint::new)
    }

    pub fn application_managers(&self) -> Vec<ApplicationManager<'a>> {
        self.collect("applicationManager", ApplicationManager::new)
    }
}

/// `featureManager` element.
#[derive(Debug, Clone, Copy)]
pub struct FeatureManager<'a> {
    node: Node<'a, 'a>,
}

impl<'a> FeatureManager<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "featureManager");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn features(&self) -> Vec<&'a str> {
        self.node
            .children()
            .filter(|c| has_name(*c, "feature"))
            .map(xml::elem_text)
            .collect()
    }
}

/// `dataSource` element.
#[derive(Debug, Clone, Copy)]
pub struct DataSource<'a> {
    node: Node<'a, 'a>,
}

impl<'a> DataSource<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "dataSource");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }

    pub fn ds_type(&self) -> Option<&'a str> {
        self.node.attribute("type")
    }

    pub fn connection_manager_ref(&self) -> Option<&'a str> {
        self.node.attribute("connectionManagerRef")
    }

    pub fn jdbc_drivers(&self) -> Vec<JdbcDriver<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "jdbcDriver"))
            .map(JdbcDriver::new)
            .collect()
    }

    pub fn properties_elements(&self) -> Vec<DataSourceProperties<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "properties"))
            .map(DataSourceProperties::new)
            .collect()
    }
}

/// `properties` element nested under a dataSource.
#[derive(Debug, Clone, Copy)]
pub struct DataSourceProperties<'a> {
    node: Node<'a, 'a>,
}

impl<'a> DataSourceProperties<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "properties");
        assert!(
            node.parent_element()
                .is_some_and(|p| p.tag_name().name() == "dataSource"),
            "properties element outside a dataSource"
        );
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn database_name(&self) -> Option<&'a str> {
        self.node.attribute("databaseName")
    }

    pub fn server_name(&self) -> Option<&'a str> {
        self.node.attribute("serverName")
    }

    pub fn user(&self) -> Option<&'a str> {
        self.node.attribute("user")
    }

    pub fn password(&self) -> Option<&'a str> {
        self.node.attribute("password")
    }

    // In case configuration variables have not yet been resolved

    pub fn port_number_raw(&self) -> Option<&'a str> {
        self.node.attribute("portNumber")
    }

    pub fn port_number(&self) -> Result<Option<i64>, ValueError> {
        opt_int_attr(self.node, "properties", "portNumber")
    }
}

/// `jdbcDriver` element.
#[derive(Debug, Clone, Copy)]
pub struct JdbcDriver<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JdbcDriver<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jdbcDriver");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn library_ref(&self) -> Option<&'a str> {
        self.node.attribute("libraryRef")
    }
}

/// `connectionManager` element.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionManager<'a> {
    node: Node<'a, 'a>,
}

impl<'a> ConnectionManager<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "connectionManager");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn connection_timeout(&self) -> Option<&'a str> {
        self.node.attribute("connectionTimeout")
    }

    pub fn max_idle_time(&self) -> Option<&'a str> {
        self.node.attribute("maxIdleTime")
    }

    // In case configuration variables have not yet been resolved

    pub fn aged_timeout_raw(&self) -> Option<&'a str> {
        self.node.attribute("agedTimeout")
    }

    pub fn aged_timeout(&self) -> Result<i64, ValueError> {
        match self.aged_timeout_raw() {
            Some(v) => xml::parse_int("connectionManager", "agedTimeout", v),
            None => Ok(-1),
        }
    }

    pub fn max_pool_size_raw(&self) -> Option<&'a str> {
        self.node.attribute("maxPoolSize")
    }

    /// Defaults to 50 when the attribute is absent.
    pub fn max_pool_size(&self) -> Result<i64, ValueError> {
        match self.max_pool_size_raw() {
            Some(v) => xml::parse_int("connectionManager", "maxPoolSize", v),
            None => Ok(50),
        }
    }

    pub fn min_pool_size_raw(&self) -> Option<&'a str> {
        self.node.attribute("minPoolSize")
    }

    pub fn min_pool_size(&self) -> Result<Option<i64>, ValueError> {
        opt_int_attr(self.node, "connectionManager", "minPoolSize")
    }

    pub fn reap_time_raw(&self) -> Option<&'a str> {
        self.node.attribute("reapTime")
    }

    pub fn reap_time(&self) -> &'a str {
        self.reap_time_raw().unwrap_or("3m")
    }
}

/// `jndiEntry` element.
#[derive(Debug, Clone, Copy)]
pub struct JndiEntry<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JndiEntry<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jndiEntry");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }

    pub fn value(&self) -> Option<&'a str> {
        self.node.attribute("value")
    }

    // In case configuration variables have not yet been resolved

    pub fn decode_raw(&self) -> Option<&'a str> {
        self.node.attribute("decode")
    }

    /// Defaults to false when the attribute is absent.
    pub fn decode(&self) -> Result<bool, ValueError> {
        match self.decode_raw() {
            Some(v) => xml::parse_bool("jndiEntry", "decode", v),
            None => Ok(false),
        }
    }
}

/// `jmsQueue` element.
#[derive(Debug, Clone, Copy)]
pub struct JmsQueue<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsQueue<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jmsQueue");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }
}

/// `jmsTopic` element.
#[derive(Debug, Clone, Copy)]
pub struct JmsTopic<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsTopic<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jmsTopic");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }
}

/// `jmsConnectionFactory` element.
#[derive(Debug, Clone, Copy)]
pub struct JmsConnectionFactory<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsConnectionFactory<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jmsConnectionFactory");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }

    pub fn connection_manager_ref(&self) -> Option<&'a str> {
        self.node.attribute("connectionManagerRef")
    }
}

/// `jmsQueueConnectionFactory` element.
#[derive(Debug, Clone, Copy)]
pub struct JmsQueueConnectionFactory<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsQueueConnectionFactory<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jmsQueueConnectionFactory");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }

    pub fn connection_manager_ref(&self) -> Option<&'a str> {
        self.node.attribute("connectionManagerRef")
    }
}

/// `jmsTopicConnectionFactory` element.
#[derive(Debug, Clone, Copy)]
pub struct JmsTopicConnectionFactory<'a> {
    node: Node<'a, 'a>,
}

impl<'a> JmsTopicConnectionFactory<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "jmsTopicConnectionFactory");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn jndi_name(&self) -> Option<&'a str> {
        self.node.attribute("jndiName")
    }

    pub fn connection_manager_ref(&self) -> Option<&'a str> {
        self.node.attribute("connectionManagerRef")
    }
}

/// `activationSpec` element.
#[derive(Debug, Clone, Copy)]
pub struct ActivationSpec<'a> {
    node: Node<'a, 'a>,
}

impl<'a> ActivationSpec<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "activationSpec");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn auth_data_ref(&self) -> Option<&'a str> {
        self.node.attribute("authDataRef")
    }

    // In case configuration variables have not yet been resolved

    pub fn auto_start_raw(&self) -> Option<&'a str> {
        self.node.attribute("autoStart")
    }

    /// Defaults to true when the attribute is absent.
    pub fn auto_start(&self) -> Result<bool, ValueError> {
        match self.auto_start_raw() {
            Some(v) => xml::parse_bool("activationSpec", "autoStart", v),
            None => Ok(true),
        }
    }

    pub fn max_endpoints_raw(&self) -> Option<&'a str> {
        self.node.attribute("maxEndpoints")
    }

    /// Defaults to 500 when the attribute is absent.
    pub fn max_endpoints(&self) -> Result<i64, ValueError> {
        match self.max_endpoints_raw() {
            Some(v) => xml::parse_int("activationSpec", "maxEndpoints", v),
            None => Ok(500),
        }
    }
}

/// `library` element.
#[derive(Debug, Clone, Copy)]
pub struct Library<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Library<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "library");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    pub fn filesets(&self) -> Vec<Fileset<'a>> {
        self.node
            .children()
            .filter(|c| has_name(*c, "fileset"))
            .map(Fileset::new)
            .collect()
    }
}

/// `fileset` element nested under a library.
#[derive(Debug, Clone, Copy)]
pub struct Fileset<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Fileset<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "fileset");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn dir(&self) -> Option<&'a str> {
        self.node.attribute("dir")
    }

    pub fn includes(&self) -> Option<&'a str> {
        self.node.attribute("includes")
    }
}

/// `keyStore` element.
#[derive(Debug, Clone, Copy)]
pub struct KeyStore<'a> {
    node: Node<'a, 'a>,
}

impl<'a> KeyStore<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "keyStore");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id_raw(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    /// Defaults to "defaultKeyStore" when the attribute is absent.
    pub fn id(&self) -> &'a str {
        self.id_raw().unwrap_or("defaultKeyStore")
    }

    pub fn location(&self) -> Option<&'a str> {
        self.node.attribute("location")
    }

    pub fn password(&self) -> Option<&'a str> {
        self.node.attribute("password")
    }

    pub fn store_type_raw(&self) -> Option<&'a str> {
        self.node.attribute("type")
    }

    /// Defaults to "PKCS12" when the attribute is absent.
    pub fn store_type(&self) -> &'a str {
        self.store_type_raw().unwrap_or("PKCS12")
    }

    // In case configuration variables have not yet been resolved

    pub fn file_based_raw(&self) -> Option<&'a str> {
        self.node.attribute("fileBased")
    }

    /// Defaults to true when the attribute is absent.
    pub fn file_based(&self) -> Result<bool, ValueError> {
        match self.file_based_raw() {
            Some(v) => xml::parse_bool("keyStore", "fileBased", v),
            None => Ok(true),
        }
    }

    pub fn read_only_raw(&self) -> Option<&'a str> {
        self.node.attribute("readOnly")
    }

    /// Defaults to false when the attribute is absent.
    pub fn read_only(&self) -> Result<bool, ValueError> {
        match self.read_only_raw() {
            Some(v) => xml::parse_bool("keyStore", "readOnly", v),
            None => Ok(false),
        }
    }
}

/// `variable` element.
#[derive(Debug, Clone, Copy)]
pub struct Variable<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Variable<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "variable");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn name(&self) -> Option<&'a str> {
        self.node.attribute("name")
    }

    pub fn value(&self) -> Option<&'a str> {
        self.node.attribute("value")
    }

    pub fn default_value(&self) -> Option<&'a str> {
        self.node.attribute("defaultValue")
    }
}

/// `httpEndpoint` element.
#[derive(Debug, Clone, Copy)]
pub struct HttpEndpoint<'a> {
    node: Node<'a, 'a>,
}

impl<'a> HttpEndpoint<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "httpEndpoint");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attribute("id")
    }

    // In case configuration variables have not yet been resolved

    pub fn http_port_raw(&self) -> Option<&'a str> {
        self.node.attribute("httpPort")
    }

    pub fn http_port(&self) -> Result<Option<i64>, ValueError> {
        opt_int_attr(self.node, "httpEndpoint", "httpPort")
    }

    pub fn https_port_raw(&self) -> Option<&'a str> {
        self.node.attribute("httpsPort")
    }

    pub fn https_port(&self) -> Result<Option<i64>, ValueError> {
        opt_int_attr(self.node, "httpEndpoint", "httpsPort")
    }

    pub fn host_raw(&self) -> Option<&'a str> {
        self.node.attribute("host")
    }

    /// Defaults to "localhost" when the attribute is absent.
    pub fn host(&self) -> &'a str {
        self.host_raw().unwrap_or("localhost")
    }
}

/// `applicationManager` element.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationManager<'a> {
    node: Node<'a, 'a>,
}

impl<'a> ApplicationManager<'a> {
    pub fn new(node: Node<'a, 'a>) -> Self {
        expect_name(node, "applicationManager");
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        self.node
    }

    pub fn expand_location(&self) -> Option<&'a str> {
        self.node.attribute("expandLocation")
    }

    pub fn start_timeout(&self) -> Option<&'a str> {
        self.node.attribute("startTimeout")
    }

    pub fn stop_timeout(&self) -> Option<&'a str> {
        self.node.attribute("stopTimeout")
    }

    // In case configuration variables have not yet been resolved

    pub fn auto_expand_raw(&self) -> Option<&'a str> {
        self.node.attribute("autoExpand")
    }

    /// Defaults to false when the attribute is absent.
    pub fn auto_expand(&self) -> Result<bool, ValueError> {
        match self.auto_expand_raw() {
            Some(v) => xml::parse_bool("applicationManager", "autoExpand", v),
            None => Ok(false),
        }
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Tagged view over a server.xml declaration provisioned under a JNDI name.
#[derive(Debug, Clone, Copy)]
pub enum ServerResource<'a> {
    DataSource(DataSource<'a>),
    JmsConnectionFactory(JmsConnectionFactory<'a>),
    JmsQueue(JmsQueue<'a>),
    JmsQueueConnectionFactory(JmsQueueConnectionFactory<'a>),
    JmsTopic(JmsTopic<'a>),
    JmsTopicConnectionFactory(JmsTopicConnectionFactory<'a>),
    JndiEntry(JndiEntry<'a>),
}

impl<'a> ServerResource<'a> {
    /// Pure qualified-name dispatch; unrecognized nodes are no match,
    /// never an error.
    pub fn classify(node: Node<'a, 'a>) -> Option<Self> {
        if node.tag_name().namespace().is_some() {
            return None;
        }
        match node.tag_name().name() {
            "dataSource" => Some(Self::DataSource(DataSource::new(node))),
            "jmsConnectionFactory" => {
                Some(Self::JmsConnectionFactory(JmsConnectionFactory::new(node)))
            }
            "jmsQueue" => Some(Self::JmsQueue(JmsQueue::new(node))),
            "jmsQueueConnectionFactory" => Some(Self::JmsQueueConnectionFactory(
                JmsQueueConnectionFactory::new(node),
            )),
            "jmsTopic" => Some(Self::JmsTopic(JmsTopic::new(node))),
            "jmsTopicConnectionFactory" => Some(Self::JmsTopicConnectionFactory(
                JmsTopicConnectionFactory::new(node),
            )),
            "jndiEntry" => Some(Self::JndiEntry(JndiEntry::new(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'a, 'a> {
        match self {
            Self::DataSource(v) => v.node(),
            Self::JmsConnectionFactory(v) => v.node(),
            Self::JmsQueue(v) => v.node(),
            Self::JmsQueueConnectionFactory(v) => v.node(),
            Self::JmsTopic(v) => v.node(),
            Self::JmsTopicConnectionFactory(v) => v.node(),
            Self::JndiEntry(v) => v.node(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataSource(_) => "dataSource",
            Self::JmsConnectionFactory(_) => "jmsConnectionFactory",
            Self::JmsQueue(_) => "jmsQueue",
            Self::JmsQueueConnectionFactory(_) => "jmsQueueConnectionFactory",
            Self::JmsTopic(_) => "jmsTopic",
            Self::JmsTopicConnectionFactory(_) => "jmsTopicConnectionFactory",
            Self::JndiEntry(_) => "jndiEntry",
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node().attribute("id")
    }
}

impl<'a> ServerJndiResource<'a> for ServerResource<'a> {
    fn jndi_name(&self) -> Option<&'a str> {
        self.node().attribute("jndiName")
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Present values parse to themselves and absent ones fall back to
        // the documented default; the raw accessor always tells the two
        // cases apart.
        #[test]
        fn prop_max_pool_size_default_vs_present(value in proptest::option::of(0i64..100_000)) {
            let text = match value {
                Some(v) => format!(r#"<connectionManager maxPoolSize="{v}"/>"#),
                None => "<connectionManager/>".to_string(),
            };
            let doc = roxmltree::Document::parse(&text).unwrap();
            let cm = ConnectionManager::new(doc.root_element());

            match value {
                Some(v) => {
                    let v_str = v.to_string();
                    prop_assert_eq!(cm.max_pool_size_raw(), Some(v_str.as_str()));
                    prop_assert_eq!(cm.max_pool_size(), Ok(v));
                }
                None => {
                    prop_assert_eq!(cm.max_pool_size_raw(), None);
                    prop_assert_eq!(cm.max_pool_size(), Ok(50));
                }
            }
        }

        // Any element name outside the registration table is no match,
        // never a panic.
        #[test]
        fn prop_server_classifier_is_total(name in "[a-z][a-zA-Z0-9]{0,20}") {
            prop_assume!(!SERVER_RESOURCE_LOCAL_NAMES.contains(&name.as_str()));
            let text = format!("<{name}/>");
            let doc = roxmltree::Document::parse(&text).unwrap();
            prop_assert!(ServerResource::classify(doc.root_element()).is_none());
        }
    }
}
