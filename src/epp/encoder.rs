//! Encoder factory and per-provider encoder instances
//!
//! `Encoder::generate` resolves the provider's namespace table once,
//! constructs a handler for each enabled extension, and returns an
//! immutable instance. Every command method is a pure function of the
//! caller data and that configuration, so one instance can be shared
//! freely across threads and reused for any number of commands.

use crate::epp::config::{NsBinding, ProviderConfig};
use crate::epp::contact::{self, ContactCheck, ContactCreate, ContactDelete, ContactUpdate};
use crate::epp::domain::{
    self, DomainCheck, DomainCreate, DomainDelete, DomainTransfer, DomainUpdate,
};
use crate::epp::envelope;
use crate::epp::errors::{ConfigurationError, Result};
use crate::epp::extensions::keyvalue::{self, KeyValue};
use crate::epp::extensions::secdns::{self, SecDns};
use crate::epp::host::{self, HostCheck, HostCreate, HostDelete, HostUpdate};
use crate::epp::session::{self, Login};
use crate::epp::tree::Element;

/// A command encoder bound to one provider configuration.
///
/// Extension support is structural: the secDNS and key/value handlers
/// exist only when the provider enables them, and their accessors return
/// `Option` so absence is visible without any runtime type checks.
#[derive(Debug, Clone)]
pub struct Encoder {
    provider: String,
    config: ProviderConfig,
    epp_ns: NsBinding,
    domain_ns: NsBinding,
    contact_ns: NsBinding,
    host_ns: NsBinding,
    sec_dns: Option<SecDns>,
    key_value: Option<KeyValue>,
}

fn resolve(provider: &str, config: &ProviderConfig, prefix: &str) -> Result<NsBinding> {
    match config.namespace(prefix) {
        Some(ns) => Ok(NsBinding::new(prefix, ns)),
        None => Err(ConfigurationError::MissingNamespace {
            provider: provider.to_string(),
            prefix: prefix.to_string(),
        }
        .into()),
    }
}

impl Encoder {
    /// Construct the encoder for a provider. Fails when the base object
    /// namespaces are missing or an enabled extension is unknown or lacks
    /// its namespace declaration. This is the only place extension
    /// composition happens; the instance never changes afterwards.
    pub fn generate(provider: &str, config: ProviderConfig) -> Result<Encoder> {
        let epp_ns = resolve(provider, &config, "epp")?;
        let domain_ns = resolve(provider, &config, "domain")?;
        let contact_ns = resolve(provider, &config, "contact")?;
        let host_ns = resolve(provider, &config, "host")?;

        let mut sec_dns = None;
        let mut key_value = None;
        for id in &config.extensions {
            match id.as_str() {
                secdns::EXTENSION_ID => {
                    sec_dns = Some(SecDns::new(resolve(provider, &config, secdns::PREFIX)?));
                }
                keyvalue::EXTENSION_ID => {
                    key_value =
                        Some(KeyValue::new(resolve(provider, &config, keyvalue::PREFIX)?));
                }
                unknown => {
                    return Err(ConfigurationError::UnknownExtension {
                        provider: provider.to_string(),
                        id: unknown.to_string(),
                    }
                    .into());
                }
            }
        }

        log::debug!(
            "{}: encoder ready (secDNS: {}, keyvalue: {})",
            provider,
            sec_dns.is_some(),
            key_value.is_some()
        );

        Ok(Encoder {
            provider: provider.to_string(),
            config,
            epp_ns,
            domain_ns,
            contact_ns,
            host_ns,
            sec_dns,
            key_value,
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The secDNS extension handler, when this provider enables it.
    pub fn sec_dns(&self) -> Option<&SecDns> {
        self.sec_dns.as_ref()
    }

    /// The key/value extension handler, when this provider enables it.
    pub fn key_value(&self) -> Option<&KeyValue> {
        self.key_value.as_ref()
    }

    fn wrap(&self, body: Element, extensions: Vec<Element>, cl_trid: &str) -> Element {
        envelope::command(&self.epp_ns, body, extensions, cl_trid)
    }

    // session

    pub fn hello(&self) -> Element {
        envelope::hello(&self.epp_ns)
    }

    pub fn login(&self, data: &Login, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(session::login(&self.config, data)?, Vec::new(), cl_trid))
    }

    pub fn logout(&self, cl_trid: &str) -> Element {
        self.wrap(session::logout(), Vec::new(), cl_trid)
    }

    // domain

    pub fn check_domain(&self, data: &DomainCheck, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(domain::check(&self.domain_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn create_domain(&self, data: &DomainCreate, cl_trid: &str) -> Result<Element> {
        self.create_domain_with_extensions(data, Vec::new(), cl_trid)
    }

    /// Create with extension payloads built through the extension
    /// handlers; they land in the envelope's `<extension>` section.
    pub fn create_domain_with_extensions(
        &self,
        data: &DomainCreate,
        extensions: Vec<Element>,
        cl_trid: &str,
    ) -> Result<Element> {
        Ok(self.wrap(domain::create(&self.domain_ns, data)?, extensions, cl_trid))
    }

    pub fn delete_domain(&self, data: &DomainDelete, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(domain::delete(&self.domain_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn update_domain(&self, data: &DomainUpdate, cl_trid: &str) -> Result<Element> {
        self.update_domain_with_extensions(data, Vec::new(), cl_trid)
    }

    pub fn update_domain_with_extensions(
        &self,
        data: &DomainUpdate,
        extensions: Vec<Element>,
        cl_trid: &str,
    ) -> Result<Element> {
        Ok(self.wrap(domain::update(&self.domain_ns, data)?, extensions, cl_trid))
    }

    pub fn transfer_domain(&self, data: &DomainTransfer, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(domain::transfer(&self.domain_ns, data)?, Vec::new(), cl_trid))
    }

    // contact

    pub fn check_contact(&self, data: &ContactCheck, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(contact::check(&self.contact_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn create_contact(&self, data: &ContactCreate, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(contact::create(&self.contact_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn delete_contact(&self, data: &ContactDelete, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(contact::delete(&self.contact_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn update_contact(&self, data: &ContactUpdate, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(contact::update(&self.contact_ns, data)?, Vec::new(), cl_trid))
    }

    // host

    pub fn check_host(&self, data: &HostCheck, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(host::check(&self.host_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn create_host(&self, data: &HostCreate, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(host::create(&self.host_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn delete_host(&self, data: &HostDelete, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(host::delete(&self.host_ns, data)?, Vec::new(), cl_trid))
    }

    pub fn update_host(&self, data: &HostUpdate, cl_trid: &str) -> Result<Element> {
        Ok(self.wrap(host::update(&self.host_ns, data)?, Vec::new(), cl_trid))
    }
}
