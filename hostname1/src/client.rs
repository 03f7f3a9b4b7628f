//! systemd-hostnamed D-Bus client.
//!
//! ## D-Bus Interface
//!
//! - **Bus**: System bus (`org.freedesktop.hostname1`)
//! - **Path**: `/org/freedesktop/hostname1`
//! - **Interface**: `org.freedesktop.hostname1`
//!
//! ## Authorization
//!
//! hostnamed checks polkit for every setter. Passing `ask_for_auth = true`
//! lets polkit prompt interactively when the caller is not already allowed.

use std::collections::BTreeMap;

use crate::config::BusConfig;
use crate::error::{Error, Result};
use crate::transport::{Transport, ZbusTransport};
use crate::value::PropertyValue;

/// Well-known bus name of hostnamed.
pub const SERVICE: &str = "org.freedesktop.hostname1";
pub const OBJECT_PATH: &str = "/org/freedesktop/hostname1";
pub const INTERFACE: &str = "org.freedesktop.hostname1";

/// Client bound to the hostnamed object.
///
/// Each instance owns one private connection. Calls are blocking and not
/// meant to be issued concurrently on the same instance.
pub struct Hostname1<T: Transport = ZbusTransport> {
    transport: T,
}

impl Hostname1 {
    /// Connect to hostnamed on the system bus.
    pub fn new() -> Result<Self> {
        Self::connect(&BusConfig::system())
    }

    /// Connect to hostnamed on the bus described by `config`.
    pub fn connect(config: &BusConfig) -> Result<Self> {
        let transport = ZbusTransport::connect(config)?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> Hostname1<T> {
    /// Wrap an already established transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<()> {
        self.transport.close()
    }

    /// All hostnamed properties, keyed by property name.
    pub fn properties(&self) -> Result<BTreeMap<String, PropertyValue>> {
        self.transport.get_all(INTERFACE)
    }

    /// A single property. Unknown names are reported by hostnamed.
    pub fn property(&self, name: &str) -> Result<PropertyValue> {
        self.transport.get(INTERFACE, name)
    }

    /// The transient (dynamic) hostname.
    pub fn hostname(&self) -> Result<String> {
        self.string_property("Hostname")
    }

    /// The static hostname stored in `/etc/hostname`.
    pub fn static_hostname(&self) -> Result<String> {
        self.string_property("StaticHostname")
    }

    /// The pretty (free-form UTF-8) hostname.
    pub fn pretty_hostname(&self) -> Result<String> {
        self.string_property("PrettyHostname")
    }

    /// The icon name, following the XDG icon naming spec.
    pub fn icon_name(&self) -> Result<String> {
        self.string_property("IconName")
    }

    /// The chassis type (desktop, laptop, server, vm, ...).
    pub fn chassis(&self) -> Result<String> {
        self.string_property("Chassis")
    }

    /// Set the transient hostname.
    pub fn set_hostname(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetHostname", name, ask_for_auth)
    }

    /// Set the static hostname.
    pub fn set_static_hostname(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetStaticHostname", name, ask_for_auth)
    }

    /// Set the pretty (free-form UTF-8) hostname.
    pub fn set_pretty_hostname(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetPrettyHostname", name, ask_for_auth)
    }

    /// Set the icon name, following the XDG icon naming spec.
    pub fn set_icon_name(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetIconName", name, ask_for_auth)
    }

    /// Set the chassis type (desktop, laptop, server, vm, ...).
    pub fn set_chassis(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetChassis", name, ask_for_auth)
    }

    /// Set the deployment environment (development, staging, production, ...).
    pub fn set_deployment(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetDeployment", name, ask_for_auth)
    }

    /// Set the free-form location string.
    pub fn set_location(&self, name: &str, ask_for_auth: bool) -> Result<()> {
        self.set("SetLocation", name, ask_for_auth)
    }

    fn set(&self, method: &str, value: &str, ask_for_auth: bool) -> Result<()> {
        self.transport.call(INTERFACE, method, value, ask_for_auth)
    }

    fn string_property(&self, name: &str) -> Result<String> {
        self.property(name)?
            .into_string()
            .map_err(|value| Error::TypeMismatch {
                property: name.to_string(),
                expected: "string",
                found: value.type_name().to_string(),
            })
    }
}
