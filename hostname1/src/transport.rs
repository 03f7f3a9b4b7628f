//! Bus transport used by [`Hostname1`](crate::Hostname1).
//!
//! [`Transport`] is the narrow set of bus operations the client needs.
//! [`ZbusTransport`] implements it over a private blocking zbus connection.
//!
//! ## Authentication
//!
//! Only the EXTERNAL (peer credential) mechanism is offered, with the numeric
//! uid from [`BusConfig::uid`] as the authorization identity. No passwd lookup
//! is involved.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use zbus::blocking::connection::Builder;
use zbus::blocking::fdo::PropertiesProxy;
use zbus::blocking::Connection;
use zbus::names::InterfaceName;
use zbus::proxy::CacheProperties;
use zbus::zvariant::OwnedValue;
use zbus::AuthMechanism;

use crate::client::{OBJECT_PATH, SERVICE};
use crate::config::BusConfig;
use crate::error::{Error, Result};
use crate::value::PropertyValue;

/// Request/response operations against the hostnamed object.
pub trait Transport {
    /// `org.freedesktop.DBus.Properties.GetAll` for `interface`.
    fn get_all(&self, interface: &str) -> Result<BTreeMap<String, PropertyValue>>;

    /// `org.freedesktop.DBus.Properties.Get` for `interface` and `property`.
    fn get(&self, interface: &str, property: &str) -> Result<PropertyValue>;

    /// Invoke `interface.method` with a `(value, ask_for_auth)` body.
    fn call(&self, interface: &str, method: &str, value: &str, ask_for_auth: bool) -> Result<()>;

    /// Release the connection.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Transport backed by a private zbus connection.
pub struct ZbusTransport {
    connection: Connection,
    properties: PropertiesProxy<'static>,
}

impl ZbusTransport {
    /// Open a new connection and complete the authentication and `Hello` handshake.
    ///
    /// Each call creates its own connection. If any step fails the socket is
    /// dropped before the error is returned.
    pub fn connect(config: &BusConfig) -> Result<Self> {
        let uid = config.uid();
        let builder = match config.address() {
            Some(address) => Builder::address(address),
            None => Builder::system(),
        };

        let connection = builder
            .and_then(|builder| {
                builder
                    .auth_mechanism(AuthMechanism::External)
                    .user_id(uid)
                    .build()
            })
            .map_err(|source| Error::Connect {
                address: config.to_string(),
                source,
            })?;

        debug!(
            address = %config,
            uid,
            unique_name = ?connection.unique_name(),
            "Connected to bus"
        );

        Self::from_connection(connection)
    }

    /// Bind to hostnamed over an already established connection.
    pub fn from_connection(connection: Connection) -> Result<Self> {
        let properties = PropertiesProxy::builder(&connection)
            .destination(SERVICE)?
            .path(OBJECT_PATH)?
            .cache_properties(CacheProperties::No)
            .build()?;

        Ok(Self {
            connection,
            properties,
        })
    }
}

fn interface_name(interface: &str) -> Result<InterfaceName<'_>> {
    InterfaceName::try_from(interface).map_err(|err| Error::Bus(err.into()))
}

impl Transport for ZbusTransport {
    fn get_all(&self, interface: &str) -> Result<BTreeMap<String, PropertyValue>> {
        debug!(interface, "Reading all hostnamed properties");
        let properties: HashMap<String, OwnedValue> = self
            .properties
            .get_all(interface_name(interface)?)?;

        Ok(properties
            .into_iter()
            .map(|(name, value)| {
                let value = PropertyValue::from(&*value);
                (name, value)
            })
            .collect())
    }

    fn get(&self, interface: &str, property: &str) -> Result<PropertyValue> {
        debug!(interface, property, "Reading hostnamed property");
        let value = self.properties.get(interface_name(interface)?, property)?;
        Ok(PropertyValue::from(&*value))
    }

    fn call(&self, interface: &str, method: &str, value: &str, ask_for_auth: bool) -> Result<()> {
        debug!(interface, member = method, "Calling hostnamed");
        self.connection.call_method(
            Some(SERVICE),
            OBJECT_PATH,
            Some(interface),
            method,
            &(value, ask_for_auth),
        )?;
        Ok(())
    }

    fn close(self) -> Result<()> {
        debug!("Closing bus connection");
        drop(self.properties);
        self.connection.close()?;
        Ok(())
    }
}
