//! Bus address selection.
//!
//! By default the client talks to the system bus, letting zbus resolve the
//! socket (`DBUS_SYSTEM_BUS_ADDRESS`, then the well-known system socket).
//! `HOSTNAME1_BUS_ADDRESS` or an explicit address overrides that.
//!
//! The identity offered for EXTERNAL authentication is the numeric real uid
//! of the process unless one is injected with [`BusConfig::with_uid`].

use std::fmt;

use crate::error::{Error, Result};

/// Environment variable holding a bus address override.
pub const ADDRESS_ENV: &str = "HOSTNAME1_BUS_ADDRESS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusConfig {
    address: Option<String>,
    uid: Option<u32>,
}

impl BusConfig {
    /// Connect to the system bus.
    pub fn system() -> Self {
        Self::default()
    }

    /// Connect to an explicit D-Bus address such as `unix:path=/run/dbus/system_bus_socket`.
    pub fn with_address(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(Error::Config("bus address must not be empty".to_string()));
        }
        Ok(Self {
            address: Some(address),
            uid: None,
        })
    }

    /// Authenticate as `uid` instead of the process's real uid.
    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Read the override from `HOSTNAME1_BUS_ADDRESS`, falling back to the system bus.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(ADDRESS_ENV) {
            Some(address) => Self::with_address(address)
                .map_err(|_| Error::Config(format!("{ADDRESS_ENV} is set but empty"))),
            None => Ok(Self::system()),
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Numeric uid sent with `AUTH EXTERNAL`.
    pub fn uid(&self) -> u32 {
        self.uid.unwrap_or_else(process_uid)
    }
}

fn process_uid() -> u32 {
    // SAFETY: getuid has no preconditions and cannot fail
    unsafe { libc::getuid() }
}

impl fmt::Display for BusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) => f.write_str(address),
            None => f.write_str("system bus"),
        }
    }
}
