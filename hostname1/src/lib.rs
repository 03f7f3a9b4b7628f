//! hostname1 - client for systemd-hostnamed over D-Bus
//!
//! Opens a private, EXTERNAL-authenticated connection to the system bus and
//! binds to `org.freedesktop.hostname1` at `/org/freedesktop/hostname1`.
//! Setters map 1:1 to hostnamed methods; getters decode the exported
//! properties into [`PropertyValue`].
//!
//! ```no_run
//! use hostname1::Hostname1;
//!
//! let client = Hostname1::new()?;
//! println!("{}", client.static_hostname()?);
//! client.set_pretty_hostname("Build Box", true)?;
//! client.close()?;
//! # Ok::<(), hostname1::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod value;

pub use client::{Hostname1, INTERFACE, OBJECT_PATH, SERVICE};
pub use config::BusConfig;
pub use error::{Error, Result};
pub use transport::{Transport, ZbusTransport};
pub use value::PropertyValue;
