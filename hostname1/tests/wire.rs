//! `ZbusTransport` against an in-process hostnamed served over a
//! peer-to-peer zbus connection.
//!
//! The fake service records the interface, member and `(s, b)` body of every
//! setter call as received on the wire.

use std::os::unix::net::UnixStream;
use std::sync::{Arc, Mutex};
use std::thread;

use hostname1::{Error, Hostname1, PropertyValue, ZbusTransport, OBJECT_PATH};
use zbus::blocking::connection::Builder;
use zbus::blocking::Connection;
use zbus::message::Header;

type Call = (String, String, bool);

#[derive(Clone, Default)]
struct FakeHostnamed {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeHostnamed {
    fn record(&self, header: &Header<'_>, value: String, interactive: bool) {
        let member = format!(
            "{}.{}",
            header.interface().map(|i| i.to_string()).unwrap_or_default(),
            header.member().map(|m| m.to_string()).unwrap_or_default()
        );
        self.calls
            .lock()
            .unwrap()
            .push((member, value, interactive));
    }
}

#[zbus::interface(name = "org.freedesktop.hostname1")]
impl FakeHostnamed {
    fn set_hostname(&self, #[zbus(header)] header: Header<'_>, name: String, interactive: bool) {
        self.record(&header, name, interactive);
    }

    fn set_static_hostname(
        &self,
        #[zbus(header)] header: Header<'_>,
        name: String,
        interactive: bool,
    ) {
        self.record(&header, name, interactive);
    }

    fn set_pretty_hostname(
        &self,
        #[zbus(header)] header: Header<'_>,
        name: String,
        interactive: bool,
    ) {
        self.record(&header, name, interactive);
    }

    fn set_chassis(
        &self,
        #[zbus(header)] header: Header<'_>,
        name: String,
        interactive: bool,
    ) -> zbus::fdo::Result<()> {
        self.record(&header, name.clone(), interactive);
        Err(zbus::fdo::Error::AccessDenied(format!(
            "not allowed to set chassis {name}"
        )))
    }

    #[zbus(property)]
    fn hostname(&self) -> String {
        "node-1".to_string()
    }

    #[zbus(property)]
    fn static_hostname(&self) -> String {
        "build-42".to_string()
    }

    #[zbus(property)]
    fn firmware_date(&self) -> u64 {
        1_600_000_000_000_000
    }

    /// Deliberately mistyped, to exercise the typed getters.
    #[zbus(property)]
    fn icon_name(&self) -> u32 {
        7
    }
}

/// Client adapter wired to a fake hostnamed. The server connection must be
/// kept alive for the duration of the test.
fn fake_hostnamed() -> (Hostname1, FakeHostnamed, Connection) {
    let service = FakeHostnamed::default();
    let handle = service.clone();
    let (client_socket, server_socket) = UnixStream::pair().expect("socket pair");

    let server = thread::spawn(move || {
        Builder::unix_stream(server_socket)
            .server(zbus::Guid::generate())?
            .p2p()
            .serve_at(OBJECT_PATH, service)?
            .build()
    });
    let client = Builder::unix_stream(client_socket)
        .p2p()
        .build()
        .expect("client connection");
    let server = server
        .join()
        .expect("server thread")
        .expect("server connection");

    let transport = ZbusTransport::from_connection(client).expect("bind transport");
    (Hostname1::with_transport(transport), handle, server)
}

fn calls(service: &FakeHostnamed) -> Vec<Call> {
    service.calls.lock().unwrap().clone()
}

#[test]
fn test_setters_send_qualified_member_and_sb_body() {
    let (client, service, _server) = fake_hostnamed();

    client.set_static_hostname("build-42", false).unwrap();
    client.set_hostname("node-2", true).unwrap();
    client.set_pretty_hostname("Build Box", false).unwrap();

    let expected: Vec<Call> = vec![
        ("org.freedesktop.hostname1.SetStaticHostname".into(), "build-42".into(), false),
        ("org.freedesktop.hostname1.SetHostname".into(), "node-2".into(), true),
        ("org.freedesktop.hostname1.SetPrettyHostname".into(), "Build Box".into(), false),
    ];
    assert_eq!(calls(&service), expected);
}

#[test]
fn test_remote_error_returned_with_name_and_message() {
    let (client, service, _server) = fake_hostnamed();

    let err = client.set_chassis("server", true).unwrap_err();

    match err {
        Error::Remote { name, message } => {
            assert_eq!(name, "org.freedesktop.DBus.Error.AccessDenied");
            assert_eq!(message.as_deref(), Some("not allowed to set chassis server"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(calls(&service).len(), 1);
}

#[test]
fn test_get_all_decodes_property_set() {
    let (client, _service, _server) = fake_hostnamed();

    let properties = client.properties().unwrap();

    let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["FirmwareDate", "Hostname", "IconName", "StaticHostname"]
    );
    assert_eq!(properties["Hostname"], PropertyValue::Str("node-1".to_string()));
    assert_eq!(
        properties["FirmwareDate"],
        PropertyValue::UInt64(1_600_000_000_000_000)
    );
    assert_eq!(properties["IconName"], PropertyValue::UInt32(7));
}

#[test]
fn test_get_decodes_single_property() {
    let (client, _service, _server) = fake_hostnamed();

    assert_eq!(client.hostname().unwrap(), "node-1");
    assert_eq!(client.static_hostname().unwrap(), "build-42");
}

#[test]
fn test_typed_getter_reports_wire_type() {
    let (client, _service, _server) = fake_hostnamed();

    match client.icon_name().unwrap_err() {
        Error::TypeMismatch {
            property, found, ..
        } => {
            assert_eq!(property, "IconName");
            assert_eq!(found, "uint32");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_property_is_remote_error() {
    let (client, _service, _server) = fake_hostnamed();

    let err = client.property("NoSuchProperty").unwrap_err();

    assert!(
        matches!(err, Error::Remote { ref name, .. } if name == "org.freedesktop.DBus.Error.UnknownProperty"),
        "{err:?}"
    );
}

#[test]
fn test_close_releases_connection() {
    let (client, _service, _server) = fake_hostnamed();

    client.close().unwrap();
}
