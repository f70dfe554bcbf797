extern crate netmanage;

use env_logger::{
    Builder,
    Target,
};
use log::LevelFilter;
use netmanage::mapping::{
    transform_table,
    Row,
    Schema,
};
use netmanage::tmsh::{
    collect_blocks,
    decode,
};

// flip this on to see what the decoder and the mapping engine are up to
const ENABLE_LOGGING: bool = false;
const DEVICE: &str = "bigip1.example.com";

const INTERFACE_DUMP: &str = "net interface 1.0 {
    if-index 542
    mac-address 00:94:a1:91:23:44
    media-active 1000SX-FD
    media-max 1000T-FD
    module-description \"F5 Qualified Optic\"
    mtu 9198
    serial N395NEY
    vendor \"F5 NETWORKS INC.\"
    vendor-oui 009065
    vendor-partnum OPT-0010
    vendor-revision 00
}";

const SELF_IP_DUMP: &str = "net self external {
    address 10.1.10.5/24
    allow-service {
        tcp:443
        tcp:ssh
    }
    traffic-group traffic-group-local-only
    vlan external
}
net self internal {
    address 10.1.20.5/24
    allow-service none
    vlan internal
}";

/// Enable (or not) some logging for our demo.
fn enable_logging() {
    if !ENABLE_LOGGING {
        return;
    }

    let mut builder = Builder::from_default_env();

    builder.target(Target::Stdout);
    builder.filter_level(LevelFilter::Trace);

    builder.init();
}

/// A row the way a PAN-OS BGP peer collector hands it over.
fn panos_bgp_row() -> Row {
    [
        ("timestamp", "2023-09-05_1456"),
        ("device", "pa-edge-1"),
        ("@peer", "isp-a"),
        ("@vr", "default"),
        ("peer-group", "AS65001-TRANSIT"),
        ("remote-as", "65001"),
        ("status", "Established"),
        ("status-duration", "90000"),
        ("peer-address", "203.0.113.1:179"),
        ("local-address", "203.0.113.2:35211"),
        ("some-vendor-field", "dropped"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_owned(), Some((*v).to_owned())))
    .collect()
}

/// Decode a tmsh dump, flatten a multi block dump into a table and normalize a collector row with
/// the built in schema, printing each step.
fn main() {
    enable_logging();

    let interface = decode(INTERFACE_DUMP).expect("failed decoding interface dump");

    println!("decoded interface:\n{interface:#?}\n");

    let self_ips =
        collect_blocks(DEVICE, SELF_IP_DUMP, "net self").expect("failed collecting self ips");

    println!("self ip columns: {:?}", self_ips.columns());

    for row in self_ips.rows() {
        println!("{row:?}");
    }

    let schema = Schema::builtin().expect("failed loading built in schema");

    let table = transform_table("PANOS_BGP_NEIGHBORS", &[panos_bgp_row()], schema)
        .expect("failed transforming bgp neighbors");

    println!("\nbgp neighbor columns: {:?}", table.columns());

    for row in table.rows() {
        println!("{row:?}");
    }
}
