//! Schema mapping tests

use netmanage::errors::MappingError;
use netmanage::mapping::{
    transform_row,
    transform_table,
    Row,
    Schema,
};

fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| ((*k).to_owned(), Some((*v).to_owned())))
        .collect()
}

fn builtin() -> &'static Schema {
    Schema::builtin().expect("embedded schema should load")
}

fn cell<'a>(
    row: &'a Row,
    key: &str,
) -> Option<&'a str> {
    row.get(key).and_then(Option::as_deref)
}

mod row_tests {
    use super::*;

    #[test]
    fn test_address_with_port_is_split() {
        let out = transform_row(
            "PANOS_BGP_NEIGHBORS",
            &row(&[("local-address", "10.0.0.1:179")]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(cell(&out, "local_address"), Some("10.0.0.1"));
        assert_eq!(cell(&out, "local_address_port"), Some("179"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_address_without_port_has_no_port_column() {
        let out = transform_row(
            "PANOS_BGP_NEIGHBORS",
            &row(&[("local-address", "10.0.0.1")]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(cell(&out, "local_address"), Some("10.0.0.1"));
        assert!(!out.contains_key("local_address_port"));
    }

    #[test]
    fn test_address_with_non_numeric_suffix_keeps_value() {
        let out = transform_row(
            "PANOS_BGP_NEIGHBORS",
            &row(&[("peer-address", "10.0.0.2:bgp")]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(cell(&out, "remote_address"), Some("10.0.0.2:bgp"));
        assert!(!out.contains_key("remote_address_port"));
    }

    #[test]
    fn test_function_result_is_keyed_by_source_field() {
        let out = transform_row(
            "PANOS_BGP_NEIGHBORS",
            &row(&[
                ("timestamp", "2023-09-05_1456"),
                ("status-duration", "90000"),
            ]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(cell(&out, "timestamp"), Some("2023-09-05 14:56:00"));
        assert_eq!(cell(&out, "status-duration"), Some("up for 1d1h"));
        assert!(!out.contains_key("status_duration"));
    }

    #[test]
    fn test_zero_timer_is_empty_cell() {
        let out = transform_row(
            "PANOS_BGP_NEIGHBORS",
            &row(&[("status-duration", "0")]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(out.get("status-duration"), Some(&None));
    }

    #[test]
    fn test_device_domain_split() {
        let out = transform_row(
            "IOS_BGP_NEIGHBORS",
            &row(&[
                ("device", "rtr1.dc1.example.com"),
                ("bgp_neighbor", "10.255.0.1"),
            ]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(cell(&out, "device"), Some("rtr1"));
        assert_eq!(cell(&out, "domain"), Some("dc1.example.com"));
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            ["bgp_neighbor", "device", "domain"]
        );
    }

    #[test]
    fn test_unknown_fields_are_dropped_and_renames_applied() {
        let out = transform_row(
            "BIGIP_ARP_TABLE",
            &row(&[
                ("device", "bigip1"),
                ("Address", "10.1.1.1"),
                ("HWaddress", "00:94:a1:91:23:44"),
                ("Interface", "1.1"),
            ]),
            builtin(),
        )
        .expect("should transform");

        assert_eq!(
            out,
            row(&[
                ("device", "bigip1"),
                ("ip_address", "10.1.1.1"),
                ("mac_address", "00:94:a1:91:23:44"),
            ])
        );
    }

    #[test]
    fn test_bad_timestamp_is_format_error() {
        let result = transform_row(
            "IOS_ARP_TABLE",
            &row(&[("timestamp", "2023-09-05 14:56")]),
            builtin(),
        );

        assert!(matches!(result, Err(MappingError::Format(err)) if err.value == "2023-09-05 14:56"));
    }

    #[test]
    fn test_unknown_table() {
        assert!(matches!(
            transform_row("UNKNOWN_TABLE", &row(&[("device", "x")]), builtin()),
            Err(MappingError::UnknownTable(_))
        ));
    }
}

mod table_tests {
    use super::*;

    #[test]
    fn test_unknown_table() {
        let result = transform_table("UNKNOWN_TABLE", &[row(&[("device", "x")])], builtin());

        assert!(matches!(result, Err(MappingError::UnknownTable(name)) if name == "UNKNOWN_TABLE"));
        assert!(transform_table("UNKNOWN_TABLE", &[], builtin()).is_err());
    }

    #[test]
    fn test_empty_rows_for_known_table() {
        let table = transform_table("IOS_ARP_TABLE", &[], builtin()).expect("should transform");

        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_policy_columns_first_extras_after() {
        let schema = Schema::from_yaml(
            "
tables:
  NEIGHBORS:
    vrf: vrf
    peer: neighbor
    host: device
column-order:
  NEIGHBORS: [device, neighbor]
",
        )
        .expect("valid schema");

        let table = transform_table(
            "NEIGHBORS",
            &[row(&[
                ("host", "r1"),
                ("peer", "10.0.0.2"),
                ("vrf", "blue"),
            ])],
            &schema,
        )
        .expect("should transform");

        assert_eq!(table.columns(), ["device", "neighbor", "vrf"]);
    }

    #[test]
    fn test_panos_neighbors_follow_policy_and_keep_row_order() {
        let rows = [
            row(&[
                ("timestamp", "2023-09-05_1456"),
                ("device", "pa-1"),
                ("@peer", "isp-a"),
                ("@vr", "default"),
                ("status-duration", "604800"),
                ("peer-address", "203.0.113.1:179"),
                ("local-address", "203.0.113.2"),
            ]),
            row(&[
                ("device", "pa-2"),
                ("@peer", "isp-b"),
                ("local-address", "198.51.100.2:40000"),
            ]),
        ];

        let table =
            transform_table("PANOS_BGP_NEIGHBORS", &rows, builtin()).expect("should transform");

        assert_eq!(
            table.columns(),
            [
                "device",
                "neighbor",
                "vrf",
                "status-duration",
                "remote_address",
                "remote_address_port",
                "local_address",
                "local_address_port",
                "timestamp",
            ]
        );
        assert_eq!(table.column("device"), Some(vec![Some("pa-1"), Some("pa-2")]));
        assert_eq!(
            table.column("status-duration"),
            Some(vec![Some("up for 1w"), None])
        );
        assert_eq!(
            table.column("local_address_port"),
            Some(vec![None, Some("40000")])
        );
        assert_eq!(
            table.rows()[1].keys().collect::<Vec<_>>(),
            table.columns().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_table_without_policy_keeps_schema_order() {
        let table = transform_table(
            "NXOS_HARDWARE_INVENTORY",
            &[row(&[
                ("serialnum", "FDO1234"),
                ("device", "n9k-1"),
                ("productid", "N9K-C93180YC-FX"),
            ])],
            builtin(),
        )
        .expect("should transform");

        assert_eq!(table.columns(), ["device", "product_id", "serial"]);
    }
}
