//! Routing decoded payloads to user callbacks.
//!
//! Every message the module can emit has a row in [DECODER_TABLE],
//! keyed by class, direction, and command id. [dispatch] finds the
//! row and runs its decoder, which parses the payload and invokes the
//! matching [Wf121Handler] method. Classes the link never acts on
//! still get rows with no-op decoders, so recognized traffic is never
//! reported as an unknown command.

use crate::protocol::messages::endpoint::EndpointStatus;
use crate::protocol::messages::hardware::RtcTime;
use crate::protocol::messages::system::BootEvent;
use crate::protocol::messages::tcp_stack::{
    DhcpConfiguration, DnsHostByNameResult, TcpIpConfiguration, TcpIpEndpointStatus, UdpData,
};
use crate::protocol::messages::wifi::{Connected, ScanResult};
use crate::protocol::messages::{HardwareAddress, IpAddress};
use crate::protocol::messages::{configuration, endpoint, hardware, system, tcp_stack, wifi};
use crate::protocol::{ClassId, Error, MessageKind};

/// Callbacks for decoded responses and events.
///
/// Every method defaults to doing nothing, so an implementation only
/// overrides the traffic it cares about. Returning an error from a
/// callback propagates out of [dispatch] and the surrounding pump.
#[allow(unused_variables)]
pub trait Wf121Handler {
    // system
    fn on_sync_response(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn on_hello_response(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_max_power_saving_state_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_boot(&mut self, event: BootEvent) -> Result<(), Error> {
        Ok(())
    }
    fn on_software_exception(&mut self, address: u32, exception_type: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_power_saving_state(&mut self, state: u8) -> Result<(), Error> {
        Ok(())
    }

    // configuration
    fn on_get_mac_address_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_mac_address_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_mac_address(&mut self, interface: u8, address: HardwareAddress) -> Result<(), Error> {
        Ok(())
    }

    // wifi responses
    fn on_wifi_on_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_wifi_off_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_start_scan_channels_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_stop_scan_channels_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_password_response(&mut self, status: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_connect_bssid_response(
        &mut self,
        result: u16,
        interface: u8,
        address: HardwareAddress,
    ) -> Result<(), Error> {
        Ok(())
    }
    fn on_connect_ssid_response(
        &mut self,
        result: u16,
        interface: u8,
        address: HardwareAddress,
    ) -> Result<(), Error> {
        Ok(())
    }
    fn on_disconnect_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_scan_channels_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_operating_mode_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_start_ap_mode_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_stop_ap_mode_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_scan_results_sort_rssi_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_ap_disconnect_client_response(
        &mut self,
        result: u16,
        interface: u8,
    ) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_ap_password_response(&mut self, status: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_ap_max_clients_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_start_wps_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_stop_wps_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_get_signal_quality_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_start_ssid_scan_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_ap_hidden_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_11n_mode_response(&mut self, result: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_ap_client_isolation_response(
        &mut self,
        result: u16,
        interface: u8,
    ) -> Result<(), Error> {
        Ok(())
    }

    // wifi events
    fn on_wifi_is_on(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_wifi_is_off(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_scan_result(&mut self, event: ScanResult<'_>) -> Result<(), Error> {
        Ok(())
    }
    fn on_scan_result_drop(&mut self, address: HardwareAddress) -> Result<(), Error> {
        Ok(())
    }
    fn on_scanned(&mut self, status: i8) -> Result<(), Error> {
        Ok(())
    }
    fn on_connected(&mut self, event: Connected<'_>) -> Result<(), Error> {
        Ok(())
    }
    fn on_disconnected(&mut self, reason: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_interface_status(&mut self, interface: u8, status: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_connect_failed(&mut self, reason: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_connect_retry(&mut self, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_ap_mode_started(&mut self, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_ap_mode_stopped(&mut self, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_ap_mode_failed(&mut self, reason: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_ap_client_joined(
        &mut self,
        address: HardwareAddress,
        interface: u8,
    ) -> Result<(), Error> {
        Ok(())
    }
    fn on_ap_client_left(&mut self, address: HardwareAddress, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_scan_sort_result(&mut self, event: ScanResult<'_>) -> Result<(), Error> {
        Ok(())
    }
    fn on_scan_sort_finished(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn on_wps_stopped(&mut self, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_wps_completed(&mut self, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_wps_failed(&mut self, reason: u16, interface: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_wps_credential_ssid(&mut self, interface: u8, ssid: &[u8]) -> Result<(), Error> {
        Ok(())
    }
    fn on_wps_credential_password(&mut self, interface: u8, password: &[u8]) -> Result<(), Error> {
        Ok(())
    }
    fn on_signal_quality(&mut self, rssi: i8, interface: u8) -> Result<(), Error> {
        Ok(())
    }

    // tcp stack responses
    fn on_start_tcp_server_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_tcp_connect_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_start_udp_server_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_udp_connect_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_configure_tcp_ip_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dns_configure_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dns_get_host_by_name_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_udp_bind_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_dhcp_hostname_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dhcp_enable_routing_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_mdns_hostname_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_mdns_start_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_mdns_stop_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_add_service_response(&mut self, result: u16, index: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_add_service_instance_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_add_service_attribute_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_remove_service_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_start_service_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_stop_service_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_multicast_join_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_multicast_leave_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dhcp_configure_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dhcp_clients_response(&mut self, result: u16, count: u8) -> Result<(), Error> {
        Ok(())
    }

    // tcp stack events
    fn on_tcp_ip_configuration(&mut self, event: TcpIpConfiguration) -> Result<(), Error> {
        Ok(())
    }
    fn on_dns_configuration(&mut self, index: u8, address: IpAddress) -> Result<(), Error> {
        Ok(())
    }
    fn on_tcp_ip_endpoint_status(&mut self, event: TcpIpEndpointStatus) -> Result<(), Error> {
        Ok(())
    }
    fn on_dns_host_by_name_result(&mut self, event: DnsHostByNameResult<'_>) -> Result<(), Error> {
        Ok(())
    }
    fn on_udp_data(&mut self, event: UdpData<'_>) -> Result<(), Error> {
        Ok(())
    }
    fn on_mdns_started(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn on_mdns_failed(&mut self, reason: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_mdns_stopped(&mut self, reason: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_service_started(&mut self, index: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_service_failed(&mut self, reason: u16, index: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_dnssd_service_stopped(&mut self, reason: u16, index: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_dhcp_configuration(&mut self, event: DhcpConfiguration) -> Result<(), Error> {
        Ok(())
    }
    fn on_dhcp_client(
        &mut self,
        address: IpAddress,
        hardware_address: HardwareAddress,
    ) -> Result<(), Error> {
        Ok(())
    }

    // endpoint responses
    fn on_send_endpoint_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_streaming_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_active_endpoint_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_streaming_destination_response(
        &mut self,
        result: u16,
        endpoint: u8,
    ) -> Result<(), Error> {
        Ok(())
    }
    fn on_close_endpoint_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_set_transmit_size_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_disable_endpoint_response(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }

    // endpoint events
    fn on_endpoint_syntax_error(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_endpoint_data(&mut self, endpoint: u8, data: &[u8]) -> Result<(), Error> {
        Ok(())
    }
    fn on_endpoint_status(&mut self, event: EndpointStatus) -> Result<(), Error> {
        Ok(())
    }
    fn on_endpoint_closing(&mut self, reason: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }
    fn on_endpoint_error(&mut self, reason: u16, endpoint: u8) -> Result<(), Error> {
        Ok(())
    }

    // hardware responses
    fn on_set_soft_timer_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_configure_external_interrupt_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_change_notification_pullup_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_io_port_config_direction_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_io_port_config_open_drain_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_io_port_write_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_io_port_read_response(&mut self, result: u16, port: u8, data: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_output_compare_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_adc_read_response(&mut self, result: u16, input: u8, value: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_rtc_init_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_rtc_set_time_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_rtc_get_time_response(&mut self, time: RtcTime) -> Result<(), Error> {
        Ok(())
    }
    fn on_rtc_set_alarm_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_configure_uart_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }
    fn on_get_uart_configuration_response(&mut self, result: u16) -> Result<(), Error> {
        Ok(())
    }

    // hardware events
    fn on_soft_timer(&mut self, handle: u8) -> Result<(), Error> {
        Ok(())
    }
}

/// A handler that ignores everything. Useful when only the result
/// codes matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHandler;

impl Wf121Handler for NullHandler {}

pub(crate) type DecodeFn = fn(&[u8], &mut dyn Wf121Handler) -> Result<(), Error>;

/// One decodable message within a class.
pub(crate) struct DecoderEntry {
    pub kind: MessageKind,
    pub cmd: u8,
    pub decode: DecodeFn,
}

struct ClassTable {
    class: ClassId,
    entries: &'static [DecoderEntry],
}

fn decode_recognized(_payload: &[u8], _handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    Ok(())
}

// classes the link acknowledges but takes no action on
static DFU_ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: decode_recognized,
    },
];

static PERSISTENT_STORE_ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x04,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x05,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x07,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x01,
        decode: decode_recognized,
    },
];

static I2C_ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: decode_recognized,
    },
];

static HTTP_SERVER_ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x01,
        decode: decode_recognized,
    },
];

static WIRED_ETHERNET_ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: decode_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: decode_recognized,
    },
];

static DECODER_TABLE: &[ClassTable] = &[
    ClassTable {
        class: ClassId::FirmwareUpgrade,
        entries: DFU_ENTRIES,
    },
    ClassTable {
        class: ClassId::System,
        entries: system::ENTRIES,
    },
    ClassTable {
        class: ClassId::Configuration,
        entries: configuration::ENTRIES,
    },
    ClassTable {
        class: ClassId::Wifi,
        entries: wifi::ENTRIES,
    },
    ClassTable {
        class: ClassId::TcpStack,
        entries: tcp_stack::ENTRIES,
    },
    ClassTable {
        class: ClassId::Endpoint,
        entries: endpoint::ENTRIES,
    },
    ClassTable {
        class: ClassId::Hardware,
        entries: hardware::ENTRIES,
    },
    ClassTable {
        class: ClassId::PersistentStore,
        entries: PERSISTENT_STORE_ENTRIES,
    },
    ClassTable {
        class: ClassId::I2c,
        entries: I2C_ENTRIES,
    },
    ClassTable {
        class: ClassId::HttpServer,
        entries: HTTP_SERVER_ENTRIES,
    },
    ClassTable {
        class: ClassId::WiredEthernet,
        entries: WIRED_ETHERNET_ENTRIES,
    },
];

/// Decode one payload and hand it to the matching handler callback.
///
/// An unknown (class, kind, cmd) triple yields
/// [Error::CommandNotRecognized] without touching the handler.
pub fn dispatch(
    kind: MessageKind,
    class: ClassId,
    cmd: u8,
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    for table in DECODER_TABLE {
        if table.class != class {
            continue;
        }
        for entry in table.entries {
            if entry.kind == kind && entry.cmd == cmd {
                return (entry.decode)(payload, handler);
            }
        }
    }
    Err(Error::CommandNotRecognized)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_command_is_rejected() {
        let mut handler = NullHandler;
        assert_eq!(
            dispatch(
                MessageKind::CommandResponse,
                ClassId::System,
                0x7f,
                &[],
                &mut handler
            ),
            Err(Error::CommandNotRecognized)
        );
    }

    #[test]
    fn direction_distinguishes_entries() {
        // wifi cmd 0x00 exists in both directions with different decoders
        struct Count {
            responses: u32,
            events: u32,
        }
        impl Wf121Handler for Count {
            fn on_wifi_on_response(&mut self, _result: u16) -> Result<(), Error> {
                self.responses += 1;
                Ok(())
            }
            fn on_wifi_is_on(&mut self, _result: u16) -> Result<(), Error> {
                self.events += 1;
                Ok(())
            }
        }
        let mut count = Count {
            responses: 0,
            events: 0,
        };
        dispatch(
            MessageKind::CommandResponse,
            ClassId::Wifi,
            0x00,
            &[0x00, 0x00],
            &mut count,
        )
        .unwrap();
        dispatch(
            MessageKind::Event,
            ClassId::Wifi,
            0x00,
            &[0x00, 0x00],
            &mut count,
        )
        .unwrap();
        assert_eq!(count.responses, 1);
        assert_eq!(count.events, 1);
    }

    #[test]
    fn truncated_payload_never_reaches_callback() {
        struct Panic;
        impl Wf121Handler for Panic {
            fn on_boot(&mut self, _event: crate::protocol::messages::system::BootEvent) -> Result<(), Error> {
                panic!("decoded a truncated boot event");
            }
        }
        let mut handler = Panic;
        assert_eq!(
            dispatch(
                MessageKind::Event,
                ClassId::System,
                0x00,
                &[0x01, 0x00, 0x02],
                &mut handler
            ),
            Err(Error::Unspecified)
        );
    }

    #[test]
    fn recognized_classes_accept_traffic() {
        let mut handler = NullHandler;
        dispatch(
            MessageKind::CommandResponse,
            ClassId::PersistentStore,
            0x00,
            &[0x00, 0x00],
            &mut handler,
        )
        .unwrap();
        dispatch(
            MessageKind::Event,
            ClassId::FirmwareUpgrade,
            0x00,
            &[],
            &mut handler,
        )
        .unwrap();
    }
}
