//! A handler that narrates traffic to stdout.

use wf121lib::protocol::messages::endpoint::EndpointStatus;
use wf121lib::protocol::messages::hardware::RtcTime;
use wf121lib::protocol::messages::system::BootEvent;
use wf121lib::protocol::messages::tcp_stack::{
    DhcpConfiguration, DnsHostByNameResult, TcpIpConfiguration, TcpIpEndpointStatus, UdpData,
};
use wf121lib::protocol::messages::wifi::{Connected, ScanResult};
use wf121lib::protocol::messages::{HardwareAddress, IpAddress};
use wf121lib::protocol::{Error, Wf121Handler};

fn mac(address: &HardwareAddress) -> String {
    address
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

fn ip(address: &IpAddress) -> String {
    format!(
        "{}.{}.{}.{}",
        address[0], address[1], address[2], address[3]
    )
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub struct PrintHandler;

impl Wf121Handler for PrintHandler {
    fn on_sync_response(&mut self) -> Result<(), Error> {
        println!("sync acknowledged");
        Ok(())
    }

    fn on_hello_response(&mut self) -> Result<(), Error> {
        println!("hello acknowledged");
        Ok(())
    }

    fn on_boot(&mut self, event: BootEvent) -> Result<(), Error> {
        println!(
            "boot: version {}.{}.{}.{} bootloader {} tcpip {} hw {}",
            event.major,
            event.minor,
            event.patch,
            event.build,
            event.bootloader_version,
            event.tcp_ip_version,
            event.hw_version,
        );
        Ok(())
    }

    fn on_software_exception(&mut self, address: u32, exception_type: u8) -> Result<(), Error> {
        println!(
            "software exception type {} at {:#010x}",
            exception_type, address
        );
        Ok(())
    }

    fn on_power_saving_state(&mut self, state: u8) -> Result<(), Error> {
        println!("power saving state {}", state);
        Ok(())
    }

    fn on_mac_address(&mut self, interface: u8, address: HardwareAddress) -> Result<(), Error> {
        println!("interface {} mac {}", interface, mac(&address));
        Ok(())
    }

    fn on_wifi_is_on(&mut self, result: u16) -> Result<(), Error> {
        println!("radio on (result {:#06x})", result);
        Ok(())
    }

    fn on_wifi_is_off(&mut self, result: u16) -> Result<(), Error> {
        println!("radio off (result {:#06x})", result);
        Ok(())
    }

    fn on_scan_result(&mut self, event: ScanResult<'_>) -> Result<(), Error> {
        println!(
            "scan: {} ch {} rssi {} snr {} secure {} ssid {:?}",
            mac(&event.address),
            event.channel,
            event.rssi,
            event.snr,
            event.secure,
            text(event.ssid),
        );
        Ok(())
    }

    fn on_scan_sort_result(&mut self, event: ScanResult<'_>) -> Result<(), Error> {
        self.on_scan_result(event)
    }

    fn on_scanned(&mut self, status: i8) -> Result<(), Error> {
        println!("scan finished (status {})", status);
        Ok(())
    }

    fn on_connected(&mut self, event: Connected<'_>) -> Result<(), Error> {
        println!(
            "connected: interface {} status {} bssid {:02x?}",
            event.interface, event.status, event.bssid
        );
        Ok(())
    }

    fn on_disconnected(&mut self, reason: u16, interface: u8) -> Result<(), Error> {
        println!(
            "disconnected: interface {} reason {:#06x}",
            interface, reason
        );
        Ok(())
    }

    fn on_interface_status(&mut self, interface: u8, status: u8) -> Result<(), Error> {
        println!("interface {} status {}", interface, status);
        Ok(())
    }

    fn on_connect_failed(&mut self, reason: u16, interface: u8) -> Result<(), Error> {
        println!(
            "connect failed: interface {} reason {:#06x}",
            interface, reason
        );
        Ok(())
    }

    fn on_connect_retry(&mut self, interface: u8) -> Result<(), Error> {
        println!("connect retry on interface {}", interface);
        Ok(())
    }

    fn on_ap_client_joined(
        &mut self,
        address: HardwareAddress,
        interface: u8,
    ) -> Result<(), Error> {
        println!("ap client {} joined interface {}", mac(&address), interface);
        Ok(())
    }

    fn on_ap_client_left(&mut self, address: HardwareAddress, interface: u8) -> Result<(), Error> {
        println!("ap client {} left interface {}", mac(&address), interface);
        Ok(())
    }

    fn on_wps_credential_ssid(&mut self, interface: u8, ssid: &[u8]) -> Result<(), Error> {
        println!("wps ssid for interface {}: {:?}", interface, text(ssid));
        Ok(())
    }

    fn on_wps_credential_password(&mut self, interface: u8, password: &[u8]) -> Result<(), Error> {
        println!(
            "wps password for interface {}: {:?}",
            interface,
            text(password)
        );
        Ok(())
    }

    fn on_signal_quality(&mut self, rssi: i8, interface: u8) -> Result<(), Error> {
        println!("interface {} rssi {}", interface, rssi);
        Ok(())
    }

    fn on_tcp_ip_configuration(&mut self, event: TcpIpConfiguration) -> Result<(), Error> {
        println!(
            "tcp/ip: address {} netmask {} gateway {} dhcp {}",
            ip(&event.address),
            ip(&event.netmask),
            ip(&event.gateway),
            event.use_dhcp,
        );
        Ok(())
    }

    fn on_dns_configuration(&mut self, index: u8, address: IpAddress) -> Result<(), Error> {
        println!("dns server {}: {}", index, ip(&address));
        Ok(())
    }

    fn on_tcp_ip_endpoint_status(&mut self, event: TcpIpEndpointStatus) -> Result<(), Error> {
        println!(
            "endpoint {}: {}:{} <-> {}:{}",
            event.endpoint,
            ip(&event.local_ip),
            event.local_port,
            ip(&event.remote_ip),
            event.remote_port,
        );
        Ok(())
    }

    fn on_dns_host_by_name_result(&mut self, event: DnsHostByNameResult<'_>) -> Result<(), Error> {
        println!(
            "dns: {:?} -> {} (result {:#06x})",
            text(event.name),
            ip(&event.address),
            event.result,
        );
        Ok(())
    }

    fn on_udp_data(&mut self, event: UdpData<'_>) -> Result<(), Error> {
        println!(
            "udp from {}:{} on endpoint {}, {} bytes",
            ip(&event.source_address),
            event.source_port,
            event.endpoint,
            event.data.len(),
        );
        crate::hexdump::hexdump_prefix("  ", event.data);
        Ok(())
    }

    fn on_dhcp_configuration(&mut self, event: DhcpConfiguration) -> Result<(), Error> {
        println!(
            "dhcp server: address {} mask {} lease {}s routing {}",
            ip(&event.address),
            ip(&event.subnet_mask),
            event.lease_time,
            event.routing_enabled,
        );
        Ok(())
    }

    fn on_dhcp_client(
        &mut self,
        address: IpAddress,
        hardware_address: HardwareAddress,
    ) -> Result<(), Error> {
        println!("dhcp client {} at {}", mac(&hardware_address), ip(&address));
        Ok(())
    }

    fn on_endpoint_data(&mut self, endpoint: u8, data: &[u8]) -> Result<(), Error> {
        println!("endpoint {} data, {} bytes", endpoint, data.len());
        crate::hexdump::hexdump_prefix("  ", data);
        Ok(())
    }

    fn on_endpoint_status(&mut self, event: EndpointStatus) -> Result<(), Error> {
        println!(
            "endpoint {}: type {:#x} streaming {} destination {} active {}",
            event.endpoint,
            event.endpoint_type,
            event.streaming,
            event.destination,
            event.active,
        );
        Ok(())
    }

    fn on_endpoint_closing(&mut self, reason: u16, endpoint: u8) -> Result<(), Error> {
        println!("endpoint {} closing (reason {:#06x})", endpoint, reason);
        Ok(())
    }

    fn on_endpoint_error(&mut self, reason: u16, endpoint: u8) -> Result<(), Error> {
        println!("endpoint {} error (reason {:#06x})", endpoint, reason);
        Ok(())
    }

    fn on_endpoint_syntax_error(&mut self, result: u16, endpoint: u8) -> Result<(), Error> {
        println!(
            "endpoint {} syntax error (result {:#06x})",
            endpoint, result
        );
        Ok(())
    }

    fn on_soft_timer(&mut self, handle: u8) -> Result<(), Error> {
        println!("soft timer {} fired", handle);
        Ok(())
    }

    fn on_rtc_get_time_response(&mut self, time: RtcTime) -> Result<(), Error> {
        println!(
            "rtc: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            time.year, time.month, time.day, time.hour, time.minute, time.second
        );
        Ok(())
    }

    fn on_adc_read_response(&mut self, _result: u16, input: u8, value: u16) -> Result<(), Error> {
        println!("adc input {} reads {}", input, value);
        Ok(())
    }

    fn on_io_port_read_response(
        &mut self,
        _result: u16,
        port: u8,
        data: u16,
    ) -> Result<(), Error> {
        println!("io port {} reads {:#06x}", port, data);
        Ok(())
    }
}
