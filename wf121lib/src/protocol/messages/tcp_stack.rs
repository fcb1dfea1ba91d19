//! TCP/IP stack class (0x04): address configuration, DNS, DHCP, and
//! TCP/UDP endpoint creation.

use nom::number::complete::{le_u16, le_u32, u8};
use nom::sequence::pair;
use nom::IResult;

use crate::protocol::dispatch::{DecoderEntry, Wf121Handler};
use crate::protocol::serialize::{CommandSerialize, Serializer};
use crate::protocol::{ClassId, Error, MessageKind};

use super::{decode, parse_bool, parse_fixed, parse_u16_blob, parse_u8_blob, IpAddress};

/// Event 0x00 Configure TCP/IP: the interface address changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TcpIpConfiguration {
    pub address: IpAddress,
    pub netmask: IpAddress,
    pub gateway: IpAddress,
    pub use_dhcp: bool,
}

impl TcpIpConfiguration {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, address) = parse_fixed::<4>(input)?;
        let (input, netmask) = parse_fixed::<4>(input)?;
        let (input, gateway) = parse_fixed::<4>(input)?;
        let (input, use_dhcp) = parse_bool(input)?;
        Ok((
            input,
            TcpIpConfiguration {
                address,
                netmask,
                gateway,
                use_dhcp,
            },
        ))
    }
}

/// Event 0x02 Endpoint Status: addressing for one TCP/IP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TcpIpEndpointStatus {
    pub endpoint: u8,
    pub local_ip: IpAddress,
    pub local_port: u16,
    pub remote_ip: IpAddress,
    pub remote_port: u16,
}

impl TcpIpEndpointStatus {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, endpoint) = u8(input)?;
        let (input, local_ip) = parse_fixed::<4>(input)?;
        let (input, local_port) = le_u16(input)?;
        let (input, remote_ip) = parse_fixed::<4>(input)?;
        let (input, remote_port) = le_u16(input)?;
        Ok((
            input,
            TcpIpEndpointStatus {
                endpoint,
                local_ip,
                local_port,
                remote_ip,
                remote_port,
            },
        ))
    }
}

/// Event 0x03 DNS Get Host By Name Result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DnsHostByNameResult<'a> {
    pub result: u16,
    pub address: IpAddress,
    pub name: &'a [u8],
}

impl<'a> DnsHostByNameResult<'a> {
    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (input, result) = le_u16(input)?;
        let (input, address) = parse_fixed::<4>(input)?;
        let (input, name) = parse_u8_blob(input)?;
        Ok((
            input,
            DnsHostByNameResult {
                result,
                address,
                name,
            },
        ))
    }
}

/// Event 0x04 UDP Data: a datagram arrived on a bound endpoint. This
/// is the one payload with a two-byte data length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UdpData<'a> {
    pub endpoint: u8,
    pub source_address: IpAddress,
    pub source_port: u16,
    pub data: &'a [u8],
}

impl<'a> UdpData<'a> {
    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (input, endpoint) = u8(input)?;
        let (input, source_address) = parse_fixed::<4>(input)?;
        let (input, source_port) = le_u16(input)?;
        let (input, data) = parse_u16_blob(input)?;
        Ok((
            input,
            UdpData {
                endpoint,
                source_address,
                source_port,
                data,
            },
        ))
    }
}

/// Event 0x0B DHCP Configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DhcpConfiguration {
    pub routing_enabled: bool,
    pub address: IpAddress,
    pub subnet_mask: IpAddress,
    pub lease_time: u32,
}

impl DhcpConfiguration {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, routing_enabled) = parse_bool(input)?;
        let (input, address) = parse_fixed::<4>(input)?;
        let (input, subnet_mask) = parse_fixed::<4>(input)?;
        let (input, lease_time) = le_u32(input)?;
        Ok((
            input,
            DhcpConfiguration {
                routing_enabled,
                address,
                subnet_mask,
                lease_time,
            },
        ))
    }
}

/// 0x00 Start TCP Server, command. A negative `default_destination`
/// leaves incoming connections unrouted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartTcpServer {
    pub port: u16,
    pub default_destination: i8,
}

impl CommandSerialize for StartTcpServer {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x00;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_le_u16(self.port)?;
        ser.write_u8(self.default_destination as u8)
    }
}

/// 0x01 TCP Connect, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TcpConnect {
    pub address: IpAddress,
    pub port: u16,
    pub routing: i8,
}

impl CommandSerialize for TcpConnect {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x01;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_bytes(&self.address)?;
        ser.write_le_u16(self.port)?;
        ser.write_u8(self.routing as u8)
    }
}

/// 0x02 Start UDP Server, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartUdpServer {
    pub port: u16,
    pub default_destination: i8,
}

impl CommandSerialize for StartUdpServer {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x02;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_le_u16(self.port)?;
        ser.write_u8(self.default_destination as u8)
    }
}

/// 0x03 UDP Connect, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UdpConnect {
    pub address: IpAddress,
    pub port: u16,
    pub routing: i8,
}

impl CommandSerialize for UdpConnect {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x03;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_bytes(&self.address)?;
        ser.write_le_u16(self.port)?;
        ser.write_u8(self.routing as u8)
    }
}

/// 0x04 Configure TCP/IP, command. Setting `use_dhcp` makes the
/// static fields advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigureTcpIp {
    pub address: IpAddress,
    pub netmask: IpAddress,
    pub gateway: IpAddress,
    pub use_dhcp: u8,
}

impl CommandSerialize for ConfigureTcpIp {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x04;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_bytes(&self.address)?;
        ser.write_bytes(&self.netmask)?;
        ser.write_bytes(&self.gateway)?;
        ser.write_u8(self.use_dhcp)
    }
}

/// 0x05 DNS Configure, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DnsConfigure {
    pub index: u8,
    pub address: IpAddress,
}

impl CommandSerialize for DnsConfigure {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x05;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.index)?;
        ser.write_bytes(&self.address)
    }
}

/// 0x06 DNS Get Host By Name, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DnsGetHostByName<'a> {
    pub name: &'a [u8],
}

impl CommandSerialize for DnsGetHostByName<'_> {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x06;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.name.len() as u8)?;
        ser.write_bytes(self.name)
    }
}

/// 0x07 UDP Bind, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UdpBind {
    pub endpoint: u8,
    pub port: u16,
}

impl CommandSerialize for UdpBind {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x07;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)?;
        ser.write_le_u16(self.port)
    }
}

/// 0x08 Set DHCP Hostname, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetDhcpHostname<'a> {
    pub name: &'a [u8],
}

impl CommandSerialize for SetDhcpHostname<'_> {
    const CLASS: ClassId = ClassId::TcpStack;
    const CMD: u8 = 0x08;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.name.len() as u8)?;
        ser.write_bytes(self.name)
    }
}

fn result_only(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
    callback: fn(&mut dyn Wf121Handler, u16) -> Result<(), Error>,
) -> Result<(), Error> {
    let result = decode(le_u16, payload)?;
    callback(handler, result)
}

fn result_endpoint(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
    callback: fn(&mut dyn Wf121Handler, u16, u8) -> Result<(), Error>,
) -> Result<(), Error> {
    let (result, endpoint) = decode(pair(le_u16, u8), payload)?;
    callback(handler, result, endpoint)
}

fn rsp_start_tcp_server(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_start_tcp_server_response(r, e)
    })
}

fn rsp_tcp_connect(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| h.on_tcp_connect_response(r, e))
}

fn rsp_start_udp_server(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_start_udp_server_response(r, e)
    })
}

fn rsp_udp_connect(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| h.on_udp_connect_response(r, e))
}

fn rsp_configure_tcp_ip(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_configure_tcp_ip_response(r))
}

fn rsp_dns_configure(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_dns_configure_response(r))
}

fn rsp_dns_get_host_by_name(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_dns_get_host_by_name_response(r)
    })
}

fn rsp_udp_bind(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_udp_bind_response(r))
}

fn rsp_set_dhcp_hostname(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_set_dhcp_hostname_response(r))
}

fn rsp_dhcp_enable_routing(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_dhcp_enable_routing_response(r)
    })
}

fn rsp_set_mdns_hostname(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_set_mdns_hostname_response(r))
}

fn rsp_mdns_start(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_mdns_start_response(r))
}

fn rsp_mdns_stop(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_mdns_stop_response(r))
}

fn rsp_dnssd_add_service(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, index) = decode(pair(le_u16, u8), payload)?;
    handler.on_dnssd_add_service_response(result, index)
}

fn rsp_dnssd_add_service_instance(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_dnssd_add_service_instance_response(r)
    })
}

fn rsp_dnssd_add_service_attribute(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_dnssd_add_service_attribute_response(r)
    })
}

fn rsp_dnssd_remove_service(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_dnssd_remove_service_response(r)
    })
}

fn rsp_dnssd_start_service(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_dnssd_start_service_response(r))
}

fn rsp_dnssd_stop_service(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_dnssd_stop_service_response(r))
}

fn rsp_multicast_join(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_multicast_join_response(r))
}

fn rsp_multicast_leave(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_multicast_leave_response(r))
}

fn rsp_dhcp_configure(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_dhcp_configure_response(r))
}

fn rsp_dhcp_clients(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, count) = decode(pair(le_u16, u8), payload)?;
    handler.on_dhcp_clients_response(result, count)
}

fn evt_configure_tcp_ip(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(TcpIpConfiguration::parse, payload)?;
    handler.on_tcp_ip_configuration(event)
}

fn evt_dns_configuration(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (index, address) = decode(pair(u8, parse_fixed::<4>), payload)?;
    handler.on_dns_configuration(index, address)
}

fn evt_endpoint_status(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(TcpIpEndpointStatus::parse, payload)?;
    handler.on_tcp_ip_endpoint_status(event)
}

fn evt_dns_host_by_name(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(DnsHostByNameResult::parse, payload)?;
    handler.on_dns_host_by_name_result(event)
}

fn evt_udp_data(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(UdpData::parse, payload)?;
    handler.on_udp_data(event)
}

fn evt_mdns_started(_payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    handler.on_mdns_started()
}

fn evt_mdns_failed(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let reason = decode(le_u16, payload)?;
    handler.on_mdns_failed(reason)
}

fn evt_mdns_stopped(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let reason = decode(le_u16, payload)?;
    handler.on_mdns_stopped(reason)
}

fn evt_dnssd_service_started(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let index = decode(u8, payload)?;
    handler.on_dnssd_service_started(index)
}

fn evt_dnssd_service_failed(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, index) = decode(pair(le_u16, u8), payload)?;
    handler.on_dnssd_service_failed(reason, index)
}

fn evt_dnssd_service_stopped(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, index) = decode(pair(le_u16, u8), payload)?;
    handler.on_dnssd_service_stopped(reason, index)
}

fn evt_dhcp_configuration(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(DhcpConfiguration::parse, payload)?;
    handler.on_dhcp_configuration(event)
}

fn evt_dhcp_client(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (address, hardware_address) = decode(pair(parse_fixed::<4>, parse_fixed::<6>), payload)?;
    handler.on_dhcp_client(address, hardware_address)
}

pub(crate) static ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: rsp_start_tcp_server,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: rsp_tcp_connect,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: rsp_start_udp_server,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: rsp_udp_connect,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x04,
        decode: rsp_configure_tcp_ip,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x05,
        decode: rsp_dns_configure,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x06,
        decode: rsp_dns_get_host_by_name,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x07,
        decode: rsp_udp_bind,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x08,
        decode: rsp_set_dhcp_hostname,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x09,
        decode: rsp_dhcp_enable_routing,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0a,
        decode: rsp_set_mdns_hostname,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0b,
        decode: rsp_mdns_start,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0c,
        decode: rsp_mdns_stop,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0d,
        decode: rsp_dnssd_add_service,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0e,
        decode: rsp_dnssd_add_service_instance,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0f,
        decode: rsp_dnssd_add_service_attribute,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x10,
        decode: rsp_dnssd_remove_service,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x11,
        decode: rsp_dnssd_start_service,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x12,
        decode: rsp_dnssd_stop_service,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x13,
        decode: rsp_multicast_join,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x14,
        decode: rsp_multicast_leave,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x15,
        decode: rsp_dhcp_configure,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x16,
        decode: rsp_dhcp_clients,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: evt_configure_tcp_ip,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x01,
        decode: evt_dns_configuration,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x02,
        decode: evt_endpoint_status,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x03,
        decode: evt_dns_host_by_name,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x04,
        decode: evt_udp_data,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x05,
        decode: evt_mdns_started,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x06,
        decode: evt_mdns_failed,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x07,
        decode: evt_mdns_stopped,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x08,
        decode: evt_dnssd_service_started,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x09,
        decode: evt_dnssd_service_failed,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0a,
        decode: evt_dnssd_service_stopped,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0b,
        decode: evt_dhcp_configuration,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0c,
        decode: evt_dhcp_client,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn udp_data_two_byte_length() {
        let payload = [
            0x03, // endpoint
            192, 168, 1, 10, // source address
            0x39, 0x30, // source port = 12345
            0x03, 0x00, // data length = 3
            0xde, 0xad, 0xbe,
        ];
        let event = decode(UdpData::parse, &payload).unwrap();
        assert_eq!(event.endpoint, 3);
        assert_eq!(event.source_address, [192, 168, 1, 10]);
        assert_eq!(event.source_port, 12345);
        assert_eq!(event.data, &[0xde, 0xad, 0xbe]);
    }

    #[test]
    fn udp_data_length_overrun() {
        let payload = [0x03, 192, 168, 1, 10, 0x39, 0x30, 0x10, 0x00, 0xde];
        assert_eq!(
            decode(UdpData::parse, &payload),
            Err::<UdpData, _>(Error::Unspecified)
        );
    }

    #[test]
    fn endpoint_status_layout() {
        let payload = [
            0x01, // endpoint
            10, 0, 0, 2, // local ip
            0x50, 0x00, // local port = 80
            10, 0, 0, 1, // remote ip
            0xd2, 0x04, // remote port = 1234
        ];
        let event = decode(TcpIpEndpointStatus::parse, &payload).unwrap();
        assert_eq!(event.local_port, 80);
        assert_eq!(event.remote_ip, [10, 0, 0, 1]);
        assert_eq!(event.remote_port, 1234);
    }

    #[test]
    fn tcp_connect_body() {
        let cmd = TcpConnect {
            address: [10, 0, 0, 1],
            port: 8080,
            routing: -1,
        };
        assert_eq!(cmd.payload_len(), 7);
        let mut buf = [0u8; 7];
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(buf, [10, 0, 0, 1, 0x90, 0x1f, 0xff]);
    }

    #[test]
    fn dns_get_host_by_name_body() {
        let cmd = DnsGetHostByName { name: b"relay" };
        let mut buf = [0u8; 6];
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(&buf, b"\x05relay");
    }
}
