//! Wifi class (0x03): radio power, scanning, association, access
//! point mode, WPS.

use nom::number::complete::{i8, le_i16, le_u16, u8};
use nom::sequence::{pair, tuple};
use nom::IResult;

use crate::protocol::dispatch::{DecoderEntry, Wf121Handler};
use crate::protocol::serialize::{CommandSerialize, Serializer};
use crate::protocol::{ClassId, Error, MessageKind};

use super::{decode, parse_bool, parse_fixed, parse_u8_blob, HardwareAddress};

/// Events 0x02 Scan Result and 0x0F Scan Sort Result: one access
/// point seen during a scan. The network name trails the fixed fields
/// with a one-byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResult<'a> {
    pub address: HardwareAddress,
    pub channel: i8,
    pub rssi: i16,
    pub snr: i8,
    pub secure: bool,
    pub ssid: &'a [u8],
}

impl<'a> ScanResult<'a> {
    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (input, address) = parse_fixed::<6>(input)?;
        let (input, channel) = i8(input)?;
        let (input, rssi) = le_i16(input)?;
        let (input, snr) = i8(input)?;
        let (input, secure) = parse_bool(input)?;
        let (input, ssid) = parse_u8_blob(input)?;
        Ok((
            input,
            ScanResult {
                address,
                channel,
                rssi,
                snr,
                secure,
                ssid,
            },
        ))
    }
}

/// Event 0x05 Connected: association to an access point completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Connected<'a> {
    pub status: u8,
    pub interface: u8,
    pub bssid: &'a [u8],
}

impl<'a> Connected<'a> {
    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (input, status) = u8(input)?;
        let (input, interface) = u8(input)?;
        let (input, bssid) = parse_u8_blob(input)?;
        Ok((
            input,
            Connected {
                status,
                interface,
                bssid,
            },
        ))
    }
}

/// 0x00 Turn On Wifi, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurnOnWifi;

impl CommandSerialize for TurnOnWifi {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x00;

    fn command_body<S>(&self, _ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        Ok(())
    }
}

/// 0x01 Turn Off Wifi, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurnOffWifi;

impl CommandSerialize for TurnOffWifi {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x01;

    fn command_body<S>(&self, _ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        Ok(())
    }
}

/// 0x03 Start Scan Channels, command. An empty channel list scans
/// every channel on the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartScanChannels<'a> {
    pub interface: u8,
    pub channels: &'a [u8],
}

impl CommandSerialize for StartScanChannels<'_> {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x03;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.interface)?;
        ser.write_u8(self.channels.len() as u8)?;
        ser.write_bytes(self.channels)
    }
}

/// 0x04 Stop Scan Channels, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StopScanChannels;

impl CommandSerialize for StopScanChannels {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x04;

    fn command_body<S>(&self, _ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        Ok(())
    }
}

/// 0x05 Set Password, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetPassword<'a> {
    pub password: &'a [u8],
}

impl CommandSerialize for SetPassword<'_> {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x05;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.password.len() as u8)?;
        ser.write_bytes(self.password)
    }
}

/// 0x06 Connect BSSID, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectBssid {
    pub address: HardwareAddress,
}

impl CommandSerialize for ConnectBssid {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x06;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_bytes(&self.address)
    }
}

/// 0x07 Connect SSID, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectSsid<'a> {
    pub ssid: &'a [u8],
}

impl CommandSerialize for ConnectSsid<'_> {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x07;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.ssid.len() as u8)?;
        ser.write_bytes(self.ssid)
    }
}

/// 0x08 Disconnect, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Disconnect;

impl CommandSerialize for Disconnect {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x08;

    fn command_body<S>(&self, _ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        Ok(())
    }
}

/// 0x09 Set Scan Channels, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetScanChannels<'a> {
    pub interface: u8,
    pub channels: &'a [u8],
}

impl CommandSerialize for SetScanChannels<'_> {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x09;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.interface)?;
        ser.write_u8(self.channels.len() as u8)?;
        ser.write_bytes(self.channels)
    }
}

/// 0x0A Set Operating Mode, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetOperatingMode {
    pub mode: u8,
}

impl CommandSerialize for SetOperatingMode {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x0a;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.mode)
    }
}

/// 0x0D Scan Results Sort RSSI, command. Asks the module to replay the
/// best `amount` scan results, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResultsSortRssi {
    pub amount: u8,
}

impl CommandSerialize for ScanResultsSortRssi {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x0d;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.amount)
    }
}

/// 0x0F Set AP Password, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetApPassword<'a> {
    pub password: &'a [u8],
}

impl CommandSerialize for SetApPassword<'_> {
    const CLASS: ClassId = ClassId::Wifi;
    const CMD: u8 = 0x0f;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.password.len() as u8)?;
        ser.write_bytes(self.password)
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

fn result_interface(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
    callback: fn(&mut dyn Wf121Handler, u16, u8) -> Result<(), Error>,
) -> Result<(), Error> {
    let (result, interface) = decode(pair(le_u16, u8), payload)?;
    callback(handler, result, interface)
}

fn rsp_turn_on(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_wifi_on_response(r))
}

fn rsp_turn_off(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_wifi_off_response(r))
}

fn rsp_start_scan(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_start_scan_channels_response(r))
}

fn rsp_stop_scan(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_stop_scan_channels_response(r))
}

fn rsp_set_password(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let status = decode(u8, payload)?;
    handler.on_set_password_response(status)
}

fn rsp_connect_bssid(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, interface, address) = decode(tuple((le_u16, u8, parse_fixed::<6>)), payload)?;
    handler.on_connect_bssid_response(result, interface, address)
}

fn rsp_connect_ssid(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, interface, address) = decode(tuple((le_u16, u8, parse_fixed::<6>)), payload)?;
    handler.on_connect_ssid_response(result, interface, address)
}

fn rsp_disconnect(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_disconnect_response(r, i))
}

fn rsp_set_scan_channels(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_set_scan_channels_response(r))
}

fn rsp_set_operating_mode(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_set_operating_mode_response(r))
}

fn rsp_start_ap_mode(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_start_ap_mode_response(r, i))
}

fn rsp_stop_ap_mode(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_stop_ap_mode_response(r, i))
}

fn rsp_scan_results_sort_rssi(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_scan_results_sort_rssi_response(r)
    })
}

fn rsp_ap_disconnect_client(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| {
        h.on_ap_disconnect_client_response(r, i)
    })
}

fn rsp_set_ap_password(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let status = decode(u8, payload)?;
    handler.on_set_ap_password_response(status)
}

fn rsp_set_ap_max_clients(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| {
        h.on_set_ap_max_clients_response(r, i)
    })
}

fn rsp_start_wps(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_start_wps_response(r, i))
}

fn rsp_stop_wps(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_stop_wps_response(r, i))
}

fn rsp_get_signal_quality(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| {
        h.on_get_signal_quality_response(r, i)
    })
}

fn rsp_start_ssid_scan(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_start_ssid_scan_response(r))
}

fn rsp_set_ap_hidden(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_set_ap_hidden_response(r, i))
}

fn rsp_set_11n_mode(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| h.on_set_11n_mode_response(r, i))
}

fn rsp_set_ap_client_isolation(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_interface(payload, handler, |h, r, i| {
        h.on_set_ap_client_isolation_response(r, i)
    })
}

fn evt_wifi_is_on(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let result = decode(le_u16, payload)?;
    handler.on_wifi_is_on(result)
}

fn evt_wifi_is_off(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let result = decode(le_u16, payload)?;
    handler.on_wifi_is_off(result)
}

fn evt_scan_result(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(ScanResult::parse, payload)?;
    handler.on_scan_result(event)
}

fn evt_scan_result_drop(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let address = decode(parse_fixed::<6>, payload)?;
    handler.on_scan_result_drop(address)
}

fn evt_scanned(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let status = decode(i8, payload)?;
    handler.on_scanned(status)
}

fn evt_connected(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(Connected::parse, payload)?;
    handler.on_connected(event)
}

fn evt_disconnected(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_disconnected(reason, interface)
}

fn evt_interface_status(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (interface, status) = decode(pair(u8, u8), payload)?;
    handler.on_interface_status(interface, status)
}

fn evt_connect_failed(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_connect_failed(reason, interface)
}

fn evt_connect_retry(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    // a reason word precedes the interface on the wire, but the retry
    // callback only carries the interface
    let (_reason, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_connect_retry(interface)
}

fn evt_ap_mode_started(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let interface = decode(u8, payload)?;
    handler.on_ap_mode_started(interface)
}

fn evt_ap_mode_stopped(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let interface = decode(u8, payload)?;
    handler.on_ap_mode_stopped(interface)
}

fn evt_ap_mode_failed(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_ap_mode_failed(reason, interface)
}

fn evt_ap_client_joined(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (address, interface) = decode(pair(parse_fixed::<6>, u8), payload)?;
    handler.on_ap_client_joined(address, interface)
}

fn evt_ap_client_left(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (address, interface) = decode(pair(parse_fixed::<6>, u8), payload)?;
    handler.on_ap_client_left(address, interface)
}

fn evt_scan_sort_result(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(ScanResult::parse, payload)?;
    handler.on_scan_sort_result(event)
}

fn evt_scan_sort_finished(_payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    handler.on_scan_sort_finished()
}

fn evt_wps_stopped(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let interface = decode(u8, payload)?;
    handler.on_wps_stopped(interface)
}

fn evt_wps_completed(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let interface = decode(u8, payload)?;
    handler.on_wps_completed(interface)
}

fn evt_wps_failed(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_wps_failed(reason, interface)
}

fn evt_wps_credential_ssid(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (interface, ssid) = decode(pair(u8, parse_u8_blob), payload)?;
    handler.on_wps_credential_ssid(interface, ssid)
}

fn evt_wps_credential_password(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    let (interface, password) = decode(pair(u8, parse_u8_blob), payload)?;
    handler.on_wps_credential_password(interface, password)
}

fn evt_signal_quality(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (rssi, interface) = decode(pair(i8, u8), payload)?;
    handler.on_signal_quality(rssi, interface)
}

pub(crate) static ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: rsp_turn_on,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: rsp_turn_off,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: rsp_start_scan,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x04,
        decode: rsp_stop_scan,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x05,
        decode: rsp_set_password,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x06,
        decode: rsp_connect_bssid,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x07,
        decode: rsp_connect_ssid,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x08,
        decode: rsp_disconnect,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x09,
        decode: rsp_set_scan_channels,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0a,
        decode: rsp_set_operating_mode,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0b,
        decode: rsp_start_ap_mode,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0c,
        decode: rsp_stop_ap_mode,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0d,
        decode: rsp_scan_results_sort_rssi,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0e,
        decode: rsp_ap_disconnect_client,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0f,
        decode: rsp_set_ap_password,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x10,
        decode: rsp_set_ap_max_clients,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x11,
        decode: rsp_start_wps,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x12,
        decode: rsp_stop_wps,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x13,
        decode: rsp_get_signal_quality,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x14,
        decode: rsp_start_ssid_scan,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x15,
        decode: rsp_set_ap_hidden,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x16,
        decode: rsp_set_11n_mode,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x17,
        decode: rsp_set_ap_client_isolation,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: evt_wifi_is_on,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x01,
        decode: evt_wifi_is_off,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x02,
        decode: evt_scan_result,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x03,
        decode: evt_scan_result_drop,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x04,
        decode: evt_scanned,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x05,
        decode: evt_connected,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x06,
        decode: evt_disconnected,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x07,
        decode: evt_interface_status,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x08,
        decode: evt_connect_failed,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x09,
        decode: evt_connect_retry,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0a,
        decode: evt_ap_mode_started,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0b,
        decode: evt_ap_mode_stopped,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0c,
        decode: evt_ap_mode_failed,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0d,
        decode: evt_ap_client_joined,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0e,
        decode: evt_ap_client_left,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x0f,
        decode: evt_scan_sort_result,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x10,
        decode: evt_scan_sort_finished,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x11,
        decode: evt_wps_stopped,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x12,
        decode: evt_wps_completed,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x13,
        decode: evt_wps_failed,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x14,
        decode: evt_wps_credential_ssid,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x15,
        decode: evt_wps_credential_password,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x16,
        decode: evt_signal_quality,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scan_result_layout() {
        let payload = [
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // address
            0x06, // channel
            0xc8, 0xff, // rssi = -56
            0x14, // snr
            0x01, // secure
            0x04, b'm', b'a', b'r', b's', // ssid
        ];
        let event = decode(ScanResult::parse, &payload).unwrap();
        assert_eq!(event.address, [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(event.channel, 6);
        assert_eq!(event.rssi, -56);
        assert_eq!(event.snr, 20);
        assert!(event.secure);
        assert_eq!(event.ssid, b"mars");
    }

    #[test]
    fn scan_result_ssid_overrun() {
        // declared 8 ssid bytes, only 4 present
        let payload = [
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, 0x06, 0xc8, 0xff, 0x14, 0x01, 0x08, b'm', b'a',
            b'r', b's',
        ];
        assert_eq!(
            decode(ScanResult::parse, &payload),
            Err::<ScanResult, _>(Error::Unspecified)
        );
    }

    #[test]
    fn connected_bssid_overrun() {
        let payload = [0x00, 0x00, 0x06, 0xaa, 0xbb];
        assert_eq!(
            decode(Connected::parse, &payload),
            Err::<Connected, _>(Error::Unspecified)
        );
    }

    #[test]
    fn connect_ssid_body() {
        let cmd = ConnectSsid { ssid: b"lander" };
        assert_eq!(cmd.payload_len(), 7);
        let mut buf = [0u8; 7];
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(&buf, b"\x06lander");
    }

    #[test]
    fn turn_on_header() {
        let header = TurnOnWifi.header().unwrap();
        assert_eq!(header.class, ClassId::Wifi);
        assert_eq!(header.cmd, 0x00);
        assert_eq!(header.payload_len, 0);
    }
}
