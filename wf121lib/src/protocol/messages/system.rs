//! System class (0x01): module identity, reset, power saving.

use nom::number::complete::{le_u16, le_u32, u8};
use nom::sequence::pair;
use nom::IResult;

use crate::protocol::dispatch::{DecoderEntry, Wf121Handler};
use crate::protocol::serialize::{CommandSerialize, Serializer};
use crate::protocol::{ClassId, Error, MessageKind};

use super::decode;

/// Event 0x00 Boot: the module came up, reporting its versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootEvent {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
    pub bootloader_version: u16,
    pub tcp_ip_version: u16,
    pub hw_version: u16,
}

impl BootEvent {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, major) = le_u16(input)?;
        let (input, minor) = le_u16(input)?;
        let (input, patch) = le_u16(input)?;
        let (input, build) = le_u16(input)?;
        let (input, bootloader_version) = le_u16(input)?;
        let (input, tcp_ip_version) = le_u16(input)?;
        let (input, hw_version) = le_u16(input)?;
        Ok((
            input,
            BootEvent {
                major,
                minor,
                patch,
                build,
                bootloader_version,
                tcp_ip_version,
                hw_version,
            },
        ))
    }
}

/// 0x00 Sync, command. Flushes the command pipeline after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncSystem;

impl CommandSerialize for SyncSystem {
    const CLASS: ClassId = ClassId::System;
    const CMD: u8 = 0x00;

    fn command_body<S>(&self, _ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        Ok(())
    }
}

/// 0x01 Reset, command. `dfu` non-zero boots into the firmware loader.
/// The module answers with a fresh boot event, never a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetSystem {
    pub dfu: u8,
}

impl CommandSerialize for ResetSystem {
    const CLASS: ClassId = ClassId::System;
    const CMD: u8 = 0x01;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.dfu)
    }
}

/// 0x02 Hello, command. Bodyless liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HelloSystem;

impl CommandSerialize for HelloSystem {
    const CLASS: ClassId = ClassId::System;
    const CMD: u8 = 0x02;

    fn command_body<S>(&self, _ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        Ok(())
    }
}

/// 0x03 Set Max Power Saving State, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetMaxPowerSavingState {
    pub state: u8,
}

impl CommandSerialize for SetMaxPowerSavingState {
    const CLASS: ClassId = ClassId::System;
    const CMD: u8 = 0x03;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.state)
    }
}

fn rsp_sync(_payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    handler.on_sync_response()
}

fn rsp_reset(_payload: &[u8], _handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    // reset is acknowledged by the subsequent boot event
    Ok(())
}

fn rsp_hello(_payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    handler.on_hello_response()
}

fn rsp_set_max_power_saving_state(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    let result = decode(le_u16, payload)?;
    handler.on_set_max_power_saving_state_response(result)
}

fn evt_boot(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(BootEvent::parse, payload)?;
    handler.on_boot(event)
}

fn evt_software_exception(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (address, exception_type) = decode(pair(le_u32, u8), payload)?;
    handler.on_software_exception(address, exception_type)
}

fn evt_power_saving_state(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let state = decode(u8, payload)?;
    handler.on_power_saving_state(state)
}

pub(crate) static ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: rsp_sync,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: rsp_reset,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: rsp_hello,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: rsp_set_max_power_saving_state,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: evt_boot,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x02,
        decode: evt_software_exception,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x03,
        decode: evt_power_saving_state,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn boot_event_layout() {
        let payload = [
            0x01, 0x00, // major
            0x02, 0x00, // minor
            0x03, 0x00, // patch
            0x2a, 0x00, // build
            0x05, 0x00, // bootloader
            0x06, 0x00, // tcp/ip
            0x07, 0x00, // hardware
        ];
        let event = decode(BootEvent::parse, &payload).unwrap();
        assert_eq!(
            event,
            BootEvent {
                major: 1,
                minor: 2,
                patch: 3,
                build: 42,
                bootloader_version: 5,
                tcp_ip_version: 6,
                hw_version: 7,
            }
        );
    }

    #[test]
    fn boot_event_too_short() {
        assert_eq!(
            decode(BootEvent::parse, &[0x01, 0x00, 0x02]),
            Err::<BootEvent, _>(Error::Unspecified)
        );
    }

    #[test]
    fn hello_has_no_payload() {
        assert_eq!(HelloSystem.payload_len(), 0);
        assert_eq!(HelloSystem.header().unwrap().payload_len, 0);
    }

    #[test]
    fn set_max_power_saving_state_body() {
        let mut buf = [0u8; 1];
        let cmd = SetMaxPowerSavingState { state: 2 };
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(buf, [0x02]);
    }
}
