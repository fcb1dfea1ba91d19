//! Configuration class (0x02): MAC address access.

use nom::number::complete::{le_u16, u8};
use nom::sequence::pair;

use crate::protocol::dispatch::{DecoderEntry, Wf121Handler};
use crate::protocol::serialize::{CommandSerialize, Serializer};
use crate::protocol::{ClassId, Error, MessageKind};

use super::{decode, parse_fixed, HardwareAddress};

/// 0x00 Get MAC Address, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetMacAddress {
    pub interface: u8,
}

impl CommandSerialize for GetMacAddress {
    const CLASS: ClassId = ClassId::Configuration;
    const CMD: u8 = 0x00;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.interface)
    }
}

/// 0x01 Set MAC Address, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetMacAddress {
    pub interface: u8,
    pub address: HardwareAddress,
}

impl CommandSerialize for SetMacAddress {
    const CLASS: ClassId = ClassId::Configuration;
    const CMD: u8 = 0x01;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.interface)?;
        ser.write_bytes(&self.address)
    }
}

fn rsp_get_mac_address(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_get_mac_address_response(result, interface)
}

fn rsp_set_mac_address(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, interface) = decode(pair(le_u16, u8), payload)?;
    handler.on_set_mac_address_response(result, interface)
}

fn evt_mac_address(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (interface, address) = decode(pair(u8, parse_fixed::<6>), payload)?;
    handler.on_mac_address(interface, address)
}

pub(crate) static ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: rsp_get_mac_address,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: rsp_set_mac_address,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: evt_mac_address,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mac_address_event_layout() {
        let payload = [0x00, 0xde, 0xad, 0xbe, 0xef, 0x00, 0x01];
        let (interface, address) = decode(pair(u8, parse_fixed::<6>), &payload).unwrap();
        assert_eq!(interface, 0);
        assert_eq!(address, [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
    }

    #[test]
    fn set_mac_address_body() {
        let cmd = SetMacAddress {
            interface: 0,
            address: [1, 2, 3, 4, 5, 6],
        };
        assert_eq!(cmd.payload_len(), 7);
        let mut buf = [0u8; 7];
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(buf, [0x00, 1, 2, 3, 4, 5, 6]);
    }
}
