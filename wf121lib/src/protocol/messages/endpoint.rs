//! Endpoint class (0x05): sending data through endpoints and routing
//! between them.

use nom::number::complete::{i8, le_u16, le_u32, u8};
use nom::sequence::pair;
use nom::IResult;

use crate::protocol::dispatch::{DecoderEntry, Wf121Handler};
use crate::protocol::serialize::{CommandSerialize, Serializer};
use crate::protocol::{ClassId, Error, MessageKind};

use super::{decode, parse_bool, parse_u8_blob};

/// Event 0x02 Endpoint Status: mode and routing for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointStatus {
    pub endpoint: u8,
    pub endpoint_type: u32,
    pub streaming: bool,
    pub destination: i8,
    pub active: bool,
}

impl EndpointStatus {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, endpoint) = u8(input)?;
        let (input, endpoint_type) = le_u32(input)?;
        let (input, streaming) = parse_bool(input)?;
        let (input, destination) = i8(input)?;
        let (input, active) = parse_bool(input)?;
        Ok((
            input,
            EndpointStatus {
                endpoint,
                endpoint_type,
                streaming,
                destination,
                active,
            },
        ))
    }
}

/// 0x00 Send Endpoint, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendEndpoint<'a> {
    pub endpoint: u8,
    pub data: &'a [u8],
}

impl CommandSerialize for SendEndpoint<'_> {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x00;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)?;
        ser.write_u8(self.data.len() as u8)?;
        ser.write_bytes(self.data)
    }
}

/// 0x01 Set Streaming, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetStreaming {
    pub endpoint: u8,
    pub streaming: u8,
}

impl CommandSerialize for SetStreaming {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x01;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)?;
        ser.write_u8(self.streaming)
    }
}

/// 0x02 Set Active, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetActiveEndpoint {
    pub endpoint: u8,
    pub active: u8,
}

impl CommandSerialize for SetActiveEndpoint {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x02;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)?;
        ser.write_u8(self.active)
    }
}

/// 0x03 Set Streaming Destination, command. A destination of -1
/// discards forwarded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetStreamingDestination {
    pub endpoint: u8,
    pub destination: i8,
}

impl CommandSerialize for SetStreamingDestination {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x03;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)?;
        ser.write_u8(self.destination as u8)
    }
}

/// 0x04 Close Endpoint, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CloseEndpoint {
    pub endpoint: u8,
}

impl CommandSerialize for CloseEndpoint {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x04;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)
    }
}

/// 0x05 Set Transmit Size, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetTransmitSize {
    pub endpoint: u8,
    pub size: u16,
}

impl CommandSerialize for SetTransmitSize {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x05;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)?;
        ser.write_le_u16(self.size)
    }
}

/// 0x06 Disable Endpoint, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisableEndpoint {
    pub endpoint: u8,
}

impl CommandSerialize for DisableEndpoint {
    const CLASS: ClassId = ClassId::Endpoint;
    const CMD: u8 = 0x06;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.endpoint)
    }
}

fn result_endpoint(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
    callback: fn(&mut dyn Wf121Handler, u16, u8) -> Result<(), Error>,
) -> Result<(), Error> {
    let (result, endpoint) = decode(pair(le_u16, u8), payload)?;
    callback(handler, result, endpoint)
}

fn rsp_send(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| h.on_send_endpoint_response(r, e))
}

fn rsp_set_streaming(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_set_streaming_response(r, e)
    })
}

fn rsp_set_active(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_set_active_endpoint_response(r, e)
    })
}

fn rsp_set_streaming_destination(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_set_streaming_destination_response(r, e)
    })
}

fn rsp_close(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_close_endpoint_response(r, e)
    })
}

fn rsp_set_transmit_size(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_set_transmit_size_response(r, e)
    })
}

fn rsp_disable(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_endpoint(payload, handler, |h, r, e| {
        h.on_disable_endpoint_response(r, e)
    })
}

fn evt_syntax_error(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, endpoint) = decode(pair(le_u16, u8), payload)?;
    handler.on_endpoint_syntax_error(result, endpoint)
}

fn evt_data(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (endpoint, data) = decode(pair(u8, parse_u8_blob), payload)?;
    handler.on_endpoint_data(endpoint, data)
}

fn evt_status(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let event = decode(EndpointStatus::parse, payload)?;
    handler.on_endpoint_status(event)
}

fn evt_closing(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, endpoint) = decode(pair(le_u16, u8), payload)?;
    handler.on_endpoint_closing(reason, endpoint)
}

fn evt_error(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (reason, endpoint) = decode(pair(le_u16, u8), payload)?;
    handler.on_endpoint_error(reason, endpoint)
}

pub(crate) static ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: rsp_send,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: rsp_set_streaming,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: rsp_set_active,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: rsp_set_streaming_destination,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x04,
        decode: rsp_close,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x05,
        decode: rsp_set_transmit_size,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x06,
        decode: rsp_disable,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: evt_syntax_error,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x01,
        decode: evt_data,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x02,
        decode: evt_status,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x03,
        decode: evt_closing,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x04,
        decode: evt_error,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn endpoint_status_layout() {
        let payload = [
            0x02, // endpoint
            0x08, 0x00, 0x00, 0x00, // type
            0x01, // streaming
            0xff, // destination = -1
            0x01, // active
        ];
        let event = decode(EndpointStatus::parse, &payload).unwrap();
        assert_eq!(event.endpoint, 2);
        assert_eq!(event.endpoint_type, 8);
        assert!(event.streaming);
        assert_eq!(event.destination, -1);
        assert!(event.active);
    }

    #[test]
    fn send_endpoint_body() {
        let cmd = SendEndpoint {
            endpoint: 3,
            data: &[0x10, 0x20],
        };
        assert_eq!(cmd.payload_len(), 4);
        let mut buf = [0u8; 4];
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(buf, [0x03, 0x02, 0x10, 0x20]);
    }

    #[test]
    fn data_event_truncated() {
        // declares 5 data bytes but carries 2
        let payload = [0x01, 0x05, 0xaa, 0xbb];
        let mut sink = crate::protocol::dispatch::NullHandler;
        assert_eq!(evt_data(&payload, &mut sink), Err(Error::Unspecified));
    }
}
