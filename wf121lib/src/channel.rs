//! The command channel: one in-flight command at a time, interleaved
//! with unsolicited events.

use crate::protocol::serialize::SerializerSlice;
use crate::protocol::{
    dispatch, BgApiHeader, CommandSerialize, Error, MessageKind, Wf121Handler, HEADER_LEN,
    MAX_PAYLOAD_LEN, RX_BUFFER_LEN,
};
use crate::transport::{TransportLink, DEFAULT_POLL_BUDGET};

/// Where the channel stands with the command it last accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PendingCommand {
    /// No command outstanding.
    Idle,
    /// A command was accepted but its bytes have not all left yet.
    AwaitingClearToSend,
    /// The command is on the wire and its response is expected.
    Sent,
}

/// A half-duplex BGAPI command channel over a [TransportLink].
///
/// The module never pipelines: a second command before the first
/// response is refused with [Error::TooManyRequests]. Events may
/// arrive at any time, pending command or not, and are dispatched
/// as they come.
///
/// `RX_SIZE` bounds the largest payload the channel will buffer.
/// The default accepts anything the 11-bit length field can name.
pub struct CommandChannel<L, const RX_SIZE: usize = { RX_BUFFER_LEN }> {
    link: L,
    state: PendingCommand,
    poll_budget: u32,
    rx_payload: [u8; RX_SIZE],
    tx: [u8; HEADER_LEN + MAX_PAYLOAD_LEN],
}

impl<L, const RX_SIZE: usize> CommandChannel<L, RX_SIZE>
where
    L: TransportLink,
{
    pub fn new(link: L) -> Self {
        CommandChannel {
            link,
            state: PendingCommand::Idle,
            poll_budget: DEFAULT_POLL_BUDGET,
            rx_payload: [0; RX_SIZE],
            tx: [0; HEADER_LEN + MAX_PAYLOAD_LEN],
        }
    }

    /// Destroy this channel and get back the link.
    pub fn free(self) -> L {
        self.link
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// How many readiness polls [Self::pump] spends before deciding
    /// nothing is arriving.
    pub fn set_poll_budget(&mut self, budget: u32) {
        self.poll_budget = budget;
    }

    pub fn init(&mut self) -> Result<(), Error> {
        self.link.init()
    }

    /// Whether a command is outstanding.
    pub fn is_processing(&self) -> bool {
        self.state != PendingCommand::Idle
    }

    /// Put a raw command on the wire.
    ///
    /// Refused with [Error::TooManyRequests] while a previous command
    /// still awaits its response, without touching the link. The
    /// payload must match the length the header declares. A transport
    /// failure leaves the channel idle, so the caller may retry.
    pub fn transmit_command(
        &mut self,
        header: &BgApiHeader,
        payload: &[u8],
    ) -> Result<(), Error> {
        if self.state != PendingCommand::Idle {
            return Err(Error::TooManyRequests);
        }
        if payload.len() > MAX_PAYLOAD_LEN || payload.len() != header.payload_len as usize {
            return Err(Error::InvalidParameter);
        }

        self.tx[..HEADER_LEN].copy_from_slice(&header.encode());
        self.tx[HEADER_LEN..HEADER_LEN + payload.len()].copy_from_slice(payload);
        self.send_tx(HEADER_LEN + payload.len())
    }

    /// Serialize a typed command and put it on the wire. Same rules as
    /// [Self::transmit_command].
    pub fn send_command<C>(&mut self, command: &C) -> Result<(), Error>
    where
        C: CommandSerialize,
    {
        if self.state != PendingCommand::Idle {
            return Err(Error::TooManyRequests);
        }

        let header = command.header()?;
        let payload_len = header.payload_len as usize;

        self.tx[..HEADER_LEN].copy_from_slice(&header.encode());
        let mut ser = SerializerSlice::new(&mut self.tx[HEADER_LEN..HEADER_LEN + payload_len]);
        command.command_body(&mut ser)?;

        self.send_tx(HEADER_LEN + payload_len)
    }

    // header and payload go out as one write so the flow control
    // handshake happens once per command
    fn send_tx(&mut self, len: usize) -> Result<(), Error> {
        self.state = PendingCommand::AwaitingClearToSend;
        match self.link.send(&self.tx[..len]) {
            Ok(()) => {
                self.state = PendingCommand::Sent;
                Ok(())
            }
            Err(e) => {
                self.state = PendingCommand::Idle;
                Err(e)
            }
        }
    }

    /// Receive and dispatch at most one message.
    ///
    /// Returns [Error::Timeout] when nothing arrived within the poll
    /// budget; callers treat that as the routine idle outcome. A
    /// response whose leading result word is non-zero clears the
    /// pending command and surfaces as [Error::Device] without
    /// reaching the handler.
    pub fn pump(&mut self, handler: &mut dyn Wf121Handler) -> Result<(), Error> {
        if !self.link.receive_ready(self.poll_budget)? {
            return Err(Error::Timeout);
        }

        let mut raw = [0u8; HEADER_LEN];
        self.link.receive(&mut raw)?;
        let header = BgApiHeader::decode(&raw)?;

        let payload_len = header.payload_len as usize;
        if payload_len > RX_SIZE {
            self.drain(payload_len)?;
            return Err(Error::InvalidParameter);
        }
        self.link.receive(&mut self.rx_payload[..payload_len])?;
        let payload = &self.rx_payload[..payload_len];

        match header.kind {
            MessageKind::Event => dispatch(header.kind, header.class, header.cmd, payload, handler),
            MessageKind::CommandResponse => {
                if self.state != PendingCommand::Sent {
                    return Err(Error::Unspecified);
                }
                self.state = PendingCommand::Idle;

                // responses shorter than the result word carry no
                // device status to check
                if payload_len >= 2 {
                    let result = u16::from_le_bytes([payload[0], payload[1]]);
                    if result != 0 {
                        return Err(Error::Device(result));
                    }
                }
                dispatch(header.kind, header.class, header.cmd, payload, handler)
            }
        }
    }

    /// Abandon any pending command and discard whatever is sitting in
    /// the receive path. For recovering after a fatal pump error.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.state = PendingCommand::Idle;
        self.drain(RX_BUFFER_LEN)
    }

    fn drain(&mut self, limit: usize) -> Result<(), Error> {
        let mut scratch = [0u8; 1];
        for _ in 0..limit {
            if !self.link.receive_ready(0)? {
                break;
            }
            self.link.receive(&mut scratch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::dispatch::NullHandler;
    use crate::protocol::messages::system::HelloSystem;
    use crate::protocol::messages::wifi::TurnOnWifi;

    struct ScriptedLink {
        rx: Vec<u8>,
        pos: usize,
        sent: Vec<u8>,
    }

    impl ScriptedLink {
        fn new(rx: &[u8]) -> Self {
            ScriptedLink {
                rx: rx.to_vec(),
                pos: 0,
                sent: Vec::new(),
            }
        }
    }

    impl TransportLink for ScriptedLink {
        fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
            self.sent.extend_from_slice(bytes);
            Ok(())
        }

        fn receive_ready(&mut self, _budget: u32) -> Result<bool, Error> {
            Ok(self.pos < self.rx.len())
        }

        fn receive(&mut self, buf: &mut [u8]) -> Result<(), Error> {
            if self.rx.len() - self.pos < buf.len() {
                return Err(Error::UnexpectedEof);
            }
            buf.copy_from_slice(&self.rx[self.pos..self.pos + buf.len()]);
            self.pos += buf.len();
            Ok(())
        }
    }

    #[test]
    fn command_bytes_on_the_wire() {
        let mut channel: CommandChannel<_> = CommandChannel::new(ScriptedLink::new(&[]));
        channel.send_command(&HelloSystem).unwrap();
        assert_eq!(channel.link().sent, [0x08, 0x00, 0x01, 0x02]);
        assert!(channel.is_processing());
    }

    #[test]
    fn raw_transmit_bytes_on_the_wire() {
        use crate::protocol::{ClassId, Technology};

        let mut channel: CommandChannel<_> = CommandChannel::new(ScriptedLink::new(&[]));
        let header = BgApiHeader::new(
            MessageKind::CommandResponse,
            Technology::Wifi,
            ClassId::Endpoint,
            0x00,
            3,
        )
        .unwrap();
        channel.transmit_command(&header, &[0x02, 0x01, 0x55]).unwrap();
        assert_eq!(
            channel.link().sent,
            [0x08, 0x03, 0x05, 0x00, 0x02, 0x01, 0x55]
        );
        assert!(channel.is_processing());
    }

    #[test]
    fn raw_transmit_length_mismatch() {
        use crate::protocol::{ClassId, Technology};

        let mut channel: CommandChannel<_> = CommandChannel::new(ScriptedLink::new(&[]));
        let header = BgApiHeader::new(
            MessageKind::CommandResponse,
            Technology::Wifi,
            ClassId::Endpoint,
            0x00,
            3,
        )
        .unwrap();
        assert_eq!(
            channel.transmit_command(&header, &[0x02]),
            Err(Error::InvalidParameter)
        );
        assert!(!channel.is_processing());
        assert!(channel.link().sent.is_empty());
    }

    #[test]
    fn no_pipelining() {
        let mut channel: CommandChannel<_> = CommandChannel::new(ScriptedLink::new(&[]));
        channel.send_command(&HelloSystem).unwrap();
        assert_eq!(
            channel.send_command(&TurnOnWifi),
            Err(Error::TooManyRequests)
        );
        // the refused command must not have reached the wire
        assert_eq!(channel.link().sent, [0x08, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn response_completes_command() {
        struct Hello(bool);
        impl Wf121Handler for Hello {
            fn on_hello_response(&mut self) -> Result<(), Error> {
                self.0 = true;
                Ok(())
            }
        }

        // hello response: zero-length payload
        let mut channel: CommandChannel<_> =
            CommandChannel::new(ScriptedLink::new(&[0x08, 0x00, 0x01, 0x02]));
        channel.send_command(&HelloSystem).unwrap();
        let mut handler = Hello(false);
        channel.pump(&mut handler).unwrap();
        assert!(handler.0);
        assert!(!channel.is_processing());
    }

    #[test]
    fn device_error_skips_callback() {
        struct Panic;
        impl Wf121Handler for Panic {
            fn on_wifi_on_response(&mut self, _result: u16) -> Result<(), Error> {
                panic!("callback ran for a failed command");
            }
        }

        // result word 0x0181
        let mut channel: CommandChannel<_> =
            CommandChannel::new(ScriptedLink::new(&[0x08, 0x02, 0x03, 0x00, 0x81, 0x01]));
        channel.send_command(&TurnOnWifi).unwrap();
        let mut handler = Panic;
        assert_eq!(channel.pump(&mut handler), Err(Error::Device(0x0181)));
        assert!(!channel.is_processing());
    }

    #[test]
    fn unsolicited_response_is_rejected() {
        let mut channel: CommandChannel<_> =
            CommandChannel::new(ScriptedLink::new(&[0x08, 0x00, 0x01, 0x02]));
        let mut handler = NullHandler;
        assert_eq!(channel.pump(&mut handler), Err(Error::Unspecified));
    }

    #[test]
    fn idle_pump_times_out() {
        let mut channel: CommandChannel<_> = CommandChannel::new(ScriptedLink::new(&[]));
        let mut handler = NullHandler;
        assert_eq!(channel.pump(&mut handler), Err(Error::Timeout));
    }

    #[test]
    fn events_flow_while_idle() {
        struct Signal(Option<(i8, u8)>);
        impl Wf121Handler for Signal {
            fn on_signal_quality(&mut self, rssi: i8, interface: u8) -> Result<(), Error> {
                self.0 = Some((rssi, interface));
                Ok(())
            }
        }

        // event 0x16 on the wifi class: rssi -60, interface 0
        let mut channel: CommandChannel<_> =
            CommandChannel::new(ScriptedLink::new(&[0x88, 0x02, 0x03, 0x16, 0xc4, 0x00]));
        let mut handler = Signal(None);
        channel.pump(&mut handler).unwrap();
        assert_eq!(handler.0, Some((-60, 0)));
    }

    #[test]
    fn oversized_payload_is_drained() {
        // 16 byte payload against an 8 byte buffer, followed by a
        // well-formed event
        let mut rx = vec![0x88, 0x10, 0x03, 0x04];
        rx.extend_from_slice(&[0u8; 16]);
        rx.extend_from_slice(&[0x88, 0x01, 0x03, 0x04, 0x00]);

        struct Scanned(bool);
        impl Wf121Handler for Scanned {
            fn on_scanned(&mut self, _status: i8) -> Result<(), Error> {
                self.0 = true;
                Ok(())
            }
        }

        let mut channel: CommandChannel<_, 8> = CommandChannel::new(ScriptedLink::new(&rx));
        let mut handler = Scanned(false);
        assert_eq!(channel.pump(&mut handler), Err(Error::InvalidParameter));
        channel.pump(&mut handler).unwrap();
        assert!(handler.0);
    }

    #[test]
    fn reset_clears_pending_and_garbage() {
        let mut channel: CommandChannel<_> =
            CommandChannel::new(ScriptedLink::new(&[0xde, 0xad, 0xbe, 0xef]));
        channel.send_command(&HelloSystem).unwrap();
        channel.reset().unwrap();
        assert!(!channel.is_processing());
        assert_eq!(channel.link().pos, 4);
        let mut handler = NullHandler;
        assert_eq!(channel.pump(&mut handler), Err(Error::Timeout));
    }

    /// An [embedded_io] port backed by a byte script, for exercising
    /// the channel through [UartLink] rather than a bespoke link.
    struct MemPort {
        rx: Vec<u8>,
        pos: usize,
    }

    impl MemPort {
        fn new(rx: &[u8]) -> Self {
            MemPort {
                rx: rx.to_vec(),
                pos: 0,
            }
        }
    }

    impl embedded_io::ErrorType for MemPort {
        type Error = core::convert::Infallible;
    }

    impl embedded_io::Read for MemPort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.rx.len() - self.pos);
            buf[..n].copy_from_slice(&self.rx[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    impl embedded_io::Write for MemPort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl embedded_io::ReadReady for MemPort {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pos < self.rx.len())
        }
    }

    #[test]
    fn reset_drains_garbage_over_uart_link() {
        use crate::transport::UartLink;

        let mut channel: CommandChannel<_> =
            CommandChannel::new(UartLink::new(MemPort::new(&[0xde, 0xad, 0xbe, 0xef])));
        channel.send_command(&HelloSystem).unwrap();
        channel.reset().unwrap();
        assert!(!channel.is_processing());
        assert_eq!(channel.link().port().pos, 4);
        let mut handler = NullHandler;
        assert_eq!(channel.pump(&mut handler), Err(Error::Timeout));
    }

    #[test]
    fn oversized_payload_drained_over_uart_link() {
        use crate::transport::UartLink;

        // 16 byte payload against an 8 byte buffer, followed by a
        // well-formed event
        let mut rx = vec![0x88, 0x10, 0x03, 0x04];
        rx.extend_from_slice(&[0u8; 16]);
        rx.extend_from_slice(&[0x88, 0x01, 0x03, 0x04, 0x00]);

        struct Scanned(bool);
        impl Wf121Handler for Scanned {
            fn on_scanned(&mut self, _status: i8) -> Result<(), Error> {
                self.0 = true;
                Ok(())
            }
        }

        let mut channel: CommandChannel<_, 8> =
            CommandChannel::new(UartLink::new(MemPort::new(&rx)));
        let mut handler = Scanned(false);
        assert_eq!(channel.pump(&mut handler), Err(Error::InvalidParameter));
        channel.pump(&mut handler).unwrap();
        assert!(handler.0);
    }
}
