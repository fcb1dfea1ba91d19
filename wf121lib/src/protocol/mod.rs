//! The BGAPI-style wire protocol spoken by the WF121 module.

/// Size of the fixed message header, in bytes.
pub const HEADER_LEN: usize = 4;

/// Largest payload the 11-bit length field can describe.
pub const MAX_PAYLOAD_LEN: usize = 0x7ff;

/// Default capacity of the channel receive buffer.
pub const RX_BUFFER_LEN: usize = MAX_PAYLOAD_LEN + 1;

pub const BAUD_RATE: u32 = 115200;

pub mod dispatch;
pub use dispatch::{dispatch, Wf121Handler};

pub mod messages;

pub mod serialize;
pub use serialize::CommandSerialize;

/// Everything that can go wrong inside the engine.
///
/// [Error::Timeout] is the routine "nothing arrived inside the poll
/// budget" outcome of [crate::CommandChannel::pump], not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No data or handshake inside the configured iteration budget.
    Timeout,
    /// A command was submitted while another was still in flight.
    TooManyRequests,
    /// Malformed call arguments, e.g. an oversized payload.
    InvalidParameter,
    /// Unknown class/command pair, or a malformed header.
    CommandNotRecognized,
    /// Payload too short for its declared contents, or a response
    /// arrived with no command outstanding.
    Unspecified,
    /// Non-zero result code reported by the module in a command response.
    Device(u16),
    /// EOF in the underlying stream.
    UnexpectedEof,
    /// Other IO error in the underlying stream.
    Io(embedded_io::ErrorKind),
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out waiting for the link"),
            Self::TooManyRequests => write!(f, "a command is already in flight"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::CommandNotRecognized => write!(f, "unrecognized class or command"),
            Self::Unspecified => write!(f, "malformed payload or unexpected response"),
            Self::Device(code) => write!(f, "module reported error {:#06x}", code),
            Self::UnexpectedEof => write!(f, "unexpected eof"),
            Self::Io(kind) => write!(f, "io error: {:?}", kind),
        }
    }
}

/// Direction bit of a header: a reply to a command, or an
/// unsolicited event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MessageKind {
    CommandResponse = 0,
    Event = 1,
}

/// Technology field of a header. The WF121 always speaks [Technology::Wifi];
/// the Bluetooth value exists for its BLE siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Technology {
    Bluetooth = 0,
    Wifi = 1,
}

/// The device class a command or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClassId {
    FirmwareUpgrade = 0x00,
    System = 0x01,
    Configuration = 0x02,
    Wifi = 0x03,
    TcpStack = 0x04,
    Endpoint = 0x05,
    Hardware = 0x06,
    PersistentStore = 0x07,
    I2c = 0x08,
    HttpServer = 0x09,
    WiredEthernet = 0x0a,
}

impl ClassId {
    /// The highest class ordinal the module defines.
    pub const HIGHEST: ClassId = ClassId::WiredEthernet;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::FirmwareUpgrade),
            0x01 => Some(Self::System),
            0x02 => Some(Self::Configuration),
            0x03 => Some(Self::Wifi),
            0x04 => Some(Self::TcpStack),
            0x05 => Some(Self::Endpoint),
            0x06 => Some(Self::Hardware),
            0x07 => Some(Self::PersistentStore),
            0x08 => Some(Self::I2c),
            0x09 => Some(Self::HttpServer),
            0x0a => Some(Self::WiredEthernet),
            _ => None,
        }
    }
}

/// The 4-byte message envelope header.
///
/// Wire layout, little-endian multibyte fields:
///
/// ```text
/// byte 0: [direction:1][technology:4][length high:3]
/// byte 1: length low byte
/// byte 2: device class
/// byte 3: command id
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BgApiHeader {
    pub kind: MessageKind,
    pub technology: Technology,
    pub class: ClassId,
    pub cmd: u8,
    pub payload_len: u16,
}

impl BgApiHeader {
    /// Build a header, rejecting lengths the 11-bit field cannot hold.
    pub fn new(
        kind: MessageKind,
        technology: Technology,
        class: ClassId,
        cmd: u8,
        payload_len: u16,
    ) -> Result<Self, Error> {
        if payload_len as usize > MAX_PAYLOAD_LEN {
            return Err(Error::InvalidParameter);
        }
        Ok(Self {
            kind,
            technology,
            class,
            cmd,
            payload_len,
        })
    }

    /// Pack the header into its wire form. Reserved bits are zero and
    /// the length is masked to its 11 bits.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let len = self.payload_len & 0x7ff;
        [
            ((self.kind as u8) << 7) | ((self.technology as u8) << 3) | (len >> 8) as u8,
            (len & 0xff) as u8,
            self.class as u8,
            self.cmd,
        ]
    }

    /// Unpack a wire header.
    ///
    /// Checked in order: the technology field must name one of the two
    /// known technologies, the direction bit one of the two message
    /// kinds (trivially true for a 1-bit field, kept for symmetry with
    /// the module documentation), and the class ordinal must not pass
    /// [ClassId::HIGHEST]. Any violation discards the header with
    /// [Error::CommandNotRecognized].
    pub fn decode(raw: &[u8; HEADER_LEN]) -> Result<Self, Error> {
        let technology = match (raw[0] >> 3) & 0xf {
            0 => Technology::Bluetooth,
            1 => Technology::Wifi,
            _ => return Err(Error::CommandNotRecognized),
        };

        let kind = match raw[0] >> 7 {
            0 => MessageKind::CommandResponse,
            _ => MessageKind::Event,
        };

        let class = ClassId::from_u8(raw[2]).ok_or(Error::CommandNotRecognized)?;

        let payload_len = raw[1] as u16 | (((raw[0] & 0x7) as u16) << 8);

        Ok(Self {
            kind,
            technology,
            class,
            cmd: raw[3],
            payload_len,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    impl Arbitrary for MessageKind {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&[MessageKind::CommandResponse, MessageKind::Event])
                .unwrap()
        }
    }

    impl Arbitrary for Technology {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&[Technology::Bluetooth, Technology::Wifi]).unwrap()
        }
    }

    impl Arbitrary for ClassId {
        fn arbitrary(g: &mut Gen) -> Self {
            ClassId::from_u8(u8::arbitrary(g) % (ClassId::HIGHEST as u8 + 1)).unwrap()
        }
    }

    impl Arbitrary for BgApiHeader {
        fn arbitrary(g: &mut Gen) -> Self {
            Self {
                kind: MessageKind::arbitrary(g),
                technology: Technology::arbitrary(g),
                class: ClassId::arbitrary(g),
                cmd: u8::arbitrary(g),
                payload_len: u16::arbitrary(g) & 0x7ff,
            }
        }
    }

    #[quickcheck]
    fn roundtrip_header(header: BgApiHeader) -> bool {
        BgApiHeader::decode(&header.encode()) == Ok(header)
    }

    #[test]
    fn length_split_across_bytes() {
        let header =
            BgApiHeader::new(MessageKind::Event, Technology::Wifi, ClassId::Wifi, 0x02, 0x1ff)
                .unwrap();
        let raw = header.encode();
        assert_eq!(raw[0] & 0x7, 0x01);
        assert_eq!(raw[1], 0xff);
        assert_eq!(BgApiHeader::decode(&raw).unwrap().payload_len, 0x1ff);
    }

    #[test]
    fn length_masked_to_11_bits() {
        // 0x802 encodes as its low 11 bits only
        let header = BgApiHeader {
            kind: MessageKind::CommandResponse,
            technology: Technology::Wifi,
            class: ClassId::System,
            cmd: 0x00,
            payload_len: 0x802,
        };
        let decoded = BgApiHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded.payload_len, 2);
    }

    #[test]
    fn new_rejects_oversized_length() {
        assert_eq!(
            BgApiHeader::new(
                MessageKind::CommandResponse,
                Technology::Wifi,
                ClassId::System,
                0x00,
                0x800,
            ),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn decode_rejects_unknown_technology() {
        // technology nibble 0b0010
        let raw = [0x10, 0x00, 0x01, 0x00];
        assert_eq!(BgApiHeader::decode(&raw), Err(Error::CommandNotRecognized));
    }

    #[test]
    fn decode_rejects_class_past_highest() {
        let raw = [0x08, 0x00, ClassId::HIGHEST as u8 + 1, 0x00];
        assert_eq!(BgApiHeader::decode(&raw), Err(Error::CommandNotRecognized));
    }
}
