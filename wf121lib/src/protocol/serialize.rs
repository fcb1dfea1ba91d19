//! Serialization for outgoing command payloads.

use super::{BgApiHeader, ClassId, Error, MessageKind, Technology};

/// A trait for writing wire-format payload bytes.
pub trait Serializer {
    type Error;

    fn write_u8(&mut self, val: u8) -> Result<(), Self::Error>;

    // everything else can be written in terms of write_u8
    // (although they probably should be specialized in some impls)

    fn write_bytes(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        for b in val.iter() {
            self.write_u8(*b)?;
        }
        Ok(())
    }

    fn write_le_u16(&mut self, val: u16) -> Result<(), Self::Error> {
        self.write_bytes(&[(val & 0xff) as u8, (val >> 8) as u8])
    }

    fn write_le_i16(&mut self, val: i16) -> Result<(), Self::Error> {
        self.write_le_u16(val as u16)
    }

    fn write_le_u32(&mut self, val: u32) -> Result<(), Self::Error> {
        self.write_bytes(&[
            (val & 0xff) as u8,
            ((val >> 8) & 0xff) as u8,
            ((val >> 16) & 0xff) as u8,
            ((val >> 24) & 0xff) as u8,
        ])
    }
}

impl<S> Serializer for &mut S
where
    S: Serializer,
{
    type Error = S::Error;

    fn write_u8(&mut self, val: u8) -> Result<(), Self::Error> {
        (*self).write_u8(val)
    }

    fn write_bytes(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        (*self).write_bytes(val)
    }

    fn write_le_u16(&mut self, val: u16) -> Result<(), Self::Error> {
        (*self).write_le_u16(val)
    }

    fn write_le_i16(&mut self, val: i16) -> Result<(), Self::Error> {
        (*self).write_le_i16(val)
    }

    fn write_le_u32(&mut self, val: u32) -> Result<(), Self::Error> {
        (*self).write_le_u32(val)
    }
}

/// A serializer that only counts bytes written.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SerializerLength {
    len: usize,
}

impl SerializerLength {
    pub fn new() -> Self {
        SerializerLength { len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SerializerLength {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for SerializerLength {
    type Error = void::Void;

    fn write_u8(&mut self, _val: u8) -> Result<(), Self::Error> {
        self.len += 1;
        Ok(())
    }

    fn write_bytes(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        self.len += val.len();
        Ok(())
    }

    fn write_le_u16(&mut self, _val: u16) -> Result<(), Self::Error> {
        self.len += 2;
        Ok(())
    }

    fn write_le_i16(&mut self, _val: i16) -> Result<(), Self::Error> {
        self.len += 2;
        Ok(())
    }

    fn write_le_u32(&mut self, _val: u32) -> Result<(), Self::Error> {
        self.len += 4;
        Ok(())
    }
}

/// A serializer that fills a borrowed slice, failing with
/// [Error::InvalidParameter] when the slice runs out.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SerializerSlice<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SerializerSlice<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a> Serializer for SerializerSlice<'a> {
    type Error = Error;

    fn write_u8(&mut self, val: u8) -> Result<(), Self::Error> {
        if self.len >= self.buf.len() {
            return Err(Error::InvalidParameter);
        }
        self.buf[self.len] = val;
        self.len += 1;
        Ok(())
    }

    fn write_bytes(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        let end = self.len + val.len();
        if end > self.buf.len() {
            return Err(Error::InvalidParameter);
        }
        self.buf[self.len..end].copy_from_slice(val);
        self.len = end;
        Ok(())
    }
}

/// A typed command addressed to a `(class, command id)` slot.
///
/// The body serializer *must* perform the same writes every time it is
/// called for the same command, because the header length is derived by
/// running it once against a counting serializer.
pub trait CommandSerialize {
    const CLASS: ClassId;
    const CMD: u8;

    /// Serialize just the command payload.
    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer;

    /// Payload length this command will occupy on the wire.
    fn payload_len(&self) -> usize {
        use void::ResultVoidExt;

        let mut len_ser = SerializerLength::new();
        self.command_body(&mut len_ser).void_unwrap();
        len_ser.len()
    }

    /// Build the wire header for this command.
    fn header(&self) -> Result<BgApiHeader, Error> {
        BgApiHeader::new(
            MessageKind::CommandResponse,
            Technology::Wifi,
            Self::CLASS,
            Self::CMD,
            self.payload_len() as u16,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Probe;

    impl CommandSerialize for Probe {
        const CLASS: ClassId = ClassId::System;
        const CMD: u8 = 0x42;

        fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
        where
            S: Serializer,
        {
            ser.write_le_u16(0xbeef)?;
            ser.write_u8(0x7)
        }
    }

    #[test]
    fn header_length_from_counting() {
        let header = Probe.header().unwrap();
        assert_eq!(header.payload_len, 3);
        assert_eq!(header.class, ClassId::System);
        assert_eq!(header.cmd, 0x42);
        assert_eq!(header.kind, MessageKind::CommandResponse);
    }

    #[test]
    fn slice_serializer_writes_and_bounds() {
        let mut buf = [0u8; 3];
        let mut ser = SerializerSlice::new(&mut buf);
        Probe.command_body(&mut ser).unwrap();
        assert_eq!(ser.len(), 3);
        assert_eq!(buf, [0xef, 0xbe, 0x07]);

        let mut short = [0u8; 2];
        let mut ser = SerializerSlice::new(&mut short);
        assert_eq!(Probe.command_body(&mut ser), Err(Error::InvalidParameter));
    }
}
