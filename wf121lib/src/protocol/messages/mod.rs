//! Per-class message layouts and their parsers.
//!
//! Every variable-length field on the wire is introduced by its own
//! size byte (or, for UDP data, a size word); all parsers here check
//! the declared size against the remaining payload before consuming
//! it, so a corrupt length yields a decode error instead of a read
//! past the buffer.

use nom::IResult;

use crate::protocol::Error;

pub mod configuration;
pub mod endpoint;
pub mod hardware;
pub mod system;
pub mod tcp_stack;
pub mod wifi;

/// A six-byte MAC address.
pub type HardwareAddress = [u8; 6];

/// A four-byte IPv4 address.
pub type IpAddress = [u8; 4];

/// Run a payload parser, flattening any parse failure (including a
/// declared length that overruns the payload) into [Error::Unspecified].
pub(crate) fn decode<'a, T, P>(mut parser: P, payload: &'a [u8]) -> Result<T, Error>
where
    P: nom::Parser<&'a [u8], T, nom::error::Error<&'a [u8]>>,
{
    parser
        .parse(payload)
        .map(|(_rest, value)| value)
        .map_err(|_| Error::Unspecified)
}

/// Parse a fixed-size byte array, e.g. a MAC or IPv4 address.
pub(crate) fn parse_fixed<const LEN: usize>(input: &[u8]) -> IResult<&[u8], [u8; LEN]> {
    let (input, taken) = nom::bytes::complete::take(LEN)(input)?;
    let mut data = [0u8; LEN];
    data.copy_from_slice(taken);
    Ok((input, data))
}

/// Parse a blob with a one-byte length prefix.
pub(crate) fn parse_u8_blob(input: &[u8]) -> IResult<&[u8], &[u8]> {
    nom::multi::length_data(nom::number::complete::u8)(input)
}

/// Parse a blob with a two-byte length prefix.
pub(crate) fn parse_u16_blob(input: &[u8]) -> IResult<&[u8], &[u8]> {
    nom::multi::length_data(nom::number::complete::le_u16)(input)
}

pub(crate) fn parse_bool(input: &[u8]) -> IResult<&[u8], bool> {
    let (input, raw) = nom::number::complete::u8(input)?;
    Ok((input, raw > 0))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn u8_blob_checks_remaining_length() {
        // declared 5 bytes, only 3 present
        assert_eq!(
            decode(parse_u8_blob, &[0x05, 0x61, 0x62, 0x63]),
            Err::<&[u8], _>(Error::Unspecified)
        );
        assert_eq!(
            decode(parse_u8_blob, &[0x03, 0x61, 0x62, 0x63]),
            Ok(&b"abc"[..])
        );
    }

    #[test]
    fn u16_blob_checks_remaining_length() {
        assert_eq!(
            decode(parse_u16_blob, &[0x00, 0x01, 0xaa]),
            Err::<&[u8], _>(Error::Unspecified)
        );
        assert_eq!(
            decode(parse_u16_blob, &[0x02, 0x00, 0xaa, 0xbb]),
            Ok(&[0xaa, 0xbb][..])
        );
    }
}
