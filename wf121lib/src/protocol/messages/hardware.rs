//! Hardware class (0x06): soft timers, GPIO, ADC, and the real-time
//! clock.

use nom::number::complete::{le_u16, u8};
use nom::sequence::tuple;
use nom::IResult;

use crate::protocol::dispatch::{DecoderEntry, Wf121Handler};
use crate::protocol::serialize::{CommandSerialize, Serializer};
use crate::protocol::{ClassId, Error, MessageKind};

use super::decode;

/// Response 0x0C RTC Get Time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcTime {
    pub result: u16,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl RtcTime {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, result) = le_u16(input)?;
        let (input, year) = le_u16(input)?;
        let (input, month) = u8(input)?;
        let (input, day) = u8(input)?;
        let (input, weekday) = u8(input)?;
        let (input, hour) = u8(input)?;
        let (input, minute) = u8(input)?;
        let (input, second) = u8(input)?;
        Ok((
            input,
            RtcTime {
                result,
                year,
                month,
                day,
                weekday,
                hour,
                minute,
                second,
            },
        ))
    }
}

/// 0x00 Set Soft Timer, command. A `time` of zero cancels the timer
/// with the matching handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetSoftTimer {
    pub time: u32,
    pub handle: u8,
    pub single_shot: u8,
}

impl CommandSerialize for SetSoftTimer {
    const CLASS: ClassId = ClassId::Hardware;
    const CMD: u8 = 0x00;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_le_u32(self.time)?;
        ser.write_u8(self.handle)?;
        ser.write_u8(self.single_shot)
    }
}

/// 0x06 IO Port Write, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoPortWrite {
    pub port: u8,
    pub mask: u16,
    pub data: u16,
}

impl CommandSerialize for IoPortWrite {
    const CLASS: ClassId = ClassId::Hardware;
    const CMD: u8 = 0x06;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.port)?;
        ser.write_le_u16(self.mask)?;
        ser.write_le_u16(self.data)
    }
}

/// 0x07 IO Port Read, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoPortRead {
    pub port: u8,
    pub mask: u16,
}

impl CommandSerialize for IoPortRead {
    const CLASS: ClassId = ClassId::Hardware;
    const CMD: u8 = 0x07;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.port)?;
        ser.write_le_u16(self.mask)
    }
}

/// 0x09 ADC Read, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcRead {
    pub input: u8,
}

impl CommandSerialize for AdcRead {
    const CLASS: ClassId = ClassId::Hardware;
    const CMD: u8 = 0x09;

    fn command_body<S>(&self, ser: &mut S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        ser.write_u8(self.input)
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

fn rsp_set_soft_timer(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_set_soft_timer_response(r))
}

fn rsp_configure_external_interrupt(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_configure_external_interrupt_response(r)
    })
}

fn rsp_change_notification_pullup(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_change_notification_pullup_response(r)
    })
}

fn rsp_io_port_config_direction(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_io_port_config_direction_response(r)
    })
}

fn rsp_io_port_config_open_drain(
    payload: &[u8],
    handler: &mut dyn Wf121Handler,
) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_io_port_config_open_drain_response(r)
    })
}

fn rsp_io_port_write(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_io_port_write_response(r))
}

fn rsp_io_port_read(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, port, data) = decode(tuple((le_u16, u8, le_u16)), payload)?;
    handler.on_io_port_read_response(result, port, data)
}

fn rsp_output_compare(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_output_compare_response(r))
}

fn rsp_adc_read(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let (result, input, value) = decode(tuple((le_u16, u8, le_u16)), payload)?;
    handler.on_adc_read_response(result, input, value)
}

fn rsp_rtc_init(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_rtc_init_response(r))
}

fn rsp_rtc_set_time(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_rtc_set_time_response(r))
}

fn rsp_rtc_get_time(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let time = decode(RtcTime::parse, payload)?;
    handler.on_rtc_get_time_response(time)
}

fn rsp_rtc_set_alarm(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_rtc_set_alarm_response(r))
}

fn rsp_configure_uart(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| h.on_configure_uart_response(r))
}

fn rsp_get_uart_configuration(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    result_only(payload, handler, |h, r| {
        h.on_get_uart_configuration_response(r)
    })
}

fn rsp_recognized(_payload: &[u8], _handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    Ok(())
}

fn evt_soft_timer(payload: &[u8], handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    let handle = decode(u8, payload)?;
    handler.on_soft_timer(handle)
}

// change notification, external interrupt, and rtc alarm events are
// recognized but carry no callback
fn evt_recognized(_payload: &[u8], _handler: &mut dyn Wf121Handler) -> Result<(), Error> {
    Ok(())
}

pub(crate) static ENTRIES: &[DecoderEntry] = &[
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x00,
        decode: rsp_set_soft_timer,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x01,
        decode: rsp_configure_external_interrupt,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x02,
        decode: rsp_recognized,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x03,
        decode: rsp_change_notification_pullup,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x04,
        decode: rsp_io_port_config_direction,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x05,
        decode: rsp_io_port_config_open_drain,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x06,
        decode: rsp_io_port_write,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x07,
        decode: rsp_io_port_read,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x08,
        decode: rsp_output_compare,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x09,
        decode: rsp_adc_read,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0a,
        decode: rsp_rtc_init,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0b,
        decode: rsp_rtc_set_time,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0c,
        decode: rsp_rtc_get_time,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0d,
        decode: rsp_rtc_set_alarm,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0e,
        decode: rsp_configure_uart,
    },
    DecoderEntry {
        kind: MessageKind::CommandResponse,
        cmd: 0x0f,
        decode: rsp_get_uart_configuration,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x00,
        decode: evt_soft_timer,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x01,
        decode: evt_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x02,
        decode: evt_recognized,
    },
    DecoderEntry {
        kind: MessageKind::Event,
        cmd: 0x03,
        decode: evt_recognized,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rtc_time_layout() {
        let payload = [
            0x00, 0x00, // result
            0xe6, 0x07, // year = 2022
            0x03, 0x0f, 0x02, // march 15th, tuesday
            0x0c, 0x1e, 0x2d, // 12:30:45
        ];
        let time = decode(RtcTime::parse, &payload).unwrap();
        assert_eq!(time.year, 2022);
        assert_eq!(time.month, 3);
        assert_eq!(time.day, 15);
        assert_eq!(time.hour, 12);
        assert_eq!(time.minute, 30);
        assert_eq!(time.second, 45);
    }

    #[test]
    fn set_soft_timer_body() {
        let cmd = SetSoftTimer {
            time: 0x0001_0000,
            handle: 2,
            single_shot: 1,
        };
        assert_eq!(cmd.payload_len(), 6);
        let mut buf = [0u8; 6];
        let mut ser = crate::protocol::serialize::SerializerSlice::new(&mut buf);
        cmd.command_body(&mut ser).unwrap();
        assert_eq!(buf, [0x00, 0x00, 0x01, 0x00, 0x02, 0x01]);
    }

    #[test]
    fn adc_response_input_position() {
        let payload = [
            0x00, 0x00, // result
            0x0b, // input
            0x34, 0x02, // value = 564
        ];
        struct Capture {
            input: u8,
            value: u16,
        }
        impl Wf121Handler for Capture {
            fn on_adc_read_response(
                &mut self,
                _result: u16,
                input: u8,
                value: u16,
            ) -> Result<(), Error> {
                self.input = input;
                self.value = value;
                Ok(())
            }
        }
        let mut capture = Capture { input: 0, value: 0 };
        rsp_adc_read(&payload, &mut capture).unwrap();
        assert_eq!(capture.input, 0x0b);
        assert_eq!(capture.value, 564);
    }

    #[test]
    fn interrupt_events_are_consumed_silently() {
        use crate::protocol::dispatch::{dispatch, NullHandler};
        use crate::protocol::ClassId;

        // change notification, external interrupt, rtc alarm: accepted
        // with any payload, even empty, and no callback fires
        let mut handler = NullHandler;
        for cmd in 0x01..=0x03 {
            dispatch(MessageKind::Event, ClassId::Hardware, cmd, &[], &mut handler).unwrap();
            dispatch(
                MessageKind::Event,
                ClassId::Hardware,
                cmd,
                &[0x05, 0xaa, 0xbb, 0xcc, 0xdd],
                &mut handler,
            )
            .unwrap();
        }
    }
}
