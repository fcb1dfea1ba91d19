//! Byte transfer over the physical link, with optional RTS/CTS
//! hardware flow control.
//!
//! Everything here is iteration-bounded: a poll that finds nothing
//! returns to the caller instead of spinning forever, so the engine
//! stays usable from a cooperative scheduler.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::protocol::Error;

/// Iteration budget used by the stock constructors, matching the
/// handshake loop of the original module driver.
pub const DEFAULT_POLL_BUDGET: u32 = 10_000;

fn io_error<E>(err: E) -> Error
where
    E: embedded_io::Error,
{
    Error::Io(err.kind())
}

/// Blocking, budget-bounded byte transfer over the physical link.
///
/// Implementations hold all knowledge of line state; no framing
/// happens at this layer.
pub trait TransportLink {
    /// Prepare the line, e.g. park the flow control outputs.
    fn init(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Transmit all of `bytes`, performing the flow control handshake
    /// first if one is configured. A handshake that never completes
    /// fails with [Error::Timeout] without transmitting anything.
    fn send(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Poll for incoming data for up to `budget` iterations. Returns
    /// `false` without consuming anything if none arrives. A zero
    /// budget still performs a single non-blocking check.
    fn receive_ready(&mut self, budget: u32) -> Result<bool, Error>;

    /// Read exactly `buf.len()` bytes. Call only once
    /// [Self::receive_ready] has confirmed data is arriving.
    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Error>;
}

/// The transmit-side handshake seam of [UartLink].
pub trait FlowControl {
    /// Claim the line for a write. Asserts request-to-send and waits
    /// for clear-to-send, where those lines exist.
    fn begin_send(&mut self) -> Result<(), Error>;

    /// Release the line after a write.
    fn end_send(&mut self) -> Result<(), Error>;
}

/// No handshake lines; every send proceeds immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoFlowControl;

impl FlowControl for NoFlowControl {
    fn begin_send(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn end_send(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Two-wire hardware flow control.
///
/// Both lines are active-low: the request-to-send output is driven low
/// to claim the channel, and the peer holds the clear-to-send input
/// low while it can accept data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtsCts<R, C> {
    rts: R,
    cts: C,
    budget: u32,
}

impl<R, C> RtsCts<R, C>
where
    R: OutputPin,
    C: InputPin,
{
    pub fn new(rts: R, cts: C) -> Self {
        Self::new_with_budget(rts, cts, DEFAULT_POLL_BUDGET)
    }

    pub fn new_with_budget(rts: R, cts: C, budget: u32) -> Self {
        Self { rts, cts, budget }
    }

    /// Release the pins.
    pub fn free(self) -> (R, C) {
        (self.rts, self.cts)
    }

    fn park(&mut self) -> Result<(), Error> {
        self.rts.set_high().map_err(|_| Error::Io(embedded_io::ErrorKind::Other))
    }
}

impl<R, C> FlowControl for RtsCts<R, C>
where
    R: OutputPin,
    C: InputPin,
{
    fn begin_send(&mut self) -> Result<(), Error> {
        self.rts
            .set_low()
            .map_err(|_| Error::Io(embedded_io::ErrorKind::Other))?;

        for _ in 0..self.budget {
            let clear = self
                .cts
                .is_low()
                .map_err(|_| Error::Io(embedded_io::ErrorKind::Other))?;
            if clear {
                return Ok(());
            }
        }

        // never became clear. leave the line released and send nothing.
        self.park()?;
        Err(Error::Timeout)
    }

    fn end_send(&mut self) -> Result<(), Error> {
        self.park()
    }
}

/// A [TransportLink] over any [embedded_io] serial port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartLink<P, F = NoFlowControl> {
    port: P,
    flow: F,
}

impl<P> UartLink<P> {
    /// A link without hardware flow control.
    pub fn new(port: P) -> Self {
        Self {
            port,
            flow: NoFlowControl,
        }
    }
}

impl<P, F> UartLink<P, F> {
    pub fn new_with_flow_control(port: P, flow: F) -> Self {
        Self { port, flow }
    }

    /// Release the components used to create this link.
    pub fn free(self) -> (P, F) {
        (self.port, self.flow)
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<P, F> TransportLink for UartLink<P, F>
where
    P: embedded_io::Read + embedded_io::Write + embedded_io::ReadReady,
    F: FlowControl,
{
    fn init(&mut self) -> Result<(), Error> {
        // power-on state: not claiming the line
        self.flow.end_send()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.flow.begin_send()?;

        let written = self
            .port
            .write_all(bytes)
            .map_err(io_error)
            .and_then(|()| self.port.flush().map_err(io_error));

        // release the line even when the write failed
        let released = self.flow.end_send();
        written?;
        released
    }

    fn receive_ready(&mut self, budget: u32) -> Result<bool, Error> {
        for _ in 0..budget.max(1) {
            if self.port.read_ready().map_err(io_error)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.port.read_exact(buf).map_err(|e| match e {
            embedded_io::ReadExactError::UnexpectedEof => Error::UnexpectedEof,
            embedded_io::ReadExactError::Other(e) => io_error(e),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use core::convert::Infallible;

    /// A pin pair that becomes clear after a set number of polls.
    struct Pins {
        rts_low: bool,
        clear_after: u32,
        polls: u32,
    }

    struct RtsPin<'a>(&'a core::cell::RefCell<Pins>);
    struct CtsPin<'a>(&'a core::cell::RefCell<Pins>);

    impl embedded_hal::digital::ErrorType for RtsPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for RtsPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().rts_low = true;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().rts_low = false;
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for CtsPin<'_> {
        type Error = Infallible;
    }

    impl InputPin for CtsPin<'_> {
        fn is_low(&mut self) -> Result<bool, Infallible> {
            let mut pins = self.0.borrow_mut();
            pins.polls += 1;
            Ok(pins.polls > pins.clear_after)
        }

        fn is_high(&mut self) -> Result<bool, Infallible> {
            self.is_low().map(|low| !low)
        }
    }

    fn pins(clear_after: u32) -> core::cell::RefCell<Pins> {
        core::cell::RefCell::new(Pins {
            rts_low: false,
            clear_after,
            polls: 0,
        })
    }

    /// A port with data always pending, counting readiness checks.
    struct IdlePort {
        checks: u32,
    }

    impl embedded_io::ErrorType for IdlePort {
        type Error = Infallible;
    }

    impl embedded_io::Read for IdlePort {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Infallible> {
            Ok(0)
        }
    }

    impl embedded_io::Write for IdlePort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    impl embedded_io::ReadReady for IdlePort {
        fn read_ready(&mut self) -> Result<bool, Infallible> {
            self.checks += 1;
            Ok(true)
        }
    }

    #[test]
    fn zero_budget_still_checks_once() {
        let mut link = UartLink::new(IdlePort { checks: 0 });
        assert_eq!(link.receive_ready(0), Ok(true));
        assert_eq!(link.port().checks, 1);
    }

    #[test]
    fn handshake_waits_for_clear() {
        let state = pins(3);
        let mut flow = RtsCts::new_with_budget(RtsPin(&state), CtsPin(&state), 10);
        assert_eq!(flow.begin_send(), Ok(()));
        assert!(state.borrow().rts_low);
        assert_eq!(flow.end_send(), Ok(()));
        assert!(!state.borrow().rts_low);
    }

    #[test]
    fn handshake_times_out_and_releases() {
        let state = pins(100);
        let mut flow = RtsCts::new_with_budget(RtsPin(&state), CtsPin(&state), 10);
        assert_eq!(flow.begin_send(), Err(Error::Timeout));
        // line released, nothing left asserted
        assert!(!state.borrow().rts_low);
    }
}
