use std::io::{Read, Write};

use wf121lib::protocol::Error;
use wf121lib::transport::TransportLink;

#[derive(clap::Args, Debug, Clone)]
pub struct SerialPortArgs {
    #[arg(default_value_t = default_serial_port())]
    port: String,
    #[arg(short, long, default_value_t = wf121lib::protocol::BAUD_RATE)]
    baud: u32,
    #[arg(long)]
    plain_file: bool,
    #[arg(long)]
    tcp: bool,
}

#[derive(Debug)]
pub enum SerialPort {
    Serial(std::io::BufWriter<Box<dyn serialport::SerialPort>>),
    File(std::io::BufWriter<std::fs::File>),
    Tcp(std::io::BufWriter<std::net::TcpStream>),
}

pub fn default_serial_port() -> String {
    if let Ok(infos) = serialport::available_ports() {
        for info in infos {
            #[cfg(target_os = "macos")]
            if info.port_name.ends_with(".Bluetooth-Incoming-Port") {
                // these ports are almost always *not* what we want
                continue;
            }

            #[cfg(target_os = "macos")]
            if info.port_name.starts_with("/dev/tty.") {
                // macos ports with tty. have flow control we don't use
                // use cu. ports instead!
                continue;
            }

            return info.port_name.clone();
        }
    }

    // not great, but reasonable fallback
    "/dev/ttyUSB0".to_owned()
}

impl std::io::Read for SerialPort {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Serial(port) => port.get_mut().read(buf),
            Self::File(port) => port.get_mut().read(buf),
            Self::Tcp(port) => port.get_mut().read(buf),
        }
    }
}

impl std::io::Write for SerialPort {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Serial(port) => port.write(buf),
            Self::File(port) => port.write(buf),
            Self::Tcp(port) => port.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Serial(port) => port.flush(),
            Self::File(port) => port.flush(),
            Self::Tcp(port) => port.flush(),
        }
    }
}

impl SerialPortArgs {
    pub fn open(&self) -> anyhow::Result<SerialPort> {
        if self.tcp {
            let port = std::net::TcpStream::connect(&self.port)?;
            Ok(SerialPort::Tcp(std::io::BufWriter::new(port)))
        } else if self.plain_file {
            let port = std::fs::File::options()
                .read(true)
                .write(true)
                .open(&self.port)?;

            Ok(SerialPort::File(std::io::BufWriter::new(port)))
        } else {
            let mut port = serialport::new(&self.port, self.baud).open()?;
            port.set_timeout(std::time::Duration::from_secs(1))?;
            Ok(SerialPort::Serial(std::io::BufWriter::new(port)))
        }
    }
}

fn link_error(err: std::io::Error) -> Error {
    match err.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        std::io::ErrorKind::TimedOut => Error::Timeout,
        _ => Error::Io(embedded_io::ErrorKind::Other),
    }
}

impl TransportLink for SerialPort {
    fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.write_all(bytes).map_err(link_error)?;
        self.flush().map_err(link_error)
    }

    fn receive_ready(&mut self, budget: u32) -> Result<bool, Error> {
        match self {
            Self::Serial(port) => {
                for _ in 0..budget.max(1) {
                    let waiting = port.get_ref().bytes_to_read().map_err(|_| {
                        Error::Io(embedded_io::ErrorKind::Other)
                    })?;
                    if waiting > 0 {
                        return Ok(true);
                    }
                    std::thread::sleep(std::time::Duration::from_micros(100));
                }
                Ok(false)
            }
            // file and tcp reads block with a timeout instead
            _ => Ok(true),
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.read_exact(buf).map_err(link_error)
    }
}
