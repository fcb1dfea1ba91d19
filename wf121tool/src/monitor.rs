use wf121lib::protocol::messages::system::{HelloSystem, SyncSystem};
use wf121lib::protocol::Error;
use wf121lib::CommandChannel;

#[derive(clap::Args, Debug)]
pub struct MonitorOpts {
    #[command(flatten)]
    port: crate::common::SerialPortArgs,

    /// Send a sync and a hello before listening.
    #[arg(long)]
    hello: bool,
}

impl crate::ToolRun for MonitorOpts {
    fn run(&self) -> anyhow::Result<()> {
        let port = self.port.open()?;
        let mut channel: CommandChannel<_> = CommandChannel::new(port);
        channel.init().map_err(|e| anyhow::anyhow!("{}", e))?;

        let mut printer = crate::printer::PrintHandler;

        if self.hello {
            run_command(&mut channel, &mut printer, &SyncSystem)?;
            run_command(&mut channel, &mut printer, &HelloSystem)?;
        }

        eprintln!("listening, ^C to stop");
        loop {
            match channel.pump(&mut printer) {
                Ok(()) => {}
                Err(Error::Timeout) => {
                    std::thread::sleep(std::time::Duration::from_millis(10));
                }
                Err(Error::UnexpectedEof) => {
                    eprintln!("link closed");
                    return Ok(());
                }
                Err(Error::Device(code)) => {
                    eprintln!("device reported error {:#06x}", code);
                }
                Err(e) => {
                    eprintln!("pump failed ({}), resetting channel", e);
                    channel.reset().map_err(|e| anyhow::anyhow!("{}", e))?;
                }
            }
        }
    }
}

fn run_command<C>(
    channel: &mut CommandChannel<crate::common::SerialPort>,
    printer: &mut crate::printer::PrintHandler,
    command: &C,
) -> anyhow::Result<()>
where
    C: wf121lib::protocol::CommandSerialize,
{
    channel
        .send_command(command)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // keep pumping until the response lands; events may interleave
    while channel.is_processing() {
        match channel.pump(printer) {
            Ok(()) => {}
            Err(Error::Timeout) => {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
            Err(Error::Device(code)) => {
                anyhow::bail!("device reported error {:#06x}", code);
            }
            Err(e) => anyhow::bail!("{}", e),
        }
    }
    Ok(())
}
