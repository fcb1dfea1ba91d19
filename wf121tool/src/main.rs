mod common;
mod hexdump;
mod monitor;
mod parsedump;
mod printer;

trait ToolRun {
    fn run(&self) -> anyhow::Result<()>;
}

#[derive(clap::Parser, Debug)]
#[command(version, about = "debug tools for BGAPI wifi modules")]
struct Tool {
    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(clap::Subcommand, Debug)]
enum ToolCommand {
    /// Parse a raw capture of link traffic.
    ParseDump(parsedump::ParseDumpOpts),
    /// Watch live traffic on a serial port.
    Monitor(monitor::MonitorOpts),
}

impl ToolRun for ToolCommand {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            ToolCommand::ParseDump(o) => o.run(),
            ToolCommand::Monitor(o) => o.run(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    Tool::parse().command.run()
}
