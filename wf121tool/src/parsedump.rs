use wf121lib::protocol::{dispatch, BgApiHeader, Error, MessageKind, HEADER_LEN};

#[derive(clap::Args, Debug)]
pub struct ParseDumpOpts {
    dump: String,
}

impl crate::ToolRun for ParseDumpOpts {
    fn run(&self) -> anyhow::Result<()> {
        let rawdata = std::fs::read(&self.dump)?;
        let mut raw = &rawdata[..];
        let mut printer = crate::printer::PrintHandler;

        while raw.len() >= HEADER_LEN {
            let mut header_bytes = [0u8; HEADER_LEN];
            header_bytes.copy_from_slice(&raw[..HEADER_LEN]);

            let header = match BgApiHeader::decode(&header_bytes) {
                Ok(header) => header,
                Err(e) => {
                    println!("bad header: {}", e);
                    crate::hexdump::hexdump(&header_bytes);
                    anyhow::bail!("cannot resynchronize, stopping");
                }
            };

            let len = header.payload_len as usize;
            anyhow::ensure!(
                raw.len() >= HEADER_LEN + len,
                "dump truncated inside a payload"
            );
            let payload = &raw[HEADER_LEN..HEADER_LEN + len];
            raw = &raw[HEADER_LEN + len..];

            let direction = match header.kind {
                MessageKind::CommandResponse => "response",
                MessageKind::Event => "event",
            };
            println!(
                "{} {:?} cmd {:#04x}, {} bytes",
                direction, header.class, header.cmd, len
            );

            match dispatch(header.kind, header.class, header.cmd, payload, &mut printer) {
                Ok(()) => {}
                Err(Error::CommandNotRecognized) => {
                    println!("unrecognized command:");
                    crate::hexdump::hexdump_prefix("  ", payload);
                }
                Err(e) => {
                    println!("undecodable payload ({}):", e);
                    crate::hexdump::hexdump_prefix("  ", payload);
                }
            }
        }

        if !raw.is_empty() {
            println!("{} trailing bytes:", raw.len());
            crate::hexdump::hexdump(raw);
        }
        Ok(())
    }
}
