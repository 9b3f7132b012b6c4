//! `wintile server`.

use super::ServerArgs;
use crate::config::{self, WintileConfig};
use crate::error::WintileError;
use crate::ipc::{self, Server};
use crate::tiling::backend::X11Backend;

/// Port to bind: `--random-port` asks the OS, `--port` wins over config.
pub(super) fn listen_port(args: &ServerArgs, config: &WintileConfig) -> u16 {
    if args.random_port { 0 } else { args.port.unwrap_or(config.port) }
}

/// Connects to the display, binds the port and serves until stopped.
pub(super) fn execute(args: &ServerArgs) -> Result<(), WintileError> {
    let config = config::get_config();
    let backend = X11Backend::connect()?;

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        let server = Server::bind(listen_port(args, config)).await?;
        ipc::write_port_file(&config.port_file_path(), server.port())?;
        server.run(backend).await?;
        Ok(())
    })
}
