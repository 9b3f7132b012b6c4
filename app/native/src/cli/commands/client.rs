//! `wintile client` and `wintile stop`.

use super::{ClientArgs, TargetArgs};
use crate::config::{self, WintileConfig};
use crate::error::WintileError;
use crate::ipc;

fn target_port(target: &TargetArgs, config: &WintileConfig) -> Result<u16, WintileError> {
    let port = ipc::resolve_client_port(
        target.port,
        target.use_hardcoded_port,
        config.port,
        &config.port_file_path(),
    )?;
    Ok(port)
}

pub(super) fn execute(args: &ClientArgs) -> Result<(), WintileError> {
    let config = config::get_config();
    let port = target_port(&args.target, config)?;
    ipc::send_direction(args.direction, port, config.client_timeout())?;
    Ok(())
}

pub(super) fn stop(target: &TargetArgs) -> Result<(), WintileError> {
    let config = config::get_config();
    let port = target_port(target, config)?;
    ipc::send_stop(port, config.client_timeout())?;
    Ok(())
}
