//! Port discovery through a small file holding the server's port number.

use std::path::Path;

use super::{IpcError, IpcResult};

/// Records `port` in the port file, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`IpcError::PortFile`] if the file cannot be written.
pub fn write_port_file(path: &Path, port: u16) -> IpcResult<()> {
    let port_file_error = |err: std::io::Error| IpcError::PortFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(port_file_error)?;
    }
    std::fs::write(path, port.to_string()).map_err(port_file_error)?;
    tracing::debug!("ipc: wrote port {port} to {}", path.display());
    Ok(())
}

/// Reads the port a running server recorded.
///
/// # Errors
///
/// Returns [`IpcError::PortFile`] if the file is missing, unreadable, or does
/// not hold a port number.
pub fn read_port_file(path: &Path) -> IpcResult<u16> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        let reason = if err.kind() == std::io::ErrorKind::NotFound {
            "not found, is the server running?".to_string()
        } else {
            err.to_string()
        };
        IpcError::PortFile { path: path.to_path_buf(), reason }
    })?;

    contents.trim().parse().map_err(|_| IpcError::PortFile {
        path: path.to_path_buf(),
        reason: format!("{:?} is not a port number", contents.trim()),
    })
}

/// Picks the port a client should connect to: an explicit port wins, then
/// the configured default when `use_default` is set, otherwise the port file.
///
/// # Errors
///
/// Returns [`IpcError::PortFile`] if the port file has to be consulted and
/// cannot be read.
pub fn resolve_client_port(
    explicit: Option<u16>,
    use_default: bool,
    default_port: u16,
    port_file: &Path,
) -> IpcResult<u16> {
    match explicit {
        Some(port) => Ok(port),
        None if use_default => Ok(default_port),
        None => read_port_file(port_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("wintile_port");

        write_port_file(&path, 40123).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "40123");
        assert_eq!(read_port_file(&path).unwrap(), 40123);
    }

    #[test]
    fn test_port_file_tolerates_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port");
        std::fs::write(&path, " 6293\n").unwrap();
        assert_eq!(read_port_file(&path).unwrap(), 6293);
    }

    #[test]
    fn test_port_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = read_port_file(&missing).unwrap_err();
        assert!(err.to_string().contains("is the server running"));

        let garbage = dir.path().join("garbage");
        std::fs::write(&garbage, "70000").unwrap();
        assert!(matches!(read_port_file(&garbage), Err(IpcError::PortFile { .. })));
    }

    #[test]
    fn test_resolve_client_port_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port");
        write_port_file(&path, 5555).unwrap();

        assert_eq!(resolve_client_port(Some(1234), true, 6293, &path).unwrap(), 1234);
        assert_eq!(resolve_client_port(None, true, 6293, &path).unwrap(), 6293);
        assert_eq!(resolve_client_port(None, false, 6293, &path).unwrap(), 5555);
    }

    #[test]
    fn test_resolve_without_port_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_client_port(None, false, 6293, &dir.path().join("none"));
        assert!(result.is_err());
    }
}
