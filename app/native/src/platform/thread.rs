use std::io;
use std::thread::{self, JoinHandle};

/// Spawns an OS thread named `wintile-{name}`.
///
/// # Errors
///
/// Returns an error if the OS refuses to create the thread.
pub fn spawn_named_thread<F, T>(name: &str, task: F) -> io::Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let thread_name = format!("wintile-{name}");

    thread::Builder::new().name(thread_name.clone()).spawn(task).inspect_err(|err| {
        tracing::error!(thread = %thread_name, error = %err, "failed to spawn thread");
    })
}
