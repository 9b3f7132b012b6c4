//! X11 display backend using Extended Window Manager Hints.
//!
//! Geometry is read straight from the X server. Changes are requested from
//! the window manager through EWMH client messages sent to the root window,
//! so any EWMH-compliant, reparenting window manager can honor them.

use x11rb::connection::Connection;
use x11rb::protocol::randr::ConnectionExt as RandrExt;
use x11rb::protocol::xproto::{
    AtomEnum, ClientMessageEvent, ConnectionExt, EventMask, GetGeometryReply, Window,
};
use x11rb::rust_connection::RustConnection;

use super::{DisplayBackend, WindowGeometry};
use crate::tiling::error::{TilingError, TilingResult};
use crate::tiling::state::Rect;

x11rb::atom_manager! {
    /// EWMH atoms used by the backend.
    Atoms: AtomsCookie {
        _NET_ACTIVE_WINDOW,
        _NET_WM_STATE,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_MOVERESIZE_WINDOW,
    }
}

/// `_NET_WM_STATE` action that removes a property.
const NET_WM_STATE_REMOVE: u32 = 0;

/// Source indication for client messages: a pager or tool, not the app.
const SOURCE_PAGER: u32 = 2;

/// `_NET_MOVERESIZE_WINDOW` flags: x, y, width and height are all present,
/// gravity is left to the window's own.
const MOVERESIZE_FLAGS: u32 = 0xF << 8;

/// Backend talking to an X server over the pure Rust connection.
pub struct X11Backend {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
}

impl std::fmt::Debug for X11Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X11Backend").field("root", &self.root).finish_non_exhaustive()
    }
}

impl X11Backend {
    /// Connects to the X server named by `$DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the connection or the atom lookup fails.
    pub fn connect() -> TilingResult<Self> {
        let (conn, screen_num) = x11rb::connect(None).map_err(backend_error)?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| TilingError::backend(format!("no X screen {screen_num}")))?;
        let atoms = Atoms::new(&conn).map_err(backend_error)?.reply().map_err(backend_error)?;
        tracing::debug!("x11: connected, root window {root:#x}");
        Ok(Self { conn, root, atoms })
    }

    fn active_window(&self) -> TilingResult<Window> {
        let reply = self
            .conn
            .get_property(false, self.root, self.atoms._NET_ACTIVE_WINDOW, AtomEnum::WINDOW, 0, 1)
            .map_err(backend_error)?
            .reply()
            .map_err(backend_error)?;
        reply
            .value32()
            .and_then(|mut values| values.next())
            .filter(|window| *window != x11rb::NONE)
            .ok_or(TilingError::NoFocusedWindow)
    }

    fn geometry(&self, window: Window) -> TilingResult<Rect> {
        let reply =
            self.conn.get_geometry(window).map_err(backend_error)?.reply().map_err(backend_error)?;
        Ok(rect_from_geometry(&reply))
    }

    fn send_root_message(
        &self,
        window: Window,
        message_type: u32,
        data: [u32; 5],
    ) -> TilingResult<()> {
        let event = ClientMessageEvent::new(32, window, message_type, data);
        self.conn
            .send_event(
                false,
                self.root,
                EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                event,
            )
            .map_err(backend_error)?;
        Ok(())
    }
}

impl DisplayBackend for X11Backend {
    fn monitors(&self) -> TilingResult<Vec<Rect>> {
        let reply = self
            .conn
            .randr_get_monitors(self.root, true)
            .map_err(backend_error)?
            .reply()
            .map_err(backend_error)?;
        Ok(reply
            .monitors
            .iter()
            .map(|monitor| {
                Rect::new(
                    i32::from(monitor.x),
                    i32::from(monitor.y),
                    i32::from(monitor.width),
                    i32::from(monitor.height),
                )
            })
            .collect())
    }

    fn focused_window(&self) -> TilingResult<WindowGeometry> {
        let window = self.active_window()?;
        let tree =
            self.conn.query_tree(window).map_err(backend_error)?.reply().map_err(backend_error)?;
        let parent = tree.parent;
        let window_rect = self.geometry(window)?;
        let frame = if parent == self.root || parent == x11rb::NONE {
            // Not reparented, so there are no decorations to account for.
            window_rect
        } else {
            self.geometry(parent)?
        };
        Ok(WindowGeometry::new(window_rect, frame))
    }

    fn unmaximize(&self) -> TilingResult<()> {
        let window = self.active_window()?;
        self.send_root_message(window, self.atoms._NET_WM_STATE, [
            NET_WM_STATE_REMOVE,
            self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
            self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
            SOURCE_PAGER,
            0,
        ])
    }

    #[allow(clippy::cast_sign_loss)] // EWMH carries signed coordinates in CARD32 slots
    fn move_resize(&self, frame: Rect) -> TilingResult<()> {
        let window = self.active_window()?;
        self.send_root_message(window, self.atoms._NET_MOVERESIZE_WINDOW, [
            MOVERESIZE_FLAGS | (SOURCE_PAGER << 12),
            frame.x as u32,
            frame.y as u32,
            frame.width.max(1) as u32,
            frame.height.max(1) as u32,
        ])?;
        self.conn.flush().map_err(backend_error)?;
        Ok(())
    }
}

fn rect_from_geometry(reply: &GetGeometryReply) -> Rect {
    Rect::new(
        i32::from(reply.x),
        i32::from(reply.y),
        i32::from(reply.width),
        i32::from(reply.height),
    )
}

fn backend_error(err: impl std::fmt::Display) -> TilingError {
    TilingError::backend(err.to_string())
}
