//! Pointer output.
//!
//! [`PointerSink`] is what the tracking loop talks to. With the `hardware`
//! feature, [`CursorController`] implements it for X11, warping the pointer
//! and synthesizing clicks through the XTest extension.

use crate::{mapping::DisplaySize, Result};

/// Consumer of pointer positions and clicks
pub trait PointerSink {
    /// Size of the display the pointer moves on
    fn display_size(&self) -> DisplaySize;

    /// Move the pointer to an absolute display position
    ///
    /// # Errors
    ///
    /// Returns `CursorControl` if the move could not be delivered.
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;

    /// Press and release the primary button at the current position
    ///
    /// # Errors
    ///
    /// Returns `CursorControl` if the click could not be delivered.
    fn click_primary(&mut self) -> Result<()>;
}

#[cfg(feature = "hardware")]
pub use self::x11::CursorController;

#[cfg(feature = "hardware")]
mod x11 {
    use super::{DisplaySize, PointerSink, Result};
    use crate::{error::AppError, utils::safe_cast::f64_to_i16_clamp};
    use log::{debug, info};
    use x11rb::{
        connection::Connection,
        protocol::{
            xproto::{self, ConnectionExt as _, Screen},
            xtest::ConnectionExt as _,
        },
        rust_connection::RustConnection,
    };

    /// Primary (left) pointer button
    const PRIMARY_BUTTON: u8 = 1;

    /// Cursor control implementation for X11
    pub struct CursorController {
        connection: RustConnection,
        screen: Screen,
    }

    impl CursorController {
        /// Connect to the X server named by `DISPLAY`
        ///
        /// # Errors
        ///
        /// Returns `CursorControl` if the connection fails or the XTest
        /// extension is missing.
        pub fn new() -> Result<Self> {
            info!("Initializing X11 cursor controller");

            let (connection, screen_num) = RustConnection::connect(None)
                .map_err(|e| AppError::CursorControl(format!("Failed to connect to X11: {e}")))?;

            let screen = connection
                .setup()
                .roots
                .get(screen_num)
                .ok_or_else(|| AppError::CursorControl("Failed to get screen".to_string()))?
                .clone();

            connection
                .xtest_get_version(2, 2)
                .map_err(|e| AppError::CursorControl(format!("Failed to query XTest: {e}")))?
                .reply()
                .map_err(|e| AppError::CursorControl(format!("XTest extension unavailable: {e}")))?;

            info!(
                "Connected to X11 display, screen: {}x{}",
                screen.width_in_pixels, screen.height_in_pixels
            );

            Ok(Self { connection, screen })
        }

        fn send_button(&self, event_type: u8) -> Result<()> {
            self.connection
                .xtest_fake_input(event_type, PRIMARY_BUTTON, x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
                .map_err(|e| AppError::CursorControl(format!("Failed to send button event: {e}")))?;
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            self.connection
                .flush()
                .map_err(|e| AppError::CursorControl(format!("Failed to flush connection: {e}")))
        }
    }

    impl PointerSink for CursorController {
        fn display_size(&self) -> DisplaySize {
            DisplaySize::new(
                u32::from(self.screen.width_in_pixels),
                u32::from(self.screen.height_in_pixels),
            )
        }

        fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
            let max_x = i16::try_from(self.screen.width_in_pixels.saturating_sub(1)).unwrap_or(i16::MAX);
            let max_y = i16::try_from(self.screen.height_in_pixels.saturating_sub(1)).unwrap_or(i16::MAX);
            let x = f64_to_i16_clamp(x.round(), 0, max_x);
            let y = f64_to_i16_clamp(y.round(), 0, max_y);

            debug!("Setting cursor position to ({}, {})", x, y);

            self.connection
                .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
                .map_err(|e| AppError::CursorControl(format!("Failed to warp pointer: {e}")))?;
            self.flush()
        }

        fn click_primary(&mut self) -> Result<()> {
            debug!("Clicking primary button");
            self.send_button(xproto::BUTTON_PRESS_EVENT)?;
            self.send_button(xproto::BUTTON_RELEASE_EVENT)?;
            self.flush()
        }
    }

}
