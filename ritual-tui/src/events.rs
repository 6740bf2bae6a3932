//! Events consumed by the main loop.

use crossterm::event::KeyEvent;
use ritual_client::RealtimeMessage;

/// Everything the event loop reacts to, funneled through one channel.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// A key press from the terminal.
    Input(KeyEvent),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
    /// A message from one of the realtime subscriptions.
    Realtime(RealtimeMessage),
}
