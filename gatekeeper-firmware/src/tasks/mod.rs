//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod display;
pub mod presence;
pub mod servo;
pub mod uart_rx;
pub mod uart_tx;

pub use display::display_task;
pub use presence::presence_task;
pub use servo::servo_task;
pub use uart_rx::uart_rx_task;
pub use uart_tx::uart_tx_task;
