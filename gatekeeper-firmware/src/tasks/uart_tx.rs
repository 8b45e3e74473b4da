//! Host UART transmit task
//!
//! Single writer on the UART. Each queued packet gets at most the link
//! timeout; packets that miss it are dropped.

use defmt::*;
use embassy_stm32::usart::BufferedUartTx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;

use gatekeeper_core::config::LINK_TIMEOUT_MS;

use crate::channels::TX_CHANNEL;

/// UART TX task - writes queued replies and events to the host
#[embassy_executor::task]
pub async fn uart_tx_task(mut tx: BufferedUartTx<'static>) {
    info!("UART TX task started");

    let timeout = Duration::from_millis(LINK_TIMEOUT_MS);

    loop {
        let packet = TX_CHANNEL.receive().await;

        let write = async {
            tx.write_all(&packet).await?;
            tx.flush().await
        };

        match with_timeout(timeout, write).await {
            Ok(Ok(())) => trace!("TX: {} bytes", packet.len()),
            Ok(Err(e)) => warn!("UART write error: {:?}", e),
            Err(_) => warn!("UART write timed out, {} bytes dropped", packet.len()),
        }
    }
}
