//! Display update task

use defmt::*;
use embassy_stm32::i2c::{I2c, Master};
use embassy_stm32::mode::Async;

use crate::channels::DISPLAY_TEXT;
use crate::ssd1306::Ssd1306;

/// Display task - renders the latest status text
#[embassy_executor::task]
pub async fn display_task(mut display: Ssd1306<I2c<'static, Async, Master>>) {
    info!("Display task started");

    loop {
        // Only the latest text matters; intermediate ones are skipped
        let text = DISPLAY_TEXT.wait().await;

        match display.show(text.as_str()).await {
            Ok(()) => trace!("Display updated"),
            Err(e) => warn!("Display write failed: {:?}", e),
        }
    }
}
