//! Barrier servo task

use defmt::*;
use embassy_stm32::peripherals::TIM4;

use crate::channels::SERVO_ANGLE;
use crate::servo::Servo;

/// Servo task - moves the barrier arm to the latest requested angle
#[embassy_executor::task]
pub async fn servo_task(mut servo: Servo<'static, TIM4>) {
    info!("Servo task started");

    loop {
        let angle = SERVO_ANGLE.wait().await;
        servo.set_angle(angle);
        debug!("Servo at {} degrees", angle);
    }
}
