//! Gatekeeper Barrier Controller Firmware
//!
//! Firmware for the car park barrier controller (STM32F103).
//! Reports vehicle presence to the host over UART and carries out the host's
//! barrier and display commands.
//!
//! Pin map:
//! - PA0: presence sensor (LM393 comparator output, active high)
//! - PB6: barrier servo PWM (TIM4 CH1)
//! - PB8/PB9: SSD1306 OLED (I2C1 SCL/SDA)
//! - PA2/PA3: host UART (USART2 TX/RX)

#![no_std]
#![no_main]

mod channels;
mod collaborators;
mod servo;
mod ssd1306;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Input, OutputType, Pull};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals::{I2C1, USART2};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gatekeeper_core::config::ControllerConfig;
use gatekeeper_core::dispatch::Dispatcher;
use gatekeeper_core::servo::SERVO_FREQUENCY_HZ;

use crate::collaborators::{SensorInput, SignalActuator, SignalDisplay};
use crate::servo::Servo;
use crate::ssd1306::Ssd1306;

bind_interrupts!(struct Irqs {
    USART2 => usart::BufferedInterruptHandler<USART2>;
    I2C1_EV => i2c::EventInterruptHandler<I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<I2C1>;
});

/// Host link baud rate
const HOST_BAUDRATE: u32 = 115_200;

/// OLED bus clock
const OLED_I2C_FREQUENCY_HZ: u32 = 400_000;

/// Controller configuration (compile-time only)
const CONFIG: ControllerConfig = ControllerConfig::DEFAULT;

// UART ring buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Gatekeeper firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Setup I2C for OLED (PB8=SCL, PB9=SDA), fast mode
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz(OLED_I2C_FREQUENCY_HZ);
    i2c_config.timeout = Duration::from_millis(100);

    let i2c = I2c::new(
        p.I2C1, p.PB8, p.PB9, Irqs, p.DMA1_CH6, p.DMA1_CH7, i2c_config,
    );

    let mut display = Ssd1306::new(i2c);
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
    }

    // Setup servo PWM (PB6, TIM4 CH1)
    let servo_pin = PwmPin::new(p.PB6, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM4,
        Some(servo_pin),
        None,
        None,
        None,
        Hertz(SERVO_FREQUENCY_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let servo = Servo::new(pwm.split().ch1);

    // Presence sensor (PA0), pulled down when nothing drives it
    let sensor = SensorInput::new(Input::new(p.PA0, Pull::Down));

    // Setup UART for host communication (PA2=TX, PA3=RX)
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = HOST_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = match BufferedUart::new(p.USART2, p.PA3, p.PA2, tx_buf, rx_buf, Irqs, uart_config)
    {
        Ok(uart) => uart,
        Err(e) => {
            error!("Failed to configure host UART: {:?}", e);
            return;
        }
    };
    let (tx, rx) = uart.split();

    // Power-on state: "Ready" on the display, barrier closed. The signals
    // hold these until the display and servo tasks pick them up.
    Dispatcher::new(CONFIG).boot(&mut SignalActuator, &mut SignalDisplay);

    // Spawn tasks
    spawner.spawn(tasks::display_task(display)).unwrap();
    spawner.spawn(tasks::servo_task(servo)).unwrap();
    spawner.spawn(tasks::uart_tx_task(tx)).unwrap();
    spawner.spawn(tasks::uart_rx_task(rx, CONFIG)).unwrap();
    spawner.spawn(tasks::presence_task(sensor, CONFIG)).unwrap();

    info!("All tasks spawned");
}
