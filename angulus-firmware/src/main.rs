//! Angulus - Quadrature Angle Readout Firmware
//!
//! Counts encoder edges on an RP2040 and shows the shaft angle on a 16x2
//! HD44780 display and the UART console.
//!
//! Two executors share the single core:
//!
//! - An interrupt executor on `SWI_IRQ_1` runs the edge task. It preempts
//!   everything below it, including the LCD's busy-wait delays.
//! - The thread executor runs the readout loop in the foreground.
//!
//! The only state they share is the tracker's atomic count.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::gpio::{Input, Level, Output, Pin as _, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use angulus_core::config::{pins, CONSOLE_BAUDRATE, RESOLUTION};
use angulus_core::{Presenter, QuadratureTracker};
use angulus_drivers::lcd::{Hd44780, LcdConfig, LcdPins};
use angulus_hal_rp2040::pins::PinMap;
use angulus_hal_rp2040::{RpInput, RpOutput, UartConsole};

mod tasks;

const _: () = core::assert!(PinMap::BOARD.check().is_ok(), "board pin map is invalid");

/// Encoder position shared between the edge task and the readout loop
static TRACKER: QuadratureTracker = QuadratureTracker::new(RESOLUTION);

/// Executor for edge handling (preempts the foreground)
static EXECUTOR_EDGE: InterruptExecutor = InterruptExecutor::new();

/// Foreground executor
static EXECUTOR_MAIN: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_EDGE.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Angulus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    info!(
        "Pins: encoder A={} B={}, LCD RS={} EN={} D4..D7={}, console TX={}",
        pins::ENCODER_A,
        pins::ENCODER_B,
        pins::LCD_RS,
        pins::LCD_EN,
        pins::LCD_DATA,
        pins::CONSOLE_TX
    );

    // These claims must match `config::pins`; the map below is built from
    // the claimed peripherals and compared against it before any pin is used.
    let (enc_a, enc_b) = (p.PIN_2, p.PIN_3);
    let (lcd_rs, lcd_en) = (p.PIN_6, p.PIN_7);
    let (lcd_d4, lcd_d5, lcd_d6, lcd_d7) = (p.PIN_8, p.PIN_9, p.PIN_10, p.PIN_11);
    let console_tx = p.PIN_0;

    let claimed = PinMap {
        encoder_a: enc_a.pin(),
        encoder_b: enc_b.pin(),
        lcd_rs: lcd_rs.pin(),
        lcd_en: lcd_en.pin(),
        lcd_data: [lcd_d4.pin(), lcd_d5.pin(), lcd_d6.pin(), lcd_d7.pin()],
        console_tx: console_tx.pin(),
    };
    if let Some((used, wired)) = claimed.first_difference(&PinMap::BOARD) {
        defmt::panic!("claimed GPIO{} where the board map has GPIO{}", used, wired);
    }

    // Encoder channels idle high through the internal pull-ups
    let encoder_a = RpInput::new(Input::new(enc_a, Pull::Up));
    let encoder_b = RpInput::new(Input::new(enc_b, Pull::Up));

    // Start counting before the LCD power-on wait so no edges are lost
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let edge_spawner = EXECUTOR_EDGE.start(interrupt::SWI_IRQ_1);
    edge_spawner
        .spawn(tasks::encoder_task(encoder_a, encoder_b, &TRACKER))
        .unwrap();
    info!("Edge executor started");

    let lcd_pins = LcdPins {
        rs: RpOutput::new(Output::new(lcd_rs, Level::Low)),
        en: RpOutput::new(Output::new(lcd_en, Level::Low)),
        data: [
            RpOutput::new(Output::new(lcd_d4, Level::Low)),
            RpOutput::new(Output::new(lcd_d5, Level::Low)),
            RpOutput::new(Output::new(lcd_d6, Level::Low)),
            RpOutput::new(Output::new(lcd_d7, Level::Low)),
        ],
    };
    let lcd = Hd44780::initialize(lcd_pins, Delay, LcdConfig::default());
    info!("LCD initialized");

    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = CONSOLE_BAUDRATE;
        cfg
    };
    let console = UartConsole::new(UartTx::new_blocking(p.UART0, console_tx, uart_config));
    info!("Console on UART0 at {} baud", CONSOLE_BAUDRATE);

    let presenter = Presenter::new(lcd, console, RESOLUTION);

    let executor = EXECUTOR_MAIN.init(Executor::new());
    executor.run(|spawner| {
        spawner
            .spawn(tasks::readout_task(presenter, &TRACKER))
            .unwrap();
        info!("All tasks spawned, firmware running");
    })
}
