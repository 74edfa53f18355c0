//! Readout task
//!
//! Renders the angle on the console and the LCD at a fixed cadence. Each
//! frame takes one position snapshot; LCD writes busy-wait, which only
//! stretches the frame and never blocks edge handling.

use defmt::*;
use embassy_time::{Delay, Timer};

use angulus_core::config::REFRESH_INTERVAL_MS;
use angulus_core::{Presenter, QuadratureTracker};
use angulus_drivers::lcd::Hd44780;
use angulus_hal_rp2040::{RpOutput, UartConsole};

/// LCD as wired on the board
pub type Display = Hd44780<RpOutput<'static>, Delay>;

/// Render one frame per refresh interval, forever
#[embassy_executor::task]
pub async fn readout_task(
    mut presenter: Presenter<Display, UartConsole<'static>>,
    tracker: &'static QuadratureTracker,
) {
    info!("Readout task started ({}ms refresh)", REFRESH_INTERVAL_MS);

    loop {
        let position = tracker.read_position();
        let readout = presenter.render(position);
        trace!("{} (count {})", readout.as_str(), position);

        Timer::after_millis(REFRESH_INTERVAL_MS).await;
    }
}
