//! Encoder edge task

use defmt::*;

use angulus_core::QuadratureTracker;
use angulus_drivers::encoder::EdgeDispatcher;
use angulus_hal_rp2040::RpInput;

/// Feed every A/B edge into the tracker
#[embassy_executor::task]
pub async fn encoder_task(
    a: RpInput<'static>,
    b: RpInput<'static>,
    tracker: &'static QuadratureTracker,
) {
    let mut dispatcher = EdgeDispatcher::new(a, b);
    info!("Encoder task started, channels {}", dispatcher.sample());

    dispatcher.run(tracker).await
}
