//! Embassy async tasks
//!
//! The encoder task runs on the interrupt executor and the readout task on
//! the thread executor; they communicate only through the tracker.

pub mod encoder;
pub mod readout;

pub use encoder::encoder_task;
pub use readout::readout_task;
