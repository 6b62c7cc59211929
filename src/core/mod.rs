pub mod clock;
pub mod input_adapter;
pub mod timer;

pub use clock::{clamp_delta, Clock};
pub use input_adapter::WinitController;
pub use timer::Countdown;
