pub mod timer;

pub use timer::Countdown;
