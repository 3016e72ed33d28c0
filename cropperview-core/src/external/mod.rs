//! Invocation of the two external executables the pipeline delegates to.
//!
//! Cropperview performs no transcoding of its own: combining and cropping
//! go through HandBrakeCLI, the lens transform through superview-cli. This
//! module owns argument construction for both tools and the shared process
//! invoker that streams their output.

pub mod command;
pub mod handbrake;
pub mod superview;

pub use command::{run_tool, LogSink};
