mod sensor;
mod session;

pub use sensor::{CameraFrame, Reading, ReadingValue, SensorType, StreamFrame, Verdict, VerdictStatus};
pub use session::{BufferCounts, SessionReport, SessionSnapshot};
