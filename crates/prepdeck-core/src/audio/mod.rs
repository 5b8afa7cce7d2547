//! Microphone capture and WAV encoding.

mod devices;
mod encoder;
mod recorder;

pub use devices::{AudioDeviceInfo, list_input_devices};
pub use encoder::encode_wav;
pub use recorder::{MicRecorder, RecorderConfig, RecordingOutput};
