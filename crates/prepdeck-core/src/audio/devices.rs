//! Audio input device enumeration and lookup.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait};

/// One selectable input device.
#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// List all available audio input devices on the system.
///
/// # Errors
/// Returns an error if no audio input devices are found.
pub fn list_input_devices() -> Result<Vec<AudioDeviceInfo>> {
    let host = cpal::default_host();
    let default_device_name = host
        .default_input_device()
        .and_then(|d| d.description().ok())
        .map(|d| d.to_string());

    let mut devices = Vec::new();
    for device in host.input_devices()? {
        if let Ok(desc) = device.description() {
            let name = desc.to_string();
            devices.push(AudioDeviceInfo {
                is_default: default_device_name.as_deref() == Some(name.as_str()),
                name,
            });
        }
    }

    if devices.is_empty() {
        anyhow::bail!("No audio input devices found");
    }
    Ok(devices)
}

/// Resolve a device by name, or the system default when no name is given.
pub(crate) fn find_input_device(name: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    match name {
        Some(wanted) => {
            for device in host.input_devices()? {
                if let Ok(desc) = device.description()
                    && desc.to_string() == wanted
                {
                    return Ok(device);
                }
            }
            anyhow::bail!("Audio input device not found: {wanted}")
        }
        None => host
            .default_input_device()
            .context("No default audio input device available"),
    }
}
