//! Compute device selection.
//!
//! The device is chosen once per invocation and applies to every codec call
//! in that run. Waveforms handed back for disk output always live in host
//! memory.

use std::fmt;

/// Compute device a codec run executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComputeDevice {
    /// Default host compute.
    #[default]
    Cpu,
    /// Accelerated compute (GPU or similar), when a backend provides one.
    Accelerator,
}

impl ComputeDevice {
    /// Resolve the device for a run. Requesting acceleration falls back to
    /// the default device when no accelerator backend is present.
    pub fn request(accelerated: bool) -> Self {
        if accelerated {
            if Self::accelerator_available() {
                return ComputeDevice::Accelerator;
            }
            tracing::debug!("No accelerator backend available, falling back to default compute");
        }
        ComputeDevice::Cpu
    }

    /// Whether an accelerator backend is compiled in and usable. The baseline
    /// engine runs on the host only; a neural engine registers its
    /// accelerator here.
    pub fn accelerator_available() -> bool {
        false
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeDevice::Cpu => write!(f, "cpu"),
            ComputeDevice::Accelerator => write!(f, "accel"),
        }
    }
}
