//! Device capability tiers and the pool size each one gets.

use crate::environment::FlowParams;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Capability {
    #[default]
    High,
    Medium,
    Low,
}

impl Capability {
    pub fn particle_count(self, params: &FlowParams) -> usize {
        match self {
            Capability::High => params.pool_high,
            Capability::Medium => params.pool_medium,
            Capability::Low => params.pool_low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::High => "high",
            Capability::Medium => "medium",
            Capability::Low => "low",
        }
    }
}

/// What the front-end could learn about the device. `None` means the browser
/// did not report it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceProfile {
    pub cores: Option<u32>,
    pub memory_gb: Option<f32>,
    pub is_mobile: bool,
    pub has_webgl: bool,
}

const DEFAULT_CORES: u32 = 4;
const DEFAULT_MEMORY_GB: f32 = 4.0;

pub fn classify(profile: &DeviceProfile) -> Capability {
    let cores = profile.cores.filter(|c| *c > 0).unwrap_or(DEFAULT_CORES);
    let memory = profile
        .memory_gb
        .filter(|m| *m > 0.0)
        .unwrap_or(DEFAULT_MEMORY_GB);

    if !profile.has_webgl || (profile.is_mobile && cores < 4) || memory < 4.0 {
        Capability::Low
    } else if profile.is_mobile || cores < 8 || memory < 8.0 {
        Capability::Medium
    } else {
        Capability::High
    }
}

#[inline]
pub fn is_mobile_user_agent(ua: &str) -> bool {
    let ua = ua.to_ascii_lowercase();
    ["android", "iphone", "ipad", "ipod"]
        .iter()
        .any(|needle| ua.contains(needle))
}
