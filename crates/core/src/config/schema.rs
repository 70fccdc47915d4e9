//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub xcode: XcodeConfig,
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Project name
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
        }
    }
}

fn default_project_name() -> String {
    "QRiderRD".to_string()
}

/// Xcode project patching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XcodeConfig {
    /// Path to the .xcodeproj bundle, relative to the working directory
    #[serde(default = "default_xcode_project")]
    pub project: String,

    /// Canonical bundle identifier written into every build configuration
    #[serde(default = "default_bundle_id")]
    pub bundle_id: String,
}

impl Default for XcodeConfig {
    fn default() -> Self {
        Self {
            project: default_xcode_project(),
            bundle_id: default_bundle_id(),
        }
    }
}

fn default_xcode_project() -> String {
    "ios/QRiderRD.xcodeproj".to_string()
}

fn default_bundle_id() -> String {
    "com.qriderrd".to_string()
}
