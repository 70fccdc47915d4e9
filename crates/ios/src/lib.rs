//! iOS-specific tools for QRiderRD
//!
//! This crate provides iOS/Xcode-specific functionality:
//! - Xcode project descriptor patching
//! - Tracking-module registration
//! - Project identifier generation

pub mod pbxproj;
