//! Xcode project descriptor patching
//!
//! Registers the native ride-tracking module in
//! `QRiderRD.xcodeproj/project.pbxproj` the way the Xcode UI would:
//! file references, build files, group membership, build-phase entries,
//! the Swift bridging-header setting, and the bundle identifier.
//!
//! The descriptor is treated as an opaque text buffer. Every edit is an
//! insertion anchored on the stable object identifiers of the stock
//! React Native template; an absent anchor leaves that part of the buffer
//! unchanged. Running the patch twice inserts every entry twice, so callers
//! are expected to start from a freshly generated project.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};
use tracing::debug;
use uuid::Uuid;

use qrider_core::error::{Error, Result, ResultExt};

/// Main application group in the React Native template.
const APP_GROUP_ID: &str = "13B07FAE1A68108700A75B9A";
/// Compile Sources build phase of the app target.
const SOURCES_PHASE_ID: &str = "13B07F871A680F5B00A75B9A";
/// Copy Bundle Resources build phase of the app target.
const RESOURCES_PHASE_ID: &str = "13B07F8E1A680F5B00A75B9A";
/// Debug build configuration of the app target.
const DEBUG_CONFIG_ID: &str = "13B07F941A680F5B00A75B9A";
/// Release build configuration of the app target.
const RELEASE_CONFIG_ID: &str = "13B07F951A680F5B00A75B9A";

/// Build setting wiring the Objective-C bridging header into Swift builds.
const BRIDGING_HEADER_SETTING: &str =
    "\t\t\t\tSWIFT_OBJC_BRIDGING_HEADER = \"QRiderRD/QRiderRD-Bridging-Header.h\";";

/// Files the tracking setup wires into the project, in summary order.
pub const TRACKED_FILES: [&str; 4] = [
    "TrackingService.swift",
    "TrackingServiceBridge.m",
    "QRiderRD-Bridging-Header.h",
    "GoogleService-Info.plist",
];

static END_FILE_REFS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\* End PBXFileReference section \*/").unwrap());

static END_BUILD_FILES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\* End PBXBuildFile section \*/").unwrap());

static APP_GROUP_CHILDREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s)({APP_GROUP_ID} /\* QRiderRD \*/ = \{{.*?children = \(\s*)"
    ))
    .unwrap()
});

static SOURCES_FILES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s)({SOURCES_PHASE_ID} /\* Sources \*/ = \{{.*?files = \(\s*)"
    ))
    .unwrap()
});

// Bounded match: stops at the first `}` after the phase header and the
// first `)` inside the file list. A descriptor with a brace in between
// will not anchor here and the resource entry is skipped.
static RESOURCES_FILES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{RESOURCES_PHASE_ID} /\* Resources \*/ = \{{[^}}]*files = \([^)]*"
    ))
    .unwrap()
});

static DEBUG_SWIFT_VERSION: Lazy<Regex> =
    Lazy::new(|| build_settings_anchor(DEBUG_CONFIG_ID, "Debug"));

static RELEASE_SWIFT_VERSION: Lazy<Regex> =
    Lazy::new(|| build_settings_anchor(RELEASE_CONFIG_ID, "Release"));

static BUNDLE_ID_SETTING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"PRODUCT_BUNDLE_IDENTIFIER = "[^"]*";"#).unwrap());

fn build_settings_anchor(config_id: &str, config_name: &str) -> Regex {
    Regex::new(&format!(
        r"({config_id} /\* {config_name} \*/ = \{{[^}}]*buildSettings = \{{[^}}]*SWIFT_VERSION = 5\.0;)"
    ))
    .unwrap()
}

/// Generate a pbxproj object identifier: 24 uppercase hex characters.
///
/// Derived from a random UUID, so identifiers are unique per call with
/// the same collision odds Xcode itself accepts.
pub fn generate_object_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..24].to_uppercase()
}

/// Object identifiers minted for one tracking-setup run.
#[derive(Debug, Clone)]
struct TrackingIds {
    /// File reference for TrackingService.swift.
    tracking_service: String,
    /// File reference for TrackingServiceBridge.m.
    tracking_bridge: String,
    /// File reference for the bridging header.
    bridging_header: String,
    /// File reference for GoogleService-Info.plist.
    google_service: String,
    /// Build file compiling TrackingService.swift.
    tracking_service_build: String,
    /// Build file compiling TrackingServiceBridge.m.
    tracking_bridge_build: String,
    /// Build file bundling GoogleService-Info.plist.
    google_service_resource: String,
}

impl TrackingIds {
    fn generate() -> Self {
        Self {
            tracking_service: generate_object_id(),
            tracking_bridge: generate_object_id(),
            bridging_header: generate_object_id(),
            google_service: generate_object_id(),
            tracking_service_build: generate_object_id(),
            tracking_bridge_build: generate_object_id(),
            google_service_resource: generate_object_id(),
        }
    }
}

/// What a tracking-setup run changed.
#[derive(Debug, Clone)]
pub struct PatchSummary {
    /// File names registered in the project.
    pub added_files: Vec<&'static str>,
    /// Whether the Resources build phase accepted the plist entry.
    pub resources_patched: bool,
    /// Bundle identifier written into the build configurations.
    pub bundle_id: String,
}

impl PatchSummary {
    /// Print the summary banner.
    pub fn print(&self) {
        use owo_colors::OwoColorize;

        println!("{}", "✅ Xcode project updated successfully!".green().bold());
        println!("{}", "📝 Added files:".bold());
        for file in &self.added_files {
            println!("   - {file}");
        }
        println!("🔧 Updated Bundle Identifier to: {}", self.bundle_id.cyan());
        println!("🔗 Configured Swift Bridging Header");
    }
}

/// An Xcode project descriptor loaded into memory for patching.
///
/// All edits operate on the in-memory buffer; nothing touches disk until
/// [`ProjectPatcher::save`] is called.
#[derive(Debug)]
pub struct ProjectPatcher {
    pbxproj_path: PathBuf,
    content: String,
}

impl ProjectPatcher {
    /// Load the descriptor from an `.xcodeproj` directory.
    pub fn open(project: &Path) -> Result<Self> {
        let pbxproj_path = project.join("project.pbxproj");
        if !pbxproj_path.exists() {
            return Err(Error::file_not_found(&pbxproj_path));
        }

        let content = fs::read_to_string(&pbxproj_path)
            .map_err(Error::from)
            .context(format!("Failed to read {}", pbxproj_path.display()))?;

        debug!(
            path = %pbxproj_path.display(),
            bytes = content.len(),
            "loaded project descriptor"
        );

        Ok(Self {
            pbxproj_path,
            content,
        })
    }

    /// Current in-memory descriptor text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Register the tracking module in the descriptor.
    ///
    /// Mints fresh object identifiers, inserts the file references, build
    /// files, group children and build-phase entries, wires the bridging
    /// header into both app configurations, and rewrites every quoted
    /// bundle identifier to `bundle_id`. Each insertion is skipped when its
    /// template anchor is missing.
    pub fn install_tracking(&mut self, bundle_id: &str) -> PatchSummary {
        let ids = TrackingIds::generate();

        self.insert_file_references(&ids);
        self.insert_build_files(&ids);
        self.insert_group_children(&ids);
        self.insert_source_entries(&ids);
        let resources_patched = self.append_resource_entry(&ids);
        self.insert_bridging_header_setting();
        self.set_bundle_identifier(bundle_id);

        PatchSummary {
            added_files: TRACKED_FILES.to_vec(),
            resources_patched,
            bundle_id: bundle_id.to_string(),
        }
    }

    /// Write the patched descriptor back to disk.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.pbxproj_path, &self.content)
            .map_err(Error::from)
            .context(format!("Failed to write {}", self.pbxproj_path.display()))?;

        debug!(
            path = %self.pbxproj_path.display(),
            bytes = self.content.len(),
            "saved project descriptor"
        );
        Ok(())
    }

    /// Declare the four new files in the PBXFileReference section.
    fn insert_file_references(&mut self, ids: &TrackingIds) {
        let block = [
            format!(
                "\t\t{} /* TrackingService.swift */ = {{isa = PBXFileReference; lastKnownFileType = sourcecode.swift; name = TrackingService.swift; path = QRiderRD/TrackingService.swift; sourceTree = \"<group>\"; }};",
                ids.tracking_service
            ),
            format!(
                "\t\t{} /* TrackingServiceBridge.m */ = {{isa = PBXFileReference; lastKnownFileType = sourcecode.c.objc; name = TrackingServiceBridge.m; path = QRiderRD/TrackingServiceBridge.m; sourceTree = \"<group>\"; }};",
                ids.tracking_bridge
            ),
            format!(
                "\t\t{} /* QRiderRD-Bridging-Header.h */ = {{isa = PBXFileReference; lastKnownFileType = sourcecode.c.h; name = \"QRiderRD-Bridging-Header.h\"; path = \"QRiderRD/QRiderRD-Bridging-Header.h\"; sourceTree = \"<group>\"; }};",
                ids.bridging_header
            ),
            format!(
                "\t\t{} /* GoogleService-Info.plist */ = {{isa = PBXFileReference; fileEncoding = 4; lastKnownFileType = text.plist.xml; name = \"GoogleService-Info.plist\"; path = \"GoogleService-Info.plist\"; sourceTree = \"<group>\"; }};",
                ids.google_service
            ),
        ]
        .join("\n");

        self.insert_before_marker(&END_FILE_REFS, &block);
    }

    /// Declare the compile and copy steps in the PBXBuildFile section.
    fn insert_build_files(&mut self, ids: &TrackingIds) {
        let block = [
            format!(
                "\t\t{} /* TrackingService.swift in Sources */ = {{isa = PBXBuildFile; fileRef = {} /* TrackingService.swift */; }};",
                ids.tracking_service_build, ids.tracking_service
            ),
            format!(
                "\t\t{} /* TrackingServiceBridge.m in Sources */ = {{isa = PBXBuildFile; fileRef = {} /* TrackingServiceBridge.m */; }};",
                ids.tracking_bridge_build, ids.tracking_bridge
            ),
            format!(
                "\t\t{} /* GoogleService-Info.plist in Resources */ = {{isa = PBXBuildFile; fileRef = {} /* GoogleService-Info.plist */; }};",
                ids.google_service_resource, ids.google_service
            ),
        ]
        .join("\n");

        self.insert_before_marker(&END_BUILD_FILES, &block);
    }

    /// Show the files under the app group in the Xcode navigator.
    fn insert_group_children(&mut self, ids: &TrackingIds) {
        let block = [
            format!("\t\t\t\t{} /* TrackingService.swift */,", ids.tracking_service),
            format!("\t\t\t\t{} /* TrackingServiceBridge.m */,", ids.tracking_bridge),
            format!(
                "\t\t\t\t{} /* QRiderRD-Bridging-Header.h */,",
                ids.bridging_header
            ),
            format!("\t\t\t\t{} /* GoogleService-Info.plist */,", ids.google_service),
        ]
        .join("\n");

        self.insert_after_anchor(&APP_GROUP_CHILDREN, &block);
    }

    /// Compile the two native sources in the app target.
    fn insert_source_entries(&mut self, ids: &TrackingIds) {
        let block = [
            format!(
                "\t\t\t\t{} /* TrackingService.swift in Sources */,",
                ids.tracking_service_build
            ),
            format!(
                "\t\t\t\t{} /* TrackingServiceBridge.m in Sources */,",
                ids.tracking_bridge_build
            ),
        ]
        .join("\n");

        self.insert_after_anchor(&SOURCES_FILES, &block);
    }

    /// Bundle the Firebase plist via the Resources build phase.
    ///
    /// Returns `false` when the bounded anchor does not match, in which
    /// case the plist stays declared but unattached.
    fn append_resource_entry(&mut self, ids: &TrackingIds) -> bool {
        let span = match RESOURCES_FILES.find(&self.content) {
            Some(m) => m.as_str().to_string(),
            None => return false,
        };

        let appended = format!(
            "{}\n\t\t\t\t{} /* GoogleService-Info.plist in Resources */,",
            span, ids.google_service_resource
        );
        self.content = self.content.replace(&span, &appended);
        true
    }

    /// Add `SWIFT_OBJC_BRIDGING_HEADER` after `SWIFT_VERSION` in the Debug
    /// and Release configurations of the app target.
    fn insert_bridging_header_setting(&mut self) {
        for anchor in [&*DEBUG_SWIFT_VERSION, &*RELEASE_SWIFT_VERSION] {
            let patched = anchor
                .replacen(&self.content, 1, |caps: &Captures<'_>| {
                    format!("{}\n{}", &caps[1], BRIDGING_HEADER_SETTING)
                })
                .into_owned();
            self.content = patched;
        }
    }

    /// Rewrite every quoted `PRODUCT_BUNDLE_IDENTIFIER` to `bundle_id`.
    ///
    /// The replacement is written unquoted, which Xcode accepts for plain
    /// reverse-DNS identifiers. Already-unquoted settings are left alone.
    fn set_bundle_identifier(&mut self, bundle_id: &str) {
        let canonical = format!("PRODUCT_BUNDLE_IDENTIFIER = {bundle_id};");
        let patched = BUNDLE_ID_SETTING
            .replace_all(&self.content, NoExpand(&canonical))
            .into_owned();
        self.content = patched;
    }

    /// Insert `block` and a newline before the first match of `marker`.
    /// No match leaves the buffer untouched.
    fn insert_before_marker(&mut self, marker: &Regex, block: &str) {
        let patched = marker
            .replacen(&self.content, 1, |caps: &Captures<'_>| {
                format!("{}\n{}", block, &caps[0])
            })
            .into_owned();
        self.content = patched;
    }

    /// Insert `block` and a newline after the first match of `anchor`
    /// (its capture group 1). No match leaves the buffer untouched.
    fn insert_after_anchor(&mut self, anchor: &Regex, block: &str) {
        let patched = anchor
            .replacen(&self.content, 1, |caps: &Captures<'_>| {
                format!("{}{}\n", &caps[1], block)
            })
            .into_owned();
        self.content = patched;
    }
}
