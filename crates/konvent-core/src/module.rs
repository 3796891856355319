use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The kinds of module a project can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleType {
    /// An Android application (`com.android.application`).
    #[serde(rename = "android-application")]
    Application,
    /// An Android library (`com.android.library`).
    #[serde(rename = "android-library")]
    Library,
    /// An Android test-only module (`com.android.test`).
    #[serde(rename = "android-test")]
    Test,
    /// A Kotlin/JVM library (`java-library` + `org.jetbrains.kotlin.jvm`).
    #[serde(rename = "java-library")]
    JavaLibrary,
    /// A Java platform (BOM) module (`java-platform`).
    #[serde(rename = "java-platform")]
    JavaPlatform,
}

impl ModuleType {
    pub const ALL: [ModuleType; 5] = [
        Self::Application,
        Self::Library,
        Self::Test,
        Self::JavaLibrary,
        Self::JavaPlatform,
    ];

    /// Parse a declared type tag. Accepts the canonical kebab-case tag and the
    /// convention plugin id that selects the same module type.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "android-application" | "io.getstream.android.application" => {
                Some(Self::Application)
            }
            "android-library" | "io.getstream.android.library" => Some(Self::Library),
            "android-test" | "io.getstream.android.test" => Some(Self::Test),
            "java-library" | "io.getstream.java.library" => Some(Self::JavaLibrary),
            "java-platform" | "io.getstream.java.platform" => Some(Self::JavaPlatform),
            _ => None,
        }
    }

    /// The canonical tag used in `Konvent.toml`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Application => "android-application",
            Self::Library => "android-library",
            Self::Test => "android-test",
            Self::JavaLibrary => "java-library",
            Self::JavaPlatform => "java-platform",
        }
    }

    /// Returns `true` for module types built by the Android Gradle plugin.
    pub fn is_android(&self) -> bool {
        matches!(self, Self::Application | Self::Library | Self::Test)
    }

    /// Returns `true` for module types that can produce a publication.
    pub fn is_publishable(&self) -> bool {
        matches!(self, Self::Library | Self::JavaLibrary | Self::JavaPlatform)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-module switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModuleFlags {
    pub disable_formatting: bool,
    pub publishing_enabled: bool,
    pub included_in_coverage: bool,
}

/// Android SDK levels and app metadata for Android modules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AndroidSettings {
    #[serde(default)]
    pub compile_sdk: Option<u32>,
    #[serde(default)]
    pub min_sdk: Option<u32>,
    #[serde(default)]
    pub target_sdk: Option<u32>,
    #[serde(default)]
    pub version_name: Option<String>,
}

/// One buildable unit as declared by the project.
///
/// The type is kept as the declared tag; [`ModuleType::parse`] (through the
/// resolver's classifier) turns it into a [`ModuleType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub kind: String,
    pub artifact_id_override: Option<String>,
    pub flags: ModuleFlags,
    /// Extra plugin ids applied to the module on top of those implied by its type.
    pub plugins: BTreeSet<String>,
    /// Module-level formatter exclusion globs.
    pub format_exclude: BTreeSet<String>,
    pub android: Option<AndroidSettings>,
}

impl ModuleDescriptor {
    /// Create a descriptor for a known module type.
    ///
    /// Publishing defaults to on for publishable types; everything else is off.
    pub fn new(name: impl Into<String>, module_type: ModuleType) -> Self {
        Self::with_kind(name, module_type.tag()).publishing(module_type.is_publishable())
    }

    /// Create a descriptor from a raw type tag, which may not be valid.
    pub fn with_kind(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            artifact_id_override: None,
            flags: ModuleFlags::default(),
            plugins: BTreeSet::new(),
            format_exclude: BTreeSet::new(),
            android: None,
        }
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id_override = Some(artifact_id.into());
        self
    }

    pub fn disable_formatting(mut self, disabled: bool) -> Self {
        self.flags.disable_formatting = disabled;
        self
    }

    pub fn publishing(mut self, enabled: bool) -> Self {
        self.flags.publishing_enabled = enabled;
        self
    }

    pub fn coverage(mut self, included: bool) -> Self {
        self.flags.included_in_coverage = included;
        self
    }

    /// Declare an additional plugin id on the module.
    pub fn plugin(mut self, id: impl Into<String>) -> Self {
        self.plugins.insert(id.into());
        self
    }

    pub fn format_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.format_exclude.insert(pattern.into());
        self
    }

    pub fn android(mut self, settings: AndroidSettings) -> Self {
        self.android = Some(settings);
        self
    }
}
