//! Capabilities: the plugins a module carries.
//!
//! Conventions are applied by checking capability membership rather than the
//! module's type, so a library that also applies Paparazzi picks up the
//! snapshot-test runner without a dedicated module type.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

use crate::module::ModuleType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    AndroidApplication,
    AndroidLibrary,
    AndroidTest,
    JavaLibrary,
    JavaPlatform,
    KotlinAndroid,
    KotlinJvm,
    Paparazzi,
}

impl Capability {
    /// Map a Gradle plugin id to the capability it grants.
    pub fn from_plugin_id(id: &str) -> Option<Self> {
        match id {
            "com.android.application" => Some(Self::AndroidApplication),
            "com.android.library" => Some(Self::AndroidLibrary),
            "com.android.test" => Some(Self::AndroidTest),
            "java-library" => Some(Self::JavaLibrary),
            "java-platform" => Some(Self::JavaPlatform),
            "org.jetbrains.kotlin.android" | "kotlin-android" => Some(Self::KotlinAndroid),
            "org.jetbrains.kotlin.jvm" | "kotlin-jvm" => Some(Self::KotlinJvm),
            "app.cash.paparazzi" => Some(Self::Paparazzi),
            _ => None,
        }
    }

    pub fn plugin_id(&self) -> &'static str {
        match self {
            Self::AndroidApplication => "com.android.application",
            Self::AndroidLibrary => "com.android.library",
            Self::AndroidTest => "com.android.test",
            Self::JavaLibrary => "java-library",
            Self::JavaPlatform => "java-platform",
            Self::KotlinAndroid => "org.jetbrains.kotlin.android",
            Self::KotlinJvm => "org.jetbrains.kotlin.jvm",
            Self::Paparazzi => "app.cash.paparazzi",
        }
    }

    /// Capabilities every module of `module_type` carries.
    pub fn implied_by(module_type: ModuleType) -> &'static [Capability] {
        match module_type {
            ModuleType::Application => &[Self::AndroidApplication],
            ModuleType::Library => &[Self::AndroidLibrary],
            ModuleType::Test => &[Self::AndroidTest],
            ModuleType::JavaLibrary => &[Self::JavaLibrary, Self::KotlinJvm],
            ModuleType::JavaPlatform => &[Self::JavaPlatform],
        }
    }
}

/// An ordered set of capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_type(module_type: ModuleType) -> Self {
        Capability::implied_by(module_type).iter().copied().collect()
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Returns `true` if a Kotlin compiler plugin is applied.
    pub fn has_kotlin(&self) -> bool {
        self.contains(Capability::KotlinAndroid) || self.contains(Capability::KotlinJvm)
    }

    /// Returns `true` if the module has Android build types (library or application).
    pub fn has_android_build_types(&self) -> bool {
        self.contains(Capability::AndroidLibrary) || self.contains(Capability::AndroidApplication)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(Capability::plugin_id))
    }
}
