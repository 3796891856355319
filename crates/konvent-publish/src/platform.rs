use serde::Serialize;

use konvent_resolver::resolver::PublishDescriptor;

/// Variant published for Android libraries.
pub const ANDROID_PUBLISHED_VARIANT: &str = "release";

/// Dokka task producing the javadoc jar for Kotlin/JVM libraries.
pub const DOKKA_JAVADOC_TASK: &str = "dokkaJavadoc";

/// How the javadoc jar is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "task", rename_all = "kebab-case")]
pub enum JavadocJar {
    Empty,
    Dokka(String),
}

/// The publishing platform for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ArtifactPlatform {
    AndroidSingleVariantLibrary {
        variant: String,
        sources_jar: bool,
        publish_javadoc_jar: bool,
    },
    KotlinJvm {
        sources_jar: bool,
        javadoc_jar: JavadocJar,
    },
    JavaPlatform,
}

impl ArtifactPlatform {
    pub fn for_descriptor(descriptor: PublishDescriptor) -> Self {
        match descriptor {
            PublishDescriptor::AndroidLibrary => Self::AndroidSingleVariantLibrary {
                variant: ANDROID_PUBLISHED_VARIANT.to_string(),
                sources_jar: true,
                publish_javadoc_jar: true,
            },
            PublishDescriptor::KotlinLibrary => Self::KotlinJvm {
                sources_jar: true,
                javadoc_jar: JavadocJar::Dokka(DOKKA_JAVADOC_TASK.to_string()),
            },
            PublishDescriptor::PlatformDescriptor => Self::JavaPlatform,
        }
    }

    /// Maven `<packaging>` for the main artifact.
    pub fn packaging(&self) -> &'static str {
        match self {
            Self::AndroidSingleVariantLibrary { .. } => "aar",
            Self::KotlinJvm { .. } => "jar",
            Self::JavaPlatform => "pom",
        }
    }
}
