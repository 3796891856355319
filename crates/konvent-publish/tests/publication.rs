use chrono::{TimeZone, Utc};
use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;
use konvent_publish::platform::{ArtifactPlatform, JavadocJar};
use konvent_publish::publication::plan_publications;
use konvent_resolver::resolver::resolve_all;

const MANIFEST: &str = r#"
[project]
name = "stream-chat-android"
version = "6.0.0"

[publishing]
description = "Stream Chat SDK for Android"

[[publishing.developers]]
id = "getstream"
name = "Stream"
email = "support@getstream.io"

[[module]]
name = "client"
type = "android-library"

[[module]]
name = "models"
type = "java-library"

[[module]]
name = "bom"
type = "java-platform"

[[module]]
name = "internal"
type = "android-library"
publish = false

[[module]]
name = "sample"
type = "android-application"
"#;

fn env() -> BuildEnvironment {
    BuildEnvironment::release(Utc.with_ymd_and_hms(2025, 3, 1, 10, 5, 0).unwrap())
}

#[test]
fn plans_only_publishable_modules() {
    let manifest = ProjectManifest::parse_toml(MANIFEST).unwrap();
    let resolved = resolve_all(&manifest).unwrap();
    let plans = plan_publications(&resolved, &manifest, &env()).unwrap();
    let modules: Vec<&str> = plans.iter().map(|p| p.module.as_str()).collect();
    assert_eq!(modules, vec!["client", "models", "bom"]);

    assert_eq!(
        plans[0].platform,
        ArtifactPlatform::AndroidSingleVariantLibrary {
            variant: "release".to_string(),
            sources_jar: true,
            publish_javadoc_jar: true,
        }
    );
    assert_eq!(
        plans[1].platform,
        ArtifactPlatform::KotlinJvm {
            sources_jar: true,
            javadoc_jar: JavadocJar::Dokka("dokkaJavadoc".to_string()),
        }
    );
    assert_eq!(plans[2].platform, ArtifactPlatform::JavaPlatform);
    assert!(plans.iter().all(|p| p.automatic_release));
}

#[test]
fn pom_urls_derive_from_repository_name() {
    let manifest = ProjectManifest::parse_toml(MANIFEST).unwrap();
    let resolved = resolve_all(&manifest).unwrap();
    let plans = plan_publications(&resolved, &manifest, &env()).unwrap();
    let pom = &plans[0].pom;
    assert_eq!(pom.name, "client");
    assert_eq!(pom.url, "https://github.com/GetStream/stream-chat-android");
    assert_eq!(
        pom.license.url,
        "https://github.com/GetStream/stream-chat-android/blob/main/LICENSE"
    );
    assert_eq!(pom.license.name, "Stream License");
    assert_eq!(
        pom.scm.connection,
        "scm:git:git://github.com/GetStream/stream-chat-android.git"
    );
    assert_eq!(
        pom.scm.developer_connection,
        "scm:git:ssh://github.com:GetStream/stream-chat-android.git"
    );
}

#[test]
fn rendered_pom_contains_coordinates() {
    let manifest = ProjectManifest::parse_toml(MANIFEST).unwrap();
    let resolved = resolve_all(&manifest).unwrap();
    let plans = plan_publications(&resolved, &manifest, &env()).unwrap();
    let xml = plans[0].render_pom().unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<groupId>io.getstream</groupId>"));
    assert!(xml.contains("<artifactId>client</artifactId>"));
    assert!(xml.contains("<version>6.0.0</version>"));
    assert!(xml.contains("<packaging>aar</packaging>"));
    assert!(xml.contains("<email>support@getstream.io</email>"));
    assert!(xml.contains("<developerConnection>scm:git:ssh://github.com:GetStream/stream-chat-android.git</developerConnection>"));
}

#[test]
fn missing_description_fails() {
    let manifest = ProjectManifest::parse_toml(
        r#"
[project]
name = "acme"
version = "1.0.0"

[[module]]
name = "core"
type = "java-library"
"#,
    )
    .unwrap();
    let resolved = resolve_all(&manifest).unwrap();
    let err = plan_publications(&resolved, &manifest, &env()).unwrap_err();
    assert!(err.to_string().contains("publishing.description"), "got: {err}");
}

#[test]
fn default_pom_lists_stream_developers() {
    let manifest = ProjectManifest::parse_toml(
        r#"
[project]
name = "stream-video-android"
version = "1.0.0"

[publishing]
description = "Stream Video SDK"

[[module]]
name = "core"
type = "android-library"
"#,
    )
    .unwrap();
    let resolved = resolve_all(&manifest).unwrap();
    let plans = plan_publications(&resolved, &manifest, &env()).unwrap();
    let xml = plans[0].render_pom().unwrap();
    assert!(xml.contains("<developers>"), "got: {xml}");
    assert_eq!(xml.matches("<developer>").count(), 6);
    assert!(xml.contains("<id>aleksandar-apostolov</id>"));
    assert!(xml.contains("<email>gianmarco.david@getstream.io</email>"));
}

#[test]
fn explicit_developers_replace_defaults() {
    let manifest = ProjectManifest::parse_toml(MANIFEST).unwrap();
    let resolved = resolve_all(&manifest).unwrap();
    let plans = plan_publications(&resolved, &manifest, &env()).unwrap();
    let xml = plans[0].render_pom().unwrap();
    assert_eq!(xml.matches("<developer>").count(), 1);
    assert!(!xml.contains("<id>gpunto</id>"));
}
