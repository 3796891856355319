//! POM metadata and POM XML rendering.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::fmt::Display;

use konvent_core::options::{Developer, GlobalOptions};
use konvent_util::errors::KonventError;

use crate::coordinates::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PomLicense {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PomScm {
    pub url: String,
    pub connection: String,
    pub developer_connection: String,
}

/// Descriptive POM content shared by every publication of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PomMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    pub license: PomLicense,
    pub developers: Vec<Developer>,
    pub scm: PomScm,
}

impl PomMetadata {
    /// Derive POM metadata for `artifact_id` from the publishing options.
    ///
    /// Needs `repository-name` and `publishing.description`.
    pub fn new(artifact_id: &str, options: &GlobalOptions) -> miette::Result<Self> {
        let repository = options.require_repository_name()?;
        let description = options
            .publishing
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| KonventError::MissingRequiredOption {
                option: "publishing.description".to_string(),
            })?;
        let organization = &options.publishing.github_organization;
        let url = format!("https://github.com/{organization}/{repository}");

        Ok(Self {
            name: artifact_id.to_string(),
            description: description.to_string(),
            license: PomLicense {
                name: options.publishing.license_name.clone(),
                url: format!("{url}/blob/main/LICENSE"),
            },
            developers: options.publishing.developers.clone(),
            scm: PomScm {
                url: url.clone(),
                connection: format!("scm:git:git://github.com/{organization}/{repository}.git"),
                developer_connection: format!(
                    "scm:git:ssh://github.com:{organization}/{repository}.git"
                ),
            },
            url,
        })
    }
}

fn xml_error(e: impl Display) -> KonventError {
    KonventError::Manifest {
        message: format!("Failed to render POM: {e}"),
    }
}

struct PomWriter {
    writer: Writer<Vec<u8>>,
}

impl PomWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> miette::Result<()> {
        self.writer.write_event(event).map_err(xml_error)?;
        Ok(())
    }

    fn open(&mut self, tag: &str) -> miette::Result<()> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn close(&mut self, tag: &str) -> miette::Result<()> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    fn text(&mut self, tag: &str, value: &str) -> miette::Result<()> {
        self.open(tag)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.close(tag)
    }

    fn finish(self) -> miette::Result<String> {
        let mut xml = String::from_utf8(self.writer.into_inner()).map_err(xml_error)?;
        xml.push('\n');
        Ok(xml)
    }
}

/// Render a complete `pom.xml` for a publication.
pub fn render_pom(
    coordinates: &Coordinates,
    packaging: &str,
    metadata: &PomMetadata,
) -> miette::Result<String> {
    let mut w = PomWriter::new();
    w.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.event(Event::Start(BytesStart::new("project").with_attributes([
        ("xmlns", "http://maven.apache.org/POM/4.0.0"),
        ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        (
            "xsi:schemaLocation",
            "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd",
        ),
    ])))?;
    w.text("modelVersion", "4.0.0")?;
    w.text("groupId", &coordinates.group)?;
    w.text("artifactId", &coordinates.artifact_id)?;
    w.text("version", &coordinates.version)?;
    w.text("packaging", packaging)?;
    w.text("name", &metadata.name)?;
    w.text("description", &metadata.description)?;
    w.text("url", &metadata.url)?;

    w.open("licenses")?;
    w.open("license")?;
    w.text("name", &metadata.license.name)?;
    w.text("url", &metadata.license.url)?;
    w.close("license")?;
    w.close("licenses")?;

    if !metadata.developers.is_empty() {
        w.open("developers")?;
        for dev in &metadata.developers {
            w.open("developer")?;
            w.text("id", &dev.id)?;
            w.text("name", &dev.name)?;
            w.text("email", &dev.email)?;
            w.close("developer")?;
        }
        w.close("developers")?;
    }

    w.open("scm")?;
    w.text("url", &metadata.scm.url)?;
    w.text("connection", &metadata.scm.connection)?;
    w.text("developerConnection", &metadata.scm.developer_connection)?;
    w.close("scm")?;

    w.close("project")?;
    w.finish()
}
