//! Publishing metadata for Konvent modules: Maven coordinates, snapshot
//! versions, artifact platforms and POM metadata.
//!
//! Nothing here uploads or signs artifacts; the plans are handed to the host
//! build's publishing backend.

pub mod coordinates;
pub mod platform;
pub mod pom;
pub mod publication;
