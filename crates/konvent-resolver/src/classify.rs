//! Module classification.

use konvent_core::capability::{Capability, CapabilitySet};
use konvent_core::module::{ModuleDescriptor, ModuleType};
use konvent_util::errors::KonventError;

/// Map a module's declared type tag to a [`ModuleType`].
pub fn classify(module: &ModuleDescriptor) -> miette::Result<ModuleType> {
    ModuleType::parse(&module.kind).ok_or_else(|| {
        KonventError::UnknownModuleType {
            module: module.name.clone(),
            tag: module.kind.clone(),
        }
        .into()
    })
}

/// The capabilities a module carries: those implied by its type plus any
/// plugin ids it declares. Unrecognized plugin ids are skipped.
pub fn capabilities(module: &ModuleDescriptor) -> miette::Result<CapabilitySet> {
    let mut set = CapabilitySet::for_type(classify(module)?);
    for id in &module.plugins {
        match Capability::from_plugin_id(id) {
            Some(capability) => {
                set.insert(capability);
            }
            None => tracing::debug!(module = %module.name, plugin = %id, "ignoring unknown plugin id"),
        }
    }
    Ok(set)
}
