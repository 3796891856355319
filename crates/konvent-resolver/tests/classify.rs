use konvent_core::capability::Capability;
use konvent_core::module::{ModuleDescriptor, ModuleType};
use konvent_resolver::classify::{capabilities, classify};

#[test]
fn classifies_every_canonical_tag() {
    for module_type in ModuleType::ALL {
        let module = ModuleDescriptor::new("m", module_type);
        assert_eq!(classify(&module).unwrap(), module_type);
    }
}

#[test]
fn unknown_tag_fails() {
    let module = ModuleDescriptor::with_kind("m", "android-dynamic-feature");
    assert!(classify(&module).is_err());
}

#[test]
fn declared_plugins_extend_capabilities() {
    let module = ModuleDescriptor::new("ui", ModuleType::Library)
        .plugin("org.jetbrains.kotlin.android")
        .plugin("app.cash.paparazzi")
        .plugin("com.example.unknown");
    let caps = capabilities(&module).unwrap();
    assert!(caps.contains(Capability::AndroidLibrary));
    assert!(caps.contains(Capability::KotlinAndroid));
    assert!(caps.contains(Capability::Paparazzi));
    assert_eq!(caps.len(), 3);
}
