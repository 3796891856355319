//! Compiler and test-runner conventions.

use serde::Serialize;

use konvent_core::capability::{Capability, CapabilitySet};
use konvent_core::{JAVA_VERSION, JVM_TARGET};

/// Compile settings applied to a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompileConvention {
    pub source_compatibility: &'static str,
    pub target_compatibility: &'static str,
    /// Kotlin `jvmTarget`; only set when a Kotlin plugin is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_jvm_target: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_unit_tests: Option<AndroidUnitTestOptions>,
    pub test_logging: TestLogging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AndroidUnitTestOptions {
    pub include_android_resources: bool,
    pub return_default_values: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionFormat {
    Short,
    Full,
}

/// Test logging for every test task of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestLogging {
    pub events: Vec<&'static str>,
    pub show_exceptions: bool,
    pub show_causes: bool,
    pub show_stack_traces: bool,
    pub exception_format: ExceptionFormat,
}

impl Default for TestLogging {
    fn default() -> Self {
        Self {
            events: vec!["failed"],
            show_exceptions: true,
            show_causes: true,
            show_stack_traces: true,
            exception_format: ExceptionFormat::Full,
        }
    }
}

fn is_android(capabilities: &CapabilitySet) -> bool {
    capabilities.has_android_build_types() || capabilities.contains(Capability::AndroidTest)
}

/// Derive the compile convention from the capabilities a module carries.
pub fn convention(capabilities: &CapabilitySet) -> CompileConvention {
    let android_unit_tests = is_android(capabilities).then_some(AndroidUnitTestOptions {
        include_android_resources: true,
        return_default_values: true,
    });
    CompileConvention {
        source_compatibility: JAVA_VERSION,
        target_compatibility: JAVA_VERSION,
        kotlin_jvm_target: capabilities.has_kotlin().then_some(JVM_TARGET),
        android_unit_tests,
        test_logging: TestLogging::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use konvent_core::module::ModuleType;

    #[test]
    fn kotlin_target_only_with_kotlin_plugin() {
        let plain = convention(&CapabilitySet::for_type(ModuleType::Library));
        assert_eq!(plain.kotlin_jvm_target, None);

        let mut caps = CapabilitySet::for_type(ModuleType::Library);
        caps.insert(Capability::KotlinAndroid);
        assert_eq!(convention(&caps).kotlin_jvm_target, Some("11"));
    }

    #[test]
    fn java_library_has_no_android_unit_tests() {
        let c = convention(&CapabilitySet::for_type(ModuleType::JavaLibrary));
        assert!(c.android_unit_tests.is_none());
        assert_eq!(c.kotlin_jvm_target, Some("11"));
        assert_eq!(c.test_logging.events, vec!["failed"]);
    }
}
