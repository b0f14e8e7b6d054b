//! Build environment configuration for doctest projects
//!
//! The test binary itself is compiled by an external build system; this
//! module only prepares the compiler flag set that build needs: a C++
//! standard (doctest requires at least C++11) and the define that
//! disables ANSI colors so the output stream stays parseable.

/// Registry name of the framework library a test build must link against.
pub const FRAMEWORK_LIB_DEP: &str = "doctest/doctest@^2.4.8";

/// Preprocessor define disabling colored output.
const COLORS_NONE_DEFINE: &str = "DOCTEST_CONFIG_COLORS_NONE";

/// A compiler flag set handed to the external build system.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// C++ compiler flags
    pub cxxflags: Vec<String>,
    /// Preprocessor defines (bare names, no `-D` prefix)
    pub cppdefines: Vec<String>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the doctest-specific build settings: default the language
    /// standard to C++11 unless the caller already picked one, and
    /// disable colored output.
    pub fn configure(&mut self) {
        if !self.cxxflags.iter().any(|flag| flag.contains("-std=")) {
            self.cxxflags.push("-std=c++11".to_string());
        }
        self.cppdefines.push(COLORS_NONE_DEFINE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_defaults_standard() {
        let mut config = BuildConfig::new();
        config.configure();
        assert!(config.cxxflags.iter().any(|f| f == "-std=c++11"));
        assert!(config.cppdefines.iter().any(|d| d == "DOCTEST_CONFIG_COLORS_NONE"));
    }

    #[test]
    fn test_configure_keeps_explicit_standard() {
        let mut config = BuildConfig {
            cxxflags: vec!["-std=c++17".into()],
            ..Default::default()
        };
        config.configure();
        assert!(!config.cxxflags.iter().any(|f| f == "-std=c++11"));
        assert_eq!(config.cxxflags, vec!["-std=c++17".to_string()]);
    }
}
