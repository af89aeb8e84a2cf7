//! Project-file fixtures shared by the pbxbump test suites.
//!
//! Fixtures come in two sizes: [`single_block`] is the smallest file that
//! exercises a full edit, [`project_file`] mirrors the layout of a real
//! project descriptor with project-level and target-level configurations.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Identifier of the target-level `Release` block in [`project_file`].
pub const TARGET_RELEASE_ID: &str = "84A1F2C02A1B3C4D00E5F6A7";

/// Identifier of the target-level `Debug` block in [`project_file`].
pub const TARGET_DEBUG_ID: &str = "84A1F2BF2A1B3C4D00E5F6A7";

/// A one-line file with a single `Release` block.
pub fn single_block(build: u64) -> String {
    format!(
        "A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ = {{ CURRENT_PROJECT_VERSION = {build}; OTHER = 1; }};\n"
    )
}

/// A trimmed-down project descriptor.
///
/// The project-level `Debug`/`Release` blocks carry no version settings; the
/// app target's blocks carry `CURRENT_PROJECT_VERSION = build` and
/// `MARKETING_VERSION = version`. The configuration list refers to every
/// block by name without a body.
pub fn project_file(build: u64, version: &str) -> String {
    format!(
        r#"// !$*UTF8*$!
{{
	archiveVersion = 1;
	classes = {{
	}};
	objectVersion = 56;
	objects = {{

/* Begin XCBuildConfiguration section */
		84A1F2BC2A1B3C4D00E5F6A7 /* Debug */ = {{
			isa = XCBuildConfiguration;
			buildSettings = {{
				ALWAYS_SEARCH_USER_PATHS = NO;
				GCC_PREPROCESSOR_DEFINITIONS = (
					"DEBUG=1",
					"$(inherited)",
				);
				SDKROOT = iphoneos;
			}};
			name = Debug;
		}};
		84A1F2BD2A1B3C4D00E5F6A7 /* Release */ = {{
			isa = XCBuildConfiguration;
			buildSettings = {{
				ALWAYS_SEARCH_USER_PATHS = NO;
				SDKROOT = iphoneos;
				VALIDATE_PRODUCT = YES;
			}};
			name = Release;
		}};
		{TARGET_DEBUG_ID} /* Debug */ = {{
			isa = XCBuildConfiguration;
			buildSettings = {{
				CODE_SIGN_STYLE = Automatic;
				CURRENT_PROJECT_VERSION = {build};
				DYLIB_CURRENT_VERSION = 1;
				INFOPLIST_KEY_CFBundleDisplayName = "Demo {{dev}}";
				MARKETING_VERSION = {version};
				PRODUCT_BUNDLE_IDENTIFIER = io.example.demo.dev;
			}};
			name = Debug;
		}};
		{TARGET_RELEASE_ID} /* Release */ = {{
			isa = XCBuildConfiguration;
			buildSettings = {{
				CODE_SIGN_STYLE = Automatic;
				CURRENT_PROJECT_VERSION = {build};
				DYLIB_CURRENT_VERSION = 1;
				INFOPLIST_KEY_CFBundleDisplayName = "Demo";
				MARKETING_VERSION = {version};
				PRODUCT_BUNDLE_IDENTIFIER = io.example.demo;
			}};
			name = Release;
		}};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		84A1F2B02A1B3C4D00E5F6A7 /* Build configuration list for PBXNativeTarget "Demo" */ = {{
			isa = XCConfigurationList;
			buildConfigurations = (
				{TARGET_DEBUG_ID} /* Debug */,
				{TARGET_RELEASE_ID} /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		}};
/* End XCConfigurationList section */
	}};
	rootObject = 84A1F2A92A1B3C4D00E5F6A7 /* Project object */;
}}
"#
    )
}

/// A temp directory holding one project file.
pub struct ProjectFixture {
    dir: TempDir,
    path: PathBuf,
}

impl ProjectFixture {
    /// Write `content` to `project.pbxproj` inside a fresh temp directory.
    ///
    /// # Panics
    /// Panics if the temp directory or the file cannot be created.
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new()
            .unwrap_or_else(|e| panic!("ProjectFixture: failed to create temp dir: {e}"));
        let path = dir.path().join("project.pbxproj");
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("ProjectFixture: failed to write {}: {e}", path.display()));
        Self { dir, path }
    }

    /// Path of the project file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temp directory containing the project file.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Current content of the project file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self) -> String {
        fs::read_to_string(&self.path)
            .unwrap_or_else(|e| panic!("ProjectFixture: failed to read {}: {e}", self.path.display()))
    }
}
