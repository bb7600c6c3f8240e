// metadata.rs — Component-level defaults for the filesystem binding.

use fsbind_binding::Metadata;

pub const FOLDER_NAME_KEY: &str = "folderName";
pub const FILE_NAME_KEY: &str = "fileName";
pub const STRICT_KEY: &str = "strict";

/// Defaults read from the component metadata at initialization.
///
/// Empty names mean "take the value from each request".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystemMetadata {
    pub folder_name: String,
    pub file_name: String,

    /// Surface directory-creation, decode and write failures instead of
    /// logging and continuing.
    pub strict: bool,
}

impl FileSystemMetadata {
    /// Read the binding's properties. Never fails: unknown keys are
    /// ignored and an unparseable `strict` value falls back to `false`.
    pub fn parse(meta: &Metadata) -> Self {
        Self {
            folder_name: meta.property(FOLDER_NAME_KEY).to_string(),
            file_name: meta.property(FILE_NAME_KEY).to_string(),
            strict: parse_flag(STRICT_KEY, meta.property(STRICT_KEY)),
        }
    }

    pub fn with_folder_name(mut self, folder_name: impl Into<String>) -> Self {
        self.folder_name = folder_name.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

fn parse_flag(key: &str, value: &str) -> bool {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "0" | "no" => false,
        "true" | "1" | "yes" => true,
        other => {
            tracing::warn!(
                "ignoring invalid value '{}' for '{}', using false",
                other,
                key
            );
            false
        }
    }
}
