use std::ffi::OsStr;
use std::path::Path;

/// Serialization format of an input file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
    Text,
}

pub trait PathExt {
    fn file_format(&self) -> FileFormat;
}

impl PathExt for Path {
    fn file_format(&self) -> FileFormat {
        match self.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => FileFormat::Toml,
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Text,
        }
    }
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_extensions_when_detecting_format_then_maps_case_insensitively() {
        assert_eq!(Path::new("tree.toml").file_format(), FileFormat::Toml);
        assert_eq!(Path::new("tree.JSON").file_format(), FileFormat::Json);
        assert_eq!(Path::new("topics.txt").file_format(), FileFormat::Text);
        assert_eq!(Path::new("topics").file_format(), FileFormat::Text);
    }

    #[test]
    fn given_unset_variable_when_expanding_then_returns_input() {
        let input = "$TOPICTREE_SURELY_UNSET_VARIABLE/tree.toml";
        assert_eq!(expand_env_vars(input), input);
    }
}
