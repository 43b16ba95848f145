use std::{
    ffi::OsStr,
    path::{Component, Path},
};

/// Lowercased extension without the leading dot, or an empty string.
pub fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Whether `id` can be used as a file-name prefix inside one directory without escaping it.
pub fn is_plain_file_stem(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

/// Name of `path` inside an archive rooted at `root`, always `/`-separated.
///
/// Returns `None` when `path` is not below `root`.
pub fn archive_member_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_is_lowercased_without_dot() {
        assert_eq!(lowercase_extension(Path::new("a/B.JPG")), "jpg");
        assert_eq!(lowercase_extension(Path::new("clip.mov")), "mov");
        assert_eq!(lowercase_extension(Path::new("noext")), "");
    }

    #[test]
    fn has_extension_ignores_case() {
        assert!(has_extension(Path::new("entry.HTML"), "html"));
        assert!(!has_extension(Path::new("entry.htm"), "html"));
    }

    #[test]
    fn member_name_is_relative_and_slash_separated() {
        let root = PathBuf::from("/tmp/stage");
        let file = root.join("photos").join("abc.jpeg");
        assert_eq!(
            archive_member_name(&root, &file).as_deref(),
            Some("photos/abc.jpeg")
        );
        assert_eq!(archive_member_name(&root, &root), None);
        assert_eq!(archive_member_name(&root, Path::new("/elsewhere/x")), None);
    }

    #[test]
    fn plain_file_stems_reject_separators_and_parent_refs() {
        assert!(is_plain_file_stem("ABC-123"));
        assert!(!is_plain_file_stem(""));
        assert!(!is_plain_file_stem("../secret"));
        assert!(!is_plain_file_stem("a/b"));
        assert!(!is_plain_file_stem("a\\b"));
        assert!(!is_plain_file_stem(".."));
    }
}
