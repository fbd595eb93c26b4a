// src/transforms/rename.rs

use crate::pipeline::FileData;

/// Rewrite the file name with a stem prefix and/or pre-extension suffix,
/// keeping any parent directories: `js/app.js` with prefix `hes-` and suffix
/// `.min` becomes `js/hes-app.min.js`.
pub fn apply(mut file: FileData, prefix: Option<&str>, suffix: Option<&str>) -> FileData {
    let stem = file
        .rel_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file
        .rel_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned());

    let mut name = String::new();
    if let Some(prefix) = prefix {
        name.push_str(prefix);
    }
    name.push_str(&stem);
    if let Some(suffix) = suffix {
        name.push_str(suffix);
    }
    if let Some(extension) = extension {
        name.push('.');
        name.push_str(&extension);
    }

    file.rel_path.set_file_name(name);
    file
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::apply;
    use crate::pipeline::FileData;

    fn file(rel: &str) -> FileData {
        FileData {
            rel_path: PathBuf::from(rel),
            origin: PathBuf::from("/tmp").join(rel),
            contents: Vec::new(),
        }
    }

    #[test]
    fn prefix_and_suffix_wrap_the_stem() {
        let renamed = apply(file("app.js"), Some("hes-"), Some(".min"));
        assert_eq!(renamed.rel_path, PathBuf::from("hes-app.min.js"));
    }

    #[test]
    fn parent_directories_are_kept() {
        let renamed = apply(file("js/widgets/nav.js"), None, Some(".min"));
        assert_eq!(renamed.rel_path, PathBuf::from("js/widgets/nav.min.js"));
    }

    #[test]
    fn extensionless_files_get_no_dot() {
        let renamed = apply(file("LICENSE"), Some("x-"), None);
        assert_eq!(renamed.rel_path, PathBuf::from("x-LICENSE"));
    }
}
