//! Utilities pertaining to filesystem and other os-level settings
//!

use camino::Utf8Path;
use simple_error::{SimpleResult, map_err_with};

/// Create the parent directory of a file path if it does not exist already
///
/// If the directory already exists no operations are performed
///
/// * `label` - used to describe the error directory in an error message
///
pub fn create_parent_dir_all(filename: &Utf8Path, label: &str) -> SimpleResult<()> {
    let dir = match filename.parent() {
        Some(x) if !x.as_str().is_empty() => x,
        _ => return Ok(()),
    };
    if !dir.is_dir() {
        map_err_with!(
            std::fs::create_dir_all(dir),
            "Can't create new {label} directory at '{dir}'"
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    #[test]
    fn test_create_parent_dir_all() {
        let dir = tempfile::tempdir().unwrap();
        let dirname = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let filename = dirname.join("a/b/out_pileup_graph.svg");
        create_parent_dir_all(&filename, "output").unwrap();
        assert!(dirname.join("a/b").is_dir());

        // Existing directory and bare filenames are no-ops
        create_parent_dir_all(&filename, "output").unwrap();
        create_parent_dir_all(Utf8Path::new("out.log"), "output").unwrap();
    }
}
