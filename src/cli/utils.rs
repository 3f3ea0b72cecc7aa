use camino::Utf8Path;
use simple_error::{SimpleResult, bail};

/// Check a required input filename
///
/// Assumes no logger has been configured yet
///
pub fn check_required_filename(filename: &Utf8Path, label: &str) -> SimpleResult<()> {
    if filename.as_str().is_empty() {
        bail!("Must specify {label} file");
    }
    if !filename.exists() {
        bail!("Can't find specified {label} file: '{filename}'");
    }
    if !filename.is_file() {
        bail!("Specified {label} file path does not appear to be a file: '{filename}'");
    }
    Ok(())
}

/// Check that an output prefix is usable
///
pub fn check_output_prefix(output_prefix: &str) -> SimpleResult<()> {
    if output_prefix.is_empty() {
        bail!("Must specify output prefix");
    }
    if output_prefix.ends_with('/') {
        bail!("Output prefix must not end in a directory separator: '{output_prefix}'");
    }
    Ok(())
}

/// Check that an output file will not overwrite existing results
///
/// # Arguments
/// * `clobber` - If true, existing files are allowed
///
pub fn check_novel_output_filename(
    filename: &Utf8Path,
    label: &str,
    clobber: bool,
) -> SimpleResult<()> {
    if filename.exists() && !clobber {
        bail!("{label} already exists: '{filename}', use --clobber to overwrite");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_output_prefix() {
        assert!(check_output_prefix("out/run1").is_ok());
        assert!(check_output_prefix("").is_err());
        assert!(check_output_prefix("out/").is_err());
    }

    #[test]
    fn test_check_novel_output_filename() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let filename = Utf8Path::from_path(file.path()).unwrap();
        assert!(check_novel_output_filename(filename, "Output file", false).is_err());
        assert!(check_novel_output_filename(filename, "Output file", true).is_ok());

        let missing = Utf8Path::new("./test_data/not_there.bed");
        assert!(check_novel_output_filename(missing, "Output file", false).is_ok());
    }

    #[test]
    fn test_check_required_filename() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let filename = Utf8Path::from_path(file.path()).unwrap();
        assert!(check_required_filename(filename, "segment").is_ok());

        assert!(check_required_filename(Utf8Path::new(""), "segment").is_err());
        let missing = Utf8Path::new("./test_data/not_there.bed");
        assert!(check_required_filename(missing, "segment").is_err());

        let dir = tempfile::tempdir().unwrap();
        let dirname = Utf8Path::from_path(dir.path()).unwrap();
        assert!(check_required_filename(dirname, "segment").is_err());
    }
}
