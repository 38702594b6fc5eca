//! `vlcheck init`: writes a starter `.vlcheck.jsonc`.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use vlcheck_core::CheckerConfig;

pub fn run_init(force: bool) -> Result<()> {
    let path = Path::new(CheckerConfig::CONFIG_FILES[0]);
    write_config(path, force)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Writes the default configuration to `path`.
///
/// An existing file is only replaced with `force`. A symlink at `path` is
/// never followed.
fn write_config(path: &Path, force: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(miette::miette!(
                "Config file {} already exists. Use --force to overwrite.",
                path.display()
            ));
        }
        Err(e) => {
            return Err(e)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to create {}", path.display()));
        }
    };

    file.write_all(CheckerConfig::default_contents().as_bytes())
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vlcheck.jsonc");

        write_config(&path, false).unwrap();

        let config = CheckerConfig::from_file(&path).unwrap();
        assert!(!config.official);
        assert_eq!(config.files, vec!["plugin.json".to_string()]);
    }

    #[test]
    fn test_keeps_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vlcheck.jsonc");
        fs::write(&path, "{ \"official\": true }").unwrap();

        let err = write_config(&path, false).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"official\": true }");
    }

    #[test]
    fn test_force_replaces_longer_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vlcheck.jsonc");
        fs::write(&path, " ".repeat(4096)).unwrap();

        write_config(&path, true).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            CheckerConfig::default_contents()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_does_not_follow_symlink() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target.json");
        fs::write(&target, "{}").unwrap();
        let link = dir.path().join(".vlcheck.jsonc");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(write_config(&link, true).is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
    }
}
