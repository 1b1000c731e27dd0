use anyhow::Result;
use std::fs;
use std::path::Path;

use photo_harvest::credentials::*;

mod test_helpers {
    use super::*;

    pub fn write_env(dir: &Path, contents: &str) -> Result<std::path::PathBuf> {
        let path = dir.join(".env");
        fs::write(&path, contents)?;
        Ok(path)
    }
}

use test_helpers::*;

#[test]
fn test_local_file_wins_over_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let local = write_env(dir.path(), "HARVEST_TEST_PRIORITY_KEY=a\n")?;
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("HARVEST_TEST_PRIORITY_KEY", "b") };

    let loader = CredentialLoader::new(
        "HARVEST_TEST_PRIORITY_KEY",
        vec![CredentialSource::EnvFile(local), CredentialSource::Environment],
    );
    assert_eq!(loader.resolve(), Some(Credential::new("a")));
    Ok(())
}

#[test]
fn test_local_file_wins_over_ancestor_file() -> Result<()> {
    let root = tempfile::tempdir()?;
    let base = root.path().join("a/b/c/d");
    fs::create_dir_all(&base)?;
    write_env(root.path(), "PEXELS_API_KEY=from-ancestor\n")?;
    write_env(&base, "PEXELS_API_KEY=from-local\n")?;

    let loader = CredentialLoader::standard(&base);
    assert_eq!(loader.resolve().unwrap().expose(), "from-local");
    Ok(())
}

#[test]
fn test_ancestor_file_used_when_local_lacks_key() -> Result<()> {
    let root = tempfile::tempdir()?;
    let base = root.path().join("a/b/c/d");
    fs::create_dir_all(&base)?;
    write_env(root.path(), "PEXELS_API_KEY=from-ancestor\n")?;
    write_env(&base, "OTHER=1\n")?;

    let loader = CredentialLoader::standard(&base);
    assert_eq!(loader.resolve().unwrap().expose(), "from-ancestor");
    Ok(())
}

#[test]
fn test_environment_is_last_resort() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("HARVEST_TEST_ENV_ONLY_KEY", "from-env") };

    let loader = CredentialLoader::new(
        "HARVEST_TEST_ENV_ONLY_KEY",
        vec![
            CredentialSource::EnvFile(dir.path().join(".env")),
            CredentialSource::Environment,
        ],
    );
    assert_eq!(loader.resolve().unwrap().expose(), "from-env");
    Ok(())
}

#[test]
fn test_missing_everywhere_is_none() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let loader = CredentialLoader::new(
        "HARVEST_TEST_NEVER_DEFINED_KEY",
        vec![
            CredentialSource::EnvFile(dir.path().join(".env")),
            CredentialSource::Environment,
        ],
    );
    assert!(loader.resolve().is_none());
    Ok(())
}

#[test]
fn test_empty_value_counts_as_absent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let local = write_env(dir.path(), "HARVEST_TEST_EMPTY_KEY=\n")?;
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("HARVEST_TEST_EMPTY_KEY", "fallback") };

    let loader = CredentialLoader::new(
        "HARVEST_TEST_EMPTY_KEY",
        vec![CredentialSource::EnvFile(local), CredentialSource::Environment],
    );
    assert_eq!(loader.resolve().unwrap().expose(), "fallback");
    Ok(())
}

#[test]
fn test_standard_layout_order() {
    let loader = CredentialLoader::standard(Path::new("/srv/site"));
    let sources = loader.sources();
    assert_eq!(sources.len(), 3);
    assert!(matches!(&sources[0], CredentialSource::EnvFile(p) if p == Path::new("/srv/site/.env")));
    assert!(matches!(
        &sources[1],
        CredentialSource::EnvFile(p) if p == Path::new("/srv/site/../../../../.env")
    ));
    assert!(matches!(sources[2], CredentialSource::Environment));
}

#[test]
fn test_debug_hides_value() {
    let c = Credential::new("secret-key");
    assert!(!format!("{c:?}").contains("secret-key"));
}
