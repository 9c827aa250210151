use panenav::{Config, PaneNavError};
use std::io::Write;

#[test]
fn load_reads_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_title = \"Orgs\"\ntrace_level = \"debug\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.default_title, "Orgs");
    assert_eq!(config.trace_level.as_deref(), Some("debug"));
    assert!(!config.reverse_note_click);
}

#[test]
fn load_reports_missing_file_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(PaneNavError::Io(_))));
}

#[test]
fn data_dir_is_used_verbatim_when_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: Some(dir.path().display().to_string()),
        ..Config::default()
    };
    assert_eq!(config.data_dir(), dir.path());
}
