use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// The temporary directory as a UTF-8 path.
pub fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir should be UTF-8")
}

/// A CLDR document holding `gregorian` as the calendar of `locale`.
pub fn locale_document(locale: &str, gregorian: Value) -> Value {
    let mut main = Map::new();
    main.insert(
        locale.to_owned(),
        json!({ "dates": { "calendars": { "gregorian": gregorian } } }),
    );
    json!({ "main": Value::Object(main) })
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = dir
        .read_dir_utf8()
        .expect("read directory")
        .map(|entry| entry.expect("directory entry").file_name().to_owned())
        .collect();
    names.sort();
    names
}
