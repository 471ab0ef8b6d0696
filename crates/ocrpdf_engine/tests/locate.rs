use std::env;
use std::ffi::OsString;
use std::fs;

use ocrpdf_engine::{find_executable, LocateError};
use tempfile::TempDir;

#[test]
fn unset_path_is_not_found() {
    assert_eq!(
        find_executable("ocrmypdf", None),
        Err(LocateError::NotFound {
            name: "ocrmypdf".to_string()
        })
    );
}

#[test]
fn empty_directories_are_not_found() {
    let temp = TempDir::new().unwrap();
    let path = env::join_paths([temp.path()]).unwrap();
    assert!(find_executable("ocrmypdf", Some(path.as_os_str())).is_err());
}

#[cfg(unix)]
#[test]
fn first_executable_match_wins() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let plain = temp.path().join("plain");
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    for dir in [&plain, &first, &second] {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("ocrmypdf"), "#!/bin/sh\n").unwrap();
    }
    // Not executable, so it must be passed over.
    fs::set_permissions(plain.join("ocrmypdf"), fs::Permissions::from_mode(0o644)).unwrap();
    for dir in [&first, &second] {
        fs::set_permissions(dir.join("ocrmypdf"), fs::Permissions::from_mode(0o755)).unwrap();
    }

    let path: OsString = env::join_paths([&plain, &first, &second]).unwrap();
    let found = find_executable("ocrmypdf", Some(path.as_os_str())).unwrap();

    assert_eq!(found, first.join("ocrmypdf"));
}

#[cfg(unix)]
#[test]
fn directories_named_like_the_tool_are_ignored() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("ocrmypdf")).unwrap();
    let path = env::join_paths([temp.path()]).unwrap();

    assert!(find_executable("ocrmypdf", Some(path.as_os_str())).is_err());
}
