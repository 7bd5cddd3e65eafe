use super::*;

#[test]
fn paths_under_home_are_detected() {
    let Some(home) = home_dir() else {
        return;
    };
    assert!(is_under_home(&home.join(".local/bin/uv")));
    assert!(is_under_home(&home));
}

#[test]
fn system_paths_are_not_under_home() {
    assert!(!is_under_home(Path::new("/usr/bin/uv")));
    assert!(!is_under_home(Path::new("/")));
}
