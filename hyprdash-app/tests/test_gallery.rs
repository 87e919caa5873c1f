use hyprdash_app::gallery::list_images;
use std::fs;

#[test]
fn test_list_images_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["sunset.png", "beach.JPG", "notes.txt", "anim.gif", "photo.jpeg", "raw.cr2"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("album.png")).unwrap();

    let images = list_images(dir.path()).unwrap();
    assert_eq!(
        images,
        vec!["anim.gif", "beach.JPG", "photo.jpeg", "sunset.png"]
    );
}

#[test]
fn test_list_images_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_images(dir.path()).unwrap().is_empty());
}

#[test]
fn test_list_images_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_images(&dir.path().join("Pictures")).is_err());
}

#[cfg(unix)]
#[test]
fn test_list_images_follows_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let target = elsewhere.path().join("wallpaper.png");
    fs::write(&target, b"x").unwrap();
    fs::write(dir.path().join("plain.png"), b"x").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("linked.png")).unwrap();
    std::os::unix::fs::symlink(elsewhere.path().join("gone.png"), dir.path().join("dangling.png"))
        .unwrap();
    std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("folder.png")).unwrap();

    let images = list_images(dir.path()).unwrap();
    assert_eq!(images, vec!["linked.png", "plain.png"]);
}
