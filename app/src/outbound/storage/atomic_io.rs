//! Temp-file-and-rename writes inside a capability directory.
//!
//! A reader either sees the previous entry or the new one, never a
//! truncated file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_name(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(".{file_name}.tmp.{}.{counter}", std::process::id())
}

/// Replace `file_name` in `dir` with `contents`.
///
/// `file_name` must be a bare file name; callers validate it first.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let tmp = temp_name(file_name);
    let result = write_temp(dir, &tmp, contents).and_then(|()| replace(dir, &tmp, file_name));
    if result.is_err() && dir.remove_file(&tmp).is_err() {
        // The temp file may never have been created.
    }
    result?;
    sync_dir(dir);
    Ok(())
}

fn write_temp(dir: &Dir, tmp: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp: &str, target: &str) -> io::Result<()> {
    // Windows rename refuses to overwrite.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp, dir, target)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp, dir, target)
}

fn sync_dir(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory fsync is unsupported on some platforms.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::rstest;

    fn open(temp: &tempfile::TempDir) -> Dir {
        Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open temp dir")
    }

    #[rstest]
    fn replaces_existing_contents() {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = open(&temp);
        write_atomic(&dir, "user", "first").expect("first write");
        write_atomic(&dir, "user", "second").expect("second write");
        assert_eq!(dir.read_to_string("user").expect("read"), "second");
    }

    #[rstest]
    fn leaves_no_temp_files_behind() {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = open(&temp);
        write_atomic(&dir, "visionLevel", "1").expect("write");
        let names: Vec<String> = dir
            .entries()
            .expect("list")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["visionLevel"]);
    }
}
