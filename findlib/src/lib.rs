//! Golden test cases: every `<name>.txt` input under a directory paired with
//! the `<name>.out` report it must produce.

use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub input: PathBuf,
    pub expected: String,
}

pub fn read_file<P: AsRef<Path>>(file_name: P) -> String {
    fs::read_to_string(&file_name)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", file_name.as_ref().display()))
}

/// Files under `root` (recursively) with extension `ext`, sorted by path.
pub fn find(root: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    fn walk(dir: &Path, wanted: &str, out: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(&path, wanted, out)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some(wanted) {
                out.push(path);
            }
        }
        Ok(())
    }

    let mut res = Vec::new();
    walk(root, ext.trim_start_matches('.'), &mut res)?;
    res.sort();
    Ok(res)
}

/// All `.txt` inputs under `root` with their expected `.out` contents.
pub fn cases(root: &Path) -> io::Result<Vec<Case>> {
    let mut res = Vec::new();
    for input in find(root, ".txt")? {
        let expected = input.with_extension("out");
        let name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        res.push(Case {
            name,
            expected: read_file(&expected),
            input,
        });
    }
    Ok(res)
}
