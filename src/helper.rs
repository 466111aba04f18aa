use std::path::{Path, PathBuf};

/// Normalize path to `.png`
pub fn force_png_path(base: &Path, name: &str) -> PathBuf {
    base.join(format!("{}.png", name))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    #[cfg(unix)]
    if let Some(path_str) = path.to_str() {
        if path_str == "~" || path_str.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                let stripped = path_str.trim_start_matches('~').trim_start_matches('/');
                return home.join(stripped);
            }
        }
    }

    path.to_path_buf()
}

/// Expand `~` and anchor relative paths at `root`.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    let p = expand_home(path);

    if p.is_absolute() { p } else { root.join(p) }
}

pub fn resolve_full_path(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_against(&cwd, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_path_appends_extension() {
        assert_eq!(
            force_png_path(Path::new("out"), "frame"),
            PathBuf::from("out/frame.png")
        );
    }

    #[test]
    fn relative_paths_are_anchored() {
        assert_eq!(
            resolve_against(Path::new("/data/jobs"), Path::new("masks/a.png")),
            PathBuf::from("/data/jobs/masks/a.png")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        assert_eq!(
            resolve_against(Path::new("/data"), Path::new("/tmp/a.png")),
            PathBuf::from("/tmp/a.png")
        );
    }

    #[cfg(unix)]
    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                resolve_against(Path::new("/data"), Path::new("~/a.png")),
                home.join("a.png")
            );
        }
    }

    #[test]
    fn full_path_is_absolute() {
        assert!(resolve_full_path(Path::new("x.png")).is_absolute());
    }
}
