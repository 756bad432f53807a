//! File utility functions

use std::path::{Path, PathBuf};

/// Expand a user-supplied path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory; relative paths
/// resolve against the current directory. The path is not canonicalized.
///
/// ```text
/// expand_path("~/.brandlink") // -> /home/user/.brandlink
/// expand_path("./public")     // -> /current/dir/./public
/// expand_path("/srv/static")  // -> /srv/static
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if path.is_empty() {
        return cwd();
    }

    let expanded = match (path, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    };

    if expanded.is_relative() {
        cwd().join(expanded)
    } else {
        expanded
    }
}

/// Directory exists and contains an `index.html`
pub fn is_static_root(dir: &Path) -> bool {
    dir.is_dir() && dir.join("index.html").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/srv/static"), PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /srv/static  "), PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_expand_path_relative() {
        let result = expand_path("public");
        assert!(result.is_absolute());
        assert_eq!(result, std::env::current_dir().unwrap().join("public"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.brandlink");
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".brandlink"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn test_expand_path_empty_is_cwd() {
        assert_eq!(expand_path("   "), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_is_static_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_static_root(dir.path()));
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        assert!(is_static_root(dir.path()));
        assert!(!is_static_root(&dir.path().join("missing")));
    }
}
