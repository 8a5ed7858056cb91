//! Path resolution.
//!
//! Turns user-facing paths like `~/src/op` or `~alice/src` into concrete
//! filesystem paths. Everything here is lexical: `.`, `..` and symlinks are
//! left alone.
//!
//! # Tilde Forms
//!
//! - `~` and `~/rest`: the invoking user's home (`$HOME`, then the account database)
//! - `~name` and `~name/rest`: the home directory of account `name`
//! - anything else is returned unchanged

use crate::error::{OpError, Result};
use tracing::debug;

/// Source of home directories for tilde expansion.
pub trait HomeDirs {
    /// Home directory of the invoking user.
    fn current_user_home(&self) -> Option<String>;

    /// Home directory of the named account.
    fn user_home(&self, name: &str) -> Option<String>;
}

/// Home directories from the environment and the system account database.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHomeDirs;

impl HomeDirs for SystemHomeDirs {
    fn current_user_home(&self) -> Option<String> {
        // dirs checks $HOME before falling back to getpwuid_r.
        dirs::home_dir().map(|p| p.to_string_lossy().into_owned())
    }

    fn user_home(&self, name: &str) -> Option<String> {
        passwd::home_of(name)
    }
}

/// Expand a leading `~` using the system home directories.
///
/// # Errors
///
/// - [`OpError::NoHomeDir`] if the invoking user's home cannot be found
/// - [`OpError::UnknownUser`] if `~name` names no account
///
/// # Examples
///
/// ```
/// use op::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("relative/path").unwrap(), "relative/path");
/// ```
pub fn expand_tilde(path: &str) -> Result<String> {
    expand_tilde_with(path, &SystemHomeDirs)
}

/// Expand a leading `~` using the given home directory source.
///
/// The remainder after the tilde token is appended unchanged, so a bare
/// `~` yields exactly the home directory.
pub fn expand_tilde_with(path: &str, homes: &impl HomeDirs) -> Result<String> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(path.to_string());
    };

    let (home, remainder) = if rest.is_empty() || rest.starts_with('/') {
        let home = homes.current_user_home().ok_or(OpError::NoHomeDir)?;
        (home, rest)
    } else {
        let (name, remainder) = match rest.find('/') {
            Some(slash) => rest.split_at(slash),
            None => (rest, ""),
        };
        let home = homes
            .user_home(name)
            .ok_or_else(|| OpError::UnknownUser(name.to_string()))?;
        (home, remainder)
    };

    let expanded = format!("{}{}", home, remainder);
    debug!(path, expanded = %expanded, "expanded tilde");
    Ok(expanded)
}

/// Expand `~` and make the path absolute against the current directory.
///
/// # Errors
///
/// Everything [`expand_tilde`] returns, plus [`OpError::NoCurrentDir`] if
/// the working directory cannot be read.
pub fn make_absolute(path: &str) -> Result<String> {
    make_absolute_with(path, &SystemHomeDirs)
}

/// [`make_absolute`] with an explicit home directory source.
pub fn make_absolute_with(path: &str, homes: &impl HomeDirs) -> Result<String> {
    let expanded = expand_tilde_with(path, homes)?;
    if expanded.starts_with('/') {
        return Ok(expanded);
    }

    let cwd = std::env::current_dir().map_err(OpError::NoCurrentDir)?;
    let cwd = cwd.to_string_lossy();
    let sep = if cwd.ends_with('/') { "" } else { "/" };
    Ok(format!("{}{}{}", cwd, sep, expanded))
}

#[cfg(unix)]
mod passwd {
    use nix::unistd::User;
    use tracing::debug;

    /// Look up an account's home directory in the system account database.
    pub fn home_of(name: &str) -> Option<String> {
        match User::from_name(name) {
            Ok(Some(user)) => Some(user.dir.to_string_lossy().into_owned()),
            Ok(None) => None,
            Err(e) => {
                debug!(name, error = %e, "account lookup failed");
                None
            }
        }
    }
}

#[cfg(not(unix))]
mod passwd {
    pub fn home_of(_name: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    struct FakeHomes {
        current: Option<String>,
        users: HashMap<String, String>,
    }

    impl FakeHomes {
        fn new(current: Option<&str>) -> Self {
            let mut users = HashMap::new();
            users.insert("alice".to_string(), "/home/alice".to_string());
            Self {
                current: current.map(String::from),
                users,
            }
        }
    }

    impl HomeDirs for FakeHomes {
        fn current_user_home(&self) -> Option<String> {
            self.current.clone()
        }

        fn user_home(&self, name: &str) -> Option<String> {
            self.users.get(name).cloned()
        }
    }

    #[test]
    fn test_no_tilde_is_unchanged() {
        let homes = FakeHomes::new(Some("/home/me"));
        assert_eq!(
            expand_tilde_with("relative/path", &homes).unwrap(),
            "relative/path"
        );
        assert_eq!(expand_tilde_with("", &homes).unwrap(), "");
        assert_eq!(expand_tilde_with("a/~/b", &homes).unwrap(), "a/~/b");
    }

    #[test]
    fn test_bare_tilde_is_exactly_home() {
        let homes = FakeHomes::new(Some("/home/me"));
        assert_eq!(expand_tilde_with("~", &homes).unwrap(), "/home/me");
    }

    #[test]
    fn test_tilde_slash_keeps_remainder() {
        let homes = FakeHomes::new(Some("/home/me"));
        assert_eq!(
            expand_tilde_with("~/sub/dir", &homes).unwrap(),
            "/home/me/sub/dir"
        );
    }

    #[test]
    fn test_named_user() {
        let homes = FakeHomes::new(None);
        assert_eq!(expand_tilde_with("~alice", &homes).unwrap(), "/home/alice");
        assert_eq!(
            expand_tilde_with("~alice/src/op", &homes).unwrap(),
            "/home/alice/src/op"
        );
    }

    #[test]
    fn test_unknown_user_fails() {
        let homes = FakeHomes::new(Some("/home/me"));
        let err = expand_tilde_with("~nonexistentuser/x", &homes).unwrap_err();
        assert!(matches!(err, OpError::UnknownUser(ref name) if name == "nonexistentuser"));
    }

    #[test]
    fn test_missing_home_fails() {
        let homes = FakeHomes::new(None);
        assert!(matches!(
            expand_tilde_with("~/x", &homes),
            Err(OpError::NoHomeDir)
        ));
        // A named lookup does not need the current user's home.
        assert!(expand_tilde_with("~alice/x", &homes).is_ok());
    }

    #[test]
    fn test_make_absolute_keeps_absolute() {
        let homes = FakeHomes::new(Some("/home/me"));
        assert_eq!(
            make_absolute_with("/already/absolute", &homes).unwrap(),
            "/already/absolute"
        );
        assert_eq!(make_absolute_with("~/x", &homes).unwrap(), "/home/me/x");
    }

    #[test]
    fn test_make_absolute_is_lexical() {
        let homes = FakeHomes::new(Some("/home/me"));
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.join("../relative/./x");
        assert_eq!(
            make_absolute_with("../relative/./x", &homes).unwrap(),
            expected.to_string_lossy()
        );
    }

    /// Sets an env var for the life of the guard, restoring it on drop.
    struct EnvGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: callers are #[serial], no concurrent env access
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            unsafe {
                match self.previous.take() {
                    Some(v) => std::env::set_var(self.key, v),
                    None => std::env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_system_home_prefers_env() {
        let _home = EnvGuard::set("HOME", "/tmp/op_test_home");

        assert_eq!(expand_tilde("~").unwrap(), "/tmp/op_test_home");
        assert_eq!(expand_tilde("~/a").unwrap(), "/tmp/op_test_home/a");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_unknown_user() {
        let err = expand_tilde("~op_no_such_user_9f3a/x").unwrap_err();
        assert!(matches!(err, OpError::UnknownUser(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_root_user() {
        let expanded = expand_tilde("~root/x").unwrap();
        assert!(expanded.starts_with('/'));
        assert!(expanded.ends_with("/x"));
    }
}
