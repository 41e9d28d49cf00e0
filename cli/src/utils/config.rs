use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "POWEROPS_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "powerops.toml";

/// Picks the connection config file: an explicit path, then `$POWEROPS_CONFIG`,
/// then `./powerops.toml`, then `<config dir>/powerops/config.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("powerops").join("config.toml"))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/custom.toml");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
    }
}
