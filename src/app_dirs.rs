use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn scoreboard_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("lightspeed");
            Some(state_dir.join("scoreboard.json"))
        } else {
            ProjectDirs::from("", "", "lightspeed")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("scoreboard.json"))
        }
    }
}
