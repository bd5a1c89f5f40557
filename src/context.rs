use crate::config::manager::Settings;
use crate::git::GitCli;

/// Built once in `main` from parsed flags and loaded config, then passed to
/// every handler.
pub struct AppContext {
    pub settings: Settings,
    pub git: GitCli,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            git: GitCli::default(),
        }
    }
}
