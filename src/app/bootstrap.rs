use crate::config::{load_app_config, AppConfig};

const FORCE_SERVER_FLAG: &str = "--force-server";
const DEFAULT_PROGRAM_NAME: &str = "stoat-desktop";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct StartupConfig {
    pub(super) force_server: Option<String>,
}

impl StartupConfig {
    pub(super) fn from_args() -> Self {
        Self::from_arg_list(std::env::args().skip(1))
    }

    fn from_arg_list<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == FORCE_SERVER_FLAG {
                config.force_server = args.next();
                if config.force_server.is_none() {
                    tracing::warn!("{FORCE_SERVER_FLAG} given without a value; ignoring");
                }
            } else if let Some(value) = arg.strip_prefix("--force-server=") {
                config.force_server = Some(value.to_string());
            } else {
                tracing::debug!(arg = %arg, "ignoring unrecognized argument");
            }
        }
        config
    }
}

pub(super) struct AppBootstrap {
    pub(super) startup_config: StartupConfig,
    pub(super) app_config: AppConfig,
}

pub(super) fn bootstrap_app_runtime() -> AppBootstrap {
    let startup_config = StartupConfig::from_args();
    if let Some(server) = startup_config.force_server.as_deref() {
        tracing::info!(server, "server forced from command line");
    }

    let app_config = load_app_config();
    tracing::info!(
        minimise_to_tray = app_config.minimise_to_tray,
        hardware_acceleration = app_config.hardware_acceleration,
        "loaded app config"
    );

    AppBootstrap {
        startup_config,
        app_config,
    }
}

// Only argv[0] goes to GTK so app-specific flags do not fail GTK parsing.
pub(super) fn gtk_launch_args() -> Vec<String> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string());
    vec![program]
}
