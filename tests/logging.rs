//! Logging starts before config loading. Runs in its own test binary
//! because the logger is process-global.

use std::fs;

use daybook::core::config::{
    self, CliOverrides, DaybookConfig, Environment, GeneralConfig, LOG_FILE_NAME,
};
use daybook::logging;
use log::LevelFilter;
use tempfile::TempDir;

#[test]
fn config_loading_messages_reach_the_log_file() {
    let home = TempDir::new().unwrap();
    let env = Environment {
        home: Some(home.path().to_path_buf()),
        editor: None,
    };
    let dir = config::config_dir(&env).unwrap();

    assert!(logging::init(&dir));

    // First run writes the default file and says so
    config::load_config(&dir).unwrap();

    let file_config = DaybookConfig {
        general: GeneralConfig {
            log_level: Some("loud".to_string()),
            ..GeneralConfig::default()
        },
    };
    let resolved = config::resolve(&file_config, &env, &CliOverrides::default()).unwrap();
    assert_eq!(resolved.log_level, LevelFilter::Info);
    logging::set_level(resolved.log_level);
    log::debug!("filtered out at info");

    let log = fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap();
    assert!(log.contains("generating default"), "{log}");
    assert!(log.contains("Unknown log level \"loud\""), "{log}");
    assert!(!log.contains("filtered out at info"), "{log}");
}
