#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use std::env;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::NamedTempFile;

    // Environment variables are process-wide; tests touching them take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_temp_config(content: &str) -> NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ui.page_size, 15);
        assert_eq!(config.ui.dir, "webui/dist");
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert!(config::validate(&config).is_ok());
    }

    #[test]
    fn test_valid_config_does_not_error() {
        let _guard = env_lock();
        assert!(config::load().is_ok());
    }

    #[test]
    fn test_invalid_server_port() {
        let _guard = env_lock();
        env::set_var("BUILDING_FILES__SERVER__PORT", "0");
        let result = config::load();
        env::remove_var("BUILDING_FILES__SERVER__PORT");
        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_config_from_env() {
        let _guard = env_lock();
        env::set_var("BUILDING_FILES__SERVER__HOST", "0.0.0.0");
        env::set_var("BUILDING_FILES__SERVER__PORT", "3000");
        env::set_var("BUILDING_FILES__UI__PAGE_SIZE", "25");

        let config = config::load();

        env::remove_var("BUILDING_FILES__SERVER__HOST");
        env::remove_var("BUILDING_FILES__SERVER__PORT");
        env::remove_var("BUILDING_FILES__UI__PAGE_SIZE");

        let config = config.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ui.page_size, 25);
    }

    #[test]
    fn test_config_from_file() {
        let _guard = env_lock();
        let temp_file = write_temp_config(
            r#"
[server]
host = "192.168.1.1"
port = 9000

[ui]
page_size = 50
dir = "public"

[upload]
max_bytes = 2048
"#,
        );
        env::set_var("BUILDING_FILES_CONFIG", temp_file.path().to_str().unwrap());
        let config = config::load();
        env::remove_var("BUILDING_FILES_CONFIG");

        let config = config.unwrap();
        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.ui.dir, "public");
        assert_eq!(config.upload.max_bytes, 2048);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = env_lock();
        let temp_file = write_temp_config("[server]\nport = 9000\n");
        env::set_var("BUILDING_FILES_CONFIG", temp_file.path().to_str().unwrap());
        env::set_var("BUILDING_FILES__SERVER__PORT", "8888");
        let config = config::load();
        env::remove_var("BUILDING_FILES_CONFIG");
        env::remove_var("BUILDING_FILES__SERVER__PORT");

        let config = config.unwrap();
        assert_eq!(config.server.port, 8888);
        // untouched keys keep their embedded defaults
        assert_eq!(config.ui.page_size, 15);
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = AppConfig::default();
        config.ui.page_size = 0;
        let err = config::validate(&config).unwrap_err();
        assert!(err.to_string().contains("ui.page_size"));

        config.ui.page_size = 501;
        assert!(config::validate(&config).is_err());

        config.ui.page_size = 500;
        assert!(config::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        let mut config = AppConfig::default();
        config.upload.max_bytes = 0;
        let err = config::validate(&config).unwrap_err();
        assert!(err.to_string().contains("upload.max_bytes"));
    }
}
