#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use compute::loader::DATA_FILE_NAME;
    use model::Country;
    use std::path::Path;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Eight quarters of data for horizons 1, 2 and 4; 1999Q3 has no 4-quarter value.
    pub const SAMPLE_CSV: &str = "\
Time, pi_1q ,pi_2q,pi_4q
1999-03-31,1.500,1.600,1.700
1999-06-30,1.550,1.650,1.750
1999-09-30,1.600,1.700,
1999-12-31,1.650,1.750,1.850
2000-03-31,1.700,1.800,1.900
2000-06-30,1.750,1.850,1.950
2000-09-30,1.800,1.900,2.000
2000-12-31,1.850,1.950,2.050
";

    /// Write a data file for `country` below `data_dir`
    pub fn write_country_csv(data_dir: &Path, country: Country, contents: &str) {
        let dir = data_dir.join(country.code());
        std::fs::create_dir_all(&dir).expect("Failed to create country directory");
        std::fs::write(dir.join(DATA_FILE_NAME), contents).expect("Failed to write data file");
    }

    /// Create a data directory where only the euro area has a data file
    pub fn setup_test_data_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temporary data directory");
        write_country_csv(dir.path(), Country::Ez, SAMPLE_CSV);
        dir
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(data_dir: &Path) -> AppState {
        AppState::new(compute::default_source(data_dir))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing.
    ///
    /// The returned directory must be kept alive for the duration of the test.
    pub fn setup_test_app() -> (Router, TempDir) {
        let _ = init_test_tracing();

        let data_dir = setup_test_data_dir();
        let state = setup_test_app_state(data_dir.path());
        (create_router(state), data_dir)
    }
}
