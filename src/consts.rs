pub mod cli_consts {
    //! Console Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard
    //! console, organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// Maximum buffered widget updates between the pollers and the UI loop.
    /// Sized well above one update per widget per cadence tick.
    pub const UPDATE_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // TELEMETRY POLLING
    // =============================================================================

    /// Poll cadence configuration shared by all telemetry widgets.
    pub mod polling {
        use std::time::Duration;

        /// Interval between successive fetches for each polled widget
        /// (milliseconds). Every widget schedules independently on this
        /// cadence; a failed fetch simply waits for the next tick.
        pub const POLL_INTERVAL_MS: u64 = 10_000;

        /// Per-request timeout for telemetry fetches (seconds).
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Helper function to get the poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }

        /// Helper function to get the request timeout
        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // CODE AUDITOR
    // =============================================================================

    /// Code analysis request configuration.
    pub mod auditor {
        use std::time::Duration;

        /// Analysis requests run a model-backed scan server-side and can take
        /// far longer than a telemetry fetch (seconds).
        pub const ANALYZE_TIMEOUT_SECS: u64 = 60;

        /// Largest snippet the console will submit for analysis (bytes).
        pub const MAX_SNIPPET_BYTES: usize = 64 * 1024;

        /// Helper function to get the analyze timeout
        pub const fn analyze_timeout() -> Duration {
            Duration::from_secs(ANALYZE_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI
    // =============================================================================

    /// Spinner frames for the in-flight analysis indicator.
    pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
}
