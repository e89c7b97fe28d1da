//! Logging macros with structured context
//!
//! Every macro accepts an optional trailing list of `"key" => value` pairs;
//! values are rendered through `Display`. Events are routed through
//! [`crate::logging::dispatch`], so the macros stay safe to call whether or
//! not the global logger has been initialized.

/// Log an error addressed by its diagnostic code
///
/// Accepts an optional `span = expr` argument before the context pairs.
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::error($code, $message))
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::dispatch(
            $crate::logging::LogEvent::error($code, $message).with_span($span),
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let mut event = $crate::logging::LogEvent::error($code, $message);
        $( event = event.with_context($key, &format!("{}", $value)); )+
        $crate::logging::dispatch(event);
    }};

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {{
        let mut event = $crate::logging::LogEvent::error($code, $message).with_span($span);
        $( event = event.with_context($key, &format!("{}", $value)); )+
        $crate::logging::dispatch(event);
    }};
}

/// Log a success under its success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::success($code, $message))
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let mut event = $crate::logging::LogEvent::success($code, $message);
        $( event = event.with_context($key, &format!("{}", $value)); )+
        $crate::logging::dispatch(event);
    }};
}

/// Log an informational message
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::info($message))
    };

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let mut event = $crate::logging::LogEvent::info($message);
        $( event = event.with_context($key, &format!("{}", $value)); )+
        $crate::logging::dispatch(event);
    }};
}

/// Log a warning
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::warning($message))
    };

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let mut event = $crate::logging::LogEvent::warning($message);
        $( event = event.with_context($key, &format!("{}", $value)); )+
        $crate::logging::dispatch(event);
    }};
}

/// Log a debug message
///
/// The level check happens before the event is built, so context values are
/// not formatted when debug output is filtered out anyway.
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {{
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::dispatch($crate::logging::LogEvent::debug($message));
        }
    }};

    ($message:expr, $($key:expr => $value:expr),+) => {{
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let mut event = $crate::logging::LogEvent::debug($message);
            $( event = event.with_context($key, &format!("{}", $value)); )+
            $crate::logging::dispatch(event);
        }
    }};
}

/// Log a debug message in debug builds only
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_debug!($($arg)*);
        }
    };
}

/// Log an error with its registry classification attached as context
#[macro_export]
macro_rules! log_classified_error {
    ($code:expr, $message:expr) => {
        $crate::logging::dispatch($crate::logging::classified_error_event($code, $message))
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::dispatch(
            $crate::logging::classified_error_event($code, $message).with_span($span),
        )
    };
}

/// Log a success with its wall-clock duration attached
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => $duration.as_secs_f64() * 1000.0
        )
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        $crate::log_success!($code, $message,
            "duration_ms" => $duration.as_secs_f64() * 1000.0,
            $($key => $value),+
        )
    };
}

/// Log a file processing success with the standard file context keys
#[macro_export]
macro_rules! log_file_metrics {
    ($code:expr, $message:expr, file = $file:expr, size = $size:expr, lines = $lines:expr) => {
        $crate::log_success!($code, $message,
            "file" => $file,
            "size_bytes" => $size,
            "lines" => $lines
        )
    };

    ($code:expr, $message:expr, file = $file:expr, size = $size:expr, lines = $lines:expr, $($key:expr => $value:expr),+) => {
        $crate::log_success!($code, $message,
            "file" => $file,
            "size_bytes" => $size,
            "lines" => $lines,
            $($key => $value),+
        )
    };
}
