//! Optional logging
//!
//! Forwards to the `log` facade when the `log` feature is on. Otherwise the
//! arguments are type-checked inside a dead branch and never formatted, so
//! variables that only feed a log line stay used in `no_std` builds.

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if false {
            ::core::mem::drop(::core::format_args!($($arg)*));
        }
    };
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if false {
            ::core::mem::drop(::core::format_args!($($arg)*));
        }
    };
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if false {
            ::core::mem::drop(::core::format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use core::fmt;

    struct Counted<'a>(&'a core::cell::Cell<u32>);

    impl fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            f.write_str("counted")
        }
    }

    #[test]
    fn arguments_not_formatted_without_a_logger() {
        let formatted = core::cell::Cell::new(0);
        let value = Counted(&formatted);

        log_debug!("value {}", value);
        log_info!("value {}", value);
        log_warn!("value {}", value);

        assert_eq!(formatted.get(), 0);
    }
}
