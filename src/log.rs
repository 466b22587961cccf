// Logging goes over RTT when the `rtt` feature is on; without it (host
// builds and tests) the macros only type-check their arguments.

#[cfg(feature = "rtt")]
macro_rules! info {
    ($($arg:tt)*) => {
        rtt_target::rprintln!($($arg)*)
    };
}

#[cfg(not(feature = "rtt"))]
macro_rules! info {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}

#[cfg(feature = "rtt")]
macro_rules! debug {
    ($($arg:tt)*) => {
        rtt_target::rprintln!($($arg)*)
    };
}

#[cfg(not(feature = "rtt"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}
