use core::fmt;

macro_rules! event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(any(feature = "tracing", test))]
        tracing::$level!($($arg)+)
    };
}

macro_rules! trace {
    ($($arg:tt)+) => {
        event!(trace, $($arg)+)
    };
}

macro_rules! debug {
    ($($arg:tt)+) => {
        event!(debug, $($arg)+)
    };
}

#[cfg(not(test))]
macro_rules! test_trace {
    ($($args:tt)+) => {};
}

#[cfg(test)]
macro_rules! test_trace {
    ($($args:tt)+) => {
        tracing::trace!(
            location = %core::panic::Location::caller(),
            $($args)+
        )
    };
}

/// Formats an `Option` as its value, or as `None`, without the `Some(...)`
/// wrapper.
pub(crate) struct FmtOption<'a, T> {
    opt: Option<&'a T>,
    or_else: &'a str,
}

// === impl FmtOption ===

impl<'a, T> FmtOption<'a, T> {
    pub(crate) fn new(opt: Option<&'a T>) -> Self {
        Self {
            opt,
            or_else: "None",
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FmtOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opt {
            Some(val) => val.fmt(f),
            None => f.write_str(self.or_else),
        }
    }
}

#[cfg(test)]
pub(crate) fn trace_init() -> impl Drop {
    use tracing_subscriber::{prelude::*, EnvFilter};
    let filter = EnvFilter::from_env("RUST_LOG");
    tracing_subscriber::fmt()
        .with_test_writer()
        .without_time()
        .with_env_filter(filter)
        .set_default()
}

#[cfg(test)]
pub(crate) fn assert_send_sync<T: Send + Sync>() {}

/// Returns `miri` when the tests are running under Miri, and `not_miri`
/// otherwise.
#[cfg(test)]
pub(crate) const fn if_miri(miri: usize, not_miri: usize) -> usize {
    if cfg!(miri) {
        miri
    } else {
        not_miri
    }
}

/// The range of operation counts generated for fuzz tests.
///
/// Miri is slow enough that the default vec length (0..100) times the default
/// case count takes far too long, so it gets much shorter runs.
#[cfg(test)]
pub(crate) const FUZZ_RANGE: core::ops::Range<usize> = 0..if_miri(10, 100);

/// The proptest configuration shared by fuzz tests.
#[cfg(test)]
pub(crate) fn fuzz_config() -> proptest::test_runner::Config {
    proptest::test_runner::Config::with_cases(if_miri(10, 256) as u32)
}
