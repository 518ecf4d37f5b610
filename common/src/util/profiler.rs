use std::borrow::Cow;
use std::time::Instant;

/// Logs the elapsed time of a scope when dropped.
pub struct ScopedTimer {
    name: Cow<'static, str>,
    level: log::Level,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_level(name, log::Level::Info)
    }

    pub fn with_level(name: impl Into<Cow<'static, str>>, level: log::Level) -> Self {
        Self {
            name: name.into(),
            level,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::log!(self.level, "{} took {:?}", self.name, self.start.elapsed());
    }
}
