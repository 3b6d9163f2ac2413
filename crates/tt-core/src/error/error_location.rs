use std::fmt;
use std::panic::Location;

/// Source position captured at an error's construction site.
///
/// Built from `std::panic::Location::caller()` inside `#[track_caller]`
/// conversions, so the recorded position is the originating call site
/// rather than the conversion function itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    file: &'static str,
    line: u32,
    column: u32,
}

impl From<&'static Location<'static>> for ErrorLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.file, self.line, self.column)
    }
}
