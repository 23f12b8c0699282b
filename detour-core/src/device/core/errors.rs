use std::fmt::{Display, Formatter};

/// An error raised by a device while processing a request.
///
/// Fatal errors short-circuit the pipeline and surface to the client as a
/// server error; non-fatal errors are observed and the request continues.
#[derive(Debug)]
pub struct DeviceError {
    /// A descriptive message explaining the error that occurred
    pub message: String,

    /// Whether the error is fatal and should be reported to the client
    pub fatal: bool,
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fatal = if self.fatal { "(fatal) " } else { "" };
        write!(f, "{}{}", fatal, self.message)
    }
}
