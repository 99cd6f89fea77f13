// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    CameraInit(String),   // Opening/starting the camera failed (no device, bad format)
    CameraFrame(String),  // Grabbing/decoding a frame failed
    Frame(String),        // A frame buffer does not match its declared format
    Config(String),       // Bad command-line flag or value
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::Frame(s) => write!(f, "Frame error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
