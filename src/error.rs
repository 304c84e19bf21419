use std::fmt;

#[derive(Debug)]
pub enum SvgToolboxError {
    NoRootElement,
    MissingDimensions,
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },
    InvalidBase64,
    Markup(String),
    UnsafePath(String),
    Render(String),
    Encode(String),
    Io(std::io::Error),
    Image(image::ImageError),
}

impl fmt::Display for SvgToolboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgToolboxError::NoRootElement => {
                write!(f, "no svg element found in the provided content")
            }
            SvgToolboxError::MissingDimensions => {
                write!(f, "svg must have width and height or a viewBox")
            }
            SvgToolboxError::DimensionMismatch { left, right } => {
                write!(
                    f,
                    "images must have the same dimensions: {}x{} vs {}x{}",
                    left.0, left.1, right.0, right.1
                )
            }
            SvgToolboxError::InvalidBase64 => write!(f, "invalid base64 svg payload"),
            SvgToolboxError::Markup(message) => write!(f, "markup error: {}", message),
            SvgToolboxError::UnsafePath(message) => write!(f, "unsafe path: {}", message),
            SvgToolboxError::Render(message) => write!(f, "render error: {}", message),
            SvgToolboxError::Encode(message) => write!(f, "encode error: {}", message),
            SvgToolboxError::Io(err) => write!(f, "io error: {}", err),
            SvgToolboxError::Image(err) => write!(f, "image error: {}", err),
        }
    }
}

impl std::error::Error for SvgToolboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SvgToolboxError::Io(err) => Some(err),
            SvgToolboxError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SvgToolboxError {
    fn from(value: std::io::Error) -> Self {
        SvgToolboxError::Io(value)
    }
}

impl From<image::ImageError> for SvgToolboxError {
    fn from(value: image::ImageError) -> Self {
        SvgToolboxError::Image(value)
    }
}
