use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum LogoError {
    // Input
    EmptyData,
    EmptyLogo,
    InvalidScale(f64),
    InvalidGeometry,

    // Autotune
    InfeasibleConstraint { min_ecc_left: f64, ecc_budget: f64 },
    NoFeasibleScale,

    // Collaborators
    Encode(String),
    Image(image::ImageError),
    Io(std::io::Error),
}

impl Display for LogoError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            // Input
            Self::EmptyData => f.write_str("Empty data"),
            Self::EmptyLogo => f.write_str("Logo has a zero dimension"),
            Self::InvalidScale(s) => write!(f, "Invalid logo scale {s}, expected a ratio in [0, 1]"),
            Self::InvalidGeometry => f.write_str("Module size and symbol width must be non-zero"),

            // Autotune
            Self::InfeasibleConstraint { min_ecc_left, ecc_budget } => write!(
                f,
                "Requested minimum ECC left ({min_ecc_left}%) >= ECC capacity ({ecc_budget}%). No feasible logo size"
            ),
            Self::NoFeasibleScale => f.write_str("No logo size satisfies the requested constraints"),

            // Collaborators
            Self::Encode(msg) => write!(f, "Encoding failed: {msg}"),
            Self::Image(e) => write!(f, "Image error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for LogoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for LogoError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<std::io::Error> for LogoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type LogoResult<T> = Result<T, LogoError>;
