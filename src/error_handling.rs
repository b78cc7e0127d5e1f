use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// Where a definition was read from. `file` is `None` for standard input
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize
}

impl Location {
    pub fn new(file: Option<PathBuf>, line: usize) -> Self {
        Location { file, line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.file {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        };
        if self.line == 0 {
            write!(f, "{}", source)
        } else {
            write!(f, "{}:{}", source, self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Oops;

    impl ErrorType for Oops {}

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::new(None, 0).to_string(), "<stdin>");
        assert_eq!(Location::new(None, 4).to_string(), "<stdin>:4");
        assert_eq!(Location::new(Some(PathBuf::from("g.cfg")), 2).to_string(), "g.cfg:2");
    }

    #[test]
    fn error_display_mentions_location() {
        let error = Error { location: Location::new(None, 3), error: Oops };
        assert!(error.to_string().contains("<stdin>:3"));
        assert!(error.to_string().contains("oops"));
    }
}
