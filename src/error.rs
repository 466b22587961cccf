use core::fmt;

/// A collaborator failed.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<D, S> {
    Display(D),
    Storage(S),
}

impl<D: fmt::Debug, S: fmt::Debug> fmt::Display for Error<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Display(e) => write!(f, "display error: {e:?}"),
            Error::Storage(e) => write!(f, "seed storage error: {e:?}"),
        }
    }
}
