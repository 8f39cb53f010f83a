pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "one-to-one span must start and end on the same line, got lines {} and {}",
        start_line,
        end_line
    )]
    InvalidSpan { start_line: u32, end_line: u32 },
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}

impl Error {
    #[cold]
    pub(crate) fn invalid_span(start_line: u32, end_line: u32) -> Self {
        Self::InvalidSpan {
            start_line,
            end_line,
        }
    }

    #[cold]
    pub(crate) fn index_out_of_range(index: isize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
