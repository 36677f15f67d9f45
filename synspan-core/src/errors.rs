use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntervalError {
    #[error("Invalid interval coordinate, expected an integer: {0}")]
    InvalidCoordinate(String),

    #[error("Malformed interval record, expected contig<TAB>start<TAB>stop: {0}")]
    MalformedRecord(String),
}
