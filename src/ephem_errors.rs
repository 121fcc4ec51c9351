use thiserror::Error;

/// Row-level parsing failures.
///
/// These never abort an import: the row readers log them and move on to the next line.
///
/// Variants
/// -----------------
/// * `NoAngularFields` – Neither the token layout nor the combined RA/DEC pattern matched.
/// * `MissingRange` – An RA/DEC pair was found but no range field follows it.
/// * `IncompleteStateVector` – A `$$SOE` record whose three lines do not all have their expected shape.
/// * `NonFiniteValue` – A parsed field is NaN or infinite; payload names the field.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseRowError {
    #[error("No RA/DEC fields found in row: {0}")]
    NoAngularFields(String),
    #[error("No range field after the RA/DEC fields: {0}")]
    MissingRange(String),
    #[error("Incomplete state-vector record starting at: {0}")]
    IncompleteStateVector(String),
    #[error("Non-finite value for field {0}")]
    NonFiniteValue(&'static str),
}

#[derive(Error, Debug)]
pub enum EphemError {
    #[error("Missing header field: {0}")]
    MissingHeaderField(&'static str),

    #[error("Unable to read ephemeris file {path}: {source}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row: {0}")]
    MalformedRow(#[from] ParseRowError),

    #[error("Unable to parse date: {0}")]
    DateParseFailure(String),

    #[error("Invalid import parameter: {0}")]
    InvalidImportParameter(String),
}

impl PartialEq for EphemError {
    fn eq(&self, other: &Self) -> bool {
        use EphemError::*;
        match (self, other) {
            (MissingHeaderField(a), MissingHeaderField(b)) => a == b,
            // io::Error is not comparable: equal when the path matches
            (FileUnreadable { path: a, .. }, FileUnreadable { path: b, .. }) => a == b,
            (MalformedRow(a), MalformedRow(b)) => a == b,
            (DateParseFailure(a), DateParseFailure(b)) => a == b,
            (InvalidImportParameter(a), InvalidImportParameter(b)) => a == b,
            _ => false,
        }
    }
}
