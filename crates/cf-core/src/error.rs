use std::result;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed descriptor `{descriptor}`: {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },
    #[error("unknown type {name}")]
    UnknownType { name: String },
    #[error("unknown primitive type {name}")]
    UnknownPrimitive { name: String },
    #[error("type variable {symbol} is not declared by {declared_by}")]
    UnboundTypeVariable { symbol: String, declared_by: String },
    #[error("cannot apply stack manipulation: {reason}")]
    IllegalManipulation { reason: String },
    #[error("duplicate {kind} {name}")]
    DuplicateMember { kind: &'static str, name: String },
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    #[error("unresolved: {reason}")]
    Unresolved { reason: String },
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn malformed(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedDescriptor {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    pub fn illegal_manipulation(reason: impl Into<String>) -> Self {
        Error::IllegalManipulation {
            reason: reason.into(),
        }
    }
}

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checked_slots(slots: i32) -> Result<i32> {
        if slots > 2 {
            bail!("{} slots is wider than any value", slots);
        }
        Ok(slots)
    }

    #[test]
    fn bail_returns_a_generic_error() {
        assert_eq!(checked_slots(1), Ok(1));
        assert_eq!(
            checked_slots(3),
            Err(Error::Generic("3 slots is wider than any value".to_string()))
        );
    }

    #[test]
    fn reports_convert_into_generic_errors() {
        let err: Error = eyre::eyre!("pool closed").into();
        assert_eq!(err, Error::Generic("pool closed".to_string()));
        assert_eq!(
            Error::malformed("Lfoo", "missing `;`").to_string(),
            "malformed descriptor `Lfoo`: missing `;`"
        );
    }
}
