//! Argument-count validation: exactly one positional token, used as a name.

use crate::error::{DrillError, Result};

/// Returns the single token in `args`.
///
/// # Errors
///
/// [`DrillError::TooFewArguments`] for an empty slice,
/// [`DrillError::TooManyArguments`] for more than one token.
pub fn single_argument<S: AsRef<str>>(args: &[S]) -> Result<&str> {
    match args {
        [] => Err(DrillError::TooFewArguments),
        [one] => Ok(one.as_ref()),
        _ => Err(DrillError::TooManyArguments),
    }
}

pub fn introduce(name: &str) -> String {
    format!("My name is {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_argument_is_the_name() {
        let args = vec!["Alice".to_owned()];
        let name = single_argument(&args).unwrap();
        assert_eq!(introduce(name), "My name is Alice");
    }

    #[test]
    fn test_missing_argument() {
        let args: Vec<String> = Vec::new();
        assert!(matches!(
            single_argument(&args),
            Err(DrillError::TooFewArguments)
        ));
    }

    #[test]
    fn test_extra_arguments() {
        assert!(matches!(
            single_argument(&["Alice", "Bob"]),
            Err(DrillError::TooManyArguments)
        ));
    }

    #[test]
    fn test_name_with_spaces_is_one_argument() {
        assert_eq!(
            introduce(single_argument(&["Ada Lovelace"]).unwrap()),
            "My name is Ada Lovelace"
        );
    }
}
