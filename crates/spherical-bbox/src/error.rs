use thiserror::Error;

/// Errors from batch bounding-box computation.
///
/// Elements straddling poles or axes and zero-width elements are regular
/// input, not errors. The only rejected input is a batch whose coordinate
/// slices disagree in length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("`{name}` has {found} elements, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Check that every named slice length matches the first one.
pub(crate) fn check_lengths(lengths: &[(&'static str, usize)]) -> Result<usize, BoundsError> {
    let expected = lengths.first().map(|&(_, len)| len).unwrap_or(0);
    for &(name, found) in lengths {
        if found != expected {
            return Err(BoundsError::LengthMismatch {
                name,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}
