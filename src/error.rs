use crate::float::Category;

/// Errors reported by the conversion routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value is NaN or an infinity, and has no exact ratio.
    #[error("domain error: cannot represent {0} as an exact ratio")]
    Domain(Category),
}

pub type Result<T> = core::result::Result<T, Error>;

#[test]
fn test_error_message() {
    use alloc::string::ToString;

    let err = Error::Domain(Category::NaN);
    assert_eq!(
        err.to_string(),
        "domain error: cannot represent NaN as an exact ratio"
    );
    let err = Error::Domain(Category::Infinity);
    assert_eq!(
        err.to_string(),
        "domain error: cannot represent infinity as an exact ratio"
    );
}
