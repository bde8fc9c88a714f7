use super::error::ListBooksError;
use super::models::BookListingRequest;

/// Reject requests no query should be built for. Empty filters are fine;
/// they simply filter nothing.
pub fn validate(request: BookListingRequest) -> Result<BookListingRequest, ListBooksError> {
    if matches!(request.limit, Some(limit) if limit < 1) {
        return Err(ListBooksError::invalid_argument("limit must be positive"));
    }
    if request.offset < 0 {
        return Err(ListBooksError::invalid_argument(
            "offset must be non-negative",
        ));
    }
    Ok(request)
}
