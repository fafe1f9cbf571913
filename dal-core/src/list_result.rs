use serde::Serialize;

/// The result of a listing operation: one page of entities in database
/// return order, plus the total number of rows the filter would match
/// absent pagination.
///
/// `list.len() <= total` always; the page may be shorter than the requested
/// limit only on the final page.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T> {
    pub list: Vec<T>,
    pub total: u64,
}

impl<T> ListResult<T> {
    pub fn new(list: Vec<T>, total: u64) -> Self {
        Self { list, total }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
