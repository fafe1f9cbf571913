/// Trait representing a persisted record with a numeric identifier.
///
/// An identifier of `0` means "not found" or "not yet persisted": lookups
/// that match no row return the `Default` value of the entity, and callers
/// detect it by checking the identifier rather than by catching an error.
///
/// # Example
///
/// ```ignore
/// impl Entity for User {
///     fn id(&self) -> i64 { self.id }
///     fn set_id(&mut self, id: i64) { self.id = id; }
/// }
/// ```
pub trait Entity: Clone + Default + Send + Sync + Unpin + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    /// Whether the entity carries a database identifier.
    fn is_persisted(&self) -> bool {
        self.id() != 0
    }
}
