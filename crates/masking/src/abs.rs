//! Abstract data types.

/// Interface to peek at the inner value without consuming the secret.
pub trait PeekInterface<S> {
    /// Expose a reference to the inner secret.
    fn peek(&self) -> &S;
}

/// Interface to consume the secret and expose the inner value.
pub trait ExposeInterface<S> {
    /// Consume the secret and return the inner value.
    fn expose(self) -> S;
}
