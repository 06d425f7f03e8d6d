/// Composes a storage key from a variadic argument list.
///
/// Expands to a [`key`](crate::key) call; accepts any mix of values with an
/// `AsRef<str>` impl. With no arguments it yields the empty string.
///
/// # Example
/// ```rust
/// let k = redis_hub::key!("users", "42", "profile");
/// assert_eq!(k, "users_42_profile");
/// ```
#[macro_export]
macro_rules! key {
    () => {
        ::std::string::String::new()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::key([$(::core::convert::AsRef::<str>::as_ref(&$part)),+])
    };
}
