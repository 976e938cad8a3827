/// Macro used for implementing path macros. Used for extracting macro repetition count for
/// reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a [Path64](crate::clip::Path64) from a list of `(x, y)` integer pairs.
///
/// # Examples
///
/// ```
/// # use polybool64::path64;
/// # use polybool64::core::math::Point64;
/// let path = path64![(0, 0), (10, 0), (10, 10)];
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], Point64::new(10, 10));
/// ```
#[macro_export]
macro_rules! path64 {
    () => {
        $crate::clip::Path64::new()
    };
    ($(($x:expr, $y:expr)),* $(,)?) => {{
        let size = 0usize $(+ $crate::replace_expr!(($x) 1usize))*;
        let mut path = $crate::clip::Path64::with_capacity(size);
        $(
            path.push($crate::core::math::Point64::new($x, $y));
        )*
        path
    }};
}

/// Construct a [Paths64](crate::clip::Paths64) from bracketed lists of `(x, y)` pairs.
///
/// # Examples
///
/// ```
/// # use polybool64::paths64;
/// let paths = paths64![[(0, 0), (10, 0), (10, 10)], [(2, 2), (4, 2), (4, 4)]];
/// assert_eq!(paths.len(), 2);
/// assert_eq!(paths[1].len(), 3);
/// ```
#[macro_export]
macro_rules! paths64 {
    () => {
        $crate::clip::Paths64::new()
    };
    ($([$(($x:expr, $y:expr)),* $(,)?]),* $(,)?) => {{
        vec![$($crate::path64![$(($x, $y)),*]),*]
    }};
}
