// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand.

    // s!() → empty String
    () => {
        ::std::string::String::new()
    };
    // s!(x) → String::from(x)
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate string-likes into one String without a format! pass.
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}
