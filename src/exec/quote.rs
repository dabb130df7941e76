// src/exec/quote.rs

//! Quoted command-line rendering.
//!
//! Arguments are always handed to child processes as a real argument
//! vector. The quoted form produced here is what a user would type to get
//! the same vector back, and is used for logging.

/// Wrap one argument in double quotes.
///
/// Embedded quotes are escaped with a backslash, and backslashes that end
/// up in front of a quote are doubled so the quote is not swallowed.
pub fn quote_argument(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');

    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                push_backslashes(&mut out, backslashes * 2 + 1);
                out.push('"');
                backslashes = 0;
            }
            _ => {
                push_backslashes(&mut out, backslashes);
                out.push(c);
                backslashes = 0;
            }
        }
    }

    push_backslashes(&mut out, backslashes * 2);
    out.push('"');
    out
}

/// Quote every argument and join them with single spaces.
pub fn quote_arguments<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote_argument(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_backslashes(out: &mut String, n: usize) {
    out.extend(std::iter::repeat_n('\\', n));
}
