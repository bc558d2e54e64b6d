//! Command-line string splitting.

/// Split a command line into program and arguments.
///
/// Tokens are separated by whitespace. A double-quoted run is part of a
/// single token and its whitespace is kept; the quote characters themselves
/// are dropped. An unterminated quote runs to the end of the input.
///
/// ```
/// use bmt::shell::split_command;
///
/// assert_eq!(
///     split_command(r#"git commit -m "first post""#),
///     vec!["git", "commit", "-m", "first post"]
/// );
/// ```
pub fn split_command(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A token can be empty ("") and still count, so track it separately.
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

/// Render arguments back into a readable command line.
///
/// Arguments containing whitespace (or nothing at all) are wrapped in double
/// quotes so the result can be fed back through [`split_command`].
pub fn join_command<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| {
            let part = part.as_ref();
            if part.is_empty() || part.chars().any(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
