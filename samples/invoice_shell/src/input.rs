use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prints `message` and reads one trimmed line. `None` at end of input.
pub fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_owned()))
}

/// Asks for the picture directory on the terminal. An empty answer is no selection.
pub fn pick_directory() -> Option<PathBuf> {
    match prompt("Picture directory (empty to cancel): ") {
        Ok(Some(answer)) if !answer.is_empty() => Some(PathBuf::from(answer)),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Could not read the picture directory: {}", e);
            None
        }
    }
}

/// Parses a 1-based position typed by the user.
pub fn position(text: Option<&str>) -> anyhow::Result<usize> {
    let text = text.ok_or_else(|| anyhow::anyhow!("missing product number"))?;
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => anyhow::bail!("invalid product number: {}", text),
    }
}

/// Splits the first word off `text`. The rest is returned as typed, minus the
/// whitespace that separates it from the word.
pub fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_word_keeps_the_rest_verbatim_test() {
        let (command, rest) = split_word("edit 1 name Big   Chair");
        assert_eq!("edit", command);

        let (index, rest) = split_word(rest);
        let (field, value) = split_word(rest);
        assert_eq!(("1", "name", "Big   Chair"), (index, field, value));
    }

    #[test]
    fn split_word_at_end_of_line_test() {
        assert_eq!(("list", ""), split_word("  list"));
        assert_eq!(("", ""), split_word(""));
    }

    #[test]
    fn position_is_one_based_test() {
        assert_eq!(0, position(Some("1")).unwrap());
        assert!(position(Some("0")).is_err());
        assert!(position(Some("x")).is_err());
        assert!(position(None).is_err());
    }
}
