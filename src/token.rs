/// Splits a validated line (or pipeline segment) into its argument vector.
///
/// Boundaries are single spaces and runs are not collapsed: the validator
/// guarantees that consecutive spaces never reach this point, so an empty
/// entry here indicates a caller bug, not user input. The vector grows to
/// whatever the line actually contains; there is no fixed argument bound.
/// The NULL-terminated form required by `execvp` is materialized only at
/// exec time.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(tokenize("ls"), vec!["ls"]);
    }

    #[test]
    fn test_command_with_arguments() {
        assert_eq!(tokenize("grep -n foo bar.txt"), vec!["grep", "-n", "foo", "bar.txt"]);
    }

    #[test]
    fn test_empty_entries_are_preserved() {
        // Double spaces are a validator error; the tokenizer must not
        // paper over them by collapsing the run.
        assert_eq!(tokenize("a  b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_no_fixed_upper_bound() {
        let line = (0..64).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(tokenize(&line).len(), 64);
    }
}
