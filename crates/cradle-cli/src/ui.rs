use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

fn resolve(
    flags: &GlobalFlags,
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&str>,
) -> UiPrefs {
    let table_color =
        stdout_tty && flags.format == OutputFormat::Table && !flags.quiet && !no_color;

    // Spinner lives on stderr; debug logs would tear through it.
    let progress =
        stderr_tty && !flags.quiet && !flags.verbose && flags.format != OutputFormat::Json;

    let term_width = columns
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
            database: None,
        }
    }

    #[test]
    fn color_needs_tty_table_and_no_no_color() {
        let table = flags(OutputFormat::Table, false);
        assert!(resolve(&table, true, true, false, None).table_color);
        assert!(!resolve(&table, false, true, false, None).table_color);
        assert!(!resolve(&table, true, true, true, None).table_color);
        assert!(!resolve(&flags(OutputFormat::Raw, false), true, true, false, None).table_color);
    }

    #[test]
    fn progress_is_off_for_json_and_quiet() {
        assert!(resolve(&flags(OutputFormat::Table, false), false, true, false, None).progress);
        assert!(!resolve(&flags(OutputFormat::Json, false), true, true, false, None).progress);
        assert!(!resolve(&flags(OutputFormat::Table, true), true, true, false, None).progress);

        let mut verbose = flags(OutputFormat::Table, false);
        verbose.verbose = true;
        assert!(!resolve(&verbose, true, true, false, None).progress);
    }

    #[test]
    fn narrow_or_garbage_columns_are_ignored() {
        let table = flags(OutputFormat::Table, false);
        assert_eq!(resolve(&table, true, true, false, Some("120")).term_width, Some(120));
        assert_eq!(resolve(&table, true, true, false, Some("20")).term_width, None);
        assert_eq!(resolve(&table, true, true, false, Some("wide")).term_width, None);
    }
}
