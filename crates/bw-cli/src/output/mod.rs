//! Output formatting for the CLI
//!
//! Table rendering for the registry, the live log line printer, and
//! colored status messages.

use tabled::{settings::Style, Table, Tabled};

use bw_core::{LogEvent, ServerDefinition};

/// Format the registry as an ASCII table
///
/// # Returns
/// A formatted string suitable for terminal output, or
/// "No servers configured" if the registry is empty.
pub fn format_servers(servers: &[ServerDefinition]) -> String {
    if servers.is_empty() {
        return "No servers configured".to_string();
    }

    #[derive(Tabled)]
    struct ServerRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "HOST")]
        host: String,
        #[tabled(rename = "USER")]
        user: String,
        #[tabled(rename = "LOG PATH")]
        path: String,
        #[tabled(rename = "KEY")]
        key: String,
    }

    let rows: Vec<ServerRow> = servers
        .iter()
        .enumerate()
        .map(|(i, s)| ServerRow {
            index: i,
            name: s.name.clone(),
            host: s.host.clone(),
            user: s.user.clone(),
            path: s.path.clone(),
            key: s.key.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print one classified line, prefixed with its server name.
///
/// Alert lines are rendered in red.
pub fn print_event(server: &str, event: &LogEvent) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    if event.alert {
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            Print(format!("[{server}] ")),
            SetForegroundColor(Color::Red),
            Print(&event.text),
            ResetColor,
            Print("\n")
        );
    } else {
        println!("[{server}] {}", event.text);
    }
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message in red with an X prefix
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a warning message in yellow with a warning symbol prefix
pub fn print_warning(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Yellow),
        Print("⚠ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan with an info symbol prefix
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}
