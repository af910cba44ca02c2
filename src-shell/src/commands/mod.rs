//! Line commands
//!
//! Each command maps onto shell operations and is answered with one
//! `CommandResult` serialized as JSON.

pub mod macros;
pub mod navigation;
pub mod settings;
pub mod tabs;

use guacagui_core::NavigationCommand;
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid {what}: {value}")]
    Invalid { what: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroRef {
    /// `#2`
    Index(usize),
    Name(String),
}

/// What a view reported about its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageReport {
    Title(String),
    Url(String),
    /// The page asked to open `address` in a new window
    Window(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Option<String>),
    Close(String),
    Activate(String),
    Next,
    Prev,
    Move { tab: String, index: usize },
    /// `to == None` releases the tab outside the strip
    Drag { from: usize, to: Option<usize> },
    Macro(MacroRef),
    Macros,
    Edit { index: usize, text: String },
    Tabs,
    Home,
    Go(String),
    Navigate(NavigationCommand),
    Page { tab: String, report: PageReport },
    Sidebar,
    Reload,
    Notices,
    Help,
    Quit,
}

const HELP: &[&str] = &[
    "open [address]",
    "close <tab>",
    "activate <tab>",
    "next | prev",
    "move <tab> <index>",
    "drag <from> <to|out>",
    "macro <name|#index>",
    "macros",
    "edit <index> <text>",
    "tabs",
    "home",
    "go <address>",
    "back | forward | refresh | stop",
    "page <tab> <title|url|window> <value>",
    "sidebar",
    "reload",
    "notices",
    "quit",
];

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "open" | "new" => Command::Open((!rest.is_empty()).then(|| rest.to_string())),
            "close" => Command::Close(required(rest, "tab")?.to_string()),
            "activate" | "switch" => Command::Activate(required(rest, "tab")?.to_string()),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "move" => {
                let (tab, index) = pair(rest, "tab", "index")?;
                Command::Move {
                    tab: tab.to_string(),
                    index: number(index, "index")?,
                }
            }
            "drag" => {
                let (from, to) = pair(rest, "from", "to")?;
                let to = match to {
                    "out" => None,
                    to => Some(number(to, "to")?),
                };
                Command::Drag {
                    from: number(from, "from")?,
                    to,
                }
            }
            "macro" => {
                let target = required(rest, "macro")?;
                match target.strip_prefix('#') {
                    Some(index) => Command::Macro(MacroRef::Index(number(index, "macro index")?)),
                    None => Command::Macro(MacroRef::Name(target.to_string())),
                }
            }
            "macros" => Command::Macros,
            "edit" => {
                let (index, text) = match rest.split_once(char::is_whitespace) {
                    Some((index, text)) => (index, text.to_string()),
                    None => (required(rest, "index")?, String::new()),
                };
                Command::Edit {
                    index: number(index, "index")?,
                    text,
                }
            }
            "tabs" => Command::Tabs,
            "home" => Command::Home,
            "go" => Command::Go(required(rest, "address")?.to_string()),
            "back" => Command::Navigate(NavigationCommand::Back),
            "forward" => Command::Navigate(NavigationCommand::Forward),
            "refresh" => Command::Navigate(NavigationCommand::Reload),
            "stop" => Command::Navigate(NavigationCommand::Stop),
            "page" => {
                let (tab, rest) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ParseError::MissingArgument("event"))?;
                let (kind, value) = match rest.trim_start().split_once(char::is_whitespace) {
                    Some((kind, value)) => (kind, value.to_string()),
                    None => (rest.trim_start(), String::new()),
                };
                let report = match kind {
                    "title" => PageReport::Title(value),
                    "url" => PageReport::Url(required(&value, "address")?.to_string()),
                    "window" => PageReport::Window(required(&value, "address")?.to_string()),
                    other => {
                        return Err(ParseError::Invalid {
                            what: "event",
                            value: other.to_string(),
                        })
                    }
                };
                Command::Page {
                    tab: tab.to_string(),
                    report,
                }
            }
            "sidebar" => Command::Sidebar,
            "reload" => Command::Reload,
            "notices" => Command::Notices,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(rest: &'a str, what: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(what))
    } else {
        Ok(rest)
    }
}

fn pair<'a>(
    rest: &'a str,
    first: &'static str,
    second: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    let mut parts = rest.split_whitespace();
    let a = parts.next().ok_or(ParseError::MissingArgument(first))?;
    let b = parts.next().ok_or(ParseError::MissingArgument(second))?;
    Ok((a, b))
}

fn number(value: &str, what: &'static str) -> Result<usize, ParseError> {
    value.parse().map_err(|_| ParseError::Invalid {
        what,
        value: value.to_string(),
    })
}

pub enum Outcome {
    Reply(String),
    Quit,
}

pub fn handle_line(state: &mut AppState, line: &str) -> Outcome {
    match Command::parse(line) {
        Ok(Command::Quit) => Outcome::Quit,
        Ok(command) => {
            tracing::debug!(?command, "Executing command");
            Outcome::Reply(execute(state, command))
        }
        Err(e) => Outcome::Reply(render(CommandResult::<()>::err(e.to_string()))),
    }
}

pub fn execute(state: &mut AppState, command: Command) -> String {
    match command {
        Command::Open(address) => render(tabs::open(state, address.as_deref())),
        Command::Close(tab) => render(tabs::close(state, &tab)),
        Command::Activate(tab) => render(tabs::activate(state, &tab)),
        Command::Next => render(tabs::cycle(state, 1)),
        Command::Prev => render(tabs::cycle(state, -1)),
        Command::Move { tab, index } => render(tabs::move_tab(state, &tab, index)),
        Command::Drag { from, to } => render(tabs::drag(state, from, to)),
        Command::Tabs => render(tabs::list(state)),
        Command::Macro(target) => render(macros::run(state, &target)),
        Command::Macros => render(macros::list(state)),
        Command::Edit { index, text } => render(macros::edit(state, index, text)),
        Command::Sidebar => render(macros::sidebar(state)),
        Command::Home => render(navigation::home(state)),
        Command::Go(address) => render(navigation::go(state, &address)),
        Command::Navigate(command) => render(navigation::command(state, command)),
        Command::Page { tab, report } => render(navigation::page(state, &tab, report)),
        Command::Reload => render(settings::reload(state)),
        Command::Notices => render(settings::notices(state)),
        Command::Help => render(CommandResult::ok(HELP)),
        Command::Quit => render(CommandResult::ok(())),
    }
}

fn render<T: Serialize>(result: CommandResult<T>) -> String {
    serde_json::to_string(&result).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "data": null, "error": e.to_string() }).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("tabs").unwrap(), Command::Tabs);
        assert_eq!(Command::parse("  NEXT ").unwrap(), Command::Next);
        assert_eq!(
            Command::parse("refresh").unwrap(),
            Command::Navigate(NavigationCommand::Reload)
        );
        assert_eq!(Command::parse("reload").unwrap(), Command::Reload);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(Command::parse("open").unwrap(), Command::Open(None));
        assert_eq!(
            Command::parse("open gw.example/guacamole").unwrap(),
            Command::Open(Some("gw.example/guacamole".to_string()))
        );
        assert_eq!(
            Command::parse("move 2 0").unwrap(),
            Command::Move {
                tab: "2".to_string(),
                index: 0
            }
        );
        assert_eq!(
            Command::parse("drag 2 out").unwrap(),
            Command::Drag { from: 2, to: None }
        );
        assert_eq!(
            Command::parse("macro 4").unwrap(),
            Command::Macro(MacroRef::Name("4".to_string()))
        );
        assert_eq!(
            Command::parse("macro #1").unwrap(),
            Command::Macro(MacroRef::Index(1))
        );
        assert_eq!(
            Command::parse("edit 0 sudo apt upgrade").unwrap(),
            Command::Edit {
                index: 0,
                text: "sudo apt upgrade".to_string()
            }
        );
    }

    #[test]
    fn test_parse_page_reports() {
        assert_eq!(
            Command::parse("page 0 title Guacamole - c1").unwrap(),
            Command::Page {
                tab: "0".to_string(),
                report: PageReport::Title("Guacamole - c1".to_string())
            }
        );
        assert_eq!(
            Command::parse("page 1 window gw.example/guacamole/#/client/c2").unwrap(),
            Command::Page {
                tab: "1".to_string(),
                report: PageReport::Window("gw.example/guacamole/#/client/c2".to_string())
            }
        );
        assert_eq!(
            Command::parse("page 0").unwrap_err(),
            ParseError::MissingArgument("event")
        );
        assert_eq!(
            Command::parse("page 0 url").unwrap_err(),
            ParseError::MissingArgument("address")
        );
        assert!(matches!(
            Command::parse("page 0 favicon x").unwrap_err(),
            ParseError::Invalid { what: "event", .. }
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("fly").unwrap_err(),
            ParseError::Unknown("fly".to_string())
        );
        assert_eq!(
            Command::parse("close").unwrap_err(),
            ParseError::MissingArgument("tab")
        );
        assert_eq!(
            Command::parse("move 1").unwrap_err(),
            ParseError::MissingArgument("index")
        );
        assert!(matches!(
            Command::parse("drag x 0").unwrap_err(),
            ParseError::Invalid { what: "from", .. }
        ));
    }

    #[test]
    fn test_command_result_shape() {
        let json = render(CommandResult::<()>::err("could not paste macro".to_string()));
        assert_eq!(
            json,
            r#"{"success":false,"data":null,"error":"could not paste macro"}"#
        );
    }
}
