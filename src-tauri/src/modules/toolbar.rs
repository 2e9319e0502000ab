// Navigation toolbar layout. The chrome page renders this table; clicks come
// back as a `ToolbarCommand` and are dispatched with a `match` in `window`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarCommand {
    Back,
    Forward,
    Reload,
    Home,
    Stop,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    pub command: ToolbarCommand,
    pub label: &'static str,
    pub status_tip: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolbarItem {
    Command(CommandDescriptor),
    Separator,
    UrlField,
}

const fn action(command: ToolbarCommand, label: &'static str, status_tip: &'static str) -> ToolbarItem {
    ToolbarItem::Command(CommandDescriptor {
        command,
        label,
        status_tip,
    })
}

/// Left-to-right toolbar contents.
pub static TOOLBAR: [ToolbarItem; 8] = [
    action(ToolbarCommand::Back, "Back", "Back to previous page"),
    action(ToolbarCommand::Forward, "Forward", "Forward to next page"),
    action(ToolbarCommand::Reload, "Reload", "Reload page"),
    action(ToolbarCommand::Home, "Home", "Go home"),
    action(ToolbarCommand::Stop, "Stop", "Stop loading current page"),
    ToolbarItem::Separator,
    ToolbarItem::UrlField,
    action(ToolbarCommand::Settings, "Settings", "Change the default page"),
];
