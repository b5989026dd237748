use super::{grid_tree, Screen, ScreenAction, ScreenContext, ScreenItem, ScreenKind};
use crate::inject::KeyCommand;
use crate::scan::{Commit, CommitPolicy, OptionTree};

const NAV_COLUMNS: usize = 4;

/// Entries of the navigation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavEntry {
    Key(KeyCommand),
    OpenBrowser,
    CloseBrowser,
    Exit,
}

impl NavEntry {
    fn label(self) -> &'static str {
        match self {
            NavEntry::Key(key) => key.label(),
            NavEntry::OpenBrowser => "Browser Commands",
            NavEntry::CloseBrowser => "←",
            NavEntry::Exit => "Exit",
        }
    }
}

const MAIN_ENTRIES: [NavEntry; 16] = [
    NavEntry::Key(KeyCommand::Tab),
    NavEntry::Key(KeyCommand::Enter),
    NavEntry::Key(KeyCommand::Up),
    NavEntry::Key(KeyCommand::Down),
    NavEntry::Key(KeyCommand::Left),
    NavEntry::Key(KeyCommand::Right),
    NavEntry::Key(KeyCommand::PageUp),
    NavEntry::Key(KeyCommand::PageDown),
    NavEntry::Key(KeyCommand::Home),
    NavEntry::Key(KeyCommand::End),
    NavEntry::Key(KeyCommand::Alt),
    NavEntry::Key(KeyCommand::Escape),
    NavEntry::Key(KeyCommand::ChangeWindow),
    NavEntry::Key(KeyCommand::CloseWindow),
    NavEntry::OpenBrowser,
    NavEntry::Exit,
];

const BROWSER_ENTRIES: [NavEntry; 8] = [
    NavEntry::Key(KeyCommand::SearchBar),
    NavEntry::Key(KeyCommand::NewTab),
    NavEntry::Key(KeyCommand::CloseTab),
    NavEntry::Key(KeyCommand::SwitchTab),
    NavEntry::Key(KeyCommand::ReopenTab),
    NavEntry::Key(KeyCommand::GoBack),
    NavEntry::Key(KeyCommand::GoForward),
    NavEntry::CloseBrowser,
];

/// Four-column grid of navigation keys with a browser sub-menu.
#[derive(Debug, Default)]
pub struct NavigationScreen {
    browser: bool,
}

impl NavigationScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_browser_menu(&self) -> bool {
        self.browser
    }

    fn rows(&self) -> Vec<Vec<Option<NavEntry>>> {
        let entries: &[NavEntry] = if self.browser {
            &BROWSER_ENTRIES
        } else {
            &MAIN_ENTRIES
        };
        entries
            .chunks(NAV_COLUMNS)
            .map(|chunk| {
                let mut row: Vec<Option<NavEntry>> = chunk.iter().copied().map(Some).collect();
                row.resize(NAV_COLUMNS, None);
                row
            })
            .collect()
    }
}

impl Screen for NavigationScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Navigation
    }

    fn title(&self) -> &'static str {
        if self.browser {
            "Browser Commands"
        } else {
            "Navigation"
        }
    }

    fn tree(&self) -> OptionTree<ScreenItem> {
        OptionTree::new(grid_tree(
            &self.rows(),
            |entry| entry.label().to_string(),
            |entry| match *entry {
                NavEntry::Key(key) => (ScreenItem::Nav(key), CommitPolicy::Resume),
                NavEntry::OpenBrowser => (ScreenItem::BrowserMenu(true), CommitPolicy::Resume),
                NavEntry::CloseBrowser => (ScreenItem::BrowserMenu(false), CommitPolicy::Resume),
                NavEntry::Exit => (ScreenItem::Open(ScreenKind::MainMenu), CommitPolicy::Stop),
            },
        ))
    }

    fn on_commit(
        &mut self,
        commit: &Commit<ScreenItem>,
        ctx: &mut ScreenContext<'_>,
    ) -> ScreenAction {
        match commit.action {
            Some(ScreenItem::Nav(key)) => {
                ctx.send_key(key);
                ScreenAction::Stay
            }
            Some(ScreenItem::BrowserMenu(open)) => {
                self.browser = open;
                ScreenAction::TreeChanged
            }
            Some(ScreenItem::Open(kind)) => ScreenAction::SwitchTo(kind),
            _ => ScreenAction::Stay,
        }
    }
}
