use super::{Screen, ScreenAction, ScreenContext, ScreenItem, ScreenKind};
use crate::scan::{Commit, OptionTree};

/// Writing, Navigation, Settings, Exit.
#[derive(Debug, Default)]
pub struct MainMenuScreen;

impl MainMenuScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for MainMenuScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::MainMenu
    }

    fn title(&self) -> &'static str {
        "Main Menu"
    }

    fn tree(&self) -> OptionTree<ScreenItem> {
        OptionTree::flat([
            ("Writing", ScreenItem::Open(ScreenKind::Writing)),
            ("Navigation", ScreenItem::Open(ScreenKind::Navigation)),
            ("Settings", ScreenItem::Open(ScreenKind::Settings)),
            ("Exit", ScreenItem::Quit),
        ])
    }

    fn on_commit(
        &mut self,
        commit: &Commit<ScreenItem>,
        _ctx: &mut ScreenContext<'_>,
    ) -> ScreenAction {
        match commit.action {
            Some(ScreenItem::Open(kind)) => ScreenAction::SwitchTo(kind),
            Some(ScreenItem::Quit) => ScreenAction::Quit,
            _ => ScreenAction::Stay,
        }
    }
}
