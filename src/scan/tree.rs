//! Option trees: ordered, possibly nested lists of selectable items.

/// What the engine does after an item commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// Stop the timer and return to idle; the next activation re-arms scanning.
    #[default]
    Stop,
    /// Keep the timer running and restart from the first root item.
    Resume,
}

/// One selectable entry. Items with children descend on activation; leaves commit.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionItem<A> {
    pub label: String,
    pub action: Option<A>,
    pub children: Vec<OptionItem<A>>,
    pub policy: CommitPolicy,
    placeholder: bool,
}

impl<A> OptionItem<A> {
    pub fn leaf(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
            children: Vec::new(),
            policy: CommitPolicy::Stop,
            placeholder: false,
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<OptionItem<A>>) -> Self {
        Self {
            label: label.into(),
            action: None,
            children,
            policy: CommitPolicy::Stop,
            placeholder: false,
        }
    }

    /// Padding slot for irregular rows. Highlightable, never committable.
    pub fn placeholder() -> Self {
        Self {
            label: String::new(),
            action: None,
            children: Vec::new(),
            policy: CommitPolicy::Stop,
            placeholder: true,
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Root-level sequence of items. Row lengths may differ between branches.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTree<A> {
    items: Vec<OptionItem<A>>,
}

impl<A> Default for OptionTree<A> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<A> OptionTree<A> {
    pub fn new(items: Vec<OptionItem<A>>) -> Self {
        Self { items }
    }

    /// Single-level tree where every label is a leaf.
    pub fn flat<I, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, A)>,
        L: Into<String>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(label, action)| OptionItem::leaf(label, action))
                .collect(),
        )
    }

    pub fn items(&self) -> &[OptionItem<A>] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deepest level reachable from the root (1 for a flat list, 0 when empty).
    pub fn depth(&self) -> usize {
        fn walk<A>(items: &[OptionItem<A>]) -> usize {
            if items.is_empty() {
                return 0;
            }
            1 + items
                .iter()
                .map(|item| walk(&item.children))
                .max()
                .unwrap_or(0)
        }
        walk(&self.items)
    }

    /// Siblings addressed by `prefix`; the root list when `prefix` is empty.
    /// `None` when the prefix runs off the tree.
    pub fn siblings(&self, prefix: &[usize]) -> Option<&[OptionItem<A>]> {
        let mut level: &[OptionItem<A>] = &self.items;
        for &idx in prefix {
            level = &level.get(idx)?.children;
        }
        Some(level)
    }

    pub fn sibling_count(&self, prefix: &[usize]) -> usize {
        self.siblings(prefix).map_or(0, <[_]>::len)
    }

    pub fn item_at(&self, path: &[usize]) -> Option<&OptionItem<A>> {
        let (last, prefix) = path.split_last()?;
        self.siblings(prefix)?.get(*last)
    }
}
