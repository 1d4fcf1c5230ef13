//! List-rendering context shared by the markup serializers.

use super::Positional;
use crate::model::GroupKind;

/// A list opened by a list group, with its entries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListBlock {
    pub(crate) kind: GroupKind,
    /// Nesting level of the group that opened the list
    pub(crate) level: u32,
    pub(crate) entries: Vec<ListEntry>,
}

impl ListBlock {
    fn new(kind: GroupKind, level: u32) -> Self {
        Self {
            kind,
            level,
            entries: Vec::new(),
        }
    }

    pub(crate) fn is_ordered(&self) -> bool {
        self.kind == GroupKind::OrderedList
    }
}

/// One list entry; nested lists hang off the entry they follow.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListEntry {
    /// Entry text, `None` for a bare container holding only nested lists
    pub(crate) text: Option<String>,
    pub(crate) position: Option<Positional>,
    pub(crate) children: Vec<ListBlock>,
}

impl ListEntry {
    pub(crate) fn new(text: impl Into<String>, position: Option<Positional>) -> Self {
        Self {
            text: Some(text.into()),
            position,
            children: Vec::new(),
        }
    }
}

/// Stack of currently open lists, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ListStack {
    open: Vec<ListBlock>,
}

impl ListStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Open a list for a group at `level`.
    ///
    /// Lists opened at the same or a deeper level are closed first; any
    /// top-level list completed that way is returned for emission.
    pub(crate) fn open(&mut self, kind: GroupKind, level: u32) -> Vec<ListBlock> {
        let done = self.close_from(level);
        self.open.push(ListBlock::new(kind, level));
        done
    }

    /// Add an entry for a list item at `level`.
    ///
    /// The entry goes to the innermost open list whose group sits above the
    /// item; deeper lists are closed into their parents. When no open list
    /// sits above the item (items at the same level as their group), the
    /// entry goes to the outermost open list. A stray item with no open
    /// list gets an implicit bullet list.
    pub(crate) fn push_entry(&mut self, entry: ListEntry, level: u32) {
        let keep = self
            .open
            .iter()
            .rposition(|l| l.level < level)
            .unwrap_or(0);
        while self.open.len() > keep + 1 {
            let Some(block) = self.open.pop() else {
                break;
            };
            if let Some(parent) = self.open.last_mut() {
                attach(parent, block);
            }
        }

        if self.open.is_empty() {
            self.open.push(ListBlock::new(GroupKind::List, level.saturating_sub(1)));
        }
        if let Some(list) = self.open.last_mut() {
            list.entries.push(entry);
        }
    }

    /// Close every open list, returning the completed top-level list.
    pub(crate) fn close_all(&mut self) -> Option<ListBlock> {
        let mut done = self.close_from(0);
        // close_from(0) empties the stack, completing at most one root
        done.pop()
    }

    /// Close open lists whose level is `>= level`.
    fn close_from(&mut self, level: u32) -> Vec<ListBlock> {
        let mut done = Vec::new();
        while self.open.last().is_some_and(|l| l.level >= level) {
            let Some(block) = self.open.pop() else {
                break;
            };
            match self.open.last_mut() {
                Some(parent) => attach(parent, block),
                None => done.push(block),
            }
        }
        done
    }
}

fn attach(parent: &mut ListBlock, child: ListBlock) {
    match parent.entries.last_mut() {
        Some(entry) => entry.children.push(child),
        None => parent.entries.push(ListEntry {
            text: None,
            position: None,
            children: vec![child],
        }),
    }
}
