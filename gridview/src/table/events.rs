//! Event routing.
//!
//! Events are delegated: the view listens on its body and header and finds
//! the element that should react by walking up from the target. The
//! innermost match wins and stops propagation.

use std::time::{Duration, Instant};

use griddom::{Event, Key, NodeId, Surface, Tag};

use super::{TableView, ViewContext};
use crate::classes;
use crate::config::SelectKind;
use crate::error::Result;
use crate::record::RowKey;

/// Result of event handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Lets a row click through at most once per window.
#[derive(Debug, Clone)]
pub struct ClickDebounce {
    window: Duration,
    last: Option<Instant>,
}

impl ClickDebounce {
    pub const WINDOW: Duration = Duration::from_millis(500);

    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a click at `now` may fire. A click that fires starts a new
    /// window; suppressed clicks do not extend it.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl Default for ClickDebounce {
    fn default() -> Self {
        Self::new(Self::WINDOW)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Head,
    Body,
}

/// Element that reacts to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Hit {
    Control(NodeId),
    Remover(NodeId),
    Editable(NodeId),
    Input(NodeId),
    Row(NodeId),
    SelectAll,
    Sort(String),
}

impl TableView {
    /// Dispatch an event at the current time.
    pub fn handle_event(&mut self, cx: &mut ViewContext<'_>, event: &Event) -> Result<EventResult> {
        self.handle_event_at(cx, event, Instant::now())
    }

    /// Dispatch an event that happened at `now`.
    pub fn handle_event_at(
        &mut self,
        cx: &mut ViewContext<'_>,
        event: &Event,
        now: Instant,
    ) -> Result<EventResult> {
        if self.destroyed || self.table.is_none() {
            return Ok(EventResult::Ignored);
        }

        match *event {
            Event::Click { target } => self.on_click(cx, target, now),
            Event::Change { target, checked } => self.on_change(cx, target, checked),
            Event::KeyPress {
                target,
                key: Key::Enter,
            } => self.on_enter(cx, target),
            Event::KeyPress { .. } => Ok(EventResult::Ignored),
            Event::FocusOut { target } => self.on_focus_out(cx, target),
            Event::Resize if self.settings.resize_listeners => {
                self.on_resize(cx.dom);
                Ok(EventResult::Consumed)
            }
            Event::Resize => Ok(EventResult::Ignored),
        }
    }

    fn on_click(&mut self, cx: &mut ViewContext<'_>, target: NodeId, now: Instant) -> Result<EventResult> {
        let hit = match self.region(cx.dom, target) {
            Some(Region::Body) => self.find_hit(cx.dom, target, |dom, node| {
                if dom.has_class(node, classes::CHECKBOX) || dom.has_class(node, classes::RADIO) {
                    Some(Hit::Control(node))
                } else if self.options.remove_row && dom.has_class(node, classes::ROW_REMOVER) {
                    Some(Hit::Remover(node))
                } else if self.options.editable && dom.has_class(node, classes::EDITABLE) {
                    Some(Hit::Editable(node))
                } else if dom.has_class(node, classes::ROW) {
                    Some(Hit::Row(node))
                } else {
                    None
                }
            }),
            Some(Region::Head) if self.settings.sortable => {
                self.find_hit(cx.dom, target, |dom, node| {
                    if dom.has_class(node, classes::CHECKBOX)
                        || dom.has_class(node, classes::CUSTOM_CHECKBOX)
                    {
                        return Some(Hit::SelectAll);
                    }
                    let sortable = dom.has_class(node, classes::HEADER_CELL)
                        && dom.has_class(node, classes::SORTABLE);
                    sortable
                        .then(|| dom.data(node, "attribute"))
                        .flatten()
                        .map(Hit::Sort)
                })
            }
            _ => None,
        };

        match hit {
            // The change event that follows carries the new state.
            Some(Hit::Control(_)) => Ok(EventResult::Consumed),
            Some(Hit::Remover(node)) => {
                let key = self.row_key_at(cx.dom, node);
                match key {
                    Some(key) => self.remove_record(cx, &key)?,
                    None => log::warn!("[table] remover outside of a known row"),
                }
                Ok(EventResult::Consumed)
            }
            Some(Hit::Editable(node)) => {
                let key = self.row_key_at(cx.dom, node);
                let attribute = cx
                    .dom
                    .closest_tag(node, Tag::Td)
                    .and_then(|cell| cx.dom.data(cell, "attribute"));
                if let (Some(key), Some(attribute)) = (key, attribute) {
                    self.show_input(cx, &key, Some(&attribute))?;
                }
                Ok(EventResult::Consumed)
            }
            Some(Hit::Row(node)) => {
                let Some(key) = self.row_key_at(cx.dom, node) else {
                    return Ok(EventResult::Ignored);
                };
                self.on_row_click(cx, &key, now)?;
                Ok(EventResult::Consumed)
            }
            Some(Hit::Sort(attribute)) => {
                self.sort_by_column(cx, &attribute)?;
                Ok(EventResult::Consumed)
            }
            Some(Hit::Input(_) | Hit::SelectAll) | None => Ok(EventResult::Ignored),
        }
    }

    fn on_row_click(&mut self, cx: &mut ViewContext<'_>, key: &RowKey, now: Instant) -> Result<()> {
        if self.debounce.try_fire(now) {
            cx.host.emit_item_clicked(key);
        } else {
            log::trace!("[table] row click on {key} debounced");
        }
        if self.options.highlight_selected {
            self.unique_highlight_record(cx, key)?;
        }
        Ok(())
    }

    fn on_change(&mut self, cx: &mut ViewContext<'_>, target: NodeId, checked: bool) -> Result<EventResult> {
        let Some(select) = self.options.select_item.clone() else {
            return Ok(EventResult::Ignored);
        };

        match self.region(cx.dom, target) {
            Some(Region::Body) => {
                let hit = self.find_hit(cx.dom, target, |dom, node| {
                    (dom.has_class(node, classes::CHECKBOX) || dom.has_class(node, classes::RADIO))
                        .then_some(Hit::Control(node))
                });
                let Some(Hit::Control(node)) = hit else {
                    return Ok(EventResult::Ignored);
                };
                let Some(key) = self.row_key_at(cx.dom, node) else {
                    return Ok(EventResult::Ignored);
                };
                match select.kind {
                    SelectKind::Checkbox => self.toggle_select_record(cx, &key, checked)?,
                    SelectKind::Radio if checked => self.unique_select_record(cx, &key)?,
                    SelectKind::Radio => {}
                }
                Ok(EventResult::Consumed)
            }
            Some(Region::Head) => {
                let hit = self.find_hit(cx.dom, target, |dom, node| {
                    dom.has_class(node, classes::CHECKBOX).then_some(Hit::SelectAll)
                });
                if hit != Some(Hit::SelectAll) {
                    return Ok(EventResult::Ignored);
                }
                if checked {
                    self.select_all_records(cx)?;
                } else {
                    self.deselect_all_records(cx)?;
                }
                Ok(EventResult::Consumed)
            }
            None => Ok(EventResult::Ignored),
        }
    }

    fn on_enter(&mut self, cx: &mut ViewContext<'_>, target: NodeId) -> Result<EventResult> {
        let Some((key, input)) = self.editable_input_at(cx.dom, target) else {
            return Ok(EventResult::Ignored);
        };
        self.enter_guard = Some(input);
        self.edit_row(cx, &key)?;
        Ok(EventResult::Consumed)
    }

    /// Focus-out commits, except when it leaves the input an Enter commit
    /// just came from.
    fn on_focus_out(&mut self, cx: &mut ViewContext<'_>, target: NodeId) -> Result<EventResult> {
        let hit = self.editable_input_at(cx.dom, target);
        let guarded = self.enter_guard.take();
        let Some((key, input)) = hit else {
            return Ok(EventResult::Ignored);
        };
        if guarded == Some(input) {
            log::trace!("[edit] focus-out after enter, no commit");
            return Ok(EventResult::Consumed);
        }
        self.edit_row(cx, &key)?;
        Ok(EventResult::Consumed)
    }

    /// Row and input of the `editable-input` containing `target`.
    fn editable_input_at(&self, dom: &dyn Surface, target: NodeId) -> Option<(RowKey, NodeId)> {
        if !self.options.editable || self.region(dom, target) != Some(Region::Body) {
            return None;
        }
        let hit = self.find_hit(dom, target, |dom, node| {
            dom.has_class(node, classes::EDITABLE_INPUT)
                .then_some(Hit::Input(node))
        });
        match hit {
            Some(Hit::Input(node)) => Some((self.row_key_at(dom, node)?, node)),
            _ => None,
        }
    }

    /// Which listened-on part of the table contains `target`.
    fn region(&self, dom: &dyn Surface, target: NodeId) -> Option<Region> {
        let table = self.table.as_ref()?;
        let head = table.header.as_ref().map(|h| h.element);
        let mut current = Some(target);
        while let Some(node) = current {
            if node == table.body {
                return Some(Region::Body);
            }
            if Some(node) == head {
                return Some(Region::Head);
            }
            current = dom.parent(node);
        }
        None
    }

    /// Walk up from `target` to the region root and return the first hit.
    fn find_hit<F>(&self, dom: &dyn Surface, target: NodeId, mut classify: F) -> Option<Hit>
    where
        F: FnMut(&dyn Surface, NodeId) -> Option<Hit>,
    {
        let table = self.table.as_ref()?;
        let head = table.header.as_ref().map(|h| h.element);
        let mut current = Some(target);
        while let Some(node) = current {
            if node == table.body || Some(node) == head {
                return None;
            }
            if let Some(hit) = classify(dom, node) {
                return Some(hit);
            }
            current = dom.parent(node);
        }
        None
    }

    fn row_key_at(&self, dom: &dyn Surface, node: NodeId) -> Option<RowKey> {
        let row = dom.closest(node, classes::ROW)?;
        self.table.as_ref()?.rows.key_for_element(row).cloned()
    }
}
