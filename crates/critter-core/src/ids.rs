//! Per-frame identities for areas and widgets.
//!
//! Nothing about a widget survives between frames except its id, so ids are
//! purely structural: the n-th area opened in a frame always gets the same
//! `AreaId`, and the n-th widget call the same ordinal. Callers that issue the
//! same calls in the same order and nesting see the same ids every frame.

use smallvec::SmallVec;

use crate::error::{GuiError, Result};

/// Maximum nesting depth of areas and scroll regions, root included.
pub const MAX_AREA_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub u32);

impl AreaId {
    pub const ROOT: AreaId = AreaId(0);
    /// Reserved for widgets that live on the view edge outside every area.
    pub const VIEW_BORDER: AreaId = AreaId(u32::MAX - 1);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId {
    pub area: AreaId,
    pub ordinal: u32,
}

impl WidgetId {
    pub const fn new(area: AreaId, ordinal: u32) -> Self {
        Self { area, ordinal }
    }
}

#[derive(Debug, Clone)]
pub struct IdStack {
    stack: SmallVec<[AreaId; 16]>,
    generation: u32,
}

impl Default for IdStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IdStack {
    pub fn new() -> Self {
        let mut stack = SmallVec::new();
        stack.push(AreaId::ROOT);
        Self {
            stack,
            generation: 0,
        }
    }

    /// Back to a lone root entry. The generation counter restarts too, which
    /// is what keeps area ids stable from one frame to the next.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(AreaId::ROOT);
        self.generation = 0;
    }

    pub fn next(&mut self) -> Result<AreaId> {
        if self.stack.len() >= MAX_AREA_DEPTH {
            log::error!("area stack overflow at depth {}", self.stack.len());
            return Err(GuiError::AreaDepthExceeded {
                limit: MAX_AREA_DEPTH,
            });
        }
        self.generation += 1;
        let id = AreaId(self.generation);
        self.stack.push(id);
        Ok(id)
    }

    /// Pops to the parent. No-op at root.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn current(&self) -> AreaId {
        self.stack.last().copied().unwrap_or(AreaId::ROOT)
    }

    /// Number of entries, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = AreaId> + '_ {
        self.stack.iter().copied()
    }
}
