//! Simulated window/frame hierarchy for locating the host object.

use std::fmt;
use std::sync::Arc;

use sco_core::Window;

use crate::api::SharedHostApi;

/// Index of a window inside a [`FrameTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({})", self.0)
    }
}

struct Frame {
    parent: Option<FrameId>,
    opener: Option<FrameId>,
    api: Option<SharedHostApi>,
}

/// Arena of windows linked by parent and opener references.
///
/// Build the tree, wrap it in an `Arc`, then hand out [`FrameRef`]s.
/// Top-level windows are their own parent, like a browser's `window.top`.
#[derive(Default)]
pub struct FrameTree {
    frames: Vec<Frame>,
}

impl FrameTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level window.
    pub fn add_top(&mut self) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            parent: Some(id),
            opener: None,
            api: None,
        });
        id
    }

    /// Adds a frame nested inside `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: FrameId) -> FrameId {
        assert!(parent.0 < self.frames.len(), "unknown parent {parent:?}");
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            parent: Some(parent),
            opener: None,
            api: None,
        });
        id
    }

    /// Adds a chain of `depth` nested frames under `parent`; returns the innermost.
    pub fn add_nested(&mut self, parent: FrameId, depth: usize) -> FrameId {
        (0..depth).fold(parent, |outer, _| self.add_child(outer))
    }

    /// Redirects `frame`'s parent link, e.g. to build a cycle.
    pub fn set_parent(&mut self, frame: FrameId, parent: Option<FrameId>) {
        self.frames[frame.0].parent = parent;
    }

    /// Marks `frame` as a popup spawned by `opener`.
    pub fn set_opener(&mut self, frame: FrameId, opener: FrameId) {
        self.frames[frame.0].opener = Some(opener);
    }

    /// Exposes the host protocol object on `frame`.
    pub fn attach_api(&mut self, frame: FrameId, api: SharedHostApi) {
        self.frames[frame.0].api = Some(api);
    }

    #[must_use]
    pub fn window(self: &Arc<Self>, id: FrameId) -> FrameRef {
        FrameRef {
            tree: Arc::clone(self),
            id,
        }
    }
}

/// A handle to one window of a shared [`FrameTree`].
#[derive(Clone)]
pub struct FrameRef {
    tree: Arc<FrameTree>,
    id: FrameId,
}

impl FrameRef {
    fn frame(&self) -> &Frame {
        &self.tree.frames[self.id.0]
    }

    fn sibling(&self, id: FrameId) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            id,
        }
    }
}

impl fmt::Debug for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRef").field("id", &self.id).finish()
    }
}

impl Window for FrameRef {
    type Api = SharedHostApi;

    fn api(&self) -> Option<Self::Api> {
        self.frame().api.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.frame().parent.map(|id| self.sibling(id))
    }

    fn opener(&self) -> Option<Self> {
        self.frame().opener.map(|id| self.sibling(id))
    }

    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.id == other.id
    }
}
