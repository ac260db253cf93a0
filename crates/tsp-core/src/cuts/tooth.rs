//! A simple-domino-parity tooth: a singleton root and a tour-consecutive body segment.

use crate::cuts::clique::Clique;

/// `handle` is always a singleton [`Clique`] holding the tooth's root node; `body` is the
/// tour segment `B` not containing the root. Kept as two separately-internable cliques
/// (rather than a `(Node, Clique)` pair) so a `ToothBank` can share bodies the same way a
/// `CliqueBank` shares handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tooth {
    pub handle: Clique,
    pub body: Clique,
}

impl Tooth {
    pub fn new(root_position: usize, body: Clique) -> Self {
        debug_assert!(
            !body.contains_pos(root_position),
            "tooth root must not lie in its own body"
        );
        Self {
            handle: Clique::singleton(root_position),
            body,
        }
    }

    pub fn root_position(&self) -> usize {
        self.handle.segments()[0].0
    }
}
