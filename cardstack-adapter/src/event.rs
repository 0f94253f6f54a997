use crate::HandleId;

/// Notifications queued by a [`crate::StackController`], drained by the host once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackEvent {
    /// The card at `index` was removed, by a swipe or by the host.
    CardDismissed { index: usize },
    /// The last card was removed.
    AllCardsDismissed,
    ScrollToStarted { index: usize },
    /// A scroll-to animation reached its target. Not sent when a gesture interrupts it.
    ScrollToFinished { index: usize },
    /// `handle` now shows the card at `index`; the host should fill it with that card's content.
    CardBound { index: usize, handle: HandleId },
    /// `handle` went back to the pool. `index` is the position it last showed.
    CardUnbound { index: usize, handle: HandleId },
}
