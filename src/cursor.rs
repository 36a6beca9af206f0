//! Navigable cursor over the active pace note list.
//!
//! The cursor is either empty (no list, or an empty list) or positioned on a
//! valid index. Every transition that changes the list or the position
//! delivers exactly one [`CursorSnapshot`] to every subscriber; boundary
//! moves are no-ops and deliver nothing.
//!
//! One writer, many readers: state and subscriber channels sit behind the
//! same read/write lock, and updates are queued while the write lock is still
//! held. Subscribers observe transitions in the order they were applied and
//! never see a torn `(notes, position)` pair.

use futures::stream::{self, Stream};
use parking_lot::RwLock;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::models::{CursorSnapshot, PaceNote};

#[derive(Debug, Default)]
struct CursorState {
    notes: Vec<PaceNote>,
    position: Option<usize>,
    subscribers: Vec<mpsc::UnboundedSender<CursorSnapshot>>,
}

impl CursorState {
    fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            total: self.notes.len(),
            note: self.current().cloned(),
        }
    }

    fn current(&self) -> Option<&PaceNote> {
        self.position.and_then(|i| self.notes.get(i))
    }

    /// Queue the current state for every subscriber, forgetting the ones
    /// that went away.
    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }

    fn step(&mut self, forward: bool) -> bool {
        let next = match self.position {
            Some(i) if forward && i + 1 < self.notes.len() => i + 1,
            Some(i) if !forward && i > 0 => i - 1,
            _ => return false,
        };
        self.position = Some(next);
        self.publish();
        true
    }
}

pub struct NoteCursor {
    state: RwLock<CursorState>,
}

impl NoteCursor {
    /// Create a cursor positioned on the first of `notes`, or empty.
    pub fn new(notes: Vec<PaceNote>) -> Self {
        let position = if notes.is_empty() { None } else { Some(0) };
        Self {
            state: RwLock::new(CursorState {
                notes,
                position,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Install a new list and move to its head. Always publishes an update.
    pub fn replace_list(&self, notes: Vec<PaceNote>) {
        let mut state = self.state.write();
        state.position = if notes.is_empty() { None } else { Some(0) };
        state.notes = notes;
        state.publish();
    }

    /// Move to the next note. Returns `false` at the last note or when empty.
    pub fn advance(&self) -> bool {
        self.state.write().step(true)
    }

    /// Move to the previous note. Returns `false` at the first note or when empty.
    pub fn retreat(&self) -> bool {
        self.state.write().step(false)
    }

    /// Like [`advance`](Self::advance), also returning the state the move left
    /// behind, read under the same lock.
    pub fn advance_with_snapshot(&self) -> (bool, CursorSnapshot) {
        let mut state = self.state.write();
        let moved = state.step(true);
        (moved, state.snapshot())
    }

    pub fn retreat_with_snapshot(&self) -> (bool, CursorSnapshot) {
        let mut state = self.state.write();
        let moved = state.step(false);
        (moved, state.snapshot())
    }

    pub fn current(&self) -> Option<PaceNote> {
        self.state.read().current().cloned()
    }

    /// Distance of the current note as text, or an empty string.
    pub fn current_note_spoken_text(&self) -> String {
        self.state
            .read()
            .current()
            .map(PaceNote::spoken_text)
            .unwrap_or_default()
    }

    pub fn position(&self) -> Option<usize> {
        self.state.read().position
    }

    pub fn len(&self) -> usize {
        self.state.read().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().notes.is_empty()
    }

    pub fn notes(&self) -> Vec<PaceNote> {
        self.state.read().notes.clone()
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        self.state.read().snapshot()
    }

    /// Subscribe to cursor updates. The current state is delivered first.
    pub fn subscribe(&self) -> CursorSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.state.write();
        state.subscribers.push(sender);
        CursorSubscription {
            latest: Some(state.snapshot()),
            receiver,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state
            .read()
            .subscribers
            .iter()
            .filter(|subscriber| !subscriber.is_closed())
            .count()
    }
}

impl Default for NoteCursor {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for NoteCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("NoteCursor")
            .field("position", &state.position)
            .field("total", &state.notes.len())
            .finish()
    }
}

/// Replay-latest view of a [`NoteCursor`].
///
/// Yields the state at subscription time first, then one snapshot per
/// transition. Dropping the subscription releases it.
pub struct CursorSubscription {
    latest: Option<CursorSnapshot>,
    receiver: mpsc::UnboundedReceiver<CursorSnapshot>,
}

impl CursorSubscription {
    /// Wait for the next snapshot. Returns `None` once the cursor is gone.
    pub async fn next(&mut self) -> Option<CursorSnapshot> {
        if let Some(snapshot) = self.latest.take() {
            return Some(snapshot);
        }
        self.receiver.recv().await
    }

    /// Take the next snapshot if one is already waiting.
    pub fn try_next(&mut self) -> Option<CursorSnapshot> {
        if let Some(snapshot) = self.latest.take() {
            return Some(snapshot);
        }
        match self.receiver.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = CursorSnapshot> + Send + 'static {
        stream::unfold(self, |mut subscription| async move {
            subscription
                .next()
                .await
                .map(|snapshot| (snapshot, subscription))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes() -> Vec<PaceNote> {
        vec![PaceNote::new(6, "L", 100), PaceNote::new(4, "R", 50)]
    }

    #[test]
    fn test_new_positions_at_head() {
        let cursor = NoteCursor::new(notes());
        assert_eq!(cursor.position(), Some(0));
        assert_eq!(cursor.current(), Some(PaceNote::new(6, "L", 100)));
    }

    #[test]
    fn test_empty_has_no_position() {
        let cursor = NoteCursor::empty();
        assert_eq!(cursor.position(), None);
        assert!(!cursor.advance());
        assert!(!cursor.retreat());
        assert_eq!(cursor.current_note_spoken_text(), "");
    }

    #[test]
    fn test_subscribe_replays_latest() {
        let cursor = NoteCursor::new(notes());
        cursor.advance();

        let mut sub = cursor.subscribe();
        let first = sub.try_next().unwrap();
        assert_eq!(first.position, Some(1));
        assert_eq!(first.note, Some(PaceNote::new(4, "R", 50)));
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_boundary_moves_publish_nothing() {
        let cursor = NoteCursor::new(notes());
        let mut sub = cursor.subscribe();
        sub.try_next();

        assert!(!cursor.retreat());
        assert!(cursor.advance());
        assert!(!cursor.advance());

        assert_eq!(sub.try_next().map(|s| s.position), Some(Some(1)));
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_slow_subscriber_receives_every_transition() {
        let route: Vec<PaceNote> = (0..200).map(|n| PaceNote::new(n, "L", n)).collect();
        let cursor = NoteCursor::new(route);
        let mut sub = cursor.subscribe();
        sub.try_next();

        for _ in 0..100 {
            assert!(cursor.advance());
        }

        let positions: Vec<_> = std::iter::from_fn(|| sub.try_next())
            .map(|s| s.position)
            .collect();
        let expected: Vec<_> = (1..=100).map(Some).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_move_with_snapshot_reports_post_move_state() {
        let cursor = NoteCursor::new(notes());

        let (moved, snapshot) = cursor.advance_with_snapshot();
        assert!(moved);
        assert_eq!(snapshot, cursor.snapshot());
        assert_eq!(snapshot.position, Some(1));

        let (moved, snapshot) = cursor.advance_with_snapshot();
        assert!(!moved);
        assert_eq!(snapshot.position, Some(1));

        let (moved, snapshot) = cursor.retreat_with_snapshot();
        assert!(moved);
        assert_eq!(snapshot.note, Some(PaceNote::new(6, "L", 100)));
    }

    #[test]
    fn test_subscriber_count_drops_with_subscription() {
        let cursor = NoteCursor::empty();
        let sub = cursor.subscribe();
        assert_eq!(cursor.subscriber_count(), 1);
        drop(sub);
        assert_eq!(cursor.subscriber_count(), 0);
    }

    #[test]
    fn test_closed_subscribers_are_forgotten_on_publish() {
        let cursor = NoteCursor::new(notes());
        let kept = cursor.subscribe();
        drop(cursor.subscribe());

        cursor.advance();

        assert_eq!(cursor.state.read().subscribers.len(), 1);
        drop(kept);
    }
}
