//! Identifier assignment for newly submitted events.

use crate::event::Event;
use etrack_uid::Uid;

/// Stamps identifiers onto a batch of newly submitted events, in place.
///
/// Every event gets a freshly generated identifier unconditionally: a
/// client-supplied identifier on a *new* event is never kept. Each attached
/// note keeps its identifier only when it is already well formed under the
/// canonical code shape; anything else (missing, wrong length, bad alphabet)
/// is overwritten with a fresh code. Generation cannot fail, so neither can
/// assignment.
///
/// Callers needing the pre-assignment form must copy first.
pub fn assign_uids(events: &mut [Event]) {
    for event in events.iter_mut() {
        event.uid = Uid::generate().into();

        for note in event.notes.iter_mut() {
            if !Uid::is_valid(&note.uid) {
                note.uid = Uid::generate().into();
            }
        }
    }
}
