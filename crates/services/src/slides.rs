use sco_core::model::cmi::SUSPEND_DATA;
use sco_core::{decode, encode};
use tracing::debug;

use crate::session::SessionManager;

/// Extension field set in the bookmark once the slide deck was reviewed.
pub const SLIDES_REVIEWED: &str = "slidesReviewed";

/// Soft completion marker for the slide viewer.
///
/// Merges `slidesReviewed: true` into the stored bookmark and commits. The
/// lesson status is left alone because the slide page is not the launch page.
pub fn mark_reviewed(session: &mut SessionManager) -> bool {
    let mut bookmark = decode(&session.get(SUSPEND_DATA));
    bookmark.insert_extra(SLIDES_REVIEWED, true);
    let saved = session.set(SUSPEND_DATA, encode(&bookmark));
    let committed = session.commit();
    debug!(saved, committed, "slides marked reviewed");
    saved && committed
}
