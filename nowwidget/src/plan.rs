//! Transition branch selection.
//!
//! Given the rendered and the incoming snapshot, exactly one of five
//! mutually exclusive animation sequences runs. Selection is a pure
//! function so the branch policy can be unit tested without a stage.

use nowmodel::TrackSnapshot;

/// The five transition sequences the overlay can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPlan {
    /// Nothing was displayed and a track arrived: slide the art up, then
    /// reveal both labels.
    Appear,
    /// The bottom label resolves to nothing: hide both labels, then slide
    /// the art down out of view.
    Disappear,
    /// Album or track identity changed: fade everything out, then fade the
    /// rebuilt art and labels back in.
    AlbumOrTrackChange,
    /// Only the artist changed: cycle the labels, leave the art alone.
    ArtistChange,
    /// Same identity, refreshed metadata: cycle the bottom label only.
    BottomRefresh,
}

/// Pick the transition to run.
///
/// `bottom_value` is the resolved bottom-label text for the incoming
/// snapshot (which field feeds it is a user setting).
///
/// The branches are evaluated in this literal order, first match wins. The
/// order is deliberately kept identical to the overlay's historical
/// behavior, including its overlap with the poll loop's change predicate
/// (e.g. a title-only change with the same album and track id falls through
/// to `BottomRefresh`); do not "unify" the conditions.
pub fn select_plan(
    current: &TrackSnapshot,
    incoming: &TrackSnapshot,
    bottom_value: &str,
) -> TransitionPlan {
    if current.title.is_empty() && !incoming.title.is_empty() {
        TransitionPlan::Appear
    } else if !current.title.is_empty() && bottom_value.is_empty() {
        TransitionPlan::Disappear
    } else if current.album != incoming.album
        || incoming.album.is_empty()
        || current.track_id != incoming.track_id
    {
        TransitionPlan::AlbumOrTrackChange
    } else if current.artist != incoming.artist {
        TransitionPlan::ArtistChange
    } else {
        TransitionPlan::BottomRefresh
    }
}
