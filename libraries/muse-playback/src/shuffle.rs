//! Shuffle for playlist ordering
//!
//! Produces a uniform random permutation (Fisher-Yates). The permutation is
//! computed once and becomes the playlist's physical order; there is no
//! per-call re-randomization and no shadow copy of the pre-shuffle order.

use muse_core::types::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle tracks in place.
///
/// Each track has equal probability of appearing at any position.
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    tracks.shuffle(&mut rng);
}

/// Return a uniformly shuffled copy of the given tracks.
pub fn shuffled(tracks: &[Track]) -> Vec<Track> {
    let mut copy = tracks.to_vec();
    shuffle_tracks(&mut copy);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn create_test_track(id: &str, title: &str) -> Track {
        let mut track = Track::new(title, format!("music/{}.mp3", id));
        track.id = muse_core::TrackId::new(id);
        track
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut tracks = vec![
            create_test_track("1", "Track 1"),
            create_test_track("2", "Track 2"),
            create_test_track("3", "Track 3"),
        ];

        shuffle_tracks(&mut tracks);

        let ids: HashSet<String> = tracks.iter().map(|t| t.id.as_str().to_string()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("1"));
        assert!(ids.contains("2"));
        assert!(ids.contains("3"));
    }

    #[test]
    fn shuffle_changes_order() {
        let tracks: Vec<Track> = (0..10)
            .map(|i| create_test_track(&i.to_string(), &format!("Track {}", i)))
            .collect();

        let original: Vec<String> = tracks.iter().map(|t| t.id.to_string()).collect();
        let shuffled = shuffled(&tracks);
        let new_order: Vec<String> = shuffled.iter().map(|t| t.id.to_string()).collect();

        // Very unlikely to be in same order (probability: 1/10!)
        // If this fails occasionally, it's just bad luck, not a bug
        assert_ne!(original, new_order);
    }

    #[test]
    fn shuffled_leaves_input_untouched() {
        let tracks = vec![
            create_test_track("1", "Track 1"),
            create_test_track("2", "Track 2"),
        ];

        let _ = shuffled(&tracks);
        assert_eq!(tracks[0].id.as_str(), "1");
        assert_eq!(tracks[1].id.as_str(), "2");
    }
}
