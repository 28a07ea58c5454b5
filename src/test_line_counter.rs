use crate::config::{CounterConfig, UnmatchedPolicy};
use crate::crossing::CrossingDirection;
use crate::detection::Detection;
use crate::line_counter::LineCounter;
use crate::rect::Centroid;

/// 20x20 box centred on (cx, cy).
fn det_at(cx: i32, cy: i32, class_id: usize) -> Detection {
    Detection::from_xyxy(cx - 10, cy - 10, cx + 10, cy + 10, class_id)
}

#[test]
fn test_single_entry() {
    let mut counter = LineCounter::new(300);

    let first = counter.process_frame(&[det_at(100, 290, 4)]);
    assert!(first.events.is_empty());

    let second = counter.process_frame(&[det_at(100, 310, 4)]);
    assert_eq!(second.events.len(), 1);
    assert_eq!(second.events[0].direction, CrossingDirection::Entry);
    assert_eq!(second.events[0].track_id, 0);

    assert_eq!(counter.session().entry_count(4), 1);
    assert_eq!(counter.session().total_exits(), 0);
    assert_eq!(counter.session().net(), 1);
}

#[test]
fn test_single_exit() {
    let mut counter = LineCounter::new(300);
    counter.process_frame(&[det_at(100, 320, 2)]);
    counter.process_frame(&[det_at(100, 300, 2)]);

    assert_eq!(counter.session().exit_count(2), 1);
    assert_eq!(counter.session().net(), -1);
}

#[test]
fn test_oscillating_track_counts_once_per_direction() {
    let mut counter = LineCounter::new(300);
    for y in [290, 310, 290, 310, 290, 310, 290] {
        counter.process_frame(&[det_at(100, y, 1)]);
    }

    assert_eq!(counter.session().entry_count(1), 1);
    assert_eq!(counter.session().exit_count(1), 1);
    assert_eq!(counter.tracker().next_track_id(), 1);
}

#[test]
fn test_frame_without_detections_repeats_last_position() {
    let mut counter = LineCounter::new(300);
    counter.process_frame(&[det_at(100, 290, 0)]);
    counter.process_frame(&[]);

    let track = counter.tracker().get_track(0).unwrap();
    assert_eq!(
        track.get_trajectory().as_vec(),
        vec![Centroid::new(100, 290), Centroid::new(100, 290)]
    );
    assert_eq!(track.get_disappeared(), 1);
}

#[test]
fn test_counts_follow_class_at_crossing_time() {
    let mut counter = LineCounter::new(300);
    counter.process_frame(&[det_at(100, 280, 3)]);
    counter.process_frame(&[det_at(100, 305, 6)]);

    assert_eq!(counter.session().entry_count(6), 1);
    assert_eq!(counter.session().entry_count(3), 0);
}

#[test]
fn test_two_tracks_cross_independently() {
    let mut counter = LineCounter::new(300);
    counter.process_frame(&[det_at(100, 280, 4), det_at(600, 320, 3)]);
    let out = counter.process_frame(&[det_at(100, 302, 4), det_at(600, 298, 3)]);

    assert_eq!(out.events.len(), 2);
    assert_eq!(counter.session().entry_count(4), 1);
    assert_eq!(counter.session().exit_count(3), 1);
    assert_eq!(counter.session().net(), 0);
}

#[test]
fn test_new_track_after_retirement_counts_again() {
    let config = CounterConfig::default().with_max_disappeared(1);
    let mut counter = LineCounter::from_config(&config).unwrap();

    counter.process_frame(&[det_at(100, 290, 4)]);
    counter.process_frame(&[det_at(100, 310, 4)]);
    counter.process_frame(&[]);
    counter.process_frame(&[]);
    assert!(counter.tracker().is_empty());

    counter.process_frame(&[det_at(100, 290, 4)]);
    counter.process_frame(&[det_at(100, 310, 4)]);

    assert_eq!(counter.tracker().tracks().next().unwrap().get_track_id(), 1);
    assert_eq!(counter.session().entry_count(4), 2);
}

#[test]
fn test_reset_session_keeps_latches() {
    let mut counter = LineCounter::new(300);
    counter.process_frame(&[det_at(100, 290, 4)]);
    counter.process_frame(&[det_at(100, 310, 4)]);

    let previous = counter.reset_session();
    assert_eq!(previous.entry_count(4), 1);
    assert_eq!(counter.session().total_entries(), 0);

    counter.process_frame(&[det_at(100, 290, 4)]);
    counter.process_frame(&[det_at(100, 310, 4)]);
    assert_eq!(counter.session().total_entries(), 0);
    assert_eq!(counter.session().total_exits(), 1);
}

#[test]
fn test_frame_count_and_line() {
    let config = CounterConfig::default()
        .with_line_y(120)
        .with_unmatched_policy(UnmatchedPolicy::Independent);
    let mut counter = LineCounter::from_config(&config).unwrap();
    counter.process_frame(&[]);
    counter.process_frame(&[]);

    assert_eq!(counter.frame_count(), 2);
    assert_eq!(counter.counting_line().line_y, 120);
    assert_eq!(counter.tracker().unmatched_policy(), UnmatchedPolicy::Independent);
}

#[test]
fn test_from_config_rejects_invalid() {
    let config = CounterConfig::default().with_trajectory_capacity(0);
    assert!(LineCounter::from_config(&config).is_err());
}

#[test]
fn test_save_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut counter = LineCounter::new(300);
    counter.process_frame(&[det_at(100, 290, 4)]);
    counter.process_frame(&[det_at(100, 310, 4)]);

    let path = counter.save_session("video", dir.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("video_") && name.ends_with(".json"));

    let record = crate::session::SessionRecord::load(&path).unwrap();
    assert_eq!(record.entries.get(&4), Some(&1));
    assert_eq!(record.start, counter.session().start());
    assert_eq!(Some(record.end), counter.session().end());
}

#[test]
fn test_resume_from_saved_record() {
    let mut first = LineCounter::new(300);
    first.process_frame(&[det_at(100, 290, 4)]);
    first.process_frame(&[det_at(100, 310, 4)]);
    let record = first.snapshot("video");

    let session = crate::session::SessionAggregate::from_record(&record);
    let mut second = LineCounter::new(300).with_session(session);
    second.process_frame(&[det_at(300, 320, 5)]);
    second.process_frame(&[det_at(300, 295, 5)]);

    assert_eq!(second.session().entry_count(4), 1);
    assert_eq!(second.session().exit_count(5), 1);
    assert_eq!(second.session().start(), record.start);
}
