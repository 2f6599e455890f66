use alloc::{format, vec::Vec};

use super::*;
use crate::{input::queue::QueuedInput, render::LeafView};

/// Never yields; for tests that drive the viewer through its methods.
struct IdleInput;

impl InputProvider for IdleInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(None)
    }
}

struct ScriptedInput<'a> {
    events: &'a [InputEvent],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    const fn new(events: &'a [InputEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}

/// Fails on its first poll.
struct BrokenInput;

impl InputProvider for BrokenInput {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Err(())
    }
}

fn make_leaves(count: usize) -> LeafSequence {
    LeafSequence::from_pairs(
        (0..count).map(|index| (format!("front-{index}.png"), format!("back-{index}.png"))),
    )
}

fn autoplay_config(interval_ms: u32) -> ViewerConfig {
    ViewerConfig {
        autoplay: true,
        autoplay_interval_ms: interval_ms,
        ..ViewerConfig::default()
    }
}

fn queued_viewer(count: usize, config: ViewerConfig) -> ZineViewer<QueuedInput<8>> {
    let mut viewer = ZineViewer::new(make_leaves(count), QueuedInput::new(), config);
    viewer.mount(0);
    viewer
}

fn flipped_states<IN: InputProvider>(viewer: &ZineViewer<IN>) -> Vec<bool> {
    (0..viewer.leaf_count())
        .map(|ordinal| viewer.is_flipped(ordinal))
        .collect()
}

fn assert_affordances_match_position<IN: InputProvider>(viewer: &ZineViewer<IN>) {
    let affordances = viewer.affordances();
    assert_eq!(affordances.previous_disabled, viewer.position() == 0);
    assert_eq!(
        affordances.next_disabled,
        viewer.position() == viewer.leaf_count()
    );
}

/// Ticks every millisecond in `from..=to` and records when the position moved.
fn run_clock<IN: InputProvider>(
    viewer: &mut ZineViewer<IN>,
    from: u64,
    to: u64,
) -> Vec<(u64, usize)> {
    let mut moves = Vec::new();
    let mut last = viewer.position();
    for now in from..=to {
        let _ = viewer.tick(now);
        if viewer.position() != last {
            last = viewer.position();
            moves.push((now, last));
        }
    }
    moves
}

#[test]
fn three_leaf_walkthrough() {
    let mut viewer = ZineViewer::new(make_leaves(3), IdleInput, ViewerConfig::default());
    viewer.mount(0);

    assert_eq!(viewer.position(), 0);
    assert!(viewer.affordances().previous_disabled);
    assert!(!viewer.affordances().next_disabled);

    assert!(viewer.advance(10));
    assert_eq!(viewer.position(), 1);
    assert!(viewer.is_flipped(0));
    assert_affordances_match_position(&viewer);

    assert!(viewer.advance(20));
    assert_eq!(viewer.position(), 2);
    assert!(viewer.is_flipped(1));
    assert_affordances_match_position(&viewer);
    assert!(!viewer.affordances().previous_disabled);
    assert!(!viewer.affordances().next_disabled);

    assert!(viewer.retreat(30));
    assert_eq!(viewer.position(), 1);
    assert!(!viewer.is_flipped(1));
    assert!(viewer.is_flipped(0));
    assert_eq!(viewer.direction(), Direction::Backward);

    assert!(viewer.advance(40));
    assert!(viewer.advance(50));
    assert_eq!(viewer.position(), 3);
    assert!(viewer.affordances().next_disabled);
    assert!(!viewer.advance(60));
    assert_eq!(viewer.position(), 3);
}

#[test]
fn empty_book_is_inert() {
    let mut viewer = ZineViewer::new(LeafSequence::new(), IdleInput, ViewerConfig::default());
    viewer.mount(0);

    assert!(viewer.affordances().previous_disabled);
    assert!(viewer.affordances().next_disabled);
    assert!(!viewer.advance(1));
    assert!(!viewer.retreat(2));
    assert_eq!(viewer.position(), 0);
    assert!(viewer.draw_orders().is_empty());
}

#[test]
fn position_stays_in_bounds_for_any_walk() {
    for count in 0..6 {
        let mut viewer = ZineViewer::new(make_leaves(count), IdleInput, ViewerConfig::default());
        viewer.mount(0);

        let mut seed: u32 = 0x2545_f491 ^ count as u32;
        for step in 0..200u64 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (seed >> 16) & 1 == 0 {
                viewer.advance(step);
            } else {
                viewer.retreat(step);
            }
            assert!(viewer.position() <= count);
            assert_affordances_match_position(&viewer);
            assert_eq!(viewer.draw_orders().len(), count);
        }
    }
}

#[test]
fn advance_then_retreat_restores_flip_states() {
    let mut viewer = ZineViewer::new(make_leaves(5), IdleInput, ViewerConfig::default());
    viewer.mount(0);
    viewer.advance(0);
    viewer.advance(0);

    let before = flipped_states(&viewer);
    let forward_orders = viewer.draw_orders().to_vec();

    viewer.advance(0);
    viewer.retreat(0);

    assert_eq!(flipped_states(&viewer), before);
    // Same position, other rule set.
    assert_ne!(viewer.draw_orders(), forward_orders.as_slice());
}

#[test]
fn stack_is_recomputed_for_every_move() {
    let mut viewer = ZineViewer::new(make_leaves(4), IdleInput, ViewerConfig::default());
    viewer.mount(0);
    assert_eq!(viewer.draw_orders(), [5, 3, 2, 1]);

    viewer.advance(0);
    viewer.advance(0);
    assert_eq!(viewer.draw_orders(), [2, 3, 2, 1]);

    viewer.advance(0);
    viewer.retreat(0);
    assert_eq!(viewer.draw_orders(), [0, 1, 4, 1]);
    assert_eq!(viewer.draw_order(2), Some(4));
    assert_eq!(viewer.draw_order(9), None);
}

#[test]
fn view_exposes_per_leaf_state() {
    let mut viewer = ZineViewer::new(make_leaves(3), IdleInput, ViewerConfig::default());
    viewer.mount(0);
    viewer.advance(0);

    let mut seen = Vec::new();
    viewer.with_view(|view| {
        assert_eq!(view.leaf_count(), 3);
        assert_eq!(view.position, 1);
        assert_eq!(view.transition_ms, 1_000);
        seen.extend(
            view.leaves()
                .map(|leaf: LeafView<'_>| (leaf.ordinal(), leaf.flipped, leaf.draw_order)),
        );
    });

    assert_eq!(seen, [(0, true, 4), (1, false, 2), (2, false, 1)]);
}

#[test]
fn tick_requests_one_render_per_change() {
    let mut viewer = ZineViewer::new(make_leaves(2), IdleInput, ViewerConfig::default());
    viewer.mount(0);
    assert_eq!(viewer.tick(0), TickResult::RenderRequested);
    assert_eq!(viewer.tick(1), TickResult::NoRender);

    viewer.advance(10);
    assert_eq!(viewer.tick(10), TickResult::RenderRequested);
    assert_eq!(viewer.tick(500), TickResult::NoRender);
    assert_eq!(viewer.next_wakeup_ms(), None);
}

#[test]
fn autoplay_turns_every_interval_and_stops_at_back_cover() {
    let mut viewer = queued_viewer(3, autoplay_config(1_000));
    assert_eq!(viewer.next_wakeup_ms(), Some(1_000));

    let moves = run_clock(&mut viewer, 0, 6_000);

    assert_eq!(moves, [(1_000, 1), (2_000, 2), (3_000, 3)]);
    assert!(!viewer.autoplay_running());
    assert!(viewer.autoplay_enabled());
    assert_eq!(viewer.next_wakeup_ms(), None);
}

#[test]
fn hover_pauses_autoplay_and_resumes_on_a_fresh_interval() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    assert_eq!(run_clock(&mut viewer, 0, 1_499), [(1_000, 1)]);

    viewer.input_mut().push(InputEvent::HoverEnter).unwrap();
    assert!(run_clock(&mut viewer, 1_500, 4_199).is_empty());
    assert!(!viewer.autoplay_running());

    viewer.input_mut().push(InputEvent::HoverLeave).unwrap();
    let moves = run_clock(&mut viewer, 4_200, 6_300);
    assert_eq!(moves, [(5_200, 2), (6_200, 3)]);
}

#[test]
fn hover_leave_without_autoplay_starts_nothing() {
    let mut viewer = queued_viewer(3, ViewerConfig::default());
    viewer.hover_enter();
    viewer.hover_leave(100);
    assert!(!viewer.autoplay_running());
    assert!(run_clock(&mut viewer, 0, 5_000).is_empty());
}

#[test]
fn manual_navigation_resets_the_autoplay_interval() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    assert!(run_clock(&mut viewer, 0, 899).is_empty());

    viewer.input_mut().push(InputEvent::NextPressed).unwrap();
    assert_eq!(run_clock(&mut viewer, 900, 900), [(900, 1)]);
    assert_eq!(viewer.next_wakeup_ms(), Some(1_900));

    assert!(run_clock(&mut viewer, 901, 1_899).is_empty());
    assert_eq!(run_clock(&mut viewer, 1_900, 1_900), [(1_900, 2)]);

    viewer.retreat(2_400);
    assert_eq!(viewer.position(), 1);
    assert_eq!(viewer.next_wakeup_ms(), Some(3_400));
}

#[test]
fn manual_move_while_hovered_keeps_autoplay_paused() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    viewer.hover_enter();
    viewer.advance(200);

    assert_eq!(viewer.position(), 1);
    assert!(!viewer.autoplay_running());
}

#[test]
fn changing_the_interval_restarts_autoplay() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    viewer.set_autoplay_interval(300, 500);

    assert_eq!(viewer.autoplay_interval_ms(), 300);
    assert_eq!(viewer.next_wakeup_ms(), Some(800));
    assert_eq!(run_clock(&mut viewer, 500, 1_150), [(800, 1), (1_100, 2)]);
}

#[test]
fn interval_change_while_disabled_only_stores_it() {
    let mut viewer = queued_viewer(5, ViewerConfig::default());
    viewer.set_autoplay_interval(300, 0);

    assert!(!viewer.autoplay_running());
    viewer.enable_autoplay(viewer.autoplay_interval_ms(), 1_000);
    assert_eq!(viewer.next_wakeup_ms(), Some(1_300));
}

#[test]
fn disabling_autoplay_cancels_the_pending_fire() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    viewer.disable_autoplay();
    viewer.disable_autoplay();

    assert!(!viewer.autoplay_running());
    assert!(run_clock(&mut viewer, 0, 3_000).is_empty());
}

#[test]
fn autoplay_at_back_cover_waits_for_a_retreat() {
    let mut viewer = queued_viewer(2, ViewerConfig::default());
    viewer.advance(0);
    viewer.advance(0);

    viewer.enable_autoplay(500, 100);
    assert!(viewer.autoplay_enabled());
    assert!(!viewer.autoplay_running());

    viewer.retreat(200);
    assert_eq!(viewer.next_wakeup_ms(), Some(700));
    assert_eq!(run_clock(&mut viewer, 200, 2_000), [(700, 2)]);
}

#[test]
fn stalled_host_fires_once_and_counts_from_now() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));

    let _ = viewer.tick(3_500);
    assert_eq!(viewer.position(), 1);
    assert_eq!(viewer.next_wakeup_ms(), Some(4_500));

    let _ = viewer.tick(4_600);
    assert_eq!(viewer.position(), 2);
    // A late tick inside the interval keeps the cadence.
    assert_eq!(viewer.next_wakeup_ms(), Some(5_500));
}

#[test]
fn teardown_releases_the_timer() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    viewer.teardown();

    assert!(!viewer.autoplay_enabled());
    assert_eq!(viewer.next_wakeup_ms(), None);
    assert!(run_clock(&mut viewer, 0, 5_000).is_empty());
}

#[test]
fn input_after_teardown_schedules_nothing() {
    let mut viewer = queued_viewer(5, autoplay_config(1_000));
    viewer.teardown();

    viewer.enable_autoplay(500, 100);
    viewer.set_autoplay_interval(250, 100);
    viewer.hover_leave(100);
    viewer.input_mut().push(InputEvent::NextPressed).unwrap();
    viewer.input_mut().push(InputEvent::HoverLeave).unwrap();

    assert_eq!(viewer.tick(100), TickResult::NoRender);
    assert!(viewer.is_torn_down());
    assert_eq!(viewer.position(), 0);
    assert!(!viewer.autoplay_enabled());
    assert_eq!(viewer.next_wakeup_delay_ms(100), None);
    assert_eq!(viewer.key_disposition(true), EventDisposition::Ignored);
    assert!(run_clock(&mut viewer, 100, 3_000).is_empty());
}

#[test]
fn wakeup_delay_counts_down_to_the_deadline() {
    let mut viewer = queued_viewer(3, autoplay_config(1_000));

    assert_eq!(viewer.next_wakeup_delay_ms(0), Some(1_000));
    assert_eq!(viewer.next_wakeup_delay_ms(400), Some(600));
    assert_eq!(viewer.next_wakeup_delay_ms(1_200), Some(0));

    viewer.disable_autoplay();
    assert_eq!(viewer.next_wakeup_delay_ms(1_200), None);
}

#[test]
fn arrow_keys_navigate_globally_by_default() {
    let mut viewer = queued_viewer(3, ViewerConfig::default());

    let right = InputEvent::Key {
        key: NavKey::ArrowRight,
        viewer_focused: false,
    };
    let left = InputEvent::Key {
        key: NavKey::ArrowLeft,
        viewer_focused: false,
    };
    assert_eq!(viewer.handle_event(right, 0), EventDisposition::Handled);
    assert_eq!(viewer.handle_event(right, 0), EventDisposition::Handled);
    assert_eq!(viewer.handle_event(left, 0), EventDisposition::Handled);
    assert_eq!(viewer.position(), 1);
}

#[test]
fn focus_only_keyboard_ignores_unfocused_keys() {
    let config = ViewerConfig {
        keyboard_navigation_focus_only: true,
        ..ViewerConfig::default()
    };
    let mut viewer = queued_viewer(3, config);

    let unfocused = InputEvent::Key {
        key: NavKey::ArrowRight,
        viewer_focused: false,
    };
    assert_eq!(viewer.key_disposition(false), EventDisposition::Ignored);
    assert_eq!(viewer.handle_event(unfocused, 0), EventDisposition::Ignored);
    assert_eq!(viewer.position(), 0);

    let focused = InputEvent::Key {
        key: NavKey::ArrowRight,
        viewer_focused: true,
    };
    assert_eq!(viewer.handle_event(focused, 0), EventDisposition::Handled);
    assert_eq!(viewer.position(), 1);
}

#[test]
fn disabled_keyboard_ignores_every_key() {
    let config = ViewerConfig {
        keyboard_navigation: false,
        ..ViewerConfig::default()
    };
    let mut viewer = queued_viewer(3, config);

    assert_eq!(viewer.key_disposition(true), EventDisposition::Ignored);
    let focused = InputEvent::Key {
        key: NavKey::ArrowRight,
        viewer_focused: true,
    };
    assert_eq!(viewer.handle_event(focused, 0), EventDisposition::Ignored);
    assert_eq!(viewer.position(), 0);
}

#[test]
fn ignored_key_does_not_reset_autoplay() {
    let config = ViewerConfig {
        keyboard_navigation_focus_only: true,
        ..autoplay_config(1_000)
    };
    let mut viewer = queued_viewer(3, config);

    let unfocused = InputEvent::Key {
        key: NavKey::ArrowLeft,
        viewer_focused: false,
    };
    viewer.handle_event(unfocused, 600);
    assert_eq!(viewer.next_wakeup_ms(), Some(1_000));
}

#[test]
fn pointer_presses_at_bounds_are_handled_no_ops() {
    let mut viewer = queued_viewer(1, ViewerConfig::default());

    assert_eq!(
        viewer.handle_event(InputEvent::PreviousPressed, 0),
        EventDisposition::Handled
    );
    assert_eq!(viewer.position(), 0);

    viewer.handle_event(InputEvent::NextPressed, 0);
    viewer.handle_event(InputEvent::NextPressed, 0);
    assert_eq!(viewer.position(), 1);
}

#[test]
fn scripted_inputs_apply_in_arrival_order() {
    let events = [
        InputEvent::NextPressed,
        InputEvent::NextPressed,
        InputEvent::PreviousPressed,
        InputEvent::NextPressed,
    ];
    let mut viewer = ZineViewer::new(
        make_leaves(4),
        ScriptedInput::new(&events),
        ViewerConfig::default(),
    );
    viewer.mount(0);

    assert_eq!(viewer.tick(0), TickResult::RenderRequested);
    assert_eq!(viewer.position(), 2);
    assert_eq!(viewer.direction(), Direction::Forward);
}

#[test]
fn failing_provider_does_not_stall_autoplay() {
    let mut viewer = ZineViewer::new(make_leaves(2), BrokenInput, autoplay_config(500));
    viewer.mount(0);

    let _ = viewer.tick(500);
    assert_eq!(viewer.position(), 1);
}
