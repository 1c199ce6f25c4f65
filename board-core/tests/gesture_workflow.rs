//! Gesture Workflow Tests
//!
//! Drives complete press-move-release sessions against a board:
//! - Drag, pan, resize and rotate commits
//! - Opposite-edge pinning and the size floor
//! - Mutual exclusion between sessions
//! - Targets deleted mid-gesture

use board_core::{
    Board, BoardError, Commit, ElementId, ElementKind, ElementPatch, GestureEngine, NewElement,
    Point, Position, ResizeHandle, Size, Viewport,
};

/// Board with one 200x100 note at (100, 100).
fn board_with_note() -> (Board, ElementId) {
    let mut board = Board::new();
    let element = board.create(
        NewElement::new(ElementKind::Note, "memory")
            .with_position(Position::new(100.0, 100.0))
            .with_size(Size::new(200.0, 100.0)),
    );
    (board, element.id)
}

fn resize(board: &mut Board, id: &ElementId, handle: ResizeHandle, dx: f64, dy: f64) -> Commit {
    let mut engine = GestureEngine::new();
    engine
        .begin_resize(board, id, handle, Point::new(0.0, 0.0))
        .expect("begin resize");
    engine.on_pointer_move(board, Point::new(dx, dy));
    engine.on_pointer_up(board).expect("commit")
}

// ============================================================================
// Drag
// ============================================================================

#[test]
fn test_drag_commits_start_plus_delta() {
    let (mut board, id) = board_with_note();
    let mut engine = GestureEngine::new();

    engine
        .begin_drag(&board, &id, Point::new(500.0, 500.0))
        .expect("begin");
    engine.on_pointer_move(&board, Point::new(520.0, 490.0));
    engine.on_pointer_move(&board, Point::new(540.0, 485.0));
    let commit = engine.on_pointer_up(&mut board).expect("commit");

    assert_eq!(
        commit,
        Commit::Element {
            id: id.clone(),
            patch: ElementPatch::position(Position::new(140.0, 85.0)),
        }
    );
    assert_eq!(
        board.get(&id).expect("exists").position,
        Position::new(140.0, 85.0)
    );
}

#[test]
fn test_drag_commit_uses_last_move() {
    let (mut board, id) = board_with_note();
    let mut engine = GestureEngine::new();

    engine.begin_drag(&board, &id, Point::default()).expect("begin");
    engine.on_pointer_move(&board, Point::new(300.0, 300.0));
    engine.on_pointer_move(&board, Point::new(-5.0, 7.0));
    engine.on_pointer_up(&mut board);

    assert_eq!(
        board.get(&id).expect("exists").position,
        Position::new(95.0, 107.0)
    );
}

// ============================================================================
// Pan
// ============================================================================

#[test]
fn test_pan_accumulates_incremental_deltas() {
    let mut board = Board::new();
    let mut engine = GestureEngine::new();

    engine.begin_pan(&board, Point::new(50.0, 50.0)).expect("begin");
    engine.on_pointer_move(&board, Point::new(55.0, 50.0));
    engine.on_pointer_move(&board, Point::new(58.0, 52.0));
    let commit = engine.on_pointer_up(&mut board).expect("commit");

    let expected = Viewport::new(8.0, 2.0, 1.0);
    assert_eq!(commit, Commit::Viewport(expected));
    assert_eq!(board.viewport(), expected);
}

#[test]
fn test_pan_leaves_scale_alone() {
    let mut board = Board::new();
    board.set_viewport(Viewport::new(0.0, 0.0, 2.5));
    let mut engine = GestureEngine::new();

    engine.begin_pan(&board, Point::default()).expect("begin");
    engine.on_pointer_move(&board, Point::new(-10.0, 4.0));
    engine.on_pointer_up(&mut board);

    assert_eq!(board.viewport(), Viewport::new(-10.0, 4.0, 2.5));
}

#[test]
fn test_pan_preview_does_not_write_viewport() {
    let mut board = Board::new();
    let mut engine = GestureEngine::new();

    engine.begin_pan(&board, Point::default()).expect("begin");
    engine.on_pointer_move(&board, Point::new(30.0, 30.0));
    assert_eq!(board.viewport(), Viewport::default());
    engine.on_pointer_up(&mut board);
    assert_eq!(board.viewport(), Viewport::new(30.0, 30.0, 1.0));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_se_pins_top_left() {
    let (mut board, id) = board_with_note();
    resize(&mut board, &id, ResizeHandle::Se, 40.0, 25.0);

    let element = board.get(&id).expect("exists");
    assert_eq!(element.position, Position::new(100.0, 100.0));
    assert_eq!(element.size, Size::new(240.0, 125.0));
}

#[test]
fn test_resize_nw_pins_bottom_right() {
    let (mut board, id) = board_with_note();
    let before = board.get(&id).expect("exists").rect().far_corner();

    resize(&mut board, &id, ResizeHandle::Nw, 30.0, -20.0);

    let element = board.get(&id).expect("exists");
    assert_eq!(element.size, Size::new(170.0, 120.0));
    assert_eq!(element.position, Position::new(130.0, 80.0));
    assert_eq!(element.rect().far_corner(), before);
}

#[test]
fn test_resize_floor_applies_to_every_handle() {
    for handle in ResizeHandle::ALL {
        let (mut board, id) = board_with_note();
        let far = if handle.width_sign() < 0.0 { 1.0e4 } else { -1.0e4 };
        let down = if handle.height_sign() < 0.0 { 1.0e4 } else { -1.0e4 };
        resize(&mut board, &id, handle, far, down);

        let size = board.get(&id).expect("exists").size;
        assert!(size.width >= 50.0, "{handle}: width {}", size.width);
        assert!(size.height >= 50.0, "{handle}: height {}", size.height);
    }
}

#[test]
fn test_resize_edge_handle_changes_one_dimension() {
    let (mut board, id) = board_with_note();
    resize(&mut board, &id, ResizeHandle::E, 60.0, 999.0);

    let element = board.get(&id).expect("exists");
    assert_eq!(element.size, Size::new(260.0, 100.0));
    assert_eq!(element.position, Position::new(100.0, 100.0));
}

#[test]
fn test_resize_commit_is_single_bounds_patch() {
    let (mut board, id) = board_with_note();
    let commit = resize(&mut board, &id, ResizeHandle::N, 0.0, 10.0);
    assert_eq!(
        commit,
        Commit::Element {
            id,
            patch: ElementPatch::bounds(Position::new(100.0, 110.0), Size::new(200.0, 90.0)),
        }
    );
}

// ============================================================================
// Rotate
// ============================================================================

#[test]
fn test_rotate_follows_absolute_pointer_angle() {
    let (mut board, id) = board_with_note();
    // Center at (200, 150).
    let mut engine = GestureEngine::new();
    engine
        .begin_rotate(&board, &id, Point::new(200.0, 100.0))
        .expect("begin");
    engine.on_pointer_move(&board, Point::new(300.0, 150.0));
    engine.on_pointer_move(&board, Point::new(100.0, 150.0));
    engine.on_pointer_up(&mut board);

    let rotation = board.get(&id).expect("exists").rotation;
    assert!((rotation - 270.0).abs() < 1e-9, "rotation {rotation}");
}

#[test]
fn test_rotate_full_circle_returns_to_same_value() {
    let (mut board, id) = board_with_note();
    let center = Point::new(200.0, 150.0);
    let mut engine = GestureEngine::new();
    engine.begin_rotate(&board, &id, center).expect("begin");

    let first = Point::new(center.x + 40.0, center.y - 10.0);
    engine.on_pointer_move(&board, first);
    for step in 1..=36 {
        let a = f64::from(step) * 10.0_f64.to_radians();
        let (dx, dy) = (40.0, -10.0);
        let (s, c) = a.sin_cos();
        engine.on_pointer_move(
            &board,
            Point::new(center.x + dx * c - dy * s, center.y + dx * s + dy * c),
        );
    }
    engine.on_pointer_up(&mut board);

    let mut reference = GestureEngine::new();
    let (mut other, other_id) = board_with_note();
    reference.begin_rotate(&other, &other_id, center).expect("begin");
    reference.on_pointer_move(&other, first);
    reference.on_pointer_up(&mut other);

    let a = board.get(&id).expect("exists").rotation;
    let b = other.get(&other_id).expect("exists").rotation;
    assert!((0.0..360.0).contains(&a));
    let diff = (a - b).abs();
    assert!(diff < 1e-6 || (360.0 - diff) < 1e-6, "{a} vs {b}");
}

// ============================================================================
// Mutual exclusion and aborts
// ============================================================================

#[test]
fn test_drag_during_resize_is_rejected() {
    let mut board = Board::new();
    let a = board.create(NewElement::new(ElementKind::Note, "a"));
    let b = board.create(NewElement::new(ElementKind::Note, "b"));

    let mut engine = GestureEngine::new();
    engine
        .begin_resize(&board, &a.id, ResizeHandle::Se, Point::default())
        .expect("begin");

    for target in [&a.id, &b.id] {
        let result = engine.begin_drag(&board, target, Point::default());
        assert!(matches!(result, Err(BoardError::GestureActive("resize"))));
    }

    engine.on_pointer_move(&board, Point::new(10.0, 10.0));
    let commits = (0..2)
        .filter_map(|_| engine.on_pointer_up(&mut board))
        .count();
    assert_eq!(commits, 1);
    assert_eq!(
        board.get(&b.id).expect("exists").position,
        Position::default()
    );
}

#[test]
fn test_vanished_target_produces_no_write() {
    let (mut board, id) = board_with_note();
    let other = board.create(NewElement::new(ElementKind::Sticker, "❤️"));
    let snapshot: Vec<_> = board.elements().cloned().collect();

    let mut engine = GestureEngine::new();
    engine.begin_drag(&board, &id, Point::default()).expect("begin");
    engine.on_pointer_move(&board, Point::new(10.0, 10.0));
    board.delete(&id);

    assert!(engine.on_pointer_up(&mut board).is_none());
    assert!(!engine.is_active());
    assert_eq!(board.get(&other.id), snapshot.last());
}

#[test]
fn test_vanished_target_aborts_on_move() {
    let (mut board, id) = board_with_note();
    let mut engine = GestureEngine::new();
    engine
        .begin_resize(&board, &id, ResizeHandle::S, Point::default())
        .expect("begin");
    board.delete(&id);

    assert!(engine.on_pointer_move(&board, Point::new(1.0, 1.0)).is_none());
    assert!(!engine.is_active());
    engine.begin_pan(&board, Point::default()).expect("engine is idle again");
}

#[test]
fn test_gestures_ignore_element_kind() {
    let mut board = Board::new();
    let element = board.create(
        NewElement::new(ElementKind::from("hologram"), "")
            .with_position(Position::new(0.0, 0.0))
            .with_size(Size::new(80.0, 80.0)),
    );
    let mut engine = GestureEngine::new();
    engine
        .begin_drag(&board, &element.id, Point::default())
        .expect("begin");
    engine.on_pointer_move(&board, Point::new(12.0, 0.0));
    assert!(engine.on_pointer_up(&mut board).is_some());
    assert_eq!(
        board.get(&element.id).expect("exists").position,
        Position::new(12.0, 0.0)
    );
}
