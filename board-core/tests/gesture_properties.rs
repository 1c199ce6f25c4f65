//! Property tests for gesture and patch invariants.

use board_core::{
    normalize_degrees, Board, ElementKind, ElementPatch, ElementStyle, GestureEngine, NewElement,
    Point, Position, ResizeHandle, Size, Viewport,
};
use proptest::prelude::*;

fn arb_handle() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-5000.0f64..5000.0, -5000.0f64..5000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_size() -> impl Strategy<Value = Size> {
    (50.0f64..800.0, 50.0f64..800.0).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn prop_resize_never_undercuts_floor(
        handle in arb_handle(),
        size in arb_size(),
        moves in prop::collection::vec(arb_point(), 1..8),
        scale in 0.1f64..10.0,
    ) {
        let mut board = Board::new();
        board.set_viewport(Viewport::new(0.0, 0.0, scale));
        let id = board
            .create(NewElement::new(ElementKind::Note, "").with_size(size))
            .id;

        let mut engine = GestureEngine::new();
        engine.begin_resize(&board, &id, handle, Point::default()).expect("begin");
        for point in moves {
            engine.on_pointer_move(&board, point);
        }
        engine.on_pointer_up(&mut board);

        let size = board.get(&id).expect("exists").size;
        prop_assert!(size.width >= 50.0, "width {}", size.width);
        prop_assert!(size.height >= 50.0, "height {}", size.height);
    }

    #[test]
    fn prop_resize_pins_opposite_edges(
        handle in arb_handle(),
        size in arb_size(),
        end in arb_point(),
    ) {
        let mut board = Board::new();
        let id = board
            .create(
                NewElement::new(ElementKind::Note, "")
                    .with_position(Position::new(100.0, 100.0))
                    .with_size(size),
            )
            .id;
        let before = board.get(&id).expect("exists").rect();

        let mut engine = GestureEngine::new();
        engine.begin_resize(&board, &id, handle, Point::default()).expect("begin");
        engine.on_pointer_move(&board, end);
        engine.on_pointer_up(&mut board);
        let after = board.get(&id).expect("exists").rect();

        if handle.moves_left_edge() {
            prop_assert!((after.far_corner().x - before.far_corner().x).abs() < 1e-6);
        } else {
            prop_assert!((after.origin.x - before.origin.x).abs() < 1e-9);
        }
        if handle.moves_top_edge() {
            prop_assert!((after.far_corner().y - before.far_corner().y).abs() < 1e-6);
        } else {
            prop_assert!((after.origin.y - before.origin.y).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_rotation_is_normalized(
        start in arb_point(),
        moves in prop::collection::vec(arb_point(), 1..8),
    ) {
        let mut board = Board::new();
        let id = board.create(NewElement::new(ElementKind::Sticker, "🌟")).id;

        let mut engine = GestureEngine::new();
        engine.begin_rotate(&board, &id, start).expect("begin");
        for point in moves {
            engine.on_pointer_move(&board, point);
        }
        engine.on_pointer_up(&mut board);

        let rotation = board.get(&id).expect("exists").rotation;
        prop_assert!((0.0..360.0).contains(&rotation), "rotation {}", rotation);
    }

    #[test]
    fn prop_normalize_degrees_in_range(degrees in -1.0e6f64..1.0e6) {
        let n = normalize_degrees(degrees);
        prop_assert!((0.0..360.0).contains(&n), "{} -> {}", degrees, n);
    }

    #[test]
    fn prop_drag_at_unit_scale_is_start_plus_delta(
        start in arb_point(),
        end in arb_point(),
    ) {
        let mut board = Board::new();
        let id = board
            .create(NewElement::new(ElementKind::Note, "").with_position(Position::new(100.0, 100.0)))
            .id;

        let mut engine = GestureEngine::new();
        engine.begin_drag(&board, &id, start).expect("begin");
        engine.on_pointer_move(&board, end);
        engine.on_pointer_up(&mut board);

        let position = board.get(&id).expect("exists").position;
        prop_assert!((position.x - (100.0 + end.x - start.x)).abs() < 1e-6);
        prop_assert!((position.y - (100.0 + end.y - start.y)).abs() < 1e-6);
    }

    #[test]
    fn prop_style_merge_keeps_untouched_fields(
        font_size in 8.0f64..96.0,
        color in "#[0-9a-f]{6}",
        background in "#[0-9a-f]{6}",
    ) {
        let mut board = Board::new();
        let id = board
            .create(NewElement::new(ElementKind::Label, "label").with_style(ElementStyle {
                background_color: Some(background.clone()),
                font_size: Some(14.0),
                ..ElementStyle::default()
            }))
            .id;

        board.update(&id, ElementPatch {
            style: Some(ElementStyle {
                font_size: Some(font_size),
                color: Some(color.clone()),
                ..ElementStyle::default()
            }),
            ..ElementPatch::default()
        });

        let style = board.get(&id).expect("exists").style.clone().expect("style");
        prop_assert_eq!(style.background_color, Some(background));
        prop_assert_eq!(style.color, Some(color));
        prop_assert_eq!(style.font_size, Some(font_size));
    }
}
