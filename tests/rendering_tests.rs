//! Painting-free rendering of engine snapshots: column buffers and minimap
//! frames built from a live `GameState`.

use delve::{
    EngineConfig, GameState, Grid, LightSettings, MiniMapProjector, Notifiers, Overlay,
    PlayerInput, Pose, Position, ProjectionRenderer, Turn, Viewport, MINIMAP_FLOOR,
};

fn corridor() -> GameState {
    let grid = Grid::from_rows(&["########", "#......#", "########"]).unwrap();
    GameState::with_grid(
        grid,
        Pose::centered_in(Position::new(1, 1), 0.0),
        &EngineConfig::default(),
        Notifiers::silent(),
        Box::new(delve::game::test_support::ScriptedDice::new()),
    )
}

#[test]
fn test_generated_snapshot_renders_full_width() {
    let state = GameState::new(&EngineConfig::default(), Notifiers::silent());
    let snapshot = state.snapshot();
    assert!(matches!(snapshot.overlay, Overlay::None));

    let buffer = ProjectionRenderer::default().render(
        snapshot.grid,
        &snapshot.pose,
        Viewport::new(960.0, 530.0),
        snapshot.lights,
    );
    assert_eq!(buffer.columns.len(), 240);
    for column in &buffer.columns {
        assert!(column.height <= 530.0);
        assert!(column.top >= 0.0);
    }

    let frame = MiniMapProjector::default().project(snapshot.grid, &snapshot.pose);
    assert_eq!(frame.cells.len(), state.grid().width() * state.grid().height());
    assert_eq!(
        frame.cells.iter().filter(|cell| cell.color == MINIMAP_FLOOR).count(),
        state.grid().floor_count()
    );
}

#[test]
fn test_walking_toward_wall_grows_center_slice() {
    let mut state = corridor();
    let renderer = ProjectionRenderer::default();
    let viewport = Viewport::new(400.0, 300.0);
    let center_height = |state: &GameState| {
        let snapshot = state.snapshot();
        let buffer = renderer.render(snapshot.grid, &snapshot.pose, viewport, snapshot.lights);
        buffer.columns[buffer.columns.len() / 2].height
    };

    let far = center_height(&state);
    for _ in 0..4 {
        state.handle_input(PlayerInput::MoveForward);
    }
    let near = center_height(&state);
    assert!(near > far, "near {near} should exceed far {far}");
}

#[test]
fn test_torch_brightens_view() {
    let mut state = corridor();
    let renderer = ProjectionRenderer::default();
    let viewport = Viewport::new(200.0, 150.0);

    let dim = {
        let snapshot = state.snapshot();
        renderer.render(snapshot.grid, &snapshot.pose, viewport, LightSettings::new(0.0, 0.0))
    };
    state.handle_input(PlayerInput::AdjustTorch(0.3));
    let lit = {
        let snapshot = state.snapshot();
        renderer.render(snapshot.grid, &snapshot.pose, viewport, snapshot.lights)
    };

    for (dark, bright) in dim.columns.iter().zip(&lit.columns) {
        assert!(bright.shades.mid >= dark.shades.mid);
    }
}

#[test]
fn test_minimap_arrow_follows_heading() {
    let mut state = corridor();
    let projector = MiniMapProjector::default();

    let east = projector.project(state.grid(), &state.pose());
    state.handle_input(PlayerInput::Turn(Turn::QuickRight));
    let south = projector.project(state.grid(), &state.pose());

    assert_eq!(east.player, south.player);
    assert!(east.arrow[0].0 > east.player.0);
    assert!(south.arrow[0].1 > south.player.1);
}
