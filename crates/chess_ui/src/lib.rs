use std::collections::HashMap;

use bevy::{
    log::{debug, info, Level, LogPlugin},
    prelude::*,
    sprite::Anchor,
    window::{PresentMode, PrimaryWindow, WindowResolution},
};
use chess_core::{
    piece::{Color as ChessColor, PieceType as ChessPieceType},
    rules, Game, GameState, PieceId, Square,
};

const LOG_FILTER: &str = "wgpu=error,naga=warn,chess_core=debug,chess_ui=debug";

const SQUARE_Z: f32 = 0.0;
const HINT_Z: f32 = 0.5;
const PIECE_Z: f32 = 1.0;
const DRAG_Z: f32 = 2.0;

/// Look of the board and the window around it.
#[derive(Resource, Debug, Clone)]
pub struct BoardConfig {
    pub square_size: f32,
    pub light_square: Color,
    pub dark_square: Color,
    pub highlight: Color,
    pub window_title: String,
    pub font: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            square_size: 504.0 / 8.0,
            light_square: Color::rgb_u8(238, 238, 210),
            dark_square: Color::rgb_u8(118, 150, 86),
            highlight: Color::rgba(0.9, 0.8, 0.2, 0.45),
            window_title: "Chess Game".into(),
            font: "sedan-regular.ttf".into(),
        }
    }
}

impl BoardConfig {
    fn board_size(&self) -> f32 {
        8.0 * self.square_size
    }
}

#[derive(Default)]
pub struct ChessUiPlugin {
    pub config: BoardConfig,
}

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
enum Phase {
    #[default]
    Playing,
    GameOver,
}

#[derive(Resource, Default)]
struct ChessGame {
    game: Game,
}

/// The piece currently held by the pointer, if any.
#[derive(Resource, Default)]
struct DragState {
    active: Option<Drag>,
}

struct Drag {
    piece: PieceId,
    entity: Entity,
    origin: Vec3,
    offset: Vec2,
}

#[derive(Resource)]
struct ChessAssets {
    pieces: HashMap<(ChessColor, ChessPieceType), Handle<Image>>,
    font: Handle<Font>,
}

#[derive(Component)]
struct BoardSquare;

#[derive(Component)]
struct PieceSprite {
    id: PieceId,
}

#[derive(Component)]
struct MoveHint;

impl Plugin for ChessUiPlugin {
    fn build(&self, app: &mut App) {
        let board_size = self.config.board_size();

        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: self.config.window_title.clone(),
                        resolution: WindowResolution::new(board_size, board_size),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: LOG_FILTER.into(),
                    level: Level::INFO,
                    ..default()
                }),
        )
        .insert_resource(self.config.clone())
        .add_state::<Phase>()
        .init_resource::<ChessGame>()
        .init_resource::<DragState>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (start_drag, follow_cursor, drop_piece, show_valid_moves)
                .chain()
                .run_if(in_state(Phase::Playing)),
        )
        .add_systems(OnEnter(Phase::GameOver), show_result);
    }
}

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<BoardConfig>,
    chess: Res<ChessGame>,
) {
    let mut pieces = HashMap::new();
    for color in [ChessColor::White, ChessColor::Black] {
        for piece_type in ChessPieceType::ALL {
            let texture: Handle<Image> =
                asset_server.load(format!("{}{}.png", color.code(), piece_type.code()));
            pieces.insert((color, piece_type), texture);
        }
    }
    let assets = ChessAssets {
        pieces,
        font: asset_server.load(config.font.clone()),
    };

    commands.spawn(Camera2dBundle::default());

    for square in Square::all() {
        let is_light = (square.file + square.rank) % 2 == 0;
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: if is_light {
                        config.light_square
                    } else {
                        config.dark_square
                    },
                    custom_size: Some(Vec2::splat(config.square_size)),
                    ..default()
                },
                transform: Transform::from_translation(
                    square_to_world(square, config.square_size).extend(SQUARE_Z),
                ),
                ..default()
            },
            BoardSquare,
        ));
    }

    for piece in chess.game.board().pieces() {
        let Some(texture) = assets.pieces.get(&(piece.color, piece.piece_type)) else {
            continue;
        };
        commands.spawn((
            SpriteBundle {
                texture: texture.clone(),
                transform: Transform::from_translation(
                    square_to_world(piece.square(), config.square_size).extend(PIECE_Z),
                ),
                sprite: Sprite {
                    custom_size: Some(Vec2::splat(config.square_size * 0.9)),
                    anchor: Anchor::Center,
                    ..default()
                },
                ..default()
            },
            PieceSprite { id: piece.id },
        ));
    }

    commands.insert_resource(assets);
}

fn start_drag(
    mouse_button: Res<Input<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    config: Res<BoardConfig>,
    chess: Res<ChessGame>,
    mut drag: ResMut<DragState>,
    pieces: Query<(Entity, &PieceSprite, &Transform)>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || drag.active.is_some() {
        return;
    }
    let Some(cursor) = cursor_world_position(&windows, &camera_q) else {
        return;
    };

    let square = world_to_square(cursor, config.square_size);
    let Some(piece) = chess.game.board().piece_at(square) else {
        return;
    };
    // Only the side to move can pick anything up
    if piece.color != chess.game.current_turn() {
        return;
    }

    if let Some((entity, _, transform)) = pieces.iter().find(|(_, sprite, _)| sprite.id == piece.id) {
        debug!("picked up {} on {}", piece.id, square);
        drag.active = Some(Drag {
            piece: piece.id,
            entity,
            origin: transform.translation,
            offset: transform.translation.truncate() - cursor,
        });
    }
}

fn follow_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    config: Res<BoardConfig>,
    drag: Res<DragState>,
    mut transforms: Query<&mut Transform, With<PieceSprite>>,
) {
    let Some(active) = &drag.active else {
        return;
    };
    let Some(cursor) = cursor_world_position(&windows, &camera_q) else {
        return;
    };
    if !world_to_square(cursor, config.square_size).is_inside_board() {
        return;
    }

    if let Ok(mut transform) = transforms.get_mut(active.entity) {
        transform.translation = (cursor + active.offset).extend(DRAG_Z);
    }
}

#[allow(clippy::too_many_arguments)]
fn drop_piece(
    mut commands: Commands,
    mouse_button: Res<Input<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    config: Res<BoardConfig>,
    mut chess: ResMut<ChessGame>,
    mut drag: ResMut<DragState>,
    mut pieces: Query<(Entity, &PieceSprite, &mut Transform)>,
    mut next_phase: ResMut<NextState<Phase>>,
) {
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(active) = drag.active.take() else {
        return;
    };

    let result = cursor_world_position(&windows, &camera_q)
        .map(|cursor| world_to_square(cursor, config.square_size))
        .map(|target| chess.game.try_move(active.piece, target));

    let outcome = match result {
        Some(Ok(outcome)) => outcome,
        Some(Err(err)) => {
            debug!("{err}");
            snap_to(&mut pieces, active.entity, active.origin);
            return;
        }
        None => {
            snap_to(&mut pieces, active.entity, active.origin);
            return;
        }
    };

    let landing = square_to_world(outcome.mv.to, config.square_size).extend(PIECE_Z);
    snap_to(&mut pieces, active.entity, landing);

    if let Some(captured) = &outcome.captured {
        for (entity, sprite, _) in pieces.iter() {
            if sprite.id == captured.id {
                commands.entity(entity).despawn();
            }
        }
    }

    if let GameState::Terminated(winner) = outcome.state {
        info!("game over, {winner} wins");
        next_phase.set(Phase::GameOver);
    }
}

fn snap_to(pieces: &mut Query<(Entity, &PieceSprite, &mut Transform)>, entity: Entity, translation: Vec3) {
    if let Ok((_, _, mut transform)) = pieces.get_mut(entity) {
        transform.translation = translation;
    }
}

fn show_valid_moves(
    mut commands: Commands,
    config: Res<BoardConfig>,
    chess: Res<ChessGame>,
    drag: Res<DragState>,
    hints: Query<Entity, With<MoveHint>>,
) {
    for entity in hints.iter() {
        commands.entity(entity).despawn();
    }

    let Some(piece) = drag
        .active
        .as_ref()
        .and_then(|active| chess.game.board().piece(active.piece))
    else {
        return;
    };

    for target in rules::valid_targets(piece, chess.game.board()) {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: config.highlight,
                    custom_size: Some(Vec2::splat(config.square_size)),
                    ..default()
                },
                transform: Transform::from_translation(
                    square_to_world(target, config.square_size).extend(HINT_Z),
                ),
                ..default()
            },
            MoveHint,
        ));
    }
}

fn show_result(mut commands: Commands, chess: Res<ChessGame>, assets: Res<ChessAssets>) {
    let Some(winner) = chess.game.winner() else {
        return;
    };

    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            background_color: Color::rgba(0.0, 0.0, 0.0, 0.7).into(),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                result_message(winner),
                TextStyle {
                    font: assets.font.clone(),
                    font_size: 28.0,
                    color: Color::WHITE,
                },
            ));
        });
}

fn result_message(winner: ChessColor) -> String {
    format!("CONGRATULATIONS {} WINS", winner.to_string().to_uppercase())
}

fn cursor_world_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.get_single().ok()?;
    let (camera, camera_transform) = camera_q.get_single().ok()?;

    window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor))
        .map(|ray| ray.origin.truncate())
}

/// Centre of `square` in world space. The board is centred on the origin
/// with rank 0 at the top.
pub fn square_to_world(square: Square, square_size: f32) -> Vec2 {
    Vec2::new(
        (square.file as f32 - 3.5) * square_size,
        (3.5 - square.rank as f32) * square_size,
    )
}

/// The square under a world-space point. Points off the board map to
/// squares outside `0..8`.
pub fn world_to_square(point: Vec2, square_size: f32) -> Square {
    let file = (point.x / square_size + 4.0).floor();
    let rank = (4.0 - point.y / square_size).floor();
    Square::new(file as i8, rank as i8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 63.0;

    #[test]
    fn square_centres_map_back() {
        for square in Square::all() {
            assert_eq!(world_to_square(square_to_world(square, SIZE), SIZE), square);
        }
    }

    #[test]
    fn corners_land_on_the_expected_squares() {
        let top_left = Vec2::new(-4.0 * SIZE + 1.0, 4.0 * SIZE - 1.0);
        assert_eq!(world_to_square(top_left, SIZE), Square::new(0, 0));

        let bottom_right = Vec2::new(4.0 * SIZE - 1.0, -4.0 * SIZE + 1.0);
        assert_eq!(world_to_square(bottom_right, SIZE), Square::new(7, 7));
    }

    #[test]
    fn points_off_the_board_are_off_the_board() {
        let left = world_to_square(Vec2::new(-4.0 * SIZE - 1.0, 0.0), SIZE);
        assert!(!left.is_inside_board());

        let below = world_to_square(Vec2::new(0.0, -4.0 * SIZE - 1.0), SIZE);
        assert_eq!(below.rank, 8);
    }

    #[test]
    fn banner_names_the_winner() {
        assert_eq!(result_message(ChessColor::White), "CONGRATULATIONS WHITE WINS");
        assert_eq!(result_message(ChessColor::Black), "CONGRATULATIONS BLACK WINS");
    }

    #[test]
    fn default_board_is_504_pixels() {
        assert_eq!(BoardConfig::default().board_size(), 504.0);
    }
}
