use std::process::ExitCode;

use clap::Parser;
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gridcaster::app::App;
use gridcaster::config::Cli;
use gridcaster::core::input::{Action, HeldActions};
use gridcaster::scene::{GameScene, MenuScene, Scene, SceneId, Viewport};

const KEYMAP: &[(KeyboardKey, Action)] = &[
    (KeyboardKey::KEY_W, Action::MoveForward),
    (KeyboardKey::KEY_UP, Action::MoveForward),
    (KeyboardKey::KEY_S, Action::MoveBack),
    (KeyboardKey::KEY_DOWN, Action::MoveBack),
    (KeyboardKey::KEY_A, Action::StrafeLeft),
    (KeyboardKey::KEY_D, Action::StrafeRight),
    (KeyboardKey::KEY_LEFT, Action::TurnLeft),
    (KeyboardKey::KEY_RIGHT, Action::TurnRight),
    (KeyboardKey::KEY_M, Action::OpenMenu),
    (KeyboardKey::KEY_ENTER, Action::Confirm),
    (KeyboardKey::KEY_SPACE, Action::Confirm),
];

const LABEL_SIZE: i32 = 24;
const PAGER_TEXT_SIZE: i32 = 16;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn poll_input(rl: &RaylibHandle) -> HeldActions {
    KEYMAP
        .iter()
        .filter(|(key, _)| rl.is_key_down(*key))
        .map(|&(_, action)| action)
        .collect()
}

fn screen_texture(rl: &mut RaylibHandle, thread: &RaylibThread, vp: Viewport) -> Result<Texture2D, String> {
    let img = Image::gen_image_color(vp.width as i32, vp.height as i32, Color::BLACK);
    rl.load_texture_from_image(thread, &img).map_err(|e| e.to_string())
}

fn draw_menu_overlay(d: &mut RaylibDrawHandle, menu: &MenuScene) {
    for item in menu.visible_items() {
        let color = if item.selected { Color::BLACK } else { Color::DARKGRAY };
        d.draw_text(item.label, item.rect.x + 20, item.rect.y + 20, LABEL_SIZE, color);
    }
    let pager = menu.pager_rect();
    d.draw_text(&menu.page_label(), pager.x + pager.w / 2 - 16, pager.y + pager.h + 6, PAGER_TEXT_SIZE, Color::RAYWHITE);
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let mut viewport = cli.viewport();

    let (mut rl, thread) = raylib::init()
        .size(viewport.width as i32, viewport.height as i32)
        .title(&cli.title)
        .resizable()
        .build();
    rl.set_target_fps(cli.fps);

    let mut texture = match screen_texture(&mut rl, &thread, viewport) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "screen_texture_failed");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(
        viewport,
        MenuScene::new(&cli.levels_dir),
        GameScene::new(cli.minimap_scale),
    );
    if let (Some(level), Some(game)) = (cli.level.clone(), app.scenes_mut().game_mut()) {
        game.queue_level(level);
    }
    app.start(cli.first_scene());

    let mut rgba = Vec::new();
    while !rl.window_should_close() {
        if rl.is_window_resized() {
            let w = rl.get_screen_width().max(1) as u32;
            let h = rl.get_screen_height().max(1) as u32;
            let next = Viewport::new(w, h);
            if next != viewport {
                match screen_texture(&mut rl, &thread, next) {
                    Ok(t) => {
                        texture = t;
                        viewport = next;
                        app.resize(viewport);
                    }
                    Err(e) => warn!(error = %e, "screen_texture_resize_failed"),
                }
            }
        }

        let input = poll_input(&rl);
        app.frame(rl.get_time(), input);

        app.screen().write_rgba(&mut rgba);
        if let Err(e) = texture.update_texture(&rgba) {
            warn!(error = %e, "screen_upload_failed");
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&texture, 0, 0, Color::WHITE);
        if app.scenes().current() == Some(SceneId::Menu) {
            if let Some(menu) = app.scenes().menu() {
                draw_menu_overlay(&mut d, menu);
            }
        }
        d.draw_fps(10, viewport.height as i32 - 24);
    }

    app.shutdown();
    info!("bye");
    ExitCode::SUCCESS
}
