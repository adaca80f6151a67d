use gpui::{
    App, AppContext, Application, Bounds, Menu, TitlebarOptions, WindowBounds, WindowOptions,
    point, px,
};

use gpui_formsflow::{
    FormsflowAssets, assets, config::AppConfig, theme::ThemeStore, views::FormsflowApp,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load_or_default();

    Application::new()
        .with_quit_mode(gpui::QuitMode::LastWindowClosed)
        .with_assets(assets![FormsflowAssets])
        .run(move |cx: &mut App| {
            gpui_formsflow::init(cx);
            config.install_theme(cx);

            cx.set_menus(vec![Menu {
                name: "formsflow".into(),
                items: vec![],
            }]);

            let store = ThemeStore::build(config.settings, cx);
            let bounds = Bounds::centered(None, config.window.size(), cx);

            let opened = cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        title: Some("formsflow components".into()),
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(10.), px(10.))),
                    }),
                    ..Default::default()
                },
                move |window, cx| cx.new(|cx| FormsflowApp::new(store, window, cx)),
            );

            if let Err(err) = opened {
                log::error!("failed to open the gallery window: {err:#}");
                cx.quit();
                return;
            }

            cx.activate(true);
        });
}
