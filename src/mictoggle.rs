use std::time::Duration;

use anyhow::{Context, Result};
use arboard::Clipboard;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use mictoggle::config_ext::ConfigExt;
use mictoggle::controller::ToggleController;
use mictoggle::event::AppEvent;
use mictoggle::notify::{DesktopNotifier, NotificationLayer};
use mictoggle::screen::{ScreenHandle, spawn_screen};
use mictoggle::view::{SUBTITLE, ScreenView, TITLE};
use mictoggle::{ConfigManager, DEFAULT_LOG_LEVEL, ScreenState, VERSION, authority_for, icon};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tray_icon::menu::{AboutMetadataBuilder, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

/// How long Quit waits for queued toggles. A dialog that is still open may
/// need this thread, so the wait must not be unbounded.
const CLOSE_TIMEOUT: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    // Initialize the logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MICTOGGLE_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .finish()
        .with(NotificationLayer::new())
        .init();

    // Load config
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    // save back the config to create the file if it doesn't exist
    config_manager.save(&config)?;

    // Set up hotkey
    let hotkey = config.hotkey();
    let hotkey_manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;
    hotkey_manager
        .register(hotkey)
        .context("Failed to register hotkey")?;

    // Set up clipboard interaction
    let mut clipboard = Clipboard::new()?;

    // Create the tray menu
    let initial = ScreenView::from(ScreenState::default());
    let tray_menu = Menu::new();
    let status_item = MenuItem::new(initial.status_line(), false, None);
    let toggle_item = MenuItem::new(initial.button_label, true, None);
    let permission_item = MenuItem::new(initial.permission_line(), false, None);
    let icon_copy_config = MenuItem::new("Copy config path", true, None);
    let icon_quit = MenuItem::new("Quit", true, None);
    tray_menu.append_items(&[
        &MenuItem::new(TITLE, false, None),
        &MenuItem::new(SUBTITLE, false, None),
        &PredefinedMenuItem::separator(),
        &status_item,
        &toggle_item,
        &permission_item,
        &PredefinedMenuItem::separator(),
        &PredefinedMenuItem::about(
            None,
            Some(
                AboutMetadataBuilder::new()
                    .version(Some(VERSION.to_owned()))
                    .build(),
            ),
        ),
        &icon_copy_config,
        &PredefinedMenuItem::separator(),
        &icon_quit,
    ])?;

    let menu_channel = MenuEvent::receiver();
    let hotkey_channel = GlobalHotKeyEvent::receiver();

    let event_loop: EventLoop<AppEvent> = EventLoopBuilder::with_user_event().build();
    let event_sender = event_loop.create_proxy();

    // The screen task owns all toggle state
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let controller = ToggleController::new(
        authority_for(config.permission_model()),
        Box::new(DesktopNotifier::new(config.show_confirmations())),
    );
    let mut screen: Option<ScreenHandle> = Some(spawn_screen(
        runtime.handle(),
        controller,
        move |state| {
            event_sender.send_event(AppEvent::StateChanged(state)).ok();
        },
    ));

    let mut icon_tray: Option<TrayIcon> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::NewEvents(StartCause::Init) = event {
            // We create the icon once the event loop is actually running
            // to prevent issues like https://github.com/tauri-apps/tray-icon/issues/90
            match build_tray(&tray_menu) {
                Ok(tray) => {
                    icon_tray.replace(tray);
                }
                Err(e) => {
                    error!("Failed to create tray icon: {:?}", e);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            // We have to request a redraw here to have the icon actually show up.
            // Tao only exposes a redraw method on the Window so we use core-foundation directly.
            #[cfg(target_os = "macos")]
            unsafe {
                use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};

                let rl = CFRunLoopGetMain();
                CFRunLoopWakeUp(rl);
            }

            info!(hotkey = ?hotkey, "Mic Toggle ready");
        }

        if let Ok(event) = menu_channel.try_recv() {
            if event.id == icon_quit.id() {
                if let Some(screen) = screen.take() {
                    match runtime.block_on(screen.close_within(CLOSE_TIMEOUT)) {
                        Ok(state) => info!(state = ?state, "Final screen state"),
                        Err(e) => warn!("Exiting without a clean screen close: {}", e),
                    }
                }
                icon_tray.take();
                *control_flow = ControlFlow::Exit;
            } else if event.id == toggle_item.id() {
                toggle(screen.as_ref());
            } else if event.id == icon_copy_config.id() {
                if let Err(e) =
                    clipboard.set_text(config_manager.config_path().to_string_lossy().into_owned())
                {
                    error!("Failed to copy config path to clipboard: {}", e);
                }
            }
        }

        // Handle user provided events
        if let Event::UserEvent(AppEvent::StateChanged(state)) = event {
            info!(state = ?state, "State changed");
            let view = ScreenView::from(state);
            status_item.set_text(view.status_line());
            toggle_item.set_text(view.button_label);
            permission_item.set_text(view.permission_line());
            if let Some(tray) = icon_tray.as_ref() {
                match icon::icon(&view) {
                    Ok(icon) => {
                        tray.set_icon(Some(icon)).ok();
                    }
                    Err(e) => error!("Failed to load tray icon: {:?}", e),
                }
            }
        }

        // Handle hotkey events
        if let Ok(event) = hotkey_channel.try_recv() {
            if event.id() == hotkey.id() && event.state() == HotKeyState::Pressed {
                toggle(screen.as_ref());
            }
        }
    });
}

fn build_tray(menu: &Menu) -> Result<TrayIcon> {
    TrayIconBuilder::new()
        .with_menu(Box::new(menu.clone()))
        .with_tooltip(TITLE)
        .with_icon(icon::icon(&ScreenView::from(ScreenState::default()))?)
        .build()
        .context("Failed to build tray icon")
}

fn toggle(screen: Option<&ScreenHandle>) {
    let Some(screen) = screen else {
        return;
    };
    if let Err(e) = screen.toggle() {
        error!("Failed to toggle microphone: {}", e);
    }
}
