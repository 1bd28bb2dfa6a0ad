//! Settings Menu - a ConfigTree over a small game's options
//!
//! Arrows or j/k move, enter/space/y accept, escape/backspace/n go back.
//! Press q to quit. Pass a theme preset name to restyle the menu:
//!
//!   cargo run --example settings_menu -- amber
//!
//! Logs go to settings_menu.log; set RUST_LOG=spark_settings=trace to see
//! every edit.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::KeyCode;
use crossterm::execute;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use spark_settings::input::poll_key;
use spark_settings::{
    CharGrid, Colour, ConfigEnum, ConfigTree, Configurable, Descriptor, DiffRenderer, Feedback,
    HapticHandle, InputState, ObjectConfig, Widget, get_preset, preset_names,
};

// =============================================================================
// Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quality {
    Low,
    Medium,
    High,
}

impl ConfigEnum for Quality {
    const NAME: &'static str = "Quality";
    const VARIANTS: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    fn description(&self) -> Option<&'static str> {
        match self {
            Self::Low => Some("Fewer particles"),
            Self::Medium => None,
            Self::High => Some("Needs a fast machine"),
        }
    }
}

struct Video {
    quality: Quality,
    brightness: f32,
    vsync: bool,
    frame_cap: i32,
}

impl Configurable for Video {
    fn describe(desc: &mut Descriptor<Self>) {
        desc.order(&["quality", "brightness", "vsync"]);
        desc.field("quality", |v| v.quality, |v, q| v.quality = q);
        desc.field("brightness", |v| v.brightness, |v, b| v.brightness = b)
            .min(0.0)
            .max(2.0)
            .decimals(2)
            .description("Gamma multiplier");
        desc.field("vsync", |v| v.vsync, |v, on| v.vsync = on);
        desc.field("frame_cap", |v| v.frame_cap, |v, cap| v.frame_cap = cap)
            .choice_of_ints(&[30, 60, 120, 144]);
        desc.enabled_for(&["frame_cap"], |v| !v.vsync);
    }
}

struct Player {
    initials: Vec<char>,
    marker: char,
    tint: Colour,
}

impl Configurable for Player {
    fn describe(desc: &mut Descriptor<Self>) {
        desc.description("Who you are on the scoreboard").wizard();
        desc.order(&["initials", "marker", "tint"]);
        desc.field("initials", |p| p.initials.clone(), |p, v| p.initials = v);
        desc.field("marker", |p| p.marker, |p, v| p.marker = v);
        desc.field("tint", |p| p.tint, |p, v| p.tint = v);
    }
}

struct Settings {
    volume: i32,
    language: String,
    video: Video,
    player: Player,
    quit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 70,
            language: "English".into(),
            video: Video {
                quality: Quality::Medium,
                brightness: 1.0,
                vsync: true,
                frame_cap: 60,
            },
            player: Player {
                initials: vec!['A', 'A', 'A'],
                marker: '@',
                tint: Colour::GREEN,
            },
            quit: false,
        }
    }
}

impl Configurable for Settings {
    fn describe(desc: &mut Descriptor<Self>) {
        desc.order(&["player", "video", "volume", "language"]);
        desc.field("volume", |s| s.volume, |s, v| s.volume = v)
            .min(0.0)
            .max(100.0)
            .description("Master volume");
        desc.field("language", |s| s.language.clone(), |s, v| s.language = v)
            .choice_of_strings(&["English", "Deutsch", "Français"]);
        desc.nested("video", |s| &s.video, |s| &mut s.video);
        desc.nested("player", |s| &s.player, |s| &mut s.player);
        desc.action("quit", |s| s.quit = true)
            .description("Leave the menu");
    }
}

// =============================================================================
// Terminal
// =============================================================================

fn init_tracing() -> io::Result<()> {
    let file = File::create("settings_menu.log")?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn run(tree: &mut ConfigTree, settings: &Rc<RefCell<Settings>>) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    let mut renderer = DiffRenderer::new();
    let mut input = InputState::new();
    let mut last = Instant::now();

    while !settings.borrow().quit {
        while let Some(key) = poll_key(Duration::from_millis(16))? {
            if key.code == KeyCode::Char('q') {
                return Ok(());
            }
            input.handle(&key);
        }

        let now = Instant::now();
        let delta = now.duration_since(last).as_secs_f32();
        last = now;

        tree.input_event(input.pressed())?;
        tree.input_state(input.held())?;
        tree.update(delta)?;
        input.end_frame();

        renderer.render(&mut stdout, tree.text_grid())?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let theme = match std::env::args().nth(1) {
        Some(name) => get_preset(&name).ok_or_else(|| {
            format!("unknown theme {name:?}, try one of {:?}", preset_names())
        })?,
        None => get_preset("default").unwrap_or_default(),
    };
    info!(theme = %theme.name, "starting settings menu");

    let settings = Rc::new(RefCell::new(Settings::default()));
    let root = ObjectConfig::new("settings", settings.clone())?;

    let (columns, rows) = terminal::size()?;
    let grid = CharGrid::new(usize::from(columns.min(60)), usize::from(rows.min(16)));
    let haptic = HapticHandle::new(|signal: Feedback| debug!(?signal, "feedback"));
    let mut tree = ConfigTree::new(grid, Rc::new(root))?
        .with_theme(theme)?
        .with_haptic(haptic);

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let result = run(&mut tree, &settings);

    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    io::stdout().flush()?;

    let settings = settings.borrow();
    info!(
        volume = settings.volume,
        language = %settings.language,
        quality = settings.video.quality.label(),
        initials = %settings.player.initials.iter().collect::<String>(),
        "settings on exit"
    );
    result
}
