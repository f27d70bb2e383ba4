//! Runtime configuration: command-line flags layered over `FLOATYBOX_*`
//! environment variables.

use std::time::{SystemTime, UNIX_EPOCH};

use std::ffi::OsString;

use clap::{ArgAction, Command, CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::app::key_bindings;
use crate::input::Keymap;
use crate::types::{valid_fps, Settings, DEFAULT_FPS};

pub const LICENSE: &str = "\
MIT License

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

const ENV_HELP: &str = "\
Environment:
  FLOATYBOX_SEED       fixed seed for every round
  FLOATYBOX_FPS        render rate, 1 to 1000
  FLOATYBOX_KEYMAP     key overrides, e.g. 'j=float,x=quit,space=none'
  FLOATYBOX_LOG_PATH   write logs (filtered by RUST_LOG) to this file

Exit Codes:
  0  normal
  1  error";

#[derive(Parser, Debug, Clone)]
#[command(name = "floatybox", version, disable_version_flag = true)]
#[command(about = "Float your way through perilous terrain in this endless side-scroller game.")]
pub struct Args {
    /// Print the program version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Colour output; 'auto' enables it when stdout is a tty.
    #[arg(long, alias = "color", value_enum, default_value_t = ColorMode::Auto)]
    pub colour: ColorMode,

    /// Fixed playfield size instead of following the terminal, e.g. 80x24.
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Seed every round with this value.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Render rate in frames per second, 1 to 1000.
    #[arg(long)]
    pub fps: Option<f64>,

    /// Print the program license.
    #[arg(long, default_value_t = false)]
    pub license: bool,
}

/// The command line, with `--help` listing the bindings of `keymap`.
pub fn command(keymap: &Keymap) -> Command {
    Args::command().after_help(format!("{}\n{ENV_HELP}", key_bindings(keymap)))
}

/// Parse `argv` (program name first) against [`command`].
pub fn parse_args<I, T>(argv: I, keymap: &Keymap) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(keymap).try_get_matches_from(argv)?;
    Args::from_arg_matches(&matches)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    On,
    Off,
    Auto,
}

impl ColorMode {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::On => true,
            ColorMode::Off => false,
            ColorMode::Auto => is_tty,
        }
    }
}

/// Parse `WxH` into a playfield size.
///
/// ```
/// use floatybox::config::parse_size;
///
/// assert_eq!(parse_size("80x24"), Ok((80, 24)));
/// assert!(parse_size("80").is_err());
/// assert!(parse_size("0x24").is_err());
/// ```
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got {w}x{h}"));
    }
    Ok((w, h))
}

/// Settings read from `FLOATYBOX_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub seed: Option<u32>,
    pub fps: Option<f64>,
    pub keymap: Option<String>,
    pub log_path: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read variables through `lookup`; unparsable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = non_empty("FLOATYBOX_SEED").and_then(|s| s.parse().ok());
        let fps = non_empty("FLOATYBOX_FPS")
            .and_then(|s| s.parse().ok())
            .filter(|f: &f64| valid_fps(*f));

        Self {
            seed,
            fps,
            keymap: non_empty("FLOATYBOX_KEYMAP"),
            log_path: non_empty("FLOATYBOX_LOG_PATH"),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub color: bool,
    /// Fixed playfield size; `None` follows the terminal.
    pub size: Option<(u32, u32)>,
    /// Fixed seed; `None` seeds each round from the clock.
    pub seed: Option<u32>,
    pub fps: f64,
    pub keymap: Option<String>,
    pub log_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            size: None,
            seed: None,
            fps: DEFAULT_FPS,
            keymap: None,
            log_path: None,
        }
    }
}

impl Config {
    /// Layer `args` over `env`. Flags win.
    pub fn resolve(args: &Args, env: EnvConfig, is_tty: bool) -> Self {
        let fps = args
            .fps
            .filter(|f| valid_fps(*f))
            .or(env.fps)
            .unwrap_or(DEFAULT_FPS);

        Self {
            color: args.colour.enabled(is_tty),
            size: args.size,
            seed: args.seed.or(env.seed),
            fps,
            keymap: env.keymap,
            log_path: env.log_path,
        }
    }

    /// Settings for a new round.
    pub fn round_settings(&self) -> Settings {
        Settings::with_seed(self.seed.unwrap_or_else(clock_seed))
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("floatybox").chain(argv.iter().copied())).unwrap()
    }

    fn env(vars: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(&args(&[]), EnvConfig::default(), true);
        assert!(config.color);
        assert_eq!(config.fps, DEFAULT_FPS);
        assert_eq!(config.seed, None);
        assert_eq!(config.size, None);
    }

    #[test]
    fn colour_modes() {
        let auto = args(&[]);
        assert!(!Config::resolve(&auto, EnvConfig::default(), false).color);
        let on = args(&["--colour", "on"]);
        assert!(Config::resolve(&on, EnvConfig::default(), false).color);
        let off = args(&["--colour=off"]);
        assert!(!Config::resolve(&off, EnvConfig::default(), true).color);
        let alias = args(&["--color", "off"]);
        assert_eq!(alias.colour, ColorMode::Off);
    }

    #[test]
    fn flags_override_environment() {
        let e = env(&[("FLOATYBOX_SEED", "5"), ("FLOATYBOX_FPS", "60")]);
        let config = Config::resolve(&args(&["--seed", "9"]), e.clone(), true);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.fps, 60.0);

        let config = Config::resolve(&args(&["--fps", "15"]), e, true);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.fps, 15.0);
    }

    #[test]
    fn bad_environment_values_are_ignored() {
        let e = env(&[
            ("FLOATYBOX_SEED", "minus one"),
            ("FLOATYBOX_FPS", "-3"),
            ("FLOATYBOX_KEYMAP", "  "),
            ("FLOATYBOX_LOG_PATH", " /tmp/fb.log "),
        ]);
        assert_eq!(e.seed, None);
        assert_eq!(e.fps, None);
        assert_eq!(e.keymap, None);
        assert_eq!(e.log_path.as_deref(), Some("/tmp/fb.log"));
    }

    #[test]
    fn out_of_range_fps_falls_back() {
        for bad in ["1e-20", "0.5", "5000", "inf"] {
            let config = Config::resolve(&args(&["--fps", bad]), EnvConfig::default(), true);
            assert_eq!(config.fps, DEFAULT_FPS, "--fps {bad}");

            let e = env(&[("FLOATYBOX_FPS", bad)]);
            assert_eq!(e.fps, None, "FLOATYBOX_FPS={bad}");
            assert_eq!(Config::resolve(&args(&[]), e, true).fps, DEFAULT_FPS);
        }

        // A bad flag still lets a good environment value through.
        let e = env(&[("FLOATYBOX_FPS", "45")]);
        assert_eq!(Config::resolve(&args(&["--fps", "1e-20"]), e, true).fps, 45.0);
    }

    #[test]
    fn size_flag() {
        assert_eq!(args(&["--size", "100x30"]).size, Some((100, 30)));
        assert!(Args::try_parse_from(["floatybox", "--size", "big"]).is_err());
    }

    #[test]
    fn fixed_seed_repeats_every_round() {
        let config = Config {
            seed: Some(77),
            ..Config::default()
        };
        assert_eq!(config.round_settings().seed, 77);
        assert_eq!(config.round_settings(), config.round_settings());
    }

    #[test]
    fn help_and_version_are_not_errors() {
        let keymap = Keymap::default();
        let err = parse_args(["floatybox", "--help"], &keymap).unwrap_err();
        assert!(!err.use_stderr());
        let err = parse_args(["floatybox", "-v"], &keymap).unwrap_err();
        assert!(!err.use_stderr());
        let err = parse_args(["floatybox", "--bogus"], &keymap).unwrap_err();
        assert!(err.use_stderr());

        let parsed = parse_args(["floatybox", "--seed", "9"], &keymap).unwrap();
        assert_eq!(parsed.seed, Some(9));
    }

    fn help_line<'a>(help: &'a str, description: &str) -> &'a str {
        help.lines()
            .find(|line| line.trim_end().ends_with(description))
            .unwrap_or("")
    }

    #[test]
    fn help_lists_default_bindings() {
        let help = command(&Keymap::default()).render_help().to_string();
        let float = help_line(&help, "increase velocity");
        assert!(float.contains("<scroll-up>"), "{float:?}");
        assert!(!float.contains("<mouse-left>"), "{float:?}");
        assert!(help_line(&help, "hold to keep floating").contains("<mouse-left>"));
        assert!(help.contains("FLOATYBOX_KEYMAP"));
        assert!(help.contains("Exit Codes:"));
    }

    #[test]
    fn help_follows_keymap_overrides() {
        let mut keymap = Keymap::default();
        keymap.apply_overrides("x=quit,space=none");
        let help = command(&keymap).render_help().to_string();
        let quit = help_line(&help, "quit the program");
        assert!(quit.split_whitespace().any(|code| code.trim_end_matches(',') == "x"), "{quit:?}");
        assert!(!help_line(&help, "increase velocity").contains("<space>"));
    }
}
