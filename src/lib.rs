//! Hot-reload core for a live GLSL shader preview tool.
//!
//! Two pieces work together: a polling [`watcher::FileWatcher`] that loads
//! changed files into a shared buffer one change at a time, and a shader
//! diagnostics pipeline that turns a raw compiler info log plus the compiled
//! source into a [`ShaderCompileReport`] with line numbers mapped back to the
//! user's file, ready to render through a pluggable line sink.
//!
//! Compilation itself is the host application's job: hand
//! [`template::ShaderTemplate::wrap`] output to your GL stack, feed the info
//! log back through [`template::ShaderTemplate::report`], and print the
//! result with [`render::render_report`].

pub mod data;
pub mod render;
pub mod report;
pub mod template;
pub mod texture;
pub mod watcher;

pub use data::{Line, LineKind, ShaderCompileReport};
pub use render::{print_console, print_plain, render_report, render_to_string};
pub use report::{build_report, parse_error_log, split_lines};
pub use template::ShaderTemplate;
pub use texture::{DecodedTexture, PixelFormat, TextureError, TextureSettings, decode_texture};
pub use watcher::{DEFAULT_POLL_INTERVAL, FileWatcher, WatchFile, WatchKind};
