mod helper;

use bd1_vfd::error::Error;
use bd1_vfd::script::Script;
use bd1_vfd::vfd::Vfd;
use clap::Parser;
use helper::{frame_size, key_to_char, outputs_to_rgb};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::PathBuf;

/// Drives an emulated BD1 VFD over its serial lines and shows the result.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Options {
    /// Text to show once the command bytes have been sent
    text: Vec<String>,

    /// Hex command bytes sent before the text, e.g. "A2 E0 F7"
    #[arg(long)]
    bytes: Option<String>,

    /// Command script: hex text or a raw byte file
    #[arg(long)]
    script: Option<PathBuf>,

    /// Pixels per segment unit
    #[arg(long, default_value_t = 4)]
    scale: usize,

    /// Refresh ticks per second
    #[arg(long, default_value_t = 60)]
    fps: usize,

    /// Output port, numbers the outputs vfd<port*16>..
    #[arg(long, default_value_t = 0)]
    port: u8,

    /// Run this many ticks without a window and print the outputs
    #[arg(long)]
    headless: Option<usize>,
}

fn load_script(options: &Options) -> Result<Script, Error> {
    let mut script = Script::default();
    if let Some(path) = &options.script {
        script.extend(Script::from_path(path)?);
    }
    if let Some(bytes) = &options.bytes {
        script.extend(Script::from_hex(bytes)?);
    }
    script.extend(Script::from_text(&options.text.join(" ")));
    Ok(script)
}

fn type_keys(vfd: &mut Vfd, window: &Window) {
    for key in window.get_keys_pressed(KeyRepeat::No) {
        match key {
            Key::Backspace => vfd.write_byte(0xB3),
            Key::Delete => vfd.reset(false),
            key => {
                if let Some(c) = key_to_char(key) {
                    vfd.write_str(&c.to_string());
                }
            }
        }
    }
}

fn run_headless(vfd: &mut Vfd, ticks: usize) {
    for _ in 0..ticks {
        vfd.tick();
    }
    for (i, pattern) in vfd.outputs().iter().enumerate() {
        println!("{} = {:04X}", vfd.output_name(i), pattern);
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = Options::parse();
    let script = load_script(&options)?;

    let mut vfd = Vfd::new(options.port);
    vfd.reset(false);
    for &byte in &script.bytes {
        vfd.write_byte(byte);
    }
    log::info!("sent {} bytes", script.bytes.len());

    if let Some(ticks) = options.headless {
        run_headless(&mut vfd, ticks);
        return Ok(());
    }

    let scale = options.scale.max(1);
    let (width, height) = frame_size(scale);
    let mut window = Window::new("BD1 VFD", width, height, WindowOptions::default())?;

    // One display refresh per frame
    window.set_target_fps(options.fps.max(1));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        type_keys(&mut vfd, &window);
        vfd.tick();

        let buffer = outputs_to_rgb(vfd.outputs(), scale);
        window.update_with_buffer(&buffer, width, height)?;
    }

    Ok(())
}
