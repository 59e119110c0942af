//! Thin CLI wrapper around the `twtxt_codec` library. Follows the teacher
//! binary's separation of concerns: argument parsing and I/O live here,
//! every processing step is a call into the library.

use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use twtxt_codec::format_options::NoopFormatOptions;
use twtxt_codec::{feed, render, Format};

#[derive(Parser, Debug)]
#[command(name = "twtxt-codec", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a feed file and print each post's hash and plain-text rendering.
    Parse { path: String },
    /// Render every post in a feed file in the given format.
    Render {
        path: String,
        #[arg(long, value_enum, default_value_t = RenderFormat::Text)]
        format: RenderFormat,
    },
    /// Print only the content hash of each post in a feed file, one per line.
    Hash { path: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderFormat {
    Wire,
    Text,
    Markdown,
    Html,
}

impl From<RenderFormat> for Format {
    fn from(f: RenderFormat) -> Self {
        match f {
            RenderFormat::Wire => Format::Wire,
            RenderFormat::Text => Format::Text,
            RenderFormat::Markdown => Format::Markdown,
            RenderFormat::Html => Format::Html,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse { path } => run_parse(&path),
        Command::Render { path, format } => run_render(&path, format.into()),
        Command::Hash { path } => run_hash(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_feed(path: &str) -> twtxt_codec::Result<twtxt_codec::Feed> {
    let file = fs::File::open(path)?;
    let twter = twtxt_codec::Twter::new("", "");
    feed::parse_file(file, twter)
}

fn run_parse(path: &str) -> twtxt_codec::Result<()> {
    let feed = read_feed(path)?;
    for post in &feed.posts {
        println!("{}\t{}", post.hash(), render::render_post(post, Format::Text, &NoopFormatOptions));
    }
    Ok(())
}

fn run_render(path: &str, format: Format) -> twtxt_codec::Result<()> {
    let feed = read_feed(path)?;
    for post in &feed.posts {
        if matches!(format, Format::Wire) {
            print!("{}", render::render_wire(post));
        } else {
            println!("{}", render::render_post(post, format, &NoopFormatOptions));
        }
    }
    Ok(())
}

fn run_hash(path: &str) -> twtxt_codec::Result<()> {
    let feed = read_feed(path)?;
    for post in &feed.posts {
        println!("{}", post.hash());
    }
    Ok(())
}
