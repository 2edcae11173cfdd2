//! Command-line clipper: reads HTML from stdin and writes Markdown (or the
//! full result as JSON) to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use web_clip::{Error, ExtractedContent, Options};

#[derive(Parser, Debug)]
#[command(name = "web-clip", version, about = "Extract the main content of an HTML page as Markdown")]
struct Args {
    /// Page URL, used to resolve relative links and pick site rules
    #[arg(long)]
    url: Option<String>,

    /// Page title as the browser reported it
    #[arg(long)]
    title: Option<String>,

    /// Treat stdin as the markup of a user selection
    #[arg(long, conflicts_with = "full_page")]
    selection: bool,

    /// Convert the whole body instead of locating the article
    #[arg(long)]
    full_page: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Drop images from the Markdown
    #[arg(long)]
    no_images: bool,

    /// Keep a leading heading even when it repeats the title
    #[arg(long)]
    keep_title: bool,

    /// Fail when nothing could be extracted
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            url: self.url.clone(),
            title: self.title.clone(),
            include_images: !self.no_images,
            remove_duplicate_title: !self.keep_title,
            fail_on_empty: self.strict,
            ..Options::default()
        }
    }
}

fn run(args: &Args) -> Result<ExtractedContent, Error> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .map_err(|err| Error::ParseError(err.to_string()))?;

    let options = args.options();
    if args.selection {
        let markup = web_clip::encoding::decode_html(&input);
        return web_clip::extract_selection(Some(&markup), &options);
    }
    if args.full_page {
        let html = web_clip::encoding::decode_html(&input);
        return web_clip::extract_full_page(&html, &options);
    }
    web_clip::extract_bytes(&input, &options)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let result = match run(&args) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(%err, "extraction failed");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!(%err, "could not serialize result");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", result.markdown);
    }
    ExitCode::SUCCESS
}
