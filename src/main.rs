use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront_image::types::{ImageSource, LoaderOptions, SizingHint};
use storefront_image::{cdn, config, dimensions, manifest, markup, output};
use tracing_subscriber::EnvFilter;

/// Sizing flags shared by commands that build a CDN request.
#[derive(clap::Args, Clone, Debug, Default)]
struct SizeArgs {
    /// Requested width in CSS pixels
    #[arg(long)]
    width: Option<u32>,

    /// Requested height in CSS pixels
    #[arg(long)]
    height: Option<u32>,

    /// CDN crop region (center, top, bottom, left, right)
    #[arg(long)]
    crop: Option<String>,

    /// Pixel density multiplier folded into width and height
    #[arg(long)]
    scale: Option<f64>,
}

impl SizeArgs {
    fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            width: self.width,
            height: self.height,
            crop: self.crop.clone(),
            scale: self.scale,
        }
    }
}

/// Intrinsic size and layout hint flags.
#[derive(clap::Args, Clone, Debug, Default)]
struct ImageArgs {
    /// Intrinsic image width recorded by the storefront
    #[arg(long)]
    intrinsic_width: Option<u32>,

    /// Intrinsic image height recorded by the storefront
    #[arg(long)]
    intrinsic_height: Option<u32>,

    /// Layout-supplied width (lower priority than --width)
    #[arg(long)]
    element_width: Option<u32>,

    /// Layout-supplied height (lower priority than --height)
    #[arg(long)]
    element_height: Option<u32>,
}

impl ImageArgs {
    fn image(&self, url: &str, alt: Option<String>) -> ImageSource {
        ImageSource {
            width: self.intrinsic_width,
            height: self.intrinsic_height,
            alt_text: alt,
            ..ImageSource::new(url)
        }
    }

    fn element_hint(&self) -> SizingHint {
        SizingHint::new(self.element_width, self.element_height)
    }
}

#[derive(Parser)]
#[command(name = "storefront-image")]
#[command(about = "Resolve storefront image URLs and display dimensions")]
#[command(long_about = "\
Resolve storefront image URLs and display dimensions

URLs served by the image CDN get width/height/crop query parameters so the
CDN resizes them. Any other URL is left untouched.

Dimension priority (first source with a width or height wins):
  1. --width/--height            explicit loader options
  2. --element-width/-height     layout hint
  3. --intrinsic-width/-height   the image's recorded size

A missing axis is derived from the intrinsic aspect ratio when both intrinsic
values are known, otherwise it is printed as '-'.

Run 'storefront-image gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file for markup defaults (srcset widths, loading, decoding)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite an image URL with CDN size parameters
    Rewrite {
        url: String,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Resolve display width and height
    Dimensions {
        #[command(flatten)]
        image: ImageArgs,
        /// Explicit width (highest priority)
        #[arg(long)]
        width: Option<u32>,
        /// Explicit height (highest priority)
        #[arg(long)]
        height: Option<u32>,
    },
    /// Render an <img> element
    Render {
        url: String,
        /// Alternative text
        #[arg(long)]
        alt: Option<String>,
        #[command(flatten)]
        size: SizeArgs,
        #[command(flatten)]
        image: ImageArgs,
    },
    /// Resolve every image in a JSON manifest
    Batch {
        #[arg(value_name = "MANIFEST")]
        path: PathBuf,
        /// Print resolved images as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Rewrite { url, size } => {
            let request = size.loader_options().to_request(&url);
            println!("{}", cdn::rewrite(&request)?);
        }
        Command::Dimensions {
            image,
            width,
            height,
        } => {
            // Dimension resolution never looks at the URL.
            let source = image.image("", None);
            let explicit = SizingHint::new(width, height);
            let element = image.element_hint();
            let dims = dimensions::resolve(&source, Some(&explicit), Some(&element));
            output::print_dimensions(&dims);
        }
        Command::Render {
            url,
            alt,
            size,
            image,
        } => {
            let site_config = config::load_config(cli.config.as_deref())?;
            let source = image.image(&url, alt);
            let loader = size.loader_options();
            let element = image.element_hint();
            let html = markup::render_image(
                &source,
                Some(&loader),
                Some(&element),
                &site_config.srcset.widths,
                &site_config.markup,
            )?;
            println!("{}", html.into_string());
        }
        Command::Batch { path, json } => {
            let resolved = manifest::resolve_manifest(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                output::print_batch(&resolved);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the default of warnings only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "storefront_image=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
