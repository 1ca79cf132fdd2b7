use clap::Parser;
use std::path::Path;

mod blur_bg;

/// Source icon inside the Xcode asset catalog, relative to the repo root.
const SOURCE_PATH: &str = "Maccy/Assets.xcassets/AppIcon.appiconset/AppIcon (Big Sur)-1024w.png";

/// Output master written at the repo root.
const OUTPUT_PATH: &str = "FlowClipBlurMaster.png";

#[derive(Debug, Parser)]
#[clap(
    name = "blur-master",
    about = "Regenerate the blurred background master for the FlowClip app icon"
)]
struct Args {}

fn main() {
    Args::parse();

    blur_bg::generate(Path::new(SOURCE_PATH), Path::new(OUTPUT_PATH));
}
