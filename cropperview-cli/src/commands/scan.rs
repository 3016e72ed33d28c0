//! Implementation of the 'scan' subcommand.

use crate::cli::ScanArgs;
use cropperview_core::{find_video_files, CoreResult};

use console::style;

/// Lists the video files a processing run over the folder would pick up.
pub fn run(args: ScanArgs) -> CoreResult<()> {
    let files = find_video_files(&args.folder)?;
    for file in &files {
        println!("{}", file.display());
    }
    println!(
        "{} video file(s) in {}",
        style(files.len()).bold(),
        args.folder.display()
    );
    Ok(())
}
