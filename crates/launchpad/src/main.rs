//! Launchpad CLI - interactive React (Vite) and Next.js project setup

use anyhow::Result;
use clap::Parser;
use launchpad_core::tui::LaunchArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "launchpad")]
#[command(about = "Interactive CLI for creating React (Vite) and Next.js projects")]
#[command(version)]
pub struct Args {
    /// Local directory to read template files from instead of the bundled ones (for development use)
    #[arg(long = "template-dir", hide = true)]
    pub template_dir: Option<PathBuf>,
}

impl From<Args> for LaunchArgs {
    fn from(args: Args) -> Self {
        LaunchArgs {
            template_dir: args.template_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = launchpad_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let code = result?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
